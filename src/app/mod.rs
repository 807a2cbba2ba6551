// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the login, capture and
//! settings screens.
//!
//! The `App` struct wires together the components, the port adapters, the
//! session store and the persisted preferences, and translates component
//! events into navigation, persistence and notifications.

mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
mod screen;
pub mod services;
pub mod session;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::application::report::SessionTally;
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::capture;
use crate::ui::login;
use crate::ui::notifications::{self, Notification};
use crate::ui::settings;
use crate::ui::theming::AppTheme;
use crate::ui::widgets::animated_spinner;
use iced::{window, Element, Subscription, Task, Theme};
use services::Services;
use session::SessionStore;
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    services: Services,
    theme: AppTheme,
    session: SessionStore,
    login: login::State,
    capture: capture::State,
    settings: settings::State,
    /// Reports accepted and points earned since login.
    tally: SessionTally,
    /// Persisted application state (last role).
    app_state: persisted_state::AppState,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("role", &self.session.role())
            .field("capture", &self.capture)
            .field("tally", &self.tally)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    let icon = crate::icon::load_window_icon();

    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        icon,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_else(|| {
            tracing::warn!("boot called more than once, using default flags");
            Flags::default()
        });
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::from_parts(
            I18n::default(),
            Config::default(),
            persisted_state::AppState::default(),
            Services::instant(),
        )
    }
}

impl App {
    fn from_parts(
        i18n: I18n,
        config: Config,
        app_state: persisted_state::AppState,
        services: Services,
    ) -> Self {
        let site = config.location.bin_site();
        Self {
            i18n,
            screen: Screen::Login,
            services,
            theme: AppTheme::new(config.general.theme_mode),
            session: SessionStore::new(),
            login: login::State::new(app_state.last_role().unwrap_or_default()),
            capture: capture::State::new(site),
            settings: settings::State::new(&site),
            tally: SessionTally::default(),
            app_state,
            notifications: notifications::Manager::new(),
            spinner_rotation: 0.0,
            config,
        }
    }

    /// Loads preferences and state, then opens the identity gate.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir, flags.config_dir);

        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);
        let (app_state, state_warning) = persisted_state::AppState::load();
        let services = Services::from_config(&config);

        let mut app = Self::from_parts(i18n, config, app_state, services);
        tracing::info!(locale = %app.i18n.current_locale(), "application started");

        // Show warnings for config/state loading issues
        for key in [config_warning, state_warning].into_iter().flatten() {
            app.notifications.push(Notification::warning(&key));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.screen {
            Screen::Login => app_name,
            screen => format!("{} - {app_name}", self.i18n.tr(screen.title_key())),
        }
    }

    fn theme(&self) -> Theme {
        self.theme.to_iced()
    }

    fn is_busy(&self) -> bool {
        self.login.is_pending() || self.capture.is_busy()
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(
            self.notifications.has_notifications(),
            self.is_busy(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &mut self.i18n,
            screen: &mut self.screen,
            config: &mut self.config,
            services: &mut self.services,
            theme: &mut self.theme,
            session: &mut self.session,
            login: &mut self.login,
            capture: &mut self.capture,
            settings: &mut self.settings,
            tally: &mut self.tally,
            app_state: &mut self.app_state,
            notifications: &mut self.notifications,
        };

        match message {
            Message::Login(login_message) => update::handle_login_message(&mut ctx, login_message),
            Message::Capture(capture_message) => {
                update::handle_capture_message(&mut ctx, capture_message)
            }
            Message::Settings(settings_message) => {
                update::handle_settings_message(&mut ctx, settings_message)
            }
            Message::Navbar(navbar_message) => {
                update::handle_navbar_message(&mut ctx, navbar_message)
            }
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::Tick(_instant) => {
                // Tick notification manager to handle auto-dismiss
                self.notifications.tick();
                if self.is_busy() {
                    self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
                }
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            role: self.session.role(),
            tally: self.tally,
            login: &self.login,
            capture: &self.capture,
            settings: &self.settings,
            theme_mode: self.theme.mode,
            site: self.capture.session().site(),
            notifications: &self.notifications,
            spinner_rotation: self.spinner_rotation,
        })
    }
}
