// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of the
//! application it may touch, forwards the message to the component and turns
//! the resulting event into screen changes, persistence and notifications.

use super::persisted_state::AppState;
use super::services::Services;
use super::session::SessionStore;
use super::{persistence, Message, Screen};
use crate::application::report::SessionTally;
use crate::config::Config;
use crate::domain::identity::Role;
use crate::i18n::fluent::I18n;
use crate::ui::capture::{self, Effect as CaptureEffect};
use crate::ui::login::{self, Event as LoginEvent};
use crate::ui::navbar::{self, Event as NavbarEvent};
use crate::ui::notifications::{self, Notification};
use crate::ui::settings::{self, Event as SettingsEvent};
use crate::ui::theming::AppTheme;
use iced::Task;

/// Mutable view of the application used by the message handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub screen: &'a mut Screen,
    pub config: &'a mut Config,
    pub services: &'a mut Services,
    pub theme: &'a mut AppTheme,
    pub session: &'a mut SessionStore,
    pub login: &'a mut login::State,
    pub capture: &'a mut capture::State,
    pub settings: &'a mut settings::State,
    pub tally: &'a mut SessionTally,
    pub app_state: &'a mut AppState,
    pub notifications: &'a mut notifications::Manager,
}

impl UpdateContext<'_> {
    fn notify_saved(&mut self, failure: Option<&'static str>) {
        if let Some(key) = failure {
            self.notifications.push(Notification::warning(key));
        }
    }
}

pub fn handle_login_message(ctx: &mut UpdateContext<'_>, message: login::Message) -> Task<Message> {
    let (event, task) = ctx.login.handle_message(message, ctx.services);
    match event {
        LoginEvent::None => {}
        LoginEvent::CodeSent(dispatch) => {
            ctx.notifications.push(
                Notification::success("notification-otp-sent")
                    .with_arg("minutes", dispatch.valid_minutes().to_string()),
            );
        }
        LoginEvent::Authenticated(role) => authenticate(ctx, role),
        LoginEvent::Failed(err) => {
            ctx.notifications.push(Notification::error(err.i18n_key()));
        }
    }
    task.map(Message::Login)
}

/// Stores `role` for the session and opens the capture flow.
fn authenticate(ctx: &mut UpdateContext<'_>, role: Role) {
    tracing::info!(%role, "login successful");
    ctx.session.set_role(role);
    *ctx.tally = SessionTally::default();
    *ctx.login = login::State::new(role);

    ctx.app_state.remember_role(role);
    if let Some(key) = ctx.app_state.save() {
        ctx.notifications.push(Notification::warning(&key));
    }

    ctx.notifications.clear_with_prefix("identity-error-");
    ctx.notifications.push(
        Notification::success("notification-login-success")
            .with_arg("role", ctx.i18n.tr(role.i18n_key())),
    );
    *ctx.screen = Screen::Capture;
}

pub fn handle_capture_message(
    ctx: &mut UpdateContext<'_>,
    message: capture::Message,
) -> Task<Message> {
    let Some(role) = ctx.session.role() else {
        tracing::debug!(?message, "capture message without a session, ignored");
        return Task::none();
    };

    let capture_ctx = capture::Context {
        services: ctx.services,
        i18n: ctx.i18n,
        role,
    };
    let (effect, task) = ctx.capture.handle_message(message, &capture_ctx);

    match effect {
        CaptureEffect::None => {}
        CaptureEffect::Notify(notes) => {
            for note in notes {
                ctx.notifications.push(note);
            }
        }
        CaptureEffect::ReportAccepted(report) => {
            ctx.tally.record(&report);
            tracing::info!(
                reports = ctx.tally.reports,
                points = ctx.tally.points,
                "session tally updated"
            );
        }
    }
    task.map(Message::Capture)
}

pub fn handle_settings_message(
    ctx: &mut UpdateContext<'_>,
    message: settings::Message,
) -> Task<Message> {
    let Some(role) = ctx.session.role() else {
        return Task::none();
    };

    match ctx.settings.update(message, role) {
        SettingsEvent::None => {}
        SettingsEvent::LanguageChanged(locale) => {
            let failure = persistence::apply_language_change(ctx.i18n, ctx.config, locale);
            ctx.notify_saved(failure);
        }
        SettingsEvent::ThemeModeChanged(mode) => {
            tracing::info!(?mode, "theme mode changed");
            *ctx.theme = AppTheme::new(mode);
            ctx.config.general.theme_mode = mode;
            let failure = persistence::persist_config(ctx.config);
            ctx.notify_saved(failure);
        }
        SettingsEvent::SiteChanged(site) => {
            ctx.config.location.set_bin_site(&site);
            ctx.capture.set_site(site);
            ctx.services.recentre_gps(ctx.config);
            ctx.settings.sync(&site);
            ctx.notifications
                .push(Notification::success("notification-site-saved"));
            let failure = persistence::persist_config(ctx.config);
            ctx.notify_saved(failure);
        }
    }
    Task::none()
}

pub fn handle_navbar_message(
    ctx: &mut UpdateContext<'_>,
    message: navbar::Message,
) -> Task<Message> {
    if ctx.session.role().is_none() {
        return Task::none();
    }
    if ctx.capture.has_blocking_dialog() {
        tracing::debug!(?message, "navigation blocked by the submission dialog");
        return Task::none();
    }

    match navbar::update(message) {
        NavbarEvent::OpenCapture => *ctx.screen = Screen::Capture,
        NavbarEvent::OpenSettings => {
            ctx.capture.suspend();
            ctx.settings.sync(&ctx.config.location.bin_site());
            *ctx.screen = Screen::Settings;
        }
        NavbarEvent::Logout => logout(ctx),
    }
    Task::none()
}

/// Clears the session and returns to the identity gate.
fn logout(ctx: &mut UpdateContext<'_>) {
    let role = ctx.session.role();
    tracing::info!(?role, "logout");

    ctx.session.clear();
    ctx.capture.shut_down();
    *ctx.tally = SessionTally::default();
    ctx.notifications.clear();

    let preselected = ctx.app_state.last_role().or(role).unwrap_or_default();
    *ctx.login = login::State::new(preselected);
    *ctx.screen = Screen::Login;
    ctx.notifications
        .push(Notification::info("notification-logged-out"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::BinSite;

    struct Parts {
        i18n: I18n,
        screen: Screen,
        config: Config,
        services: Services,
        theme: AppTheme,
        session: SessionStore,
        login: login::State,
        capture: capture::State,
        settings: settings::State,
        tally: SessionTally,
        app_state: AppState,
        notifications: notifications::Manager,
    }

    impl Parts {
        fn new() -> Self {
            Self {
                i18n: I18n::default(),
                screen: Screen::Login,
                config: Config::default(),
                services: Services::instant(),
                theme: AppTheme::default(),
                session: SessionStore::new(),
                login: login::State::default(),
                capture: capture::State::new(BinSite::default()),
                settings: settings::State::new(&BinSite::default()),
                tally: SessionTally::default(),
                app_state: AppState::default(),
                notifications: notifications::Manager::new(),
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
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
            }
        }
    }

    #[test]
    fn capture_is_ignored_without_role() {
        let mut parts = Parts::new();
        let _ = handle_capture_message(&mut parts.ctx(), capture::Message::StartCamera);
        assert!(!parts.capture.is_camera_active());
    }

    #[test]
    fn navbar_is_ignored_without_role() {
        let mut parts = Parts::new();
        let _ = handle_navbar_message(&mut parts.ctx(), navbar::Message::OpenSettings);
        assert_eq!(parts.screen, Screen::Login);
    }

    #[test]
    fn employee_site_change_reaches_capture_and_config() {
        let mut parts = Parts::new();
        parts.session.set_role(Role::Employee);
        parts.screen = Screen::Settings;

        let _ = handle_settings_message(
            &mut parts.ctx(),
            settings::Message::RadiusChanged("25".into()),
        );
        let _ = handle_settings_message(&mut parts.ctx(), settings::Message::ApplySite);

        assert_eq!(parts.config.location.bin_site().radius.metres(), 25.0);
        assert_eq!(parts.capture.session().site().radius.metres(), 25.0);
    }

    #[test]
    fn opening_settings_releases_the_camera() {
        let mut parts = Parts::new();
        parts.session.set_role(Role::Collector);
        parts.screen = Screen::Capture;
        let _ = handle_capture_message(&mut parts.ctx(), capture::Message::StartCamera);
        assert!(parts.capture.is_camera_active());

        let _ = handle_navbar_message(&mut parts.ctx(), navbar::Message::OpenSettings);

        assert_eq!(parts.screen, Screen::Settings);
        assert!(!parts.capture.is_camera_active());
    }

    #[test]
    fn logout_clears_session_and_preselects_role() {
        let mut parts = Parts::new();
        parts.session.set_role(Role::Employee);
        parts.screen = Screen::Capture;
        let _ = handle_capture_message(&mut parts.ctx(), capture::Message::StartCamera);
        assert!(parts.capture.is_camera_active());

        let _ = handle_navbar_message(&mut parts.ctx(), navbar::Message::Logout);

        assert_eq!(parts.screen, Screen::Login);
        assert_eq!(parts.session.role(), None);
        assert!(!parts.capture.is_camera_active());
        assert_eq!(parts.login.role(), Role::Employee);
        assert_eq!(parts.tally, SessionTally::default());
    }

    #[test]
    fn theme_change_updates_config() {
        let mut parts = Parts::new();
        parts.session.set_role(Role::Collector);
        let _ = handle_settings_message(
            &mut parts.ctx(),
            settings::Message::ThemeSelected(crate::ui::theming::ThemeMode::Light),
        );
        assert_eq!(
            parts.config.general.theme_mode,
            crate::ui::theming::ThemeMode::Light
        );
        assert!(!parts.theme.is_dark());
    }
}
