// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state.

use super::{Message, Screen};
use crate::application::report::SessionTally;
use crate::domain::geo::BinSite;
use crate::domain::identity::Role;
use crate::i18n::fluent::I18n;
use crate::ui::capture;
use crate::ui::login;
use crate::ui::navbar::{self, ViewContext as NavbarViewContext};
use crate::ui::notifications::{self, Toast};
use crate::ui::settings;
use crate::ui::theming::ThemeMode;
use iced::{
    widget::{Column, Container, Stack},
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    /// Role read from the session store.
    pub role: Option<Role>,
    pub tally: SessionTally,
    pub login: &'a login::State,
    pub capture: &'a capture::State,
    pub settings: &'a settings::State,
    pub theme_mode: ThemeMode,
    pub site: &'a BinSite,
    pub notifications: &'a notifications::Manager,
    pub spinner_rotation: f32,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let body: Element<'_, Message> = match (ctx.screen, ctx.role) {
        (Screen::Capture, Some(role)) => with_navbar(
            &ctx,
            role,
            capture::view(
                ctx.capture,
                capture::ViewContext {
                    i18n,
                    spinner_rotation: ctx.spinner_rotation,
                },
            )
            .map(Message::Capture),
        ),
        (Screen::Settings, Some(role)) => with_navbar(
            &ctx,
            role,
            settings::view(
                ctx.settings,
                settings::ViewContext {
                    i18n,
                    role,
                    theme_mode: ctx.theme_mode,
                    site: ctx.site,
                },
            )
            .map(Message::Settings),
        ),
        // Login, or a guarded screen reached without a role.
        _ => login::view(
            ctx.login,
            login::ViewContext {
                i18n,
                spinner_rotation: ctx.spinner_rotation,
            },
        )
        .map(Message::Login),
    };

    let base = Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(base)
        .push(Toast::view_overlay(ctx.notifications, i18n).map(Message::Notification))
        .into()
}

fn with_navbar<'a>(
    ctx: &ViewContext<'a>,
    role: Role,
    content: Element<'a, Message>,
) -> Element<'a, Message> {
    let navbar_view = navbar::view(NavbarViewContext {
        i18n: ctx.i18n,
        role,
        tally: ctx.tally,
        on_capture: ctx.screen == Screen::Capture,
        on_settings: ctx.screen == Screen::Settings,
    })
    .map(Message::Navbar);

    Column::new()
        .push(navbar_view)
        .push(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
