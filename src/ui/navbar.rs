// SPDX-License-Identifier: MPL-2.0
//! Navigation bar shown once a role is stored in the session.
//!
//! Shows the application name, the signed-in role and the session tally,
//! with entries for the capture flow, settings and logout.

use crate::application::report::SessionTally;
use crate::domain::identity::Role;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, Container, Row, Space, Text},
    Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub role: Role,
    pub tally: SessionTally,
    /// Whether the capture screen is the active one.
    pub on_capture: bool,
    /// Whether the settings screen is the active one.
    pub on_settings: bool,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenCapture,
    OpenSettings,
    Logout,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    OpenCapture,
    OpenSettings,
    Logout,
}

/// Process a navbar message and return the corresponding event.
#[must_use]
pub fn update(message: Message) -> Event {
    match message {
        Message::OpenCapture => Event::OpenCapture,
        Message::OpenSettings => Event::OpenSettings,
        Message::Logout => Event::Logout,
    }
}

fn entry<'a>(label: String, active: bool, message: Message) -> Element<'a, Message> {
    let style = if active {
        styles::button::selected
    } else {
        styles::button::secondary
    };
    button(Text::new(label).size(typography::BODY))
        .on_press(message)
        .padding([spacing::XXS, spacing::SM])
        .style(style)
        .into()
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let role_badge = Container::new(Text::new(i18n.tr(ctx.role.i18n_key())).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::badge(palette::PRIMARY_600));

    let tally = Text::new(i18n.tr_with_args(
        "navbar-tally",
        &[
            ("reports", &ctx.tally.reports.to_string()),
            ("points", &ctx.tally.points.to_string()),
        ],
    ))
    .size(typography::BODY_SM)
    .style(styles::text::muted);

    let bar = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(
            Text::new(i18n.tr("app-name"))
                .size(typography::TITLE_SM)
                .style(styles::text::brand),
        )
        .push(role_badge)
        .push(tally)
        .push(Space::new().width(Length::Fill))
        .push(entry(i18n.tr("navbar-capture"), ctx.on_capture, Message::OpenCapture))
        .push(entry(i18n.tr("navbar-settings"), ctx.on_settings, Message::OpenSettings))
        .push(
            button(Text::new(i18n.tr("navbar-logout")).size(typography::BODY))
                .on_press(Message::Logout)
                .padding([spacing::XXS, spacing::SM])
                .style(styles::button::danger),
        );

    Container::new(bar)
        .width(Length::Fill)
        .padding([spacing::XS, spacing::MD])
        .style(styles::container::navbar)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_map_to_events() {
        assert_eq!(update(Message::OpenCapture), Event::OpenCapture);
        assert_eq!(update(Message::OpenSettings), Event::OpenSettings);
        assert_eq!(update(Message::Logout), Event::Logout);
    }

    #[test]
    fn view_renders_for_each_role() {
        let i18n = I18n::default();
        for role in Role::ALL {
            let _element = view(ViewContext {
                i18n: &i18n,
                role,
                tally: SessionTally::default(),
                on_capture: true,
                on_settings: false,
            });
        }
    }
}
