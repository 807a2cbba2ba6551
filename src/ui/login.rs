// SPDX-License-Identifier: MPL-2.0
//! Identity gate: role choice, identifier step and one-time code step.
//!
//! The component owns the typed input and the step machine. Calls to the
//! [`IdentityVerifier`](crate::application::port::IdentityVerifier) run in
//! delayed tasks whose results come back as [`Message::CodeRequested`] and
//! [`Message::CodeVerified`].

use crate::app::services::{self, Services};
use crate::application::port::{CodeDispatch, IdentityError};
use crate::domain::identity::{
    sanitize_digits, CredentialError, Identifier, OneTimeCode, Role, CODE_LEN, IDENTIFIER_LEN,
};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, radio, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Task};
use std::sync::Arc;

/// Which form is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    Identifier,
    /// The identifier and role were accepted and a code was sent.
    Code { identifier: Identifier, role: Role },
}

/// Request in flight. At most one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    RequestingCode { identifier: Identifier, role: Role },
    Verifying,
}

#[derive(Debug, Clone)]
pub enum Message {
    RoleSelected(Role),
    IdentifierChanged(String),
    CodeChanged(String),
    SubmitIdentifier,
    SubmitCode,
    Back,
    CodeRequested(Result<CodeDispatch, IdentityError>),
    CodeVerified(Result<(), IdentityError>),
}

/// Outcomes the shell reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// A code was dispatched; the code step is showing.
    CodeSent(CodeDispatch),
    /// The pair was accepted. Carries the role chosen before the identifier step.
    Authenticated(Role),
    /// The backend refused or could not be reached. The step is unchanged.
    Failed(IdentityError),
}

#[derive(Debug, Clone)]
pub struct State {
    role: Role,
    identifier_input: String,
    code_input: String,
    step: LoginStep,
    pending: Option<Pending>,
    error: Option<CredentialError>,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Role::default())
    }
}

impl State {
    /// Fresh gate with `role` preselected.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            identifier_input: String::new(),
            code_input: String::new(),
            step: LoginStep::Identifier,
            pending: None,
            error: None,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn step(&self) -> &LoginStep {
        &self.step
    }

    #[must_use]
    pub fn identifier_input(&self) -> &str {
        &self.identifier_input
    }

    #[must_use]
    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<CredentialError> {
        self.error
    }

    /// The role radio only reacts on an idle identifier step.
    #[must_use]
    pub fn can_change_role(&self) -> bool {
        matches!(self.step, LoginStep::Identifier) && self.pending.is_none()
    }

    #[must_use]
    pub fn can_submit_identifier(&self) -> bool {
        self.pending.is_none() && self.identifier_input.len() == IDENTIFIER_LEN
    }

    #[must_use]
    pub fn can_submit_code(&self) -> bool {
        self.pending.is_none() && self.code_input.len() == CODE_LEN
    }

    pub fn handle_message(&mut self, message: Message, services: &Services) -> (Event, Task<Message>) {
        match message {
            Message::RoleSelected(role) => {
                if self.can_change_role() {
                    self.role = role;
                }
                (Event::None, Task::none())
            }
            Message::IdentifierChanged(raw) => {
                if matches!(self.step, LoginStep::Identifier) && self.pending.is_none() {
                    self.identifier_input = sanitize_digits(&raw, IDENTIFIER_LEN);
                    self.error = None;
                }
                (Event::None, Task::none())
            }
            Message::CodeChanged(raw) => {
                if matches!(self.step, LoginStep::Code { .. }) && self.pending.is_none() {
                    self.code_input = sanitize_digits(&raw, CODE_LEN);
                    self.error = None;
                }
                (Event::None, Task::none())
            }
            Message::SubmitIdentifier => (Event::None, self.submit_identifier(services)),
            Message::SubmitCode => (Event::None, self.submit_code(services)),
            Message::Back => {
                if self.pending.is_none() && matches!(self.step, LoginStep::Code { .. }) {
                    tracing::debug!("login: back to identifier step");
                    self.step = LoginStep::Identifier;
                    self.code_input.clear();
                    self.error = None;
                }
                (Event::None, Task::none())
            }
            Message::CodeRequested(result) => (self.code_requested(result), Task::none()),
            Message::CodeVerified(result) => (self.code_verified(result), Task::none()),
        }
    }

    fn submit_identifier(&mut self, services: &Services) -> Task<Message> {
        if self.pending.is_some() || !matches!(self.step, LoginStep::Identifier) {
            return Task::none();
        }
        let identifier = match Identifier::parse(&self.identifier_input) {
            Ok(identifier) => identifier,
            Err(err) => {
                tracing::debug!(%err, "login: identifier rejected");
                self.error = Some(err);
                return Task::none();
            }
        };

        tracing::info!(%identifier, role = %self.role, "login: requesting one-time code");
        self.error = None;
        self.pending = Some(Pending::RequestingCode {
            identifier: identifier.clone(),
            role: self.role,
        });

        let verifier = Arc::clone(&services.identity);
        Task::perform(
            services::delayed(services.timing.code_delay, move || {
                verifier.request_code(&identifier)
            }),
            Message::CodeRequested,
        )
    }

    fn submit_code(&mut self, services: &Services) -> Task<Message> {
        let LoginStep::Code { identifier, .. } = &self.step else {
            return Task::none();
        };
        if self.pending.is_some() {
            return Task::none();
        }
        let code = match OneTimeCode::parse(&self.code_input) {
            Ok(code) => code,
            Err(err) => {
                tracing::debug!(%err, "login: code rejected");
                self.error = Some(err);
                return Task::none();
            }
        };

        tracing::info!(%identifier, "login: verifying one-time code");
        self.error = None;
        self.pending = Some(Pending::Verifying);

        let verifier = Arc::clone(&services.identity);
        let identifier = identifier.clone();
        Task::perform(
            services::delayed(services.timing.verify_delay, move || {
                verifier.verify_code(&identifier, &code)
            }),
            Message::CodeVerified,
        )
    }

    fn code_requested(&mut self, result: Result<CodeDispatch, IdentityError>) -> Event {
        let Some(Pending::RequestingCode { identifier, role }) = self.pending.take() else {
            tracing::debug!("login: ignoring unexpected code dispatch result");
            return Event::None;
        };
        match result {
            Ok(dispatch) => {
                tracing::info!(%identifier, valid_minutes = dispatch.valid_minutes(), "login: code sent");
                self.step = LoginStep::Code { identifier, role };
                self.code_input.clear();
                Event::CodeSent(dispatch)
            }
            Err(err) => {
                tracing::warn!(%identifier, %err, "login: code request failed");
                Event::Failed(err)
            }
        }
    }

    fn code_verified(&mut self, result: Result<(), IdentityError>) -> Event {
        if self.pending.take() != Some(Pending::Verifying) {
            tracing::debug!("login: ignoring unexpected verification result");
            return Event::None;
        }
        let LoginStep::Code { identifier, role } = &self.step else {
            return Event::None;
        };
        match result {
            Ok(()) => {
                tracing::info!(%identifier, %role, "login: authenticated");
                Event::Authenticated(*role)
            }
            Err(err) => {
                tracing::warn!(%identifier, %err, "login: verification failed");
                Event::Failed(err)
            }
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub spinner_rotation: f32,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let title = Text::new(i18n.tr("login-title"))
        .size(typography::TITLE_LG)
        .style(styles::text::brand);
    let subtitle = Text::new(i18n.tr("login-subtitle"))
        .size(typography::BODY)
        .style(styles::text::muted);

    // Selections made while locked are dropped in `handle_message`.
    let roles = Role::ALL.iter().fold(Row::new().spacing(spacing::LG), |row, &role| {
        let label = i18n.tr(&format!("login-{}", role.i18n_key()));
        row.push(radio(label, role, Some(state.role), Message::RoleSelected).size(sizing::ICON_SM))
    });

    let mut form = Column::new()
        .spacing(spacing::MD)
        .push(title)
        .push(subtitle)
        .push(
            Column::new()
                .spacing(spacing::XS)
                .push(Text::new(i18n.tr("login-role-label")).size(typography::BODY_SM))
                .push(roles),
        );

    form = match &state.step {
        LoginStep::Identifier => form.push(identifier_form(state, i18n)),
        LoginStep::Code { identifier, .. } => form.push(code_form(state, identifier, i18n)),
    };

    if let Some(err) = state.error {
        form = form.push(
            Text::new(i18n.tr(err.i18n_key()))
                .size(typography::BODY_SM)
                .style(styles::text::error),
        );
    }

    if state.is_pending() {
        form = form.push(
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(AnimatedSpinner::new(palette::PRIMARY_500, ctx.spinner_rotation)
                    .size(sizing::ICON_MD)
                    .into_element())
                .push(Text::new(i18n.tr("login-pending")).size(typography::BODY_SM)),
        );
    }

    Container::new(
        Container::new(form)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::panel),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn identifier_form<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let mut input = text_input(&i18n.tr("login-identifier-placeholder"), &state.identifier_input)
        .size(typography::BODY_LG)
        .padding(spacing::XS);
    if !state.is_pending() {
        input = input
            .on_input(Message::IdentifierChanged)
            .on_submit(Message::SubmitIdentifier);
    }

    let submit = button(Text::new(i18n.tr("login-send-code")))
        .on_press_maybe(state.can_submit_identifier().then_some(Message::SubmitIdentifier))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);

    Column::new()
        .spacing(spacing::XS)
        .push(Text::new(i18n.tr("login-identifier-label")).size(typography::BODY_SM))
        .push(input)
        .push(
            Text::new(i18n.tr_with_args(
                "login-digit-count",
                &[
                    ("count", &state.identifier_input.len().to_string()),
                    ("total", &IDENTIFIER_LEN.to_string()),
                ],
            ))
            .size(typography::CAPTION)
            .style(styles::text::muted),
        )
        .push(submit)
        .into()
}

fn code_form<'a>(state: &'a State, identifier: &'a Identifier, i18n: &'a I18n) -> Element<'a, Message> {
    let mut input = text_input(&i18n.tr("login-code-placeholder"), &state.code_input)
        .size(typography::BODY_LG)
        .padding(spacing::XS);
    if !state.is_pending() {
        input = input
            .on_input(Message::CodeChanged)
            .on_submit(Message::SubmitCode);
    }

    let verify = button(Text::new(i18n.tr("login-verify")))
        .on_press_maybe(state.can_submit_code().then_some(Message::SubmitCode))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary);
    let back = button(Text::new(i18n.tr("login-back")))
        .on_press_maybe((!state.is_pending()).then_some(Message::Back))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::secondary);

    Column::new()
        .spacing(spacing::XS)
        .push(
            Text::new(i18n.tr_with_args(
                "login-code-sent-to",
                &[("identifier", &identifier.masked())],
            ))
            .size(typography::BODY_SM)
            .style(styles::text::muted),
        )
        .push(Text::new(i18n.tr("login-code-label")).size(typography::BODY_SM))
        .push(input)
        .push(Row::new().spacing(spacing::SM).push(back).push(verify))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "123456789012";

    fn services() -> Services {
        Services::instant()
    }

    fn dispatch() -> CodeDispatch {
        CodeDispatch {
            valid_for: std::time::Duration::from_secs(300),
        }
    }

    fn at_code_step(role: Role) -> State {
        let services = services();
        let mut state = State::new(role);
        state.handle_message(Message::IdentifierChanged(ID.into()), &services);
        state.handle_message(Message::SubmitIdentifier, &services);
        let (event, _) = state.handle_message(Message::CodeRequested(Ok(dispatch())), &services);
        assert_eq!(event, Event::CodeSent(dispatch()));
        state
    }

    #[test]
    fn identifier_input_is_sanitised() {
        let mut state = State::default();
        state.handle_message(
            Message::IdentifierChanged("1234-5678 9012 345".into()),
            &services(),
        );
        assert_eq!(state.identifier_input(), ID);
    }

    #[test]
    fn submit_enabled_only_with_twelve_digits() {
        let services = services();
        let mut state = State::default();
        state.handle_message(Message::IdentifierChanged("12345678901".into()), &services);
        assert!(!state.can_submit_identifier());
        state.handle_message(Message::IdentifierChanged(ID.into()), &services);
        assert!(state.can_submit_identifier());
    }

    #[test]
    fn short_identifier_is_rejected_and_stays() {
        let services = services();
        let mut state = State::default();
        state.handle_message(Message::IdentifierChanged("1234".into()), &services);
        state.handle_message(Message::SubmitIdentifier, &services);

        assert_eq!(state.step(), &LoginStep::Identifier);
        assert!(!state.is_pending());
        assert_eq!(
            state.error().map(|e| e.i18n_key()),
            Some("login-error-identifier-length")
        );
    }

    #[test]
    fn valid_identifier_goes_pending_then_code_step() {
        let services = services();
        let mut state = State::default();
        state.handle_message(Message::IdentifierChanged(ID.into()), &services);
        state.handle_message(Message::SubmitIdentifier, &services);
        assert!(state.is_pending());
        assert!(!state.can_submit_identifier());

        state.handle_message(Message::CodeRequested(Ok(dispatch())), &services);
        assert!(!state.is_pending());
        assert!(matches!(state.step(), LoginStep::Code { .. }));
    }

    #[test]
    fn role_is_locked_while_pending_and_on_code_step() {
        let services = services();
        let mut state = State::new(Role::Employee);
        state.handle_message(Message::IdentifierChanged(ID.into()), &services);
        state.handle_message(Message::SubmitIdentifier, &services);
        state.handle_message(Message::RoleSelected(Role::Collector), &services);
        assert_eq!(state.role(), Role::Employee);

        state.handle_message(Message::CodeRequested(Ok(dispatch())), &services);
        state.handle_message(Message::RoleSelected(Role::Collector), &services);
        assert_eq!(state.role(), Role::Employee);
    }

    #[test]
    fn invalid_code_is_rejected() {
        let services = services();
        let mut state = at_code_step(Role::Collector);
        state.handle_message(Message::CodeChanged("12a4".into()), &services);
        assert_eq!(state.code_input(), "124");
        state.handle_message(Message::SubmitCode, &services);

        assert!(!state.is_pending());
        assert_eq!(
            state.error().map(|e| e.i18n_key()),
            Some("login-error-code-length")
        );
    }

    #[test]
    fn success_reports_role_chosen_before_identifier_step() {
        let services = services();
        let mut state = at_code_step(Role::Employee);
        state.handle_message(Message::CodeChanged("654321".into()), &services);
        state.handle_message(Message::SubmitCode, &services);
        assert!(state.is_pending());

        let (event, _) = state.handle_message(Message::CodeVerified(Ok(())), &services);
        assert_eq!(event, Event::Authenticated(Role::Employee));
    }

    #[test]
    fn back_keeps_identifier_and_is_ignored_while_pending() {
        let services = services();
        let mut state = at_code_step(Role::Collector);
        state.handle_message(Message::CodeChanged("654321".into()), &services);
        state.handle_message(Message::SubmitCode, &services);

        state.handle_message(Message::Back, &services);
        assert!(matches!(state.step(), LoginStep::Code { .. }));

        state.handle_message(Message::CodeVerified(Err(IdentityError::CodeMismatch)), &services);
        state.handle_message(Message::Back, &services);
        assert_eq!(state.step(), &LoginStep::Identifier);
        assert_eq!(state.identifier_input(), ID);
        assert_eq!(state.code_input(), "");
    }

    #[test]
    fn port_failure_keeps_the_step() {
        let services = services();
        let mut state = State::default();
        state.handle_message(Message::IdentifierChanged(ID.into()), &services);
        state.handle_message(Message::SubmitIdentifier, &services);

        let err = IdentityError::Unreachable("offline".into());
        let (event, _) = state.handle_message(Message::CodeRequested(Err(err.clone())), &services);

        assert_eq!(event, Event::Failed(err));
        assert_eq!(state.step(), &LoginStep::Identifier);
        assert!(!state.is_pending());
    }

    #[test]
    fn stray_results_are_ignored() {
        let services = services();
        let mut state = State::default();
        let (event, _) = state.handle_message(Message::CodeVerified(Ok(())), &services);
        assert_eq!(event, Event::None);
        let (event, _) = state.handle_message(Message::CodeRequested(Ok(dispatch())), &services);
        assert_eq!(event, Event::None);
        assert_eq!(state.step(), &LoginStep::Identifier);
    }
}
