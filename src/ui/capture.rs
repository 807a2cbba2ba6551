// SPDX-License-Identifier: MPL-2.0
//! Guided capture flow: pickup, disposal, verify.
//!
//! The step machine lives in [`CaptureSession`]; this component adds the
//! device side. It holds the camera lease, tags location requests with the
//! step they were issued for, numbers classification runs so that late
//! results are dropped, and owns the submission dialog.

use crate::app::services::{self, Services};
use crate::application::port::{
    open_camera, CameraLease, ClassificationError, FixSource, LocationFix, Receipt, ReportError,
};
use crate::application::report::{CaptureReport, ReportReference};
use crate::domain::capture::{
    CameraFacing, Capture, CaptureSession, CaptureStep, CapturedImage, ImageOrigin, Progress,
    TransitionError, WasteAnalysis,
};
use crate::domain::geo::{BinSite, Proximity, ProximityCheck};
use crate::domain::identity::Role;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::Notification;
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use chrono::Utc;
use iced::widget::image::Handle;
use iced::widget::{button, image, opaque, Column, Container, Row, Stack, Text};
use iced::{alignment, ContentFit, Element, Length, Task};
use std::sync::Arc;

/// Size of the flat image used when even the SVG placeholder cannot be drawn.
const BLANK_WIDTH: u32 = 4;
const BLANK_HEIGHT: u32 = 3;

#[derive(Debug, Clone)]
pub enum Message {
    StartCamera,
    TakePhoto,
    CancelCamera,
    RequestLocation,
    LocationResolved {
        step: CaptureStep,
        fix: LocationFix,
    },
    Continue,
    Back,
    Classified {
        generation: u64,
        result: Result<WasteAnalysis, ClassificationError>,
    },
    Submit,
    ReportAcknowledged {
        /// Login the report was submitted under.
        epoch: u64,
        report: Box<CaptureReport>,
        result: Result<Receipt, ReportError>,
    },
    DismissDialog,
}

/// Side effects for the shell.
#[derive(Debug)]
pub enum Effect {
    None,
    Notify(Vec<Notification>),
    /// The sink accepted the report; count it in the session tally.
    ReportAccepted(Box<CaptureReport>),
}

/// Classification of the current verify step.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Idle,
    Running,
    Ready(WasteAnalysis),
    Unavailable(ClassificationError),
}

/// Content of the blocking dialog shown after a report was accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    pub reference: ReportReference,
    pub points: u32,
}

/// What the component needs from the shell while handling a message.
pub struct Context<'a> {
    pub services: &'a Services,
    pub i18n: &'a I18n,
    pub role: Role,
}

pub struct State {
    session: CaptureSession,
    camera: Option<CameraLease>,
    /// Step of the location request in flight.
    locating: Option<CaptureStep>,
    analysis: AnalysisState,
    generation: u64,
    /// Bumped on every shut down so that late acknowledgements from a
    /// previous login are dropped.
    epoch: u64,
    submitting: bool,
    dialog: Option<Acknowledgement>,
    previews: Vec<(CapturedImage, Handle)>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("capture::State")
            .field("step", &self.session.step())
            .field("camera", &self.camera)
            .field("locating", &self.locating)
            .field("analysis", &self.analysis)
            .field("submitting", &self.submitting)
            .field("dialog", &self.dialog.is_some())
            .finish()
    }
}

impl State {
    #[must_use]
    pub fn new(site: BinSite) -> Self {
        Self {
            session: CaptureSession::new(site),
            camera: None,
            locating: None,
            analysis: AnalysisState::Idle,
            generation: 0,
            epoch: 0,
            submitting: false,
            dialog: None,
            previews: Vec::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    #[must_use]
    pub fn step(&self) -> CaptureStep {
        self.session.step()
    }

    #[must_use]
    pub fn is_camera_active(&self) -> bool {
        self.camera.is_some()
    }

    #[must_use]
    pub fn is_locating(&self) -> bool {
        self.locating.is_some()
    }

    #[must_use]
    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&Acknowledgement> {
        self.dialog.as_ref()
    }

    /// Whether the submission dialog is blocking the rest of the window.
    #[must_use]
    pub fn has_blocking_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    /// Whether something is in flight and the spinner should animate.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.locating.is_some() || self.submitting || self.analysis == AnalysisState::Running
    }

    /// Moves the reference bin. Captured artifacts are kept.
    pub fn set_site(&mut self, site: BinSite) {
        self.session.set_site(site);
    }

    /// Releases the camera while the capture screen is not shown.
    pub fn suspend(&mut self) {
        if self.camera.is_some() {
            tracing::debug!(step = %self.session.step(), "capture: camera released on leaving the screen");
        }
        self.release_camera();
    }

    /// Releases the camera and forgets every artifact. Used on logout.
    pub fn shut_down(&mut self) {
        self.release_camera();
        self.session.reset();
        self.locating = None;
        self.analysis = AnalysisState::Idle;
        self.generation = self.generation.wrapping_add(1);
        self.epoch = self.epoch.wrapping_add(1);
        self.submitting = false;
        self.dialog = None;
        self.refresh_previews();
    }

    pub fn handle_message(&mut self, message: Message, ctx: &Context<'_>) -> (Effect, Task<Message>) {
        let passes_dialog = matches!(
            message,
            Message::DismissDialog | Message::LocationResolved { .. } | Message::Classified { .. }
        );
        if self.dialog.is_some() && !passes_dialog {
            tracing::debug!(?message, "capture: ignored while the dialog is open");
            return (Effect::None, Task::none());
        }

        let mut notes = Vec::new();
        let task = match message {
            Message::StartCamera => self.start_camera(ctx, &mut notes),
            Message::TakePhoto => self.take_photo(ctx, &mut notes),
            Message::CancelCamera => {
                self.release_camera();
                Task::none()
            }
            Message::RequestLocation => self.request_location(ctx.services),
            Message::LocationResolved { step, fix } => {
                self.location_resolved(step, fix, ctx, &mut notes)
            }
            Message::Continue => match self.session.advance() {
                Ok(step) => self.entered(step, ctx),
                Err(err) => {
                    notes.push(transition_warning(&err));
                    Task::none()
                }
            },
            Message::Back => self.back(&mut notes),
            Message::Classified { generation, result } => {
                self.classified(generation, result, &mut notes);
                Task::none()
            }
            Message::Submit => self.submit(ctx, &mut notes),
            Message::ReportAcknowledged { epoch, report, result } => {
                if epoch != self.epoch {
                    tracing::debug!(reference = %report.reference, "capture: acknowledgement from a previous login dropped");
                    return (Effect::None, Task::none());
                }
                self.submitting = false;
                return match result {
                    Ok(receipt) => {
                        tracing::info!(reference = %receipt.reference, "capture: report accepted");
                        self.dialog = Some(Acknowledgement {
                            reference: receipt.reference,
                            points: report.points(),
                        });
                        (Effect::ReportAccepted(report), Task::none())
                    }
                    Err(err) => {
                        tracing::warn!(reference = %report.reference, %err, "capture: report not accepted");
                        (Effect::Notify(vec![Notification::warning(err.i18n_key())]), Task::none())
                    }
                };
            }
            Message::DismissDialog => {
                self.dialog = None;
                Task::none()
            }
        };

        let effect = if notes.is_empty() {
            Effect::None
        } else {
            Effect::Notify(notes)
        };
        (effect, task)
    }

    fn start_camera(&mut self, ctx: &Context<'_>, notes: &mut Vec<Notification>) -> Task<Message> {
        let step = self.session.step();
        if !step.collects_artifacts() {
            return Task::none();
        }
        self.release_camera();

        let mut task = self.request_location(ctx.services);
        match open_camera(ctx.services.camera.as_ref()) {
            Ok(lease) => {
                tracing::info!(%step, facing = ?lease.facing(), "capture: camera opened");
                self.camera = Some(lease);
            }
            Err(err) => {
                tracing::warn!(%step, %err, "capture: no camera, using placeholder image");
                notes.push(Notification::warning(err.i18n_key()));
                if let Some(image) = fallback_image(ctx, step) {
                    task = Task::batch([task, self.record_image(step, image, ctx, notes)]);
                }
            }
        }
        task
    }

    fn take_photo(&mut self, ctx: &Context<'_>, notes: &mut Vec<Notification>) -> Task<Message> {
        let Some(lease) = self.camera.take() else {
            return Task::none();
        };
        let step = self.session.step();
        let image = match lease.take_photo() {
            Ok(image) => {
                notes.push(Notification::success("notification-photo-captured"));
                Some(image)
            }
            Err(err) => {
                tracing::warn!(%step, %err, "capture: snapshot failed, using placeholder image");
                notes.push(Notification::warning(err.i18n_key()));
                fallback_image(ctx, step)
            }
        };
        match image {
            Some(image) => self.record_image(step, image, ctx, notes),
            None => Task::none(),
        }
    }

    fn request_location(&mut self, services: &Services) -> Task<Message> {
        let step = self.session.step();
        if !step.collects_artifacts() || self.locating == Some(step) {
            return Task::none();
        }
        tracing::debug!(%step, "capture: requesting location");
        self.locating = Some(step);
        // A restored location must not complete the step before the new fix.
        if let Err(err) = self.session.clear_location(step) {
            tracing::debug!(%step, %err, "capture: location not cleared");
        }
        Task::perform(
            services::locate(
                Arc::clone(&services.location),
                services.location_request,
                services.timing.location_latency,
            ),
            move |fix| Message::LocationResolved { step, fix },
        )
    }

    fn location_resolved(
        &mut self,
        step: CaptureStep,
        fix: LocationFix,
        ctx: &Context<'_>,
        notes: &mut Vec<Notification>,
    ) -> Task<Message> {
        if self.locating != Some(step) || step != self.session.step() {
            tracing::debug!(%step, current = %self.session.step(), "capture: discarding stale location");
            return Task::none();
        }
        self.locating = None;

        match &fix.source {
            FixSource::Provider => notes.push(
                Notification::success("notification-location-captured")
                    .with_arg("coordinate", fix.coordinate.format()),
            ),
            FixSource::Fallback(err) => notes.push(Notification::warning(err.i18n_key())),
        }

        match self.session.record_location(step, fix.coordinate) {
            Ok(progress) => {
                if step == CaptureStep::Disposal {
                    if let Some(check) = self.session.check() {
                        notes.push(proximity_notification(&check));
                    }
                }
                self.progressed(progress, ctx)
            }
            Err(err) => {
                notes.push(transition_warning(&err));
                Task::none()
            }
        }
    }

    fn record_image(
        &mut self,
        step: CaptureStep,
        image: CapturedImage,
        ctx: &Context<'_>,
        notes: &mut Vec<Notification>,
    ) -> Task<Message> {
        let result = self.session.record_image(step, image);
        self.refresh_previews();
        match result {
            Ok(progress) => self.progressed(progress, ctx),
            Err(err) => {
                notes.push(transition_warning(&err));
                Task::none()
            }
        }
    }

    fn progressed(&mut self, progress: Progress, ctx: &Context<'_>) -> Task<Message> {
        match progress {
            Progress::Stayed => Task::none(),
            Progress::Advanced(step) => self.entered(step, ctx),
        }
    }

    /// Bookkeeping after the session moved forward to `step`.
    fn entered(&mut self, step: CaptureStep, ctx: &Context<'_>) -> Task<Message> {
        tracing::info!(%step, "capture: step entered");
        self.release_camera();
        self.locating = None;
        self.refresh_previews();
        if step == CaptureStep::Verify {
            self.classify(ctx.services)
        } else {
            Task::none()
        }
    }

    fn back(&mut self, notes: &mut Vec<Notification>) -> Task<Message> {
        self.release_camera();
        match self.session.back() {
            Ok(step) => {
                tracing::info!(%step, "capture: back");
                self.locating = None;
                self.analysis = AnalysisState::Idle;
                self.generation = self.generation.wrapping_add(1);
                self.refresh_previews();
            }
            Err(err) => notes.push(transition_warning(&err)),
        }
        Task::none()
    }

    fn classify(&mut self, services: &Services) -> Task<Message> {
        let (Some(pickup), Some(disposal)) = (self.session.pickup(), self.session.disposal()) else {
            return Task::none();
        };
        self.generation = self.generation.wrapping_add(1);
        self.analysis = AnalysisState::Running;

        let generation = self.generation;
        let classifier = Arc::clone(&services.classifier);
        let pickup = pickup.image.clone();
        let disposal = disposal.image.clone();
        Task::perform(
            async move { classifier.classify(&pickup, &disposal) },
            move |result| Message::Classified { generation, result },
        )
    }

    fn classified(
        &mut self,
        generation: u64,
        result: Result<WasteAnalysis, ClassificationError>,
        notes: &mut Vec<Notification>,
    ) {
        if generation != self.generation || self.session.step() != CaptureStep::Verify {
            tracing::debug!(generation, current = self.generation, "capture: discarding stale analysis");
            return;
        }
        self.analysis = match result {
            Ok(analysis) => {
                tracing::info!(category = analysis.category.as_str(), points = analysis.points, "capture: analysis ready");
                AnalysisState::Ready(analysis)
            }
            Err(err) => {
                tracing::warn!(%err, "capture: analysis unavailable");
                notes.push(Notification::warning(err.i18n_key()));
                AnalysisState::Unavailable(err)
            }
        };
    }

    fn submit(&mut self, ctx: &Context<'_>, notes: &mut Vec<Notification>) -> Task<Message> {
        if self.submitting {
            return Task::none();
        }
        let analysis = match &self.analysis {
            AnalysisState::Ready(analysis) => Some(*analysis),
            _ => None,
        };
        let completed = match self.session.finish() {
            Ok(completed) => completed,
            Err(err) => {
                notes.push(transition_warning(&err));
                return Task::none();
            }
        };

        self.release_camera();
        self.locating = None;
        self.analysis = AnalysisState::Idle;
        self.generation = self.generation.wrapping_add(1);
        self.refresh_previews();
        self.submitting = true;

        let report = CaptureReport::new(ctx.role, completed, analysis, Utc::now());
        tracing::info!(reference = %report.reference, role = %report.role, "capture: submitting report");

        let sink = Arc::clone(&ctx.services.reports);
        let epoch = self.epoch;
        Task::perform(
            async move {
                let result = sink.submit(&report);
                (report, result)
            },
            move |(report, result)| Message::ReportAcknowledged {
                epoch,
                report: Box::new(report),
                result,
            },
        )
    }

    fn release_camera(&mut self) {
        if let Some(mut lease) = self.camera.take() {
            lease.release();
        }
    }

    /// Keeps one image handle per image currently shown so that textures are
    /// not re-uploaded on every frame.
    fn refresh_previews(&mut self) {
        let shown: Vec<CapturedImage> = [
            self.session.current_image(),
            self.session.pickup().map(|c| &c.image),
            self.session.disposal().map(|c| &c.image),
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

        let mut previous = std::mem::take(&mut self.previews);
        for image in shown {
            if self.previews.iter().any(|(kept, _)| *kept == image) {
                continue;
            }
            let handle = match previous.iter().position(|(kept, _)| *kept == image) {
                Some(pos) => previous.swap_remove(pos).1,
                None => Handle::from_rgba(image.width(), image.height(), image.rgba_bytes().to_vec()),
            };
            self.previews.push((image, handle));
        }
    }

    fn preview(&self, image: &CapturedImage) -> Option<&Handle> {
        self.previews
            .iter()
            .find(|(kept, _)| kept == image)
            .map(|(_, handle)| handle)
    }
}

fn transition_warning(err: &TransitionError) -> Notification {
    tracing::warn!(%err, "capture: transition refused");
    Notification::warning(err.i18n_key())
}

fn proximity_notification(check: &ProximityCheck) -> Notification {
    let note = match check.proximity {
        Proximity::WithinRange => Notification::success(check.proximity.i18n_key()),
        Proximity::TooFar => Notification::warning(check.proximity.i18n_key()),
    };
    note.with_arg("distance", check.distance.to_string())
}

fn placeholder_label_key(step: CaptureStep) -> &'static str {
    match step {
        CaptureStep::Pickup => "capture-placeholder-pickup",
        CaptureStep::Disposal | CaptureStep::Verify => "capture-placeholder-disposal",
    }
}

/// Labelled placeholder for `step`, or a flat grey image if rendering fails.
fn fallback_image(ctx: &Context<'_>, step: CaptureStep) -> Option<CapturedImage> {
    let label = ctx.i18n.tr(placeholder_label_key(step));
    match ctx.services.placeholders.render_fallback(&label) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::error!(%err, "capture: placeholder rendering failed");
            let pixels = [0xd1, 0xd5, 0xdb, 0xff].repeat((BLANK_WIDTH * BLANK_HEIGHT) as usize);
            CapturedImage::from_rgba(BLANK_WIDTH, BLANK_HEIGHT, pixels, ImageOrigin::Placeholder).ok()
        }
    }
}

// =============================================================================
// View
// =============================================================================

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub spinner_rotation: f32,
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let step = state.session.step();

    let header = Column::new()
        .spacing(spacing::XXS)
        .push(
            Text::new(i18n.tr_with_args(
                "capture-step-indicator",
                &[
                    ("number", &step.number().to_string()),
                    ("total", &CaptureStep::ALL.len().to_string()),
                ],
            ))
            .size(typography::CAPTION)
            .style(styles::text::muted),
        )
        .push(
            Text::new(i18n.tr(step.title_key()))
                .size(typography::TITLE_MD)
                .style(styles::text::brand),
        );

    let body = match step {
        CaptureStep::Pickup | CaptureStep::Disposal => artifact_step(state, &ctx),
        CaptureStep::Verify => verify_step(state, &ctx),
    };

    let card = Container::new(Column::new().spacing(spacing::MD).push(header).push(body))
        .padding(spacing::LG)
        .max_width(sizing::PREVIEW_WIDTH + 2.0 * spacing::LG + 2.0 * spacing::XL)
        .style(styles::container::panel);

    let page = Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .center_x(Length::Fill);

    match &state.dialog {
        Some(ack) => Stack::new().push(page).push(opaque(dialog(ack, i18n))).into(),
        None => page.into(),
    }
}

fn spinner<'a>(ctx: &ViewContext<'_>) -> Element<'a, Message> {
    AnimatedSpinner::new(palette::PRIMARY_500, ctx.spinner_rotation)
        .size(sizing::ICON_SM)
        .into_element()
}

fn action<'a>(label: String, message: Option<Message>, primary: bool) -> Element<'a, Message> {
    let style = if primary {
        styles::button::primary
    } else {
        styles::button::secondary
    };
    button(Text::new(label).size(typography::BODY))
        .on_press_maybe(message)
        .padding([spacing::XS, spacing::MD])
        .style(style)
        .into()
}

fn image_frame<'a>(
    state: &'a State,
    source: Option<&CapturedImage>,
    empty_text: String,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match source.and_then(|img| state.preview(img)) {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Text::new(empty_text)
            .size(typography::BODY_SM)
            .style(styles::text::muted)
            .into(),
    };
    Container::new(content)
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(styles::container::preview)
        .into()
}

fn proximity_badge<'a>(check: &ProximityCheck, i18n: &I18n) -> Element<'a, Message> {
    let accent = if check.proximity.is_within_range() {
        palette::SUCCESS_500
    } else {
        palette::WARNING_500
    };
    Container::new(
        Text::new(i18n.tr_with_args(
            check.proximity.i18n_key(),
            &[("distance", &check.distance.to_string())],
        ))
        .size(typography::BODY_SM),
    )
    .padding([spacing::XXS, spacing::SM])
    .style(styles::container::badge(accent))
    .into()
}

fn artifact_step<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let step = state.session.step();

    let preview: Element<'a, Message> = if let Some(lease) = &state.camera {
        let facing_key = match lease.facing() {
            CameraFacing::Rear => "capture-camera-rear",
            CameraFacing::Front => "capture-camera-front",
            CameraFacing::Unspecified => "capture-camera-other",
        };
        Container::new(
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(Text::new(i18n.tr("capture-camera-live")).size(typography::BODY_LG))
                .push(Text::new(i18n.tr(facing_key)).size(typography::CAPTION).style(styles::text::muted)),
        )
        .width(Length::Fixed(sizing::PREVIEW_WIDTH))
        .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
        .center_x(Length::Fixed(sizing::PREVIEW_WIDTH))
        .center_y(Length::Fixed(sizing::PREVIEW_HEIGHT))
        .style(styles::container::preview)
        .into()
    } else {
        image_frame(
            state,
            state.session.current_image(),
            i18n.tr("capture-no-image"),
            sizing::PREVIEW_WIDTH,
            sizing::PREVIEW_HEIGHT,
        )
    };

    let location_line: Element<'a, Message> = match (state.locating == Some(step), state.session.current_location()) {
        (true, _) => Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(spinner(ctx))
            .push(Text::new(i18n.tr("capture-locating")).size(typography::BODY_SM))
            .into(),
        (false, Some(coordinate)) => Text::new(i18n.tr_with_args(
            "capture-location",
            &[("coordinate", &coordinate.format())],
        ))
        .size(typography::BODY_SM)
        .into(),
        (false, None) => Text::new(i18n.tr("capture-no-location"))
            .size(typography::BODY_SM)
            .style(styles::text::muted)
            .into(),
    };

    let camera_actions = if state.camera.is_some() {
        Row::new()
            .spacing(spacing::SM)
            .push(action(i18n.tr("capture-take-photo"), Some(Message::TakePhoto), true))
            .push(action(i18n.tr("capture-cancel-camera"), Some(Message::CancelCamera), false))
    } else {
        let label = if state.session.current_image().is_some() {
            i18n.tr("capture-retake")
        } else {
            i18n.tr("capture-start-camera")
        };
        Row::new().push(action(label, Some(Message::StartCamera), true))
    };

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr(instruction_key(step))).size(typography::BODY).style(styles::text::muted))
        .push(preview)
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(location_line)
                .push(action(
                    i18n.tr("capture-get-location"),
                    (!state.is_locating()).then_some(Message::RequestLocation),
                    false,
                )),
        );

    if let Some(check) = state.session.check() {
        column = column.push(proximity_badge(&check, i18n));
    }

    let navigation = Row::new()
        .spacing(spacing::SM)
        .push(action(
            i18n.tr("capture-back"),
            step.previous().map(|_| Message::Back),
            false,
        ))
        .push(action(
            i18n.tr("capture-continue"),
            state.session.is_step_complete().then_some(Message::Continue),
            false,
        ));

    column.push(camera_actions).push(navigation).into()
}

fn instruction_key(step: CaptureStep) -> &'static str {
    match step {
        CaptureStep::Pickup => "capture-pickup-instructions",
        CaptureStep::Disposal => "capture-disposal-instructions",
        CaptureStep::Verify => "capture-verify-instructions",
    }
}

fn capture_summary<'a>(
    state: &'a State,
    i18n: &I18n,
    title_key: &str,
    capture: Option<&Capture>,
) -> Column<'a, Message> {
    let location = capture.map_or_else(String::new, |c| c.location.format());
    Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(i18n.tr(title_key)).size(typography::BODY_SM))
        .push(image_frame(
            state,
            capture.map(|c| &c.image),
            i18n.tr("capture-no-image"),
            sizing::THUMBNAIL_WIDTH,
            sizing::THUMBNAIL_HEIGHT,
        ))
        .push(
            Text::new(location)
                .size(typography::CAPTION)
                .style(styles::text::muted),
        )
}

fn verify_step<'a>(state: &'a State, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let session = &state.session;

    let captures = Row::new()
        .spacing(spacing::MD)
        .push(capture_summary(state, i18n, "capture-summary-pickup", session.pickup()))
        .push(capture_summary(state, i18n, "capture-summary-disposal", session.disposal()));

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr(instruction_key(CaptureStep::Verify))).size(typography::BODY).style(styles::text::muted))
        .push(captures);

    if let Some(check) = session.check() {
        column = column.push(proximity_badge(&check, i18n));
    }

    let analysis: Element<'a, Message> = match &state.analysis {
        AnalysisState::Idle | AnalysisState::Running => Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(spinner(ctx))
            .push(Text::new(i18n.tr("capture-analysis-running")).size(typography::BODY_SM))
            .into(),
        AnalysisState::Ready(analysis) => Column::new()
            .spacing(spacing::XXS)
            .push(Text::new(i18n.tr("capture-analysis-title")).size(typography::TITLE_SM))
            .push(Text::new(i18n.tr_with_args(
                "capture-analysis-category",
                &[("category", &i18n.tr(analysis.category.i18n_key()))],
            )))
            .push(Text::new(i18n.tr_with_args(
                "capture-analysis-weight",
                &[("weight", &analysis.format_weight())],
            )))
            .push(
                Text::new(i18n.tr_with_args(
                    "capture-analysis-points",
                    &[("points", &analysis.points.to_string())],
                ))
                .style(styles::text::success),
            )
            .into(),
        AnalysisState::Unavailable(err) => Text::new(i18n.tr(err.i18n_key()))
            .size(typography::BODY_SM)
            .style(styles::text::warning)
            .into(),
    };
    column = column.push(analysis);

    let submit_label = if state.submitting {
        i18n.tr("capture-submitting")
    } else {
        i18n.tr("capture-submit")
    };
    column
        .push(
            Row::new()
                .spacing(spacing::SM)
                .push(action(i18n.tr("capture-back"), Some(Message::Back), false))
                .push(action(submit_label, (!state.submitting).then_some(Message::Submit), true)),
        )
        .into()
}

fn dialog<'a>(ack: &'a Acknowledgement, i18n: &'a I18n) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("capture-dialog-title")).size(typography::TITLE_SM))
        .push(
            Text::new(i18n.tr_with_args(
                "capture-dialog-reference",
                &[("reference", ack.reference.as_str())],
            ))
            .size(typography::BODY_SM)
            .style(styles::text::muted),
        )
        .push(
            Text::new(i18n.tr_with_args(
                "capture-dialog-points",
                &[("points", &ack.points.to_string())],
            ))
            .style(styles::text::success),
        )
        .push(action(i18n.tr("capture-dialog-ok"), Some(Message::DismissDialog), true));

    Container::new(
        Container::new(content)
            .width(Length::Fixed(sizing::DIALOG_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::dialog),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(styles::container::scrim)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::LocationError;
    use crate::config::{CameraBackend, Config};
    use crate::domain::capture::CompletedCapture;
    use crate::domain::geo::{Coordinate, FALLBACK_LOCATION, REFERENCE_BIN};

    struct Fixture {
        services: Services,
        i18n: I18n,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                services: Services::instant(),
                i18n: I18n::default(),
            }
        }

        fn without_camera() -> Self {
            let mut config = Config::default();
            config.capture.camera = Some(CameraBackend::None);
            Self {
                services: Services {
                    timing: services::Timing::default(),
                    ..Services::from_config(&config)
                },
                i18n: I18n::default(),
            }
        }

        fn ctx(&self) -> Context<'_> {
            Context {
                services: &self.services,
                i18n: &self.i18n,
                role: Role::Collector,
            }
        }
    }

    fn fix(coordinate: Coordinate) -> LocationFix {
        LocationFix {
            coordinate,
            source: FixSource::Provider,
        }
    }

    fn notes(effect: Effect) -> Vec<Notification> {
        match effect {
            Effect::Notify(notes) => notes,
            _ => Vec::new(),
        }
    }

    /// Photo plus location for the current step.
    fn complete_step(state: &mut State, fx: &Fixture, location: Coordinate) {
        let step = state.step();
        state.handle_message(Message::StartCamera, &fx.ctx());
        state.handle_message(Message::TakePhoto, &fx.ctx());
        state.handle_message(
            Message::LocationResolved {
                step,
                fix: fix(location),
            },
            &fx.ctx(),
        );
    }

    #[test]
    fn camera_lease_is_released_after_photo() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());

        state.handle_message(Message::StartCamera, &fx.ctx());
        assert!(state.is_camera_active());
        assert!(state.is_locating());

        state.handle_message(Message::TakePhoto, &fx.ctx());
        assert!(!state.is_camera_active());
        assert!(state.session().current_image().is_some());
        assert_eq!(state.step(), CaptureStep::Pickup);
    }

    #[test]
    fn cancel_releases_camera_without_image() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        state.handle_message(Message::StartCamera, &fx.ctx());
        state.handle_message(Message::CancelCamera, &fx.ctx());
        assert!(!state.is_camera_active());
        assert!(state.session().current_image().is_none());
    }

    #[test]
    fn missing_camera_yields_placeholder() {
        let fx = Fixture::without_camera();
        let mut state = State::new(BinSite::default());

        let (effect, _) = state.handle_message(Message::StartCamera, &fx.ctx());

        let image = state.session().current_image().expect("placeholder recorded");
        assert!(image.origin().is_placeholder());
        assert!(!state.is_camera_active());
        assert!(notes(effect)
            .iter()
            .any(|n| n.message_key() == "camera-error-not-found"));
    }

    #[test]
    fn pickup_auto_advances_when_complete() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        assert_eq!(state.step(), CaptureStep::Disposal);
        assert!(!state.is_locating());
    }

    #[test]
    fn stale_location_is_discarded() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);

        let (effect, _) = state.handle_message(
            Message::LocationResolved {
                step: CaptureStep::Pickup,
                fix: fix(Coordinate::new(0.0, 0.0)),
            },
            &fx.ctx(),
        );

        assert!(matches!(effect, Effect::None));
        assert_eq!(state.session().current_location(), None);
        assert_eq!(
            state.session().pickup().map(|c| c.location),
            Some(REFERENCE_BIN)
        );
    }

    #[test]
    fn disposal_far_from_bin_warns_but_advances() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);

        state.handle_message(Message::StartCamera, &fx.ctx());
        state.handle_message(Message::TakePhoto, &fx.ctx());
        let far = Coordinate::new(REFERENCE_BIN.latitude() + 0.0002, REFERENCE_BIN.longitude());
        let (effect, _) = state.handle_message(
            Message::LocationResolved {
                step: CaptureStep::Disposal,
                fix: fix(far),
            },
            &fx.ctx(),
        );

        assert_eq!(state.step(), CaptureStep::Verify);
        assert_eq!(state.analysis(), &AnalysisState::Running);
        assert!(notes(effect)
            .iter()
            .any(|n| n.message_key() == "proximity-too-far"));
    }

    #[test]
    fn fallback_fix_warns_and_is_recorded() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        state.handle_message(Message::RequestLocation, &fx.ctx());
        let (effect, _) = state.handle_message(
            Message::LocationResolved {
                step: CaptureStep::Pickup,
                fix: LocationFix {
                    coordinate: FALLBACK_LOCATION,
                    source: FixSource::Fallback(LocationError::PermissionDenied),
                },
            },
            &fx.ctx(),
        );
        assert_eq!(state.session().current_location(), Some(FALLBACK_LOCATION));
        assert!(notes(effect)
            .iter()
            .any(|n| n.message_key() == "location-error-permission-denied"));
    }

    #[test]
    fn unrequested_location_is_ignored() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        state.handle_message(
            Message::LocationResolved {
                step: CaptureStep::Pickup,
                fix: fix(REFERENCE_BIN),
            },
            &fx.ctx(),
        );
        assert_eq!(state.session().current_location(), None);
    }

    #[test]
    fn stale_classification_is_ignored_after_back() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        complete_step(&mut state, &fx, REFERENCE_BIN);
        assert_eq!(state.step(), CaptureStep::Verify);
        let stale = state.generation;

        state.handle_message(Message::Back, &fx.ctx());
        state.handle_message(Message::Continue, &fx.ctx());
        state.handle_message(
            Message::Classified {
                generation: stale,
                result: Ok(WasteAnalysis::default()),
            },
            &fx.ctx(),
        );
        assert_eq!(state.analysis(), &AnalysisState::Running);

        let current = state.generation;
        state.handle_message(
            Message::Classified {
                generation: current,
                result: Ok(WasteAnalysis::default()),
            },
            &fx.ctx(),
        );
        assert_eq!(state.analysis(), &AnalysisState::Ready(WasteAnalysis::default()));
    }

    #[test]
    fn back_restores_previous_artifacts() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);

        state.handle_message(Message::Back, &fx.ctx());

        assert_eq!(state.step(), CaptureStep::Pickup);
        assert!(state.session().current_image().is_some());
        assert_eq!(state.session().current_location(), Some(REFERENCE_BIN));
    }

    #[test]
    fn retake_after_back_waits_for_fresh_location() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        let far = Coordinate::new(REFERENCE_BIN.latitude() + 0.0002, REFERENCE_BIN.longitude());
        complete_step(&mut state, &fx, far);
        assert_eq!(state.step(), CaptureStep::Verify);

        state.handle_message(Message::Back, &fx.ctx());
        assert_eq!(state.session().current_location(), Some(far));

        state.handle_message(Message::StartCamera, &fx.ctx());
        assert!(state.is_locating());
        state.handle_message(Message::TakePhoto, &fx.ctx());
        assert_eq!(state.step(), CaptureStep::Disposal);
        assert!(state.is_locating());

        state.handle_message(
            Message::LocationResolved {
                step: CaptureStep::Disposal,
                fix: fix(REFERENCE_BIN),
            },
            &fx.ctx(),
        );

        assert_eq!(state.step(), CaptureStep::Verify);
        let check = state.session().check().expect("disposal recorded");
        assert_eq!(check.proximity, Proximity::WithinRange);
        assert_eq!(
            state.session().disposal().map(|c| c.location),
            Some(REFERENCE_BIN)
        );
    }

    #[test]
    fn suspend_releases_camera_and_keeps_artifacts() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        state.handle_message(Message::StartCamera, &fx.ctx());
        assert!(state.is_camera_active());

        state.suspend();

        assert!(!state.is_camera_active());
        assert_eq!(state.step(), CaptureStep::Disposal);
        assert!(state.session().pickup().is_some());
    }

    #[test]
    fn acknowledgement_from_previous_login_is_dropped() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        complete_step(&mut state, &fx, REFERENCE_BIN);
        let pickup = state.session().pickup().cloned().expect("pickup");
        let disposal = state.session().disposal().cloned().expect("disposal");
        let submitted_under = state.epoch;
        state.handle_message(Message::Submit, &fx.ctx());

        state.shut_down();

        let report = CaptureReport::new(
            Role::Collector,
            CompletedCapture {
                check: BinSite::default().check(&disposal.location),
                pickup,
                disposal,
            },
            Some(WasteAnalysis::default()),
            Utc::now(),
        );
        let receipt = Receipt {
            reference: report.reference.clone(),
            accepted_at: Utc::now(),
        };
        let (effect, _) = state.handle_message(
            Message::ReportAcknowledged {
                epoch: submitted_under,
                report: Box::new(report),
                result: Ok(receipt),
            },
            &fx.ctx(),
        );

        assert!(matches!(effect, Effect::None));
        assert!(!state.has_blocking_dialog());
    }

    #[test]
    fn submit_resets_and_acknowledgement_opens_dialog() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        complete_step(&mut state, &fx, REFERENCE_BIN);
        let current = state.generation;
        state.handle_message(
            Message::Classified {
                generation: current,
                result: Ok(WasteAnalysis::default()),
            },
            &fx.ctx(),
        );

        let pickup = state.session().pickup().cloned().expect("pickup");
        let disposal = state.session().disposal().cloned().expect("disposal");
        state.handle_message(Message::Submit, &fx.ctx());

        assert_eq!(state.step(), CaptureStep::Pickup);
        assert!(state.session().current_image().is_none());
        assert!(state.session().current_location().is_none());

        let report = CaptureReport::new(
            Role::Collector,
            CompletedCapture {
                check: BinSite::default().check(&disposal.location),
                pickup,
                disposal,
            },
            Some(WasteAnalysis::default()),
            Utc::now(),
        );
        let receipt = Receipt {
            reference: report.reference.clone(),
            accepted_at: Utc::now(),
        };
        let (effect, _) = state.handle_message(
            Message::ReportAcknowledged {
                epoch: state.epoch,
                report: Box::new(report),
                result: Ok(receipt),
            },
            &fx.ctx(),
        );

        assert!(matches!(effect, Effect::ReportAccepted(ref r) if r.points() == 42));
        assert!(state.has_blocking_dialog());

        state.handle_message(Message::StartCamera, &fx.ctx());
        assert!(!state.is_camera_active());

        state.handle_message(Message::DismissDialog, &fx.ctx());
        assert!(!state.has_blocking_dialog());
    }

    #[test]
    fn rejected_report_warns_without_dialog() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        complete_step(&mut state, &fx, REFERENCE_BIN);
        let pickup = state.session().pickup().cloned().expect("pickup");
        let disposal = state.session().disposal().cloned().expect("disposal");
        state.handle_message(Message::Submit, &fx.ctx());

        let report = CaptureReport::new(
            Role::Employee,
            CompletedCapture {
                check: BinSite::default().check(&disposal.location),
                pickup,
                disposal,
            },
            None,
            Utc::now(),
        );
        let (effect, _) = state.handle_message(
            Message::ReportAcknowledged {
                epoch: state.epoch,
                report: Box::new(report),
                result: Err(ReportError::Unavailable("offline".into())),
            },
            &fx.ctx(),
        );

        assert!(!state.has_blocking_dialog());
        assert_eq!(state.step(), CaptureStep::Pickup);
        assert!(notes(effect)
            .iter()
            .any(|n| n.message_key() == "report-error-unavailable"));
    }

    #[test]
    fn submit_outside_verify_is_refused() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        let (effect, _) = state.handle_message(Message::Submit, &fx.ctx());
        assert!(notes(effect)
            .iter()
            .any(|n| n.message_key() == "capture-error-not-ready"));
    }

    #[test]
    fn shut_down_releases_everything() {
        let fx = Fixture::new();
        let mut state = State::new(BinSite::default());
        complete_step(&mut state, &fx, REFERENCE_BIN);
        state.handle_message(Message::StartCamera, &fx.ctx());

        state.shut_down();

        assert!(!state.is_camera_active());
        assert_eq!(state.step(), CaptureStep::Pickup);
        assert!(state.session().current_image().is_none());
        assert!(state.previews.is_empty());
    }
}
