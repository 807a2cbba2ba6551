// SPDX-License-Identifier: MPL-2.0
//! Settings screen: language, theme and the reference bin.
//!
//! Language and theme apply immediately. The bin site form is only editable
//! by employees; collectors see the current values read-only. Inputs are
//! kept as raw strings and parsed with [`parse_site`] when applied, so a
//! half-typed number never reaches the configuration.

use crate::domain::geo::{radius_bounds, AcceptanceRadius, BinSite, Coordinate};
use crate::domain::identity::Role;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use std::fmt;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone)]
pub enum Message {
    LanguageSelected(LanguageIdentifier),
    ThemeSelected(ThemeMode),
    LatitudeChanged(String),
    LongitudeChanged(String),
    RadiusChanged(String),
    ApplySite,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    LanguageChanged(LanguageIdentifier),
    ThemeModeChanged(ThemeMode),
    SiteChanged(BinSite),
}

/// Field of the bin site form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteField {
    Latitude,
    Longitude,
    Radius,
}

impl SiteField {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            SiteField::Latitude => "settings-site-latitude",
            SiteField::Longitude => "settings-site-longitude",
            SiteField::Radius => "settings-site-radius",
        }
    }
}

/// Why the bin site form could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteInputError {
    InvalidNumber(SiteField),
    OutOfRange(SiteField),
}

impl SiteInputError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SiteInputError::InvalidNumber(_) => "settings-error-invalid-number",
            SiteInputError::OutOfRange(_) => "settings-error-out-of-range",
        }
    }

    #[must_use]
    pub fn field(&self) -> SiteField {
        match self {
            SiteInputError::InvalidNumber(field) | SiteInputError::OutOfRange(field) => *field,
        }
    }
}

impl fmt::Display for SiteInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteInputError::InvalidNumber(field) => write!(f, "{field:?} is not a number"),
            SiteInputError::OutOfRange(field) => write!(f, "{field:?} is out of range"),
        }
    }
}

impl std::error::Error for SiteInputError {}

fn parse_number(raw: &str, field: SiteField) -> Result<f64, SiteInputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(SiteInputError::InvalidNumber(field))
}

/// Parses the bin site form.
///
/// Unlike [`Coordinate::new`] and [`AcceptanceRadius::new`], out-of-range
/// values are rejected instead of clamped.
///
/// # Errors
///
/// Reports the first field, in form order, that is not a finite number or is
/// outside latitude ±90, longitude ±180 or radius 1 to 1000 m.
pub fn parse_site(latitude: &str, longitude: &str, radius: &str) -> Result<BinSite, SiteInputError> {
    let lat = parse_number(latitude, SiteField::Latitude)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(SiteInputError::OutOfRange(SiteField::Latitude));
    }
    let lon = parse_number(longitude, SiteField::Longitude)?;
    if !(-180.0..=180.0).contains(&lon) {
        return Err(SiteInputError::OutOfRange(SiteField::Longitude));
    }
    let metres = parse_number(radius, SiteField::Radius)?;
    if !AcceptanceRadius::is_in_range(metres) {
        return Err(SiteInputError::OutOfRange(SiteField::Radius));
    }
    Ok(BinSite::new(
        Coordinate::new(lat, lon),
        AcceptanceRadius::new(metres),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    latitude: String,
    longitude: String,
    radius: String,
    error: Option<SiteInputError>,
}

impl State {
    #[must_use]
    pub fn new(site: &BinSite) -> Self {
        let mut state = Self {
            latitude: String::new(),
            longitude: String::new(),
            radius: String::new(),
            error: None,
        };
        state.sync(site);
        state
    }

    /// Resets the form to `site`, dropping unapplied edits.
    pub fn sync(&mut self, site: &BinSite) {
        self.latitude = site.location.latitude().to_string();
        self.longitude = site.location.longitude().to_string();
        self.radius = site.radius.metres().to_string();
        self.error = None;
    }

    #[must_use]
    pub fn error(&self) -> Option<SiteInputError> {
        self.error
    }

    #[must_use]
    pub fn inputs(&self) -> (&str, &str, &str) {
        (&self.latitude, &self.longitude, &self.radius)
    }

    pub fn update(&mut self, message: Message, role: Role) -> Event {
        match message {
            Message::LanguageSelected(locale) => Event::LanguageChanged(locale),
            Message::ThemeSelected(mode) => Event::ThemeModeChanged(mode),
            Message::LatitudeChanged(_)
            | Message::LongitudeChanged(_)
            | Message::RadiusChanged(_)
            | Message::ApplySite
                if !role.can_edit_site() =>
            {
                tracing::debug!(%role, "settings: site edit ignored for this role");
                Event::None
            }
            Message::LatitudeChanged(value) => {
                self.latitude = value;
                self.error = None;
                Event::None
            }
            Message::LongitudeChanged(value) => {
                self.longitude = value;
                self.error = None;
                Event::None
            }
            Message::RadiusChanged(value) => {
                self.radius = value;
                self.error = None;
                Event::None
            }
            Message::ApplySite => match parse_site(&self.latitude, &self.longitude, &self.radius) {
                Ok(site) => {
                    tracing::info!(
                        latitude = site.location.latitude(),
                        longitude = site.location.longitude(),
                        radius_m = site.radius.metres(),
                        "settings: bin site changed"
                    );
                    self.error = None;
                    Event::SiteChanged(site)
                }
                Err(err) => {
                    tracing::debug!(%err, "settings: bin site rejected");
                    self.error = Some(err);
                    Event::None
                }
            },
        }
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub role: Role,
    pub theme_mode: ThemeMode,
    pub site: &'a BinSite,
}

fn section<'a>(title: String, body: Element<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XS)
        .push(Text::new(title).size(typography::TITLE_SM))
        .push(body)
        .into()
}

fn choice<'a>(label: String, selected: bool, message: Message) -> Element<'a, Message> {
    let style = if selected {
        styles::button::selected
    } else {
        styles::button::secondary
    };
    button(Text::new(label).size(typography::BODY))
        .on_press(message)
        .padding([spacing::XS, spacing::MD])
        .style(style)
        .into()
}

fn site_input<'a>(
    label: String,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(label).size(typography::BODY_SM))
        .push(
            text_input("", value)
                .on_input(on_input)
                .on_submit(Message::ApplySite)
                .padding(spacing::XS)
                .width(Length::Fixed(sizing::FORM_WIDTH / 2.0)),
        )
        .into()
}

pub fn view<'a>(state: &'a State, ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let languages = i18n
        .available_locales
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, locale| {
            row.push(choice(
                i18n.locale_name(locale),
                i18n.current_locale() == locale,
                Message::LanguageSelected(locale.clone()),
            ))
        });

    let themes = ThemeMode::ALL
        .iter()
        .fold(Row::new().spacing(spacing::XS), |row, mode| {
            row.push(choice(
                i18n.tr(mode.i18n_key()),
                ctx.theme_mode == *mode,
                Message::ThemeSelected(*mode),
            ))
        });

    let site: Element<'a, Message> = if ctx.role.can_edit_site() {
        let mut form = Column::new()
            .spacing(spacing::SM)
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(site_input(
                        i18n.tr(SiteField::Latitude.i18n_key()),
                        &state.latitude,
                        Message::LatitudeChanged,
                    ))
                    .push(site_input(
                        i18n.tr(SiteField::Longitude.i18n_key()),
                        &state.longitude,
                        Message::LongitudeChanged,
                    )),
            )
            .push(site_input(
                i18n.tr_with_args(
                    "settings-site-radius-range",
                    &[
                        ("min", &radius_bounds::MIN_M.to_string()),
                        ("max", &radius_bounds::MAX_M.to_string()),
                    ],
                ),
                &state.radius,
                Message::RadiusChanged,
            ));
        if let Some(err) = state.error {
            form = form.push(
                Text::new(i18n.tr_with_args(
                    err.i18n_key(),
                    &[("field", &i18n.tr(err.field().i18n_key()))],
                ))
                .size(typography::BODY_SM)
                .style(styles::text::error),
            );
        }
        form.push(
            button(Text::new(i18n.tr("settings-site-apply")))
                .on_press(Message::ApplySite)
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary),
        )
        .into()
    } else {
        Column::new()
            .spacing(spacing::XXS)
            .push(Text::new(ctx.site.location.format()).size(typography::BODY))
            .push(Text::new(i18n.tr_with_args(
                "settings-site-radius-value",
                &[("radius", &ctx.site.radius.metres().to_string())],
            )))
            .push(
                Text::new(i18n.tr("settings-site-read-only"))
                    .size(typography::CAPTION)
                    .style(styles::text::muted),
            )
            .into()
    };

    let content = Column::new()
        .spacing(spacing::LG)
        .push(
            Text::new(i18n.tr("settings-title"))
                .size(typography::TITLE_LG)
                .style(styles::text::brand),
        )
        .push(section(i18n.tr("settings-language"), languages.into()))
        .push(section(i18n.tr("settings-theme"), themes.into()))
        .push(section(i18n.tr("settings-site"), site));

    Container::new(
        Container::new(content)
            .padding(spacing::LG)
            .style(styles::container::panel),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .align_x(alignment::Horizontal::Center)
    .into()
}
