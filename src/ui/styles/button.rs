// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn is_light(theme: &Theme) -> bool {
    !theme.extended_palette().is_dark
}

fn filled(background: Color, border: Color, text_color: Color, lifted: bool) -> button::Style {
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: border,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: if lifted { shadow::MD } else { shadow::SM },
        snap: true,
    }
}

fn greyed_out(theme: &Theme) -> button::Style {
    button::Style {
        background: Some(Background::Color(if is_light(theme) {
            palette::GRAY_200
        } else {
            palette::GRAY_700
        })),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Main call to action: "Send OTP", "Verify", "Submit Report".
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(palette::PRIMARY_600, palette::PRIMARY_700, WHITE, false)
        }
        button::Status::Hovered => filled(palette::PRIMARY_500, palette::PRIMARY_600, WHITE, true),
        button::Status::Disabled => greyed_out(theme),
    }
}

/// Secondary actions such as "Back" or "Get current location".
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = if is_light(theme) {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            shadow: shadow::NONE,
            ..filled(background, palette::GRAY_400, text_color, false)
        },
        button::Status::Hovered => button::Style {
            shadow: shadow::SM,
            ..filled(background, palette::PRIMARY_500, text_color, false)
        },
        button::Status::Disabled => greyed_out(theme),
    }
}

/// Highlighted navbar entry for the current screen.
pub fn selected(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Disabled => greyed_out(theme),
        _ => filled(palette::PRIMARY_100, palette::PRIMARY_500, palette::PRIMARY_800, false),
    }
}

/// Destructive action (logout).
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => {
            filled(palette::ERROR_500, palette::ERROR_500, WHITE, false)
        }
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color {
                a: 0.85,
                ..palette::ERROR_500
            })),
            ..filled(palette::ERROR_500, palette::ERROR_500, WHITE, true)
        },
        button::Status::Disabled => greyed_out(theme),
    }
}
