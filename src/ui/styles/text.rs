// SPDX-License-Identifier: MPL-2.0
//! Text colour helpers.

use crate::ui::design_tokens::palette;
use iced::widget::text;
use iced::Theme;

pub fn muted(theme: &Theme) -> text::Style {
    let color = if theme.extended_palette().is_dark {
        palette::GRAY_200
    } else {
        palette::GRAY_700
    };
    text::Style { color: Some(color) }
}

pub fn error(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::ERROR_500),
    }
}

pub fn success(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::SUCCESS_500),
    }
}

pub fn warning(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::WARNING_500),
    }
}

pub fn brand(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.palette().primary),
    }
}
