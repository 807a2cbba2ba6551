// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every screen.
//!
//! - **palette**: base colours, with a green brand scale
//! - **opacity**: overlay and surface alpha levels
//! - **spacing**: 8 px grid
//! - **sizing**: component dimensions
//! - **typography**: font size scale
//! - **border**, **radius**, **shadow**
//!
//! ```
//! use eco_waste::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color { a: opacity::OVERLAY_STRONG, ..palette::BLACK };
//! assert_eq!(spacing::MD, 16.0);
//! # let _ = scrim;
//! ```

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.067, 0.094, 0.153);
    pub const GRAY_700: Color = Color::from_rgb(0.216, 0.255, 0.318);
    pub const GRAY_400: Color = Color::from_rgb(0.612, 0.639, 0.686);
    pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922);
    pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965);

    // Brand (green scale)
    pub const PRIMARY_100: Color = Color::from_rgb(0.863, 0.988, 0.906);
    pub const PRIMARY_400: Color = Color::from_rgb(0.290, 0.871, 0.502);
    pub const PRIMARY_500: Color = Color::from_rgb(0.133, 0.773, 0.369);
    pub const PRIMARY_600: Color = Color::from_rgb(0.086, 0.639, 0.290);
    pub const PRIMARY_700: Color = Color::from_rgb(0.082, 0.502, 0.239);
    pub const PRIMARY_800: Color = Color::from_rgb(0.086, 0.396, 0.204);

    pub const ERROR_500: Color = Color::from_rgb(0.937, 0.267, 0.267);
    pub const WARNING_500: Color = Color::from_rgb(0.961, 0.620, 0.043);
    pub const SUCCESS_500: Color = Color::from_rgb(0.063, 0.725, 0.506);
    pub const INFO_500: Color = Color::from_rgb(0.231, 0.510, 0.965);
}

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;

    /// Semi-transparent panels.
    pub const SURFACE: f32 = 0.95;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
}

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;

    /// Login card and settings form width.
    pub const FORM_WIDTH: f32 = 420.0;
    pub const TOAST_WIDTH: f32 = 320.0;
    pub const DIALOG_WIDTH: f32 = 380.0;

    /// Captured image preview on the pickup/disposal steps.
    pub const PREVIEW_WIDTH: f32 = 400.0;
    pub const PREVIEW_HEIGHT: f32 = 300.0;
    /// Thumbnails on the verify step.
    pub const THUMBNAIL_WIDTH: f32 = 200.0;
    pub const THUMBNAIL_HEIGHT: f32 = 150.0;
}

pub mod typography {
    //! Titles for pages and dialogs, body for content, caption for hints.

    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const BODY_SM: f32 = 13.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0;
}

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: Color::TRANSPARENT,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: Color {
            a: 0.15,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 1.0 },
        blur_radius: 3.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: 0.2,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: Color {
            a: 0.3,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 24.0,
    };
}

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(sizing::PREVIEW_WIDTH > sizing::THUMBNAIL_WIDTH);
    assert!(sizing::PREVIEW_HEIGHT > sizing::THUMBNAIL_HEIGHT);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_follows_the_grid() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn brand_scale_is_green() {
        for c in [palette::PRIMARY_400, palette::PRIMARY_500, palette::PRIMARY_600] {
            assert!(c.g > c.r && c.g > c.b);
        }
    }

    #[test]
    fn previews_keep_the_placeholder_aspect_ratio() {
        let preview = sizing::PREVIEW_WIDTH / sizing::PREVIEW_HEIGHT;
        let thumb = sizing::THUMBNAIL_WIDTH / sizing::THUMBNAIL_HEIGHT;
        assert!((preview - thumb).abs() < f32::EPSILON);
    }
}
