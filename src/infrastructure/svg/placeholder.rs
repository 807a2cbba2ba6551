// SPDX-License-Identifier: MPL-2.0
//! Labelled placeholder images rendered from SVG.

use crate::domain::capture::{CapturedImage, ImageOrigin};
use crate::error::{Error, Result};
use resvg::usvg;

/// Logical width of a placeholder card.
pub const PLACEHOLDER_WIDTH: u32 = 200;

/// Logical height of a placeholder card.
pub const PLACEHOLDER_HEIGHT: u32 = 150;

/// Supersampling factor applied when rasterising.
const RENDER_SCALE: u32 = 2;

const BACKGROUND: &str = "#f3f4f6";
const FOREGROUND: &str = "#6b7280";

/// Rasterises labelled placeholder cards.
///
/// System fonts are loaded once per renderer; without any font the card is
/// still produced, just without its label.
pub struct PlaceholderRenderer {
    options: usvg::Options<'static>,
}

impl PlaceholderRenderer {
    #[must_use]
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(
            faces = options.fontdb.len(),
            "placeholder renderer loaded system fonts"
        );
        Self { options }
    }

    /// Renders a card reading `label`, tinted with `accent` (CSS colour).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Svg`] when the generated document cannot be parsed or
    /// rasterised.
    pub fn render(&self, label: &str, accent: &str, origin: ImageOrigin) -> Result<CapturedImage> {
        let svg = card_svg(label, accent);
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .map_err(|e| Error::Svg(e.to_string()))?;

        let width = PLACEHOLDER_WIDTH * RENDER_SCALE;
        let height = PLACEHOLDER_HEIGHT * RENDER_SCALE;
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| Error::Svg("Failed to allocate placeholder pixmap".into()))?;

        let scale = RENDER_SCALE as f32;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        CapturedImage::from_rgba(width, height, pixmap.take(), origin)
            .map_err(|e| Error::Svg(e.to_string()))
    }

    /// Renders the stand-in used when no camera photo is available.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_fallback(&self, label: &str) -> Result<CapturedImage> {
        self.render(label, FOREGROUND, ImageOrigin::Placeholder)
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaceholderRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderRenderer")
            .field("font_faces", &self.options.fontdb.len())
            .finish()
    }
}

fn card_svg(label: &str, accent: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" fill="{BACKGROUND}"/>
<rect x="4" y="4" width="{iw}" height="{ih}" rx="8" fill="none" stroke="{accent}" stroke-width="2" stroke-dasharray="6 4"/>
<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="middle" font-family="sans-serif" font-size="14" fill="{accent}">{text}</text>
</svg>"#,
        w = PLACEHOLDER_WIDTH,
        h = PLACEHOLDER_HEIGHT,
        iw = PLACEHOLDER_WIDTH - 8,
        ih = PLACEHOLDER_HEIGHT - 8,
        cx = PLACEHOLDER_WIDTH / 2,
        cy = PLACEHOLDER_HEIGHT / 2,
        accent = escape_xml(accent),
        text = escape_xml(label),
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
