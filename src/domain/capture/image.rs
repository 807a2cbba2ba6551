// SPDX-License-Identifier: MPL-2.0
//! Captured photographs.

use std::fmt;
use std::sync::Arc;

/// Which way a camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraFacing {
    /// Environment-facing camera on the back of the device.
    Rear,
    /// User-facing camera.
    Front,
    /// Device did not report a direction.
    Unspecified,
}

/// Where an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Snapshot taken from a live camera stream.
    Camera(CameraFacing),
    /// Generated stand-in used when no camera is available.
    Placeholder,
}

impl ImageOrigin {
    #[must_use]
    pub fn is_placeholder(self) -> bool {
        matches!(self, ImageOrigin::Placeholder)
    }
}

/// RGBA buffer length does not match the declared dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSizeMismatch {
    pub expected: usize,
    pub actual: usize,
}

impl fmt::Display for ImageSizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGBA data length mismatch: expected {}, got {}",
            self.expected, self.actual
        )
    }
}

impl std::error::Error for ImageSizeMismatch {}

/// A photograph held as straight RGBA8 pixels.
///
/// Pixel data is shared so the image can be cloned into view handles and
/// reports cheaply.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
    origin: ImageOrigin,
}

impl CapturedImage {
    /// Wraps RGBA pixels, checking that the length is `width * height * 4`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageSizeMismatch`] when the buffer has the wrong length.
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: Vec<u8>,
        origin: ImageOrigin,
    ) -> Result<Self, ImageSizeMismatch> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(ImageSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba: Arc::new(rgba),
            origin,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba
    }
}

impl PartialEq for CapturedImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.origin == other.origin
            && (Arc::ptr_eq(&self.rgba, &other.rgba) || self.rgba == other.rgba)
    }
}
