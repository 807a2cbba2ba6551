// SPDX-License-Identifier: MPL-2.0
//! Camera port definition.
//!
//! A [`Camera`] opens a [`CameraStream`]; the capture flow holds it through a
//! [`CameraLease`] so the device is stopped exactly once, whether the photo is
//! taken, the user cancels, the step changes or the lease is dropped.
//!
//! # Design Notes
//!
//! - [`open_camera`] asks for the rear camera first and then for any camera
//! - Streams are `Send` so they can be handed to a background task

use crate::domain::capture::{CameraFacing, CapturedImage};
use std::fmt;

// =============================================================================
// CameraError
// =============================================================================

/// Errors that can occur while opening or reading a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No camera matches the request.
    NotFound,
    /// Access to the camera was refused.
    PermissionDenied,
    /// Another client holds the device.
    Busy,
    /// A frame could not be grabbed.
    CaptureFailed(String),
}

impl CameraError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CameraError::NotFound => "camera-error-not-found",
            CameraError::PermissionDenied => "camera-error-permission-denied",
            CameraError::Busy => "camera-error-busy",
            CameraError::CaptureFailed(_) => "camera-error-capture-failed",
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NotFound => write!(f, "no camera available"),
            CameraError::PermissionDenied => write!(f, "camera permission denied"),
            CameraError::Busy => write!(f, "camera is in use"),
            CameraError::CaptureFailed(msg) => write!(f, "snapshot failed: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

// =============================================================================
// Camera / CameraStream Traits
// =============================================================================

/// An open video stream.
pub trait CameraStream: Send {
    /// Direction of the device backing this stream.
    fn facing(&self) -> CameraFacing;

    /// Grabs the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::CaptureFailed`] when no frame is available.
    fn snapshot(&mut self) -> Result<CapturedImage, CameraError>;

    /// Stops the device. Called once by [`CameraLease`].
    fn stop(&mut self);
}

/// Port for camera devices.
pub trait Camera: Send + Sync {
    /// Opens a stream. `None` accepts any direction.
    ///
    /// # Errors
    ///
    /// Returns a [`CameraError`] when no matching device can be opened.
    fn open(&self, facing: Option<CameraFacing>) -> Result<Box<dyn CameraStream>, CameraError>;
}

// =============================================================================
// CameraLease
// =============================================================================

/// Exclusive hold on an open stream. The stream is stopped on drop.
pub struct CameraLease {
    stream: Option<Box<dyn CameraStream>>,
}

impl CameraLease {
    #[must_use]
    pub fn new(stream: Box<dyn CameraStream>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Direction of the leased device.
    #[must_use]
    pub fn facing(&self) -> CameraFacing {
        self.stream
            .as_ref()
            .map_or(CameraFacing::Unspecified, |stream| stream.facing())
    }

    /// Takes a photo and releases the device.
    ///
    /// # Errors
    ///
    /// Propagates the stream's snapshot error. The device is released either way.
    pub fn take_photo(mut self) -> Result<CapturedImage, CameraError> {
        let result = match self.stream.as_mut() {
            Some(stream) => stream.snapshot(),
            None => Err(CameraError::NotFound),
        };
        self.release();
        result
    }

    /// Stops the device now instead of on drop.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(facing = ?stream.facing(), "camera released");
        }
    }
}

impl Drop for CameraLease {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for CameraLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraLease")
            .field("facing", &self.facing())
            .field("active", &self.stream.is_some())
            .finish()
    }
}

/// Opens the rear camera, or any camera when there is no rear one.
///
/// # Errors
///
/// Returns the error of the second attempt when both fail.
pub fn open_camera(camera: &dyn Camera) -> Result<CameraLease, CameraError> {
    match camera.open(Some(CameraFacing::Rear)) {
        Ok(stream) => Ok(CameraLease::new(stream)),
        Err(err) => {
            tracing::debug!(error = %err, "rear camera unavailable, trying any camera");
            camera.open(None).map(CameraLease::new)
        }
    }
}
