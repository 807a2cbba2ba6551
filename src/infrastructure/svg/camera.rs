// SPDX-License-Identifier: MPL-2.0
//! Camera adapters without real hardware.

use super::placeholder::PlaceholderRenderer;
use crate::application::port::{Camera, CameraError, CameraStream};
use crate::domain::capture::{CameraFacing, CapturedImage, ImageOrigin};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

const SNAPSHOT_ACCENT: &str = "#16a34a";

/// Simulated rear camera whose frames are rendered cards.
///
/// Only one stream may be open at a time; a second `open` reports
/// [`CameraError::Busy`] until the first stream is stopped.
#[derive(Debug)]
pub struct PlaceholderCamera {
    renderer: Arc<PlaceholderRenderer>,
    in_use: Arc<AtomicBool>,
    shots: Arc<AtomicU32>,
}

impl PlaceholderCamera {
    #[must_use]
    pub fn new(renderer: Arc<PlaceholderRenderer>) -> Self {
        Self {
            renderer,
            in_use: Arc::new(AtomicBool::new(false)),
            shots: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Whether a stream is currently open.
    #[must_use]
    pub fn is_in_use(&self) -> bool {
        self.in_use.load(Ordering::SeqCst)
    }
}

impl Camera for PlaceholderCamera {
    fn open(&self, facing: Option<CameraFacing>) -> Result<Box<dyn CameraStream>, CameraError> {
        if matches!(facing, Some(CameraFacing::Front)) {
            return Err(CameraError::NotFound);
        }
        if self.in_use.swap(true, Ordering::SeqCst) {
            return Err(CameraError::Busy);
        }
        tracing::info!("placeholder camera opened");
        Ok(Box::new(PlaceholderStream {
            renderer: Arc::clone(&self.renderer),
            in_use: Arc::clone(&self.in_use),
            shots: Arc::clone(&self.shots),
            stopped: false,
        }))
    }
}

struct PlaceholderStream {
    renderer: Arc<PlaceholderRenderer>,
    in_use: Arc<AtomicBool>,
    shots: Arc<AtomicU32>,
    stopped: bool,
}

impl CameraStream for PlaceholderStream {
    fn facing(&self) -> CameraFacing {
        CameraFacing::Rear
    }

    fn snapshot(&mut self) -> Result<CapturedImage, CameraError> {
        if self.stopped {
            return Err(CameraError::CaptureFailed("stream stopped".into()));
        }
        let shot = self.shots.fetch_add(1, Ordering::SeqCst) + 1;
        self.renderer
            .render(
                &format!("Snapshot #{shot}"),
                SNAPSHOT_ACCENT,
                ImageOrigin::Camera(CameraFacing::Rear),
            )
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.in_use.store(false, Ordering::SeqCst);
        }
    }
}

/// A device without any camera.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCamera;

impl Camera for UnavailableCamera {
    fn open(&self, _facing: Option<CameraFacing>) -> Result<Box<dyn CameraStream>, CameraError> {
        Err(CameraError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::open_camera;

    fn camera() -> PlaceholderCamera {
        PlaceholderCamera::new(Arc::new(PlaceholderRenderer::new()))
    }

    #[test]
    fn opens_rear_camera() {
        let camera = camera();
        let lease = open_camera(&camera).expect("camera opens");
        assert_eq!(lease.facing(), CameraFacing::Rear);
        assert!(camera.is_in_use());
    }

    #[test]
    fn second_open_is_busy_until_release() {
        let camera = camera();
        let mut lease = open_camera(&camera).expect("camera opens");
        assert_eq!(open_camera(&camera).unwrap_err(), CameraError::Busy);
        lease.release();
        assert!(!camera.is_in_use());
        assert!(open_camera(&camera).is_ok());
    }

    #[test]
    fn photo_is_tagged_with_camera_origin() {
        let camera = camera();
        let lease = open_camera(&camera).expect("camera opens");
        let image = lease.take_photo().expect("snapshot");
        assert_eq!(image.origin(), ImageOrigin::Camera(CameraFacing::Rear));
        assert!(!camera.is_in_use());
    }

    #[test]
    fn unavailable_camera_never_opens() {
        assert_eq!(
            open_camera(&UnavailableCamera).unwrap_err(),
            CameraError::NotFound
        );
    }
}
