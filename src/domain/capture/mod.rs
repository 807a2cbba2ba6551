// SPDX-License-Identifier: MPL-2.0
//! Capture flow domain: images, the step state machine and analysis results.

mod analysis;
mod image;
mod session;

pub use analysis::{WasteAnalysis, WasteCategory};
pub use image::{CameraFacing, CapturedImage, ImageOrigin, ImageSizeMismatch};
pub use session::{
    Capture, CaptureSession, CaptureStage, CaptureStep, CompletedCapture, Progress,
    TransitionError,
};
