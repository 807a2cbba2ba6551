// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Infrastructure adapters implement these traits; the UI only sees the
//! traits, so the simulated services can be swapped for real backends.
//!
//! # Available Ports
//!
//! - [`identity`]: One-time code dispatch and verification
//! - [`location`]: Device position
//! - [`camera`]: Camera devices and scoped stream leases
//! - [`classification`]: Waste classification
//! - [`report`]: Report submission
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` so services can be shared with background tasks
//! - No `async fn`: callers wrap calls in Iced `Task`s

pub mod camera;
pub mod classification;
pub mod identity;
pub mod location;
pub mod report;

pub use camera::{open_camera, Camera, CameraError, CameraLease, CameraStream};
pub use classification::{ClassificationError, WasteClassifier};
pub use identity::{CodeDispatch, IdentityError, IdentityVerifier};
pub use location::{
    locate_or_fallback, FixSource, LocationError, LocationFix, LocationProvider, LocationRequest,
};
pub use report::{Receipt, ReportError, ReportSink};
