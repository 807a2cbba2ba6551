// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: Identity service, GPS, classifier and report receiver
//! - [`svg`]: Placeholder camera and fallback images rendered with `resvg`

pub mod simulated;
pub mod svg;

pub use simulated::{
    DeniedLocationProvider, LocalAcknowledger, SimulatedGps, SimulatedIdentityService,
    StaticClassifier, UnavailableClassifier,
};
pub use svg::{PlaceholderCamera, PlaceholderRenderer, UnavailableCamera};
