// SPDX-License-Identifier: MPL-2.0
//! Simulated backends.
//!
//! Stand-ins for the identity service, GPS receiver, classifier and report
//! receiver. They behave deterministically apart from GPS jitter and never
//! touch the network.

mod acknowledger;
mod classifier;
mod identity;
mod location;

pub use acknowledger::LocalAcknowledger;
pub use classifier::{StaticClassifier, UnavailableClassifier};
pub use identity::SimulatedIdentityService;
pub use location::{DeniedLocationProvider, SimulatedGps};
