// SPDX-License-Identifier: MPL-2.0
//! Simulated location providers.

use crate::application::port::{LocationError, LocationProvider, LocationRequest};
use crate::domain::geo::Coordinate;
use rand::Rng;

/// GPS receiver reporting positions scattered around a centre point.
///
/// Each component is offset independently by up to `jitter_deg` degrees.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGps {
    centre: Coordinate,
    jitter_deg: f64,
}

impl SimulatedGps {
    /// Negative or non-finite jitter is treated as zero.
    #[must_use]
    pub fn new(centre: Coordinate, jitter_deg: f64) -> Self {
        let jitter_deg = if jitter_deg.is_finite() {
            jitter_deg.abs()
        } else {
            0.0
        };
        Self { centre, jitter_deg }
    }
}

impl LocationProvider for SimulatedGps {
    fn current_position(&self, request: &LocationRequest) -> Result<Coordinate, LocationError> {
        if self.jitter_deg == 0.0 {
            return Ok(self.centre);
        }
        let mut rng = rand::thread_rng();
        let span = self.jitter_deg;
        let position = Coordinate::new(
            self.centre.latitude() + rng.gen_range(-span..=span),
            self.centre.longitude() + rng.gen_range(-span..=span),
        );
        tracing::debug!(
            high_accuracy = request.high_accuracy,
            position = %position,
            "simulated GPS fix"
        );
        Ok(position)
    }
}

/// Provider for a device where location access was refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeniedLocationProvider;

impl LocationProvider for DeniedLocationProvider {
    fn current_position(&self, _request: &LocationRequest) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}
