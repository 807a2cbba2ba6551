// SPDX-License-Identifier: MPL-2.0
//! Location port definition.
//!
//! Capture steps ask a [`LocationProvider`] for a fresh position. Failures are
//! never fatal: [`locate_or_fallback`] substitutes
//! [`FALLBACK_LOCATION`](crate::domain::geo::FALLBACK_LOCATION).

use crate::domain::geo::{Coordinate, FALLBACK_LOCATION};
use std::fmt;
use std::time::Duration;

/// Errors reported by a location provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user or the platform refused access to location.
    PermissionDenied,
    /// No position could be determined.
    Unavailable(String),
    /// No position within the request timeout.
    Timeout,
}

impl LocationError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "location-error-permission-denied",
            LocationError::Unavailable(_) => "location-error-unavailable",
            LocationError::Timeout => "location-error-timeout",
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "location permission denied"),
            LocationError::Unavailable(msg) => write!(f, "location unavailable: {msg}"),
            LocationError::Timeout => write!(f, "location request timed out"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    /// Prefer satellite positioning over coarse network positioning.
    pub high_accuracy: bool,
    /// Oldest cached position that may be returned. Zero forces a fresh fix.
    pub maximum_age: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age: Duration::ZERO,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Where a [`LocationFix`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixSource {
    /// Reported by the provider.
    Provider,
    /// Substituted after the provider failed.
    Fallback(LocationError),
}

/// Position handed to the capture flow.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub source: FixSource,
}

impl LocationFix {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FixSource::Fallback(_))
    }
}

/// Port for obtaining the device position.
pub trait LocationProvider: Send + Sync {
    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`LocationError`] when no position is available.
    fn current_position(&self, request: &LocationRequest) -> Result<Coordinate, LocationError>;
}

/// Asks `provider` for a position, substituting the fallback on any error.
#[must_use]
pub fn locate_or_fallback(provider: &dyn LocationProvider, request: &LocationRequest) -> LocationFix {
    match provider.current_position(request) {
        Ok(coordinate) if coordinate.is_valid() => LocationFix {
            coordinate,
            source: FixSource::Provider,
        },
        Ok(_) => {
            tracing::warn!("location provider returned a non-finite position, using fallback");
            LocationFix {
                coordinate: FALLBACK_LOCATION,
                source: FixSource::Fallback(LocationError::Unavailable(
                    "non-finite position".to_string(),
                )),
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "location request failed, using fallback");
            LocationFix {
                coordinate: FALLBACK_LOCATION,
                source: FixSource::Fallback(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Coordinate, LocationError>);

    impl LocationProvider for Fixed {
        fn current_position(&self, _: &LocationRequest) -> Result<Coordinate, LocationError> {
            self.0.clone()
        }
    }

    #[test]
    fn default_request_wants_fresh_accurate_fix() {
        let request = LocationRequest::default();
        assert!(request.high_accuracy);
        assert_eq!(request.maximum_age, Duration::ZERO);
    }

    #[test]
    fn provider_position_is_passed_through() {
        let here = Coordinate::new(1.0, 2.0);
        let fix = locate_or_fallback(&Fixed(Ok(here)), &LocationRequest::default());
        assert_eq!(fix.coordinate, here);
        assert!(!fix.is_fallback());
    }

    #[test]
    fn denied_location_yields_fallback() {
        let fix = locate_or_fallback(
            &Fixed(Err(LocationError::PermissionDenied)),
            &LocationRequest::default(),
        );
        assert_eq!(fix.coordinate, Coordinate::new(12.9716, 77.5946));
        assert_eq!(fix.source, FixSource::Fallback(LocationError::PermissionDenied));
    }

    #[test]
    fn non_finite_position_yields_fallback() {
        let fix = locate_or_fallback(
            &Fixed(Ok(Coordinate::new(f64::NAN, 0.0))),
            &LocationRequest::default(),
        );
        assert!(fix.is_fallback());
        assert_eq!(fix.coordinate, FALLBACK_LOCATION);
    }
}
