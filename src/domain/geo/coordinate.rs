// SPDX-License-Identifier: MPL-2.0
//! Geographic coordinates and great-circle distance.

use std::fmt;

/// Mean Earth radius used by the Haversine formula, in metres.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Coordinate substituted when the location provider fails or is denied.
pub const FALLBACK_LOCATION: Coordinate = Coordinate {
    latitude: 12.9716,
    longitude: 77.5946,
};

/// Default position of the reference bin.
pub const REFERENCE_BIN: Coordinate = FALLBACK_LOCATION;

// =============================================================================
// Coordinate
// =============================================================================

/// WGS84 coordinate in decimal degrees.
///
/// # Example
///
/// ```
/// use eco_waste::domain::geo::Coordinate;
///
/// let bin = Coordinate::new(12.9716, 77.5946);
/// assert_eq!(bin.format(), "12.971600° N, 77.594600° E");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, clamping latitude to ±90 and longitude to ±180.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns `false` when either component is NaN or infinite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to `other` using the Haversine formula.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> Distance {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        // Rounding can push `a` marginally above 1 for antipodal points.
        let c = 2.0 * a.sqrt().min(1.0).asin();

        Distance::from_metres(EARTH_MEAN_RADIUS_M * c)
    }

    /// Human-readable form, e.g. `12.971600° N, 77.594600° E`.
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { "N" } else { "S" };
        let lon_dir = if self.longitude >= 0.0 { "E" } else { "W" };
        format!(
            "{:.6}° {}, {:.6}° {}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

// =============================================================================
// Distance
// =============================================================================

/// Non-negative distance in metres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Distance(f64);

impl Distance {
    /// Creates a distance. Negative and NaN inputs become zero.
    #[must_use]
    pub fn from_metres(metres: f64) -> Self {
        if metres.is_nan() || metres < 0.0 {
            Self(0.0)
        } else {
            Self(metres)
        }
    }

    /// Value in metres.
    #[must_use]
    pub fn metres(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 1000.0 {
            write!(f, "{:.2} km", self.0 / 1000.0)
        } else {
            write!(f, "{:.1} m", self.0)
        }
    }
}
