// SPDX-License-Identifier: MPL-2.0
//! Disposal proximity check against a reference bin.

use super::coordinate::{Coordinate, Distance, REFERENCE_BIN};

/// Acceptance radius bounds, in metres.
pub mod radius_bounds {
    /// Smallest accepted radius.
    pub const MIN_M: f64 = 1.0;
    /// Largest accepted radius.
    pub const MAX_M: f64 = 1000.0;
    /// Radius used when nothing is configured.
    pub const DEFAULT_M: f64 = 10.0;
}

/// Radius around the reference bin inside which a disposal counts as valid.
///
/// Always within 1 to 1000 metres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AcceptanceRadius(f64);

impl AcceptanceRadius {
    /// Creates a radius, clamping to the valid range. NaN maps to the default.
    #[must_use]
    pub fn new(metres: f64) -> Self {
        if metres.is_nan() {
            return Self::default();
        }
        Self(metres.clamp(radius_bounds::MIN_M, radius_bounds::MAX_M))
    }

    /// Value in metres.
    #[must_use]
    pub fn metres(self) -> f64 {
        self.0
    }

    /// Whether `metres` lies inside the accepted range without clamping.
    #[must_use]
    pub fn is_in_range(metres: f64) -> bool {
        (radius_bounds::MIN_M..=radius_bounds::MAX_M).contains(&metres)
    }
}

impl Default for AcceptanceRadius {
    fn default() -> Self {
        Self(radius_bounds::DEFAULT_M)
    }
}

/// Outcome of comparing a disposal distance with the acceptance radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    /// Strictly closer than the radius.
    WithinRange,
    /// At or beyond the radius.
    TooFar,
}

impl Proximity {
    /// Classifies `distance`. The boundary itself counts as too far.
    #[must_use]
    pub fn classify(distance: Distance, radius: AcceptanceRadius) -> Self {
        if distance.metres() < radius.metres() {
            Proximity::WithinRange
        } else {
            Proximity::TooFar
        }
    }

    #[must_use]
    pub fn is_within_range(self) -> bool {
        matches!(self, Proximity::WithinRange)
    }

    /// Returns the i18n key describing this outcome.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Proximity::WithinRange => "proximity-within-range",
            Proximity::TooFar => "proximity-too-far",
        }
    }
}

/// Reference bin position and the radius around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSite {
    pub location: Coordinate,
    pub radius: AcceptanceRadius,
}

impl Default for BinSite {
    fn default() -> Self {
        Self {
            location: REFERENCE_BIN,
            radius: AcceptanceRadius::default(),
        }
    }
}

impl BinSite {
    #[must_use]
    pub fn new(location: Coordinate, radius: AcceptanceRadius) -> Self {
        Self { location, radius }
    }

    /// Measures `disposal` against this site.
    #[must_use]
    pub fn check(&self, disposal: &Coordinate) -> ProximityCheck {
        let distance = self.location.distance_to(disposal);
        ProximityCheck {
            distance,
            proximity: Proximity::classify(distance, self.radius),
        }
    }
}

/// Distance to the bin together with its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityCheck {
    pub distance: Distance,
    pub proximity: Proximity,
}
