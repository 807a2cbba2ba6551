// SPDX-License-Identifier: MPL-2.0
//! Geographic types: coordinates, distances and the bin proximity check.

mod coordinate;
mod proximity;

pub use coordinate::{Coordinate, Distance, EARTH_MEAN_RADIUS_M, FALLBACK_LOCATION, REFERENCE_BIN};
pub use proximity::{radius_bounds, AcceptanceRadius, BinSite, Proximity, ProximityCheck};
