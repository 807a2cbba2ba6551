// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Identity**: Simulated delays of the login flow
//! - **Location**: Simulated GPS behaviour and the reference bin
//! - **Analysis**: Canned classifier output

// ==========================================================================
// Identity Defaults
// ==========================================================================

/// Delay before the one-time code is reported as sent (milliseconds).
pub const DEFAULT_CODE_DELAY_MS: u64 = 2000;

/// Delay before a one-time code is reported as verified (milliseconds).
pub const DEFAULT_VERIFY_DELAY_MS: u64 = 1500;

/// Longest simulated identity delay accepted from the config file.
pub const MAX_SIMULATED_DELAY_MS: u64 = 30_000;

/// How long a dispatched one-time code stays valid (seconds).
pub const DEFAULT_CODE_VALIDITY_SECS: u64 = 300;

/// Shortest accepted code validity (seconds).
pub const MIN_CODE_VALIDITY_SECS: u64 = 30;

/// Longest accepted code validity (seconds).
pub const MAX_CODE_VALIDITY_SECS: u64 = 3600;

// ==========================================================================
// Location Defaults
// ==========================================================================

/// Latitude of the reference bin.
pub const DEFAULT_BIN_LATITUDE: f64 = 12.9716;

/// Longitude of the reference bin.
pub const DEFAULT_BIN_LONGITUDE: f64 = 77.5946;

/// Radius around the bin inside which a disposal is accepted (metres).
pub const DEFAULT_ACCEPTANCE_RADIUS_M: f64 = 10.0;

/// Smallest accepted radius (metres).
pub const MIN_ACCEPTANCE_RADIUS_M: f64 = 1.0;

/// Largest accepted radius (metres).
pub const MAX_ACCEPTANCE_RADIUS_M: f64 = 1000.0;

/// Maximum offset of simulated GPS fixes from the bin, per axis (degrees).
/// About 11 m, so most simulated disposals land inside the default radius.
pub const DEFAULT_GPS_JITTER_DEG: f64 = 0.0001;

/// Largest accepted GPS jitter (degrees).
pub const MAX_GPS_JITTER_DEG: f64 = 0.1;

/// Simulated time to obtain a position fix (milliseconds).
pub const DEFAULT_LOCATION_LATENCY_MS: u64 = 400;

/// Longest accepted position latency (milliseconds).
pub const MAX_LOCATION_LATENCY_MS: u64 = 10_000;

/// Timeout requested from the location provider (milliseconds).
pub const LOCATION_TIMEOUT_MS: u64 = 10_000;

// ==========================================================================
// Analysis Defaults
// ==========================================================================

/// Weight reported by the static classifier (kilograms).
pub const DEFAULT_ANALYSIS_WEIGHT_KG: f64 = 8.5;

/// Largest weight accepted from the config file (kilograms).
pub const MAX_ANALYSIS_WEIGHT_KG: f64 = 1000.0;

/// Points awarded by the static classifier.
pub const DEFAULT_ANALYSIS_POINTS: u32 = 42;

/// Largest points value accepted from the config file.
pub const MAX_ANALYSIS_POINTS: u32 = 10_000;

// ==========================================================================
// Compile-time validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_CODE_DELAY_MS <= MAX_SIMULATED_DELAY_MS);
    assert!(DEFAULT_VERIFY_DELAY_MS <= MAX_SIMULATED_DELAY_MS);

    assert!(MIN_CODE_VALIDITY_SECS > 0);
    assert!(DEFAULT_CODE_VALIDITY_SECS >= MIN_CODE_VALIDITY_SECS);
    assert!(DEFAULT_CODE_VALIDITY_SECS <= MAX_CODE_VALIDITY_SECS);

    assert!(DEFAULT_BIN_LATITUDE >= -90.0 && DEFAULT_BIN_LATITUDE <= 90.0);
    assert!(DEFAULT_BIN_LONGITUDE >= -180.0 && DEFAULT_BIN_LONGITUDE <= 180.0);

    assert!(MIN_ACCEPTANCE_RADIUS_M > 0.0);
    assert!(DEFAULT_ACCEPTANCE_RADIUS_M >= MIN_ACCEPTANCE_RADIUS_M);
    assert!(DEFAULT_ACCEPTANCE_RADIUS_M <= MAX_ACCEPTANCE_RADIUS_M);

    assert!(DEFAULT_GPS_JITTER_DEG >= 0.0);
    assert!(DEFAULT_GPS_JITTER_DEG <= MAX_GPS_JITTER_DEG);
    assert!(DEFAULT_LOCATION_LATENCY_MS <= MAX_LOCATION_LATENCY_MS);
    assert!(DEFAULT_LOCATION_LATENCY_MS < LOCATION_TIMEOUT_MS);

    assert!(DEFAULT_ANALYSIS_WEIGHT_KG >= 0.0);
    assert!(DEFAULT_ANALYSIS_WEIGHT_KG <= MAX_ANALYSIS_WEIGHT_KG);
    assert!(DEFAULT_ANALYSIS_POINTS <= MAX_ANALYSIS_POINTS);
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{radius_bounds, FALLBACK_LOCATION};

    #[test]
    fn radius_bounds_match_domain() {
        assert_eq!(MIN_ACCEPTANCE_RADIUS_M, radius_bounds::MIN_M);
        assert_eq!(MAX_ACCEPTANCE_RADIUS_M, radius_bounds::MAX_M);
        assert_eq!(DEFAULT_ACCEPTANCE_RADIUS_M, radius_bounds::DEFAULT_M);
    }

    #[test]
    fn default_bin_matches_fallback_location() {
        assert_eq!(DEFAULT_BIN_LATITUDE, FALLBACK_LOCATION.latitude());
        assert_eq!(DEFAULT_BIN_LONGITUDE, FALLBACK_LOCATION.longitude());
    }
}
