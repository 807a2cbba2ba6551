// SPDX-License-Identifier: MPL-2.0
//! Adapter wiring.
//!
//! [`Services`] bundles one implementation of every port, chosen from the
//! backend fields of the configuration, plus the simulated timings. The UI
//! components only ever see the trait objects.

use crate::application::port::{
    locate_or_fallback, Camera, FixSource, IdentityVerifier, LocationError, LocationFix,
    LocationProvider, LocationRequest, ReportSink, WasteClassifier,
};
use crate::config::{
    CameraBackend, ClassifierBackend, Config, LocationBackend, LOCATION_TIMEOUT_MS,
};
use crate::domain::geo::FALLBACK_LOCATION;
use crate::infrastructure::{
    DeniedLocationProvider, LocalAcknowledger, PlaceholderCamera, PlaceholderRenderer,
    SimulatedGps, SimulatedIdentityService, StaticClassifier, UnavailableCamera,
    UnavailableClassifier,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Artificial latencies of the simulated backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timing {
    pub code_delay: Duration,
    pub verify_delay: Duration,
    pub location_latency: Duration,
}

#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityVerifier>,
    pub location: Arc<dyn LocationProvider>,
    pub camera: Arc<dyn Camera>,
    pub classifier: Arc<dyn WasteClassifier>,
    pub reports: Arc<dyn ReportSink>,
    /// Renders fallback images when the camera cannot deliver one.
    pub placeholders: Arc<PlaceholderRenderer>,
    pub location_request: LocationRequest,
    pub timing: Timing,
}

impl Services {
    /// Builds the adapters selected in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let placeholders = Arc::new(PlaceholderRenderer::new());
        let site = config.location.bin_site();

        let location: Arc<dyn LocationProvider> =
            match config.location.provider.unwrap_or_default() {
                LocationBackend::Simulated => {
                    Arc::new(SimulatedGps::new(site.location, config.location.jitter()))
                }
                LocationBackend::Denied => Arc::new(DeniedLocationProvider),
            };

        let camera: Arc<dyn Camera> = match config.capture.camera.unwrap_or_default() {
            CameraBackend::Placeholder => {
                Arc::new(PlaceholderCamera::new(Arc::clone(&placeholders)))
            }
            CameraBackend::None => Arc::new(UnavailableCamera),
        };

        let classifier: Arc<dyn WasteClassifier> =
            match config.capture.classifier.unwrap_or_default() {
                ClassifierBackend::Static => {
                    Arc::new(StaticClassifier::new(config.capture.analysis()))
                }
                ClassifierBackend::None => Arc::new(UnavailableClassifier),
            };

        tracing::info!(
            location = ?config.location.provider.unwrap_or_default(),
            camera = ?config.capture.camera.unwrap_or_default(),
            classifier = ?config.capture.classifier.unwrap_or_default(),
            "services configured"
        );

        Self {
            identity: Arc::new(SimulatedIdentityService::new(
                config.identity.code_validity(),
            )),
            location,
            camera,
            classifier,
            reports: Arc::new(LocalAcknowledger::new()),
            placeholders,
            location_request: LocationRequest {
                timeout: Duration::from_millis(LOCATION_TIMEOUT_MS),
                ..LocationRequest::default()
            },
            timing: Timing {
                code_delay: config.identity.code_delay(),
                verify_delay: config.identity.verify_delay(),
                location_latency: config.location.latency(),
            },
        }
    }

    /// Default adapters without any artificial delay.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            timing: Timing::default(),
            ..Self::from_config(&Config::default())
        }
    }

    /// Points the simulated GPS at a new centre after the bin was moved.
    pub fn recentre_gps(&mut self, config: &Config) {
        if config.location.provider.unwrap_or_default() == LocationBackend::Simulated {
            self.location = Arc::new(SimulatedGps::new(
                config.location.bin_site().location,
                config.location.jitter(),
            ));
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("location_request", &self.location_request)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

/// Resolves a position after the simulated latency.
///
/// A latency at or beyond the request timeout yields the fallback position
/// with [`LocationError::Timeout`] once the timeout elapses.
pub async fn locate(
    provider: Arc<dyn LocationProvider>,
    request: LocationRequest,
    latency: Duration,
) -> LocationFix {
    if latency >= request.timeout {
        tokio::time::sleep(request.timeout).await;
        tracing::warn!(timeout = ?request.timeout, "location request timed out, using fallback");
        return LocationFix {
            coordinate: FALLBACK_LOCATION,
            source: FixSource::Fallback(LocationError::Timeout),
        };
    }
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    locate_or_fallback(provider.as_ref(), &request)
}

/// Waits `delay` before running `call`.
pub async fn delayed<T>(delay: Duration, call: impl FnOnce() -> T) -> T {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    call()
}
