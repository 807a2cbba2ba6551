// SPDX-License-Identifier: MPL-2.0
use eco_waste::application::port::{
    locate_or_fallback, open_camera, LocationRequest, ReportSink, WasteClassifier,
};
use eco_waste::application::report::{CaptureReport, SessionTally};
use eco_waste::domain::capture::{CaptureSession, CaptureStep, Progress, TransitionError};
use eco_waste::domain::geo::{
    AcceptanceRadius, BinSite, Coordinate, Proximity, FALLBACK_LOCATION,
};
use eco_waste::domain::identity::Role;
use eco_waste::infrastructure::{
    DeniedLocationProvider, LocalAcknowledger, PlaceholderCamera, PlaceholderRenderer,
    SimulatedGps, StaticClassifier,
};
use std::sync::Arc;

fn site() -> BinSite {
    BinSite::new(FALLBACK_LOCATION, AcceptanceRadius::new(10.0))
}

/// Runs one step with the placeholder camera and the given GPS.
fn complete_step(
    session: &mut CaptureSession,
    camera: &PlaceholderCamera,
    gps: &SimulatedGps,
    step: CaptureStep,
) -> Progress {
    let lease = open_camera(camera).expect("placeholder camera opens");
    let photo = lease.take_photo().expect("photo taken");
    assert!(!camera.is_in_use(), "stream must stop after the photo");
    assert_eq!(session.record_image(step, photo), Ok(Progress::Stayed));

    let fix = locate_or_fallback(gps, &LocationRequest::default());
    session
        .record_location(step, fix.coordinate)
        .expect("step is current")
}

#[test]
fn collection_is_reported_and_tallied() {
    let camera = PlaceholderCamera::new(Arc::new(PlaceholderRenderer::new()));
    let gps = SimulatedGps::new(FALLBACK_LOCATION, 0.0);
    let mut session = CaptureSession::new(site());

    assert_eq!(
        complete_step(&mut session, &camera, &gps, CaptureStep::Pickup),
        Progress::Advanced(CaptureStep::Disposal)
    );
    assert_eq!(
        complete_step(&mut session, &camera, &gps, CaptureStep::Disposal),
        Progress::Advanced(CaptureStep::Verify)
    );

    let check = session.check().expect("disposal recorded");
    assert_eq!(check.proximity, Proximity::WithinRange);

    let completed = session.finish().expect("ready to submit");
    assert_eq!(session.step(), CaptureStep::Pickup);
    assert!(session.pickup().is_none());

    let classifier = StaticClassifier::default();
    let analysis = classifier
        .classify(&completed.pickup.image, &completed.disposal.image)
        .ok();
    let report = CaptureReport::new(Role::Collector, completed, analysis, chrono::Utc::now());
    assert!(report.reference.as_str().starts_with("EW-"));

    let sink = LocalAcknowledger::new();
    let receipt = sink.submit(&report).expect("accepted");
    assert_eq!(receipt.reference, report.reference);
    assert_eq!(sink.accepted(), 1);

    let mut tally = SessionTally::default();
    tally.record(&report);
    assert_eq!(tally.reports, 1);
    assert_eq!(tally.points, report.points());
}

#[test]
fn denied_location_falls_back_to_reference_point() {
    let fix = locate_or_fallback(&DeniedLocationProvider, &LocationRequest::default());
    assert!(fix.is_fallback());
    assert_eq!(fix.coordinate, FALLBACK_LOCATION);
}

#[test]
fn far_disposal_is_flagged_but_submittable() {
    let camera = PlaceholderCamera::new(Arc::new(PlaceholderRenderer::new()));
    let near = SimulatedGps::new(FALLBACK_LOCATION, 0.0);
    // Roughly 111 m north of the bin.
    let far = SimulatedGps::new(
        Coordinate::new(FALLBACK_LOCATION.latitude() + 0.001, FALLBACK_LOCATION.longitude()),
        0.0,
    );
    let mut session = CaptureSession::new(site());

    complete_step(&mut session, &camera, &near, CaptureStep::Pickup);
    complete_step(&mut session, &camera, &far, CaptureStep::Disposal);

    let check = session.check().expect("disposal recorded");
    assert_eq!(check.proximity, Proximity::TooFar);
    assert!(check.distance.metres() > 100.0);
    assert!(session.finish().is_ok());
}

#[test]
fn artifacts_for_a_left_step_are_rejected() {
    let camera = PlaceholderCamera::new(Arc::new(PlaceholderRenderer::new()));
    let gps = SimulatedGps::new(FALLBACK_LOCATION, 0.0);
    let mut session = CaptureSession::new(site());
    complete_step(&mut session, &camera, &gps, CaptureStep::Pickup);

    let late = session.record_location(CaptureStep::Pickup, FALLBACK_LOCATION);
    assert!(matches!(late, Err(TransitionError::StaleStep { .. })));
    assert_eq!(session.step(), CaptureStep::Disposal);
}

#[test]
fn back_restores_pickup_artifacts() {
    let camera = PlaceholderCamera::new(Arc::new(PlaceholderRenderer::new()));
    let gps = SimulatedGps::new(FALLBACK_LOCATION, 0.0);
    let mut session = CaptureSession::new(site());
    complete_step(&mut session, &camera, &gps, CaptureStep::Pickup);

    assert_eq!(session.back(), Ok(CaptureStep::Pickup));
    assert!(session.current_image().is_some());
    assert_eq!(session.current_location(), Some(FALLBACK_LOCATION));
    assert_eq!(session.back(), Err(TransitionError::NoPreviousStep));
}
