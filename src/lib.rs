// SPDX-License-Identifier: MPL-2.0
//! `eco_waste` is a guided waste-collection capture client built with the
//! Iced GUI framework.
//!
//! A collector or government employee signs in with a national identifier and
//! a one-time code, then documents each collection in three steps: a pickup
//! photo with its position, a disposal photo with its position checked
//! against the reference bin, and a verify summary with the estimated waste
//! category before submission.
//!
//! Identity, location, camera, classification and report submission sit
//! behind the ports in [`application::port`]; the adapters shipped in
//! [`infrastructure`] simulate them locally.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod icon;
pub mod infrastructure;
pub mod ui;
