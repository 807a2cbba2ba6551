// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business rules with no dependencies beyond `std`.
//!
//! # Modules
//!
//! - [`identity`]: Roles and login credentials ([`Role`](identity::Role),
//!   [`Identifier`](identity::Identifier), [`OneTimeCode`](identity::OneTimeCode))
//! - [`geo`]: Coordinates and the bin proximity check
//!   ([`Coordinate`](geo::Coordinate), [`BinSite`](geo::BinSite))
//! - [`capture`]: The guided capture state machine
//!   ([`CaptureSession`](capture::CaptureSession)) and its artifacts

pub mod capture;
pub mod geo;
pub mod identity;
