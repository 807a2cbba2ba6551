// SPDX-License-Identifier: MPL-2.0
//! SVG-backed camera adapters.
//!
//! Nothing here talks to real hardware. [`PlaceholderRenderer`] rasterises a
//! labelled card with `resvg`; [`PlaceholderCamera`] serves such cards as
//! camera snapshots and [`UnavailableCamera`] simulates a device without any
//! camera.

mod camera;
mod placeholder;

pub use camera::{PlaceholderCamera, UnavailableCamera};
pub use placeholder::{PlaceholderRenderer, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
