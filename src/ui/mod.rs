// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`login`] - Identity gate: role, identifier and one-time code
//! - [`capture`] - Pickup, disposal and verify steps with submission
//! - [`settings`] - Language, theme and the reference bin
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers, text)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`navbar`] - Navigation bar with role and session tally
//! - [`notifications`] - Toast notification system for user feedback

pub mod capture;
pub mod design_tokens;
pub mod login;
pub mod navbar;
pub mod notifications;
pub mod settings;
pub mod styles;
pub mod theming;
pub mod widgets;
