// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Capture,
    Settings,
}

impl Screen {
    /// Whether the screen is only reachable with a role in the session store.
    #[must_use]
    pub fn requires_role(self) -> bool {
        !matches!(self, Screen::Login)
    }

    /// Returns the i18n key of the screen title.
    #[must_use]
    pub fn title_key(self) -> &'static str {
        match self {
            Screen::Login => "screen-login",
            Screen::Capture => "screen-capture",
            Screen::Settings => "screen-settings",
        }
    }
}
