// SPDX-License-Identifier: MPL-2.0
//! Time subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Tick period while something on screen animates or expires.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Ticks only while toasts are visible or a request is in flight, so an
/// idle window does not wake up.
pub fn create_tick_subscription(has_notifications: bool, busy: bool) -> Subscription<Message> {
    if has_notifications || busy {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
