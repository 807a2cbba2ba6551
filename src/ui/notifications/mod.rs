// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Every user-facing outcome that does not need a decision ("OTP Sent",
//! location fallbacks, report acknowledgement failures) is surfaced as a toast
//! in the bottom-right corner. Success and info toasts last 3 s, warnings 5 s,
//! errors stay until dismissed. Up to three toasts are visible; the rest queue.
//!
//! ```ignore
//! let mut toasts = Manager::new();
//! toasts.push(Notification::success("notification-otp-sent"));
//! let overlay = Toast::view_overlay(&toasts, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
