// SPDX-License-Identifier: MPL-2.0
//! Time-driven subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Interval of the toast expiry and spinner animation tick.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates a periodic tick while toasts are shown or a request is running.
pub fn create_tick_subscription(has_notifications: bool, is_busy: bool) -> Subscription<Message> {
    if has_notifications || is_busy {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Polls the dashboard metrics while the dialog is open.
pub fn create_dashboard_subscription(open: bool, interval: Duration) -> Subscription<Message> {
    if open {
        time::every(interval).map(|_| Message::DashboardPoll)
    } else {
        Subscription::none()
    }
}
