// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Server**: Backend location and retry behavior
//! - **Sources**: Source browser pagination
//! - **Dashboard**: Metrics polling
//! - **Notifications**: Toast lifetime

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Maximum allowed retries.
pub const MAX_MAX_RETRIES: u32 = 10;

/// Delay before the first retry (in milliseconds). Doubles on each retry.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;

/// Minimum initial backoff (in milliseconds).
pub const MIN_INITIAL_BACKOFF_MS: u64 = 10;

/// Maximum initial backoff (in milliseconds).
pub const MAX_INITIAL_BACKOFF_MS: u64 = 30_000;

/// TCP connect timeout (in seconds). Streaming responses have no overall timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Minimum connect timeout (in seconds).
pub const MIN_CONNECT_TIMEOUT_SECS: u64 = 1;

/// Maximum connect timeout (in seconds).
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Sources Defaults
// ==========================================================================

/// Number of sources shown per page in the source browser.
pub const DEFAULT_SOURCES_PAGE_SIZE: usize = 5;

/// Minimum sources page size.
pub const MIN_SOURCES_PAGE_SIZE: usize = 1;

/// Maximum sources page size.
pub const MAX_SOURCES_PAGE_SIZE: usize = 100;

// ==========================================================================
// Dashboard Defaults
// ==========================================================================

/// Interval between two metrics refreshes while the dashboard is open (seconds).
pub const DEFAULT_DASHBOARD_REFRESH_SECS: u64 = 5;

/// Minimum dashboard refresh interval (seconds).
pub const MIN_DASHBOARD_REFRESH_SECS: u64 = 1;

/// Maximum dashboard refresh interval (seconds).
pub const MAX_DASHBOARD_REFRESH_SECS: u64 = 300;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Lifetime of a toast notification (seconds).
pub const DEFAULT_TOAST_TIMEOUT_SECS: u64 = 5;

/// Minimum toast lifetime (seconds).
pub const MIN_TOAST_TIMEOUT_SECS: u64 = 1;

/// Maximum toast lifetime (seconds).
pub const MAX_TOAST_TIMEOUT_SECS: u64 = 60;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MAX_RETRIES <= MAX_MAX_RETRIES);

    assert!(MIN_INITIAL_BACKOFF_MS > 0);
    assert!(DEFAULT_INITIAL_BACKOFF_MS >= MIN_INITIAL_BACKOFF_MS);
    assert!(DEFAULT_INITIAL_BACKOFF_MS <= MAX_INITIAL_BACKOFF_MS);

    assert!(MIN_CONNECT_TIMEOUT_SECS > 0);
    assert!(DEFAULT_CONNECT_TIMEOUT_SECS >= MIN_CONNECT_TIMEOUT_SECS);
    assert!(DEFAULT_CONNECT_TIMEOUT_SECS <= MAX_CONNECT_TIMEOUT_SECS);

    assert!(MIN_SOURCES_PAGE_SIZE > 0);
    assert!(DEFAULT_SOURCES_PAGE_SIZE >= MIN_SOURCES_PAGE_SIZE);
    assert!(DEFAULT_SOURCES_PAGE_SIZE <= MAX_SOURCES_PAGE_SIZE);

    assert!(MIN_DASHBOARD_REFRESH_SECS > 0);
    assert!(DEFAULT_DASHBOARD_REFRESH_SECS >= MIN_DASHBOARD_REFRESH_SECS);
    assert!(DEFAULT_DASHBOARD_REFRESH_SECS <= MAX_DASHBOARD_REFRESH_SECS);

    assert!(MIN_TOAST_TIMEOUT_SECS > 0);
    assert!(DEFAULT_TOAST_TIMEOUT_SECS >= MIN_TOAST_TIMEOUT_SECS);
    assert!(DEFAULT_TOAST_TIMEOUT_SECS <= MAX_TOAST_TIMEOUT_SECS);
};
