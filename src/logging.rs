//! Logging facade.
//!
//! The navigation core never installs a logger. It emits records through the
//! macros below, which forward to [`log`](https://docs.rs/log) or
//! [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! Enable one of the two; with both, every record goes to each backend.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Levels used by the crate:
//!
//! - `trace_log!`: title cache hits and misses, per-rule planning steps.
//! - `debug_log!`: breadcrumb/redirect recomputation, dispatch outcomes.
//! - `info_log!`: viewport subscription changes.
//! - `warn_log!`: malformed menu nodes, missing authorized fallback.
//! - `error_log!`: configuration that failed to load.
//!
//! ```ignore
//! use console_navigator::{debug_log, warn_log};
//!
//! debug_log!("Planned {} redirect rules", rules.len());
//! warn_log!("Menu node '{}' has no path", id);
//! ```

/// Target under which every record of this crate is emitted.
pub const TARGET: &str = "console_navigator";

/// Finest-grained diagnostics.
///
/// Records are emitted under the `console_navigator` target.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Recomputation and dispatch diagnostics.
///
/// Records are emitted under the `console_navigator` target.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Lifecycle messages.
///
/// Records are emitted under the `console_navigator` target.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::info!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Recoverable configuration problems.
///
/// Records are emitted under the `console_navigator` target.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::logging::TARGET, $($arg)*);
    };
}

/// Failures the caller should know about.
///
/// Records are emitted under the `console_navigator` target.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!(target: $crate::logging::TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::logging::TARGET, $($arg)*);
    };
}
