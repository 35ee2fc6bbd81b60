//! Conditional logging macros for library-level tracing.
//!
//! With the `logging` feature these forward to `tracing`; without it they
//! expand to nothing, so the scoring engine carries no logging cost.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(side = %side, "point added");
//! warn!(key = key, error = %e, "record save failed");
//! ```

/// Very detailed internal steps (clock ticks). Only the runtime emits these.
#[cfg(all(feature = "logging", feature = "runtime"))]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(all(not(feature = "logging"), feature = "runtime"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Individual scoring mutations.
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Lifecycle events: bouts concluded, sessions loaded or reset.
#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Unexpected but handled situations, e.g. a discarded record.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use log_debug as debug;
pub(crate) use log_info as info;
#[cfg(feature = "runtime")]
pub(crate) use log_trace as trace;
pub(crate) use log_warn as warn;
