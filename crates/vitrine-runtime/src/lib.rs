#![forbid(unsafe_code)]

//! Runtime services for Vitrine components.
//!
//! - [`reactive`]: version-tracked observable values with RAII subscriptions.
//! - [`motion`]: the reduced-motion media query and its live-change feed.
//! - [`logging`]: tracing subscriber setup (feature `logging`).

#[cfg(feature = "logging")]
pub mod logging;
pub mod motion;
pub mod reactive;

pub use motion::{MediaQuery, MotionPreference, detect_system_reduced_motion};
pub use reactive::{Observable, Subscription};
