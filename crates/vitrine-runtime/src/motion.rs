#![forbid(unsafe_code)]

//! Reduced-motion preference.
//!
//! [`MotionPreference`] mirrors the `(prefers-reduced-motion: reduce)` media
//! query. Hosts push OS-level changes with [`MotionPreference::set_reduced`];
//! components read the current value and subscribe to changes through the
//! [`MediaQuery`] trait.

use std::env;

use crate::reactive::{Observable, Subscription};

/// Environment variable consulted by [`detect_system_reduced_motion`].
pub const REDUCED_MOTION_ENV: &str = "VITRINE_REDUCED_MOTION";

thread_local! {
    static GLOBAL_PREFERENCE: MotionPreference = MotionPreference::system();
}

/// A boolean media query with live change notification.
pub trait MediaQuery {
    /// Whether the query currently matches.
    fn matches(&self) -> bool;

    /// Subscribe to match changes. The callback receives the new value.
    fn subscribe(&self, callback: Box<dyn Fn(bool)>) -> Subscription;
}

/// Shared reduced-motion preference.
#[derive(Clone, Debug)]
pub struct MotionPreference {
    reduced: Observable<bool>,
}

impl Default for MotionPreference {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MotionPreference {
    /// Create a preference with an explicit initial value.
    #[must_use]
    pub fn new(reduced: bool) -> Self {
        Self {
            reduced: Observable::new(reduced),
        }
    }

    /// Create a preference initialized from system detection.
    #[must_use]
    pub fn system() -> Self {
        Self::new(detect_system_reduced_motion())
    }

    /// Access the global preference (thread-local).
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_PREFERENCE.with(Clone::clone)
    }

    /// Whether reduced motion is requested.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.reduced.get()
    }

    /// Record a change in the user's preference.
    pub fn set_reduced(&self, reduced: bool) {
        if reduced != self.reduced.get() {
            tracing::debug!(reduced, "reduced-motion preference changed");
        }
        self.reduced.set(reduced);
    }

    /// Number of changes observed so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.reduced.version()
    }
}

impl MediaQuery for MotionPreference {
    fn matches(&self) -> bool {
        self.is_reduced()
    }

    fn subscribe(&self, callback: Box<dyn Fn(bool)>) -> Subscription {
        self.reduced.subscribe(move |reduced| callback(*reduced))
    }
}

/// Detect the reduced-motion preference from the environment.
///
/// Reads `VITRINE_REDUCED_MOTION`; `1`, `true`, `yes`, and `reduce` enable
/// it. Anything else, or an unset variable, means no preference.
#[must_use]
pub fn detect_system_reduced_motion() -> bool {
    let value = env::var(REDUCED_MOTION_ENV).ok();
    parse_reduced_motion(value.as_deref())
}

/// Parse a reduced-motion flag value.
#[must_use]
pub fn parse_reduced_motion(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}
