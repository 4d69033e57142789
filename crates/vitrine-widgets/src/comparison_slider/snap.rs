#![forbid(unsafe_code)]

//! Position arithmetic: clamping and snap-to-landmark.
//!
//! Positions are percentages in `[0, 100]` of the after image revealed from
//! the left edge. Pointer and touch input is snapped toward the landmarks
//! 0, 50, and 100; keyboard input is not.

/// Lowest slider position.
pub const POSITION_MIN: f32 = 0.0;
/// Highest slider position.
pub const POSITION_MAX: f32 = 100.0;
/// Position at mount.
pub const INITIAL_POSITION: f32 = 50.0;
/// Keyboard increment for arrow keys.
pub const DEFAULT_KEYBOARD_STEP: f32 = 10.0;

/// Clamp a raw position into `[0, 100]`. `NaN` maps to the minimum.
#[inline]
#[must_use]
pub fn clamp_position(value: f32) -> f32 {
    if value.is_nan() {
        return POSITION_MIN;
    }
    value.clamp(POSITION_MIN, POSITION_MAX)
}

/// Convert a horizontal fraction of the container width into a clamped
/// position.
#[inline]
#[must_use]
pub fn position_from_fraction(fraction: f32) -> f32 {
    clamp_position(fraction * 100.0)
}

/// Snap thresholds.
///
/// With the defaults: below 15 snaps to 0, strictly between 35 and 65
/// snaps to 50, above 85 snaps to 100; `[15, 35]` and `[65, 85]` pass
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapBands {
    pub to_start_below: f32,
    pub center_low: f32,
    pub center_high: f32,
    pub to_end_above: f32,
}

impl Default for SnapBands {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SnapBands {
    pub const DEFAULT: Self = Self {
        to_start_below: 15.0,
        center_low: 35.0,
        center_high: 65.0,
        to_end_above: 85.0,
    };

    /// Bands that never snap.
    pub const DISABLED: Self = Self {
        to_start_below: POSITION_MIN,
        center_low: INITIAL_POSITION,
        center_high: INITIAL_POSITION,
        to_end_above: POSITION_MAX,
    };

    /// Whether the thresholds are finite, ordered, and inside `[0, 100]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let values = [
            self.to_start_below,
            self.center_low,
            self.center_high,
            self.to_end_above,
        ];
        values.iter().all(|v| v.is_finite())
            && POSITION_MIN <= self.to_start_below
            && self.to_start_below <= self.center_low
            && self.center_low <= self.center_high
            && self.center_high <= self.to_end_above
            && self.to_end_above <= POSITION_MAX
    }

    /// Snap a clamped position to the nearest landmark band.
    #[must_use]
    pub fn snap(&self, position: f32) -> f32 {
        if position < self.to_start_below {
            POSITION_MIN
        } else if position > self.center_low && position < self.center_high {
            INITIAL_POSITION
        } else if position > self.to_end_above {
            POSITION_MAX
        } else {
            position
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn landmarks_from_fractions() {
        let bands = SnapBands::DEFAULT;
        assert_eq!(bands.snap(position_from_fraction(0.12)), 0.0);
        assert_eq!(bands.snap(position_from_fraction(0.50)), 50.0);
        assert_eq!(bands.snap(position_from_fraction(0.90)), 100.0);
        assert_eq!(bands.snap(position_from_fraction(0.25)), 25.0);
        assert_eq!(bands.snap(position_from_fraction(0.75)), 75.0);
    }

    #[test]
    fn band_edges() {
        let bands = SnapBands::DEFAULT;
        assert_eq!(bands.snap(15.0), 15.0);
        assert_eq!(bands.snap(14.99), 0.0);
        assert_eq!(bands.snap(35.0), 35.0);
        assert_eq!(bands.snap(35.01), 50.0);
        assert_eq!(bands.snap(65.0), 65.0);
        assert_eq!(bands.snap(85.0), 85.0);
        assert_eq!(bands.snap(85.01), 100.0);
    }

    #[test]
    fn disabled_bands_pass_through() {
        let bands = SnapBands::DISABLED;
        assert!(bands.is_valid());
        for p in [0.0, 3.0, 49.0, 50.0, 51.0, 97.0, 100.0] {
            assert_eq!(bands.snap(p), p);
        }
    }

    #[test]
    fn validation() {
        assert!(SnapBands::DEFAULT.is_valid());
        let unordered = SnapBands {
            center_low: 70.0,
            ..SnapBands::DEFAULT
        };
        assert!(!unordered.is_valid());
        let out_of_range = SnapBands {
            to_end_above: 120.0,
            ..SnapBands::DEFAULT
        };
        assert!(!out_of_range.is_valid());
        let nan = SnapBands {
            center_high: f32::NAN,
            ..SnapBands::DEFAULT
        };
        assert!(!nan.is_valid());
    }

    #[test]
    fn clamp_handles_nan_and_extremes() {
        assert_eq!(clamp_position(f32::NAN), 0.0);
        assert_eq!(clamp_position(-3.0), 0.0);
        assert_eq!(clamp_position(250.0), 100.0);
        assert_eq!(clamp_position(f32::INFINITY), 100.0);
    }

    proptest! {
        #[test]
        fn snapped_positions_stay_in_range(fraction in -5.0f32..5.0) {
            let p = SnapBands::DEFAULT.snap(position_from_fraction(fraction));
            prop_assert!((POSITION_MIN..=POSITION_MAX).contains(&p));
        }

        #[test]
        fn snapping_is_idempotent(p in 0.0f32..=100.0) {
            let bands = SnapBands::DEFAULT;
            let once = bands.snap(p);
            prop_assert_eq!(bands.snap(once), once);
        }
    }
}
