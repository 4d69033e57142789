#![forbid(unsafe_code)]

//! Client-space geometry.

/// An element's bounding box in client coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Create a new bounding box.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether the box can be used for relative measurements.
    ///
    /// A box that has not been laid out yet reports zero width.
    #[inline]
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.left.is_finite()
    }

    /// Horizontal offset of `client_x` from the left edge as a fraction of
    /// the width. The result is unclamped.
    ///
    /// Returns `None` when the box is not measurable or `client_x` is not
    /// finite, so callers never see `NaN` or infinities.
    #[must_use]
    pub fn fraction_x(&self, client_x: f32) -> Option<f32> {
        if !self.is_measurable() || !client_x.is_finite() {
            return None;
        }
        let fraction = (client_x - self.left) / self.width;
        fraction.is_finite().then_some(fraction)
    }

    /// Whether a point lies inside the box (left/top inclusive).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_at_edges_and_middle() {
        let b = Bounds::new(100.0, 0.0, 400.0, 300.0);
        assert_eq!(b.fraction_x(100.0), Some(0.0));
        assert_eq!(b.fraction_x(300.0), Some(0.5));
        assert_eq!(b.fraction_x(500.0), Some(1.0));
    }

    #[test]
    fn fraction_is_unclamped() {
        let b = Bounds::new(0.0, 0.0, 200.0, 10.0);
        assert_eq!(b.fraction_x(-100.0), Some(-0.5));
        assert_eq!(b.fraction_x(400.0), Some(2.0));
    }

    #[test]
    fn zero_width_is_not_measurable() {
        let b = Bounds::new(0.0, 0.0, 0.0, 300.0);
        assert!(!b.is_measurable());
        assert_eq!(b.fraction_x(10.0), None);
    }

    #[test]
    fn non_finite_inputs_rejected() {
        let b = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(b.fraction_x(f32::NAN), None);
        assert_eq!(b.fraction_x(f32::INFINITY), None);
        let bad = Bounds::new(0.0, 0.0, f32::NAN, 100.0);
        assert_eq!(bad.fraction_x(1.0), None);
        let negative = Bounds::new(0.0, 0.0, -5.0, 100.0);
        assert_eq!(negative.fraction_x(1.0), None);
    }

    #[test]
    fn contains_is_half_open() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(9.9, 9.9));
        assert!(!b.contains(10.0, 5.0));
    }
}
