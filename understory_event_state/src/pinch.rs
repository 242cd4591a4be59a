// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-point pinch tracking.
//!
//! Pinch size is measured with [`spread`], the sum of the absolute per-axis
//! separations of the two contacts. It grows and shrinks monotonically with
//! finger separation along either axis, and avoids a square root per frame.
//! Note that it is not isotropic: a diagonal pinch reports a larger spread
//! than an axis-aligned pinch of the same Euclidean length.
//!
//! [`PinchState`] remembers the baseline captured when the second contact
//! lands and answers per-frame questions from the contacts' current positions
//! and their movement since the previous frame.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::pinch::{PinchState, spread};
//!
//! assert_eq!(spread(Point::new(100.0, 100.0), Point::new(200.0, 100.0)), 100.0);
//!
//! let mut pinch = PinchState::default();
//! pinch.start(Point::new(100.0, 100.0), Point::new(200.0, 100.0));
//!
//! // Both fingers move outwards by 50 this frame.
//! let a = Point::new(50.0, 100.0);
//! let b = Point::new(250.0, 100.0);
//! let change = PinchState::frame_spread_change(a, Vec2::new(-50.0, 0.0), b, Vec2::new(50.0, 0.0));
//! assert_eq!(change, 100.0);
//! assert_eq!(pinch.total_spread_change(a, b), Some(100.0));
//! ```

use kurbo::{Point, Vec2};

/// L1 separation of two points: `|a.x - b.x| + |a.y - b.y|`.
#[must_use]
pub fn spread(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Baseline of an ongoing pinch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchBaseline {
    /// Spread of the contacts when the pinch started.
    pub spread: f64,
    /// Midpoint of the contacts when the pinch started.
    pub midpoint: Point,
}

/// Tracks an ongoing two-point pinch.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PinchState {
    baseline: Option<PinchBaseline>,
}

impl PinchState {
    /// Start a pinch with the two contacts at `a` and `b`.
    pub fn start(&mut self, a: Point, b: Point) {
        self.baseline = Some(PinchBaseline {
            spread: spread(a, b),
            midpoint: midpoint(a, b),
        });
    }

    /// End the pinch.
    pub fn end(&mut self) {
        self.baseline = None;
    }

    /// Returns `true` while a pinch is active.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.baseline.is_some()
    }

    /// The baseline captured by [`PinchState::start`].
    #[must_use]
    pub fn baseline(&self) -> Option<PinchBaseline> {
        self.baseline
    }

    /// Spread change since the pinch started.
    #[must_use]
    pub fn total_spread_change(&self, a: Point, b: Point) -> Option<f64> {
        self.baseline.map(|base| spread(a, b) - base.spread)
    }

    /// Midpoint travel since the pinch started.
    #[must_use]
    pub fn midpoint_travel(&self, a: Point, b: Point) -> Option<Vec2> {
        self.baseline.map(|base| midpoint(a, b) - base.midpoint)
    }

    /// Spread change during one frame.
    ///
    /// `a` and `b` are the contacts' current positions and `a_delta`,
    /// `b_delta` their movement during the frame.
    #[must_use]
    pub fn frame_spread_change(a: Point, a_delta: Vec2, b: Point, b_delta: Vec2) -> f64 {
        spread(a, b) - spread(a - a_delta, b - b_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_is_l1_separation() {
        assert_eq!(spread(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 7.0);
        assert_eq!(spread(Point::new(3.0, 4.0), Point::new(0.0, 0.0)), 7.0);
        assert_eq!(spread(Point::new(5.0, 5.0), Point::new(5.0, 5.0)), 0.0);
    }

    #[test]
    fn diagonal_spread_exceeds_axis_aligned_of_same_length() {
        let axis = spread(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        // Same Euclidean length of 10, at 45 degrees.
        let leg = 7.071_067_811_865_475;
        let diagonal = spread(Point::new(0.0, 0.0), Point::new(leg, leg));
        assert!(diagonal > axis);
    }

    #[test]
    fn frame_change_is_zero_without_movement() {
        let change = PinchState::frame_spread_change(
            Point::new(0.0, 0.0),
            Vec2::ZERO,
            Point::new(40.0, 30.0),
            Vec2::ZERO,
        );
        assert_eq!(change, 0.0);
    }

    #[test]
    fn frame_change_is_negative_when_contacts_approach() {
        let change = PinchState::frame_spread_change(
            Point::new(60.0, 0.0),
            Vec2::new(10.0, 0.0),
            Point::new(90.0, 0.0),
            Vec2::new(-10.0, 0.0),
        );
        assert_eq!(change, -20.0);
    }

    #[test]
    fn parallel_motion_does_not_change_spread() {
        let change = PinchState::frame_spread_change(
            Point::new(110.0, 20.0),
            Vec2::new(10.0, 20.0),
            Point::new(210.0, 20.0),
            Vec2::new(10.0, 20.0),
        );
        assert_eq!(change, 0.0);
    }

    #[test]
    fn baseline_lifecycle() {
        let mut pinch = PinchState::default();
        assert!(!pinch.is_pinching());
        assert_eq!(pinch.total_spread_change(Point::ORIGIN, Point::ORIGIN), None);

        pinch.start(Point::new(100.0, 100.0), Point::new(200.0, 100.0));
        let base = pinch.baseline().unwrap();
        assert_eq!(base.spread, 100.0);
        assert_eq!(base.midpoint, Point::new(150.0, 100.0));
        assert_eq!(
            pinch.midpoint_travel(Point::new(110.0, 100.0), Point::new(210.0, 100.0)),
            Some(Vec2::new(10.0, 0.0))
        );

        pinch.end();
        assert!(!pinch.is_pinching());
    }
}
