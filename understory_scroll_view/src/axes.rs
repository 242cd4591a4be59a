// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};

bitflags::bitflags! {
    /// Axes along which content may scroll.
    ///
    /// Disabled axes keep their anchored position: candidate positions are
    /// masked to the current value, and containment offsets are always zero.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        /// Content may move along X.
        const HORIZONTAL = 0b0000_0001;
        /// Content may move along Y.
        const VERTICAL   = 0b0000_0010;
    }
}

impl Default for ScrollAxes {
    fn default() -> Self {
        Self::all()
    }
}

impl ScrollAxes {
    /// Returns `true` if `axis` is enabled.
    #[must_use]
    pub fn allows(self, axis: Axis) -> bool {
        self.contains(axis.flag())
    }

    /// Replaces the components of `candidate` on disabled axes with those of `current`.
    #[must_use]
    pub fn mask(self, candidate: Vec2, current: Vec2) -> Vec2 {
        Vec2::new(
            if self.allows(Axis::Horizontal) {
                candidate.x
            } else {
                current.x
            },
            if self.allows(Axis::Vertical) {
                candidate.y
            } else {
                current.y
            },
        )
    }
}

/// One of the two scroll axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    Vertical,
}

impl Axis {
    /// The [`ScrollAxes`] flag for this axis.
    #[must_use]
    pub const fn flag(self) -> ScrollAxes {
        match self {
            Self::Horizontal => ScrollAxes::HORIZONTAL,
            Self::Vertical => ScrollAxes::VERTICAL,
        }
    }

    /// Extent of `s` along this axis.
    #[must_use]
    pub const fn of_size(self, s: Size) -> f64 {
        match self {
            Self::Horizontal => s.width,
            Self::Vertical => s.height,
        }
    }

    /// `(min, max)` of `r` along this axis.
    #[must_use]
    pub fn span(self, r: Rect) -> (f64, f64) {
        match self {
            Self::Horizontal => (r.min_x(), r.max_x()),
            Self::Vertical => (r.min_y(), r.max_y()),
        }
    }

    /// A vector with `value` along this axis and zero along the other.
    #[must_use]
    pub const fn vec(self, value: f64) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(value, 0.0),
            Self::Vertical => Vec2::new(0.0, value),
        }
    }
}
