// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::axes::ScrollAxes;

/// Errors reported when building a [`ScrollConfig`] or [`ScaleRange`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A scale bound was NaN, infinite, zero, or negative.
    #[error("scale bounds must be finite and positive, got {min}..={max}")]
    InvalidScaleBound {
        /// Requested minimum scale.
        min: f64,
        /// Requested maximum scale.
        max: f64,
    },
    /// The minimum scale exceeded the maximum.
    #[error("minimum scale {min} exceeds maximum scale {max}")]
    InvertedScaleRange {
        /// Requested minimum scale.
        min: f64,
        /// Requested maximum scale.
        max: f64,
    },
    /// Pinch damping was NaN, infinite, zero, or negative.
    #[error("pinch damping must be finite and positive, got {0}")]
    InvalidDamping(f64),
}

/// Permissible range of the content's uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    min: f64,
    max: f64,
}

impl ScaleRange {
    /// Creates a range, validating that `0 < min <= max` and both are finite.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(min) || !valid(max) {
            return Err(ConfigError::InvalidScaleBound { min, max });
        }
        if min > max {
            return Err(ConfigError::InvertedScaleRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest permitted scale.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest permitted scale.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    /// Returns `true` if `scale` lies within the range.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.5, max: 2.0 }
    }
}

/// Construction-time settings of a scroll view.
///
/// The defaults scroll on both axes, allow scales from `0.5` to `2.0`, and
/// use a pinch damping of `0.25`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollConfig {
    axes: ScrollAxes,
    scale_range: ScaleRange,
    damping: f64,
}

impl ScrollConfig {
    /// Default pinch damping.
    pub const DEFAULT_DAMPING: f64 = 0.25;

    /// Creates a configuration scrolling on both axes.
    ///
    /// `damping` scales pinch sensitivity: a spread change equal to
    /// `content_width * damping` changes the scale by `1.0`. Larger values
    /// make pinching slower.
    pub fn new(scale_range: ScaleRange, damping: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            axes: ScrollAxes::default(),
            scale_range,
            damping: validate_damping(damping)?,
        })
    }

    /// Sets the scrollable axes.
    #[must_use]
    pub fn with_axes(mut self, axes: ScrollAxes) -> Self {
        self.axes = axes;
        self
    }

    /// Scrollable axes.
    #[must_use]
    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    /// Permissible scale range.
    #[must_use]
    pub fn scale_range(&self) -> ScaleRange {
        self.scale_range
    }

    /// Pinch damping.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            axes: ScrollAxes::default(),
            scale_range: ScaleRange::default(),
            damping: Self::DEFAULT_DAMPING,
        }
    }
}

pub(crate) fn validate_damping(damping: f64) -> Result<f64, ConfigError> {
    if damping.is_finite() && damping > 0.0 {
        Ok(damping)
    } else {
        Err(ConfigError::InvalidDamping(damping))
    }
}
