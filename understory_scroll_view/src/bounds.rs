// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Containment geometry.
//!
//! These are pure functions over rectangles in the viewport's local space.
//! They hold no state; the containment controller caches their results.
//!
//! ## Pipeline
//!
//! 1. [`panel_corners`] places a panel's rect in world space from its
//!    anchored position, pivot, and scale.
//! 2. [`content_bounds`] brings those corners into the viewport's local
//!    space and takes their axis-aligned bounding box.
//! 3. [`adjust_for_pivot`] grows the content bounds to the viewport's size on
//!    axes where content is smaller, so that small content counts as
//!    exactly covering the viewport when resting at its pivot.
//! 4. [`containment_offset`] answers how far content displaced by some delta
//!    must be pushed back so it still covers the viewport.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::axes::{Axis, ScrollAxes};

/// Relative tolerance used when comparing content and viewport extents.
const EXTENT_TOLERANCE: f64 = 1e-6;

/// World-space corners of a panel.
///
/// `rect` is the panel's untransformed rect, in a space whose origin is the
/// panel's pivot point. Each corner is scaled componentwise by `local_scale`,
/// offset by `anchored_position` in the parent's space, and finally mapped
/// through `parent_to_world`.
#[must_use]
pub fn panel_corners(
    anchored_position: Vec2,
    local_scale: Vec2,
    rect: Rect,
    parent_to_world: Affine,
) -> [Point; 4] {
    let place = |x: f64, y: f64| {
        let local = Point::new(
            anchored_position.x + x * local_scale.x,
            anchored_position.y + y * local_scale.y,
        );
        parent_to_world * local
    };
    [
        place(rect.x0, rect.y0),
        place(rect.x0, rect.y1),
        place(rect.x1, rect.y1),
        place(rect.x1, rect.y0),
    ]
}

/// A panel's untransformed rect for a given `size` and normalized `pivot`.
///
/// The returned rect has the pivot point at the origin: pivot `(0, 0)` puts
/// the origin at the minimum corner, `(1, 1)` at the maximum corner.
#[must_use]
pub fn pivot_rect(size: Size, pivot: Vec2) -> Rect {
    let x0 = -pivot.x * size.width;
    let y0 = -pivot.y * size.height;
    Rect::new(x0, y0, x0 + size.width, y0 + size.height)
}

/// Axis-aligned bounds of `corners` in the space `world_to_local` maps into.
///
/// All four corners are transformed and the componentwise extremes taken, so
/// the result is correct for transforms containing rotation, shear, or
/// non-uniform scale, not only for axis-aligned ones. Degenerate input (all
/// corners coincident or collinear) yields a zero-area rect.
#[must_use]
pub fn content_bounds(corners: [Point; 4], world_to_local: Affine) -> Rect {
    let first = world_to_local * corners[0];
    let (mut min, mut max) = (first, first);
    for &corner in &corners[1..] {
        let q = world_to_local * corner;
        min.x = min.x.min(q.x);
        min.y = min.y.min(q.y);
        max.x = max.x.max(q.x);
        max.y = max.y.max(q.y);
    }
    Rect::new(min.x, min.y, max.x, max.y)
}

/// Grows content bounds to the viewport's size on axes where they are smaller.
///
/// On every axis where `view` is larger than `content_size`, the size becomes
/// the viewport's and the center shifts by
/// `-(view_size - content_size) * (pivot - 0.5)`: content pivoted at its
/// minimum edge grows towards the maximum only, pivot `1` grows towards the
/// minimum only, and pivot `0.5` grows symmetrically.
#[must_use]
pub fn adjust_for_pivot(
    view: Rect,
    pivot: Vec2,
    content_size: Size,
    content_center: Point,
) -> (Size, Point) {
    let view_size = view.size();
    let mut size = content_size;
    let mut center = content_center;

    let excess_x = view_size.width - content_size.width;
    if excess_x > 0.0 {
        center.x -= excess_x * (pivot.x - 0.5);
        size.width = view_size.width;
    }
    let excess_y = view_size.height - content_size.height;
    if excess_y > 0.0 {
        center.y -= excess_y * (pivot.y - 0.5);
        size.height = view_size.height;
    }
    (size, center)
}

/// [`adjust_for_pivot`] applied to a rect.
#[must_use]
pub fn adjust_rect_for_pivot(view: Rect, pivot: Vec2, content: Rect) -> Rect {
    let (size, center) = adjust_for_pivot(view, pivot, content.size(), content.center());
    Rect::from_center_size(center, size)
}

/// Correction keeping `content`, displaced by `delta`, over the whole of `view`.
///
/// Per enabled axis, after shifting the content by `delta`:
/// - if the viewport's far edge lies past the content's far edge, the
///   correction is `view.max - content.max`;
/// - else if the viewport's near edge lies before the content's near edge,
///   it is `view.min - content.min`;
/// - otherwise it is zero.
///
/// Disabled axes always report zero.
#[must_use]
pub fn containment_offset(view: Rect, content: Rect, axes: ScrollAxes, delta: Vec2) -> Vec2 {
    let mut offset = Vec2::ZERO;
    if axes.allows(Axis::Horizontal) {
        offset.x = axis_offset(
            (view.min_x(), view.max_x()),
            (content.min_x() + delta.x, content.max_x() + delta.x),
        );
    }
    if axes.allows(Axis::Vertical) {
        offset.y = axis_offset(
            (view.min_y(), view.max_y()),
            (content.min_y() + delta.y, content.max_y() + delta.y),
        );
    }
    offset
}

fn axis_offset((view_min, view_max): (f64, f64), (content_min, content_max): (f64, f64)) -> f64 {
    if view_max > content_max {
        view_max - content_max
    } else if view_min < content_min {
        view_min - content_min
    } else {
        0.0
    }
}

/// Scroll position of `content` within `view` along `axis`, in `0..=1`.
///
/// `0` means the content's minimum edge is aligned with the viewport's
/// minimum edge, `1` that the maximum edges are aligned. When the content
/// does not extend past the viewport the position is `0` if the content's
/// minimum edge is at or past the viewport's, and `1` otherwise.
#[must_use]
pub fn normalized_position(view: Rect, content: Rect, axis: Axis) -> f64 {
    let (view_min, _) = axis.span(view);
    let (content_min, _) = axis.span(content);
    let view_extent = axis.of_size(view.size());
    let content_extent = axis.of_size(content.size());
    if content_extent <= view_extent || approx_eq(content_extent, view_extent) {
        return if view_min <= content_min { 0.0 } else { 1.0 };
    }
    (view_min - content_min) / (content_extent - view_extent)
}

/// Displacement along `axis` that brings `content` to normalized position `value`.
#[must_use]
pub fn normalized_shift(view: Rect, content: Rect, axis: Axis, value: f64) -> f64 {
    let (view_min, _) = axis.span(view);
    let (content_min, _) = axis.span(content);
    let hidden = axis.of_size(content.size()) - axis.of_size(view.size());
    let target_min = view_min - value * hidden;
    target_min - content_min
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EXTENT_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
