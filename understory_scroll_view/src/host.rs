// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities a scroll view consumes from its host.
//!
//! The scroll view does not own a scene graph. Hosts adapt their own node
//! transforms, layout results, and input queues through these traits:
//!
//! - [`LayoutSource`]: layout rects, world corners, and world→local transforms
//!   of the nodes a scroll view involves, plus fire-and-forget layout hooks.
//! - [`PanelTransform`]: the content panel's anchored position, pivot, and
//!   scale.
//! - [`TouchSource`]: a per-frame enumeration of active contacts.
//! - [`ScrollHost`]: the combination the scroll view owns, with notification
//!   hooks for observers such as scrollbars.
//!
//! [`FlatScene`] is a self-contained host suitable for tests, benchmarks, and
//! toolkits that keep viewport and content geometry in plain values.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_event_state::touch::TouchSample;

use crate::bounds::{panel_corners, pivot_rect};

/// Nodes a scroll view asks its host about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollNode {
    /// The scroll view's own node.
    Root,
    /// The clipping window. Hosts without a separate viewport node should
    /// answer for [`ScrollNode::Root`].
    Viewport,
    /// The scrolled and scaled panel.
    Content,
}

/// Layout queries and layout-dirtying hooks.
pub trait LayoutSource {
    /// Post-layout rect of `node` in its own local space.
    fn layout_rect(&self, node: ScrollNode) -> Rect;

    /// Corners of `node`'s rect in world space.
    fn world_corners(&self, node: ScrollNode) -> [Point; 4];

    /// Transform from world space into `node`'s local space.
    fn world_to_local(&self, node: ScrollNode) -> Affine;

    /// Maps a screen point into `node`'s local space.
    ///
    /// Returns `None` when the point cannot be mapped, for example when the
    /// node's plane is edge-on to the camera. The default treats screen space
    /// as world space.
    fn screen_to_local(&self, node: ScrollNode, screen: Point) -> Option<Point> {
        Some(self.world_to_local(node) * screen)
    }

    /// Requests a layout pass covering `node`.
    fn mark_for_layout_rebuild(&mut self, node: ScrollNode) {
        let _ = node;
    }

    /// Forces any pending layout and canvas updates to run now.
    fn force_canvas_update(&mut self) {}

    /// Returns `true` while the host is in the middle of a layout pass.
    fn is_rebuilding_layout(&self) -> bool {
        false
    }
}

/// Transform attributes of the content panel.
pub trait PanelTransform {
    /// Offset of the panel's pivot from its anchor reference point, in the
    /// parent's space.
    fn anchored_position(&self) -> Vec2;

    /// Sets the anchored position.
    fn set_anchored_position(&mut self, position: Vec2);

    /// Normalized pivot; `(0, 0)` is the rect's minimum corner.
    fn pivot(&self) -> Vec2;

    /// Sets the pivot.
    fn set_pivot(&mut self, pivot: Vec2);

    /// Per-axis scale.
    fn local_scale(&self) -> Vec2;

    /// Sets the per-axis scale.
    fn set_local_scale(&mut self, scale: Vec2);

    /// Untransformed rect, with the pivot at the origin.
    fn rect(&self) -> Rect;
}

/// Per-frame enumeration of active contacts.
pub trait TouchSource {
    /// Number of contacts reported this frame.
    fn touch_count(&self) -> usize;

    /// The contact at `index`, for `index < touch_count()`.
    fn touch(&self, index: usize) -> Option<TouchSample>;
}

impl TouchSource for [TouchSample] {
    fn touch_count(&self) -> usize {
        self.len()
    }

    fn touch(&self, index: usize) -> Option<TouchSample> {
        self.get(index).copied()
    }
}

impl<const N: usize> TouchSource for [TouchSample; N] {
    fn touch_count(&self) -> usize {
        N
    }

    fn touch(&self, index: usize) -> Option<TouchSample> {
        self.get(index).copied()
    }
}

/// Everything a scroll view needs from its host.
///
/// Both notification hooks default to doing nothing.
pub trait ScrollHost: LayoutSource + PanelTransform {
    /// Called whenever the scroll view commits a new anchored position.
    fn content_position_changed(&mut self, position: Vec2) {
        let _ = position;
    }

    /// Called once per frame in which the viewport bounds, content bounds, or
    /// anchored position changed, with the new normalized scroll position.
    fn scroll_value_changed(&mut self, normalized: Vec2) {
        let _ = normalized;
    }
}

/// A host keeping viewport and content geometry in plain values.
///
/// The viewport's local space has its origin at the viewport's minimum
/// corner and is placed in the world by `viewport_transform`. The content is
/// a child of the viewport whose anchor reference point is that origin, so
/// its anchored position is the location of its pivot in viewport space.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatScene {
    /// Size of the viewport.
    pub viewport_size: Size,
    /// Viewport local → world transform.
    pub viewport_transform: Affine,
    /// Unscaled size of the content.
    pub content_size: Size,
    /// Content anchored position.
    pub anchored_position: Vec2,
    /// Content pivot.
    pub pivot: Vec2,
    /// Content scale.
    pub local_scale: Vec2,
    /// Calls received from the scroll view.
    pub counters: HostCounters,
    /// Argument of the most recent [`ScrollHost::scroll_value_changed`] call.
    pub last_scroll_value: Option<Vec2>,
}

/// Tally of the hooks a [`FlatScene`] received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCounters {
    /// [`LayoutSource::mark_for_layout_rebuild`] calls.
    pub layout_requests: u32,
    /// [`LayoutSource::force_canvas_update`] calls.
    pub canvas_updates: u32,
    /// [`PanelTransform::set_local_scale`] calls.
    pub scale_writes: u32,
    /// [`ScrollHost::content_position_changed`] calls.
    pub position_changes: u32,
    /// [`ScrollHost::scroll_value_changed`] calls.
    pub value_changes: u32,
}

impl FlatScene {
    /// Creates a scene with an untransformed viewport and content pivoted at
    /// its minimum corner, resting at the viewport origin with scale `1`.
    #[must_use]
    pub fn new(viewport_size: Size, content_size: Size) -> Self {
        Self {
            viewport_size,
            viewport_transform: Affine::IDENTITY,
            content_size,
            anchored_position: Vec2::ZERO,
            pivot: Vec2::ZERO,
            local_scale: Vec2::new(1.0, 1.0),
            counters: HostCounters::default(),
            last_scroll_value: None,
        }
    }

    /// Sets the content pivot.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    /// Sets the content anchored position.
    #[must_use]
    pub fn with_anchored_position(mut self, position: Vec2) -> Self {
        self.anchored_position = position;
        self
    }

    /// Sets the viewport local → world transform.
    #[must_use]
    pub fn with_viewport_transform(mut self, transform: Affine) -> Self {
        self.viewport_transform = transform;
        self
    }

    /// Content bounds in viewport space, without any pivot adjustment.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        let r = pivot_rect(self.content_size, self.pivot);
        let s = self.local_scale;
        let p = self.anchored_position;
        Rect::new(
            p.x + r.x0 * s.x,
            p.y + r.y0 * s.y,
            p.x + r.x1 * s.x,
            p.y + r.y1 * s.y,
        )
        .abs()
    }
}

impl LayoutSource for FlatScene {
    fn layout_rect(&self, node: ScrollNode) -> Rect {
        match node {
            ScrollNode::Root | ScrollNode::Viewport => {
                Rect::from_origin_size(Point::ORIGIN, self.viewport_size)
            }
            ScrollNode::Content => pivot_rect(self.content_size, self.pivot),
        }
    }

    fn world_corners(&self, node: ScrollNode) -> [Point; 4] {
        match node {
            ScrollNode::Root | ScrollNode::Viewport => panel_corners(
                Vec2::ZERO,
                Vec2::new(1.0, 1.0),
                self.layout_rect(node),
                self.viewport_transform,
            ),
            ScrollNode::Content => panel_corners(
                self.anchored_position,
                self.local_scale,
                self.rect(),
                self.viewport_transform,
            ),
        }
    }

    fn world_to_local(&self, node: ScrollNode) -> Affine {
        match node {
            ScrollNode::Root | ScrollNode::Viewport => self.viewport_transform.inverse(),
            ScrollNode::Content => {
                let s = self.local_scale;
                let content_to_world = self.viewport_transform
                    * Affine::translate(self.anchored_position)
                    * Affine::scale_non_uniform(s.x, s.y);
                content_to_world.inverse()
            }
        }
    }

    fn screen_to_local(&self, node: ScrollNode, screen: Point) -> Option<Point> {
        let local = self.world_to_local(node) * screen;
        local.is_finite().then_some(local)
    }

    fn mark_for_layout_rebuild(&mut self, _node: ScrollNode) {
        self.counters.layout_requests += 1;
    }

    fn force_canvas_update(&mut self) {
        self.counters.canvas_updates += 1;
    }
}

impl PanelTransform for FlatScene {
    fn anchored_position(&self) -> Vec2 {
        self.anchored_position
    }

    fn set_anchored_position(&mut self, position: Vec2) {
        self.anchored_position = position;
    }

    fn pivot(&self) -> Vec2 {
        self.pivot
    }

    fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }

    fn local_scale(&self) -> Vec2 {
        self.local_scale
    }

    fn set_local_scale(&mut self, scale: Vec2) {
        self.local_scale = scale;
        self.counters.scale_writes += 1;
    }

    fn rect(&self) -> Rect {
        pivot_rect(self.content_size, self.pivot)
    }
}

impl ScrollHost for FlatScene {
    fn content_position_changed(&mut self, _position: Vec2) {
        self.counters.position_changes += 1;
    }

    fn scroll_value_changed(&mut self, normalized: Vec2) {
        self.counters.value_changes += 1;
        self.last_scroll_value = Some(normalized);
    }
}
