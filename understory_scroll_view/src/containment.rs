// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};
use tracing::{debug, trace};

use crate::axes::{Axis, ScrollAxes};
use crate::bounds;
use crate::config::ScaleRange;
use crate::host::{ScrollHost, ScrollNode};

/// Keeps a content panel covering its viewport.
///
/// The controller owns the host handle and is the only writer of the panel's
/// anchored position and scale. It caches the viewport bounds and the
/// pivot-adjusted content bounds, both in viewport space; callers that change
/// the panel or the layout behind its back must call
/// [`ContainmentController::refresh_bounds`] before reading them.
#[derive(Clone, Debug)]
pub struct ContainmentController<H> {
    host: H,
    axes: ScrollAxes,
    scale_range: ScaleRange,
    view_bounds: Rect,
    content_bounds: Rect,
}

impl<H: ScrollHost> ContainmentController<H> {
    /// Creates a controller over `host` and computes initial bounds.
    #[must_use]
    pub fn new(host: H, axes: ScrollAxes, scale_range: ScaleRange) -> Self {
        let mut controller = Self {
            host,
            axes,
            scale_range,
            view_bounds: Rect::ZERO,
            content_bounds: Rect::ZERO,
        };
        controller.refresh_bounds();
        controller
    }

    /// The host handle.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host handle.
    ///
    /// Changes made through this reference bypass containment; call
    /// [`ContainmentController::refresh_bounds`] afterwards.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the controller, returning the host handle.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// Scrollable axes.
    #[must_use]
    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    /// Sets the scrollable axes.
    pub fn set_axes(&mut self, axes: ScrollAxes) {
        self.axes = axes;
    }

    /// Permissible scale range.
    #[must_use]
    pub fn scale_range(&self) -> ScaleRange {
        self.scale_range
    }

    /// Sets the scale range and clamps the current scale into it.
    pub fn set_scale_range(&mut self, range: ScaleRange) {
        self.scale_range = range;
        self.apply_scale(self.scale());
    }

    /// Cached viewport bounds in viewport space.
    #[must_use]
    pub fn view_bounds(&self) -> Rect {
        self.view_bounds
    }

    /// Cached, pivot-adjusted content bounds in viewport space.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Current anchored position of the panel.
    #[must_use]
    pub fn anchored_position(&self) -> Vec2 {
        self.host.anchored_position()
    }

    /// Current uniform scale of the panel.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.host.local_scale().x
    }

    /// Maps a screen point into viewport space.
    #[must_use]
    pub fn screen_to_viewport(&self, screen: Point) -> Option<Point> {
        self.host.screen_to_local(ScrollNode::Viewport, screen)
    }

    /// Recomputes and caches the viewport and content bounds.
    ///
    /// Content bounds are the viewport-space bounding box of the panel's
    /// world corners, grown to the viewport's size on axes where the panel is
    /// smaller. Idempotent.
    pub fn refresh_bounds(&mut self) {
        let view = self.host.layout_rect(ScrollNode::Viewport).abs();
        let corners = self.host.world_corners(ScrollNode::Content);
        let world_to_view = self.host.world_to_local(ScrollNode::Viewport);
        let raw = bounds::content_bounds(corners, world_to_view);
        self.content_bounds = bounds::adjust_rect_for_pivot(view, self.host.pivot(), raw);
        self.view_bounds = view;
    }

    /// Correction keeping the content, displaced by `delta`, over the viewport.
    ///
    /// Uses the cached bounds. See [`bounds::containment_offset`].
    #[must_use]
    pub fn containment_offset(&self, delta: Vec2) -> Vec2 {
        bounds::containment_offset(self.view_bounds, self.content_bounds, self.axes, delta)
    }

    /// Moves the panel to `candidate`, keeping disabled axes where they are.
    ///
    /// When the masked position equals the current one nothing happens: the
    /// bounds are not recomputed and no notification fires. Otherwise the
    /// position is committed, bounds are refreshed, and
    /// [`ScrollHost::content_position_changed`] is called. Non-finite
    /// candidates are rejected. Returns the panel's position afterwards.
    pub fn apply_anchored_position(&mut self, candidate: Vec2) -> Vec2 {
        let current = self.host.anchored_position();
        let position = self.axes.mask(candidate, current);
        if !position.is_finite() {
            debug!(?candidate, "rejected non-finite anchored position");
            return current;
        }
        if position == current {
            return current;
        }
        self.commit_position(position);
        position
    }

    /// Sets the panel's uniform scale to `candidate`, clamped to the scale range.
    ///
    /// NaN and infinite candidates are rejected and the current scale is
    /// kept. A clamped value equal to the current scale is a no-op; anything
    /// else is written to both axes and the bounds are refreshed. Returns the
    /// panel's scale afterwards.
    pub fn apply_scale(&mut self, candidate: f64) -> f64 {
        let current = self.scale();
        if !candidate.is_finite() {
            debug!(candidate, "rejected non-finite scale");
            return current;
        }
        let scale = self.scale_range.clamp(candidate);
        if scale == current {
            return current;
        }
        trace!(from = current, to = scale, "scale");
        self.host.set_local_scale(Vec2::new(scale, scale));
        self.refresh_bounds();
        scale
    }

    /// Pushes the panel back over the viewport if it has drifted off it.
    ///
    /// Returns the correction applied, or zero when none was needed.
    pub fn settle(&mut self) -> Vec2 {
        let offset = self.containment_offset(Vec2::ZERO);
        if offset == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let before = self.host.anchored_position();
        let after = self.apply_anchored_position(before + offset);
        after - before
    }

    /// Normalized scroll position on both axes, from the cached bounds.
    #[must_use]
    pub fn normalized_position(&self) -> Vec2 {
        Vec2::new(
            self.axis_normalized_position(Axis::Horizontal),
            self.axis_normalized_position(Axis::Vertical),
        )
    }

    /// Normalized scroll position along `axis`, from the cached bounds.
    #[must_use]
    pub fn axis_normalized_position(&self, axis: Axis) -> f64 {
        bounds::normalized_position(self.view_bounds, self.content_bounds, axis)
    }

    /// Scrolls so the normalized position becomes `value` on both axes.
    pub fn set_normalized_position(&mut self, value: Vec2) {
        self.set_axis_normalized_position(Axis::Horizontal, value.x);
        self.set_axis_normalized_position(Axis::Vertical, value.y);
    }

    /// Scrolls so the normalized position along `axis` becomes `value`.
    ///
    /// Shifts smaller than a hundredth of a unit are ignored. This is a
    /// programmatic scroll, so it applies regardless of the axis being
    /// enabled for dragging.
    ///
    /// Layout is read as the host currently reports it;
    /// [`ScrollView`](crate::ScrollView) makes sure it is rebuilt first.
    pub fn set_axis_normalized_position(&mut self, axis: Axis, value: f64) {
        if !value.is_finite() {
            debug!(?axis, value, "rejected non-finite normalized position");
            return;
        }
        self.refresh_bounds();
        let shift = bounds::normalized_shift(self.view_bounds, self.content_bounds, axis, value);
        if shift.abs() > 0.01 {
            let position = self.host.anchored_position() + axis.vec(shift);
            self.commit_position(position);
        }
    }

    fn commit_position(&mut self, position: Vec2) {
        trace!(?position, "anchored position");
        self.host.set_anchored_position(position);
        self.refresh_bounds();
        self.host.content_position_changed(position);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Size};

    use super::*;
    use crate::host::FlatScene;

    fn controller(scene: FlatScene) -> ContainmentController<FlatScene> {
        ContainmentController::new(scene, ScrollAxes::all(), ScaleRange::default())
    }

    fn covers(view: Rect, content: Rect) -> bool {
        content.min_x() <= view.min_x() + 1e-9
            && content.max_x() >= view.max_x() - 1e-9
            && content.min_y() <= view.min_y() + 1e-9
            && content.max_y() >= view.max_y() - 1e-9
    }

    #[test]
    fn refresh_computes_viewport_and_content_bounds() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 200.0))
            .with_anchored_position(Vec2::new(-50.0, -20.0));
        let c = controller(scene);
        assert_eq!(c.view_bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(c.content_bounds(), Rect::new(-50.0, -20.0, 250.0, 180.0));
    }

    #[test]
    fn refresh_is_idempotent() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(40.0, 300.0))
            .with_pivot(Vec2::new(0.5, 0.0));
        let mut c = controller(scene);
        let first = (c.view_bounds(), c.content_bounds());
        c.refresh_bounds();
        c.refresh_bounds();
        assert_eq!((c.view_bounds(), c.content_bounds()), first);
    }

    #[test]
    fn bounds_follow_a_scaled_viewport_transform() {
        // Viewport drawn at twice the size: world corners shrink back into viewport space.
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0))
            .with_viewport_transform(Affine::translate((10.0, 10.0)) * Affine::scale(2.0));
        let c = controller(scene);
        assert_eq!(c.content_bounds(), Rect::new(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn apply_position_masks_disabled_axes() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = ContainmentController::new(scene, ScrollAxes::VERTICAL, ScaleRange::default());
        let committed = c.apply_anchored_position(Vec2::new(-30.0, -40.0));
        assert_eq!(committed, Vec2::new(0.0, -40.0));
        assert_eq!(c.host().anchored_position, Vec2::new(0.0, -40.0));
        assert_eq!(c.content_bounds(), Rect::new(0.0, -40.0, 300.0, 260.0));
    }

    #[test]
    fn unchanged_position_does_not_notify() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);

        c.apply_anchored_position(Vec2::new(-10.0, 0.0));
        assert_eq!(c.host().counters.position_changes, 1);

        c.apply_anchored_position(Vec2::new(-10.0, 0.0));
        assert_eq!(c.host().counters.position_changes, 1);

        // Masked to the current value on the only enabled axis.
        c.set_axes(ScrollAxes::HORIZONTAL);
        c.apply_anchored_position(Vec2::new(-10.0, -99.0));
        assert_eq!(c.host().counters.position_changes, 1);
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        let kept = c.apply_anchored_position(Vec2::new(f64::NAN, 3.0));
        assert_eq!(kept, Vec2::ZERO);
        assert_eq!(c.host().counters.position_changes, 0);
    }

    #[test]
    fn non_finite_scale_keeps_current() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        c.apply_scale(1.5);
        let writes = c.host().counters.scale_writes;

        assert_eq!(c.apply_scale(f64::NAN), 1.5);
        assert_eq!(c.apply_scale(f64::INFINITY), 1.5);
        assert_eq!(c.apply_scale(f64::NEG_INFINITY), 1.5);
        assert_eq!(c.host().local_scale, Vec2::new(1.5, 1.5));
        assert_eq!(c.host().counters.scale_writes, writes);
    }

    #[test]
    fn scale_clamps_to_range() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        assert_eq!(c.apply_scale(10.0), 2.0);
        assert_eq!(c.host().local_scale, Vec2::new(2.0, 2.0));
        assert_eq!(c.apply_scale(0.01), 0.5);
        assert_eq!(c.host().local_scale, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn repeated_scale_commits_once() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        c.apply_scale(1.25);
        c.apply_scale(1.25);
        assert_eq!(c.host().counters.scale_writes, 1);
        assert_eq!(c.scale(), 1.25);
    }

    #[test]
    fn scale_commit_refreshes_bounds() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        c.apply_scale(2.0);
        assert_eq!(c.content_bounds(), Rect::new(0.0, 0.0, 600.0, 600.0));
    }

    #[test]
    fn narrowing_scale_range_clamps_current_scale() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
        let mut c = controller(scene);
        c.apply_scale(2.0);
        c.set_scale_range(ScaleRange::new(0.5, 1.5).unwrap());
        assert_eq!(c.scale(), 1.5);
    }

    #[test]
    fn settle_restores_coverage_for_large_content() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 250.0))
            .with_anchored_position(Vec2::new(40.0, -400.0));
        let mut c = controller(scene);
        assert!(!covers(c.view_bounds(), c.content_bounds()));

        let correction = c.settle();

        assert_eq!(correction, Vec2::new(-40.0, 250.0));
        assert!(covers(c.view_bounds(), c.content_bounds()));
        assert_eq!(c.settle(), Vec2::ZERO);
    }

    #[test]
    fn settle_rests_small_content_at_its_pivot() {
        for pivot in [Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.5), Vec2::new(1.0, 1.0)] {
            let scene = FlatScene::new(Size::new(200.0, 200.0), Size::new(50.0, 80.0))
                .with_pivot(pivot)
                .with_anchored_position(Vec2::new(37.0, -12.0));
            let mut c = controller(scene);
            c.settle();
            let view = c.view_bounds();
            let content = c.content_bounds();
            assert!((content.x0 - view.x0).abs() < 1e-9, "{pivot:?}: {content:?}");
            assert!((content.x1 - view.x1).abs() < 1e-9, "{pivot:?}: {content:?}");
            assert!((content.y0 - view.y0).abs() < 1e-9, "{pivot:?}: {content:?}");
            assert!((content.y1 - view.y1).abs() < 1e-9, "{pivot:?}: {content:?}");
        }
    }

    #[test]
    fn settle_is_masked_on_disabled_axes() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0))
            .with_anchored_position(Vec2::new(40.0, 40.0));
        let mut c =
            ContainmentController::new(scene, ScrollAxes::HORIZONTAL, ScaleRange::default());
        assert_eq!(c.settle(), Vec2::new(-40.0, 0.0));
        assert_eq!(c.anchored_position(), Vec2::new(0.0, 40.0));
    }

    #[test]
    fn normalized_position_round_trips() {
        let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(500.0, 300.0));
        let mut c = controller(scene);
        assert_eq!(c.normalized_position(), Vec2::new(0.0, 0.0));

        c.set_normalized_position(Vec2::new(0.5, 1.0));
        assert_eq!(c.anchored_position(), Vec2::new(-200.0, -200.0));
        let n = c.normalized_position();
        assert!((n.x - 0.5).abs() < 1e-9);
        assert!((n.y - 1.0).abs() < 1e-9);
        assert_eq!(c.host().counters.position_changes, 2);

        // Sub-hundredth shifts are ignored.
        c.set_axis_normalized_position(Axis::Horizontal, 0.500_01);
        assert_eq!(c.host().counters.position_changes, 2);
    }
}
