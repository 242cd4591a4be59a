// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Vec2};
use tracing::trace;
use understory_event_state::touch::TouchEvent;

use crate::axes::{Axis, ScrollAxes};
use crate::config::{ConfigError, ScaleRange, ScrollConfig};
use crate::containment::ContainmentController;
use crate::gesture::{GestureArbiter, GestureState};
use crate::host::{ScrollHost, ScrollNode, TouchSource};

/// A pan and pinch-zoom scroll view over a host's viewport and content panel.
///
/// Hosts forward touch callbacks as they arrive, then once per frame call
/// [`ScrollView::update`] followed by [`ScrollView::late_update`] (or
/// [`ScrollView::tick`], which does both).
#[derive(Clone, Debug)]
pub struct ScrollView<H> {
    controller: ContainmentController<H>,
    arbiter: GestureArbiter,
    enabled: bool,
    has_rebuilt_layout: bool,
    previous: Option<Snapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Snapshot {
    view_bounds: Rect,
    content_bounds: Rect,
    anchored_position: Vec2,
}

/// Debug snapshot of a [`ScrollView`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollViewDebugInfo {
    /// Cached viewport bounds in viewport space.
    pub view_bounds: Rect,
    /// Cached, pivot-adjusted content bounds in viewport space.
    pub content_bounds: Rect,
    /// Anchored position of the content panel.
    pub anchored_position: Vec2,
    /// Uniform scale of the content panel.
    pub scale: f64,
    /// Permissible scale range.
    pub scale_range: ScaleRange,
    /// Scrollable axes.
    pub axes: ScrollAxes,
    /// Pinch damping.
    pub damping: f64,
    /// Normalized scroll position.
    pub normalized_position: Vec2,
    /// Current gesture.
    pub gesture: GestureState,
    /// Number of tracked contacts.
    pub tracked_touches: usize,
    /// Whether the view accepts input.
    pub enabled: bool,
    /// Whether a post-layout rebuild has been reported since the view was
    /// last disabled.
    pub has_rebuilt_layout: bool,
}

impl<H: ScrollHost> ScrollView<H> {
    /// Creates an enabled scroll view with the default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, ScrollConfig::default())
    }

    /// Creates an enabled scroll view.
    #[must_use]
    pub fn with_config(host: H, config: ScrollConfig) -> Self {
        Self {
            controller: ContainmentController::new(host, config.axes(), config.scale_range()),
            arbiter: GestureArbiter::from_config(&config),
            enabled: true,
            has_rebuilt_layout: false,
            previous: None,
        }
    }

    /// Sets the scale range and pinch damping.
    ///
    /// Nothing changes if `damping` is invalid. The current scale is clamped
    /// into the new range.
    pub fn init(&mut self, scale_range: ScaleRange, damping: f64) -> Result<(), ConfigError> {
        self.arbiter.set_damping(damping)?;
        self.controller.set_scale_range(scale_range);
        Ok(())
    }

    /// The containment controller.
    #[must_use]
    pub fn controller(&self) -> &ContainmentController<H> {
        &self.controller
    }

    /// Mutable access to the containment controller.
    pub fn controller_mut(&mut self) -> &mut ContainmentController<H> {
        &mut self.controller
    }

    /// The gesture arbiter.
    #[must_use]
    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    /// The host handle.
    #[must_use]
    pub fn host(&self) -> &H {
        self.controller.host()
    }

    /// Mutable access to the host handle.
    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }

    /// Consumes the view, returning the host handle.
    #[must_use]
    pub fn into_host(self) -> H {
        self.controller.into_host()
    }

    /// Current gesture.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.arbiter.state()
    }

    /// Whether the view accepts input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the scrollable axes.
    pub fn set_axes(&mut self, axes: ScrollAxes) {
        self.controller.set_axes(axes);
    }

    /// A contact started.
    pub fn on_begin_drag(&mut self, event: &TouchEvent) {
        if self.accepts_input(event) {
            self.arbiter.begin(&mut self.controller, event);
        }
    }

    /// A contact moved.
    pub fn on_drag(&mut self, event: &TouchEvent) {
        if self.accepts_input(event) {
            self.arbiter.drag(&mut self.controller, event);
        }
    }

    /// A contact ended.
    pub fn on_end_drag(&mut self, event: &TouchEvent) {
        if self.accepts_input(event) {
            self.arbiter.end(event);
        }
    }

    /// Per-frame input sampling and pinch scaling.
    pub fn update<T: TouchSource + ?Sized>(&mut self, touches: &T) {
        if self.enabled {
            self.arbiter.update(&mut self.controller, touches);
        }
    }

    /// Per-frame containment and value-changed notification.
    ///
    /// Must run after [`ScrollView::update`].
    pub fn late_update(&mut self) {
        if !self.enabled {
            return;
        }
        match self.arbiter.state() {
            GestureState::Pinching => {
                self.controller.refresh_bounds();
                self.controller.settle();
            }
            state => {
                self.ensure_layout_has_rebuilt();
                self.controller.refresh_bounds();
                if state != GestureState::Dragging {
                    self.controller.settle();
                }
            }
        }

        let snapshot = self.snapshot();
        if self.previous != Some(snapshot) {
            let normalized = self.controller.normalized_position();
            trace!(?normalized, "scroll value changed");
            self.controller.host_mut().scroll_value_changed(normalized);
            self.previous = Some(snapshot);
        }
    }

    /// [`ScrollView::update`] followed by [`ScrollView::late_update`].
    pub fn tick<T: TouchSource + ?Sized>(&mut self, touches: &T) {
        self.update(touches);
        self.late_update();
    }

    /// The view became active.
    pub fn on_enable(&mut self) {
        self.enabled = true;
        self.controller
            .host_mut()
            .mark_for_layout_rebuild(ScrollNode::Root);
    }

    /// The view became inactive. Ongoing gestures are dropped.
    pub fn on_disable(&mut self) {
        self.enabled = false;
        self.has_rebuilt_layout = false;
        self.arbiter.reset();
        self.controller
            .host_mut()
            .mark_for_layout_rebuild(ScrollNode::Root);
    }

    /// The view's rect changed size.
    pub fn on_dimensions_changed(&mut self) {
        self.controller
            .host_mut()
            .mark_for_layout_rebuild(ScrollNode::Root);
    }

    /// The host finished a layout pass covering this view.
    pub fn layout_rebuilt(&mut self) {
        self.controller.refresh_bounds();
        self.previous = Some(self.snapshot());
        self.has_rebuilt_layout = true;
    }

    /// Normalized scroll position on both axes.
    ///
    /// Reads the bounds cached by the last refresh.
    #[must_use]
    pub fn normalized_position(&self) -> Vec2 {
        self.controller.normalized_position()
    }

    /// Scrolls to a normalized position on both axes.
    ///
    /// Forces a canvas update first if layout has not been reported yet, so
    /// the bounds the position is computed from are current.
    pub fn set_normalized_position(&mut self, value: Vec2) {
        self.ensure_layout_has_rebuilt();
        self.controller.set_normalized_position(value);
    }

    /// Normalized horizontal scroll position.
    #[must_use]
    pub fn horizontal_normalized_position(&self) -> f64 {
        self.controller.axis_normalized_position(Axis::Horizontal)
    }

    /// Scrolls to a normalized horizontal position.
    pub fn set_horizontal_normalized_position(&mut self, value: f64) {
        self.ensure_layout_has_rebuilt();
        self.controller
            .set_axis_normalized_position(Axis::Horizontal, value);
    }

    /// Normalized vertical scroll position.
    #[must_use]
    pub fn vertical_normalized_position(&self) -> f64 {
        self.controller.axis_normalized_position(Axis::Vertical)
    }

    /// Scrolls to a normalized vertical position.
    pub fn set_vertical_normalized_position(&mut self, value: f64) {
        self.ensure_layout_has_rebuilt();
        self.controller
            .set_axis_normalized_position(Axis::Vertical, value);
    }

    /// Returns a snapshot of the view's state for debugging.
    #[must_use]
    pub fn debug_info(&self) -> ScrollViewDebugInfo {
        ScrollViewDebugInfo {
            view_bounds: self.controller.view_bounds(),
            content_bounds: self.controller.content_bounds(),
            anchored_position: self.controller.anchored_position(),
            scale: self.controller.scale(),
            scale_range: self.controller.scale_range(),
            axes: self.controller.axes(),
            damping: self.arbiter.damping(),
            normalized_position: self.controller.normalized_position(),
            gesture: self.arbiter.state(),
            tracked_touches: self.arbiter.tracked_count(),
            enabled: self.enabled,
            has_rebuilt_layout: self.has_rebuilt_layout,
        }
    }

    fn accepts_input(&self, event: &TouchEvent) -> bool {
        if !self.enabled {
            trace!(id = event.id.0, "ignored touch while disabled");
        }
        self.enabled
    }

    fn ensure_layout_has_rebuilt(&mut self) {
        let host = self.controller.host_mut();
        if !self.has_rebuilt_layout && !host.is_rebuilding_layout() {
            trace!("forcing canvas update");
            host.force_canvas_update();
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            view_bounds: self.controller.view_bounds(),
            content_bounds: self.controller.content_bounds(),
            anchored_position: self.controller.anchored_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use understory_event_state::touch::{TouchId, TouchSample};

    use super::*;
    use crate::host::FlatScene;

    const NO_TOUCHES: &[TouchSample] = &[];

    fn view(content: Size) -> ScrollView<FlatScene> {
        ScrollView::new(FlatScene::new(Size::new(100.0, 100.0), content))
    }

    fn touch(id: i32, x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(TouchId(id), Point::new(x, y))
    }

    #[test]
    fn late_update_settles_when_idle() {
        let mut v = view(Size::new(300.0, 300.0));
        v.host_mut().anchored_position = Vec2::new(30.0, -250.0);
        v.late_update();
        assert_eq!(v.controller().anchored_position(), Vec2::new(0.0, -200.0));
    }

    #[test]
    fn late_update_does_not_settle_while_dragging() {
        let mut v = view(Size::new(300.0, 300.0));
        v.on_begin_drag(&touch(0, 50.0, 50.0));
        v.host_mut().anchored_position = Vec2::new(30.0, 0.0);
        v.late_update();
        assert_eq!(v.controller().anchored_position(), Vec2::new(30.0, 0.0));

        v.on_end_drag(&touch(0, 50.0, 50.0));
        v.late_update();
        assert_eq!(v.controller().anchored_position(), Vec2::ZERO);
    }

    #[test]
    fn late_update_forces_canvas_until_layout_is_reported() {
        let mut v = view(Size::new(300.0, 300.0));
        v.late_update();
        v.late_update();
        assert_eq!(v.host().counters.canvas_updates, 2);

        v.layout_rebuilt();
        v.late_update();
        assert_eq!(v.host().counters.canvas_updates, 2);

        v.on_disable();
        v.on_enable();
        v.late_update();
        assert_eq!(v.host().counters.canvas_updates, 3);
    }

    #[test]
    fn value_changed_fires_once_per_change() {
        let mut v = view(Size::new(500.0, 300.0));
        v.layout_rebuilt();
        v.late_update();
        assert_eq!(v.host().counters.value_changes, 0);

        v.set_horizontal_normalized_position(0.5);
        v.late_update();
        v.late_update();
        assert_eq!(v.host().counters.value_changes, 1);
        assert_eq!(v.host().last_scroll_value, Some(Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn normalized_setters_rebuild_layout_first() {
        let mut v = view(Size::new(500.0, 300.0));
        v.set_horizontal_normalized_position(0.5);
        assert_eq!(v.host().counters.canvas_updates, 1);
        assert_eq!(v.horizontal_normalized_position(), 0.5);

        v.layout_rebuilt();
        v.set_vertical_normalized_position(1.0);
        v.set_normalized_position(Vec2::new(0.0, 0.0));
        assert_eq!(v.host().counters.canvas_updates, 1);
    }

    #[test]
    fn disabled_view_ignores_input() {
        let mut v = view(Size::new(300.0, 300.0));
        v.on_begin_drag(&touch(0, 50.0, 50.0));
        v.on_disable();
        assert_eq!(v.gesture_state(), GestureState::Idle);
        assert_eq!(v.host().counters.layout_requests, 1);

        v.on_begin_drag(&touch(0, 50.0, 50.0));
        v.on_drag(&touch(0, 10.0, 10.0));
        v.tick(NO_TOUCHES);
        assert_eq!(v.gesture_state(), GestureState::Idle);
        assert_eq!(v.controller().anchored_position(), Vec2::ZERO);

        v.on_enable();
        assert!(v.is_enabled());
        assert_eq!(v.host().counters.layout_requests, 2);
    }

    #[test]
    fn init_validates_before_applying() {
        let mut v = view(Size::new(300.0, 300.0));
        v.controller_mut().apply_scale(2.0);

        let narrow = ScaleRange::new(0.5, 1.5).unwrap();
        assert!(v.init(narrow, f64::NAN).is_err());
        assert_eq!(v.controller().scale(), 2.0);

        v.init(narrow, 0.5).unwrap();
        assert_eq!(v.controller().scale(), 1.5);
        assert_eq!(v.arbiter().damping(), 0.5);
    }

    #[test]
    fn dimensions_change_requests_layout() {
        let mut v = view(Size::new(300.0, 300.0));
        v.on_dimensions_changed();
        assert_eq!(v.host().counters.layout_requests, 1);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut v = ScrollView::with_config(
            FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0)),
            ScrollConfig::default().with_axes(ScrollAxes::VERTICAL),
        );
        v.on_begin_drag(&touch(0, 50.0, 50.0));
        let info = v.debug_info();
        assert_eq!(info.view_bounds, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(info.content_bounds, Rect::new(0.0, 0.0, 300.0, 300.0));
        assert_eq!(info.axes, ScrollAxes::VERTICAL);
        assert_eq!(info.gesture, GestureState::Dragging);
        assert_eq!(info.tracked_touches, 1);
        assert_eq!(info.scale, 1.0);
        assert!(info.enabled);
        assert!(!info.has_rebuilt_layout);
    }
}
