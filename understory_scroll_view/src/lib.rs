// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_view --heading-base-level=0

//! Understory Scroll View: touch pan and pinch-zoom over a clipped content panel.
//!
//! A scroll view is a viewport window clipping a larger content panel. Users
//! pan the content with one finger and scale it with two, and the content is
//! kept covering the viewport at all times. This crate provides:
//!
//! - [`bounds`]: pure containment geometry. Axis-aligned bounds of an
//!   arbitrarily placed, scaled, and pivoted panel in the viewport's space,
//!   and the correction that keeps it covering the viewport.
//! - [`ContainmentController`]: caches bounds and is the only writer of the
//!   panel's anchored position and scale, rejecting degenerate values.
//! - [`GestureArbiter`]: the idle / dragging / pinching state machine,
//!   including a jump-free handover from pinch back to drag.
//! - [`ScrollView`]: wires the above into a per-frame update loop with
//!   enable/disable handling and value-changed notifications.
//!
//! It does **not** own a scene graph. Hosts expose their viewport and content
//! nodes through the capability traits in [`host`]; [`FlatScene`] is a
//! self-contained host for tests and simple toolkits.
//!
//! ## Frame order
//!
//! 1. Forward touch callbacks: [`ScrollView::on_begin_drag`],
//!    [`ScrollView::on_drag`], [`ScrollView::on_end_drag`].
//! 2. [`ScrollView::update`] with the frame's touch samples (pinch scaling).
//! 3. [`ScrollView::late_update`] (containment and notifications).
//!
//! [`ScrollView::tick`] runs steps 2 and 3.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_event_state::touch::{TouchEvent, TouchId, TouchSample};
//! use understory_scroll_view::{FlatScene, GestureState, ScrollView};
//!
//! // A 100x100 window onto 300x300 content.
//! let scene = FlatScene::new(Size::new(100.0, 100.0), Size::new(300.0, 300.0));
//! let mut view = ScrollView::new(scene);
//!
//! let finger = TouchId(0);
//! view.on_begin_drag(&TouchEvent::new(finger, Point::new(50.0, 50.0)));
//! assert_eq!(view.gesture_state(), GestureState::Dragging);
//!
//! // Drag up and left by 20.
//! view.on_drag(&TouchEvent::new(finger, Point::new(30.0, 30.0)));
//! view.tick(&[] as &[TouchSample]);
//! assert_eq!(view.host().anchored_position, Vec2::new(-20.0, -20.0));
//!
//! // Dragging right past the content's edge is clamped.
//! view.on_drag(&TouchEvent::new(finger, Point::new(500.0, 30.0)));
//! assert_eq!(view.host().anchored_position, Vec2::new(0.0, -20.0));
//!
//! view.on_end_drag(&TouchEvent::new(finger, Point::new(500.0, 30.0)));
//! assert_eq!(view.gesture_state(), GestureState::Idle);
//! ```
//!
//! ## Logging
//!
//! Gesture transitions are logged with `tracing` at `debug`; ignored touches,
//! rejected values, and forced canvas updates at `trace` or `debug`. Hosts
//! install whatever subscriber they like.
//!
//! This crate is `no_std`.

#![no_std]

mod axes;
pub mod bounds;
mod config;
mod containment;
mod gesture;
pub mod host;
mod view;

pub use axes::{Axis, ScrollAxes};
pub use config::{ConfigError, ScaleRange, ScrollConfig};
pub use containment::ContainmentController;
pub use gesture::{GestureArbiter, GestureState, TrackedTouch};
pub use host::{FlatScene, HostCounters, ScrollHost, ScrollNode};
pub use view::{ScrollView, ScrollViewDebugInfo};
