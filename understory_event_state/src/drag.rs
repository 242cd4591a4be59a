// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag origin helper: map pointer travel onto the position of a dragged item.
//!
//! A drag pairs two origins captured when it starts: where the pointer was,
//! and where the dragged item was. Every later pointer position yields a
//! target position for the item, `item_origin + (pointer - pointer_origin)`.
//! Computing from the origins instead of accumulating per-event deltas keeps
//! the item glued to the pointer even when some events are clamped or
//! dropped.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] with the pointer position and the item's position.
//! 2) On each move, call [`DragState::target`] to get the item's new position.
//! 3) When the pointer identity changes mid-gesture, call [`DragState::rebase`]
//!    so the new pointer continues from where the item currently is.
//! 4) End the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Pointer at (10, 20) grabs an item positioned at (100, 0).
//! drag.start(Point::new(10.0, 20.0), Vec2::new(100.0, 0.0));
//! assert!(drag.is_dragging());
//!
//! // Pointer moves by (5, 5), so does the item.
//! let target = drag.target(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(target, Vec2::new(105.0, 5.0));
//!
//! drag.end();
//! assert_eq!(drag.target(Point::new(0.0, 0.0)), None);
//! ```

use kurbo::{Point, Vec2};

/// Tracks the origins of a drag operation.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    /// Pointer position when the drag started (or was last rebased).
    pub pointer_origin: Option<Point>,
    /// Dragged item's position when the drag started (or was last rebased).
    pub item_origin: Vec2,
}

impl DragState {
    /// Start tracking a drag from `pointer`, with the item at `item`.
    pub fn start(&mut self, pointer: Point, item: Vec2) {
        self.pointer_origin = Some(pointer);
        self.item_origin = item;
    }

    /// Re-anchor an ongoing drag at the current pointer and item positions.
    ///
    /// Subsequent targets are relative to these origins, so the item does not
    /// jump by whatever happened between the old origins and now.
    pub fn rebase(&mut self, pointer: Point, item: Vec2) {
        self.start(pointer, item);
    }

    /// Pointer travel since the drag origin.
    #[must_use]
    pub fn travel(&self, pointer: Point) -> Option<Vec2> {
        self.pointer_origin.map(|origin| pointer - origin)
    }

    /// Item position implied by the pointer being at `pointer`.
    #[must_use]
    pub fn target(&self, pointer: Point) -> Option<Vec2> {
        self.travel(pointer).map(|travel| self.item_origin + travel)
    }

    /// End the current drag and reset state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer_origin.is_some()
    }
}
