// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input primitives shared by gesture recognizers.
//!
//! Input layers report contacts with their own identifiers, buttons, and
//! phases. This module gives them a small common vocabulary:
//!
//! - [`TouchId`]: the host's pointer identifier, plus the mapping onto the two
//!   tracking slots a two-point gesture needs.
//! - [`TouchEvent`]: the payload of begin/move/end callbacks.
//! - [`TouchSample`]: one entry of a per-frame enumeration of active contacts.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_event_state::touch::{PointerButton, TouchEvent, TouchId};
//!
//! let ev = TouchEvent::new(TouchId(1), Point::new(40.0, 10.0)).with_delta(Vec2::new(2.0, 0.0));
//! assert_eq!(ev.id.slot(), Some(1));
//! assert_eq!(ev.button, PointerButton::Primary);
//! assert_eq!(ev.previous_position(), Point::new(38.0, 10.0));
//!
//! // A third finger has no tracking slot.
//! assert_eq!(TouchId(2).slot(), None);
//! ```

use kurbo::{Point, Vec2};

/// Number of contacts a two-point gesture tracks.
pub const TRACKED_SLOTS: usize = 2;

/// Identifier of a contact as reported by the input layer.
///
/// Identifiers are stable for the lifetime of a contact. Hosts commonly use
/// `0, 1, 2, …` for touches in arrival order and negative values for mouse
/// buttons; only `0` and `1` map to a tracking slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub i32);

impl TouchId {
    /// Returns the tracking slot for this identifier, or `None` when it lies
    /// outside the tracked domain.
    #[must_use]
    pub const fn slot(self) -> Option<usize> {
        match self.0 {
            0 => Some(0),
            1 => Some(1),
            _ => None,
        }
    }

    /// Returns `true` when this identifier maps to a tracking slot.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        self.slot().is_some()
    }
}

/// Button that originated a pointer event.
///
/// Touch contacts always report [`PointerButton::Primary`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button or a touch contact.
    #[default]
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button or any other auxiliary button.
    Auxiliary,
}

/// Lifecycle phase of a contact within the current frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The contact touched down this frame.
    Began,
    /// The contact moved since the previous frame.
    Moved,
    /// The contact is down but did not move.
    Stationary,
    /// The contact lifted this frame.
    Ended,
}

impl TouchPhase {
    /// Returns `true` while the contact is down.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Ended)
    }
}

/// Payload of a begin/move/end callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Contact identifier.
    pub id: TouchId,
    /// Current position in screen coordinates.
    pub position: Point,
    /// Movement since the previous event for this contact.
    pub delta: Vec2,
    /// Button that originated the event.
    pub button: PointerButton,
}

impl TouchEvent {
    /// Creates a primary-button event with no movement.
    #[must_use]
    pub const fn new(id: TouchId, position: Point) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            button: PointerButton::Primary,
        }
    }

    /// Sets the movement since the previous event.
    #[must_use]
    pub const fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    /// Sets the originating button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Position before the movement described by `delta`.
    #[must_use]
    pub fn previous_position(&self) -> Point {
        self.position - self.delta
    }
}

/// One active contact in a per-frame enumeration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Contact identifier.
    pub id: TouchId,
    /// Current position in screen coordinates.
    pub position: Point,
    /// Movement since the previous frame.
    pub delta: Vec2,
    /// Phase of the contact in this frame.
    pub phase: TouchPhase,
}

impl TouchSample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(id: TouchId, position: Point, delta: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            delta,
            phase,
        }
    }

    /// Movement attributable to this frame.
    ///
    /// Stationary and freshly began contacts report zero regardless of any
    /// stale delta the input layer carried over.
    #[must_use]
    pub fn frame_delta(&self) -> Vec2 {
        match self.phase {
            TouchPhase::Moved | TouchPhase::Ended => self.delta,
            TouchPhase::Began | TouchPhase::Stationary => Vec2::ZERO,
        }
    }

    /// Position before this frame's movement.
    #[must_use]
    pub fn previous_position(&self) -> Point {
        self.position - self.frame_delta()
    }
}
