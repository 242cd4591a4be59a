// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-touch pan and two-touch pinch arbitration.
//!
//! [`GestureArbiter`] tracks up to two contacts, keyed by [`TouchId`] `0` and
//! `1`, and turns their movement into anchored-position and scale updates on
//! a [`ContainmentController`].
//!
//! | tracked contacts | state | effect |
//! |---|---|---|
//! | 0 | [`GestureState::Idle`] | none |
//! | 1 | [`GestureState::Dragging`] | each drag event moves the panel, clamped |
//! | 2 | [`GestureState::Pinching`] | each frame scales the panel by the spread change |
//!
//! When a pinch loses one contact the remaining contact resumes dragging. Its
//! next drag event only re-baselines the drag origins, so the panel does not
//! jump by the distance the finger travelled while pinching.

use kurbo::{Point, Vec2};
use tracing::{debug, trace};
use understory_event_state::drag::DragState;
use understory_event_state::pinch::PinchState;
use understory_event_state::touch::{
    PointerButton, TRACKED_SLOTS, TouchEvent, TouchId, TouchPhase, TouchSample,
};

use crate::config::{ConfigError, ScrollConfig, validate_damping};
use crate::containment::ContainmentController;
use crate::host::{ScrollHost, TouchSource};

/// Current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// No contact is tracked.
    #[default]
    Idle,
    /// One contact pans the content.
    Dragging,
    /// Two contacts scale the content.
    Pinching,
}

/// Last known state of a tracked contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedTouch {
    /// Screen position.
    pub position: Point,
    /// Movement not yet consumed by a pinch frame.
    pub delta: Vec2,
}

/// Pan and pinch state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureArbiter {
    state: GestureState,
    touches: [Option<TrackedTouch>; TRACKED_SLOTS],
    drag: DragState,
    pinch: PinchState,
    rearm: bool,
    damping: f64,
}

impl Default for GestureArbiter {
    fn default() -> Self {
        Self::idle(ScrollConfig::DEFAULT_DAMPING)
    }
}

impl GestureArbiter {
    /// Creates an idle arbiter with the given pinch damping.
    ///
    /// Fails unless `damping` is finite and positive.
    pub fn new(damping: f64) -> Result<Self, ConfigError> {
        Ok(Self::idle(validate_damping(damping)?))
    }

    /// Creates an idle arbiter using the damping of `config`.
    #[must_use]
    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::idle(config.damping())
    }

    fn idle(damping: f64) -> Self {
        Self {
            state: GestureState::Idle,
            touches: [None; TRACKED_SLOTS],
            drag: DragState::default(),
            pinch: PinchState::default(),
            rearm: false,
            damping,
        }
    }

    /// Current gesture.
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Number of tracked contacts.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.touches.iter().flatten().count()
    }

    /// The tracked contact with `id`, if any.
    #[must_use]
    pub fn touch(&self, id: TouchId) -> Option<TrackedTouch> {
        id.slot().and_then(|slot| self.touches[slot])
    }

    /// Drag origins of the current drag.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Pinch tracking of the current pinch.
    #[must_use]
    pub fn pinch_state(&self) -> PinchState {
        self.pinch
    }

    /// Returns `true` if the next drag event will re-baseline instead of moving.
    #[must_use]
    pub fn is_rearmed(&self) -> bool {
        self.rearm
    }

    /// Pinch damping.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Sets the pinch damping.
    pub fn set_damping(&mut self, damping: f64) -> Result<(), ConfigError> {
        self.damping = validate_damping(damping)?;
        Ok(())
    }

    /// Forgets all contacts and returns to [`GestureState::Idle`].
    pub fn reset(&mut self) {
        if self.state != GestureState::Idle {
            debug!(from = ?self.state, "gesture reset");
        }
        *self = Self::idle(self.damping);
    }

    /// Handles a contact starting.
    ///
    /// Contacts other than `0` and `1`, and non-primary buttons, are ignored.
    /// A begin for a contact that is already tracked only refreshes its
    /// position.
    pub fn begin<H: ScrollHost>(&mut self, ctl: &mut ContainmentController<H>, event: &TouchEvent) {
        let Some(slot) = self.accept(event) else {
            return;
        };
        if let Some(touch) = &mut self.touches[slot] {
            touch.position = event.position;
            touch.delta = Vec2::ZERO;
            return;
        }
        self.touches[slot] = Some(TrackedTouch {
            position: event.position,
            delta: Vec2::ZERO,
        });

        match self.tracked_count() {
            1 => {
                ctl.refresh_bounds();
                match ctl.screen_to_viewport(event.position) {
                    Some(local) => {
                        self.drag.start(local, ctl.anchored_position());
                        self.rearm = false;
                    }
                    None => {
                        trace!(id = event.id.0, "drag start could not be mapped");
                        self.drag.end();
                        self.rearm = true;
                    }
                }
                self.transition(GestureState::Dragging);
            }
            _ => {
                if let [Some(a), Some(b)] = self.touches {
                    self.pinch.start(a.position, b.position);
                }
                // Movement from the single-touch drag is not pinch travel.
                for touch in self.touches.iter_mut().flatten() {
                    touch.delta = Vec2::ZERO;
                }
                self.drag.end();
                self.transition(GestureState::Pinching);
            }
        }
    }

    /// Handles a contact moving.
    ///
    /// While dragging this moves the panel so the point under the contact
    /// stays under it, clamped so the content keeps covering the viewport.
    /// While pinching it only records the contact's position.
    pub fn drag<H: ScrollHost>(&mut self, ctl: &mut ContainmentController<H>, event: &TouchEvent) {
        let Some(slot) = self.accept(event) else {
            return;
        };
        let Some(touch) = &mut self.touches[slot] else {
            trace!(id = event.id.0, "drag for untracked touch");
            return;
        };
        touch.position = event.position;
        touch.delta += event.delta;

        if self.state != GestureState::Dragging {
            return;
        }
        let Some(local) = ctl.screen_to_viewport(event.position) else {
            trace!(id = event.id.0, "drag sample could not be mapped");
            return;
        };
        if self.rearm || !self.drag.is_dragging() {
            self.drag.rebase(local, ctl.anchored_position());
            self.rearm = false;
            return;
        }

        ctl.refresh_bounds();
        let Some(target) = self.drag.target(local) else {
            return;
        };
        let current = ctl.anchored_position();
        let candidate = target + ctl.containment_offset(target - current);
        ctl.apply_anchored_position(candidate);
    }

    /// Handles a contact ending.
    pub fn end(&mut self, event: &TouchEvent) {
        if let Some(slot) = self.accept(event) {
            self.release(slot);
        }
    }

    /// Refreshes tracked contacts from this frame's input.
    ///
    /// Untracked contacts are ignored; a tracked contact reported as
    /// [`TouchPhase::Ended`] is released.
    pub fn sample<T: TouchSource + ?Sized>(&mut self, touches: &T) {
        self.sample_frame(touches);
    }

    /// Runs one frame: samples `touches`, then applies any pinch.
    ///
    /// The scale changes by the frame's spread change divided by
    /// `content_width * damping`, where `content_width` is the panel's
    /// unscaled width. A frame in which a tracked contact reports
    /// [`TouchPhase::Began`] only re-baselines the pinch.
    pub fn update<H: ScrollHost, T: TouchSource + ?Sized>(
        &mut self,
        ctl: &mut ContainmentController<H>,
        touches: &T,
    ) {
        let began = self.sample_frame(touches);
        if self.state == GestureState::Pinching {
            if began {
                if let [Some(a), Some(b)] = self.touches {
                    self.pinch.start(a.position, b.position);
                }
            } else if let [Some(a), Some(b)] = self.touches {
                let change =
                    PinchState::frame_spread_change(a.position, a.delta, b.position, b.delta);
                if change != 0.0 {
                    let width = ctl.host().rect().width();
                    let delta = change / (width * self.damping);
                    ctl.apply_scale(ctl.scale() + delta);
                }
            }
        }
        for touch in self.touches.iter_mut().flatten() {
            touch.delta = Vec2::ZERO;
        }
    }

    /// Applies every sample; returns `true` if a tracked contact began this frame.
    fn sample_frame<T: TouchSource + ?Sized>(&mut self, touches: &T) -> bool {
        let mut began = false;
        for index in 0..touches.touch_count() {
            if let Some(sample) = touches.touch(index) {
                began |= self.apply_sample(&sample);
            }
        }
        began
    }

    fn apply_sample(&mut self, sample: &TouchSample) -> bool {
        let Some(slot) = sample.id.slot() else {
            return false;
        };
        if self.touches[slot].is_none() {
            return false;
        }
        match sample.phase {
            TouchPhase::Ended => {
                self.release(slot);
                false
            }
            phase => {
                self.touches[slot] = Some(TrackedTouch {
                    position: sample.position,
                    delta: sample.frame_delta(),
                });
                phase == TouchPhase::Began
            }
        }
    }

    fn accept(&self, event: &TouchEvent) -> Option<usize> {
        if event.button != PointerButton::Primary {
            trace!(id = event.id.0, button = ?event.button, "ignored non-primary button");
            return None;
        }
        let slot = event.id.slot();
        if slot.is_none() {
            trace!(id = event.id.0, "ignored untracked touch id");
        }
        slot
    }

    fn release(&mut self, slot: usize) {
        if self.touches[slot].take().is_none() {
            return;
        }
        match (self.state, self.tracked_count()) {
            (_, 0) => {
                self.drag.end();
                self.pinch.end();
                self.rearm = false;
                self.transition(GestureState::Idle);
            }
            (GestureState::Pinching, _) => {
                self.pinch.end();
                self.rearm = true;
                self.transition(GestureState::Dragging);
            }
            _ => {}
        }
    }

    fn transition(&mut self, to: GestureState) {
        if self.state != to {
            debug!(from = ?self.state, ?to, "gesture");
            self.state = to;
        }
    }
}
