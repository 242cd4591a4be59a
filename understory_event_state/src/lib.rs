// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: Common event state managers for UI interactions.
//!
//! This crate provides small, focused state helpers for interactions that
//! require stateful tracking across multiple events:
//!
//! - [`touch`]: Contact identifiers, buttons, phases, and the event/sample
//!   payloads input layers report.
//! - [`drag`]: Map pointer travel onto a dragged item's position from captured origins.
//! - [`pinch`]: Track a two-point pinch and measure its spread per frame.
//!
//! ## Design Philosophy
//!
//! Each helper is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Work with any event routing or spatial query system
//!
//! The crate does not assume any particular UI framework, event system, or
//! scene graph structure. Callers feed positions in whatever coordinate space
//! they work in, and interpret the results.
//!
//! ## Usage Patterns
//!
//! ### Drag Operations
//!
//! ```rust
//! # #[cfg(feature = "drag")]
//! # fn example() {
//! use kurbo::{Point, Vec2};
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 10.0), Vec2::ZERO);
//!
//! // Item position for the pointer at (15, 12).
//! let target = drag.target(Point::new(15.0, 12.0)).unwrap();
//! assert_eq!(target, Vec2::new(5.0, 2.0));
//! # }
//! ```
//!
//! ### Pinch Operations
//!
//! ```rust
//! # #[cfg(feature = "pinch")]
//! # fn example() {
//! use kurbo::Point;
//! use understory_event_state::pinch::PinchState;
//!
//! let mut pinch = PinchState::default();
//! pinch.start(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
//! let grown = pinch.total_spread_change(Point::new(-10.0, 0.0), Point::new(110.0, 0.0));
//! assert_eq!(grown, Some(20.0));
//! # }
//! ```
//!
//! ## Integration with Understory
//!
//! `understory_scroll_view` combines these helpers into a gesture arbiter that
//! drives pan and pinch-zoom of a content panel inside a viewport.
//!
//! ## Features
//!
//! - `drag`: Enable drag origin tracking
//! - `pinch`: Enable two-point pinch tracking
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
#[cfg(feature = "pinch")]
pub mod pinch;
pub mod touch;
