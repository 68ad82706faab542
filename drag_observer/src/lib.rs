// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag Observer: per-view drag phases from a single shared drag recognizer.
//!
//! ## Overview
//!
//! A UI usually wants exactly one drag recognizer per gesture region, so that gestures do not
//! fight each other, while many views inside that region want to know what the drag is doing
//! relative to themselves: did it start inside me, did it just leave me, did it end on me?
//!
//! This crate splits those concerns:
//!
//! - A [`GesturePublisher`](crate::publisher::GesturePublisher) owns the one
//!   [`DragRecognizer`](crate::recognizer::DragRecognizer) for a region and broadcasts raw
//!   [`DragEvent`](crate::types::DragEvent)s (`Changed` / `Ended`) to every attached observer.
//! - Each observer owns a [`PhaseClassifier`](crate::classifier::PhaseClassifier) that turns the
//!   raw stream into [`DragPhase`](crate::types::DragPhase)s against its own view's frame, and
//!   calls back for the phases it is interested in.
//!
//! ## Phases
//!
//! | Raw event | Phases, in order |
//! |-----------|------------------|
//! | first `Changed` of a drag | `Down`, then `DownInside` or `DownOutside` |
//! | later `Changed` | `Move`, then `MoveInside` or `MoveOutside`, then `Enter` or `Exit` on a crossing |
//! | `Ended` | `Up`, then `UpInside` or `UpOutside` |
//!
//! ## Geometry
//!
//! Observers are silent until their frame has been measured with
//! [`GesturePublisher::measure`](crate::publisher::GesturePublisher::measure). Keep frames current
//! after each layout pass; the `view_tree_adapter` feature provides helpers that do this from a
//! `drag_observer_view_tree` tree.
//!
//! ## Workflow
//!
//! 1) Create one publisher per gesture region, in the coordinate space you want samples in.
//! 2) Attach observers with [`on_drag_phase`](crate::publisher::GesturePublisher::on_drag_phase).
//! 3) After layout, measure each observer's frame (and refresh the space transform if the
//!    space is not the window).
//! 4) Forward pointer input. Callbacks mutate your state; redraw afterwards.
//!
//! ```
//! use drag_observer::publisher::GesturePublisher;
//! use drag_observer::types::{CoordinateSpace, DragPhase, PhaseSet};
//! use kurbo::{Point, Rect};
//!
//! #[derive(Default)]
//! struct Button {
//!     highlighted: bool,
//!     clicks: u32,
//! }
//!
//! let mut publisher: GesturePublisher<Button> = GesturePublisher::new(CoordinateSpace::Global);
//! let id = publisher.on_drag_phase(
//!     PhaseSet::DOWN_INSIDE | PhaseSet::ENTER | PhaseSet::EXIT | PhaseSet::UP | PhaseSet::UP_INSIDE,
//!     |b, e| match e.phase {
//!         DragPhase::DownInside | DragPhase::Enter => b.highlighted = true,
//!         DragPhase::Exit | DragPhase::Up => b.highlighted = false,
//!         DragPhase::UpInside => b.clicks += 1,
//!         _ => {}
//!     },
//! );
//! publisher.measure(id, Rect::new(0.0, 0.0, 70.0, 70.0));
//!
//! let mut button = Button::default();
//! publisher.pointer_down(Point::new(10.0, 10.0), &mut button);
//! assert!(button.highlighted);
//! publisher.pointer_move(Point::new(100.0, 10.0), &mut button);
//! assert!(!button.highlighted);
//! publisher.pointer_move(Point::new(20.0, 10.0), &mut button);
//! publisher.pointer_up(Point::new(20.0, 10.0), &mut button);
//! assert!(!button.highlighted);
//! assert_eq!(button.clicks, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod classifier;
pub mod publisher;
pub mod recognizer;
pub mod types;
