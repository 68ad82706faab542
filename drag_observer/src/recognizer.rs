// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag recognizer: turn pointer down/move/up/cancel into raw drag events.
//!
//! ## Usage
//!
//! 1) Call [`DragRecognizer::pointer_down`] when the primary pointer is pressed.
//! 2) Call [`DragRecognizer::pointer_move`] on each move; it yields [`DragEvent::Changed`] while the drag is active.
//! 3) Call [`DragRecognizer::pointer_up`] on release, or [`DragRecognizer::pointer_cancel`] if the platform
//!    aborts the press. Either yields at most one [`DragEvent::Ended`].
//!
//! With the default minimum distance of zero the press itself starts the drag and
//! produces the first `Changed`.
//!
//! ## Minimal example
//!
//! ```
//! use drag_observer::recognizer::DragRecognizer;
//! use drag_observer::types::{CoordinateSpace, DragEvent};
//! use kurbo::Point;
//!
//! let mut r = DragRecognizer::new(CoordinateSpace::Global, 0.0);
//! assert!(matches!(r.pointer_down(Point::new(1.0, 1.0)), Some(DragEvent::Changed(_))));
//! assert!(matches!(r.pointer_move(Point::new(2.0, 1.0)), Some(DragEvent::Changed(_))));
//! assert!(matches!(r.pointer_up(Point::new(2.0, 1.0)), Some(DragEvent::Ended(_))));
//! assert!(r.pointer_move(Point::new(3.0, 1.0)).is_none());
//! ```

use kurbo::Point;

use crate::types::{CoordinateSpace, DragEvent, DragSample};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
enum State {
    #[default]
    Idle,
    /// Pressed but not yet moved past the minimum distance.
    Pending { start: Point },
    Active { start: Point, last: Point },
}

/// Single-pointer drag recognizer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragRecognizer {
    space: CoordinateSpace,
    minimum_distance: f64,
    state: State,
}

impl DragRecognizer {
    /// Create a recognizer emitting samples tagged with `space`.
    ///
    /// `minimum_distance` is clamped to be non-negative.
    pub fn new(space: CoordinateSpace, minimum_distance: f64) -> Self {
        Self {
            space,
            minimum_distance: minimum_distance.max(0.0),
            state: State::Idle,
        }
    }

    /// Returns `true` while a drag is active (past the minimum distance).
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Returns `true` while the pointer is pressed, whether or not a drag has started.
    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Handle a press. A second press while already pressed is ignored.
    pub fn pointer_down(&mut self, pt: Point) -> Option<DragEvent> {
        if self.is_pressed() {
            return None;
        }
        if self.minimum_distance <= 0.0 {
            self.state = State::Active {
                start: pt,
                last: pt,
            };
            return Some(DragEvent::Changed(self.sample(pt, pt)));
        }
        self.state = State::Pending { start: pt };
        None
    }

    /// Handle a pointer move.
    pub fn pointer_move(&mut self, pt: Point) -> Option<DragEvent> {
        match self.state {
            State::Idle => None,
            State::Pending { start } => {
                if (pt - start).hypot() < self.minimum_distance {
                    return None;
                }
                self.state = State::Active { start, last: pt };
                Some(DragEvent::Changed(self.sample(pt, start)))
            }
            State::Active { start, .. } => {
                self.state = State::Active { start, last: pt };
                Some(DragEvent::Changed(self.sample(pt, start)))
            }
        }
    }

    /// Handle a release. Emits `Ended` only if a drag was active.
    pub fn pointer_up(&mut self, pt: Point) -> Option<DragEvent> {
        let state = core::mem::take(&mut self.state);
        match state {
            State::Active { start, .. } => Some(DragEvent::Ended(self.sample(pt, start))),
            State::Idle | State::Pending { .. } => None,
        }
    }

    /// Handle a platform cancel. An active drag ends at its last known location.
    pub fn pointer_cancel(&mut self) -> Option<DragEvent> {
        let state = core::mem::take(&mut self.state);
        match state {
            State::Active { start, last } => Some(DragEvent::Ended(self.sample(last, start))),
            State::Idle | State::Pending { .. } => None,
        }
    }

    fn sample(&self, location: Point, start_location: Point) -> DragSample {
        DragSample {
            location,
            start_location,
            coordinate_space: self.space,
        }
    }
}
