// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase classifier: derive per-view drag phases from the raw drag stream.
//!
//! ## Usage
//!
//! 1) Create a [`PhaseClassifier`] with the phases you care about.
//! 2) Give it the view's frame with [`PhaseClassifier::set_frame`] whenever layout changes.
//! 3) Feed every raw [`DragEvent`] into [`PhaseClassifier::update`] to get the phases for this view.
//!
//! ## Minimal example
//!
//! ```
//! use drag_observer::classifier::PhaseClassifier;
//! use drag_observer::types::{
//!     CoordinateSpace, DragEvent, DragPhase, DragPhaseEvent, DragSample, PhaseSet, ViewRect,
//! };
//! use kurbo::{Point, Rect};
//!
//! let sample = |x, y| DragSample {
//!     location: Point::new(x, y),
//!     start_location: Point::new(50.0, 50.0),
//!     coordinate_space: CoordinateSpace::Global,
//! };
//! let mut c = PhaseClassifier::new(PhaseSet::all());
//! c.set_frame(Some(ViewRect {
//!     rect: Rect::new(0.0, 0.0, 100.0, 100.0),
//!     space: CoordinateSpace::Global,
//! }));
//!
//! let phases = |events: Vec<DragPhaseEvent>| events.iter().map(|e| e.phase).collect::<Vec<_>>();
//! assert_eq!(
//!     phases(c.update(&DragEvent::Changed(sample(50.0, 50.0)))),
//!     [DragPhase::Down, DragPhase::DownInside]
//! );
//! assert_eq!(
//!     phases(c.update(&DragEvent::Changed(sample(150.0, 50.0)))),
//!     [DragPhase::Move, DragPhase::MoveOutside, DragPhase::Exit]
//! );
//! assert_eq!(
//!     phases(c.update(&DragEvent::Ended(sample(150.0, 50.0)))),
//!     [DragPhase::Up, DragPhase::UpOutside]
//! );
//! ```
//!
//! ## Ordering
//!
//! Within one raw event, phases are emitted in a fixed order:
//! the down or move family first, then inside/outside, then enter/exit.
//!
//! ## Unmeasured views
//!
//! Until a frame has been set, every event is dropped: nothing is emitted and the
//! previous-sample bookkeeping is left untouched.

use alloc::vec::Vec;

use crate::types::{DragEvent, DragPhase, DragPhaseEvent, DragSample, PhaseSet, ViewRect};

/// Per-view drag phase state machine.
///
/// Tracks the previous raw sample of the current drag and the most recently
/// measured frame of its view.
///
/// Interest filtering only affects what is emitted. The bookkeeping always
/// advances on raw samples, so an observer that only listens for `Up` still
/// sees a correct `Up` after any number of moves.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseClassifier {
    interest: PhaseSet,
    previous: Option<DragSample>,
    frame: Option<ViewRect>,
}

impl PhaseClassifier {
    /// Create an unmeasured classifier that emits the phases in `interest`.
    pub fn new(interest: PhaseSet) -> Self {
        Self {
            interest,
            previous: None,
            frame: None,
        }
    }

    /// The phases this classifier emits.
    pub fn interest(&self) -> PhaseSet {
        self.interest
    }

    /// The most recently measured frame, if any.
    pub fn frame(&self) -> Option<ViewRect> {
        self.frame
    }

    /// Replace the measured frame. `None` returns the classifier to the unmeasured state.
    pub fn set_frame(&mut self, frame: Option<ViewRect>) {
        self.frame = frame;
    }

    /// The previous sample of the drag in progress, or `None` between drags.
    pub fn previous(&self) -> Option<&DragSample> {
        self.previous.as_ref()
    }

    /// Returns `true` while a drag is in progress for this classifier.
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }

    /// Classify `event` and return the emitted phases in order.
    pub fn update(&mut self, event: &DragEvent) -> Vec<DragPhaseEvent> {
        let mut out = Vec::new();
        self.update_with(event, |e| out.push(e));
        out
    }

    /// Classify `event`, handing each emitted phase to `emit` in order.
    ///
    /// Returns `false` if the event was dropped, either because no frame has been measured or
    /// because the sample is in a different coordinate space than the frame. A dropped event
    /// leaves the classifier unchanged.
    pub fn update_with(&mut self, event: &DragEvent, mut emit: impl FnMut(DragPhaseEvent)) -> bool {
        let Some(frame) = self.frame else {
            log::trace!("dropping {event:?}: view not measured");
            return false;
        };
        if frame.space != event.sample().coordinate_space {
            log::trace!("dropping {event:?}: view measured in {:?}", frame.space);
            return false;
        }
        let interest = self.interest;
        let mut send = |phase: DragPhase, sample: &DragSample| {
            if interest.contains_phase(phase) {
                emit(DragPhaseEvent {
                    phase,
                    sample: *sample,
                    frame,
                });
            }
        };

        match event {
            DragEvent::Changed(sample) => {
                let inside = frame.contains(sample.location);
                match self.previous {
                    None => {
                        send(DragPhase::Down, sample);
                        if inside {
                            send(DragPhase::DownInside, sample);
                        } else {
                            send(DragPhase::DownOutside, sample);
                        }
                    }
                    Some(prev) => {
                        // Both tests use the current frame, even if it changed mid-drag.
                        let was_inside = frame.contains(prev.location);
                        send(DragPhase::Move, sample);
                        if inside {
                            send(DragPhase::MoveInside, sample);
                        } else {
                            send(DragPhase::MoveOutside, sample);
                        }
                        if !was_inside && inside {
                            send(DragPhase::Enter, sample);
                        }
                        if was_inside && !inside {
                            send(DragPhase::Exit, sample);
                        }
                    }
                }
                self.previous = Some(*sample);
            }
            DragEvent::Ended(sample) => {
                send(DragPhase::Up, sample);
                if frame.contains(sample.location) {
                    send(DragPhase::UpInside, sample);
                } else {
                    send(DragPhase::UpOutside, sample);
                }
                self.previous = None;
            }
        }
        true
    }
}
