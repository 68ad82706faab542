// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: phases, interest sets, coordinate spaces, raw samples, and phase events.
//!
//! ## Overview
//!
//! These types describe what flows through the observer: raw [`DragEvent`]s in, [`DragPhaseEvent`]s out.
//! They are referenced by the [`classifier`](crate::classifier) and the [`publisher`](crate::publisher).

use kurbo::{Point, Rect, Size, Vec2};

/// Named phases derived from a raw drag stream for a single view.
///
/// Produced by [`PhaseClassifier::update`](crate::classifier::PhaseClassifier::update).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DragPhase {
    /// First sample of a drag.
    Down,
    /// First sample of a drag, inside the view.
    DownInside,
    /// First sample of a drag, outside the view.
    DownOutside,
    /// Drag ended.
    Up,
    /// Drag ended inside the view.
    UpInside,
    /// Drag ended outside the view.
    UpOutside,
    /// Any later sample of a drag.
    Move,
    /// Later sample inside the view.
    MoveInside,
    /// Later sample outside the view.
    MoveOutside,
    /// Previous sample was outside the view and this one is inside.
    Enter,
    /// Previous sample was inside the view and this one is outside.
    Exit,
}

impl DragPhase {
    /// Every phase, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Down,
        Self::DownInside,
        Self::DownOutside,
        Self::Up,
        Self::UpInside,
        Self::UpOutside,
        Self::Move,
        Self::MoveInside,
        Self::MoveOutside,
        Self::Enter,
        Self::Exit,
    ];

    /// The single-element [`PhaseSet`] for this phase.
    pub const fn as_set(self) -> PhaseSet {
        match self {
            Self::Down => PhaseSet::DOWN,
            Self::DownInside => PhaseSet::DOWN_INSIDE,
            Self::DownOutside => PhaseSet::DOWN_OUTSIDE,
            Self::Up => PhaseSet::UP,
            Self::UpInside => PhaseSet::UP_INSIDE,
            Self::UpOutside => PhaseSet::UP_OUTSIDE,
            Self::Move => PhaseSet::MOVE,
            Self::MoveInside => PhaseSet::MOVE_INSIDE,
            Self::MoveOutside => PhaseSet::MOVE_OUTSIDE,
            Self::Enter => PhaseSet::ENTER,
            Self::Exit => PhaseSet::EXIT,
        }
    }
}

bitflags::bitflags! {
    /// A set of [`DragPhase`]s an observer is interested in.
    ///
    /// Use [`PhaseSet::all`] to observe every phase and [`PhaseSet::empty`] for none.
    /// A single [`DragPhase`] converts into a one-element set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PhaseSet: u16 {
        /// See [`DragPhase::Down`].
        const DOWN         = 1 << 0;
        /// See [`DragPhase::DownInside`].
        const DOWN_INSIDE  = 1 << 1;
        /// See [`DragPhase::DownOutside`].
        const DOWN_OUTSIDE = 1 << 2;
        /// See [`DragPhase::Up`].
        const UP           = 1 << 3;
        /// See [`DragPhase::UpInside`].
        const UP_INSIDE    = 1 << 4;
        /// See [`DragPhase::UpOutside`].
        const UP_OUTSIDE   = 1 << 5;
        /// See [`DragPhase::Move`].
        const MOVE         = 1 << 6;
        /// See [`DragPhase::MoveInside`].
        const MOVE_INSIDE  = 1 << 7;
        /// See [`DragPhase::MoveOutside`].
        const MOVE_OUTSIDE = 1 << 8;
        /// See [`DragPhase::Enter`].
        const ENTER        = 1 << 9;
        /// See [`DragPhase::Exit`].
        const EXIT         = 1 << 10;
    }
}

impl PhaseSet {
    /// Returns true if `phase` is a member of this set.
    #[inline]
    pub fn contains_phase(self, phase: DragPhase) -> bool {
        self.contains(phase.as_set())
    }
}

impl From<DragPhase> for PhaseSet {
    fn from(phase: DragPhase) -> Self {
        phase.as_set()
    }
}

impl FromIterator<DragPhase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = DragPhase>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, phase| set | phase.as_set())
    }
}

/// The coordinate space drag locations and view frames are expressed in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CoordinateSpace {
    /// Window (root) coordinates.
    #[default]
    Global,
    /// A space declared by some view, identified by name.
    Named(&'static str),
}

/// A single raw drag update as produced by the recognizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSample {
    /// Current pointer location.
    pub location: Point,
    /// Pointer location when the drag began.
    pub start_location: Point,
    /// Space both locations are measured in.
    pub coordinate_space: CoordinateSpace,
}

impl DragSample {
    /// Offset of the current location from the start location.
    pub fn translation(&self) -> Vec2 {
        self.location - self.start_location
    }
}

/// A raw drag event broadcast by the [publisher](crate::publisher::GesturePublisher).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// The pointer moved (or was first pressed) while the drag is active.
    Changed(DragSample),
    /// The drag finished.
    Ended(DragSample),
}

impl DragEvent {
    /// The sample carried by this event.
    pub fn sample(&self) -> &DragSample {
        match self {
            Self::Changed(s) | Self::Ended(s) => s,
        }
    }
}

/// An observing view's frame, expressed in the publisher's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewRect {
    /// Frame of the view.
    pub rect: Rect,
    /// Space the frame is expressed in.
    pub space: CoordinateSpace,
}

impl ViewRect {
    /// Size of the frame.
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Half-open containment test: `x0 <= x < x1` and `y0 <= y < y1`.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        self.rect.contains(pt)
    }
}

/// A classified phase delivered to an observer callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragPhaseEvent {
    /// The phase.
    pub phase: DragPhase,
    /// The raw sample that produced it.
    pub sample: DragSample,
    /// The observer's frame used for containment.
    pub frame: ViewRect,
}
