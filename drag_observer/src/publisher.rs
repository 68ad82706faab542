// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture publisher: one recognizer per gesture region, fanned out to any number of observers.
//!
//! ## Overview
//!
//! A [`GesturePublisher`] is attached once to the root of a gesture region. It owns a single
//! [`DragRecognizer`] and a [`DragChannel`]. Views anywhere below that root attach observers
//! through [`GesturePublisher::on_drag_phase`] and receive classified [`DragPhaseEvent`]s.
//!
//! ## Delivery
//!
//! - Broadcast is synchronous: every observer has been called before `pointer_*` returns.
//! - Observers are visited in ascending slot order. A removed observer's slot is reused by the
//!   next subscription, with a fresh generation.
//! - There is no buffering. An observer added after an event never sees it.
//!
//! ## State
//!
//! Callbacks receive `&mut S`, the caller's application state, which is threaded through each
//! `pointer_*` call. Callbacks cannot reach the channel itself, so the observer set is fixed for
//! the duration of a broadcast.
//!
//! ## Minimal example
//!
//! ```
//! use drag_observer::publisher::GesturePublisher;
//! use drag_observer::types::{CoordinateSpace, DragPhase, PhaseSet};
//! use kurbo::{Point, Rect};
//!
//! #[derive(Default)]
//! struct App {
//!     pressed: bool,
//! }
//!
//! let mut publisher: GesturePublisher<App> = GesturePublisher::new(CoordinateSpace::Global);
//! let label = publisher.on_drag_phase(PhaseSet::DOWN_INSIDE | PhaseSet::UP, |app, e| {
//!     app.pressed = e.phase == DragPhase::DownInside;
//! });
//! publisher.measure(label, Rect::new(0.0, 0.0, 80.0, 20.0));
//!
//! let mut app = App::default();
//! publisher.pointer_down(Point::new(10.0, 10.0), &mut app);
//! assert!(app.pressed);
//! publisher.pointer_up(Point::new(10.0, 10.0), &mut app);
//! assert!(!app.pressed);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect};

use crate::classifier::PhaseClassifier;
use crate::recognizer::DragRecognizer;
use crate::types::{CoordinateSpace, DragEvent, DragPhaseEvent, PhaseSet, ViewRect};

/// Identifier for an observer attached to a [`DragChannel`].
///
/// A slot index plus a generation counter. Removing an observer frees its slot;
/// reusing the slot bumps the generation, so a stale `ObserverId` never aliases
/// a newer observer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverId(u32, u32);

impl ObserverId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Callback invoked for each phase an observer is interested in.
pub type PhaseCallback<S> = Box<dyn FnMut(&mut S, &DragPhaseEvent)>;

struct Observer<S> {
    generation: u32,
    classifier: PhaseClassifier,
    callback: PhaseCallback<S>,
}

/// Broadcast channel from one publisher to its observers.
///
/// Owns every attached observer's classifier state and callback.
pub struct DragChannel<S> {
    space: CoordinateSpace,
    slots: Vec<Option<Observer<S>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<S> core::fmt::Debug for DragChannel<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragChannel")
            .field("space", &self.space)
            .field("observers", &self.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<S> DragChannel<S> {
    /// Create an empty channel whose observers are measured in `space`.
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            space,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// The coordinate space of every sample and frame on this channel.
    pub fn space(&self) -> CoordinateSpace {
        self.space
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns `true` if no observers are attached.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Attach a new, unmeasured observer.
    pub fn subscribe(
        &mut self,
        phases: impl Into<PhaseSet>,
        callback: impl FnMut(&mut S, &DragPhaseEvent) + 'static,
    ) -> ObserverId {
        let observer = |generation| Observer {
            generation,
            classifier: PhaseClassifier::new(phases.into()),
            callback: Box::new(callback),
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(observer(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(observer(generation)));
            self.generations.push(generation);
            (self.slots.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ObserverId uses 32-bit indices by design."
        )]
        let id = ObserverId(idx as u32, generation);
        log::debug!("observer {id:?} subscribed");
        id
    }

    /// Detach an observer, dropping its state. Returns `false` if `id` is stale.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
        log::debug!("observer {id:?} removed");
        true
    }

    /// Returns `true` if `id` refers to a live observer.
    pub fn is_alive(&self, id: ObserverId) -> bool {
        self.observer(id).is_some()
    }

    /// Read an observer's classifier state.
    pub fn classifier(&self, id: ObserverId) -> Option<&PhaseClassifier> {
        self.observer(id).map(|o| &o.classifier)
    }

    /// Record the observer view's frame, in this channel's space.
    ///
    /// Returns `false` if `id` is stale.
    pub fn measure(&mut self, id: ObserverId, rect: Rect) -> bool {
        let space = self.space;
        match self.observer_mut(id) {
            Some(o) => {
                o.classifier.set_frame(Some(ViewRect { rect, space }));
                true
            }
            None => false,
        }
    }

    /// Forget the observer's frame; it drops events until measured again.
    pub fn clear_measurement(&mut self, id: ObserverId) -> bool {
        match self.observer_mut(id) {
            Some(o) => {
                o.classifier.set_frame(None);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every observer. Returns the number of callbacks invoked.
    pub fn broadcast(&mut self, event: &DragEvent, state: &mut S) -> usize {
        let mut delivered = 0;
        for observer in self.slots.iter_mut().flatten() {
            let callback = &mut observer.callback;
            observer.classifier.update_with(event, |e| {
                callback(state, &e);
                delivered += 1;
            });
        }
        log::trace!("broadcast {event:?} -> {delivered} phase callbacks");
        delivered
    }

    fn observer(&self, id: ObserverId) -> Option<&Observer<S>> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|o| o.generation == id.1)
    }

    fn observer_mut(&mut self, id: ObserverId) -> Option<&mut Observer<S>> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|o| o.generation == id.1)
    }
}

/// Publisher configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PublisherConfig {
    /// Space all emitted samples are expressed in.
    pub coordinate_space: CoordinateSpace,
    /// Distance the pointer must travel from the press before the drag starts.
    /// Zero means the press itself starts the drag.
    pub minimum_distance: f64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            coordinate_space: CoordinateSpace::Global,
            minimum_distance: 0.0,
        }
    }
}

/// Recognizes drags over a gesture region and broadcasts them to observers.
///
/// ## Usage
///
/// - Construct with [`GesturePublisher::new`] or [`GesturePublisher::with_config`].
/// - Attach observers with [`GesturePublisher::on_drag_phase`] and keep their frames current
///   with [`GesturePublisher::measure`] after each layout pass.
/// - If the coordinate space is not the window, keep [`GesturePublisher::set_space_transform`]
///   current as well.
/// - Forward pointer input through `pointer_down`, `pointer_move`, `pointer_up` and
///   `pointer_cancel`, in window coordinates.
pub struct GesturePublisher<S> {
    config: PublisherConfig,
    window_to_space: Affine,
    recognizer: DragRecognizer,
    channel: DragChannel<S>,
}

impl<S> core::fmt::Debug for GesturePublisher<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GesturePublisher")
            .field("config", &self.config)
            .field("window_to_space", &self.window_to_space)
            .field("recognizer", &self.recognizer)
            .field("channel", &self.channel)
            .finish()
    }
}

impl<S> GesturePublisher<S> {
    /// Create a publisher emitting samples in `space`, with default settings otherwise.
    pub fn new(space: CoordinateSpace) -> Self {
        Self::with_config(PublisherConfig {
            coordinate_space: space,
            ..PublisherConfig::default()
        })
    }

    /// Create a publisher from an explicit configuration.
    pub fn with_config(config: PublisherConfig) -> Self {
        Self {
            config,
            window_to_space: Affine::IDENTITY,
            recognizer: DragRecognizer::new(config.coordinate_space, config.minimum_distance),
            channel: DragChannel::new(config.coordinate_space),
        }
    }

    /// The configuration this publisher was created with.
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// The space all emitted samples are expressed in.
    pub fn coordinate_space(&self) -> CoordinateSpace {
        self.config.coordinate_space
    }

    /// Set the transform from window coordinates to this publisher's space.
    pub fn set_space_transform(&mut self, window_to_space: Affine) {
        self.window_to_space = window_to_space;
    }

    /// The current window→space transform.
    pub fn space_transform(&self) -> Affine {
        self.window_to_space
    }

    /// The broadcast channel.
    pub fn channel(&self) -> &DragChannel<S> {
        &self.channel
    }

    /// Attach an observer interested in `phases`.
    ///
    /// The observer stays silent until its frame is measured.
    pub fn on_drag_phase(
        &mut self,
        phases: impl Into<PhaseSet>,
        callback: impl FnMut(&mut S, &DragPhaseEvent) + 'static,
    ) -> ObserverId {
        self.channel.subscribe(phases, callback)
    }

    /// Detach an observer. Returns `false` if `id` is stale.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.channel.unsubscribe(id)
    }

    /// Record an observer's frame in this publisher's space. Returns `false` if `id` is stale.
    pub fn measure(&mut self, id: ObserverId, rect: Rect) -> bool {
        self.channel.measure(id, rect)
    }

    /// Forget an observer's frame.
    pub fn clear_measurement(&mut self, id: ObserverId) -> bool {
        self.channel.clear_measurement(id)
    }

    /// Read an observer's classifier state.
    pub fn observer(&self, id: ObserverId) -> Option<&PhaseClassifier> {
        self.channel.classifier(id)
    }

    /// Number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.channel.len()
    }

    /// Returns `true` while a drag is active.
    pub fn is_dragging(&self) -> bool {
        self.recognizer.is_active()
    }

    /// Handle a press at `pt` (window coordinates).
    ///
    /// Returns the raw event that was broadcast, if any.
    pub fn pointer_down(&mut self, pt: Point, state: &mut S) -> Option<DragEvent> {
        let was_active = self.recognizer.is_active();
        let event = self.recognizer.pointer_down(self.window_to_space * pt);
        self.forward(was_active, event, state)
    }

    /// Handle a pointer move at `pt` (window coordinates).
    pub fn pointer_move(&mut self, pt: Point, state: &mut S) -> Option<DragEvent> {
        let was_active = self.recognizer.is_active();
        let event = self.recognizer.pointer_move(self.window_to_space * pt);
        self.forward(was_active, event, state)
    }

    /// Handle a release at `pt` (window coordinates).
    pub fn pointer_up(&mut self, pt: Point, state: &mut S) -> Option<DragEvent> {
        let was_active = self.recognizer.is_active();
        let event = self.recognizer.pointer_up(self.window_to_space * pt);
        self.forward(was_active, event, state)
    }

    /// Handle a platform cancel.
    pub fn pointer_cancel(&mut self, state: &mut S) -> Option<DragEvent> {
        let was_active = self.recognizer.is_active();
        let event = self.recognizer.pointer_cancel();
        self.forward(was_active, event, state)
    }

    /// Broadcast a raw event directly, bypassing the recognizer.
    ///
    /// Returns the number of callbacks invoked.
    pub fn publish(&mut self, event: &DragEvent, state: &mut S) -> usize {
        self.channel.broadcast(event, state)
    }

    fn forward(
        &mut self,
        was_active: bool,
        event: Option<DragEvent>,
        state: &mut S,
    ) -> Option<DragEvent> {
        let event = event?;
        match &event {
            DragEvent::Changed(sample) if !was_active => {
                log::debug!("drag began at {:?}", sample.start_location);
            }
            DragEvent::Ended(sample) => log::debug!("drag ended at {:?}", sample.location),
            DragEvent::Changed(_) => {}
        }
        self.channel.broadcast(&event, state);
        Some(event)
    }
}
