// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo applications for Drag Observer.
//!
//! Each demo is a plain state model driven through the same loop:
//!
//! 1) forward a pointer event to the [`Scene`]'s publisher, which runs observer callbacks
//!    against the demo's state;
//! 2) reconcile: write the new layout into the view tree, commit it and re-measure observers;
//! 3) render a text frame from the state.
//!
//! Run:
//! - `cargo run -p drag_observer_demos --example calculator`
//! - `cargo run -p drag_observer_demos --example color_picker`

use drag_observer::adapters::view_tree::{measure, sync_space};
use drag_observer::publisher::{GesturePublisher, ObserverId};
use drag_observer::types::{CoordinateSpace, DragPhaseEvent, PhaseSet};
use drag_observer_view_tree::{Relayout, ViewId, ViewTree};

pub mod calculator;
pub mod color_picker;

/// A view tree plus one gesture publisher whose observers are bound to views.
pub struct Scene<S> {
    /// Views and their geometry.
    pub tree: ViewTree,
    /// The gesture region's publisher.
    pub publisher: GesturePublisher<S>,
    bindings: Vec<(ObserverId, ViewId)>,
}

impl<S> std::fmt::Debug for Scene<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("tree", &self.tree)
            .field("publisher", &self.publisher)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl<S> Scene<S> {
    /// An empty scene whose publisher emits samples in `space`.
    pub fn new(space: CoordinateSpace) -> Self {
        Self {
            tree: ViewTree::new(),
            publisher: GesturePublisher::new(space),
            bindings: Vec::new(),
        }
    }

    /// Attach an observer to `view`. It is measured on the next [`reconcile`](Self::reconcile).
    pub fn observe(
        &mut self,
        view: ViewId,
        phases: impl Into<PhaseSet>,
        callback: impl FnMut(&mut S, &DragPhaseEvent) + 'static,
    ) -> ObserverId {
        let id = self.publisher.on_drag_phase(phases, callback);
        self.bindings.push((id, view));
        id
    }

    /// Remove `view` and its subtree from the tree, detaching every observer bound to them.
    ///
    /// Returns the number of observers detached.
    pub fn remove(&mut self, view: ViewId) -> usize {
        self.tree.remove(view);
        let (dead, live): (Vec<_>, Vec<_>) = self
            .bindings
            .drain(..)
            .partition(|(_, v)| !self.tree.is_alive(*v));
        self.bindings = live;
        for (id, _) in &dead {
            self.publisher.remove_observer(*id);
        }
        log::debug!("removed {view:?} and {} observers", dead.len());
        dead.len()
    }

    /// Commit the tree and, if any frame changed, re-measure every bound observer.
    pub fn reconcile(&mut self) -> Relayout {
        let relayout = self.tree.commit();
        if !relayout.is_empty() {
            sync_space(&mut self.publisher, &self.tree);
            let measured = measure(&mut self.publisher, &self.tree, &self.bindings);
            log::debug!(
                "re-measured {measured} observers ({} resized, {} moved)",
                relayout.resized.len(),
                relayout.moved.len()
            );
        }
        relayout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drag_observer::types::DragPhase;
    use drag_observer_view_tree::LocalView;
    use kurbo::{Point, Rect};

    #[test]
    fn removing_a_view_detaches_its_subtree_observers() {
        let mut scene: Scene<Vec<&'static str>> = Scene::new(CoordinateSpace::Global);
        let panel = scene.tree.insert(
            None,
            LocalView::with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        let button = scene.tree.insert(
            Some(panel),
            LocalView::with_bounds(Rect::new(0.0, 0.0, 20.0, 20.0)),
        );
        let other = scene.tree.insert(
            None,
            LocalView::with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        scene.observe(panel, DragPhase::DownInside, |log, _| log.push("panel"));
        scene.observe(button, DragPhase::DownInside, |log, _| log.push("button"));
        scene.observe(other, DragPhase::DownInside, |log, _| log.push("other"));
        let _ = scene.reconcile();

        assert_eq!(scene.remove(panel), 2);
        assert_eq!(scene.publisher.observer_count(), 1);
        assert!(!scene.tree.is_alive(button));
        let _ = scene.reconcile();

        let mut log = Vec::new();
        let _ = scene.publisher.pointer_down(Point::new(5.0, 5.0), &mut log);
        assert_eq!(log, ["other"]);
    }
}
