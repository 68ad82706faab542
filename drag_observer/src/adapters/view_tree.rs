// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Drag Observer View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! Call these after every [`ViewTree::commit`] that reports a change, before forwarding the next
//! pointer event. Observers bound to removed views are unmeasured and go silent. Observers whose
//! live views cannot be measured yet keep their previous frame.

use drag_observer_view_tree::{Space, ViewId, ViewTree};

use crate::publisher::{GesturePublisher, ObserverId};
use crate::types::CoordinateSpace;

/// The view tree space corresponding to a publisher space.
pub fn space_of(space: CoordinateSpace) -> Space {
    match space {
        CoordinateSpace::Global => Space::Window,
        CoordinateSpace::Named(name) => Space::Named(name),
    }
}

/// Refresh the publisher's window→space transform from the tree.
///
/// Returns `false` (leaving the transform untouched) if the publisher's named
/// space is not declared by any committed view.
pub fn sync_space<S>(publisher: &mut GesturePublisher<S>, tree: &ViewTree) -> bool {
    match tree.space_transform(space_of(publisher.coordinate_space())) {
        Some(tf) => {
            publisher.set_space_transform(tf);
            true
        }
        None => false,
    }
}

/// Measure each bound view in the publisher's space and store the frame on its observer.
///
/// Observers whose view has been removed from the tree are unmeasured.
///
/// Returns the number of observers measured.
pub fn measure<S>(
    publisher: &mut GesturePublisher<S>,
    tree: &ViewTree,
    bindings: &[(ObserverId, ViewId)],
) -> usize {
    let space = space_of(publisher.coordinate_space());
    let mut measured = 0;
    for &(observer, view) in bindings {
        if !tree.is_alive(view) {
            publisher.clear_measurement(observer);
            continue;
        }
        let Some(frame) = tree.frame_in(view, space) else {
            log::trace!("view {view:?} not measurable in {space:?}");
            continue;
        };
        if publisher.measure(observer, frame) {
            measured += 1;
        }
    }
    measured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DragPhase, DragPhaseEvent, PhaseSet};
    use alloc::vec;
    use alloc::vec::Vec;
    use drag_observer_view_tree::LocalView;
    use kurbo::{Affine, Point, Rect, Vec2};

    #[test]
    fn measures_in_named_space_and_maps_pointer() {
        let mut tree = ViewTree::new();
        let page = tree.insert(
            None,
            LocalView {
                bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
                transform: Affine::translate(Vec2::new(50.0, 0.0)),
                space_name: Some("page"),
            },
        );
        let button = tree.insert(
            Some(page),
            LocalView {
                bounds: Rect::new(0.0, 0.0, 40.0, 40.0),
                transform: Affine::translate(Vec2::new(10.0, 10.0)),
                ..LocalView::default()
            },
        );

        let mut publisher: GesturePublisher<Vec<DragPhase>> =
            GesturePublisher::new(CoordinateSpace::Named("page"));
        let id = publisher.on_drag_phase(PhaseSet::all(), |log, e: &DragPhaseEvent| {
            log.push(e.phase);
        });
        let bindings = [(id, button)];

        // Before commit nothing can be measured and the space is unknown.
        assert!(!sync_space(&mut publisher, &tree));
        assert_eq!(measure(&mut publisher, &tree, &bindings), 0);

        let _ = tree.commit();
        assert!(sync_space(&mut publisher, &tree));
        assert_eq!(measure(&mut publisher, &tree, &bindings), 1);
        assert_eq!(
            publisher.observer(id).and_then(|c| c.frame()).map(|f| f.rect),
            Some(Rect::new(10.0, 10.0, 50.0, 50.0))
        );

        let mut log = Vec::new();
        // Window (65, 15) is page (15, 15): inside the button.
        let ev = publisher.pointer_down(Point::new(65.0, 15.0), &mut log);
        assert_eq!(ev.map(|e| e.sample().location), Some(Point::new(15.0, 15.0)));
        assert_eq!(log, vec![DragPhase::Down, DragPhase::DownInside]);
    }

    #[test]
    fn removed_view_goes_silent() {
        let mut tree = ViewTree::new();
        let view = tree.insert(None, LocalView::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = tree.commit();
        let mut publisher: GesturePublisher<Vec<DragPhase>> =
            GesturePublisher::new(CoordinateSpace::Global);
        let id = publisher.on_drag_phase(PhaseSet::all(), |log, e: &DragPhaseEvent| {
            log.push(e.phase);
        });
        assert_eq!(measure(&mut publisher, &tree, &[(id, view)]), 1);

        tree.remove(view);
        let _ = tree.commit();
        assert_eq!(measure(&mut publisher, &tree, &[(id, view)]), 0);
        assert!(publisher.observer(id).and_then(|c| c.frame()).is_none());

        let mut log = Vec::new();
        let _ = publisher.pointer_down(Point::new(5.0, 5.0), &mut log);
        let _ = publisher.pointer_up(Point::new(5.0, 5.0), &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn uncommitted_view_keeps_previous_frame() {
        let mut tree = ViewTree::new();
        let root = tree.insert(None, LocalView::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = tree.commit();
        let mut publisher: GesturePublisher<()> = GesturePublisher::new(CoordinateSpace::Global);
        let id = publisher.on_drag_phase(DragPhase::Up, |_, _| {});
        assert_eq!(measure(&mut publisher, &tree, &[(id, root)]), 1);

        // A view inserted after the last commit has no frame yet.
        let late = tree.insert(Some(root), LocalView::default());
        assert_eq!(measure(&mut publisher, &tree, &[(id, late)]), 0);
        assert_eq!(
            publisher.observer(id).and_then(|c| c.frame()).map(|f| f.rect),
            Some(Rect::new(0.0, 0.0, 10.0, 10.0))
        );
    }
}
