// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, measurement.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect};

use crate::types::{LocalView, Space, ViewId};

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A tree of views with local bounds, transforms and named spaces.
pub struct ViewTree {
    views: Vec<Option<View>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    epoch: u64,
}

impl core::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.views.len();
        let alive = self.views.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ViewTree")
            .field("views_total", &total)
            .field("views_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

/// Views whose committed frame changed during a [`ViewTree::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relayout {
    /// Views whose size changed, including views measured for the first time.
    pub resized: Vec<ViewId>,
    /// Views that kept their size but moved.
    pub moved: Vec<ViewId>,
}

impl Relayout {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.resized.is_empty() && self.moved.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
struct World {
    transform: Affine,
    frame: Rect, // window-space AABB of the transformed bounds
}

#[derive(Clone, Debug)]
struct View {
    generation: u32,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    local: LocalView,
    world: Option<World>,
}

impl ViewTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            epoch: 0,
        }
    }

    /// Number of completed [`commit`](Self::commit) passes.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Insert a new view as a child of `parent` (or as a root if `None`).
    ///
    /// The view is unmeasured until the next [`commit`](Self::commit).
    pub fn insert(&mut self, parent: Option<ViewId>, local: LocalView) -> ViewId {
        let view = |generation| View {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            world: None,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.views[idx] = Some(view(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.views.push(Some(view(generation)));
            self.generations.push(generation);
            (self.views.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ViewId uses 32-bit indices by design."
        )]
        let id = ViewId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a view and its subtree.
    pub fn remove(&mut self, id: ViewId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.view(id).and_then(|v| v.parent) {
            self.unlink_parent(id, parent);
        }
        let children = self.view(id).map(|v| v.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(child);
        }
        self.views[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` (or make it a root).
    ///
    /// Moving a view under itself or one of its descendants is ignored.
    pub fn reparent(&mut self, id: ViewId, new_parent: Option<ViewId>) {
        if !self.is_alive(id) {
            return;
        }
        if new_parent.is_some_and(|p| self.is_ancestor_or_self(id, p)) {
            log::debug!("ignoring reparent of {id:?} under its own subtree");
            return;
        }
        if let Some(parent) = self.view(id).and_then(|v| v.parent) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent.filter(|p| self.is_alive(*p)) {
            self.link_parent(id, p);
        }
    }

    /// Update local bounds.
    pub fn set_local_bounds(&mut self, id: ViewId, bounds: Rect) {
        if let Some(v) = self.view_mut(id) {
            v.local.bounds = bounds;
        }
    }

    /// Update local transform.
    pub fn set_local_transform(&mut self, id: ViewId, tf: Affine) {
        if let Some(v) = self.view_mut(id) {
            v.local.transform = tf;
        }
    }

    /// Declare (or clear) the named space rooted at this view.
    pub fn set_space_name(&mut self, id: ViewId, name: Option<&'static str>) {
        if let Some(v) = self.view_mut(id) {
            v.local.space_name = name;
        }
    }

    /// Local geometry of a live view.
    pub fn local(&self, id: ViewId) -> Option<&LocalView> {
        self.view(id).map(|v| &v.local)
    }

    /// Parent of a live view.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.view(id)?.parent
    }

    /// Recompute world geometry for every view, walking down from each root, and report what
    /// changed.
    ///
    /// Frames queried between a setter and the next commit still reflect the
    /// previous commit.
    pub fn commit(&mut self) -> Relayout {
        let mut out = Relayout::default();
        let roots: Vec<ViewId> = self
            .views
            .iter()
            .enumerate()
            .filter_map(|(i, v)| match v {
                Some(v) if v.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "ViewId uses 32-bit indices by design."
                    )]
                    Some(ViewId::new(i as u32, v.generation))
                }
                _ => None,
            })
            .collect();

        for root in roots {
            self.update_world_recursive(root, Affine::IDENTITY, &mut out);
        }
        self.epoch += 1;
        log::trace!(
            "commit {}: {} resized, {} moved",
            self.epoch,
            out.resized.len(),
            out.moved.len()
        );
        out
    }

    /// Frame of `id` in `space`, as of the last commit.
    ///
    /// A named space resolves to `id` itself or its nearest ancestor declaring that name.
    ///
    /// Returns `None` if the view is stale, has never been committed, or is not
    /// inside a view declaring the named space.
    pub fn frame_in(&self, id: ViewId, space: Space) -> Option<Rect> {
        let view = self.view(id)?;
        let world = view.world?;
        match space {
            Space::Window => Some(world.frame),
            Space::Named(name) => {
                let mut origin = view;
                while origin.local.space_name != Some(name) {
                    origin = self.view(origin.parent?)?;
                }
                let to_space = origin.world?.transform.inverse();
                Some(transform_rect_bbox(
                    to_space * world.transform,
                    view.local.bounds,
                ))
            }
        }
    }

    /// Transform from window coordinates into `space`, as of the last commit.
    ///
    /// A named space resolves to the lowest-slot view declaring it, so names
    /// used for pointer mapping should be unique within the tree.
    pub fn space_transform(&self, space: Space) -> Option<Affine> {
        match space {
            Space::Window => Some(Affine::IDENTITY),
            Space::Named(name) => {
                let origin = self
                    .views
                    .iter()
                    .flatten()
                    .find(|v| v.local.space_name == Some(name))?;
                Some(origin.world?.transform.inverse())
            }
        }
    }

    /// Map a window point into `space`.
    pub fn to_space(&self, pt: Point, space: Space) -> Option<Point> {
        self.space_transform(space).map(|tf| tf * pt)
    }

    /// Returns true if `id` refers to a live view.
    pub fn is_alive(&self, id: ViewId) -> bool {
        self.view(id).is_some()
    }

    // --- internals ---

    fn is_ancestor_or_self(&self, ancestor: ViewId, id: ViewId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    fn view(&self, id: ViewId) -> Option<&View> {
        self.views
            .get(id.idx())?
            .as_ref()
            .filter(|v| v.generation == id.1)
    }

    fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views
            .get_mut(id.idx())?
            .as_mut()
            .filter(|v| v.generation == id.1)
    }

    fn link_parent(&mut self, id: ViewId, parent: ViewId) {
        if let Some(p) = self.view_mut(parent) {
            p.children.push(id);
        }
        if let Some(v) = self.view_mut(id) {
            v.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: ViewId, parent: ViewId) {
        if let Some(p) = self.view_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(v) = self.view_mut(id) {
            v.parent = None;
        }
    }

    fn update_world_recursive(&mut self, id: ViewId, parent_tf: Affine, out: &mut Relayout) {
        let Some(view) = self.view_mut(id) else {
            return;
        };
        let transform = parent_tf * view.local.transform;
        let frame = transform_rect_bbox(transform, view.local.bounds);
        match view.world {
            None => out.resized.push(id),
            Some(old) if old.frame.size() != frame.size() => out.resized.push(id),
            Some(old) if old.frame.origin() != frame.origin() => out.moved.push(id),
            Some(_) => {}
        }
        view.world = Some(World { transform, frame });
        let children = view.children.clone();
        for child in children {
            self.update_world_recursive(child, transform, out);
        }
    }
}

/// Transform an axis-aligned `Rect` by an `Affine` and return a conservative
/// axis-aligned bounding box.
fn transform_rect_bbox(affine: Affine, rect: Rect) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y0);
    let p2 = affine * Point::new(rect.x0, rect.y1);
    let p3 = affine * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use core::f64::consts::FRAC_PI_2;
    use kurbo::Vec2;

    fn grid() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.insert(None, LocalView::with_bounds(Rect::new(0.0, 0.0, 400.0, 400.0)));
        let child = tree.insert(
            Some(root),
            LocalView {
                bounds: Rect::new(0.0, 0.0, 70.0, 70.0),
                transform: Affine::translate(Vec2::new(100.0, 50.0)),
                ..Default::default()
            },
        );
        (tree, root, child)
    }

    #[test]
    fn unmeasured_until_commit() {
        let (mut tree, _, child) = grid();
        assert_eq!(tree.frame_in(child, Space::Window), None);
        let relayout = tree.commit();
        assert_eq!(relayout.resized.len(), 2);
        assert_eq!(
            tree.frame_in(child, Space::Window),
            Some(Rect::new(100.0, 50.0, 170.0, 120.0))
        );
    }

    #[test]
    fn commit_reports_resize_and_move() {
        let (mut tree, _, child) = grid();
        let _ = tree.commit();
        assert!(tree.commit().is_empty());

        tree.set_local_transform(child, Affine::translate(Vec2::new(0.0, 0.0)));
        let relayout = tree.commit();
        assert_eq!(relayout.moved, vec![child]);
        assert!(relayout.resized.is_empty());

        tree.set_local_bounds(child, Rect::new(0.0, 0.0, 10.0, 10.0));
        // Not visible until committed.
        assert_eq!(
            tree.frame_in(child, Space::Window),
            Some(Rect::new(0.0, 0.0, 70.0, 70.0))
        );
        let relayout = tree.commit();
        assert_eq!(relayout.resized, vec![child]);
        assert_eq!(tree.epoch(), 4);
    }

    #[test]
    fn parent_transform_propagates() {
        let (mut tree, root, child) = grid();
        tree.set_local_transform(root, Affine::translate(Vec2::new(10.0, 10.0)));
        let _ = tree.commit();
        assert_eq!(
            tree.frame_in(child, Space::Window),
            Some(Rect::new(110.0, 60.0, 180.0, 130.0))
        );
    }

    #[test]
    fn named_space_frames() {
        let mut tree = ViewTree::new();
        let page = tree.insert(
            None,
            LocalView {
                bounds: Rect::new(0.0, 0.0, 300.0, 600.0),
                transform: Affine::translate(Vec2::new(20.0, 40.0)),
                space_name: Some("page"),
            },
        );
        let button = tree.insert(
            Some(page),
            LocalView {
                bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
                transform: Affine::translate(Vec2::new(5.0, 5.0)),
                ..Default::default()
            },
        );
        let _ = tree.commit();
        assert_eq!(
            tree.frame_in(button, Space::Window),
            Some(Rect::new(25.0, 45.0, 75.0, 95.0))
        );
        assert_eq!(
            tree.frame_in(button, Space::Named("page")),
            Some(Rect::new(5.0, 5.0, 55.0, 55.0))
        );
        assert_eq!(tree.frame_in(button, Space::Named("missing")), None);
        assert_eq!(
            tree.to_space(Point::new(25.0, 45.0), Space::Named("page")),
            Some(Point::new(5.0, 5.0))
        );
    }

    #[test]
    fn rotated_bounds_expand_to_aabb() {
        let r = transform_rect_bbox(Affine::rotate(FRAC_PI_2), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!((r.width() - 20.0).abs() < 1e-9);
        assert!((r.height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let (mut tree, root, child) = grid();
        let _ = tree.commit();
        tree.remove(root);
        assert!(!tree.is_alive(root));
        assert!(!tree.is_alive(child));
        assert_eq!(tree.frame_in(child, Space::Window), None);

        let fresh = tree.insert(None, LocalView::with_bounds(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_ne!(fresh, root);
        assert_ne!(fresh, child);
        assert!(tree.is_alive(fresh));
        // Setters on stale ids are ignored.
        tree.set_local_bounds(child, Rect::new(0.0, 0.0, 5.0, 5.0));
        let relayout = tree.commit();
        assert_eq!(relayout.resized, vec![fresh]);
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, root, child) = grid();
        let other = tree.insert(
            None,
            LocalView {
                bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                transform: Affine::translate(Vec2::new(1000.0, 0.0)),
                ..Default::default()
            },
        );
        tree.reparent(child, Some(other));
        assert_eq!(tree.parent(child), Some(other));
        let _ = tree.commit();
        assert_eq!(
            tree.frame_in(child, Space::Window),
            Some(Rect::new(1100.0, 50.0, 1170.0, 120.0))
        );
        tree.remove(root);
        assert!(tree.is_alive(child));
    }

    #[test]
    fn reparent_under_own_subtree_is_ignored() {
        let (mut tree, root, child) = grid();
        let leaf = tree.insert(Some(child), LocalView::with_bounds(Rect::new(0.0, 0.0, 5.0, 5.0)));
        tree.reparent(root, Some(leaf));
        tree.reparent(child, Some(child));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.parent(leaf), Some(child));

        let relayout = tree.commit();
        assert_eq!(relayout.resized, vec![root, child, leaf]);
        assert_eq!(
            tree.frame_in(leaf, Space::Window),
            Some(Rect::new(100.0, 50.0, 105.0, 55.0))
        );
    }

    #[test]
    fn named_space_resolves_through_ancestors() {
        let mut tree = ViewTree::new();
        let space = |x: f64| LocalView {
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            transform: Affine::translate(Vec2::new(x, 0.0)),
            space_name: Some("card"),
        };
        let first = tree.insert(None, space(0.0));
        let second = tree.insert(None, space(500.0));
        let a = tree.insert(Some(first), LocalView::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = tree.insert(Some(second), LocalView::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let outside = tree.insert(None, LocalView::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = tree.commit();

        // Each view is measured against its own enclosing "card".
        let card = Space::Named("card");
        assert_eq!(tree.frame_in(a, card), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tree.frame_in(b, card), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tree.frame_in(outside, card), None);
        // Pointer mapping uses the lowest-slot declaration.
        assert_eq!(tree.to_space(Point::new(505.0, 5.0), card), Some(Point::new(505.0, 5.0)));
    }
}
