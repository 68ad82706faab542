// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: view identifiers, spaces, and local geometry.

use kurbo::{Affine, Rect};

/// Identifier for a view in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ViewId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ViewId`.
///
/// Use [`ViewTree::is_alive`](crate::ViewTree::is_alive) to check whether a `ViewId` still refers to a live view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewId(pub(crate) u32, pub(crate) u32);

impl ViewId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A coordinate space frames can be measured in.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Space {
    /// Window coordinates.
    #[default]
    Window,
    /// The local space of the view declaring this name with [`LocalView::space_name`].
    Named(&'static str),
}

/// Local geometry for a view.
#[derive(Clone, Debug)]
pub struct LocalView {
    /// Local (untransformed) bounds.
    pub bounds: Rect,
    /// Transform relative to the parent's space.
    pub transform: Affine,
    /// Declares this view's local space under a name, so descendants can be measured in it.
    pub space_name: Option<&'static str>,
}

impl Default for LocalView {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            transform: Affine::IDENTITY,
            space_name: None,
        }
    }
}

impl LocalView {
    /// A view with `bounds` and no transform.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }
}
