// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag Observer View Tree: a Kurbo-native tree of views for measuring frames.
//!
//! - Represents a hierarchy of views with local bounds and local transforms.
//! - Lets any view declare a named coordinate space for its subtree.
//! - Supports batched updates with a [`ViewTree::commit`] step that reports which views were
//!   resized or moved, so observers know when to re-measure.
//!
//! ## Not a layout engine
//!
//! This crate does not perform layout (measurement or arrangement).
//! Upstream code computes positions and sizes and writes them into the tree as local bounds and
//! transforms. The tree turns them into frames in window space or in any named space.
//!
//! ## Measurement
//!
//! A view is unmeasured until the first [`ViewTree::commit`] after its insertion:
//! [`ViewTree::frame_in`] returns `None` for it. Setters take effect at the next commit.
//!
//! # Example
//!
//! ```
//! use drag_observer_view_tree::{LocalView, Space, ViewTree};
//! use kurbo::{Affine, Rect, Vec2};
//!
//! let mut tree = ViewTree::new();
//! let page = tree.insert(
//!     None,
//!     LocalView {
//!         bounds: Rect::new(0.0, 0.0, 400.0, 800.0),
//!         transform: Affine::translate(Vec2::new(0.0, 20.0)),
//!         space_name: Some("page"),
//!     },
//! );
//! let button = tree.insert(
//!     Some(page),
//!     LocalView {
//!         bounds: Rect::new(0.0, 0.0, 44.0, 44.0),
//!         transform: Affine::translate(Vec2::new(10.0, 10.0)),
//!         ..Default::default()
//!     },
//! );
//! assert_eq!(tree.frame_in(button, Space::Window), None);
//!
//! let relayout = tree.commit();
//! assert!(relayout.resized.contains(&button));
//! assert_eq!(
//!     tree.frame_in(button, Space::Window),
//!     Some(Rect::new(10.0, 30.0, 54.0, 74.0))
//! );
//! assert_eq!(
//!     tree.frame_in(button, Space::Named("page")),
//!     Some(Rect::new(10.0, 10.0, 54.0, 54.0))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Relayout, ViewTree};
pub use types::{LocalView, Space, ViewId};
