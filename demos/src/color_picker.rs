// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paged color picker.
//!
//! Pressing anywhere on the page pops up a row of page buttons just above or below the finger.
//! Sliding onto a button highlights it, and releasing on it switches to that page. Releasing
//! anywhere dismisses the row.
//!
//! All geometry is expressed in the `"page"` coordinate space, which starts below the window's
//! top inset.

use drag_observer::types::{CoordinateSpace, DragPhase, PhaseSet};
use drag_observer_view_tree::{LocalView, Relayout, Space, ViewId};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::Scene;

/// Name of the page's coordinate space.
pub const PAGE_SPACE: &str = "page";

const BUTTON: f64 = 44.0;
const SPACING: f64 = 20.0;
const INSET: f64 = 40.0;

/// A page of the picker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    /// Page "1".
    #[default]
    Red,
    /// Page "2".
    Orange,
    /// Page "3".
    Yellow,
    /// Page "4".
    Blue,
    /// Page "5".
    Indigo,
}

impl Page {
    /// Every page, in order.
    pub const ALL: [Self; 5] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Blue,
        Self::Indigo,
    ];

    /// Display name: the 1-based page number.
    pub fn name(self) -> String {
        (self as usize + 1).to_string()
    }

    /// Page color as RGB.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (255, 59, 48),
            Self::Orange => (255, 149, 0),
            Self::Yellow => (255, 204, 0),
            Self::Blue => (0, 122, 255),
            Self::Indigo => (88, 86, 214),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
        }
    }
}

/// Everything the picker renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerState {
    /// The page currently shown.
    pub selected: Page,
    /// Whether the picker row is shown.
    pub presented: bool,
    /// Vertical offset of the picker row from the page center.
    pub offset_y: f64,
    /// Highlight per picker button, indexed like [`Page::ALL`].
    pub highlighted: [bool; 5],
    page_height: f64,
}

/// The picker scene and its state.
#[derive(Debug)]
pub struct ColorPicker {
    scene: Scene<PickerState>,
    state: PickerState,
    window: Rect,
    top_inset: f64,
    page: ViewId,
    picker: ViewId,
}

impl ColorPicker {
    /// Build the picker for `window` with a safe-area `top_inset` and run the first layout pass.
    pub fn new(window: Rect, top_inset: f64) -> Self {
        let mut scene: Scene<PickerState> = Scene::new(CoordinateSpace::Named(PAGE_SPACE));
        let page = scene.tree.insert(
            None,
            LocalView {
                space_name: Some(PAGE_SPACE),
                ..Default::default()
            },
        );
        let picker = scene.tree.insert(Some(page), LocalView::default());
        scene.observe(picker, PhaseSet::DOWN | PhaseSet::UP, |s, e| {
            if e.phase == DragPhase::Down {
                // Pop up just past the finger, on the side nearer the page center.
                let picker_height = e.frame.size().height;
                let y = e.sample.start_location.y - s.page_height / 2.0;
                s.offset_y = if y < 0.0 {
                    y + picker_height
                } else {
                    y - picker_height
                };
            }
            s.presented = e.phase == DragPhase::Down;
        });

        for (i, page_value) in Page::ALL.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss, reason = "five buttons.")]
            let x = INSET + i as f64 * (BUTTON + SPACING);
            let button = scene.tree.insert(
                Some(picker),
                LocalView {
                    bounds: Rect::new(0.0, 0.0, BUTTON, BUTTON),
                    transform: Affine::translate(Vec2::new(x, 0.0)),
                    ..Default::default()
                },
            );
            scene.observe(button, PhaseSet::all(), move |s, e| {
                if e.phase == DragPhase::UpInside {
                    s.selected = page_value;
                }
                match e.phase {
                    DragPhase::DownInside | DragPhase::MoveInside => s.highlighted[i] = true,
                    DragPhase::MoveOutside | DragPhase::Up => s.highlighted[i] = false,
                    _ => {}
                }
            });
        }

        let mut picker_app = Self {
            scene,
            state: PickerState::default(),
            window,
            top_inset,
            page,
            picker,
        };
        picker_app.reconcile();
        picker_app
    }

    /// Current state.
    pub fn state(&self) -> &PickerState {
        &self.state
    }

    /// Frame of the picker row in the page space.
    pub fn picker_frame(&self) -> Option<Rect> {
        self.scene
            .tree
            .frame_in(self.picker, Space::Named(PAGE_SPACE))
    }

    /// Window-space center of the button for `page`, as last laid out.
    pub fn button_center(&self, page: Page) -> Option<Point> {
        let picker = self.scene.tree.frame_in(self.picker, Space::Window)?;
        #[allow(clippy::cast_precision_loss, reason = "five buttons.")]
        let x = INSET + page as usize as f64 * (BUTTON + SPACING) + BUTTON / 2.0;
        Some(Point::new(picker.x0 + x, picker.center().y))
    }

    /// Press at `pt` (window coordinates).
    pub fn pointer_down(&mut self, pt: Point) {
        let _ = self.scene.publisher.pointer_down(pt, &mut self.state);
        self.reconcile();
    }

    /// Drag to `pt`.
    pub fn pointer_move(&mut self, pt: Point) {
        let _ = self.scene.publisher.pointer_move(pt, &mut self.state);
        self.reconcile();
    }

    /// Release at `pt`.
    pub fn pointer_up(&mut self, pt: Point) {
        let _ = self.scene.publisher.pointer_up(pt, &mut self.state);
        self.reconcile();
    }

    fn picker_width() -> f64 {
        #[allow(clippy::cast_precision_loss, reason = "five buttons.")]
        let n = Page::ALL.len() as f64;
        2.0 * INSET + n * BUTTON + (n - 1.0) * SPACING
    }

    fn layout(&mut self) {
        let page_size = Rect::new(
            0.0,
            0.0,
            self.window.width(),
            self.window.height() - self.top_inset,
        );
        self.state.page_height = page_size.height();
        let tree = &mut self.scene.tree;
        tree.set_local_bounds(self.page, page_size);
        tree.set_local_transform(
            self.page,
            Affine::translate(Vec2::new(self.window.x0, self.window.y0 + self.top_inset)),
        );
        let width = Self::picker_width();
        tree.set_local_bounds(self.picker, Rect::new(0.0, 0.0, width, BUTTON));
        tree.set_local_transform(
            self.picker,
            Affine::translate(Vec2::new(
                (page_size.width() - width) / 2.0,
                (page_size.height() - BUTTON) / 2.0 + self.state.offset_y,
            )),
        );
    }

    fn reconcile(&mut self) -> Relayout {
        self.layout();
        self.scene.reconcile()
    }

    /// Render the picker as text.
    pub fn render(&self) -> String {
        let selected = self.state.selected;
        let (r, g, b) = selected.color();
        let mut out = format!(
            "page {} ({}, #{r:02x}{g:02x}{b:02x})\n",
            selected.name(),
            selected.label()
        );
        if self.state.presented {
            out.push_str(&format!("picker @ {:+.0}: ", self.state.offset_y));
            for (i, page) in Page::ALL.into_iter().enumerate() {
                let name = page.name();
                if self.state.highlighted[i] {
                    out.push_str(&format!("({name}) "));
                } else if page == selected {
                    out.push_str(&format!("[{name}] "));
                } else {
                    out.push_str(&format!(" {name}  "));
                }
            }
            out.push('\n');
        } else {
            out.push_str("picker hidden\n");
        }
        out
    }
}
