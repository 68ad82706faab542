// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calculator-style button grid.
//!
//! A "Click me" label lights up while pressed. Digit buttons highlight while the pointer is
//! down on them (or dragged back onto them) and write their digit to the display when the
//! drag is released on top of them. Dragging off a button cancels it.

use drag_observer::types::{CoordinateSpace, DragPhase, PhaseSet};
use drag_observer_view_tree::{LocalView, Relayout, Space, ViewId};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::Scene;

const BUTTON: f64 = 70.0;
const PADDING: f64 = 7.0;
const CELL: f64 = BUTTON + 2.0 * PADDING;
const GRID_TOP: f64 = 220.0;
const LABEL: Rect = Rect::new(0.0, 0.0, 100.0, 40.0);
const HEIGHT: f64 = 700.0;

/// Everything the calculator renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorState {
    /// Text shown in the display.
    pub display: String,
    /// Whether the "Click me" label is pressed.
    pub label_pressed: bool,
    /// Highlight per digit button, indexed by digit.
    pub highlighted: [bool; 10],
}

/// The calculator scene and its state.
#[derive(Debug)]
pub struct Calculator {
    scene: Scene<CalculatorState>,
    state: CalculatorState,
    width: f64,
    root: ViewId,
    label: ViewId,
    buttons: [ViewId; 10],
}

impl Calculator {
    /// Build the calculator for a window `width` wide and run the first layout pass.
    pub fn new(width: f64) -> Self {
        let mut scene: Scene<CalculatorState> = Scene::new(CoordinateSpace::Global);
        let root = scene.tree.insert(
            None,
            LocalView::with_bounds(Rect::new(0.0, 0.0, width, HEIGHT)),
        );
        let label = scene.tree.insert(Some(root), LocalView::with_bounds(LABEL));
        scene.observe(label, PhaseSet::DOWN_INSIDE | PhaseSet::UP, |s, e| {
            s.label_pressed = e.phase == DragPhase::DownInside;
        });

        let buttons: [ViewId; 10] = core::array::from_fn(|digit| {
            let view = scene.tree.insert(
                Some(root),
                LocalView::with_bounds(Rect::new(0.0, 0.0, BUTTON, BUTTON)),
            );
            let phases = PhaseSet::DOWN_INSIDE
                | PhaseSet::UP
                | PhaseSet::UP_INSIDE
                | PhaseSet::ENTER
                | PhaseSet::EXIT;
            scene.observe(view, phases, move |s, e| match e.phase {
                DragPhase::DownInside | DragPhase::Enter => s.highlighted[digit] = true,
                DragPhase::Up | DragPhase::Exit => s.highlighted[digit] = false,
                DragPhase::UpInside => s.display = digit.to_string(),
                _ => {}
            });
            view
        });

        let mut calculator = Self {
            scene,
            state: CalculatorState {
                display: "0".to_owned(),
                ..CalculatorState::default()
            },
            width,
            root,
            label,
            buttons,
        };
        calculator.reconcile();
        calculator
    }

    /// Current state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Resize the window; the grid stays centered.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.reconcile();
    }

    /// Window-space frame of a digit button, as last laid out.
    pub fn button_frame(&self, digit: usize) -> Option<Rect> {
        let view = *self.buttons.get(digit)?;
        self.scene.tree.frame_in(view, Space::Window)
    }

    /// Window-space center of a digit button.
    pub fn button_center(&self, digit: usize) -> Option<Point> {
        self.button_frame(digit).map(|r| r.center())
    }

    /// Window-space center of the "Click me" label.
    pub fn label_center(&self) -> Option<Point> {
        self.scene
            .tree
            .frame_in(self.label, Space::Window)
            .map(|r| r.center())
    }

    /// Press at `pt`.
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

    fn layout(&mut self) {
        let tree = &mut self.scene.tree;
        tree.set_local_bounds(self.root, Rect::new(0.0, 0.0, self.width, HEIGHT));
        tree.set_local_transform(
            self.label,
            Affine::translate(Vec2::new((self.width - LABEL.width()) / 2.0, 10.0)),
        );
        let grid_left = (self.width - 3.0 * CELL) / 2.0;
        for (digit, view) in self.buttons.iter().enumerate() {
            let (row, col) = grid_cell(digit);
            tree.set_local_transform(
                *view,
                Affine::translate(Vec2::new(
                    grid_left + col * CELL + PADDING,
                    GRID_TOP + row * CELL + PADDING,
                )),
            );
        }
    }

    fn reconcile(&mut self) -> Relayout {
        self.layout();
        self.scene.reconcile()
    }

    /// Render the calculator as text.
    pub fn render(&self) -> String {
        let mut out = format!(
            "[{:>12}]  {}\n",
            self.state.display,
            if self.state.label_pressed {
                "*Click me*"
            } else {
                " Click me "
            }
        );
        for row in [[7, 8, 9], [4, 5, 6], [1, 2, 3]] {
            for digit in row {
                out.push_str(&self.key(digit));
            }
            out.push('\n');
        }
        out.push_str("    ");
        out.push_str(&self.key(0));
        out.push('\n');
        out
    }

    fn key(&self, digit: usize) -> String {
        if self.state.highlighted[digit] {
            format!("({digit}) ")
        } else {
            format!(" {digit}  ")
        }
    }
}

/// Row and column of a digit in the keypad, top row first: 7 8 9 / 4 5 6 / 1 2 3 / _ 0 _.
fn grid_cell(digit: usize) -> (f64, f64) {
    if digit == 0 {
        return (3.0, 1.0);
    }
    let i = digit - 1;
    ((2 - i / 3) as f64, (i % 3) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(calc: &mut Calculator, pt: Point) {
        calc.pointer_down(pt);
        calc.pointer_up(pt);
    }

    #[test]
    fn keypad_layout() {
        let calc = Calculator::new(330.0);
        // Grid is 252 wide, centered in 330.
        assert_eq!(
            calc.button_frame(7),
            Some(Rect::new(46.0, 227.0, 116.0, 297.0))
        );
        assert_eq!(
            calc.button_frame(0),
            Some(Rect::new(130.0, 479.0, 200.0, 549.0))
        );
        assert_eq!(calc.state().display, "0");
    }

    #[test]
    fn tap_writes_digit() {
        let mut calc = Calculator::new(330.0);
        let five = calc.button_center(5).unwrap();
        calc.pointer_down(five);
        assert!(calc.state().highlighted[5]);
        calc.pointer_up(five);
        assert!(!calc.state().highlighted[5]);
        assert_eq!(calc.state().display, "5");
    }

    #[test]
    fn drag_off_cancels_and_drag_back_restores() {
        let mut calc = Calculator::new(330.0);
        let five = calc.button_center(5).unwrap();
        let far = Point::new(5.0, 650.0);

        calc.pointer_down(five);
        calc.pointer_move(far);
        assert!(!calc.state().highlighted[5]);
        calc.pointer_move(five);
        assert!(calc.state().highlighted[5]);
        calc.pointer_move(far);
        calc.pointer_up(far);
        assert_eq!(calc.state().display, "0");
        assert_eq!(calc.state().highlighted, [false; 10]);
    }

    // Sliding from one key to another: the release key wins, the first key is released.
    #[test]
    fn slide_between_keys() {
        let mut calc = Calculator::new(330.0);
        let one = calc.button_center(1).unwrap();
        let two = calc.button_center(2).unwrap();
        calc.pointer_down(one);
        calc.pointer_move(two);
        assert!(!calc.state().highlighted[1]);
        assert!(calc.state().highlighted[2]);
        calc.pointer_up(two);
        assert_eq!(calc.state().display, "2");
        assert_eq!(calc.state().highlighted, [false; 10]);
    }

    #[test]
    fn label_tracks_press() {
        let mut calc = Calculator::new(330.0);
        let label = calc.label_center().unwrap();
        calc.pointer_down(label);
        assert!(calc.state().label_pressed);
        assert!(calc.render().contains("*Click me*"));
        calc.pointer_up(Point::new(5.0, 650.0));
        assert!(!calc.state().label_pressed);

        // Pressing elsewhere never presses the label.
        let three = calc.button_center(3).unwrap();
        tap(&mut calc, three);
        assert!(!calc.state().label_pressed);
        assert_eq!(calc.state().display, "3");
    }

    #[test]
    fn resize_recenters_and_remeasures() {
        let mut calc = Calculator::new(330.0);
        let old_center = calc.button_center(7).unwrap();
        calc.set_width(600.0);
        let new_center = calc.button_center(7).unwrap();
        assert_eq!(new_center.x - old_center.x, 135.0);

        // The old position is now empty space.
        tap(&mut calc, old_center);
        assert_eq!(calc.state().display, "0");
        tap(&mut calc, new_center);
        assert_eq!(calc.state().display, "7");
    }

    #[test]
    fn render_marks_highlighted_keys() {
        let mut calc = Calculator::new(330.0);
        calc.pointer_down(calc.button_center(8).unwrap());
        let frame = calc.render();
        assert!(frame.contains("(8)"));
        assert!(frame.contains(" 7  "));
        assert!(frame.starts_with("[           0]"));
    }
}
