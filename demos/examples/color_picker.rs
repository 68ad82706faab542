// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted color picker session.
//!
//! Run:
//! - `cargo run -p drag_observer_demos --example color_picker`

use drag_observer_demos::color_picker::{ColorPicker, Page};
use kurbo::{Point, Rect};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut picker = ColorPicker::new(Rect::new(0.0, 0.0, 390.0, 844.0), 44.0);
    println!("{}", picker.render());

    for (press, target) in [
        (Point::new(195.0, 244.0), Page::Yellow),
        (Point::new(120.0, 700.0), Page::Indigo),
    ] {
        log::info!("press at {press:?}");
        picker.pointer_down(press);
        println!("{}", picker.render());

        let Some(over) = picker.button_center(target) else {
            log::error!("picker row was never laid out");
            return;
        };
        log::info!("slide onto page {}", target.name());
        picker.pointer_move(over);
        println!("{}", picker.render());

        picker.pointer_up(over);
        println!("{}", picker.render());
    }

    log::info!("press and release away from the row");
    picker.pointer_down(Point::new(60.0, 120.0));
    picker.pointer_up(Point::new(60.0, 800.0));
    println!("{}", picker.render());
}
