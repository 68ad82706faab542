// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted calculator session.
//!
//! Run:
//! - `cargo run -p drag_observer_demos --example calculator`
//! - `RUST_LOG=trace cargo run -p drag_observer_demos --example calculator` to see every phase.

use drag_observer_demos::calculator::Calculator;
use kurbo::Point;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut calc = Calculator::new(330.0);
    println!("{}", calc.render());

    let Some(five) = calc.button_center(5) else {
        log::error!("digit 5 was never laid out");
        return;
    };
    let Some(nine) = calc.button_center(9) else {
        log::error!("digit 9 was never laid out");
        return;
    };
    let outside = Point::new(5.0, 650.0);

    log::info!("press 5");
    calc.pointer_down(five);
    println!("{}", calc.render());

    log::info!("drag off 5");
    calc.pointer_move(outside);
    println!("{}", calc.render());

    log::info!("drag onto 9 and release");
    calc.pointer_move(nine);
    println!("{}", calc.render());
    calc.pointer_up(nine);
    println!("{}", calc.render());

    log::info!("resize to 600 wide and tap 5");
    calc.set_width(600.0);
    if let Some(five) = calc.button_center(5) {
        calc.pointer_down(five);
        calc.pointer_up(five);
    }
    println!("{}", calc.render());
}
