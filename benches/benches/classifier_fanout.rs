// Copyright 2025 the Drag Observer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use drag_observer::classifier::PhaseClassifier;
use drag_observer::publisher::GesturePublisher;
use drag_observer::types::{CoordinateSpace, DragEvent, DragSample, PhaseSet, ViewRect};
use kurbo::{Point, Rect};

fn gen_grid_frames(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

/// A diagonal sweep across the grid, `steps` samples long.
fn gen_sweep(steps: usize, extent: f64) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point::new(t * extent, t * extent)
        })
        .collect()
}

fn publisher_with_grid(frames: &[Rect], phases: PhaseSet) -> GesturePublisher<u64> {
    let mut publisher = GesturePublisher::new(CoordinateSpace::Global);
    for frame in frames {
        let id = publisher.on_drag_phase(phases, |hits: &mut u64, _| *hits += 1);
        publisher.measure(id, *frame);
    }
    publisher
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    let path = gen_sweep(1000, 500.0);
    let frame = ViewRect {
        rect: Rect::new(100.0, 100.0, 300.0, 300.0),
        space: CoordinateSpace::Global,
    };
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("single_view_sweep", |b| {
        b.iter_batched(
            || {
                let mut classifier = PhaseClassifier::new(PhaseSet::all());
                classifier.set_frame(Some(frame));
                classifier
            },
            |mut classifier| {
                let sample = |location| DragSample {
                    location,
                    start_location: path[0],
                    coordinate_space: CoordinateSpace::Global,
                };
                let mut emitted = 0_usize;
                for &pt in &path {
                    let _ = classifier.update_with(&DragEvent::Changed(sample(pt)), |_| emitted += 1);
                }
                let last = sample(path[path.len() - 1]);
                let _ = classifier.update_with(&DragEvent::Ended(last), |_| emitted += 1);
                black_box(emitted);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");
    for &n in &[4_usize, 10, 32] {
        let frames = gen_grid_frames(n, 15.0);
        let path = gen_sweep(1000, n as f64 * 15.0);
        group.throughput(Throughput::Elements((n * n * path.len()) as u64));
        for (name, phases) in [
            ("all_phases", PhaseSet::all()),
            ("crossings_only", PhaseSet::ENTER | PhaseSet::EXIT),
        ] {
            group.bench_function(format!("{name}_n{}", n * n), |b| {
                b.iter_batched(
                    || publisher_with_grid(&frames, phases),
                    |mut publisher| {
                        let mut hits = 0_u64;
                        let _ = publisher.pointer_down(path[0], &mut hits);
                        for &pt in &path[1..] {
                            let _ = publisher.pointer_move(pt, &mut hits);
                        }
                        let _ = publisher.pointer_up(path[path.len() - 1], &mut hits);
                        black_box(hits);
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_classifier, bench_fanout);
criterion_main!(benches);
