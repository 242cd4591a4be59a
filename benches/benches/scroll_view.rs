// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::FRAC_PI_6;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_event_state::touch::{TouchEvent, TouchId, TouchPhase, TouchSample};
use understory_scroll_view::bounds::{
    adjust_rect_for_pivot, containment_offset, content_bounds, panel_corners, pivot_rect,
};
use understory_scroll_view::{FlatScene, ScrollAxes, ScrollView};

fn bench_bounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_view/bounds");

    let view = Rect::new(0.0, 0.0, 800.0, 600.0);
    let rect = pivot_rect(Size::new(2_000.0, 1_500.0), Vec2::new(0.5, 0.5));
    let transforms = [
        ("identity", Affine::IDENTITY),
        ("rotated", Affine::translate((400.0, 300.0)) * Affine::rotate(FRAC_PI_6)),
    ];

    for (name, parent_to_world) in transforms {
        let world_to_view = parent_to_world.inverse();
        group.bench_function(BenchmarkId::new("refresh", name), |b| {
            b.iter(|| {
                let corners = panel_corners(
                    black_box(Vec2::new(-120.0, 40.0)),
                    black_box(Vec2::new(1.5, 1.5)),
                    rect,
                    parent_to_world,
                );
                let raw = content_bounds(corners, world_to_view);
                black_box(adjust_rect_for_pivot(view, Vec2::new(0.5, 0.5), raw))
            });
        });
    }

    let content = Rect::new(-700.0, -500.0, 1_300.0, 1_000.0);
    group.bench_function("containment_offset", |b| {
        b.iter(|| {
            containment_offset(
                black_box(view),
                black_box(content),
                ScrollAxes::all(),
                black_box(Vec2::new(900.0, -750.0)),
            )
        });
    });

    group.finish();
}

fn scroll_view() -> ScrollView<FlatScene> {
    let scene = FlatScene::new(Size::new(800.0, 600.0), Size::new(4_000.0, 3_000.0));
    let mut view = ScrollView::new(scene);
    view.layout_rebuilt();
    view
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_view/frames");

    for frames in [16usize, 256] {
        group.bench_with_input(BenchmarkId::new("drag", frames), &frames, |b, &frames| {
            b.iter_batched(
                scroll_view,
                |mut view| {
                    let id = TouchId(0);
                    view.on_begin_drag(&TouchEvent::new(id, Point::new(400.0, 300.0)));
                    for i in 0..frames {
                        let step = i as f64;
                        let p = Point::new(400.0 - step * 3.0, 300.0 - step * 2.0);
                        view.on_drag(&TouchEvent::new(id, p).with_delta(Vec2::new(-3.0, -2.0)));
                        view.tick(&[TouchSample::new(id, p, Vec2::new(-3.0, -2.0), TouchPhase::Moved)]);
                    }
                    black_box(view.into_host())
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("pinch", frames), &frames, |b, &frames| {
            b.iter_batched(
                scroll_view,
                |mut view| {
                    let (a, b) = (TouchId(0), TouchId(1));
                    view.on_begin_drag(&TouchEvent::new(a, Point::new(300.0, 300.0)));
                    view.on_begin_drag(&TouchEvent::new(b, Point::new(500.0, 300.0)));
                    for i in 0..frames {
                        // Spread oscillates so the scale stays inside its range.
                        let d = if i % 2 == 0 { 4.0 } else { -4.0 };
                        let offset = if i % 2 == 0 { 4.0 } else { 0.0 };
                        let touches = [
                            TouchSample::new(a, Point::new(300.0 - offset, 300.0), Vec2::new(-d, 0.0), TouchPhase::Moved),
                            TouchSample::new(b, Point::new(500.0 + offset, 300.0), Vec2::new(d, 0.0), TouchPhase::Moved),
                        ];
                        view.tick(&touches);
                    }
                    black_box(view.into_host())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bounds, bench_frames);
criterion_main!(benches);
