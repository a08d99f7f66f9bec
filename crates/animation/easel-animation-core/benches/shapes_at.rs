//! Snapshot and export throughput.
//!
//! Run with: `cargo bench --bench shapes_at`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use easel_animation_core::{
    export_svg, export_text, AnimationModel, AnimationView, Color, Config, Point, Shape,
};

fn build_model(shapes: usize, keyframes: usize) -> AnimationModel {
    let mut model = AnimationModel::new();
    for s in 0..shapes {
        let name = format!("S{s}");
        for k in 0..keyframes {
            let x = (k * 10 + s) as f64;
            let shape = if s % 2 == 0 {
                Shape::rectangle(Point::new(x, x), 20.0, 10.0, Color::rgb(200, 0, 0))
            } else {
                Shape::ellipse(Point::new(x, x), 5.0, 5.0, Color::rgb(0, 0, (k % 256) as u8))
            };
            model
                .create_keyframe(&name, shape, k as f64)
                .expect("bench keyframe");
        }
    }
    model
}

fn bench_shapes_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("shapes_at");
    for (shapes, keyframes) in [(10, 10), (100, 50), (1000, 100)] {
        let model = build_model(shapes, keyframes);
        let mid = keyframes as f64 / 2.0 + 0.5;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{shapes}x{keyframes}")),
            &model,
            |bench, model| {
                bench.iter(|| black_box(model.shapes_at(black_box(mid)).expect("snapshot")));
            },
        );
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let model = build_model(100, 50);
    let config = Config::default();
    c.bench_function("export_text_100x50", |b| {
        b.iter(|| black_box(export_text(&model)))
    });
    c.bench_function("export_svg_100x50", |b| {
        b.iter(|| black_box(export_svg(&model, &config).expect("svg")))
    });
}

criterion_group!(benches, bench_shapes_at, bench_export);
criterion_main!(benches);
