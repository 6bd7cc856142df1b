use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mascot_viewer::animation::AnimationController;
use mascot_viewer::config::FallbackConfig;
use mascot_viewer::model::fallback::build_fallback;
use mascot_viewer::model::ModelHandle;

fn bench_fallback_construction(c: &mut Criterion) {
    let config = FallbackConfig::default();
    c.bench_function("build_fallback", |b| {
        b.iter(|| black_box(build_fallback(black_box(&config))))
    });
}

fn bench_advance(c: &mut Criterion) {
    let handle: ModelHandle = Rc::new(RefCell::new(build_fallback(&FallbackConfig::default())));
    let mut controller = AnimationController::new(handle, 1.0);

    c.bench_function("advance_idle", |b| {
        b.iter(|| {
            controller.advance();
        })
    });

    c.bench_function("advance_pulsing", |b| {
        b.iter(|| {
            controller.trigger_reaction();
            controller.advance();
        })
    });
}

fn bench_world_bounds(c: &mut Criterion) {
    let model = build_fallback(&FallbackConfig::default());
    c.bench_function("model_bounds", |b| {
        b.iter(|| black_box(model.bounds()))
    });
}

criterion_group!(
    benches,
    bench_fallback_construction,
    bench_advance,
    bench_world_bounds
);
criterion_main!(benches);
