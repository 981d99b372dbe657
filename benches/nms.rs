use criterion::{criterion_group, criterion_main, Criterion};
use nmsfilter::{suppress, suppress_per_class, Detection, PostProcessConfig, PostProcessor};
use std::hint::black_box;

/// Deterministic crowded scene: a grid of clusters, each with jittered copies.
fn make_scene(clusters: usize, per_cluster: usize) -> Vec<Detection> {
    let mut dets = Vec::with_capacity(clusters * per_cluster);
    for c in 0..clusters {
        let cx = (c % 16) as f32 * 40.0;
        let cy = (c / 16) as f32 * 40.0;
        for k in 0..per_cluster {
            let jitter = ((c * 31 + k * 17) % 9) as f32 - 4.0;
            let score = 1.0 - ((c * 7 + k * 13) % 100) as f32 / 100.0;
            dets.push(
                Detection::new(cx + jitter, cy - jitter, cx + 30.0 + jitter, cy + 30.0, score)
                    .with_class(k % 4),
            );
        }
    }
    dets
}

/// Feature-major `(4 + C, N)` head output with mostly low-score anchors.
fn make_head(anchors: usize, classes: usize) -> Vec<f32> {
    let features = 4 + classes;
    let mut data = vec![0.0f32; features * anchors];
    for a in 0..anchors {
        let cx = (a % 80) as f32 * 8.0;
        let cy = (a / 80) as f32 * 8.0;
        data[a] = cx;
        data[anchors + a] = cy;
        data[2 * anchors + a] = 24.0;
        data[3 * anchors + a] = 24.0;
        let class = a % classes;
        data[(4 + class) * anchors + a] = ((a * 37) % 100) as f32 / 100.0;
    }
    data
}

fn bench_suppress(c: &mut Criterion) {
    let small = make_scene(16, 8);
    let large = make_scene(64, 16);

    c.bench_function("suppress_128", |b| {
        b.iter(|| black_box(suppress(black_box(&small), 0.5)));
    });
    c.bench_function("suppress_1024", |b| {
        b.iter(|| black_box(suppress(black_box(&large), 0.5)));
    });
    c.bench_function("suppress_per_class_1024", |b| {
        b.iter(|| black_box(suppress_per_class(black_box(&large), 0.5)));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let anchors = 8400;
    let classes = 80;
    let head = make_head(anchors, classes);
    let pp = PostProcessor::new(classes, (640, 640)).with_config(PostProcessConfig {
        class_aware: true,
        max_detections: Some(300),
        ..PostProcessConfig::default()
    });

    c.bench_function("post_process_8400x80", |b| {
        b.iter(|| black_box(pp.process(&head, (4 + classes, anchors), (1920, 1080)).unwrap()));
    });
}

criterion_group!(benches, bench_suppress, bench_pipeline);
criterion_main!(benches);
