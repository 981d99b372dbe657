#![cfg(feature = "rayon")]

use nmsfilter::lowlevel::{suppress_per_class_indices, suppress_per_class_indices_par};
use nmsfilter::{
    suppress, suppress_batch_par, suppress_per_class, suppress_per_class_par, Detection,
    PostProcessConfig, PostProcessor,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_scene(rng: &mut StdRng, count: usize, classes: usize) -> Vec<Detection> {
    (0..count)
        .map(|_| {
            let x1 = rng.random_range(0.0f32..200.0);
            let y1 = rng.random_range(0.0f32..200.0);
            let w = rng.random_range(1.0f32..40.0);
            let h = rng.random_range(1.0f32..40.0);
            let score = rng.random_range(0u32..=20) as f32 / 20.0;
            let class_id = rng.random_range(0..classes);
            Detection::new(x1, y1, x1 + w, y1 + h, score).with_class(class_id)
        })
        .collect()
}

#[test]
fn batch_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(11);
    let batch: Vec<Vec<Detection>> = (0..16).map(|i| make_scene(&mut rng, 10 * i, 4)).collect();

    let par = suppress_batch_par(&batch, 0.5);
    let seq: Vec<Vec<Detection>> = batch.iter().map(|dets| suppress(dets, 0.5)).collect();
    assert_eq!(par, seq);
}

#[test]
fn per_class_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(12);
    for count in [0usize, 1, 25, 150] {
        let dets = make_scene(&mut rng, count, 6);
        assert_eq!(
            suppress_per_class_indices_par(&dets, 0.4),
            suppress_per_class_indices(&dets, 0.4)
        );
        assert_eq!(
            suppress_per_class_par(&dets, 0.4),
            suppress_per_class(&dets, 0.4)
        );
    }
}

#[test]
fn parallel_post_processor_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(13);
    let dets = make_scene(&mut rng, 200, 5);

    let base = PostProcessConfig {
        class_aware: true,
        ..PostProcessConfig::default()
    };
    let seq = PostProcessor::new(5, (640, 640)).with_config(PostProcessConfig {
        parallel: false,
        ..base.clone()
    });
    let par = PostProcessor::new(5, (640, 640)).with_config(PostProcessConfig {
        parallel: true,
        ..base
    });
    assert_eq!(seq.filter(&dets).unwrap(), par.filter(&dets).unwrap());
}
