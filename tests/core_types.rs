use nmsfilter::{overlap, Detection, NmsError, PostProcessConfig, Rect};

#[test]
fn overlap_matches_hand_computed_iou() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(1.0, 1.0, 11.0, 11.0);
    // 81 / (100 + 100 - 81)
    let expected = 81.0f32 / 119.0;
    assert!((overlap(&a, &b) - expected).abs() < 1e-6);
    assert!((overlap(&a, &b) - 0.68).abs() < 0.01);
}

#[test]
fn overlap_is_symmetric() {
    let a = Rect::new(3.0, -20.0, 7.0, 10.0);
    let b = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(overlap(&a, &b), overlap(&b, &a));
}

#[test]
fn contained_rect_overlap_is_area_ratio() {
    let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
    let inner = Rect::new(0.0, 0.0, 5.0, 10.0);
    assert!((overlap(&outer, &inner) - 0.5).abs() < 1e-6);
}

#[test]
fn zero_area_rects_never_overlap() {
    let full = Rect::new(0.0, 0.0, 10.0, 10.0);
    let line = Rect::new(5.0, 0.0, 5.0, 10.0);
    let flat = Rect::new(0.0, 5.0, 10.0, 5.0);
    let point = Rect::new(5.0, 5.0, 5.0, 5.0);
    for degenerate in [line, flat, point] {
        let v = overlap(&full, &degenerate);
        assert!(!v.is_nan());
        assert_eq!(v, 0.0);
        assert_eq!(overlap(&degenerate, &degenerate), 0.0);
    }
    assert_eq!(overlap(&line, &flat), 0.0);
}

#[test]
fn inverted_rect_is_clamped_not_rejected() {
    let inverted = Rect::new(10.0, 10.0, 0.0, 0.0);
    let normal = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(inverted.area(), 0.0);
    assert_eq!(overlap(&inverted, &normal), 0.0);
}

#[test]
fn detection_builders_set_fields() {
    let det = Detection::new(1.0, 2.0, 4.0, 6.0, 0.75).with_class(7);
    assert_eq!(det.rect, Rect::new(1.0, 2.0, 4.0, 6.0));
    assert_eq!(det.score, 0.75);
    assert_eq!(det.class_id, 7);
    assert_eq!(det.area(), 12.0);

    let same = Detection::from_rect(Rect::new(1.0, 2.0, 4.0, 6.0), 0.75, 7);
    assert_eq!(det, same);
}

#[test]
fn rect_scaling_scales_each_axis() {
    let r = Rect::new(10.0, 20.0, 30.0, 40.0).scaled(2.0, 0.5);
    assert_eq!(r, Rect::new(20.0, 10.0, 60.0, 20.0));
}

#[test]
fn error_messages_are_descriptive() {
    let err = NmsError::ShapeMismatch {
        len: 10,
        rows: 3,
        cols: 4,
    };
    assert_eq!(
        err.to_string(),
        "buffer of length 10 does not match shape 3x4"
    );

    let err = PostProcessConfig {
        score_threshold: f32::NAN,
        ..PostProcessConfig::default()
    }
    .validate()
    .err()
    .unwrap();
    assert!(err.to_string().contains("score_threshold"));
}
