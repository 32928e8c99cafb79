use nalgebra::DMatrix;
use numseq_core::{RngHandle, SeqError};
use numseq_engine::{
    compose, plan, resize_width, SpacingAnchor, SpacingConfig, SpacingKind, SpacingRange,
};

fn glyph(height: usize, width: usize, value: f32) -> DMatrix<f32> {
    DMatrix::from_element(height, width, value)
}

#[test]
fn exact_plan_passes_through_without_resampling() {
    let mut rng = RngHandle::from_seed(0);
    let glyphs = vec![glyph(4, 6, 0.25), glyph(4, 6, 0.5)];
    // 30 - 12 = 18 over 3 edge slots: gap 6.
    let plan = plan(
        SpacingConfig {
            kind: SpacingKind::Fixed,
            anchor: SpacingAnchor::Edge,
        },
        2,
        SpacingRange::new(0, 10).unwrap(),
        30,
        6,
        &mut rng,
    )
    .unwrap();

    let image = compose(&glyphs, &plan, 30).expect("compose");
    assert_eq!(image.shape(), (4, 30));

    // Gap columns are background white, glyph columns carry glyph values.
    assert!(image.column(0).iter().all(|&v| v == 1.0));
    assert!(image.column(6).iter().all(|&v| v == 0.25));
    assert!(image.column(11).iter().all(|&v| v == 0.25));
    assert!(image.column(12).iter().all(|&v| v == 1.0));
    assert!(image.column(18).iter().all(|&v| v == 0.5));
    assert!(image.column(29).iter().all(|&v| v == 1.0));
}

#[test]
fn exact_width_mismatch_is_an_internal_error() {
    let mut rng = RngHandle::from_seed(0);
    let glyphs = vec![glyph(4, 6, 0.25), glyph(4, 6, 0.5)];
    let plan = plan(
        SpacingConfig {
            kind: SpacingKind::Fixed,
            anchor: SpacingAnchor::Edge,
        },
        2,
        SpacingRange::new(0, 10).unwrap(),
        30,
        6,
        &mut rng,
    )
    .unwrap();

    // Asking the compositor for any other width must never silently resize.
    let err = compose(&glyphs, &plan, 31).expect_err("width drift");
    match err {
        SeqError::InternalConsistency(info) => {
            assert_eq!(info.code, "exact-width-mismatch");
            assert_eq!(info.context.get("assembled").map(String::as_str), Some("30"));
            assert_eq!(info.context.get("target").map(String::as_str), Some("31"));
        }
        other => panic!("expected InternalConsistency, got {other:?}"),
    }
}

#[test]
fn inexact_plan_is_rescaled_to_the_target_width() {
    let mut rng = RngHandle::from_seed(5);
    let glyphs = vec![glyph(3, 8, 0.0), glyph(3, 8, 0.0)];
    let plan = plan(
        SpacingConfig {
            kind: SpacingKind::Variable,
            anchor: SpacingAnchor::Between,
        },
        2,
        SpacingRange::new(0, 30).unwrap(),
        40,
        8,
        &mut rng,
    )
    .unwrap();
    assert!(!plan.is_exact());

    let image = compose(&glyphs, &plan, 40).expect("compose");
    assert_eq!(image.shape(), (3, 40));
}

#[test]
fn plan_glyph_count_mismatch_is_an_internal_error() {
    let mut rng = RngHandle::from_seed(0);
    let plan = plan(
        SpacingConfig {
            kind: SpacingKind::Variable,
            anchor: SpacingAnchor::Edge,
        },
        3,
        SpacingRange::new(0, 5).unwrap(),
        100,
        6,
        &mut rng,
    )
    .unwrap();

    let glyphs = vec![glyph(4, 6, 0.1), glyph(4, 6, 0.2)];
    let err = compose(&glyphs, &plan, 100).expect_err("two glyphs, four slots");
    assert!(matches!(err, SeqError::InternalConsistency(_)));
}

#[test]
fn resize_interpolates_linearly() {
    // Two columns [0, 1] stretched to four: centres map to 0, 0.25, 0.75, 1.
    let image = DMatrix::from_row_slice(1, 2, &[0.0, 1.0]);
    let resized = resize_width(&image, 4);
    assert_eq!(resized.shape(), (1, 4));
    let expected = [0.0, 0.25, 0.75, 1.0];
    for (col, &want) in expected.iter().enumerate() {
        assert!(
            (resized[(0, col)] - want).abs() < 1e-6,
            "column {col}: got {}, want {want}",
            resized[(0, col)]
        );
    }

    // Identity when widths already agree.
    let same = resize_width(&image, 2);
    assert_eq!(same, image);
}

#[test]
fn resize_preserves_constant_images() {
    let image = DMatrix::from_element(5, 9, 0.625f32);
    for target in [3usize, 9, 20] {
        let resized = resize_width(&image, target);
        assert_eq!(resized.shape(), (5, target));
        assert!(resized.iter().all(|&v| (v - 0.625).abs() < 1e-6));
    }
}
