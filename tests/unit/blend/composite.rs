use super::*;
use crate::foundation::core::Size;

fn sz(h: u32, w: u32) -> Size {
    Size::new(h, w).unwrap()
}

fn patterned(frames: usize, seed: f32) -> Batch {
    let size = sz(3, 4);
    let data = (0..frames * size.area() * 3)
        .map(|i| ((i as f32 * 0.37 + seed) % 1.0).abs())
        .collect();
    Batch::image(frames, size, 3, data).unwrap()
}

#[test]
fn all_ones_mask_returns_a_exactly() {
    let (a, b) = (patterned(2, 0.1), patterned(2, 0.6));
    let ones = Batch::filled(BatchKind::Mask, 1, sz(3, 4), 1, 1.0).unwrap();
    assert_eq!(blend(&a, &b, &ones).unwrap(), a);
}

#[test]
fn all_zeros_mask_returns_b_exactly() {
    let (a, b) = (patterned(2, 0.1), patterned(2, 0.6));
    let zeros = Batch::filled(BatchKind::Mask, 2, sz(3, 4), 1, 0.0).unwrap();
    assert_eq!(blend(&a, &b, &zeros).unwrap(), b);
}

#[test]
fn single_frame_mask_broadcasts_over_frames_and_channels() {
    let a = Batch::filled(BatchKind::Image, 3, sz(1, 2), 4, 1.0).unwrap();
    let b = Batch::filled(BatchKind::Image, 3, sz(1, 2), 4, 0.0).unwrap();
    let mask = Batch::mask(1, sz(1, 2), vec![1.0, 0.25]).unwrap();
    let out = blend(&a, &b, &mask).unwrap();
    for f in 0..3 {
        assert_eq!(out.pixel(f, 0, 0).unwrap(), &[1.0; 4]);
        assert_eq!(out.pixel(f, 0, 1).unwrap(), &[0.25; 4]);
    }
}

#[test]
fn per_frame_mask_is_applied_frame_by_frame() {
    let a = Batch::filled(BatchKind::Image, 2, sz(1, 1), 3, 1.0).unwrap();
    let b = Batch::filled(BatchKind::Image, 2, sz(1, 1), 3, 0.0).unwrap();
    let mask = Batch::mask(2, sz(1, 1), vec![0.0, 1.0]).unwrap();
    let out = blend(&a, &b, &mask).unwrap();
    assert_eq!(out.pixel(0, 0, 0).unwrap(), &[0.0; 3]);
    assert_eq!(out.pixel(1, 0, 0).unwrap(), &[1.0; 3]);
}

#[test]
fn mismatched_shapes_are_rejected() {
    let a = patterned(2, 0.1);
    let mask = Batch::filled(BatchKind::Mask, 1, sz(3, 4), 1, 1.0).unwrap();

    assert!(matches!(
        blend(&a, &patterned(1, 0.2), &mask),
        Err(FitError::ShapeMismatch(_))
    ));

    let wrong_size = Batch::filled(BatchKind::Mask, 1, sz(4, 4), 1, 1.0).unwrap();
    assert!(matches!(
        blend(&a, &a, &wrong_size),
        Err(FitError::ShapeMismatch(_))
    ));

    let wrong_frames = Batch::filled(BatchKind::Mask, 3, sz(3, 4), 1, 1.0).unwrap();
    assert!(matches!(
        blend(&a, &a, &wrong_frames),
        Err(FitError::ShapeMismatch(_))
    ));

    let rgba = Batch::filled(BatchKind::Image, 2, sz(3, 4), 4, 0.0).unwrap();
    assert!(matches!(
        blend(&a, &rgba, &mask),
        Err(FitError::ShapeMismatch(_))
    ));
}
