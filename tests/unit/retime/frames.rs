use super::*;
use crate::foundation::core::Size;

/// Mask batch where every pixel of frame `i` holds `i`.
fn counting(frames: usize) -> Batch {
    let size = Size::new(2, 3).unwrap();
    let data = (0..frames)
        .flat_map(|f| std::iter::repeat_n(f as f32, size.area()))
        .collect();
    Batch::mask(frames, size, data).unwrap()
}

fn frame_value(b: &Batch, f: usize) -> f32 {
    b.frame_slice(f).unwrap()[0]
}

#[test]
fn retime_hits_requested_count() {
    let src = counting(7);
    for n in 1..20 {
        assert_eq!(retime(&src, n).unwrap().frames(), n);
    }
}

#[test]
fn retime_same_count_is_unchanged() {
    let src = counting(5);
    assert_eq!(retime(&src, 5).unwrap(), src);
}

#[test]
fn retime_to_one_frame_is_first_frame() {
    let src = counting(9);
    let out = retime(&src, 1).unwrap();
    assert_eq!(out.data(), src.frame_slice(0).unwrap());
}

#[test]
fn retime_rejects_zero() {
    assert!(matches!(
        retime(&counting(3), 0),
        Err(FitError::InvalidArgument(_))
    ));
}

#[test]
fn retime_downsample_25_to_10_follows_linspace() {
    let src = counting(25);
    let out = retime(&src, 10).unwrap();
    // sample points are i * 24 / 9
    for i in 0..10 {
        let expected = i as f32 * 24.0 / 9.0;
        assert!(
            (frame_value(&out, i) - expected).abs() < 1e-4,
            "frame {i}: {} vs {expected}",
            frame_value(&out, i)
        );
    }
    assert_eq!(frame_value(&out, 0), 0.0);
    assert_eq!(frame_value(&out, 9), 24.0);
}

#[test]
fn retime_upsample_blends_neighbours() {
    let src = counting(2);
    let out = retime(&src, 5).unwrap();
    let values: Vec<f32> = (0..5).map(|i| frame_value(&out, i)).collect();
    assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn frame_adapt_counts() {
    assert_eq!(target_frame_count(10, 25, FrameAdapt::Shorter), 10);
    assert_eq!(target_frame_count(10, 25, FrameAdapt::Longer), 25);
    assert_eq!(target_frame_count(10, 25, FrameAdapt::Average), 17);
    assert_eq!(target_frame_count(1, 0, FrameAdapt::Average), 1);
    assert_eq!("MEAN".parse::<FrameAdapt>().unwrap(), FrameAdapt::Average);
    assert!("sometimes".parse::<FrameAdapt>().is_err());
}

#[test]
fn extract_first_and_last() {
    let src = counting(4);
    assert_eq!(frame_value(&extract_frame(&src, FramePick::First).unwrap(), 0), 0.0);
    let last = extract_frame(&src, FramePick::Last).unwrap();
    assert_eq!(last.frames(), 1);
    assert_eq!(frame_value(&last, 0), 3.0);
}

#[test]
fn hold_frames_rounds_total() {
    let still = counting(2);
    let clip = hold_frames(&still, 1.0, 29.97).unwrap();
    assert_eq!(clip.total_frames, 30);
    assert_eq!(clip.frames.frames(), 30);
    assert!((clip.actual_duration_secs - 30.0 / 29.97).abs() < 1e-12);
    assert!((0..30).all(|f| frame_value(&clip.frames, f) == 0.0));
}

#[test]
fn hold_frames_validates_ranges() {
    let still = counting(1);
    assert!(hold_frames(&still, 0.0, 30.0).is_err());
    assert!(hold_frames(&still, 5.0, 0.5).is_err());
    assert!(hold_frames(&still, 301.0, 30.0).is_err());
}
