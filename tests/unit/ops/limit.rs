use super::*;

fn sz(h: u32, w: u32) -> Size {
    Size::new(h, w).unwrap()
}

#[test]
fn oversized_landscape_caps_width() {
    // 1000/3000 -> 2048 x floor(2048 / 3) = 682 -> aligned 688
    assert_eq!(limited_size(sz(1000, 3000), 2048, 256).unwrap(), sz(688, 2048));
}

#[test]
fn oversized_portrait_caps_height() {
    assert_eq!(limited_size(sz(4096, 1024), 2048, 256).unwrap(), sz(2048, 512));
}

#[test]
fn undersized_frames_grow_shorter_side() {
    // w >= h: height -> 256, width -> floor(256 * 1.5) = 384
    assert_eq!(limited_size(sz(100, 150), 2048, 256).unwrap(), sz(256, 384));
    assert_eq!(limited_size(sz(150, 100), 2048, 256).unwrap(), sz(384, 256));
}

#[test]
fn in_range_sizes_only_align() {
    assert_eq!(limited_size(sz(300, 501), 2048, 256).unwrap(), sz(304, 504));
    assert_eq!(limited_size(sz(512, 512), 2048, 256).unwrap(), sz(512, 512));
    // one side under min is not enough to grow
    assert_eq!(limited_size(sz(100, 600), 2048, 256).unwrap(), sz(104, 600));
}

#[test]
fn invalid_windows_are_rejected() {
    assert!(matches!(
        limited_size(sz(10, 10), 64, 128),
        Err(FitError::InvalidArgument(_))
    ));
    assert!(matches!(
        limited_size(sz(10, 10), 4, 4),
        Err(FitError::InvalidArgument(_))
    ));
}

#[test]
fn missing_mask_becomes_all_ones() {
    let image = Batch::filled(BatchKind::Image, 2, sz(20, 30), 3, 0.5).unwrap();
    let opts = LimitOptions {
        max_side: 64,
        min_side: 32,
        ..LimitOptions::default()
    };
    let out = limit_size(&image, None, &opts).unwrap();
    assert_eq!(out.original, sz(20, 30));
    assert_eq!(out.resized, sz(32, 48));
    assert_eq!(out.image.size(), out.resized);
    assert_eq!(out.mask.kind(), BatchKind::Mask);
    assert_eq!(out.mask.frames(), 2);
    assert!(out.mask.data().iter().all(|v| *v == 1.0));
}

#[test]
fn mask_stays_binary_after_resize() {
    let image = Batch::filled(BatchKind::Image, 1, sz(4, 4), 3, 0.5).unwrap();
    let mut data = vec![0.0; 16];
    data[..8].fill(1.0);
    let mask = Batch::mask(1, sz(4, 4), data).unwrap();
    let opts = LimitOptions {
        max_side: 64,
        min_side: 16,
        method: InterpolationMethod::Bicubic,
    };
    let out = limit_size(&image, Some(&mask), &opts).unwrap();
    assert_eq!(out.resized, sz(16, 16));
    assert!(out.mask.data().iter().all(|v| *v == 0.0 || *v == 1.0));
    assert_eq!(out.mask.get(0, 0, 0, 0), Some(1.0));
    assert_eq!(out.mask.get(0, 15, 0, 0), Some(0.0));
}

#[test]
fn unchanged_size_passes_through() {
    let image = Batch::filled(BatchKind::Image, 1, sz(64, 64), 3, 0.25).unwrap();
    let opts = LimitOptions {
        max_side: 128,
        min_side: 32,
        ..LimitOptions::default()
    };
    let out = limit_size(&image, None, &opts).unwrap();
    assert_eq!(out.image, image);
    assert_eq!(out.resized, out.original);
}

#[test]
fn mismatched_mask_is_rejected() {
    let image = Batch::filled(BatchKind::Image, 1, sz(8, 8), 3, 0.0).unwrap();
    let mask = Batch::filled(BatchKind::Mask, 1, sz(8, 16), 1, 1.0).unwrap();
    assert!(matches!(
        limit_size(&image, Some(&mask), &LimitOptions::default()),
        Err(FitError::ShapeMismatch(_))
    ));
}
