use super::*;
use crate::batch::model::BatchKind;

fn sz(h: u32, w: u32) -> Size {
    Size::new(h, w).unwrap()
}

fn ones(frames: usize, h: u32, w: u32) -> Batch {
    Batch::filled(BatchKind::Image, frames, sz(h, w), 3, 1.0).unwrap()
}

#[test]
fn adaptive_tall_source_is_pillarboxed() {
    let p = plan(sz(100, 50), sz(200, 200), FitPolicy::Adaptive);
    assert_eq!(p.scaled, sz(200, 100));
    assert_eq!((p.offset_y, p.offset_x), (0, 50));
}

#[test]
fn adaptive_fit_places_content_in_center() {
    let out = fit(
        &ones(1, 100, 50),
        sz(200, 200),
        FitPolicy::Adaptive,
        InterpolationMethod::Bilinear,
    )
    .unwrap();
    assert_eq!(out.size(), sz(200, 200));
    assert_eq!(out.get(0, 100, 49, 0), Some(0.0));
    assert_eq!(out.get(0, 100, 50, 0), Some(1.0));
    assert_eq!(out.get(0, 100, 149, 2), Some(1.0));
    assert_eq!(out.get(0, 100, 150, 0), Some(0.0));
}

#[test]
fn crop_wide_source_keeps_center_window() {
    let p = plan(sz(50, 100), sz(100, 100), FitPolicy::Crop);
    assert_eq!(p.scaled, sz(100, 200));
    assert_eq!((p.crop_y, p.crop_x), (0, 50));

    // columns tagged by index survive as the centered window
    let data: Vec<f32> = (0..4 * 8).map(|i| (i % 8) as f32).collect();
    let src = Batch::mask(1, sz(4, 8), data).unwrap();
    let out = fit(&src, sz(4, 4), FitPolicy::Crop, InterpolationMethod::NearestExact).unwrap();
    assert_eq!(out.frame_slice(0).unwrap()[..4], [2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn stretch_ignores_aspect() {
    let p = plan(sz(10, 30), sz(64, 64), FitPolicy::Stretch);
    assert_eq!(p.scaled, sz(64, 64));
    let out = fit(
        &ones(2, 10, 30),
        sz(64, 64),
        FitPolicy::Stretch,
        InterpolationMethod::Area,
    )
    .unwrap();
    assert_eq!(out.frames(), 2);
    assert!(out.data().iter().all(|v| (v - 1.0).abs() < 1e-6));
}

#[test]
fn every_policy_hits_target_size() {
    let sources = [sz(7, 13), sz(100, 50), sz(1, 300), sz(64, 64)];
    let targets = [sz(8, 8), sz(200, 16), sz(16, 200), sz(33, 47)];
    for s in sources {
        let src = ones(1, s.height, s.width);
        for t in targets {
            for policy in FitPolicy::ALL {
                let out = fit(&src, t, policy, InterpolationMethod::NearestExact).unwrap();
                assert_eq!(out.size(), t, "{s} -> {t} via {policy}");
            }
        }
    }
}

#[test]
fn pad_is_an_alias_of_adaptive() {
    let data: Vec<f32> = (0..2 * 9 * 5 * 4).map(|i| (i % 17) as f32 / 17.0).collect();
    let src = Batch::image(2, sz(9, 5), 4, data).unwrap();
    for m in InterpolationMethod::ALL {
        let a = fit(&src, sz(16, 24), FitPolicy::Adaptive, m).unwrap();
        let p = fit(&src, sz(16, 24), FitPolicy::Pad, m).unwrap();
        assert_eq!(a, p);
    }
}

#[test]
fn extreme_aspect_plans_keep_offsets_in_bounds() {
    for (s, t) in [
        (sz(1, 1000), sz(1000, 1)),
        (sz(1000, 1), sz(1, 1000)),
        (sz(3, 7), sz(8192, 8)),
    ] {
        let a = plan(s, t, FitPolicy::Adaptive);
        assert!(a.scaled.fits_within(t));
        assert!(a.offset_y + a.scaled.height <= t.height);
        assert!(a.offset_x + a.scaled.width <= t.width);

        let c = plan(s, t, FitPolicy::Crop);
        assert!(c.scaled.covers(t));
        assert!(c.crop_y + t.height <= c.scaled.height);
        assert!(c.crop_x + t.width <= c.scaled.width);
    }
}

#[test]
fn fit_to_match_requires_equal_frame_counts() {
    let reference = ones(3, 16, 16);
    let err = fit_to_match(
        &reference,
        &ones(2, 8, 8),
        FitPolicy::Stretch,
        InterpolationMethod::Bilinear,
    )
    .unwrap_err();
    assert!(matches!(err, FitError::ShapeMismatch(_)));

    let ok = fit_to_match(
        &reference,
        &ones(3, 8, 8),
        FitPolicy::Crop,
        InterpolationMethod::Bilinear,
    )
    .unwrap();
    assert_eq!(ok.size(), reference.size());
}

#[test]
fn policy_names_parse_with_aliases() {
    assert_eq!("Letterbox".parse::<FitPolicy>().unwrap(), FitPolicy::Adaptive);
    assert_eq!("cover".parse::<FitPolicy>().unwrap(), FitPolicy::Crop);
    assert!(matches!(
        "zoom".parse::<FitPolicy>(),
        Err(FitError::UnknownPolicy(_))
    ));
}
