use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for m in InterpolationMethod::ALL {
        assert_eq!(m.as_str().parse::<InterpolationMethod>().unwrap(), m);
    }
}

#[test]
fn aliases_are_case_insensitive() {
    assert_eq!(
        " Nearest-Exact ".parse::<InterpolationMethod>().unwrap(),
        InterpolationMethod::NearestExact
    );
    assert_eq!(
        "LANCZOS4".parse::<InterpolationMethod>().unwrap(),
        InterpolationMethod::Lanczos
    );
}

#[test]
fn resolve_reports_unknown_method() {
    let err = resolve("hermite").unwrap_err();
    assert!(matches!(err, FitError::UnknownMethod(_)));
    assert!(err.to_string().contains("hermite"));
}

#[test]
fn only_linear_and_cubic_carry_align_corners() {
    let flags: Vec<bool> = InterpolationMethod::ALL
        .iter()
        .map(|m| m.kernel().supports_align_corners)
        .collect();
    assert_eq!(flags, vec![false, true, false, true, false]);
    assert_eq!(resolve("area").unwrap().kernel_id, KernelId::Box);
}

#[test]
fn resolve_or_default_falls_back_to_bilinear() {
    assert_eq!(resolve_or_default("nope"), InterpolationMethod::Bilinear);
    assert_eq!(resolve_or_default("bicubic"), InterpolationMethod::Bicubic);
}

#[test]
fn serde_uses_snake_case() {
    let json = serde_json::to_string(&InterpolationMethod::NearestExact).unwrap();
    assert_eq!(json, "\"nearest_exact\"");
    let m: InterpolationMethod = serde_json::from_str("\"bicubic\"").unwrap();
    assert_eq!(m, InterpolationMethod::Bicubic);
}
