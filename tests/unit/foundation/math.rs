use super::*;

#[test]
fn linspace_includes_both_ends() {
    let v = linspace(0.0, 24.0, 10);
    assert_eq!(v.len(), 10);
    assert_eq!(v[0], 0.0);
    assert_eq!(v[9], 24.0);
    assert!((v[1] - 24.0 / 9.0).abs() < 1e-12);
}

#[test]
fn linspace_single_sample_is_start() {
    assert_eq!(linspace(0.0, 9.0, 1), vec![0.0]);
    assert!(linspace(0.0, 9.0, 0).is_empty());
}

#[test]
fn gaussian_kernel_is_normalized_and_symmetric() {
    let k = gaussian_kernel(3, default_sigma_for_radius(3)).unwrap();
    assert_eq!(k.len(), 7);
    let sum: f32 = k.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    for i in 0..3 {
        assert!((k[i] - k[6 - i]).abs() < 1e-7);
    }
    assert!(k[3] > k[2]);
}

#[test]
fn gaussian_kernel_rejects_bad_sigma() {
    assert!(gaussian_kernel(2, 0.0).is_err());
    assert!(gaussian_kernel(2, f64::NAN).is_err());
    assert_eq!(gaussian_kernel(0, 0.0).unwrap(), vec![1.0]);
}

#[test]
fn centered_offset_floors_and_clamps() {
    assert_eq!(centered_offset(200, 100), 50);
    assert_eq!(centered_offset(201, 100), 50);
    assert_eq!(centered_offset(100, 200), 0);
}
