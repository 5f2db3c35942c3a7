use crate::foundation::error::{FitError, FitResult};

/// `count` evenly spaced samples over `[start, end]`, inclusive of both ends.
///
/// A single sample yields `[start]`.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // pin the last sample so it never drifts past `end`
            out[n - 1] = end;
            out
        }
    }
}

/// Gaussian sigma used for a `2 * radius + 1` tap kernel when none is given explicitly.
pub(crate) fn default_sigma_for_radius(radius: u32) -> f64 {
    0.3 * (f64::from(radius) - 1.0) + 0.8
}

/// Normalized Gaussian weights for taps `-radius..=radius`.
pub(crate) fn gaussian_kernel(radius: u32, sigma: f64) -> FitResult<Vec<f32>> {
    if radius == 0 {
        return Ok(vec![1.0]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FitError::invalid_argument("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(FitError::invalid_argument("gaussian kernel sum is zero"));
    }
    Ok(weights.into_iter().map(|w| (w / sum) as f32).collect())
}

/// Floor division of a possibly negative difference, clamped to `>= 0`.
pub(crate) fn centered_offset(outer: u32, inner: u32) -> u32 {
    let diff = i64::from(outer) - i64::from(inner);
    diff.div_euclid(2).max(0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
