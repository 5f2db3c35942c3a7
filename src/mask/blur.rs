use crate::{
    batch::model::{Batch, BatchKind},
    foundation::{
        error::{FitError, FitResult},
        math::{default_sigma_for_radius, gaussian_kernel},
    },
};

/// Separable Gaussian blur of every frame of a mask, kernel size `2 * radius + 1`.
///
/// Sigma follows the usual size-derived default; borders mirror without repeating the edge
/// sample. Output stays in `[0, 1]` for inputs in `[0, 1]`.
pub fn blur_mask(mask: &Batch, radius: u32) -> FitResult<Batch> {
    if mask.kind() != BatchKind::Mask {
        return Err(FitError::invalid_argument("blur_mask expects a mask batch"));
    }
    if radius == 0 {
        return Ok(mask.clone());
    }

    let kernel = gaussian_kernel(radius, default_sigma_for_radius(radius))?;
    let (w, h) = (mask.width(), mask.height());
    let mut out = mask.clone();
    let mut tmp = vec![0.0f32; w * h];
    let frame_len = mask.frame_len();

    for f in 0..mask.frames() {
        let src = mask.frame_slice(f)?;
        horizontal_pass(src, &mut tmp, w, h, &kernel);
        let dst = &mut out.data_mut()[f * frame_len..(f + 1) * frame_len];
        vertical_pass(&tmp, dst, w, h, &kernel);
        for v in dst.iter_mut() {
            *v = v.clamp(0.0, 1.0);
        }
    }
    Ok(out)
}

fn reflect101(i: i64, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as i64;
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}

fn horizontal_pass(src: &[f32], dst: &mut [f32], w: usize, h: usize, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = reflect101(x as i64 + ki as i64 - radius, w);
                acc += kw * src[y * w + sx];
            }
            dst[y * w + x] = acc;
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [f32], w: usize, h: usize, k: &[f32]) {
    let radius = (k.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = reflect101(y as i64 + ki as i64 - radius, h);
                acc += kw * src[sy * w + x];
            }
            dst[y * w + x] = acc;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/blur.rs"]
mod tests;
