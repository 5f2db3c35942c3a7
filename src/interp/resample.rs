//! Separable resampler shared by every fit policy.
//!
//! Each axis gets a precomputed tap table (source index and weight per output sample),
//! built once per call and reused for every frame and channel. Frames are resampled
//! horizontally into one scratch buffer and then vertically into the output, so at most
//! the source, one intermediate and the output are alive at a time.

use crate::{
    batch::model::Batch,
    foundation::{core::Size, error::FitResult},
    interp::policy::{InterpolationMethod, KernelId},
};

const CUBIC_A: f64 = -0.75;
const LANCZOS_A: i64 = 4;

/// Tap table for one axis.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AxisTaps {
    spans: Vec<(usize, usize)>,
    index: Vec<usize>,
    weight: Vec<f32>,
    identity: bool,
}

impl AxisTaps {
    pub(crate) fn new(kernel: KernelId, in_len: usize, out_len: usize) -> Self {
        let mut taps = Self {
            spans: Vec::with_capacity(out_len),
            index: Vec::new(),
            weight: Vec::new(),
            identity: in_len == out_len,
        };
        if taps.identity {
            for o in 0..out_len {
                taps.push(&[(o, 1.0)]);
            }
            return taps;
        }

        let scale = in_len as f64 / out_len as f64;
        let last = in_len - 1;
        let mut scratch: Vec<(usize, f64)> = Vec::with_capacity(8);
        for o in 0..out_len {
            scratch.clear();
            match kernel {
                KernelId::Nearest => {
                    let src = (((o as f64) + 0.5) * scale).floor() as usize;
                    scratch.push((src.min(last), 1.0));
                }
                KernelId::Linear => {
                    let real = (((o as f64) + 0.5) * scale - 0.5).max(0.0);
                    let i0 = (real.floor() as usize).min(last);
                    let i1 = (i0 + 1).min(last);
                    let l = (real - i0 as f64).clamp(0.0, 1.0);
                    scratch.push((i0, 1.0 - l));
                    scratch.push((i1, l));
                }
                KernelId::Box => {
                    let start = o * in_len / out_len;
                    let end = ((o + 1) * in_len).div_ceil(out_len).min(in_len);
                    let n = (end - start).max(1);
                    for i in start..start + n {
                        scratch.push((i.min(last), 1.0 / n as f64));
                    }
                }
                KernelId::Cubic => {
                    let real = ((o as f64) + 0.5) * scale - 0.5;
                    let base = real.floor();
                    let t = real - base;
                    let base = base as i64;
                    let w = [
                        cubic_outer(t + 1.0),
                        cubic_inner(t),
                        cubic_inner(1.0 - t),
                        cubic_outer(2.0 - t),
                    ];
                    for (k, wk) in w.into_iter().enumerate() {
                        scratch.push((clamp_index(base - 1 + k as i64, last), wk));
                    }
                }
                KernelId::Lanczos4 => {
                    let real = ((o as f64) + 0.5) * scale - 0.5;
                    let base = real.floor();
                    let t = real - base;
                    let base = base as i64;
                    let mut sum = 0.0;
                    for k in (1 - LANCZOS_A)..=LANCZOS_A {
                        let w = lanczos(t - k as f64);
                        sum += w;
                        scratch.push((clamp_index(base + k, last), w));
                    }
                    if sum != 0.0 {
                        for tap in scratch.iter_mut() {
                            tap.1 /= sum;
                        }
                    }
                }
            }
            let row: Vec<(usize, f32)> = scratch.iter().map(|&(i, w)| (i, w as f32)).collect();
            taps.push(&row);
        }
        taps
    }

    fn push(&mut self, row: &[(usize, f32)]) {
        let start = self.index.len();
        for &(i, w) in row {
            self.index.push(i);
            self.weight.push(w);
        }
        self.spans.push((start, self.index.len()));
    }

    pub(crate) fn is_identity(&self) -> bool {
        self.identity
    }

    pub(crate) fn taps(&self, out: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let (s, e) = self.spans[out];
        self.index[s..e]
            .iter()
            .copied()
            .zip(self.weight[s..e].iter().copied())
    }
}

fn clamp_index(i: i64, last: usize) -> usize {
    i.clamp(0, last as i64) as usize
}

fn cubic_inner(x: f64) -> f64 {
    ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
}

fn cubic_outer(x: f64) -> f64 {
    ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
}

fn lanczos(x: f64) -> f64 {
    let a = LANCZOS_A as f64;
    if x == 0.0 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let px = std::f64::consts::PI * x;
    a * px.sin() * (px / a).sin() / (px * px)
}

/// Resample every frame of `batch` to `size` with the kernel behind `method`.
///
/// Kind, frame count and channel count are preserved. Resampling to the current size
/// returns an identical copy for every method.
pub fn resample(batch: &Batch, size: Size, method: InterpolationMethod) -> FitResult<Batch> {
    let kernel = method.kernel().kernel_id;
    let (in_h, in_w) = (batch.height(), batch.width());
    let (out_h, out_w) = (size.height as usize, size.width as usize);
    let c = batch.channels();

    let cols = AxisTaps::new(kernel, in_w, out_w);
    let rows = AxisTaps::new(kernel, in_h, out_h);
    if cols.is_identity() && rows.is_identity() {
        return Ok(batch.clone());
    }

    let mut out = batch.zeros_like(batch.frames(), size)?;
    let out_frame_len = out.frame_len();
    let mut tmp = vec![0.0f32; in_h * out_w * c];

    for f in 0..batch.frames() {
        let src = batch.frame_slice(f)?;
        horizontal_pass(src, &mut tmp, in_h, in_w, out_w, c, &cols);
        let dst = &mut out.data_mut()[f * out_frame_len..(f + 1) * out_frame_len];
        vertical_pass(&tmp, dst, out_w, out_h, c, &rows);
    }
    Ok(out)
}

fn horizontal_pass(
    src: &[f32],
    dst: &mut [f32],
    h: usize,
    in_w: usize,
    out_w: usize,
    c: usize,
    cols: &AxisTaps,
) {
    for y in 0..h {
        let src_row = &src[y * in_w * c..(y + 1) * in_w * c];
        let dst_row = &mut dst[y * out_w * c..(y + 1) * out_w * c];
        for x in 0..out_w {
            let px = &mut dst_row[x * c..(x + 1) * c];
            px.fill(0.0);
            for (sx, w) in cols.taps(x) {
                let sp = &src_row[sx * c..(sx + 1) * c];
                for ch in 0..c {
                    px[ch] += w * sp[ch];
                }
            }
        }
    }
}

fn vertical_pass(
    src: &[f32],
    dst: &mut [f32],
    w: usize,
    out_h: usize,
    c: usize,
    rows: &AxisTaps,
) {
    let stride = w * c;
    for y in 0..out_h {
        let dst_row = &mut dst[y * stride..(y + 1) * stride];
        dst_row.fill(0.0);
        for (sy, wt) in rows.taps(y) {
            let src_row = &src[sy * stride..(sy + 1) * stride];
            for (d, s) in dst_row.iter_mut().zip(src_row) {
                *d += wt * s;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/resample.rs"]
mod tests;
