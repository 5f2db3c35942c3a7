use crate::{
    batch::model::{Batch, BatchKind},
    foundation::error::{FitError, FitResult},
};

/// Blend two equal-shaped batches through a mask: `a * m + b * (1 - m)`.
///
/// `a` and `b` must agree on kind, frame count, size and channels. The mask must share
/// their spatial size and hold either one frame (broadcast over every frame) or exactly
/// as many frames as the inputs; its single channel is broadcast over every channel.
/// A mask of all ones yields `a` exactly; all zeros yields `b` exactly.
#[tracing::instrument(skip_all, fields(frames = a.frames(), size = %a.size()))]
pub fn blend(a: &Batch, b: &Batch, mask: &Batch) -> FitResult<Batch> {
    if !a.same_frame_shape(b) || a.frames() != b.frames() {
        return Err(FitError::shape_mismatch(format!(
            "blend inputs differ: {} frames {} x{} vs {} frames {} x{}",
            a.frames(),
            a.size(),
            a.channels(),
            b.frames(),
            b.size(),
            b.channels()
        )));
    }
    if mask.kind() != BatchKind::Mask {
        return Err(FitError::shape_mismatch("blend mask must be a mask batch"));
    }
    if mask.size() != a.size() {
        return Err(FitError::shape_mismatch(format!(
            "blend mask is {}, inputs are {}",
            mask.size(),
            a.size()
        )));
    }
    if mask.frames() != 1 && mask.frames() != a.frames() {
        return Err(FitError::shape_mismatch(format!(
            "blend mask has {} frames, expected 1 or {}",
            mask.frames(),
            a.frames()
        )));
    }

    let c = a.channels();
    let frame_len = a.frame_len();
    let mut out = a.clone();
    for f in 0..a.frames() {
        let m = mask.frame_slice(if mask.frames() == 1 { 0 } else { f })?;
        let av = a.frame_slice(f)?;
        let bv = b.frame_slice(f)?;
        let dst = &mut out.data_mut()[f * frame_len..(f + 1) * frame_len];
        for (px, &mv) in m.iter().enumerate() {
            let inv = 1.0 - mv;
            for ch in px * c..(px + 1) * c {
                dst[ch] = av[ch] * mv + bv[ch] * inv;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/composite.rs"]
mod tests;
