//! Keep an image (and its mask) within a side-length window.

use crate::{
    batch::model::{Batch, BatchKind},
    foundation::{
        core::Size,
        error::{FitError, FitResult},
    },
    interp::{policy::InterpolationMethod, resample::resample},
};

/// Output dimensions are always rounded up to this multiple.
pub const SIZE_ALIGN: u32 = 8;

/// Parameters for [`limit_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LimitOptions {
    /// Longest allowed side.
    pub max_side: u32,
    /// Both sides below this are scaled up.
    pub min_side: u32,
    /// Kernel for the image; masks always use nearest-exact.
    pub method: InterpolationMethod,
}

impl Default for LimitOptions {
    fn default() -> Self {
        Self {
            max_side: 2048,
            min_side: 256,
            method: InterpolationMethod::Bilinear,
        }
    }
}

impl LimitOptions {
    /// Range-check the side window.
    pub fn validate(&self) -> FitResult<()> {
        if self.min_side < SIZE_ALIGN || self.max_side < SIZE_ALIGN {
            return Err(FitError::invalid_argument(format!(
                "side limits must be at least {SIZE_ALIGN}, got min {} max {}",
                self.min_side, self.max_side
            )));
        }
        if self.min_side > self.max_side {
            return Err(FitError::invalid_argument(format!(
                "min side {} exceeds max side {}",
                self.min_side, self.max_side
            )));
        }
        Ok(())
    }
}

/// Result of [`limit_size`].
#[derive(Clone, Debug, PartialEq)]
pub struct LimitOutcome {
    /// Image at the limited size.
    pub image: Batch,
    /// Mask at the limited size; all ones when none was given.
    pub mask: Batch,
    /// Input frame size.
    pub original: Size,
    /// Output frame size.
    pub resized: Size,
}

/// Size `src` is brought to by [`limit_size`].
///
/// Oversized frames have their longer side scaled down to `max_side`; frames with both sides
/// under `min_side` have their shorter side scaled up to it. Aspect ratio is kept with the
/// derived side truncated, and both sides are then rounded up to a multiple of [`SIZE_ALIGN`].
pub fn limited_size(src: Size, max_side: u32, min_side: u32) -> FitResult<Size> {
    LimitOptions {
        max_side,
        min_side,
        ..LimitOptions::default()
    }
    .validate()?;

    let (w, h) = (src.width, src.height);
    let aspect = src.aspect();
    let scaled = |v: f64| (v.floor() as u32).max(1);
    let (new_w, new_h) = if w > max_side || h > max_side {
        if w >= h {
            (max_side, scaled(f64::from(max_side) / aspect))
        } else {
            (scaled(f64::from(max_side) * aspect), max_side)
        }
    } else if w < min_side && h < min_side {
        if w >= h {
            (scaled(f64::from(min_side) * aspect), min_side)
        } else {
            (min_side, scaled(f64::from(min_side) / aspect))
        }
    } else {
        (w, h)
    };

    Ok(Size::new(new_h, new_w)?.align_up(SIZE_ALIGN))
}

/// Resize `image` (and `mask`) into the window described by `opts`.
#[tracing::instrument(skip(image, mask), fields(size = %image.size(), has_mask = mask.is_some()))]
pub fn limit_size(
    image: &Batch,
    mask: Option<&Batch>,
    opts: &LimitOptions,
) -> FitResult<LimitOutcome> {
    if image.kind() != BatchKind::Image {
        return Err(FitError::shape_mismatch("size limiter expects an image batch"));
    }
    if let Some(m) = mask {
        if m.kind() != BatchKind::Mask {
            return Err(FitError::shape_mismatch("size limiter mask must be a mask batch"));
        }
        if m.frames() != image.frames() || m.size() != image.size() {
            return Err(FitError::shape_mismatch(format!(
                "mask {} x{} does not match image {} x{}",
                m.size(),
                m.frames(),
                image.size(),
                image.frames()
            )));
        }
    }

    let original = image.size();
    let resized = limited_size(original, opts.max_side, opts.min_side)?;
    tracing::debug!(%original, %resized, "limited size");

    let out_image = if resized == original {
        image.clone()
    } else {
        resample(image, resized, opts.method)?
    };
    let out_mask = match mask {
        Some(m) if resized == original => m.clone(),
        Some(m) => resample(m, resized, InterpolationMethod::NearestExact)?,
        None => Batch::filled(BatchKind::Mask, image.frames(), resized, 1, 1.0)?,
    };

    Ok(LimitOutcome {
        image: out_image,
        mask: out_mask,
        original,
        resized,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ops/limit.rs"]
mod tests;
