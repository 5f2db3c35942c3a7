use std::str::FromStr;

use crate::{
    batch::model::Batch,
    foundation::{
        core::Size,
        error::{FitError, FitResult},
        math::centered_offset,
    },
    interp::{policy::InterpolationMethod, resample::resample},
};

/// How a source frame is mapped onto a target box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Resample straight to the target, ignoring aspect ratio.
    Stretch,
    /// Scale to fit inside the target and centre on a zero canvas (letterbox).
    #[default]
    Adaptive,
    /// Scale to cover the target and keep the centred window (cover-crop).
    Crop,
    /// Same placement as [`FitPolicy::Adaptive`]; kept as its own name for callers that select it.
    Pad,
}

impl FitPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [FitPolicy; 4] = [
        FitPolicy::Stretch,
        FitPolicy::Adaptive,
        FitPolicy::Crop,
        FitPolicy::Pad,
    ];

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stretch => "stretch",
            Self::Adaptive => "adaptive",
            Self::Crop => "crop",
            Self::Pad => "pad",
        }
    }
}

impl FromStr for FitPolicy {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stretch" => Ok(Self::Stretch),
            "adaptive" | "letterbox" | "fit" | "contain" => Ok(Self::Adaptive),
            "crop" | "cover" | "center_crop" => Ok(Self::Crop),
            "pad" => Ok(Self::Pad),
            _ => Err(FitError::unknown_policy(format!(
                "fit policy '{}'",
                s.trim()
            ))),
        }
    }
}

impl std::fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of one fit: the intermediate scaled size, where it lands on the target canvas
/// and which window of it is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitPlan {
    /// Size the source is resampled to.
    pub scaled: Size,
    /// Row of the target where the scaled image starts (letterbox placement).
    pub offset_y: u32,
    /// Column of the target where the scaled image starts (letterbox placement).
    pub offset_x: u32,
    /// First row of the scaled image that is kept (cover-crop window).
    pub crop_y: u32,
    /// First column of the scaled image that is kept (cover-crop window).
    pub crop_x: u32,
}

/// Compute the fit geometry for `src` onto `target` under `policy`.
///
/// All offsets are non-negative. For [`FitPolicy::Adaptive`] and [`FitPolicy::Pad`] the
/// scaled size never exceeds the target; for [`FitPolicy::Crop`] it is never smaller.
pub fn plan(src: Size, target: Size, policy: FitPolicy) -> FitPlan {
    let ratio_w = f64::from(target.width) / f64::from(src.width);
    let ratio_h = f64::from(target.height) / f64::from(src.height);
    let scale_dim = |dim: u32, ratio: f64| ((f64::from(dim) * ratio).round().max(1.0)) as u32;

    match policy {
        FitPolicy::Stretch => FitPlan {
            scaled: target,
            offset_y: 0,
            offset_x: 0,
            crop_y: 0,
            crop_x: 0,
        },
        FitPolicy::Adaptive | FitPolicy::Pad => {
            let ratio = ratio_w.min(ratio_h);
            let scaled = Size {
                height: scale_dim(src.height, ratio).min(target.height),
                width: scale_dim(src.width, ratio).min(target.width),
            };
            FitPlan {
                scaled,
                offset_y: centered_offset(target.height, scaled.height),
                offset_x: centered_offset(target.width, scaled.width),
                crop_y: 0,
                crop_x: 0,
            }
        }
        FitPolicy::Crop => {
            let ratio = ratio_w.max(ratio_h);
            let scaled = Size {
                height: scale_dim(src.height, ratio).max(target.height),
                width: scale_dim(src.width, ratio).max(target.width),
            };
            FitPlan {
                scaled,
                offset_y: 0,
                offset_x: 0,
                crop_y: centered_offset(scaled.height, target.height),
                crop_x: centered_offset(scaled.width, target.width),
            }
        }
    }
}

/// Fit every frame of `batch` to exactly `target` under `policy`.
#[tracing::instrument(skip(batch), fields(src = %batch.size(), frames = batch.frames()))]
pub fn fit(
    batch: &Batch,
    target: Size,
    policy: FitPolicy,
    method: InterpolationMethod,
) -> FitResult<Batch> {
    let p = plan(batch.size(), target, policy);
    tracing::debug!(
        scaled = %p.scaled,
        offset_x = p.offset_x,
        offset_y = p.offset_y,
        crop_x = p.crop_x,
        crop_y = p.crop_y,
        "fit plan"
    );

    let scaled = resample(batch, p.scaled, method)?;
    match policy {
        FitPolicy::Stretch => Ok(scaled),
        FitPolicy::Adaptive | FitPolicy::Pad => paste_centered(&scaled, target, &p),
        FitPolicy::Crop => scaled.crop(p.crop_y, p.crop_x, target),
    }
}

/// Fit `batch` to the spatial size of `reference`.
///
/// Both batches must already share a frame count; align them with
/// [`crate::retime()`] first.
pub fn fit_to_match(
    reference: &Batch,
    batch: &Batch,
    policy: FitPolicy,
    method: InterpolationMethod,
) -> FitResult<Batch> {
    if reference.frames() != batch.frames() {
        return Err(FitError::shape_mismatch(format!(
            "frame counts differ ({} vs {}); retime before fitting",
            reference.frames(),
            batch.frames()
        )));
    }
    fit(batch, reference.size(), policy, method)
}

fn paste_centered(scaled: &Batch, target: Size, p: &FitPlan) -> FitResult<Batch> {
    let mut out = scaled.zeros_like(scaled.frames(), target)?;
    let c = scaled.channels();
    let (sh, sw) = (scaled.height(), scaled.width());
    let tw = target.width as usize;
    let (oy, ox) = (p.offset_y as usize, p.offset_x as usize);
    let row_len = sw * c;
    let out_frame_len = out.frame_len();

    for f in 0..scaled.frames() {
        let src = scaled.frame_slice(f)?;
        let dst = &mut out.data_mut()[f * out_frame_len..(f + 1) * out_frame_len];
        for y in 0..sh {
            let s = y * row_len;
            let d = ((oy + y) * tw + ox) * c;
            dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/fit/strategy.rs"]
mod tests;
