use std::{fs::File, io::BufReader, path::Path};

use crate::{
    batch::model::{Batch, BatchKind},
    blend::composite::blend,
    fit::strategy::{FitPolicy, fit_to_match},
    foundation::error::{FitError, FitResult},
    interp::policy::InterpolationMethod,
    mask::build::{FusionMaskSpec, build_mask},
    retime::frames::{FrameAdapt, retime, target_frame_count},
};

/// Everything needed to fuse two batches into one.
///
/// Deserializes from JSON; every field is optional and defaults to a centred vertical split,
/// letterbox fitting, the shorter frame count and bilinear resampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FusionParams {
    /// Region mask separating input A from input B.
    #[serde(default)]
    pub mask: FusionMaskSpec,
    /// How input B is fitted onto input A's frame size.
    #[serde(default)]
    pub size_adapt: FitPolicy,
    /// How the two frame counts are reconciled.
    #[serde(default)]
    pub frame_adapt: FrameAdapt,
    /// Kernel used when fitting input B.
    #[serde(default)]
    pub method: InterpolationMethod,
}

impl FusionParams {
    /// Parse parameters from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FitResult<Self> {
        let params: FusionParams = serde_json::from_reader(r)
            .map_err(|e| FitError::serde(format!("parse fusion params JSON: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Parse parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FitError::serde(format!("open fusion params JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Range-check the mask parameters.
    pub fn validate(&self) -> FitResult<()> {
        self.mask.validate()
    }
}

/// Fuse two image batches.
///
/// Both inputs are retimed to the frame count chosen by `frame_adapt`, input B is fitted to
/// input A's frame size, and the result is `A * mask + B * (1 - mask)` with the mask built
/// at A's size and broadcast over frames and channels.
#[tracing::instrument(skip(a, b), fields(a_frames = a.frames(), b_frames = b.frames()))]
pub fn fuse(a: &Batch, b: &Batch, params: &FusionParams) -> FitResult<Batch> {
    params.validate()?;
    if a.kind() != BatchKind::Image || b.kind() != BatchKind::Image {
        return Err(FitError::shape_mismatch("fusion expects two image batches"));
    }
    if a.channels() != b.channels() {
        return Err(FitError::shape_mismatch(format!(
            "fusion inputs carry {} and {} channels",
            a.channels(),
            b.channels()
        )));
    }

    let frames = target_frame_count(a.frames(), b.frames(), params.frame_adapt);
    tracing::debug!(frames, "fusion frame count");
    let a = retime(a, frames)?;
    let b = retime(b, frames)?;
    let b = fit_to_match(&a, &b, params.size_adapt, params.method)?;

    let mask = build_mask(a.size(), &params.mask)?;
    blend(&a, &b, &mask)
}

#[cfg(test)]
#[path = "../../tests/unit/fusion/orchestrate.rs"]
mod tests;
