//! Frame-axis operations: retiming, frame-count policy, frame extraction and holding a still.
//!
//! Retiming is plain linear blending of neighbouring frames; it is not motion aware, so large
//! ratios produce repeated or ghosted frames.

use std::str::FromStr;

use crate::{
    batch::model::Batch,
    foundation::{
        error::{FitError, FitResult},
        math::linspace,
    },
};

/// Resample `batch` along the frame axis to `target_frames` frames.
///
/// Sample points are `linspace(0, frames - 1, target_frames)`. A point that lands on an
/// integer copies that frame; otherwise the floor and ceil frames are blended by the
/// fractional distance. Equal counts return the batch unchanged.
#[tracing::instrument(skip(batch), fields(frames = batch.frames()))]
pub fn retime(batch: &Batch, target_frames: usize) -> FitResult<Batch> {
    if target_frames < 1 {
        return Err(FitError::invalid_argument(
            "target frame count must be at least 1",
        ));
    }
    if target_frames == batch.frames() {
        return Ok(batch.clone());
    }

    let last = (batch.frames() - 1) as f64;
    let points = linspace(0.0, last, target_frames);
    let mut out = batch.zeros_like(target_frames, batch.size())?;
    let frame_len = batch.frame_len();

    for (i, &t) in points.iter().enumerate() {
        let dst = &mut out.data_mut()[i * frame_len..(i + 1) * frame_len];
        let lo = t.floor();
        if t == lo {
            dst.copy_from_slice(batch.frame_slice(lo as usize)?);
            continue;
        }
        let w_hi = (t - lo) as f32;
        let w_lo = 1.0 - w_hi;
        let a = batch.frame_slice(lo as usize)?;
        let b = batch.frame_slice(t.ceil() as usize)?;
        for ((d, &x), &y) in dst.iter_mut().zip(a).zip(b) {
            *d = x * w_lo + y * w_hi;
        }
    }
    Ok(out)
}

/// How two frame counts are reconciled before fusing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FrameAdapt {
    /// Use the smaller count.
    #[default]
    Shorter,
    /// Use the larger count.
    Longer,
    /// Use the floored mean of both counts.
    Average,
}

impl FromStr for FrameAdapt {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shorter" | "min" | "shortest" => Ok(Self::Shorter),
            "longer" | "max" | "longest" => Ok(Self::Longer),
            "average" | "mean" | "avg" => Ok(Self::Average),
            _ => Err(FitError::unknown_policy(format!(
                "frame adapt '{}'",
                s.trim()
            ))),
        }
    }
}

/// Frame count both inputs are retimed to under `adapt`. Never below 1.
pub fn target_frame_count(a: usize, b: usize, adapt: FrameAdapt) -> usize {
    let n = match adapt {
        FrameAdapt::Shorter => a.min(b),
        FrameAdapt::Longer => a.max(b),
        FrameAdapt::Average => (a + b) / 2,
    };
    n.max(1)
}

/// Which end of a clip to take.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FramePick {
    /// Frame 0.
    #[default]
    First,
    /// The final frame.
    Last,
}

impl FromStr for FramePick {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "head" => Ok(Self::First),
            "last" | "tail" => Ok(Self::Last),
            _ => Err(FitError::unknown_policy(format!(
                "frame pick '{}'",
                s.trim()
            ))),
        }
    }
}

/// One-frame batch holding the first or last frame of `batch`.
pub fn extract_frame(batch: &Batch, pick: FramePick) -> FitResult<Batch> {
    let index = match pick {
        FramePick::First => 0,
        FramePick::Last => batch.frames() - 1,
    };
    tracing::debug!(total = batch.frames(), index, "extract frame");
    batch.frame(index)
}

/// A still repeated into a clip.
#[derive(Clone, Debug, PartialEq)]
pub struct HeldClip {
    /// The repeated frames.
    pub frames: Batch,
    /// `round(duration * fps)`.
    pub total_frames: usize,
    /// `total_frames / fps`.
    pub actual_duration_secs: f64,
    /// Frame rate the clip was built for.
    pub fps: f64,
}

/// Repeat the first frame of `still` for `duration_secs` at `fps`.
pub fn hold_frames(still: &Batch, duration_secs: f64, fps: f64) -> FitResult<HeldClip> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || duration_secs > 300.0 {
        return Err(FitError::invalid_argument(format!(
            "duration must be in (0, 300] seconds, got {duration_secs}"
        )));
    }
    if !fps.is_finite() || !(1.0..=120.0).contains(&fps) {
        return Err(FitError::invalid_argument(format!(
            "fps must be in [1, 120], got {fps}"
        )));
    }
    let total_frames = (duration_secs * fps).round() as usize;
    if total_frames < 1 {
        return Err(FitError::invalid_argument(format!(
            "{duration_secs}s at {fps} fps rounds to zero frames"
        )));
    }

    let first = still.frame_slice(0)?;
    let mut data = Vec::with_capacity(first.len() * total_frames);
    for _ in 0..total_frames {
        data.extend_from_slice(first);
    }
    let frames = Batch::from_parts(
        still.kind(),
        total_frames,
        still.size(),
        still.channels(),
        data,
    )?;
    Ok(HeldClip {
        frames,
        total_frames,
        actual_duration_secs: total_frames as f64 / fps,
        fps,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/retime/frames.rs"]
mod tests;
