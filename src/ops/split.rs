//! Cut frames into weighted strips and keep one.

use std::str::FromStr;

use crate::{
    batch::model::Batch,
    foundation::{
        core::Size,
        error::{FitError, FitResult},
    },
};

/// Largest supported number of strips.
pub const MAX_PARTS: usize = 10;

/// Axis along which strips are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    /// Side-by-side columns; the width is divided.
    #[default]
    Horizontal,
    /// Stacked rows; the height is divided.
    Vertical,
}

impl FromStr for SplitDirection {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "columns" => Ok(Self::Horizontal),
            "vertical" | "v" | "rows" => Ok(Self::Vertical),
            _ => Err(FitError::unknown_policy(format!(
                "split direction '{}'",
                s.trim()
            ))),
        }
    }
}

/// Parse `"a:b:..."` weights for `parts` strips, normalized to sum 1.
///
/// Falls back to equal weights when the text does not describe exactly `parts` positive
/// finite weights.
pub fn parse_ratios(text: &str, parts: usize) -> Vec<f64> {
    let parsed: Result<Vec<f64>, _> = text.trim().split(':').map(|p| p.trim().parse()).collect();
    let weights = match parsed {
        Ok(w) if w.len() == parts && w.iter().all(|v| v.is_finite() && *v > 0.0) => w,
        _ => {
            tracing::warn!(text, parts, "unusable split ratios, using equal weights");
            vec![1.0; parts]
        }
    };
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Parameters for [`split`].
#[derive(Clone, Debug, PartialEq)]
pub struct SplitOptions {
    /// Strip layout axis.
    pub direction: SplitDirection,
    /// Number of strips, `2..=10`.
    pub parts: usize,
    /// 1-based strip to keep; values past `parts` select the last strip.
    pub position: usize,
    /// Normalized strip weights; empty means equal weights.
    pub ratios: Vec<f64>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            direction: SplitDirection::Horizontal,
            parts: 2,
            position: 1,
            ratios: Vec::new(),
        }
    }
}

/// Strip boundaries `(start, len)` along an axis of length `len`.
fn segments(len: u32, ratios: &[f64]) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(ratios.len());
    let mut start = 0u32;
    for (i, r) in ratios.iter().enumerate() {
        let seg = if i + 1 == ratios.len() {
            len - start
        } else {
            ((f64::from(len) * r).floor() as u32).min(len - start)
        };
        out.push((start, seg));
        start += seg;
    }
    out
}

/// Keep strip `opts.position` of every frame.
#[tracing::instrument(skip(batch), fields(size = %batch.size()))]
pub fn split(batch: &Batch, opts: &SplitOptions) -> FitResult<Batch> {
    if !(2..=MAX_PARTS).contains(&opts.parts) {
        return Err(FitError::invalid_argument(format!(
            "split parts must be in 2..={MAX_PARTS}, got {}",
            opts.parts
        )));
    }
    if opts.position < 1 {
        return Err(FitError::invalid_argument("split position is 1-based"));
    }
    let ratios = if opts.ratios.len() == opts.parts {
        opts.ratios.clone()
    } else {
        vec![1.0 / opts.parts as f64; opts.parts]
    };
    let position = opts.position.min(opts.parts);

    let size = batch.size();
    let axis_len = match opts.direction {
        SplitDirection::Horizontal => size.width,
        SplitDirection::Vertical => size.height,
    };
    let (start, len) = segments(axis_len, &ratios)[position - 1];
    if len == 0 {
        return Err(FitError::invalid_argument(format!(
            "strip {position} of {} is empty for an axis of {axis_len} pixels",
            opts.parts
        )));
    }
    tracing::debug!(start, len, position, "split strip");

    match opts.direction {
        SplitDirection::Horizontal => batch.crop(0, start, Size::new(size.height, len)?),
        SplitDirection::Vertical => batch.crop(start, 0, Size::new(len, size.width)?),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/split.rs"]
mod tests;
