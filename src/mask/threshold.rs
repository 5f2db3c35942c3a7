use crate::{
    batch::model::{Batch, BatchKind},
    foundation::error::{FitError, FitResult},
};

/// Binarize a mask: samples strictly above `t` become 1, everything else 0.
pub fn threshold(mask: &Batch, t: f32) -> FitResult<Batch> {
    if mask.kind() != BatchKind::Mask {
        return Err(FitError::invalid_argument("threshold expects a mask batch"));
    }
    if !t.is_finite() || !(0.0..=1.0).contains(&t) {
        return Err(FitError::invalid_argument(format!(
            "threshold must be in [0, 1], got {t}"
        )));
    }
    let mut out = mask.clone();
    for v in out.data_mut() {
        *v = if *v > t { 1.0 } else { 0.0 };
    }
    Ok(out)
}
