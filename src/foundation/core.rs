use crate::foundation::error::{FitError, FitResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Spatial size of a frame, `(height, width)` in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Rows.
    pub height: u32,
    /// Columns.
    pub width: u32,
}

impl Size {
    /// Build a size, rejecting zero dimensions.
    pub fn new(height: u32, width: u32) -> FitResult<Self> {
        if height == 0 || width == 0 {
            return Err(FitError::invalid_argument(format!(
                "size must be positive, got {height}x{width} (h x w)"
            )));
        }
        Ok(Self { height, width })
    }

    /// Build a size from signed dimensions as they arrive from parameter documents.
    pub fn from_signed(height: i64, width: i64) -> FitResult<Self> {
        let h = u32::try_from(height)
            .map_err(|_| FitError::invalid_argument(format!("height {height} out of range")))?;
        let w = u32::try_from(width)
            .map_err(|_| FitError::invalid_argument(format!("width {width} out of range")))?;
        Self::new(h, w)
    }

    /// Number of pixels in one frame.
    pub fn area(self) -> usize {
        self.height as usize * self.width as usize
    }

    /// `width / height`.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Round both dimensions up to the next multiple of `n`.
    pub fn align_up(self, n: u32) -> Self {
        if n <= 1 {
            return self;
        }
        Self {
            height: self.height.div_ceil(n) * n,
            width: self.width.div_ceil(n) * n,
        }
    }

    /// True when `self` fits inside `other` on both axes.
    pub fn fits_within(self, other: Size) -> bool {
        self.height <= other.height && self.width <= other.width
    }

    /// True when `self` covers `other` on both axes.
    pub fn covers(self, other: Size) -> bool {
        self.height >= other.height && self.width >= other.width
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
