//! Named resampling methods and the kernels they resolve to.

use std::str::FromStr;

use crate::foundation::error::{FitError, FitResult};

/// Resampling method selectable by name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Nearest neighbour with half-pixel centred sampling.
    NearestExact,
    /// Two-tap linear, `align_corners = false`.
    #[default]
    Bilinear,
    /// Box average over the covered source window.
    Area,
    /// Four-tap cubic convolution (`a = -0.75`), `align_corners = false`.
    Bicubic,
    /// Windowed sinc with eight taps.
    Lanczos,
}

/// Numerical kernel backing an [`InterpolationMethod`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelId {
    /// Single source tap.
    Nearest,
    /// Triangle filter.
    Linear,
    /// Adaptive average pooling.
    Box,
    /// Keys cubic convolution.
    Cubic,
    /// Lanczos window with `a = 4`.
    Lanczos4,
}

/// Kernel resolved for a method, with its coordinate convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KernelDescriptor {
    /// Kernel used by the resampler.
    pub kernel_id: KernelId,
    /// Whether the kernel interprets the "align corners" flag (always run with it off).
    pub supports_align_corners: bool,
}

impl InterpolationMethod {
    /// Every method, in declaration order.
    pub const ALL: [InterpolationMethod; 5] = [
        InterpolationMethod::NearestExact,
        InterpolationMethod::Bilinear,
        InterpolationMethod::Area,
        InterpolationMethod::Bicubic,
        InterpolationMethod::Lanczos,
    ];

    /// Kernel descriptor for this method.
    pub fn kernel(self) -> KernelDescriptor {
        let (kernel_id, supports_align_corners) = match self {
            Self::NearestExact => (KernelId::Nearest, false),
            Self::Bilinear => (KernelId::Linear, true),
            Self::Area => (KernelId::Box, false),
            Self::Bicubic => (KernelId::Cubic, true),
            Self::Lanczos => (KernelId::Lanczos4, false),
        };
        KernelDescriptor {
            kernel_id,
            supports_align_corners,
        }
    }

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NearestExact => "nearest_exact",
            Self::Bilinear => "bilinear",
            Self::Area => "area",
            Self::Bicubic => "bicubic",
            Self::Lanczos => "lanczos",
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "nearest_exact" | "nearest-exact" | "nearestexact" | "nearest" => {
                Ok(Self::NearestExact)
            }
            "bilinear" | "linear" => Ok(Self::Bilinear),
            "area" | "box" => Ok(Self::Area),
            "bicubic" | "cubic" => Ok(Self::Bicubic),
            "lanczos" | "lanczos4" => Ok(Self::Lanczos),
            _ => Err(FitError::unknown_method(format!("'{}'", s.trim()))),
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a method name to its kernel.
pub fn resolve(method_name: &str) -> FitResult<KernelDescriptor> {
    Ok(method_name.parse::<InterpolationMethod>()?.kernel())
}

/// Parse a method name, falling back to [`InterpolationMethod::Bilinear`] with a warning.
pub fn resolve_or_default(method_name: &str) -> InterpolationMethod {
    match method_name.parse::<InterpolationMethod>() {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(%err, "falling back to bilinear interpolation");
            InterpolationMethod::Bilinear
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interp/policy.rs"]
mod tests;
