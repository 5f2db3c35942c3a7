//! Bring several optional inputs to one common size.
//!
//! Inputs arrive as declared, named ports; only ports that carry a batch produce an output,
//! in declaration order.

use crate::{
    batch::model::{Batch, BatchKind},
    fit::strategy::{FitPolicy, fit},
    foundation::{
        core::Size,
        error::{FitError, FitResult},
    },
    interp::policy::InterpolationMethod,
    mask::threshold::threshold,
};

/// What every port of a [`PortInputs`] set carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    /// RGB/RGBA image batches.
    Image,
    /// Single-channel mask batches.
    Mask,
}

impl PortKind {
    fn batch_kind(self) -> BatchKind {
        match self {
            Self::Image => BatchKind::Image,
            Self::Mask => BatchKind::Mask,
        }
    }

    /// Kernel used when the caller does not pick one.
    pub fn default_method(self) -> InterpolationMethod {
        match self {
            Self::Image => InterpolationMethod::Bilinear,
            Self::Mask => InterpolationMethod::NearestExact,
        }
    }
}

/// Ordered, named, optionally connected inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct PortInputs {
    kind: PortKind,
    ports: Vec<(String, Option<Batch>)>,
}

impl PortInputs {
    /// Empty port set of the given kind.
    pub fn new(kind: PortKind) -> Self {
        Self {
            kind,
            ports: Vec::new(),
        }
    }

    /// Declare the next port.
    pub fn port(mut self, name: impl Into<String>, batch: Option<Batch>) -> Self {
        self.ports.push((name.into(), batch));
        self
    }

    /// Port kind.
    pub fn kind(&self) -> PortKind {
        self.kind
    }

    /// Declared ports in order.
    pub fn ports(&self) -> &[(String, Option<Batch>)] {
        &self.ports
    }

    /// Connected ports in declaration order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Batch)> {
        self.ports
            .iter()
            .filter_map(|(name, b)| b.as_ref().map(|b| (name.as_str(), b)))
    }
}

/// Parameters for [`uniform_size`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSizeOptions {
    /// Output size for every port.
    pub size: Size,
    /// Fit policy applied to every port.
    pub policy: FitPolicy,
    /// Resampling kernel.
    pub method: InterpolationMethod,
    /// Binarize mask outputs at this level; ignored for image ports.
    pub threshold: Option<f32>,
}

impl UniformSizeOptions {
    /// Letterbox to `size` with the default kernel for `kind` and no threshold.
    pub fn new(size: Size, kind: PortKind) -> Self {
        Self {
            size,
            policy: FitPolicy::Adaptive,
            method: kind.default_method(),
            threshold: None,
        }
    }
}

/// Fit every connected port to `opts.size`.
///
/// Returns `(port name, batch)` pairs for connected ports in declaration order. With no
/// connected port, returns one zero batch named after the first declared port (or `"output"`
/// when none is declared).
#[tracing::instrument(skip(inputs), fields(kind = ?inputs.kind(), ports = inputs.ports().len()))]
pub fn uniform_size(
    inputs: &PortInputs,
    opts: &UniformSizeOptions,
) -> FitResult<Vec<(String, Batch)>> {
    let kind = inputs.kind();
    let mut out = Vec::new();
    for (name, batch) in inputs.present() {
        if batch.kind() != kind.batch_kind() {
            return Err(FitError::shape_mismatch(format!(
                "port '{name}' carries a {:?} batch, expected {kind:?}",
                batch.kind()
            )));
        }
        let mut fitted = fit(batch, opts.size, opts.policy, opts.method)?;
        if let (PortKind::Mask, Some(t)) = (kind, opts.threshold) {
            fitted = threshold(&fitted, t)?;
        }
        out.push((name.to_string(), fitted));
    }

    if out.is_empty() {
        let name = inputs
            .ports()
            .first()
            .map(|(n, _)| n.clone())
            .unwrap_or_else(|| "output".to_string());
        tracing::debug!(%name, "no connected ports, emitting empty placeholder");
        let empty = match kind {
            PortKind::Image => Batch::zeros(BatchKind::Image, 1, opts.size, 3)?,
            PortKind::Mask => Batch::zeros(BatchKind::Mask, 1, opts.size, 1)?,
        };
        out.push((name, empty));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/uniform.rs"]
mod tests;
