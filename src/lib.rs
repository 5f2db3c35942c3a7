//! Framefit is a batch image and mask geometry engine.
//!
//! It brings frames of different sizes and lengths onto a common shape and fuses pairs of
//! clips through generated region masks. Every operation works on a [`Batch`]: `N` frames of
//! `H x W` pixels with one (mask) or three/four (image) `f32` channels in `[0, 1]`.
//!
//! # Layers
//!
//! 1. **Interpolation policy**: [`InterpolationMethod`] names a resampling kernel; [`resample`]
//!    applies it separably.
//! 2. **Fit strategy**: [`fit()`] reshapes a batch to a target size under a [`FitPolicy`]
//!    (stretch, letterbox, cover-crop).
//! 3. **Frame retiming**: [`retime()`] resamples the frame axis by linear blending.
//! 4. **Mask compositing**: [`build_mask`] rasterizes split/polygon masks and [`blend()`] mixes two
//!    batches through one.
//! 5. **Fusion**: [`fuse`] composes the above for two arbitrary clips.
//!
//! The node-style helpers ([`uniform_size`], [`limit_size`], [`split`]) and the image file
//! helpers in [`load_images`]/[`save_frames`] sit on top of these layers.
//!
//! All operations are pure, synchronous and single-threaded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch {
    pub(crate) mod model;
}
mod blend {
    pub(crate) mod composite;
}
mod fit {
    pub(crate) mod strategy;
}
mod foundation {
    pub(crate) mod core;
    pub(crate) mod error;
    pub(crate) mod math;
}
mod fusion {
    pub(crate) mod orchestrate;
}
mod interp {
    pub(crate) mod policy;
    pub(crate) mod resample;
}
mod io {
    pub(crate) mod image_io;
}
mod mask {
    pub(crate) mod blur;
    pub(crate) mod build;
    pub(crate) mod threshold;
}
mod ops {
    pub(crate) mod limit;
    pub(crate) mod split;
    pub(crate) mod uniform;
}
mod retime {
    pub(crate) mod frames;
}

pub use batch::model::{Batch, BatchKind};
pub use blend::composite::blend;
pub use fit::strategy::{FitPlan, FitPolicy, fit, fit_to_match, plan};
pub use foundation::core::{Affine, BezPath, Point, Size, Vec2};
pub use foundation::error::{FitError, FitResult};
pub use fusion::orchestrate::{FusionParams, fuse};
pub use interp::policy::{
    InterpolationMethod, KernelDescriptor, KernelId, resolve, resolve_or_default,
};
pub use interp::resample::resample;
pub use io::image_io::{
    frame_to_image, image_to_batch, image_to_mask, load_images, load_masks, save_frame,
    save_frames,
};
pub use mask::blur::blur_mask;
pub use mask::build::{FusionMaskSpec, MaskShape, build_mask};
pub use mask::threshold::threshold;
pub use ops::limit::{LimitOptions, LimitOutcome, SIZE_ALIGN, limit_size, limited_size};
pub use ops::split::{MAX_PARTS, SplitDirection, SplitOptions, parse_ratios, split};
pub use ops::uniform::{PortInputs, PortKind, UniformSizeOptions, uniform_size};
pub use retime::frames::{
    FrameAdapt, FramePick, HeldClip, extract_frame, hold_frames, retime, target_frame_count,
};
