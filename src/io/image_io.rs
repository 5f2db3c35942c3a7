use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    batch::model::Batch,
    foundation::{
        core::Size,
        error::{FitError, FitResult},
    },
};

/// Convert one decoded image into a single-frame batch.
///
/// RGBA sources keep their alpha channel when `keep_alpha` is set; everything else becomes RGB.
pub fn image_to_batch(img: &image::DynamicImage, keep_alpha: bool) -> FitResult<Batch> {
    let size = Size::new(img.height(), img.width())?;
    let (channels, raw) = if keep_alpha && img.color().has_alpha() {
        (4, img.to_rgba8().into_raw())
    } else {
        (3, img.to_rgb8().into_raw())
    };
    Batch::image(1, size, channels, raw.iter().map(|v| unorm(*v)).collect())
}

/// Convert one decoded image into a single-frame mask from its luma channel.
pub fn image_to_mask(img: &image::DynamicImage) -> FitResult<Batch> {
    let size = Size::new(img.height(), img.width())?;
    let luma = img.to_luma8().into_raw();
    Batch::mask(1, size, luma.iter().map(|v| unorm(*v)).collect())
}

/// Render frame `index` of `batch` as an 8-bit image.
pub fn frame_to_image(batch: &Batch, index: usize) -> FitResult<image::DynamicImage> {
    let data: Vec<u8> = batch.frame_slice(index)?.iter().map(|v| quantize(*v)).collect();
    let (w, h) = (batch.size().width, batch.size().height);
    let img = match batch.channels() {
        1 => image::GrayImage::from_raw(w, h, data).map(image::DynamicImage::ImageLuma8),
        3 => image::RgbImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgba8),
        c => {
            return Err(FitError::invalid_argument(format!(
                "cannot encode {c}-channel frames"
            )));
        }
    };
    img.ok_or_else(|| FitError::shape_mismatch("frame buffer does not match its size"))
}

/// Load image files as one batch, one frame per path in order.
pub fn load_images(paths: &[PathBuf], keep_alpha: bool) -> FitResult<Batch> {
    let frames = paths
        .iter()
        .map(|p| image_to_batch(&open(p)?, keep_alpha))
        .collect::<FitResult<Vec<_>>>()?;
    Batch::concat(&frames)
}

/// Load image files as one mask batch, one frame per path in order.
pub fn load_masks(paths: &[PathBuf]) -> FitResult<Batch> {
    let frames = paths
        .iter()
        .map(|p| image_to_mask(&open(p)?))
        .collect::<FitResult<Vec<_>>>()?;
    Batch::concat(&frames)
}

/// Write frame `index` of `batch` to `path`; the format follows the extension.
pub fn save_frame(batch: &Batch, index: usize, path: &Path) -> FitResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame_to_image(batch, index)?
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

/// Write every frame of `batch` into `dir` as `frame_00000.png`, `frame_00001.png`, ...
pub fn save_frames(batch: &Batch, dir: &Path) -> FitResult<Vec<PathBuf>> {
    (0..batch.frames())
        .map(|i| {
            let path = dir.join(format!("frame_{i:05}.png"));
            save_frame(batch, i, &path)?;
            Ok(path)
        })
        .collect()
}

fn open(path: &Path) -> FitResult<image::DynamicImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img)
}

fn unorm(v: u8) -> f32 {
    f32::from(v) / 255.0
}

fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
