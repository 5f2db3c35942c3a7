use crate::foundation::{
    core::Size,
    error::{FitError, FitResult},
};

/// Whether a batch carries colour pixels or a single-channel mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// `frames x height x width x channels`, channels in {3, 4}.
    Image,
    /// `frames x height x width`, one implicit channel in `[0, 1]`.
    Mask,
}

/// An ordered run of same-shaped frames stored row-major as `(frame, y, x, channel)`.
///
/// Image batches carry 3 (RGB) or 4 (RGBA) channels; mask batches carry exactly one.
/// All frames share height, width and channel count by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    frames: usize,
    size: Size,
    channels: usize,
    kind: BatchKind,
    data: Vec<f32>,
}

impl Batch {
    /// Build an image batch from raw samples.
    pub fn image(frames: usize, size: Size, channels: usize, data: Vec<f32>) -> FitResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(FitError::invalid_argument(format!(
                "image batches carry 3 or 4 channels, got {channels}"
            )));
        }
        Self::from_parts(BatchKind::Image, frames, size, channels, data)
    }

    /// Build a mask batch from raw samples.
    pub fn mask(frames: usize, size: Size, data: Vec<f32>) -> FitResult<Self> {
        Self::from_parts(BatchKind::Mask, frames, size, 1, data)
    }

    /// Zero-filled batch of the given shape.
    pub fn zeros(kind: BatchKind, frames: usize, size: Size, channels: usize) -> FitResult<Self> {
        Self::filled(kind, frames, size, channels, 0.0)
    }

    /// Batch with every sample set to `value`.
    pub fn filled(
        kind: BatchKind,
        frames: usize,
        size: Size,
        channels: usize,
        value: f32,
    ) -> FitResult<Self> {
        let len = checked_len(frames, size, channels)?;
        match kind {
            BatchKind::Image => Self::image(frames, size, channels, vec![value; len]),
            BatchKind::Mask => {
                if channels != 1 {
                    return Err(FitError::invalid_argument(format!(
                        "mask batches carry 1 channel, got {channels}"
                    )));
                }
                Self::mask(frames, size, vec![value; len])
            }
        }
    }

    pub(crate) fn from_parts(
        kind: BatchKind,
        frames: usize,
        size: Size,
        channels: usize,
        data: Vec<f32>,
    ) -> FitResult<Self> {
        if frames == 0 {
            return Err(FitError::invalid_argument("batch must hold at least one frame"));
        }
        if size.height == 0 || size.width == 0 {
            return Err(FitError::invalid_argument(format!(
                "batch size must be positive, got {size}"
            )));
        }
        if kind == BatchKind::Mask && channels != 1 {
            return Err(FitError::invalid_argument(format!(
                "mask batches carry 1 channel, got {channels}"
            )));
        }
        let expected = checked_len(frames, size, channels)?;
        if data.len() != expected {
            return Err(FitError::invalid_argument(format!(
                "batch data has {} samples, expected {expected} ({frames} x {} x {} x {channels})",
                data.len(),
                size.height,
                size.width
            )));
        }
        Ok(Self {
            frames,
            size,
            channels,
            kind,
            data,
        })
    }

    /// Image or mask.
    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    /// Number of frames (leading axis).
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Spatial size shared by every frame.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Frame height.
    pub fn height(&self) -> usize {
        self.size.height as usize
    }

    /// Frame width.
    pub fn width(&self) -> usize {
        self.size.width as usize
    }

    /// Samples per pixel (1 for masks).
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples in one frame.
    pub fn frame_len(&self) -> usize {
        self.size.area() * self.channels
    }

    /// All samples, row-major `(frame, y, x, channel)`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to all samples.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Samples of frame `index`.
    pub fn frame_slice(&self, index: usize) -> FitResult<&[f32]> {
        if index >= self.frames {
            return Err(FitError::invalid_argument(format!(
                "frame {index} out of range for batch of {} frames",
                self.frames
            )));
        }
        let len = self.frame_len();
        Ok(&self.data[index * len..(index + 1) * len])
    }

    /// A one-frame batch holding a copy of frame `index`.
    pub fn frame(&self, index: usize) -> FitResult<Batch> {
        let data = self.frame_slice(index)?.to_vec();
        Self::from_parts(self.kind, 1, self.size, self.channels, data)
    }

    /// Sample at `(frame, y, x, channel)`; `None` when out of range.
    pub fn get(&self, frame: usize, y: usize, x: usize, channel: usize) -> Option<f32> {
        if frame >= self.frames
            || y >= self.height()
            || x >= self.width()
            || channel >= self.channels
        {
            return None;
        }
        Some(self.data[self.index(frame, y, x, channel)])
    }

    /// All channels of the pixel at `(frame, y, x)`.
    pub fn pixel(&self, frame: usize, y: usize, x: usize) -> Option<&[f32]> {
        if frame >= self.frames || y >= self.height() || x >= self.width() {
            return None;
        }
        let start = self.index(frame, y, x, 0);
        Some(&self.data[start..start + self.channels])
    }

    pub(crate) fn index(&self, frame: usize, y: usize, x: usize, channel: usize) -> usize {
        ((frame * self.height() + y) * self.width() + x) * self.channels + channel
    }

    /// True when `other` has the same kind, spatial size and channel count.
    pub fn same_frame_shape(&self, other: &Batch) -> bool {
        self.kind == other.kind && self.size == other.size && self.channels == other.channels
    }

    /// Concatenate same-shaped batches along the frame axis.
    pub fn concat(parts: &[Batch]) -> FitResult<Batch> {
        let first = parts
            .first()
            .ok_or_else(|| FitError::invalid_argument("cannot concatenate zero batches"))?;
        let mut frames = 0usize;
        let mut data = Vec::with_capacity(parts.iter().map(|b| b.data.len()).sum());
        for (i, part) in parts.iter().enumerate() {
            if !first.same_frame_shape(part) {
                return Err(FitError::shape_mismatch(format!(
                    "batch {i} is {:?} {} x{}, expected {:?} {} x{}",
                    part.kind, part.size, part.channels, first.kind, first.size, first.channels
                )));
            }
            frames += part.frames;
            data.extend_from_slice(&part.data);
        }
        Self::from_parts(first.kind, frames, first.size, first.channels, data)
    }

    /// Copy the `size` window whose top-left corner sits at `(top, left)` out of every frame.
    pub fn crop(&self, top: u32, left: u32, size: Size) -> FitResult<Batch> {
        let bottom = u64::from(top) + u64::from(size.height);
        let right = u64::from(left) + u64::from(size.width);
        if bottom > u64::from(self.size.height) || right > u64::from(self.size.width) {
            return Err(FitError::invalid_argument(format!(
                "crop {size} at ({top}, {left}) exceeds frame {}",
                self.size
            )));
        }
        let mut out = self.zeros_like(self.frames, size)?;
        let c = self.channels;
        let row_len = size.width as usize * c;
        let out_frame_len = out.frame_len();
        for f in 0..self.frames {
            let src = self.frame_slice(f)?;
            let dst = &mut out.data[f * out_frame_len..(f + 1) * out_frame_len];
            for y in 0..size.height as usize {
                let s = ((top as usize + y) * self.width() + left as usize) * c;
                let d = y * row_len;
                dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
            }
        }
        Ok(out)
    }

    /// Same shape, freshly zeroed, with a different frame count and size.
    pub(crate) fn zeros_like(&self, frames: usize, size: Size) -> FitResult<Batch> {
        let len = checked_len(frames, size, self.channels)?;
        Self::from_parts(self.kind, frames, size, self.channels, vec![0.0; len])
    }
}

fn checked_len(frames: usize, size: Size, channels: usize) -> FitResult<usize> {
    frames
        .checked_mul(size.area())
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| FitError::invalid_argument("batch buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/model.rs"]
mod tests;
