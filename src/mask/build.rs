use kurbo::{Line, ParamCurveNearest, Shape};

use crate::{
    batch::model::Batch,
    foundation::{
        core::{Affine, BezPath, Point, Size, Vec2},
        error::{FitError, FitResult},
    },
    mask::blur::blur_mask,
};

/// Geometry of a fusion mask. `1.0` marks side A, `0.0` side B.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskShape {
    /// Straight line through the centre, rotated by `angle_deg`, shifted by `ratio`.
    AngledSplit {
        /// Rotation of the dividing line in degrees.
        #[serde(default)]
        angle_deg: f64,
        /// Share of the width on side A; 0 gives an empty mask, 1 a full one.
        #[serde(default = "default_ratio")]
        ratio: f64,
    },
    /// Filled regular polygon centred in the frame.
    Polygon {
        /// Vertex count, at least 3.
        #[serde(default = "default_sides")]
        sides: u32,
        /// Circumradius as a fraction of `min(width, height)`.
        #[serde(default = "default_ratio")]
        ratio: f64,
        /// Angle of the first vertex in degrees.
        #[serde(default)]
        angle_deg: f64,
    },
}

impl Default for MaskShape {
    fn default() -> Self {
        Self::AngledSplit {
            angle_deg: 0.0,
            ratio: default_ratio(),
        }
    }
}

fn default_ratio() -> f64 {
    0.5
}

fn default_sides() -> u32 {
    6
}

/// A mask shape plus optional edge softening.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FusionMaskSpec {
    /// Region geometry.
    #[serde(default)]
    pub shape: MaskShape,
    /// Gaussian blur radius in pixels (kernel `2 * r + 1`); 0 keeps hard edges.
    #[serde(default)]
    pub blur_radius: u32,
}

impl FusionMaskSpec {
    /// Angled split without blur.
    pub fn angled_split(angle_deg: f64, ratio: f64) -> Self {
        Self {
            shape: MaskShape::AngledSplit { angle_deg, ratio },
            blur_radius: 0,
        }
    }

    /// Regular polygon without blur.
    pub fn polygon(sides: u32, ratio: f64, angle_deg: f64) -> Self {
        Self {
            shape: MaskShape::Polygon {
                sides,
                ratio,
                angle_deg,
            },
            blur_radius: 0,
        }
    }

    /// Same spec with edge blur.
    pub fn with_blur(mut self, radius: u32) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Range-check every parameter.
    pub fn validate(&self) -> FitResult<()> {
        let (ratio, angle) = match self.shape {
            MaskShape::AngledSplit { angle_deg, ratio } => (ratio, angle_deg),
            MaskShape::Polygon {
                sides,
                ratio,
                angle_deg,
            } => {
                if !(3..=12).contains(&sides) {
                    return Err(FitError::invalid_argument(format!(
                        "polygon sides must be in [3, 12], got {sides}"
                    )));
                }
                (ratio, angle_deg)
            }
        };
        if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
            return Err(FitError::invalid_argument(format!(
                "mask ratio must be in [0, 1], got {ratio}"
            )));
        }
        if !angle.is_finite() {
            return Err(FitError::invalid_argument("mask angle must be finite"));
        }
        if self.blur_radius > 50 {
            return Err(FitError::invalid_argument(format!(
                "blur radius must be <= 50, got {}",
                self.blur_radius
            )));
        }
        Ok(())
    }
}

/// Rasterize `spec` into a one-frame mask of `size`.
///
/// Values are exactly 0 or 1 unless `blur_radius > 0`, in which case they are continuous
/// in `[0, 1]`.
#[tracing::instrument]
pub fn build_mask(size: Size, spec: &FusionMaskSpec) -> FitResult<Batch> {
    spec.validate()?;
    let data = match spec.shape {
        MaskShape::AngledSplit { angle_deg, ratio } => angled_split(size, angle_deg, ratio),
        MaskShape::Polygon {
            sides,
            ratio,
            angle_deg,
        } => polygon(size, sides, ratio, angle_deg),
    };
    let mask = Batch::mask(1, size, data)?;
    if spec.blur_radius == 0 {
        return Ok(mask);
    }
    blur_mask(&mask, spec.blur_radius)
}

fn center(size: Size) -> Point {
    Point::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0)
}

fn angled_split(size: Size, angle_deg: f64, ratio: f64) -> Vec<f32> {
    let (w, h) = (size.width as usize, size.height as usize);
    let c = center(size).to_vec2();
    // rotating by -angle puts the dividing line on the local y axis
    let rot = Affine::rotate(-angle_deg.to_radians());
    let threshold = f64::from(size.width) * (ratio - 0.5);

    let mut out = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let local = Point::new(x as f64, y as f64) - c;
            let rx = (rot * local).x;
            if rx < threshold {
                out[y * w + x] = 1.0;
            }
        }
    }
    out
}

fn polygon_vertices(size: Size, sides: u32, ratio: f64, angle_deg: f64) -> Vec<Point> {
    let c = center(size);
    let radius = f64::from(size.width.min(size.height)) * ratio;
    let base = angle_deg.to_radians();
    let step = std::f64::consts::TAU / f64::from(sides);
    (0..sides)
        .map(|k| {
            let theta = base + step * f64::from(k);
            let p = c + Vec2::new(theta.cos(), theta.sin()) * radius;
            // vertices snap to the pixel grid
            Point::new(p.x.trunc(), p.y.trunc())
        })
        .collect()
}

fn polygon(size: Size, sides: u32, ratio: f64, angle_deg: f64) -> Vec<f32> {
    let (w, h) = (size.width as usize, size.height as usize);
    let verts = polygon_vertices(size, sides, ratio, angle_deg);

    let mut path = BezPath::new();
    path.move_to(verts[0]);
    for v in &verts[1..] {
        path.line_to(*v);
    }
    path.close_path();

    let edges: Vec<Line> = verts
        .iter()
        .zip(verts.iter().cycle().skip(1))
        .map(|(a, b)| Line::new(*a, *b))
        .collect();

    let bounds = path.bounding_box();
    let x0 = bounds.x0.floor().max(0.0) as usize;
    let y0 = bounds.y0.floor().max(0.0) as usize;
    let x1 = (bounds.x1.ceil().max(0.0) as usize).min(w.saturating_sub(1));
    let y1 = (bounds.y1.ceil().max(0.0) as usize).min(h.saturating_sub(1));

    let mut out = vec![0.0f32; w * h];
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f64, y as f64);
            let on_edge = edges
                .iter()
                .any(|e| e.nearest(p, 1e-9).distance_sq <= 1e-12);
            if on_edge || path.contains(p) {
                out[y * w + x] = 1.0;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/mask/build.rs"]
mod tests;
