//! CPU drawing surface for the animations.
//!
//! A [`Surface`] is an RGBA raster with straight (non-premultiplied) alpha
//! stored as `f64` per channel. Primitives are hard-edged membership tests
//! evaluated at pixel centers, composited src-over with clipping to the
//! surface bounds. Coordinates are device pixels with the origin at the
//! top-left corner and y growing downward.
//!
//! Every operation is total: non-finite inputs and degenerate shapes paint
//! nothing instead of panicking.

use glam::DVec2;

use crate::color::Rgba;
use crate::error::AnimationError;

/// An RGBA raster surface with src-over compositing.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    /// Interleaved r, g, b, a rows, straight alpha, row-major.
    data: Vec<f64>,
}

/// The sample point of the pixel at integer coordinates (x, y).
fn pixel_center(x: usize, y: usize) -> DVec2 {
    DVec2::new(x as f64 + 0.5, y as f64 + 0.5)
}

/// Quantizes a unit-range channel to 8 bits with rounding.
fn channel_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Distance from `p` to the closed segment between `a` and `b`.
fn dist_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Tests whether `p` lies inside (or on the boundary of) a convex quad.
///
/// Works for either winding order: the point is inside when the edge cross
/// products never take both signs.
fn point_in_convex_quad(p: DVec2, corners: &[DVec2; 4]) -> bool {
    let mut positive = false;
    let mut negative = false;
    for i in 0..4 {
        let edge = corners[(i + 1) % 4] - corners[i];
        let cross = edge.perp_dot(p - corners[i]);
        if cross > 0.0 {
            positive = true;
        }
        if cross < 0.0 {
            negative = true;
        }
        if positive && negative {
            return false;
        }
    }
    true
}

impl Surface {
    /// Creates a fully transparent surface.
    ///
    /// Returns `AnimationError::InvalidDimensions` if either dimension is
    /// zero or `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, AnimationError> {
        if width == 0 || height == 0 {
            return Err(AnimationError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(AnimationError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocates to the new dimensions. Contents reset to transparent.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError> {
        *self = Surface::new(width, height)?;
        Ok(())
    }

    /// Replaces every pixel with `color`, without blending.
    pub fn clear(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    /// Reads the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Rgba {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
            a: self.data[idx + 3],
        })
    }

    /// Converts the surface to an interleaved RGBA8 buffer of length
    /// `width * height * 4`.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| {
                [
                    channel_to_u8(px[0]),
                    channel_to_u8(px[1]),
                    channel_to_u8(px[2]),
                    channel_to_u8(px[3]),
                ]
            })
            .collect()
    }

    /// Composites `color` src-over onto the pixel at `(x, y)`.
    ///
    /// Callers guarantee the coordinates are in bounds.
    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let src_a = color.a.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let dst_a = self.data[idx + 3];
        let dst_w = dst_a * (1.0 - src_a);
        let out_a = src_a + dst_w;
        self.data[idx] = (color.r * src_a + self.data[idx] * dst_w) / out_a;
        self.data[idx + 1] = (color.g * src_a + self.data[idx + 1] * dst_w) / out_a;
        self.data[idx + 2] = (color.b * src_a + self.data[idx + 2] * dst_w) / out_a;
        self.data[idx + 3] = out_a;
    }

    /// Clips a float bounding box to the pixel grid.
    ///
    /// Returns the inclusive pixel range `(x0, y0, x1, y1)` covering the box,
    /// or `None` when the box misses the surface entirely. NaN bounds compare
    /// false and fall out here, which is what keeps the primitives total.
    fn clip_box(&self, min: DVec2, max: DVec2) -> Option<(usize, usize, usize, usize)> {
        let w = self.width as f64;
        let h = self.height as f64;
        if !(min.x < w) || !(min.y < h) || !(max.x >= 0.0) || !(max.y >= 0.0) {
            return None;
        }
        let x0 = min.x.max(0.0).floor() as usize;
        let y0 = min.y.max(0.0).floor() as usize;
        let x1 = (max.x.ceil() as usize).min(self.width - 1);
        let y1 = (max.y.ceil() as usize).min(self.height - 1);
        Some((x0, y0, x1, y1))
    }

    /// Fills a circle of the given radius.
    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let r = DVec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.clip_box(center - r, center + r) else {
            return;
        };
        let r_sq = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if pixel_center(x, y).distance_squared(center) <= r_sq {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Fills an ellipse with the given half-extents, rotated by `rotation`
    /// radians about its center.
    pub fn fill_ellipse(&mut self, center: DVec2, radii: DVec2, rotation: f64, color: Rgba) {
        if !(radii.x > 0.0 && radii.y > 0.0) || !radii.is_finite() || !rotation.is_finite() {
            return;
        }
        let (sin, cos) = rotation.sin_cos();
        // Half-extents of the rotated ellipse's bounding box.
        let half = DVec2::new(
            ((radii.x * cos).powi(2) + (radii.y * sin).powi(2)).sqrt(),
            ((radii.x * sin).powi(2) + (radii.y * cos).powi(2)).sqrt(),
        );
        let Some((x0, y0, x1, y1)) = self.clip_box(center - half, center + half) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = pixel_center(x, y) - center;
                let local = DVec2::new(d.x * cos + d.y * sin, d.y * cos - d.x * sin) / radii;
                if local.length_squared() <= 1.0 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Fills a convex quad given its corners in either winding order.
    pub fn fill_quad(&mut self, corners: [DVec2; 4], color: Rgba) {
        let min = corners.iter().fold(corners[0], |m, c| m.min(*c));
        let max = corners.iter().fold(corners[0], |m, c| m.max(*c));
        let Some((x0, y0, x1, y1)) = self.clip_box(min, max) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if point_in_convex_quad(pixel_center(x, y), &corners) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Strokes a line segment with the given stroke weight and round caps.
    pub fn stroke_line(&mut self, a: DVec2, b: DVec2, weight: f64, color: Rgba) {
        if weight <= 0.0 || !weight.is_finite() {
            return;
        }
        let half = weight * 0.5;
        let lo = a.min(b) - DVec2::splat(half);
        let hi = a.max(b) + DVec2::splat(half);
        let Some((x0, y0, x1, y1)) = self.clip_box(lo, hi) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                if dist_to_segment(pixel_center(x, y), a, b) <= half {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Strokes a circle outline: the annulus `|dist - radius| <= weight / 2`.
    pub fn stroke_circle(&mut self, center: DVec2, radius: f64, weight: f64, color: Rgba) {
        if radius <= 0.0 || !radius.is_finite() || weight <= 0.0 || !weight.is_finite() {
            return;
        }
        let half = weight * 0.5;
        let r = DVec2::splat(radius + half);
        let Some((x0, y0, x1, y1)) = self.clip_box(center - r, center + r) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dist = pixel_center(x, y).distance(center);
                if (dist - radius).abs() <= half {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Blends a radial gradient over the whole surface.
    ///
    /// Pixels at the center receive `inner`, pixels at `radius` or farther
    /// receive `outer`, with a linear ramp in between. A non-positive radius
    /// degenerates to an `outer` wash.
    pub fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Rgba, outer: Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                let t = if radius > 0.0 {
                    (pixel_center(x, y).distance(center) / radius).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                self.blend(x, y, Rgba::lerp(inner, outer, t));
            }
        }
    }
}
