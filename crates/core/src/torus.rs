//! Toroidal (wrap-around) position math.
//!
//! The particle field treats the viewport as a torus: positions that cross
//! one edge re-enter at the opposite edge, and anything drawn near an edge
//! is repeated at the neighboring wrap offsets so shapes never tear at the
//! seam.

use glam::DVec2;

/// Wraps `value` into [0, extent).
///
/// Total over all inputs: non-finite values and non-positive extents
/// collapse to 0.0 instead of propagating NaN.
pub fn wrap(value: f64, extent: f64) -> f64 {
    if !value.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid of a tiny negative can round up to exactly `extent`.
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Wraps a position into the [0, width) x [0, height) rectangle.
pub fn wrap_point(pos: DVec2, width: f64, height: f64) -> DVec2 {
    DVec2::new(wrap(pos.x, width), wrap(pos.y, height))
}

/// Returns the wrap copies of `pos` that land near the viewport.
///
/// Considers the nine positions `pos + (i * width, j * height)` for
/// `i, j` in {-1, 0, 1} and keeps those strictly inside the viewport
/// expanded by `margin` on every side. For a wrapped `pos` and a positive
/// `margin` the identity copy always survives, so the result is never empty.
pub fn wrap_copies(pos: DVec2, width: f64, height: f64, margin: f64) -> Vec<DVec2> {
    let mut copies = Vec::new();
    for ox in [-1.0, 0.0, 1.0] {
        for oy in [-1.0, 0.0, 1.0] {
            let p = DVec2::new(pos.x + ox * width, pos.y + oy * height);
            if p.x > -margin && p.x < width + margin && p.y > -margin && p.y < height + margin {
                copies.push(p);
            }
        }
    }
    copies
}
