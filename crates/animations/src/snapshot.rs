//! CPU-side PNG export of a [`Surface`].
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! registry can depend on this crate without pulling in the `image` crate.

use backdrop_core::error::AnimationError;
use backdrop_core::surface::Surface;
use std::path::Path;

/// Writes a surface as a PNG image, quantizing each channel to 8 bits.
///
/// Returns `AnimationError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `AnimationError::Io` on write failure.
pub fn write_png(surface: &Surface, path: &Path) -> Result<(), AnimationError> {
    let rgba = surface.to_rgba8();
    let w = u32::try_from(surface.width()).map_err(|_| AnimationError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| AnimationError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| AnimationError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| AnimationError::Io(e.to_string()))
}
