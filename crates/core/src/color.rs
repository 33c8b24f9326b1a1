//! Color types for the backdrop animations.
//!
//! Provides `Srgb` (opaque, hex-serializable) and `Rgba` (straight alpha,
//! used for every blended paint operation), plus an HSB conversion for the
//! hue-cycling particle variant. Uses `f64` throughout for precision.

use crate::error::AnimationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color with a straight (non-premultiplied) alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `AnimationError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, AnimationError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(AnimationError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| AnimationError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| AnimationError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| AnimationError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0-255) with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Attaches an alpha value, producing an [`Rgba`].
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Rgba {
    /// Fully transparent black. Blending this over anything is a no-op.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Creates a color from components in [0, 1].
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit components.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Rgba {
        Rgba {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Creates an opaque gray from a single 8-bit value.
    pub fn gray8(v: u8) -> Rgba {
        Self::rgb8(v, v, v)
    }

    /// Replaces the alpha with a value in [0, 1].
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { a, ..self }
    }

    /// Replaces the alpha with an 8-bit value mapped to [0, 1].
    pub fn with_alpha8(self, a: u8) -> Rgba {
        self.with_alpha(a as f64 / 255.0)
    }

    /// Component-wise linear interpolation between `from` and `to`.
    ///
    /// The `t` parameter is clamped to [0, 1]; NaN is treated as 0.
    pub fn lerp(from: Rgba, to: Rgba, t: f64) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgba {
            r: from.r + t * (to.r - from.r),
            g: from.g + t * (to.g - from.g),
            b: from.b + t * (to.b - from.b),
            a: from.a + t * (to.a - from.a),
        }
    }
}

impl From<Srgb> for Rgba {
    fn from(c: Srgb) -> Rgba {
        c.with_alpha(1.0)
    }
}

/// Converts an HSB color to sRGB.
///
/// Uses the classic creative-coding ranges: hue in degrees (wrapped into
/// [0, 360)), saturation and brightness in [0, 100]. Non-finite hue is
/// treated as 0 so the conversion is total.
pub fn hsb_to_srgb(h: f64, s: f64, b: f64) -> Srgb {
    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (b / 100.0).clamp(0.0, 1.0);

    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Srgb {
        r: r1 + m,
        g: g1 + m,
        b: b1 + m,
    }
}
