//! Named color sets for the animations.
//!
//! A [`Palette`] is an ordered list of opaque colors; particles pick one at
//! random when they are created and keep it for life. [`ThemeColors`] mirrors
//! the five page-level accent colors the train illustration tints itself
//! with, overridable per run from JSON parameters.

use crate::color::Srgb;
use crate::error::AnimationError;
use crate::params::param_string;
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A discrete palette of colors, sampled by uniform random pick.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a new palette from a vector of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, AnimationError> {
        if colors.is_empty() {
            return Err(AnimationError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    /// Requires at least one color.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, AnimationError> {
        let colors: Result<Vec<Srgb>, AnimationError> =
            hexes.iter().map(|h| Srgb::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the colors in order.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Picks one color uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Srgb {
        *rng.pick(&self.colors)
    }

    // -- Built-in palettes --

    /// Mint, saffron, razzmatazz. The bright accent trio.
    pub fn carnival() -> Self {
        Self::from_hex(&["#03cea4", "#eac435", "#e40066"])
            .expect("carnival palette hex values are valid")
    }

    /// Deep to pale blues.
    pub fn twilight() -> Self {
        Self::from_hex(&["#1d3557", "#457b9d", "#a8dadc"])
            .expect("twilight palette hex values are valid")
    }

    /// Yellow through deep orange.
    pub fn ember() -> Self {
        Self::from_hex(&["#ffba08", "#f48c06", "#dc2f02"])
            .expect("ember palette hex values are valid")
    }

    /// Dark, mid, light gray.
    pub fn mono() -> Self {
        Self::from_hex(&["#222222", "#777777", "#cccccc"])
            .expect("mono palette hex values are valid")
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, AnimationError> {
        match name {
            "carnival" => Ok(Self::carnival()),
            "twilight" => Ok(Self::twilight()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            other => Err(AnimationError::InvalidPalette(format!(
                "unknown palette name: {other}"
            ))),
        }
    }

    /// Names of all built-in palettes, in presentation order.
    pub fn list_names() -> &'static [&'static str] {
        &["carnival", "twilight", "ember", "mono"]
    }
}

/// The five named page accent colors the train illustration draws with.
///
/// Defaults follow the page style sheet; individual colors can be replaced
/// through JSON params keyed by color name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub tomato: Srgb,
    pub razzmatazz: Srgb,
    pub mint: Srgb,
    pub saffron: Srgb,
    pub blue: Srgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            tomato: Srgb::from_hex("#fb4d3d").expect("default tomato hex is valid"),
            razzmatazz: Srgb::from_hex("#e40066").expect("default razzmatazz hex is valid"),
            mint: Srgb::from_hex("#03cea4").expect("default mint hex is valid"),
            saffron: Srgb::from_hex("#eac435").expect("default saffron hex is valid"),
            blue: Srgb::from_hex("#345995").expect("default blue hex is valid"),
        }
    }
}

impl ThemeColors {
    /// Builds theme colors from a JSON params object.
    ///
    /// Each of the keys `tomato`, `razzmatazz`, `mint`, `saffron`, and `blue`
    /// may hold a hex string override; missing keys keep their defaults, and
    /// a present-but-malformed hex string is an error.
    pub fn from_json(params: &Value) -> Result<Self, AnimationError> {
        let defaults = Self::default();
        Ok(Self {
            tomato: Self::color_param(params, "tomato", defaults.tomato)?,
            razzmatazz: Self::color_param(params, "razzmatazz", defaults.razzmatazz)?,
            mint: Self::color_param(params, "mint", defaults.mint)?,
            saffron: Self::color_param(params, "saffron", defaults.saffron)?,
            blue: Self::color_param(params, "blue", defaults.blue)?,
        })
    }

    fn color_param(params: &Value, name: &str, default: Srgb) -> Result<Srgb, AnimationError> {
        let hex = param_string(params, name, &default.to_hex());
        Srgb::from_hex(&hex)
    }
}
