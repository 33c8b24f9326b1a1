//! Reproducible specification for an animation run.
//!
//! A [`Seed`] captures everything needed to re-render a run: animation name,
//! viewport dimensions, parameters, PRNG seed, and frame count.

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};

/// Reproducible specification for an animation run.
///
/// Contains the animation name, viewport dimensions, parameter overrides,
/// PRNG seed, and frame count. Two identical `Seed` values fed to the same
/// binary produce bit-identical output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub animation: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: u64,
}

impl Seed {
    /// Creates a new Seed with default params (`{}`) and frames (`0`).
    pub fn new(animation: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            animation: animation.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates that the seed has non-zero dimensions and that
    /// `width * height` does not overflow.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.width == 0 || self.height == 0 {
            return Err(AnimationError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(AnimationError::InvalidDimensions)?;
        Ok(())
    }
}
