#![deny(unsafe_code)]
//! Animation registry: maps animation names to implementations and provides
//! CPU-side snapshot export.
//!
//! This crate sits between `backdrop-core` (which defines the `Animation`
//! trait) and the individual scene crates (`backdrop-flow-field`,
//! `backdrop-train`). The CLI depends on this crate so dispatch logic lives
//! in one place.

#[cfg(feature = "png")]
pub mod snapshot;

use backdrop_core::error::AnimationError;
use backdrop_core::surface::Surface;
use backdrop_core::Animation;
use serde_json::Value;

/// All available animation names.
const ANIMATION_NAMES: &[&str] = &["flow-field", "train"];

/// Enumeration of all available decorative animations.
///
/// Wraps each scene implementation and delegates `Animation` trait methods.
/// Use [`AnimationKind::from_name`] for string-based construction (CLI).
pub enum AnimationKind {
    /// Flow-field particle background.
    FlowField(backdrop_flow_field::FlowField),
    /// Orbiting train illustration.
    Train(backdrop_train::Train),
}

impl AnimationKind {
    /// Constructs an animation by name.
    ///
    /// Returns `AnimationError::UnknownAnimation` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, AnimationError> {
        match name {
            "flow-field" => Ok(AnimationKind::FlowField(
                backdrop_flow_field::FlowField::from_json(width, height, seed, params)?,
            )),
            "train" => Ok(AnimationKind::Train(backdrop_train::Train::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(AnimationError::UnknownAnimation(name.to_string())),
        }
    }

    /// Returns a slice of all recognized animation names.
    pub fn list_animations() -> &'static [&'static str] {
        ANIMATION_NAMES
    }
}

impl Animation for AnimationKind {
    fn tick(&mut self, surface: &mut Surface, frame: u64) -> Result<(), AnimationError> {
        match self {
            AnimationKind::FlowField(a) => a.tick(surface, frame),
            AnimationKind::Train(a) => a.tick(surface, frame),
        }
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError> {
        match self {
            AnimationKind::FlowField(a) => a.resize(width, height),
            AnimationKind::Train(a) => a.resize(width, height),
        }
    }

    fn params(&self) -> Value {
        match self {
            AnimationKind::FlowField(a) => a.params(),
            AnimationKind::Train(a) => a.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            AnimationKind::FlowField(a) => a.param_schema(),
            AnimationKind::Train(a) => a.param_schema(),
        }
    }
}
