#![deny(unsafe_code)]
//! Core types and traits for the backdrop animation system.
//!
//! Provides the `Animation` trait, the `Surface` raster and its drawing
//! primitives, color types (`Srgb`, `Rgba`), `Palette`/`ThemeColors`,
//! `Xorshift64` PRNG, coherent noise sources, toroidal wrap helpers,
//! `Seed`, and parameter helpers.

pub mod animation;
pub mod color;
pub mod error;
pub mod noise_source;
pub mod palette;
pub mod params;
pub mod prng;
pub mod seed;
pub mod surface;
pub mod torus;

pub use animation::Animation;
pub use color::{Rgba, Srgb};
pub use error::AnimationError;
pub use noise_source::{NoiseSource, Perlin3};
pub use palette::{Palette, ThemeColors};
pub use prng::Xorshift64;
pub use seed::Seed;
pub use surface::Surface;
