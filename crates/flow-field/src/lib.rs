#![deny(unsafe_code)]
//! Flow-field particle background animation.
//!
//! A fixed set of particles drifts through a coherent noise field: each frame
//! the field is sampled at the particle's position (plus a slowly advancing
//! time coordinate) to obtain a steering angle, and the resulting direction
//! is added to the particle's velocity. Speed is clamped and the position
//! wraps toroidally at the surface edges. Motion blur comes from synthetic trails:
//! shrinking, fading circles stepped backward along the current velocity,
//! drawn at every wrap copy near the visible bounds so trails stay continuous
//! across the seam.
//!
//! Two presets share the update path and differ only in particle count and
//! coloring: `palette` draws each particle in a fixed palette color, `hue`
//! cycles each particle's hue around the wheel over time.

use backdrop_core::color::hsb_to_srgb;
use backdrop_core::error::AnimationError;
use backdrop_core::noise_source::{NoiseSource, Perlin3};
use backdrop_core::palette::Palette;
use backdrop_core::params::{param_bool, param_f64, param_string, param_usize};
use backdrop_core::prng::Xorshift64;
use backdrop_core::surface::Surface;
use backdrop_core::torus;
use backdrop_core::{Animation, Rgba, Srgb};
use glam::DVec2;
use serde_json::{json, Value};
use std::f64::consts::TAU;

/// Default spatial frequency of the steering field.
const DEFAULT_NOISE_SCALE: f64 = 0.005;
/// Default advance of the noise time coordinate per frame.
const DEFAULT_TIME_SCALE: f64 = 0.002;
/// Default magnitude of the per-frame steering impulse.
const DEFAULT_NOISE_STRENGTH: f64 = 1.0;
/// Default speed cap applied after each steering impulse.
const DEFAULT_MAX_SPEED: f64 = 2.0;
/// Default number of trail samples per particle.
const DEFAULT_TRAIL_LEN: usize = 20;
/// Default hue advance per frame in the `hue` color mode.
const DEFAULT_HUE_SPEED: f64 = 0.1;
/// Particle count for the `palette` preset.
const PALETTE_PARTICLES: usize = 150;
/// Particle count for the `hue` preset.
const HUE_PARTICLES: usize = 70;
/// Backward step along the velocity between trail samples.
const TRAIL_STEP: f64 = 0.5;
/// How far outside the visible bounds a wrap copy may sit and still render.
const WRAP_MARGIN: f64 = 50.0;
/// Particle radius range at creation.
const SIZE_MIN: f64 = 0.5;
const SIZE_MAX: f64 = 1.5;
/// Particle alpha range at creation.
const ALPHA_MIN: f64 = 0.1;
const ALPHA_MAX: f64 = 0.3;
/// Saturation and brightness used by the `hue` color mode.
const HUE_SATURATION: f64 = 70.0;
const HUE_BRIGHTNESS: f64 = 95.0;

/// How particles are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Fixed per-particle color drawn from the palette at creation.
    Palette,
    /// Per-particle hue seed that cycles around the wheel as frames advance.
    Hue,
}

impl ColorMode {
    /// Resolves a mode name, or `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "palette" => Some(Self::Palette),
            "hue" => Some(Self::Hue),
            _ => None,
        }
    }

    /// The name this mode resolves from.
    pub fn name(self) -> &'static str {
        match self {
            Self::Palette => "palette",
            Self::Hue => "hue",
        }
    }

    fn default_particles(self) -> usize {
        match self {
            Self::Palette => PALETTE_PARTICLES,
            Self::Hue => HUE_PARTICLES,
        }
    }
}

/// Tunable parameters for the flow field.
///
/// [`Default`] is the `palette` preset (150 particles, carnival palette);
/// [`FlowFieldParams::hue_preset`] is the 70-particle hue-cycling variant.
#[derive(Debug, Clone)]
pub struct FlowFieldParams {
    /// Coloring model. Also selects the default particle count.
    pub color_mode: ColorMode,
    /// Number of particles. Fixed for the animation's lifetime.
    pub particles: usize,
    /// Spatial frequency: positions are scaled by this before sampling noise.
    pub noise_scale: f64,
    /// Advance of the noise time coordinate per frame.
    pub time_scale: f64,
    /// Magnitude of the steering impulse added to velocity each frame.
    pub noise_strength: f64,
    /// Speed cap. Clamping preserves direction.
    pub max_speed: f64,
    /// Number of synthetic trail samples per particle.
    pub trail_len: usize,
    /// Hue advance per frame (`hue` mode only).
    pub hue_speed: f64,
    /// Whether to overlay the radial vignette after all particles.
    pub vignette: bool,
    /// Colors particles draw from (`palette` mode only).
    pub palette: Palette,
}

impl Default for FlowFieldParams {
    fn default() -> Self {
        Self::palette_preset()
    }
}

impl FlowFieldParams {
    /// The palette-colored preset: 150 particles, carnival colors.
    pub fn palette_preset() -> Self {
        Self {
            color_mode: ColorMode::Palette,
            particles: PALETTE_PARTICLES,
            noise_scale: DEFAULT_NOISE_SCALE,
            time_scale: DEFAULT_TIME_SCALE,
            noise_strength: DEFAULT_NOISE_STRENGTH,
            max_speed: DEFAULT_MAX_SPEED,
            trail_len: DEFAULT_TRAIL_LEN,
            hue_speed: DEFAULT_HUE_SPEED,
            vignette: true,
            palette: Palette::carnival(),
        }
    }

    /// The hue-cycling preset: 70 particles, color from the hue wheel.
    pub fn hue_preset() -> Self {
        Self {
            color_mode: ColorMode::Hue,
            particles: HUE_PARTICLES,
            ..Self::palette_preset()
        }
    }

    /// Extracts parameters from a JSON object, falling back to preset
    /// defaults for missing or mistyped keys.
    ///
    /// Errors on an unrecognized `color_mode` or `palette` name.
    pub fn from_json(params: &Value) -> Result<Self, AnimationError> {
        let mode_name = param_string(params, "color_mode", ColorMode::Palette.name());
        let color_mode = ColorMode::from_name(&mode_name)
            .ok_or_else(|| AnimationError::InvalidColor(format!("unknown color mode: {mode_name}")))?;
        let palette = Palette::from_name(&param_string(params, "palette", "carnival"))?;
        Ok(Self {
            color_mode,
            particles: param_usize(params, "particles", color_mode.default_particles()),
            noise_scale: param_f64(params, "noise_scale", DEFAULT_NOISE_SCALE),
            time_scale: param_f64(params, "time_scale", DEFAULT_TIME_SCALE),
            noise_strength: param_f64(params, "noise_strength", DEFAULT_NOISE_STRENGTH),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            trail_len: param_usize(params, "trail_len", DEFAULT_TRAIL_LEN),
            hue_speed: param_f64(params, "hue_speed", DEFAULT_HUE_SPEED),
            vignette: param_bool(params, "vignette", true),
            palette,
        })
    }
}

/// One particle of the field.
///
/// Created once at setup and never destroyed; position and velocity mutate
/// every frame, the rest is fixed.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in surface coordinates, kept in [0, W) x [0, H).
    pub pos: DVec2,
    /// Accumulated velocity, magnitude capped at `max_speed`.
    pub vel: DVec2,
    /// Trail circle radius at full strength.
    pub size: f64,
    /// Palette color (used by the `palette` mode).
    pub color: Srgb,
    /// Trail alpha at full strength.
    pub alpha: f64,
    /// Hue seed in [0, 360) (used by the `hue` mode).
    pub hue: f64,
}

/// Flow-field particle simulator.
///
/// Owns its particles, dimensions, and noise source; the host owns the frame
/// counter and the surface, and clears the surface before each `tick`.
pub struct FlowField {
    width: usize,
    height: usize,
    params: FlowFieldParams,
    particles: Vec<Particle>,
    noise: Box<dyn NoiseSource>,
}

impl FlowField {
    /// Creates a flow field with Perlin steering noise.
    ///
    /// Particles start at random positions inside the surface with zero
    /// velocity, a random size and alpha, a palette color, and a hue seed.
    ///
    /// Returns `AnimationError::InvalidDimensions` if either dimension is
    /// zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: FlowFieldParams,
    ) -> Result<Self, AnimationError> {
        let noise = Box::new(Perlin3::new(seed as u32));
        Self::with_source(width, height, seed, params, noise)
    }

    /// Creates a flow field steered by an explicit noise source.
    pub fn with_source(
        width: usize,
        height: usize,
        seed: u64,
        params: FlowFieldParams,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self, AnimationError> {
        if width == 0 || height == 0 {
            return Err(AnimationError::InvalidDimensions);
        }
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.particles)
            .map(|_| {
                let pos = DVec2::new(
                    rng.next_f64() * width as f64,
                    rng.next_f64() * height as f64,
                );
                let size = rng.next_range(SIZE_MIN, SIZE_MAX);
                let color = params.palette.pick(&mut rng);
                let alpha = rng.next_range(ALPHA_MIN, ALPHA_MAX);
                let hue = rng.next_f64() * 360.0;
                Particle {
                    pos,
                    vel: DVec2::ZERO,
                    size,
                    color,
                    alpha,
                    hue,
                }
            })
            .collect();
        Ok(Self {
            width,
            height,
            params,
            particles,
            noise,
        })
    }

    /// Creates a flow field from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, AnimationError> {
        Self::new(width, height, seed, FlowFieldParams::from_json(json_params)?)
    }

    /// Read-only access to the particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current color mode.
    pub fn color_mode(&self) -> ColorMode {
        self.params.color_mode
    }

    /// The trail color of a particle at the given frame.
    fn trail_color(&self, particle: &Particle, frame: u64) -> Srgb {
        match self.params.color_mode {
            ColorMode::Palette => particle.color,
            ColorMode::Hue => hsb_to_srgb(
                particle.hue + frame as f64 * self.params.hue_speed,
                HUE_SATURATION,
                HUE_BRIGHTNESS,
            ),
        }
    }

    /// Draws a particle's synthetic trail: samples stepped backward along the
    /// current velocity, each rendered at every wrap copy near the visible
    /// bounds so the trail does not pop at the seam.
    fn draw_trail(&self, surface: &mut Surface, particle: &Particle, frame: u64) {
        let len = self.params.trail_len;
        if len == 0 {
            return;
        }
        let w = self.width as f64;
        let h = self.height as f64;
        let color = self.trail_color(particle, frame);
        for i in 0..len {
            let fade = 1.0 - i as f64 / len as f64;
            let sample = particle.pos - particle.vel * (i as f64 * TRAIL_STEP);
            for copy in torus::wrap_copies(sample, w, h, WRAP_MARGIN) {
                surface.fill_circle(
                    copy,
                    particle.size * fade,
                    color.with_alpha(particle.alpha * fade),
                );
            }
        }
    }
}

impl Animation for FlowField {
    fn tick(&mut self, surface: &mut Surface, frame: u64) -> Result<(), AnimationError> {
        if surface.width() != self.width || surface.height() != self.height {
            return Err(AnimationError::DimensionMismatch {
                want_w: self.width,
                want_h: self.height,
                got_w: surface.width(),
                got_h: surface.height(),
            });
        }
        let w = self.width as f64;
        let h = self.height as f64;
        let time = frame as f64 * self.params.time_scale;

        for particle in &mut self.particles {
            let value = self.noise.sample(
                particle.pos.x * self.params.noise_scale,
                particle.pos.y * self.params.noise_scale,
                time,
            );
            // The field spans two full turns, so opposite headings are
            // reachable from nearby samples.
            let angle = value * 2.0 * TAU;
            particle.vel += DVec2::from_angle(angle) * self.params.noise_strength;
            particle.vel = particle.vel.clamp_length_max(self.params.max_speed);
            particle.pos = torus::wrap_point(particle.pos + particle.vel, w, h);
        }

        for particle in &self.particles {
            self.draw_trail(surface, particle, frame);
        }

        if self.params.vignette {
            let center = DVec2::new(w / 2.0, h / 2.0);
            surface.fill_radial_gradient(
                center,
                w / 2.0,
                Rgba::rgb8(245, 247, 250).with_alpha(0.0),
                Rgba::rgb8(235, 240, 245).with_alpha(0.8),
            );
        }
        Ok(())
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError> {
        if width == 0 || height == 0 {
            return Err(AnimationError::InvalidDimensions);
        }
        // Particles keep their positions; the next tick re-wraps them
        // against the new extents.
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn params(&self) -> Value {
        let palette: Vec<String> = self
            .params
            .palette
            .colors()
            .iter()
            .map(|c| c.to_hex())
            .collect();
        json!({
            "color_mode": self.params.color_mode.name(),
            "particles": self.params.particles,
            "noise_scale": self.params.noise_scale,
            "time_scale": self.params.time_scale,
            "noise_strength": self.params.noise_strength,
            "max_speed": self.params.max_speed,
            "trail_len": self.params.trail_len,
            "hue_speed": self.params.hue_speed,
            "vignette": self.params.vignette,
            "palette": palette,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "color_mode": {
                "type": "string",
                "default": "palette",
                "values": ["palette", "hue"],
                "description": "Coloring model: fixed palette colors or a cycling hue wheel"
            },
            "particles": {
                "type": "integer",
                "default": PALETTE_PARTICLES,
                "min": 0,
                "max": 2000,
                "description": "Particle count, fixed for the animation's lifetime"
            },
            "noise_scale": {
                "type": "number",
                "default": DEFAULT_NOISE_SCALE,
                "min": 0.0,
                "max": 0.1,
                "description": "Spatial frequency of the steering field"
            },
            "time_scale": {
                "type": "number",
                "default": DEFAULT_TIME_SCALE,
                "min": 0.0,
                "max": 0.1,
                "description": "Advance of the noise time coordinate per frame"
            },
            "noise_strength": {
                "type": "number",
                "default": DEFAULT_NOISE_STRENGTH,
                "min": 0.0,
                "max": 5.0,
                "description": "Steering impulse added to velocity each frame"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Speed cap; clamping preserves direction"
            },
            "trail_len": {
                "type": "integer",
                "default": DEFAULT_TRAIL_LEN,
                "min": 0,
                "max": 100,
                "description": "Synthetic trail samples per particle"
            },
            "hue_speed": {
                "type": "number",
                "default": DEFAULT_HUE_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Hue advance per frame in hue mode"
            },
            "vignette": {
                "type": "boolean",
                "default": true,
                "description": "Overlay a radial vignette after all particles"
            },
            "palette": {
                "type": "string",
                "default": "carnival",
                "description": "Named palette particles draw colors from"
            }
        })
    }
}
