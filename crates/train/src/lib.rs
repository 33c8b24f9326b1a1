#![deny(unsafe_code)]
//! Orbiting train illustration.
//!
//! A closed circular rail with a locomotive and a chain of wagons riding it,
//! plus a smoke emitter at the locomotive's exhaust. Segments are not
//! simulated independently: every position and rotation is derived from the
//! frame counter through a single master angle and a constant per-segment
//! phase lag, which keeps the chain spacing exact at every frame and makes
//! the motion fully repeatable. A faster secondary oscillator adds a small
//! deterministic vibration so the machine reads as running rather than
//! gliding.
//!
//! If the viewport has no area at setup the whole scene deactivates: every
//! frame callback becomes a no-op instead of an error.

mod smoke;

pub use smoke::{SmokePuff, SmokeTrail};

use backdrop_core::error::AnimationError;
use backdrop_core::palette::ThemeColors;
use backdrop_core::params::{param_f64, param_usize};
use backdrop_core::prng::Xorshift64;
use backdrop_core::surface::Surface;
use backdrop_core::{Animation, Rgba};
use glam::DVec2;
use serde_json::{json, Value};
use std::f64::consts::FRAC_PI_2;

/// Radians the master angle advances per frame.
const DEFAULT_ANGULAR_SPEED: f64 = 0.02;
/// Constant angular lag between consecutive segments.
const DEFAULT_SPACING: f64 = 0.3;
/// Rail circle radius in surface units.
const DEFAULT_RADIUS: f64 = 250.0;
/// Radians the vibration oscillator advances per frame.
const DEFAULT_VIBRATION_SPEED: f64 = 0.2;
/// Wagons behind the locomotive.
const DEFAULT_WAGONS: usize = 4;
/// Rail outline sample step in degrees.
const RAIL_STEP_DEG: usize = 5;
/// Distance from the locomotive's center to its exhaust, along the heading.
const EXHAUST_OFFSET: f64 = 25.0;
/// Angular speed at which the vibration reaches full intensity.
const FULL_VIBRATION_SPEED: f64 = 0.05;

/// What a segment is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Locomotive,
    Wagon,
}

/// One link of the train.
///
/// `pos` and `rotation` are recomputed from the frame counter every tick;
/// only `phase` is constant state.
#[derive(Debug, Clone)]
pub struct TrainSegment {
    pub kind: SegmentKind,
    /// Angular lag behind the locomotive.
    pub phase: f64,
    /// Current position in surface coordinates.
    pub pos: DVec2,
    /// Current rotation: rail tangent plus the vibration jitter.
    pub rotation: f64,
}

/// Tunable parameters for the train scene.
#[derive(Debug, Clone)]
pub struct TrainParams {
    /// Wagons behind the locomotive.
    pub wagons: usize,
    /// Angular lag between consecutive segments.
    pub spacing: f64,
    /// Master angle advance per frame.
    pub angular_speed: f64,
    /// Rail circle radius.
    pub radius: f64,
    /// Vibration oscillator advance per frame.
    pub vibration_speed: f64,
    /// Page-level named colors the wagons are tinted from.
    pub colors: ThemeColors,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            wagons: DEFAULT_WAGONS,
            spacing: DEFAULT_SPACING,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            radius: DEFAULT_RADIUS,
            vibration_speed: DEFAULT_VIBRATION_SPEED,
            colors: ThemeColors::default(),
        }
    }
}

impl TrainParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys. Malformed theme color hex strings error.
    pub fn from_json(params: &Value) -> Result<Self, AnimationError> {
        Ok(Self {
            wagons: param_usize(params, "wagons", DEFAULT_WAGONS),
            spacing: param_f64(params, "spacing", DEFAULT_SPACING),
            angular_speed: param_f64(params, "angular_speed", DEFAULT_ANGULAR_SPEED),
            radius: param_f64(params, "radius", DEFAULT_RADIUS),
            vibration_speed: param_f64(params, "vibration_speed", DEFAULT_VIBRATION_SPEED),
            colors: ThemeColors::from_json(params)?,
        })
    }
}

/// Maps points from a segment's local frame (x forward along the heading,
/// y across it) onto the surface.
struct Placement {
    origin: DVec2,
    cos: f64,
    sin: f64,
}

impl Placement {
    fn new(segment: &TrainSegment) -> Self {
        let (sin, cos) = segment.rotation.sin_cos();
        Self {
            origin: segment.pos,
            cos,
            sin,
        }
    }

    fn at(&self, local: DVec2) -> DVec2 {
        self.origin
            + DVec2::new(
                local.x * self.cos - local.y * self.sin,
                local.x * self.sin + local.y * self.cos,
            )
    }

    /// Corners of a local axis-aligned rect, mapped to the surface.
    fn rect(&self, min: DVec2, size: DVec2) -> [DVec2; 4] {
        [
            self.at(min),
            self.at(min + DVec2::new(size.x, 0.0)),
            self.at(min + size),
            self.at(min + DVec2::new(0.0, size.y)),
        ]
    }
}

/// Linearly remaps `value` from one range onto another.
fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    to_min + (value - from_min) * (to_max - to_min) / (from_max - from_min)
}

/// Fills a rect given in a segment's local frame.
fn fill_rect(surface: &mut Surface, place: &Placement, min: DVec2, size: DVec2, color: Rgba) {
    surface.fill_quad(place.rect(min, size), color);
}

/// Fills a local rect with a border: the border quad straddles the rect
/// edge, the fill quad is inset by the border weight.
fn bordered_rect(
    surface: &mut Surface,
    place: &Placement,
    min: DVec2,
    size: DVec2,
    weight: f64,
    fill: Rgba,
    border: Rgba,
) {
    let half = DVec2::splat(weight * 0.5);
    surface.fill_quad(place.rect(min - half, size + half * 2.0), border);
    surface.fill_quad(place.rect(min + half, size - half * 2.0), fill);
}

/// Orbiting train scene.
///
/// Owns the rail outline, the segment chain, and the smoke pool; the host
/// owns the frame counter and the surface, and clears the surface before
/// each `tick`.
pub struct Train {
    width: usize,
    height: usize,
    params: TrainParams,
    /// Unit-circle outline samples, scaled by the rail radius when drawn.
    rail_points: Vec<DVec2>,
    segments: Vec<TrainSegment>,
    smoke: SmokeTrail,
    rng: Xorshift64,
    active: bool,
}

impl Train {
    /// Creates the scene. A zero-area viewport deactivates it: construction
    /// still succeeds, but every `tick` is a no-op.
    pub fn new(width: usize, height: usize, seed: u64, params: TrainParams) -> Self {
        let active = width > 0 && height > 0;
        let rail_points = (0..360)
            .step_by(RAIL_STEP_DEG)
            .map(|deg| {
                let rad = (deg as f64).to_radians();
                DVec2::new(rad.cos(), rad.sin())
            })
            .collect();
        let segments = (0..=params.wagons)
            .map(|i| TrainSegment {
                kind: if i == 0 {
                    SegmentKind::Locomotive
                } else {
                    SegmentKind::Wagon
                },
                phase: i as f64 * params.spacing,
                pos: DVec2::ZERO,
                rotation: 0.0,
            })
            .collect();
        Self {
            width,
            height,
            params,
            rail_points,
            segments,
            smoke: SmokeTrail::new(),
            rng: Xorshift64::new(seed),
            active,
        }
    }

    /// Creates the scene from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, AnimationError> {
        Ok(Self::new(width, height, seed, TrainParams::from_json(json_params)?))
    }

    /// Whether the scene renders at all.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Read-only access to the segment chain, locomotive first.
    pub fn segments(&self) -> &[TrainSegment] {
        &self.segments
    }

    /// Read-only access to the smoke pool.
    pub fn smoke(&self) -> &SmokeTrail {
        &self.smoke
    }

    /// Draws the rail bed: a soft halo, the cross-ties with their light
    /// echo, and the two rails with a faint offset highlight.
    fn draw_rails(&self, surface: &mut Surface, center: DVec2) {
        let radius = self.params.radius;
        surface.stroke_circle(
            center + DVec2::new(2.0, 2.0),
            radius + 10.0,
            8.0,
            Rgba::gray8(200).with_alpha8(30),
        );

        let echo = DVec2::new(1.0, 1.0);
        for point in &self.rail_points {
            let inner = center + *point * (radius - 15.0);
            let outer = center + *point * (radius + 15.0);
            surface.stroke_line(inner, outer, 4.0, Rgba::gray8(100));
            surface.stroke_line(inner + echo, outer + echo, 4.0, Rgba::gray8(180));
        }

        for offset in [-10.0, 10.0] {
            self.stroke_ring(surface, center, radius + offset, DVec2::ZERO, 3.0, Rgba::gray8(80));
            self.stroke_ring(
                surface,
                center,
                radius + offset,
                echo,
                1.0,
                Rgba::gray8(200).with_alpha8(30),
            );
        }
    }

    /// Strokes a closed polyline through the rail outline samples.
    fn stroke_ring(
        &self,
        surface: &mut Surface,
        center: DVec2,
        radius: f64,
        nudge: DVec2,
        weight: f64,
        color: Rgba,
    ) {
        for (i, point) in self.rail_points.iter().enumerate() {
            let next = self.rail_points[(i + 1) % self.rail_points.len()];
            surface.stroke_line(
                center + *point * radius + nudge,
                center + next * radius + nudge,
                weight,
                color,
            );
        }
    }

    fn draw_locomotive(&self, surface: &mut Surface, segment: &TrainSegment, frame: u64, vib: DVec2) {
        let place = Placement::new(segment);
        let pulse = (frame as f64 * 0.1).sin();

        // drop shadow, breathing with the pulse and the vertical shake
        let drop = remap(pulse, -1.0, 1.0, 1.0, 3.0) + vib.y.abs() * 2.0;
        surface.fill_ellipse(
            place.at(DVec2::new(drop + vib.x, drop + vib.y)),
            DVec2::new(37.5, 24.0),
            segment.rotation,
            Rgba::gray8(220).with_alpha8(100),
        );

        // body and running strips
        bordered_rect(
            surface,
            &place,
            DVec2::new(-40.0, -15.0),
            DVec2::new(60.0, 30.0),
            2.0,
            Rgba::gray8(30),
            Rgba::gray8(40),
        );
        fill_rect(surface, &place, DVec2::new(-38.0, -13.0), DVec2::new(56.0, 2.0), Rgba::gray8(200));
        fill_rect(surface, &place, DVec2::new(-38.0, 11.0), DVec2::new(56.0, 2.0), Rgba::gray8(200));

        // tapered nose
        surface.fill_quad(
            [
                place.at(DVec2::new(20.0, -15.0)),
                place.at(DVec2::new(35.0, -8.0)),
                place.at(DVec2::new(35.0, 8.0)),
                place.at(DVec2::new(20.0, 15.0)),
            ],
            Rgba::gray8(40),
        );

        // cab with glazed windows and glints
        fill_rect(surface, &place, DVec2::new(-35.0, -18.0), DVec2::new(25.0, 36.0), Rgba::gray8(50));
        let glass = Rgba::rgb8(220, 220, 255).with_alpha8(200);
        fill_rect(surface, &place, DVec2::new(-30.0, -13.0), DVec2::new(8.0, 8.0), glass);
        fill_rect(surface, &place, DVec2::new(-30.0, 5.0), DVec2::new(8.0, 8.0), glass);
        let glint = Rgba::gray8(255).with_alpha8(150);
        fill_rect(surface, &place, DVec2::new(-29.0, -12.0), DVec2::new(2.0, 6.0), glint);
        fill_rect(surface, &place, DVec2::new(-29.0, 6.0), DVec2::new(2.0, 6.0), glint);

        // headlight: housing, pulsing lamp, wide glow
        fill_rect(surface, &place, DVec2::new(25.0, -8.0), DVec2::new(8.0, 16.0), Rgba::gray8(40));
        let lamp = place.at(DVec2::new(35.0, 0.0));
        let pulse_alpha = remap(pulse, -1.0, 1.0, 100.0, 255.0) / 255.0;
        surface.fill_circle(lamp, 3.0, Rgba::rgb8(255, 255, 200).with_alpha(pulse_alpha));
        let glow_alpha = remap(pulse, -1.0, 1.0, 30.0, 80.0) / 255.0;
        surface.fill_circle(lamp, 10.0, Rgba::rgb8(255, 255, 200).with_alpha(glow_alpha));

        // handrails
        let rail_color = Rgba::gray8(200);
        surface.stroke_line(
            place.at(DVec2::new(-35.0, -14.0)),
            place.at(DVec2::new(15.0, -14.0)),
            1.0,
            rail_color,
        );
        surface.stroke_line(
            place.at(DVec2::new(-35.0, 14.0)),
            place.at(DVec2::new(15.0, 14.0)),
            1.0,
            rail_color,
        );
    }

    fn draw_wagon(&self, surface: &mut Surface, segment: &TrainSegment, frame: u64, vib: DVec2) {
        let place = Placement::new(segment);
        let colors = &self.params.colors;

        let drop = remap((frame as f64 * 0.1).sin(), -1.0, 1.0, 1.0, 3.0) + vib.y.abs() * 2.0;
        surface.fill_ellipse(
            place.at(DVec2::new(drop + vib.x, drop + vib.y)),
            DVec2::new(35.0, 21.5),
            segment.rotation,
            Rgba::gray8(220).with_alpha8(100),
        );

        // body in page colors, with running strips
        bordered_rect(
            surface,
            &place,
            DVec2::new(-35.0, -15.0),
            DVec2::new(50.0, 30.0),
            2.0,
            Rgba::from(colors.tomato),
            Rgba::from(colors.razzmatazz),
        );
        fill_rect(surface, &place, DVec2::new(-33.0, -13.0), DVec2::new(46.0, 2.0), Rgba::gray8(200));
        fill_rect(surface, &place, DVec2::new(-33.0, 11.0), DVec2::new(46.0, 2.0), Rgba::gray8(200));

        // glazed band tinted from the page palette
        fill_rect(
            surface,
            &place,
            DVec2::new(-31.0, -11.0),
            DVec2::new(42.0, 22.0),
            Rgba::from(colors.blue).with_alpha8(0x40),
        );

        // end bumpers and a sheen across the glazing
        bordered_rect(
            surface,
            &place,
            DVec2::new(-40.0, -4.0),
            DVec2::new(10.0, 8.0),
            2.0,
            Rgba::gray8(40),
            Rgba::gray8(60),
        );
        bordered_rect(
            surface,
            &place,
            DVec2::new(15.0, -4.0),
            DVec2::new(10.0, 8.0),
            2.0,
            Rgba::gray8(40),
            Rgba::gray8(60),
        );
        fill_rect(
            surface,
            &place,
            DVec2::new(-31.0, -10.0),
            DVec2::new(42.0, 5.0),
            Rgba::gray8(255).with_alpha8(30),
        );
    }
}

impl Animation for Train {
    fn tick(&mut self, surface: &mut Surface, frame: u64) -> Result<(), AnimationError> {
        if !self.active {
            return Ok(());
        }
        if surface.width() != self.width || surface.height() != self.height {
            return Err(AnimationError::DimensionMismatch {
                want_w: self.width,
                want_h: self.height,
                got_w: surface.width(),
                got_h: surface.height(),
            });
        }
        let center = DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        let master = frame as f64 * self.params.angular_speed;
        let vib_angle = frame as f64 * self.params.vibration_speed;
        // The raw oscillation shakes the shadows and the exhaust; segment
        // positions feel it scaled by how hard the train is working.
        let vib = DVec2::new(vib_angle.cos() * 0.5, (vib_angle * 1.5).sin() * 0.3);
        let intensity = self.params.angular_speed / FULL_VIBRATION_SPEED;

        self.draw_rails(surface, center);

        for (i, segment) in self.segments.iter_mut().enumerate() {
            let t = master - i as f64 * self.params.spacing;
            segment.pos = center + DVec2::new(t.cos(), t.sin()) * self.params.radius + vib * intensity;
            segment.rotation = t + FRAC_PI_2 + vib_angle.sin() * 0.01;
        }

        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Locomotive => {
                    self.draw_locomotive(surface, segment, frame, vib);
                    let exhaust =
                        segment.pos + DVec2::from_angle(segment.rotation) * EXHAUST_OFFSET + vib;
                    self.smoke.emit(exhaust, &mut self.rng);
                }
                SegmentKind::Wagon => self.draw_wagon(surface, segment, frame, vib),
            }
        }

        self.smoke.update();
        self.smoke.render(surface, &mut self.rng);
        Ok(())
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), AnimationError> {
        if width == 0 || height == 0 {
            return Err(AnimationError::InvalidDimensions);
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn params(&self) -> Value {
        let colors = &self.params.colors;
        json!({
            "wagons": self.params.wagons,
            "spacing": self.params.spacing,
            "angular_speed": self.params.angular_speed,
            "radius": self.params.radius,
            "vibration_speed": self.params.vibration_speed,
            "tomato": colors.tomato.to_hex(),
            "razzmatazz": colors.razzmatazz.to_hex(),
            "mint": colors.mint.to_hex(),
            "saffron": colors.saffron.to_hex(),
            "blue": colors.blue.to_hex(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "wagons": {
                "type": "integer",
                "default": DEFAULT_WAGONS,
                "min": 0,
                "max": 20,
                "description": "Wagons behind the locomotive"
            },
            "spacing": {
                "type": "number",
                "default": DEFAULT_SPACING,
                "min": 0.0,
                "max": 2.0,
                "description": "Angular lag between consecutive segments"
            },
            "angular_speed": {
                "type": "number",
                "default": DEFAULT_ANGULAR_SPEED,
                "min": 0.0,
                "max": 0.2,
                "description": "Master angle advance per frame"
            },
            "radius": {
                "type": "number",
                "default": DEFAULT_RADIUS,
                "min": 10.0,
                "max": 1000.0,
                "description": "Rail circle radius in surface units"
            },
            "vibration_speed": {
                "type": "number",
                "default": DEFAULT_VIBRATION_SPEED,
                "min": 0.0,
                "max": 1.0,
                "description": "Vibration oscillator advance per frame"
            },
            "tomato": {
                "type": "string",
                "default": "#fb4d3d",
                "description": "Wagon body color"
            },
            "razzmatazz": {
                "type": "string",
                "default": "#e40066",
                "description": "Wagon outline color"
            },
            "mint": {
                "type": "string",
                "default": "#03cea4",
                "description": "Page accent color"
            },
            "saffron": {
                "type": "string",
                "default": "#eac435",
                "description": "Page accent color"
            },
            "blue": {
                "type": "string",
                "default": "#345995",
                "description": "Wagon glazing tint"
            }
        })
    }
}
