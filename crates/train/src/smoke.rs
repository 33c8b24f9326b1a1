//! Smoke puffs emitted by the locomotive.
//!
//! The only entities in the scene with a real create/destroy lifecycle.
//! Puffs are emitted at a constant rate, drift by a fixed per-puff velocity,
//! grow, and fade until they leave the pool. The pool needs no capacity
//! limit: emission rate is constant and alpha strictly decreases every
//! update, so the population settles at emission rate times lifetime.

use backdrop_core::prng::Xorshift64;
use backdrop_core::surface::Surface;
use backdrop_core::Rgba;
use glam::DVec2;

/// Radius growth per update.
const GROWTH: f64 = 0.15;
/// Opacity lost per update, in 8-bit units.
const FADE: f64 = 3.0;
/// Initial radius range.
const SIZE_MIN: f64 = 1.0;
const SIZE_MAX: f64 = 12.5;
/// Initial opacity range in 8-bit units.
const ALPHA_MIN: f64 = 120.0;
const ALPHA_MAX: f64 = 170.0;
/// Per-axis drift speed range.
const DRIFT: f64 = 0.8;
/// Gray tint range in 8-bit units.
const TINT_MIN: f64 = 80.0;
const TINT_MAX: f64 = 200.0;
/// Sub-pixel nudge applied to each render pass.
const JITTER: f64 = 0.5;

/// One puff of smoke.
#[derive(Debug, Clone)]
pub struct SmokePuff {
    /// Position in surface coordinates.
    pub pos: DVec2,
    /// Constant drift applied every update.
    pub vel: DVec2,
    /// Remaining opacity in 8-bit units; the puff dies at zero.
    pub alpha: f64,
    /// Current radius; grows every update.
    pub size: f64,
    /// Gray tint in [0, 1).
    pub tint: f64,
}

/// The locomotive's smoke pool.
#[derive(Debug, Default)]
pub struct SmokeTrail {
    puffs: Vec<SmokePuff>,
}

impl SmokeTrail {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self { puffs: Vec::new() }
    }

    /// Number of live puffs.
    pub fn len(&self) -> usize {
        self.puffs.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.puffs.is_empty()
    }

    /// Read-only access to the live puffs.
    pub fn puffs(&self) -> &[SmokePuff] {
        &self.puffs
    }

    /// Emits one puff at the exhaust point with randomized size, opacity,
    /// drift, and tint.
    pub fn emit(&mut self, exhaust: DVec2, rng: &mut Xorshift64) {
        self.puffs.push(SmokePuff {
            pos: exhaust,
            size: rng.next_range(SIZE_MIN, SIZE_MAX),
            alpha: rng.next_range(ALPHA_MIN, ALPHA_MAX),
            vel: DVec2::new(rng.next_range(-DRIFT, DRIFT), rng.next_range(-DRIFT, DRIFT)),
            tint: rng.next_range(TINT_MIN, TINT_MAX) / 255.0,
        });
    }

    /// Advances every puff one step and prunes the fully faded.
    ///
    /// Alpha strictly decreases, so every puff eventually leaves the pool;
    /// a pruned puff is never rendered again.
    pub fn update(&mut self) {
        self.puffs.retain_mut(|puff| {
            puff.pos += puff.vel;
            puff.size += GROWTH;
            puff.alpha -= FADE;
            puff.alpha > 0.0
        });
    }

    /// Renders the pool with a soft double pass: a second, slightly larger
    /// circle at half opacity over the first, each nudged by a sub-pixel
    /// jitter for a hazier edge.
    pub fn render(&self, surface: &mut Surface, rng: &mut Xorshift64) {
        for puff in &self.puffs {
            for pass in 0..2_u32 {
                let alpha = puff.alpha * (1.0 - f64::from(pass) / 2.0) / 255.0;
                let nudge = DVec2::new(
                    rng.next_range(-JITTER, JITTER),
                    rng.next_range(-JITTER, JITTER),
                );
                surface.fill_circle(
                    puff.pos + nudge,
                    puff.size + f64::from(pass),
                    Rgba::new(puff.tint, puff.tint, puff.tint, alpha),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Xorshift64 {
        Xorshift64::new(42)
    }

    #[test]
    fn new_pool_is_empty() {
        let pool = SmokeTrail::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }

    #[test]
    fn emit_adds_one_puff_at_the_exhaust() {
        let mut pool = SmokeTrail::new();
        let mut rng = rng();
        pool.emit(DVec2::new(12.0, 34.0), &mut rng);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.puffs()[0].pos, DVec2::new(12.0, 34.0));
    }

    #[test]
    fn emitted_puffs_stay_in_documented_ranges() {
        let mut pool = SmokeTrail::new();
        let mut rng = rng();
        for _ in 0..100 {
            pool.emit(DVec2::ZERO, &mut rng);
        }
        for puff in pool.puffs() {
            assert!((SIZE_MIN..SIZE_MAX).contains(&puff.size), "size {}", puff.size);
            assert!(
                (ALPHA_MIN..ALPHA_MAX).contains(&puff.alpha),
                "alpha {}",
                puff.alpha
            );
            assert!(puff.vel.x.abs() <= DRIFT && puff.vel.y.abs() <= DRIFT);
            assert!((TINT_MIN / 255.0..TINT_MAX / 255.0).contains(&puff.tint));
        }
    }

    #[test]
    fn update_moves_grows_and_fades() {
        let mut pool = SmokeTrail::new();
        let mut rng = rng();
        pool.emit(DVec2::new(5.0, 5.0), &mut rng);
        let before = pool.puffs()[0].clone();
        pool.update();
        let after = &pool.puffs()[0];
        assert_eq!(after.pos, before.pos + before.vel);
        assert!((after.size - (before.size + GROWTH)).abs() < 1e-12);
        assert!((after.alpha - (before.alpha - FADE)).abs() < 1e-12);
    }

    #[test]
    fn alpha_strictly_decreases_until_death() {
        let mut pool = SmokeTrail::new();
        let mut rng = rng();
        pool.emit(DVec2::ZERO, &mut rng);
        let mut last = pool.puffs()[0].alpha;
        while !pool.is_empty() {
            pool.update();
            if let Some(puff) = pool.puffs().first() {
                assert!(puff.alpha < last, "alpha did not decrease: {last} -> {}", puff.alpha);
                last = puff.alpha;
            }
        }
    }

    #[test]
    fn faded_puff_leaves_the_pool() {
        let mut pool = SmokeTrail::new();
        pool.puffs.push(SmokePuff {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            size: 5.0,
            alpha: 2.0,
            tint: 0.5,
        });
        pool.update();
        assert!(pool.is_empty(), "a puff at alpha <= 0 must be pruned");
    }

    #[test]
    fn puff_dying_exactly_at_zero_is_pruned() {
        let mut pool = SmokeTrail::new();
        pool.puffs.push(SmokePuff {
            pos: DVec2::ZERO,
            vel: DVec2::ZERO,
            size: 5.0,
            alpha: FADE,
            tint: 0.5,
        });
        pool.update();
        assert!(pool.is_empty());
    }

    #[test]
    fn constant_emission_settles_to_a_bounded_pool() {
        let mut pool = SmokeTrail::new();
        let mut rng = rng();
        let lifetime_cap = (ALPHA_MAX / FADE).ceil() as usize;
        for _ in 0..300 {
            pool.emit(DVec2::ZERO, &mut rng);
            pool.update();
        }
        assert!(!pool.is_empty());
        assert!(
            pool.len() <= lifetime_cap,
            "pool grew past the lifetime bound: {} > {lifetime_cap}",
            pool.len()
        );
    }

    #[test]
    fn render_paints_gray_pixels() {
        let mut surface = Surface::new(32, 32).unwrap();
        let mut pool = SmokeTrail::new();
        pool.puffs.push(SmokePuff {
            pos: DVec2::new(16.0, 16.0),
            vel: DVec2::ZERO,
            size: 8.0,
            alpha: 170.0,
            tint: 0.5,
        });
        let mut rng = rng();
        pool.render(&mut surface, &mut rng);
        let px = surface.pixel(16, 16).unwrap();
        assert!(px.a > 0.0, "puff center not painted");
        assert!((px.r - px.g).abs() < 1e-12 && (px.g - px.b).abs() < 1e-12, "smoke must be gray");
    }

    #[test]
    fn render_of_empty_pool_paints_nothing() {
        let mut surface = Surface::new(16, 16).unwrap();
        let pool = SmokeTrail::new();
        let mut rng = rng();
        pool.render(&mut surface, &mut rng);
        assert!(surface.to_rgba8().iter().all(|&b| b == 0));
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pool_never_exceeds_the_lifetime_bound(seed: u64, frames in 1_usize..200) {
                let mut pool = SmokeTrail::new();
                let mut rng = Xorshift64::new(seed);
                let cap = (ALPHA_MAX / FADE).ceil() as usize;
                for _ in 0..frames {
                    pool.emit(DVec2::ZERO, &mut rng);
                    pool.update();
                    prop_assert!(pool.len() <= cap);
                }
            }

            #[test]
            fn every_update_strictly_fades_every_puff(seed: u64) {
                let mut pool = SmokeTrail::new();
                let mut rng = Xorshift64::new(seed);
                for _ in 0..5 {
                    pool.emit(DVec2::ZERO, &mut rng);
                }
                for _ in 0..20 {
                    let before: Vec<f64> = pool.puffs().iter().map(|p| p.alpha).collect();
                    pool.update();
                    for (puff, old) in pool.puffs().iter().zip(&before) {
                        prop_assert!(puff.alpha < *old);
                    }
                }
            }
        }
    }
}
