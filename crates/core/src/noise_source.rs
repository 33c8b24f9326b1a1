//! Coherent noise sources driving the particle direction field.
//!
//! A [`NoiseSource`] is a smooth pseudo-random scalar function of position
//! and time. The flow field multiplies the sampled value into an angle, so
//! the contract is tight: values land in [0, 1) and the same inputs always
//! produce the same output.

use noise::{NoiseFn, Perlin};

/// Largest f64 strictly below 1.0, used to clamp samples into [0, 1).
const MAX_BELOW_ONE: f64 = 1.0 - f64::EPSILON;

/// A deterministic scalar noise field over (x, y, time).
///
/// All implementations must return values in [0, 1) and be deterministic:
/// same inputs = same output.
pub trait NoiseSource: Send + Sync {
    /// Samples the field at position (x, y) at the given time.
    fn sample(&self, x: f64, y: f64, time: f64) -> f64;
}

/// Perlin noise source.
///
/// The raw Perlin output in [-1, 1] is remapped to [0, 1) so callers can
/// scale it straight into angles or offsets.
pub struct Perlin3 {
    noise: Perlin,
}

impl Perlin3 {
    /// Creates a new Perlin noise source with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl NoiseSource for Perlin3 {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        let raw = self.noise.get([x, y, time]);
        ((raw + 1.0) * 0.5).clamp(0.0, MAX_BELOW_ONE)
    }
}

/// Fixed-value source. Every sample returns the same value, which makes
/// particle trajectories analytically predictable in tests.
pub struct Constant(pub f64);

impl NoiseSource for Constant {
    fn sample(&self, _x: f64, _y: f64, _time: f64) -> f64 {
        self.0.clamp(0.0, MAX_BELOW_ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perlin_sample_is_deterministic() {
        let a = Perlin3::new(99);
        let b = Perlin3::new(99);
        let va = a.sample(1.5, 2.3, 0.7);
        let vb = b.sample(1.5, 2.3, 0.7);
        assert_eq!(va, vb, "same seed and inputs must give identical samples");
    }

    #[test]
    fn perlin_different_seeds_produce_different_fields() {
        let a = Perlin3::new(1);
        let b = Perlin3::new(2);
        let points = [(1.3, 2.7, 0.5), (0.2, 0.9, 1.1), (5.5, 3.3, 2.2)];
        let diverged = points
            .iter()
            .any(|&(x, y, t)| a.sample(x, y, t) != b.sample(x, y, t));
        assert!(diverged, "different seeds produced identical fields");
    }

    #[test]
    fn perlin_samples_stay_in_half_open_unit_interval() {
        let source = Perlin3::new(42);
        for i in 0..500 {
            let x = i as f64 * 0.13;
            let y = i as f64 * 0.07;
            let t = i as f64 * 0.011;
            let v = source.sample(x, y, t);
            assert!(
                (0.0..1.0).contains(&v),
                "sample {v} out of [0, 1) at ({x}, {y}, {t})"
            );
        }
    }

    #[test]
    fn constant_source_returns_its_value() {
        let source = Constant(0.25);
        assert_eq!(source.sample(0.0, 0.0, 0.0), 0.25);
        assert_eq!(source.sample(100.0, -3.0, 7.0), 0.25);
    }

    #[test]
    fn constant_source_clamps_into_half_open_interval() {
        let high = Constant(2.0);
        let v = high.sample(0.0, 0.0, 0.0);
        assert!(v < 1.0, "clamped sample {v} must stay below 1");
        let low = Constant(-1.0);
        assert_eq!(low.sample(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn noise_sources_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Perlin3>();
        assert_send_sync::<Constant>();
        assert_send_sync::<Box<dyn NoiseSource>>();
    }

    // -- Remap identity test --

    #[test]
    fn perlin_sample_is_the_remapped_raw_output() {
        // Non-integer coordinates avoid Perlin lattice zeros. Replay files
        // depend on this exact remap staying bit-stable.
        let raw = Perlin::new(42).get([1.3, 2.7, 0.5]);
        let expected = ((raw + 1.0) * 0.5).clamp(0.0, MAX_BELOW_ONE);
        let sampled = Perlin3::new(42).sample(1.3, 2.7, 0.5);
        assert_eq!(sampled.to_bits(), expected.to_bits());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_coord() -> impl Strategy<Value = f64> {
            -1e4_f64..1e4
        }

        proptest! {
            #[test]
            fn perlin_sample_in_half_open_unit_interval(
                x in any_coord(),
                y in any_coord(),
                t in 0.0_f64..100.0,
            ) {
                let source = Perlin3::new(42);
                let v = source.sample(x, y, t);
                prop_assert!(
                    (0.0..1.0).contains(&v),
                    "sample {v} out of [0, 1) at ({x}, {y}, {t})"
                );
            }

            #[test]
            fn constant_sample_in_half_open_unit_interval(value: f64) {
                prop_assume!(value.is_finite());
                let source = Constant(value);
                let v = source.sample(0.0, 0.0, 0.0);
                prop_assert!(
                    (0.0..1.0).contains(&v),
                    "constant sample {v} out of [0, 1) for value {value}"
                );
            }
        }
    }
}
