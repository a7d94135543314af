use crate::measure::Rate;
use rand_chacha::ChaChaRng;
use rand_core::{Rng, SeedableRng as _};

/// `2^-53`: spacing of the 53-bit grid used for draws in `[0, 1)`.
const SCALE_53: f64 = 1.0 / (1u64 << 53) as f64;
/// `2^-52`: spacing of the 52-bit grid used for draws in `(0, 1)`.
const SCALE_52: f64 = 1.0 / (1u64 << 52) as f64;

/// Source of every random draw of a simulation.
///
/// A single generator feeds the interarrival times, the service times and
/// the routing decisions, in the order the engine asks for them. Seeding it
/// is therefore enough to make a run reproducible bit for bit.
///
/// The generator is generic over the underlying [`Rng`] so tests can
/// inject their own source. [`VariateGenerator::seeded`] builds the default
/// [`ChaChaRng`] based generator.
///
/// ```
/// use qnsim_core::{Rate, VariateGenerator};
///
/// let mut a = VariateGenerator::seeded(7);
/// let mut b = VariateGenerator::seeded(7);
/// let rate = Rate::new(2.0).unwrap();
///
/// let x = a.exponential(rate);
/// assert!(x > 0.0 && x.is_finite());
/// assert_eq!(x, b.exponential(rate));
/// ```
#[derive(Debug, Clone)]
pub struct VariateGenerator<R = ChaChaRng> {
    rng: R,
}

impl VariateGenerator<ChaChaRng> {
    /// A generator backed by a [`ChaChaRng`] seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaChaRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VariateGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform draw in `[0, 1)`.
    ///
    /// Uses the 53 most significant bits of a `u64` so the result is
    /// exactly representable and can never round up to `1.0`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        closed_open(self.rng.next_u64())
    }

    /// Uniform draw in the open interval `(0, 1)`.
    ///
    /// The draw is the centre of one of `2^52` equal cells, so it lies in
    /// `[2^-53, 1 - 2^-53]` and both `u` and `1 - u` are exact, non-zero
    /// and different from `1`.
    #[inline]
    pub fn open_uniform(&mut self) -> f64 {
        open(self.rng.next_u64())
    }

    /// Exponentially distributed duration with the given `rate`.
    ///
    /// Computed by inversion, `-ln(1 - u) / rate`, with `u` drawn from
    /// [`open_uniform`](Self::open_uniform). The logarithm's argument is
    /// in `(0, 1)`, so the result is strictly positive and finite.
    #[inline]
    pub fn exponential(&mut self, rate: Rate) -> f64 {
        let u = self.open_uniform();
        -(1.0 - u).ln() / rate.value()
    }
}

#[inline(always)]
fn closed_open(bits: u64) -> f64 {
    (bits >> 11) as f64 * SCALE_53
}

#[inline(always)]
fn open(bits: u64) -> f64 {
    ((bits >> 12) as f64 + 0.5) * SCALE_52
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_open_extremes() {
        assert_eq!(closed_open(0), 0.0);
        let top = closed_open(u64::MAX);
        assert!(top < 1.0, "{top} should be below 1");
    }

    #[test]
    fn open_extremes() {
        let low = open(0);
        let high = open(u64::MAX);
        assert!(low > 0.0);
        assert!(high < 1.0);
        assert!((1.0 - high) > 0.0 && (1.0 - high) < 1.0);
        assert!((1.0 - low) < 1.0);
    }

    #[test]
    fn exponential_at_extremes_is_positive_and_finite() {
        for u in [open(0), open(u64::MAX)] {
            let x = -(1.0 - u).ln();
            assert!(x > 0.0 && x.is_finite(), "degenerate sample {x}");
        }
    }

    #[test]
    fn exponential_is_positive_and_finite() {
        let rate = Rate::new(1.0).unwrap();
        let mut generator = VariateGenerator::seeded(1);
        for _ in 0..10_000 {
            let x = generator.exponential(rate);
            assert!(x > 0.0 && x.is_finite(), "degenerate sample {x}");
        }
    }

    #[test]
    fn exponential_mean() {
        let rate = Rate::new(4.0).unwrap();
        let mut generator = VariateGenerator::seeded(42);
        let n = 100_000;
        let mean = (0..n).map(|_| generator.exponential(rate)).sum::<f64>() / n as f64;
        assert!((mean - 0.25).abs() < 0.01, "mean was {mean}");
    }

    #[test]
    fn uniform_mean() {
        let mut generator = VariateGenerator::seeded(42);
        let n = 100_000;
        let mean = (0..n).map(|_| generator.uniform()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean was {mean}");
    }

    #[test]
    fn reproducible_with_same_seed() {
        let rate = Rate::new(3.0).unwrap();
        let draw = |seed| {
            let mut generator = VariateGenerator::seeded(seed);
            (0..100)
                .map(|_| generator.exponential(rate))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(99), draw(99));
        assert_ne!(draw(99), draw(100));
    }
}
