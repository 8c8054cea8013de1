//! Small derivative-free optimiser shared by `regress` and `stretch`.
//!
//! - [`nelder_mead`]: simplex search with optional box bounds.
//! - [`Squash`]: maps an unconstrained coordinate into a bounded interval
//!   through the standard normal CDF, so bounded problems can be searched
//!   without constraints.
//!
//! Both are fully deterministic: no randomness, a fixed starting simplex and
//! the pure-Rust `statrs` normal distribution.

mod nelder_mead;

pub use nelder_mead::{nelder_mead, Minimum};

use statrs::distribution::{ContinuousCDF, Normal};

/// Bounded reparameterisation `lo + (hi - lo) * Φ(u)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Squash {
    pub lo: f64,
    pub hi: f64,
}

impl Squash {
    pub fn new((lo, hi): (f64, f64)) -> Self {
        Self { lo, hi }
    }

    /// Map an unconstrained value into `[lo, hi]`; `0.0` maps to the midpoint.
    pub fn apply(&self, u: f64) -> f64 {
        self.lo + (self.hi - self.lo) * Normal::standard().cdf(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_hits_reference_quantiles() {
        let unit = Squash::new((0.0, 1.0));
        assert!((unit.apply(0.0) - 0.5).abs() < 1e-12);
        assert!((unit.apply(1.0) - 0.841_344_746).abs() < 1e-6);
        assert!((unit.apply(-1.96) - 0.024_997_895).abs() < 1e-6);
        assert!(unit.apply(40.0) <= 1.0);
        assert!(unit.apply(-40.0) >= 0.0);
    }

    #[test]
    fn squash_stays_in_bounds_and_is_monotonic() {
        let s = Squash::new((-0.1, 0.1));
        assert!((s.apply(0.0)).abs() < 1e-12);
        let mut prev = s.apply(-5.0);
        assert!(prev >= -0.1);
        for i in -49..=50 {
            let v = s.apply(i as f64 * 0.1);
            assert!(v > prev, "not increasing at u={}", i as f64 * 0.1);
            assert!(v <= 0.1 + 1e-12);
            prev = v;
        }
    }
}
