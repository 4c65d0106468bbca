//! Numerically stable running statistics.
//!
//! One-pass mean/variance accumulation (Welford's recurrence; see Knuth,
//! TAOCP vol 2, 3rd edition, p. 232, and johndcook.com/blog/standard_deviation).
//! A station pushes millions of readings through these accumulators over a
//! multi-year deployment, so the naive sum / sum-of-squares form is off the
//! table: it cancels catastrophically once the squared mean dwarfs the
//! variance.

/// Running mean/variance over an unbounded sample stream.
///
/// Holds only the sample count, the running mean, and the accumulated sum of
/// squared deviations, so memory stays constant no matter how many samples
/// arrive. A zeroed accumulator is the empty state: `count == 0` implies
/// `mean == 0.0` and `sum_sq_dev == 0.0`, and `sum_sq_dev` never goes
/// negative (each Welford increment is a product of two same-signed terms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStat {
    count: u32,
    mean: f64,
    sum_sq_dev: f64,
}

impl RunningStat {
    /// Empty accumulator.
    pub const fn new() -> Self {
        RunningStat {
            count: 0,
            mean: 0.0,
            sum_sq_dev: 0.0,
        }
    }

    /// Fold one finite sample into the accumulator.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        if self.count == 1 {
            self.mean = x;
            // one sample has no spread; sum_sq_dev stays 0
        } else {
            let delta = x - self.mean;
            self.mean += delta / f64::from(self.count);
            self.sum_sq_dev += delta * (x - self.mean);
        }
    }

    /// Number of samples folded in so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Running arithmetic mean, `0.0` while empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Accumulated sum of squared deviations from the mean.
    pub fn sum_sq_dev(&self) -> f64 {
        self.sum_sq_dev
    }

    /// Sample variance (n - 1 denominator), or `0.0` below two samples.
    pub fn sample_variance(&self) -> f64 {
        if self.count > 1 {
            self.sum_sq_dev / f64::from(self.count - 1)
        } else {
            0.0
        }
    }

    /// Sample standard deviation, or `0.0` below two samples.
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Drop back to the empty state.
    pub fn reset(&mut self) {
        *self = RunningStat::new();
    }

    /// Rebuild an accumulator from its persisted fields.
    pub(crate) fn from_raw(count: u32, mean: f64, sum_sq_dev: f64) -> Self {
        RunningStat {
            count,
            mean,
            sum_sq_dev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An empty accumulator reports the defined zero sentinels, not garbage.
    #[test]
    fn empty_accumulator_reports_zeroes() {
        let stat = RunningStat::new();
        assert_eq!(stat.count(), 0);
        assert_eq!(stat.mean(), 0.0);
        assert_eq!(stat.sample_variance(), 0.0);
        assert_eq!(stat.sample_std_dev(), 0.0);
    }

    /// One sample: the mean is that sample, deviation is still undefined (0).
    #[test]
    fn single_sample_has_no_spread() {
        let mut stat = RunningStat::new();
        stat.push(-3.25);
        assert_eq!(stat.count(), 1);
        assert_eq!(stat.mean(), -3.25);
        assert_eq!(stat.sum_sq_dev(), 0.0);
        assert_eq!(stat.sample_std_dev(), 0.0);
    }

    /// The canonical [1, 2, 3] check: mean 2, sample std dev exactly 1.
    #[test]
    fn three_samples_mean_and_std_dev() {
        let mut stat = RunningStat::new();
        for x in [1.0, 2.0, 3.0] {
            stat.push(x);
        }
        assert_eq!(stat.count(), 3);
        assert_eq!(stat.mean(), 2.0);
        assert_eq!(stat.sample_std_dev(), 1.0);
    }

    /// Against a large offset-dominated stream the one-pass result must agree
    /// with the classic two-pass computation; a sum-of-squares accumulator
    /// loses every significant digit of variance on this input.
    #[test]
    fn large_stream_matches_two_pass() {
        const N: usize = 1_000_000;
        const BASE: f64 = 1.0e9;

        let sample = |i: usize| BASE + ((i * 37) % 101) as f64 / 10.0;

        let mut stat = RunningStat::new();
        for i in 0..N {
            stat.push(sample(i));
        }

        // two-pass reference
        let mean: f64 = (0..N).map(sample).sum::<f64>() / N as f64;
        let var: f64 = (0..N).map(|i| (sample(i) - mean).powi(2)).sum::<f64>() / (N as f64 - 1.0);

        assert_eq!(stat.count(), N as u32);
        assert!(
            (stat.mean() - mean).abs() < 1e-3,
            "one-pass mean {} drifted from two-pass {}",
            stat.mean(),
            mean
        );
        let rel = (stat.sample_variance() - var).abs() / var;
        assert!(
            rel < 1e-6,
            "one-pass variance {} vs two-pass {} (relative error {})",
            stat.sample_variance(),
            var,
            rel
        );
        assert!(stat.sum_sq_dev() >= 0.0);
    }

    /// Mean and variance are order-independent up to rounding noise.
    #[test]
    fn permutations_agree_within_tolerance() {
        let forward = [4.5, -2.0, 7.25, 0.5, 1.0, -0.125, 3.75, 2.5];
        let mut shuffled = forward;
        shuffled.reverse();
        shuffled.swap(1, 5);
        shuffled.swap(0, 3);

        let mut a = RunningStat::new();
        let mut b = RunningStat::new();
        for x in forward {
            a.push(x);
        }
        for x in shuffled {
            b.push(x);
        }

        assert!((a.mean() - b.mean()).abs() < 1e-12);
        assert!((a.sample_variance() - b.sample_variance()).abs() < 1e-12);
    }

    /// `reset` lands back in the exact empty state.
    #[test]
    fn reset_returns_to_empty() {
        let mut stat = RunningStat::new();
        stat.push(12.0);
        stat.push(-5.0);
        stat.reset();
        assert_eq!(stat, RunningStat::new());
    }
}
