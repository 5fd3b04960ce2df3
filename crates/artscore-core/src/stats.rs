//! Streaming mean and population variance.
//!
//! Uses Welford's one-pass update for accumulation and Chan et al.'s
//! pairwise formula for combining partial results, so large images keep
//! full precision and per-band partials can be merged in any grouping.

/// Running count, mean, and sum of squared deviations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Moments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Combine two disjoint partial results.
    pub fn merge(self, other: Self) -> Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            return other;
        }
        let count = self.count + other.count;
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = count as f64;
        let delta = other.mean - self.mean;
        Self {
            count,
            mean: self.mean + delta * (n_b / n),
            m2: self.m2 + other.m2 + delta * delta * (n_a * n_b / n),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Arithmetic mean, `0.0` when nothing was pushed.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Variance with divisor `N`, `0.0` when nothing was pushed.
    pub fn population_variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.m2 / self.count as f64).max(0.0)
    }

    pub fn population_std(&self) -> f64 {
        self.population_variance().sqrt()
    }
}

impl Extend<f64> for Moments {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::new();
        moments.extend(iter);
        moments
    }
}
