//! Cumulative FED over time

/// Cumulative Fractional Effective Dose samples
///
/// Always starts at `(0, 0)`. Values never decrease and never exceed 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FedCurve {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Default for FedCurve {
    fn default() -> Self {
        Self::new()
    }
}

impl FedCurve {
    /// Largest FED reported; a dose of 1 means incapacitation
    pub const CAP: f64 = 1.0;

    pub fn new() -> Self {
        Self {
            times: vec![0.0],
            values: vec![0.0],
        }
    }

    /// Add a dose received up to `time`
    pub(crate) fn accumulate(&mut self, time: f64, increment: f64) {
        let last = self.last_value();
        let increment = if increment.is_finite() { increment.max(0.0) } else { 0.0 };

        self.times.push(time);
        self.values.push((last + increment).min(Self::CAP));
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(time, FED)` pairs, for plotting
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.times.iter().copied().zip(self.values.iter().copied()).collect()
    }

    pub fn last_value(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Largest FED reached
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Time at which the FED first reaches `threshold`.
    ///
    /// Linearly interpolated between the two samples around the crossing,
    /// `None` if the threshold is never reached.
    pub fn threshold_time(&self, threshold: f64) -> Option<f64> {
        let i = self.values.iter().position(|&v| v >= threshold)?;
        if i == 0 {
            return Some(self.times[0]);
        }

        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let (v0, v1) = (self.values[i - 1], self.values[i]);
        if v1 == v0 {
            return Some(t1);
        }
        Some(t0 + (threshold - v0) * (t1 - t0) / (v1 - v0))
    }
}
