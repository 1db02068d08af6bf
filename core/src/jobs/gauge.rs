//! Bounded resource gauge.

/// A job gauge clamped to `[min, max]` after every step. Clamping is applied
/// per step, not on the running total, so overcapped gains are lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedGauge {
    value: i32,
    min: i32,
    max: i32,
}

impl BoundedGauge {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            value: min,
            min,
            max,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Apply one delta and return the clamped value after it.
    pub fn add(&mut self, delta: i32) -> i32 {
        self.value = (self.value + delta).clamp(self.min, self.max);
        self.value
    }

    pub fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_stepwise_clamp_for_any_sequence() {
        // Kazematoi-style sequences: +2 on build, -1 on spend.
        let deltas = [2, 2, 2, -1, 2, -1, -1, -1, -1, -1, -1, 2];
        let mut gauge = BoundedGauge::new(0, 5);
        let mut reference = 0i32;
        for d in deltas {
            reference = (reference + d).clamp(0, 5);
            assert_eq!(gauge.add(d), reference);
        }
    }

    #[test]
    fn overcap_is_lost_not_banked() {
        let mut gauge = BoundedGauge::new(0, 5);
        for _ in 0..4 {
            gauge.add(2);
        }
        assert_eq!(gauge.value(), 5);
        gauge.add(-1);
        assert_eq!(gauge.value(), 4);
    }
}
