//! Hit-type probabilities from character stats.
//!
//! Standard level-scaled stat formulas: a stat above the level's baseline
//! buys rate (or damage) in floor-truncated steps of the level divisor.

/// Per-level scaling constants.
#[derive(Debug, Clone, Copy)]
struct LevelScaling {
    sub: i64,
    div: i64,
}

const LEVEL_90: LevelScaling = LevelScaling { sub: 400, div: 1900 };
const LEVEL_100: LevelScaling = LevelScaling { sub: 420, div: 2780 };

/// Critical and direct-hit rates (and the crit damage multiplier) for one
/// stat build at one level.
#[derive(Debug, Clone, Copy)]
pub struct Rate {
    critical_hit: i64,
    direct_hit: i64,
    determination: i64,
    scaling: LevelScaling,
}

impl Rate {
    /// Levels other than 90 fall back to level-100 scaling; only the two
    /// current level caps are analyzed.
    pub fn new(critical_hit: u32, direct_hit: u32, determination: u32, level: u8) -> Self {
        let scaling = if level == 90 { LEVEL_90 } else { LEVEL_100 };
        Self {
            critical_hit: critical_hit as i64,
            direct_hit: direct_hit as i64,
            determination: determination as i64,
            scaling,
        }
    }

    fn floor_step(&self, coefficient: i64, stat: i64) -> i64 {
        coefficient * (stat - self.scaling.sub) / self.scaling.div
    }

    /// Critical hit probability including `bonus` from rate buffs.
    pub fn critical_probability(&self, bonus: f64) -> f64 {
        (self.floor_step(200, self.critical_hit) + 50) as f64 / 1000.0 + bonus
    }

    /// Critical damage multiplier, per-mille (e.g. 1580 = ×1.580).
    pub fn critical_damage_per_mille(&self) -> u32 {
        (self.floor_step(200, self.critical_hit) + 1400) as u32
    }

    /// Direct hit probability including `bonus` from rate buffs.
    pub fn direct_probability(&self, bonus: f64) -> f64 {
        self.floor_step(550, self.direct_hit) as f64 / 1000.0 + bonus
    }

    /// Damage gain of a guaranteed direct hit: the direct-hit stat joins the
    /// determination step, so the gain shrinks as determination grows.
    pub fn guaranteed_direct_gain(&self) -> f64 {
        let det = self.floor_step(140, self.determination) + 1000;
        (det + self.floor_step(140, self.direct_hit)) as f64 / det as f64
    }

    /// The (normal, critical, direct, critical-direct) probability vector.
    /// Crit and direct rolls are independent; the overlap is removed from
    /// the single-type slots so the vector sums to 1.
    pub fn probabilities(&self, crit_bonus: f64, direct_bonus: f64) -> [f64; 4] {
        let p_c = self.critical_probability(crit_bonus).clamp(0.0, 1.0);
        let p_d = self.direct_probability(direct_bonus).clamp(0.0, 1.0);
        let p_cd = p_c * p_d;
        [1.0 - p_c - p_d + p_cd, p_c - p_cd, p_d - p_cd, p_cd]
    }

    /// Probability vector when the hit type is forced. The non-forced roll
    /// still happens: a guaranteed critical can still direct-hit.
    pub fn guaranteed_probabilities(
        &self,
        hit_type: u8,
        crit_bonus: f64,
        direct_bonus: f64,
    ) -> [f64; 4] {
        match hit_type {
            1 => {
                let p_d = self.direct_probability(direct_bonus).clamp(0.0, 1.0);
                [0.0, 1.0 - p_d, 0.0, p_d]
            }
            2 => {
                let p_c = self.critical_probability(crit_bonus).clamp(0.0, 1.0);
                [0.0, 0.0, 1.0 - p_c, p_c]
            }
            3 => [0.0, 0.0, 0.0, 1.0],
            _ => self.probabilities(crit_bonus, direct_bonus),
        }
    }

    /// Damage compensation for rate buffs wasted on a forced hit type. The
    /// game converts them into a flat bonus instead of letting them overcap.
    pub fn guaranteed_damage_bonus(&self, hit_type: u8, crit_bonus: f64, direct_bonus: f64) -> f64 {
        let crit_mult = self.critical_damage_per_mille() as f64 / 1000.0;
        let mut bonus = 1.0;
        if hit_type == 1 || hit_type == 3 {
            bonus *= 1.0 + crit_bonus * (crit_mult - 1.0);
        }
        if hit_type == 2 || hit_type == 3 {
            bonus *= (1.0 + direct_bonus * 0.25) * self.guaranteed_direct_gain();
        }
        bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_sums_to_one() {
        let rate = Rate::new(2560, 1836, 2000, 100);
        for (cb, db) in [(0.0, 0.0), (0.1, 0.2), (0.3, 0.4)] {
            let p = rate.probabilities(cb, db);
            assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-9, "{p:?}");
            assert!(p.iter().all(|&x| x >= 0.0));
        }
    }

    #[test]
    fn guaranteed_vectors() {
        let rate = Rate::new(2560, 1836, 2000, 100);
        assert_eq!(rate.guaranteed_probabilities(3, 0.0, 0.0), [0.0, 0.0, 0.0, 1.0]);

        let p = rate.guaranteed_probabilities(1, 0.0, 0.0);
        assert_eq!(p[0], 0.0);
        assert_eq!(p[2], 0.0);
        assert!((p[1] + p[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn baseline_stats_give_baseline_rates() {
        // At exactly the level baseline the floor steps are zero.
        let rate = Rate::new(420, 420, 420, 100);
        assert!((rate.critical_probability(0.0) - 0.05).abs() < 1e-9);
        assert!((rate.direct_probability(0.0) - 0.0).abs() < 1e-9);
        assert_eq!(rate.critical_damage_per_mille(), 1400);
        assert!((rate.guaranteed_direct_gain() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn forced_hit_converts_rate_buffs_to_damage() {
        let rate = Rate::new(2560, 1836, 2000, 100);
        let no_buff = rate.guaranteed_damage_bonus(3, 0.0, 0.0);
        let buffed = rate.guaranteed_damage_bonus(3, 0.1, 0.2);
        assert!(buffed > no_buff);
    }

    #[test]
    fn determination_scales_the_guaranteed_direct_gain() {
        // Same direct-hit stat, so the absolute step is fixed; more
        // determination dilutes its relative worth.
        let low = Rate::new(2560, 1836, 1000, 100);
        let high = Rate::new(2560, 1836, 5000, 100);
        assert!(low.guaranteed_direct_gain() > high.guaranteed_direct_gain());
        assert!(low.guaranteed_damage_bonus(3, 0.0, 0.0) > high.guaranteed_damage_bonus(3, 0.0, 0.0));
        // det 1000: step 29; dh 1836: step 71 -> (1029 + 71) / 1029
        assert!((low.guaranteed_direct_gain() - 1100.0 / 1029.0).abs() < 1e-9);
    }
}
