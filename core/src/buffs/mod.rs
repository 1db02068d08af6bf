//! Buff interval index
//!
//! Two concerns live here: turning the service's aura bands into queryable
//! time-interval sets, and filtering the static buff tables down to the rows
//! valid at a given fight's patch.

use hashbrown::HashMap;

use crate::data::buff_tables::{
    self, DamageBuff, GuaranteedByBuff,
};

/// Sentinel interval for a buff that never occurred in the fight; no
/// timestamp ever falls inside it.
pub const NEVER: (i64, i64) = (-1, -1);

/// Boundary convention for interval membership. Most buff checks treat the
/// application instant as not yet active and the expiry instant as still
/// active, but snapshot-style checks want both ends closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inclusivity {
    /// `(start, end]`
    #[default]
    LeftExclusive,
    /// `[start, end]`
    BothInclusive,
    /// `[start, end)`
    RightExclusive,
}

impl Inclusivity {
    fn contains(self, (start, end): (i64, i64), ts: i64) -> bool {
        match self {
            Inclusivity::LeftExclusive => ts > start && ts <= end,
            Inclusivity::BothInclusive => ts >= start && ts <= end,
            Inclusivity::RightExclusive => ts >= start && ts < end,
        }
    }
}

/// The absolute-time intervals during which one buff was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuffWindows {
    bands: Vec<(i64, i64)>,
    inclusivity: Inclusivity,
}

impl BuffWindows {
    /// Build from the service's aura bands. An empty band list degenerates
    /// to the [`NEVER`] sentinel so membership is always false.
    pub fn from_bands(bands: Vec<(i64, i64)>, inclusivity: Inclusivity) -> Self {
        let bands = if bands.is_empty() { vec![NEVER] } else { bands };
        Self { bands, inclusivity }
    }

    pub fn never() -> Self {
        Self::from_bands(Vec::new(), Inclusivity::default())
    }

    /// Membership is a logical OR over the interval set.
    pub fn contains(&self, ts: i64) -> bool {
        self.bands.iter().any(|&b| self.inclusivity.contains(b, ts))
    }

    pub fn bands(&self) -> &[(i64, i64)] {
        &self.bands
    }
}

/// Static buff tables filtered to the rows valid at one fight's patch.
#[derive(Debug, Clone)]
pub struct ActiveTables {
    damage_buffs: HashMap<&'static str, &'static DamageBuff>,
    critical_rates: HashMap<&'static str, f64>,
    direct_rates: HashMap<&'static str, f64>,
    guaranteed_by_action: HashMap<u32, u8>,
    guaranteed_by_buff: Vec<&'static GuaranteedByBuff>,
}

impl ActiveTables {
    /// Filter every table by the fight's patch number. Windows are half-open:
    /// a row retired in a patch is excluded from that patch onward.
    pub fn for_patch(patch: f64) -> Self {
        let in_window = |s: f64, e: f64| patch >= s && patch < e;
        Self {
            damage_buffs: buff_tables::DAMAGE_BUFFS
                .iter()
                .filter(|b| in_window(b.valid_start, b.valid_end))
                .map(|b| (b.id, b))
                .collect(),
            critical_rates: buff_tables::CRITICAL_RATE_BUFFS
                .iter()
                .filter(|b| in_window(b.valid_start, b.valid_end))
                .map(|b| (b.id, b.rate))
                .collect(),
            direct_rates: buff_tables::DIRECT_RATE_BUFFS
                .iter()
                .filter(|b| in_window(b.valid_start, b.valid_end))
                .map(|b| (b.id, b.rate))
                .collect(),
            guaranteed_by_action: buff_tables::GUARANTEED_BY_ACTION
                .iter()
                .filter(|g| in_window(g.valid_start, g.valid_end))
                .map(|g| (g.action_id, g.hit_type))
                .collect(),
            guaranteed_by_buff: buff_tables::GUARANTEED_BY_BUFF
                .iter()
                .filter(|g| in_window(g.valid_start, g.valid_end))
                .collect(),
        }
    }

    pub fn damage_strength(&self, buff_id: &str) -> Option<f64> {
        self.damage_buffs.get(buff_id).map(|b| b.strength)
    }

    pub fn damage_buff(&self, buff_id: &str) -> Option<&'static DamageBuff> {
        self.damage_buffs.get(buff_id).copied()
    }

    pub fn critical_rate(&self, buff_id: &str) -> Option<f64> {
        self.critical_rates.get(buff_id).copied()
    }

    pub fn direct_rate(&self, buff_id: &str) -> Option<f64> {
        self.direct_rates.get(buff_id).copied()
    }

    pub fn guaranteed_by_action(&self, action_id: u32) -> Option<u8> {
        self.guaranteed_by_action.get(&action_id).copied()
    }

    /// Forced hit type for `action_id` given the buffs active on it, if any
    /// matching pair is in the table.
    pub fn guaranteed_by_buff(&self, action_id: u32, active_buffs: &[String]) -> Option<u8> {
        self.guaranteed_by_buff
            .iter()
            .find(|g| {
                g.affected_action_id == action_id
                    && active_buffs.iter().any(|b| b == g.buff_id)
            })
            .map(|g| g.hit_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_never_contains() {
        let w = BuffWindows::never();
        assert!(!w.contains(0));
        assert!(!w.contains(-1));
        assert!(!w.contains(i64::MAX));
    }

    #[test]
    fn left_exclusive_boundaries() {
        let w = BuffWindows::from_bands(vec![(100, 200)], Inclusivity::LeftExclusive);
        assert!(!w.contains(100));
        assert!(w.contains(101));
        assert!(w.contains(200));
        assert!(!w.contains(201));
    }

    #[test]
    fn membership_is_or_over_bands() {
        let w = BuffWindows::from_bands(vec![(0, 10), (50, 60)], Inclusivity::BothInclusive);
        assert!(w.contains(5));
        assert!(w.contains(50));
        assert!(!w.contains(30));
    }

    #[test]
    fn tables_filter_by_patch_with_an_exclusive_upper_bound() {
        let pre = ActiveTables::for_patch(6.55);
        // The Arrow retired in 7.0; Dokumori arrived with it.
        assert!(pre.damage_strength("1001884").is_some());
        assert!(pre.damage_strength("1003849").is_none());

        let post = ActiveTables::for_patch(7.0);
        assert!(post.damage_strength("1001884").is_none());
        assert!(post.damage_strength("1003849").is_some());
        // Rows without a bound survive everywhere.
        assert!(post.damage_strength("1001882").is_some());
    }

    #[test]
    fn guaranteed_by_buff_needs_both_matches() {
        let tables = ActiveTables::for_patch(7.05);
        let inner_release = vec!["1001177".to_string()];
        // Inner Release + Fell Cleave forces critical-direct
        assert_eq!(tables.guaranteed_by_buff(3549, &inner_release), Some(3));
        // Same buff, unlisted ability
        assert_eq!(tables.guaranteed_by_buff(3617, &inner_release), None);
        // Listed ability, buff absent
        assert_eq!(tables.guaranteed_by_buff(3549, &[]), None);
    }
}
