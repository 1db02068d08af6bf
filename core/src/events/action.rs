//! The mutable per-hit record every pipeline stage operates on.

/// One damage hit (or pending cast), normalized from the event stream.
///
/// Stages mutate records in place: job mechanics append buff tags and adjust
/// multipliers, the hit-type resolver fills the probability vector, the
/// aggregator consumes the finished records.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Absolute unix-epoch milliseconds.
    pub timestamp: i64,
    /// Seconds since the fight (or phase) start.
    pub elapsed_seconds: f64,
    pub source_id: u32,
    pub target_id: u32,
    pub packet_id: Option<i64>,
    pub ability_id: u32,
    /// Decorated ability name, e.g. "Salted Earth (tick)".
    pub name: String,
    pub amount: i64,
    pub tick: bool,
    /// Damage multiplier reported by the service, when present.
    pub multiplier: Option<f64>,
    /// Combo / positional signal from the service.
    pub bonus_percent: Option<u32>,
    /// Raw hit-type code from the event stream (2 = critical).
    pub hit_type: u8,
    pub direct_hit: bool,
    /// Active buff ids, deduplicated, in first-seen order. Job mechanics
    /// append synthetic tags here.
    pub buffs: Vec<String>,
    /// Cast began but no damage landed (yet). Kept through job mechanics,
    /// dropped before aggregation.
    pub unpaired: bool,
    /// Per-target damage fraction for multi-target hits, snapped to the
    /// potency table's falloff list. 1.0 for full-potency hits and ticks.
    pub falloff: f64,

    // Filled by the hit-type resolver.
    /// (normal, critical, direct, critical-direct); sums to 1.
    pub probabilities: [f64; 4],
    /// Critical damage multiplier, per-mille.
    pub l_c: u32,
    /// Main-stat addend from medication.
    pub main_stat_add: u32,
}

impl Action {
    /// Buff ids sorted lexicographically, for order-independent signatures.
    pub fn sorted_buffs(&self) -> Vec<String> {
        let mut buffs = self.buffs.clone();
        buffs.sort_unstable();
        buffs
    }

    /// The sorted buff set as one `.`-joined string.
    pub fn buff_key(&self) -> String {
        self.sorted_buffs().join(".")
    }

    pub fn has_buff(&self, id: &str) -> bool {
        self.buffs.iter().any(|b| b == id)
    }

    /// Append a buff tag unless it is already present.
    pub fn add_buff(&mut self, id: &str) {
        if !self.has_buff(id) {
            self.buffs.push(id.to_string());
        }
    }

    pub fn remove_buff(&mut self, id: &str) {
        self.buffs.retain(|b| b != id);
    }
}
