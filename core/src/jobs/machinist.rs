//! Machinist: Wildfire accounting and the Automaton Queen battery gauge.
//!
//! Wildfire's detonation potency is 240 per weaponskill landed during the
//! window, and the detonation itself can never crit or direct-hit. Queen
//! potency scales with the battery spent on the summon, which the log does
//! not expose, so the gauge is rebuilt from generator casts.

use super::JobMechanics;
use crate::events::Action;

const WILDFIRE: u32 = 861;
const HEATED_CLEAN_SHOT: u32 = 7413;
const AIR_ANCHOR: u32 = 16500;
const CHAIN_SAW: u32 = 25788;
const EXCAVATOR: u32 = 36981;

/// Weaponskills that count toward a Wildfire detonation.
const MCH_GCDS: &[u32] = &[
    7411, 7412, HEATED_CLEAN_SHOT, 16498, AIR_ANCHOR, CHAIN_SAW, EXCAVATOR, 36982, 7410,
];

/// Queen abilities whose potency scales with the summoning battery level.
const QUEEN_ABILITIES: &[u32] = &[16504, 17206, 16503, 25787];

/// Weaponskills landing more than this long before the detonation predate
/// the Wildfire window.
const WILDFIRE_WINDOW_SECONDS: f64 = 10.0;
const WILDFIRE_MAX_STACKS: usize = 6;

pub struct Machinist {
    /// Automaton Queen summon times, elapsed seconds, from cast events.
    summon_times: Vec<f64>,
}

impl Machinist {
    pub fn new(mut summon_times: Vec<f64>) -> Self {
        summon_times.sort_by(|a, b| a.total_cmp(b));
        Self { summon_times }
    }

    /// Battery level at each summon, folded from generator hits. A summon
    /// below the 50 minimum means the generators happened before the
    /// analyzed window; treat it as a full-battery summon.
    fn summon_levels(&self, actions: &[Action]) -> Vec<(f64, i32)> {
        let mut generators: Vec<(f64, i32)> = actions
            .iter()
            .filter_map(|a| {
                let gain = match a.ability_id {
                    HEATED_CLEAN_SHOT => 10,
                    AIR_ANCHOR | CHAIN_SAW | EXCAVATOR => 20,
                    _ => return None,
                };
                Some((a.elapsed_seconds, gain))
            })
            .collect();
        generators.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut levels = Vec::with_capacity(self.summon_times.len());
        let mut gauge = 0i32;
        let mut idx = 0;
        for &summon in &self.summon_times {
            while idx < generators.len() && generators[idx].0 < summon {
                gauge = (gauge + generators[idx].1).min(100);
                idx += 1;
            }
            let level = if gauge < 50 { 100 } else { gauge };
            levels.push((summon, level));
            gauge = 0;
        }
        levels
    }
}

impl JobMechanics for Machinist {
    fn apply(&self, actions: &mut Vec<Action>) {
        let gcd_times: Vec<f64> = actions
            .iter()
            .filter(|a| MCH_GCDS.contains(&a.ability_id) && !a.name.ends_with("(Pet)"))
            .map(|a| a.elapsed_seconds)
            .collect();
        let summon_levels = self.summon_levels(actions);

        for action in actions.iter_mut() {
            if action.ability_id == WILDFIRE {
                let stacks = gcd_times
                    .iter()
                    .filter(|&&t| {
                        t < action.elapsed_seconds
                            && t >= action.elapsed_seconds - WILDFIRE_WINDOW_SECONDS
                    })
                    .count()
                    .clamp(1, WILDFIRE_MAX_STACKS);
                action.add_buff(&format!("wildfire_{stacks}"));
                // The detonation always lands as a normal hit.
                action.probabilities = [1.0, 0.0, 0.0, 0.0];
            } else if QUEEN_ABILITIES.contains(&action.ability_id) {
                let level = summon_levels
                    .iter()
                    .rev()
                    .find(|&&(t, _)| t <= action.elapsed_seconds)
                    .map(|&(_, level)| level)
                    .unwrap_or(100);
                action.add_buff(&format!("gauge_{level}"));
            }
        }
    }
}
