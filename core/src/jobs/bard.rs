//! Bard: Pitch Perfect tier inference and Radiant Encore codas.
//!
//! Pitch Perfect's stack count is not in the log. Each hit is normalized by
//! its own multiplier and hit-type contributions, compared against a
//! buff-free Burst Shot baseline, and classified by the midpoints between
//! the known per-tier potencies. Best-effort by construction.

use tracing::debug;

use super::JobMechanics;
use crate::events::Action;

const BURST_SHOT: u32 = 16495;
const PITCH_PERFECT: u32 = 7404;
const RADIANT_ENCORE: u32 = 36977;

const BURST_SHOT_POTENCY: f64 = 220.0;
/// Pitch Perfect potency per stack count.
const PP_POTENCIES: [f64; 3] = [100.0, 220.0, 360.0];

/// A Radiant Encore this early can only be the opener's single-coda cast.
const ENCORE_OPENER_SECONDS: f64 = 40.0;

const DIRECT_HIT_MULTIPLIER: f64 = 1.25;
/// Raw hit-type code for a critical in the event stream.
const HIT_TYPE_CRIT: u8 = 2;

pub struct Bard;

impl Bard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Bard {
    fn default() -> Self {
        Self::new()
    }
}

/// Damage with the multiplier, crit and direct-hit contributions divided
/// out, comparable across hits.
fn normalized_damage(action: &Action) -> f64 {
    let mut damage = action.amount as f64 / action.multiplier.unwrap_or(1.0);
    if action.hit_type == HIT_TYPE_CRIT {
        damage /= action.l_c.max(1) as f64 / 1000.0;
    }
    if action.direct_hit {
        damage /= DIRECT_HIT_MULTIPLIER;
    }
    damage
}

impl JobMechanics for Bard {
    fn apply(&self, actions: &mut Vec<Action>) {
        let burst_shots: Vec<f64> = actions
            .iter()
            .filter(|a| a.ability_id == BURST_SHOT && !a.unpaired && a.amount > 0)
            .map(normalized_damage)
            .collect();
        let baseline = if burst_shots.is_empty() {
            None
        } else {
            Some(burst_shots.iter().sum::<f64>() / burst_shots.len() as f64)
        };

        for action in actions.iter_mut() {
            match action.ability_id {
                PITCH_PERFECT => {
                    let Some(baseline) = baseline else {
                        debug!("no burst shot baseline, leaving pitch perfect untiered");
                        continue;
                    };
                    let estimated =
                        normalized_damage(action) / baseline * BURST_SHOT_POTENCY;
                    let stacks = classify_stacks(estimated);
                    action.add_buff(&format!("pp{stacks}"));
                }
                RADIANT_ENCORE => {
                    let tag = if action.elapsed_seconds < ENCORE_OPENER_SECONDS {
                        "encore1"
                    } else {
                        "encore3"
                    };
                    action.add_buff(tag);
                }
                _ => {}
            }
        }
    }
}

/// Nearest tier by potency midpoints: below (100+220)/2 is one stack, below
/// (220+360)/2 is two, otherwise three.
fn classify_stacks(estimated_potency: f64) -> usize {
    let mid_12 = (PP_POTENCIES[0] + PP_POTENCIES[1]) / 2.0;
    let mid_23 = (PP_POTENCIES[1] + PP_POTENCIES[2]) / 2.0;
    if estimated_potency < mid_12 {
        1
    } else if estimated_potency < mid_23 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    fn hit(id: u32, name: &str, amount: i64) -> Action {
        let mut a = make_action(id, name, &[]);
        a.amount = amount;
        a.multiplier = Some(1.0);
        a
    }

    #[test]
    fn tiers_follow_potency_midpoints() {
        assert_eq!(classify_stacks(90.0), 1);
        assert_eq!(classify_stacks(200.0), 2);
        assert_eq!(classify_stacks(355.0), 3);
    }

    #[test]
    fn pitch_perfect_is_classified_against_burst_shot() {
        let mut actions = vec![
            hit(BURST_SHOT, "Burst Shot", 11000),
            hit(BURST_SHOT, "Burst Shot", 11000),
            // 360/220 of a burst shot: three stacks
            hit(PITCH_PERFECT, "Pitch Perfect", 18000),
            // ~half a burst shot: one stack
            hit(PITCH_PERFECT, "Pitch Perfect", 5000),
        ];
        Bard::new().apply(&mut actions);
        assert!(actions[2].has_buff("pp3"));
        assert!(actions[3].has_buff("pp1"));
    }

    #[test]
    fn crit_hits_are_normalized_before_classification() {
        let mut crit_pp = hit(PITCH_PERFECT, "Pitch Perfect", 16500);
        crit_pp.hit_type = HIT_TYPE_CRIT;
        crit_pp.l_c = 1500;
        // 16500 / 1.5 = 11000, exactly one burst shot: two stacks
        let mut actions = vec![hit(BURST_SHOT, "Burst Shot", 11000), crit_pp];
        Bard::new().apply(&mut actions);
        assert!(actions[1].has_buff("pp2"));
    }

    #[test]
    fn radiant_encore_codas_by_elapsed_time() {
        let mut opener = hit(RADIANT_ENCORE, "Radiant Encore", 20000);
        opener.elapsed_seconds = 8.0;
        let mut late = hit(RADIANT_ENCORE, "Radiant Encore", 30000);
        late.elapsed_seconds = 125.0;
        let mut actions = vec![opener, late];
        Bard::new().apply(&mut actions);
        assert!(actions[0].has_buff("encore1"));
        assert!(actions[1].has_buff("encore3"));
    }
}
