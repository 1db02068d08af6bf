//! Per-action hit-type resolution.
//!
//! For every action: sum the active rate buffs, account for medication,
//! standardize ambiguous buff ids (cards, Radiant Finale), apply guaranteed
//! hit types, and write the probability vector back onto the record.

use tracing::debug;

use crate::buffs::ActiveTables;
use crate::data::buff_tables::{MELEE_CARD_NAMES, RANGED_CARD_NAMES};
use crate::data::job::{Job, Role};
use crate::events::Action;

use super::rate::Rate;

/// Medication buff id in the event stream.
pub const MEDICATION_ID: &str = "1000049";
/// Radiant Finale's real buff id; replaced with a tier-specific tag.
pub const RADIANT_FINALE_ID: &str = "1002964";
/// Medication's flat multiplier as reported by the service; its real effect
/// is a stat addend, so the flat factor is divided back out.
const MEDICATION_MULTIPLIER: f64 = 1.05;
/// Fights reach full party buffs well before this; a Radiant Finale earlier
/// than this elapsed time is assumed to be the opener's 1-coda cast.
const FINALE_OPENER_SECONDS: f64 = 100.0;

pub struct HitTypeResolver<'a> {
    rate: Rate,
    tables: &'a ActiveTables,
    job: Job,
    /// Main-stat addend granted by the fight's potion.
    medication: u32,
    /// AST cards need role-based standardization before 7.0.
    patch: f64,
}

impl<'a> HitTypeResolver<'a> {
    pub fn new(
        rate: Rate,
        tables: &'a ActiveTables,
        job: Job,
        medication: u32,
        patch: f64,
    ) -> Self {
        Self {
            rate,
            tables,
            job,
            medication,
            patch,
        }
    }

    /// Resolve every action in place.
    pub fn resolve(&self, actions: &mut [Action]) {
        for action in actions.iter_mut() {
            self.standardize_buffs(action);

            let (crit_bonus, direct_bonus) = self.rate_bonuses(action);
            let guaranteed = self
                .tables
                .guaranteed_by_action(action.ability_id)
                .or_else(|| self.tables.guaranteed_by_buff(action.ability_id, &action.buffs));

            action.l_c = self.rate.critical_damage_per_mille();
            match guaranteed {
                Some(hit_type) => {
                    action.probabilities =
                        self.rate
                            .guaranteed_probabilities(hit_type, crit_bonus, direct_bonus);
                    let bonus =
                        self.rate
                            .guaranteed_damage_bonus(hit_type, crit_bonus, direct_bonus);
                    if bonus != 1.0 {
                        action.multiplier = Some(action.multiplier.unwrap_or(1.0) * bonus);
                    }
                    debug!(name = %action.name, hit_type, "guaranteed hit type");
                }
                None => {
                    action.probabilities = self.rate.probabilities(crit_bonus, direct_bonus);
                }
            }
        }
    }

    /// Sum the crit and direct-hit rate bonuses of the buffs on this action,
    /// rounded to two decimals to absorb float drift before table joins.
    fn rate_bonuses(&self, action: &Action) -> (f64, f64) {
        let mut crit = 0.0;
        let mut direct = 0.0;
        for buff in &action.buffs {
            if let Some(r) = self.tables.critical_rate(buff) {
                crit += r;
            }
            if let Some(r) = self.tables.direct_rate(buff) {
                direct += r;
            }
        }
        (round2(crit), round2(direct))
    }

    /// Rewrite buff ids whose strength is context-dependent into synthetic
    /// tags with fixed strengths, and account for medication.
    fn standardize_buffs(&self, action: &mut Action) {
        if action.has_buff(MEDICATION_ID) {
            action.main_stat_add = self.medication;
            if let Some(m) = action.multiplier {
                action.multiplier = Some(m / MEDICATION_MULTIPLIER);
            }
        }

        if action.has_buff(RADIANT_FINALE_ID) {
            let tag = if action.elapsed_seconds < FINALE_OPENER_SECONDS {
                "RadiantFinale1"
            } else {
                "RadiantFinale3"
            };
            action.remove_buff(RADIANT_FINALE_ID);
            action.add_buff(tag);
        }

        if self.patch < 7.0 {
            self.standardize_cards(action);
        }
    }

    /// Pre-7.0 AST cards: 6% when the card's reach matches the recipient's
    /// role, 3% otherwise.
    fn standardize_cards(&self, action: &mut Action) {
        let role = self.job.role();
        let physical = matches!(role, Role::Tank | Role::Melee);
        let mut replacement = None;
        for buff in &action.buffs {
            let Some(card) = self.tables.damage_buff(buff) else {
                continue;
            };
            let tag = if MELEE_CARD_NAMES.contains(&card.name) {
                Some(if physical { "card6" } else { "card3" })
            } else if RANGED_CARD_NAMES.contains(&card.name) {
                Some(if physical { "card3" } else { "card6" })
            } else {
                None
            };
            if let Some(tag) = tag {
                replacement = Some((card.id, tag));
                break;
            }
        }
        if let Some((card_id, tag)) = replacement {
            action.remove_buff(card_id);
            action.add_buff(tag);
        }
    }
}

/// Base name plus the sorted buff tags, the action's canonical identity.
pub fn canonical_name(name: &str, sorted_buffs: &[String]) -> String {
    if sorted_buffs.is_empty() {
        name.to_string()
    } else {
        format!("{name}-{}", sorted_buffs.join("_"))
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    fn resolver<'a>(tables: &'a ActiveTables, patch: f64) -> HitTypeResolver<'a> {
        HitTypeResolver::new(
            Rate::new(2560, 1836, 2000, 100),
            tables,
            Job::DarkKnight,
            392,
            patch,
        )
    }

    #[test]
    fn probability_vector_sums_to_one() {
        let tables = ActiveTables::for_patch(7.05);
        let r = resolver(&tables, 7.05);
        let mut actions = vec![
            make_action(7392, "Bloodspiller", &["1000786", "1001221"]),
            make_action(3617, "Hard Slash", &[]),
        ];
        r.resolve(&mut actions);
        for a in &actions {
            assert!((a.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn guaranteed_cdh_is_pure_and_keeps_rate_bonus_as_damage() {
        let tables = ActiveTables::for_patch(7.05);
        let r = resolver(&tables, 7.05);
        // Inner Chaos under Chain Stratagem
        let mut actions = vec![make_action(16465, "Inner Chaos", &["1001221"])];
        actions[0].multiplier = Some(1.0);
        r.resolve(&mut actions);
        assert_eq!(actions[0].probabilities, [0.0, 0.0, 0.0, 1.0]);
        assert!(actions[0].multiplier.unwrap() > 1.0);
    }

    #[test]
    fn determination_changes_the_guaranteed_hit_multiplier() {
        let tables = ActiveTables::for_patch(7.05);
        let low = HitTypeResolver::new(
            Rate::new(2560, 1836, 1000, 100),
            &tables,
            Job::Warrior,
            392,
            7.05,
        );
        let high = HitTypeResolver::new(
            Rate::new(2560, 1836, 5000, 100),
            &tables,
            Job::Warrior,
            392,
            7.05,
        );
        // Inner Chaos is an unconditional critical-direct hit.
        let mut a = vec![make_action(16465, "Inner Chaos", &[])];
        a[0].multiplier = Some(1.0);
        let mut b = a.clone();
        low.resolve(&mut a);
        high.resolve(&mut b);
        assert!(a[0].multiplier.unwrap() > b[0].multiplier.unwrap());
    }

    #[test]
    fn medication_divides_out_flat_multiplier() {
        let tables = ActiveTables::for_patch(7.05);
        let r = resolver(&tables, 7.05);
        let mut actions = vec![make_action(3617, "Hard Slash", &["1000049"])];
        actions[0].multiplier = Some(1.05);
        r.resolve(&mut actions);
        assert!((actions[0].multiplier.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(actions[0].main_stat_add, 392);
    }

    #[test]
    fn radiant_finale_tier_by_elapsed_time() {
        let tables = ActiveTables::for_patch(7.05);
        let r = resolver(&tables, 7.05);
        let mut early = make_action(7392, "Bloodspiller", &["1002964"]);
        early.elapsed_seconds = 8.0;
        let mut late = make_action(7392, "Bloodspiller", &["1002964"]);
        late.elapsed_seconds = 130.0;
        let mut actions = vec![early, late];
        r.resolve(&mut actions);
        assert!(actions[0].has_buff("RadiantFinale1"));
        assert!(actions[1].has_buff("RadiantFinale3"));
        assert!(!actions[0].has_buff("1002964"));
    }

    #[test]
    fn canonical_name_sorts_tags() {
        assert_eq!(
            canonical_name("Bloodspiller", &["a".into(), "b".into()]),
            "Bloodspiller-a_b"
        );
        assert_eq!(canonical_name("Hard Slash", &[]), "Hard Slash");
    }
}
