//! Rotation aggregation.
//!
//! Collapses the resolved action stream into unique rows keyed by the full
//! damage signature, joins each group against the potency table, and sorts
//! the result deterministically so repeated runs are byte-identical.

use hashbrown::HashMap;
use tracing::warn;

use crate::data::job::Job;
use crate::data::potencies::{self, DamageKind, PotencyRow};
use crate::events::Action;
use crate::hit_types::canonical_name;

use super::potency::{assign_falloff, buff_priority, select_potency};

/// One canonical rotation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationRow {
    /// Base name plus buff tags and combo/positional suffix.
    pub action_name: String,
    /// Undecorated (but tick/pet-suffixed) ability name, the primary sort key.
    pub base_action: String,
    pub ability_id: u32,
    pub n: u32,
    /// Table potency scaled by the falloff fraction.
    pub potency: f64,
    pub damage_type: DamageKind,
    pub multiplier: f64,
    /// (normal, critical, direct, critical-direct).
    pub probabilities: [f64; 4],
    /// Critical damage multiplier, per-mille.
    pub l_c: u32,
    pub main_stat_add: u32,
    pub buffs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    ability_id: u32,
    name: String,
    buff_key: String,
    bonus_percent: Option<u32>,
    // f64 signatures keyed on rounded fixed-point to make grouping exact.
    multiplier_fp: i64,
    probabilities_fp: [i64; 4],
    main_stat_add: u32,
    falloff_fp: i64,
}

fn fp(x: f64) -> i64 {
    (x * 1e9).round() as i64
}

struct Group {
    n: u32,
    sample: Action,
}

/// Aggregate resolved actions into the canonical rotation table.
///
/// `excluded_targets` filters enemies whose damage does not count (crystals,
/// padding adds). Unpaired and zero-damage records are dropped here.
pub fn aggregate(
    actions: &[Action],
    job: Job,
    patch: f64,
    level: u8,
    excluded_targets: &[u32],
) -> Vec<RotationRow> {
    let rows: Vec<&'static PotencyRow> = potencies::rows_for(job, patch, level).collect();

    let mut kept: Vec<Action> = actions
        .iter()
        .filter(|a| !a.unpaired && a.amount > 0 && !excluded_targets.contains(&a.target_id))
        .cloned()
        .collect();
    assign_falloff(&mut kept, &rows);

    let mut groups: HashMap<GroupKey, Group> = HashMap::new();
    for action in kept {
        let key = GroupKey {
            ability_id: action.ability_id,
            name: action.name.clone(),
            buff_key: action.buff_key(),
            bonus_percent: action.bonus_percent,
            multiplier_fp: fp(action.multiplier.unwrap_or(1.0)),
            probabilities_fp: action.probabilities.map(fp),
            main_stat_add: action.main_stat_add,
            falloff_fp: fp(action.falloff),
        };
        groups
            .entry(key)
            .and_modify(|g| g.n += 1)
            .or_insert(Group { n: 1, sample: action });
    }

    let mut out: Vec<RotationRow> = Vec::with_capacity(groups.len());
    for group in groups.into_values() {
        let action = &group.sample;
        let candidates: Vec<&&PotencyRow> = rows
            .iter()
            .filter(|r| r.action_id == action.ability_id)
            .collect();
        if candidates.is_empty() {
            warn!(name = %action.name, id = action.ability_id, "no potency row, dropping group");
            continue;
        }
        let buffs = action.sorted_buffs();
        let row = candidates
            .iter()
            .max_by(|a, b| {
                buff_priority(a, &buffs)
                    .cmp(&buff_priority(b, &buffs))
                    // Deterministic tie break: lowest buff id wins.
                    .then_with(|| b.buff_id.cmp(&a.buff_id))
            })
            .copied()
            .copied();
        let Some(row) = row else { continue };

        let (potency, suffix) = select_potency(row, action.bonus_percent);
        let mut action_name = canonical_name(&action.name, &buffs);
        action_name.push_str(suffix);

        out.push(RotationRow {
            action_name,
            base_action: action.name.clone(),
            ability_id: action.ability_id,
            n: group.n,
            potency: potency as f64 * action.falloff,
            damage_type: row.kind,
            multiplier: action.multiplier.unwrap_or(1.0),
            probabilities: action.probabilities,
            l_c: action.l_c,
            main_stat_add: action.main_stat_add,
            buffs,
        });
    }

    out.sort_by(|a, b| {
        a.base_action
            .cmp(&b.base_action)
            .then_with(|| a.damage_type.cmp(&b.damage_type))
            .then_with(|| b.n.cmp(&a.n))
            .then_with(|| a.action_name.cmp(&b.action_name))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    fn hit(id: u32, name: &str, buffs: &[&str]) -> Action {
        let mut a = make_action(id, name, buffs);
        a.amount = 10000;
        a.multiplier = Some(1.0);
        a
    }

    #[test]
    fn identical_signatures_collapse_into_one_row() {
        let actions = vec![
            hit(3617, "Hard Slash", &[]),
            hit(3617, "Hard Slash", &[]),
            hit(3617, "Hard Slash", &[]),
        ];
        let rows = aggregate(&actions, Job::DarkKnight, 7.05, 100, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].n, 3);
        assert_eq!(rows[0].potency, 300.0);
    }

    #[test]
    fn a_buff_splits_the_group() {
        let actions = vec![
            hit(3617, "Hard Slash", &[]),
            hit(3617, "Hard Slash", &[]),
            hit(3617, "Hard Slash", &[]),
            hit(3617, "Hard Slash", &["1000786"]),
        ];
        let rows = aggregate(&actions, Job::DarkKnight, 7.05, 100, &[]);
        assert_eq!(rows.len(), 2);
        let counts: Vec<u32> = rows.iter().map(|r| r.n).collect();
        assert_eq!(counts, vec![3, 1]);
    }

    #[test]
    fn buff_specific_row_beats_no_buff_row() {
        // Holy Spirit under Divine Might resolves to the 470 row, not 370.
        let actions = vec![hit(7384, "Holy Spirit", &["1002673"])];
        let rows = aggregate(&actions, Job::Paladin, 7.05, 100, &[]);
        assert_eq!(rows[0].potency, 470.0);

        // Without the buff, the no-buff row wins over wrong-buff rows.
        let actions = vec![hit(7384, "Holy Spirit", &[])];
        let rows = aggregate(&actions, Job::Paladin, 7.05, 100, &[]);
        assert_eq!(rows[0].potency, 370.0);
    }

    #[test]
    fn combo_suffix_comes_from_bonus_percent() {
        let mut combo = hit(3632, "Souleater", &[]);
        combo.bonus_percent = Some(85);
        let rows = aggregate(&[combo], Job::DarkKnight, 7.05, 100, &[]);
        assert_eq!(rows[0].potency, 480.0);
        assert!(rows[0].action_name.ends_with("_combo"));
    }

    #[test]
    fn excluded_targets_and_zero_damage_are_dropped() {
        let mut on_crystal = hit(3617, "Hard Slash", &[]);
        on_crystal.target_id = 99;
        let mut whiffed = hit(3617, "Hard Slash", &[]);
        whiffed.amount = 0;
        let rows = aggregate(&[on_crystal, whiffed], Job::DarkKnight, 7.05, 100, &[99]);
        assert!(rows.is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let actions = vec![
            hit(3617, "Hard Slash", &[]),
            hit(7392, "Bloodspiller", &["Darkside"]),
            hit(7392, "Bloodspiller", &[]),
            hit(3617, "Hard Slash", &["1000786", "1001221"]),
        ];
        let first = aggregate(&actions, Job::DarkKnight, 7.05, 100, &[]);
        let second = aggregate(&actions, Job::DarkKnight, 7.05, 100, &[]);
        assert_eq!(first, second);
    }
}
