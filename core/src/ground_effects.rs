//! Ground-effect multiplier estimation.
//!
//! Ground-effect ticks (Salted Earth, Wildfire, Doton) report no damage
//! multiplier. The fight itself usually contains another action under the
//! same buff set whose multiplier is known; failing that, the multiplier is
//! the product of the individual static buff strengths.

use hashbrown::HashMap;
use tracing::debug;

use crate::buffs::ActiveTables;
use crate::events::Action;

/// Fill in missing multipliers on actions whose ability id is in
/// `ground_ability_ids`. Rows that already carry a multiplier are left
/// alone.
pub fn estimate_multipliers(
    actions: &mut [Action],
    ground_ability_ids: &[u32],
    tables: &ActiveTables,
) {
    let mut by_buff_set: HashMap<String, f64> = HashMap::new();
    for action in actions.iter() {
        if ground_ability_ids.contains(&action.ability_id) {
            continue;
        }
        if let Some(m) = action.multiplier {
            by_buff_set.entry(action.buff_key()).or_insert(m);
        }
    }

    for action in actions.iter_mut() {
        if !ground_ability_ids.contains(&action.ability_id) || action.multiplier.is_some() {
            continue;
        }
        let key = action.buff_key();
        let multiplier = by_buff_set.get(&key).copied().unwrap_or_else(|| {
            let product = action
                .buffs
                .iter()
                .map(|b| tables.damage_strength(b).unwrap_or(1.0))
                .product();
            debug!(name = %action.name, multiplier = product, "no matching buff set, using static product");
            product
        });
        action.multiplier = Some(multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    #[test]
    fn matching_buff_set_wins_over_static_product() {
        let tables = ActiveTables::for_patch(7.05);
        let mut spiller = make_action(7392, "Bloodspiller", &["Darkside", "1000786"]);
        spiller.multiplier = Some(1.21);
        let mut tick = make_action(749, "Salted Earth (tick)", &["Darkside", "1000786"]);
        tick.tick = true;

        let mut actions = vec![spiller, tick];
        estimate_multipliers(&mut actions, &[749], &tables);
        assert_eq!(actions[1].multiplier, Some(1.21));
    }

    #[test]
    fn unmatched_set_falls_back_to_static_strengths() {
        let tables = ActiveTables::for_patch(7.05);
        // Darkside (1.10) and an id the tables do not know
        let mut tick = make_action(749, "Salted Earth (tick)", &["Darkside", "424242"]);
        tick.tick = true;
        let mut actions = vec![tick];
        estimate_multipliers(&mut actions, &[749], &tables);
        assert!((actions[0].multiplier.unwrap() - 1.10).abs() < 1e-9);
    }

    #[test]
    fn explicit_multiplier_is_never_overwritten() {
        let tables = ActiveTables::for_patch(7.05);
        let mut tick = make_action(749, "Salted Earth (tick)", &["Darkside"]);
        tick.multiplier = Some(1.5);
        let mut actions = vec![tick];
        estimate_multipliers(&mut actions, &[749], &tables);
        assert_eq!(actions[0].multiplier, Some(1.5));
    }
}
