//! Falloff fractions and potency-row selection.

use hashbrown::HashMap;

use crate::data::potencies::PotencyRow;
use crate::events::Action;

/// Raw hit-type code for a critical in the event stream.
const HIT_TYPE_CRIT: u8 = 2;
const DIRECT_HIT_MULTIPLIER: f64 = 1.25;
/// How far an observed damage fraction may sit from a table falloff value
/// and still match it.
pub const FALLOFF_TOLERANCE: f64 = 0.1;

/// Damage with crit and direct-hit contributions divided out, so hits on
/// different targets of one packet are comparable.
fn hit_normalized_damage(action: &Action) -> f64 {
    let mut damage = action.amount as f64;
    if action.hit_type == HIT_TYPE_CRIT {
        damage /= action.l_c.max(1) as f64 / 1000.0;
    }
    if action.direct_hit {
        damage /= DIRECT_HIT_MULTIPLIER;
    }
    damage
}

/// Compute each action's per-target damage fraction.
///
/// Non-tick hits sharing a packet id landed from one use of a multi-target
/// ability; each hit's fraction is its normalized damage over the packet
/// maximum, snapped to the potency table's falloff list. Ticks and
/// packet-less hits are full potency.
pub fn assign_falloff(actions: &mut [Action], rows: &[&'static PotencyRow]) {
    let mut packet_max: HashMap<i64, f64> = HashMap::new();
    for action in actions.iter() {
        if action.tick || action.unpaired {
            continue;
        }
        if let Some(packet) = action.packet_id {
            let d = hit_normalized_damage(action);
            let entry = packet_max.entry(packet).or_insert(d);
            if d > *entry {
                *entry = d;
            }
        }
    }

    let falloffs_by_ability: HashMap<u32, &'static [f64]> = rows
        .iter()
        .map(|r| (r.action_id, r.falloff))
        .collect();

    for action in actions.iter_mut() {
        if action.tick || action.unpaired {
            continue;
        }
        let Some(packet) = action.packet_id else {
            continue;
        };
        let Some(&max) = packet_max.get(&packet) else {
            continue;
        };
        if max <= 0.0 {
            continue;
        }
        let fraction = hit_normalized_damage(action) / max;
        let allowed = falloffs_by_ability
            .get(&action.ability_id)
            .copied()
            .unwrap_or(&[1.0]);
        action.falloff = snap_falloff(fraction, allowed);
    }
}

/// Snap to the closest allowed falloff within tolerance, else full potency.
pub fn snap_falloff(fraction: f64, allowed: &[f64]) -> f64 {
    allowed
        .iter()
        .copied()
        .filter(|f| (fraction - f).abs() <= FALLOFF_TOLERANCE)
        .min_by(|a, b| {
            (fraction - a).abs().total_cmp(&(fraction - b).abs())
        })
        .unwrap_or(1.0)
}

/// Match quality of one potency row against an action's buff set.
/// Exact buff match beats rows expecting no buff beats rows expecting a
/// buff that is absent.
pub fn buff_priority(row: &PotencyRow, buffs: &[String]) -> u8 {
    match row.buff_id {
        Some(id) if buffs.iter().any(|b| b == id) => 2,
        None => 1,
        Some(_) => 0,
    }
}

/// The potency selected by the event's `bonusPercent`, with the name suffix
/// it implies.
pub fn select_potency(row: &PotencyRow, bonus_percent: Option<u32>) -> (u32, &'static str) {
    if let Some(bp) = bonus_percent {
        if let Some((potency, expected)) = row.combo_positional {
            if bp == expected {
                return (potency, "_combo_positional");
            }
        }
        if let Some((potency, expected)) = row.combo {
            if bp == expected {
                return (potency, "_combo");
            }
        }
        if let Some((potency, expected)) = row.positional {
            if bp == expected {
                return (potency, "_positional");
            }
        }
    }
    (row.base, "")
}
