//! Monk: form windows (pre-7.0) and fury gauges (7.0+).
//!
//! Bootshine and Leaping Opo auto-crit under Opo-opo Form, which converts
//! crit-rate buffs into flat damage; those actions get their probability
//! vector and multiplier recomputed here.

use super::JobMechanics;
use crate::buffs::{ActiveTables, BuffWindows};
use crate::events::Action;
use crate::hit_types::Rate;

const BOOTSHINE: u32 = 53;
const DRAGON_KICK: u32 = 74;
const TWIN_SNAKES: u32 = 61;
const DEMOLISH: u32 = 66;
const LEAPING_OPO: u32 = 36945;
const RISING_RAPTOR: u32 = 36946;
const POUNCING_COEURL: u32 = 36947;

pub const OPO_FORM_ID: &str = "1000107";
pub const LEADEN_FIST_ID: &str = "1001861";
pub const OPO_FURY_TAG: &str = "opo_fury";
pub const RAPTOR_FURY_TAG: &str = "raptor_fury";
pub const COEURL_FURY_TAG: &str = "coeurl_fury";

pub struct Monk {
    opo_form: BuffWindows,
    leaden_fist: BuffWindows,
    tables: ActiveTables,
    rate: Rate,
    patch: f64,
}

impl Monk {
    pub fn new(
        opo_form: BuffWindows,
        leaden_fist: BuffWindows,
        tables: ActiveTables,
        rate: Rate,
        patch: f64,
    ) -> Self {
        Self {
            opo_form,
            leaden_fist,
            tables,
            rate,
            patch,
        }
    }

    fn apply_forms(&self, actions: &mut [Action]) {
        for action in actions.iter_mut() {
            if action.ability_id != BOOTSHINE {
                continue;
            }
            if self.leaden_fist.contains(action.timestamp) {
                action.add_buff(LEADEN_FIST_ID);
            }
            if self.opo_form.contains(action.timestamp) {
                action.add_buff(OPO_FORM_ID);
            }
        }
    }

    /// One fury stack per generating action; the coeurl gauge holds two.
    fn apply_furies(&self, actions: &mut [Action]) {
        let mut opo = 0i32;
        let mut raptor = 0i32;
        let mut coeurl = 0i32;
        for action in actions.iter_mut() {
            match action.ability_id {
                DRAGON_KICK => opo = 1,
                TWIN_SNAKES => raptor = 1,
                DEMOLISH => coeurl = 2,
                BOOTSHINE | LEAPING_OPO => {
                    if opo > 0 {
                        action.add_buff(OPO_FURY_TAG);
                        opo -= 1;
                    }
                }
                RISING_RAPTOR => {
                    if raptor > 0 {
                        action.add_buff(RAPTOR_FURY_TAG);
                        raptor -= 1;
                    }
                }
                POUNCING_COEURL => {
                    if coeurl > 0 {
                        action.add_buff(COEURL_FURY_TAG);
                        coeurl -= 1;
                    }
                }
                _ => {}
            }
        }
    }

    /// Opo-opo hits auto-crit, so crit-rate buffs on them become a damage
    /// bonus and the probability vector collapses onto the crit types.
    fn recompute_forced_crits(&self, actions: &mut [Action]) {
        for action in actions.iter_mut() {
            let forced = match action.ability_id {
                BOOTSHINE => action.has_buff(OPO_FORM_ID),
                LEAPING_OPO => true,
                _ => false,
            };
            if !forced {
                continue;
            }
            let crit_bonus = crit_rate_bonus(&self.tables, &action.buffs);
            action.probabilities = self.rate.guaranteed_probabilities(1, crit_bonus, 0.0);
            let bonus = self.rate.guaranteed_damage_bonus(1, crit_bonus, 0.0);
            if bonus != 1.0 {
                action.multiplier = Some(action.multiplier.unwrap_or(1.0) * bonus);
            }
        }
    }
}

fn crit_rate_bonus(tables: &ActiveTables, buffs: &[String]) -> f64 {
    let sum: f64 = buffs.iter().filter_map(|b| tables.critical_rate(b)).sum();
    (sum * 100.0).round() / 100.0
}

impl JobMechanics for Monk {
    fn apply(&self, actions: &mut Vec<Action>) {
        if self.patch < 7.0 {
            self.apply_forms(actions);
        } else {
            self.apply_furies(actions);
        }
        self.recompute_forced_crits(actions);
    }
}
