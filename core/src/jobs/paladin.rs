//! Paladin: Divine Might and Requiescat windows.

use super::JobMechanics;
use crate::buffs::BuffWindows;
use crate::events::Action;

pub const DIVINE_MIGHT_ID: &str = "1002673";
pub const REQUIESCAT_ID: &str = "1001368";

const HOLY_SPIRIT: u32 = 7384;
const HOLY_CIRCLE: u32 = 8299;
/// Confiteor and the three blades.
const BLADE_COMBO: &[u32] = &[16459, 25748, 25749, 25750];

pub struct Paladin {
    divine_might: BuffWindows,
    requiescat: BuffWindows,
}

impl Paladin {
    pub fn new(divine_might: BuffWindows, requiescat: BuffWindows) -> Self {
        Self {
            divine_might,
            requiescat,
        }
    }
}

impl JobMechanics for Paladin {
    fn apply(&self, actions: &mut Vec<Action>) {
        for action in actions.iter_mut() {
            let holy = action.ability_id == HOLY_SPIRIT || action.ability_id == HOLY_CIRCLE;
            if holy {
                // Divine Might is consumed first when both are up.
                if self.divine_might.contains(action.timestamp) {
                    action.add_buff(DIVINE_MIGHT_ID);
                } else if self.requiescat.contains(action.timestamp) {
                    action.add_buff(REQUIESCAT_ID);
                }
            } else if BLADE_COMBO.contains(&action.ability_id)
                && self.requiescat.contains(action.timestamp)
            {
                action.add_buff(REQUIESCAT_ID);
            }
        }
    }
}
