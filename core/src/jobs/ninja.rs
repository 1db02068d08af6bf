//! Ninja: Meisui and Kassatsu windows, Kazematoi gauge.

use super::{JobMechanics, gauge::BoundedGauge};
use crate::buffs::BuffWindows;
use crate::events::Action;

pub const MEISUI_ID: &str = "1002689";
pub const KASSATSU_ID: &str = "1000497";
pub const KAZEMATOI_TAG: &str = "kazematoi";

const KASSATSU_MULTIPLIER: f64 = 1.3;

const BHAVACAKRA: u32 = 7402;
const ZESHO_MEPPO: u32 = 36960;
/// Ninjutsu ability ids affected by Kassatsu.
const NINJUTSU: &[u32] = &[2265, 2266, 2267, 2268, 2270, 2271, 2272, 16491, 16492];

const ARMOR_CRUSH: u32 = 3563;
const AEOLIAN_EDGE: u32 = 2255;

pub struct Ninja {
    meisui: BuffWindows,
    kassatsu: BuffWindows,
    patch: f64,
}

impl Ninja {
    pub fn new(meisui: BuffWindows, kassatsu: BuffWindows, patch: f64) -> Self {
        Self {
            meisui,
            kassatsu,
            patch,
        }
    }
}

impl JobMechanics for Ninja {
    fn apply(&self, actions: &mut Vec<Action>) {
        // Armor Crush banks 2, Aeolian Edge spends 1 and hits harder while
        // any remain. The spend is checked before the decrement.
        let mut kazematoi = BoundedGauge::new(0, 5);

        for action in actions.iter_mut() {
            if NINJUTSU.contains(&action.ability_id)
                && self.kassatsu.contains(action.timestamp)
            {
                action.add_buff(KASSATSU_ID);
                action.multiplier =
                    Some(action.multiplier.unwrap_or(1.0) * KASSATSU_MULTIPLIER);
            }
            if (action.ability_id == BHAVACAKRA || action.ability_id == ZESHO_MEPPO)
                && self.meisui.contains(action.timestamp)
            {
                action.add_buff(MEISUI_ID);
            }
            if self.patch >= 7.0 {
                match action.ability_id {
                    ARMOR_CRUSH => {
                        kazematoi.add(2);
                    }
                    AEOLIAN_EDGE => {
                        if kazematoi.value() > 0 {
                            action.add_buff(KAZEMATOI_TAG);
                        }
                        kazematoi.add(-1);
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::Inclusivity;
    use crate::test_support::make_action;

    fn windows(bands: &[(i64, i64)]) -> BuffWindows {
        BuffWindows::from_bands(bands.to_vec(), Inclusivity::LeftExclusive)
    }

    #[test]
    fn kassatsu_scales_ninjutsu() {
        let nin = Ninja::new(BuffWindows::never(), windows(&[(0, 100)]), 7.05);
        let mut raiton = make_action(2267, "Raiton", &[]);
        raiton.timestamp = 50;
        raiton.multiplier = Some(1.0);
        let mut actions = vec![raiton];
        nin.apply(&mut actions);
        assert!(actions[0].has_buff(KASSATSU_ID));
        assert!((actions[0].multiplier.unwrap() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn kazematoi_spend_checks_before_decrement() {
        let nin = Ninja::new(BuffWindows::never(), BuffWindows::never(), 7.05);
        let mut actions = vec![
            make_action(AEOLIAN_EDGE, "Aeolian Edge", &[]),
            make_action(ARMOR_CRUSH, "Armor Crush", &[]),
            make_action(AEOLIAN_EDGE, "Aeolian Edge", &[]),
            make_action(AEOLIAN_EDGE, "Aeolian Edge", &[]),
            make_action(AEOLIAN_EDGE, "Aeolian Edge", &[]),
        ];
        nin.apply(&mut actions);
        assert!(!actions[0].has_buff(KAZEMATOI_TAG), "empty gauge");
        assert!(actions[2].has_buff(KAZEMATOI_TAG));
        assert!(actions[3].has_buff(KAZEMATOI_TAG));
        assert!(!actions[4].has_buff(KAZEMATOI_TAG), "gauge exhausted");
    }

    #[test]
    fn kazematoi_is_dawntrail_only() {
        let nin = Ninja::new(BuffWindows::never(), BuffWindows::never(), 6.5);
        let mut actions = vec![
            make_action(ARMOR_CRUSH, "Armor Crush", &[]),
            make_action(AEOLIAN_EDGE, "Aeolian Edge", &[]),
        ];
        nin.apply(&mut actions);
        assert!(!actions[1].has_buff(KAZEMATOI_TAG));
    }
}
