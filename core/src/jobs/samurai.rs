//! Samurai: Enhanced Enpi window.

use super::JobMechanics;
use crate::buffs::BuffWindows;
use crate::events::Action;

pub const ENHANCED_ENPI_ID: &str = "1001236";
const ENPI: u32 = 7486;

pub struct Samurai {
    enhanced_enpi: BuffWindows,
}

impl Samurai {
    pub fn new(enhanced_enpi: BuffWindows) -> Self {
        Self { enhanced_enpi }
    }
}

impl JobMechanics for Samurai {
    fn apply(&self, actions: &mut Vec<Action>) {
        for action in actions.iter_mut() {
            if action.ability_id == ENPI && self.enhanced_enpi.contains(action.timestamp) {
                action.add_buff(ENHANCED_ENPI_ID);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::Inclusivity;
    use crate::test_support::make_action;

    #[test]
    fn enpi_inside_window_is_enhanced() {
        let sam = Samurai::new(BuffWindows::from_bands(
            vec![(0, 100)],
            Inclusivity::LeftExclusive,
        ));
        let mut inside = make_action(ENPI, "Enpi", &[]);
        inside.timestamp = 50;
        let mut outside = make_action(ENPI, "Enpi", &[]);
        outside.timestamp = 500;
        let mut actions = vec![inside, outside];
        sam.apply(&mut actions);
        assert!(actions[0].has_buff(ENHANCED_ENPI_ID));
        assert!(!actions[1].has_buff(ENHANCED_ENPI_ID));
    }
}
