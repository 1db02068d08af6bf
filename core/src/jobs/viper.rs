//! Viper: venom and honed window tagging.

use super::JobMechanics;
use crate::buffs::BuffWindows;
use crate::events::Action;

/// (venom/honed buff id, ability it empowers).
const PAIRS: &[(&str, u32)] = &[
    ("1003645", 34610), // Flankstung Venom -> Flanksting Strike
    ("1003646", 34611), // Flanksbane Venom -> Flanksbane Fang
    ("1003647", 34612), // Hindstung Venom -> Hindsting Strike
    ("1003668", 34613), // Hindsbane Venom -> Hindsbane Fang
    ("1003669", 34644), // Poised for Twinfang -> Uncoiled Twinfang
    ("1003670", 34645), // Poised for Twinblood -> Uncoiled Twinblood
];

pub struct Viper {
    windows: Vec<(&'static str, u32, BuffWindows)>,
}

impl Viper {
    pub fn new(mut windows_by_id: hashbrown::HashMap<&'static str, BuffWindows>) -> Self {
        let windows = PAIRS
            .iter()
            .map(|&(id, ability)| {
                let w = windows_by_id.remove(id).unwrap_or_else(BuffWindows::never);
                (id, ability, w)
            })
            .collect();
        Self { windows }
    }

    pub fn buff_ids() -> impl Iterator<Item = &'static str> {
        PAIRS.iter().map(|&(id, _)| id)
    }
}

impl JobMechanics for Viper {
    fn apply(&self, actions: &mut Vec<Action>) {
        for action in actions.iter_mut() {
            for (id, ability, windows) in &self.windows {
                if action.ability_id == *ability && windows.contains(action.timestamp) {
                    action.add_buff(id);
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

    #[test]
    fn venom_tags_its_paired_ability() {
        let mut map = hashbrown::HashMap::new();
        map.insert(
            "1003668",
            BuffWindows::from_bands(vec![(0, 100)], Inclusivity::LeftExclusive),
        );
        let vpr = Viper::new(map);
        let mut fang = make_action(34613, "Hindsbane Fang", &[]);
        fang.timestamp = 50;
        let mut sting = make_action(34612, "Hindsting Strike", &[]);
        sting.timestamp = 50;
        let mut actions = vec![fang, sting];
        vpr.apply(&mut actions);
        assert!(actions[0].has_buff("1003668"));
        assert!(actions[1].buffs.is_empty());
    }
}
