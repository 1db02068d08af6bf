//! Reaper: enhanced-window tagging.

use super::JobMechanics;
use crate::buffs::BuffWindows;
use crate::events::Action;

/// (enhancement buff id, ability it empowers).
const PAIRS: &[(&str, u32)] = &[
    ("1002588", 24382), // Enhanced Gibbet
    ("1002589", 24383), // Enhanced Gallows
    ("1002590", 24395), // Enhanced Void Reaping
    ("1002591", 24396), // Enhanced Cross Reaping
];

pub struct Reaper {
    /// Windows in the same order as [`PAIRS`].
    windows: Vec<(&'static str, u32, BuffWindows)>,
}

impl Reaper {
    /// `windows` maps each enhancement buff id to its uptime windows;
    /// missing buffs default to never-active.
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

impl JobMechanics for Reaper {
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
    fn enhanced_windows_tag_their_paired_ability_only() {
        let mut map = hashbrown::HashMap::new();
        map.insert(
            "1002588",
            BuffWindows::from_bands(vec![(0, 100)], Inclusivity::LeftExclusive),
        );
        let rpr = Reaper::new(map);

        let mut gibbet = make_action(24382, "Gibbet", &[]);
        gibbet.timestamp = 50;
        let mut gallows = make_action(24383, "Gallows", &[]);
        gallows.timestamp = 50;
        let mut actions = vec![gibbet, gallows];
        rpr.apply(&mut actions);
        assert!(actions[0].has_buff("1002588"));
        assert!(actions[1].buffs.is_empty());
    }
}
