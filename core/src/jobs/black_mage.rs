//! Black Mage: elemental stance tracking.
//!
//! Astral Fire and Umbral Ice are invisible to the log, so the stance is
//! folded left-to-right over the cast sequence: granting casts set element
//! and stacks, Transpose swaps at one stack, Paradox refreshes the timer,
//! and the stance lapses when its window runs out. Damage is then scaled by
//! the per-stack elemental multiplier and the Enochian mastery multiplier,
//! neither of which is included in the reported multiplier.

use super::JobMechanics;
use crate::buffs::BuffWindows;
use crate::events::Action;

const FIRE: u32 = 141;
const FIRE_III: u32 = 152;
const FLARE: u32 = 162;
const DESPAIR: u32 = 16505;
const BLIZZARD: u32 = 142;
const BLIZZARD_III: u32 = 154;
const FREEZE: u32 = 159;
const UMBRAL_SOUL: u32 = 16506;
const TRANSPOSE: u32 = 149;
const PARADOX: u32 = 25797;
const THUNDER_III: u32 = 153;

const FIRE_SPELLS: &[u32] = &[FIRE, 147, FIRE_III, 3577, FLARE, DESPAIR, 36989];
const ICE_SPELLS: &[u32] = &[BLIZZARD, 25793, BLIZZARD_III, 3576, FREEZE];

/// Stance window in seconds.
const STANCE_SECONDS: f64 = 15.0;

/// Fire spells gain under Astral Fire and lose under Umbral Ice.
const ASTRAL_FIRE_MULT: [f64; 3] = [1.4, 1.6, 1.8];
const UMBRAL_FIRE_MULT: [f64; 3] = [0.9, 0.8, 0.7];
/// Ice spells lose under Astral Fire and are flat under Umbral Ice.
const ASTRAL_ICE_MULT: [f64; 3] = [0.9, 0.8, 0.7];

pub const THUNDERCLOUD_ID: &str = "1000164";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Fire,
    Ice,
}

#[derive(Debug, Clone, Copy)]
struct StancePoint {
    at: f64,
    element: Option<Element>,
    stacks: u8,
    expires: f64,
}

pub struct BlackMage {
    /// (elapsed seconds, ability id) of every relevant cast, in order.
    timeline: Vec<StancePoint>,
    thundercloud: BuffWindows,
    level: u8,
    patch: f64,
}

impl BlackMage {
    pub fn new(casts: Vec<(f64, u32)>, thundercloud: BuffWindows, level: u8, patch: f64) -> Self {
        Self {
            timeline: fold_stances(casts),
            thundercloud,
            level,
            patch,
        }
    }

    fn stance_at(&self, t: f64) -> Option<(Element, u8)> {
        let point = self.timeline.iter().rev().find(|p| p.at <= t)?;
        if t <= point.expires {
            point.element.map(|e| (e, point.stacks))
        } else {
            None
        }
    }

    /// Enochian mastery multiplier by level and patch.
    fn enochian(&self) -> f64 {
        if self.level <= 90 {
            1.23
        } else if self.patch < 7.05 {
            1.30
        } else {
            1.33
        }
    }
}

fn fold_stances(mut casts: Vec<(f64, u32)>) -> Vec<StancePoint> {
    casts.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut points: Vec<StancePoint> = Vec::with_capacity(casts.len());
    let mut element: Option<Element> = None;
    let mut stacks: u8 = 0;
    let mut expires = f64::NEG_INFINITY;

    for (t, id) in casts {
        if t > expires {
            element = None;
            stacks = 0;
        }
        match id {
            FIRE_III | FLARE | DESPAIR => {
                element = Some(Element::Fire);
                stacks = 3;
            }
            FIRE => {
                stacks = match element {
                    Some(Element::Fire) => (stacks + 1).min(3),
                    _ => 1,
                };
                element = Some(Element::Fire);
            }
            BLIZZARD_III | FREEZE => {
                element = Some(Element::Ice);
                stacks = 3;
            }
            BLIZZARD | UMBRAL_SOUL => {
                stacks = match element {
                    Some(Element::Ice) => (stacks + 1).min(3),
                    _ => 1,
                };
                element = Some(Element::Ice);
            }
            TRANSPOSE => {
                if let Some(e) = element {
                    element = Some(match e {
                        Element::Fire => Element::Ice,
                        Element::Ice => Element::Fire,
                    });
                    stacks = 1;
                }
            }
            PARADOX => {
                // Refreshes the timer, stance carries over unchanged.
            }
            _ => continue,
        }
        expires = t + STANCE_SECONDS;
        points.push(StancePoint {
            at: t,
            element,
            stacks,
            expires,
        });
    }
    points
}

impl JobMechanics for BlackMage {
    fn apply(&self, actions: &mut Vec<Action>) {
        let enochian = self.enochian();
        for action in actions.iter_mut() {
            if action.name.ends_with("(Pet)") {
                continue;
            }
            let mut factor = enochian;
            let fire = FIRE_SPELLS.contains(&action.ability_id);
            let ice = ICE_SPELLS.contains(&action.ability_id);
            if fire || ice {
                if let Some((element, stacks)) = self.stance_at(action.elapsed_seconds) {
                    let idx = (stacks.clamp(1, 3) - 1) as usize;
                    let (mult, tag) = match (element, fire) {
                        (Element::Fire, true) => (ASTRAL_FIRE_MULT[idx], format!("AF{stacks}")),
                        (Element::Fire, false) => (ASTRAL_ICE_MULT[idx], format!("AF{stacks}")),
                        (Element::Ice, true) => (UMBRAL_FIRE_MULT[idx], format!("UI{stacks}")),
                        (Element::Ice, false) => (1.0, format!("UI{stacks}")),
                    };
                    factor *= mult;
                    action.add_buff(&tag);
                }
            }
            if self.patch < 7.0
                && action.ability_id == THUNDER_III
                && !action.tick
                && self.thundercloud.contains(action.timestamp)
            {
                action.add_buff(THUNDERCLOUD_ID);
            }
            action.multiplier = Some(action.multiplier.unwrap_or(1.0) * factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    fn blm(casts: Vec<(f64, u32)>) -> BlackMage {
        BlackMage::new(casts, BuffWindows::never(), 100, 7.05)
    }

    #[test]
    fn fire3_sets_three_astral_stacks() {
        let blm = blm(vec![(0.0, FIRE_III)]);
        assert_eq!(blm.stance_at(5.0), Some((Element::Fire, 3)));
    }

    #[test]
    fn stance_lapses_after_window() {
        let blm = blm(vec![(0.0, FIRE_III)]);
        assert_eq!(blm.stance_at(STANCE_SECONDS + 0.1), None);
    }

    #[test]
    fn transpose_swaps_at_one_stack() {
        let blm = blm(vec![(0.0, FIRE_III), (2.0, TRANSPOSE)]);
        assert_eq!(blm.stance_at(3.0), Some((Element::Ice, 1)));
    }

    #[test]
    fn paradox_preserves_stance_and_refreshes() {
        let blm = blm(vec![(0.0, FIRE_III), (14.0, PARADOX)]);
        assert_eq!(blm.stance_at(20.0), Some((Element::Fire, 3)));
    }

    #[test]
    fn fire4_under_af3_is_scaled_and_tagged() {
        let blm = blm(vec![(0.0, FIRE_III)]);
        let mut f4 = make_action(3577, "Fire IV", &[]);
        f4.elapsed_seconds = 5.0;
        f4.multiplier = Some(1.0);
        let mut actions = vec![f4];
        blm.apply(&mut actions);
        assert!(actions[0].has_buff("AF3"));
        let expected = 1.8 * 1.33;
        assert!((actions[0].multiplier.unwrap() - expected).abs() < 1e-9);
    }
}
