//! Dark Knight: Darkside reconstruction and Salted Earth snapshots.
//!
//! Darkside is invisible to the log, so its uptime is rebuilt from Edge and
//! Flood casts: each cast grants 30 seconds, capped at 60 remaining. Unpaired
//! casts count, a swung Edge refreshes Darkside whether or not it landed.

use super::JobMechanics;
use crate::events::Action;

/// Edge of Shadow, Flood of Shadow and their low-level forms.
const DARKSIDE_GRANTING: &[u32] = &[16470, 16469, 3629, 3634];
const SALTED_EARTH_TICK: u32 = 749;

const DARKSIDE_GRANT_SECONDS: f64 = 30.0;
const DARKSIDE_CAP_SECONDS: f64 = 60.0;
/// A gap between Salted Earth ticks longer than this starts a new
/// application (the dot ticks every 3 seconds).
const SALTED_EARTH_GAP_SECONDS: f64 = 10.0;

pub const DARKSIDE_TAG: &str = "Darkside";

pub struct DarkKnight;

impl DarkKnight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DarkKnight {
    fn default() -> Self {
        Self::new()
    }
}

/// Active Darkside windows, in elapsed seconds, from the grant cast times.
pub fn darkside_windows(mut cast_times: Vec<f64>) -> Vec<(f64, f64)> {
    cast_times.sort_by(|a, b| a.total_cmp(b));
    let mut windows: Vec<(f64, f64)> = Vec::new();
    let mut current: Option<(f64, f64)> = None;
    for t in cast_times {
        match current {
            Some((start, until)) if t <= until => {
                let remaining = until - t;
                let extended = t + (remaining + DARKSIDE_GRANT_SECONDS).min(DARKSIDE_CAP_SECONDS);
                current = Some((start, extended));
            }
            Some(window) => {
                windows.push(window);
                current = Some((t, t + DARKSIDE_GRANT_SECONDS));
            }
            None => {
                current = Some((t, t + DARKSIDE_GRANT_SECONDS));
            }
        }
    }
    if let Some(window) = current {
        windows.push(window);
    }
    windows
}

fn in_windows(windows: &[(f64, f64)], t: f64) -> bool {
    windows.iter().any(|&(s, e)| t >= s && t <= e)
}

impl JobMechanics for DarkKnight {
    fn apply(&self, actions: &mut Vec<Action>) {
        let cast_times: Vec<f64> = actions
            .iter()
            .filter(|a| DARKSIDE_GRANTING.contains(&a.ability_id))
            .map(|a| a.elapsed_seconds)
            .collect();
        let windows = darkside_windows(cast_times);

        // Salted Earth snapshots Darkside at application, so group ticks
        // into applications first and tag whole groups.
        let mut salted_apply: Option<f64> = None;
        let mut last_tick = f64::NEG_INFINITY;

        for action in actions.iter_mut() {
            // Living Shadow acts on its own and never has Darkside.
            if action.name.ends_with("(Pet)") {
                continue;
            }
            if action.ability_id == SALTED_EARTH_TICK {
                if action.elapsed_seconds - last_tick > SALTED_EARTH_GAP_SECONDS {
                    salted_apply = Some(action.elapsed_seconds);
                }
                last_tick = action.elapsed_seconds;
                if salted_apply.is_some_and(|t| in_windows(&windows, t)) {
                    action.add_buff(DARKSIDE_TAG);
                }
            } else if in_windows(&windows, action.elapsed_seconds) {
                action.add_buff(DARKSIDE_TAG);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_action;

    #[test]
    fn reconstruction_finds_the_gap() {
        // 30s base, 60s cap: casts at 0, 25 and 70 leave exactly (60, 70) dark.
        let windows = darkside_windows(vec![0.0, 25.0, 70.0]);
        assert_eq!(windows, vec![(0.0, 60.0), (70.0, 100.0)]);
    }

    #[test]
    fn remaining_time_caps_at_sixty() {
        let windows = darkside_windows(vec![0.0, 5.0, 10.0, 15.0]);
        assert_eq!(windows, vec![(0.0, 75.0)]);
    }

    #[test]
    fn pet_never_gets_darkside() {
        let mut edge = make_action(16470, "Edge of Shadow", &[]);
        edge.elapsed_seconds = 0.0;
        let mut pet = make_action(25867, "Shadowbringer (Pet)", &[]);
        pet.name = "Shadowbringer (Pet)".to_string();
        pet.elapsed_seconds = 5.0;
        let mut slash = make_action(3617, "Hard Slash", &[]);
        slash.elapsed_seconds = 6.0;

        let mut actions = vec![edge, pet, slash];
        DarkKnight::new().apply(&mut actions);
        assert!(actions[0].has_buff(DARKSIDE_TAG));
        assert!(!actions[1].has_buff(DARKSIDE_TAG));
        assert!(actions[2].has_buff(DARKSIDE_TAG));
    }

    #[test]
    fn salted_earth_snapshots_at_application() {
        let mut edge = make_action(16470, "Edge of Shadow", &[]);
        edge.elapsed_seconds = 0.0;
        // Application inside Darkside, later ticks drift past the window end.
        let tick_times = [55.0, 58.0, 61.0, 64.0];
        let mut actions = vec![edge];
        for t in tick_times {
            let mut tick = make_action(749, "Salted Earth (tick)", &[]);
            tick.tick = true;
            tick.elapsed_seconds = t;
            actions.push(tick);
        }
        DarkKnight::new().apply(&mut actions);
        for tick in &actions[1..] {
            assert!(tick.has_buff(DARKSIDE_TAG), "tick at {}", tick.elapsed_seconds);
        }
    }
}
