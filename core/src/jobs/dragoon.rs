//! Dragoon (pre-7.0): combo finisher validation.
//!
//! Fang and Claw and Wheeling Thrust only get their bonus when the proc that
//! enabled them came from the right combo step. Each proc window carries the
//! ability id that applied it; a finisher whose window was applied by the
//! wrong step falls back to unbuffed potency via the `no_finisher` tag.

use super::JobMechanics;
use crate::events::Action;

const FANG_AND_CLAW: u32 = 3554;
const WHEELING_THRUST: u32 = 3556;

/// Full Thrust / Heavens' Thrust enable Fang and Claw.
const FANG_ENABLERS: &[u32] = &[84, 25771, WHEELING_THRUST];
/// Chaos Thrust / Chaotic Spring enable Wheeling Thrust.
const WHEEL_ENABLERS: &[u32] = &[88, 25772, FANG_AND_CLAW];

pub const NO_FINISHER_TAG: &str = "no_finisher";

/// One proc uptime window together with the ability that granted it
/// (`extraAbilityGameID` on the applying buff event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinisherWindow {
    pub start: i64,
    pub end: i64,
    pub applied_by: u32,
}

pub struct Dragoon {
    /// Fang and Claw Bared windows.
    fang_windows: Vec<FinisherWindow>,
    /// Wheel in Motion windows.
    wheel_windows: Vec<FinisherWindow>,
}

impl Dragoon {
    pub fn new(fang_windows: Vec<FinisherWindow>, wheel_windows: Vec<FinisherWindow>) -> Self {
        Self {
            fang_windows,
            wheel_windows,
        }
    }
}

fn valid_window(windows: &[FinisherWindow], enablers: &[u32], ts: i64) -> bool {
    windows
        .iter()
        .filter(|w| ts > w.start && ts <= w.end)
        .any(|w| enablers.contains(&w.applied_by))
}

impl JobMechanics for Dragoon {
    fn apply(&self, actions: &mut Vec<Action>) {
        for action in actions.iter_mut() {
            let valid = match action.ability_id {
                FANG_AND_CLAW => {
                    valid_window(&self.fang_windows, FANG_ENABLERS, action.timestamp)
                }
                WHEELING_THRUST => {
                    valid_window(&self.wheel_windows, WHEEL_ENABLERS, action.timestamp)
                }
                _ => continue,
            };
            if !valid {
                action.add_buff(NO_FINISHER_TAG);
            }
        }
    }
}
