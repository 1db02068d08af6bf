//! Patch calendars and echo windows
//!
//! Balance patches are looked up by fight start timestamp. The Korean and
//! Chinese services run their own patch cadence, so each region carries an
//! independent calendar.

use serde::{Deserialize, Serialize};

/// Server region reported by the log-hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    /// NA / EU / OCE share the global calendar
    #[default]
    Global,
    Korea,
    China,
}

impl Region {
    /// Parse the compact region name from fight metadata. Unknown regions
    /// fall back to the global calendar.
    pub fn from_compact_name(name: &str) -> Self {
        match name {
            "KR" => Region::Korea,
            "CN" => Region::China,
            _ => Region::Global,
        }
    }
}

/// One patch validity window. Timestamps are unix epoch milliseconds,
/// inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchWindow {
    pub patch: f64,
    pub start: i64,
    pub end: i64,
}

const fn pw(patch: f64, start: i64, end: i64) -> PatchWindow {
    PatchWindow { patch, start, end }
}

/// Global (NA/EU/OCE/JP) patch calendar, ordered by start time.
pub const GLOBAL_PATCHES: &[PatchWindow] = &[
    pw(6.4, 1684836000000, 1696327199999),
    pw(6.5, 1696327200000, 1719565299999),
    pw(7.0, 1719565200000, 1721109699999),
    pw(7.01, 1721109600000, 1722322899999),
    pw(7.05, 1722322800000, 1731427199999),
    pw(7.1, 1731427200000, 1742367599999),
    pw(7.2, 1742367600000, 1767167999999),
];

/// Korean service calendar; patches land roughly half a year after global.
pub const KOREA_PATCHES: &[PatchWindow] = &[
    pw(6.4, 1700549400000, 1711487399999),
    pw(6.5, 1711487400000, 1734487199999),
    pw(7.0, 1734487200000, 1736215199999),
    pw(7.01, 1736215200000, 1737424799999),
    pw(7.05, 1737424800000, 1746586799999),
    pw(7.1, 1746586800000, 1767167999999),
];

/// Chinese service calendar.
pub const CHINA_PATCHES: &[PatchWindow] = &[
    pw(6.4, 1696318200000, 1707289199999),
    pw(6.5, 1707289200000, 1730721599999),
    pw(7.0, 1730721600000, 1732417199999),
    pw(7.01, 1732417200000, 1733626799999),
    pw(7.05, 1733626800000, 1742787599999),
    pw(7.1, 1742787600000, 1767167999999),
];

/// Resolve the balance patch a fight belongs to. Returns 0.0 when the
/// timestamp predates every known window, matching "unknown patch" in the
/// static tables (which then filter to nothing).
pub fn patch_for(region: Region, fight_start: i64) -> f64 {
    let calendar = match region {
        Region::Global => GLOBAL_PATCHES,
        Region::Korea => KOREA_PATCHES,
        Region::China => CHINA_PATCHES,
    };
    calendar
        .iter()
        .find(|w| fight_start >= w.start && fight_start <= w.end)
        .map(|w| w.patch)
        .unwrap_or(0.0)
}

/// Start of the 10% echo window (patch 6.57).
pub const ECHO_10_START: i64 = 1707818400000;
/// Start of the 15% echo window (patch 6.58 onwards).
pub const ECHO_15_START: i64 = 1710849600000;

/// Echo strength and buff tag for a fight with `hasEcho`, selected by fight
/// start timestamp. Fights before the first echo window get no bonus.
pub fn echo_strength(fight_start: i64) -> Option<(f64, &'static str)> {
    if fight_start >= ECHO_15_START {
        Some((1.15, "echo15"))
    } else if fight_start >= ECHO_10_START {
        Some((1.10, "echo10"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_patch_lookup() {
        // Mid-7.05
        assert_eq!(patch_for(Region::Global, 1725000000000), 7.05);
        // Before every window
        assert_eq!(patch_for(Region::Global, 1000000000000), 0.0);
    }

    #[test]
    fn regions_have_independent_calendars() {
        let ts = 1735000000000;
        assert_eq!(patch_for(Region::Korea, ts), 7.0);
        assert_ne!(patch_for(Region::Global, ts), patch_for(Region::Korea, ts));
    }

    #[test]
    fn echo_windows() {
        assert_eq!(echo_strength(ECHO_10_START + 1), Some((1.10, "echo10")));
        assert_eq!(echo_strength(ECHO_15_START + 1), Some((1.15, "echo15")));
        assert_eq!(echo_strength(ECHO_10_START - 1), None);
    }
}
