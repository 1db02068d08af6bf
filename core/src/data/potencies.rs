//! Static potency table
//!
//! One row per (ability, required buff) pair. Combo and positional variants
//! live on the same row and are selected by the `bonusPercent` the log
//! service reports; buff-conditional variants (Divine Might, enhanced
//! windows, inferred tiers like `pp2` or `wildfire_4`) are separate rows
//! keyed by `buff_id`. The aggregator joins groups against this table and
//! ranks candidate rows by buff-match quality.

use super::job::Job;

/// Broad damage category, used for sorting the final table and for
/// normalization rules (ticks snapshot, autos use a different speed stat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DamageKind {
    Direct,
    MagicalDot,
    PhysicalDot,
    Auto,
    Pet,
}

impl DamageKind {
    pub const fn label(&self) -> &'static str {
        match self {
            DamageKind::Direct => "direct",
            DamageKind::MagicalDot => "magic-dot",
            DamageKind::PhysicalDot => "physical-dot",
            DamageKind::Auto => "auto",
            DamageKind::Pet => "pet",
        }
    }
}

/// One potency fact. `combo`/`positional`/`combo_positional` hold the
/// upgraded potency together with the `bonusPercent` value that signals the
/// upgrade in the event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotencyRow {
    pub action_id: u32,
    pub name: &'static str,
    pub job: Job,
    pub kind: DamageKind,
    /// Buff id (real or synthetic) this row requires; `None` rows apply when
    /// no table buff is on the action.
    pub buff_id: Option<&'static str>,
    pub base: u32,
    pub combo: Option<(u32, u32)>,
    pub positional: Option<(u32, u32)>,
    pub combo_positional: Option<(u32, u32)>,
    /// Allowed per-target damage fractions for multi-target abilities.
    pub falloff: &'static [f64],
    pub min_patch: f64,
    pub max_patch: f64,
    pub min_level: u8,
    pub max_level: u8,
}

const NO_FALLOFF: &[f64] = &[1.0];
const HALF_FALLOFF: &[f64] = &[1.0, 0.5];

const fn row(action_id: u32, name: &'static str, job: Job, base: u32) -> PotencyRow {
    PotencyRow {
        action_id,
        name,
        job,
        kind: DamageKind::Direct,
        buff_id: None,
        base,
        combo: None,
        positional: None,
        combo_positional: None,
        falloff: NO_FALLOFF,
        min_patch: 0.0,
        max_patch: 99.0,
        min_level: 1,
        max_level: 100,
    }
}

const fn buffed(
    action_id: u32,
    name: &'static str,
    job: Job,
    buff_id: &'static str,
    base: u32,
) -> PotencyRow {
    PotencyRow {
        buff_id: Some(buff_id),
        ..row(action_id, name, job, base)
    }
}

const fn auto(job: Job, action_id: u32, name: &'static str, base: u32) -> PotencyRow {
    PotencyRow {
        kind: DamageKind::Auto,
        ..row(action_id, name, job, base)
    }
}

pub const POTENCIES: &[PotencyRow] = &[
    // ---- Paladin ----
    row(9, "Fast Blade", Job::Paladin, 220),
    PotencyRow {
        combo: Some((330, 94)),
        ..row(15, "Riot Blade", Job::Paladin, 170)
    },
    PotencyRow {
        combo: Some((460, 130)),
        ..row(3539, "Royal Authority", Job::Paladin, 200)
    },
    row(7384, "Holy Spirit", Job::Paladin, 370),
    buffed(7384, "Holy Spirit", Job::Paladin, "1002673", 470),
    buffed(7384, "Holy Spirit", Job::Paladin, "1001368", 670),
    PotencyRow {
        falloff: HALF_FALLOFF,
        ..row(16459, "Confiteor", Job::Paladin, 440)
    },
    PotencyRow {
        falloff: HALF_FALLOFF,
        ..buffed(16459, "Confiteor", Job::Paladin, "1001368", 1000)
    },
    // ---- Warrior ----
    row(31, "Heavy Swing", Job::Warrior, 220),
    row(3549, "Fell Cleave", Job::Warrior, 580),
    row(3550, "Decimate", Job::Warrior, 180),
    row(16465, "Inner Chaos", Job::Warrior, 660),
    // ---- Dark Knight ----
    row(3617, "Hard Slash", Job::DarkKnight, 300),
    PotencyRow {
        combo: Some((380, 58)),
        ..row(3623, "Syphon Strike", Job::DarkKnight, 240)
    },
    PotencyRow {
        combo: Some((480, 85)),
        ..row(3632, "Souleater", Job::DarkKnight, 260)
    },
    row(7392, "Bloodspiller", Job::DarkKnight, 580),
    row(16470, "Edge of Shadow", Job::DarkKnight, 460),
    row(16469, "Flood of Shadow", Job::DarkKnight, 160),
    PotencyRow {
        kind: DamageKind::MagicalDot,
        ..row(749, "Salted Earth (tick)", Job::DarkKnight, 50)
    },
    // ---- Black Mage ----
    row(3577, "Fire IV", Job::BlackMage, 520),
    row(3576, "Blizzard IV", Job::BlackMage, 310),
    row(25797, "Paradox", Job::BlackMage, 520),
    row(16507, "Xenoglossy", Job::BlackMage, 880),
    PotencyRow {
        kind: DamageKind::MagicalDot,
        ..row(153, "Thunder III (tick)", Job::BlackMage, 35)
    },
    // ---- Monk ----
    row(53, "Bootshine", Job::Monk, 220),
    buffed(53, "Bootshine", Job::Monk, "1001861", 420),
    row(74, "Dragon Kick", Job::Monk, 320),
    row(36945, "Leaping Opo", Job::Monk, 200),
    buffed(36945, "Leaping Opo", Job::Monk, "opo_fury", 260),
    PotencyRow {
        positional: Some((440, 10)),
        ..row(36947, "Pouncing Coeurl", Job::Monk, 400)
    },
    PotencyRow {
        positional: Some((500, 14)),
        ..buffed(36947, "Pouncing Coeurl", Job::Monk, "coeurl_fury", 460)
    },
    // ---- Ninja ----
    row(2240, "Spinning Edge", Job::Ninja, 300),
    PotencyRow {
        combo: Some((400, 66)),
        ..row(2242, "Gust Slash", Job::Ninja, 240)
    },
    PotencyRow {
        combo: Some((380, 90)),
        positional: Some((260, 30)),
        combo_positional: Some((440, 120)),
        ..row(2255, "Aeolian Edge", Job::Ninja, 200)
    },
    PotencyRow {
        combo: Some((480, 90)),
        positional: Some((360, 30)),
        combo_positional: Some((540, 120)),
        ..buffed(2255, "Aeolian Edge", Job::Ninja, "kazematoi", 300)
    },
    PotencyRow {
        combo: Some((420, 75)),
        ..row(3563, "Armor Crush", Job::Ninja, 240)
    },
    row(2267, "Raiton", Job::Ninja, 740),
    // ---- Dragoon ----
    row(75, "True Thrust", Job::Dragoon, 230),
    PotencyRow {
        positional: Some((340, 13)),
        max_patch: 6.99,
        ..row(3554, "Fang and Claw", Job::Dragoon, 300)
    },
    PotencyRow {
        positional: Some((300, 13)),
        max_patch: 6.99,
        ..buffed(3554, "Fang and Claw", Job::Dragoon, "no_finisher", 260)
    },
    PotencyRow {
        positional: Some((340, 13)),
        max_patch: 6.99,
        ..row(3556, "Wheeling Thrust", Job::Dragoon, 300)
    },
    PotencyRow {
        positional: Some((300, 13)),
        max_patch: 6.99,
        ..buffed(3556, "Wheeling Thrust", Job::Dragoon, "no_finisher", 260)
    },
    // ---- Reaper ----
    PotencyRow {
        positional: Some((520, 13)),
        ..row(24382, "Gibbet", Job::Reaper, 460)
    },
    PotencyRow {
        positional: Some((580, 13)),
        ..buffed(24382, "Gibbet", Job::Reaper, "1002588", 520)
    },
    PotencyRow {
        positional: Some((520, 13)),
        ..row(24383, "Gallows", Job::Reaper, 460)
    },
    PotencyRow {
        positional: Some((580, 13)),
        ..buffed(24383, "Gallows", Job::Reaper, "1002589", 520)
    },
    row(24396, "Cross Reaping", Job::Reaper, 500),
    buffed(24396, "Cross Reaping", Job::Reaper, "1002591", 560),
    row(24395, "Void Reaping", Job::Reaper, 500),
    buffed(24395, "Void Reaping", Job::Reaper, "1002590", 560),
    // ---- Samurai ----
    row(7477, "Hakaze", Job::Samurai, 200),
    row(7486, "Enpi", Job::Samurai, 100),
    buffed(7486, "Enpi", Job::Samurai, "1001236", 270),
    row(7487, "Midare Setsugekka", Job::Samurai, 640),
    // ---- Viper ----
    PotencyRow {
        positional: Some((400, 17)),
        ..row(34613, "Hindsbane Fang", Job::Viper, 340)
    },
    PotencyRow {
        positional: Some((460, 17)),
        ..buffed(34613, "Hindsbane Fang", Job::Viper, "1003668", 400)
    },
    PotencyRow {
        falloff: HALF_FALLOFF,
        ..row(34633, "Uncoiled Fury", Job::Viper, 680)
    },
    row(34644, "Uncoiled Twinfang", Job::Viper, 100),
    buffed(34644, "Uncoiled Twinfang", Job::Viper, "1003669", 120),
    // ---- Machinist ----
    row(7411, "Heated Split Shot", Job::Machinist, 220),
    row(16498, "Drill", Job::Machinist, 600),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_1", 240),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_2", 480),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_3", 720),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_4", 960),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_5", 1200),
    buffed(861, "Wildfire", Job::Machinist, "wildfire_6", 1440),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_50", 120),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_60", 144),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_70", 168),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_80", 192),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_90", 216),
    pet_band(16504, "Arm Punch (Pet)", Job::Machinist, "gauge_100", 240),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_50", 340),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_60", 408),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_70", 476),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_80", 544),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_90", 612),
    pet_band(16503, "Pile Bunker (Pet)", Job::Machinist, "gauge_100", 680),
    // ---- Bard ----
    row(16495, "Burst Shot", Job::Bard, 220),
    row(3562, "Sidewinder", Job::Bard, 320),
    buffed(7404, "Pitch Perfect", Job::Bard, "pp1", 100),
    buffed(7404, "Pitch Perfect", Job::Bard, "pp2", 220),
    buffed(7404, "Pitch Perfect", Job::Bard, "pp3", 360),
    PotencyRow {
        falloff: HALF_FALLOFF,
        ..buffed(36977, "Radiant Encore", Job::Bard, "encore1", 500)
    },
    PotencyRow {
        falloff: HALF_FALLOFF,
        ..buffed(36977, "Radiant Encore", Job::Bard, "encore3", 900)
    },
    PotencyRow {
        kind: DamageKind::PhysicalDot,
        ..row(7406, "Caustic Bite (tick)", Job::Bard, 20)
    },
    // ---- Auto-attacks ----
    auto(Job::Paladin, 7, "Attack", 90),
    auto(Job::Warrior, 7, "Attack", 90),
    auto(Job::DarkKnight, 7, "Attack", 90),
    auto(Job::Gunbreaker, 7, "Attack", 90),
    auto(Job::Monk, 7, "Attack", 90),
    auto(Job::Dragoon, 7, "Attack", 90),
    auto(Job::Ninja, 7, "Attack", 90),
    auto(Job::Samurai, 7, "Attack", 90),
    auto(Job::Reaper, 7, "Attack", 90),
    auto(Job::Viper, 7, "Attack", 90),
    auto(Job::Bard, 8, "Shot", 80),
    auto(Job::Machinist, 8, "Shot", 80),
    auto(Job::Dancer, 8, "Shot", 80),
];

const fn pet_band(
    action_id: u32,
    name: &'static str,
    job: Job,
    band: &'static str,
    base: u32,
) -> PotencyRow {
    PotencyRow {
        kind: DamageKind::Pet,
        ..buffed(action_id, name, job, band, base)
    }
}

/// Rows valid for one job at one patch and level.
pub fn rows_for(job: Job, patch: f64, level: u8) -> impl Iterator<Item = &'static PotencyRow> {
    POTENCIES.iter().filter(move |r| {
        r.job == job
            && patch >= r.min_patch
            && patch <= r.max_patch
            && level >= r.min_level
            && level <= r.max_level
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_and_patch_filtering() {
        let rows: Vec<_> = rows_for(Job::Dragoon, 7.05, 100).collect();
        assert!(rows.iter().all(|r| r.job == Job::Dragoon));
        // Pre-7.0 finisher rows are gone at 7.05
        assert!(!rows.iter().any(|r| r.action_id == 3554));

        let rows: Vec<_> = rows_for(Job::Dragoon, 6.5, 90).collect();
        assert!(rows.iter().any(|r| r.action_id == 3554));
    }

    #[test]
    fn buff_variants_share_action_id() {
        let holies: Vec<_> = rows_for(Job::Paladin, 7.05, 100)
            .filter(|r| r.action_id == 7384)
            .collect();
        assert_eq!(holies.len(), 3);
        assert_eq!(holies.iter().filter(|r| r.buff_id.is_none()).count(), 1);
    }
}
