//! Static buff fact tables
//!
//! Each row carries a patch validity window so table contents can change
//! across balance patches; lookups filter rows by the fight's patch number
//! with `valid_start <= patch < valid_end`, so a row retired in a patch is
//! gone from that patch on. Buff ids are the log service's ability ids as
//! decimal strings; synthetic ids (e.g. "card6", "Darkside", "echo15") are
//! introduced by the pipeline where the service reports no usable id.

/// Guaranteed hit-type codes, matching the log service's convention.
pub mod hit_type {
    pub const NORMAL: u8 = 0;
    pub const CRITICAL: u8 = 1;
    pub const DIRECT: u8 = 2;
    pub const CRITICAL_DIRECT: u8 = 3;
}

/// Validity window spanning every supported patch.
pub const ALWAYS: (f64, f64) = (0.0, f64::INFINITY);

/// A flat damage multiplier granted by a buff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageBuff {
    pub id: &'static str,
    pub name: &'static str,
    pub strength: f64,
    pub valid_start: f64,
    pub valid_end: f64,
}

/// A critical or direct-hit rate bonus granted by a buff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBuff {
    pub id: &'static str,
    pub name: &'static str,
    pub rate: f64,
    pub valid_start: f64,
    pub valid_end: f64,
}

/// An ability that always lands with a forced hit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuaranteedByAction {
    pub action_id: u32,
    pub hit_type: u8,
    pub valid_start: f64,
    pub valid_end: f64,
}

/// A buff that forces a hit type, but only for the listed ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuaranteedByBuff {
    pub buff_id: &'static str,
    pub affected_action_id: u32,
    pub hit_type: u8,
    pub valid_start: f64,
    pub valid_end: f64,
}

const fn dmg(id: &'static str, name: &'static str, strength: f64) -> DamageBuff {
    DamageBuff {
        id,
        name,
        strength,
        valid_start: ALWAYS.0,
        valid_end: ALWAYS.1,
    }
}

const fn dmg_until(id: &'static str, name: &'static str, strength: f64, end: f64) -> DamageBuff {
    DamageBuff {
        valid_end: end,
        ..dmg(id, name, strength)
    }
}

const fn dmg_from(id: &'static str, name: &'static str, strength: f64, start: f64) -> DamageBuff {
    DamageBuff {
        valid_start: start,
        ..dmg(id, name, strength)
    }
}

const fn rate(id: &'static str, name: &'static str, r: f64) -> RateBuff {
    RateBuff {
        id,
        name,
        rate: r,
        valid_start: ALWAYS.0,
        valid_end: ALWAYS.1,
    }
}

/// Party and personal damage buffs. Card entries keep their in-game names so
/// the pipeline can classify melee vs ranged cards before standardizing them
/// to `card3`/`card6`.
pub const DAMAGE_BUFFS: &[DamageBuff] = &[
    dmg("1000049", "Medicated", 1.05),
    dmg("1001822", "Technical Finish", 1.05),
    dmg("1001878", "Divination", 1.06),
    dmg("1001239", "Embolden", 1.05),
    dmg("1001185", "Brotherhood", 1.05),
    dmg("1002703", "Searing Light", 1.05),
    dmg("1002599", "Arcane Circle", 1.03),
    dmg_from("1003849", "Dokumori", 1.05, 7.0),
    dmg_from("1002912", "Starry Muse", 1.05, 7.0),
    // AST cards; strength depends on the recipient's role before 7.0, and
    // the four retired in 7.0 are bounded to the 6.x patches.
    dmg("1001882", "The Balance", 1.06),
    dmg("1001885", "The Spear", 1.06),
    dmg_until("1001884", "The Arrow", 1.06, 7.0),
    dmg_until("1001883", "The Bole", 1.06, 7.0),
    dmg_until("1001886", "The Ewer", 1.06, 7.0),
    dmg_until("1001887", "The Spire", 1.06, 7.0),
    // Standardized card ids written by the hit-type resolver
    dmg("card3", "3% Card", 1.03),
    dmg("card6", "6% Card", 1.06),
    // Radiant Finale strength is inferred, one synthetic id per tier
    dmg("RadiantFinale1", "Radiant Finale (1 coda)", 1.02),
    dmg("RadiantFinale3", "Radiant Finale (3 coda)", 1.06),
    // Job-mechanic tags written by the mechanics engine
    dmg("Darkside", "Darkside", 1.10),
    dmg("1000497", "Kassatsu", 1.30),
    // Echo tiers
    dmg("echo10", "The Echo (10%)", 1.10),
    dmg("echo15", "The Echo (15%)", 1.15),
];

/// Critical-hit rate buffs.
pub const CRITICAL_RATE_BUFFS: &[RateBuff] = &[
    rate("1000786", "Battle Litany", 0.10),
    rate("1001221", "Chain Stratagem", 0.10),
    rate("1001825", "Devilment", 0.20),
    rate("1002964", "Radiant Finale", 0.00),
];

/// Direct-hit rate buffs.
pub const DIRECT_RATE_BUFFS: &[RateBuff] = &[
    rate("1000141", "Battle Voice", 0.20),
    rate("1001825", "Devilment", 0.20),
];

const fn ga(action_id: u32, hit: u8) -> GuaranteedByAction {
    GuaranteedByAction {
        action_id,
        hit_type: hit,
        valid_start: ALWAYS.0,
        valid_end: ALWAYS.1,
    }
}

const fn gb(buff_id: &'static str, action_id: u32, hit: u8) -> GuaranteedByBuff {
    GuaranteedByBuff {
        buff_id,
        affected_action_id: action_id,
        hit_type: hit,
        valid_start: ALWAYS.0,
        valid_end: ALWAYS.1,
    }
}

/// Abilities with an unconditional forced hit type.
pub const GUARANTEED_BY_ACTION: &[GuaranteedByAction] = &[
    ga(16465, hit_type::CRITICAL_DIRECT), // Inner Chaos
    ga(16463, hit_type::CRITICAL_DIRECT), // Chaotic Cyclone
    ga(25753, hit_type::CRITICAL_DIRECT), // Primal Rend
    ga(7487, hit_type::CRITICAL),         // Midare Setsugekka
    ga(25781, hit_type::CRITICAL),        // Ogi Namikiri
];

/// Buff + ability pairs with a forced hit type. The buff must be active on
/// the action *and* the action id must match.
pub const GUARANTEED_BY_BUFF: &[GuaranteedByBuff] = &[
    gb("1001177", 3549, hit_type::CRITICAL_DIRECT), // Inner Release -> Fell Cleave
    gb("1001177", 3550, hit_type::CRITICAL_DIRECT), // Inner Release -> Decimate
    gb("1000107", 53, hit_type::CRITICAL),          // Opo-opo Form -> Bootshine
    gb("1000116", 84, hit_type::CRITICAL),          // Life Surge -> Full Thrust
    gb("1000116", 25771, hit_type::CRITICAL),       // Life Surge -> Heavens' Thrust
    gb("1000116", 36952, hit_type::CRITICAL),       // Life Surge -> Drakesbane
    gb("1000851", 16498, hit_type::CRITICAL_DIRECT), // Reassemble -> Drill
    gb("1000851", 16500, hit_type::CRITICAL_DIRECT), // Reassemble -> Air Anchor
    gb("1000851", 25788, hit_type::CRITICAL_DIRECT), // Reassemble -> Chain Saw
    gb("1000851", 36981, hit_type::CRITICAL_DIRECT), // Reassemble -> Excavator
];

/// Card names granting 6% to melee-role recipients.
pub const MELEE_CARD_NAMES: &[&str] = &["The Balance", "The Arrow", "The Spear"];
/// Card names granting 6% to ranged-role recipients.
pub const RANGED_CARD_NAMES: &[&str] = &["The Bole", "The Ewer", "The Spire"];
