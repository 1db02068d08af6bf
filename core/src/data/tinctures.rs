//! Tincture (potion) strengths and stat matching
//!
//! Medication shows up in the log as a single buff id regardless of grade, so
//! strength is recovered from the applying item's name. A potion boosting the
//! wrong stat for the job contributes nothing.

use phf::phf_map;

use super::job::Job;

/// Main-stat bonus by potion name. Names are normalized to
/// "Grade N <kind>" plus an " [HQ]" suffix for high-quality items.
pub static TINCTURE_STRENGTHS: phf::Map<&'static str, u32> = phf_map! {
    "Grade 3 Tincture" => 106,
    "Grade 3 Tincture [HQ]" => 133,
    "Grade 4 Tincture" => 115,
    "Grade 4 Tincture [HQ]" => 144,
    "Grade 5 Tincture" => 137,
    "Grade 5 Tincture [HQ]" => 172,
    "Grade 6 Tincture" => 151,
    "Grade 6 Tincture [HQ]" => 189,
    "Grade 7 Tincture" => 178,
    "Grade 7 Tincture [HQ]" => 223,
    "Grade 8 Tincture" => 209,
    "Grade 8 Tincture [HQ]" => 262,
    "Grade 1 Gemdraught" => 280,
    "Grade 1 Gemdraught [HQ]" => 351,
    "Grade 2 Gemdraught" => 313,
    "Grade 2 Gemdraught [HQ]" => 392,
    "Grade 3 Gemdraught" => 368,
    "Grade 3 Gemdraught [HQ]" => 461,
};

/// Strength used when the potion aura exists but cannot be parsed.
/// Matches the highest-grade HQ tincture of the supported era.
pub const DEFAULT_MEDICATION: u32 = 262;

/// Fallback for potions older than the tracked grades but of the right stat.
pub const UNTRACKED_POTION_STRENGTH: u32 = 100;

/// Resolve the stat bonus of one applying potion.
///
/// `full_name` is the raw item name, e.g.
/// "Grade 2 Gemdraught of Dexterity [HQ]". The embedded stat type must match
/// the job's tincture stat or the bonus is 0.
pub fn potion_strength(full_name: &str, job: Job) -> u32 {
    let words: Vec<&str> = full_name.split(' ').collect();
    if words.len() < 5 {
        return 0;
    }
    // "Grade N <kind> of <Stat> [HQ]?"
    let stat_type = words[4];
    if stat_type != job.tincture_stat().label() {
        return 0;
    }

    let mut normalized = words[..3].join(" ");
    if words.last() == Some(&"[HQ]") {
        normalized.push_str(" [HQ]");
    }
    TINCTURE_STRENGTHS
        .get(normalized.as_str())
        .copied()
        .unwrap_or(UNTRACKED_POTION_STRENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_stat_resolves_strength() {
        assert_eq!(
            potion_strength("Grade 2 Gemdraught of Dexterity [HQ]", Job::Ninja),
            392
        );
        assert_eq!(
            potion_strength("Grade 8 Tincture of Strength", Job::Samurai),
            209
        );
    }

    #[test]
    fn wrong_stat_contributes_zero() {
        assert_eq!(
            potion_strength("Grade 2 Gemdraught of Strength [HQ]", Job::Ninja),
            0
        );
        assert_eq!(
            potion_strength("Grade 2 Gemdraught of Mind [HQ]", Job::BlackMage),
            0
        );
    }

    #[test]
    fn untracked_grade_of_right_stat_gets_floor_value() {
        assert_eq!(
            potion_strength("Grade 1 Tincture of Strength", Job::Warrior),
            UNTRACKED_POTION_STRENGTH
        );
    }
}
