//! Job and role identities
//!
//! The job mechanics engine dispatches on the exact `Job` variant, never on
//! partial name matching, so unknown job strings are rejected up front.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Combat role, used for tincture stat matching and card strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Healer,
    Melee,
    PhysicalRanged,
    MagicalRanged,
}

/// Main stat a tincture must boost to count for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainStat {
    Strength,
    Dexterity,
    Intelligence,
    Mind,
}

impl MainStat {
    /// The stat name as it appears in a potion's item name.
    pub const fn label(&self) -> &'static str {
        match self {
            MainStat::Strength => "Strength",
            MainStat::Dexterity => "Dexterity",
            MainStat::Intelligence => "Intelligence",
            MainStat::Mind => "Mind",
        }
    }
}

/// All analyzable jobs, in PascalCase as the log-hosting service reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    // Tanks
    Paladin,
    Warrior,
    DarkKnight,
    Gunbreaker,
    // Healers
    WhiteMage,
    Scholar,
    Astrologian,
    Sage,
    // Melee
    Monk,
    Dragoon,
    Ninja,
    Samurai,
    Reaper,
    Viper,
    // Physical ranged
    Bard,
    Machinist,
    Dancer,
    // Magical ranged
    BlackMage,
    Summoner,
    RedMage,
    Pictomancer,
}

impl Job {
    pub const fn role(&self) -> Role {
        match self {
            Job::Paladin | Job::Warrior | Job::DarkKnight | Job::Gunbreaker => Role::Tank,
            Job::WhiteMage | Job::Scholar | Job::Astrologian | Job::Sage => Role::Healer,
            Job::Monk | Job::Dragoon | Job::Ninja | Job::Samurai | Job::Reaper | Job::Viper => {
                Role::Melee
            }
            Job::Bard | Job::Machinist | Job::Dancer => Role::PhysicalRanged,
            Job::BlackMage | Job::Summoner | Job::RedMage | Job::Pictomancer => Role::MagicalRanged,
        }
    }

    /// Stat the job's tincture must boost. Ninja and Viper use Dexterity
    /// despite being melee, so they override the role default.
    pub const fn tincture_stat(&self) -> MainStat {
        match self {
            Job::Ninja | Job::Viper => MainStat::Dexterity,
            _ => match self.role() {
                Role::Tank | Role::Melee => MainStat::Strength,
                Role::Healer => MainStat::Mind,
                Role::PhysicalRanged => MainStat::Dexterity,
                Role::MagicalRanged => MainStat::Intelligence,
            },
        }
    }

    /// Jobs whose auto-attacks are dropped from the rotation (casters and
    /// healers, whose "Attack" does not scale with their main stat).
    pub const fn drops_auto_attacks(&self) -> bool {
        matches!(
            self,
            Job::BlackMage
                | Job::Summoner
                | Job::RedMage
                | Job::Pictomancer
                | Job::WhiteMage
                | Job::Scholar
                | Job::Astrologian
                | Job::Sage
        )
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Job::Paladin => "Paladin",
            Job::Warrior => "Warrior",
            Job::DarkKnight => "DarkKnight",
            Job::Gunbreaker => "Gunbreaker",
            Job::WhiteMage => "WhiteMage",
            Job::Scholar => "Scholar",
            Job::Astrologian => "Astrologian",
            Job::Sage => "Sage",
            Job::Monk => "Monk",
            Job::Dragoon => "Dragoon",
            Job::Ninja => "Ninja",
            Job::Samurai => "Samurai",
            Job::Reaper => "Reaper",
            Job::Viper => "Viper",
            Job::Bard => "Bard",
            Job::Machinist => "Machinist",
            Job::Dancer => "Dancer",
            Job::BlackMage => "BlackMage",
            Job::Summoner => "Summoner",
            Job::RedMage => "RedMage",
            Job::Pictomancer => "Pictomancer",
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for job names the engine does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job '{0}'")]
pub struct UnknownJob(pub String);

impl FromStr for Job {
    type Err = UnknownJob;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Paladin" => Job::Paladin,
            "Warrior" => Job::Warrior,
            "DarkKnight" => Job::DarkKnight,
            "Gunbreaker" => Job::Gunbreaker,
            "WhiteMage" => Job::WhiteMage,
            "Scholar" => Job::Scholar,
            "Astrologian" => Job::Astrologian,
            "Sage" => Job::Sage,
            "Monk" => Job::Monk,
            "Dragoon" => Job::Dragoon,
            "Ninja" => Job::Ninja,
            "Samurai" => Job::Samurai,
            "Reaper" => Job::Reaper,
            "Viper" => Job::Viper,
            "Bard" => Job::Bard,
            "Machinist" => Job::Machinist,
            "Dancer" => Job::Dancer,
            "BlackMage" => Job::BlackMage,
            "Summoner" => Job::Summoner,
            "RedMage" => Job::RedMage,
            "Pictomancer" => Job::Pictomancer,
            other => return Err(UnknownJob(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pascal_case_names() {
        assert_eq!("DarkKnight".parse::<Job>().unwrap(), Job::DarkKnight);
        assert_eq!("Bard".parse::<Job>().unwrap(), Job::Bard);
        assert!("darkknight".parse::<Job>().is_err());
    }

    #[test]
    fn ninja_and_viper_use_dexterity() {
        assert_eq!(Job::Ninja.tincture_stat(), MainStat::Dexterity);
        assert_eq!(Job::Viper.tincture_stat(), MainStat::Dexterity);
        assert_eq!(Job::Samurai.tincture_stat(), MainStat::Strength);
    }
}
