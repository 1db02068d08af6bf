//! Encounter metadata used for pre-network validation
//!
//! Phase-aware analysis only makes sense for encounters whose phase layout we
//! know, so phase requests are checked against this table before any API
//! traffic. Whole-fight analysis (phase 0) is allowed for every encounter.

/// One supported multi-phase encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasedEncounter {
    pub encounter_id: u32,
    pub name: &'static str,
    pub phase_count: u8,
}

/// Encounters with selectable phases.
pub const PHASED_ENCOUNTERS: &[PhasedEncounter] = &[
    PhasedEncounter {
        encounter_id: 88,
        name: "The Omega Protocol",
        phase_count: 6,
    },
    PhasedEncounter {
        encounter_id: 1068,
        name: "Everkeep",
        phase_count: 2,
    },
    PhasedEncounter {
        encounter_id: 1079,
        name: "Futures Rewritten",
        phase_count: 5,
    },
];

/// Enemy game ids whose damage is excluded from analysis by default, keyed by
/// encounter. Covers adds that absorb padded damage without affecting the
/// boss (e.g. intermission crystals).
pub const EXCLUDED_ENEMY_GAME_IDS: &[(u32, &[u32])] = &[(1079, &[17828, 17829])];

/// Number of selectable phases for an encounter, if it is phase-aware.
pub fn phase_count(encounter_id: u32) -> Option<u8> {
    PHASED_ENCOUNTERS
        .iter()
        .find(|e| e.encounter_id == encounter_id)
        .map(|e| e.phase_count)
}

/// Default excluded enemy game ids for an encounter.
pub fn default_excluded_enemies(encounter_id: u32) -> &'static [u32] {
    EXCLUDED_ENEMY_GAME_IDS
        .iter()
        .find(|(id, _)| *id == encounter_id)
        .map(|(_, ids)| *ids)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_lookup() {
        assert_eq!(phase_count(88), Some(6));
        assert_eq!(phase_count(9999), None);
    }

    #[test]
    fn excluded_enemies_default_empty() {
        assert_eq!(default_excluded_enemies(1079), &[17828, 17829]);
        assert!(default_excluded_enemies(88).is_empty());
    }
}
