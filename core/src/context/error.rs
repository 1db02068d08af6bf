//! Error types for fight-context loading

use thiserror::Error;

use crate::api::ApiError;
use crate::data::job::UnknownJob;

/// Errors while resolving a fight context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Rejected before any network call: the encounter's phase layout is
    /// unknown or does not have the requested phase.
    #[error("encounter {encounter_id} does not support phase {phase}")]
    UnsupportedPhase { encounter_id: u32, phase: u8 },

    /// Phased analysis was requested without an encounter id to validate
    /// against.
    #[error("phase {phase} requested but no encounter id was provided")]
    PhaseWithoutEncounter { phase: u8 },

    #[error("fight {fight_id} not found in report {report}")]
    FightNotFound { report: String, fight_id: u32 },

    #[error("fight has no phase transitions but phase {phase} was requested")]
    MissingTransitions { phase: u8 },

    #[error(transparent)]
    Job(#[from] UnknownJob),

    #[error(transparent)]
    Api(#[from] ApiError),
}
