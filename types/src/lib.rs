//! Shared configuration types for ROTA
//!
//! This crate contains serializable types that describe an analysis request
//! and the player build it runs against. They are shared between rota-core
//! and the command-line frontend.

use serde::{Deserialize, Serialize};

/// Stats of the analyzed player, as entered from a gear set.
///
/// Only the stats that affect hit-type math are carried here; weapon damage
/// and main stat belong to the external statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBuild {
    /// Critical hit stat value
    pub critical_hit: u32,
    /// Direct hit rate stat value
    pub direct_hit: u32,
    /// Determination stat value
    pub determination: u32,
    /// Player level (90 or 100)
    pub level: u8,
}

impl Default for PlayerBuild {
    fn default() -> Self {
        Self {
            critical_hit: 420,
            direct_hit: 420,
            determination: 440,
            level: 100,
        }
    }
}

/// One rotation-build request: which fight segment and which actor to analyze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Report code from the log-hosting service (e.g. "gbkzXDBTFAQqjxpL")
    pub report_id: String,
    /// Fight ID within the report
    pub fight_id: u32,
    /// Phase to analyze; 0 analyzes the whole fight
    #[serde(default)]
    pub phase: u8,
    /// Encounter ID, when the caller already knows it. Required for phased
    /// analysis so the phase can be validated before any network traffic.
    #[serde(default)]
    pub encounter_id: Option<u32>,
    /// Actor ID of the analyzed player
    pub player_id: u32,
    /// Actor IDs of the player's pets, if any
    #[serde(default)]
    pub pet_ids: Vec<u32>,
    /// Job name in PascalCase (e.g. "DarkKnight")
    pub job: String,
    /// Enemy actor IDs excluded from the rotation (encounter gimmicks)
    #[serde(default)]
    pub excluded_enemy_ids: Vec<u32>,
    /// Player build used for hit-type math
    pub build: PlayerBuild,
}

/// Persisted CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer token for the log-hosting API
    pub api_token: String,
    /// Override for the GraphQL endpoint; empty uses the public endpoint
    #[serde(default)]
    pub api_url: String,
}
