//! Fight context resolution.

use tracing::{debug, info};

use rota_types::AnalysisRequest;

use crate::api::{LogClient, fetch, response};
use crate::data::encounters;
use crate::data::job::Job;
use crate::data::patches::{self, Region};
use crate::data::tinctures::{self, DEFAULT_MEDICATION};

use super::error::ContextError;

/// Everything later stages need to know about the analyzed fight segment.
/// Threaded explicitly through the pipeline; timestamps are absolute
/// unix-epoch milliseconds.
#[derive(Debug, Clone)]
pub struct FightContext {
    pub report_id: String,
    pub fight_id: u32,
    pub phase: u8,
    pub player_id: u32,
    pub pet_ids: Vec<u32>,
    pub job: Job,
    pub level: u8,
    pub encounter_id: u32,
    pub kill: Option<bool>,
    pub difficulty: Option<u32>,
    pub region: Region,
    pub patch: f64,
    pub report_start: i64,
    pub fight_start: i64,
    pub fight_end: i64,
    /// Analyzed window; equals the fight bounds for phase 0.
    pub window_start: i64,
    pub window_end: i64,
    pub downtime: i64,
    pub has_echo: bool,
    /// Echo multiplier and buff tag, when the fight has the echo and falls
    /// inside a known echo window.
    pub echo: Option<(f64, &'static str)>,
    /// Main-stat bonus of the strongest matching potion used in the fight.
    pub medication: u32,
    pub excluded_targets: Vec<u32>,
}

impl FightContext {
    /// Validate the request and resolve the context with one metadata query
    /// (plus one table query for phased downtime).
    pub async fn load<C: LogClient>(
        client: &C,
        request: &AnalysisRequest,
    ) -> Result<Self, ContextError> {
        let job: Job = request.job.parse()?;
        validate_phase(request)?;

        let report = fetch::fight_information(client, &request.report_id, request.fight_id).await?;
        let fight = report
            .fights
            .first()
            .ok_or_else(|| ContextError::FightNotFound {
                report: request.report_id.clone(),
                fight_id: request.fight_id,
            })?;

        let report_start = report.start_time;
        let fight_start = report_start + fight.start_time;
        let fight_end = report_start + fight.end_time;
        let (window_start, window_end) = phase_window(request.phase, fight, report_start)?;

        let downtime = if request.phase > 0 {
            fetch::phase_downtime(
                client,
                &request.report_id,
                request.fight_id,
                window_start - report_start,
                window_end - report_start,
            )
            .await?
        } else {
            response::parse_damage_table(&report.table)
                .map(|t| t.downtime)
                .unwrap_or(0)
        };

        let region = report
            .region
            .as_ref()
            .map(|r| Region::from_compact_name(&r.compact_name))
            .unwrap_or_default();
        let patch = patches::patch_for(region, fight_start);
        let echo = if fight.has_echo {
            patches::echo_strength(fight_start)
        } else {
            None
        };

        let medication = medication_strength(&report.potion_table, job);

        let mut excluded_targets = request.excluded_enemy_ids.clone();
        excluded_targets.extend(encounters::default_excluded_enemies(fight.encounter_id));

        info!(
            report = %request.report_id,
            fight = request.fight_id,
            encounter = fight.encounter_id,
            patch,
            "fight context resolved"
        );

        Ok(Self {
            report_id: request.report_id.clone(),
            fight_id: request.fight_id,
            phase: request.phase,
            player_id: request.player_id,
            pet_ids: request.pet_ids.clone(),
            job,
            level: request.build.level,
            encounter_id: fight.encounter_id,
            kill: fight.kill,
            difficulty: fight.difficulty,
            region,
            patch,
            report_start,
            fight_start,
            fight_end,
            window_start,
            window_end,
            downtime,
            has_echo: fight.has_echo,
            echo,
            medication,
            excluded_targets,
        })
    }

    /// The analyzed window in report-relative milliseconds, as event queries
    /// expect.
    pub fn relative_window(&self) -> (i64, i64) {
        (
            self.window_start - self.report_start,
            self.window_end - self.report_start,
        )
    }
}

/// Phase requests are checked against the static phase table before any
/// network traffic.
fn validate_phase(request: &AnalysisRequest) -> Result<(), ContextError> {
    if request.phase == 0 {
        return Ok(());
    }
    let encounter_id = request
        .encounter_id
        .ok_or(ContextError::PhaseWithoutEncounter {
            phase: request.phase,
        })?;
    match encounters::phase_count(encounter_id) {
        Some(count) if request.phase <= count => Ok(()),
        _ => Err(ContextError::UnsupportedPhase {
            encounter_id,
            phase: request.phase,
        }),
    }
}

/// Resolve the analyzed window. For phase `p`, the start is the transition
/// with that phase id and the end is the next transition's start; the last
/// phase runs to the end of the fight.
fn phase_window(
    phase: u8,
    fight: &response::FightFields,
    report_start: i64,
) -> Result<(i64, i64), ContextError> {
    let fight_start = report_start + fight.start_time;
    let fight_end = report_start + fight.end_time;
    if phase == 0 {
        return Ok((fight_start, fight_end));
    }
    let transitions = fight
        .phase_transitions
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(ContextError::MissingTransitions { phase })?;
    let idx = transitions
        .iter()
        .position(|t| t.id == phase as u32)
        .ok_or(ContextError::MissingTransitions { phase })?;
    let start = report_start + transitions[idx].start_time;
    let end = transitions
        .get(idx + 1)
        .map(|t| report_start + t.start_time)
        .unwrap_or(fight_end);
    debug!(phase, start, end, "phase window");
    Ok((start, end))
}

/// Parse the potion table: strongest matching potion wins, wrong-stat
/// potions contribute nothing, and an unparseable aura falls back to the
/// default rather than failing.
fn medication_strength(potion_table: &serde_json::Value, job: Job) -> u32 {
    let Ok(table) = response::parse_aura_table(potion_table) else {
        return DEFAULT_MEDICATION;
    };
    table
        .auras
        .iter()
        .flat_map(|a| a.applied_by_abilities.iter())
        .map(|applied| tinctures::potion_strength(&applied.name, job))
        .max()
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_MEDICATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_types::PlayerBuild;
    use serde_json::json;

    fn request(phase: u8, encounter_id: Option<u32>) -> AnalysisRequest {
        AnalysisRequest {
            report_id: "abc123".to_string(),
            fight_id: 4,
            phase,
            encounter_id,
            player_id: 5,
            pet_ids: vec![],
            job: "DarkKnight".to_string(),
            excluded_enemy_ids: vec![],
            build: PlayerBuild::default(),
        }
    }

    #[test]
    fn phase_zero_needs_no_validation() {
        assert!(validate_phase(&request(0, None)).is_ok());
    }

    #[test]
    fn unsupported_phase_is_rejected_before_network() {
        let err = validate_phase(&request(7, Some(88))).unwrap_err();
        assert!(matches!(
            err,
            ContextError::UnsupportedPhase {
                encounter_id: 88,
                phase: 7
            }
        ));
        assert!(validate_phase(&request(6, Some(88))).is_ok());

        let err = validate_phase(&request(1, None)).unwrap_err();
        assert!(matches!(err, ContextError::PhaseWithoutEncounter { .. }));
    }

    #[test]
    fn phase_window_uses_next_transition_or_fight_end() {
        let fight: response::FightFields = serde_json::from_value(json!({
            "encounterID": 88,
            "startTime": 1000,
            "endTime": 600000,
            "phaseTransitions": [
                { "id": 1, "startTime": 1000 },
                { "id": 2, "startTime": 200000 },
                { "id": 3, "startTime": 400000 }
            ]
        }))
        .unwrap();
        assert_eq!(phase_window(2, &fight, 0).unwrap(), (200000, 400000));
        // Last phase runs to fight end
        assert_eq!(phase_window(3, &fight, 0).unwrap(), (400000, 600000));
    }

    #[test]
    fn wrong_stat_potion_falls_back_to_default() {
        let table = json!({ "data": { "auras": [{
            "guid": 1000049,
            "bands": [],
            "appliedByAbilities": [{ "name": "Grade 2 Gemdraught of Mind [HQ]" }]
        }]}});
        assert_eq!(
            medication_strength(&table, Job::DarkKnight),
            DEFAULT_MEDICATION
        );

        let table = json!({ "data": { "auras": [{
            "guid": 1000049,
            "bands": [],
            "appliedByAbilities": [
                { "name": "Grade 1 Gemdraught of Strength" },
                { "name": "Grade 2 Gemdraught of Strength [HQ]" }
            ]
        }]}});
        assert_eq!(medication_strength(&table, Job::DarkKnight), 392);
    }
}
