//! Typed fetch helpers built on [`LogClient`].
//!
//! Event queries page via `nextPageTimestamp`; pages are pulled sequentially
//! because later stages need the complete event set.

use serde_json::{Value, json};
use tracing::debug;

use super::client::LogClient;
use super::error::ApiError;
use super::queries;
use super::response::{self, EventsPage, Report};

/// Fetch report metadata, fight fields, and the damage-done and potion
/// tables for one fight.
pub async fn fight_information<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
) -> Result<Report, ApiError> {
    let data = client
        .query(
            queries::FIGHT_INFORMATION,
            json!({ "code": code, "id": [fight_id] }),
        )
        .await?;
    response::parse_report(data)
}

/// Downtime within an explicit time window, for phased analysis.
pub async fn phase_downtime<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
    start: i64,
    end: i64,
) -> Result<i64, ApiError> {
    let data = client
        .query(
            queries::PHASE_DAMAGE_TABLE,
            json!({ "code": code, "id": [fight_id], "startTime": start, "endTime": end }),
        )
        .await?;
    let report = response::parse_report(data)?;
    Ok(response::parse_damage_table(&report.table)?.downtime)
}

fn events_page(report: Report) -> Result<EventsPage, ApiError> {
    report.events.ok_or(ApiError::MissingField("events"))
}

/// All damage events for one source actor over `[start, end]`.
pub async fn damage_events<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
    source_id: u32,
    start: i64,
    end: i64,
) -> Result<Vec<Value>, ApiError> {
    let mut all = Vec::new();
    let mut cursor = start;
    loop {
        let data = client
            .query(
                queries::DAMAGE_EVENTS,
                json!({
                    "code": code,
                    "id": [fight_id],
                    "sourceID": source_id,
                    "startTime": cursor,
                    "endTime": end,
                }),
            )
            .await?;
        let page = events_page(response::parse_report(data)?)?;
        debug!(source_id, events = page.data.len(), "damage events page");
        all.extend(page.data);
        match page.next_page_timestamp {
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }
    Ok(all)
}

/// Uptime bands for one buff on one target, shifted to absolute time.
/// A buff that never occurred yields no bands.
pub async fn buff_bands<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
    target_id: u32,
    ability_id: u64,
    start: i64,
    end: i64,
    report_start: i64,
) -> Result<Vec<(i64, i64)>, ApiError> {
    let data = client
        .query(
            queries::BUFF_TABLE,
            json!({
                "code": code,
                "id": [fight_id],
                "targetID": target_id,
                "abilityID": ability_id,
                "startTime": start,
                "endTime": end,
            }),
        )
        .await?;
    let report = response::parse_report(data)?;
    let table = response::parse_aura_table(&report.table)?;
    Ok(table
        .auras
        .iter()
        .filter(|a| a.guid == ability_id)
        .flat_map(|a| a.bands.iter())
        .map(|b| (b.start_time + report_start, b.end_time + report_start))
        .collect())
}

/// Raw apply/remove events for one buff on one target.
pub async fn buff_events<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
    target_id: u32,
    ability_id: u64,
    start: i64,
    end: i64,
) -> Result<Vec<Value>, ApiError> {
    let mut all = Vec::new();
    let mut cursor = start;
    loop {
        let data = client
            .query(
                queries::BUFF_EVENTS,
                json!({
                    "code": code,
                    "id": [fight_id],
                    "targetID": target_id,
                    "abilityID": ability_id,
                    "startTime": cursor,
                    "endTime": end,
                }),
            )
            .await?;
        let page = events_page(response::parse_report(data)?)?;
        all.extend(page.data);
        match page.next_page_timestamp {
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }
    Ok(all)
}

/// Cast events for one source, optionally narrowed to one ability id.
pub async fn cast_events<C: LogClient>(
    client: &C,
    code: &str,
    fight_id: u32,
    source_id: u32,
    ability_id: Option<u64>,
    start: i64,
    end: i64,
) -> Result<Vec<Value>, ApiError> {
    let mut all = Vec::new();
    let mut cursor = start;
    loop {
        let data = client
            .query(
                queries::CAST_EVENTS,
                json!({
                    "code": code,
                    "id": [fight_id],
                    "sourceID": source_id,
                    "abilityID": ability_id,
                    "startTime": cursor,
                    "endTime": end,
                }),
            )
            .await?;
        let page = events_page(response::parse_report(data)?)?;
        all.extend(page.data);
        match page.next_page_timestamp {
            Some(next) if next > cursor => cursor = next,
            _ => break,
        }
    }
    Ok(all)
}
