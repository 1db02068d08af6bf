//! Typed views over the service's GraphQL payloads.
//!
//! The service returns `table` as an opaque JSON scalar, so the envelope
//! keeps it as `serde_json::Value` and the pieces we consume are deserialized
//! on demand.

use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    pub report_data: ReportData,
}

#[derive(Debug, Deserialize)]
pub struct ReportData {
    pub report: Report,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub region: Option<RegionName>,
    #[serde(default)]
    pub table: Value,
    #[serde(default)]
    pub potion_table: Value,
    #[serde(default)]
    pub fights: Vec<FightFields>,
    #[serde(default)]
    pub events: Option<EventsPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionName {
    pub compact_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FightFields {
    #[serde(rename = "encounterID")]
    pub encounter_id: u32,
    #[serde(default)]
    pub kill: Option<bool>,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub difficulty: Option<u32>,
    #[serde(default)]
    pub has_echo: bool,
    #[serde(default)]
    pub phase_transitions: Option<Vec<PhaseTransition>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTransition {
    pub id: u32,
    pub start_time: i64,
}

/// One page of an events query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub next_page_timestamp: Option<i64>,
}

/// The `data` wrapper every `table` scalar carries.
#[derive(Debug, Deserialize)]
struct TableEnvelope<T> {
    data: T,
}

/// Damage-done table; only downtime is consumed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageTable {
    #[serde(default)]
    pub downtime: i64,
}

/// Buff table: aura uptime bands plus the abilities that applied them.
#[derive(Debug, Default, Deserialize)]
pub struct AuraTable {
    #[serde(default)]
    pub auras: Vec<Aura>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aura {
    pub guid: u64,
    #[serde(default)]
    pub bands: Vec<Band>,
    #[serde(default)]
    pub applied_by_abilities: Vec<AppliedBy>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub start_time: i64,
    pub end_time: i64,
}

#[derive(Debug, Deserialize)]
pub struct AppliedBy {
    pub name: String,
}

/// Decode a full report envelope from a query's `data` value.
pub fn parse_report(data: Value) -> Result<Report, ApiError> {
    let envelope: ReportEnvelope = serde_json::from_value(data)?;
    Ok(envelope.report_data.report)
}

/// Decode a `table` scalar's damage-done payload. An absent or empty table
/// decodes to zero downtime.
pub fn parse_damage_table(table: &Value) -> Result<DamageTable, ApiError> {
    if table.is_null() {
        return Ok(DamageTable::default());
    }
    let envelope: TableEnvelope<DamageTable> = serde_json::from_value(table.clone())?;
    Ok(envelope.data)
}

/// Decode a `table` scalar's aura payload. Absent tables decode to no auras.
pub fn parse_aura_table(table: &Value) -> Result<AuraTable, ApiError> {
    if table.is_null() {
        return Ok(AuraTable::default());
    }
    let envelope: TableEnvelope<AuraTable> = serde_json::from_value(table.clone())?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_report_with_fights() {
        let data = json!({
            "reportData": { "report": {
                "startTime": 1720000000000_i64,
                "region": { "compactName": "NA" },
                "fights": [{
                    "encounterID": 88,
                    "kill": true,
                    "startTime": 1000,
                    "endTime": 500000,
                    "hasEcho": false,
                    "phaseTransitions": [{ "id": 1, "startTime": 1000 }]
                }]
            }}
        });
        let report = parse_report(data).unwrap();
        assert_eq!(report.fights.len(), 1);
        assert_eq!(report.fights[0].encounter_id, 88);
        assert_eq!(
            report.region.as_ref().map(|r| r.compact_name.as_str()),
            Some("NA")
        );
    }

    #[test]
    fn aura_table_tolerates_null() {
        let auras = parse_aura_table(&Value::Null).unwrap();
        assert!(auras.auras.is_empty());

        let table = json!({ "data": { "auras": [{
            "guid": 1000049,
            "bands": [{ "startTime": 100, "endTime": 30100 }],
            "appliedByAbilities": [{ "name": "Grade 2 Gemdraught of Dexterity [HQ]" }]
        }]}});
        let auras = parse_aura_table(&table).unwrap();
        assert_eq!(auras.auras[0].bands[0].end_time, 30100);
    }
}
