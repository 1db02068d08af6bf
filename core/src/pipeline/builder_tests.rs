use serde_json::{Value, json};

use rota_types::{AnalysisRequest, PlayerBuild};

use crate::api::{ApiError, LogClient, queries};

use super::RotationBuilder;

/// Serves canned responses instead of the network.
struct FakeClient;

impl LogClient for FakeClient {
    async fn query(&self, document: &str, _variables: Value) -> Result<Value, ApiError> {
        if document == queries::FIGHT_INFORMATION {
            Ok(json!({ "reportData": { "report": {
                "startTime": 1_720_000_000_000_i64,
                "region": { "compactName": "NA" },
                "table": { "data": { "downtime": 5000 } },
                "potionTable": null,
                "fights": [{
                    "encounterID": 1001,
                    "kill": true,
                    "startTime": 1000,
                    "endTime": 301000,
                    "hasEcho": false
                }]
            }}}))
        } else if document == queries::DAMAGE_EVENTS {
            let mut events = Vec::new();
            for ts in [2000, 4500, 7000] {
                events.push(hard_slash(ts, None));
            }
            events.push(hard_slash(9500, Some("1000786.")));
            Ok(json!({ "reportData": { "report": {
                "events": { "data": events, "nextPageTimestamp": null }
            }}}))
        } else {
            Err(ApiError::GraphQl(format!("unexpected query: {document}")))
        }
    }
}

fn hard_slash(ts: i64, buffs: Option<&str>) -> Value {
    let mut event = json!({
        "type": "calculateddamage",
        "timestamp": ts,
        "sourceID": 5,
        "targetID": 21,
        "ability": { "name": "Hard Slash", "guid": 3617, "type": 128 },
        "amount": 15000,
        "hitType": 1,
        "multiplier": 1.0
    });
    if let Some(b) = buffs {
        event["buffs"] = json!(b);
    }
    event
}

fn request() -> AnalysisRequest {
    AnalysisRequest {
        report_id: "testreport".to_string(),
        fight_id: 3,
        phase: 0,
        encounter_id: None,
        player_id: 5,
        pet_ids: vec![],
        job: "DarkKnight".to_string(),
        excluded_enemy_ids: vec![],
        build: PlayerBuild {
            critical_hit: 2560,
            direct_hit: 1836,
            determination: 2000,
            level: 100,
        },
    }
}

#[tokio::test]
async fn unbuffed_casts_collapse_and_a_buff_splits() {
    let builder = RotationBuilder::new(FakeClient);
    let rotation = builder.build(&request()).await.unwrap();

    // Three identical casts make one row; the buffed cast makes another.
    assert_eq!(rotation.rows.len(), 2);
    let unbuffed = rotation
        .rows
        .iter()
        .find(|r| r.buffs.is_empty())
        .expect("unbuffed row");
    assert_eq!(unbuffed.n, 3);
    assert_eq!(unbuffed.potency, 300.0);

    let buffed = rotation
        .rows
        .iter()
        .find(|r| !r.buffs.is_empty())
        .expect("buffed row");
    assert_eq!(buffed.n, 1);
    assert_eq!(buffed.buffs, vec!["1000786".to_string()]);
}

#[tokio::test]
async fn every_row_has_a_unit_probability_vector() {
    let builder = RotationBuilder::new(FakeClient);
    let rotation = builder.build(&request()).await.unwrap();
    for row in &rotation.rows {
        assert!((row.probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn context_reflects_the_metadata_query() {
    let builder = RotationBuilder::new(FakeClient);
    let rotation = builder.build(&request()).await.unwrap();
    let ctx = &rotation.context;
    assert_eq!(ctx.encounter_id, 1001);
    assert_eq!(ctx.downtime, 5000);
    assert_eq!(ctx.patch, 7.0);
    assert!(ctx.echo.is_none());
}

#[tokio::test]
async fn rebuilding_gives_identical_rows() {
    let builder = RotationBuilder::new(FakeClient);
    let first = builder.build(&request()).await.unwrap();
    let second = builder.build(&request()).await.unwrap();
    assert_eq!(first.rows, second.rows);
}
