//! Normalizes raw damage events into [`Action`] records.
//!
//! The service omits fields that are false or empty, so every optional field
//! defaults instead of failing. Events that are neither calculated damage
//! nor periodic ticks are discarded here.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::action::Action;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    timestamp: i64,
    #[serde(rename = "sourceID", default)]
    source_id: u32,
    #[serde(rename = "targetID", default)]
    target_id: u32,
    #[serde(rename = "packetID", default)]
    packet_id: Option<i64>,
    #[serde(default)]
    ability: Option<RawAbility>,
    #[serde(default)]
    amount: i64,
    #[serde(default)]
    tick: bool,
    #[serde(default)]
    multiplier: Option<f64>,
    #[serde(default)]
    bonus_percent: Option<u32>,
    #[serde(default)]
    hit_type: u8,
    #[serde(default)]
    direct_hit: bool,
    #[serde(default)]
    buffs: Option<String>,
    #[serde(default)]
    unpaired: bool,
}

#[derive(Debug, Deserialize)]
struct RawAbility {
    #[serde(default)]
    name: String,
    #[serde(default)]
    guid: u32,
}

/// Parse the compact dot-delimited buff string (`"123.456."`) into a
/// deduplicated id list, preserving first-seen order.
pub fn parse_buff_string(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in raw.split('.').filter(|s| !s.is_empty()) {
        if !out.iter().any(|b| b == id) {
            out.push(id.to_string());
        }
    }
    out
}

/// Turn one source actor's raw events into actions.
///
/// `player_id` is the analyzed player; hits from any other source get the
/// " (Pet)" name decoration. Timestamps are shifted to absolute time and
/// elapsed seconds are measured from `fight_start` (absolute).
pub fn normalize_events(
    raw: &[Value],
    player_id: u32,
    report_start: i64,
    fight_start: i64,
) -> Vec<Action> {
    let mut actions = Vec::with_capacity(raw.len());
    for value in raw {
        let event: RawEvent = match serde_json::from_value(value.clone()) {
            Ok(e) => e,
            Err(err) => {
                warn!(%err, "skipping undecodable event");
                continue;
            }
        };
        if !(event.kind == "calculateddamage" || (event.kind == "damage" && event.tick)) {
            continue;
        }
        let Some(ability) = event.ability else {
            continue;
        };

        let mut name = ability.name;
        if event.tick {
            name.push_str(" (tick)");
        }
        if event.source_id != player_id {
            name.push_str(" (Pet)");
        }

        let timestamp = event.timestamp + report_start;
        actions.push(Action {
            timestamp,
            elapsed_seconds: (timestamp - fight_start) as f64 / 1000.0,
            source_id: event.source_id,
            target_id: event.target_id,
            packet_id: event.packet_id,
            ability_id: ability.guid,
            name,
            amount: event.amount,
            tick: event.tick,
            multiplier: event.multiplier,
            bonus_percent: event.bonus_percent,
            hit_type: event.hit_type,
            direct_hit: event.direct_hit,
            buffs: event.buffs.as_deref().map(parse_buff_string).unwrap_or_default(),
            unpaired: event.unpaired,
            falloff: 1.0,
            probabilities: [1.0, 0.0, 0.0, 0.0],
            l_c: 0,
            main_stat_add: 0,
        });
    }
    actions
}
