//! Per-job auxiliary queries and mechanics construction.
//!
//! Job units are pure sequence transforms; everything they need from the
//! log beyond the actions themselves is fetched here and handed over as
//! plain data.

use hashbrown::HashMap;
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, LogClient, fetch};
use crate::buffs::{ActiveTables, BuffWindows, Inclusivity};
use crate::context::FightContext;
use crate::data::job::Job;
use crate::hit_types::Rate;
use crate::jobs::{
    Bard, BlackMage, DarkKnight, Dragoon, FinisherWindow, JobMechanics, Machinist, Monk, Ninja,
    Paladin, Reaper, Samurai, Viper,
};

const DIVINE_MIGHT: u64 = 1002673;
const REQUIESCAT: u64 = 1001368;
const THUNDERCLOUD: u64 = 1000164;
const OPO_OPO_FORM: u64 = 1000107;
const LEADEN_FIST: u64 = 1001861;
const MEISUI: u64 = 1002689;
const KASSATSU: u64 = 1000497;
const FANG_AND_CLAW_BARED: u64 = 1000802;
const WHEEL_IN_MOTION: u64 = 1000803;
const ENHANCED_ENPI: u64 = 1001236;
const AUTOMATON_QUEEN: u64 = 16501;

/// Build the mechanics unit for the context's job, fetching whatever buff
/// windows or cast events it needs. Jobs without mechanics yield `None`.
pub async fn prepare_mechanics<C: LogClient>(
    client: &C,
    ctx: &FightContext,
    tables: &ActiveTables,
    rate: Rate,
) -> Result<Option<Box<dyn JobMechanics + Send>>, ApiError> {
    let unit: Box<dyn JobMechanics + Send> = match ctx.job {
        Job::DarkKnight => Box::new(DarkKnight::new()),
        Job::Paladin => {
            let divine_might = player_windows(client, ctx, DIVINE_MIGHT).await?;
            let requiescat = player_windows(client, ctx, REQUIESCAT).await?;
            Box::new(Paladin::new(divine_might, requiescat))
        }
        Job::BlackMage => {
            let casts = player_casts(client, ctx, None).await?;
            let thundercloud = if ctx.patch < 7.0 {
                player_windows(client, ctx, THUNDERCLOUD).await?
            } else {
                BuffWindows::never()
            };
            Box::new(BlackMage::new(casts, thundercloud, ctx.level, ctx.patch))
        }
        Job::Monk => {
            let (opo, leaden) = if ctx.patch < 7.0 {
                (
                    player_windows(client, ctx, OPO_OPO_FORM).await?,
                    player_windows(client, ctx, LEADEN_FIST).await?,
                )
            } else {
                (BuffWindows::never(), BuffWindows::never())
            };
            Box::new(Monk::new(opo, leaden, tables.clone(), rate, ctx.patch))
        }
        Job::Ninja => {
            let meisui = player_windows(client, ctx, MEISUI).await?;
            let kassatsu = player_windows(client, ctx, KASSATSU).await?;
            Box::new(Ninja::new(meisui, kassatsu, ctx.patch))
        }
        Job::Dragoon if ctx.patch < 7.0 => {
            let fang = finisher_windows(client, ctx, FANG_AND_CLAW_BARED).await?;
            let wheel = finisher_windows(client, ctx, WHEEL_IN_MOTION).await?;
            Box::new(Dragoon::new(fang, wheel))
        }
        Job::Reaper => {
            let mut windows = HashMap::new();
            for id in Reaper::buff_ids() {
                let numeric = id.parse::<u64>().unwrap_or(0);
                windows.insert(id, player_windows(client, ctx, numeric).await?);
            }
            Box::new(Reaper::new(windows))
        }
        Job::Samurai => {
            let enhanced = player_windows(client, ctx, ENHANCED_ENPI).await?;
            Box::new(Samurai::new(enhanced))
        }
        Job::Viper => {
            let mut windows = HashMap::new();
            for id in Viper::buff_ids() {
                let numeric = id.parse::<u64>().unwrap_or(0);
                windows.insert(id, player_windows(client, ctx, numeric).await?);
            }
            Box::new(Viper::new(windows))
        }
        Job::Machinist => {
            let casts = player_casts(client, ctx, Some(AUTOMATON_QUEEN)).await?;
            let summons = casts.iter().map(|&(t, _)| t).collect();
            Box::new(Machinist::new(summons))
        }
        Job::Bard => Box::new(Bard::new()),
        _ => return Ok(None),
    };
    Ok(Some(unit))
}

/// Uptime windows of one buff on the analyzed player.
async fn player_windows<C: LogClient>(
    client: &C,
    ctx: &FightContext,
    ability_id: u64,
) -> Result<BuffWindows, ApiError> {
    let (start, end) = ctx.relative_window();
    let bands = fetch::buff_bands(
        client,
        &ctx.report_id,
        ctx.fight_id,
        ctx.player_id,
        ability_id,
        start,
        end,
        ctx.report_start,
    )
    .await?;
    Ok(BuffWindows::from_bands(bands, Inclusivity::LeftExclusive))
}

#[derive(Debug, Deserialize)]
struct RawCast {
    #[serde(rename = "type")]
    kind: String,
    timestamp: i64,
    #[serde(default)]
    ability: Option<RawCastAbility>,
}

#[derive(Debug, Deserialize)]
struct RawCastAbility {
    #[serde(default)]
    guid: u32,
}

/// The player's cast events as (elapsed seconds, ability id).
async fn player_casts<C: LogClient>(
    client: &C,
    ctx: &FightContext,
    ability_id: Option<u64>,
) -> Result<Vec<(f64, u32)>, ApiError> {
    let (start, end) = ctx.relative_window();
    let raw = fetch::cast_events(
        client,
        &ctx.report_id,
        ctx.fight_id,
        ctx.player_id,
        ability_id,
        start,
        end,
    )
    .await?;
    Ok(parse_casts(&raw, ctx.report_start, ctx.window_start))
}

fn parse_casts(raw: &[Value], report_start: i64, window_start: i64) -> Vec<(f64, u32)> {
    raw.iter()
        .filter_map(|v| serde_json::from_value::<RawCast>(v.clone()).ok())
        .filter(|c| c.kind == "cast")
        .filter_map(|c| {
            let guid = c.ability.as_ref()?.guid;
            let elapsed = (c.timestamp + report_start - window_start) as f64 / 1000.0;
            Some((elapsed, guid))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuffEvent {
    #[serde(rename = "type")]
    kind: String,
    timestamp: i64,
    #[serde(rename = "extraAbilityGameID", default)]
    extra_ability_game_id: Option<u32>,
}

/// Proc windows with the ability that applied each one, from the buff's
/// apply/remove event stream.
async fn finisher_windows<C: LogClient>(
    client: &C,
    ctx: &FightContext,
    ability_id: u64,
) -> Result<Vec<FinisherWindow>, ApiError> {
    let (start, end) = ctx.relative_window();
    let raw = fetch::buff_events(
        client,
        &ctx.report_id,
        ctx.fight_id,
        ctx.player_id,
        ability_id,
        start,
        end,
    )
    .await?;
    Ok(pair_buff_events(&raw, ctx.report_start, ctx.window_end))
}

fn pair_buff_events(raw: &[Value], report_start: i64, window_end: i64) -> Vec<FinisherWindow> {
    let mut windows = Vec::new();
    let mut open: Option<(i64, u32)> = None;
    for value in raw {
        let Ok(event) = serde_json::from_value::<RawBuffEvent>(value.clone()) else {
            continue;
        };
        let ts = event.timestamp + report_start;
        match event.kind.as_str() {
            "applybuff" | "refreshbuff" => {
                if open.is_none() || event.extra_ability_game_id.is_some() {
                    open = Some((ts, event.extra_ability_game_id.unwrap_or(0)));
                }
            }
            "removebuff" => {
                if let Some((start, applied_by)) = open.take() {
                    windows.push(FinisherWindow {
                        start,
                        end: ts,
                        applied_by,
                    });
                }
            }
            _ => {}
        }
    }
    // A buff still up when the window closes
    if let Some((start, applied_by)) = open {
        windows.push(FinisherWindow {
            start,
            end: window_end,
            applied_by,
        });
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buff_events_pair_into_windows() {
        let raw = vec![
            json!({ "type": "applybuff", "timestamp": 100, "extraAbilityGameID": 25771 }),
            json!({ "type": "removebuff", "timestamp": 900 }),
            json!({ "type": "applybuff", "timestamp": 2000, "extraAbilityGameID": 3556 }),
        ];
        let windows = pair_buff_events(&raw, 0, 5000);
        assert_eq!(
            windows,
            vec![
                FinisherWindow { start: 100, end: 900, applied_by: 25771 },
                FinisherWindow { start: 2000, end: 5000, applied_by: 3556 },
            ]
        );
    }

    #[test]
    fn casts_become_elapsed_seconds() {
        let raw = vec![
            json!({ "type": "cast", "timestamp": 12000, "ability": { "guid": 152 } }),
            json!({ "type": "begincast", "timestamp": 13000, "ability": { "guid": 152 } }),
        ];
        let casts = parse_casts(&raw, 1_000_000, 1_010_000);
        assert_eq!(casts, vec![(2.0, 152)]);
    }
}
