//! The rotation pipeline.
//!
//! `RotationBuilder` runs one analysis end to end: context, damage events,
//! normalization, hit types, job mechanics, ground effects, echo, and
//! aggregation, in that order. A single build is strictly sequential;
//! independent builds can run concurrently via [`build_many`].

pub mod mechanics;

#[cfg(test)]
mod builder_tests;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, instrument};

use rota_types::AnalysisRequest;

use crate::api::{ApiError, LogClient};
use crate::buffs::ActiveTables;
use crate::context::{ContextError, FightContext};
use crate::events::{Action, normalize_events};
use crate::ground_effects::estimate_multipliers;
use crate::hit_types::{HitTypeResolver, Rate};
use crate::rotation::{RotationRow, aggregate};
use crate::api::fetch;

/// Salted Earth, Wildfire, and Doton ticks report no multiplier.
const GROUND_EFFECT_IDS: &[u32] = &[749, 861, 2270];

#[derive(Debug, Error)]
pub enum RotationError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("build task did not complete")]
    TaskFailed,
}

/// A finished analysis: the resolved context and the canonical table.
#[derive(Debug, Clone)]
pub struct Rotation {
    pub context: FightContext,
    pub rows: Vec<RotationRow>,
}

/// Runs analyses against one API client.
#[derive(Debug, Clone)]
pub struct RotationBuilder<C> {
    client: C,
}

impl<C: LogClient> RotationBuilder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Build the rotation for one request. Any network failure fails the
    /// whole build; there are no partial results.
    #[instrument(skip(self, request), fields(report = %request.report_id, fight = request.fight_id))]
    pub async fn build(&self, request: &AnalysisRequest) -> Result<Rotation, RotationError> {
        let ctx = FightContext::load(&self.client, request).await?;
        let (start, end) = ctx.relative_window();

        // Complete event set first: player, then each pet.
        let mut actions: Vec<Action> = Vec::new();
        let mut sources = vec![ctx.player_id];
        sources.extend(&ctx.pet_ids);
        for source in sources {
            let raw = fetch::damage_events(
                &self.client,
                &ctx.report_id,
                ctx.fight_id,
                source,
                start,
                end,
            )
            .await?;
            actions.extend(normalize_events(
                &raw,
                ctx.player_id,
                ctx.report_start,
                ctx.window_start,
            ));
        }
        actions.sort_by_key(|a| a.timestamp);

        let tables = ActiveTables::for_patch(ctx.patch);
        let rate = Rate::new(
            request.build.critical_hit,
            request.build.direct_hit,
            request.build.determination,
            request.build.level,
        );
        HitTypeResolver::new(rate, &tables, ctx.job, ctx.medication, ctx.patch)
            .resolve(&mut actions);

        if let Some(unit) =
            mechanics::prepare_mechanics(&self.client, &ctx, &tables, rate).await?
        {
            unit.apply(&mut actions);
        }
        estimate_multipliers(&mut actions, GROUND_EFFECT_IDS, &tables);

        // Pending casts have served their purpose (gauge, Darkside); only
        // landed damage aggregates.
        actions.retain(|a| !a.unpaired);
        if ctx.job.drops_auto_attacks() {
            actions.retain(|a| a.name != "Attack");
        }

        if let Some((strength, tag)) = ctx.echo {
            for action in actions.iter_mut() {
                action.multiplier = Some(action.multiplier.unwrap_or(1.0) * strength);
                action.add_buff(tag);
            }
        }

        let rows = aggregate(
            &actions,
            ctx.job,
            ctx.patch,
            ctx.level,
            &ctx.excluded_targets,
        );
        info!(rows = rows.len(), actions = actions.len(), "rotation built");
        Ok(Rotation { context: ctx, rows })
    }
}

/// Run many independent builds with bounded concurrency. Results come back
/// in request order; each slot carries its own success or failure.
pub async fn build_many<C>(
    client: Arc<C>,
    requests: Vec<AnalysisRequest>,
    max_concurrency: usize,
) -> Vec<Result<Rotation, RotationError>>
where
    C: LogClient + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut set: JoinSet<(usize, Result<Rotation, RotationError>)> = JoinSet::new();

    for (idx, request) in requests.into_iter().enumerate() {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        set.spawn(async move {
            // Never closed, so the permit always arrives.
            let _permit = semaphore.acquire_owned().await.ok();
            let builder = RotationBuilder::new(ClientRef(client));
            let result = builder.build(&request).await;
            (idx, result)
        });
    }

    let mut out: Vec<Option<Result<Rotation, RotationError>>> = Vec::new();
    out.resize_with(set.len(), || None);
    while let Some(joined) = set.join_next().await {
        if let Ok((idx, result)) = joined {
            out[idx] = Some(result);
        }
    }
    out.into_iter()
        .map(|slot| slot.unwrap_or(Err(RotationError::TaskFailed)))
        .collect()
}

/// Shares one client across spawned builds.
struct ClientRef<C>(Arc<C>);

impl<C: LogClient> LogClient for ClientRef<C> {
    async fn query(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.0.query(document, variables).await
    }
}
