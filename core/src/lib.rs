pub mod api;
pub mod buffs;
pub mod context;
pub mod data;
pub mod events;
pub mod ground_effects;
pub mod hit_types;
pub mod jobs;
pub mod pipeline;
pub mod rotation;

// Re-exports for convenience
pub use api::{ApiError, GqlClient, LogClient};
pub use buffs::{ActiveTables, BuffWindows, Inclusivity};
pub use context::{ContextError, FightContext};
pub use data::{Job, Region};
pub use events::Action;
pub use hit_types::{HitTypeResolver, Rate};
pub use jobs::JobMechanics;
pub use pipeline::{Rotation, RotationBuilder, RotationError, build_many};
pub use rotation::{RotationRow, aggregate};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::events::Action;

    /// A bare action record for unit tests; fields beyond the essentials
    /// start at their normalized defaults.
    pub fn make_action(ability_id: u32, name: &str, buffs: &[&str]) -> Action {
        Action {
            timestamp: 0,
            elapsed_seconds: 0.0,
            source_id: 1,
            target_id: 2,
            packet_id: None,
            ability_id,
            name: name.to_string(),
            amount: 1000,
            tick: false,
            multiplier: None,
            bonus_percent: None,
            hit_type: 1,
            direct_hit: false,
            buffs: buffs.iter().map(|b| b.to_string()).collect(),
            unpaired: false,
            falloff: 1.0,
            probabilities: [1.0, 0.0, 0.0, 0.0],
            l_c: 0,
            main_stat_add: 0,
        }
    }
}
