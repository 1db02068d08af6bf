//! Static game data: jobs, patches, buffs, potencies, tinctures, encounters.

pub mod buff_tables;
pub mod encounters;
pub mod job;
pub mod patches;
pub mod potencies;
pub mod tinctures;

pub use buff_tables::{DamageBuff, GuaranteedByAction, GuaranteedByBuff, RateBuff};
pub use job::{Job, MainStat, Role, UnknownJob};
pub use patches::{Region, echo_strength, patch_for};
pub use potencies::{DamageKind, PotencyRow};
