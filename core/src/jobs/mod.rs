//! Job-specific mechanics.
//!
//! Each unit is a pure transform over the action sequence; any log data it
//! needs beyond the actions themselves (buff windows, cast times) is fetched
//! by the pipeline and passed in at construction. Jobs without listed
//! mechanics are a no-op.

pub mod bard;
pub mod black_mage;
pub mod dark_knight;
pub mod dragoon;
pub mod gauge;
pub mod machinist;
pub mod monk;
pub mod ninja;
pub mod paladin;
pub mod reaper;
pub mod samurai;
pub mod viper;

pub use bard::Bard;
pub use black_mage::BlackMage;
pub use dark_knight::DarkKnight;
pub use dragoon::{Dragoon, FinisherWindow};
pub use gauge::BoundedGauge;
pub use machinist::Machinist;
pub use monk::Monk;
pub use ninja::Ninja;
pub use paladin::Paladin;
pub use reaper::Reaper;
pub use samurai::Samurai;
pub use viper::Viper;

use crate::events::Action;

/// Applies one job's mechanics to the normalized action sequence in place.
pub trait JobMechanics {
    fn apply(&self, actions: &mut Vec<Action>);
}
