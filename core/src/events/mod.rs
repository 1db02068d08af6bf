//! Damage-event normalization.

pub mod action;
pub mod normalize;

pub use action::Action;
pub use normalize::{normalize_events, parse_buff_string};
