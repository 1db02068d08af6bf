//! Hit-type probabilities and per-action resolution.

pub mod rate;
pub mod resolver;

pub use rate::Rate;
pub use resolver::{HitTypeResolver, MEDICATION_ID, canonical_name};
