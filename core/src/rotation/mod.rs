//! Potency resolution and rotation aggregation.

pub mod aggregate;
pub mod potency;

pub use aggregate::{RotationRow, aggregate};
pub use potency::{FALLOFF_TOLERANCE, assign_falloff, snap_falloff};
