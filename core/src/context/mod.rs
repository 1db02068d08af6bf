//! Fight context: request validation and fight metadata resolution.

mod error;
mod fight;

pub use error::ContextError;
pub use fight::FightContext;
