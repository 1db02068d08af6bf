//! GraphQL access to the log-hosting service.

pub mod client;
pub mod error;
pub mod fetch;
pub mod queries;
pub mod response;

pub use client::{GqlClient, LogClient};
pub use error::ApiError;
