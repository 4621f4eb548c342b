//! Models Module
//!
//! Request and response DTOs for the pool cache HTTP API.

pub mod requests;
pub mod responses;

pub use requests::PoolRequest;
pub use responses::{
    AttemptStatsResponse, ClearResponse, ErrorResponse, HealthResponse, PoolResponse,
};
