//! API Module
//!
//! Thin HTTP adapter over the pool cache engine. Handlers only forward to
//! `PoolService`; no business logic lives here.
//!
//! # Endpoints
//! - `POST /pool` - Fetch or generate a question pool
//! - `GET /attempts/:user_id/:exam_id` - Attempt stats for one user/exam pair
//! - `GET /stats` - Cache statistics
//! - `DELETE /cache` - Clear all cached pools
//! - `DELETE /cache/category/:category` - Clear pools touching one category
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
