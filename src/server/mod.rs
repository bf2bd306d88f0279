//! HTTP API for calendar generation
//!
//! Thin layer over [`Engine`](crate::engine::Engine): request parsing,
//! status codes and response shapes only.
//!
//! # Routes
//!
//! ```text
//! GET  /api                          endpoint listing
//! GET  /api/health                   liveness + uptime
//! GET  /api/countries                supported countries
//! GET  /api/holidays/{year}/{country}
//! GET  /api/model-status             roster snapshot
//! POST /api/reset-models             clear failures, rewind roster
//! POST /api/generate                 build a calendar (json | text)
//! POST /api/improve-post             rewrite one post
//! GET  /metrics                      Prometheus exposition
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use postcal::server::PostcalServer;
//!
//! let server = PostcalServer::new(engine, config.server.clone())?;
//! server.start().await?;
//! ```

pub mod api;
pub mod server;

pub use api::{create_router, ApiError, ApiResponse, ErrorResponse, GenerateRequest};
pub use server::{AppState, PostcalServer};
