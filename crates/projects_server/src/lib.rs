//! # Projects Server
//!
//! A small HTTP service keeping a list of projects in memory.
//!
//! ## Features
//!
//! - **CRUD API** - list (with title filter), create, update and delete projects
//! - **Request Logging** - one `[METHOD] /path` line per request
//! - **ID Validation** - malformed project IDs are rejected before any handler runs
//! - **Metrics** - Prometheus metrics for request counts and store size
//!
//! Nothing is persisted: the store lives and dies with the process.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start with defaults (0.0.0.0:3333)
//! cargo run --bin projects-server
//!
//! # With custom configuration
//! cargo run --bin projects-server -- --http-bind 127.0.0.1:8080 --log-level debug
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Configuration management
//! - [`logging`] - Logging setup and console output
//! - [`http_server`] - Router, handlers and server loop
//! - [`middleware`] - Request logger and ID validator
//! - [`store`] - In-memory project store
//! - [`id`] - Identifier generation and validation
//! - [`metrics`] - Prometheus metrics

pub mod config;
pub mod error;
pub mod http_server;
pub mod id;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod project;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use http_server::{create_router, AppState};
pub use metrics::METRICS;
pub use project::{Project, ProjectInput};
pub use store::{ProjectStore, StoreError};
