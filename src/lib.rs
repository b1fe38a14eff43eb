//! hackEDU backend - authentication and per-request authorization.
//!
//! Verifies credentials and issues signed access tokens, lets
//! administrators create accounts, and resolves the caller's identity for
//! protected endpoints. Every handler failure becomes one of four
//! structured error classes, rendered uniformly as `{"message": ...}`.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, roles and password hashing
//! - **services**: Authentication, token issuing and account creation
//! - **infra**: Database, migrations and user stores
//! - **api**: HTTP handlers, identity middleware and routes
//! - **errors**: Structured error type and its HTTP rendering
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against PostgreSQL
//! cargo run -- serve
//!
//! # Start with an in-memory store and a bootstrap administrator
//! cargo run -- serve --in-memory --admin-email root@example.com --admin-password changeme1
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
