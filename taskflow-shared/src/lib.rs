//! # TaskFlow Shared Library
//!
//! This crate contains the domain models, authorization logic, and aggregation
//! views shared by the TaskFlow API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Identity resolution, tokens, and the permission evaluator
//! - `reports`: Read-only dashboard, weekly, and performance aggregations
//! - `db`: Connection pool, migrations, and bootstrap
//! - `error`: Domain error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;

/// Current version of the TaskFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
