//! # TaskFlow API Server Library
//!
//! HTTP surface for TaskFlow: multi-tenant project and task management with
//! role-based access control.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
