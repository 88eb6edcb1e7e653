//! # Taskboard API Server Library
//!
//! Users sign up, log in, and manage projects and tasks over a JSON API.
//! Tasks can be assigned to other users, who see them through the paginated
//! "my tasks" and "my projects" views.
//!
//! ## Modules
//!
//! - `app`: Application state, router and bearer layer
//! - `config`: Configuration management
//! - `error`: Error type and envelope rendering
//! - `extract`: Extractors that reject with the error envelope
//! - `response`: Success envelope
//! - `routes`: API route handlers
//! - `seed`: Development seed data
//! - `telemetry`: Tracing subscriber setup

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod seed;
pub mod telemetry;
