//! The Lattice CLI client library.
//!
//! This crate provides the core functionality for the Lattice CLI client:
//! the authentication session manager (device-code login, credential
//! persistence, automatic token refresh), the authenticated API client, and
//! command execution.
//!
//! # Modules
//!
//! - `actions`: Core logic behind each CLI command
//! - `client`: Authenticated API client for the platform and drive services
//! - `commands`: CLI command parsing via clap
//! - `configuration`: Configuration management
//! - `credentials`: Durable credential persistence
//! - `device_flow`: Device authorization login flow
//! - `format`: Output formatting (JSON, CSV)
//! - `model`: Data models for Lattice entities
//! - `session`: Session cache and token refresh engine

pub mod actions;
pub mod banner;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod credentials;
pub mod device_flow;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod model;
pub mod session;
