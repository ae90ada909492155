//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapters for the campaign store
//! - Bestiary: Open5e client for published SRD monsters
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod bestiary;
pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
