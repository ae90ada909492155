//! Application layer - Use cases over the campaign store
//!
//! This layer contains:
//! - Ports: repository and bestiary interfaces implemented by infrastructure
//! - DTOs: request payloads normalised into domain entities
//! - Services: world management, world-scoped content, atlas snapshots

pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
