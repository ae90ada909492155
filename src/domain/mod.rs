//! Domain layer - Core campaign model with no I/O
//!
//! This layer contains:
//! - Entities: World, Location, LoreEntry, RuleEntry, Monster, DmNote
//! - Value Objects: ids, viewer identity, map positions
//! - Domain Services: the world visibility gate and catalogue filters

pub mod entities;
pub mod services;
pub mod value_objects;
