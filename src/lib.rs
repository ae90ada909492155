//! Campaign Atlas - world-scoped campaign content behind a visibility gate
//!
//! Owners curate worlds of map locations, lore, rules, monsters and GM notes;
//! everyone else sees only what the owner has made public.

pub mod application;
pub mod domain;
pub mod infrastructure;
