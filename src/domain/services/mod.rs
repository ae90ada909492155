//! Domain services - Pure rules over domain entities

pub mod catalog;
pub mod visibility;

pub use catalog::{
    apply_filter, era_timeline, rule_categories, Catalog, EraSummary, LocationFilter, LoreFilter,
    MonsterFilter, NoteFilter, RuleFilter,
};
pub use visibility::{AccessDenied, ViewerRole, WorldAccess};
