//! Domain entities - Campaign records with identity
//!
//! Every content record belongs to exactly one [`World`], except baseline
//! rules which are shared by all worlds.

mod dm_note;
mod location;
mod lore_entry;
mod monster;
mod rule_entry;
mod world;

pub use dm_note::{DmNote, NoteCategory};
pub use location::{Location, DEFAULT_MARKER_SIZE, MAX_MARKER_SIZE};
pub use lore_entry::{LoreEntry, DEFAULT_LORE_CATEGORY, DEFAULT_LORE_YEAR};
pub use monster::{slugify, AbilityScores, Monster, NamedText, StatBlock};
pub use rule_entry::{baseline_rules, RuleEntry};
pub use world::{World, DEFAULT_MAP_URL};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::WorldId;

pub(crate) const MAX_NAME_LENGTH: usize = 255;
pub(crate) const MAX_TEXT_LENGTH: usize = 10_000;

/// The five world-scoped content categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Locations,
    Lore,
    Rules,
    Monsters,
    Notes,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Locations,
        ContentKind::Lore,
        ContentKind::Rules,
        ContentKind::Monsters,
        ContentKind::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Locations => "locations",
            ContentKind::Lore => "lore",
            ContentKind::Rules => "rules",
            ContentKind::Monsters => "monsters",
            ContentKind::Notes => "notes",
        }
    }

    /// Name of the backing table in the campaign store
    pub fn table(&self) -> &'static str {
        match self {
            ContentKind::Locations => "locations",
            ContentKind::Lore => "lore_entries",
            ContentKind::Rules => "rules",
            ContentKind::Monsters => "homebrew_monsters",
            ContentKind::Notes => "dm_notes",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that lives inside a world and carries a public/private flag.
pub trait WorldContent: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Default + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    const KIND: ContentKind;

    fn id(&self) -> Self::Id;

    /// Owning world. `None` only for shared baseline rows.
    fn world_id(&self) -> Option<WorldId>;

    fn is_public(&self) -> bool;

    fn set_public(&mut self, is_public: bool);

    /// Stamp the record with its identity and owning world.
    fn bind(&mut self, id: Self::Id, world_id: WorldId);

    /// Field-level validation run before any write
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub(crate) fn validate_name(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    Ok(())
}

pub(crate) fn validate_text(field: &str, value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(format!(
            "{} cannot exceed {} characters",
            field, MAX_TEXT_LENGTH
        ));
    }
    Ok(())
}
