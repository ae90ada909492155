//! Monster entity - homebrew and SRD stat blocks

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_name, ContentKind, WorldContent};
use crate::domain::value_objects::{MonsterId, WorldId};

/// A named feature of a stat block, e.g. "Multiattack"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedText {
    pub name: String,
    pub desc: String,
}

impl NamedText {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

const MIN_ABILITY_SCORE: i32 = 1;
const MAX_ABILITY_SCORE: i32 = 30;

impl AbilityScores {
    fn named(&self) -> [(&'static str, i32); 6] {
        [
            ("Strength", self.strength),
            ("Dexterity", self.dexterity),
            ("Constitution", self.constitution),
            ("Intelligence", self.intelligence),
            ("Wisdom", self.wisdom),
            ("Charisma", self.charisma),
        ]
    }

    /// Every score must lie within the printed 1..=30 range
    pub fn validate(&self) -> Result<(), String> {
        for (ability, score) in self.named() {
            if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
                return Err(format!(
                    "{ability} must be between {MIN_ABILITY_SCORE} and {MAX_ABILITY_SCORE}, got {score}"
                ));
            }
        }
        Ok(())
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Everything needed to run a creature at the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub slug: String,
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub challenge_rating: String,
    pub armor_class: i32,
    pub hit_points: i32,
    pub alignment: String,
    #[serde(flatten)]
    pub abilities: AbilityScores,
    /// Movement modes, e.g. `{"walk": 30, "fly": 60}`
    pub speed: BTreeMap<String, serde_json::Value>,
    pub senses: String,
    pub languages: String,
    pub special_abilities: Vec<NamedText>,
    pub actions: Vec<NamedText>,
    pub legendary_actions: Vec<NamedText>,
}

impl StatBlock {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut speed = BTreeMap::new();
        speed.insert("walk".to_string(), serde_json::json!(30));
        Self {
            slug: slugify(&name),
            name,
            size: "Medium".to_string(),
            creature_type: "Humanoid".to_string(),
            challenge_rating: "1".to_string(),
            armor_class: 10,
            hit_points: 10,
            alignment: "Unaligned".to_string(),
            abilities: AbilityScores::default(),
            speed,
            senses: String::new(),
            languages: "Common".to_string(),
            special_abilities: Vec::new(),
            actions: Vec::new(),
            legendary_actions: Vec::new(),
        }
    }

    /// Fill in the slug from the name when it was left blank
    pub fn normalized(mut self) -> Self {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.name);
        }
        self
    }
}

/// Lowercase, hyphen-separated identifier derived from a display name
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub world_id: WorldId,
    #[serde(flatten)]
    pub stats: StatBlock,
    pub is_homebrew: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Monster {
    pub fn new(world_id: WorldId, stats: StatBlock) -> Self {
        Self {
            id: MonsterId::new(),
            world_id,
            stats: stats.normalized(),
            is_homebrew: true,
            is_public: false,
            created_at: Utc::now(),
        }
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

impl WorldContent for Monster {
    type Id = MonsterId;

    const KIND: ContentKind = ContentKind::Monsters;

    fn id(&self) -> MonsterId {
        self.id
    }

    fn world_id(&self) -> Option<WorldId> {
        Some(self.world_id)
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
    }

    fn bind(&mut self, id: MonsterId, world_id: WorldId) {
        self.id = id;
        self.world_id = world_id;
    }

    fn validate(&self) -> Result<(), String> {
        validate_name("Monster name", &self.stats.name)?;
        if self.stats.hit_points < 0 {
            return Err("Hit points cannot be negative".to_string());
        }
        if self.stats.armor_class < 0 {
            return Err("Armor class cannot be negative".to_string());
        }
        self.stats.abilities.validate()
    }
}
