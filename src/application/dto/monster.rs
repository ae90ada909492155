use std::collections::BTreeMap;

use serde::Deserialize;

use super::ContentRequest;
use crate::domain::entities::{slugify, Monster, NamedText, StatBlock};
use crate::domain::value_objects::WorldId;

/// Create or update payload. Stats left out fall back to the editor
/// defaults on create and to the stored stat block on update.
#[derive(Debug, Deserialize)]
pub struct MonsterRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(rename = "type", default)]
    pub creature_type: Option<String>,
    #[serde(default)]
    pub challenge_rating: Option<String>,
    #[serde(default)]
    pub armor_class: Option<i32>,
    #[serde(default)]
    pub hit_points: Option<i32>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub strength: Option<i32>,
    #[serde(default)]
    pub dexterity: Option<i32>,
    #[serde(default)]
    pub constitution: Option<i32>,
    #[serde(default)]
    pub intelligence: Option<i32>,
    #[serde(default)]
    pub wisdom: Option<i32>,
    #[serde(default)]
    pub charisma: Option<i32>,
    #[serde(default)]
    pub speed: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub senses: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub special_abilities: Option<Vec<NamedText>>,
    #[serde(default)]
    pub actions: Option<Vec<NamedText>>,
    #[serde(default)]
    pub legendary_actions: Option<Vec<NamedText>>,
    #[serde(default)]
    pub is_homebrew: Option<bool>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl MonsterRequest {
    /// Overlay the given stats on `base`. A renamed monster without an
    /// explicit slug gets a fresh one.
    fn merge_stats(&mut self, base: StatBlock) -> StatBlock {
        let slug = match self.slug.take() {
            Some(slug) => slug,
            None if base.name == self.name => base.slug,
            None => slugify(&self.name),
        };
        let mut abilities = base.abilities;
        abilities.strength = self.strength.unwrap_or(abilities.strength);
        abilities.dexterity = self.dexterity.unwrap_or(abilities.dexterity);
        abilities.constitution = self.constitution.unwrap_or(abilities.constitution);
        abilities.intelligence = self.intelligence.unwrap_or(abilities.intelligence);
        abilities.wisdom = self.wisdom.unwrap_or(abilities.wisdom);
        abilities.charisma = self.charisma.unwrap_or(abilities.charisma);

        StatBlock {
            slug,
            name: std::mem::take(&mut self.name),
            size: self.size.take().unwrap_or(base.size),
            creature_type: self.creature_type.take().unwrap_or(base.creature_type),
            challenge_rating: self.challenge_rating.take().unwrap_or(base.challenge_rating),
            armor_class: self.armor_class.unwrap_or(base.armor_class),
            hit_points: self.hit_points.unwrap_or(base.hit_points),
            alignment: self.alignment.take().unwrap_or(base.alignment),
            abilities,
            speed: self.speed.take().unwrap_or(base.speed),
            senses: self.senses.take().unwrap_or(base.senses),
            languages: self.languages.take().unwrap_or(base.languages),
            special_abilities: self.special_abilities.take().unwrap_or(base.special_abilities),
            actions: self.actions.take().unwrap_or(base.actions),
            legendary_actions: self.legendary_actions.take().unwrap_or(base.legendary_actions),
        }
        .normalized()
    }
}

impl ContentRequest for MonsterRequest {
    type Entity = Monster;

    fn into_entity(self, world_id: WorldId) -> Monster {
        let base = StatBlock::new(self.name.as_str());
        let monster = Monster::new(world_id, base);
        self.apply_to(monster)
    }

    fn apply_to(mut self, existing: Monster) -> Monster {
        let stats = self.merge_stats(existing.stats);
        Monster {
            stats,
            is_homebrew: self.is_homebrew.unwrap_or(existing.is_homebrew),
            is_public: self.is_public.unwrap_or(existing.is_public),
            ..existing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AbilityScores;

    #[test]
    fn test_blank_monster_gets_editor_defaults() {
        let request: MonsterRequest = serde_json::from_str(r#"{"name": "Cave Troll"}"#).unwrap();
        let monster = request.into_entity(WorldId::new());

        assert_eq!(monster.stats.slug, "cave-troll");
        assert_eq!(monster.stats.abilities, AbilityScores::default());
        assert_eq!(monster.stats.armor_class, 10);
        assert_eq!(monster.stats.speed["walk"], 30);
        assert!(monster.is_homebrew);
        assert!(!monster.is_public);
    }

    #[test]
    fn test_update_keeps_stored_stats_and_flags() {
        let mut stats = StatBlock::new("Owlbear");
        stats.hit_points = 59;
        stats.abilities.strength = 20;
        stats.slug = "owlbear-custom".to_string();
        let mut existing = Monster::new(WorldId::new(), stats).public(true);
        existing.is_homebrew = false;

        let request: MonsterRequest =
            serde_json::from_str(r#"{"name": "Owlbear", "armor_class": 13}"#).unwrap();
        let updated = request.apply_to(existing.clone());

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.stats.armor_class, 13);
        assert_eq!(updated.stats.hit_points, 59);
        assert_eq!(updated.stats.abilities.strength, 20);
        assert_eq!(updated.stats.slug, "owlbear-custom");
        assert!(updated.is_public);
        assert!(!updated.is_homebrew);
    }

    #[test]
    fn test_rename_without_slug_derives_a_new_one() {
        let existing = Monster::new(WorldId::new(), StatBlock::new("Goblin"));
        let request: MonsterRequest =
            serde_json::from_str(r#"{"name": "Goblin Boss"}"#).unwrap();

        assert_eq!(request.apply_to(existing).stats.slug, "goblin-boss");
    }
}
