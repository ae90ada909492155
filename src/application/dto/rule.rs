use serde::Deserialize;

use super::{clean_list, non_blank, ContentRequest};
use crate::domain::entities::RuleEntry;
use crate::domain::value_objects::WorldId;

const DEFAULT_RULE_CATEGORY: &str = "Conditions";

/// Create or update payload. Fields left out of an update keep their stored value.
#[derive(Debug, Deserialize)]
pub struct RuleRequest {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl ContentRequest for RuleRequest {
    type Entity = RuleEntry;

    fn into_entity(self, world_id: WorldId) -> RuleEntry {
        let rule = RuleEntry::new(world_id, "", DEFAULT_RULE_CATEGORY);
        self.apply_to(rule)
    }

    fn apply_to(self, existing: RuleEntry) -> RuleEntry {
        RuleEntry {
            name: self.name,
            category: non_blank(self.category).unwrap_or(existing.category),
            description: self.description.unwrap_or(existing.description),
            details: self.details.map(clean_list).unwrap_or(existing.details),
            is_public: self.is_public.unwrap_or(existing.is_public),
            ..existing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rule_defaults_to_conditions() {
        let request: RuleRequest = serde_json::from_str(r#"{"name": "Frightened"}"#).unwrap();
        let rule = request.into_entity(WorldId::new());

        assert_eq!(rule.category, "Conditions");
        assert!(rule.details.is_empty());
        assert!(!rule.is_public);
    }

    #[test]
    fn test_update_replaces_only_given_fields() {
        let existing = RuleEntry::new(WorldId::new(), "Flanking", "Combat")
            .with_description("Allies on opposite sides.")
            .with_detail("+2 to hit")
            .public(true);
        let request: RuleRequest =
            serde_json::from_str(r#"{"name": "Flanking", "details": ["Advantage", " "]}"#).unwrap();

        let updated = request.apply_to(existing.clone());
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.world_id, existing.world_id);
        assert_eq!(updated.category, "Combat");
        assert_eq!(updated.description, "Allies on opposite sides.");
        assert_eq!(updated.details, vec!["Advantage"]);
        assert!(updated.is_public);
    }
}
