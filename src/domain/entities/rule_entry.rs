//! Rule entry entity - world house rules and the shared SRD baseline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_name, validate_text, ContentKind, WorldContent};
use crate::domain::value_objects::{RuleEntryId, WorldId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub id: RuleEntryId,
    /// `None` for baseline rules shared by every world
    pub world_id: Option<WorldId>,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Ordered clarifications shown under the description
    pub details: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl RuleEntry {
    pub fn new(world_id: WorldId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: RuleEntryId::new(),
            world_id: Some(world_id),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            details: Vec::new(),
            is_public: false,
            created_at: Utc::now(),
        }
    }

    /// A shared rule that belongs to no world and is visible everywhere
    pub fn baseline(
        name: &str,
        category: &str,
        description: &str,
        details: &[&str],
    ) -> Self {
        Self {
            id: RuleEntryId::new(),
            world_id: None,
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            details: details.iter().map(|d| d.to_string()).collect(),
            is_public: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn is_baseline(&self) -> bool {
        self.world_id.is_none()
    }
}

impl WorldContent for RuleEntry {
    type Id = RuleEntryId;

    const KIND: ContentKind = ContentKind::Rules;

    fn id(&self) -> RuleEntryId {
        self.id
    }

    fn world_id(&self) -> Option<WorldId> {
        self.world_id
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
    }

    fn bind(&mut self, id: RuleEntryId, world_id: WorldId) {
        self.id = id;
        self.world_id = Some(world_id);
    }

    fn validate(&self) -> Result<(), String> {
        validate_name("Rule name", &self.name)?;
        validate_name("Rule category", &self.category)?;
        validate_text("Rule description", &self.description)
    }
}

/// The SRD conditions and combat actions every world starts with
pub fn baseline_rules() -> Vec<RuleEntry> {
    vec![
        RuleEntry::baseline(
            "Blinded",
            "Conditions",
            "A blinded creature can't see and automatically fails any ability check that requires sight.",
            &[
                "Attack rolls against the creature have advantage.",
                "The creature's attack rolls have disadvantage.",
            ],
        ),
        RuleEntry::baseline(
            "Charmed",
            "Conditions",
            "A charmed creature can't attack the charmer or target the charmer with harmful abilities or magical effects.",
            &["The charmer has advantage on any ability check to interact socially with the creature."],
        ),
        RuleEntry::baseline(
            "Exhaustion",
            "Conditions",
            "Some special abilities and environmental hazards can lead to a special condition called exhaustion.",
            &[
                "Level 1: Disadvantage on ability checks",
                "Level 2: Speed halved",
                "Level 3: Disadvantage on attack rolls and saving throws",
                "Level 4: Hit point maximum halved",
                "Level 5: Speed reduced to 0",
                "Level 6: Death",
            ],
        ),
        RuleEntry::baseline(
            "Grappled",
            "Conditions",
            "A grappled creature's speed becomes 0, and it can't benefit from any bonus to its speed.",
            &[
                "The condition ends if the grappler is incapacitated.",
                "The condition ends if an effect removes the grappled creature from the reach of the grappler.",
            ],
        ),
        RuleEntry::baseline(
            "Incapacitated",
            "Conditions",
            "An incapacitated creature can't take actions or reactions.",
            &[],
        ),
        RuleEntry::baseline(
            "Dash",
            "Combat",
            "When you take the Dash action, you gain extra movement for the current turn.",
            &["The increase equals your speed, after applying any modifiers."],
        ),
        RuleEntry::baseline(
            "Disengage",
            "Combat",
            "If you take the Disengage action, your movement doesn't provoke opportunity attacks for the rest of the turn.",
            &[],
        ),
        RuleEntry::baseline(
            "Dodge",
            "Combat",
            "When you take the Dodge action, you focus entirely on avoiding attacks.",
            &[
                "Until the start of your next turn, any attack roll made against you has disadvantage if you can see the attacker.",
                "You make Dexterity saving throws with advantage.",
            ],
        ),
        RuleEntry::baseline(
            "Help",
            "Combat",
            "You can lend your aid to another creature in the completion of a task.",
            &[
                "The creature you aid has advantage on the next ability check it makes to perform the task you are helping with.",
                "Alternatively, you can aid a friendly creature in attacking a target within 5 feet of you.",
            ],
        ),
        RuleEntry::baseline(
            "Hide",
            "Combat",
            "When you take the Hide action, you make a Dexterity (Stealth) check in an attempt to hide.",
            &[],
        ),
        RuleEntry::baseline(
            "Half Cover",
            "Combat",
            "A target with half cover has a +2 bonus to AC and Dexterity saving throws.",
            &["A target has half cover if an obstacle blocks at least half of its body."],
        ),
        RuleEntry::baseline(
            "Three-Quarters Cover",
            "Combat",
            "A target with three-quarters cover has a +5 bonus to AC and Dexterity saving throws.",
            &["A target has three-quarters cover if about three-quarters of it is covered by an obstacle."],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_rules_are_shared_and_public() {
        let rules = baseline_rules();
        assert_eq!(rules.len(), 12);
        assert!(rules.iter().all(|r| r.is_baseline() && r.is_public));
        assert!(rules.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_bind_attaches_rule_to_world() {
        let mut rule = baseline_rules().remove(0);
        let world_id = WorldId::new();
        let id = RuleEntryId::new();
        rule.bind(id, world_id);
        assert_eq!(rule.id, id);
        assert_eq!(rule.world_id, Some(world_id));
        assert!(!rule.is_baseline());
    }
}
