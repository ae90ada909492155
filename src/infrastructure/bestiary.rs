//! Open5e client for the public SRD bestiary

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::outbound::{BestiaryPage, BestiaryPort, BestiaryQuery};
use crate::domain::entities::{AbilityScores, NamedText, StatBlock};

/// Client for the Open5e monsters API
pub struct Open5eClient {
    client: Client,
    base_url: String,
}

impl Open5eClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one page of published monsters
    pub async fn monsters(&self, query: &BestiaryQuery) -> Result<BestiaryPage, BestiaryError> {
        let page = query.page();
        let mut params = vec![("page", page.to_string())];
        if let Some(creature_type) = query.creature_type.as_deref().filter(|t| !t.trim().is_empty()) {
            params.push(("type", creature_type.trim().to_string()));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }

        let response = self
            .client
            .get(format!("{}/monsters/", self.base_url))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(BestiaryError::ApiError(error_text));
        }

        let listing: MonsterListing = response.json().await?;
        tracing::debug!("Fetched {} SRD monsters (page {})", listing.results.len(), page);
        Ok(listing.into_page(page))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BestiaryError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
}

#[derive(Debug, Deserialize)]
struct MonsterListing {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    results: Vec<ApiMonster>,
}

impl MonsterListing {
    fn into_page(self, page: u32) -> BestiaryPage {
        BestiaryPage {
            page,
            count: self.count,
            has_more: self.next.is_some(),
            results: self.results.into_iter().map(ApiMonster::into_stat_block).collect(),
        }
    }
}

/// Open5e monster as published. Lists may be null or an empty string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiMonster {
    slug: Option<String>,
    name: Option<String>,
    size: Option<String>,
    #[serde(rename = "type")]
    creature_type: Option<String>,
    alignment: Option<String>,
    armor_class: Option<i32>,
    hit_points: Option<i32>,
    challenge_rating: Option<serde_json::Value>,
    strength: Option<i32>,
    dexterity: Option<i32>,
    constitution: Option<i32>,
    intelligence: Option<i32>,
    wisdom: Option<i32>,
    charisma: Option<i32>,
    speed: Option<serde_json::Value>,
    senses: Option<String>,
    languages: Option<String>,
    special_abilities: Option<serde_json::Value>,
    actions: Option<serde_json::Value>,
    legendary_actions: Option<serde_json::Value>,
}

impl ApiMonster {
    fn into_stat_block(self) -> StatBlock {
        let defaults = AbilityScores::default();
        let challenge_rating = match self.challenge_rating {
            Some(serde_json::Value::String(cr)) => cr,
            Some(serde_json::Value::Number(cr)) => cr.to_string(),
            _ => "0".to_string(),
        };
        let speed = match self.speed {
            Some(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        };

        StatBlock {
            slug: self.slug.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            creature_type: self.creature_type.unwrap_or_default(),
            challenge_rating,
            armor_class: self.armor_class.unwrap_or(10),
            hit_points: self.hit_points.unwrap_or(1),
            alignment: self.alignment.unwrap_or_default(),
            abilities: AbilityScores {
                strength: self.strength.unwrap_or(defaults.strength),
                dexterity: self.dexterity.unwrap_or(defaults.dexterity),
                constitution: self.constitution.unwrap_or(defaults.constitution),
                intelligence: self.intelligence.unwrap_or(defaults.intelligence),
                wisdom: self.wisdom.unwrap_or(defaults.wisdom),
                charisma: self.charisma.unwrap_or(defaults.charisma),
            },
            speed,
            senses: self.senses.unwrap_or_default(),
            languages: self.languages.unwrap_or_default(),
            special_abilities: named_list(self.special_abilities),
            actions: named_list(self.actions),
            legendary_actions: named_list(self.legendary_actions),
        }
        .normalized()
    }
}

fn named_list(value: Option<serde_json::Value>) -> Vec<NamedText> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

// =============================================================================
// BestiaryPort Implementation
// =============================================================================

#[async_trait]
impl BestiaryPort for Open5eClient {
    async fn search(&self, query: &BestiaryQuery) -> Result<BestiaryPage> {
        Ok(self.monsters(query).await?)
    }
}
