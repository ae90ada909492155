//! Bestiary port - read-only lookup of published SRD stat blocks

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::StatBlock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestiaryQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

impl BestiaryQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestiaryPage {
    pub page: u32,
    /// Total matches across all pages
    pub count: u64,
    pub has_more: bool,
    pub results: Vec<StatBlock>,
}

#[async_trait]
pub trait BestiaryPort: Send + Sync {
    async fn search(&self, query: &BestiaryQuery) -> Result<BestiaryPage>;
}
