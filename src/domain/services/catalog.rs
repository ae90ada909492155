//! Catalogue filters - single-pass search over already-visible collections

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DmNote, Location, LoreEntry, Monster, NoteCategory, RuleEntry};

/// A collection that can be searched and ordered for display
pub trait Catalog: Sized {
    type Filter: Default;

    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Display order; the default keeps store order
    fn display_order(_a: &Self, _b: &Self) -> Ordering {
        Ordering::Equal
    }
}

/// Filter and order a collection. The sort is stable.
pub fn apply_filter<T: Catalog>(rows: Vec<T>, filter: &T::Filter) -> Vec<T> {
    let mut rows: Vec<T> = rows.into_iter().filter(|row| row.matches(filter)).collect();
    rows.sort_by(T::display_order);
    rows
}

fn search_hit(needle: &Option<String>, haystacks: &[&str]) -> bool {
    match needle.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        None => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
    }
}

fn selected<'a>(choice: &'a Option<String>) -> Option<&'a str> {
    choice.as_deref().map(str::trim).filter(|c| !c.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationFilter {
    pub search: Option<String>,
}

impl Catalog for Location {
    type Filter = LocationFilter;

    fn matches(&self, filter: &LocationFilter) -> bool {
        search_hit(&filter.search, &[&self.name, &self.description])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoreFilter {
    pub search: Option<String>,
    pub era: Option<String>,
}

impl Catalog for LoreEntry {
    type Filter = LoreFilter;

    fn matches(&self, filter: &LoreFilter) -> bool {
        search_hit(&filter.search, &[&self.title, &self.content])
            && selected(&filter.era).map_or(true, |era| self.era == era)
    }

    fn display_order(a: &Self, b: &Self) -> Ordering {
        a.year.cmp(&b.year)
    }
}

/// One era on the lore timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraSummary {
    pub name: String,
    /// Earliest year of any entry in the era
    pub year: i32,
    pub count: usize,
}

/// Distinct eras with their earliest year and entry count, oldest first
pub fn era_timeline(entries: &[LoreEntry]) -> Vec<EraSummary> {
    let mut eras: Vec<EraSummary> = Vec::new();
    for entry in entries {
        match eras.iter_mut().find(|e| e.name == entry.era) {
            Some(era) => {
                era.year = era.year.min(entry.year);
                era.count += 1;
            }
            None => eras.push(EraSummary {
                name: entry.era.clone(),
                year: entry.year,
                count: 1,
            }),
        }
    }
    eras.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.name.cmp(&b.name)));
    eras
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleFilter {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl Catalog for RuleEntry {
    type Filter = RuleFilter;

    fn matches(&self, filter: &RuleFilter) -> bool {
        search_hit(&filter.search, &[&self.name, &self.description])
            && selected(&filter.category).map_or(true, |c| self.category == c)
    }
}

/// Rule categories in first-seen order
pub fn rule_categories(rules: &[RuleEntry]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for rule in rules {
        if !categories.contains(&rule.category) {
            categories.push(rule.category.clone());
        }
    }
    categories
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteFilter {
    pub search: Option<String>,
    pub category: Option<NoteCategory>,
}

impl Catalog for DmNote {
    type Filter = NoteFilter;

    fn matches(&self, filter: &NoteFilter) -> bool {
        search_hit(&filter.search, &[&self.title, &self.content])
            && filter.category.map_or(true, |c| self.category == c)
    }

    // Newest first
    fn display_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonsterFilter {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
}

impl Catalog for Monster {
    type Filter = MonsterFilter;

    fn matches(&self, filter: &MonsterFilter) -> bool {
        search_hit(&filter.search, &[&self.stats.name])
            && selected(&filter.creature_type)
                .map_or(true, |t| self.stats.creature_type.eq_ignore_ascii_case(t))
    }
}
