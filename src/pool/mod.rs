//! Skill pools: batch import from curated lists, demo profiles and pool files.

mod data;
mod import;

use serde::Deserialize;
use tracing::{info, warn};

pub use data::{DemoSet, PoolSource};
pub use import::{ImportFormat, parse_pool_csv, parse_pool_json};

use crate::core::skill::{
    NewAspirationalSkill, NewSkill, Priority, clamp_proficiency, skill_id_from_name,
};
use crate::store::SkillStore;

/// One entry of a skill pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PoolItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub proficiency: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PoolItem {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, proficiency: u8) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            proficiency: Some(proficiency),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn resolved_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| skill_id_from_name(&self.name))
    }
}

impl SkillStore {
    /// Add every pool item whose id is not taken yet, with a single write.
    ///
    /// Items with a positive proficiency become skills; the rest become
    /// aspirational skills noting `source` as the reason.
    pub fn add_from_pool(&mut self, items: &[PoolItem], source: &str) -> usize {
        let mut added = 0;
        for item in items {
            let id = item.resolved_id();
            let proficiency = item.proficiency.map_or(0, clamp_proficiency);
            let inserted = if proficiency > 0 {
                self.insert_skill(NewSkill {
                    id: Some(id),
                    name: item.name.clone(),
                    category: item.category.clone(),
                    proficiency,
                    description: item.description.clone(),
                    learning_goals: None,
                })
            } else {
                self.insert_aspirational(NewAspirationalSkill {
                    id: Some(id),
                    description: item.description.clone(),
                    reason: Some(format!("Added from {source}")),
                    ..NewAspirationalSkill::new(item.name.clone(), item.category.clone(), Priority::Medium)
                })
            };
            if inserted.is_some() {
                added += 1;
            }
        }
        self.persist();
        info!(source, offered = items.len(), added, "imported skill pool");
        added
    }

    /// Import a demo set: its skills first, then its edges.
    ///
    /// Edges that would close a cycle are logged and skipped.
    pub fn load_demo(&mut self, set: DemoSet) -> usize {
        let added = self.add_from_pool(&set.skills(), set.label());
        for &(from, to, required, description) in set.dependencies() {
            if let Err(err) = self.insert_dependency(from, to, Some(required), Some(description.to_string())) {
                warn!(from, to, error = %err, "skipping demo dependency");
            }
        }
        self.persist();
        added
    }
}

/// Pick items by a selection string: `all`, or comma-separated 1-based
/// positions. Positions that do not parse or fall outside the list are
/// ignored.
#[must_use]
pub fn select_items(items: &[PoolItem], choice: &str) -> Vec<PoolItem> {
    if choice.trim().eq_ignore_ascii_case("all") {
        return items.to_vec();
    }
    choice
        .split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter_map(|position| position.checked_sub(1))
        .filter_map(|index| items.get(index).cloned())
        .collect()
}
