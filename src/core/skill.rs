//! Skill, aspirational skill and dependency edge types.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Highest proficiency a skill can record.
pub const MAX_PROFICIENCY: u8 = 10;

/// Threshold applied to a dependency edge that does not set one.
pub const DEFAULT_REQUIRED_PROFICIENCY: u8 = 1;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));

/// Clamp a proficiency into `0..=MAX_PROFICIENCY`.
#[must_use]
pub fn clamp_proficiency(value: u8) -> u8 {
    value.min(MAX_PROFICIENCY)
}

/// Derive a skill id from its display name.
///
/// Lowercases, turns whitespace runs into `-` and drops everything outside
/// `[a-z0-9-]`, so `"Node.js"` becomes `"nodejs"` and `"REST APIs"` becomes
/// `"rest-apis"`. Names that slug to nothing get a random `skill-<uuid>` id.
#[must_use]
pub fn skill_id_from_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    let slug = NON_SLUG.replace_all(&dashed, "").into_owned();
    if slug.is_empty() { generated_skill_id() } else { slug }
}

/// A random `skill-<uuid>` id for names whose slug is unusable.
#[must_use]
pub fn generated_skill_id() -> String {
    format!("skill-{}", uuid::Uuid::new_v4().simple())
}

/// A skill the user has started learning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_goals: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Priority of an aspirational skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{other}' (expected low, medium, high)")),
        }
    }
}

/// A skill the user wants to pick up but has not started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspirationalSkill {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_proficiency: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prerequisite edge: `from_skill_id` must be learned before `to_skill_id`.
///
/// Identity is the ordered pair of ids. Ids are stored by value and may
/// dangle after their referent is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDependency {
    pub from_skill_id: String,
    pub to_skill_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_proficiency: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SkillDependency {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from_skill_id: from.into(),
            to_skill_id: to.into(),
            required_proficiency: None,
            description: None,
        }
    }

    /// Effective minimum proficiency of the prerequisite.
    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.required_proficiency
            .unwrap_or(DEFAULT_REQUIRED_PROFICIENCY)
    }

    #[must_use]
    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from_skill_id == from && self.to_skill_id == to
    }

    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.from_skill_id == id || self.to_skill_id == id
    }
}

/// Borrowed view over either kind of graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillNode<'a> {
    Skill(&'a Skill),
    Aspirational(&'a AspirationalSkill),
}

impl<'a> SkillNode<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            Self::Skill(s) => &s.id,
            Self::Aspirational(a) => &a.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Skill(s) => &s.name,
            Self::Aspirational(a) => &a.name,
        }
    }

    #[must_use]
    pub fn category(&self) -> &'a str {
        match self {
            Self::Skill(s) => &s.category,
            Self::Aspirational(a) => &a.category,
        }
    }

    /// Proficiency, or `None` for aspirational skills.
    #[must_use]
    pub const fn proficiency(&self) -> Option<u8> {
        match self {
            Self::Skill(s) => Some(s.proficiency),
            Self::Aspirational(_) => None,
        }
    }

    #[must_use]
    pub const fn is_aspirational(&self) -> bool {
        matches!(self, Self::Aspirational(_))
    }
}

/// Input for adding a skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSkill {
    /// Explicit id; derived from `name` when absent.
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub proficiency: u8,
    pub description: Option<String>,
    pub learning_goals: Option<String>,
}

impl NewSkill {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, proficiency: u8) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            proficiency,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_learning_goals(mut self, goals: impl Into<String>) -> Self {
        self.learning_goals = Some(goals.into());
        self
    }

    pub(crate) fn resolved_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| skill_id_from_name(&self.name))
    }
}

/// Field-level patch for an existing skill. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub proficiency: Option<u8>,
    pub description: Option<String>,
    pub learning_goals: Option<String>,
}

impl SkillUpdate {
    #[must_use]
    pub fn proficiency(value: u8) -> Self {
        Self {
            proficiency: Some(value),
            ..Default::default()
        }
    }

    pub(crate) fn apply(self, skill: &mut Skill, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            skill.name = name;
        }
        if let Some(category) = self.category {
            skill.category = category;
        }
        if let Some(proficiency) = self.proficiency {
            skill.proficiency = clamp_proficiency(proficiency);
        }
        if let Some(description) = self.description {
            skill.description = Some(description);
        }
        if let Some(goals) = self.learning_goals {
            skill.learning_goals = Some(goals);
        }
        skill.updated_at = now;
    }
}

/// Input for adding an aspirational skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAspirationalSkill {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub priority: Priority,
    pub description: Option<String>,
    pub reason: Option<String>,
    pub target_proficiency: Option<u8>,
    pub target_date: Option<NaiveDate>,
    pub resources: Vec<String>,
}

impl NewAspirationalSkill {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            priority,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub(crate) fn resolved_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| skill_id_from_name(&self.name))
    }
}

/// Field-level patch for an aspirational skill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AspirationalUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
    pub reason: Option<String>,
    pub target_proficiency: Option<u8>,
    pub target_date: Option<NaiveDate>,
    pub resources: Option<Vec<String>>,
}

impl AspirationalUpdate {
    pub(crate) fn apply(self, skill: &mut AspirationalSkill, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            skill.name = name;
        }
        if let Some(category) = self.category {
            skill.category = category;
        }
        if let Some(priority) = self.priority {
            skill.priority = priority;
        }
        if let Some(description) = self.description {
            skill.description = Some(description);
        }
        if let Some(reason) = self.reason {
            skill.reason = Some(reason);
        }
        if let Some(target) = self.target_proficiency {
            skill.target_proficiency = Some(clamp_proficiency(target));
        }
        if let Some(date) = self.target_date {
            skill.target_date = Some(date);
        }
        if let Some(resources) = self.resources {
            skill.resources = resources;
        }
        skill.updated_at = now;
    }
}
