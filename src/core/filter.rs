//! Skill status classification and list filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::graph::SkillGraph;
use super::skill::SkillNode;
use super::state::ProfileState;

/// Proficiency at which a skill counts as learned unless configured otherwise.
pub const DEFAULT_LEARNED_THRESHOLD: u8 = 5;

/// Display status of a node. Learned wins over available/blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    Learned,
    Available,
    Blocked,
    Aspirational,
}

impl SkillStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Learned => "learned",
            Self::Available => "available",
            Self::Blocked => "blocked",
            Self::Aspirational => "aspirational",
        }
    }
}

impl std::fmt::Display for SkillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "learned" => Ok(Self::Learned),
            "available" => Ok(Self::Available),
            "blocked" => Ok(Self::Blocked),
            "aspirational" => Ok(Self::Aspirational),
            other => Err(format!(
                "unknown status '{other}' (expected learned, available, blocked, aspirational)"
            )),
        }
    }
}

/// Classify a node against the current graph.
#[must_use]
pub fn classify(graph: &SkillGraph<'_>, node: SkillNode<'_>, learned_threshold: u8) -> SkillStatus {
    match node {
        SkillNode::Aspirational(_) => SkillStatus::Aspirational,
        SkillNode::Skill(skill) if skill.proficiency >= learned_threshold => SkillStatus::Learned,
        SkillNode::Skill(skill) if graph.is_available(&skill.id) => SkillStatus::Available,
        SkillNode::Skill(_) => SkillStatus::Blocked,
    }
}

/// Search, category and status filter over every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFilter {
    /// Case-insensitive substring of the name.
    pub query: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    pub status: Option<SkillStatus>,
    pub learned_threshold: Option<u8>,
}

impl SkillFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: SkillStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn learned_threshold(mut self, threshold: u8) -> Self {
        self.learned_threshold = Some(threshold);
        self
    }

    /// Nodes that pass every configured criterion, skills first.
    #[must_use]
    pub fn apply<'a>(&self, state: &'a ProfileState) -> Vec<SkillNode<'a>> {
        let graph = SkillGraph::new(state);
        let threshold = self.learned_threshold.unwrap_or(DEFAULT_LEARNED_THRESHOLD);
        let query = self.query.as_deref().map(str::to_lowercase);

        state
            .nodes()
            .filter(|node| {
                query
                    .as_deref()
                    .is_none_or(|q| node.name().to_lowercase().contains(q))
            })
            .filter(|node| {
                self.category
                    .as_deref()
                    .is_none_or(|c| node.category() == c)
            })
            .filter(|node| {
                self.status
                    .is_none_or(|wanted| classify(&graph, *node, threshold) == wanted)
            })
            .collect()
    }
}

/// Sorted, de-duplicated categories across skills and aspirational skills.
#[must_use]
pub fn available_categories(state: &ProfileState) -> Vec<&str> {
    state
        .nodes()
        .map(|node| node.category())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::StateBuilder;

    fn sample() -> ProfileState {
        StateBuilder::new()
            .skill_in("html", 8, "Web")
            .skill_in("css", 3, "Web")
            .skill_in("react", 0, "Web")
            .skill_in("sql", 2, "Data")
            .aspirational_in("rust", "Programming")
            .edge_with("css", "react", 6)
            .build()
    }

    fn ids(nodes: &[SkillNode<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_classify() {
        let state = sample();
        let graph = SkillGraph::new(&state);
        let status = |id: &str| classify(&graph, state.node(id).unwrap(), 5);

        assert_eq!(status("html"), SkillStatus::Learned);
        assert_eq!(status("css"), SkillStatus::Available);
        assert_eq!(status("react"), SkillStatus::Blocked);
        assert_eq!(status("rust"), SkillStatus::Aspirational);
    }

    #[test]
    fn test_filter_by_status() {
        let state = sample();
        let available = SkillFilter::new().status(SkillStatus::Available).apply(&state);
        assert_eq!(ids(&available), vec!["css", "sql"]);

        let blocked = SkillFilter::new().status(SkillStatus::Blocked).apply(&state);
        assert_eq!(ids(&blocked), vec!["react"]);
    }

    #[test]
    fn test_filter_by_query_and_category() {
        let state = sample();
        let found = SkillFilter::new().query("RE").apply(&state);
        assert_eq!(ids(&found), vec!["react"]);

        let web = SkillFilter::new().category("Web").apply(&state);
        assert_eq!(ids(&web), vec!["html", "css", "react"]);

        let none = SkillFilter::new()
            .category("Data")
            .status(SkillStatus::Learned)
            .apply(&state);
        assert!(none.is_empty());
    }

    #[test]
    fn test_learned_threshold_override() {
        let state = sample();
        let learned = SkillFilter::new()
            .status(SkillStatus::Learned)
            .learned_threshold(3)
            .apply(&state);
        assert_eq!(ids(&learned), vec!["html", "css"]);
    }

    #[test]
    fn test_available_categories() {
        let state = sample();
        assert_eq!(available_categories(&state), vec!["Data", "Programming", "Web"]);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Blocked".parse::<SkillStatus>().unwrap(), SkillStatus::Blocked);
        assert!("done".parse::<SkillStatus>().is_err());
    }
}
