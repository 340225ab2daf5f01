//! The owned profile state: skills, aspirational skills and dependency edges.

use serde::{Deserialize, Serialize};

use super::skill::{AspirationalSkill, Skill, SkillDependency, SkillNode};

/// All skill-graph data, passed explicitly to the engine and the store.
///
/// Collections keep insertion order; several derivations (critical ranking,
/// learning paths) rely on it for deterministic ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileState {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub aspirational_skills: Vec<AspirationalSkill>,
    #[serde(default)]
    pub skill_dependencies: Vec<SkillDependency>,
}

impl ProfileState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn skill_mut(&mut self, id: &str) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.id == id)
    }

    #[must_use]
    pub fn aspirational(&self, id: &str) -> Option<&AspirationalSkill> {
        self.aspirational_skills.iter().find(|s| s.id == id)
    }

    pub fn aspirational_mut(&mut self, id: &str) -> Option<&mut AspirationalSkill> {
        self.aspirational_skills.iter_mut().find(|s| s.id == id)
    }

    /// Look up an id in skills first, then aspirational skills.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<SkillNode<'_>> {
        self.skill(id)
            .map(SkillNode::Skill)
            .or_else(|| self.aspirational(id).map(SkillNode::Aspirational))
    }

    /// Every node, skills first, each collection in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = SkillNode<'_>> {
        self.skills
            .iter()
            .map(SkillNode::Skill)
            .chain(self.aspirational_skills.iter().map(SkillNode::Aspirational))
    }

    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    #[must_use]
    pub fn dependency(&self, from: &str, to: &str) -> Option<&SkillDependency> {
        self.skill_dependencies.iter().find(|d| d.connects(from, to))
    }

    pub fn dependency_mut(&mut self, from: &str, to: &str) -> Option<&mut SkillDependency> {
        self.skill_dependencies
            .iter_mut()
            .find(|d| d.connects(from, to))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.aspirational_skills.is_empty()
            && self.skill_dependencies.is_empty()
    }
}
