//! Skill Dependency Graph Engine
//!
//! Read-only derivations over a [`ProfileState`]: cycle safety for new edges,
//! availability, learning paths, dependency levels and critical-skill ranking.
//!
//! Edges reference skills by id, so every lookup may miss. All queries here are
//! total: a missing prerequisite counts as unsatisfied, a missing node is
//! skipped, and every traversal carries its own visited set so that even a
//! malformed (cyclic) edge set terminates.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::skill::{Skill, SkillDependency, SkillNode};
use super::state::ProfileState;

type Adjacency<'a> = HashMap<&'a str, Vec<&'a str>>;

/// A prerequisite edge that currently blocks a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmetRequirement<'a> {
    pub prerequisite_id: &'a str,
    pub required_proficiency: u8,
    /// Proficiency of the prerequisite, `None` when it is not a skill.
    pub current_proficiency: Option<u8>,
}

/// A skill together with the number of skills that directly depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalSkill<'a> {
    pub skill: &'a Skill,
    pub dependents: usize,
}

/// Summary counts over the whole graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub skills: usize,
    pub aspirational: usize,
    pub dependencies: usize,
    pub available: usize,
    pub blocked: usize,
    pub learned: usize,
    pub max_level: usize,
}

/// Borrowed view of the dependency graph.
#[derive(Debug, Clone, Copy)]
pub struct SkillGraph<'a> {
    state: &'a ProfileState,
}

impl<'a> SkillGraph<'a> {
    #[must_use]
    pub const fn new(state: &'a ProfileState) -> Self {
        Self { state }
    }

    #[must_use]
    pub const fn state(&self) -> &'a ProfileState {
        self.state
    }

    /// from -> [to], in edge order.
    fn forward_adjacency(&self) -> Adjacency<'a> {
        let mut adjacency: Adjacency<'a> = HashMap::new();
        for dep in &self.state.skill_dependencies {
            adjacency
                .entry(dep.from_skill_id.as_str())
                .or_default()
                .push(dep.to_skill_id.as_str());
        }
        adjacency
    }

    /// to -> [from], in edge order.
    fn reverse_adjacency(&self) -> Adjacency<'a> {
        let mut adjacency: Adjacency<'a> = HashMap::new();
        for dep in &self.state.skill_dependencies {
            adjacency
                .entry(dep.to_skill_id.as_str())
                .or_default()
                .push(dep.from_skill_id.as_str());
        }
        adjacency
    }

    /// Whether inserting `from -> to` would close a cycle in the current edge set.
    ///
    /// True when `to` already reaches `from` along existing edges, including the
    /// degenerate self-edge `from == to`. Must be asked before the edge exists.
    #[must_use]
    pub fn would_create_cycle(&self, from: &str, to: &str) -> bool {
        reaches(&self.forward_adjacency(), to, from)
    }

    /// Ordered prerequisite chain for `skill_id`, ending with the skill itself.
    ///
    /// Post-order walk over incoming edges: every prerequisite is placed before
    /// its dependents, shared prerequisites appear once. Aspirational or
    /// dangling ids are walked through but not emitted.
    #[must_use]
    pub fn learning_path(&self, skill_id: &str) -> Vec<&'a Skill> {
        let prerequisites = self.reverse_adjacency();
        let mut visited = HashSet::new();
        let mut path = Vec::new();
        self.place(skill_id, &prerequisites, &mut visited, &mut path);
        path
    }

    fn place<'b>(
        &self,
        id: &'b str,
        prerequisites: &Adjacency<'a>,
        visited: &mut HashSet<&'b str>,
        path: &mut Vec<&'a Skill>,
    ) where
        'a: 'b,
    {
        if !visited.insert(id) {
            return;
        }
        if let Some(parents) = prerequisites.get(id) {
            for &parent in parents {
                self.place(parent, prerequisites, visited, path);
            }
        }
        if let Some(skill) = self.state.skill(id) {
            path.push(skill);
        }
    }

    /// Incoming edges of `skill_id`.
    pub fn incoming(&self, skill_id: &str) -> impl Iterator<Item = &'a SkillDependency> {
        self.state
            .skill_dependencies
            .iter()
            .filter(move |dep| dep.to_skill_id == skill_id)
    }

    /// Outgoing edges of `skill_id`.
    pub fn outgoing(&self, skill_id: &str) -> impl Iterator<Item = &'a SkillDependency> {
        self.state
            .skill_dependencies
            .iter()
            .filter(move |dep| dep.from_skill_id == skill_id)
    }

    /// An edge is satisfied when its source is a skill at or above the threshold.
    #[must_use]
    pub fn is_satisfied(&self, dep: &SkillDependency) -> bool {
        self.state
            .skill(&dep.from_skill_id)
            .is_some_and(|prereq| prereq.proficiency >= dep.threshold())
    }

    #[must_use]
    pub fn is_available(&self, skill_id: &str) -> bool {
        self.incoming(skill_id).all(|dep| self.is_satisfied(dep))
    }

    /// Skills whose incoming edges are all satisfied.
    #[must_use]
    pub fn available_skills(&self) -> Vec<&'a Skill> {
        self.state
            .skills
            .iter()
            .filter(|skill| self.is_available(&skill.id))
            .collect()
    }

    /// Skills with at least one unsatisfied incoming edge.
    #[must_use]
    pub fn blocked_skills(&self) -> Vec<&'a Skill> {
        self.state
            .skills
            .iter()
            .filter(|skill| !self.is_available(&skill.id))
            .collect()
    }

    /// Unsatisfied incoming edges of `skill_id`, in edge order.
    #[must_use]
    pub fn unmet_requirements(&self, skill_id: &str) -> Vec<UnmetRequirement<'a>> {
        self.incoming(skill_id)
            .filter(|dep| !self.is_satisfied(dep))
            .map(|dep| UnmetRequirement {
                prerequisite_id: &dep.from_skill_id,
                required_proficiency: dep.threshold(),
                current_proficiency: self.state.skill(&dep.from_skill_id).map(|s| s.proficiency),
            })
            .collect()
    }

    /// Level of every skill: 0 without prerequisites, else one more than the
    /// deepest direct prerequisite.
    ///
    /// Levels are memoized across roots; a node met again while its own level
    /// is still being computed (only possible on a cyclic edge set) counts as 0.
    #[must_use]
    pub fn dependency_levels(&self) -> HashMap<&'a str, usize> {
        let prerequisites = self.reverse_adjacency();
        let mut memo: HashMap<&'a str, usize> = HashMap::new();
        for skill in &self.state.skills {
            let mut in_progress = HashSet::new();
            level_of(&skill.id, &prerequisites, &mut memo, &mut in_progress);
        }
        self.state
            .skills
            .iter()
            .map(|skill| {
                let id = skill.id.as_str();
                (id, memo.get(id).copied().unwrap_or(0))
            })
            .collect()
    }

    /// Level of a single node, computed with the same rules as
    /// [`Self::dependency_levels`].
    #[must_use]
    pub fn dependency_level(&self, skill_id: &str) -> usize {
        let prerequisites = self.reverse_adjacency();
        let mut memo = HashMap::new();
        let mut in_progress = HashSet::new();
        level_of(skill_id, &prerequisites, &mut memo, &mut in_progress)
    }

    /// Skills grouped by level, each group in skill insertion order.
    #[must_use]
    pub fn levels_by_depth(&self) -> BTreeMap<usize, Vec<&'a Skill>> {
        let levels = self.dependency_levels();
        let mut grouped: BTreeMap<usize, Vec<&'a Skill>> = BTreeMap::new();
        for skill in &self.state.skills {
            let level = levels.get(skill.id.as_str()).copied().unwrap_or(0);
            grouped.entry(level).or_default().push(skill);
        }
        grouped
    }

    /// Skills ranked by how many edges leave them, highest first.
    ///
    /// Ties keep skill insertion order. Returns at most `limit` entries.
    #[must_use]
    pub fn critical_skills(&self, limit: usize) -> Vec<CriticalSkill<'a>> {
        let mut out_degree: HashMap<&str, usize> = HashMap::new();
        for dep in &self.state.skill_dependencies {
            *out_degree.entry(dep.from_skill_id.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<CriticalSkill<'a>> = self
            .state
            .skills
            .iter()
            .map(|skill| CriticalSkill {
                skill,
                dependents: out_degree.get(skill.id.as_str()).copied().unwrap_or(0),
            })
            .collect();
        ranked.sort_by(|a, b| b.dependents.cmp(&a.dependents));
        ranked.truncate(limit);
        ranked
    }

    /// Direct prerequisites of `skill_id` that still resolve to a node.
    #[must_use]
    pub fn prerequisites(&self, skill_id: &str) -> Vec<SkillNode<'a>> {
        self.incoming(skill_id)
            .filter_map(|dep| self.state.node(&dep.from_skill_id))
            .collect()
    }

    /// Nodes that `skill_id` directly unlocks.
    #[must_use]
    pub fn unlocks(&self, skill_id: &str) -> Vec<SkillNode<'a>> {
        self.outgoing(skill_id)
            .filter_map(|dep| self.state.node(&dep.to_skill_id))
            .collect()
    }

    /// Skills that could become a prerequisite of `skill_id` without a cycle.
    ///
    /// Aspirational nodes are left out: an edge from one can never be satisfied.
    #[must_use]
    pub fn prerequisite_candidates(&self, skill_id: &str) -> Vec<&'a Skill> {
        let adjacency = self.forward_adjacency();
        self.state
            .skills
            .iter()
            .filter(|skill| skill.id != skill_id && !reaches(&adjacency, skill_id, &skill.id))
            .collect()
    }

    /// Nodes that could come to depend on `skill_id` without a cycle.
    #[must_use]
    pub fn dependent_candidates(&self, skill_id: &str) -> Vec<SkillNode<'a>> {
        let adjacency = self.forward_adjacency();
        self.state
            .nodes()
            .filter(|node| node.id() != skill_id && !reaches(&adjacency, node.id(), skill_id))
            .collect()
    }

    /// Every edge with `skill_id` at either end.
    #[must_use]
    pub fn dependencies_touching(&self, skill_id: &str) -> Vec<&'a SkillDependency> {
        self.state
            .skill_dependencies
            .iter()
            .filter(|dep| dep.touches(skill_id))
            .collect()
    }

    #[must_use]
    pub fn stats(&self, learned_threshold: u8) -> GraphStats {
        let available = self.available_skills().len();
        GraphStats {
            skills: self.state.skills.len(),
            aspirational: self.state.aspirational_skills.len(),
            dependencies: self.state.skill_dependencies.len(),
            available,
            blocked: self.state.skills.len() - available,
            learned: self
                .state
                .skills
                .iter()
                .filter(|s| s.proficiency >= learned_threshold)
                .count(),
            max_level: self.dependency_levels().into_values().max().unwrap_or(0),
        }
    }
}

/// Depth-first reachability from `start` to `target` along `adjacency`.
fn reaches(adjacency: &Adjacency<'_>, start: &str, target: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = adjacency.get(current) {
            stack.extend(next.iter().copied().filter(|id| !visited.contains(id)));
        }
    }
    false
}

fn level_of<'a>(
    id: &'a str,
    prerequisites: &Adjacency<'a>,
    memo: &mut HashMap<&'a str, usize>,
    in_progress: &mut HashSet<&'a str>,
) -> usize {
    if let Some(&level) = memo.get(id) {
        return level;
    }
    if !in_progress.insert(id) {
        return 0;
    }
    let level = prerequisites.get(id).map_or(0, |parents| {
        parents
            .iter()
            .map(|&parent| level_of(parent, prerequisites, memo, in_progress))
            .max()
            .map_or(0, |deepest| deepest + 1)
    });
    in_progress.remove(id);
    memo.insert(id, level);
    level
}
