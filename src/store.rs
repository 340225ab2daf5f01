//! Entity store: the authoritative, mutable profile state.
//!
//! Every mutation runs to completion in memory and then hands the whole
//! state to the [`Persistence`] backend. Backend failures are logged and
//! never undo the mutation. Missing ids make a mutation a silent no-op; the
//! only mutation that can fail is [`SkillStore::add_skill_dependency`].

use chrono::Utc;
use tracing::{debug, error, warn};

use crate::core::graph::SkillGraph;
use crate::core::skill::{
    AspirationalSkill, AspirationalUpdate, NewAspirationalSkill, NewSkill, Skill,
    SkillDependency, SkillUpdate, clamp_proficiency, generated_skill_id, skill_id_from_name,
};
use crate::core::state::ProfileState;
use crate::error::{Result, SgError};
use crate::storage::Persistence;

/// Proficiency given to a converted aspirational skill unless told otherwise.
pub const DEFAULT_INITIAL_PROFICIENCY: u8 = 1;

/// Field-level patch for an existing dependency edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyUpdate {
    pub required_proficiency: Option<u8>,
    pub description: Option<String>,
}

/// Owns the [`ProfileState`] and writes it through after each mutation.
#[derive(Debug)]
pub struct SkillStore {
    state: ProfileState,
    backend: Box<dyn Persistence>,
}

impl SkillStore {
    /// Open a store over `backend`, loading whatever it holds.
    ///
    /// A backend that cannot be read leaves the store empty.
    pub fn open(backend: impl Persistence + 'static) -> Self {
        let backend: Box<dyn Persistence> = Box::new(backend);
        let state = match backend.load() {
            Ok(Some(state)) => {
                debug!(
                    backend = %backend.describe(),
                    skills = state.skills.len(),
                    aspirational = state.aspirational_skills.len(),
                    dependencies = state.skill_dependencies.len(),
                    "loaded profile"
                );
                state
            }
            Ok(None) => ProfileState::new(),
            Err(err) => {
                error!(backend = %backend.describe(), error = %err, "failed to load profile, starting empty");
                ProfileState::new()
            }
        };
        Self { state, backend }
    }

    #[must_use]
    pub const fn state(&self) -> &ProfileState {
        &self.state
    }

    /// Read-only engine view over the current state.
    #[must_use]
    pub fn graph(&self) -> SkillGraph<'_> {
        SkillGraph::new(&self.state)
    }

    #[must_use]
    pub fn backend(&self) -> &dyn Persistence {
        self.backend.as_ref()
    }

    /// Write the current state to the backend. Failures are logged only.
    pub(crate) fn persist(&self) {
        if let Err(err) = self.backend.save(&self.state) {
            error!(backend = %self.backend.describe(), error = %err, "failed to persist profile");
        }
    }

    // ---- skills -----------------------------------------------------------

    /// Add a skill, returning its id, or `None` if the id is already taken.
    pub fn add_skill(&mut self, input: NewSkill) -> Option<String> {
        let id = self.insert_skill(input)?;
        self.persist();
        Some(id)
    }

    pub(crate) fn insert_skill(&mut self, input: NewSkill) -> Option<String> {
        let id = input.resolved_id();
        if self.state.contains_id(&id) {
            warn!(id = %id, "skill id already exists, not adding");
            return None;
        }
        let now = Utc::now();
        self.state.skills.push(Skill {
            id: id.clone(),
            name: input.name,
            category: input.category,
            proficiency: clamp_proficiency(input.proficiency),
            description: input.description,
            learning_goals: input.learning_goals,
            created_at: now,
            updated_at: now,
        });
        debug!(id = %id, "added skill");
        Some(id)
    }

    /// Apply `patch` to skill `id`. Returns false if there is no such skill.
    pub fn update_skill(&mut self, id: &str, patch: SkillUpdate) -> bool {
        let Some(skill) = self.state.skill_mut(id) else {
            warn!(id, "update of unknown skill ignored");
            return false;
        };
        patch.apply(skill, Utc::now());
        debug!(id, "updated skill");
        self.persist();
        true
    }

    /// Remove skill `id` and every edge that references it.
    pub fn remove_skill(&mut self, id: &str) -> bool {
        let before = self.state.skills.len();
        self.state.skills.retain(|s| s.id != id);
        if self.state.skills.len() == before {
            warn!(id, "removal of unknown skill ignored");
            return false;
        }
        let dropped = self.drop_edges_touching(id);
        debug!(id, dropped_edges = dropped, "removed skill");
        self.persist();
        true
    }

    // ---- aspirational skills ----------------------------------------------

    pub fn add_aspirational_skill(&mut self, input: NewAspirationalSkill) -> Option<String> {
        let id = self.insert_aspirational(input)?;
        self.persist();
        Some(id)
    }

    pub(crate) fn insert_aspirational(&mut self, input: NewAspirationalSkill) -> Option<String> {
        let id = input.resolved_id();
        if self.state.contains_id(&id) {
            warn!(id = %id, "aspirational skill id already exists, not adding");
            return None;
        }
        let now = Utc::now();
        self.state.aspirational_skills.push(AspirationalSkill {
            id: id.clone(),
            name: input.name,
            category: input.category,
            priority: input.priority,
            description: input.description,
            reason: input.reason,
            target_proficiency: input.target_proficiency.map(clamp_proficiency),
            target_date: input.target_date,
            resources: input.resources,
            created_at: now,
            updated_at: now,
        });
        debug!(id = %id, "added aspirational skill");
        Some(id)
    }

    pub fn update_aspirational_skill(&mut self, id: &str, patch: AspirationalUpdate) -> bool {
        let Some(skill) = self.state.aspirational_mut(id) else {
            warn!(id, "update of unknown aspirational skill ignored");
            return false;
        };
        patch.apply(skill, Utc::now());
        debug!(id, "updated aspirational skill");
        self.persist();
        true
    }

    /// Remove aspirational skill `id` and every edge that references it.
    pub fn remove_aspirational_skill(&mut self, id: &str) -> bool {
        let before = self.state.aspirational_skills.len();
        self.state.aspirational_skills.retain(|s| s.id != id);
        if self.state.aspirational_skills.len() == before {
            warn!(id, "removal of unknown aspirational skill ignored");
            return false;
        }
        let dropped = self.drop_edges_touching(id);
        debug!(id, dropped_edges = dropped, "removed aspirational skill");
        self.persist();
        true
    }

    /// Turn aspirational skill `id` into a skill with `initial_proficiency`,
    /// returning the new skill's id.
    ///
    /// The skill takes the name, category and description under a fresh id:
    /// the name slug, or a generated id when the slug is the old id or
    /// belongs to another node. Edges that referenced the old id are not
    /// moved and now dangle.
    pub fn convert_aspirational_to_skill(&mut self, id: &str, initial_proficiency: u8) -> Option<String> {
        let Some(index) = self
            .state
            .aspirational_skills
            .iter()
            .position(|s| s.id == id)
        else {
            warn!(id, "conversion of unknown aspirational skill ignored");
            return None;
        };
        let aspirational = self.state.aspirational_skills.remove(index);
        let slug = skill_id_from_name(&aspirational.name);
        let new_id = if slug == aspirational.id || self.state.contains_id(&slug) {
            generated_skill_id()
        } else {
            slug
        };
        let now = Utc::now();
        self.state.skills.push(Skill {
            id: new_id.clone(),
            name: aspirational.name,
            category: aspirational.category,
            proficiency: clamp_proficiency(initial_proficiency),
            description: aspirational.description,
            learning_goals: None,
            created_at: now,
            updated_at: now,
        });
        debug!(id, new_id = %new_id, initial_proficiency, "converted aspirational skill");
        self.persist();
        Some(new_id)
    }

    // ---- dependencies -----------------------------------------------------

    /// Add prerequisite edge `from -> to`.
    ///
    /// Fails with [`SgError::CircularDependency`] when the edge would close a
    /// cycle, leaving the state untouched. Returns `Ok(false)` when the
    /// ordered pair already exists.
    pub fn add_skill_dependency(
        &mut self,
        from: &str,
        to: &str,
        required_proficiency: Option<u8>,
        description: Option<String>,
    ) -> Result<bool> {
        if !self.insert_dependency(from, to, required_proficiency, description)? {
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    pub(crate) fn insert_dependency(
        &mut self,
        from: &str,
        to: &str,
        required_proficiency: Option<u8>,
        description: Option<String>,
    ) -> Result<bool> {
        if self.graph().would_create_cycle(from, to) {
            return Err(SgError::CircularDependency {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if self.state.dependency(from, to).is_some() {
            debug!(from, to, "dependency already exists");
            return Ok(false);
        }
        self.state.skill_dependencies.push(SkillDependency {
            required_proficiency: required_proficiency.map(clamp_proficiency),
            description,
            ..SkillDependency::new(from, to)
        });
        debug!(from, to, required = ?required_proficiency, "added dependency");
        Ok(true)
    }

    pub fn remove_skill_dependency(&mut self, from: &str, to: &str) -> bool {
        let before = self.state.skill_dependencies.len();
        self.state
            .skill_dependencies
            .retain(|dep| !dep.connects(from, to));
        if self.state.skill_dependencies.len() == before {
            warn!(from, to, "removal of unknown dependency ignored");
            return false;
        }
        debug!(from, to, "removed dependency");
        self.persist();
        true
    }

    /// Overwrite the fields of edge `from -> to` that `patch` sets.
    pub fn update_skill_dependency(&mut self, from: &str, to: &str, patch: DependencyUpdate) -> bool {
        let Some(dep) = self.state.dependency_mut(from, to) else {
            warn!(from, to, "update of unknown dependency ignored");
            return false;
        };
        if let Some(required) = patch.required_proficiency {
            dep.required_proficiency = Some(clamp_proficiency(required));
        }
        if let Some(description) = patch.description {
            dep.description = Some(description);
        }
        debug!(from, to, "updated dependency");
        self.persist();
        true
    }

    /// Drop every skill, aspirational skill and edge.
    pub fn clear_skills(&mut self) {
        self.state = ProfileState::new();
        debug!("cleared all skills");
        self.persist();
    }

    fn drop_edges_touching(&mut self, id: &str) -> usize {
        let before = self.state.skill_dependencies.len();
        self.state.skill_dependencies.retain(|dep| !dep.touches(id));
        before - self.state.skill_dependencies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::Priority;
    use crate::storage::MemoryStorage;

    fn store_with(ids: &[(&str, u8)]) -> (SkillStore, MemoryStorage) {
        let backend = MemoryStorage::new();
        let mut store = SkillStore::open(backend.clone());
        for (id, proficiency) in ids {
            store.add_skill(NewSkill::new(id.to_uppercase(), "Test", *proficiency).with_id(*id));
        }
        (store, backend)
    }

    fn edge_pairs(store: &SkillStore) -> Vec<(String, String)> {
        store
            .state()
            .skill_dependencies
            .iter()
            .map(|d| (d.from_skill_id.clone(), d.to_skill_id.clone()))
            .collect()
    }

    #[test]
    fn test_add_skill_slugs_name_and_rejects_duplicates() {
        let (mut store, _) = store_with(&[]);
        assert_eq!(
            store.add_skill(NewSkill::new("REST APIs", "Web", 4)),
            Some("rest-apis".to_string())
        );
        assert_eq!(store.add_skill(NewSkill::new("rest apis", "Web", 2)), None);
        assert_eq!(
            store.add_aspirational_skill(NewAspirationalSkill::new("REST APIs", "Web", Priority::High)),
            None
        );
        assert_eq!(store.state().skills.len(), 1);
    }

    #[test]
    fn test_add_skill_clamps_proficiency() {
        let (mut store, _) = store_with(&[]);
        store.add_skill(NewSkill::new("Go", "Programming", 99));
        assert_eq!(store.state().skill("go").unwrap().proficiency, 10);
    }

    #[test]
    fn test_cycle_rejected_without_state_change() {
        let (mut store, backend) = store_with(&[("a", 1), ("b", 1), ("c", 1)]);
        store.add_skill_dependency("a", "b", None, None).unwrap();
        store.add_skill_dependency("b", "c", None, None).unwrap();
        let saves = backend.save_count();

        assert!(store.graph().would_create_cycle("c", "a"));
        let err = store.add_skill_dependency("c", "a", Some(3), None).unwrap_err();
        assert!(matches!(err, SgError::CircularDependency { .. }));
        assert_eq!(
            err.to_string(),
            "Adding this dependency would create a circular dependency: c -> a"
        );
        assert_eq!(
            edge_pairs(&store),
            vec![("a".into(), "b".into()), ("b".into(), "c".into())]
        );
        assert_eq!(backend.save_count(), saves);
    }

    #[test]
    fn test_self_dependency_rejected() {
        let (mut store, _) = store_with(&[("a", 1)]);
        assert!(store.add_skill_dependency("a", "a", None, None).is_err());
        assert!(store.state().skill_dependencies.is_empty());
    }

    #[test]
    fn test_duplicate_dependency_is_noop() {
        let (mut store, backend) = store_with(&[("a", 1), ("b", 1)]);
        assert!(store.add_skill_dependency("a", "b", None, None).unwrap());
        let saves = backend.save_count();
        assert!(!store.add_skill_dependency("a", "b", Some(9), None).unwrap());
        assert_eq!(store.state().skill_dependencies.len(), 1);
        assert_eq!(store.state().skill_dependencies[0].required_proficiency, None);
        assert_eq!(backend.save_count(), saves);
    }

    #[test]
    fn test_remove_skill_cascades_edges() {
        let (mut store, _) = store_with(&[("a", 1), ("b", 1), ("c", 1)]);
        store.add_skill_dependency("a", "b", None, None).unwrap();
        store.add_skill_dependency("b", "c", None, None).unwrap();

        assert!(store.remove_skill("b"));
        assert!(store.state().skill_dependencies.is_empty());
        assert!(!store.remove_skill("b"));
    }

    #[test]
    fn test_threshold_update_unblocks_dependent() {
        let (mut store, _) = store_with(&[("a", 5), ("b", 0)]);
        store.add_skill_dependency("a", "b", Some(6), None).unwrap();
        assert!(!store.graph().is_available("b"));

        assert!(store.update_skill("a", SkillUpdate::proficiency(6)));
        assert!(store.graph().is_available("b"));
    }

    #[test]
    fn test_update_dependency_overwrites_given_fields() {
        let (mut store, _) = store_with(&[("a", 1), ("b", 1)]);
        store
            .add_skill_dependency("a", "b", Some(4), Some("basics".into()))
            .unwrap();

        let patch = DependencyUpdate {
            required_proficiency: Some(7),
            description: None,
        };
        assert!(store.update_skill_dependency("a", "b", patch));
        let dep = store.state().dependency("a", "b").unwrap();
        assert_eq!(dep.required_proficiency, Some(7));
        assert_eq!(dep.description.as_deref(), Some("basics"));

        assert!(!store.update_skill_dependency("b", "a", DependencyUpdate::default()));
    }

    #[test]
    fn test_remove_dependency() {
        let (mut store, _) = store_with(&[("a", 1), ("b", 1)]);
        store.add_skill_dependency("a", "b", None, None).unwrap();
        assert!(!store.remove_skill_dependency("b", "a"));
        assert!(store.remove_skill_dependency("a", "b"));
        assert!(store.state().skill_dependencies.is_empty());
    }

    #[test]
    fn test_convert_aspirational() {
        let (mut store, _) = store_with(&[("html", 8)]);
        let id = store
            .add_aspirational_skill(
                NewAspirationalSkill::new("Rust", "Programming", Priority::High).with_reason("speed"),
            )
            .unwrap();

        let new_id = store
            .convert_aspirational_to_skill(&id, DEFAULT_INITIAL_PROFICIENCY)
            .unwrap();
        assert_ne!(new_id, id);
        assert!(new_id.starts_with("skill-"));
        assert!(store.state().aspirational_skills.is_empty());
        let skill = store.state().skill(&new_id).unwrap();
        assert_eq!(skill.name, "Rust");
        assert_eq!(skill.category, "Programming");
        assert_eq!(skill.proficiency, 1);

        assert!(store.convert_aspirational_to_skill("missing", 3).is_none());
    }

    #[test]
    fn test_convert_uses_name_slug_when_free() {
        let (mut store, _) = store_with(&[]);
        store.add_aspirational_skill(
            NewAspirationalSkill::new("Go", "Programming", Priority::Low).with_id("golang-plan"),
        );
        assert_eq!(store.convert_aspirational_to_skill("golang-plan", 2).as_deref(), Some("go"));

        store.add_skill(NewSkill::new("Zig", "Programming", 1));
        store.add_aspirational_skill(
            NewAspirationalSkill::new("Zig", "Programming", Priority::Low).with_id("zig-plan"),
        );
        let new_id = store.convert_aspirational_to_skill("zig-plan", 2).unwrap();
        assert_ne!(new_id, "zig");
        assert_eq!(store.state().skills.len(), 3);
    }

    #[test]
    fn test_convert_leaves_old_edges_dangling() {
        let (mut store, _) = store_with(&[("html", 2)]);
        let id = store
            .add_aspirational_skill(NewAspirationalSkill::new("Rust", "Programming", Priority::High))
            .unwrap();
        store.add_skill_dependency("html", &id, Some(6), None).unwrap();

        let new_id = store.convert_aspirational_to_skill(&id, 1).unwrap();
        let edge = &store.state().skill_dependencies[0];
        assert_eq!(edge.to_skill_id, id);

        let graph = store.graph();
        assert!(graph.is_available(&new_id));
        let path: Vec<&str> = graph.learning_path(&new_id).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(path, vec![new_id.as_str()]);
    }

    #[test]
    fn test_remove_aspirational_cascades_edges() {
        let (mut store, _) = store_with(&[("a", 1)]);
        store.add_aspirational_skill(NewAspirationalSkill::new("B", "Test", Priority::Low).with_id("b"));
        store.add_skill_dependency("a", "b", None, None).unwrap();
        assert!(store.remove_aspirational_skill("b"));
        assert!(store.state().skill_dependencies.is_empty());
    }

    #[test]
    fn test_missing_ids_are_silent_noops() {
        let (mut store, backend) = store_with(&[]);
        assert!(!store.update_skill("x", SkillUpdate::proficiency(3)));
        assert!(!store.update_aspirational_skill("x", AspirationalUpdate::default()));
        assert!(!store.remove_aspirational_skill("x"));
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn test_persistence_failure_keeps_mutation() {
        let backend = MemoryStorage::failing();
        let mut store = SkillStore::open(backend.clone());
        assert!(store.state().is_empty());

        assert!(store.add_skill(NewSkill::new("Git", "Tools", 3)).is_some());
        assert_eq!(store.state().skills.len(), 1);
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn test_reopen_restores_state() {
        let (mut store, backend) = store_with(&[("a", 2), ("b", 3)]);
        store.add_skill_dependency("a", "b", Some(2), None).unwrap();
        let reopened = SkillStore::open(backend);
        assert_eq!(reopened.state(), store.state());
    }

    #[test]
    fn test_clear_skills() {
        let (mut store, backend) = store_with(&[("a", 2), ("b", 3)]);
        store.add_skill_dependency("a", "b", None, None).unwrap();
        store.clear_skills();
        assert!(store.state().is_empty());
        assert!(backend.snapshot().unwrap().is_empty());
    }
}
