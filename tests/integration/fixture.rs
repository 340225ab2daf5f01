use skillgraph::core::skill::{NewAspirationalSkill, NewSkill, Priority};
use skillgraph::storage::MemoryStorage;
use skillgraph::store::SkillStore;

/// A store over in-memory storage, with a handle to inspect writes.
pub struct StoreFixture {
    pub store: SkillStore,
    pub backend: MemoryStorage,
}

impl StoreFixture {
    pub fn new() -> Self {
        let backend = MemoryStorage::new();
        let store = SkillStore::open(backend.clone());
        Self { store, backend }
    }

    /// Add skills whose ids and names are the given strings.
    pub fn with_skills(mut self, skills: &[(&str, u8)]) -> Self {
        for (id, proficiency) in skills {
            self.store
                .add_skill(NewSkill::new(*id, "Test", *proficiency).with_id(*id))
                .expect("fresh id");
        }
        self
    }

    pub fn with_aspirational(mut self, id: &str) -> Self {
        self.store
            .add_aspirational_skill(NewAspirationalSkill::new(id, "Test", Priority::Medium).with_id(id))
            .expect("fresh id");
        self
    }

    pub fn with_edges(mut self, edges: &[(&str, &str)]) -> Self {
        for (from, to) in edges {
            self.store
                .add_skill_dependency(from, to, None, None)
                .expect("acyclic edge");
        }
        self
    }

    pub fn edges(&self) -> Vec<(String, String)> {
        self.store
            .state()
            .skill_dependencies
            .iter()
            .map(|d| (d.from_skill_id.clone(), d.to_skill_id.clone()))
            .collect()
    }
}

pub fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}
