use std::path::PathBuf;

use chrono::Utc;
use tempfile::TempDir;

use crate::core::skill::{AspirationalSkill, Priority, Skill, SkillDependency};
use crate::core::state::ProfileState;

/// Builds a [`ProfileState`] directly, bypassing store validation.
///
/// Useful for graphs the store would refuse, such as cycles or edges that
/// point at ids that do not exist.
#[derive(Debug, Default)]
pub struct StateBuilder {
    state: ProfileState,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skill(self, id: &str, proficiency: u8) -> Self {
        self.skill_in(id, proficiency, "Test")
    }

    pub fn skill_in(mut self, id: &str, proficiency: u8, category: &str) -> Self {
        let now = Utc::now();
        self.state.skills.push(Skill {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: category.to_string(),
            proficiency,
            description: None,
            learning_goals: None,
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn skills(mut self, ids: &[&str], proficiency: u8) -> Self {
        for id in ids {
            self = self.skill(id, proficiency);
        }
        self
    }

    pub fn aspirational(self, id: &str) -> Self {
        self.aspirational_in(id, "Test")
    }

    pub fn aspirational_in(mut self, id: &str, category: &str) -> Self {
        let now = Utc::now();
        self.state.aspirational_skills.push(AspirationalSkill {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: category.to_string(),
            priority: Priority::Medium,
            description: None,
            reason: None,
            target_proficiency: None,
            target_date: None,
            resources: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn edge(mut self, from: &str, to: &str) -> Self {
        self.state
            .skill_dependencies
            .push(SkillDependency::new(from, to));
        self
    }

    pub fn edge_with(mut self, from: &str, to: &str, required: u8) -> Self {
        self.state.skill_dependencies.push(SkillDependency {
            required_proficiency: Some(required),
            ..SkillDependency::new(from, to)
        });
        self
    }

    pub fn build(self) -> ProfileState {
        self.state
    }
}

/// Test fixture providing an isolated data directory.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {:?}", data_path);

        Self { temp_dir, data_path }
    }

    /// Path inside the fixture directory; parents are created.
    pub fn path(&self, relative_path: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        full_path
    }

    /// Create a file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative_path);
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}
