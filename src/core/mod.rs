//! Core skill types and graph logic

pub mod export;
pub mod filter;
pub mod graph;
pub mod skill;
pub mod state;

pub use export::{ExportFormat, GraphExport};
pub use filter::{SkillFilter, SkillStatus};
pub use graph::{CriticalSkill, GraphStats, SkillGraph, UnmetRequirement};
pub use skill::{
    AspirationalSkill, AspirationalUpdate, NewAspirationalSkill, NewSkill, Priority, Skill,
    SkillDependency, SkillNode, SkillUpdate,
};
pub use state::ProfileState;
