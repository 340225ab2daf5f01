//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::{Result, SgError};

pub mod aspire;
pub mod dep;
pub mod graph;
pub mod pool;
pub mod skill;

/// Dispatch a command to its handler
pub fn run(ctx: &mut AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Skill(args) => skill::run(ctx, args),
        Commands::Aspire(args) => aspire::run(ctx, args),
        Commands::Dep(args) => dep::run(ctx, args),
        Commands::Graph(args) => graph::run(ctx, args),
        Commands::Pool(args) => pool::run(ctx, args),
    }
}

/// Fail with [`SgError::SkillNotFound`] unless `id` names a skill or aspirational skill.
pub(crate) fn require_node(ctx: &AppContext, id: &str) -> Result<()> {
    if ctx.store.state().contains_id(id) {
        Ok(())
    } else {
        Err(SgError::SkillNotFound(id.to_string()))
    }
}

pub(crate) fn proficiency_arg(value: &str) -> std::result::Result<u8, String> {
    let parsed: u8 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a proficiency between 0 and 10"))?;
    if parsed > crate::core::skill::MAX_PROFICIENCY {
        return Err(format!("proficiency must be between 0 and 10, got {parsed}"));
    }
    Ok(parsed)
}
