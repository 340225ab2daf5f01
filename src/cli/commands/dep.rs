//! sg dep - manage prerequisite edges.

use clap::{Args, Subcommand};
use colored::Colorize;

use super::{proficiency_arg, require_node};
use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::core::skill::SkillDependency;
use crate::error::{Result, SgError};
use crate::store::DependencyUpdate;

#[derive(Args, Debug)]
pub struct DepArgs {
    #[command(subcommand)]
    pub command: DepCommand,
}

#[derive(Subcommand, Debug)]
pub enum DepCommand {
    /// Make FROM a prerequisite of TO
    Add(DepAddArgs),
    /// Remove the edge FROM -> TO
    Remove(DepPairArgs),
    /// Change the threshold or description of an edge
    Update(DepUpdateArgs),
    /// List edges, optionally only those touching one skill
    List(DepListArgs),
}

#[derive(Args, Debug)]
pub struct DepAddArgs {
    /// Prerequisite skill id
    pub from: String,
    /// Dependent skill id
    pub to: String,

    /// Minimum proficiency of FROM before TO is available (default 1)
    #[arg(long, short = 'r', value_parser = proficiency_arg)]
    pub required: Option<u8>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DepPairArgs {
    pub from: String,
    pub to: String,
}

#[derive(Args, Debug)]
pub struct DepUpdateArgs {
    pub from: String,
    pub to: String,

    #[arg(long, short = 'r', value_parser = proficiency_arg)]
    pub required: Option<u8>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct DepListArgs {
    /// Only edges with this skill at either end
    #[arg(long)]
    pub skill: Option<String>,
}

pub fn run(ctx: &mut AppContext, args: &DepArgs) -> Result<()> {
    match &args.command {
        DepCommand::Add(add) => run_add(ctx, add),
        DepCommand::Remove(pair) => run_remove(ctx, pair),
        DepCommand::Update(update) => run_update(ctx, update),
        DepCommand::List(list) => run_list(ctx, list),
    }
}

fn run_add(ctx: &mut AppContext, args: &DepAddArgs) -> Result<()> {
    require_node(ctx, &args.from)?;
    require_node(ctx, &args.to)?;

    let added = ctx.store.add_skill_dependency(
        &args.from,
        &args.to,
        args.required,
        args.description.clone(),
    )?;

    if ctx.json {
        return emit_json(&serde_json::json!({
            "added": added,
            "dependency": ctx.store.state().dependency(&args.from, &args.to),
        }));
    }
    if added {
        println!("{} {} -> {}", "Added".green(), args.from.bold(), args.to.bold());
    } else {
        println!("{} -> {} already exists", args.from, args.to);
    }
    Ok(())
}

fn run_remove(ctx: &mut AppContext, args: &DepPairArgs) -> Result<()> {
    if !ctx.store.remove_skill_dependency(&args.from, &args.to) {
        return Err(SgError::DependencyNotFound {
            from: args.from.clone(),
            to: args.to.clone(),
        });
    }
    if ctx.json {
        emit_json(&serde_json::json!({ "removed": { "from": args.from, "to": args.to } }))
    } else {
        println!("{} {} -> {}", "Removed".green(), args.from.bold(), args.to.bold());
        Ok(())
    }
}

fn run_update(ctx: &mut AppContext, args: &DepUpdateArgs) -> Result<()> {
    let patch = DependencyUpdate {
        required_proficiency: args.required,
        description: args.description.clone(),
    };
    if !ctx.store.update_skill_dependency(&args.from, &args.to, patch) {
        return Err(SgError::DependencyNotFound {
            from: args.from.clone(),
            to: args.to.clone(),
        });
    }
    if ctx.json {
        emit_json(&ctx.store.state().dependency(&args.from, &args.to))
    } else {
        println!("{} {} -> {}", "Updated".green(), args.from.bold(), args.to.bold());
        Ok(())
    }
}

fn run_list(ctx: &AppContext, args: &DepListArgs) -> Result<()> {
    let graph = ctx.store.graph();
    let deps: Vec<&SkillDependency> = match &args.skill {
        Some(id) => graph.dependencies_touching(id),
        None => ctx.store.state().skill_dependencies.iter().collect(),
    };

    if ctx.json {
        return emit_json(&deps);
    }
    if deps.is_empty() {
        println!("No dependencies.");
        return Ok(());
    }
    for dep in deps {
        let mark = if graph.is_satisfied(dep) {
            "ok".green()
        } else {
            "unmet".red()
        };
        let mut line = format!(
            "{mark:>5}  {} -> {} (needs {})",
            dep.from_skill_id.bold(),
            dep.to_skill_id.bold(),
            dep.threshold()
        );
        if let Some(description) = &dep.description {
            line.push_str(": ");
            line.push_str(description);
        }
        println!("{line}");
    }
    Ok(())
}
