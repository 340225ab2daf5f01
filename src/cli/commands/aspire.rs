//! sg aspire - manage aspirational skills.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::proficiency_arg;
use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::core::skill::{AspirationalUpdate, NewAspirationalSkill, Priority};
use crate::error::{Result, SgError};

#[derive(Args, Debug)]
pub struct AspireArgs {
    #[command(subcommand)]
    pub command: AspireCommand,
}

#[derive(Subcommand, Debug)]
pub enum AspireCommand {
    /// Add a skill you want to learn
    Add(AspireAddArgs),
    /// Change fields of an aspirational skill
    Update(AspireUpdateArgs),
    /// Remove an aspirational skill and its edges
    Remove(AspireIdArgs),
    /// List aspirational skills, highest priority first
    List,
    /// Start learning: turn an aspirational skill into a skill
    Convert(AspireConvertArgs),
}

#[derive(Args, Debug)]
pub struct AspireAddArgs {
    pub name: String,

    #[arg(long, short = 'c', default_value = "Other")]
    pub category: String,

    /// low, medium or high
    #[arg(long, default_value = "medium")]
    pub priority: Priority,

    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Why you want to learn it
    #[arg(long)]
    pub reason: Option<String>,

    #[arg(long, value_parser = proficiency_arg)]
    pub target_proficiency: Option<u8>,

    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub target_date: Option<NaiveDate>,

    /// Learning resource (repeatable)
    #[arg(long = "resource")]
    pub resources: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AspireUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub reason: Option<String>,

    #[arg(long, value_parser = proficiency_arg)]
    pub target_proficiency: Option<u8>,

    #[arg(long)]
    pub target_date: Option<NaiveDate>,

    /// Replace the resource list (repeatable)
    #[arg(long = "resource")]
    pub resources: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AspireIdArgs {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct AspireConvertArgs {
    pub id: String,

    /// Starting proficiency (defaults to the configured value)
    #[arg(long, short = 'p', value_parser = proficiency_arg)]
    pub proficiency: Option<u8>,
}

pub fn run(ctx: &mut AppContext, args: &AspireArgs) -> Result<()> {
    match &args.command {
        AspireCommand::Add(add) => run_add(ctx, add),
        AspireCommand::Update(update) => run_update(ctx, update),
        AspireCommand::Remove(remove) => run_remove(ctx, remove),
        AspireCommand::List => run_list(ctx),
        AspireCommand::Convert(convert) => run_convert(ctx, convert),
    }
}

fn run_add(ctx: &mut AppContext, args: &AspireAddArgs) -> Result<()> {
    let input = NewAspirationalSkill {
        id: args.id.clone(),
        name: args.name.clone(),
        category: args.category.clone(),
        priority: args.priority,
        description: args.description.clone(),
        reason: args.reason.clone(),
        target_proficiency: args.target_proficiency,
        target_date: args.target_date,
        resources: args.resources.clone(),
    };
    let id = ctx.store.add_aspirational_skill(input).ok_or_else(|| {
        SgError::InvalidInput(format!("a skill named '{}' already exists", args.name))
    })?;

    if ctx.json {
        emit_json(&ctx.store.state().aspirational(&id))
    } else {
        println!("{} aspirational skill {}", "Added".green(), id.bold());
        Ok(())
    }
}

fn run_update(ctx: &mut AppContext, args: &AspireUpdateArgs) -> Result<()> {
    let patch = AspirationalUpdate {
        name: args.name.clone(),
        category: args.category.clone(),
        priority: args.priority,
        description: args.description.clone(),
        reason: args.reason.clone(),
        target_proficiency: args.target_proficiency,
        target_date: args.target_date,
        resources: (!args.resources.is_empty()).then(|| args.resources.clone()),
    };
    if !ctx.store.update_aspirational_skill(&args.id, patch) {
        return Err(SgError::SkillNotFound(args.id.clone()));
    }

    if ctx.json {
        emit_json(&ctx.store.state().aspirational(&args.id))
    } else {
        println!("{} aspirational skill {}", "Updated".green(), args.id.bold());
        Ok(())
    }
}

fn run_remove(ctx: &mut AppContext, args: &AspireIdArgs) -> Result<()> {
    if !ctx.store.remove_aspirational_skill(&args.id) {
        return Err(SgError::SkillNotFound(args.id.clone()));
    }
    if ctx.json {
        emit_json(&serde_json::json!({ "removed": args.id }))
    } else {
        println!("{} aspirational skill {}", "Removed".green(), args.id.bold());
        Ok(())
    }
}

fn run_list(ctx: &AppContext) -> Result<()> {
    let mut items: Vec<_> = ctx.store.state().aspirational_skills.iter().collect();
    items.sort_by(|a, b| b.priority.cmp(&a.priority));

    if ctx.json {
        return emit_json(&items);
    }
    if items.is_empty() {
        println!("No aspirational skills.");
        return Ok(());
    }
    for item in items {
        let priority = match item.priority {
            Priority::High => item.priority.to_string().red(),
            Priority::Medium => item.priority.to_string().yellow(),
            Priority::Low => item.priority.to_string().dimmed(),
        };
        let mut line = format!("{priority:>6}  {} ({}) [{}]", item.name.bold(), item.id, item.category);
        if let Some(date) = item.target_date {
            line.push_str(&format!(" by {date}"));
        }
        if let Some(reason) = &item.reason {
            line.push_str(&format!(" - {reason}"));
        }
        println!("{line}");
    }
    Ok(())
}

fn run_convert(ctx: &mut AppContext, args: &AspireConvertArgs) -> Result<()> {
    let proficiency = args
        .proficiency
        .unwrap_or(ctx.config.convert.initial_proficiency);
    let new_id = ctx
        .store
        .convert_aspirational_to_skill(&args.id, proficiency)
        .ok_or_else(|| SgError::SkillNotFound(args.id.clone()))?;

    if ctx.json {
        emit_json(&ctx.store.state().skill(&new_id))
    } else {
        println!(
            "{} {} into skill {} at proficiency {proficiency}",
            "Converted".green(),
            args.id,
            new_id.bold()
        );
        let dangling = ctx.store.graph().dependencies_touching(&args.id).len();
        if dangling > 0 {
            println!("  {dangling} dependencies still reference {}", args.id);
        }
        Ok(())
    }
}
