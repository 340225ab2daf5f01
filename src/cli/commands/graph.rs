//! sg graph - dependency graph queries.

use clap::{Args, Subcommand};
use colored::Colorize;

use super::require_node;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::core::export::{ExportFormat, GraphExport};
use crate::core::skill::Skill;
use crate::error::{Result, SgError};

#[derive(Args, Debug)]
pub struct GraphArgs {
    #[command(subcommand)]
    pub command: GraphCommand,
}

#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Skills whose prerequisites are all met
    Available,
    /// Skills with at least one unmet prerequisite
    Blocked,
    /// Ordered prerequisite chain for a skill
    Path(GraphPathArgs),
    /// Skills grouped by dependency level
    Levels,
    /// Skills that the most other skills depend on
    Critical(GraphCriticalArgs),
    /// Summary counts
    Stats,
    /// Export the graph for visualisation
    Export(GraphExportArgs),
    /// Check whether FROM -> TO could be added without a cycle
    Check(GraphCheckArgs),
}

#[derive(Args, Debug)]
pub struct GraphPathArgs {
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct GraphCriticalArgs {
    /// Max items to display (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct GraphExportArgs {
    /// Output format: json, dot, mermaid
    #[arg(long, default_value = "json")]
    pub format: ExportFormat,
}

#[derive(Args, Debug)]
pub struct GraphCheckArgs {
    pub from: String,
    pub to: String,
}

pub fn run(ctx: &mut AppContext, args: &GraphArgs) -> Result<()> {
    match &args.command {
        GraphCommand::Available => run_available(ctx),
        GraphCommand::Blocked => run_blocked(ctx),
        GraphCommand::Path(path) => run_path(ctx, path),
        GraphCommand::Levels => run_levels(ctx),
        GraphCommand::Critical(critical) => run_critical(ctx, critical),
        GraphCommand::Stats => run_stats(ctx),
        GraphCommand::Export(export) => run_export(ctx, export),
        GraphCommand::Check(check) => run_check(ctx, check),
    }
}

fn print_skills(skills: &[&Skill], empty: &str) {
    if skills.is_empty() {
        println!("{empty}");
    }
    for skill in skills {
        println!(
            "{} ({}) [{}] {}/10",
            skill.name.bold(),
            skill.id,
            skill.category,
            skill.proficiency
        );
    }
}

fn run_available(ctx: &AppContext) -> Result<()> {
    let skills = ctx.store.graph().available_skills();
    if ctx.json {
        return emit_json(&skills);
    }
    print_skills(&skills, "No available skills.");
    Ok(())
}

fn run_blocked(ctx: &AppContext) -> Result<()> {
    let graph = ctx.store.graph();
    let skills = graph.blocked_skills();
    if ctx.json {
        return emit_json(&skills);
    }
    if skills.is_empty() {
        println!("No blocked skills.");
    }
    for skill in skills {
        let reasons: Vec<String> = graph
            .unmet_requirements(&skill.id)
            .iter()
            .map(|unmet| match unmet.current_proficiency {
                Some(current) => format!(
                    "{} {current}/{}",
                    unmet.prerequisite_id, unmet.required_proficiency
                ),
                None => format!("{} missing", unmet.prerequisite_id),
            })
            .collect();
        println!(
            "{} ({}) {} {}",
            skill.name.bold(),
            skill.id,
            "needs".red(),
            reasons.join(", ")
        );
    }
    Ok(())
}

fn run_path(ctx: &AppContext, args: &GraphPathArgs) -> Result<()> {
    require_node(ctx, &args.id)?;
    let path = ctx.store.graph().learning_path(&args.id);
    if ctx.json {
        return emit_json(&path);
    }
    for (step, skill) in path.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) {}/10",
            step + 1,
            skill.name.bold(),
            skill.id,
            skill.proficiency
        );
    }
    if path.is_empty() {
        println!("{} is not a skill yet; nothing to learn first.", args.id);
    }
    Ok(())
}

fn run_levels(ctx: &AppContext) -> Result<()> {
    let grouped = ctx.store.graph().levels_by_depth();
    if ctx.json {
        let payload: Vec<_> = grouped
            .iter()
            .map(|(level, skills)| {
                serde_json::json!({
                    "level": level,
                    "skills": skills.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        return emit_json(&payload);
    }

    let mut layout = HumanLayout::new();
    for (level, skills) in &grouped {
        layout.section(&format!("Level {level}"));
        for skill in skills {
            layout.bullet(&format!("{} ({})", skill.name, skill.id));
        }
        layout.blank();
    }
    if grouped.is_empty() {
        layout.push_line("No skills.");
    }
    emit_human(layout);
    Ok(())
}

fn run_critical(ctx: &AppContext, args: &GraphCriticalArgs) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.graph.critical_limit);
    let ranked = ctx.store.graph().critical_skills(limit);
    if ctx.json {
        let payload: Vec<_> = ranked
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.skill.id,
                    "name": c.skill.name,
                    "dependents": c.dependents,
                })
            })
            .collect();
        return emit_json(&payload);
    }
    for (rank, critical) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) unlocks {}",
            rank + 1,
            critical.skill.name.bold(),
            critical.skill.id,
            critical.dependents
        );
    }
    Ok(())
}

fn run_stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.store.graph().stats(ctx.config.graph.learned_threshold);
    if ctx.json {
        return emit_json(&serde_json::json!({
            "storage": ctx.store.backend().describe(),
            "stats": stats,
        }));
    }
    let mut layout = HumanLayout::new();
    layout
        .title("Skill graph")
        .kv("Storage", &ctx.store.backend().describe())
        .kv("Skills", &stats.skills.to_string())
        .kv("Aspirational", &stats.aspirational.to_string())
        .kv("Dependencies", &stats.dependencies.to_string())
        .kv("Learned", &stats.learned.to_string())
        .kv("Available", &stats.available.to_string())
        .kv("Blocked", &stats.blocked.to_string())
        .kv("Max level", &stats.max_level.to_string());
    emit_human(layout);
    Ok(())
}

fn run_export(ctx: &AppContext, args: &GraphExportArgs) -> Result<()> {
    let export = GraphExport::build(ctx.store.state(), ctx.config.graph.learned_threshold);
    println!("{}", export.render(args.format)?);
    Ok(())
}

fn run_check(ctx: &AppContext, args: &GraphCheckArgs) -> Result<()> {
    require_node(ctx, &args.from)?;
    require_node(ctx, &args.to)?;
    let cycle = ctx.store.graph().would_create_cycle(&args.from, &args.to);
    if ctx.json {
        return emit_json(&serde_json::json!({
            "from": args.from,
            "to": args.to,
            "wouldCreateCycle": cycle,
        }));
    }
    if cycle {
        println!(
            "{}",
            SgError::CircularDependency {
                from: args.from.clone(),
                to: args.to.clone(),
            }
            .to_string()
            .red()
        );
    } else {
        println!("{} {} -> {} can be added", "ok".green(), args.from, args.to);
    }
    Ok(())
}
