//! sg skill - manage skills.

use clap::{Args, Subcommand};
use colored::Colorize;

use super::{proficiency_arg, require_node};
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, node_line, status_label};
use crate::core::filter::{SkillFilter, SkillStatus, available_categories, classify};
use crate::core::skill::{NewSkill, SkillNode, SkillUpdate};
use crate::error::{Result, SgError};

#[derive(Args, Debug)]
pub struct SkillArgs {
    #[command(subcommand)]
    pub command: SkillCommand,
}

#[derive(Subcommand, Debug)]
pub enum SkillCommand {
    /// Add a skill
    Add(SkillAddArgs),
    /// Change fields of a skill
    Update(SkillUpdateArgs),
    /// Remove a skill and every edge that references it
    Remove(SkillRemoveArgs),
    /// List skills and aspirational skills
    List(SkillListArgs),
    /// Show one skill with its prerequisites and learning path
    Show(SkillShowArgs),
}

#[derive(Args, Debug)]
pub struct SkillAddArgs {
    /// Display name; the id is derived from it unless --id is given
    pub name: String,

    #[arg(long, short = 'c', default_value = "Other")]
    pub category: String,

    /// Current proficiency (0-10)
    #[arg(long, short = 'p', default_value = "0", value_parser = proficiency_arg)]
    pub proficiency: u8,

    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub goals: Option<String>,
}

#[derive(Args, Debug)]
pub struct SkillUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long, short = 'p', value_parser = proficiency_arg)]
    pub proficiency: Option<u8>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub goals: Option<String>,
}

#[derive(Args, Debug)]
pub struct SkillRemoveArgs {
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct SkillListArgs {
    /// Case-insensitive name search
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// learned, available, blocked or aspirational
    #[arg(long, short = 's')]
    pub status: Option<SkillStatus>,

    /// Print the categories in use instead of the skills
    #[arg(long, conflicts_with_all = ["query", "category", "status"])]
    pub categories: bool,
}

#[derive(Args, Debug)]
pub struct SkillShowArgs {
    pub id: String,

    /// Also list the nodes that could be linked to this one without a cycle
    #[arg(long)]
    pub candidates: bool,
}

pub fn run(ctx: &mut AppContext, args: &SkillArgs) -> Result<()> {
    match &args.command {
        SkillCommand::Add(add) => run_add(ctx, add),
        SkillCommand::Update(update) => run_update(ctx, update),
        SkillCommand::Remove(remove) => run_remove(ctx, remove),
        SkillCommand::List(list) => run_list(ctx, list),
        SkillCommand::Show(show) => run_show(ctx, show),
    }
}

fn run_add(ctx: &mut AppContext, args: &SkillAddArgs) -> Result<()> {
    let input = NewSkill {
        id: args.id.clone(),
        name: args.name.clone(),
        category: args.category.clone(),
        proficiency: args.proficiency,
        description: args.description.clone(),
        learning_goals: args.goals.clone(),
    };
    let id = ctx.store.add_skill(input).ok_or_else(|| {
        SgError::InvalidInput(format!("a skill named '{}' already exists", args.name))
    })?;

    if ctx.json {
        emit_json(&ctx.store.state().skill(&id))
    } else {
        println!("{} skill {}", "Added".green(), id.bold());
        Ok(())
    }
}

fn run_update(ctx: &mut AppContext, args: &SkillUpdateArgs) -> Result<()> {
    let patch = SkillUpdate {
        name: args.name.clone(),
        category: args.category.clone(),
        proficiency: args.proficiency,
        description: args.description.clone(),
        learning_goals: args.goals.clone(),
    };
    if !ctx.store.update_skill(&args.id, patch) {
        return Err(SgError::SkillNotFound(args.id.clone()));
    }

    if ctx.json {
        emit_json(&ctx.store.state().skill(&args.id))
    } else {
        println!("{} skill {}", "Updated".green(), args.id.bold());
        Ok(())
    }
}

fn run_remove(ctx: &mut AppContext, args: &SkillRemoveArgs) -> Result<()> {
    let edges = ctx.store.graph().dependencies_touching(&args.id).len();
    if !ctx.store.remove_skill(&args.id) {
        return Err(SgError::SkillNotFound(args.id.clone()));
    }

    if ctx.json {
        emit_json(&serde_json::json!({
            "removed": args.id,
            "removedDependencies": edges,
        }))
    } else {
        println!(
            "{} skill {} and {edges} dependenc{}",
            "Removed".green(),
            args.id.bold(),
            if edges == 1 { "y" } else { "ies" }
        );
        Ok(())
    }
}

fn run_list(ctx: &mut AppContext, args: &SkillListArgs) -> Result<()> {
    if args.categories {
        let categories = available_categories(ctx.store.state());
        if ctx.json {
            return emit_json(&categories);
        }
        for category in categories {
            println!("{category}");
        }
        return Ok(());
    }

    let threshold = ctx.config.graph.learned_threshold;
    let mut filter = SkillFilter::new().learned_threshold(threshold);
    if let Some(query) = &args.query {
        filter = filter.query(query.clone());
    }
    if let Some(category) = &args.category {
        filter = filter.category(category.clone());
    }
    if let Some(status) = args.status {
        filter = filter.status(status);
    }

    let state = ctx.store.state();
    let graph = ctx.store.graph();
    let nodes = filter.apply(state);

    if ctx.json {
        let items: Vec<_> = nodes
            .iter()
            .map(|node| {
                serde_json::json!({
                    "id": node.id(),
                    "name": node.name(),
                    "category": node.category(),
                    "proficiency": node.proficiency(),
                    "status": classify(&graph, *node, threshold),
                })
            })
            .collect();
        return emit_json(&items);
    }

    if nodes.is_empty() {
        println!("No skills match.");
        return Ok(());
    }
    for node in nodes {
        println!(
            "{:>12}  {}",
            status_label(classify(&graph, node, threshold)),
            node_line(node)
        );
    }
    Ok(())
}

fn run_show(ctx: &mut AppContext, args: &SkillShowArgs) -> Result<()> {
    require_node(ctx, &args.id)?;
    let threshold = ctx.config.graph.learned_threshold;
    let state = ctx.store.state();
    let graph = ctx.store.graph();
    let Some(node) = state.node(&args.id) else {
        return Err(SgError::SkillNotFound(args.id.clone()));
    };

    let status = classify(&graph, node, threshold);
    let level = graph.dependency_level(&args.id);
    let prerequisites = graph.prerequisites(&args.id);
    let unlocks = graph.unlocks(&args.id);
    let unmet = graph.unmet_requirements(&args.id);
    let path = graph.learning_path(&args.id);
    let prerequisite_candidates = graph.prerequisite_candidates(&args.id);
    let dependent_candidates = graph.dependent_candidates(&args.id);

    if ctx.json {
        let node_value = match node {
            SkillNode::Skill(skill) => serde_json::to_value(skill)?,
            SkillNode::Aspirational(aspirational) => serde_json::to_value(aspirational)?,
        };
        let unmet_value: Vec<_> = unmet
            .iter()
            .map(|u| {
                serde_json::json!({
                    "prerequisiteId": u.prerequisite_id,
                    "requiredProficiency": u.required_proficiency,
                    "currentProficiency": u.current_proficiency,
                })
            })
            .collect();
        let mut payload = serde_json::json!({
            "node": node_value,
            "status": status,
            "level": level,
            "prerequisites": node_ids(&prerequisites),
            "unlocks": node_ids(&unlocks),
            "unmetRequirements": unmet_value,
            "learningPath": path.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        });
        if args.candidates {
            payload["prerequisiteCandidates"] = serde_json::json!(prerequisite_candidates
                .iter()
                .map(|s| s.id.as_str())
                .collect::<Vec<_>>());
            payload["dependentCandidates"] = serde_json::json!(node_ids(&dependent_candidates));
        }
        return emit_json(&payload);
    }

    let mut layout = HumanLayout::new();
    layout
        .title(node.name())
        .kv("Id", node.id())
        .kv("Category", node.category())
        .kv("Status", &status_label(status).to_string())
        .kv("Level", &level.to_string());
    if let Some(proficiency) = node.proficiency() {
        layout.kv("Proficiency", &format!("{proficiency}/10"));
    }
    if let SkillNode::Skill(skill) = node {
        if let Some(description) = &skill.description {
            layout.kv("Description", description);
        }
        if let Some(goals) = &skill.learning_goals {
            layout.kv("Goals", goals);
        }
    }

    layout.blank().section("Prerequisites");
    if prerequisites.is_empty() {
        layout.push_line("none");
    }
    for prerequisite in &prerequisites {
        layout.bullet(&node_line(*prerequisite));
    }
    for requirement in &unmet {
        let current = requirement
            .current_proficiency
            .map_or_else(|| "missing".to_string(), |p| format!("{p}/10"));
        layout.bullet(&format!(
            "{} needs {} at {} (currently {current})",
            "blocked:".red(),
            requirement.prerequisite_id,
            requirement.required_proficiency
        ));
    }

    layout.blank().section("Unlocks");
    if unlocks.is_empty() {
        layout.push_line("none");
    }
    for unlocked in &unlocks {
        layout.bullet(&node_line(*unlocked));
    }

    layout.blank().section("Learning path");
    let steps: Vec<&str> = path.iter().map(|s| s.name.as_str()).collect();
    layout.push_line(if steps.is_empty() {
        "none".to_string()
    } else {
        steps.join(" -> ")
    });

    if args.candidates {
        layout.blank().section("Can be a prerequisite");
        let names: Vec<&str> = prerequisite_candidates.iter().map(|s| s.id.as_str()).collect();
        layout.push_line(if names.is_empty() { "none".to_string() } else { names.join(", ") });

        layout.blank().section("Can depend on it");
        let names = node_ids(&dependent_candidates);
        layout.push_line(if names.is_empty() { "none".to_string() } else { names.join(", ") });
    }

    emit_human(layout);
    Ok(())
}

fn node_ids<'a>(nodes: &[SkillNode<'a>]) -> Vec<&'a str> {
    nodes.iter().map(SkillNode::id).collect()
}
