//! sg pool - bulk imports, curated pools and demo data.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::{Result, SgError};
use crate::pool::{DemoSet, ImportFormat, PoolSource, select_items};

#[derive(Args, Debug)]
pub struct PoolArgs {
    #[command(subcommand)]
    pub command: PoolCommand,
}

#[derive(Subcommand, Debug)]
pub enum PoolCommand {
    /// Import skills from a .json array or .csv file with a header row
    Import(PoolImportArgs),
    /// Add skills from a curated pool (linkedin, github, job-market)
    Fetch(PoolFetchArgs),
    /// Load a built-in demo profile
    Demo(PoolDemoArgs),
    /// Show the curated pools and demo profiles
    List,
    /// Remove every skill, aspirational skill and dependency
    Clear(PoolClearArgs),
}

#[derive(Args, Debug)]
pub struct PoolImportArgs {
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct PoolFetchArgs {
    /// linkedin, github or job-market
    pub source: PoolSource,

    /// `all`, or comma-separated positions as shown by `sg pool list`
    #[arg(long, default_value = "all")]
    pub pick: String,
}

#[derive(Args, Debug)]
pub struct PoolDemoArgs {
    /// starter, intermediate, advanced, senior, expert or master (or 10..45)
    pub set: DemoSet,
}

#[derive(Args, Debug)]
pub struct PoolClearArgs {
    /// Confirm that everything should be deleted
    #[arg(long)]
    pub yes: bool,
}

pub fn run(ctx: &mut AppContext, args: &PoolArgs) -> Result<()> {
    match &args.command {
        PoolCommand::Import(import) => run_import(ctx, import),
        PoolCommand::Fetch(fetch) => run_fetch(ctx, fetch),
        PoolCommand::Demo(demo) => run_demo(ctx, demo),
        PoolCommand::List => run_list(ctx),
        PoolCommand::Clear(clear) => run_clear(ctx, clear),
    }
}

fn run_import(ctx: &mut AppContext, args: &PoolImportArgs) -> Result<()> {
    let format = ImportFormat::from_path(&args.file)?;
    let text = std::fs::read_to_string(&args.file)?;
    let items = format.parse(&text)?;
    let added = ctx.store.add_from_pool(&items, format.source_label());
    report_added(ctx, added, items.len())
}

fn run_fetch(ctx: &mut AppContext, args: &PoolFetchArgs) -> Result<()> {
    let items = select_items(&args.source.skills(), &args.pick);
    if items.is_empty() {
        return Err(SgError::InvalidInput(format!(
            "no valid skills selected by '{}'",
            args.pick
        )));
    }
    let added = ctx.store.add_from_pool(&items, args.source.label());
    report_added(ctx, added, items.len())
}

fn run_list(ctx: &AppContext) -> Result<()> {
    if ctx.json {
        let sources: Vec<_> = PoolSource::ALL
            .iter()
            .map(|source| {
                let names: Vec<String> = source.skills().into_iter().map(|item| item.name).collect();
                serde_json::json!({
                    "name": source.label(),
                    "description": source.description(),
                    "skills": names,
                })
            })
            .collect();
        let demos: Vec<_> = DemoSet::ALL
            .iter()
            .map(|set| {
                serde_json::json!({
                    "name": set.label(),
                    "skills": set.skill_count(),
                    "dependencies": set.dependencies().len(),
                })
            })
            .collect();
        return emit_json(&serde_json::json!({ "sources": sources, "demos": demos }));
    }

    for source in PoolSource::ALL {
        println!("{} - {}", source.label().bold(), source.description());
        for (position, item) in source.skills().iter().enumerate() {
            println!("  {:>2}. {} ({})", position + 1, item.name, item.category);
        }
        println!();
    }
    println!("{}", "Demo profiles".bold());
    for set in DemoSet::ALL {
        println!("  {} ({} dependencies)", set.label(), set.dependencies().len());
    }
    Ok(())
}

fn run_demo(ctx: &mut AppContext, args: &PoolDemoArgs) -> Result<()> {
    let offered = args.set.skills().len();
    let added = ctx.store.load_demo(args.set);
    report_added(ctx, added, offered)
}

fn report_added(ctx: &AppContext, added: usize, offered: usize) -> Result<()> {
    if ctx.json {
        return emit_json(&serde_json::json!({
            "added": added,
            "skipped": offered - added,
        }));
    }
    if added == 0 {
        println!("No new skills were added (all of them already exist)");
    } else {
        println!("{} {added} of {offered} skills", "Added".green());
    }
    Ok(())
}

fn run_clear(ctx: &mut AppContext, args: &PoolClearArgs) -> Result<()> {
    if !args.yes {
        return Err(SgError::InvalidInput(
            "refusing to clear all skills without --yes".to_string(),
        ));
    }
    ctx.store.clear_skills();
    if ctx.json {
        emit_json(&serde_json::json!({ "cleared": true }))
    } else {
        println!("{} all skills", "Cleared".green());
        Ok(())
    }
}
