//! Command-line interface for kbase.
//!
//! Provides commands for showing a topic, listing topics, printing the
//! navigation outline, checking a dataset, and inspecting configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::loader::{self, LoadedDataset};
use crate::store::{ContentStore, DetailView};

pub mod render;

/// kbase - Knowledge topics, looked up by id
#[derive(Parser, Debug)]
#[command(name = "kbase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the data files
    #[arg(long, global = true, env = "KBASE_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a topic
    Show {
        /// Topic ID
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List topics in authoring order
    List {
        /// Only list topics from this module
        #[arg(short, long)]
        module: Option<String>,

        /// Maximum number of topics to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Print the navigation outline
    Outline,

    /// Load the dataset and report problems
    Check,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config(self.data)?;

        match self.command {
            Commands::Show { id, json } => {
                let dataset = load_dataset(cfg).await?;
                show_topic(&dataset.store, &id, json)
            }
            Commands::List { module, limit } => {
                let dataset = load_dataset(cfg).await?;
                list_topics(&dataset.store, module.as_deref(), limit)
            }
            Commands::Outline => {
                let dataset = load_dataset(cfg).await?;
                show_outline(&dataset.store);
                Ok(())
            }
            Commands::Check => {
                let dataset = load_dataset(cfg).await?;
                check_dataset(&dataset);
                Ok(())
            }
            Commands::Config => {
                show_config(cfg);
                Ok(())
            }
        }
    }
}

/// Load the dataset named by the configuration
async fn load_dataset(cfg: &ResolvedConfig) -> Result<LoadedDataset> {
    loader::load_dir(&cfg.data, &cfg.patterns)
        .await
        .with_context(|| format!("Failed to load dataset from {}", cfg.data.display()))
}

/// Show a single topic
fn show_topic(store: &ContentStore, id: &str, json: bool) -> Result<()> {
    let view = store
        .detail_view(id)
        .ok_or_else(|| anyhow::anyhow!("Topic not found: {}", id))?;

    match (view, json) {
        (DetailView::Full(record), true) => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        (DetailView::Summary(item), true) => {
            println!("{}", serde_json::to_string_pretty(item)?);
        }
        (DetailView::Full(record), false) => {
            print!("{}", render::render_record(record));
        }
        (DetailView::Summary(item), false) => {
            print!("{}", render::render_summary(item));
        }
    }

    Ok(())
}

/// List topics
fn list_topics(store: &ContentStore, module: Option<&str>, limit: usize) -> Result<()> {
    if let Some(module) = module {
        if !store.origins().iter().any(|o| o == module) {
            anyhow::bail!(
                "Unknown module: {} (available: {})",
                module,
                store.origins().join(", ")
            );
        }
    }

    let records: Vec<_> = match module {
        Some(module) => store.records_from(module).collect(),
        None => store.records().collect(),
    };

    if records.is_empty() {
        println!("No topics found");
        return Ok(());
    }

    println!("{:<28} {:<12} {:<40}", "ID", "MODULE", "TITLE");
    println!("{}", "-".repeat(80));

    for record in records.iter().take(limit) {
        println!(
            "{:<28} {:<12} {:<40}",
            render::truncate(&record.id, 28),
            store.origin_of(&record.id).unwrap_or("-"),
            render::truncate(&record.title, 40)
        );
    }

    println!("\nShowing {} of {} topics", records.len().min(limit), records.len());

    Ok(())
}

/// Print sections and their items
///
/// `[x]` marks a completed topic, `*` a topic with a written record.
fn show_outline(store: &ContentStore) {
    if store.sections().next().is_none() {
        println!("No outline defined");
        return;
    }

    for origin in store.origins() {
        let mut sections = store.sections_from(origin).peekable();
        if sections.peek().is_none() {
            continue;
        }

        println!("[{}]", origin);
        for section in sections {
            match &section.description {
                Some(description) => println!("  {} - {}", section.title, description),
                None => println!("  {}", section.title),
            }
            for item in &section.items {
                let check = if item.completed { "[x]" } else { "[ ]" };
                let written = if store.contains(&item.id) { "*" } else { " " };
                println!("    {} {} {:<28} {}", check, written, item.id, item.name);
            }
        }
        println!();
    }
}

/// Report dataset statistics and coverage gaps
fn check_dataset(dataset: &LoadedDataset) {
    let store = &dataset.store;

    println!("Revision: {}", dataset.revision);
    println!("Files:");
    for file in &dataset.files {
        println!("  {}", file.display());
    }
    println!();
    println!("Modules:  {}", store.origins().join(", "));
    println!("Topics:   {}", store.len());
    println!("Sections: {}", store.sections().count());

    let missing = store.missing_details();
    if !missing.is_empty() {
        println!("\nOutline items without detail ({}):", missing.len());
        for item in &missing {
            println!("  {:<28} {}", item.id, item.name);
        }
    }

    let unlisted = store.unlisted_records();
    if !unlisted.is_empty() {
        println!("\nTopics not in any outline ({}):", unlisted.len());
        for record in &unlisted {
            println!("  {:<28} {}", record.id, record.title);
        }
    }

    if missing.is_empty() && unlisted.is_empty() {
        println!("\nOK: every outline item has detail and every topic is listed");
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) {
    println!("kbase configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home: {}", cfg.home.display());
    println!("  Data: {}", cfg.data.display());
    println!();
    println!("Data file patterns: {}", cfg.patterns.join(", "));
}
