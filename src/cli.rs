//! CLI interface for tech-tracker

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;

use crate::api::search::{DebouncedSearch, SearchOutcome};
use crate::api::{DemoApiClient, TechSearch};
use crate::config::AppConfig;
use crate::error::TrackerError;
use crate::roadmap;
use crate::settings::{SettingsStore, Theme};
use crate::stats;
use crate::store::backup;
use crate::store::{FieldPatch, TechStore};
use crate::types::{Category, NewTechnology, Status, StatusFilter};

#[derive(Parser)]
#[command(name = "tech-tracker")]
#[command(about = "Track your progress learning technologies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a technology to track
    Add {
        /// Title of the technology
        title: String,
        /// What this technology is and what you plan to learn
        #[arg(short, long, default_value = "")]
        description: String,
        /// Initial notes
        #[arg(short, long, default_value = "")]
        notes: String,
        /// Category: frontend, backend, database, devops, mobile, other
        #[arg(short, long, default_value = "frontend")]
        category: String,
        /// Initial status: not-started, in-progress, completed
        #[arg(short, long, default_value = "not-started")]
        status: String,
    },
    /// List technologies, optionally filtered
    List {
        /// Keep entries whose title or description contains this text
        #[arg(short, long, default_value = "")]
        query: String,
        /// Status filter: all, not-started, in-progress, completed
        #[arg(short, long, default_value = "all")]
        status: String,
    },
    /// Show one technology in detail
    Show {
        /// Record id
        id: i64,
    },
    /// Advance a technology one step along the status cycle
    Advance {
        /// Record id
        id: i64,
    },
    /// Set the status of a technology directly
    SetStatus {
        /// Record id
        id: i64,
        /// New status: not-started, in-progress, completed
        status: String,
    },
    /// Replace the notes of a technology
    Notes {
        /// Record id
        id: i64,
        /// New notes text
        text: String,
    },
    /// Edit fields of a technology
    Edit {
        /// Record id
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove a technology
    Remove {
        /// Record id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show aggregate statistics and recommendations
    Stats,
    /// Roadmap templates
    Roadmap {
        #[command(subcommand)]
        command: RoadmapCommands,
    },
    /// Pull placeholder technologies from the demo API (display only)
    Fetch,
    /// Search local records and the external demo API
    Search {
        /// Search text (omit with --interactive)
        query: Option<String>,
        /// Search as you type: one query per line, debounced
        #[arg(short, long)]
        interactive: bool,
    },
    /// Show curated resources for a technology
    Resources {
        /// Record id
        id: i64,
    },
    /// Export all data to a backup file
    Export {
        /// Destination path (defaults to tech-tracker-backup-YYYY-MM-DD.json)
        path: Option<PathBuf>,
    },
    /// Import a backup file, overwriting all current data
    Import {
        /// Backup file to import
        path: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// View or change user settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Mark every technology as completed
    CompleteAll {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Reset every technology to not-started
    ResetStatuses {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all technologies and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RoadmapCommands {
    /// List the available roadmap templates
    List,
    /// Import a roadmap template into the tracker
    Import {
        /// Template name (unknown names fall back to frontend)
        name: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings and storage info
    Show,
    /// Change settings
    Set {
        #[arg(long)]
        username: Option<String>,
        /// light, dark or auto
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        auto_save: Option<bool>,
    },
}

/// Parse arguments and dispatch
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Add { title, description, notes, category, status } => {
            let status = parse_status(&status)?;
            let store = TechStore::new()?;
            let record = store.add(NewTechnology {
                title,
                description,
                notes,
                category: Category::parse(&category),
                status,
            })?;
            println!("✅ Added #{}: {}", record.id, record.title);
        }

        Commands::List { query, status } => {
            let filter = parse_filter(&status)?;
            let store = TechStore::new()?;
            let all = store.list()?;
            let filtered = store.filter(&query, filter)?;

            let summary = stats::summarize(&all);
            println!(
                "📚 {} total │ ⭕ {} not started │ 🔄 {} in progress │ ✅ {} completed",
                summary.total, summary.not_started, summary.in_progress, summary.completed
            );

            if filtered.is_empty() {
                if all.is_empty() {
                    println!("\nNo technologies yet. Add one with 'tech-tracker add <title>'.");
                } else {
                    println!("\nNothing matches. Try a different query or filter.");
                }
                return Ok(());
            }

            println!("\nShowing {} of {}:", filtered.len(), all.len());
            for record in &filtered {
                println!(
                    "  {} #{:<6} {:<30} [{}] {}",
                    status_icon(record.status),
                    record.id,
                    record.title,
                    record.category,
                    record.status,
                );
            }
        }

        Commands::Show { id } => {
            let store = TechStore::new()?;
            match store.get(id) {
                Ok(record) => {
                    println!("{} {} (#{})", status_icon(record.status), record.title, record.id);
                    println!("  Status:      {}", record.status);
                    println!("  Category:    {}", record.category);
                    println!("  Source:      {}", record.source);
                    if !record.description.is_empty() {
                        println!("  Description: {}", record.description);
                    }
                    if !record.notes.is_empty() {
                        println!("  Notes:       {}", record.notes);
                    }
                    if let Some(created) = record.created_at {
                        println!("  Created:     {}", created.format("%Y-%m-%d %H:%M UTC"));
                    }
                    if let Some(imported) = record.imported_at {
                        println!("  Imported:    {}", imported.format("%Y-%m-%d %H:%M UTC"));
                    }
                }
                Err(TrackerError::NotFound(_)) => {
                    println!("⚠️  Technology with id {} does not exist or was removed.", id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Advance { id } => {
            let store = TechStore::new()?;
            match store.advance_status(id)? {
                Some(status) => println!("{} #{} is now {}", status_icon(status), id, status),
                None => println!("⚠️  No technology with id {}", id),
            }
        }

        Commands::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            let store = TechStore::new()?;
            if store.update_status(id, status)? {
                println!("{} #{} is now {}", status_icon(status), id, status);
            } else {
                println!("⚠️  No technology with id {}", id);
            }
        }

        Commands::Notes { id, text } => {
            let store = TechStore::new()?;
            if store.update_notes(id, &text)? {
                println!("📝 Notes saved for #{}", id);
            } else {
                println!("⚠️  No technology with id {}", id);
            }
        }

        Commands::Edit { id, title, description, notes, category } => {
            let patch = FieldPatch {
                title,
                description,
                notes,
                category: category.as_deref().map(Category::parse),
            };
            if patch.is_empty() {
                bail!("Nothing to update. Pass at least one of --title, --description, --notes, --category.");
            }
            let store = TechStore::new()?;
            if store.update_fields(id, patch)? {
                println!("✅ Updated #{}", id);
            } else {
                println!("⚠️  No technology with id {}", id);
            }
        }

        Commands::Remove { id, yes } => {
            let store = TechStore::new()?;
            let record = match store.get(id) {
                Ok(record) => record,
                Err(TrackerError::NotFound(_)) => {
                    println!("⚠️  No technology with id {}", id);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if !yes && !confirm(&format!("Delete '{}'? This cannot be undone.", record.title))? {
                println!("Cancelled.");
                return Ok(());
            }
            store.remove(id)?;
            println!("🗑️  Removed #{}: {}", id, record.title);
        }

        Commands::Stats => {
            let store = TechStore::new()?;
            let records = store.list()?;
            let summary = stats::summarize(&records);

            println!("📊 Total technologies: {}", summary.total);
            println!("✅ Completed:          {}", summary.completed);
            println!("🔄 In progress:        {}", summary.in_progress);
            println!("⭕ Not started:        {}", summary.not_started);
            println!("🎯 Overall progress:   {}%", summary.progress_percent);

            if !summary.by_category.is_empty() {
                println!("\n🏷️  By category:");
                for (category, count) in &summary.by_category {
                    println!("  {:<12} {}", category, count);
                }
            }

            let recs = stats::recommendations(&summary);
            if !recs.is_empty() {
                println!("\n💡 Recommendations:");
                for rec in recs {
                    println!("  • {} — {}", rec.title, rec.detail);
                }
            }
        }

        Commands::Roadmap { command } => match command {
            RoadmapCommands::List => {
                for name in roadmap::template_names() {
                    let template = roadmap::template(name);
                    println!("📋 {} ({} technologies)", name, template.entries.len());
                    for entry in &template.entries {
                        println!(
                            "    {:<14} [{}] {} — {}",
                            entry.title, entry.category, entry.difficulty, entry.description
                        );
                    }
                }
            }
            RoadmapCommands::Import { name } => {
                let store = TechStore::new()?;
                let template = roadmap::template(&name);
                let bar = indicatif::ProgressBar::new_spinner();
                bar.set_message(format!("Importing '{}' roadmap", template.name));
                bar.enable_steady_tick(Duration::from_millis(100));

                let outcome = roadmap::import_roadmap(&store, &name)?;
                bar.finish_and_clear();

                println!(
                    "📥 Imported {} technologies from '{}'",
                    outcome.imported.len(),
                    template.name
                );
                if outcome.failed > 0 {
                    println!(
                        "⚠️  {} entries failed and were skipped; the rest were kept.",
                        outcome.failed
                    );
                }
            }
        },

        Commands::Fetch => {
            let client = DemoApiClient::new(&config.api, &config.search)?;
            match client.fetch_technologies().await {
                Ok(records) => {
                    println!("🌐 {} technologies from the demo API (not saved):", records.len());
                    for record in records {
                        println!("  #{:<6} {:<40} [{}]", record.id, truncate(&record.title, 40), record.category);
                    }
                }
                Err(e) => print_network_banner(&e),
            }
        }

        Commands::Search { query, interactive } => {
            let client = DemoApiClient::new(&config.api, &config.search)?;
            if interactive {
                run_interactive_search(client, config.search.debounce_ms).await?;
            } else {
                let Some(query) = query else {
                    bail!("Pass a query, or use --interactive.");
                };
                run_search(&client, &query).await?;
            }
        }

        Commands::Resources { id } => {
            let client = DemoApiClient::new(&config.api, &config.search)?;
            match client.fetch_resources(id).await {
                Ok(resources) => {
                    println!("📖 Documentation:");
                    for link in resources.documentation {
                        println!("  {} — {}", link.title, link.url);
                    }
                    println!("🎓 Tutorials:");
                    for link in resources.tutorials {
                        println!("  {} — {}", link.title, link.url);
                    }
                    println!("👥 Community:");
                    for link in resources.community {
                        println!("  {} — {}", link.title, link.url);
                    }
                }
                Err(e) => print_network_banner(&e),
            }
        }

        Commands::Export { path } => {
            let store = TechStore::new()?;
            let settings = SettingsStore::new()?;
            let path = path.unwrap_or_else(|| PathBuf::from(backup::default_backup_name()));
            let export = backup::export_to(&store, &settings, &path)?;
            println!(
                "📥 Exported {} technologies to {}",
                export.data.technologies.len(),
                path.display()
            );
        }

        Commands::Import { path, yes } => {
            let store = TechStore::new()?;
            let settings = SettingsStore::new()?;
            // validate before asking, so a broken file never wipes anything
            let export = backup::read_backup(&path)?;
            if !yes
                && !confirm(&format!(
                    "Import {} technologies from {}? This overwrites ALL current data.",
                    export.data.technologies.len(),
                    path.display()
                ))?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let count = backup::import_from(&store, &settings, &path)?;
            println!("📤 Imported {} technologies.", count);
        }

        Commands::Settings { command } => match command {
            SettingsCommands::Show => {
                let settings_store = SettingsStore::new()?;
                let settings = settings_store.load()?;
                println!("👤 Username:      {}", settings.username);
                println!("🎨 Theme:         {}", settings.theme);
                println!("🌍 Language:      {}", settings.language);
                println!("🔔 Notifications: {}", on_off(settings.notifications));
                println!("💾 Auto-save:     {}", on_off(settings.auto_save));

                let store = TechStore::new()?;
                let info = store.storage_info()?;
                println!("\n💽 Storage: {} technologies ({} with notes), {} KB",
                    info.records, info.with_notes, info.bytes / 1024);
            }
            SettingsCommands::Set { username, theme, language, notifications, auto_save } => {
                let settings_store = SettingsStore::new()?;
                let mut settings = settings_store.load()?;
                if let Some(username) = username {
                    settings.username = username;
                }
                if let Some(theme) = theme {
                    settings.theme = parse_theme(&theme)?;
                }
                if let Some(language) = language {
                    settings.language = language;
                }
                if let Some(notifications) = notifications {
                    settings.notifications = notifications;
                }
                if let Some(auto_save) = auto_save {
                    settings.auto_save = auto_save;
                }
                settings_store.save(&settings)?;
                println!("✅ Settings saved.");
            }
        },

        Commands::CompleteAll { yes } => {
            let store = TechStore::new()?;
            if !yes && !confirm("Mark every technology as completed?")? {
                println!("Cancelled.");
                return Ok(());
            }
            let changed = store.set_all_status(Status::Completed)?;
            println!("✅ Marked {} technologies as completed.", changed);
        }

        Commands::ResetStatuses { yes } => {
            let store = TechStore::new()?;
            if !yes && !confirm("Reset every technology to not-started?")? {
                println!("Cancelled.");
                return Ok(());
            }
            let changed = store.set_all_status(Status::NotStarted)?;
            println!("↻ Reset {} technologies to not-started.", changed);
        }

        Commands::Reset { yes } => {
            if !yes
                && !confirm("This deletes ALL your technologies and settings. Continue?")?
            {
                println!("Cancelled.");
                return Ok(());
            }
            let store = TechStore::new()?;
            let settings = SettingsStore::new()?;
            store.clear()?;
            settings.clear()?;
            println!("🗑️  All data reset.");
        }
    }

    Ok(())
}

/// One-shot search: local records first, then the external API
async fn run_search(client: &DemoApiClient, query: &str) -> Result<()> {
    let store = TechStore::new()?;
    let local = store.filter(query, StatusFilter::All)?;
    if local.is_empty() {
        println!("💾 No local matches.");
    } else {
        println!("💾 Local matches:");
        for record in local.iter().take(5) {
            println!("  #{:<6} {} [{}]", record.id, record.title, record.category);
        }
    }

    match client.search(query).await {
        Ok(hits) if hits.is_empty() => println!("🔍 No external results."),
        Ok(hits) => {
            println!("🔍 External results:");
            for hit in hits {
                println!("  {:<14} {}", hit.id, truncate(&hit.title, 60));
            }
        }
        Err(e) => print_network_banner(&e),
    }
    Ok(())
}

/// Search as you type: debounced lookups, superseded requests cancelled
async fn run_interactive_search(client: DemoApiClient, debounce_ms: u64) -> Result<()> {
    let (mut driver, mut outcomes) = DebouncedSearch::new(
        Arc::new(client),
        Duration::from_millis(debounce_ms),
    );

    println!("🔍 Type a query per line; empty line clears. Ctrl-D to quit.");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => driver.input(&line),
                    None => break,
                }
            }
            Some(outcome) = outcomes.recv() => print_outcome(outcome),
        }
    }

    // give the last debounced lookup a chance to settle
    if let Ok(Some(outcome)) =
        tokio::time::timeout(Duration::from_secs(3), outcomes.recv()).await
    {
        print_outcome(outcome);
    }
    Ok(())
}

fn print_outcome(outcome: SearchOutcome) {
    match outcome.result {
        Ok(hits) if hits.is_empty() => {
            if !outcome.query.is_empty() {
                println!("  '{}': nothing found", outcome.query);
            }
        }
        Ok(hits) => {
            println!("  '{}':", outcome.query);
            for hit in hits {
                println!("    {:<14} {}", hit.id, truncate(&hit.title, 60));
            }
        }
        Err(e) => print_network_banner(&e),
    }
}

fn print_network_banner(e: &TrackerError) {
    eprintln!("⚠️  {} — check your connection and retry.", e);
}

fn parse_status(s: &str) -> Result<Status> {
    Status::parse(s)
        .ok_or_else(|| anyhow::anyhow!("Unknown status '{}'. Use not-started, in-progress or completed.", s))
}

fn parse_filter(s: &str) -> Result<StatusFilter> {
    StatusFilter::parse(s)
        .ok_or_else(|| anyhow::anyhow!("Unknown filter '{}'. Use all, not-started, in-progress or completed.", s))
}

fn parse_theme(s: &str) -> Result<Theme> {
    Theme::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown theme '{}'. Use light, dark or auto.", s))
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::NotStarted => "⭕",
        Status::InProgress => "🔄",
        Status::Completed => "✅",
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
