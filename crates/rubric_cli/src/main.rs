//! Command-line driver for shared review checklists.
//!
//! # Responsibility
//! - Stand in for the canvas host: seed, show and cycle one checklist.
//! - Keep output deterministic for quick local sanity checks.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rubric_core::db::open_db;
use rubric_core::{
    default_log_level, init_logging, ChecklistId, ChecklistService, ChecklistTemplate,
    ChecklistView, SqliteStore,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rubric", version, about = "Shared review checklist CLI")]
struct Cli {
    #[arg(long, global = true, default_value = "rubric.db", help = "SQLite database file")]
    db: PathBuf,
    #[arg(long, global = true, help = "Checklist ID (printed by `init`)")]
    checklist: Option<ChecklistId>,
    #[arg(long, global = true, help = "Absolute directory for rolling log files")]
    log_dir: Option<String>,
    #[arg(long, global = true, help = "trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a checklist, or reopen `--checklist` without reseeding it.
    Init {
        #[arg(long, help = "JSON template: {\"items\": [{\"title\", \"criteria\"}]}")]
        template: Option<PathBuf>,
    },
    /// Print rows and the latest-change notice.
    Show,
    /// Advance one row to its next review status.
    Cycle { position: usize },
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    checklist: String,
    data: &'a ChecklistView,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)
            .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;

    let store = match &cli.command {
        Commands::Init { template } => {
            let template = match template {
                Some(path) => ChecklistTemplate::from_json_file(path)
                    .with_context(|| format!("failed to load template `{}`", path.display()))?,
                None => ChecklistTemplate::default(),
            };
            match cli.checklist {
                Some(id) => SqliteStore::open_or_initialize(conn, id, &template)?,
                None => SqliteStore::create(conn, &template)?,
            }
        }
        Commands::Show | Commands::Cycle { .. } => {
            let Some(id) = cli.checklist else {
                bail!("--checklist is required; run `rubric init` to create one");
            };
            SqliteStore::open(conn, id)?
        }
    };

    let id = store.id();
    let service = ChecklistService::new(store);
    let view = match cli.command {
        Commands::Cycle { position } => service.cycle(position)?,
        Commands::Init { .. } | Commands::Show => service.view()?,
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: true,
                checklist: id.to_string(),
                data: &view,
            })?
        );
    } else {
        print_view(id, &view);
    }
    Ok(())
}

fn print_view(id: ChecklistId, view: &ChecklistView) {
    println!("checklist: {id}");
    for row in &view.rows {
        println!("[{}] {:<14} {}", row.position, row.status_label, row.title);
        if !row.criteria.is_empty() {
            println!("    {}", row.criteria);
        }
    }
    println!("{}", view.notice);
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn parses_cycle_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rubric",
            "cycle",
            "3",
            "--checklist",
            "11111111-2222-4333-8444-555555555555",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(cli.checklist.is_some());
        assert!(matches!(cli.command, Commands::Cycle { position: 3 }));
    }

    #[test]
    fn rejects_malformed_checklist_id() {
        assert!(Cli::try_parse_from(["rubric", "show", "--checklist", "nope"]).is_err());
    }
}
