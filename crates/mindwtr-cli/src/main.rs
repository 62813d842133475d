//! Mindwtr CLI - sync, inspect, and maintain your GTD data from the terminal.

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mindwtr_core::backend::{create_backend, BackendConfig};
use mindwtr_core::config::AppConfig;
use mindwtr_core::storage::{FileStorage, StorageAdapter};
use mindwtr_core::sync::{
    compact_purged, filter_deleted, purge_expired, SyncOutcome, SyncService, SyncStatus,
    PURGE_RETENTION_DAYS,
};
use mindwtr_core::util::now_iso;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "mindwtr")]
#[command(about = "Offline-first GTD task manager with multi-device sync")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH")]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync cycle against the configured backend
    Sync {
        /// Output the sync outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the outcome of the last sync cycle
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stamp expired tombstones and optionally drop old purged entities
    Purge {
        /// Retention window in days for tombstones and purged entities
        #[arg(long, default_value_t = PURGE_RETENTION_DAYS)]
        retention_days: i64,
        /// Also physically remove entities purged longer ago than the window
        #[arg(long)]
        compact: bool,
    },
    /// List live tasks
    List {
        /// Number of tasks to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a timestamped backup of the local snapshot
    Export {
        /// Directory for the backup file (current directory when omitted)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration (credentials redacted)
    Show,
    /// Use a file backend at the given path
    SetFile { path: String },
    /// Use a WebDAV backend
    SetWebdav {
        url: String,
        username: String,
        password: String,
    },
    /// Use a cloud backend
    SetCloud { url: String, token: String },
    /// Change where the local data file lives
    SetDataPath { path: String },
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mindwtr_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config_path)?;
    let config = AppConfig::load(&config_path)?;

    match cli.command {
        Commands::Sync { json } => run_sync(&config, json).await?,
        Commands::Status { json } => run_status(json)?,
        Commands::Purge {
            retention_days,
            compact,
        } => run_purge(&config, retention_days, compact).await?,
        Commands::List { limit, json } => run_list(&config, limit, json).await?,
        Commands::Export { output } => run_export(&config, output.as_deref()).await?,
        Commands::Config { action } => run_config(&config_path, config, action)?,
    }

    Ok(())
}

async fn run_sync(config: &AppConfig, as_json: bool) -> Result<(), CliError> {
    let backend_config = config.backend.as_ref().ok_or(CliError::SyncNotConfigured)?;
    let backend = create_backend(backend_config)?;
    let storage: Arc<dyn StorageAdapter> = Arc::new(FileStorage::new(data_file(config)?));

    let service = SyncService::new(storage, backend);
    let outcome = service.perform_sync().await?;
    persist_outcome(&outcome)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in format_outcome_lines(&outcome) {
            println!("{line}");
        }
    }

    if outcome.status == SyncStatus::Error {
        std::process::exit(1);
    }
    Ok(())
}

fn run_status(as_json: bool) -> Result<(), CliError> {
    let path = outcome_path()?;
    if !path.exists() {
        return Err(CliError::NoSyncOutcome);
    }
    let outcome: SyncOutcome = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in format_outcome_lines(&outcome) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_purge(config: &AppConfig, retention_days: i64, compact: bool) -> Result<(), CliError> {
    let storage = FileStorage::new(data_file(config)?);
    let mut data = storage.get_data().await?;

    let purged = purge_expired(&mut data, retention_days);
    let compacted = if compact {
        compact_purged(&mut data, retention_days)
    } else {
        0
    };
    storage.save_data(&data).await?;

    println!("Purged {purged} tombstoned entities");
    if compact {
        println!("Compacted {compacted} purged entities");
    }
    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct TaskListItem {
    id: String,
    status: String,
    title: String,
    updated_at: String,
}

async fn run_list(config: &AppConfig, limit: usize, as_json: bool) -> Result<(), CliError> {
    let storage = FileStorage::new(data_file(config)?);
    let data = storage.get_data().await?;
    let visible = filter_deleted(&data.tasks);

    let items: Vec<TaskListItem> = visible
        .iter()
        .take(limit)
        .map(|task| TaskListItem {
            id: task.id.clone(),
            status: format!("{:?}", task.status).to_lowercase(),
            title: task.title.clone(),
            updated_at: task.updated_at.clone(),
        })
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No tasks.");
    } else {
        for item in items {
            println!("{}  [{}]  {}", item.id, item.status, item.title);
        }
    }
    Ok(())
}

async fn run_export(config: &AppConfig, output: Option<&Path>) -> Result<(), CliError> {
    let storage = FileStorage::new(data_file(config)?);
    let data = storage.get_data().await?;

    let timestamp = now_iso().replace([':', '.'], "-");
    let file_name = format!("mindwtr-backup-{timestamp}.json");
    let path = output.unwrap_or_else(|| Path::new(".")).join(file_name);

    std::fs::write(&path, serde_json::to_string_pretty(&data)?)?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn run_config(
    config_path: &Path,
    mut config: AppConfig,
    action: ConfigAction,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            println!("{config:#?}");
            return Ok(());
        }
        ConfigAction::SetFile { path } => {
            config.backend = Some(BackendConfig::File { path });
        }
        ConfigAction::SetWebdav {
            url,
            username,
            password,
        } => {
            config.backend = Some(BackendConfig::WebDav {
                url,
                username,
                password,
            });
        }
        ConfigAction::SetCloud { url, token } => {
            config.backend = Some(BackendConfig::Cloud { url, token });
        }
        ConfigAction::SetDataPath { path } => {
            config.data_path = Some(path);
        }
    }

    // Validate backend settings before persisting them.
    if let Some(backend) = &config.backend {
        create_backend(backend)?;
    }
    config.save(config_path)?;
    println!("Configuration saved");
    Ok(())
}

fn format_outcome_lines(outcome: &SyncOutcome) -> Vec<String> {
    let mut lines = vec![
        format!("Started:   {}", outcome.started_at),
        format!("Completed: {}", outcome.completed_at),
        format!(
            "Status:    {}",
            match outcome.status {
                SyncStatus::Success => "success",
                SyncStatus::Error => "error",
            }
        ),
    ];
    if let Some(message) = &outcome.error_message {
        lines.push(format!("Error:     {message}"));
    }
    lines.push(format!(
        "Tasks:     {} merged, {} conflicts",
        outcome.tasks.merged_total, outcome.tasks.conflicts
    ));
    lines.push(format!(
        "Projects:  {} merged, {} conflicts",
        outcome.projects.merged_total, outcome.projects.conflicts
    ));
    lines.push(format!(
        "Areas:     {} merged, {} conflicts",
        outcome.areas.merged_total, outcome.areas.conflicts
    ));
    lines
}

fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::config_dir().ok_or(CliError::NoHomeDirectory)?;
    Ok(base.join("mindwtr").join("config.json"))
}

fn data_file(config: &AppConfig) -> Result<PathBuf, CliError> {
    let base = dirs::data_dir().ok_or(CliError::NoHomeDirectory)?;
    Ok(config.data_file(&base.join("mindwtr")))
}

fn outcome_path() -> Result<PathBuf, CliError> {
    let base = dirs::data_dir().ok_or(CliError::NoHomeDirectory)?;
    Ok(base.join("mindwtr").join("last-sync.json"))
}

fn persist_outcome(outcome: &SyncOutcome) -> Result<(), CliError> {
    let path = outcome_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(outcome)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use mindwtr_core::sync::CollectionStats;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn outcome_lines_include_error_message() {
        let outcome = SyncOutcome {
            started_at: "2025-01-01T00:00:00Z".to_string(),
            completed_at: "2025-01-01T00:00:02Z".to_string(),
            status: SyncStatus::Error,
            error_message: Some("Backend error: remote write refused".to_string()),
            tasks: CollectionStats::default(),
            projects: CollectionStats::default(),
            areas: CollectionStats::default(),
        };

        let lines = format_outcome_lines(&outcome);
        assert!(lines.iter().any(|line| line.contains("error")));
        assert!(lines
            .iter()
            .any(|line| line.contains("remote write refused")));
    }

    #[test]
    fn outcome_lines_cover_all_collections() {
        let outcome = SyncOutcome {
            started_at: "2025-01-01T00:00:00Z".to_string(),
            completed_at: "2025-01-01T00:00:02Z".to_string(),
            status: SyncStatus::Success,
            error_message: None,
            tasks: CollectionStats {
                merged_total: 3,
                conflicts: 1,
            },
            projects: CollectionStats {
                merged_total: 2,
                conflicts: 0,
            },
            areas: CollectionStats {
                merged_total: 1,
                conflicts: 0,
            },
        };

        let lines = format_outcome_lines(&outcome);
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().any(|line| line.contains("3 merged")));
    }
}
