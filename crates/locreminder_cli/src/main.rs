//! Command-line front end over the reminder repository.
//!
//! # Responsibility
//! - Provide a small executable to inspect and seed a reminder database.
//! - Exercise the same repository path the app uses.

use clap::{Parser, Subcommand};
use locreminder_core::{
    core_version, init_logging_from_config, CoreConfig, LocalReminderRepository, Reminder,
    ReminderDataSource, ReminderDraft, SqliteReminderStore,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "locreminder", version, about = "Location reminder store tool")]
struct Cli {
    /// TOML config file.
    #[arg(long, env = "LOCREMINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Database file; overrides `database_path` from the config.
    #[arg(long, env = "LOCREMINDER_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Store(StoreCommand),
    /// Print the core version.
    Version,
}

#[derive(Debug, Subcommand)]
enum StoreCommand {
    /// Save a new reminder.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Place label shown to the user.
        #[arg(long)]
        location: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// List every reminder in insertion order.
    List,
    /// Show one reminder by id.
    Get { id: String },
    /// Delete every reminder.
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let command = match cli.command {
        Command::Version => {
            println!("locreminder_core version={}", core_version());
            return Ok(());
        }
        Command::Store(command) => command,
    };

    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path).map_err(|err| err.to_string())?,
        None => CoreConfig::default(),
    };
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    init_logging_from_config(&config).map_err(|err| err.to_string())?;

    let store = SqliteReminderStore::open(&config.database_path).map_err(|err| err.to_string())?;
    let repo = LocalReminderRepository::new(store);
    info!("event=cli_start module=cli status=ok");

    match command {
        StoreCommand::Add {
            title,
            description,
            location,
            lat,
            lng,
        } => {
            let mut draft = ReminderDraft::new().titled(title).located_at(location, lat, lng);
            draft.description = description;
            let reminder = draft.into_reminder().map_err(|err| err.to_string())?;
            repo.save_reminder(&reminder)
                .await
                .map_err(|err| err.to_string())?;
            println!("{}", reminder.id);
        }
        StoreCommand::List => {
            let reminders = repo.get_reminders().await.map_err(|err| err.to_string())?;
            if reminders.is_empty() {
                println!("no reminders");
            }
            for reminder in &reminders {
                print_reminder(reminder);
            }
        }
        StoreCommand::Get { id } => {
            let reminder = repo.get_reminder(&id).await.map_err(|err| err.to_string())?;
            print_reminder(&reminder);
        }
        StoreCommand::Clear => {
            repo.delete_all_reminders()
                .await
                .map_err(|err| err.to_string())?;
            println!("cleared");
        }
    }
    Ok(())
}

fn print_reminder(reminder: &Reminder) {
    let place = match (reminder.location.as_deref(), reminder.coordinates()) {
        (Some(label), Some((lat, lng))) => format!("{label} ({lat:.5}, {lng:.5})"),
        (Some(label), None) => label.to_string(),
        (None, Some((lat, lng))) => format!("({lat:.5}, {lng:.5})"),
        (None, None) => "-".to_string(),
    };
    println!(
        "{}\t{}\t{}\t{}",
        reminder.id,
        reminder.title,
        reminder.description.as_deref().unwrap_or("-"),
        place
    );
}
