//! Main entry point for the scorekeeper command line
//!
//! This is the interactive caller of the library core: it manages the
//! stored player roster, previews rating changes for a finished game, and
//! records games against the JSON-file rating store and match ledger.

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use scorekeeper::config::{validate_config, AppConfig};
use scorekeeper::record::MatchRecorder;
use scorekeeper::roster::RosterManager;
use scorekeeper::storage::{JsonFileMatchLedger, JsonFileRatingStore, MatchLedger};
use scorekeeper::types::{MatchMetadata, MatchSubmission, Winner};
use scorekeeper::utils::format_delta;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Scorekeeper - team Elo ratings and match ledger for tabletop games
#[derive(Parser)]
#[command(
    name = "scorekeeper",
    version,
    about = "Team Elo ratings and match ledger for tabletop games",
    long_about = "Scorekeeper keeps Elo-style skill ratings for players in team-based \
                 tabletop games. Each recorded game updates every participant's rating \
                 using a team-averaged Elo calculation and appends an immutable record \
                 to the match ledger."
)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage players and their stored ratings
    Players {
        #[command(subcommand)]
        action: PlayersAction,
    },
    /// Compute rating changes for a finished game without saving anything
    Preview(MatchArgs),
    /// Record a finished game: update ratings and append to the ledger
    Record(MatchArgs),
    /// Show recorded matches, newest first
    History {
        /// Number of matches to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum PlayersAction {
    /// Add a player
    Add {
        name: String,
        /// Initial rating; defaults to the configured baseline
        #[arg(long)]
        rating: Option<f64>,
    },
    /// Overwrite a player's stored rating
    Set { name: String, rating: f64 },
    /// Remove a player's stored rating
    Remove { name: String },
    /// List standings, best first
    List,
}

#[derive(ClapArgs)]
struct MatchArgs {
    /// Comma-separated roster for team A
    #[arg(long, value_delimiter = ',', required = true)]
    team_a: Vec<String>,

    /// Comma-separated roster for team B
    #[arg(long, value_delimiter = ',', required = true)]
    team_b: Vec<String>,

    /// Winning side
    #[arg(long, value_enum)]
    winner: Side,

    /// K-factor override for this game
    #[arg(long)]
    k_factor: Option<f64>,

    /// Player with the designated special role, if the variant has one
    #[arg(long)]
    traitor: Option<String>,

    /// Player eliminated during the game
    #[arg(long)]
    eliminated: Option<String>,

    /// Free-text notes
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    A,
    B,
}

impl MatchArgs {
    fn into_submission(self) -> MatchSubmission {
        let metadata = MatchMetadata {
            traitor: self.traitor,
            eliminated: self.eliminated,
            notes: self.notes,
        };

        MatchSubmission {
            team_a: self.team_a,
            team_b: self.team_b,
            winner: match self.winner {
                Side::A => Winner::TeamA,
                Side::B => Winner::TeamB,
            },
            k_factor: self.k_factor,
            metadata: if metadata.is_empty() {
                None
            } else {
                Some(metadata)
            },
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn print_updates(updates: &[scorekeeper::types::RatingUpdate]) {
    for update in updates {
        println!(
            "  {:<20} {:>8.1} -> {:>8.1}  ({})",
            update.player_id,
            update.old_rating,
            update.new_rating,
            format_delta(update.delta)
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(level) = &cli.log_level {
        config.service.log_level = level.clone();
    }
    validate_config(&config)?;

    init_logging(&config.service.log_level)?;
    info!("Starting {} v{}", config.service.name, scorekeeper::VERSION);

    let store = Arc::new(JsonFileRatingStore::new(&config.storage.ratings_path));
    let ledger = Arc::new(JsonFileMatchLedger::new(&config.storage.ledger_path));
    let timeout_ms = config.storage.operation_timeout_ms;

    match cli.command {
        Command::Players { action } => {
            let roster =
                RosterManager::new(store, config.rating.clone()).storage_timeout_ms(timeout_ms);

            match action {
                PlayersAction::Add { name, rating } => {
                    let stored = roster.add_player(&name, rating).await?;
                    println!("Added {} with rating {:.1}", name, stored);
                }
                PlayersAction::Set { name, rating } => {
                    roster.set_rating(&name, rating).await?;
                    println!("Set {} to {:.1}", name, rating);
                }
                PlayersAction::Remove { name } => {
                    if roster.remove_player(&name).await? {
                        println!("Removed {}", name);
                    } else {
                        println!("No stored rating for {}", name);
                    }
                }
                PlayersAction::List => {
                    let standings = roster.standings().await?;
                    if standings.is_empty() {
                        println!("No players stored yet");
                    }
                    for (rank, (name, rating)) in standings.iter().enumerate() {
                        println!("{:>3}. {:<20} {:>8.1}", rank + 1, name, rating);
                    }
                }
            }
        }

        Command::Preview(args) => {
            let recorder = MatchRecorder::new(store, ledger, config.rating.clone())?
                .storage_timeout_ms(timeout_ms);
            let submission = args.into_submission();
            let preview = recorder.preview_match(&submission).await?;

            println!(
                "Team A: expected score {:.3}, delta {}",
                preview.team_a.expected_score,
                format_delta(preview.team_a.delta)
            );
            println!(
                "Team B: expected score {:.3}, delta {}",
                preview.team_b.expected_score,
                format_delta(preview.team_b.delta)
            );
            print_updates(&preview.updates);
            println!("(preview only - nothing saved)");
        }

        Command::Record(args) => {
            let recorder = MatchRecorder::new(store, ledger, config.rating.clone())?
                .storage_timeout_ms(timeout_ms);
            let submission = args.into_submission();
            let outcome = recorder.commit_match(submission).await?;

            println!("Match {} ({} won)", outcome.record.id, outcome.record.winner);
            print_updates(&outcome.record.updates);

            if !outcome.is_complete() {
                if let Some(e) = &outcome.ratings_error {
                    eprintln!("Ratings NOT saved: {}", e);
                }
                if let Some(e) = &outcome.ledger_error {
                    eprintln!("Match NOT logged: {}", e);
                }
                eprintln!("Re-run once the store is reachable to retry the failed half");
                std::process::exit(1);
            }
        }

        Command::History { limit } => {
            let records = ledger.recent(limit).await?;
            if records.is_empty() {
                println!("No matches recorded yet");
            }
            for record in records {
                let winner_delta = match record.winner {
                    Winner::TeamA => record.delta_a,
                    Winner::TeamB => record.delta_b,
                };
                println!(
                    "{}  {} won ({}): [{}] vs [{}]",
                    record.recorded_at.format("%Y-%m-%d %H:%M"),
                    record.winner,
                    format_delta(winner_delta),
                    record.team_a.join(", "),
                    record.team_b.join(", ")
                );
            }
        }
    }

    Ok(())
}
