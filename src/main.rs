mod api;
mod board;
mod cli;
mod config;
mod engine;
mod ui;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use api::{ApiError, BoardClient, Mover};
use board::{Board, Card};
use cli::{Cli, Command};
use config::BoardshiftConfig;
use engine::{BatchExecutor, RetryPolicy, SelectionSet, summarize};
use ui::BatchProgress;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BoardshiftConfig::load()?;
    if let Some(max_retries) = cli.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(throttle_ms) = cli.throttle_ms {
        config.throttle_ms = throttle_ms;
    }

    match cli.command {
        Command::Run {
            target,
            file,
            ids,
            column,
        } => run_batch(&config, &target, &file, &ids, column.as_deref(), cli.verbose).await,
        Command::Status { file } => show_status(&file),
        Command::Demo => run_demo(&config).await,
    }
}

fn executor_from(config: &BoardshiftConfig) -> BatchExecutor {
    BatchExecutor::new(
        RetryPolicy {
            max_attempts: config.max_retries,
            base_delay_ms: config.base_delay_ms,
        },
        config.throttle_ms,
    )
}

async fn run_batch(
    config: &BoardshiftConfig,
    target: &str,
    file: &str,
    ids: &[String],
    column: Option<&str>,
    verbose: bool,
) -> Result<()> {
    if config.api_base_url.is_empty() {
        bail!("Set api_base_url in boardshift.toml (or BOARDSHIFT_API_TOKEN for the token)");
    }

    let board = Board::load(Path::new(file)).with_context(|| format!("loading board from {file}"))?;

    let mut selection = SelectionSet::new();
    if let Some(column) = column {
        for card in board.cards.iter().filter(|c| c.status == column) {
            selection.add(&card.id);
        }
    } else {
        for id in ids {
            selection.add(id);
        }
    }
    if selection.is_empty() {
        bail!("Nothing selected: pass --ids or --column");
    }

    let selected = selection.resolve(&board.cards);
    if selected.len() < selection.len() {
        eprintln!(
            "  ! {} selected id(s) no longer on the board, skipping",
            selection.len() - selected.len()
        );
    }
    if verbose {
        let mut listed: Vec<_> = selection.selected_ids().iter().cloned().collect();
        listed.sort();
        println!("Selection: {}", listed.join(", "));
        for status in selection.distinct_statuses(&board.cards) {
            println!(
                "  {status}: {} card(s)",
                selection.count_in_status(&board.cards, &status)
            );
        }
    }

    let client = BoardClient::new(config.api_base_url.clone(), config.api_token.clone());
    let executor = executor_from(config);

    let progress = BatchProgress::start(selected.len(), target);
    let outcome = executor.run(&selected, target, &client).await?;
    let summary = summarize(&outcome);
    progress.complete(&summary);
    if verbose {
        progress.print_outcome(&outcome);
    }

    if summary.ok {
        // The batch fully succeeded; the selection has served its purpose.
        selection.clear();
        Ok(())
    } else {
        // Selection stays intact so the operator can retry the leftovers
        // without re-selecting.
        std::process::exit(1);
    }
}

fn show_status(file: &str) -> Result<()> {
    let board = Board::load(Path::new(file)).with_context(|| format!("loading board from {file}"))?;
    println!("{} cards", board.cards.len());
    for (status, count) in board.column_counts() {
        println!("  {status}: {count}");
    }
    Ok(())
}

/// Offline mover used by `demo`: every transition succeeds locally.
struct StubMover;

impl Mover for StubMover {
    async fn move_status(&self, _card_id: &str, _target_status: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

async fn run_demo(config: &BoardshiftConfig) -> Result<()> {
    let board = Board {
        cards: vec![
            Card::new("pending"),
            Card::new("pending"),
            Card::new("confirmed"),
        ],
    };
    let mut selection = SelectionSet::new();
    for card in &board.cards {
        selection.add(&card.id);
    }
    // Leave the already-confirmed card out of the demo selection.
    if let Some(confirmed) = board.cards.iter().find(|c| c.status == "confirmed")
        && selection.contains(&confirmed.id)
    {
        selection.remove(&confirmed.id);
    }
    let selected = selection.resolve(&board.cards);

    let executor = executor_from(config);
    let progress = BatchProgress::start(selected.len(), "confirmed");
    let outcome = executor.run(&selected, "confirmed", &StubMover).await?;
    let summary = summarize(&outcome);
    progress.complete(&summary);
    progress.print_outcome(&outcome);

    if summary.ok {
        selection.clear();
    }
    Ok(())
}
