//! Command-line interface for scoring forecasts, training models and
//! summarising sessions from JSON files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod insights;
mod score;
mod train;

pub use error::CliError;

use insights::InsightsArgs;
use score::ScoreArgs;
use train::TrainArgs;

pub(crate) const ARG_WINDOWS: &str = "windows";
pub(crate) const ARG_PREFERENCES: &str = "preferences";
pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ARG_SESSIONS: &str = "sessions";
pub(crate) const ARG_NOW: &str = "now";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ENV_SCORE_WINDOWS: &str = "SWELLMIND_CMDS_SCORE_WINDOWS";
pub(crate) const ENV_TRAIN_SESSIONS: &str = "SWELLMIND_CMDS_TRAIN_SESSIONS";
pub(crate) const ENV_INSIGHTS_SESSIONS: &str = "SWELLMIND_CMDS_INSIGHTS_SESSIONS";

/// Run the Swellmind CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Score(args) => score::run_score_with(args, writer),
        Command::Train(args) => train::run_train_with(args, writer),
        Command::Insights(args) => insights::run_insights_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "swellmind",
    about = "Personalised surf forecast scoring for the Swellmind engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score and rank forecast windows for a user.
    Score(ScoreArgs),
    /// Retrain a user's model from their session history.
    Train(TrainArgs),
    /// Summarise a user's session history.
    Insights(InsightsArgs),
}

#[cfg(test)]
mod tests;
