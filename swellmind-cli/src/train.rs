//! Train command implementation for the Swellmind CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use swellmind_core::SessionRecord;
use swellmind_trainer::default_trainer;

use crate::fs::{load_json, require_existing, write_json};
use crate::{ARG_NOW, ARG_SESSIONS, CliError, ENV_TRAIN_SESSIONS};

/// CLI arguments for the `train` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Retrain a user's model from a JSON array of logged \
                 sessions and print the resulting model statistics. Only \
                 sessions with a linked forecast are used.",
    about = "Retrain a user's model"
)]
#[ortho_config(prefix = "SWELLMIND")]
pub(crate) struct TrainArgs {
    /// Path to a JSON array of sessions.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) sessions: Option<Utf8PathBuf>,
    /// Training timestamp recorded on the model (RFC 3339).
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

impl TrainArgs {
    pub(crate) fn into_config(self) -> Result<TrainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrainConfig::try_from(merged)
    }
}

/// Resolved `train` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrainConfig {
    pub(crate) sessions: Utf8PathBuf,
    pub(crate) now: DateTime<Utc>,
}

impl TryFrom<TrainArgs> for TrainConfig {
    type Error = CliError;

    fn try_from(args: TrainArgs) -> Result<Self, Self::Error> {
        let sessions = args.sessions.ok_or(CliError::MissingArgument {
            field: ARG_SESSIONS,
            env: ENV_TRAIN_SESSIONS,
        })?;
        Ok(Self {
            sessions,
            now: args.now.unwrap_or_else(Utc::now),
        })
    }
}

pub(crate) fn run_train_with(args: TrainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.sessions, ARG_SESSIONS)?;
    execute_train(&config, writer)
}

pub(crate) fn execute_train(config: &TrainConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let sessions: Vec<SessionRecord> = load_json(&config.sessions)?;
    let stats = default_trainer().retrain(&sessions, config.now);
    write_json(writer, &stats)
}
