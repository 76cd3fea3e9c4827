//! Insights command implementation for the Swellmind CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use swellmind_core::SessionRecord;
use swellmind_insights::InsightsReport;

use crate::fs::{load_json, require_existing, write_json};
use crate::{ARG_NOW, ARG_SESSIONS, CliError, ENV_INSIGHTS_SESSIONS};

/// CLI arguments for the `insights` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Summarise a JSON array of logged sessions: preferred \
                 conditions, rating statistics, trend and recommendations.",
    about = "Summarise a user's sessions"
)]
#[ortho_config(prefix = "SWELLMIND")]
pub(crate) struct InsightsArgs {
    /// Path to a JSON array of sessions.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) sessions: Option<Utf8PathBuf>,
    /// Reference instant for the 30-day trend windows (RFC 3339).
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
}

impl InsightsArgs {
    pub(crate) fn into_config(self) -> Result<InsightsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InsightsConfig::try_from(merged)
    }
}

/// Resolved `insights` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsightsConfig {
    pub(crate) sessions: Utf8PathBuf,
    pub(crate) now: DateTime<Utc>,
}

impl TryFrom<InsightsArgs> for InsightsConfig {
    type Error = CliError;

    fn try_from(args: InsightsArgs) -> Result<Self, Self::Error> {
        let sessions = args.sessions.ok_or(CliError::MissingArgument {
            field: ARG_SESSIONS,
            env: ENV_INSIGHTS_SESSIONS,
        })?;
        Ok(Self {
            sessions,
            now: args.now.unwrap_or_else(Utc::now),
        })
    }
}

pub(crate) fn run_insights_with(
    args: InsightsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.sessions, ARG_SESSIONS)?;
    execute_insights(&config, writer)
}

pub(crate) fn execute_insights(
    config: &InsightsConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let sessions: Vec<SessionRecord> = load_json(&config.sessions)?;
    write_json(writer, &InsightsReport::build(&sessions, config.now))
}
