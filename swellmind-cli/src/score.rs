//! Score command implementation for the Swellmind CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use swellmind_core::{ForecastObservation, ModelType, UserModelStats, UserPreferences};
use swellmind_scorer::{DEFAULT_WINDOW_LIMIT, ScoredWindow, WindowScorer, rank_windows};

use crate::fs::{load_json, require_existing, write_json};
use crate::{
    ARG_LIMIT, ARG_MODEL, ARG_NOW, ARG_PREFERENCES, ARG_WINDOWS, CliError, ENV_SCORE_WINDOWS,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a JSON array of forecast windows for one user. \
                 Preferences default to the generic profile; pass the JSON \
                 written by `swellmind train` as the model to personalise \
                 scores once enough sessions are logged.",
    about = "Score and rank forecast windows"
)]
#[ortho_config(prefix = "SWELLMIND")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON array of forecast windows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) windows: Option<Utf8PathBuf>,
    /// Path to the user's preferences as JSON.
    #[arg(long = ARG_PREFERENCES, value_name = "path")]
    #[serde(default)]
    pub(crate) preferences: Option<Utf8PathBuf>,
    /// Path to the user's model statistics as written by `train`.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Instant separating upcoming from past windows (RFC 3339).
    #[arg(long = ARG_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Windows kept on each side of `now`.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) windows: Utf8PathBuf,
    pub(crate) preferences: Option<Utf8PathBuf>,
    pub(crate) model: Option<Utf8PathBuf>,
    pub(crate) now: DateTime<Utc>,
    pub(crate) limit: usize,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.windows, ARG_WINDOWS)?;
        if let Some(path) = &self.preferences {
            require_existing(path, ARG_PREFERENCES)?;
        }
        if let Some(path) = &self.model {
            require_existing(path, ARG_MODEL)?;
        }
        Ok(())
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let windows = args.windows.ok_or(CliError::MissingArgument {
            field: ARG_WINDOWS,
            env: ENV_SCORE_WINDOWS,
        })?;
        Ok(Self {
            windows,
            preferences: args.preferences,
            model: args.model,
            now: args.now.unwrap_or_else(Utc::now),
            limit: args.limit.unwrap_or(DEFAULT_WINDOW_LIMIT),
        })
    }
}

/// JSON document printed by `score`.
#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    model_type: ModelType,
    windows: Vec<RankedWindow<'a>>,
}

#[derive(Debug, Serialize)]
struct RankedWindow<'a> {
    timestamp: DateTime<Utc>,
    score: u8,
    is_recommended: bool,
    explanation: &'a str,
    forecast: &'a ForecastObservation,
}

impl<'a> From<&'a ScoredWindow> for RankedWindow<'a> {
    fn from(window: &'a ScoredWindow) -> Self {
        Self {
            timestamp: window.forecast.timestamp,
            score: window.result.score(),
            is_recommended: window.result.is_recommended(),
            explanation: window.result.explanation(),
            forecast: &window.forecast,
        }
    }
}

pub(crate) fn run_score_with(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    execute_score(&config, writer)
}

pub(crate) fn execute_score(config: &ScoreConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let windows: Vec<ForecastObservation> = load_json(&config.windows)?;
    let preferences = match &config.preferences {
        Some(path) => load_preferences(path)?,
        None => UserPreferences::default(),
    };
    let stats: Option<UserModelStats> = config
        .model
        .as_deref()
        .map(load_json::<UserModelStats>)
        .transpose()?;
    let (model, session_count) = stats
        .as_ref()
        .map_or((None, 0), |stats| (stats.model.as_ref(), stats.num_sessions));

    let ranked = rank_windows(
        &windows,
        &preferences,
        model,
        session_count,
        config.now,
        config.limit,
    );
    let report = ScoreReport {
        model_type: WindowScorer::select(model, session_count).phase(),
        windows: ranked.iter().map(RankedWindow::from).collect(),
    };
    write_json(writer, &report)
}

/// Load and validate a preferences file.
pub(crate) fn load_preferences(path: &Utf8Path) -> Result<UserPreferences, CliError> {
    let preferences: UserPreferences = load_json(path)?;
    preferences
        .validate()
        .map_err(|source| CliError::InvalidPreferences {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(preferences)
}
