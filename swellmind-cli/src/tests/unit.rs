//! Focused unit tests covering command configuration and execution.

use super::helpers::{Workspace, ideal_window, morning_preferences, output_json, write_utf8};
use super::*;
use crate::insights::{InsightsArgs, InsightsConfig, execute_insights};
use crate::score::{ScoreArgs, ScoreConfig, execute_score, load_preferences};
use crate::train::{TrainArgs, TrainConfig, execute_train};
use rstest::rstest;
use swellmind_core::test_support::{alternating_sessions, july, messy_forecast};
use swellmind_core::{PreferencesError, UserPreferences};
use swellmind_scorer::DEFAULT_WINDOW_LIMIT;

fn score_config(workspace: &Workspace) -> ScoreConfig {
    let windows = vec![
        ideal_window(july(1, 7)),
        messy_forecast(july(2, 7)),
        ideal_window(july(3, 7)),
    ];
    ScoreConfig {
        windows: workspace.write_json("windows.json", &windows),
        preferences: Some(workspace.write_json("preferences.json", &morning_preferences())),
        model: None,
        now: july(2, 0),
        limit: DEFAULT_WINDOW_LIMIT,
    }
}

#[rstest]
fn converting_score_without_windows_errors() {
    let err = ScoreConfig::try_from(ScoreArgs::default()).expect_err("missing windows");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_WINDOWS);
            assert_eq!(env, ENV_SCORE_WINDOWS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_train_and_insights_without_sessions_errors() {
    let train = TrainConfig::try_from(TrainArgs::default()).expect_err("missing sessions");
    assert!(matches!(
        train,
        CliError::MissingArgument { field: ARG_SESSIONS, env: ENV_TRAIN_SESSIONS }
    ));
    let insights = InsightsConfig::try_from(InsightsArgs::default()).expect_err("missing sessions");
    assert!(matches!(
        insights,
        CliError::MissingArgument { field: ARG_SESSIONS, env: ENV_INSIGHTS_SESSIONS }
    ));
}

#[rstest]
fn score_config_applies_defaults() {
    let args = ScoreArgs {
        windows: Some("windows.json".into()),
        now: Some(july(5, 12)),
        ..ScoreArgs::default()
    };
    let config = ScoreConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, DEFAULT_WINDOW_LIMIT);
    assert_eq!(config.now, july(5, 12));
    assert_eq!(config.preferences, None);
    assert_eq!(config.model, None);
}

#[rstest]
fn validate_sources_reports_missing_preferences() {
    let workspace = Workspace::new();
    let mut config = score_config(&workspace);
    config.preferences = Some(workspace.path("absent.json"));
    match config.validate_sources().expect_err("expected failure") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_PREFERENCES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let mut config = score_config(&workspace);
    let directory = workspace.path("windows");
    std::fs::create_dir(&directory).expect("windows directory");
    config.windows = directory.clone();
    match config.validate_sources().expect_err("expected failure") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_WINDOWS);
            assert_eq!(path, directory);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_preferences_rejects_inverted_ranges() {
    let workspace = Workspace::new();
    let inverted = UserPreferences {
        ideal_wave_size_min: 2.5,
        ideal_wave_size_max: 1.0,
        ..UserPreferences::default()
    };
    let path = workspace.write_json("preferences.json", &inverted);
    match load_preferences(&path).expect_err("expected validation failure") {
        CliError::InvalidPreferences { source, .. } => assert_eq!(
            source,
            PreferencesError::InvertedWaveRange { min: 2.5, max: 1.0 }
        ),
        other => panic!("expected InvalidPreferences, found {other:?}"),
    }
}

#[rstest]
fn malformed_json_is_reported_with_its_path() {
    let workspace = Workspace::new();
    let path = workspace.path("sessions.json");
    write_utf8(&path, b"{ not valid json");
    let config = TrainConfig {
        sessions: path.clone(),
        now: july(5, 0),
    };
    let mut buffer = Vec::new();
    match execute_train(&config, &mut buffer).expect_err("expected parse failure") {
        CliError::ParseInput { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn score_ranks_upcoming_windows_before_past_ones() {
    let workspace = Workspace::new();
    let mut buffer = Vec::new();
    execute_score(&score_config(&workspace), &mut buffer).expect("score succeeds");

    let output = output_json(&buffer);
    assert_eq!(output["model_type"], "generic");
    let windows = output["windows"].as_array().expect("windows array");
    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0]["score"], 99);
    assert_eq!(windows[0]["is_recommended"], true);
    assert_eq!(
        windows[0]["timestamp"],
        serde_json::to_value(july(3, 7)).expect("timestamp")
    );
    assert_eq!(
        windows[2]["timestamp"],
        serde_json::to_value(july(1, 7)).expect("timestamp")
    );
}

#[rstest]
fn score_limit_caps_each_side_of_now() {
    let workspace = Workspace::new();
    let mut config = score_config(&workspace);
    config.limit = 1;
    let mut buffer = Vec::new();
    execute_score(&config, &mut buffer).expect("score succeeds");
    let output = output_json(&buffer);
    assert_eq!(output["windows"].as_array().map(Vec::len), Some(2));
}

#[rstest]
fn trained_model_switches_scoring_to_blended() {
    let workspace = Workspace::new();
    let train = TrainConfig {
        sessions: workspace.write_json("sessions.json", &alternating_sessions(4)),
        now: july(5, 0),
    };
    let mut model = Vec::new();
    execute_train(&train, &mut model).expect("train succeeds");
    let trained = output_json(&model);
    assert_eq!(trained["num_sessions"], 4);
    assert_eq!(trained["model_type"], "blended");
    assert!(trained["model"].is_object());

    let model_path = workspace.path("model.json");
    write_utf8(&model_path, &model);
    let mut config = score_config(&workspace);
    config.model = Some(model_path);
    let mut buffer = Vec::new();
    execute_score(&config, &mut buffer).expect("score succeeds");
    assert_eq!(output_json(&buffer)["model_type"], "blended");
}

#[rstest]
fn insights_report_asks_for_more_sessions() {
    let workspace = Workspace::new();
    let config = InsightsConfig {
        sessions: workspace.write_json("sessions.json", &alternating_sessions(2)),
        now: july(5, 0),
    };
    let mut buffer = Vec::new();
    execute_insights(&config, &mut buffer).expect("insights succeed");
    let output = output_json(&buffer);
    assert!(output["insights"].is_null());
    assert_eq!(output["message"], "Log 1 more session(s) to unlock insights");
    assert_eq!(output["statistics"]["total_sessions"], 2);
}

#[rstest]
fn score_flags_parse_into_arguments() {
    let cli = Cli::try_parse_from([
        "swellmind",
        "score",
        "windows.json",
        "--limit",
        "5",
        "--now",
        "2024-07-02T00:00:00Z",
    ])
    .expect("arguments parse");
    match cli.command {
        Command::Score(args) => {
            assert_eq!(args.windows.as_deref().map(|path| path.as_str()), Some("windows.json"));
            assert_eq!(args.limit, Some(5));
            assert_eq!(args.now, Some(july(2, 0)));
        }
        other => panic!("expected score command, found {other:?}"),
    }
}
