#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for model training.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use swellmind_core::test_support::{
    alternating_samples, alternating_sessions, clean_forecast, july, messy_forecast, rating,
    varied_sessions,
};
use swellmind_core::{
    FixedApproximation, ModelType, SessionRecord, UserModelStats, extract_features,
};
use swellmind_regressor_ols::FullOls;
use swellmind_trainer::ModelTrainer;

/// Shared state for one scenario run.
pub struct TrainingWorld {
    sessions: RefCell<Vec<SessionRecord>>,
    stats: RefCell<Option<UserModelStats>>,
}

#[fixture]
/// Build an empty world for each scenario.
pub fn world() -> TrainingWorld {
    TrainingWorld {
        sessions: RefCell::new(Vec::new()),
        stats: RefCell::new(None),
    }
}

fn stats(world: &TrainingWorld) -> UserModelStats {
    world
        .stats
        .borrow()
        .clone()
        .expect("the trainer should have run")
}

#[given("a history of two linked sessions")]
fn two_linked(world: &TrainingWorld) {
    *world.sessions.borrow_mut() = alternating_sessions(2);
}

#[given("a history of three linked sessions")]
fn three_linked(world: &TrainingWorld) {
    *world.sessions.borrow_mut() = alternating_sessions(3);
}

#[given("a history of ten linked sessions")]
fn ten_linked(world: &TrainingWorld) {
    *world.sessions.borrow_mut() = alternating_sessions(10);
}

#[given("a varied history of ten linked sessions")]
fn varied_history(world: &TrainingWorld) {
    *world.sessions.borrow_mut() = varied_sessions();
}

#[given("one session without a forecast")]
fn one_unlinked(world: &TrainingWorld) {
    world
        .sessions
        .borrow_mut()
        .push(SessionRecord::new("pipeline", july(28, 12), rating(8)));
}

#[when("the trainer retrains with the fixed approximation")]
fn retrain_fixed(world: &TrainingWorld) {
    let trainer = ModelTrainer::new(FixedApproximation);
    let result = trainer.retrain(&world.sessions.borrow(), july(30, 0));
    *world.stats.borrow_mut() = Some(result);
}

#[when("the trainer retrains with least squares")]
fn retrain_ols(world: &TrainingWorld) {
    let trainer = ModelTrainer::new(FullOls::new());
    let result = trainer.retrain(&world.sessions.borrow(), july(30, 0));
    *world.stats.borrow_mut() = Some(result);
}

#[then("no model is produced")]
fn no_model(world: &TrainingWorld) {
    assert!(stats(world).model.is_none());
}

#[then("a model is produced")]
fn has_model(world: &TrainingWorld) {
    assert!(stats(world).model.is_some());
}

#[then("the phase is generic")]
fn phase_generic(world: &TrainingWorld) {
    assert_eq!(stats(world).model_type, ModelType::Generic);
}

#[then("the phase is blended")]
fn phase_blended(world: &TrainingWorld) {
    assert_eq!(stats(world).model_type, ModelType::Blended);
}

#[then("the phase is learned")]
fn phase_learned(world: &TrainingWorld) {
    assert_eq!(stats(world).model_type, ModelType::Learned);
}

#[then("two sessions are counted")]
fn two_counted(world: &TrainingWorld) {
    assert_eq!(stats(world).num_sessions, 2);
}

#[then("the model matches the fixed approximation")]
fn matches_fixed(world: &TrainingWorld) {
    let expected = ModelTrainer::new(FixedApproximation)
        .train(&alternating_samples(10))
        .expect("fixed approximation fits");
    assert_eq!(stats(world).model, Some(expected));
}

#[then("the model prefers the clean conditions")]
fn prefers_clean(world: &TrainingWorld) {
    let model = stats(world).model.expect("model trained");
    let clean = model.predict(&extract_features(&clean_forecast(july(1, 6))));
    let messy = model.predict(&extract_features(&messy_forecast(july(1, 6))));
    assert!(clean > messy, "clean {clean} should beat messy {messy}");
}

#[scenario(path = "tests/features/model_training.feature", index = 0)]
fn two_sessions_are_not_enough(world: TrainingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/model_training.feature", index = 1)]
fn three_sessions_train_a_model(world: TrainingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/model_training.feature", index = 2)]
fn unlinked_sessions_do_not_count(world: TrainingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/model_training.feature", index = 3)]
fn least_squares_separates_conditions(world: TrainingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/model_training.feature", index = 4)]
fn least_squares_falls_back_on_repeats(world: TrainingWorld) {
    let _ = world;
}
