//! Per-user model training for SwellMind.
//!
//! [`ModelTrainer`] fits a [`UserModel`](swellmind_core::UserModel) from a
//! user's linked sessions using any
//! [`Regressor`](swellmind_core::Regressor), falling back to the fixed
//! approximation when the regressor cannot produce a usable fit.
//!
//! [`RetrainWorker`] keeps models fresh in the background. The session write
//! path calls [`RetrainHandle::notify`], which queues a
//! [`SessionSetChanged`] event and returns immediately; the worker reloads
//! the user's sessions through a [`SessionSource`], retrains, and stores the
//! result through a [`ModelSink`]. Failures are logged, never reported back
//! to the caller that triggered the retrain.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod trainer;
mod worker;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use trainer::{DefaultRegressor, ModelTrainer, default_regressor, default_trainer};
pub use worker::{
    CollaboratorError, ModelSink, RetrainError, RetrainHandle, RetrainWorker, SessionSetChanged,
    SessionSource,
};
