//! Background retraining driven by session-set change events.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use swellmind_core::{Regressor, SessionRecord, UserId, UserModelStats};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::ModelTrainer;

/// Published whenever a user's sessions are created, updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSetChanged {
    /// User whose session set changed.
    pub user_id: UserId,
}

/// Failure reported by a [`SessionSource`] or [`ModelSink`].
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The backing store could not be reached.
    #[error("collaborator unavailable: {message}")]
    Unavailable {
        /// Description supplied by the collaborator.
        message: String,
    },
    /// The backing store rejected or failed the request.
    #[error("collaborator backend failed")]
    Backend {
        /// Underlying backend error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure of a single retrain.
#[derive(Debug, Error)]
pub enum RetrainError {
    /// Sessions could not be loaded.
    #[error("failed to load sessions for user {user_id}")]
    LoadSessions {
        /// User being retrained.
        user_id: UserId,
        /// Collaborator failure.
        #[source]
        source: CollaboratorError,
    },
    /// The trained model could not be stored.
    #[error("failed to store model for user {user_id}")]
    StoreModel {
        /// User being retrained.
        user_id: UserId,
        /// Collaborator failure.
        #[source]
        source: CollaboratorError,
    },
}

/// Loads a user's complete session history.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Return every session the user has logged, linked or not.
    async fn load_sessions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SessionRecord>, CollaboratorError>;
}

/// Persists retrained model statistics, replacing any previous record.
#[async_trait]
pub trait ModelSink: Send + Sync {
    /// Store `stats` as the user's current model.
    async fn store_model(
        &self,
        user_id: &UserId,
        stats: UserModelStats,
    ) -> Result<(), CollaboratorError>;
}

#[async_trait]
impl<T: SessionSource + ?Sized> SessionSource for Arc<T> {
    async fn load_sessions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SessionRecord>, CollaboratorError> {
        (**self).load_sessions(user_id).await
    }
}

#[async_trait]
impl<T: ModelSink + ?Sized> ModelSink for Arc<T> {
    async fn store_model(
        &self,
        user_id: &UserId,
        stats: UserModelStats,
    ) -> Result<(), CollaboratorError> {
        (**self).store_model(user_id, stats).await
    }
}

/// Publishing side of the retrain queue, held by the session write path.
#[derive(Debug, Clone)]
pub struct RetrainHandle {
    sender: UnboundedSender<SessionSetChanged>,
}

impl RetrainHandle {
    /// Queue a retrain for `user_id` and return immediately.
    ///
    /// When the worker has stopped the event is dropped with a warning; the
    /// caller's write is never affected.
    pub fn notify(&self, user_id: UserId) {
        if let Err(err) = self.sender.send(SessionSetChanged { user_id }) {
            log::warn!(
                "retrain worker stopped; dropping retrain for user {}",
                err.0.user_id
            );
        }
    }
}

/// Consumes [`SessionSetChanged`] events and retrains the affected users.
///
/// Each retrain works on the session snapshot it loaded. Retrains of the
/// same user are not ordered against each other; whichever stores last wins.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use swellmind_core::{FixedApproximation, UserId};
/// use swellmind_core::test_support::alternating_sessions;
/// use swellmind_trainer::test_support::{MemoryModelSink, MemorySessionSource};
/// use swellmind_trainer::{ModelTrainer, RetrainWorker};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let user = UserId::new("surfer-1");
/// let source = MemorySessionSource::with_sessions(user.clone(), alternating_sessions(4));
/// let sink = Arc::new(MemoryModelSink::default());
///
/// let (handle, worker) =
///     RetrainWorker::channel(source, Arc::clone(&sink), ModelTrainer::new(FixedApproximation));
/// let task = worker.spawn();
/// handle.notify(user.clone());
/// drop(handle);
/// task.await.expect("worker task completes");
///
/// let stats = sink.stored(&user).await.expect("model stored");
/// assert_eq!(stats.num_sessions, 4);
/// # }
/// ```
#[derive(Debug)]
pub struct RetrainWorker<S, K, R> {
    source: S,
    sink: K,
    trainer: ModelTrainer<R>,
    receiver: UnboundedReceiver<SessionSetChanged>,
}

impl<S, K, R> RetrainWorker<S, K, R>
where
    S: SessionSource,
    K: ModelSink,
    R: Regressor,
{
    /// Create a worker and the handle that feeds it.
    ///
    /// The worker stops once every clone of the handle has been dropped and
    /// the queue is drained.
    #[must_use]
    pub fn channel(source: S, sink: K, trainer: ModelTrainer<R>) -> (RetrainHandle, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = Self {
            source,
            sink,
            trainer,
            receiver,
        };
        (RetrainHandle { sender }, worker)
    }

    /// Retrain one user immediately and store the result.
    ///
    /// # Errors
    /// Returns [`RetrainError`] when sessions cannot be loaded or the model
    /// cannot be stored.
    pub async fn retrain_user(&self, user_id: &UserId) -> Result<UserModelStats, RetrainError> {
        let sessions = self
            .source
            .load_sessions(user_id)
            .await
            .map_err(|source| RetrainError::LoadSessions {
                user_id: user_id.clone(),
                source,
            })?;
        let stats = self.trainer.retrain(&sessions, Utc::now());
        self.sink
            .store_model(user_id, stats.clone())
            .await
            .map_err(|source| RetrainError::StoreModel {
                user_id: user_id.clone(),
                source,
            })?;
        log::debug!(
            "retrained user {user_id}: {} sessions, {} phase",
            stats.num_sessions,
            stats.model_type
        );
        Ok(stats)
    }

    /// Process events until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(event) = self.receiver.recv().await {
            if let Err(err) = self.retrain_user(&event.user_id).await {
                log::warn!("{err}: {}", error_source(&err));
            }
        }
        log::debug!("retrain queue closed; worker exiting");
    }

    /// Run the worker on the current tokio runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()>
    where
        S: 'static,
        K: 'static,
        R: 'static,
    {
        tokio::spawn(self.run())
    }
}

const fn error_source(err: &RetrainError) -> &CollaboratorError {
    match err {
        RetrainError::LoadSessions { source, .. } | RetrainError::StoreModel { source, .. } => {
            source
        }
    }
}
