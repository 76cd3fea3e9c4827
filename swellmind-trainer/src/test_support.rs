//! In-memory collaborators for worker tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use swellmind_core::{SessionRecord, UserId, UserModelStats};
use tokio::sync::RwLock;

use crate::{CollaboratorError, ModelSink, SessionSource};

/// [`SessionSource`] backed by a map of users to sessions.
///
/// Unknown users have no sessions.
#[derive(Debug, Default)]
pub struct MemorySessionSource {
    sessions: RwLock<BTreeMap<UserId, Vec<SessionRecord>>>,
}

impl MemorySessionSource {
    /// Create a source holding one user's sessions.
    #[must_use]
    pub fn with_sessions(user_id: UserId, sessions: Vec<SessionRecord>) -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::from([(user_id, sessions)])),
        }
    }

    /// Replace a user's sessions.
    pub async fn replace(&self, user_id: UserId, sessions: Vec<SessionRecord>) {
        self.sessions.write().await.insert(user_id, sessions);
    }
}

#[async_trait]
impl SessionSource for MemorySessionSource {
    async fn load_sessions(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SessionRecord>, CollaboratorError> {
        Ok(self
            .sessions
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// [`SessionSource`] that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSessionSource;

#[async_trait]
impl SessionSource for UnavailableSessionSource {
    async fn load_sessions(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<SessionRecord>, CollaboratorError> {
        Err(CollaboratorError::Unavailable {
            message: "session store offline".to_owned(),
        })
    }
}

/// [`ModelSink`] that records the latest stats per user and counts writes.
#[derive(Debug, Default)]
pub struct MemoryModelSink {
    models: RwLock<BTreeMap<UserId, UserModelStats>>,
    writes: RwLock<usize>,
}

impl MemoryModelSink {
    /// Return the stats most recently stored for a user.
    pub async fn stored(&self, user_id: &UserId) -> Option<UserModelStats> {
        self.models.read().await.get(user_id).cloned()
    }

    /// Return the number of successful writes.
    pub async fn writes(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl ModelSink for MemoryModelSink {
    async fn store_model(
        &self,
        user_id: &UserId,
        stats: UserModelStats,
    ) -> Result<(), CollaboratorError> {
        self.models.write().await.insert(user_id.clone(), stats);
        *self.writes.write().await += 1;
        Ok(())
    }
}
