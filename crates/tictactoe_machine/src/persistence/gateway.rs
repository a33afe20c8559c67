//! Session serialization on top of a [`KeyValueStore`].

use super::{KeyValueStore, PersistenceError, PersistenceErrorKind};
use crate::types::{Board, Player, PlayerMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Key the session is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "currentGame";

/// The part of a game that survives a restart.
///
/// Stored as `{board, currentPlayer, totalNumOfMoves, playerMode?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Board after the last accepted move.
    pub board: Board,
    /// Player who made the last accepted move.
    pub current_player: Player,
    /// Moves accepted so far.
    #[serde(rename = "totalNumOfMoves")]
    pub total_moves: u32,
    /// Mode chosen before the game started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_mode: Option<PlayerMode>,
}

/// Reads and writes the [`Session`] under a fixed key.
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Creates a gateway using [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Creates a gateway storing the session under `key`.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if encoding or the store write fails.
    #[instrument(skip(self, session), fields(key = %self.key, total_moves = session.total_moves))]
    pub fn save(&mut self, session: &Session) -> Result<(), PersistenceError> {
        let value = serde_json::to_string(session).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Serialization(e.to_string()))
        })?;
        self.store.set(&self.key, value)?;
        debug!("Session saved");
        Ok(())
    }

    /// Reads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceErrorKind::Deserialization`] error if a value is
    /// stored but is not a valid session, or a storage error if the read
    /// itself fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Option<Session>, PersistenceError> {
        let Some(value) = self.store.get(&self.key)? else {
            debug!("No stored session");
            return Ok(None);
        };

        let session: Session = serde_json::from_str(&value).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Deserialization(e.to_string()))
        })?;

        info!(
            total_moves = session.total_moves,
            current_player = %session.current_player,
            "Loaded stored session"
        );
        Ok(Some(session))
    }

    /// Removes the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the store cannot remove the key.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        debug!("Session cleared");
        Ok(())
    }
}
