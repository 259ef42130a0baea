/// Chat history persistence
///
/// An append-only, session-keyed message log. Sessions exist implicitly:
/// they come into being on first append and are never deleted. There are no
/// update or delete operations by design.
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::{
    error::{AppError, AppResult},
    models::{Message, Sender},
};

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one message to a session's log.
    async fn append(&self, session_id: &str, message: &Message) -> AppResult<()>;

    /// Returns a session's messages in insertion order, empty when the
    /// session is unknown.
    async fn history(&self, session_id: &str) -> AppResult<Vec<Message>>;
}

/// Postgres-backed store over the `chat_messages` table
#[derive(Clone)]
pub struct PostgresHistoryStore {
    pool: PgPool,
}

impl PostgresHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HistoryStore for PostgresHistoryStore {
    async fn append(&self, session_id: &str, message: &Message) -> AppResult<()> {
        let movies = serde_json::to_string(&message.movies)
            .map_err(|e| AppError::Internal(format!("Failed to encode movies: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO chat_messages (user_session_id, sender, text, movies, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session_id)
        .bind(message.sender.as_str())
        .bind(&message.text)
        .bind(movies)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn history(&self, session_id: &str) -> AppResult<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT sender, text, movies, created_at
            FROM chat_messages
            WHERE user_session_id = $1
            ORDER BY id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in rows {
            let sender: String = row.try_get("sender")?;
            let sender = Sender::parse(&sender)
                .ok_or_else(|| AppError::Internal(format!("Unknown sender: {}", sender)))?;
            let movies: String = row.try_get("movies")?;
            let movies = serde_json::from_str(&movies)
                .map_err(|e| AppError::Internal(format!("Failed to decode movies: {}", e)))?;
            let timestamp: DateTime<Utc> = row.try_get("created_at")?;

            messages.push(Message {
                sender,
                text: row.try_get("text")?,
                movies,
                timestamp,
            });
        }

        Ok(messages)
    }
}

/// In-memory store used by tests and local development without a database
#[derive(Default)]
pub struct MemoryHistoryStore {
    sessions: Mutex<HashMap<String, Vec<Message>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, session_id: &str, message: &Message) -> AppResult<()> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| AppError::Internal("History lock poisoned".to_string()))?;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn history(&self, session_id: &str) -> AppResult<Vec<Message>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| AppError::Internal("History lock poisoned".to_string()))?;
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = MemoryHistoryStore::new();
        assert!(store.history("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order_per_session() {
        let store = MemoryHistoryStore::new();
        store
            .append("s1", &Message::new(Sender::User, "first", vec![]))
            .await
            .unwrap();
        store
            .append("s1", &Message::new(Sender::Bot, "second", vec![]))
            .await
            .unwrap();
        store
            .append("s2", &Message::new(Sender::User, "other session", vec![]))
            .await
            .unwrap();

        let history = store.history("s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "first");
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(history[1].text, "second");
        assert_eq!(history[1].sender, Sender::Bot);

        assert_eq!(store.history("s2").await.unwrap().len(), 1);
    }
}
