use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieCard;

/// Who produced a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Sender::User),
            "bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}

/// A single turn in a chat session
///
/// Messages are append-only: once stored they are never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Movies recommended in this turn (empty for plain chat)
    #[serde(default)]
    pub movies: Vec<MovieCard>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a message stamped with the current time
    pub fn new(sender: Sender, text: impl Into<String>, movies: Vec<MovieCard>) -> Self {
        Self {
            sender,
            text: text.into(),
            movies,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_message_round_trip() {
        let msg = Message::new(Sender::Bot, "Hello!", vec![]);
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
        assert!(back.movies.is_empty());
    }
}
