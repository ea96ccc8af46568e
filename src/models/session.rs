//! Per-user chat session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::chat::ChatMessage;
use super::preferences::NamePreferences;

/// Messages, preferences, credit balance and favorites of one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<NamePreferences>,
    /// Remaining credits; only ever decreases as queries are charged.
    pub credits: u32,
    pub messages: Vec<ChatMessage>,
    pub favorite_names: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl UserSession {
    /// Opens a session with the configured starting balance.
    pub fn new(default_credits: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            preferences: None,
            credits: default_credits,
            messages: Vec::new(),
            favorite_names: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.last_activity = message.timestamp.max(self.last_activity);
        self.messages.push(message);
    }

    /// Adds a favorite; returns false when it was already saved.
    pub fn add_favorite(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.favorite_names.contains(&name) {
            return false;
        }
        self.favorite_names.push(name);
        true
    }
}
