//! Chat transcript entries and the name suggestions attached to them.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::name::Name;
use crate::utils::generate_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Assistant,
    System,
}

/// A suggested name with the reasoning behind it.
///
/// `score` and `phonetic_match` are produced by the recommendation service and
/// are the only ranking basis for suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameSuggestion {
    pub name: Name,
    pub score: f64,
    pub reasons: Vec<String>,
    pub phonetic_match: f64,
    pub nickname_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_spellings: Option<Vec<String>>,
}

impl NameSuggestion {
    /// Orders by `score`, then `phonetic_match`, best first.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.phonetic_match.total_cmp(&self.phonetic_match))
    }
}

/// Sorts suggestions best first; ties keep their original order.
pub fn rank_suggestions(suggestions: &mut [NameSuggestion]) {
    suggestions.sort_by(NameSuggestion::ranking_cmp);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<NameSuggestion>>,
    /// Credit balance after this message, when it consumed credits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

impl ChatMessage {
    pub fn new(kind: MessageType, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            suggestions: None,
            credits: None,
        }
    }

    pub fn with_suggestions(mut self, mut suggestions: Vec<NameSuggestion>) -> Self {
        rank_suggestions(&mut suggestions);
        self.suggestions = Some(suggestions);
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::name::{Gender, Pronunciations};

    fn suggestion(name: &str, score: f64, phonetic_match: f64) -> NameSuggestion {
        NameSuggestion {
            name: Name {
                name: name.to_string(),
                gender: Gender::Neutral,
                origin: "Latin".to_string(),
                meaning: "test".to_string(),
                popularity: Vec::new(),
                pronunciations: Pronunciations::default(),
                nicknames: Vec::new(),
                famous_people: None,
                cultural_variations: None,
            },
            score,
            reasons: vec!["fits the surname".to_string()],
            phonetic_match,
            nickname_options: Vec::new(),
            alternative_spellings: None,
        }
    }

    #[test]
    fn suggestions_rank_by_score_then_phonetic_match() {
        let message = ChatMessage::new(MessageType::Assistant, "Here are some ideas").with_suggestions(vec![
            suggestion("Ana", 0.7, 0.9),
            suggestion("Luna", 0.9, 0.2),
            suggestion("Lucia", 0.7, 0.95),
        ]);

        let order: Vec<_> = message
            .suggestions
            .unwrap()
            .into_iter()
            .map(|s| s.name.name)
            .collect();
        assert_eq!(order, vec!["Luna", "Lucia", "Ana"]);
    }

    #[test]
    fn message_type_serializes_as_type_field() {
        let message = ChatMessage::new(MessageType::User, "Names like Mateo?").with_credits(2990);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "user");
        assert_eq!(json["credits"], 2990);
        assert!(json.get("suggestions").is_none());
        assert!(!message.id.is_empty());
    }
}
