//! Phonetic analysis, name generation requests and analytics events.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Phonetic fingerprint of a name as returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneticAnalysis {
    pub metaphone: String,
    pub soundex: String,
    pub syllables: u32,
    /// Stress level per syllable.
    pub stress: Vec<u8>,
    pub rhyme_pattern: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenerationType {
    Blend,
    New,
    Similar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConstraints {
    pub min_length: usize,
    pub max_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_with: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_with: Option<String>,
    /// Sounds the generator should steer away from. Matching these needs a
    /// phonetic analysis, so [`GenerationConstraints::admits`] does not check them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_sounds: Option<Vec<String>>,
}

impl GenerationConstraints {
    /// Checks the length and affix constraints against a candidate name.
    ///
    /// `avoid_sounds` is ignored here: spelling says little about sound, so
    /// that constraint is left to the phonetic analysis service.
    pub fn admits(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        let lower = candidate.to_lowercase();
        (self.min_length..=self.max_length).contains(&len)
            && self
                .starts_with
                .as_ref()
                .is_none_or(|prefix| lower.starts_with(&prefix.to_lowercase()))
            && self
                .ends_with
                .as_ref()
                .is_none_or(|suffix| lower.ends_with(&suffix.to_lowercase()))
    }
}

/// Request for invented or blended names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameGenerationOptions {
    #[serde(rename = "type")]
    pub kind: GenerationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_names: Option<Vec<String>>,
    pub constraints: GenerationConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventType {
    Search,
    SuggestionClick,
    Favorite,
    Generation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsEvent {
    #[serde(rename = "type")]
    pub kind: AnalyticsEventType,
    pub data: BTreeMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(kind: AnalyticsEventType) -> Self {
        Self {
            kind,
            data: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constraints_check_length_and_affixes() {
        let constraints = GenerationConstraints {
            min_length: 3,
            max_length: 6,
            starts_with: Some("El".to_string()),
            ends_with: None,
            avoid_sounds: None,
        };
        assert!(constraints.admits("Elena"));
        assert!(constraints.admits("ELISA"));
        assert!(!constraints.admits("Eleanora"));
        assert!(!constraints.admits("Ana"));
    }

    #[test]
    fn avoid_sounds_does_not_filter_by_spelling() {
        let constraints = GenerationConstraints {
            min_length: 3,
            max_length: 8,
            starts_with: None,
            ends_with: None,
            avoid_sounds: Some(vec!["sh".to_string()]),
        };
        assert!(constraints.admits("Sasha"));
        assert!(!constraints.admits("Al"));
    }

    #[test]
    fn generation_options_use_type_key() {
        let options: NameGenerationOptions = serde_json::from_value(json!({
            "type": "blend",
            "sourceNames": ["Mia", "Leo"],
            "constraints": {"minLength": 3, "maxLength": 8}
        }))
        .unwrap();
        assert_eq!(options.kind, GenerationType::Blend);
        assert_eq!(options.constraints.starts_with, None);
    }

    #[test]
    fn analytics_event_serializes_snake_case_type() {
        let event = AnalyticsEvent::new(AnalyticsEventType::SuggestionClick).with("name", "Olivia");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "suggestion_click");
        assert_eq!(json["data"]["name"], "Olivia");
    }
}
