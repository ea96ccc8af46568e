//! Name-preference query submitted by a user.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    Boy,
    Girl,
    Neutral,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NameStyle {
    Traditional,
    Modern,
    Unique,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PopularityPreference {
    Popular,
    Uncommon,
    Balanced,
}

/// Inclusive range of birth years to draw popularity data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// What the parents are looking for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamePreferences {
    pub gender: GenderPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_background: Option<Vec<String>>,
    pub languages: Vec<Language>,
    pub surname: String,
    pub style: NameStyle,
    pub popularity_preference: PopularityPreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_range: Option<YearRange>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_client_payload() {
        let prefs: NamePreferences = serde_json::from_value(json!({
            "gender": "girl",
            "languages": ["english", "spanish"],
            "surname": "Garcia",
            "style": "traditional",
            "popularityPreference": "balanced",
            "yearRange": {"start": 1990, "end": 2020}
        }))
        .unwrap();

        assert_eq!(prefs.gender, GenderPreference::Girl);
        assert_eq!(prefs.languages, vec![Language::English, Language::Spanish]);
        assert_eq!(prefs.cultural_background, None);
        let range = prefs.year_range.unwrap();
        assert!(range.contains(2020));
        assert!(!range.contains(2021));
    }

    #[test]
    fn rejects_unknown_style() {
        let result = serde_json::from_value::<NamePreferences>(json!({
            "gender": "boy",
            "languages": ["english"],
            "surname": "Smith",
            "style": "retro",
            "popularityPreference": "popular"
        }));
        assert!(result.is_err());
    }
}
