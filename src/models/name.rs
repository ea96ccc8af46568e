//! Name records with popularity history and pronunciation metadata.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boy,
    Girl,
    Neutral,
}

/// Popularity of a name in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PopularityEntry {
    pub year: i32,
    pub rank: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pronunciations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spanish: Option<String>,
}

/// The same name in another language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CulturalVariation {
    pub language: String,
    pub variation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub name: String,
    pub gender: Gender,
    pub origin: String,
    pub meaning: String,
    pub popularity: Vec<PopularityEntry>,
    pub pronunciations: Pronunciations,
    pub nicknames: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub famous_people: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_variations: Option<Vec<CulturalVariation>>,
}

impl Name {
    /// Popularity entry for the most recent year on record.
    pub fn latest_popularity(&self) -> Option<&PopularityEntry> {
        self.popularity.iter().max_by_key(|entry| entry.year)
    }
}
