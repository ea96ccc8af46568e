//! # Data Models
//!
//! Wire shapes of the name-recommendation domain: preferences, name records,
//! chat messages with suggestions, user sessions, the API envelope and the
//! rate-limit window. These are contracts only; scoring, phonetic matching
//! and credit accounting are provided by the recommendation service.

pub mod analysis;
pub mod chat;
pub mod name;
pub mod preferences;
pub mod rate_limit;
pub mod response;
pub mod session;

pub use analysis::{AnalyticsEvent, NameGenerationOptions, PhoneticAnalysis};
pub use chat::{ChatMessage, MessageType, NameSuggestion};
pub use name::Name;
pub use preferences::NamePreferences;
pub use rate_limit::RateLimit;
pub use response::{ApiResponse, AppError};
pub use session::UserSession;
