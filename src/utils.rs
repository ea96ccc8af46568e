//! Small string, id and date helpers shared across the service.

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone};
use rand::Rng;
use regex::Regex;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Default cut-off used by [`truncate`] callers.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Shortens `text` to `length` characters, appending `...` when it was cut.
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(email)
}

/// Short opaque id: random base-36 digits followed by the base-36 timestamp.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let random: u64 = rng.r#gen();
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    format!("{}{}", to_base36(random), to_base36(millis))
}

/// Formats a timestamp like `Jan 5, 2025, 03:04 PM`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y, %I:%M %p").to_string()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
