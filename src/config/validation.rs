//! # Environment Validation
//!
//! Checks a rule table against an [`EnvSnapshot`] and collects every violation
//! in one pass, so a misconfigured deployment reports all of its problems at
//! once instead of one per restart.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use super::variables::{self, EnvVar, Rule, VarKind};
use super::{ConfigError, EnvSnapshot, ModeFlags};

/// What is wrong with a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    NotANumber { value: String },
    NotABoolean { value: String },
    PatternMismatch,
    /// None of the alternative variables carries a value.
    NoneOf { label: String, keys: Vec<String> },
}

/// A structured validation failure, rendered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub variable: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => {
                write!(f, "Missing required environment variable: {}", self.variable)
            }
            ViolationKind::NotANumber { value } => {
                write!(f, "{} must be a number, got: {}", self.variable, value)
            }
            ViolationKind::NotABoolean { value } => {
                write!(f, "{} must be 'true' or 'false', got: {}", self.variable, value)
            }
            ViolationKind::PatternMismatch => {
                write!(f, "{} does not match required pattern", self.variable)
            }
            ViolationKind::NoneOf { label, keys } => {
                write!(
                    f,
                    "At least one {} is required ({})",
                    label,
                    keys.join(" or ")
                )
            }
        }
    }
}

/// Every violation found by one validation pass, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// One rendered message per violation.
    pub fn lines(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Converts a non-empty report into the aggregate startup error.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::EnvironmentValidationFailed(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Validates the environment against the service's variable table.
pub fn validate(env: &EnvSnapshot) -> Result<(), ConfigError> {
    validate_rules(&variables::default_rules(), env)
}

/// Validates the environment against an arbitrary rule table.
pub fn validate_rules(rules: &[Rule], env: &EnvSnapshot) -> Result<(), ConfigError> {
    let report = check_rules(rules, env)?;
    if !report.is_empty() {
        tracing::warn!(
            violations = report.len(),
            "environment validation failed"
        );
    }
    report.into_result()
}

/// Runs the startup check: validation is skipped entirely in test mode.
pub fn startup_check(env: &EnvSnapshot) -> Result<(), ConfigError> {
    if ModeFlags::from_env(env).is_test {
        tracing::debug!("test mode, skipping environment validation");
        return Ok(());
    }
    validate(env)
}

/// Evaluates every rule and returns the collected report.
///
/// Only a malformed pattern in the rule table itself is returned as an error.
pub fn check_rules(rules: &[Rule], env: &EnvSnapshot) -> Result<ValidationReport, ConfigError> {
    let mut report = ValidationReport::default();

    for rule in rules {
        match rule {
            Rule::Variable(var) => {
                if let Some(kind) = check_variable(var, env)? {
                    report.violations.push(Violation {
                        variable: var.name.to_string(),
                        kind,
                    });
                }
            }
            Rule::AtLeastOneOf { label, keys } => {
                if keys.iter().all(|key| env.get(key).is_none()) {
                    report.violations.push(Violation {
                        variable: keys.join(" or "),
                        kind: ViolationKind::NoneOf {
                            label: label.to_string(),
                            keys: keys.iter().map(|key| key.to_string()).collect(),
                        },
                    });
                }
            }
        }
    }

    Ok(report)
}

fn check_variable(var: &EnvVar, env: &EnvSnapshot) -> Result<Option<ViolationKind>, ConfigError> {
    let Some(value) = env.get(var.name) else {
        return Ok(var.required.then_some(ViolationKind::Missing));
    };

    let violation = match var.kind {
        VarKind::Number if !is_numeric_literal(value) || parse_int(value).is_none() => {
            Some(ViolationKind::NotANumber {
                value: value.to_string(),
            })
        }
        VarKind::Boolean if value != "true" && value != "false" => {
            Some(ViolationKind::NotABoolean {
                value: value.to_string(),
            })
        }
        VarKind::String {
            pattern: Some(pattern),
        } => {
            let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                variable: var.name.to_string(),
                source,
            })?;
            (!regex.is_match(value)).then_some(ViolationKind::PatternMismatch)
        }
        _ => None,
    };

    Ok(violation)
}

/// Whether `value` reads as a number the way a browser's `Number()` would.
///
/// Surrounding whitespace is ignored and a blank value counts as zero.
/// Decimal, exponent, `0x`/`0o`/`0b` and `Infinity` forms are accepted.
pub(crate) fn is_numeric_literal(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return true;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return true;
    }

    // Rust also parses "inf" and "NaN", which are not numeric literals here.
    unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        && unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && trimmed.parse::<f64>().is_ok()
}

/// Reads the leading integer of `value` the way `parseInt` does.
///
/// Leading whitespace and a `+` sign are skipped, `0x`/`0X` switches to hex,
/// and parsing stops at the first non-digit, so `"2.5"` reads as 2 and
/// `"1e2"` as 1. Negative, empty and out-of-range values yield `None`.
pub(crate) fn parse_int(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    u32::from_str_radix(&digits[..end], radix).ok()
}
