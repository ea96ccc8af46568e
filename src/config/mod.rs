//! Configuration loading for the Name Advisor service.
//!
//! Loads layered `.env` files and the process environment into an
//! [`EnvSnapshot`], validates it against the variable table in
//! [`variables`], and resolves a typed [`ResolvedConfig`].

pub mod validation;
pub mod variables;

use std::{collections::BTreeMap, env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::validation::ValidationReport;
use self::variables::EnvVar;

const REDACTED: &str = "[REDACTED]";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}")]
    MissingConfiguration { key: String },
    #[error("{key} must be a whole number, got: {value}")]
    InvalidConfiguration { key: String, value: String },
    #[error("Environment validation failed:\n{0}")]
    EnvironmentValidationFailed(ValidationReport),
    #[error("invalid validation pattern for {variable}: {source}")]
    InvalidPattern {
        variable: String,
        source: regex::Error,
    },
    #[error("failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Point-in-time view of the environment variables visible to the service.
///
/// Empty values are indistinguishable from absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment.
    pub fn from_process() -> Self {
        env::vars().collect()
    }

    /// Returns the value of `key`, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Resolves `key`, falling back to `default`.
    ///
    /// Fails with [`ConfigError::MissingConfiguration`] when the key is absent
    /// and no default was supplied.
    pub fn resolve(&self, key: &str, default: Option<&str>) -> Result<String, ConfigError> {
        self.get(key)
            .or(default)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingConfiguration {
                key: key.to_string(),
            })
    }

    /// Resolves a table variable using its declared default.
    ///
    /// In test mode a missing required variable falls back to its fixture, so
    /// tests can build a config without supplying every credential.
    pub fn resolve_var(&self, var: &EnvVar) -> Result<String, ConfigError> {
        let fallback = var
            .default
            .or_else(|| var.fixture.filter(|_| ModeFlags::from_env(self).is_test));
        self.resolve(var.name, fallback)
    }

    /// Resolves a numeric table variable to its leading integer.
    ///
    /// Uses the same reading as the validator's number rule, so every value
    /// that validates also resolves.
    pub fn resolve_number(&self, var: &EnvVar) -> Result<u32, ConfigError> {
        let value = self.resolve_var(var)?;
        validation::parse_int(&value).ok_or(ConfigError::InvalidConfiguration {
            key: var.name.to_string(),
            value,
        })
    }

    /// Value of an optional variable with no default.
    pub fn optional(&self, var: &EnvVar) -> Option<String> {
        self.get(var.name).map(str::to_string)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Execution-mode flags derived from `NODE_ENV`.
///
/// Each flag is an exact comparison against its literal, so an unset or
/// unrecognized mode (e.g. `"staging"`) leaves all three false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeFlags {
    pub is_development: bool,
    pub is_production: bool,
    pub is_test: bool,
}

impl ModeFlags {
    pub fn from_node_env(node_env: Option<&str>) -> Self {
        Self {
            is_development: node_env == Some("development"),
            is_production: node_env == Some("production"),
            is_test: node_env == Some("test"),
        }
    }

    pub fn from_env(env: &EnvSnapshot) -> Self {
        Self::from_node_env(env.get(variables::NODE_ENV))
    }
}

/// Mode name used for display and env-file selection; `development` when unset.
pub fn mode_name(env: &EnvSnapshot) -> &str {
    env.get(variables::NODE_ENV).unwrap_or("development")
}

/// Which LLM provider backs the chat feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

/// Firebase client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

/// Firebase admin credentials (server side only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseAdminConfig {
    pub project_id: String,
    /// PEM key with escaped `\n` sequences expanded to real newlines.
    pub private_key: String,
    pub client_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    pub provider: LlmProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PineconeConfig {
    pub api_key: String,
    pub environment: String,
    pub index_name: String,
}

/// Public application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub default_credits: u32,
    pub credit_cost_per_query: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalApisConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behind_the_name_api_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ga_id: Option<String>,
}

/// Request quotas per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    pub per_minute: u32,
    pub per_hour: u32,
}

/// Fully defaulted, typed configuration built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub node_env: String,
    #[serde(flatten)]
    pub mode: ModeFlags,
    pub firebase: FirebaseConfig,
    pub firebase_admin: FirebaseAdminConfig,
    pub llm: LlmConfig,
    pub pinecone: PineconeConfig,
    pub app: AppSettings,
    pub external_apis: ExternalApisConfig,
    pub analytics: AnalyticsConfig,
    pub rate_limit: RateLimitConfig,
}

impl ResolvedConfig {
    /// Resolves every section from `env`.
    ///
    /// Required variables without a value fail here with
    /// [`ConfigError::MissingConfiguration`]; numeric variables that do not
    /// parse fail with [`ConfigError::InvalidConfiguration`].
    pub fn from_env(env: &EnvSnapshot) -> Result<Self, ConfigError> {
        use self::variables::*;

        let firebase = FirebaseConfig {
            api_key: env.resolve_var(&FIREBASE_API_KEY)?,
            auth_domain: env.resolve_var(&FIREBASE_AUTH_DOMAIN)?,
            project_id: env.resolve_var(&FIREBASE_PROJECT_ID)?,
            storage_bucket: env.resolve_var(&FIREBASE_STORAGE_BUCKET)?,
            messaging_sender_id: env.resolve_var(&FIREBASE_MESSAGING_SENDER_ID)?,
            app_id: env.resolve_var(&FIREBASE_APP_ID)?,
        };

        let firebase_admin = FirebaseAdminConfig {
            project_id: env.resolve_var(&FIREBASE_ADMIN_PROJECT_ID)?,
            private_key: env
                .resolve_var(&FIREBASE_ADMIN_PRIVATE_KEY)?
                .replace("\\n", "\n"),
            client_email: env.resolve_var(&FIREBASE_ADMIN_CLIENT_EMAIL)?,
        };

        let anthropic_api_key = env.optional(&ANTHROPIC_API_KEY);
        // Anthropic wins whenever its key is set; otherwise OpenAI, even without a key.
        let provider = if anthropic_api_key.is_some() {
            LlmProvider::Anthropic
        } else {
            LlmProvider::OpenAi
        };
        let llm = LlmConfig {
            openai_api_key: env.optional(&OPENAI_API_KEY),
            anthropic_api_key,
            provider,
        };

        let pinecone = PineconeConfig {
            api_key: env.resolve_var(&PINECONE_API_KEY)?,
            environment: env.resolve_var(&PINECONE_ENVIRONMENT)?,
            index_name: env.resolve_var(&PINECONE_INDEX_NAME)?,
        };

        let app = AppSettings {
            url: env.resolve_var(&APP_URL)?,
            api_url: env.optional(&API_URL),
            default_credits: env.resolve_number(&DEFAULT_CREDITS)?,
            credit_cost_per_query: env.resolve_number(&CREDIT_COST_PER_QUERY)?,
        };

        let rate_limit = RateLimitConfig {
            per_minute: env.resolve_number(&RATE_LIMIT_PER_MINUTE)?,
            per_hour: env.resolve_number(&RATE_LIMIT_PER_HOUR)?,
        };

        Ok(Self {
            node_env: mode_name(env).to_string(),
            mode: ModeFlags::from_env(env),
            firebase,
            firebase_admin,
            llm,
            pinecone,
            app,
            external_apis: ExternalApisConfig {
                behind_the_name_api_key: env.optional(&BEHIND_THE_NAME_API_KEY),
            },
            analytics: AnalyticsConfig {
                ga_id: env.optional(&GA_MEASUREMENT_ID),
            },
            rate_limit,
        })
    }

    /// Returns a redacted JSON representation (secrets are redacted).
    pub fn redacted_json(&self) -> serde_json::Result<String> {
        let mut config = self.clone();
        config.firebase_admin.private_key = REDACTED.to_string();
        config.pinecone.api_key = REDACTED.to_string();
        for secret in [
            &mut config.llm.openai_api_key,
            &mut config.llm.anthropic_api_key,
            &mut config.external_apis.behind_the_name_api_key,
        ] {
            if secret.is_some() {
                *secret = Some(REDACTED.to_string());
            }
        }
        serde_json::to_string_pretty(&config)
    }
}

/// Loads configuration using layered `.env` files and the process environment.
///
/// Files are merged in the order `.env`, `.env.local`, `.env.<mode>`,
/// `.env.<mode>.local`; the process environment is overlaid last so it wins.
/// `.env.local` is not read in test mode.
pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new loader rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            base_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates a loader rooted at the provided directory (useful for tests).
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Collects the layered environment without validating it.
    pub fn snapshot(&self) -> Result<EnvSnapshot, ConfigError> {
        let mut layered = EnvSnapshot::default();
        let process = EnvSnapshot::from_process();

        self.merge_dotenv(self.base_dir.join(".env"), &mut layered)?;

        let mode_hint = process
            .get(variables::NODE_ENV)
            .or_else(|| layered.get(variables::NODE_ENV))
            .map(str::to_string);
        if mode_hint.as_deref() != Some("test") {
            self.merge_dotenv(self.base_dir.join(".env.local"), &mut layered)?;
        }

        let mode = process
            .get(variables::NODE_ENV)
            .map(str::to_string)
            .unwrap_or_else(|| mode_name(&layered).to_string());

        self.merge_dotenv(self.base_dir.join(format!(".env.{mode}")), &mut layered)?;
        self.merge_dotenv(
            self.base_dir.join(format!(".env.{mode}.local")),
            &mut layered,
        )?;

        // Overlay process environment last so it wins.
        layered.values.extend(process.values);
        Ok(layered)
    }

    /// Loads the environment, runs the startup validation (skipped in test
    /// mode) and resolves the typed configuration.
    pub fn load(&self) -> Result<ResolvedConfig, ConfigError> {
        let env = self.snapshot()?;
        validation::startup_check(&env)?;
        let config = ResolvedConfig::from_env(&env)?;
        tracing::info!(
            mode = %config.node_env,
            provider = ?config.llm.provider,
            "configuration loaded"
        );
        Ok(config)
    }

    fn merge_dotenv(&self, path: PathBuf, values: &mut EnvSnapshot) -> Result<(), ConfigError> {
        match dotenvy::from_path_iter(&path) {
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item.map_err(|source| ConfigError::EnvFile {
                        path: path.clone(),
                        source,
                    })?;
                    values.insert(key, value);
                }
                tracing::debug!(path = %path.display(), "loaded environment file");
                Ok(())
            }
            Err(dotenvy::Error::Io(ref io_err))
                if io_err.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(())
            }
            Err(err) => Err(ConfigError::EnvFile { path, source: err }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
