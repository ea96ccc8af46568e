//! # Environment Variable Table
//!
//! The single declarative description of every environment variable the
//! service reads. Both the loader ([`super::EnvSnapshot::resolve_var`]) and
//! the validator ([`super::validation`]) consume these entries, so requiredness,
//! type and default live in exactly one place.

/// Expected type of an environment variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Free-form string, optionally constrained by a regular expression.
    String { pattern: Option<&'static str> },
    /// Numeric literal with a leading non-negative integer (`"20"`, `"1.5"`,
    /// `"0x10"`, `"1e3"`), resolved to that integer.
    Number,
    /// Exactly `"true"` or `"false"`.
    Boolean,
}

/// Declarative description of one expected environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvVar {
    pub name: &'static str,
    pub required: bool,
    pub kind: VarKind,
    /// Value the loader falls back to when the variable is absent.
    pub default: Option<&'static str>,
    /// Stand-in value used instead of a missing one in test mode.
    pub fixture: Option<&'static str>,
}

impl EnvVar {
    /// A required string variable.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            kind: VarKind::String { pattern: None },
            default: None,
            fixture: None,
        }
    }

    /// An optional string variable.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            kind: VarKind::String { pattern: None },
            default: None,
            fixture: None,
        }
    }

    pub const fn number(self) -> Self {
        Self {
            kind: VarKind::Number,
            ..self
        }
    }

    pub const fn boolean(self) -> Self {
        Self {
            kind: VarKind::Boolean,
            ..self
        }
    }

    /// Constrain a string variable with a regular expression.
    pub const fn pattern(self, pattern: &'static str) -> Self {
        Self {
            kind: VarKind::String {
                pattern: Some(pattern),
            },
            ..self
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_fixture(self, fixture: &'static str) -> Self {
        Self {
            fixture: Some(fixture),
            ..self
        }
    }
}

/// One entry of a validation rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Requiredness and type check of a single variable.
    Variable(EnvVar),
    /// At least one of the listed variables must carry a value; `label`
    /// names what they provide in the violation message.
    AtLeastOneOf {
        label: &'static str,
        keys: &'static [&'static str],
    },
}

/// Name of the execution-mode variable.
pub const NODE_ENV: &str = "NODE_ENV";

// Firebase client
pub const FIREBASE_API_KEY: EnvVar = EnvVar::required("NEXT_PUBLIC_FIREBASE_API_KEY")
    .with_fixture("test-api-key");
pub const FIREBASE_AUTH_DOMAIN: EnvVar = EnvVar::required("NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN")
    .with_fixture("test.firebaseapp.com");
pub const FIREBASE_PROJECT_ID: EnvVar = EnvVar::required("NEXT_PUBLIC_FIREBASE_PROJECT_ID")
    .with_fixture("test-project");
pub const FIREBASE_STORAGE_BUCKET: EnvVar =
    EnvVar::required("NEXT_PUBLIC_FIREBASE_STORAGE_BUCKET")
    .with_fixture("test-project.appspot.com");
pub const FIREBASE_MESSAGING_SENDER_ID: EnvVar =
    EnvVar::required("NEXT_PUBLIC_FIREBASE_MESSAGING_SENDER_ID")
    .with_fixture("123456789");
pub const FIREBASE_APP_ID: EnvVar = EnvVar::required("NEXT_PUBLIC_FIREBASE_APP_ID")
    .with_fixture("1:123456789:web:abcdef123456");

// Firebase admin (server side only)
pub const FIREBASE_ADMIN_PROJECT_ID: EnvVar = EnvVar::required("FIREBASE_ADMIN_PROJECT_ID")
    .with_fixture("test-project");
pub const FIREBASE_ADMIN_PRIVATE_KEY: EnvVar = EnvVar::required("FIREBASE_ADMIN_PRIVATE_KEY")
    .with_fixture("test-private-key");
pub const FIREBASE_ADMIN_CLIENT_EMAIL: EnvVar = EnvVar::required("FIREBASE_ADMIN_CLIENT_EMAIL")
    .with_fixture("test@test.iam.gserviceaccount.com");

// LLM providers, at least one of the two
pub const OPENAI_API_KEY: EnvVar = EnvVar::optional("OPENAI_API_KEY");
pub const ANTHROPIC_API_KEY: EnvVar = EnvVar::optional("ANTHROPIC_API_KEY");

// Vector database
pub const PINECONE_API_KEY: EnvVar = EnvVar::required("PINECONE_API_KEY")
    .with_fixture("test-pinecone-key");
pub const PINECONE_ENVIRONMENT: EnvVar = EnvVar::required("PINECONE_ENVIRONMENT")
    .with_fixture("test-env");
pub const PINECONE_INDEX_NAME: EnvVar =
    EnvVar::optional("PINECONE_INDEX_NAME").with_default("baby-names-index");

// Application
pub const APP_URL: EnvVar =
    EnvVar::optional("NEXT_PUBLIC_APP_URL").with_default("http://localhost:3000");
pub const API_URL: EnvVar = EnvVar::optional("NEXT_PUBLIC_API_URL");
pub const DEFAULT_CREDITS: EnvVar = EnvVar::optional("NEXT_PUBLIC_DEFAULT_CREDITS")
    .number()
    .with_default("3000");
pub const CREDIT_COST_PER_QUERY: EnvVar = EnvVar::optional("NEXT_PUBLIC_CREDIT_COST_PER_QUERY")
    .number()
    .with_default("10");

// External APIs
pub const BEHIND_THE_NAME_API_KEY: EnvVar = EnvVar::optional("BEHIND_THE_NAME_API_KEY");

// Analytics
pub const GA_MEASUREMENT_ID: EnvVar = EnvVar::optional("NEXT_PUBLIC_GA_MEASUREMENT_ID");

// Rate limiting
pub const RATE_LIMIT_PER_MINUTE: EnvVar = EnvVar::optional("RATE_LIMIT_PER_MINUTE")
    .number()
    .with_default("20");
pub const RATE_LIMIT_PER_HOUR: EnvVar = EnvVar::optional("RATE_LIMIT_PER_HOUR")
    .number()
    .with_default("100");

/// Every variable the service reads, in validation order.
pub const VARIABLES: &[EnvVar] = &[
    FIREBASE_API_KEY,
    FIREBASE_AUTH_DOMAIN,
    FIREBASE_PROJECT_ID,
    FIREBASE_STORAGE_BUCKET,
    FIREBASE_MESSAGING_SENDER_ID,
    FIREBASE_APP_ID,
    FIREBASE_ADMIN_PROJECT_ID,
    FIREBASE_ADMIN_PRIVATE_KEY,
    FIREBASE_ADMIN_CLIENT_EMAIL,
    OPENAI_API_KEY,
    ANTHROPIC_API_KEY,
    PINECONE_API_KEY,
    PINECONE_ENVIRONMENT,
    PINECONE_INDEX_NAME,
    APP_URL,
    API_URL,
    DEFAULT_CREDITS,
    CREDIT_COST_PER_QUERY,
    BEHIND_THE_NAME_API_KEY,
    GA_MEASUREMENT_ID,
    RATE_LIMIT_PER_MINUTE,
    RATE_LIMIT_PER_HOUR,
];

/// The two interchangeable LLM credentials.
pub const LLM_API_KEYS: &[&str] = &[OPENAI_API_KEY.name, ANTHROPIC_API_KEY.name];

/// The rule table checked at startup: every variable, then the LLM credential rule.
pub fn default_rules() -> Vec<Rule> {
    VARIABLES
        .iter()
        .copied()
        .map(Rule::Variable)
        .chain(std::iter::once(Rule::AtLeastOneOf {
            label: "LLM API key",
            keys: LLM_API_KEYS,
        }))
        .collect()
}
