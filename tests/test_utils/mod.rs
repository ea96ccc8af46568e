//! Shared helpers for tests that touch the process environment or `.env` files.

#![allow(dead_code)]

use std::{
    env, fs,
    sync::{Mutex, MutexGuard, OnceLock},
};

use name_advisor::config::{EnvSnapshot, variables};
use tempfile::TempDir;

/// Values mirroring a working deployment, one LLM key included.
pub const COMPLETE_ENV: &[(&str, &str)] = &[
    ("NEXT_PUBLIC_FIREBASE_API_KEY", "test-api-key"),
    ("NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN", "test.firebaseapp.com"),
    ("NEXT_PUBLIC_FIREBASE_PROJECT_ID", "test-project"),
    ("NEXT_PUBLIC_FIREBASE_STORAGE_BUCKET", "test-project.appspot.com"),
    ("NEXT_PUBLIC_FIREBASE_MESSAGING_SENDER_ID", "123456789"),
    ("NEXT_PUBLIC_FIREBASE_APP_ID", "1:123456789:web:abcdef123456"),
    ("FIREBASE_ADMIN_PROJECT_ID", "test-project"),
    ("FIREBASE_ADMIN_PRIVATE_KEY", "test-private-key"),
    ("FIREBASE_ADMIN_CLIENT_EMAIL", "test@test.iam.gserviceaccount.com"),
    ("OPENAI_API_KEY", "sk-test123456789"),
    ("PINECONE_API_KEY", "test-pinecone-key"),
    ("PINECONE_ENVIRONMENT", "test-env"),
    ("NEXT_PUBLIC_APP_URL", "http://localhost:3000"),
    ("NEXT_PUBLIC_DEFAULT_CREDITS", "3000"),
    ("NEXT_PUBLIC_CREDIT_COST_PER_QUERY", "10"),
    ("RATE_LIMIT_PER_MINUTE", "20"),
    ("RATE_LIMIT_PER_HOUR", "100"),
];

pub fn complete_snapshot() -> EnvSnapshot {
    COMPLETE_ENV.iter().copied().collect()
}

/// `complete_snapshot` with the given keys overridden (empty value = unset).
pub fn snapshot_with(overrides: &[(&str, &str)]) -> EnvSnapshot {
    let mut env = complete_snapshot();
    for (key, value) in overrides {
        env.insert(*key, *value);
    }
    env
}

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Serializes tests that mutate the process environment.
pub fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

/// Removes every variable the service reads from the process environment.
pub fn clear_env() {
    unsafe {
        env::remove_var(variables::NODE_ENV);
        for var in variables::VARIABLES {
            env::remove_var(var.name);
        }
    }
}

pub fn set_env(pairs: &[(&str, &str)]) {
    unsafe {
        for (key, value) in pairs {
            env::set_var(key, value);
        }
    }
}

pub fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

/// Renders pairs as `.env` file contents.
pub fn dotenv_contents(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}
