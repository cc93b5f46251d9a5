//! Persisted single-value preferences with an in-memory fallback.
//!
//! A [`PreferenceCell`] holds one string value under a fixed key. It is loaded
//! once (stored value, else the caller's default) and written through to the
//! database on every change. Without a database the cell still works, it just
//! forgets on exit.
use crate::storage::Database;

/// Key holding the last search term.
pub const SEARCH_KEY: &str = "search";
/// Key holding the theme variant name.
pub const THEME_KEY: &str = "theme";

// ============================================================================
// PreferenceCell
// ============================================================================

pub struct PreferenceCell {
    key: &'static str,
    value: String,
    db: Option<Database>,
}

impl PreferenceCell {
    /// Load `key` from `db`, falling back to `default` when the key is unset,
    /// unreadable, or no database is available.
    pub async fn load(db: Option<Database>, key: &'static str, default: &str) -> Self {
        let stored = match &db {
            Some(db) => match db.get_preference(key).await {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Failed to read preference, using default");
                    None
                }
            },
            None => None,
        };

        let value = stored.unwrap_or_else(|| default.to_string());
        tracing::debug!(key, value = %value, "Preference loaded");
        Self { key, value, db }
    }

    /// A cell that never touches storage.
    pub fn in_memory(key: &'static str, value: &str) -> Self {
        Self {
            key,
            value: value.to_string(),
            db: None,
        }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Update the value and write it through to storage.
    ///
    /// The write is awaited before returning. A failed write is logged and the
    /// in-memory value keeps the new setting.
    pub async fn set(&mut self, value: &str) {
        if self.value == value {
            return;
        }
        self.value = value.to_string();

        if let Some(db) = &self.db {
            if let Err(e) = db.set_preference(self.key, value).await {
                tracing::warn!(key = self.key, error = %e, "Failed to persist preference");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
