//! Per-user settings.
//!
//! Settings are owned by an external store; the core only reads them to
//! pick unit conversions. [`SettingsStore`] is the seam the chat layer's
//! database sits behind; [`InMemorySettings`] backs the CLI and tests.

use std::collections::HashMap;
use std::sync::Mutex;

/// Measurement system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

/// One user's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSettings {
    pub user_id: u64,
    pub imperial: bool,
}

impl UserSettings {
    pub fn new(user_id: u64, imperial: bool) -> Self {
        Self { user_id, imperial }
    }

    pub fn unit_system(&self) -> UnitSystem {
        if self.imperial {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

/// Read-only settings lookup.
pub trait SettingsStore: Send + Sync {
    /// Settings for a user, falling back to defaults for unknown users.
    fn get_settings(&self, user_id: u64) -> UserSettings;
}

/// Map-backed settings store.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    entries: Mutex<HashMap<u64, UserSettings>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, settings: UserSettings) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(settings.user_id, settings);
    }
}

impl SettingsStore for InMemorySettings {
    fn get_settings(&self, user_id: u64) -> UserSettings {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&user_id)
            .copied()
            .unwrap_or(UserSettings {
                user_id,
                imperial: true,
            })
    }
}
