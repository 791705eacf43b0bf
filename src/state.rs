use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use listkit::{Lifecycle, ListSpecification, ResourceData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

// ============================================================================
// State Structures
// ============================================================================

/// Local state: which remote list each address is bound to
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListState {
    /// Tracked lists by address
    #[serde(default)]
    pub resources: BTreeMap<String, StoredList>,

    /// Last time the state was updated
    pub last_updated: DateTime<Utc>,
}

/// State for a single tracked list
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoredList {
    /// Owner (account) of the list
    pub owner_id: String,

    /// Remote list id
    pub id: String,

    /// When this entry was last written
    pub updated_at: DateTime<Utc>,

    /// Fields as of the last successful read
    #[serde(default)]
    pub observed: Option<ListSpecification>,
}

// ============================================================================
// ListState Implementation
// ============================================================================

impl ListState {
    /// Default state file path (`<state dir>/state.toml`)
    pub fn default_path() -> Result<PathBuf> {
        Ok(paths::state_dir()?.join("state.toml"))
    }

    /// Load state from disk, or return default if file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("State file does not exist, using default state");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;

        let state: ListState = toml::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

        log::debug!("Loaded state from {}", path.display());
        Ok(state)
    }

    /// Save state to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(&self).context("Failed to serialize state to TOML")?;

        fs::write(path, &content)
            .with_context(|| format!("Failed to write state file: {}", path.display()))?;

        log::debug!("Saved state to {}", path.display());
        Ok(())
    }

    /// Slot for `address`, absent if it is not tracked
    ///
    /// Stored views have not been re-read, so tracked slots start out stale.
    pub fn resource(&self, address: &str, owner_id: &str) -> ResourceData {
        match self.resources.get(address) {
            Some(stored) => ResourceData {
                owner_id: stored.owner_id.clone(),
                id: Some(stored.id.clone()),
                observed: stored.observed.clone(),
                lifecycle: Lifecycle::Stale,
            },
            None => ResourceData::absent(owner_id),
        }
    }

    /// Record the outcome of an operation for `address`
    ///
    /// An absent slot removes the entry.
    pub fn record(&mut self, address: &str, data: &ResourceData) {
        let now = Utc::now();
        match data.id() {
            Some(id) => {
                self.resources.insert(
                    address.to_string(),
                    StoredList {
                        owner_id: data.owner_id.clone(),
                        id: id.to_string(),
                        updated_at: now,
                        observed: data.observed.clone(),
                    },
                );
            }
            None => {
                self.resources.remove(address);
            }
        }
        self.last_updated = now;
    }

    /// Check if an address is tracked
    pub fn contains(&self, address: &str) -> bool {
        self.resources.contains_key(address)
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            resources: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
