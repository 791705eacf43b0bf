//! Core types for named list reconciliation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value a list holds
///
/// Fixed at creation time. Changing it is a replacement, which is a
/// decision for the caller driving the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    /// Device serial numbers
    Serial,
    /// URLs
    Url,
    /// Domain names
    Domain,
    /// Email addresses
    Email,
}

impl Classification {
    /// All classifications, in declaration order
    pub const ALL: [Self; 4] = [Self::Serial, Self::Url, Self::Domain, Self::Email];

    /// Wire name of this classification
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serial => "SERIAL",
            Self::Url => "URL",
            Self::Domain => "DOMAIN",
            Self::Email => "EMAIL",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known classification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list type {value:?}, expected one of SERIAL, URL, DOMAIN, EMAIL")]
pub struct ParseClassificationError {
    pub value: String,
}

impl FromStr for Classification {
    type Err = ParseClassificationError;

    // Case-sensitive, matching the remote API.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseClassificationError {
                value: s.to_string(),
            })
    }
}

/// Desired (or observed) shape of a list
///
/// An empty `items` means "no items", not "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpecification {
    pub owner_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// A single list entry as the remote side represents it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ListItem {
    /// Create an item carrying only a value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            created_at: None,
        }
    }
}

/// Remote representation of a list
///
/// Items are normally fetched separately; `items` is only populated on
/// creation payloads and on patch responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Minimal item delta for an existing list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPatch {
    pub id: String,
    #[serde(default)]
    pub append: Vec<ListItem>,
    #[serde(default)]
    pub remove: Vec<String>,
}

impl ListPatch {
    /// Check if the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.append.is_empty() && self.remove.is_empty()
    }

    /// Values to append, in patch order
    pub fn appended_values(&self) -> impl Iterator<Item = &str> {
        self.append.iter().map(|item| item.value.as_str())
    }
}

/// Pagination metadata returned with an item listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub page: u32,
    pub per_page: u32,
    pub count: u64,
    pub total_count: u64,
}

impl ResultInfo {
    /// Metadata describing a single page that holds everything
    pub fn single_page(count: usize) -> Self {
        let count = count as u64;
        Self {
            page: 1,
            per_page: count as u32,
            count,
            total_count: count,
        }
    }

    /// Whether the remote side reports more items than this page returned
    pub fn is_truncated(&self, returned: usize) -> bool {
        self.total_count > returned as u64
    }
}

/// Where a resource sits in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// No id is known
    #[default]
    Absent,
    /// Id known, local view not yet re-verified
    Stale,
    /// Id known, local view matches the last read
    Present,
}

/// Local slot for one list resource
///
/// Holds the remote id (none means absent) and the last observed
/// specification, which every successful read replaces wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    pub owner_id: String,
    pub id: Option<String>,
    pub observed: Option<ListSpecification>,
    #[serde(skip)]
    pub lifecycle: Lifecycle,
}

impl ResourceData {
    /// Slot for a resource that does not exist yet
    pub fn absent(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            ..Self::default()
        }
    }

    /// Slot for a known id whose fields still need reading
    pub fn stale(owner_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            id: Some(id.into()),
            observed: None,
            lifecycle: Lifecycle::Stale,
        }
    }

    /// The remote id, if any
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Check if no remote list is associated with this slot
    pub fn is_absent(&self) -> bool {
        self.id().is_none()
    }

    /// Items from the last observation, empty if nothing was observed
    pub fn last_known_items(&self) -> &[String] {
        self.observed
            .as_ref()
            .map(|spec| spec.items.as_slice())
            .unwrap_or_default()
    }

    /// Forget the remote list
    pub fn clear(&mut self) {
        self.id = None;
        self.observed = None;
        self.lifecycle = Lifecycle::Absent;
    }
}
