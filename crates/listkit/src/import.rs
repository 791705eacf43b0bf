//! Import identifiers of the form `ownerID/listID`

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// A parsed import identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub owner_id: String,
    pub list_id: String,
}

impl FromStr for ImportId {
    type Err = Error;

    /// Split on the first `/`. Both halves must be non-empty and the list
    /// half may not contain another `/`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::MalformedImportId {
            raw: raw.to_string(),
        };

        let (owner_id, list_id) = raw.split_once('/').ok_or_else(malformed)?;
        if owner_id.is_empty() || list_id.is_empty() || list_id.contains('/') {
            return Err(malformed());
        }

        Ok(Self {
            owner_id: owner_id.to_string(),
            list_id: list_id.to_string(),
        })
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner_id, self.list_id)
    }
}
