//! List manifests - the desired state of one named list
//!
//! A manifest is a TOML or JSON file:
//!
//! ```toml
//! owner_id = "acct1"          # optional, falls back to --owner-id
//! name = "blocked-domains"
//! type = "DOMAIN"             # SERIAL, URL, DOMAIN or EMAIL
//! description = "Known bad domains"
//! items = ["bad.example", "worse.example"]
//! ```

use anyhow::{Context, Result, bail};
use listkit::{Classification, ListSpecification};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Manifest as written on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListManifest {
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub classification: Classification,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl ListManifest {
    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest {}", path.display()))?;
        Self::parse(&content, ManifestFormat::from_path(path))
            .with_context(|| format!("Invalid manifest {}", path.display()))
    }

    /// Parse manifest content
    pub fn parse(content: &str, format: ManifestFormat) -> Result<Self> {
        let manifest: Self = match format {
            ManifestFormat::Toml => toml::from_str(content)?,
            ManifestFormat::Json => serde_json::from_str(content)?,
        };
        Ok(manifest)
    }

    /// Turn the manifest into the typed desired state
    ///
    /// `default_owner` is used when the manifest has no `owner_id`.
    pub fn into_specification(self, default_owner: Option<&str>) -> Result<ListSpecification> {
        let owner_id = self
            .owner_id
            .filter(|o| !o.trim().is_empty())
            .or_else(|| default_owner.map(str::to_string))
            .context("No owner id: set owner_id in the manifest or pass --owner-id")?;

        if self.name.trim().is_empty() {
            bail!("List name must not be empty");
        }

        Ok(ListSpecification {
            owner_id,
            name: self.name,
            classification: self.classification,
            description: self.description,
            items: self.items,
        })
    }
}

/// Load a manifest and resolve it to a specification
pub fn load_specification(path: &Path, default_owner: Option<&str>) -> Result<ListSpecification> {
    let manifest = ListManifest::load(path)?;
    log::debug!("Loaded manifest {} ({} items)", path.display(), manifest.items.len());
    manifest.into_specification(default_owner)
}

/// Default state address for a manifest: its file stem
pub fn default_address(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive an address from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOML_MANIFEST: &str = r#"
owner_id = "acct1"
name = "blocked"
type = "DOMAIN"
items = ["a.example", "b.example"]
"#;

    #[test]
    fn test_parse_toml() {
        let manifest = ListManifest::parse(TOML_MANIFEST, ManifestFormat::Toml).unwrap();
        assert_eq!(manifest.owner_id.as_deref(), Some("acct1"));
        assert_eq!(manifest.classification, Classification::Domain);
        assert!(manifest.description.is_empty());
        assert_eq!(manifest.items.len(), 2);
    }

    #[test]
    fn test_parse_json() {
        let manifest = ListManifest::parse(
            r#"{"name": "serials", "type": "SERIAL", "description": "laptops"}"#,
            ManifestFormat::Json,
        )
        .unwrap();
        assert_eq!(manifest.classification, Classification::Serial);
        assert!(manifest.items.is_empty());
        assert!(manifest.owner_id.is_none());
    }

    #[test]
    fn test_reject_unknown_type() {
        let result = ListManifest::parse("name = \"x\"\ntype = \"IP\"\n", ManifestFormat::Toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_unknown_field() {
        let result = ListManifest::parse(
            "name = \"x\"\ntype = \"URL\"\ncolour = \"red\"\n",
            ManifestFormat::Toml,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_owner_fallback() {
        let manifest = ListManifest::parse("name = \"x\"\ntype = \"URL\"\n", ManifestFormat::Toml)
            .unwrap();
        assert!(manifest.clone().into_specification(None).is_err());

        let spec = manifest.into_specification(Some("acct9")).unwrap();
        assert_eq!(spec.owner_id, "acct9");
    }

    #[test]
    fn test_manifest_owner_wins() {
        let manifest = ListManifest::parse(TOML_MANIFEST, ManifestFormat::Toml).unwrap();
        let spec = manifest.into_specification(Some("other")).unwrap();
        assert_eq!(spec.owner_id, "acct1");
    }

    #[test]
    fn test_reject_empty_name() {
        let manifest =
            ListManifest::parse("name = \" \"\ntype = \"EMAIL\"\n", ManifestFormat::Toml).unwrap();
        assert!(manifest.into_specification(Some("acct1")).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blocked.toml");
        fs::write(&path, TOML_MANIFEST).unwrap();

        let spec = load_specification(&path, None).unwrap();
        assert_eq!(spec.name, "blocked");
        assert_eq!(default_address(&path).unwrap(), "blocked");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ManifestFormat::from_path(Path::new("a.json")), ManifestFormat::Json);
        assert_eq!(ManifestFormat::from_path(Path::new("a.toml")), ManifestFormat::Toml);
        assert_eq!(ManifestFormat::from_path(Path::new("a")), ManifestFormat::Toml);
    }
}
