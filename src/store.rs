//! File-backed list backend
//!
//! Stores each list as `<root>/<owner_id>/<list_id>.json`. Behaves like the
//! remote API as far as the reconciler can tell: ids are assigned on create,
//! items are listed separately from metadata, and missing lists are
//! reported as not found.

use chrono::Utc;
use listkit::{ClientError, ClientResult, ListClient, ListEntity, ListItem, ListPatch, ResultInfo};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// List backend rooted at a local directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn list_path(&self, owner_id: &str, id: &str) -> ClientResult<PathBuf> {
        check_segment("owner id", owner_id)?;
        check_segment("list id", id)?;
        Ok(self.root.join(owner_id).join(format!("{id}.json")))
    }

    fn load(&self, owner_id: &str, id: &str) -> ClientResult<ListEntity> {
        let path = self.list_path(owner_id, id)?;
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClientError::NotFound {
                message: format!("list {id:?} not found for owner {owner_id:?}"),
            },
            _ => io_error(&path, &e),
        })?;
        serde_json::from_str(&content).map_err(|e| ClientError::Decode {
            message: format!("{}: {e}", path.display()),
        })
    }

    fn store(&self, owner_id: &str, list: &ListEntity) -> ClientResult<()> {
        let path = self.list_path(owner_id, &list.id)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, &e))?;
        }
        let content = serde_json::to_string_pretty(list).map_err(|e| ClientError::Decode {
            message: e.to_string(),
        })?;
        fs::write(&path, content).map_err(|e| io_error(&path, &e))
    }
}

impl ListClient for FileStore {
    fn create_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        let now = Utc::now();
        let items: Vec<ListItem> = list
            .items
            .iter()
            .map(|item| ListItem {
                value: item.value.clone(),
                created_at: Some(now),
            })
            .collect();

        let stored = ListEntity {
            id: uuid::Uuid::new_v4().to_string(),
            count: items.len() as u64,
            items,
            created_at: Some(now),
            updated_at: Some(now),
            ..list.clone()
        };
        self.store(owner_id, &stored)?;
        log::debug!("Stored new list {} under {}", stored.id, self.root.display());

        Ok(without_items(stored))
    }

    fn get_list(&self, owner_id: &str, id: &str) -> ClientResult<ListEntity> {
        self.load(owner_id, id).map(without_items)
    }

    fn list_items(&self, owner_id: &str, id: &str) -> ClientResult<(Vec<ListItem>, ResultInfo)> {
        let list = self.load(owner_id, id)?;
        let info = ResultInfo::single_page(list.items.len());
        Ok((list.items, info))
    }

    fn update_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        let mut stored = self.load(owner_id, &list.id)?;
        stored.name = list.name.clone();
        stored.classification = list.classification;
        stored.description = list.description.clone();
        stored.updated_at = Some(Utc::now());
        self.store(owner_id, &stored)?;

        Ok(without_items(stored))
    }

    fn patch_list(&self, owner_id: &str, patch: &ListPatch) -> ClientResult<ListEntity> {
        let mut stored = self.load(owner_id, &patch.id)?;
        let now = Utc::now();

        stored.items.retain(|item| !patch.remove.contains(&item.value));
        for item in &patch.append {
            if !stored.items.iter().any(|i| i.value == item.value) {
                stored.items.push(ListItem {
                    value: item.value.clone(),
                    created_at: Some(now),
                });
            }
        }
        stored.count = stored.items.len() as u64;
        stored.updated_at = Some(now);
        self.store(owner_id, &stored)?;

        Ok(stored)
    }

    fn delete_list(&self, owner_id: &str, id: &str) -> ClientResult<()> {
        let path = self.list_path(owner_id, id)?;
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClientError::NotFound {
                message: format!("list {id:?} not found for owner {owner_id:?}"),
            },
            _ => io_error(&path, &e),
        })
    }
}

fn without_items(list: ListEntity) -> ListEntity {
    ListEntity {
        items: Vec::new(),
        ..list
    }
}

fn check_segment(what: &str, value: &str) -> ClientResult<()> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(ClientError::Status {
            status: 400,
            message: format!("invalid {what} {value:?}"),
        });
    }
    Ok(())
}

fn io_error(path: &Path, err: &io::Error) -> ClientError {
    ClientError::Transport {
        message: format!("{}: {err}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listkit::{Classification, Reconciler, ResourceData, codec};
    use listkit::ListSpecification;
    use tempfile::TempDir;

    fn spec(items: &[&str]) -> ListSpecification {
        ListSpecification {
            owner_id: "acct1".into(),
            name: "blocked".into(),
            classification: Classification::Email,
            description: "spam senders".into(),
            items: items.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    #[test]
    fn test_create_assigns_id_and_splits_items() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let created = store
            .create_list("acct1", &codec::creation_payload(&spec(&["a@x.example"])))
            .unwrap();
        assert!(!created.id.is_empty());
        assert!(created.created_at.is_some());

        let fetched = store.get_list("acct1", &created.id).unwrap();
        assert!(fetched.items.is_empty());
        assert_eq!(fetched.count, 1);

        let (items, info) = store.list_items("acct1", &created.id).unwrap();
        assert_eq!(codec::item_values(&items), vec!["a@x.example".to_string()]);
        assert_eq!(info.total_count, 1);
    }

    #[test]
    fn test_missing_list_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        assert!(store.get_list("acct1", "nope").unwrap_err().is_not_found());
        assert!(store.delete_list("acct1", "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let err = store.get_list("acct1", "../escape").unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 400, .. }));
        assert!(store.get_list("..", "l1").is_err());
    }

    #[test]
    fn test_patch_appends_and_removes() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        let created = store
            .create_list("acct1", &codec::creation_payload(&spec(&["a", "b"])))
            .unwrap();

        let patch = listkit::diff_items(
            &created.id,
            &["a".to_string(), "b".to_string()],
            &["b".to_string(), "c".to_string()],
        );
        let patched = store.patch_list("acct1", &patch).unwrap();

        assert_eq!(
            codec::item_values(&patched.items),
            vec!["b".to_string(), "c".to_string()]
        );
        assert_eq!(patched.count, 2);
    }

    #[test]
    fn test_reconciler_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        let reconciler = Reconciler::new(&store);
        let mut data = ResourceData::absent("acct1");

        reconciler.create(&mut data, &spec(&["a", "b"])).unwrap();
        reconciler.update(&mut data, &spec(&["b", "c"])).unwrap();
        assert_eq!(data.last_known_items(), ["b".to_string(), "c".to_string()]);

        let verification = reconciler.delete(&mut data).unwrap();
        assert_eq!(verification, listkit::Verification::ConfirmedAbsent);
        assert!(data.is_absent());
    }
}
