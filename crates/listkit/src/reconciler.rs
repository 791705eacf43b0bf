//! Lifecycle operations for a single named list
//!
//! A [`ResourceData`] slot moves through three states:
//!
//! - `Absent`: no id is known
//! - `Stale`: an id is known but the local view has not been re-read
//! - `Present`: the local view matches the last successful read
//!
//! Every mutation ends with a read, so `Present` is re-established by
//! construction. A read that finds the list gone moves the slot back to
//! `Absent` without reporting an error.

use crate::client::ListClient;
use crate::codec;
use crate::diff::diff_items;
use crate::error::{ClientError, Error, Operation, Result};
use crate::import::ImportId;
use crate::types::{Lifecycle, ListSpecification, ResourceData};

/// What a best-effort read after delete found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The list is reported as gone
    ConfirmedAbsent,
    /// The list is still reported by the remote side
    StillPresent,
    /// The verification read failed
    Unverified,
}

/// Drives create/read/update/delete/import against a [`ListClient`]
///
/// Operations on the same slot must not run concurrently; the item diff
/// is computed against the slot's last observation.
#[derive(Debug)]
pub struct Reconciler<C> {
    client: C,
}

impl<C: ListClient> Reconciler<C> {
    /// Create a reconciler that talks through `client`
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The client this reconciler uses
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the list described by `desired` and read it back
    ///
    /// `data` is only touched once the create call succeeds. If the
    /// trailing read fails, the new id is kept so it is not lost.
    pub fn create(&self, data: &mut ResourceData, desired: &ListSpecification) -> Result<()> {
        if let Some(id) = data.id() {
            return Err(Error::ResourceExists {
                owner_id: data.owner_id.clone(),
                id: id.to_string(),
            });
        }

        let owner_id = desired.owner_id.as_str();
        let payload = codec::creation_payload(desired);
        log::debug!("Creating list for owner {owner_id} from {payload:?}");

        let created = self
            .client
            .create_list(owner_id, &payload)
            .map_err(|source| client_error(Operation::Create, owner_id, None, source))?;

        if created.id.is_empty() {
            return Err(Error::MissingResponseId {
                operation: Operation::Create,
                owner_id: owner_id.to_string(),
                id: None,
            });
        }

        log::info!("Created list {} for owner {owner_id}", created.id);
        data.owner_id = owner_id.to_string();
        data.id = Some(created.id);
        data.observed = None;
        data.lifecycle = Lifecycle::Stale;

        self.read(data)
    }

    /// Refresh `data` from the remote side
    ///
    /// A list that no longer exists clears the slot and returns `Ok`.
    /// Any other failure leaves `data` as it was.
    pub fn read(&self, data: &mut ResourceData) -> Result<()> {
        let Some(id) = data.id().map(str::to_string) else {
            log::debug!("No list id known for owner {}, nothing to read", data.owner_id);
            data.clear();
            return Ok(());
        };
        let owner_id = data.owner_id.clone();

        let entity = match self.client.get_list(&owner_id, &id) {
            Ok(entity) => entity,
            Err(err) if err.is_not_found() => {
                log::info!("List {id} no longer exists");
                data.clear();
                return Ok(());
            }
            Err(err) => return Err(client_error(Operation::Read, &owner_id, Some(&id), err)),
        };

        let (items, info) = self
            .client
            .list_items(&owner_id, &id)
            .map_err(|err| client_error(Operation::Read, &owner_id, Some(&id), err))?;

        if info.is_truncated(items.len()) {
            log::warn!(
                "List {id} reports {} items but only {} were returned",
                info.total_count,
                items.len()
            );
        }

        data.observed = Some(codec::to_specification(&owner_id, &entity, &items));
        data.lifecycle = Lifecycle::Present;
        Ok(())
    }

    /// Read that never fails
    ///
    /// Returns the resulting lifecycle, or `None` if the read errored.
    pub fn refresh_best_effort(&self, data: &mut ResourceData) -> Option<Lifecycle> {
        match self.read(data) {
            Ok(()) => Some(data.lifecycle),
            Err(err) => {
                log::warn!("Ignoring failed read: {err}");
                None
            }
        }
    }

    /// Converge the existing list to `desired`
    ///
    /// Scalar fields are always sent. Items are patched only when they
    /// differ from the last observed items and the patch is non-empty.
    pub fn update(&self, data: &mut ResourceData, desired: &ListSpecification) -> Result<()> {
        let owner_id = desired.owner_id.as_str();
        let id = data
            .id()
            .ok_or_else(|| Error::NoResourceId {
                operation: Operation::Update,
                owner_id: owner_id.to_string(),
            })?
            .to_string();

        let payload = codec::update_payload(&id, desired);
        log::debug!("Updating list {id} for owner {owner_id} from {payload:?}");

        let mut updated = self
            .client
            .update_list(owner_id, &payload)
            .map_err(|source| client_error(Operation::Update, owner_id, Some(&id), source))?;

        if updated.id.is_empty() {
            return Err(Error::MissingResponseId {
                operation: Operation::Update,
                owner_id: owner_id.to_string(),
                id: Some(id),
            });
        }

        let old_items = data.last_known_items();
        if old_items != desired.items.as_slice() {
            let patch = diff_items(&id, old_items, &desired.items);
            if patch.is_empty() {
                log::debug!("Items of list {id} only changed order, skipping patch");
            } else {
                log::debug!(
                    "Patching list {id}: {} to append, {} to remove",
                    patch.append.len(),
                    patch.remove.len()
                );
                let patched = self.client.patch_list(owner_id, &patch).map_err(|source| {
                    client_error(Operation::Patch, owner_id, Some(&id), source)
                })?;
                updated.items = patched.items;
            }
        }
        log::debug!("Update of list {} returned {} items", updated.id, updated.items.len());

        data.owner_id = owner_id.to_string();
        data.lifecycle = Lifecycle::Stale;
        self.read(data)
    }

    /// Delete the list and check that it is gone
    ///
    /// Success depends only on the delete call. The slot is cleared
    /// afterwards whatever the verification read reports.
    pub fn delete(&self, data: &mut ResourceData) -> Result<Verification> {
        let owner_id = data.owner_id.clone();
        let id = data
            .id()
            .ok_or_else(|| Error::NoResourceId {
                operation: Operation::Delete,
                owner_id: owner_id.clone(),
            })?
            .to_string();

        log::debug!("Deleting list {id} for owner {owner_id}");
        self.client
            .delete_list(&owner_id, &id)
            .map_err(|source| client_error(Operation::Delete, &owner_id, Some(&id), source))?;

        let verification = match self.refresh_best_effort(data) {
            Some(Lifecycle::Absent) => Verification::ConfirmedAbsent,
            Some(_) => {
                log::warn!("List {id} is still reported after delete");
                Verification::StillPresent
            }
            None => Verification::Unverified,
        };

        data.clear();
        Ok(verification)
    }

    /// Adopt an existing list given as `ownerID/listID`
    ///
    /// If the list turns out not to exist the returned slot is absent.
    pub fn import(&self, raw: &str) -> Result<ResourceData> {
        let import_id: ImportId = raw.parse()?;
        log::debug!(
            "Importing list {} for owner {}",
            import_id.list_id,
            import_id.owner_id
        );

        let mut data = ResourceData::stale(import_id.owner_id, import_id.list_id);
        self.read(&mut data)?;
        Ok(data)
    }
}

fn client_error(operation: Operation, owner_id: &str, id: Option<&str>, source: ClientError) -> Error {
    Error::Client {
        operation,
        owner_id: owner_id.to_string(),
        id: id.map(str::to_string),
        source,
    }
}
