//! Client trait for the remote list API
//!
//! The reconciler never talks to the network itself. Whatever backend is in
//! use implements [`ListClient`] and is handed to the reconciler explicitly.

use crate::error::ClientResult;
use crate::types::{ListEntity, ListItem, ListPatch, ResultInfo};

/// Remote operations on named lists
///
/// All calls are blocking. Implementations report a missing list as
/// [`ClientError::NotFound`](crate::ClientError::NotFound) (or a 404
/// status) so reads can treat it as absence rather than failure.
pub trait ListClient {
    /// Create a list, returning the stored entity with its new id
    fn create_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity>;

    /// Fetch list metadata (items are not included)
    fn get_list(&self, owner_id: &str, id: &str) -> ClientResult<ListEntity>;

    /// Fetch the items of a list
    fn list_items(&self, owner_id: &str, id: &str) -> ClientResult<(Vec<ListItem>, ResultInfo)>;

    /// Replace the scalar fields of a list
    fn update_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity>;

    /// Append and remove items, returning the entity with its items
    fn patch_list(&self, owner_id: &str, patch: &ListPatch) -> ClientResult<ListEntity>;

    /// Delete a list
    fn delete_list(&self, owner_id: &str, id: &str) -> ClientResult<()>;
}

impl<C: ListClient + ?Sized> ListClient for &C {
    fn create_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        (**self).create_list(owner_id, list)
    }

    fn get_list(&self, owner_id: &str, id: &str) -> ClientResult<ListEntity> {
        (**self).get_list(owner_id, id)
    }

    fn list_items(&self, owner_id: &str, id: &str) -> ClientResult<(Vec<ListItem>, ResultInfo)> {
        (**self).list_items(owner_id, id)
    }

    fn update_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        (**self).update_list(owner_id, list)
    }

    fn patch_list(&self, owner_id: &str, patch: &ListPatch) -> ClientResult<ListEntity> {
        (**self).patch_list(owner_id, patch)
    }

    fn delete_list(&self, owner_id: &str, id: &str) -> ClientResult<()> {
        (**self).delete_list(owner_id, id)
    }
}

impl<C: ListClient + ?Sized> ListClient for Box<C> {
    fn create_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        (**self).create_list(owner_id, list)
    }

    fn get_list(&self, owner_id: &str, id: &str) -> ClientResult<ListEntity> {
        (**self).get_list(owner_id, id)
    }

    fn list_items(&self, owner_id: &str, id: &str) -> ClientResult<(Vec<ListItem>, ResultInfo)> {
        (**self).list_items(owner_id, id)
    }

    fn update_list(&self, owner_id: &str, list: &ListEntity) -> ClientResult<ListEntity> {
        (**self).update_list(owner_id, list)
    }

    fn patch_list(&self, owner_id: &str, patch: &ListPatch) -> ClientResult<ListEntity> {
        (**self).patch_list(owner_id, patch)
    }

    fn delete_list(&self, owner_id: &str, id: &str) -> ClientResult<()> {
        (**self).delete_list(owner_id, id)
    }
}
