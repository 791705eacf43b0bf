//! Planner - decides how to converge a tracked list to its manifest
//!
//! The reconciler only knows create/update/delete. Whether a change needs a
//! replacement instead of an update is decided here: moving a list to
//! another owner or changing its type cannot be done in place.

use listkit::{ItemChanges, ListPatch, ListSpecification, ResourceData, diff_items};

/// A scalar field that differs between observed and desired state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub from: String,
    pub to: String,
}

/// What apply would do for one list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No list exists yet
    Create,
    /// The list must be deleted and created again
    Replace { reason: FieldChange },
    /// The list is updated in place
    Update {
        changes: Vec<FieldChange>,
        items: ItemChanges,
        patch: ListPatch,
    },
    /// Already converged
    NoChange,
}

impl Action {
    /// Check if applying this action changes anything
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Short verb for summaries
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Replace { .. } => "replace",
            Self::Update { .. } => "update",
            Self::NoChange => "no change",
        }
    }
}

/// Plan the action for `data` (already refreshed) against `desired`
pub fn plan(data: &ResourceData, desired: &ListSpecification) -> Action {
    let Some(id) = data.id() else {
        return Action::Create;
    };

    if data.owner_id != desired.owner_id {
        return Action::Replace {
            reason: change("owner_id", &data.owner_id, &desired.owner_id),
        };
    }

    let Some(observed) = data.observed.as_ref() else {
        // Tracked but never read: send everything.
        return Action::Update {
            changes: scalar_changes(None, desired),
            items: ItemChanges::between(&[], &desired.items),
            patch: diff_items(id, &[], &desired.items),
        };
    };

    if observed.classification != desired.classification {
        return Action::Replace {
            reason: change(
                "type",
                observed.classification.as_str(),
                desired.classification.as_str(),
            ),
        };
    }

    let changes = scalar_changes(Some(observed), desired);
    let items_differ = observed.items != desired.items;

    if changes.is_empty() && !items_differ {
        return Action::NoChange;
    }

    Action::Update {
        changes,
        items: ItemChanges::between(&observed.items, &desired.items),
        patch: diff_items(id, &observed.items, &desired.items),
    }
}

fn scalar_changes(observed: Option<&ListSpecification>, desired: &ListSpecification) -> Vec<FieldChange> {
    let (name, description) = observed
        .map(|o| (o.name.as_str(), o.description.as_str()))
        .unwrap_or_default();

    let mut changes = Vec::new();
    if name != desired.name {
        changes.push(change("name", name, &desired.name));
    }
    if description != desired.description {
        changes.push(change("description", description, &desired.description));
    }
    changes
}

fn change(field: &'static str, from: &str, to: &str) -> FieldChange {
    FieldChange {
        field,
        from: from.to_string(),
        to: to.to_string(),
    }
}
