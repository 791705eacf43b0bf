//! Execution engine - carries out a planned action through the reconciler

use listkit::{ListClient, ListSpecification, Reconciler, ResourceData, Verification};

use super::planner::Action;

/// Outcome of applying one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyResult {
    Created { id: String },
    Modified,
    Replaced { old_id: String, new_id: String },
    NoChange,
    Skipped { reason: String },
}

impl ApplyResult {
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            Self::Created { .. } | Self::Modified | Self::Replaced { .. }
        )
    }
}

/// Apply `action` to `data`
///
/// `data` is updated in place even when an error is returned, so the
/// caller can persist whatever id the remote side has assigned so far.
pub fn execute<C: ListClient>(
    reconciler: &Reconciler<C>,
    data: &mut ResourceData,
    desired: &ListSpecification,
    action: &Action,
    dry_run: bool,
) -> listkit::Result<ApplyResult> {
    if dry_run {
        return Ok(match action {
            Action::NoChange => ApplyResult::NoChange,
            _ => ApplyResult::Skipped {
                reason: "dry run".to_string(),
            },
        });
    }

    match action {
        Action::NoChange => Ok(ApplyResult::NoChange),
        Action::Create => {
            reconciler.create(data, desired)?;
            Ok(ApplyResult::Created {
                id: current_id(data),
            })
        }
        Action::Update { .. } => {
            reconciler.update(data, desired)?;
            Ok(ApplyResult::Modified)
        }
        Action::Replace { reason } => {
            let old_id = current_id(data);
            log::info!("Replacing list {old_id}: {} changed", reason.field);

            match reconciler.delete(data)? {
                Verification::ConfirmedAbsent => {}
                Verification::StillPresent => {
                    log::warn!("Old list {old_id} still reported after delete, creating anyway");
                }
                Verification::Unverified => {
                    log::warn!("Could not verify deletion of {old_id}");
                }
            }

            *data = ResourceData::absent(desired.owner_id.clone());
            reconciler.create(data, desired)?;
            Ok(ApplyResult::Replaced {
                old_id,
                new_id: current_id(data),
            })
        }
    }
}

fn current_id(data: &ResourceData) -> String {
    data.id().unwrap_or_default().to_string()
}
