use anyhow::{Context as AnyhowContext, Result, bail};
use listkit::{Reconciler, Verification};

use crate::Context;
use crate::state::ListState;
use crate::ui;

pub fn run(ctx: &Context, address: &str, yes: bool) -> Result<()> {
    let state_path = ctx.state_path()?;
    let mut state = ListState::load(&state_path)?;
    if !state.contains(address) {
        bail!("{address} is not tracked");
    }

    let mut data = state.resource(address, "");
    let id = data.id().unwrap_or_default().to_string();

    if !ctx.quiet {
        ui::header(&format!("Destroy {address}"));
        ui::kv("owner", &data.owner_id);
        ui::kv("id", &id);
    }

    if !yes && !ui::confirm(&format!("Delete list {id}?"), false)? {
        ui::warn("Aborted");
        return Ok(());
    }

    let store = ctx.store()?;
    let reconciler = Reconciler::new(&store);
    let verification = reconciler
        .delete(&mut data)
        .with_context(|| format!("Failed to destroy {address}"))?;

    state.record(address, &data);
    state.save(&state_path)?;

    match verification {
        Verification::ConfirmedAbsent => ui::success(&format!("Destroyed {address}")),
        Verification::StillPresent => {
            ui::warn(&format!("Deleted {address}, but list {id} is still reported"));
        }
        Verification::Unverified => {
            ui::warn(&format!("Deleted {address}, but could not verify removal"));
        }
    }
    Ok(())
}
