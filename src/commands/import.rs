use anyhow::{Context as AnyhowContext, Result, bail};
use listkit::Reconciler;

use crate::Context;
use crate::state::ListState;
use crate::ui;

/// Adopt an existing list (`ownerID/listID`) under `address`
pub fn run(ctx: &Context, address: &str, raw_id: &str) -> Result<()> {
    let state_path = ctx.state_path()?;
    let mut state = ListState::load(&state_path)?;
    if state.contains(address) {
        bail!("{address} is already tracked; destroy it or pick another address");
    }

    let store = ctx.store()?;
    let reconciler = Reconciler::new(&store);
    let data = reconciler
        .import(raw_id)
        .with_context(|| format!("Failed to import {address}"))?;

    if data.is_absent() {
        bail!("List {raw_id} does not exist");
    }

    state.record(address, &data);
    state.save(&state_path)?;

    ui::success(&format!("Imported {raw_id} as {address}"));
    if let Some(observed) = data.observed.as_ref().filter(|_| !ctx.quiet) {
        ui::kv("name", &observed.name);
        ui::kv("type", observed.classification.as_str());
        ui::kv("items", &observed.items.len().to_string());
    }
    Ok(())
}
