use anyhow::{Result, bail};
use listkit::Reconciler;

use crate::Context;
use crate::state::ListState;
use crate::ui;

/// Re-read tracked lists and write what was found back to state
///
/// Lists that no longer exist are dropped from state. A failed read
/// leaves that entry alone and fails the command after the rest are done.
pub fn run(ctx: &Context, address: Option<&str>) -> Result<()> {
    let state_path = ctx.state_path()?;
    let mut state = ListState::load(&state_path)?;

    let addresses: Vec<String> = match address {
        Some(address) => {
            if !state.contains(address) {
                bail!("{address} is not tracked");
            }
            vec![address.to_string()]
        }
        None => state.resources.keys().cloned().collect(),
    };

    if addresses.is_empty() {
        ui::info("No lists tracked");
        return Ok(());
    }

    let store = ctx.store()?;
    let reconciler = Reconciler::new(&store);
    let mut failed = 0;

    for address in &addresses {
        let mut data = state.resource(address, "");
        match reconciler.read(&mut data) {
            Ok(()) if data.is_absent() => {
                ui::warn(&format!("{address} no longer exists, removed from state"));
                state.record(address, &data);
            }
            Ok(()) => {
                if !ctx.quiet {
                    ui::success(&format!("Refreshed {address}"));
                }
                state.record(address, &data);
            }
            Err(err) => {
                ui::error(&format!("{address}: {err}"));
                failed += 1;
            }
        }
    }

    state.save(&state_path)?;

    if failed > 0 {
        bail!("{failed} of {} lists could not be refreshed", addresses.len());
    }
    Ok(())
}
