use anyhow::Result;
use listkit::Reconciler;

use super::{Target, refreshed};
use crate::Context;
use crate::cli::ManifestArgs;
use crate::engine::{self, Action};
use crate::state::ListState;

/// Show what apply would do; never writes state
pub fn run(ctx: &Context, args: &ManifestArgs) -> Result<()> {
    let action = compute(ctx, args)?;
    if !action.is_change() {
        log::info!("Nothing to do");
    }
    Ok(())
}

fn compute(ctx: &Context, args: &ManifestArgs) -> Result<Action> {
    let target = Target::load(ctx, args)?;
    let state = ListState::load(&ctx.state_path()?)?;
    let store = ctx.store()?;
    let reconciler = Reconciler::new(&store);

    let data = refreshed(&reconciler, &state, &target)?;
    let action = engine::plan(&data, &target.spec);
    engine::display_plan(&target.address, &data, &target.spec, &action);

    Ok(action)
}
