use anyhow::{Context as AnyhowContext, Result};
use listkit::Reconciler;

use super::{Target, refreshed};
use crate::Context;
use crate::cli::ApplyArgs;
use crate::engine::{self, ApplyResult};
use crate::state::ListState;
use crate::ui;

pub fn run(ctx: &Context, args: &ApplyArgs) -> Result<()> {
    let target = Target::load(ctx, &args.target)?;
    let state_path = ctx.state_path()?;
    let mut state = ListState::load(&state_path)?;
    let store = ctx.store()?;
    let reconciler = Reconciler::new(&store);

    let mut data = refreshed(&reconciler, &state, &target)?;
    let action = engine::plan(&data, &target.spec);
    if !ctx.quiet {
        engine::display_plan(&target.address, &data, &target.spec, &action);
    }

    if !action.is_change() {
        state.record(&target.address, &data);
        state.save(&state_path)?;
        ui::success(&format!("{} is up to date", target.address));
        return Ok(());
    }

    if !args.yes && !args.dry_run && !ui::confirm("Apply these changes?", true)? {
        ui::warn("Aborted");
        return Ok(());
    }

    let outcome = engine::execute(&reconciler, &mut data, &target.spec, &action, args.dry_run);

    // Persist whatever the backend assigned, even on failure.
    if !args.dry_run {
        state.record(&target.address, &data);
        state.save(&state_path)?;
    }

    let result = outcome.with_context(|| format!("Failed to apply {}", target.address))?;
    report(&target.address, &result);
    Ok(())
}

fn report(address: &str, result: &ApplyResult) {
    match result {
        ApplyResult::Created { id } => ui::success(&format!("Created {address} ({id})")),
        ApplyResult::Modified => ui::success(&format!("Updated {address}")),
        ApplyResult::Replaced { old_id, new_id } => {
            ui::success(&format!("Replaced {address} ({old_id} → {new_id})"));
        }
        ApplyResult::NoChange => ui::success(&format!("{address} is up to date")),
        ApplyResult::Skipped { reason } => ui::info(&format!("Skipped {address}: {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ManifestArgs;
    use crate::commands::testing;
    use listkit::ListClient;
    use tempfile::TempDir;

    fn apply_args(target: ManifestArgs, dry_run: bool) -> ApplyArgs {
        ApplyArgs {
            target,
            dry_run,
            yes: true,
        }
    }

    #[test]
    fn test_apply_creates_and_tracks() {
        let tmp = TempDir::new().unwrap();
        let ctx = testing::context(&tmp);
        let args = testing::manifest(&tmp, "DOMAIN", &["a.example", "b.example"]);

        run(&ctx, &apply_args(args, false)).unwrap();

        let state = ListState::load(&ctx.state_path().unwrap()).unwrap();
        let stored = &state.resources["blocked"];
        assert_eq!(stored.owner_id, "acct1");

        let store = ctx.store().unwrap();
        let (items, _) = store.list_items("acct1", &stored.id).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_apply_updates_items() {
        let tmp = TempDir::new().unwrap();
        let ctx = testing::context(&tmp);

        let args = testing::manifest(&tmp, "DOMAIN", &["a.example"]);
        run(&ctx, &apply_args(args, false)).unwrap();
        let args = testing::manifest(&tmp, "DOMAIN", &["b.example"]);
        run(&ctx, &apply_args(args, false)).unwrap();

        let state = ListState::load(&ctx.state_path().unwrap()).unwrap();
        let observed = state.resources["blocked"].observed.as_ref().unwrap();
        assert_eq!(observed.items, vec!["b.example".to_string()]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let ctx = testing::context(&tmp);
        let args = testing::manifest(&tmp, "URL", &["https://bad.example"]);

        run(&ctx, &apply_args(args, true)).unwrap();

        assert!(!tmp.path().join("state.toml").exists());
        assert!(!tmp.path().join("backend").exists());
    }

    #[test]
    fn test_apply_recreates_deleted_list() {
        let tmp = TempDir::new().unwrap();
        let ctx = testing::context(&tmp);
        let args = testing::manifest(&tmp, "EMAIL", &["x@bad.example"]);
        run(&ctx, &apply_args(args, false)).unwrap();

        let state = ListState::load(&ctx.state_path().unwrap()).unwrap();
        let old_id = state.resources["blocked"].id.clone();
        ctx.store().unwrap().delete_list("acct1", &old_id).unwrap();

        let args = testing::manifest(&tmp, "EMAIL", &["x@bad.example"]);
        run(&ctx, &apply_args(args, false)).unwrap();

        let state = ListState::load(&ctx.state_path().unwrap()).unwrap();
        assert_ne!(state.resources["blocked"].id, old_id);
    }
}
