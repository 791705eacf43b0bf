use anyhow::{Result, bail};

use crate::Context;
use crate::state::{ListState, StoredList};
use crate::ui;

/// Items listed before eliding, unless -v is given
const ITEM_PREVIEW: usize = 5;

/// Show tracked lists as recorded in state (no backend access)
pub fn run(ctx: &Context, address: Option<&str>) -> Result<()> {
    let state = ListState::load(&ctx.state_path()?)?;

    let entries: Vec<(&String, &StoredList)> = match address {
        Some(address) => match state.resources.get_key_value(address) {
            Some(entry) => vec![entry],
            None => bail!("{address} is not tracked"),
        },
        None => state.resources.iter().collect(),
    };

    if entries.is_empty() {
        ui::info("No lists tracked");
        return Ok(());
    }

    ui::header("Tracked lists");
    for (address, stored) in entries {
        ui::section(address);
        ui::kv("owner", &stored.owner_id);
        ui::kv("id", &stored.id);
        ui::kv("updated", &ui::format_time(&stored.updated_at));

        let Some(observed) = &stored.observed else {
            ui::dim("(not read yet)");
            continue;
        };
        ui::kv("name", &observed.name);
        ui::kv("type", observed.classification.as_str());
        if !observed.description.is_empty() {
            ui::kv("description", &observed.description);
        }
        let limit = if ctx.verbose > 0 {
            observed.items.len()
        } else {
            ITEM_PREVIEW
        };
        ui::kv(
            &format!("items ({})", observed.items.len()),
            &ui::join_limited(&observed.items, limit),
        );
    }
    Ok(())
}
