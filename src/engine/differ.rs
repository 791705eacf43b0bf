//! Plan display

use colored::Colorize;
use listkit::{ListPatch, ListSpecification, ResourceData};

use super::planner::{Action, FieldChange};

/// Item lines shown before the rest is summarized
const MAX_ITEM_LINES: usize = 20;

/// Display the planned action for one list
pub fn display_plan(address: &str, data: &ResourceData, desired: &ListSpecification, action: &Action) {
    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "List Plan".bold()
    );
    println!("│");

    let symbol = match action {
        Action::Create => "+".green(),
        Action::Replace { .. } => "±".red(),
        Action::Update { .. } => "~".yellow(),
        Action::NoChange => "○".dimmed(),
    };
    let id = data.id().unwrap_or("(new)");
    println!(
        "│ {} {:<30} {}",
        symbol,
        address.bold(),
        format!("{}/{}", desired.owner_id, id).dimmed()
    );

    match action {
        Action::Create => {
            println!("│     {} {}", "name:".dimmed(), desired.name);
            println!("│     {} {}", "type:".dimmed(), desired.classification);
            if !desired.description.is_empty() {
                println!("│     {} {}", "description:".dimmed(), desired.description);
            }
            print_items(data.last_known_items(), &desired.items);
        }
        Action::Replace { reason } => {
            print_field(reason);
            println!("│     {}", "(forces replacement)".red());
            print_items(data.last_known_items(), &desired.items);
        }
        Action::Update { changes, patch, .. } => {
            for change in changes {
                print_field(change);
            }
            print_lines(&patch_lines(patch));
        }
        Action::NoChange => {}
    }

    println!("│");
    println!("├─────────────────────────────────────────────────────┤");
    let summary = match action {
        Action::NoChange => "no changes".green().to_string(),
        Action::Update { items, .. } => format!(
            "{} ({} items added, {} removed, {} unchanged)",
            action.verb().yellow(),
            items.added.to_string().green(),
            items.removed.to_string().red(),
            items.unchanged
        ),
        Action::Create => action.verb().green().to_string(),
        Action::Replace { .. } => action.verb().red().to_string(),
    };
    println!("│ Summary: {summary}");
    println!("└─────────────────────────────────────────────────────┘");
}

fn print_field(change: &FieldChange) {
    let from = if change.from.is_empty() {
        "(empty)"
    } else {
        change.from.as_str()
    };
    println!(
        "│     {} {} → {}",
        format!("{}:", change.field).dimmed(),
        from.red(),
        change.to.green()
    );
}

fn print_items(old: &[String], new: &[String]) {
    print_lines(&item_lines(old, new));
}

fn print_lines(lines: &[(char, String)]) {
    for (sign, value) in lines.iter().take(MAX_ITEM_LINES) {
        let line = format!("{sign} {value}");
        let line = if *sign == '+' { line.green() } else { line.red() };
        println!("│       {line}");
    }
    if lines.len() > MAX_ITEM_LINES {
        println!("│       {}", format!("... and {} more", lines.len() - MAX_ITEM_LINES).dimmed());
    }
}

/// Item lines for display: removals first, then additions
pub fn item_lines(old: &[String], new: &[String]) -> Vec<(char, String)> {
    patch_lines(&listkit::diff_items("", old, new))
}

/// Display lines for a planned patch
pub fn patch_lines(patch: &ListPatch) -> Vec<(char, String)> {
    patch
        .remove
        .iter()
        .map(|v| ('-', v.clone()))
        .chain(patch.appended_values().map(|v| ('+', v.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_item_lines() {
        let lines = item_lines(&items(&["a", "b"]), &items(&["b", "c", "d"]));
        assert_eq!(
            lines,
            vec![
                ('-', "a".to_string()),
                ('+', "c".to_string()),
                ('+', "d".to_string())
            ]
        );
    }

    #[test]
    fn test_patch_lines_follow_planned_patch() {
        let data = listkit::ResourceData {
            owner_id: "acct1".into(),
            id: Some("l1".into()),
            observed: Some(ListSpecification {
                owner_id: "acct1".into(),
                name: "blocked".into(),
                classification: listkit::Classification::Domain,
                description: String::new(),
                items: items(&["a", "b"]),
            }),
            lifecycle: listkit::Lifecycle::Present,
        };
        let desired = ListSpecification {
            items: items(&["b", "c"]),
            ..data.observed.clone().unwrap()
        };
        let Action::Update { patch, .. } = crate::engine::plan(&data, &desired) else {
            panic!("expected update");
        };
        assert_eq!(
            patch_lines(&patch),
            vec![('-', "a".to_string()), ('+', "c".to_string())]
        );
    }

    #[test]
    fn test_item_lines_reorder_is_empty() {
        assert!(item_lines(&items(&["a", "b"]), &items(&["b", "a"])).is_empty());
    }
}
