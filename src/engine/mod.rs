//! Execution engine for listctl
//!
//! The engine orchestrates:
//! 1. Planning - Decide create, update, replace or nothing
//! 2. Diffing - Show the field and item changes
//! 3. Executing - Apply the action through the reconciler

pub mod differ;
pub mod executor;
pub mod planner;

pub use differ::display_plan;
pub use executor::{ApplyResult, execute};
pub use planner::{Action, plan};
