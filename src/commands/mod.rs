//! Command implementations
//!
//! Every command loads the state file, works on one or more addresses
//! through a [`Reconciler`] over the configured backend, and writes the
//! state back when something changed.

pub mod apply;
pub mod destroy;
pub mod import;
pub mod plan;
pub mod refresh;
pub mod show;

use anyhow::{Context as AnyhowContext, Result};
use listkit::{ListClient, ListSpecification, Reconciler, ResourceData};

use crate::Context;
use crate::cli::ManifestArgs;
use crate::config;
use crate::state::ListState;

/// A manifest resolved to its state address and desired state
#[derive(Debug)]
pub struct Target {
    pub address: String,
    pub spec: ListSpecification,
}

impl Target {
    pub fn load(ctx: &Context, args: &ManifestArgs) -> Result<Self> {
        let spec = config::load_specification(&args.manifest, ctx.owner_id.as_deref())?;
        let address = match &args.address {
            Some(address) => address.clone(),
            None => config::default_address(&args.manifest)?,
        };
        Ok(Self { address, spec })
    }
}

/// Tracked slot for `target`, re-read from the backend
pub fn refreshed<C: ListClient>(
    reconciler: &Reconciler<C>,
    state: &ListState,
    target: &Target,
) -> Result<ResourceData> {
    let mut data = state.resource(&target.address, &target.spec.owner_id);
    if data.is_absent() {
        return Ok(data);
    }

    reconciler
        .read(&mut data)
        .with_context(|| format!("Failed to refresh {}", target.address))?;
    if data.is_absent() {
        log::info!("{} is tracked but no longer exists", target.address);
    }
    Ok(data)
}
