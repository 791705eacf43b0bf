//! # listkit
//!
//! Declarative reconciliation for remote named lists.
//!
//! A named list is a remotely stored set of classified string values
//! (serial numbers, URLs, domains or email addresses) with a name and a
//! description. This crate converges such a list to a desired
//! specification and reads it back, sending minimal item patches instead
//! of replacing the whole list.
//!
//! ## Core Concepts
//!
//! - **ListSpecification**: the desired (or observed) shape of a list
//! - **ResourceData**: the local slot holding the remote id and last observation
//! - **diff_items**: multiset diff producing an append/remove [`ListPatch`]
//! - **Reconciler**: create, read, update, delete and import over a [`ListClient`]
//!
//! ## Example
//!
//! ```ignore
//! use listkit::{Classification, ListSpecification, Reconciler, ResourceData};
//!
//! let reconciler = Reconciler::new(&client);
//! let desired = ListSpecification {
//!     owner_id: "acct1".into(),
//!     name: "blocked".into(),
//!     classification: Classification::Domain,
//!     description: String::new(),
//!     items: vec!["example.com".into()],
//! };
//!
//! let mut data = ResourceData::absent("acct1");
//! reconciler.create(&mut data, &desired)?;
//! assert!(!data.is_absent());
//! ```
//!
//! The client is injected explicitly, so any backend (or a test double)
//! implementing [`ListClient`] can be used.

pub mod client;
pub mod codec;
pub mod diff;
pub mod error;
pub mod import;
pub mod reconciler;
pub mod types;

// Re-export main types at crate root
pub use client::ListClient;
pub use diff::{ItemChanges, diff_items};
pub use error::{ClientError, ClientResult, Error, ErrorCategory, Operation, Result};
pub use import::ImportId;
pub use reconciler::{Reconciler, Verification};
pub use types::{
    Classification, Lifecycle, ListEntity, ListItem, ListPatch, ListSpecification,
    ParseClassificationError, ResourceData, ResultInfo,
};
