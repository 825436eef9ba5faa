//! Typed HTTP client for the upstream Curse addon API.
//!
//! This crate maps one-to-one onto the remote endpoints: single addons,
//! addon batches, descriptions, files, file batches, changelogs, and
//! criteria-based search, plus a paged-search aggregation helper.
//!
//! # Failure contract
//! Every operation is a single round trip. Any failure - transport,
//! non-success status, undecodable body - is logged with the request and
//! raw response, then surfaces as `None`. Absence means "no data", never a
//! reportable error; callers that need to tell not-found apart from a
//! broken upstream must not use this contract.

mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
pub mod models;
mod provider;

pub use crate::client::{CurseClient, DEFAULT_BASE_URL};
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::{MockProvider, sample_addon};
pub use crate::provider::AddonProvider;
