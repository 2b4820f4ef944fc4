//! Domain-specific errors.
//!
//! Only two failure classes abort a run: a missing entry file and a sink that
//! refuses the rendered bundle. Everything encountered mid-walk fails soft.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while setting up or running a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("entry file not found or unreadable: {0}")]
    EntryNotFound(PathBuf),
}

/// The output sink rejected a bundle that was already computed correctly.
#[derive(Debug, Error)]
#[error("output sink unavailable: {0}")]
pub struct SinkError(pub String);
