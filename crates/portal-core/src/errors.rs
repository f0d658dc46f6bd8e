//! Cross-cutting error types for the portal sync engine.
//!
//! Component errors (`GatewayError`, `StoreError`, `SyncError`) live in their
//! own crates. Everything converges into `anyhow` in the binary.

use thiserror::Error;

/// Errors that can be raised while interpreting core identifiers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sync kind name did not match any known resource.
    #[error("Unknown sync kind: {0}")]
    UnknownKind(String),

    /// A collection name did not match any stored collection.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}
