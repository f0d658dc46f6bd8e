//! Sync error types.

use portal_core::SyncKind;
use portal_db::StoreError;
use portal_gateway::GatewayError;
use thiserror::Error;

use crate::decode::DecodeError;

/// Why a pipeline (and with it the current drain cycle) was aborted.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The gateway could not deliver a response.
    #[error("{kind}: transport failed: {source}")]
    Transport {
        kind: SyncKind,
        #[source]
        source: GatewayError,
    },

    /// The response did not have the expected shape.
    #[error("{kind}: decode failed: {source}")]
    Decode {
        kind: SyncKind,
        #[source]
        source: DecodeError,
    },

    /// The local store rejected a read or write.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No endpoint is configured for a kind that needs one.
    #[error("no endpoint configured for {0}")]
    NoEndpoint(SyncKind),

    /// The worker thread could not be started.
    #[error("failed to start sync worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The orchestrator was built outside a tokio runtime.
    #[error("no tokio runtime available for the sync worker")]
    NoRuntime,
}
