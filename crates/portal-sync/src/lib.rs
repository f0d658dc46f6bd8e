//! # portal-sync
//!
//! Background synchronization of the academic portal into the local store.
//!
//! [`SyncOrchestrator`] accepts named sync requests, serializes them onto one
//! worker, runs each resource's fetch → decode → persist pipeline inside a
//! single store transaction, and announces the outcome on a
//! [`NotificationBus`].

pub mod decode;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod pipeline;

pub use error::SyncError;
pub use notify::{NotificationBus, Subscription, SyncEvent};
pub use orchestrator::SyncOrchestrator;
pub use pipeline::{PipelineContext, run_pipeline};
