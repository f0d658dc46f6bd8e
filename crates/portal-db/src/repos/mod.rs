//! Repository modules adding read/query methods to `PortalStore`.
//!
//! Each module adds methods via `impl PortalStore` blocks.

pub mod finance;
pub mod preferences;
pub mod terms;
