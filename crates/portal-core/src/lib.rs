//! # portal-core
//!
//! Core types shared by every crate of the portal sync engine:
//! - Entity structs mirrored from the academic portal (schedules, exams,
//!   finance charges, dates, terms, grades, courses)
//! - [`SyncKind`] and [`Collection`] identifiers
//! - Cross-cutting error types
//! - Display helpers for finance totals and the last-updated stamp

pub mod display;
pub mod entities;
pub mod errors;
pub mod kinds;

pub use errors::CoreError;
pub use kinds::{Collection, SyncKind};
