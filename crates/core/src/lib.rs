//! Forkful domain core.
//!
//! Pure domain logic shared by the persistence and API layers: ID and
//! timestamp aliases, the error taxonomy, the versioned recipe snapshot,
//! the field-level diff and compare engines, and input validation. This
//! crate performs no I/O.

pub mod branching;
pub mod compare;
pub mod contribution;
pub mod diff;
pub mod error;
pub mod forking;
pub mod merge;
pub mod pagination;
pub mod recipe;
pub mod snapshot;
pub mod types;
