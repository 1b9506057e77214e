//! Sheet-backed persistence for kitchen-operations records.
//! - `storage`: the narrow tabular interface plus its backends.
//! - `sheet`: the record-mapping layer (id allocation, partial updates,
//!   cross-entity lookups) built on top of it.
//! - Clear error types; the one distinction callers must branch on is
//!   "not found" versus everything else.

pub mod errors;
pub mod storage;
pub mod sheet;

#[cfg(test)]
pub mod test_support;
