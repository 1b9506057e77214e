//! Typed domain records for the kitchen-ops sheet tabs.
//!
//! One module per entity; each knows its tab name, its fixed header row,
//! and how to map itself to and from sheet rows.

use std::collections::HashMap;

pub mod errors;
pub mod cell;
pub mod inventory;
pub mod employee;
pub mod dish;
pub mod checkin;

/// One sheet row keyed by its tab's header names.
pub type Record = HashMap<String, String>;
