//! # eppr-core
//!
//! Core types shared across all EPPR crates.
//!
//! - Entity structs for every table of the progress-tracking schema
//!   (groups, projects, work breakdown, deliverables, progress history)
//! - `TableName`, the closed set of table identifiers the data layer will
//!   ever put into SQL
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
