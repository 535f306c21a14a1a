//! # IHM mmCIF Export Library
//!
//! Writes integrative/hybrid models as mmCIF text, one data block per model, with every
//! cross-reference between categories resolved to stable numeric and chain IDs.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture, keeping the data model free of any
//! output concerns.
//!
//! - **[`core`]: The Foundation.** Plain data models (`System`, `Entity`, `Assembly`,
//!   locations), the CIF category/loop writer, and small utilities such as the ID table
//!   and the chain-label generator.
//!
//! - **[`engine`]: The Logic Core.** The per-export [`engine::context::DumpContext`] and
//!   the dumpers, each of which first finalizes (assigns IDs, deduplicates, validates) and
//!   then dumps its categories.
//!
//! - **[`workflows`]: The Public API.** Runs every dumper over a list of systems and writes
//!   the result to a sink or a file.

pub mod core;
pub mod engine;
pub mod workflows;
