//! # Core Module
//!
//! Data structures and low-level building blocks for mmCIF export.
//!
//! - **System Representation** ([`models`]) - Entities, asym units, assemblies, software
//!   and external file locations
//! - **CIF Output** ([`io`]) - Category and loop writer with value quoting and line folding
//! - **Utilities** ([`utils`]) - ID assignment, chain labels, residue names and paths

pub mod io;
pub mod models;
pub mod utils;
