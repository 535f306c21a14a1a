//! # Workflows Module
//!
//! Entry points for exporting systems.
//!
//! - **mmCIF Export** ([`write`]) - Writes any number of systems to a sink or a file,
//!   one data block per system.

pub mod write;
