//! # Engine Module
//!
//! Turns a [`System`](crate::core::models::system::System) into mmCIF categories.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Output settings loaded from TOML or built in code
//! - **Context** ([`context`]) - IDs and tables derived from one system during export
//! - **Dumpers** ([`dumpers`]) - One per group of categories, run as finalize then dump
//! - **Error Handling** ([`error`]) - Failures that abort an export

pub mod config;
pub mod context;
pub mod dumpers;
pub mod error;
