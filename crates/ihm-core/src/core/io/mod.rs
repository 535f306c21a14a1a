//! Text output in the CIF format.
//!
//! The writer handles tokenization only: quoting, text fields, sentinels, line folding
//! and suppression of empty loops. It has no knowledge of the mmCIF dictionary.

pub mod cif;
