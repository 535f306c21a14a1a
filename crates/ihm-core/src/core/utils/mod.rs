pub mod identifiers;
pub mod numbering;
pub mod paths;
