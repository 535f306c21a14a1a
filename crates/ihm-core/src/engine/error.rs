use crate::core::io::cif::CifError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Duplicate entity found with sequence '{sequence}'")]
    DuplicateEntity { sequence: String },

    #[error(
        "Unknown one-letter residue code '{code}' at position {position} of entity #{entity}"
    )]
    UnknownResidueCode {
        code: char,
        entity: usize,
        position: usize,
    },

    #[error(
        "Cannot express '{path}' relative to '{root}'",
        path = path.display(),
        root = root.display()
    )]
    PathResolution { path: PathBuf, root: PathBuf },

    #[error("Reference to {kind} that is not part of the system")]
    DanglingReference { kind: &'static str },

    #[error("CIF output failed: {0}")]
    Cif(#[from] CifError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
