use phf::{Map, phf_map};

/// Number of one-letter codes per line when a sequence is written as a text field.
pub const SEQUENCE_LINE_WIDTH: usize = 70;

/// Chemical component type of every residue in [`AMINO_ACIDS`].
pub const PEPTIDE_LINKING: &str = "L-peptide linking";

static AMINO_ACIDS: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'C' => "CYS", 'D' => "ASP", 'E' => "GLU", 'F' => "PHE",
    'G' => "GLY", 'H' => "HIS", 'I' => "ILE", 'K' => "LYS", 'L' => "LEU",
    'M' => "MET", 'N' => "ASN", 'P' => "PRO", 'Q' => "GLN", 'R' => "ARG",
    'S' => "SER", 'T' => "THR", 'V' => "VAL", 'W' => "TRP", 'Y' => "TYR",
};

/// Maps a standard amino-acid one-letter code to its three-letter component ID.
pub fn residue_name(one_letter_code: char) -> Option<&'static str> {
    AMINO_ACIDS.get(&one_letter_code).copied()
}

/// Splits a one-letter sequence into lines of at most `width` codes.
///
/// Only line breaks are inserted, so removing every `'\n'` gives back the input.
pub fn wrap_sequence(sequence: &str, width: usize) -> String {
    let codes: Vec<char> = sequence.chars().collect();
    codes
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
