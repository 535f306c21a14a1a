//! Dumpers that turn one part of a system into mmCIF categories.
//!
//! Every dumper runs in two phases. `finalize` walks the system and records derived
//! state (assigned IDs, labels, deduplicated tables) in the [`DumpContext`]; `dump` then
//! writes categories from the system and that state only. All dumpers are finalized
//! before the first one dumps, so cross-references always resolve and validation errors
//! surface before any text for the system is written.

pub mod assembly;
pub mod chem_comp;
pub mod entity;
pub mod entity_poly;
pub mod entity_poly_seq;
pub mod entry;
pub mod external_reference;
pub mod software;
pub mod struct_asym;

use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;

pub trait Dumper {
    /// Records derived state for `system` in `ctx`. Must not write output.
    fn finalize<'a>(
        &self,
        _system: &'a System,
        _ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        Ok(())
    }

    /// Writes this dumper's categories for `system`.
    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError>;
}

/// All dumpers in output order.
///
/// Finalize order matters too: entity and asym numbering come before the dumpers that
/// refer to them.
pub fn default_dumpers() -> Vec<Box<dyn Dumper>> {
    vec![
        Box::new(entry::EntryDumper),
        Box::new(software::SoftwareDumper),
        Box::new(chem_comp::ChemCompDumper),
        Box::new(entity::EntityDumper),
        Box::new(entity_poly::EntityPolyDumper),
        Box::new(entity_poly_seq::EntityPolySeqDumper),
        Box::new(struct_asym::StructAsymDumper),
        Box::new(assembly::AssemblyDumper),
        Box::new(external_reference::ExternalReferenceDumper),
    ]
}
