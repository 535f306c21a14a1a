use super::Dumper;
use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::core::utils::identifiers::{PEPTIDE_LINKING, residue_name};
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;
use tracing::debug;

/// Resolves every entity sequence to residue names and writes the distinct ones.
///
/// Resolution happens during finalize, so a sequence with an unknown one-letter code
/// aborts the export before any category of the system has been written.
pub struct ChemCompDumper;

impl Dumper for ChemCompDumper {
    fn finalize<'a>(
        &self,
        system: &'a System,
        ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        for (index, (id, entity)) in system.entities().enumerate() {
            let monomers = entity
                .sequence
                .chars()
                .enumerate()
                .map(|(position, code)| {
                    residue_name(code).ok_or(DumpError::UnknownResidueCode {
                        code,
                        entity: index + 1,
                        position: position + 1,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            for &monomer in &monomers {
                ctx.chem_comps.assign(monomer);
            }
            ctx.monomers.insert(id, monomers);
        }
        debug!(
            chem_comps = ctx.chem_comps.len(),
            "Resolved residue types for all entities."
        );
        Ok(())
    }

    fn dump(
        &self,
        _system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop("_chem_comp", &["id", "type"], |lp| {
            for (_, &name) in ctx.chem_comps.iter() {
                lp.row(&[("id", name.into()), ("type", PEPTIDE_LINKING.into())])?;
            }
            Ok::<_, DumpError>(())
        })?;
        Ok(())
    }
}
