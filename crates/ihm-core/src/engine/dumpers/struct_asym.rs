use super::Dumper;
use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::core::utils::numbering::AsymIdGenerator;
use crate::engine::context::{AsymLabel, DumpContext};
use crate::engine::error::DumpError;
use tracing::debug;

/// Labels asym units A, B, C, ... in system order and writes `_struct_asym`.
pub struct StructAsymDumper;

impl Dumper for StructAsymDumper {
    fn finalize<'a>(
        &self,
        system: &'a System,
        ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        let labelled = system.asym_units().zip(AsymIdGenerator::new()).enumerate();
        for (index, ((id, _), label)) in labelled {
            ctx.asym_labels.insert(
                id,
                AsymLabel {
                    ordinal: index + 1,
                    id: label,
                },
            );
        }
        debug!(asym_units = ctx.asym_labels.len(), "Assigned chain labels.");
        Ok(())
    }

    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop("_struct_asym", &["id", "entity_id", "details"], |lp| {
            for (id, asym) in system.asym_units() {
                lp.row(&[
                    ("id", ctx.asym_label(id)?.id.as_str().into()),
                    ("entity_id", ctx.entity_id(asym.entity)?.into()),
                    ("details", asym.details.as_deref().into()),
                ])?;
            }
            Ok::<_, DumpError>(())
        })?;
        Ok(())
    }
}
