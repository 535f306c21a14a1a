use super::Dumper;
use crate::core::io::cif::{CifValue, CifWriter};
use crate::core::models::system::System;
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;

/// Writes one `_entity_poly_seq` row per residue of every entity.
pub struct EntityPolySeqDumper;

impl Dumper for EntityPolySeqDumper {
    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop(
            "_entity_poly_seq",
            &["entity_id", "num", "mon_id", "hetero"],
            |lp| {
                for (id, _) in system.entities() {
                    let entity_id = ctx.entity_id(id)?;
                    let monomers = ctx
                        .monomers
                        .get(id)
                        .ok_or(DumpError::DanglingReference { kind: "entity" })?;
                    for (num, &monomer) in monomers.iter().enumerate() {
                        lp.row(&[
                            ("entity_id", entity_id.into()),
                            ("num", (num + 1).into()),
                            ("mon_id", monomer.into()),
                            ("hetero", CifValue::Omitted),
                        ])?;
                    }
                }
                Ok::<_, DumpError>(())
            },
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entity::Entity;
    use crate::engine::config::DumpConfig;
    use crate::engine::dumpers::chem_comp::ChemCompDumper;
    use crate::engine::dumpers::entity::EntityDumper;
    use crate::engine::dumpers::test_utils::{dump_to_string, finalize_all};

    #[test]
    fn numbers_residues_from_one_per_entity() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACG"));
        system.add_entity(Entity::new("W"));
        let config = DumpConfig::default();
        let mut ctx = DumpContext::new(&config);
        finalize_all(&[&ChemCompDumper, &EntityDumper], &system, &mut ctx).unwrap();

        let out = dump_to_string(&EntityPolySeqDumper, &system, &ctx);
        assert_eq!(
            out,
            "#\nloop_\n_entity_poly_seq.entity_id\n_entity_poly_seq.num\n\
             _entity_poly_seq.mon_id\n_entity_poly_seq.hetero\n\
             1 1 ALA .\n\
             1 2 CYS .\n\
             1 3 GLY .\n\
             2 1 TRP .\n\
             #\n"
        );
    }
}
