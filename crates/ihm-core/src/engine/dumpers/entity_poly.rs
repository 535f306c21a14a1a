use super::Dumper;
use crate::core::io::cif::{CifValue, CifWriter};
use crate::core::models::ids::EntityId;
use crate::core::models::system::System;
use crate::core::utils::identifiers::{SEQUENCE_LINE_WIDTH, wrap_sequence};
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;
use std::collections::HashMap;

/// Writes `_entity_poly` with the wrapped one-letter sequence of every entity.
pub struct EntityPolyDumper;

impl EntityPolyDumper {
    /// Chain label of the first asym unit of each entity.
    fn strand_ids<'c>(
        system: &System,
        ctx: &'c DumpContext<'_>,
    ) -> Result<HashMap<EntityId, &'c str>, DumpError> {
        let mut strands = HashMap::new();
        for (id, asym) in system.asym_units() {
            if !strands.contains_key(&asym.entity) {
                strands.insert(asym.entity, ctx.asym_label(id)?.id.as_str());
            }
        }
        Ok(strands)
    }
}

impl Dumper for EntityPolyDumper {
    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        let strands = Self::strand_ids(system, ctx)?;
        writer.write_loop(
            "_entity_poly",
            &[
                "entity_id",
                "type",
                "nstd_linkage",
                "nstd_monomer",
                "pdbx_strand_id",
                "pdbx_seq_one_letter_code",
                "pdbx_seq_one_letter_code_can",
            ],
            |lp| {
                for (id, entity) in system.entities() {
                    let sequence = wrap_sequence(&entity.sequence, SEQUENCE_LINE_WIDTH);
                    lp.row(&[
                        ("entity_id", ctx.entity_id(id)?.into()),
                        ("type", "polypeptide(L)".into()),
                        ("nstd_linkage", "no".into()),
                        ("nstd_monomer", "no".into()),
                        ("pdbx_strand_id", strands.get(&id).copied().into()),
                        ("pdbx_seq_one_letter_code", CifValue::from(&sequence)),
                        ("pdbx_seq_one_letter_code_can", sequence.into()),
                    ])?;
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
    use crate::core::models::asym::AsymUnit;
    use crate::core::models::entity::Entity;
    use crate::engine::config::DumpConfig;
    use crate::engine::dumpers::entity::EntityDumper;
    use crate::engine::dumpers::struct_asym::StructAsymDumper;
    use crate::engine::dumpers::test_utils::{dump_to_string, finalize_all};

    #[test]
    fn strand_id_is_first_chain_of_the_entity() {
        let mut system = System::new("test");
        let e1 = system.add_entity(Entity::new("ACGT"));
        let e2 = system.add_entity(Entity::new("ACC"));
        system.add_entity(Entity::new("CCCC"));
        system.add_asym_unit(AsymUnit::new(e2)).unwrap();
        system.add_asym_unit(AsymUnit::new(e1)).unwrap();
        system.add_asym_unit(AsymUnit::new(e2)).unwrap();
        let config = DumpConfig::default();
        let mut ctx = DumpContext::new(&config);
        finalize_all(&[&EntityDumper, &StructAsymDumper], &system, &mut ctx).unwrap();

        let out = dump_to_string(&EntityPolyDumper, &system, &ctx);
        let rows: Vec<&str> = out.lines().skip(9).collect();
        assert_eq!(
            rows,
            vec![
                "1 polypeptide(L) no no B ACGT ACGT",
                "2 polypeptide(L) no no A ACC ACC",
                "3 polypeptide(L) no no . CCCC CCCC",
                "#",
            ]
        );
    }

    #[test]
    fn long_sequences_become_text_fields() {
        let sequence = "A".repeat(100);
        let mut system = System::new("test");
        system.add_entity(Entity::new(&sequence));
        let config = DumpConfig::default();
        let mut ctx = DumpContext::new(&config);
        finalize_all(&[&EntityDumper], &system, &mut ctx).unwrap();

        let out = dump_to_string(&EntityPolyDumper, &system, &ctx);
        let field = format!(";{}\n{}\n;\n", "A".repeat(70), "A".repeat(30));
        assert_eq!(out.matches(&field).count(), 2);
        assert!(out.contains("1 polypeptide(L) no no .\n;"));
    }
}
