use super::Dumper;
use crate::core::io::cif::{CifValue, CifWriter};
use crate::core::models::system::System;
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;
use std::collections::HashSet;
use tracing::debug;

/// Numbers entities from 1 in system order and writes `_entity`.
pub struct EntityDumper;

impl Dumper for EntityDumper {
    fn finalize<'a>(
        &self,
        system: &'a System,
        ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        let mut seen = HashSet::new();
        for (index, (id, entity)) in system.entities().enumerate() {
            if !seen.insert(entity) {
                return Err(DumpError::DuplicateEntity {
                    sequence: entity.sequence.clone(),
                });
            }
            ctx.entity_ids.insert(id, index + 1);
        }
        debug!(entities = ctx.entity_ids.len(), "Assigned entity IDs.");
        Ok(())
    }

    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop(
            "_entity",
            &[
                "id",
                "type",
                "src_method",
                "pdbx_description",
                "formula_weight",
                "pdbx_number_of_molecules",
                "details",
            ],
            |lp| {
                for (id, entity) in system.entities() {
                    lp.row(&[
                        ("id", ctx.entity_id(id)?.into()),
                        ("type", entity.entity_type.as_str().into()),
                        ("src_method", entity.src_method.as_str().into()),
                        ("pdbx_description", entity.description.as_deref().into()),
                        (
                            "formula_weight",
                            entity.formula_weight.map_or(CifValue::Unknown, CifValue::from),
                        ),
                        ("pdbx_number_of_molecules", entity.number_of_molecules.into()),
                        ("details", entity.details.as_deref().into()),
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
    use crate::core::models::entity::Entity;
    use crate::engine::config::DumpConfig;
    use crate::engine::dumpers::test_utils::dump_to_string;

    #[test]
    fn entity_ids_follow_system_order() {
        let mut system = System::new("test");
        let e1 = system.add_entity(Entity::new("ACGT").with_description("foo"));
        let mut second = Entity::new("CC");
        second.formula_weight = Some(42.5);
        let e2 = system.add_entity(second);
        let config = DumpConfig::default();
        let mut ctx = DumpContext::new(&config);
        EntityDumper.finalize(&system, &mut ctx).unwrap();

        assert_eq!(ctx.entity_id(e1).unwrap(), 1);
        assert_eq!(ctx.entity_id(e2).unwrap(), 2);
        let out = dump_to_string(&EntityDumper, &system, &ctx);
        let rows: Vec<&str> = out.lines().skip(9).collect();
        assert_eq!(
            rows,
            vec!["1 polymer man foo ? 1 .", "2 polymer man . 42.500 1 .", "#"]
        );
    }

    #[test]
    fn duplicate_sequence_is_rejected() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACGT").with_description("first"));
        system.add_entity(Entity::new("CC"));
        system.add_entity(Entity::new("ACGT").with_description("second"));
        let config = DumpConfig::default();
        let mut ctx = DumpContext::new(&config);

        match EntityDumper.finalize(&system, &mut ctx) {
            Err(DumpError::DuplicateEntity { sequence }) => assert_eq!(sequence, "ACGT"),
            other => panic!("expected duplicate entity error, got {:?}", other),
        }
    }
}
