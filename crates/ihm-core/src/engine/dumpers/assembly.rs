use super::Dumper;
use crate::core::io::cif::{CifValue, CifWriter};
use crate::core::models::assembly::{Assembly, AssemblyComponent, ComponentRef};
use crate::core::models::ids::AssemblyId;
use crate::core::models::system::System;
use crate::engine::context::{AssemblyRecord, CanonicalComponent, DumpContext};
use crate::engine::error::DumpError;
use std::collections::HashSet;
use tracing::debug;

pub const COMPLETE_ASSEMBLY_NAME: &str = "Complete assembly";
pub const COMPLETE_ASSEMBLY_DESCRIPTION: &str = "All known components";

/// Builds the assembly of everything in `system`.
///
/// Every asym unit is a component, followed by every entity that has no asym unit at
/// all. Used when the caller declares no assemblies of their own.
pub fn complete_assembly(system: &System) -> Assembly {
    let mut components = Vec::new();
    let mut modeled = HashSet::new();
    for (id, asym) in system.asym_units() {
        components.push(AssemblyComponent::asym(id));
        modeled.insert(asym.entity);
    }
    for (id, _) in system.entities() {
        if !modeled.contains(&id) {
            components.push(AssemblyComponent::entity(id));
        }
    }
    Assembly::new(components)
        .with_name(COMPLETE_ASSEMBLY_NAME)
        .with_description(COMPLETE_ASSEMBLY_DESCRIPTION)
}

/// Deduplicates assemblies and writes `_ihm_struct_assembly_details` and
/// `_ihm_struct_assembly`.
pub struct AssemblyDumper;

fn resolve_component(
    system: &System,
    component: &AssemblyComponent,
) -> Result<CanonicalComponent, DumpError> {
    let (entity, asym) = match component.component {
        ComponentRef::Entity(entity) => (entity, None),
        ComponentRef::Asym(asym) => {
            let unit = system
                .asym_unit(asym)
                .ok_or(DumpError::DanglingReference { kind: "asym unit" })?;
            (unit.entity, Some(asym))
        }
    };
    let full_range = system
        .entity(entity)
        .ok_or(DumpError::DanglingReference { kind: "entity" })?
        .seq_id_range();
    Ok(CanonicalComponent {
        entity,
        asym,
        seq_id_range: component.seq_id_range.unwrap_or(full_range),
    })
}

/// Resolves the components of `assembly` and sorts them by (entity ID, asym ordinal).
///
/// Entity-only components sort ahead of the chains of the same entity. The sort is
/// stable, so components with equal keys keep their declared order.
fn canonical_components(
    system: &System,
    ctx: &DumpContext<'_>,
    assembly: &Assembly,
) -> Result<Vec<CanonicalComponent>, DumpError> {
    let mut keyed = assembly
        .components
        .iter()
        .map(|component| -> Result<_, DumpError> {
            let resolved = resolve_component(system, component)?;
            let asym_ordinal = match resolved.asym {
                Some(asym) => ctx.asym_label(asym)?.ordinal,
                None => 0,
            };
            Ok(((ctx.entity_id(resolved.entity)?, asym_ordinal), resolved))
        })
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(key, _)| *key);
    Ok(keyed.into_iter().map(|(_, component)| component).collect())
}

impl Dumper for AssemblyDumper {
    fn finalize<'a>(
        &self,
        system: &'a System,
        ctx: &mut DumpContext<'a>,
    ) -> Result<(), DumpError> {
        let synthesized;
        let assemblies: Vec<(Option<AssemblyId>, &Assembly)> = if system.assembly_count() == 0 {
            synthesized = complete_assembly(system);
            debug!(
                components = synthesized.components.len(),
                "No assemblies declared; using the complete assembly."
            );
            vec![(None, &synthesized)]
        } else {
            system.assemblies().map(|(id, a)| (Some(id), a)).collect()
        };

        for (source, assembly) in assemblies {
            let components = canonical_components(system, ctx, assembly)?;
            let record = AssemblyRecord {
                name: assembly.name.clone(),
                description: assembly.description.clone(),
                parent: assembly.parent,
                components: components.clone(),
            };
            let id = ctx.assemblies.distinct.assign_with(components, record);
            if let Some(source) = source {
                ctx.assemblies.by_source.insert(source, id);
            }
            ctx.assemblies.assigned.push(id);
        }
        debug!(
            assemblies = ctx.assemblies.assigned.len(),
            distinct = ctx.assemblies.distinct.len(),
            "Assigned assembly IDs."
        );
        Ok(())
    }

    fn dump(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        self.dump_details(ctx, writer)?;
        self.dump_components(system, ctx, writer)
    }
}

impl AssemblyDumper {
    fn dump_details(
        &self,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop(
            "_ihm_struct_assembly_details",
            &["assembly_id", "assembly_name", "assembly_description"],
            |lp| {
                for (id, record) in ctx.assemblies.distinct.iter() {
                    lp.row(&[
                        ("assembly_id", id.into()),
                        ("assembly_name", record.name.as_deref().into()),
                        ("assembly_description", record.description.as_deref().into()),
                    ])?;
                }
                Ok::<_, DumpError>(())
            },
        )?;
        Ok(())
    }

    fn dump_components(
        &self,
        system: &System,
        ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        let mut ordinal: usize = 0;
        writer.write_loop(
            "_ihm_struct_assembly",
            &[
                "ordinal_id",
                "assembly_id",
                "parent_assembly_id",
                "entity_description",
                "entity_id",
                "asym_id",
                "seq_id_begin",
                "seq_id_end",
            ],
            |lp| {
                for (id, record) in ctx.assemblies.distinct.iter() {
                    // A root assembly is its own parent.
                    let parent_id = match record.parent {
                        Some(parent) => ctx.assembly_id(parent)?,
                        None => id,
                    };
                    for component in &record.components {
                        ordinal += 1;
                        let entity = system
                            .entity(component.entity)
                            .ok_or(DumpError::DanglingReference { kind: "entity" })?;
                        let asym_id = match component.asym {
                            Some(asym) => CifValue::from(&ctx.asym_label(asym)?.id),
                            None => CifValue::Omitted,
                        };
                        let (seq_id_begin, seq_id_end) = component.seq_id_range;
                        lp.row(&[
                            ("ordinal_id", ordinal.into()),
                            ("assembly_id", id.into()),
                            ("parent_assembly_id", parent_id.into()),
                            ("entity_description", entity.description.as_deref().into()),
                            ("entity_id", ctx.entity_id(component.entity)?.into()),
                            ("asym_id", asym_id),
                            ("seq_id_begin", seq_id_begin.into()),
                            ("seq_id_end", seq_id_end.into()),
                        ])?;
                    }
                }
                Ok::<_, DumpError>(())
            },
        )?;
        Ok(())
    }
}
