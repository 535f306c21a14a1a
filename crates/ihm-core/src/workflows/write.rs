use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::engine::config::DumpConfig;
use crate::engine::context::DumpContext;
use crate::engine::dumpers::default_dumpers;
use crate::engine::error::DumpError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

/// Writes every system in `systems` to `out` as mmCIF, one data block each.
///
/// For each system all dumpers are finalized before any of them writes, so validation
/// failures (duplicate entities, unknown residue codes, unresolvable paths) are raised
/// before that system's data block begins. Blocks already written for earlier systems
/// stay in the sink.
///
/// # Errors
///
/// Returns the first [`DumpError`] raised while finalizing or dumping, or an I/O error
/// from the sink.
#[instrument(skip_all, name = "mmcif_export", fields(systems = systems.len()))]
pub fn write(
    out: &mut dyn Write,
    systems: &[System],
    config: &DumpConfig,
) -> Result<(), DumpError> {
    let dumpers = default_dumpers();
    let mut writer = CifWriter::new(out).with_line_width(config.line_width);

    for system in systems {
        info!(system = %system.name, "Exporting system.");
        let mut ctx = DumpContext::new(config);
        for dumper in &dumpers {
            dumper.finalize(system, &mut ctx)?;
        }
        for dumper in &dumpers {
            dumper.dump(system, &ctx, &mut writer)?;
        }
    }

    writer.flush()?;
    info!("mmCIF export complete.");
    Ok(())
}

/// Writes `systems` to a newly created file at `path`.
pub fn write_to_path<P: AsRef<Path>>(
    path: P,
    systems: &[System],
    config: &DumpConfig,
) -> Result<(), DumpError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write(&mut out, systems, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::cif::CifError;
    use crate::core::models::asym::AsymUnit;
    use crate::core::models::entity::Entity;
    use crate::core::models::software::Software;
    use std::fs;
    use tempfile::tempdir;

    fn export(systems: &[System]) -> (Result<(), DumpError>, String) {
        let mut out = Vec::new();
        let result = write(&mut out, systems, &DumpConfig::default());
        (result, String::from_utf8(out).unwrap())
    }

    fn loop_rows<'o>(out: &'o str, last_column: &str) -> Vec<&'o str> {
        out.lines()
            .skip_while(|line| *line != last_column)
            .skip(1)
            .take_while(|line| *line != "#")
            .collect()
    }

    #[test]
    fn single_entity_without_chains() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACDEFG"));
        let (result, out) = export(&[system]);
        result.unwrap();

        assert_eq!(
            loop_rows(&out, "_entity.details"),
            vec!["1 polymer man . ? 1 ."]
        );
        assert_eq!(
            loop_rows(&out, "_entity_poly_seq.hetero"),
            vec![
                "1 1 ALA .",
                "1 2 CYS .",
                "1 3 ASP .",
                "1 4 GLU .",
                "1 5 PHE .",
                "1 6 GLY .",
            ]
        );
        assert!(!out.contains("_struct_asym"));
    }

    #[test]
    fn two_chains_share_a_synthesized_self_parented_assembly() {
        let mut system = System::new("test");
        let entity = system.add_entity(Entity::new("ACG").with_description("foo"));
        system.add_asym_unit(AsymUnit::new(entity)).unwrap();
        system.add_asym_unit(AsymUnit::new(entity)).unwrap();
        let (result, out) = export(&[system]);
        result.unwrap();

        assert_eq!(
            loop_rows(&out, "_ihm_struct_assembly_details.assembly_description"),
            vec!["1 'Complete assembly' 'All known components'"]
        );
        assert_eq!(
            loop_rows(&out, "_ihm_struct_assembly.seq_id_end"),
            vec!["1 1 1 foo 1 A 1 3", "2 1 1 foo 1 B 1 3"]
        );
        assert_eq!(loop_rows(&out, "_struct_asym.details"), vec!["A 1 .", "B 1 ."]);
    }

    #[test]
    fn categories_are_written_in_dumper_order() {
        let mut system = System::new("test");
        system.software.push(Software::new(
            "IMP",
            "model building",
            "Modeling",
            "https://integrativemodeling.org",
        ));
        let entity = system.add_entity(Entity::new("AC"));
        system.add_asym_unit(AsymUnit::new(entity)).unwrap();
        let (result, out) = export(&[system]);
        result.unwrap();

        let order = [
            "data_test",
            "_entry.id",
            "_software.pdbx_ordinal",
            "_chem_comp.id",
            "_entity.id",
            "_entity_poly.entity_id",
            "_entity_poly_seq.entity_id",
            "_struct_asym.id",
            "_ihm_struct_assembly_details.assembly_id",
            "_ihm_struct_assembly.ordinal_id",
        ];
        let positions: Vec<usize> = order.iter().map(|tag| out.find(tag).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn duplicate_entity_aborts_before_any_output() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACG"));
        system.add_entity(Entity::new("ACG"));
        let (result, out) = export(&[system]);

        assert!(matches!(result, Err(DumpError::DuplicateEntity { .. })));
        assert_eq!(out, "");
    }

    #[test]
    fn unknown_residue_code_produces_no_residue_rows() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACXG"));
        let (result, out) = export(&[system]);

        assert!(matches!(
            result,
            Err(DumpError::UnknownResidueCode { code: 'X', .. })
        ));
        assert!(!out.contains("_chem_comp"));
        assert!(!out.contains("_entity_poly_seq"));
    }

    #[test]
    fn description_with_semicolon_line_is_rejected() {
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACG").with_description("first\n;second"));
        let (result, out) = export(&[system]);

        assert!(matches!(
            result,
            Err(DumpError::Cif(CifError::SemicolonLine { ref category, ref column }))
                if category == "_entity" && column == "pdbx_description"
        ));
        assert!(!out.contains(";second"));
    }

    #[test]
    fn numbering_restarts_for_each_system() {
        let mut first = System::new("system1");
        first.add_entity(Entity::new("AAA"));
        let mut second = System::new("system 2+3");
        second.add_entity(Entity::new("CCC"));
        second.add_entity(Entity::new("AAA"));
        let (result, out) = export(&[first, second]);
        result.unwrap();

        let blocks: Vec<&str> = out.split("data_").skip(1).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("system1\n_entry.id system1\n"));
        assert!(blocks[1].starts_with("system23\n_entry.id 'system 2+3'\n"));
        assert_eq!(
            loop_rows(blocks[1], "_entity_poly_seq.hetero")[..2],
            ["1 1 CYS .", "1 2 CYS ."]
        );
        assert_eq!(
            loop_rows(blocks[1], "_chem_comp.type"),
            vec!["CYS 'L-peptide linking'", "ALA 'L-peptide linking'"]
        );
    }

    #[test]
    fn empty_system_writes_header_and_complete_assembly() {
        let (result, out) = export(&[System::new("system1")]);
        result.unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[..2], ["data_system1", "_entry.id system1"]);
        assert_eq!(lines[7], "1 'Complete assembly' 'All known components'");
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn write_to_path_creates_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.cif");
        let mut system = System::new("test");
        system.add_entity(Entity::new("ACDEFG"));

        write_to_path(&path, &[system], &DumpConfig::default()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("data_test\n_entry.id test\n"));
        assert!(contents.contains("1 6 GLY .\n"));
    }
}
