use super::Dumper;
use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;

pub struct SoftwareDumper;

impl Dumper for SoftwareDumper {
    fn dump(
        &self,
        system: &System,
        _ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_loop(
            "_software",
            &[
                "pdbx_ordinal",
                "name",
                "classification",
                "description",
                "version",
                "type",
                "location",
            ],
            |lp| {
                for (ordinal, software) in system.software.iter().enumerate() {
                    lp.row(&[
                        ("pdbx_ordinal", (ordinal + 1).into()),
                        ("name", software.name.as_str().into()),
                        ("classification", software.classification.as_str().into()),
                        ("description", software.description.as_str().into()),
                        ("version", software.version.as_deref().into()),
                        ("type", software.software_type.as_str().into()),
                        ("location", software.location.as_str().into()),
                    ])?;
                }
                Ok::<_, DumpError>(())
            },
        )?;
        Ok(())
    }
}
