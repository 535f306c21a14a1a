use super::Dumper;
use crate::core::io::cif::CifWriter;
use crate::core::models::system::System;
use crate::engine::context::DumpContext;
use crate::engine::error::DumpError;

/// Opens the data block and writes `_entry`.
pub struct EntryDumper;

impl Dumper for EntryDumper {
    fn dump(
        &self,
        system: &System,
        _ctx: &DumpContext<'_>,
        writer: &mut CifWriter<'_>,
    ) -> Result<(), DumpError> {
        writer.write_data_block(&system.name)?;
        writer.write_category("_entry", &[("id", system.name.as_str().into())])?;
        Ok(())
    }
}
