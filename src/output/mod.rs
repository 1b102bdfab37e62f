pub mod formatter;

pub use formatter::Formatter;

use serde::Serialize;
use std::io::Write;

use crate::api::reference::ReferenceType;
use crate::error::Result;

/// Write a value as one JSON document followed by a newline
pub fn write_json<T: Serialize>(out: &mut dyn Write, value: &T, compact: bool) -> Result<()> {
    let rendered = Formatter::new(compact).to_json(value)?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}

/// Write the table of available reference data types
pub fn write_reference_types(out: &mut dyn Write) -> Result<()> {
    let rendered = Formatter::default().reference_types_table(&ReferenceType::ALL);
    writeln!(out, "{}", rendered)?;
    Ok(())
}
