use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::api::reference::ReferenceType;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct Formatter {
    compact: bool,
}

impl Formatter {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Render a value as JSON, pretty-printed unless compact output was requested
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(rendered)
    }

    /// Table of reference data types for `--list`
    pub fn reference_types_table(&self, kinds: &[ReferenceType]) -> String {
        let mut table = Table::new();

        table.set_header(vec![
            Cell::new("Type").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
        ]);

        for kind in kinds {
            table.add_row(vec![Cell::new(kind.as_str()), Cell::new(kind.description())]);
        }

        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut result = String::new();
        result.push_str(&format!(
            "{} Available reference data types: {}\n\n",
            "📚".cyan(),
            kinds.len().to_string().yellow()
        ));
        result.push_str(&table.to_string());
        result
    }
}
