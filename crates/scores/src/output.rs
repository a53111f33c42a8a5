use crate::error::{Result, ScoresError};
use crate::record::Record;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;

pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Pretty { indent: usize },
    Compact,
}

impl Default for OutputStyle {
    fn default() -> Self {
        OutputStyle::Pretty {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Render the selected records as a JSON array of `{"score", "id"}` objects.
pub fn render(records: &[Record], style: OutputStyle) -> Result<String> {
    match style {
        OutputStyle::Compact => Ok(serde_json::to_string(records)?),
        OutputStyle::Pretty { indent } => {
            let indent = " ".repeat(indent);
            let mut out = Vec::new();
            let mut ser =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
            records.serialize(&mut ser)?;
            String::from_utf8(out)
                .map_err(|err| ScoresError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
        }
    }
}
