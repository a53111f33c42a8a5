//! Streaming top-N selection over `<score>: <JSON object>` lines.
//!
//! [`scan`] reads a line-oriented input once, keeps at most `n` candidates in
//! a [`TopN`] min-heap and returns them highest score first. Memory use is
//! bounded by `n`, not by the size of the input.

mod error;
mod output;
mod parser;
mod record;
mod scan;
mod selector;

pub use error::{ErrorClass, LineError, LineErrorKind, Result, ScoresError};
pub use output::{render, OutputStyle, DEFAULT_INDENT};
pub use parser::{parse_line, SCORE_SEPARATOR};
pub use record::{compare_values, Record};
pub use scan::{scan, scan_path, ScanStats, Selection, STDIN_PATH};
pub use selector::{parse_limit, Offer, TopN};
