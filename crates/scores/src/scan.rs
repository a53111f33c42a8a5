use crate::error::{LineError, Result, ScoresError};
use crate::parser::parse_line;
use crate::record::Record;
use crate::selector::TopN;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::Path;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub blank: usize,
    pub offered: usize,
    pub retained: usize,
}

#[derive(Debug)]
pub struct Selection {
    /// Highest scores first.
    pub records: Vec<Record>,
    pub stats: ScanStats,
}

/// Single pass over `reader`, keeping the `limit` highest-scoring records.
///
/// The first line that fails to parse aborts the scan; no partial
/// selection is returned.
pub fn scan<R: BufRead>(mut reader: R, limit: NonZeroUsize) -> Result<Selection> {
    let mut top = TopN::with_limit(limit);
    let mut stats = ScanStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;
        let line_no = stats.lines;

        let text = std::str::from_utf8(&buf).map_err(|_| ScoresError::Line {
            line: line_no,
            source: LineError::InvalidUtf8,
        })?;

        match parse_line(text) {
            Ok(Some(record)) => {
                stats.offered += 1;
                top.offer(record);
            }
            Ok(None) => stats.blank += 1,
            Err(source) => {
                return Err(ScoresError::Line {
                    line: line_no,
                    source,
                })
            }
        }
    }

    let records = top.finalize();
    stats.retained = records.len();
    log::debug!(
        "scanned {} lines ({} blank), offered {} records, kept {}",
        stats.lines,
        stats.blank,
        stats.offered,
        stats.retained
    );
    Ok(Selection { records, stats })
}

/// Open `path` (or stdin for `-`) and [`scan`] it.
pub fn scan_path(path: &Path, limit: NonZeroUsize) -> Result<Selection> {
    if path.as_os_str() == STDIN_PATH {
        log::debug!("reading records from stdin");
        return scan(io::stdin().lock(), limit);
    }

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => ScoresError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => ScoresError::Io(source),
    })?;
    if file.metadata()?.is_dir() {
        return Err(ScoresError::NotFound {
            path: path.to_path_buf(),
            source: io::Error::other("is a directory"),
        });
    }
    log::debug!("reading records from {}", path.display());
    scan(BufReader::new(file), limit)
}
