use crate::error::LineError;
use crate::record::Record;
use serde_json::Value;

/// Separates the score prefix from the JSON body. Only the first occurrence
/// counts; the body may contain it again inside string values.
pub const SCORE_SEPARATOR: &str = ": ";

/// Parse one raw input line.
///
/// Returns `Ok(None)` for blank lines. Any other line must look like
/// `<integer>: <JSON object>` where the object has an `id` key; the `id`
/// value is kept as-is and every other field is dropped.
pub fn parse_line(line: &str) -> Result<Option<Record>, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (prefix, body) = line
        .split_once(SCORE_SEPARATOR)
        .ok_or(LineError::MissingSeparator)?;

    let score = parse_score(prefix)?;

    let value: Value = serde_json::from_str(body).map_err(LineError::MalformedJson)?;
    let Value::Object(mut fields) = value else {
        return Err(LineError::NotAnObject);
    };
    let id = fields.remove("id").ok_or(LineError::MissingId)?;

    Ok(Some(Record { score, id }))
}

fn parse_score(prefix: &str) -> Result<i64, LineError> {
    let trimmed = prefix.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| LineError::MalformedScore(trimmed.to_string()))
}
