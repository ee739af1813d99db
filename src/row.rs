//! Line-level parser for the spreadsheet export format.
//!
//! The form export is comma-separated with optional double-quote quoting and
//! no embedded newlines, so a single pass with an in-quotes toggle is enough.
//! This is deliberately permissive: an unbalanced quote never raises an
//! error, it is reported back through [`ParsedRow::unbalanced_quote`] and the
//! caller decides whether to surface it.

/// Fields split out of one line, plus whether the quote state was still open
/// at end of line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub fields: Vec<String>,
    pub unbalanced_quote: bool,
}

/// Splits one line (no trailing newline) into trimmed fields.
///
/// A `"` toggles the quote state and is consumed, never emitted. A `,`
/// outside quotes ends the current field. Everything else is copied through
/// verbatim, including commas inside quotes. The final accumulator is always
/// appended, so a line yields at least one field.
///
/// Known limitation: because every `"` toggles unconditionally, a literal
/// quote character inside a field cannot be represented; mid-field quotes
/// are stripped.
pub fn split_row(line: &str) -> ParsedRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_string());

    ParsedRow {
        fields,
        unbalanced_quote: in_quotes,
    }
}

/// Second-pass field cleanup: removes at most one leading and one trailing
/// `"`, then trims whitespace again.
///
/// [`split_row`] already consumes quote characters, so on most fields this is
/// a no-op; it is kept so that values arriving through other paths (or a
/// future parser change) are still cleaned the same way.
pub fn strip_field(raw: &str) -> String {
    let mut value = raw.trim();
    if let Some(rest) = value.strip_prefix('"') {
        value = rest;
    }
    if let Some(rest) = value.strip_suffix('"') {
        value = rest;
    }
    value.trim().to_string()
}
