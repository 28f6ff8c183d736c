use crate::error::{ParseError, ParseErrorKind};
use crate::types::Document;

/// Parse a YAML string into a [`Document`].
///
/// Performs YAML deserialization only; no rule is checked here. Blank input
/// and falsy roots (`null`, `{}`, `[]`, ...) fail with [`ParseErrorKind::Empty`].
pub fn parse(input: &str) -> Result<Document, ParseError> {
    if is_blank_document(input) {
        return Err(ParseError {
            kind: ParseErrorKind::Empty,
            message: "Configuration file is empty".to_string(),
            line: None,
            column: None,
        });
    }

    check_multi_document(input)?;

    // serde-saphyr into serde_json::Value, then into the typed tree
    let value: serde_json::Value = serde_saphyr::from_str(input).map_err(|e| ParseError {
        kind: ParseErrorKind::Syntax,
        message: e.to_string(),
        line: None,
        column: None,
    })?;

    Document::try_from(value)
}

/// Only whitespace, comments, and document markers.
fn is_blank_document(input: &str) -> bool {
    input.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "..."
    })
}

/// Check for multiple YAML documents (--- separator).
/// Only matches `---` at column 0 to avoid false positives inside block scalars.
/// A single leading marker before any content is allowed.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut markers = 0;
    let mut seen_content = false;
    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if line.starts_with("---") && line[3..].trim().is_empty() {
            if seen_content || markers > 0 {
                return Err(ParseError {
                    kind: ParseErrorKind::Syntax,
                    message: "expected a single document in the stream".to_string(),
                    line: Some(line_num + 1),
                    column: Some(1),
                });
            }
            markers += 1;
        } else if !trimmed.is_empty() && !trimmed.starts_with('#') {
            seen_content = true;
        }
    }
    Ok(())
}
