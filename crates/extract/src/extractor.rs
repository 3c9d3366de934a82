use crate::format::CompiledFormat;

/// A raw extracted tuple, before filtering and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Raw date token as printed on the statement.
    pub date: String,
    /// Trimmed description, original casing.
    pub description: String,
    /// Raw amount token, still carrying any sign/currency decoration.
    pub amount_token: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

/// Scan statement text line by line, collecting every row that matches the
/// format's full-line pattern, in document order.
pub fn extract_candidates(text: &str, format: &CompiledFormat) -> Vec<RawCandidate> {
    let mut candidates = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(caps) = format.line_regex().captures(line) {
            candidates.push(RawCandidate {
                date: caps["date"].to_string(),
                description: caps["desc"].trim().to_string(),
                amount_token: caps["amount"].to_string(),
                line: idx + 1,
            });
        }
    }
    tracing::debug!(
        bank = format.bank(),
        candidates = candidates.len(),
        "scanned statement text"
    );
    candidates
}
