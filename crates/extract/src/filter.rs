use crate::extractor::RawCandidate;
use crate::format::StatementFormat;

/// True when the description matches a noise phrase or, for spending-only
/// layouts, an internal-movement exclusion. Membership only; nothing is
/// inferred from amounts or dates.
pub fn is_noise(format: &StatementFormat, description: &str) -> bool {
    let desc = description.to_uppercase();
    format
        .noise_phrases
        .iter()
        .chain(format.exclude_phrases.iter())
        .any(|phrase| desc.contains(&phrase.to_uppercase()))
}

/// Drop candidates whose descriptions hit the format's phrase lists.
pub fn drop_noise(format: &StatementFormat, candidates: Vec<RawCandidate>) -> Vec<RawCandidate> {
    let before = candidates.len();
    let kept: Vec<RawCandidate> = candidates
        .into_iter()
        .filter(|c| !is_noise(format, &c.description))
        .collect();
    if kept.len() < before {
        tracing::debug!(
            bank = %format.bank,
            dropped = before - kept.len(),
            "filtered non-transaction rows"
        );
    }
    kept
}
