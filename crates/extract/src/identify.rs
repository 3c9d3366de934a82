use regex::Regex;
use std::sync::OnceLock;

/// Identification patterns, checked in registration order against lowercased
/// first-pages text.
const BANK_PATTERNS: &[(&str, &[&str])] = &[
    (
        "Wells Fargo",
        &[r"wells\s+fargo", r"wf\.com", r"wellsfargo\.com"],
    ),
    (
        "TD Bank",
        &[r"td\s+bank", r"tdbank\.com", r"td\s+online\s+banking"],
    ),
    (
        "Chase",
        &[r"chase\s+bank", r"jpmorgan\s+chase", r"chase\.com"],
    ),
];

fn compiled_patterns() -> &'static Vec<(&'static str, Vec<Regex>)> {
    static COMPILED: OnceLock<Vec<(&'static str, Vec<Regex>)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        BANK_PATTERNS
            .iter()
            .map(|(bank, patterns)| {
                let regexes = patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("invalid bank pattern"))
                    .collect();
                (*bank, regexes)
            })
            .collect()
    })
}

/// Identify the issuing bank from extracted statement text (the first pages
/// are enough). Returns `None` when no pattern matches.
pub fn identify_bank(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    compiled_patterns()
        .iter()
        .find(|(_, regexes)| regexes.iter().any(|re| re.is_match(&lower)))
        .map(|(bank, _)| *bank)
}
