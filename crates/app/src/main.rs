use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use bankscan_core::CategoryTaxonomy;
use bankscan_extract::{identify_bank, process_statement, ExtractError, FormatRegistry};

mod output;

/// Convert extracted bank-statement text into categorized transaction
/// records.
///
/// Inputs are plain-text files produced by a PDF text extractor, one
/// document per file. The issuing bank is identified from the text unless
/// --bank forces a layout.
#[derive(Parser, Debug)]
#[command(name = "bankscan", version, about)]
struct Cli {
    /// Extracted statement text file(s).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Skip bank identification and use this statement layout.
    #[arg(long)]
    bank: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputKind,

    /// Write output to this file instead of stdout (single input only).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// TOML file replacing the built-in category taxonomy.
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// TOML file with additional statement layouts.
    #[arg(long)]
    formats: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    Json,
    Csv,
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        bail!("--output requires a single input file");
    }

    let taxonomy = load_taxonomy(cli.taxonomy.as_deref())?;
    let registry = load_registry(cli.formats.as_deref())?;

    // Each document is processed on its own; one bad statement never takes
    // down the rest of the batch.
    let mut failures = 0usize;
    for input in &cli.inputs {
        if let Err(err) = run_one(input, &cli, &registry, &taxonomy) {
            failures += 1;
            eprintln!("{}: {err:#}", input.display());
        }
    }
    if failures > 0 {
        bail!("{failures} of {} statement(s) failed", cli.inputs.len());
    }
    Ok(())
}

fn load_taxonomy(path: Option<&Path>) -> Result<CategoryTaxonomy> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading taxonomy {}", path.display()))?;
            CategoryTaxonomy::from_toml(&text)
                .with_context(|| format!("parsing taxonomy {}", path.display()))
        }
        None => Ok(CategoryTaxonomy::builtin()),
    }
}

fn load_registry(path: Option<&Path>) -> Result<FormatRegistry> {
    let mut registry = FormatRegistry::builtin();
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading formats {}", path.display()))?;
        let loaded = registry
            .extend_from_toml(&text)
            .with_context(|| format!("parsing formats {}", path.display()))?;
        tracing::debug!(loaded, "registered extra statement layouts");
    }
    Ok(registry)
}

fn run_one(
    input: &Path,
    cli: &Cli,
    registry: &FormatRegistry,
    taxonomy: &CategoryTaxonomy,
) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;

    let bank = match &cli.bank {
        Some(bank) => bank.clone(),
        None => identify_bank(&text).unwrap_or("Unknown").to_string(),
    };
    tracing::debug!(input = %input.display(), %bank, "processing statement");

    let format = registry
        .get(&bank)
        .ok_or(ExtractError::UnknownFormat { bank: bank.clone() })
        .with_context(|| {
            format!(
                "known banks: {}",
                registry.banks().collect::<Vec<_>>().join(", ")
            )
        })?;

    let source_id = input.display().to_string();
    let report = process_statement(&source_id, &text, format, taxonomy)?;
    if report.is_empty() {
        eprintln!("warning: no transactions found in {}", input.display());
    }

    let rendered = match cli.format {
        OutputKind::Json => report.to_json().context("serializing report")?,
        OutputKind::Csv => output::to_csv(&report)?,
        OutputKind::Text => output::to_text(&report),
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unknown_bank_fails_before_extraction() {
        let registry = FormatRegistry::builtin();
        assert!(registry.get("Unknown").is_none());
    }
}
