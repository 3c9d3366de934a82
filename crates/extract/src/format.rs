use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of the date token opening a transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateShape {
    /// "03/15"
    #[default]
    MonthDay,
    /// "03/15/2024" or "03/15/24"
    MonthDayYear,
}

impl DateShape {
    fn pattern(self) -> &'static str {
        match self {
            DateShape::MonthDay => r"\d{1,2}/\d{1,2}",
            DateShape::MonthDayYear => r"\d{1,2}/\d{1,2}/\d{2,4}",
        }
    }
}

/// Shape of the amount token closing a transaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountStyle {
    /// Bare numeric, thousands commas allowed: "4.75", "1,234.56", "1500.00"
    Plain,
    /// Optional dollar sign: "$1,234.56" or "1234.56"
    #[default]
    CurrencyOptional,
    /// Mandatory dollar sign, optional leading sign: "-$45.00"
    SignedCurrency,
}

impl AmountStyle {
    fn pattern(self) -> &'static str {
        match self {
            AmountStyle::Plain => r"(?:\d{1,3}(?:,\d{3})+|\d+)\.\d{2}",
            AmountStyle::CurrencyOptional => r"\$?[\d,]+\.\d{2}",
            AmountStyle::SignedCurrency => r"[-+]?\$[\d,]+\.\d{2}",
        }
    }
}

/// One bank layout, described as data.
///
/// A format is selected once per document and is read-only afterwards.
/// Near-duplicate layouts for the same bank keep their own entries rather
/// than sharing a merged phrase list; the lists below reproduce what each
/// upstream layout actually ships, drift included (flagged for product
/// review, see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatementFormat {
    pub bank: String,
    pub date_shape: DateShape,
    pub amount_style: AmountStyle,
    /// Rows may start with a 4-digit check/reference number to discard.
    pub leading_reference: bool,
    /// Rows may carry a second (posting) date to discard.
    pub posting_date: bool,
    /// Rows may end with a running-balance token. The first numeric token is
    /// the amount; the balance is never captured.
    pub trailing_balance: bool,
    /// Lines containing any of these are not transactions.
    pub noise_phrases: Vec<String>,
    /// A description containing any of these marks the row as a credit.
    pub credit_keywords: Vec<String>,
    /// Internal movements dropped from spending-only layouts.
    pub exclude_phrases: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid line pattern for bank '{bank}': {source}")]
    Pattern {
        bank: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse formats TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("formats TOML defines no formats")]
    Empty,
}

impl StatementFormat {
    /// Build the anchored line regex for this layout and freeze it.
    ///
    /// Anchoring start-to-end is what keeps headers, totals, and disclosure
    /// boilerplate from producing false records: only a full row matches.
    pub fn compile(self) -> Result<CompiledFormat, FormatError> {
        let date = self.date_shape.pattern();
        let amount = self.amount_style.pattern();

        let mut pattern = String::from(r"^\s*");
        if self.leading_reference {
            pattern.push_str(r"(?:\d{4}\s+)?");
        }
        pattern.push_str(&format!(r"(?P<date>{date})\s+"));
        if self.posting_date {
            pattern.push_str(&format!(r"(?:{date}\s+)?"));
        }
        pattern.push_str(r"(?P<desc>.+?)\s+");
        pattern.push_str(&format!(r"(?P<amount>{amount})"));
        if self.trailing_balance {
            pattern.push_str(&format!(r"(?:\s+{amount})?"));
        }
        pattern.push_str(r"\s*$");

        let regex = Regex::new(&pattern).map_err(|source| FormatError::Pattern {
            bank: self.bank.clone(),
            source,
        })?;
        Ok(CompiledFormat { format: self, regex })
    }
}

/// A format with its line regex compiled once.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    format: StatementFormat,
    regex: Regex,
}

impl CompiledFormat {
    pub fn bank(&self) -> &str {
        &self.format.bank
    }

    pub fn rules(&self) -> &StatementFormat {
        &self.format
    }

    pub(crate) fn line_regex(&self) -> &Regex {
        &self.regex
    }
}

// ── Built-in layouts ──────────────────────────────────────────────────────────

/// Wells Fargo checking: MM/DD rows, optional 4-digit reference and posting
/// date, trailing running balance, withdrawals only.
pub fn wells_fargo() -> StatementFormat {
    StatementFormat {
        bank: "Wells Fargo".to_string(),
        date_shape: DateShape::MonthDay,
        amount_style: AmountStyle::CurrencyOptional,
        leading_reference: true,
        posting_date: true,
        trailing_balance: true,
        noise_phrases: vec!["ONLINE PAYMENT THANK YOU".to_string()],
        credit_keywords: vec![],
        exclude_phrases: vec!["ZELLE FROM".to_string(), "PAYROLL".to_string()],
    }
}

/// TD Bank: MM/DD/YYYY rows with signed dollar amounts.
pub fn td_bank() -> StatementFormat {
    StatementFormat {
        bank: "TD Bank".to_string(),
        date_shape: DateShape::MonthDayYear,
        amount_style: AmountStyle::SignedCurrency,
        leading_reference: false,
        posting_date: false,
        trailing_balance: false,
        noise_phrases: vec![
            "BEGINNING BALANCE".to_string(),
            "ENDING BALANCE".to_string(),
        ],
        credit_keywords: vec![
            "DEPOSIT".to_string(),
            "TRANSFER FROM".to_string(),
            "DIRECT DEPOSIT".to_string(),
        ],
        exclude_phrases: vec![],
    }
}

/// Chase card: MM/DD rows with bare comma-grouped amounts.
pub fn chase() -> StatementFormat {
    StatementFormat {
        bank: "Chase".to_string(),
        date_shape: DateShape::MonthDay,
        amount_style: AmountStyle::Plain,
        leading_reference: false,
        posting_date: false,
        trailing_balance: false,
        noise_phrases: vec![
            "PAYMENT THANK YOU".to_string(),
            "ENDING BALANCE".to_string(),
            "BEGINNING BALANCE".to_string(),
        ],
        credit_keywords: vec![
            "DEPOSIT".to_string(),
            "CREDIT".to_string(),
            "REFUND".to_string(),
            "PAYMENT RECEIVED".to_string(),
        ],
        exclude_phrases: vec![],
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct FormatFile {
    formats: Vec<StatementFormat>,
}

/// All known statement layouts, looked up by bank name.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<CompiledFormat>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        FormatRegistry { formats: Vec::new() }
    }

    /// Registry preloaded with every built-in layout.
    pub fn builtin() -> Self {
        let mut registry = FormatRegistry::empty();
        for format in [wells_fargo(), td_bank(), chase()] {
            registry
                .insert(format)
                .expect("invalid built-in line pattern");
        }
        registry
    }

    /// Register a layout, replacing any existing entry for the same bank.
    pub fn insert(&mut self, format: StatementFormat) -> Result<(), FormatError> {
        let compiled = format.compile()?;
        self.formats
            .retain(|f| !f.bank().eq_ignore_ascii_case(compiled.bank()));
        self.formats.push(compiled);
        Ok(())
    }

    /// Load additional layouts from TOML:
    ///
    /// ```toml
    /// [[formats]]
    /// bank = "Chase"
    /// date_shape = "month_day"
    /// amount_style = "plain"
    /// noise_phrases = ["ENDING BALANCE"]
    /// ```
    ///
    /// Returns the number of layouts loaded.
    pub fn extend_from_toml(&mut self, toml_content: &str) -> Result<usize, FormatError> {
        let file: FormatFile = toml::from_str(toml_content)?;
        if file.formats.is_empty() {
            return Err(FormatError::Empty);
        }
        let count = file.formats.len();
        for format in file.formats {
            self.insert(format)?;
        }
        Ok(count)
    }

    pub fn get(&self, bank: &str) -> Option<&CompiledFormat> {
        self.formats
            .iter()
            .find(|f| f.bank().eq_ignore_ascii_case(bank))
    }

    pub fn banks(&self) -> impl Iterator<Item = &str> {
        self.formats.iter().map(|f| f.bank())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
