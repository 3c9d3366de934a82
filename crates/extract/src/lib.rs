pub mod classify;
pub mod extractor;
pub mod filter;
pub mod format;
pub mod identify;
pub mod pipeline;

pub use extractor::{extract_candidates, RawCandidate};
pub use format::{
    chase, td_bank, wells_fargo, AmountStyle, CompiledFormat, DateShape, FormatError,
    FormatRegistry, StatementFormat,
};
pub use identify::identify_bank;
pub use pipeline::{process_statement, ExtractError};
