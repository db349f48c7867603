use crate::io::SkippedRecord;
use std::fmt::Write as _;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProFastaError {
    #[error("Input cannot be parsed into a canonical sequence: {input}\nTried until: {partial}")]
    InvalidSequence { input: String, partial: String },

    #[error(
        "{} of {total} records have invalid sequences:{}",
        .skipped.len(),
        list_skipped(.skipped)
    )]
    InvalidRecords {
        skipped: Vec<SkippedRecord>,
        total: usize,
    },

    #[error("header does not match the '{parser}' header format: {header}")]
    HeaderFormat { parser: String, header: String },

    #[error("header field '{field}' is required to write the header of '{identifier}'")]
    MissingHeaderField { field: String, identifier: String },

    #[error("no header parser registered under the name '{name}'")]
    UnknownParser { name: String },

    #[error("identifier '{identifier}' already in database")]
    DuplicateIdentifier { identifier: String },

    #[error("fasta io error: {0}")]
    Io(#[from] io::Error),
}

pub type ProFastaResult<T> = Result<T, ProFastaError>;

impl ProFastaError {
    pub(crate) fn header_format(parser: &str, header: &str) -> Self {
        ProFastaError::HeaderFormat {
            parser: parser.to_string(),
            header: header.to_string(),
        }
    }
}

/// One `header` / `sequence` pair per line, used by the aggregate error and
/// the non-strict diagnostic alike.
pub(crate) fn list_skipped(skipped: &[SkippedRecord]) -> String {
    let mut out = String::new();
    for record in skipped {
        let _ = write!(
            out,
            "\n  header: '{}' sequence: '{}'",
            record.header, record.sequence
        );
    }
    out
}
