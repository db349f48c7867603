pub mod fasta;

pub use fasta::{
    format_record, parse_records, read_fasta_path, write_fasta, write_records, FastaRecords,
    FastaSource,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    #[default]
    Raise,
    Skip,
}

impl OnError {
    pub fn is_strict(self) -> bool {
        self == OnError::Raise
    }
}

/// A record left out of a best-effort read, with what was wrong with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub header: Box<str>,
    pub sequence: Box<str>,
    pub message: Box<str>,
}
