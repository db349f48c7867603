//! Protein FASTA handling: sequence canonicalization, record reading and
//! writing, structured header parsing, and a small entry store on top.

pub mod alphabets;
pub mod db;
pub mod decoy;
pub mod error;
pub mod header;
pub mod io;
pub mod seq;

pub use db::{AddFastaOptions, DatabaseEntry, ProteinDatabase, WriteFastaOptions};
pub use error::{ProFastaError, ProFastaResult};
pub use header::{HeaderFields, HeaderParser, ParsedHeader, ParserRegistry};
pub use seq::{canonicalize, is_canonical, CanonicalSequence, FastaRecord};
