pub mod canonical;
pub mod record;

pub use canonical::{canonicalize, is_canonical, CanonicalSequence};
pub use record::{AsFastaRecord, FastaRecord};
