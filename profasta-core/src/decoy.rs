use crate::db::{DatabaseEntry, ProteinDatabase};
use crate::error::ProFastaResult;
use crate::seq::canonical::CanonicalSequence;

#[derive(Clone, Debug)]
pub struct DecoyOptions {
    /// Keep the N-terminal residue in place.
    pub keep_nterm: bool,
    /// Keep the N-terminal residue in place if it is a methionine.
    pub keep_nterm_methionine: bool,
    /// Prepended to identifier and header of every decoy entry.
    pub prefix: Option<String>,
}

impl Default for DecoyOptions {
    fn default() -> Self {
        Self {
            keep_nterm: false,
            keep_nterm_methionine: true,
            prefix: None,
        }
    }
}

/// Reverse a sequence, optionally leaving the N-terminal residue in place.
/// `keep_nterm` wins over `keep_nterm_methionine`.
pub fn reverse_sequence(sequence: &str, keep_nterm: bool, keep_nterm_methionine: bool) -> String {
    let mut residues = sequence.chars();
    let Some(first) = residues.next() else {
        return String::new();
    };
    if keep_nterm || (keep_nterm_methionine && first == 'M') {
        std::iter::once(first).chain(residues.rev()).collect()
    } else {
        sequence.chars().rev().collect()
    }
}

fn reverse_canonical(sequence: &CanonicalSequence, options: &DecoyOptions) -> CanonicalSequence {
    let reversed = reverse_sequence(
        sequence.as_str(),
        options.keep_nterm,
        options.keep_nterm_methionine,
    );
    CanonicalSequence::from_canonical_unchecked(reversed)
}

/// Build a decoy database holding every entry of `db` with its sequence
/// reversed.
pub fn create_decoy_db(
    db: &ProteinDatabase,
    options: &DecoyOptions,
) -> ProFastaResult<ProteinDatabase> {
    let mut decoy_db = ProteinDatabase::new();
    for entry in db {
        let mut header = entry.header.clone();
        if let Some(prefix) = &options.prefix {
            header.identifier = format!("{prefix}{}", header.identifier);
            header.header = format!("{prefix}{}", header.header);
        }
        let sequence = reverse_canonical(&entry.sequence, options);
        decoy_db.add_entry(DatabaseEntry::new(header, sequence), false)?;
    }
    Ok(decoy_db)
}
