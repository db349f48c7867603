use crate::seq::canonical::CanonicalSequence;

/// Anything that can be written as one FASTA record.
pub trait AsFastaRecord {
    fn header(&self) -> &str;
    fn sequence(&self) -> &str;
}

/// A header line (without the leading `>`) and its canonical sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FastaRecord {
    header: Box<str>,
    sequence: CanonicalSequence,
}

impl FastaRecord {
    pub fn new(header: impl Into<Box<str>>, sequence: CanonicalSequence) -> Self {
        Self {
            header: header.into(),
            sequence,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn sequence(&self) -> &CanonicalSequence {
        &self.sequence
    }

    pub fn into_parts(self) -> (Box<str>, CanonicalSequence) {
        (self.header, self.sequence)
    }
}

impl AsFastaRecord for FastaRecord {
    fn header(&self) -> &str {
        &self.header
    }

    fn sequence(&self) -> &str {
        self.sequence.as_str()
    }
}

impl<T: AsFastaRecord + ?Sized> AsFastaRecord for &T {
    fn header(&self) -> &str {
        (**self).header()
    }

    fn sequence(&self) -> &str {
        (**self).sequence()
    }
}
