//! Structured FASTA headers.
//!
//! A [`HeaderParser`] turns a free-text header into a [`ParsedHeader`] and
//! back. Parsers are looked up by name in a [`ParserRegistry`]; the built-in
//! ones are registered as `"default"`, `"uniprot"` and `"uniprot_like"`.
//!
//! Every parser must reproduce the original header when writing what it
//! parsed: `parser.write(&parser.parse(h)?)? == h` for every accepted `h`.

pub mod default;
pub mod registry;
pub mod uniprot;
pub mod uniprot_like;

pub use default::DefaultParser;
pub use registry::ParserRegistry;
pub use uniprot::UniprotParser;
pub use uniprot_like::UniprotLikeParser;

use crate::error::ProFastaResult;
use vector_map::VecMap;

/// Field name to value, kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct HeaderFields {
    map: VecMap<String, String>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value if `key` was already present; the key keeps
    /// its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.len() == 0
    }
}

/// Equality ignores field order.
impl PartialEq for HeaderFields {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for HeaderFields {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HeaderFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedHeader {
    pub identifier: String,
    /// The header as it was parsed, without the leading `>`.
    pub header: String,
    pub fields: HeaderFields,
}

impl ParsedHeader {
    pub fn new(
        identifier: impl Into<String>,
        header: impl Into<String>,
        fields: HeaderFields,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            header: header.into(),
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }
}

pub trait HeaderParser: Send + Sync {
    fn parse(&self, header: &str) -> ProFastaResult<ParsedHeader>;

    fn write(&self, parsed: &ParsedHeader) -> ProFastaResult<String>;
}
