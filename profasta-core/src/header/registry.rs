use crate::error::{ProFastaError, ProFastaResult};
use crate::header::{default, uniprot, uniprot_like};
use crate::header::{DefaultParser, HeaderParser, UniprotLikeParser, UniprotParser};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name-keyed header parsers.
///
/// Built once at start-up and handed to whatever needs a lookup. Registering
/// a name that already exists replaces the earlier parser; there is no
/// removal. Concurrent registration needs external locking.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn HeaderParser>>,
}

impl ParserRegistry {
    /// Registry seeded with `"default"`, `"uniprot"` and `"uniprot_like"`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(default::NAME, DefaultParser);
        registry.register(uniprot::NAME, UniprotParser);
        registry.register(uniprot_like::NAME, UniprotLikeParser);
        registry
    }

    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    pub fn register<P>(&mut self, name: impl Into<String>, parser: P)
    where
        P: HeaderParser + 'static,
    {
        self.register_shared(name, Arc::new(parser));
    }

    pub fn register_shared(&mut self, name: impl Into<String>, parser: Arc<dyn HeaderParser>) {
        let name = name.into();
        if self.parsers.insert(name.clone(), parser).is_some() {
            debug!("replaced header parser '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> ProFastaResult<Arc<dyn HeaderParser>> {
        self.parsers
            .get(name)
            .cloned()
            .ok_or_else(|| ProFastaError::UnknownParser {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("names", &self.names())
            .finish()
    }
}
