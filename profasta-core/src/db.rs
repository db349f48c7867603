//! In-memory store of protein entries imported from FASTA files.

use crate::error::{list_skipped, ProFastaError, ProFastaResult};
use crate::header::{HeaderFields, ParsedHeader, ParserRegistry};
use crate::io::fasta::{read_fasta_path, write_fasta};
use crate::io::{OnError, SkippedRecord};
use crate::seq::canonical::CanonicalSequence;
use crate::seq::record::{AsFastaRecord, FastaRecord};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseEntry {
    pub header: ParsedHeader,
    pub sequence: CanonicalSequence,
}

impl DatabaseEntry {
    pub fn new(header: ParsedHeader, sequence: CanonicalSequence) -> Self {
        Self { header, sequence }
    }

    pub fn identifier(&self) -> &str {
        &self.header.identifier
    }

    pub fn fields(&self) -> &HeaderFields {
        &self.header.fields
    }
}

impl AsFastaRecord for DatabaseEntry {
    fn header(&self) -> &str {
        &self.header.header
    }

    fn sequence(&self) -> &str {
        self.sequence.as_str()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AddFastaOptions {
    /// Name the file is recorded under; defaults to the file name of the path.
    pub fasta_name: Option<String>,
    /// Replace entries whose identifier is already present.
    pub overwrite: bool,
    /// `Skip` leaves out records with unparsable headers or invalid sequences.
    pub on_error: OnError,
}

#[derive(Clone, Debug)]
pub struct WriteFastaOptions {
    pub append: bool,
    /// Registry name of the parser used to regenerate headers from the stored
    /// fields. `None` writes the original headers.
    pub header_writer: Option<String>,
    pub line_width: Option<usize>,
}

impl Default for WriteFastaOptions {
    fn default() -> Self {
        Self {
            append: false,
            header_writer: None,
            line_width: Some(60),
        }
    }
}

/// Protein entries keyed by identifier, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ProteinDatabase {
    entries: Vec<DatabaseEntry>,
    index: HashMap<String, usize>,
    imported_files: Vec<String>,
    skipped: HashMap<String, Vec<SkippedRecord>>,
}

impl ProteinDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import every record of a FASTA file, parsing headers with the parser
    /// registered as `parser_name`.
    ///
    /// Nothing is added when the import fails. Returns the number of entries
    /// added.
    pub fn add_fasta(
        &mut self,
        path: impl AsRef<Path>,
        parser_name: &str,
        registry: &ParserRegistry,
        options: &AddFastaOptions,
    ) -> ProFastaResult<usize> {
        let path = path.as_ref();
        let fasta_name = options.fasta_name.clone().unwrap_or_else(|| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        });
        let parser = registry.get(parser_name)?;

        let records = read_fasta_path(path, options.on_error.is_strict())?;
        let total = records.total();
        let mut skipped = records.skipped().to_vec();
        let invalid: HashSet<usize> = skipped.iter().map(|s| s.index).collect();
        let mut block_indices = (0..total).filter(|i| !invalid.contains(i));

        let mut new_entries = Vec::with_capacity(records.len());
        for record in records {
            let index = block_indices.next().unwrap_or(total);
            match parser.parse(record.header()) {
                Ok(parsed) => {
                    let (_, sequence) = record.into_parts();
                    new_entries.push(DatabaseEntry::new(parsed, sequence));
                }
                Err(err) => match options.on_error {
                    OnError::Raise => return Err(err),
                    OnError::Skip => skipped.push(SkippedRecord {
                        index,
                        header: record.header().into(),
                        sequence: record.sequence().as_str().into(),
                        message: err.to_string().into_boxed_str(),
                    }),
                },
            }
        }

        if !options.overwrite {
            let mut seen = HashSet::with_capacity(new_entries.len());
            for entry in &new_entries {
                let id = entry.identifier();
                if self.contains(id) || !seen.insert(id) {
                    return Err(ProFastaError::DuplicateIdentifier {
                        identifier: id.to_string(),
                    });
                }
            }
        }

        if !skipped.is_empty() {
            skipped.sort_by_key(|s| s.index);
            warn!(
                "skipped {}/{} entries while adding '{}':{}",
                skipped.len(),
                total,
                fasta_name,
                list_skipped(&skipped)
            );
        }

        let added = new_entries.len();
        for entry in new_entries {
            self.insert(entry);
        }
        info!("added {added} entries from '{fasta_name}'");
        self.imported_files.push(fasta_name.clone());
        self.skipped.insert(fasta_name, skipped);
        Ok(added)
    }

    pub fn add_entry(&mut self, entry: DatabaseEntry, overwrite: bool) -> ProFastaResult<()> {
        if !overwrite && self.contains(entry.identifier()) {
            return Err(ProFastaError::DuplicateIdentifier {
                identifier: entry.identifier().to_string(),
            });
        }
        self.insert(entry);
        Ok(())
    }

    fn insert(&mut self, entry: DatabaseEntry) {
        match self.index.get(entry.identifier()) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index
                    .insert(entry.identifier().to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Write all entries to `path` in insertion order.
    pub fn write_fasta(
        &self,
        path: impl AsRef<Path>,
        registry: &ParserRegistry,
        options: &WriteFastaOptions,
    ) -> ProFastaResult<()> {
        let records = match &options.header_writer {
            None => None,
            Some(name) => {
                let writer = registry.get(name)?;
                let records = self
                    .entries
                    .iter()
                    .map(|entry| {
                        let header = writer.write(&entry.header)?;
                        Ok(FastaRecord::new(header, entry.sequence.clone()))
                    })
                    .collect::<ProFastaResult<Vec<_>>>()?;
                Some(records)
            }
        };

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(options.append)
            .truncate(!options.append)
            .open(path.as_ref())?;
        let out = BufWriter::new(file);
        match records {
            None => write_fasta(out, &self.entries, options.line_width)?,
            Some(records) => write_fasta(out, &records, options.line_width)?,
        }
        info!(
            "wrote {} entries to {}",
            self.entries.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Option<&DatabaseEntry> {
        self.index.get(identifier).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatabaseEntry> {
        self.entries.iter()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.identifier())
    }

    pub fn imported_files(&self) -> &[String] {
        &self.imported_files
    }

    /// Records left out while importing `fasta_name`.
    pub fn skipped_entries(&self, fasta_name: &str) -> Option<&[SkippedRecord]> {
        self.skipped.get(fasta_name).map(Vec::as_slice)
    }

    pub fn into_entries(self) -> Vec<DatabaseEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ProteinDatabase {
    type Item = &'a DatabaseEntry;
    type IntoIter = std::slice::Iter<'a, DatabaseEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
