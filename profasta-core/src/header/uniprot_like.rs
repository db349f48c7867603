use crate::error::{ProFastaError, ProFastaResult};
use crate::header::uniprot::{required, DB, ENTRY_NAME, IDENTIFIER, PROTEIN_NAME, TAGS};
use crate::header::{HeaderFields, HeaderParser, ParsedHeader};

pub const NAME: &str = "uniprot_like";

/// Tolerant parser for headers that only loosely follow the UniProt layout.
///
/// Only the `db|identifier|entry_name` prefix is required. The description
/// is searched for the first `TAG=` of each UniProt tag; text before the
/// first tag is the protein name and every tag value runs up to the next
/// located tag. Tags are written back in the order they were found.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniprotLikeParser;

impl HeaderParser for UniprotLikeParser {
    fn parse(&self, header: &str) -> ProFastaResult<ParsedHeader> {
        let trimmed = header.trim_start();
        let (prefix, description) = match trimmed.find(char::is_whitespace) {
            Some(idx) => (&trimmed[..idx], trimmed[idx..].trim_start()),
            None => (trimmed, ""),
        };

        let parts: Vec<&str> = prefix.split('|').collect();
        let [db, identifier, entry_name] = parts[..] else {
            return Err(ProFastaError::header_format(NAME, header));
        };
        if identifier.is_empty() {
            return Err(ProFastaError::header_format(NAME, header));
        }

        let mut fields = HeaderFields::new();
        fields.insert(DB, db);
        fields.insert(IDENTIFIER, identifier);
        fields.insert(ENTRY_NAME, entry_name);

        if description.is_empty() {
            return Ok(ParsedHeader::new(identifier, header, fields));
        }

        let mut starts: Vec<(usize, &str)> = TAGS
            .iter()
            .filter_map(|&(tag, field)| {
                description
                    .find(&format!("{tag}="))
                    .map(|pos| (pos, field))
            })
            .collect();
        starts.sort_unstable();

        match starts.first() {
            None => {
                fields.insert(PROTEIN_NAME, description);
            }
            Some(&(0, _)) => {}
            Some(&(first, _)) => {
                fields.insert(PROTEIN_NAME, description[..first].trim_end());
            }
        }

        for (i, &(start, field)) in starts.iter().enumerate() {
            let end = starts
                .get(i + 1)
                .map_or(description.len(), |&(next, _)| next);
            let span = description[start..end].trim_end();
            let value = span.split_once('=').map_or("", |(_, value)| value);
            fields.insert(field, value);
        }

        Ok(ParsedHeader::new(identifier, header, fields))
    }

    fn write(&self, parsed: &ParsedHeader) -> ProFastaResult<String> {
        let mut out = format!(
            "{}|{}|{}",
            required(parsed, DB)?,
            required(parsed, IDENTIFIER)?,
            required(parsed, ENTRY_NAME)?,
        );
        if let Some(name) = parsed.field(PROTEIN_NAME) {
            out.push(' ');
            out.push_str(name);
        }
        for (key, value) in parsed.fields.iter() {
            if let Some((tag, _)) = TAGS.iter().find(|(_, field)| *field == key) {
                out.push(' ');
                out.push_str(tag);
                out.push('=');
                out.push_str(value);
            }
        }
        Ok(out)
    }
}
