use crate::error::{ProFastaError, ProFastaResult};
use crate::header::{HeaderFields, HeaderParser, ParsedHeader};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME: &str = "uniprot";

pub const DB: &str = "db";
pub const IDENTIFIER: &str = "identifier";
pub const ENTRY_NAME: &str = "entry_name";
pub const PROTEIN_NAME: &str = "protein_name";

/// Two-letter UniProt tags and their field names, in the order a UniProt
/// header lists them.
pub const TAGS: [(&str, &str); 5] = [
    ("OS", "organism_name"),
    ("OX", "organism_identifier"),
    ("GN", "gene_name"),
    ("PE", "protein_existence"),
    ("SV", "sequence_version"),
];

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<db>\w+)\|(?P<id>[-\w]+)\|(?P<entry>\w+)\s+(?P<name>.*?)",
        r"(?:(?:\s+OS=(?P<OS>[^=]+))|",
        r"(?:\s+OX=(?P<OX>\d+))|",
        r"(?:\s+GN=(?P<GN>\S+))|",
        r"(?:\s+PE=(?P<PE>\d))|",
        r"(?:\s+SV=(?P<SV>\d+)))*\s*$",
    ))
    .expect("UniProt header pattern is valid")
});

static TAG_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(OS|OX|GN|PE|SV)=").expect("tag pattern is valid"));

/// Parser for headers following the UniProt convention
/// `db|identifier|entry_name protein_name OS=.. OX=.. GN=.. PE=.. SV=..`.
///
/// Tags are optional and each may appear once. Writing always lists the tags
/// in the UniProt order, so a header with reordered tags does not survive a
/// parse/write round trip unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniprotParser;

impl HeaderParser for UniprotParser {
    fn parse(&self, header: &str) -> ProFastaResult<ParsedHeader> {
        let caps = HEADER_PATTERN
            .captures(header)
            .ok_or_else(|| ProFastaError::header_format(NAME, header))?;

        // `[^=]` and `\S` keep tag values free of other tag starts, so every
        // match after the protein name is one tag.
        let name_end = caps.name("name").map_or(0, |m| m.end());
        let mut seen = [0usize; TAGS.len()];
        for tag in TAG_START.captures_iter(&header[name_end..]) {
            if let Some(idx) = TAGS.iter().position(|(t, _)| *t == &tag[1]) {
                seen[idx] += 1;
            }
        }
        if seen.iter().any(|&count| count > 1) {
            return Err(ProFastaError::header_format(NAME, header));
        }

        let mut fields = HeaderFields::new();
        fields.insert(DB, &caps["db"]);
        fields.insert(IDENTIFIER, &caps["id"]);
        fields.insert(ENTRY_NAME, &caps["entry"]);
        fields.insert(PROTEIN_NAME, &caps["name"]);
        for (tag, field) in TAGS {
            if let Some(value) = caps.name(tag) {
                fields.insert(field, value.as_str());
            }
        }

        Ok(ParsedHeader::new(&caps["id"], header, fields))
    }

    fn write(&self, parsed: &ParsedHeader) -> ProFastaResult<String> {
        let mut out = format!(
            "{}|{}|{} {}",
            required(parsed, DB)?,
            required(parsed, IDENTIFIER)?,
            required(parsed, ENTRY_NAME)?,
            required(parsed, PROTEIN_NAME)?,
        );
        for (tag, field) in TAGS {
            if let Some(value) = parsed.field(field) {
                out.push(' ');
                out.push_str(tag);
                out.push('=');
                out.push_str(value);
            }
        }
        Ok(out)
    }
}

pub(crate) fn required<'a>(parsed: &'a ParsedHeader, field: &str) -> ProFastaResult<&'a str> {
    parsed
        .field(field)
        .ok_or_else(|| ProFastaError::MissingHeaderField {
            field: field.to_string(),
            identifier: parsed.identifier.clone(),
        })
}
