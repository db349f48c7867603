use crate::error::{ProFastaError, ProFastaResult};
use crate::header::{HeaderFields, HeaderParser, ParsedHeader};

pub const NAME: &str = "default";

/// Field holding everything after the identifier.
pub const DESCRIPTION: &str = "description";

/// Identifier is the first whitespace-separated word, the rest of the header
/// goes to the `description` field. Writing returns the stored header as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultParser;

impl HeaderParser for DefaultParser {
    fn parse(&self, header: &str) -> ProFastaResult<ParsedHeader> {
        let trimmed = header.trim_start();
        let (identifier, rest) = match trimmed.find(char::is_whitespace) {
            Some(idx) => (&trimmed[..idx], trimmed[idx..].trim_start()),
            None => (trimmed, ""),
        };
        if identifier.is_empty() {
            return Err(ProFastaError::header_format(NAME, header));
        }

        let mut fields = HeaderFields::new();
        if !rest.is_empty() {
            fields.insert(DESCRIPTION, rest);
        }
        Ok(ParsedHeader::new(identifier, header, fields))
    }

    fn write(&self, parsed: &ParsedHeader) -> ProFastaResult<String> {
        Ok(parsed.header.clone())
    }
}
