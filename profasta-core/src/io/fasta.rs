//! Reading and writing FASTA text.
//!
//! The reader works on fully buffered text: the input is split on every
//! newline directly followed by `>`, the first line of each block is the
//! header and the remaining lines are concatenated and canonicalized.

use crate::error::{list_skipped, ProFastaError, ProFastaResult};
use crate::io::SkippedRecord;
use crate::seq::canonical::canonicalize;
use crate::seq::record::{AsFastaRecord, FastaRecord};
use log::{debug, warn};
use memchr::memmem;
use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const RECORD_START: &[u8] = b"\n>";

/// Fully buffered FASTA text that can be read into records any number of times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaSource {
    text: String,
}

impl FastaSource {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> ProFastaResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text })
    }

    pub fn from_path(path: impl AsRef<Path>) -> ProFastaResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn records(&self, strict: bool) -> ProFastaResult<FastaRecords> {
        parse_records(&self.text, strict)
    }
}

/// One pass over the records of a FASTA text.
///
/// Records whose sequence could not be canonicalized are not yielded; they
/// are available through [`FastaRecords::skipped`].
#[derive(Debug)]
pub struct FastaRecords {
    records: std::vec::IntoIter<FastaRecord>,
    skipped: Vec<SkippedRecord>,
    total: usize,
}

impl FastaRecords {
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Number of record blocks found in the text, valid or not.
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for FastaRecords {
    type Item = FastaRecord;

    fn next(&mut self) -> Option<FastaRecord> {
        self.records.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for FastaRecords {}

/// Split FASTA text into records with canonical sequences.
///
/// Every block is processed even if earlier ones fail. With `strict` set,
/// any invalid sequence turns the whole call into
/// [`ProFastaError::InvalidRecords`] listing all failing blocks; otherwise
/// the failing blocks are logged and left out.
pub fn parse_records(text: &str, strict: bool) -> ProFastaResult<FastaRecords> {
    let text: Cow<'_, str> = if text.starts_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("\n{text}"))
    };

    let blocks = split_blocks(&text);
    let total = blocks.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (index, (header, raw_sequence)) in blocks.into_iter().enumerate() {
        match canonicalize(&raw_sequence) {
            Ok(sequence) => records.push(FastaRecord::new(header, sequence)),
            Err(err) => skipped.push(SkippedRecord {
                index,
                header: header.into(),
                sequence: raw_sequence.into_boxed_str(),
                message: err.to_string().into_boxed_str(),
            }),
        }
    }

    if !skipped.is_empty() {
        if strict {
            return Err(ProFastaError::InvalidRecords { skipped, total });
        }
        warn!(
            "{} of {} records have invalid sequences and were skipped:{}",
            skipped.len(),
            total,
            list_skipped(&skipped)
        );
    }
    debug!("parsed {} of {} fasta records", records.len(), total);

    Ok(FastaRecords {
        records: records.into_iter(),
        skipped,
        total,
    })
}

pub fn read_fasta_path(path: impl AsRef<Path>, strict: bool) -> ProFastaResult<FastaRecords> {
    FastaSource::from_path(path)?.records(strict)
}

/// `text` must start with a newline; anything before the first `\n>` is ignored.
fn split_blocks(text: &str) -> Vec<(&str, String)> {
    let starts: Vec<usize> = memmem::find_iter(text.as_bytes(), RECORD_START)
        .map(|pos| pos + RECORD_START.len())
        .collect();

    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts
            .get(i + 1)
            .map(|&next| next - RECORD_START.len())
            .unwrap_or(text.len());
        let block = &text[start..end];
        let mut lines = block.split('\n');
        let header = lines.next().unwrap_or("").trim();
        let raw_sequence: String = lines.collect();
        blocks.push((header, raw_sequence));
    }
    blocks
}

/// Build the text of one record. `line_width` of `None` (or zero) keeps the
/// sequence on a single line.
pub fn format_record(header: &str, sequence: &str, line_width: Option<usize>) -> String {
    let mut out = String::with_capacity(header.len() + sequence.len() + 2);
    out.push('>');
    out.push_str(header);
    match line_width.filter(|&width| width > 0) {
        None => {
            out.push('\n');
            out.push_str(sequence);
        }
        Some(width) => {
            for (i, residue) in sequence.chars().enumerate() {
                if i % width == 0 {
                    out.push('\n');
                }
                out.push(residue);
            }
        }
    }
    out
}

/// Join formatted records with newlines, ending the text with one newline.
/// No records give a lone newline.
pub fn write_records<I, R>(records: I, line_width: Option<usize>) -> String
where
    I: IntoIterator<Item = R>,
    R: AsFastaRecord,
{
    let mut out = String::new();
    for record in records {
        out.push_str(&format_record(record.header(), record.sequence(), line_width));
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

pub fn write_fasta<W, I, R>(
    mut writer: W,
    records: I,
    line_width: Option<usize>,
) -> ProFastaResult<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: AsFastaRecord,
{
    writer.write_all(write_records(records, line_width).as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::canonical::CanonicalSequence;
    use proptest::prelude::*;

    fn collect(text: &str) -> Vec<(String, String)> {
        parse_records(text, true)
            .unwrap()
            .map(|r| (r.header().to_string(), r.sequence().to_string()))
            .collect()
    }

    fn record(header: &str, seq: &str) -> FastaRecord {
        FastaRecord::new(header, CanonicalSequence::new(seq).unwrap())
    }

    #[test]
    fn parse_two_records() {
        let records = collect(">H1\nMKKK\n>H2\nMAAA");
        assert_eq!(
            records,
            vec![
                ("H1".to_string(), "MKKK".to_string()),
                ("H2".to_string(), "MAAA".to_string())
            ]
        );
    }

    #[test]
    fn sequence_lines_are_joined_and_canonicalized() {
        assert_eq!(collect(">H1\nMKKK\nRRR")[0].1, "MKKKRRR");
        assert_eq!(collect(">H1\nMKK K\nRR R")[0].1, "MKKKRRR");
        assert_eq!(collect(">H1\nMKKK\nRRR*")[0].1, "MKKKRRR");
        assert_eq!(collect(">H1\n*D A.V-I+D*")[0].1, "DAVID");
    }

    #[test]
    fn header_is_trimmed_and_text_before_first_record_ignored() {
        let records = collect("junk line\n>  H1 some desc \r\nmkk\r\n");
        assert_eq!(records, vec![("H1 some desc".to_string(), "MKK".to_string())]);
    }

    #[test]
    fn leading_newline_is_accepted() {
        assert_eq!(collect("\n>H1\nMK\n").len(), 1);
    }

    #[test]
    fn embedded_terminator_fails_in_strict_mode() {
        let err = parse_records(">H1\nDAV*ID", true).unwrap_err();
        match err {
            ProFastaError::InvalidRecords { skipped, total } => {
                assert_eq!(total, 1);
                assert_eq!(skipped.len(), 1);
                assert_eq!(skipped[0].header.as_ref(), "H1");
                assert_eq!(skipped[0].sequence.as_ref(), "DAV*ID");
            }
            other => panic!("expected invalid records error, got {other:?}"),
        }
    }

    fn ten_records_one_bad() -> String {
        let mut text = String::new();
        for i in 0..10 {
            if i == 4 {
                text.push_str(">bad_record\nMK#K\n");
            } else {
                text.push_str(&format!(">P{i}\nMKKR\nAAAC\n"));
            }
        }
        text
    }

    #[test]
    fn best_effort_skips_invalid_record() {
        let records = parse_records(&ten_records_one_bad(), false).unwrap();
        assert_eq!(records.total(), 10);
        assert_eq!(records.len(), 9);
        assert_eq!(records.skipped().len(), 1);
        assert_eq!(records.skipped()[0].index, 4);
        assert_eq!(records.skipped()[0].header.as_ref(), "bad_record");
        assert!(records.skipped()[0].message.contains("MK#K"));
        let headers: Vec<String> = records.map(|r| r.header().to_string()).collect();
        assert!(!headers.contains(&"bad_record".to_string()));
        assert_eq!(headers.len(), 9);
    }

    #[test]
    fn strict_mode_reports_every_invalid_record() {
        let text = ">A\nMK\n>B\nM\n>C\nMKK\n>D\nZZ\n";
        let err = parse_records(text, true).unwrap_err();
        match err {
            ProFastaError::InvalidRecords { skipped, total } => {
                assert_eq!(total, 4);
                let headers: Vec<&str> = skipped.iter().map(|s| s.header.as_ref()).collect();
                assert_eq!(headers, vec!["B", "D"]);
            }
            other => panic!("expected invalid records error, got {other:?}"),
        }
        assert!(parse_records(&ten_records_one_bad(), true).is_err());
    }

    #[test]
    fn empty_text_has_no_records() {
        let records = parse_records("", true).unwrap();
        assert_eq!(records.total(), 0);
        assert_eq!(records.count(), 0);
    }

    #[test]
    fn source_hands_out_fresh_iterators() {
        let source = FastaSource::from_text(">H1\nMKKK\n>H2\nMAAA\n");
        let first: Vec<FastaRecord> = source.records(true).unwrap().collect();
        let second: Vec<FastaRecord> = source.records(true).unwrap().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);

        let mut once = source.records(true).unwrap();
        assert_eq!(once.by_ref().count(), 2);
        assert_eq!(once.next(), None);
    }

    #[test]
    fn source_from_reader() {
        let source = FastaSource::from_reader(&b">H1\nMK\n"[..]).unwrap();
        assert_eq!(source.text(), ">H1\nMK\n");
    }

    #[test]
    fn format_without_line_breaks() {
        let seq = "ACGTACGTACGTACGT";
        assert_eq!(format_record("Header", seq, None), ">Header\nACGTACGTACGTACGT");
        assert_eq!(format_record("Header", seq, Some(0)), ">Header\nACGTACGTACGTACGT");
    }

    #[test]
    fn format_with_line_width() {
        let seq = "ACGTACGTACGTACGT";
        assert_eq!(
            format_record("Header", seq, Some(5)),
            ">Header\nACGTA\nCGTAC\nGTACG\nT"
        );
        assert_eq!(format_record("Header", seq, Some(4)), ">Header\nACGT\nACGT\nACGT\nACGT");
        assert_eq!(format_record("Header", seq, Some(99)), ">Header\nACGTACGTACGTACGT");
    }

    #[test]
    fn write_records_joins_with_trailing_newline() {
        let records = vec![record("Header1", "ACGT"), record("Header2", "TGCA")];
        assert_eq!(
            write_records(&records, None),
            ">Header1\nACGT\n>Header2\nTGCA\n"
        );
    }

    #[test]
    fn write_records_without_records_is_a_single_newline() {
        assert_eq!(write_records(Vec::<FastaRecord>::new(), None), "\n");
        assert_eq!(write_records(Vec::<FastaRecord>::new(), Some(60)), "\n");

        let mut buf = Vec::new();
        write_fasta(&mut buf, Vec::<FastaRecord>::new(), None).unwrap();
        assert_eq!(buf, b"\n");
    }

    #[test]
    fn write_fasta_to_buffer() {
        let records = vec![record("H1", "MKKKRRR")];
        let mut buf = Vec::new();
        write_fasta(&mut buf, &records, Some(3)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), ">H1\nMKK\nKRR\nR\n");
    }

    #[test]
    fn written_text_reads_back() {
        let records = vec![record("P1 first", "MKKKRRRAAA"), record("P2", "MAAA")];
        let text = write_records(&records, Some(4));
        let back: Vec<FastaRecord> = parse_records(&text, true).unwrap().collect();
        assert_eq!(back, records);
    }

    proptest! {
        #[test]
        fn wrapped_lines_rejoin_to_sequence(
            seq in "[ACDEFGHIKLMNPQRSTVXY]{0,200}",
            width in 1usize..100,
        ) {
            let text = format_record("h", &seq, Some(width));
            let mut lines = text.split('\n');
            prop_assert_eq!(lines.next(), Some(">h"));
            let mut joined = String::new();
            for line in lines {
                prop_assert!(line.len() <= width);
                joined.push_str(line);
            }
            prop_assert_eq!(joined, seq);
        }
    }
}
