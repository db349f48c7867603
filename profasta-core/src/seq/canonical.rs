use crate::alphabets::protein::{self, IGNORED_SYMBOLS, MIN_LENGTH, TERMINATOR};
use crate::error::{ProFastaError, ProFastaResult};
use std::fmt;
use std::str::FromStr;

/// Uppercase protein sequence over the canonical alphabet, at least two
/// residues long, without terminator or whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalSequence {
    residues: String,
}

impl CanonicalSequence {
    pub fn new(raw: &str) -> ProFastaResult<Self> {
        canonicalize(raw)
    }

    #[inline]
    pub(crate) fn from_canonical_unchecked(residues: String) -> Self {
        debug_assert!(is_canonical(&residues));
        Self { residues }
    }

    pub fn as_str(&self) -> &str {
        &self.residues
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.residues.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn into_string(self) -> String {
        self.residues
    }
}

impl fmt::Display for CanonicalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

impl AsRef<str> for CanonicalSequence {
    fn as_ref(&self) -> &str {
        &self.residues
    }
}

impl FromStr for CanonicalSequence {
    type Err = ProFastaError;

    fn from_str(s: &str) -> ProFastaResult<Self> {
        canonicalize(s)
    }
}

impl PartialEq<str> for CanonicalSequence {
    fn eq(&self, other: &str) -> bool {
        self.residues == other
    }
}

impl PartialEq<&str> for CanonicalSequence {
    fn eq(&self, other: &&str) -> bool {
        self.residues == *other
    }
}

/// Turn arbitrarily formatted sequence text into its canonical form.
///
/// The steps run in a fixed order: uppercase, drop all whitespace, strip
/// terminators from the end and then from the start, drop the ignorable
/// alignment symbols, and finally validate against the canonical alphabet.
/// A terminator left anywhere inside the sequence is rejected by the final
/// check.
pub fn canonicalize(raw: &str) -> ProFastaResult<CanonicalSequence> {
    let upper = raw.to_uppercase();
    let compact: String = upper.chars().filter(|c| !c.is_whitespace()).collect();

    let trimmed = compact
        .trim_end_matches(TERMINATOR)
        .trim_start_matches(TERMINATOR);

    let residues: String = trimmed
        .chars()
        .filter(|c| !IGNORED_SYMBOLS.contains(c))
        .collect();

    if !is_canonical(&residues) {
        return Err(ProFastaError::InvalidSequence {
            input: raw.to_string(),
            partial: residues,
        });
    }

    Ok(CanonicalSequence { residues })
}

/// True iff `seq` already is a canonical sequence.
pub fn is_canonical(seq: &str) -> bool {
    seq.len() >= MIN_LENGTH && protein::alphabet().is_word(seq.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canon(raw: &str) -> String {
        canonicalize(raw).unwrap().into_string()
    }

    #[test]
    fn valid_sequences() {
        let cases = [
            ("ACDEFGHIKLMNPQRSTVXY", "ACDEFGHIKLMNPQRSTVXY"),
            ("ACD ACD", "ACDACD"),
            ("Xx", "XX"),
            ("acdefghiklmnpqrstvxy", "ACDEFGHIKLMNPQRSTVXY"),
            ("acdefghiklmnpqrsTVXY", "ACDEFGHIKLMNPQRSTVXY"),
            ("acDEfghiKLmnPQRSTvXy", "ACDEFGHIKLMNPQRSTVXY"),
            ("xxATx", "XXATX"),
        ];
        for (raw, expected) in cases {
            assert_eq!(canon(raw), expected, "input {raw:?}");
        }
    }

    #[test]
    fn odd_but_unambiguous_sequences() {
        let cases = [
            ("AG.GA", "AGGA"),
            ("AGR-GA", "AGRGA"),
            ("AHGGA*", "AHGGA"),
            ("*AQGGA", "AQGGA"),
            ("acdefghik lmnpqrstvxy", "ACDEFGHIKLMNPQRSTVXY"),
            ("acdefghik\tlmnpqrstvxy", "ACDEFGHIKLMNPQRSTVXY"),
            (
                "**aC-d.e++fgHIk\t \tl..m---n\tpq rs tv XY* **",
                "ACDEFGHIKLMNPQRSTVXY",
            ),
            ("*D A.V-I+D*", "DAVID"),
            ("MKK\r\nRR\n", "MKKRR"),
        ];
        for (raw, expected) in cases {
            assert_eq!(canon(raw), expected, "input {raw:?}");
        }
    }

    #[test]
    fn invalid_sequences() {
        let cases = [
            "", "A", "AGC1", "1QVT", "TCRAQ75VNMAGGC", "AG#GA", "AG?GA", "AG*GA", "AZ", "IOT",
            "JURAJ", "BAHEL", "MW", "***", "A*",
        ];
        for raw in cases {
            assert!(canonicalize(raw).is_err(), "input {raw:?} should fail");
        }
    }

    #[test]
    fn terminator_inside_ignorable_symbols_is_rejected() {
        // The terminator is only stripped before the ignorable symbols are removed.
        let err = canonicalize("AG*-").unwrap_err();
        match err {
            ProFastaError::InvalidSequence { input, partial } => {
                assert_eq!(input, "AG*-");
                assert_eq!(partial, "AG*");
            }
            other => panic!("expected invalid sequence error, got {other:?}"),
        }
    }

    #[test]
    fn error_reports_input_and_partial_result() {
        let err = canonicalize("da v*id").unwrap_err();
        match err {
            ProFastaError::InvalidSequence { input, partial } => {
                assert_eq!(input, "da v*id");
                assert_eq!(partial, "DAV*ID");
            }
            other => panic!("expected invalid sequence error, got {other:?}"),
        }
    }

    #[test]
    fn is_canonical_checks() {
        assert!(is_canonical("MK"));
        assert!(is_canonical("ACDEFGHIKLMNPQRSTVXY"));
        assert!(!is_canonical("M"));
        assert!(!is_canonical("mk"));
        assert!(!is_canonical("MK*"));
        assert!(!is_canonical("M K"));
        assert!(!is_canonical(""));
    }

    #[test]
    fn parse_from_str() {
        let seq: CanonicalSequence = "mkkk*".parse().unwrap();
        assert_eq!(seq, "MKKK");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.to_string(), "MKKK");
    }

    fn canonical_residues() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(b"ACDEFGHIKLMNPQRSTVXY".to_vec()), 2..80)
            .prop_map(|v| String::from_utf8(v).unwrap())
    }

    proptest! {
        #[test]
        fn canonicalize_is_idempotent(seq in canonical_residues()) {
            let once = canonicalize(&seq).unwrap();
            prop_assert_eq!(once.as_str(), seq.as_str());
            let twice = canonicalize(once.as_str()).unwrap();
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn canonicalize_ignores_case(
            seq in canonical_residues(),
            mask in prop::collection::vec(any::<bool>(), 80),
        ) {
            let mixed: String = seq
                .chars()
                .zip(mask.iter())
                .map(|(c, &lower)| if lower { c.to_ascii_lowercase() } else { c })
                .collect();
            prop_assert_eq!(
                canonicalize(&mixed).unwrap(),
                canonicalize(&mixed.to_lowercase()).unwrap()
            );
        }
    }
}
