use crate::alphabets::Alphabet;
use std::sync::LazyLock;

/// Symbol marking the end of a translated sequence.
pub const TERMINATOR: char = '*';

/// Alignment and spacing symbols that are dropped wherever they occur.
pub const IGNORED_SYMBOLS: [char; 5] = ['-', '+', '.', ' ', '\t'];

/// Shortest sequence accepted as a protein.
pub const MIN_LENGTH: usize = 2;

const CANONICAL_SYMBOLS: &[u8] = b"ACDEFGHIKLMNPQRSTVXY";

static CANONICAL: LazyLock<Alphabet> = LazyLock::new(|| Alphabet::new(CANONICAL_SYMBOLS));

/// Uppercase canonical residues: twenty symbols including `X` but not `W`.
pub fn alphabet() -> &'static Alphabet {
    &CANONICAL
}
