//! Ordered symbol alphabets
//!
//! An alphabet assigns every symbol a numeric code (its rank). The code is what
//! tolerance matching compares, so the order of symbols matters: neighbouring
//! symbols should be similar in whatever sense the caller cares about.

use std::fmt;
use std::str::FromStr;

/// Amino acids ordered by hydropathy group: hydrophobic, neutral, hydrophilic
pub const AMINO_ACID_SYMBOLS: &[u8] = b"LAFYWIVHNCGMQPSTDERK";

/// Nucleotides
pub const DNA_SYMBOLS: &[u8] = b"ACGT";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("An alphabet needs at least one symbol")]
    Empty,

    #[error("Symbol '{0}' appears more than once in the alphabet")]
    Duplicate(char),

    #[error("Unknown alphabet '{0}'. Use protein (aa) or dna (nt)")]
    Unknown(String),
}

/// Ordered, case-insensitive set of symbols
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    codes: [Option<u8>; 256],
}

impl Alphabet {
    /// Build an alphabet from symbols in rank order
    pub fn new(symbols: &[u8]) -> Result<Self, AlphabetError> {
        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        // Case folding leaves fewer than 256 distinct symbols, so a repeat is
        // always caught before a rank can overflow u8.
        let mut codes = [None; 256];
        for (rank, &sym) in symbols.iter().enumerate() {
            let upper = sym.to_ascii_uppercase();
            if codes[upper as usize].is_some() {
                return Err(AlphabetError::Duplicate(upper as char));
            }
            codes[upper as usize] = Some(rank as u8);
            codes[upper.to_ascii_lowercase() as usize] = Some(rank as u8);
        }

        Ok(Alphabet {
            symbols: symbols.iter().map(u8::to_ascii_uppercase).collect(),
            codes,
        })
    }

    /// The twenty standard amino acids
    pub fn amino_acids() -> Self {
        Self::from_known(AMINO_ACID_SYMBOLS)
    }

    /// A, C, G, T
    pub fn dna() -> Self {
        Self::from_known(DNA_SYMBOLS)
    }

    fn from_known(symbols: &[u8]) -> Self {
        let mut codes = [None; 256];
        for (rank, &sym) in symbols.iter().enumerate() {
            codes[sym as usize] = Some(rank as u8);
            codes[sym.to_ascii_lowercase() as usize] = Some(rank as u8);
        }
        Alphabet {
            symbols: symbols.to_vec(),
            codes,
        }
    }

    /// Rank of `symbol`, or `None` if it is not part of the alphabet
    #[inline]
    pub fn code(&self, symbol: u8) -> Option<u8> {
        self.codes[symbol as usize]
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.code(symbol).is_some()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::amino_acids()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet")
            .field(&String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" | "aa" | "amino" => Ok(Self::amino_acids()),
            "dna" | "nt" => Ok(Self::dna()),
            _ => Err(AlphabetError::Unknown(s.to_string())),
        }
    }
}
