use crate::alphabet::Alphabet;

/// Rule deciding whether two symbols at the same offset count as a match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SymbolMatcher {
    /// Byte equality
    #[default]
    Exact,
    /// Equal symbols, or symbols whose alphabet codes differ by at most
    /// `max_distance`. Symbols outside the alphabet only match themselves.
    Tolerance {
        alphabet: Alphabet,
        max_distance: u8,
    },
}

impl SymbolMatcher {
    pub fn tolerance(alphabet: Alphabet, max_distance: u8) -> Self {
        SymbolMatcher::Tolerance {
            alphabet,
            max_distance,
        }
    }

    #[inline]
    pub fn matches(&self, a: u8, b: u8) -> bool {
        if a == b {
            return true;
        }
        match self {
            SymbolMatcher::Exact => false,
            SymbolMatcher::Tolerance {
                alphabet,
                max_distance,
            } => match (alphabet.code(a), alphabet.code(b)) {
                (Some(ca), Some(cb)) => ca.abs_diff(cb) <= *max_distance,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let m = SymbolMatcher::Exact;
        assert!(m.matches(b'A', b'A'));
        assert!(m.matches(b'-', b'-'));
        assert!(!m.matches(b'A', b'a'));
        assert!(!m.matches(b'A', b'T'));
    }

    #[test]
    fn test_tolerance_uses_alphabet_rank() {
        // L=0 A=1 F=2 ... D=16 E=17 R=18 K=19
        let m = SymbolMatcher::tolerance(Alphabet::amino_acids(), 1);
        assert!(m.matches(b'L', b'A'));
        assert!(m.matches(b'R', b'k'));
        assert!(!m.matches(b'L', b'F'));
        assert!(!m.matches(b'D', b'L'));
    }

    #[test]
    fn test_tolerance_outside_alphabet() {
        let m = SymbolMatcher::tolerance(Alphabet::dna(), 3);
        assert!(m.matches(b'N', b'N'));
        assert!(!m.matches(b'N', b'A'));
        assert!(!m.matches(b'-', b'A'));
        assert!(m.matches(b'A', b'T'));
    }

    #[test]
    fn test_zero_tolerance_is_case_insensitive_equality() {
        let m = SymbolMatcher::tolerance(Alphabet::amino_acids(), 0);
        assert!(m.matches(b'a', b'A'));
        assert!(!m.matches(b'A', b'F'));
    }
}
