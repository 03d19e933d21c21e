//! Run configuration shared by the binary and library callers
use crate::alphabet::Alphabet;
use crate::matcher::SymbolMatcher;
use crate::report::{OutputFormat, ReportFilter};
use crate::scan::{WindowScanner, DEFAULT_MATCH_MARKER, DEFAULT_WINDOW_LENGTH};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub window_length: usize,
    pub alphabet: Alphabet,
    pub tolerance: Option<u8>, // None = exact matching
    pub match_marker: u8,
    pub mismatch_marker: Option<u8>, // None = show the differing symbol
    pub filter: ReportFilter,
    pub format: OutputFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            window_length: DEFAULT_WINDOW_LENGTH,
            alphabet: Alphabet::amino_acids(),
            tolerance: None,
            match_marker: DEFAULT_MATCH_MARKER,
            mismatch_marker: None,
            filter: ReportFilter::default(),
            format: OutputFormat::default(),
        }
    }
}

impl ScanConfig {
    pub fn matcher(&self) -> SymbolMatcher {
        match self.tolerance {
            Some(max_distance) => SymbolMatcher::tolerance(self.alphabet.clone(), max_distance),
            None => SymbolMatcher::Exact,
        }
    }

    pub fn scanner(&self) -> WindowScanner {
        WindowScanner::new(self.window_length)
            .with_matcher(self.matcher())
            .with_match_marker(self.match_marker)
            .with_mismatch_marker(self.mismatch_marker)
    }
}
