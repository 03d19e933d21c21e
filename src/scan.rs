//! Sliding-window similarity scan
//!
//! Two equal-length, pre-aligned sequences are compared window by window.
//! Every start position in `0..=len - window_length` produces one
//! [`ScanResult`] holding both windows, the number of matching offsets and a
//! per-offset match mask.

use std::fmt;
use std::iter::FusedIterator;

use crate::matcher::SymbolMatcher;

/// Window length used by the ASH driver
pub const DEFAULT_WINDOW_LENGTH: usize = 15;

/// Mask byte written where the two windows agree
pub const DEFAULT_MATCH_MARKER: u8 = b'.';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("Sequences differ in length: first has {len_a} symbols, second has {len_b}")]
    InvalidInputLength { len_a: usize, len_b: usize },

    #[error("Window length {window} is invalid for sequences of length {len} (must be 1..={len})")]
    InvalidWindowLength { window: usize, len: usize },
}

/// One window comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanResult {
    position: usize,
    window: Vec<u8>,
    analog: Vec<u8>,
    score: usize,
    match_mask: Vec<u8>,
}

impl ScanResult {
    /// Zero-based start of the window
    pub fn position(&self) -> usize {
        self.position
    }

    /// Window of the first sequence
    pub fn window(&self) -> &[u8] {
        &self.window
    }

    /// Window of the second sequence at the same position
    pub fn analog(&self) -> &[u8] {
        &self.analog
    }

    /// Number of matching offsets, in `0..=window_length`
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn match_mask(&self) -> &[u8] {
        &self.match_mask
    }

    pub fn window_length(&self) -> usize {
        self.window.len()
    }

    /// Fraction of matching offsets
    pub fn identity(&self) -> f64 {
        if self.window.is_empty() {
            0.0
        } else {
            self.score as f64 / self.window.len() as f64
        }
    }
}

impl fmt::Display for ScanResult {
    /// Tab-separated: position, window, score, match mask
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.position,
            String::from_utf8_lossy(&self.window),
            self.score,
            String::from_utf8_lossy(&self.match_mask)
        )
    }
}

/// Scans two sequences with a fixed window length
#[derive(Debug, Clone)]
pub struct WindowScanner {
    window_length: usize,
    matcher: SymbolMatcher,
    match_marker: u8,
    mismatch_marker: Option<u8>,
}

impl Default for WindowScanner {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_LENGTH)
    }
}

impl WindowScanner {
    pub fn new(window_length: usize) -> Self {
        WindowScanner {
            window_length,
            matcher: SymbolMatcher::Exact,
            match_marker: DEFAULT_MATCH_MARKER,
            mismatch_marker: None,
        }
    }

    pub fn with_matcher(mut self, matcher: SymbolMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_match_marker(mut self, marker: u8) -> Self {
        self.match_marker = marker;
        self
    }

    /// Use a fixed byte for mismatches instead of the second sequence's symbol
    pub fn with_mismatch_marker(mut self, marker: Option<u8>) -> Self {
        self.mismatch_marker = marker;
        self
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn matcher(&self) -> &SymbolMatcher {
        &self.matcher
    }

    /// Check the inputs without scanning
    pub fn validate(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<(), ScanError> {
        if seq_a.len() != seq_b.len() {
            return Err(ScanError::InvalidInputLength {
                len_a: seq_a.len(),
                len_b: seq_b.len(),
            });
        }
        if self.window_length == 0 || self.window_length > seq_a.len() {
            return Err(ScanError::InvalidWindowLength {
                window: self.window_length,
                len: seq_a.len(),
            });
        }
        Ok(())
    }

    /// Lazily yield one result per window position
    pub fn windows<'a>(
        &'a self,
        seq_a: &'a [u8],
        seq_b: &'a [u8],
    ) -> Result<ScanWindows<'a>, ScanError> {
        self.validate(seq_a, seq_b)?;
        Ok(ScanWindows {
            scanner: self,
            seq_a,
            seq_b,
            next: 0,
            end: seq_a.len() - self.window_length + 1,
        })
    }

    /// Scan every window position, in increasing order
    pub fn scan(&self, seq_a: &[u8], seq_b: &[u8]) -> Result<Vec<ScanResult>, ScanError> {
        let results: Vec<ScanResult> = self.windows(seq_a, seq_b)?.collect();
        log::debug!(
            "Scanned {} windows of length {} over {} symbols",
            results.len(),
            self.window_length,
            seq_a.len()
        );
        Ok(results)
    }

    /// Compare one pair of equal-length windows
    fn compare(&self, position: usize, window_a: &[u8], window_b: &[u8]) -> ScanResult {
        let mut score = 0;
        let mut match_mask = Vec::with_capacity(window_a.len());

        for (&a, &b) in window_a.iter().zip(window_b) {
            if self.matcher.matches(a, b) {
                score += 1;
                match_mask.push(self.match_marker);
            } else {
                match_mask.push(self.mismatch_marker.unwrap_or(b));
            }
        }

        ScanResult {
            position,
            window: window_a.to_vec(),
            analog: window_b.to_vec(),
            score,
            match_mask,
        }
    }
}

/// Iterator over the windows of a validated sequence pair
///
/// A clone resumes from the same position as the original.
#[derive(Debug, Clone)]
pub struct ScanWindows<'a> {
    scanner: &'a WindowScanner,
    seq_a: &'a [u8],
    seq_b: &'a [u8],
    next: usize,
    end: usize,
}

impl Iterator for ScanWindows<'_> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<ScanResult> {
        if self.next >= self.end {
            return None;
        }
        let pos = self.next;
        let w = self.scanner.window_length;
        self.next += 1;
        Some(
            self.scanner
                .compare(pos, &self.seq_a[pos..pos + w], &self.seq_b[pos..pos + w]),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScanWindows<'_> {}

impl FusedIterator for ScanWindows<'_> {}
