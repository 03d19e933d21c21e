//! Scan many sequence pairs in parallel

use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::fasta::FastaRecords;
use crate::scan::{ScanError, ScanResult, WindowScanner};

/// Two sequences to compare, named after their FASTA records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub name: String,
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

impl SequencePair {
    pub fn new(name: impl Into<String>, first: Vec<u8>, second: Vec<u8>) -> Self {
        SequencePair {
            name: name.into(),
            first,
            second,
        }
    }

    /// Pair records of two FASTA inputs by their order in the files.
    /// The pair is named `first_name:second_name`.
    pub fn zip_records(first: &FastaRecords, second: &FastaRecords) -> Result<Vec<Self>> {
        if first.len() != second.len() {
            bail!(
                "Cannot pair records: first input has {} records, second has {}",
                first.len(),
                second.len()
            );
        }
        Ok(first
            .iter()
            .zip(second.iter())
            .map(|((name_a, seq_a), (name_b, seq_b))| {
                SequencePair::new(format!("{name_a}:{name_b}"), seq_a.to_vec(), seq_b.to_vec())
            })
            .collect())
    }
}

/// Outcome of scanning one pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairScan {
    pub name: String,
    pub results: Result<Vec<ScanResult>, ScanError>,
}

/// Scan every pair on the rayon pool. Output order matches input order and a
/// failing pair does not stop the others.
pub fn scan_pairs(scanner: &WindowScanner, pairs: &[SequencePair]) -> Vec<PairScan> {
    pairs
        .par_iter()
        .map(|pair| PairScan {
            name: pair.name.clone(),
            results: scanner.scan(&pair.first, &pair.second),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_matches_sequential() {
        let scanner = WindowScanner::new(3);
        let pairs = vec![
            SequencePair::new("a", b"ACGTACGT".to_vec(), b"ACGAACGT".to_vec()),
            SequencePair::new("b", b"TTTT".to_vec(), b"TTTA".to_vec()),
            SequencePair::new("c", b"GG".to_vec(), b"GG".to_vec()),
        ];

        let scans = scan_pairs(&scanner, &pairs);
        let names: Vec<&str> = scans.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        for (scan, pair) in scans.iter().zip(&pairs) {
            assert_eq!(scan.results, scanner.scan(&pair.first, &pair.second));
        }
        assert!(scans[2].results.is_err());
    }

    #[test]
    fn test_zip_records() {
        let first = FastaRecords::from_reader(">x\nAAA\n>y\nCCC\n".as_bytes()).unwrap();
        let second = FastaRecords::from_reader(">x2\nAAT\n>y2\nCCA\n".as_bytes()).unwrap();
        let pairs = SequencePair::zip_records(&first, &second).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], SequencePair::new("y:y2", b"CCC".to_vec(), b"CCA".to_vec()));

        let short = FastaRecords::from_reader(">x\nAAA\n".as_bytes()).unwrap();
        assert!(SequencePair::zip_records(&first, &short).is_err());
    }
}
