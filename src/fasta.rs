use anyhow::{Context, Result};
use indexmap::IndexMap;
use noodles::bgzf;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FastaError {
    #[error("No FASTA records found in {path:?}")]
    NoRecords { path: PathBuf },

    #[error("Sequence data before the first header at line {line}")]
    MissingHeader { line: usize },

    #[error("Duplicate record name '{name}' at line {line}")]
    DuplicateName { name: String, line: usize },
}

/// Open a file and auto-detect gzip/bgzip compression, returning a boxed BufRead
pub fn open_fasta_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open FASTA: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("bgz") => Ok(Box::new(BufReader::new(bgzf::io::reader::Reader::new(file)))),
        Some("gz") => Ok(Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
            file,
        )))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// FASTA records keyed by name, in file order
#[derive(Debug, Default, Clone)]
pub struct FastaRecords {
    records: IndexMap<String, Vec<u8>>,
}

impl FastaRecords {
    /// Parse records from any reader. Headers are truncated at the first
    /// whitespace; sequence lines are concatenated with whitespace removed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut records = IndexMap::new();
        let mut current: Option<(String, Vec<u8>, usize)> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();

            if let Some(header) = trimmed.strip_prefix('>') {
                if let Some((name, seq, header_line)) = current.take() {
                    insert_record(&mut records, name, seq, header_line)?;
                }
                let name = header.split_whitespace().next().unwrap_or("").to_string();
                current = Some((name, Vec::new(), idx + 1));
            } else if !trimmed.is_empty() {
                let Some((_, seq, _)) = current.as_mut() else {
                    return Err(FastaError::MissingHeader { line: idx + 1 }.into());
                };
                seq.extend(trimmed.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }

        // Don't forget the last sequence
        if let Some((name, seq, header_line)) = current {
            insert_record(&mut records, name, seq, header_line)?;
        }

        Ok(FastaRecords { records })
    }

    /// Read a FASTA file, failing if it holds no records
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input = open_fasta_input(path)?;
        let records = Self::from_reader(input)
            .with_context(|| format!("Failed to parse FASTA: {}", path.display()))?;
        if records.is_empty() {
            return Err(FastaError::NoRecords {
                path: path.to_path_buf(),
            }
            .into());
        }
        log::debug!("Read {} records from {}", records.len(), path.display());
        Ok(records)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.records.get(name).map(Vec::as_slice)
    }

    /// First record, which is the whole input for a solo FASTA file
    pub fn first(&self) -> Option<(&str, &[u8])> {
        self.records
            .first()
            .map(|(name, seq)| (name.as_str(), seq.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.records
            .iter()
            .map(|(name, seq)| (name.as_str(), seq.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn insert_record(
    records: &mut IndexMap<String, Vec<u8>>,
    name: String,
    seq: Vec<u8>,
    line: usize,
) -> Result<()> {
    if records.contains_key(&name) {
        return Err(FastaError::DuplicateName { name, line }.into());
    }
    records.insert(name, seq);
    Ok(())
}

/// Read the first sequence of a FASTA file
pub fn read_sequence<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let records = FastaRecords::from_path(&path)?;
    let (_, seq) = records.first().ok_or_else(|| FastaError::NoRecords {
        path: path.as_ref().to_path_buf(),
    })?;
    Ok(seq.to_vec())
}
