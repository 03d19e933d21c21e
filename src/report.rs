//! Filtering and tabular output of scan results

use anyhow::Result;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::io::Write;

use crate::hydropathy::{antigenicity, ash_score};
use crate::scan::ScanResult;

/// Results with a score above 4 are reported by default
pub const DEFAULT_MIN_SCORE: usize = 5;

/// CSV header used by the ASH report
pub const CSV_HEADER: &str = "index,sequence,ash_score,antigenicity,analog_sequence";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// position, window, score, match mask
    #[default]
    Tsv,
    /// index, sequence, ASH score, antigenicity, analog sequence
    Csv,
}

/// Which results make it into the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFilter {
    pub min_score: usize,
    /// Keep only the N most distinct windows (highest ASH score)
    pub top: Option<usize>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        ReportFilter {
            min_score: DEFAULT_MIN_SCORE,
            top: None,
        }
    }
}

impl ReportFilter {
    /// Select results. Without `top` the scan order is kept; with it, results
    /// are ordered by descending ASH score, ties by position.
    pub fn apply<'a>(&self, results: &'a [ScanResult]) -> Vec<&'a ScanResult> {
        let mut kept: Vec<&ScanResult> = results
            .iter()
            .filter(|r| r.score() >= self.min_score)
            .collect();

        if let Some(limit) = self.top {
            kept.sort_by_key(|r| {
                let distinct = OrderedFloat(ash_score(r.window(), r.analog()));
                (Reverse(distinct), r.position())
            });
            kept.truncate(limit);
        }
        kept
    }
}

/// Writes results as TSV or CSV, optionally prefixed by a pair name column
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    format: OutputFormat,
    pair_column: bool,
    header_written: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        let mut builder = csv::WriterBuilder::new();
        builder.has_headers(false);
        if format == OutputFormat::Tsv {
            // masks may carry any marker, including quotes
            builder.delimiter(b'\t').quote_style(csv::QuoteStyle::Never);
        }
        ReportWriter {
            writer: builder.from_writer(writer),
            format,
            pair_column: false,
            header_written: false,
        }
    }

    /// Add a leading column naming the sequence pair (batch mode)
    pub fn with_pair_column(mut self, pair_column: bool) -> Self {
        self.pair_column = pair_column;
        self
    }

    fn write_header(&mut self) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;
        if self.format == OutputFormat::Csv {
            let pair = self.pair_column.then_some("pair");
            let header = pair.into_iter().chain(CSV_HEADER.split(','));
            self.writer.write_record(header)?;
        }
        Ok(())
    }

    pub fn write_results<'a, I>(&mut self, pair: Option<&str>, results: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a ScanResult>,
    {
        self.write_header()?;
        let prefix = pair.filter(|_| self.pair_column);

        let mut written = 0;
        for result in results {
            let mut record: Vec<Vec<u8>> = Vec::with_capacity(6);
            if let Some(name) = prefix {
                record.push(name.as_bytes().to_vec());
            }
            record.push(result.position().to_string().into_bytes());
            match self.format {
                OutputFormat::Tsv => {
                    record.push(result.window().to_vec());
                    record.push(result.score().to_string().into_bytes());
                    record.push(result.match_mask().to_vec());
                }
                OutputFormat::Csv => {
                    record.push(result.window().to_vec());
                    let distinct = ash_score(result.window(), result.analog());
                    record.push(distinct.to_string().into_bytes());
                    record.push(antigenicity(result.window()).to_string().into_bytes());
                    record.push(result.analog().to_vec());
                }
            }
            self.writer.write_record(&record)?;
            written += 1;
        }
        Ok(written)
    }

    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| anyhow::Error::from(e.into_error()))
    }
}
