use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};

use ash_scan::alphabet::Alphabet;
use ash_scan::batch::{scan_pairs, SequencePair};
use ash_scan::config::ScanConfig;
use ash_scan::fasta::FastaRecords;
use ash_scan::report::{OutputFormat, ReportFilter, ReportWriter, DEFAULT_MIN_SCORE};
use ash_scan::scan::DEFAULT_WINDOW_LENGTH;

/// Parse a single ASCII character used as a mask marker
fn parse_marker(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("Marker must be a single ASCII character, got '{s}'")),
    }
}

/// ASH - Antigen Selection Heuristic
///
/// Slides a window along two aligned protein sequences, scores how many
/// positions match in each window and reports the windows above a threshold
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// First FASTA file (windows are reported from this sequence)
    #[clap(value_name = "FIRST")]
    first: String,

    /// Second FASTA file, aligned to the first
    #[clap(value_name = "SECOND")]
    second: String,

    /// Window (k-mer) length
    #[clap(short = 'k', long = "window", default_value_t = DEFAULT_WINDOW_LENGTH)]
    window: usize,

    /// Report windows with at least this many matching positions
    #[clap(short = 'm', long = "min-score", default_value_t = DEFAULT_MIN_SCORE)]
    min_score: usize,

    /// Keep only the N most distinct windows by ASH score
    #[clap(long = "top")]
    top: Option<usize>,

    /// Output format
    #[clap(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,

    /// Output file (stdout if not specified)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Count symbols within this alphabet rank distance as matches
    #[clap(long = "tolerance")]
    tolerance: Option<u8>,

    /// Alphabet for tolerance matching: protein (aa) or dna (nt)
    #[clap(long = "alphabet", default_value = "protein")]
    alphabet: Alphabet,

    /// Mask character for matching positions
    #[clap(long = "match-marker", default_value = ".", value_parser = parse_marker)]
    match_marker: u8,

    /// Mask character for mismatches (default: the second sequence's symbol)
    #[clap(long = "mismatch-marker", value_parser = parse_marker)]
    mismatch_marker: Option<u8>,

    /// Scan every record pair of two multi-record files instead of only the first records
    #[clap(long = "pairs")]
    pairs: bool,

    /// Quiet mode (warnings and errors only)
    #[clap(long = "quiet")]
    quiet: bool,

    /// Number of threads for parallel processing
    #[clap(short = 't', long = "threads", default_value = "8")]
    threads: usize,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            window_length: self.window,
            alphabet: self.alphabet.clone(),
            tolerance: self.tolerance,
            match_marker: self.match_marker,
            mismatch_marker: self.mismatch_marker,
            filter: ReportFilter {
                min_score: self.min_score,
                top: self.top,
            },
            format: self.format,
        }
    }
}

/// Report sink: the `--output` file, or stdout
fn open_report(args: &Args, format: OutputFormat) -> Result<ReportWriter<Box<dyn Write>>> {
    let output: Box<dyn Write> = if let Some(ref path) = args.output {
        Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output: {path}"))?,
        ))
    } else {
        Box::new(BufWriter::new(std::io::stdout()))
    };
    Ok(ReportWriter::new(output, format).with_pair_column(args.pairs))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let config = args.scan_config();

    let first = FastaRecords::from_path(&args.first)?;
    let second = FastaRecords::from_path(&args.second)?;

    let scanner = config.scanner();

    if args.pairs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;

        let pairs = SequencePair::zip_records(&first, &second)?;
        log::info!(
            "Scanning {} sequence pairs with window length {}",
            pairs.len(),
            config.window_length
        );

        let scans = scan_pairs(&scanner, &pairs);
        let mut writer = open_report(&args, config.format)?;
        let mut failed = 0;
        let mut reported = 0;
        for scan in scans {
            match scan.results {
                Ok(results) => {
                    let kept = config.filter.apply(&results);
                    reported += writer.write_results(Some(scan.name.as_str()), kept)?;
                }
                Err(e) => {
                    log::error!("{}: {e}", scan.name);
                    failed += 1;
                }
            }
        }
        writer.finish()?;
        log::info!("Reported {reported} windows");

        if failed > 0 {
            bail!("{failed} of {} sequence pairs could not be scanned", pairs.len());
        }
        return Ok(());
    }

    let (name_a, seq_a) = first.first().context("First FASTA has no records")?;
    let (name_b, seq_b) = second.first().context("Second FASTA has no records")?;
    log::info!("Read {} residues from {name_a} and {} from {name_b}", seq_a.len(), seq_b.len());

    let results = scanner
        .scan(seq_a, seq_b)
        .with_context(|| format!("Cannot scan {name_a} against {name_b}"))?;
    log::info!("Scanned {} windows of length {}", results.len(), config.window_length);

    let kept = config.filter.apply(&results);
    let mut writer = open_report(&args, config.format)?;
    let reported = writer.write_results(None, kept)?;
    writer.finish()?;
    log::info!("Reported {reported} windows with score >= {}", config.filter.min_score);

    Ok(())
}
