// Library exports for ash-scan
pub mod alphabet;
pub mod batch;
pub mod config;
pub mod fasta;
pub mod hydropathy;
pub mod matcher;
pub mod report;
pub mod scan;

pub use scan::{ScanError, ScanResult, WindowScanner};
