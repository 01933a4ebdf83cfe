//! CSV ingest.
//!
//! Turns the student CSV into an ordered `SampleSet` of `(hours, score)` pairs.
//!
//! Design goals:
//! - **Positional schema**: hours and score are read by column index, the
//!   header row is skipped without being interpreted
//! - **Strict rows**: the first short or non-numeric row aborts the load with
//!   its line number (exit code 2); nothing is silently skipped
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{DatasetStats, FitConfig, Sample, SampleSet};
use crate::error::AppError;

/// Ingest output: samples + stats + where they came from.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub source: String,
    pub samples: SampleSet,
    pub stats: DatasetStats,
}

/// Load `(hours, score)` samples from the configured CSV file.
pub fn load_samples(config: &FitConfig) -> Result<IngestedData, AppError> {
    let path = &config.csv_path;
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let samples = read_samples(file, config.hours_column, config.score_column)?;
    finish(path, samples)
}

fn finish(path: &Path, samples: SampleSet) -> Result<IngestedData, AppError> {
    let stats = samples
        .stats()
        .ok_or_else(|| AppError::new(3, format!("No samples found in '{}'.", path.display())))?;

    info!(
        file = %path.display(),
        rows = stats.n_points,
        hours_min = stats.hours_min,
        hours_max = stats.hours_max,
        "loaded samples"
    );

    Ok(IngestedData {
        source: path.display().to_string(),
        samples,
        stats,
    })
}

/// Parse samples from any reader; the first record is treated as the header.
pub fn read_samples<R: Read>(reader: R, hours_column: usize, score_column: usize) -> Result<SampleSet, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV header: {e}")))?
        .clone();
    debug!(
        hours = header_name(&headers, hours_column),
        score = header_name(&headers, score_column),
        "column mapping"
    );

    let mut samples = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {line}: {e}")))?;
        let hours = parse_field(&record, hours_column, line)?;
        let score = parse_field(&record, score_column, line)?;
        samples.push(Sample { hours, score });
    }

    Ok(SampleSet::new(samples))
}

fn header_name(headers: &StringRecord, idx: usize) -> &str {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header; strip it so the logged name is readable.
    headers.get(idx).map(|h| h.trim_start_matches('\u{feff}')).unwrap_or("?")
}

fn parse_field(record: &StringRecord, idx: usize, line: usize) -> Result<f64, AppError> {
    let raw = record.get(idx).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "Line {line}: expected at least {} columns, found {}.",
                idx + 1,
                record.len()
            ),
        )
    })?;

    raw.parse::<f64>()
        .map_err(|_| AppError::new(2, format!("Line {line}, column {idx}: '{raw}' is not a number.")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    const CSV: &str = "\
student_id,hours_studied,sleep_hours,attendance_percent,previous_scores,exam_score
S001,8.0,8.8,72.1,45,30.2
S002,1.3,8.6,60.7,55,25.0
S003,4.0,8.2,73.7,86,35.8
";

    #[test]
    fn reads_hours_and_score_columns_in_order() {
        let samples = read_samples(CSV.as_bytes(), 1, 5).unwrap();
        assert_eq!(samples.hours(), vec![8.0, 1.3, 4.0]);
        assert_eq!(samples.scores(), vec![30.2, 25.0, 35.8]);
    }

    #[test]
    fn short_row_reports_line_number() {
        let csv = "a,b,c,d,e,f\nS1,1,2,3,4,5\nS2,1,2\n";
        let err = read_samples(csv.as_bytes(), 1, 5).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("Line 3"), "{}", err.message());
    }

    #[test]
    fn non_numeric_value_aborts() {
        let csv = "a,b,c,d,e,f\nS1,lots,2,3,4,5\n";
        let err = read_samples(csv.as_bytes(), 1, 5).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("'lots'"), "{}", err.message());
    }

    #[test]
    fn header_only_file_has_no_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b,c,d,e,f").unwrap();

        let config = FitConfig {
            csv_path: file.path().to_path_buf(),
            ..FitConfig::default()
        };
        let err = load_samples(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn load_samples_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let config = FitConfig {
            csv_path: file.path().to_path_buf(),
            ..FitConfig::default()
        };
        let data = load_samples(&config).unwrap();
        assert_eq!(data.stats.n_points, 3);
        assert_eq!((data.stats.hours_min, data.stats.hours_max), (1.3, 8.0));
    }

    #[test]
    fn missing_file_is_input_error() {
        let config = FitConfig {
            csv_path: PathBuf::from("definitely/not/here.csv"),
            ..FitConfig::default()
        };
        assert_eq!(load_samples(&config).unwrap_err().exit_code(), 2);
    }
}
