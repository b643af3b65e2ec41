//! Bulk import of comma-separated game lines
//!
//! Each non-blank line holds `id,title,genre,year,price,rating`. Lines are
//! processed independently: a bad line (including one that is not valid UTF-8)
//! is recorded in the report and the import moves on. Only a backend or read
//! failure stops the import.

use crate::{CatalogError, Field, GameDetails, GameId, GameRecord, GameStore, ValidationError};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

const FIELD_COUNT: usize = 6;

/// Why a line was not imported
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// The line could not be parsed or broke a field bound
    Invalid(ValidationError),
    /// The identifier is already in the store
    Duplicate(GameId),
}

impl RejectReason {
    /// Short reason tag for reports
    pub fn tag(&self) -> &'static str {
        match self {
            RejectReason::Invalid(err) => err.tag(),
            RejectReason::Duplicate(_) => "duplicate",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Invalid(err) => write!(f, "{}", err),
            RejectReason::Duplicate(id) => write!(f, "duplicate ID {}", id),
        }
    }
}

/// A line that was skipped during import
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedLine {
    /// 1-based position in the input
    pub line_number: usize,
    pub line: String,
    pub reason: RejectReason,
}

/// Result of an import
#[derive(Debug, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub rejected: Vec<RejectedLine>,
}

impl ImportReport {
    /// True when every non-blank line was imported
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

fn parse_number<T: FromStr>(field: Field, value: &str) -> Result<T, ValidationError> {
    value.parse().map_err(|_| ValidationError::Unparsable {
        field,
        value: value.to_string(),
    })
}

/// Parse one line into a validated record
///
/// Fields are trimmed before parsing. The first problem found is returned.
pub fn parse_line(line: &str) -> Result<GameRecord, ValidationError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(ValidationError::FieldCount {
            expected: FIELD_COUNT,
            found: parts.len(),
        });
    }

    // Type errors take precedence over range errors
    let id: GameId = parse_number(Field::Id, parts[0])?;
    let release_year: i32 = parse_number(Field::ReleaseYear, parts[3])?;
    let price: f64 = parse_number(Field::Price, parts[4])?;
    let rating: f64 = parse_number(Field::Rating, parts[5])?;

    GameRecord::new(
        id,
        GameDetails::new(parts[1], parts[2], release_year, price, rating),
    )
}

/// Import a sequence of lines into the store
pub fn import_lines<S, I, L>(store: &mut S, lines: I) -> Result<ImportReport, CatalogError>
where
    S: GameStore + ?Sized,
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut report = ImportReport::default();

    for (index, line) in lines.into_iter().enumerate() {
        import_line(store, index + 1, line.as_ref(), &mut report)?;
    }

    log_summary(&report);
    Ok(report)
}

/// Import every line of a reader into the store
pub fn import_reader<S, R>(store: &mut S, mut reader: R) -> Result<ImportReport, CatalogError>
where
    S: GameStore + ?Sized,
    R: BufRead,
{
    let mut report = ImportReport::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }

        match std::str::from_utf8(&buf) {
            Ok(line) => import_line(store, line_number, line, &mut report)?,
            Err(_) => reject(
                &mut report,
                line_number,
                &String::from_utf8_lossy(&buf),
                RejectReason::Invalid(ValidationError::NotUtf8),
            ),
        }
    }

    log_summary(&report);
    Ok(report)
}

/// Import a text file into the store
pub fn import_file<S>(store: &mut S, path: &Path) -> Result<ImportReport, CatalogError>
where
    S: GameStore + ?Sized,
{
    tracing::info!("Importing games from {}", path.display());
    let file = File::open(path)?;
    import_reader(store, BufReader::new(file))
}

fn import_line<S>(
    store: &mut S,
    line_number: usize,
    line: &str,
    report: &mut ImportReport,
) -> Result<(), CatalogError>
where
    S: GameStore + ?Sized,
{
    if line.trim().is_empty() {
        return Ok(());
    }

    let reason = match parse_line(line) {
        Ok(game) => {
            let id = game.id();
            if store.contains(id)? {
                RejectReason::Duplicate(id)
            } else {
                match store.create(game) {
                    Ok(()) => {
                        report.inserted += 1;
                        return Ok(());
                    }
                    Err(CatalogError::DuplicateId(id)) => RejectReason::Duplicate(id),
                    Err(err) => return Err(err),
                }
            }
        }
        Err(err) => RejectReason::Invalid(err),
    };

    reject(report, line_number, line, reason);
    Ok(())
}

fn reject(report: &mut ImportReport, line_number: usize, line: &str, reason: RejectReason) {
    tracing::debug!("Skipping line {} ({}): {}", line_number, reason, line);
    report.rejected.push(RejectedLine {
        line_number,
        line: line.to_string(),
        reason,
    });
}

fn log_summary(report: &ImportReport) {
    tracing::info!(
        inserted = report.inserted,
        rejected = report.rejected.len(),
        "Import finished"
    );
}
