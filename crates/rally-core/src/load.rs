//! CSV dataset loading.
//!
//! Reads match rows into [`MatchRecord`]s using the header names configured
//! in [`ColumnConfig`]. Only the tournament, player, winner and date columns
//! are required; the rest are read when present.
//!
//! Values that cannot be interpreted do not fail the load:
//!
//! - an empty or unparseable date becomes `None` (the graph builder drops
//!   the row for every year),
//! - an empty, non-numeric or non-positive rank becomes `None` (the ATP
//!   dataset writes `-1` for unranked players),
//! - a blank player or winner cell is kept as an empty string, which the
//!   graph builder rejects as a data-integrity error.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{info, instrument, warn};

use crate::config::{ColumnConfig, DatasetConfig};
use crate::record::MatchRecord;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV stream is malformed.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required header is absent.
    #[error("required column '{column}' not found in header")]
    MissingColumn { column: String },

    /// The configured delimiter is not a single-byte character.
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
}

/// Date layouts accepted in the date column, tried in order.
///
/// Slash dates are read month-first; a day-first date is accepted when the
/// month-first reading is impossible (`15/01/2023`).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Timestamp layouts; only the calendar date is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Load all match records from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened, the CSV is malformed,
/// or a required column is missing.
#[instrument(skip(config))]
pub fn load_matches(path: &Path, config: &DatasetConfig) -> Result<Vec<MatchRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = load_matches_from_reader(file, config)?;
    info!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}

/// Load all match records from any CSV reader.
///
/// # Errors
///
/// Returns [`LoadError`] if the CSV is malformed or a required column is
/// missing.
pub fn load_matches_from_reader<R: Read>(
    reader: R,
    config: &DatasetConfig,
) -> Result<Vec<MatchRecord>, LoadError> {
    let delimiter = u8::try_from(config.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(LoadError::InvalidDelimiter(config.delimiter))?;

    let mut csv = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout = ColumnLayout::resolve(csv.headers()?, &config.columns)?;

    let mut records = Vec::new();
    let mut undated = 0usize;
    for row in csv.records() {
        let row = row?;
        let record = layout.record(&row);
        if record.date.is_none() {
            undated += 1;
        }
        records.push(record);
    }

    if undated > 0 {
        warn!(undated, "rows without a usable date are excluded from every graph");
    }

    Ok(records)
}

/// Parse a date cell. Returns `None` for empty or unrecognised values.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rally_core::load::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2023, 1, 15);
/// assert_eq!(parse_date("2023-01-15"), expected);
/// assert_eq!(parse_date("20230115"), expected);
/// assert_eq!(parse_date("15/01/2023"), expected);
/// assert_eq!(parse_date("1/15/2023"), expected);
/// assert_eq!(parse_date("2023-01-15 00:00:00"), expected);
/// assert_eq!(parse_date("soon"), None);
/// ```
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Parse a rank cell. Returns `None` for empty, non-numeric or non-positive
/// values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn parse_rank(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    // Some exports write ranks as floats ("12.0").
    let value = raw
        .parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.fract() == 0.0).map(|v| v as i64))?;
    u32::try_from(value).ok().filter(|&rank| rank > 0)
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Header positions of each field.
struct ColumnLayout {
    tournament: usize,
    category: Option<usize>,
    date: usize,
    player_a: usize,
    player_b: usize,
    winner: usize,
    rank_a: Option<usize>,
    rank_b: Option<usize>,
    surface: Option<usize>,
    round: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| LoadError::MissingColumn {
                column: name.to_string(),
            })
        };

        Ok(Self {
            tournament: require(columns.tournament.as_str())?,
            category: find(columns.category.as_str()),
            date: require(columns.date.as_str())?,
            player_a: require(columns.player_a.as_str())?,
            player_b: require(columns.player_b.as_str())?,
            winner: require(columns.winner.as_str())?,
            rank_a: find(columns.rank_a.as_str()),
            rank_b: find(columns.rank_b.as_str()),
            surface: find(columns.surface.as_str()),
            round: find(columns.round.as_str()),
        })
    }

    fn record(&self, row: &StringRecord) -> MatchRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        MatchRecord {
            tournament: cell(self.tournament),
            category: optional(self.category),
            player_a: cell(self.player_a),
            player_b: cell(self.player_b),
            winner: cell(self.winner),
            date: row.get(self.date).and_then(parse_date),
            rank_a: self.rank_a.and_then(|i| row.get(i)).and_then(parse_rank),
            rank_b: self.rank_b.and_then(|i| row.get(i)).and_then(parse_rank),
            surface: optional(self.surface),
            round: optional(self.round),
            line: row.position().map(csv::Position::line),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
