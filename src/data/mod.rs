//! Price universe loading.
//!
//! Reads a directory of per-symbol CSV files (columns `date` and `close`,
//! extra columns ignored) into a single forward-filled close-price matrix
//! shared by discovery and analytics. Files that cannot be used are skipped
//! with a warning rather than failing the whole load.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum rows a usable price file must contain.
const MIN_FILE_ROWS: usize = 2;

/// Date formats accepted in input files, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d-%b-%Y", "%m/%d/%Y"];

/// Errors raised while loading or slicing the price universe.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] PolarsError),

    #[error("No usable price files found in {0}")]
    NoData(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("No overlapping history for {symbol_a}/{symbol_b}")]
    EmptyOverlap { symbol_a: String, symbol_b: String },
}

/// Overlapping close-price history for a selected pair.
///
/// Rows where either leg is missing are dropped, so `price_a` and `price_b`
/// are finite and positionally aligned with `dates`.
#[derive(Debug, Clone)]
pub struct PairSeries {
    pub symbol_a: String,
    pub symbol_b: String,
    pub dates: Vec<String>,
    pub price_a: Vec<f64>,
    pub price_b: Vec<f64>,
}

impl PairSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Forward-filled close prices for every loaded symbol on a shared date axis.
///
/// `NaN` marks dates before a symbol's first observation.
#[derive(Debug, Clone)]
pub struct PriceUniverse {
    dates: Vec<NaiveDate>,
    closes: HashMap<String, Vec<f64>>,
}

impl PriceUniverse {
    /// Number of dates on the shared axis.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Loaded symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.closes.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn symbol_count(&self) -> usize {
        self.closes.len()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.closes.contains_key(symbol)
    }

    /// Forward-filled close series for one symbol, aligned to the date axis.
    pub fn series(&self, symbol: &str) -> Result<&[f64], DataError> {
        self.closes
            .get(symbol)
            .map(|v| v.as_slice())
            .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))
    }

    /// Joined history for two symbols with non-overlapping rows dropped.
    pub fn pair_series(&self, symbol_a: &str, symbol_b: &str) -> Result<PairSeries, DataError> {
        let a = self.series(symbol_a)?;
        let b = self.series(symbol_b)?;

        let mut dates = Vec::new();
        let mut price_a = Vec::new();
        let mut price_b = Vec::new();
        for (i, date) in self.dates.iter().enumerate() {
            if a[i].is_finite() && b[i].is_finite() {
                dates.push(date.format("%Y-%m-%d").to_string());
                price_a.push(a[i]);
                price_b.push(b[i]);
            }
        }

        if dates.is_empty() {
            return Err(DataError::EmptyOverlap {
                symbol_a: symbol_a.to_string(),
                symbol_b: symbol_b.to_string(),
            });
        }

        Ok(PairSeries {
            symbol_a: symbol_a.to_string(),
            symbol_b: symbol_b.to_string(),
            dates,
            price_a,
            price_b,
        })
    }
}

/// Load every `*.csv` file in `dir` into a forward-filled price universe.
///
/// # Errors
/// Returns `DataError::NoData` if no file yields a usable close series.
pub fn load_universe(dir: &Path) -> Result<PriceUniverse, DataError> {
    let mut per_symbol: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }

        match read_close_series(&path) {
            Ok((symbol, observations)) if observations.len() >= MIN_FILE_ROWS => {
                debug!(symbol = %symbol, rows = observations.len(), path = %path.display(), "Loaded price file");
                per_symbol.entry(symbol).or_default().extend(observations);
            }
            Ok((symbol, observations)) => {
                warn!(symbol = %symbol, rows = observations.len(), "Price file too short, skipping");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable price file");
            }
        }
    }

    if per_symbol.is_empty() {
        return Err(DataError::NoData(dir.display().to_string()));
    }

    // Union of all observation dates forms the shared axis.
    let axis: Vec<NaiveDate> = per_symbol
        .values()
        .flat_map(|obs| obs.keys().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut closes = HashMap::with_capacity(per_symbol.len());
    for (symbol, observations) in per_symbol {
        let mut column = Vec::with_capacity(axis.len());
        let mut last = f64::NAN;
        for date in &axis {
            if let Some(&value) = observations.get(date) {
                last = value;
            }
            column.push(last);
        }
        closes.insert(symbol, column);
    }

    Ok(PriceUniverse {
        dates: axis,
        closes,
    })
}

/// Read one price file into dated close observations.
///
/// Headers are matched case- and whitespace-insensitively; rows with an
/// unparseable date or close are dropped.
fn read_close_series(path: &Path) -> Result<(String, BTreeMap<NaiveDate, f64>), DataError> {
    let file = File::open(path)?;
    let df = CsvReader::new(file).finish()?;

    let find_column = |want: &str| {
        df.get_column_names()
            .iter()
            .find(|name| name.trim().eq_ignore_ascii_case(want))
            .map(|name| name.to_string())
    };

    let date_col = find_column("date").ok_or_else(|| missing_column(path, "date"))?;
    let close_col = find_column("close").ok_or_else(|| missing_column(path, "close"))?;

    let dates = df.column(&date_col)?.cast(&DataType::String)?;
    let dates = dates.str()?;
    let closes = parse_close_values(df.column(&close_col)?)?;

    let mut observations = BTreeMap::new();
    for (raw_date, close) in dates.into_iter().zip(closes) {
        let Some(date) = raw_date.and_then(parse_date) else {
            continue;
        };
        let Some(close) = close.filter(|c| c.is_finite()) else {
            continue;
        };
        observations.insert(date, close);
    }

    Ok((symbol_from_filename(path), observations))
}

fn missing_column(path: &Path, name: &str) -> DataError {
    DataError::Csv(PolarsError::ColumnNotFound(
        format!("{} (in {})", name, path.display()).into(),
    ))
}

/// Close values arrive either numeric or as strings with thousands commas.
fn parse_close_values(series: &Series) -> Result<Vec<Option<f64>>, DataError> {
    let values = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.and_then(|s| s.replace(',', "").trim().parse::<f64>().ok()))
            .collect(),
        _ => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect(),
    };
    Ok(values)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Symbol from the file name, stripping the vendor quote-export decoration
/// (`Quote-Equity-INFY-EQ-....csv` becomes `INFY`).
fn symbol_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let stem = stem.strip_prefix("Quote-Equity-").unwrap_or(stem);
    stem.split("-EQ").next().unwrap_or(stem).to_string()
}
