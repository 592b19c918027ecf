use crate::error::ExchangeError;
use media_shelf_models::{MediaFields, MediaItem, MediaType, ModelError, Rating};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// File formats for moving a collection in and out of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeFormat {
    Json,
    Csv,
}

/// Parsed import file: the rows that can become new items, plus the rows that
/// could not and why.
#[derive(Debug, Default, PartialEq)]
pub struct ImportBatch {
    pub fields: Vec<MediaFields>,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based line (CSV) or array position (JSON)
    pub position: u64,
    pub reason: String,
}

const CSV_REQUIRED_COLUMNS: [&str; 3] = ["type", "title", "rating"];

#[derive(Debug, Serialize)]
struct CsvExportRow<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    media_type: MediaType,
    title: &'a str,
    creator: Option<&'a str>,
    rating: u8,
    review: Option<&'a str>,
    #[serde(rename = "dateAdded")]
    date_added: String,
}

#[derive(Debug, Deserialize)]
struct CsvImportRow {
    #[serde(rename = "type")]
    media_type: String,
    title: String,
    #[serde(default)]
    creator: Option<String>,
    rating: String,
    #[serde(default)]
    review: Option<String>,
}

impl ExchangeFormat {
    /// Guess the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExchangeFormat::Csv,
            _ => ExchangeFormat::Json,
        }
    }
}

impl fmt::Display for ExchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeFormat::Json => f.write_str("json"),
            ExchangeFormat::Csv => f.write_str("csv"),
        }
    }
}

impl FromStr for ExchangeFormat {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExchangeFormat::Json),
            "csv" => Ok(ExchangeFormat::Csv),
            _ => Err(ExchangeError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serialize the full collection. JSON output uses the same shape as the
/// persisted library value.
pub fn export_items(items: &[MediaItem], format: ExchangeFormat) -> Result<String, ExchangeError> {
    debug!("Exporting {} items as {}", items.len(), format);
    match format {
        ExchangeFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        ExchangeFormat::Csv => export_csv(items),
    }
}

fn export_csv(items: &[MediaItem]) -> Result<String, ExchangeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for item in items {
        writer.serialize(CsvExportRow {
            id: &item.id,
            media_type: item.media_type,
            title: &item.title,
            creator: item.creator.as_deref(),
            rating: item.rating.value(),
            review: item.review.as_deref(),
            date_added: item.date_added.to_rfc3339(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExchangeError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse an import file into creatable field sets.
///
/// Structural problems (not JSON at all, CSV without the required columns)
/// fail the whole import. Individual bad rows are collected in
/// [`ImportBatch::rejected`] and the rest still import.
pub fn parse_import(text: &str, format: ExchangeFormat) -> Result<ImportBatch, ExchangeError> {
    let batch = match format {
        ExchangeFormat::Json => parse_json(text)?,
        ExchangeFormat::Csv => parse_csv(text)?,
    };
    if !batch.rejected.is_empty() {
        warn!(
            "Import: {} rows accepted, {} rejected",
            batch.fields.len(),
            batch.rejected.len()
        );
    }
    Ok(batch)
}

fn parse_json(text: &str) -> Result<ImportBatch, ExchangeError> {
    // Accepts exported MediaItem objects as well as bare field sets; id and
    // dateAdded are ignored because imports always get fresh ones.
    let values: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut batch = ImportBatch::default();

    for (index, value) in values.into_iter().enumerate() {
        let position = index as u64 + 1;
        match serde_json::from_value::<MediaFields>(value) {
            Ok(fields) => accept(&mut batch, position, fields.normalized()),
            Err(e) => batch.rejected.push(RejectedRow {
                position,
                reason: e.to_string(),
            }),
        }
    }
    Ok(batch)
}

fn parse_csv(text: &str) -> Result<ImportBatch, ExchangeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in CSV_REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ExchangeError::MissingColumn(column.to_string()));
        }
    }

    let mut batch = ImportBatch::default();
    for record in reader.records() {
        let record = record?;
        let position = record.position().map(|p| p.line()).unwrap_or(0);

        let row: CsvImportRow = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                batch.rejected.push(RejectedRow {
                    position,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match fields_from_csv(row) {
            Ok(fields) => accept(&mut batch, position, fields.normalized()),
            Err(e) => batch.rejected.push(RejectedRow {
                position,
                reason: e.to_string(),
            }),
        }
    }
    Ok(batch)
}

fn fields_from_csv(row: CsvImportRow) -> Result<MediaFields, ModelError> {
    Ok(MediaFields {
        media_type: row.media_type.parse()?,
        title: row.title,
        creator: row.creator,
        rating: row.rating.parse::<Rating>()?,
        review: row.review,
    })
}

fn accept(batch: &mut ImportBatch, position: u64, fields: MediaFields) {
    match fields.validate() {
        Ok(()) => batch.fields.push(fields),
        Err(e) => batch.rejected.push(RejectedRow {
            position,
            reason: e.to_string(),
        }),
    }
}
