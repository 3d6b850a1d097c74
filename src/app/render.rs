use crate::config::OutputFormat;
use crate::domain::model::{City, Resort, SearchResult};
use crate::utils::error::{AppError, Result};
use serde::Serialize;

pub const NO_RESULTS: &str = "(sin resultados)";

/// Rows that can be written as CSV. `COLUMNS` is the header, in serde field
/// order, so an empty result still gets one.
pub trait CsvRecord: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl CsvRecord for SearchResult {
    const COLUMNS: &'static [&'static str] = &[
        "id_balneario",
        "nombre",
        "direccion",
        "telefono",
        "imagen",
        "ciudad",
        "ciudad_img",
    ];
}

impl CsvRecord for Resort {
    const COLUMNS: &'static [&'static str] = &[
        "id_balneario",
        "nombre",
        "direccion",
        "telefono",
        "imagen",
        "id_ciudad",
    ];
}

impl CsvRecord for City {
    const COLUMNS: &'static [&'static str] = &["id_ciudad", "nombre", "img"];
}

/// Renders records as text lines, pretty JSON or CSV with a header row.
pub fn render<T: CsvRecord>(
    items: &[T],
    format: OutputFormat,
    line: impl Fn(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Table if items.is_empty() => Ok(NO_RESULTS.to_string()),
        OutputFormat::Table => Ok(crate::agent::format::lines(items, line)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => to_csv(items),
    }
}

fn to_csv<T: CsvRecord>(items: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if items.is_empty() {
        writer.write_record(T::COLUMNS)?;
    }
    for item in items {
        writer.serialize(item)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}
