use std::collections::BTreeSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::LoadError;

use super::model::{CellValue, LocationTable, Record, LATITUDE, LONGITUDE};

/// Cell spellings read as a missing value in any column.
const NULL_TOKENS: &[&str] = &[
    "", "NA", "N/A", "#N/A", "NaN", "nan", "-NaN", "null", "NULL", "None",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited location table.
///
/// The first row names the columns. Every row must have as many fields as the
/// header, and the header must name both `Latitude` and `Longitude`. Values are
/// typed per column: a column is integer if every present cell parses as `i64`,
/// else float if every present cell parses as `f64`, else boolean, else text.
/// `Latitude` and `Longitude` are always float columns, parsed cell by cell: a
/// cell that is not a number stays text in that row only.
pub fn load_table(path: &Path, delimiter: u8) -> Result<LocationTable, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    check_header(path, &columns)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result.map_err(|e| csv_error(path, e))?);
    }

    let column_types: Vec<ColumnType> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if name == LATITUDE || name == LONGITUDE {
                ColumnType::Float
            } else {
                infer_column_type(rows.iter().map(|row| row.get(idx).unwrap_or("")))
            }
        })
        .collect();

    let records = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(&column_types)
                .enumerate()
                .map(|(idx, (name, ty))| {
                    (name.clone(), convert_cell(row.get(idx).unwrap_or(""), *ty))
                })
                .collect::<Record>()
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Read {} rows x {} columns from {}",
        records.len(),
        columns.len(),
        path.display()
    );

    Ok(LocationTable::new(columns, records))
}

// ---------------------------------------------------------------------------
// Header checks
// ---------------------------------------------------------------------------

fn check_header(path: &Path, columns: &[String]) -> Result<(), LoadError> {
    if columns.is_empty() {
        return Err(parse_error(path, "missing header row"));
    }

    let mut seen = BTreeSet::new();
    for col in columns {
        if !seen.insert(col.as_str()) {
            return Err(parse_error(path, format!("duplicate column '{col}'")));
        }
    }

    for required in [LATITUDE, LONGITUDE] {
        if !seen.contains(required) {
            return Err(parse_error(path, format!("missing '{required}' column")));
        }
    }
    Ok(())
}

fn parse_error(path: &Path, message: impl Into<String>) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// I/O failures stay I/O errors; everything else the reader rejects is a parse error.
fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        _ => parse_error(path, message),
    }
}

// ---------------------------------------------------------------------------
// Column typing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

fn is_null(cell: &str) -> bool {
    NULL_TOKENS.contains(&cell)
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn infer_column_type<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnType {
    let present: Vec<&str> = cells.filter(|c| !is_null(c)).collect();

    if present.iter().all(|c| c.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present.iter().all(|c| c.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if present.iter().all(|c| parse_bool(c).is_some()) {
        ColumnType::Bool
    } else {
        ColumnType::Text
    }
}

fn convert_cell(cell: &str, ty: ColumnType) -> CellValue {
    if is_null(cell) {
        return CellValue::Null;
    }
    let text = || CellValue::String(cell.to_string());
    match ty {
        ColumnType::Integer => cell.parse().map_or_else(|_| text(), CellValue::Integer),
        ColumnType::Float => cell.parse().map_or_else(|_| text(), CellValue::Float),
        ColumnType::Bool => parse_bool(cell).map_or_else(text, CellValue::Bool),
        ColumnType::Text => text(),
    }
}
