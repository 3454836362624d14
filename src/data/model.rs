use std::collections::BTreeMap;
use std::fmt;

/// Column holding the value plotted on the x axis.
pub const LATITUDE: &str = "Latitude";
/// Column holding the value plotted on the y axis.
pub const LONGITUDE: &str = "Longitude";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the location table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, typed per column by the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
}

impl CellValue {
    /// Numeric view of the cell. Integers widen; text, bools and nulls are `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One row of the location table: column name → value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.get(LATITUDE).and_then(CellValue::as_f64)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.get(LONGITUDE).and_then(CellValue::as_f64)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Record {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// LocationTable – the loaded (or filtered) table
// ---------------------------------------------------------------------------

/// An ordered set of records sharing one column set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationTable {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Rows in file order.
    pub records: Vec<Record>,
}

impl LocationTable {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        LocationTable { columns, records }
    }

    /// Same columns, different rows. Used by the filter to keep the table shape.
    pub fn with_records(&self, records: Vec<Record>) -> Self {
        LocationTable {
            columns: self.columns.clone(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(latitude, longitude)` of every row where both are numeric.
    pub fn coordinates(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.records
            .iter()
            .filter_map(|r| Some((r.latitude()?, r.longitude()?)))
    }
}

// ---------------------------------------------------------------------------
// BoundingBox – the lat/lon window
// ---------------------------------------------------------------------------

/// Inclusive latitude/longitude window.
///
/// The fields are public so a caller can build any box; [`BoundingBox::is_valid`]
/// decides whether it may be used. NaN bounds are never valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        BoundingBox {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Both ranges strictly increasing.
    pub fn is_valid(&self) -> bool {
        self.lat_min < self.lat_max && self.lon_min < self.lon_max
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat [{}, {}], lon [{}, {}]",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        )
    }
}
