//! Dataset Loader
//!
//! Reads the sales record file into a `SalesDataset`. Two layouts are
//! accepted, chosen by file extension:
//!
//! - `.csv`: header row plus one record per line
//! - anything else: JSON lines, one object per line
//!
//! Column names match the source export ("Order Date", "Sub-Category", ...).
//! Unknown columns are ignored. Text columns are kept exactly as written;
//! a missing Sales, Profit or Quantity counts as zero.

use super::error::{LoadError, LoadResult};
use super::types::{SalesDataset, SalesRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// On-disk layout of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    JsonLines,
    Csv,
}

impl DatasetFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DatasetFormat::Csv,
            _ => DatasetFormat::JsonLines,
        }
    }
}

/// A numeric or date cell before typing
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Integer(i64),
    Number(f64),
    Text(String),
    Null,
}

impl RawValue {
    /// CSV cells arrive as text; an empty cell is a missing value
    fn from_cell(cell: String) -> Self {
        if cell.is_empty() {
            RawValue::Null
        } else {
            RawValue::Text(cell)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Order Date")]
    order_date: RawValue,
    #[serde(rename = "Sales")]
    sales: RawValue,
    #[serde(rename = "Profit")]
    profit: RawValue,
    #[serde(rename = "Quantity")]
    quantity: RawValue,
    #[serde(rename = "Category", deserialize_with = "text_cell")]
    category: String,
    #[serde(rename = "Sub-Category", deserialize_with = "text_cell")]
    sub_category: String,
    #[serde(rename = "Product Name", deserialize_with = "text_cell")]
    product_name: String,
    #[serde(rename = "Region", deserialize_with = "text_cell")]
    region: String,
    #[serde(rename = "State", deserialize_with = "text_cell")]
    state: String,
    #[serde(rename = "Customer ID", deserialize_with = "text_cell")]
    customer_id: String,
}

/// CSV row with every cell taken verbatim
///
/// The csv deserializer guesses a type for untyped cells, which would turn
/// "00123" into 123. Plain `String` fields bypass the guess.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Order Date")]
    order_date: String,
    #[serde(rename = "Sales")]
    sales: String,
    #[serde(rename = "Profit")]
    profit: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Sub-Category")]
    sub_category: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
}

impl From<CsvRecord> for RawRecord {
    fn from(row: CsvRecord) -> Self {
        Self {
            order_date: RawValue::from_cell(row.order_date),
            sales: RawValue::from_cell(row.sales),
            profit: RawValue::from_cell(row.profit),
            quantity: RawValue::from_cell(row.quantity),
            category: row.category,
            sub_category: row.sub_category,
            product_name: row.product_name,
            region: row.region,
            state: row.state,
            customer_id: row.customer_id,
        }
    }
}

/// Text column from a JSON scalar. Integers keep every digit.
fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

impl TryFrom<RawRecord> for SalesRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(SalesRecord {
            order_date: to_date(&raw.order_date)?,
            sales: to_amount(&raw.sales, "Sales")?,
            profit: to_amount(&raw.profit, "Profit")?,
            quantity: to_quantity(&raw.quantity)?,
            category: raw.category,
            sub_category: raw.sub_category,
            product_name: raw.product_name,
            region: raw.region,
            state: raw.state,
            customer_id: raw.customer_id,
        })
    }
}

/// Load a dataset file, picking the layout from its extension
pub fn load_dataset(path: &Path) -> LoadResult<SalesDataset> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;

    let records = match DatasetFormat::from_path(path) {
        DatasetFormat::JsonLines => parse_json_lines(BufReader::new(file))?,
        DatasetFormat::Csv => parse_csv(file)?,
    };

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Loaded sales dataset"
    );

    Ok(SalesDataset::new(records))
}

/// Parse JSON lines. Blank lines are skipped; any bad line fails the load.
pub fn parse_json_lines<R: BufRead>(reader: R) -> LoadResult<Vec<SalesRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| LoadError::parse(line_num, e.to_string()))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let raw: RawRecord =
            serde_json::from_str(line).map_err(|e| LoadError::parse(line_num, e.to_string()))?;
        let record = SalesRecord::try_from(raw).map_err(|e| LoadError::parse(line_num, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Parse CSV with a header row
///
/// Reader failures (bad UTF-8, I/O) surface as `LoadError::Csv`; a row that
/// does not fit the columns is a `Parse` error at the line the row starts on.
pub fn parse_csv<R: Read>(reader: R) -> LoadResult<Vec<SalesRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut row = csv::StringRecord::new();
    let mut records = Vec::new();

    while reader.read_record(&mut row)? {
        let line_num = row.position().map_or(0, |pos| pos.line() as usize);

        let raw: CsvRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| LoadError::parse(line_num, e.to_string()))?;
        let record = SalesRecord::try_from(RawRecord::from(raw))
            .map_err(|e| LoadError::parse(line_num, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Parse an order date string
///
/// Time-of-day components are accepted and dropped. Slash dates are read
/// month-first; day-first is only tried when that fails.
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%m/%d/%Y %H:%M",
    ];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

fn to_date(value: &RawValue) -> Result<NaiveDate, String> {
    match value {
        RawValue::Text(s) => {
            parse_order_date(s).ok_or_else(|| format!("Could not parse Order Date: {}", s))
        }
        // Epoch milliseconds, as written by dataframe exports
        RawValue::Integer(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| format!("Order Date out of range: {}", ms)),
        RawValue::Number(ms) if ms.fract() == 0.0 && ms.abs() < i64::MAX as f64 => {
            DateTime::from_timestamp_millis(*ms as i64)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| format!("Order Date out of range: {}", ms))
        }
        RawValue::Number(n) => Err(format!("Could not parse Order Date: {}", n)),
        RawValue::Null => Err("Order Date is missing".to_string()),
    }
}

fn to_amount(value: &RawValue, column: &str) -> Result<f64, String> {
    match value {
        RawValue::Integer(n) => Ok(*n as f64),
        RawValue::Number(n) => Ok(*n),
        RawValue::Text(s) if s.trim().is_empty() => Ok(0.0),
        RawValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{} is not a number: {}", column, s)),
        RawValue::Null => Ok(0.0),
    }
}

fn to_quantity(value: &RawValue) -> Result<i64, String> {
    let n = match value {
        RawValue::Integer(n) => return Ok(*n),
        RawValue::Text(s) => match s.trim().parse::<i64>() {
            Ok(n) => return Ok(n),
            Err(_) => to_amount(value, "Quantity")?,
        },
        _ => to_amount(value, "Quantity")?,
    };

    if n.fract() != 0.0 {
        return Err(format!("Quantity is not an integer: {}", n));
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if n < i64::MIN as f64 || n >= i64::MAX as f64 {
        return Err(format!("Quantity out of range: {}", n));
    }
    Ok(n as i64)
}
