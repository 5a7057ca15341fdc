//! Persistence codec.
//!
//! ## Table Format
//!
//! | Column | Content |
//! |--------|---------|
//! | `operation` | operation name |
//! | `a` | first operand |
//! | `b` | second operand |
//! | `result` | computed result |
//! | `timestamp` | ISO-8601 / RFC 3339, UTC |
//!
//! Numbers are written in Rust's shortest round-trip form, so a value read
//! back is bit-identical to the one written. Timestamps keep full
//! sub-second precision.
//!
//! On read, columns are located by header name; extra columns are ignored.
//! A single bad row fails the whole load.

use std::num::NonZeroUsize;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tally_core::{Calculation, Error, Result, ValidationError};
use tally_storage::History;
use tracing::warn;

/// Column names, in write order.
pub const COLUMNS: [&str; 5] = ["operation", "a", "b", "result", "timestamp"];

/// Naive timestamp layouts accepted on read (interpreted as UTC).
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One persisted calculation, as text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Operation name
    pub operation: String,
    /// First operand
    pub a: String,
    /// Second operand
    pub b: String,
    /// Result
    pub result: String,
    /// Creation time
    pub timestamp: String,
}

impl HistoryRow {
    /// Encode a calculation.
    pub fn from_calculation(calc: &Calculation) -> Self {
        Self {
            operation: calc.operation().to_string(),
            a: calc.a().to_string(),
            b: calc.b().to_string(),
            result: calc.result().to_string(),
            timestamp: calc
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    /// Decode into a calculation. `row` is the 1-based data row number used
    /// in error messages.
    pub fn to_calculation(&self, row: usize) -> std::result::Result<Calculation, ValidationError> {
        if self.operation.trim().is_empty() {
            return Err(malformed(row, "operation is empty"));
        }
        let a = parse_number(row, "a", &self.a)?;
        let b = parse_number(row, "b", &self.b)?;
        let result = parse_number(row, "result", &self.result)?;
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or_else(|| malformed(row, format!("unparseable timestamp '{}'", self.timestamp)))?;
        Ok(Calculation::new(
            self.operation.trim(),
            a,
            b,
            result,
            timestamp,
        ))
    }

    fn cells(&self) -> [&str; 5] {
        [
            self.operation.as_str(),
            self.a.as_str(),
            self.b.as_str(),
            self.result.as_str(),
            self.timestamp.as_str(),
        ]
    }
}

/// One row per live record, oldest first.
pub fn serialize(history: &History) -> Vec<HistoryRow> {
    history
        .items()
        .iter()
        .map(HistoryRow::from_calculation)
        .collect()
}

/// Rebuild a history from rows.
///
/// The history is assigned directly: no undo snapshots are recorded. When
/// there are more rows than `max_size`, the oldest rows are dropped.
///
/// # Errors
///
/// `Validation(MalformedRow)` for the first row that fails to parse.
pub fn deserialize(rows: &[HistoryRow], max_size: NonZeroUsize) -> Result<History> {
    let items = rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.to_calculation(i + 1))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if items.len() > max_size.get() {
        warn!(
            rows = items.len(),
            max_size = max_size.get(),
            "history file exceeds max size; keeping newest rows"
        );
    }
    Ok(History::from_items(items, max_size))
}

/// Render rows as CSV text with a header line.
pub fn encode_csv(rows: &[HistoryRow]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(COLUMNS).map_err(storage_error)?;
    for row in rows {
        writer.write_record(row.cells()).map_err(storage_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Storage(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Storage(e.to_string()))
}

/// Parse CSV text into rows.
///
/// Empty input yields no rows.
///
/// # Errors
///
/// - `Validation(MissingColumn)` if a required header is absent
/// - `Validation(MalformedRow)` if a record cannot be read
pub fn decode_csv(text: &str) -> Result<Vec<HistoryRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(storage_error)?.clone();
    if headers.iter().all(str::is_empty) {
        return Ok(Vec::new());
    }
    let index = column_indices(&headers)?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| malformed(row, e.to_string()))?;
        let cell = |col: usize| -> std::result::Result<String, ValidationError> {
            record
                .get(index[col])
                .map(str::to_string)
                .ok_or_else(|| malformed(row, format!("missing value for '{}'", COLUMNS[col])))
        };
        rows.push(HistoryRow {
            operation: cell(0)?,
            a: cell(1)?,
            b: cell(2)?,
            result: cell(3)?,
            timestamp: cell(4)?,
        });
    }
    Ok(rows)
}

fn column_indices(headers: &StringRecord) -> std::result::Result<[usize; 5], ValidationError> {
    let mut index = [0usize; 5];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or(ValidationError::MissingColumn { column })?;
    }
    Ok(index)
}

fn parse_number(
    row: usize,
    column: &str,
    text: &str,
) -> std::result::Result<f64, ValidationError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| malformed(row, format!("{} is not numeric: '{}'", column, text)))?;
    if !value.is_finite() {
        return Err(malformed(row, format!("{} is not finite: '{}'", column, text)));
    }
    Ok(value)
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn malformed(row: usize, reason: impl Into<String>) -> ValidationError {
    ValidationError::MalformedRow {
        row,
        reason: reason.into(),
    }
}

fn storage_error(e: csv::Error) -> Error {
    Error::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sample_history() -> History {
        let mut h = History::new(size(10));
        h.add(Calculation::new("add", 1.0, 2.0, 3.0, Utc::now()));
        h.add(Calculation::new("divide", 1.0, 3.0, 1.0 / 3.0, Utc::now()));
        h.add(Calculation::new("power", 1e-7, 2.5, 1e-7f64.powf(2.5), Utc::now()));
        h
    }

    fn row(a: &str, timestamp: &str) -> HistoryRow {
        HistoryRow {
            operation: "add".into(),
            a: a.into(),
            b: "1".into(),
            result: "2".into(),
            timestamp: timestamp.into(),
        }
    }

    #[test]
    fn test_round_trip_is_field_for_field() {
        let h = sample_history();
        let text = encode_csv(&serialize(&h)).unwrap();
        let loaded = deserialize(&decode_csv(&text).unwrap(), size(10)).unwrap();
        assert_eq!(loaded.items(), h.items());
    }

    #[test]
    fn test_deserialize_records_no_undo() {
        let rows = serialize(&sample_history());
        let loaded = deserialize(&rows, size(10)).unwrap();
        assert_eq!(loaded.len(), 3);
        assert!(!loaded.can_undo());
    }

    #[test]
    fn test_deserialize_truncates_to_newest() {
        let rows = serialize(&sample_history());
        let loaded = deserialize(&rows, size(2)).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.items()[0].operation(), "divide");
        assert_eq!(loaded.items()[1].operation(), "power");
    }

    #[test]
    fn test_header_written_for_empty_history() {
        let text = encode_csv(&[]).unwrap();
        assert_eq!(text.trim(), "operation,a,b,result,timestamp");
        assert!(decode_csv(&text).unwrap().is_empty());
    }

    #[test]
    fn test_empty_text_yields_no_rows() {
        assert!(decode_csv("").unwrap().is_empty());
    }

    #[test]
    fn test_columns_found_by_name() {
        let text = "timestamp,result,b,a,operation,extra\n\
                    2024-03-01T10:00:00Z,6,3,3,add,x\n";
        let rows = decode_csv(text).unwrap();
        let calc = rows[0].to_calculation(1).unwrap();
        assert_eq!(calc.operation(), "add");
        assert_eq!(calc.a(), 3.0);
        assert_eq!(calc.result(), 6.0);
    }

    #[test]
    fn test_missing_column() {
        let err = decode_csv("operation,a,b,result\nadd,1,1,2\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingColumn {
                column: "timestamp"
            })
        ));
    }

    #[test]
    fn test_non_numeric_operand_fails_whole_load() {
        let rows = vec![row("1", "2024-03-01T10:00:00Z"), row("one", "2024-03-01T10:00:00Z")];
        match deserialize(&rows, size(10)) {
            Err(Error::Validation(ValidationError::MalformedRow { row, reason })) => {
                assert_eq!(row, 2);
                assert!(reason.contains("a is not numeric"));
            }
            other => panic!("expected MalformedRow, got {:?}", other.map(|h| h.len())),
        }
    }

    #[test]
    fn test_bad_timestamp_fails() {
        let err = deserialize(&[row("1", "yesterday")], size(10)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_naive_iso_timestamps_are_utc() {
        let calc = row("1", "2024-03-01T10:20:30.123456")
            .to_calculation(1)
            .unwrap();
        let ts = calc.timestamp();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 1));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (10, 20, 30));
        assert_eq!(ts.nanosecond(), 123_456_000);

        assert!(row("1", "2024-03-01 10:20:30").to_calculation(1).is_ok());
    }

    #[test]
    fn test_offset_timestamps_normalised() {
        let calc = row("1", "2024-03-01T12:00:00+02:00")
            .to_calculation(1)
            .unwrap();
        assert_eq!(calc.timestamp().hour(), 10);
    }

    #[test]
    fn test_ragged_record_is_malformed() {
        let err = decode_csv("operation,a,b,result,timestamp\nadd,1,1\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MalformedRow { row: 1, .. })
        ));
    }

    fn finite() -> impl Strategy<Value = f64> {
        any::<f64>().prop_filter("finite", |v| v.is_finite())
    }

    fn arb_calculation() -> impl Strategy<Value = Calculation> {
        (
            "[a-z][a-z_]{0,11}",
            finite(),
            finite(),
            finite(),
            0i64..4_000_000_000,
            0u32..1_000_000_000,
        )
            .prop_map(|(op, a, b, result, secs, nanos)| {
                let ts = Utc.timestamp_opt(secs, nanos).unwrap();
                Calculation::new(op, a, b, result, ts)
            })
    }

    proptest! {
        #[test]
        fn prop_csv_round_trip(items in prop::collection::vec(arb_calculation(), 1..20)) {
            let max = size(items.len());
            let h = History::from_items(items, max);
            let text = encode_csv(&serialize(&h)).unwrap();
            let loaded = deserialize(&decode_csv(&text).unwrap(), max).unwrap();
            prop_assert_eq!(loaded.items(), h.items());
        }
    }
}
