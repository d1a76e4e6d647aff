use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{LaunchDataset, LaunchRecord, Outcome};
use crate::error::{LoadError, LoadResult};

// Column names of the launch table.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version";
pub const COL_FLIGHT: &str = "Flight Number";
pub const COL_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four required columns
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 500, ... }, ...]`
/// * `.parquet` – same column names, numeric or string typed
///
/// Extra columns are ignored.
pub fn load_file(path: &Path) -> LoadResult<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    Ok(LaunchDataset::from_records(records))
}

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell decoding shared by every format
// ---------------------------------------------------------------------------

/// One raw table cell before it is checked against the launch schema.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
            Cell::Null => true,
        }
    }

    fn raw(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(v) => v.to_string(),
            Cell::Null => String::new(),
        }
    }
}

fn invalid(row: usize, column: &'static str, cell: &Cell, reason: &'static str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column,
        value: cell.raw(),
        reason,
    }
}

fn number(row: usize, column: &'static str, cell: &Cell) -> LoadResult<f64> {
    let value = match cell {
        Cell::Number(v) => *v,
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(row, column, cell, "not a number"))?,
        Cell::Null => return Err(invalid(row, column, cell, "missing value")),
    };
    if !value.is_finite() {
        return Err(invalid(row, column, cell, "not a finite number"));
    }
    Ok(value)
}

fn text(row: usize, column: &'static str, cell: &Cell) -> LoadResult<String> {
    if cell.is_blank() {
        return Err(invalid(row, column, cell, "missing value"));
    }
    Ok(cell.raw().trim().to_string())
}

/// Turn one row into a [`LaunchRecord`].
///
/// `cell` returns `None` when the column does not exist in the source at all.
fn build_record<F>(row: usize, mut cell: F) -> LoadResult<LaunchRecord>
where
    F: FnMut(&'static str) -> Option<Cell>,
{
    let mut required = |column: &'static str| cell(column).ok_or(LoadError::MissingColumn(column));

    let site = required(COL_SITE)?;
    let payload = required(COL_PAYLOAD)?;
    let class = required(COL_CLASS)?;
    let booster = required(COL_BOOSTER)?;

    let payload_mass_kg = number(row, COL_PAYLOAD, &payload)?;
    if payload_mass_kg < 0.0 {
        return Err(invalid(row, COL_PAYLOAD, &payload, "negative payload mass"));
    }
    let outcome = Outcome::from_class(number(row, COL_CLASS, &class)?)
        .ok_or_else(|| invalid(row, COL_CLASS, &class, "class must be 0 or 1"))?;

    let flight_number = match cell(COL_FLIGHT) {
        Some(c) if !c.is_blank() => {
            let n = number(row, COL_FLIGHT, &c)?;
            if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
                return Err(invalid(row, COL_FLIGHT, &c, "not a flight number"));
            }
            Some(n as u32)
        }
        _ => None,
    };
    let booster_category = match cell(COL_CATEGORY) {
        Some(c) if !c.is_blank() => Some(text(row, COL_CATEGORY, &c)?),
        _ => None,
    };

    Ok(LaunchRecord {
        flight_number,
        launch_site: text(row, COL_SITE, &site)?,
        payload_mass_kg,
        outcome,
        booster_version: text(row, COL_BOOSTER, &booster)?,
        booster_category,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// A leading unnamed index column (as written by `DataFrame.to_csv`) is fine.
fn load_csv(path: &Path) -> LoadResult<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for column in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER] {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let record = build_record(i + 1, |column| {
            let idx = headers.iter().position(|h| h == column)?;
            Some(Cell::Text(row.get(idx).unwrap_or("").to_string()))
        })?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "class": 1, "Booster Version": "F9 v1.0  B0007" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> LoadResult<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::JsonShape("expected a top-level array".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(i, value)| {
            let obj = value
                .as_object()
                .ok_or_else(|| LoadError::JsonShape(format!("row {} is not an object", i + 1)))?;
            build_record(i + 1, |column| obj.get(column).map(json_cell))
        })
        .collect()
}

fn json_cell(value: &JsonValue) -> Cell {
    match value {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(n.to_string())),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the launch columns.
///
/// Numeric columns may be any integer or float type, or text parsed the same
/// way as CSV cells. Text columns may be Utf8, LargeUtf8 or Utf8View.
fn load_parquet(path: &Path) -> LoadResult<Vec<LaunchRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = builder.schema().clone();
    for column in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER] {
        if schema.index_of(column).is_err() {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch in reader {
        let batch = batch?;
        let columns = ParquetColumns::from_batch(&batch)?;
        for r in 0..batch.num_rows() {
            let row = records.len() + 1;
            records.push(build_record(row, |column| columns.cell(column, r))?);
        }
    }

    Ok(records)
}

/// The launch columns of one record batch, cast to decodable types.
struct ParquetColumns {
    columns: Vec<(&'static str, ArrayRef)>,
}

impl ParquetColumns {
    fn from_batch(batch: &RecordBatch) -> LoadResult<Self> {
        let wanted = [
            (COL_SITE, DataType::Utf8),
            (COL_PAYLOAD, DataType::Float64),
            (COL_CLASS, DataType::Float64),
            (COL_BOOSTER, DataType::Utf8),
            (COL_FLIGHT, DataType::Float64),
            (COL_CATEGORY, DataType::Utf8),
        ];

        let mut columns = Vec::with_capacity(wanted.len());
        for (name, ty) in wanted {
            if let Some(array) = batch.column_by_name(name) {
                // Text stays text so an unparsable number is reported as written.
                let target = match array.data_type() {
                    DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => DataType::Utf8,
                    _ => ty,
                };
                columns.push((name, cast(array.as_ref(), &target)?));
            }
        }
        Ok(Self { columns })
    }

    fn cell(&self, column: &'static str, row: usize) -> Option<Cell> {
        let (_, array) = self.columns.iter().find(|(name, _)| *name == column)?;
        if array.is_null(row) {
            return Some(Cell::Null);
        }
        Some(match array.data_type() {
            DataType::Float64 => Cell::Number(array.as_primitive::<Float64Type>().value(row)),
            _ => Cell::Text(array.as_string::<i32>().value(row).to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const CSV_OK: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,4,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
4,5,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn loads_csv_with_optional_columns() {
        let file = write_temp(".csv", CSV_OK);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 5);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds, Some((0.0, 2490.0)));

        let last = &ds.records[4];
        assert_eq!(last.flight_number, Some(5));
        assert_eq!(last.outcome, Outcome::Success);
        assert_eq!(last.booster_version, "F9 FT B1031.1");
        assert_eq!(last.booster_category.as_deref(), Some("FT"));
    }

    #[test]
    fn loads_bundled_dataset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("spacex_launch_dash.csv");
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 56);
        assert_eq!(
            ds.sites,
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(ds.payload_bounds, Some((0.0, 9600.0)));
        assert!(ds.records.iter().all(|r| r.flight_number.is_some()));
    }

    #[test]
    fn loads_minimal_csv() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version\nSiteA,500,1,v1.0\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].flight_number, None);
        assert_eq!(ds.records[0].booster_category, None);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_temp(".csv", "Launch Site,class,Booster Version\nSiteA,1,v1.0\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_PAYLOAD)));
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn missing_column_is_fatal_even_without_rows() {
        let file = write_temp(".csv", "Launch Site,Payload Mass (kg),Booster Version\n");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn(COL_CLASS))
        ));
    }

    #[test]
    fn malformed_values_are_fatal() {
        let negative = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version\nSiteA,-5,1,v1.0\n",
        );
        match load_file(negative.path()) {
            Err(LoadError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, COL_PAYLOAD);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let bad_class = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version\nSiteA,5,1,v1.0\nSiteA,5,3,v1.0\n",
        );
        match load_file(bad_class.path()) {
            Err(LoadError::InvalidValue { row, column, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, COL_CLASS);
                assert_eq!(value, "3");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let text_payload = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version\nSiteA,heavy,1,v1.0\n",
        );
        assert!(matches!(
            load_file(text_payload.path()),
            Err(LoadError::InvalidValue { column: COL_PAYLOAD, .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_records_oriented_json() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "SiteA", "Payload Mass (kg)": 500, "class": 1, "Booster Version": "v1.0", "Flight Number": 7},
                {"Launch Site": "SiteB", "Payload Mass (kg)": "1500.5", "class": 0, "Booster Version": "v1.1"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flight_number, Some(7));
        assert_eq!(ds.records[1].payload_mass_kg, 1500.5);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_row_missing_column() {
        let file = write_temp(
            ".json",
            r#"[{"Launch Site": "SiteA", "class": 1, "Booster Version": "v1.0"}]"#,
        );
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn(COL_PAYLOAD))
        ));
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_temp(".json", r#"{"Launch Site": "SiteA"}"#);
        assert!(matches!(load_file(file.path()), Err(LoadError::JsonShape(_))));
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn batch(fields: Vec<Field>, columns: Vec<ArrayRef>) -> RecordBatch {
        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
    }

    #[test]
    fn loads_parquet_with_integer_columns() {
        let file = write_parquet(&batch(
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Float64, false),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
            ],
            vec![
                Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                Arc::new(Float64Array::from(vec![500.0, 9600.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1.0", "B5"])),
            ],
        ));

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites, vec!["SiteA", "SiteB"]);
        assert_eq!(ds.records[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn parquet_missing_column_is_fatal() {
        let file = write_parquet(&batch(
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Float64, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
            ],
            vec![
                Arc::new(StringArray::from(vec!["SiteA"])),
                Arc::new(Float64Array::from(vec![500.0])),
                Arc::new(StringArray::from(vec!["v1.0"])),
            ],
        ));
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_CLASS)));
        assert!(err.to_string().contains("'class'"));
    }

    #[test]
    fn parquet_null_in_required_column_is_fatal() {
        let file = write_parquet(&batch(
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Float64, true),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
            ],
            vec![
                Arc::new(StringArray::from(vec!["SiteA", "SiteB"])),
                Arc::new(Float64Array::from(vec![Some(500.0), None])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1.0", "B5"])),
            ],
        ));
        match load_file(file.path()) {
            Err(LoadError::InvalidValue { row, column, reason, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(column, COL_PAYLOAD);
                assert_eq!(reason, "missing value");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn parquet_text_numbers_are_parsed_and_reported_as_written() {
        let fields = || {
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Utf8, false),
                Field::new(COL_CLASS, DataType::Utf8, false),
                Field::new(COL_BOOSTER, DataType::Utf8, false),
            ]
        };

        let good = write_parquet(&batch(
            fields(),
            vec![
                Arc::new(StringArray::from(vec!["SiteA"])),
                Arc::new(StringArray::from(vec!["1500.5"])),
                Arc::new(StringArray::from(vec!["1"])),
                Arc::new(StringArray::from(vec!["v1.0"])),
            ],
        ));
        let ds = load_file(good.path()).unwrap();
        assert_eq!(ds.records[0].payload_mass_kg, 1500.5);
        assert_eq!(ds.records[0].outcome, Outcome::Success);

        let bad = write_parquet(&batch(
            fields(),
            vec![
                Arc::new(StringArray::from(vec!["SiteA"])),
                Arc::new(StringArray::from(vec!["heavy"])),
                Arc::new(StringArray::from(vec!["1"])),
                Arc::new(StringArray::from(vec!["v1.0"])),
            ],
        ));
        let err = load_file(bad.path()).unwrap_err();
        match &err {
            LoadError::InvalidValue { row, column, value, reason } => {
                assert_eq!(*row, 1);
                assert_eq!(*column, COL_PAYLOAD);
                assert_eq!(value, "heavy");
                assert_eq!(*reason, "not a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("not a number (got 'heavy')"));
    }
}
