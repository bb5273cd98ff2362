use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};
use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the customer table, flattening any failure into
/// [`ExplorerError::DataUnavailable`]. No partial dataset is ever returned.
pub fn load(path: &Path) -> Result<Dataset, ExplorerError> {
    load_file(path).map_err(|e| ExplorerError::data_unavailable(path, &e))
}

/// Load a customer table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma separated, header row
/// * `.tsv`          – tab separated, header row
/// * `.json`         – `[{ "Geography": "France", "Age": 42, ... }, ...]`
/// * `.parquet`      – flat scalar columns, as written by pandas or polars
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b','),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one customer per line. Rows with a
/// different number of fields than the header are rejected. Fields are kept
/// as raw text; only the required columns are ever parsed.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|v| CellValue::Text(v.to_string())).collect());
    }

    Dataset::from_rows(columns, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// The columns are the keys of the first record.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let columns: Vec<String> = match records.first() {
        Some(first) => first
            .as_object()
            .context("Row 0 is not a JSON object")?
            .keys()
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let extra: Vec<&str> = obj
            .keys()
            .filter(|k| !columns.contains(*k))
            .map(String::as_str)
            .collect();
        if !extra.is_empty() {
            log::warn!(
                "{}: row {i} has keys outside the first record, dropped: {}",
                path.display(),
                extra.join(", ")
            );
        }
        rows.push(
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect(),
        );
    }

    Dataset::from_rows(columns, rows)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .zip(&columns)
                .map(|(col, name)| {
                    extract_cell(col, row)
                        .with_context(|| format!("Row {}: failed to read '{name}'", rows.len()))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Dataset::from_rows(columns, rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        // Narrow ints, dictionaries, dates: go through the textual form.
        _ => CellValue::Text(array_value_to_string(col.as_ref(), row)?),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CHURN_CSV: &str = "\
RowNumber,CustomerId,Surname,Geography,Gender,Age,EstimatedSalary,Exited
1,15634602,Hargrave,France,Female,42,101348.88,1
2,15647311,Hill,Spain,Female,41,112542.58,0
3,15619304,Onio,France,Female,42,113931.57,1
4,15701354,Boni,Germany,Male,39,93826.63,0
";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_temp(".csv", CHURN_CSV);
        let ds = load(file.path()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.columns.len(), 8);
        assert_eq!(ds.columns[2], "Surname");
        assert_eq!(ds.customers[3].geography, "Germany");
        assert_eq!(ds.customers[1].cells[2], CellValue::Text("Hill".into()));
        assert_eq!(ds.age_bounds, Some((39, 42)));
    }

    #[test]
    fn loads_tsv() {
        let file = write_temp(".tsv", &CHURN_CSV.replace(',', "\t"));
        let ds = load(file.path()).unwrap();
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn loads_json_records() {
        let json = r#"[
            {"Geography": "France", "Gender": "Male", "Age": 30, "EstimatedSalary": 1000.5, "Exited": 0},
            {"Geography": "Spain", "Gender": "Female", "Age": 45, "EstimatedSalary": 2000, "Exited": true}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert!(ds.customers[1].exited);
        assert_eq!(ds.customers[1].estimated_salary, 2000.0);
    }

    #[test]
    fn json_keys_missing_from_first_record_are_dropped() {
        let json = r#"[
            {"Geography": "France", "Gender": "Male", "Age": 30, "EstimatedSalary": 1000, "Exited": 0},
            {"Geography": "Spain", "Gender": "Female", "Age": 45, "EstimatedSalary": 2000, "Exited": 1, "Surname": "Hill"}
        ]"#;
        let file = write_temp(".json", json);
        let ds = load(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert!(!ds.columns.iter().any(|c| c == "Surname"));
        assert_eq!(ds.customers[1].cells.len(), ds.columns.len());
    }

    #[test]
    fn loads_parquet_scalar_columns() {
        use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Geography", DataType::Utf8, false),
            Field::new("Gender", DataType::Utf8, false),
            Field::new("Age", DataType::Int64, false),
            Field::new("EstimatedSalary", DataType::Float64, false),
            Field::new("Exited", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["France", "Germany"])),
                Arc::new(StringArray::from(vec!["Male", "Female"])),
                Arc::new(Int64Array::from(vec![30, 45])),
                Arc::new(Float64Array::from(vec![1000.0, 2500.5])),
                Arc::new(Int32Array::from(vec![0, 1])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns[0], "Geography");
        assert_eq!(ds.customers[1].gender, "Female");
        assert_eq!(ds.customers[1].age, 45);
        assert!(ds.customers[1].exited);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = load(Path::new("/definitely/not/here/Churn_Modelling.csv")).unwrap_err();
        assert!(matches!(err, ExplorerError::DataUnavailable { .. }));
    }

    #[test]
    fn missing_column_is_data_unavailable() {
        let file = write_temp(".csv", "Geography,Gender,Age\nFrance,Male,30\n");
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("EstimatedSalary"), "{err}");
    }

    #[test]
    fn ragged_row_is_data_unavailable() {
        let file = write_temp(".csv", "Geography,Gender,Age,EstimatedSalary,Exited\nFrance,Male,30\n");
        assert!(matches!(
            load(file.path()),
            Err(ExplorerError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", CHURN_CSV);
        let err = load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"), "{err}");
    }
}
