use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ListingTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{} not found. Place the data file next to the application.", .path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("failed to read {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one listing per line
/// * `.json`    – `[{ "price": 9400, "odometer": 145000, ... }, ...]`
/// * `.parquet` – flat columns, one listing per row
pub fn load_table(path: &Path) -> Result<ListingTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    parsed.map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ListingTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(ListingTable::new(columns, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).  Columns appear in
/// first-seen key order; keys missing from a record become nulls.
fn load_json(path: &Path) -> Result<ListingTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(ListingTable::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.  Every column is read as a flat column;
/// works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() != columns.len() {
            bail!(
                "record batch has {} columns, schema has {}",
                batch.num_columns(),
                columns.len()
            );
        }
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row))
                    .collect(),
            );
        }
    }

    Ok(ListingTable::new(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let typed = match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    typed.unwrap_or_else(|| {
        arrow::util::display::array_value_to_string(col, row)
            .map(CellValue::Text)
            .unwrap_or_else(|_| CellValue::Text(format!("{:?}", col.data_type())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::{Builder, tempdir};

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut tmp = Builder::new().suffix(suffix).tempfile().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        tmp
    }

    #[test]
    fn csv_cells_are_typed() {
        let tmp = write_temp(
            ".csv",
            "price,model_year,model,odometer,is_4wd\n\
             9400,2011.0,bmw x5,145000,true\n\
             25500,,ford f-150,,\n",
        );
        let table = load_table(tmp.path()).unwrap();

        assert_eq!(table.columns(), ["price", "model_year", "model", "odometer", "is_4wd"]);
        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first[0], CellValue::Integer(9400));
        assert_eq!(first[1], CellValue::Float(2011.0));
        assert_eq!(first[2], CellValue::Text("bmw x5".into()));
        assert_eq!(first[4], CellValue::Bool(true));
        assert!(table.rows()[1][3].is_null());
    }

    #[test]
    fn json_records_fill_missing_keys() {
        let tmp = write_temp(
            ".json",
            r#"[{"price": 9400, "odometer": 145000.5},
                {"price": 5500, "model": "honda pilot"}]"#,
        );
        let table = load_table(tmp.path()).unwrap();

        assert_eq!(table.columns(), ["price", "odometer", "model"]);
        assert_eq!(table.rows()[0][1], CellValue::Float(145000.5));
        assert!(table.rows()[0][2].is_null());
        assert_eq!(table.rows()[1][2], CellValue::Text("honda pilot".into()));
    }

    #[test]
    fn parquet_columns_are_flat() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("listings.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("price", DataType::Int64, false),
            Field::new("odometer", DataType::Float64, true),
            Field::new("model", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![9400, 25500])),
                Arc::new(Float64Array::from(vec![Some(145000.0), None])),
                Arc::new(StringArray::from(vec!["bmw x5", "ford f-150"])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(&path).unwrap();
        assert_eq!(table.columns(), ["price", "odometer", "model"]);
        assert_eq!(table.rows()[0][0], CellValue::Integer(9400));
        assert!(table.rows()[1][1].is_null());
        assert_eq!(table.rows()[1][2], CellValue::Text("ford f-150".into()));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_table(&dir.path().join("vehicles_us.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let tmp = write_temp(".xlsx", "price\n1\n");
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn ragged_csv_reports_parse_error() {
        let tmp = write_temp(".csv", "price,odometer\n1,2\n3,4,5\n");
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
