use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four launch columns
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
///
/// Extra columns are ignored. Any row that violates the schema aborts the
/// load with the row number in the error.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} sites ({} booster categories)",
        dataset.len(),
        dataset.sites.len(),
        dataset.booster_categories.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let outcome = Outcome::try_from(self.class)
            .map_err(|e| anyhow::anyhow!("Row {row}, '{COL_CLASS}': {e}"))?;
        LaunchRecord::new(
            self.launch_site,
            self.payload_mass_kg,
            outcome,
            self.booster_version_category,
        )
        .map_err(|e| anyhow::anyhow!("Row {row}, '{COL_PAYLOAD_MASS}': {e}"))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("Row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&text).context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let raw: RawLaunchRow =
            serde_json::from_value(row).with_context(|| format!("Row {i}"))?;
        records.push(raw.into_record(i)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column_by_name(&batch, COL_LAUNCH_SITE)?;
        let mass_col = column_by_name(&batch, COL_PAYLOAD_MASS)?;
        let class_col = column_by_name(&batch, COL_CLASS)?;
        let booster_col = column_by_name(&batch, COL_BOOSTER_CATEGORY)?;

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let cell = |name: &str| format!("Row {row_no}, '{name}'");
            let raw = RawLaunchRow {
                launch_site: extract_string(site_col, row)
                    .with_context(|| cell(COL_LAUNCH_SITE))?,
                payload_mass_kg: extract_f64(mass_col, row)
                    .with_context(|| cell(COL_PAYLOAD_MASS))?,
                class: extract_i64(class_col, row).with_context(|| cell(COL_CLASS))?,
                booster_version_category: extract_string(booster_col, row)
                    .with_context(|| cell(COL_BOOSTER_CATEGORY))?,
            };
            records.push(raw.into_record(row_no)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        extract_i64(col, row).map(|v| v as f64)
    }
}

fn extract_i64(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        bail!("expected an integer column, got {:?}", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let file = write_temp(
            ".csv",
            "Flight Number,Launch Site,class,Payload Mass (kg),\
             Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             2,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT\n\
             3,CCAFS LC-40,1,2296.0,F9 B4 B1039.2,B4\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.records[1].outcome, Outcome::Success);
        assert_eq!(ds.records[2].payload_mass_kg, 2296.0);
        assert_eq!(ds.payload_bounds, Some((0.0, 9600.0)));
    }

    #[test]
    fn csv_missing_column_aborts() {
        let file = write_temp(".csv", "Launch Site,class,Booster Version Category\nA,1,v1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_bad_class_names_the_row() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n\
             A,100,1,v1\n\
             A,200,3,v1\n",
        );
        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.contains("Row 1, 'class'"), "{err}");
    }

    #[test]
    fn json_bad_row_uses_the_same_row_label() {
        let file = write_temp(
            ".json",
            r#"[{"Launch Site": "A", "Payload Mass (kg)": 1.0, "class": 1,
                 "Booster Version Category": "v1"},
                {"Launch Site": "A", "class": 1, "Booster Version Category": "v1"}]"#,
        );
        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.starts_with("Row 1"), "{err}");
    }

    #[test]
    fn csv_negative_payload_aborts() {
        let file = write_temp(
            ".csv",
            "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,-5,1,v1\n",
        );
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn loads_records_oriented_json() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "A", "Payload Mass (kg)": 2000.0, "class": 1,
                 "Booster Version Category": "v1"},
                {"Launch Site": "B", "Payload Mass (kg)": 8000, "class": 0,
                 "Booster Version Category": "v2", "Mission Outcome": "Success"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].payload_mass_kg, 8000.0);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    fn write_parquet(fields: Vec<Field>, columns: Vec<ArrayRef>) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .expect("temp file");
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let out = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn two_sites() -> ArrayRef {
        Arc::new(StringArray::from(vec!["A", "B"]))
    }

    fn two_boosters() -> ArrayRef {
        Arc::new(StringArray::from(vec!["v1", "v2"]))
    }

    #[test]
    fn loads_parquet() {
        let file = write_parquet(
            vec![
                Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            ],
            vec![
                two_sites(),
                Arc::new(Float64Array::from(vec![2000.0, 8000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                two_boosters(),
            ],
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites, vec!["A", "B"]);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
    }

    #[test]
    fn parquet_schema_violations_abort() {
        let missing_class = write_parquet(
            vec![
                Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
                Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            ],
            vec![
                two_sites(),
                Arc::new(Float64Array::from(vec![2000.0, 8000.0])),
                two_boosters(),
            ],
        );
        let err = format!("{:#}", load_file(missing_class.path()).unwrap_err());
        assert!(err.contains("missing 'class' column"), "{err}");

        let null_payload = write_parquet(
            vec![
                Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD_MASS, DataType::Float64, true),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            ],
            vec![
                two_sites(),
                Arc::new(Float64Array::from(vec![Some(2000.0), None])),
                Arc::new(Int64Array::from(vec![1, 0])),
                two_boosters(),
            ],
        );
        let err = format!("{:#}", load_file(null_payload.path()).unwrap_err());
        assert!(err.contains("Row 1, 'Payload Mass (kg)'"), "{err}");
        assert!(err.contains("null value"), "{err}");

        let numeric_site = write_parquet(
            vec![
                Field::new(COL_LAUNCH_SITE, DataType::Int64, false),
                Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            ],
            vec![
                Arc::new(Int64Array::from(vec![40, 41])),
                Arc::new(Float64Array::from(vec![2000.0, 8000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                two_boosters(),
            ],
        );
        let err = format!("{:#}", load_file(numeric_site.path()).unwrap_err());
        assert!(err.contains("Row 0, 'Launch Site'"), "{err}");
        assert!(err.contains("expected a string column"), "{err}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/launches.csv")).is_err());
    }
}
