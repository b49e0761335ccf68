use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeListArray, ListArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{JobDataset, MetadataValue, VibrationalJob};
use crate::spectrum::SpectralLine;

/// Column holding the mode wavenumbers.
pub const FREQUENCY_COLUMN: &str = "frequencies";
/// Column holding the IR intensities, same length as the frequencies.
pub const INTENSITY_COLUMN: &str = "intensities";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load vibrational job results from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – `frequencies` and `intensities` list columns
/// * `.json`    – one job object or an array of them,
///   `{ "frequencies": [...], "intensities": [...], ...meta }`
/// * `.csv`     – `frequencies` and `intensities` columns holding
///   semicolon-separated floats
pub fn load_file(path: &Path) -> Result<JobDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::debug!("{}: {} jobs", path.display(), dataset.len());
    Ok(dataset)
}

fn zip_lines(frequencies: Vec<f64>, intensities: Vec<f64>, row: usize) -> Result<Vec<SpectralLine>> {
    if frequencies.len() != intensities.len() {
        bail!(
            "Row {row}: {} frequencies but {} intensities",
            frequencies.len(),
            intensities.len()
        );
    }
    Ok(frequencies
        .into_iter()
        .zip(intensities)
        .map(|(f, i)| SpectralLine::new(f, i))
        .collect())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// ```json
/// [
///   {
///     "frequencies": [1595.2, 3657.1, 3756.0],
///     "intensities": [68.1, 2.4, 44.9],
///     "molecule": "H2O",
///     "method": "B3LYP/6-31G*"
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<JobDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse a JSON result document already in memory.
pub fn parse_json(text: &str) -> Result<JobDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records: Vec<&JsonValue> = match &root {
        JsonValue::Array(items) => items.iter().collect(),
        JsonValue::Object(_) => vec![&root],
        _ => bail!("Expected a JSON object or array of objects"),
    };

    let jobs = records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            json_record_to_job(obj, i)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(JobDataset::from_jobs(jobs))
}

fn json_record_to_job(obj: &Map<String, JsonValue>, row: usize) -> Result<VibrationalJob> {
    let frequencies = json_array_to_f64(obj.get(FREQUENCY_COLUMN), row, FREQUENCY_COLUMN)?;
    let intensities = json_array_to_f64(obj.get(INTENSITY_COLUMN), row, INTENSITY_COLUMN)?;
    let lines = zip_lines(frequencies, intensities, row)?;

    let metadata = obj
        .iter()
        .filter(|(key, _)| key.as_str() != FREQUENCY_COLUMN && key.as_str() != INTENSITY_COLUMN)
        .map(|(key, val)| (key.clone(), json_to_metadata(val)))
        .collect();

    Ok(VibrationalJob { lines, metadata })
}

fn json_array_to_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<Vec<f64>> {
    let arr = val
        .and_then(|v| v.as_array())
        .with_context(|| format!("Row {row}: missing or invalid '{col}' array"))?;

    arr.iter()
        .enumerate()
        .map(|(j, v)| {
            v.as_f64()
                .with_context(|| format!("Row {row}, {col}[{j}]: not a number"))
        })
        .collect()
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names; `frequencies` / `intensities` hold
/// semicolon-separated floats (`"1595.2;3657.1"`). Other columns are metadata.
fn load_csv(path: &Path) -> Result<JobDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let f_idx = headers
        .iter()
        .position(|h| h == FREQUENCY_COLUMN)
        .with_context(|| format!("CSV missing '{FREQUENCY_COLUMN}' column"))?;
    let i_idx = headers
        .iter()
        .position(|h| h == INTENSITY_COLUMN)
        .with_context(|| format!("CSV missing '{INTENSITY_COLUMN}' column"))?;

    let mut jobs = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let frequencies =
            parse_semicolon_floats(record.get(f_idx).unwrap_or(""), row_no, FREQUENCY_COLUMN)?;
        let intensities =
            parse_semicolon_floats(record.get(i_idx).unwrap_or(""), row_no, INTENSITY_COLUMN)?;
        let lines = zip_lines(frequencies, intensities, row_no)?;

        let metadata = record
            .iter()
            .enumerate()
            .filter(|(col_idx, _)| *col_idx != f_idx && *col_idx != i_idx)
            .map(|(col_idx, value)| (headers[col_idx].clone(), guess_metadata_type(value)))
            .collect();

        jobs.push(VibrationalJob { lines, metadata });
    }

    Ok(JobDataset::from_jobs(jobs))
}

fn parse_semicolon_floats(s: &str, row: usize, col: &str) -> Result<Vec<f64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, {col}[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

fn guess_metadata_type(s: &str) -> MetadataValue {
    if s.is_empty() {
        return MetadataValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return MetadataValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return MetadataValue::Float(f);
    }
    if s == "true" || s == "false" {
        return MetadataValue::Bool(s == "true");
    }
    MetadataValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema:
/// - `frequencies`: List<Float64> or LargeList<Float64> (Float32 accepted)
/// - `intensities`: same shape as `frequencies`
/// - any other column is metadata (strings, ints, floats, bools)
fn load_parquet(path: &Path) -> Result<JobDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut jobs = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let f_idx = schema
            .index_of(FREQUENCY_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{FREQUENCY_COLUMN}' column"))?;
        let i_idx = schema
            .index_of(INTENSITY_COLUMN)
            .map_err(|_| anyhow::anyhow!("Parquet file missing '{INTENSITY_COLUMN}' column"))?;

        let f_col = batch.column(f_idx);
        let i_col = batch.column(i_idx);

        let meta_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != f_idx && *i != i_idx)
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let frequencies = extract_f64_list(f_col, row)
                .with_context(|| format!("Row {row}: failed to read '{FREQUENCY_COLUMN}'"))?;
            let intensities = extract_f64_list(i_col, row)
                .with_context(|| format!("Row {row}: failed to read '{INTENSITY_COLUMN}'"))?;
            let lines = zip_lines(frequencies, intensities, row)?;

            let mut metadata = BTreeMap::new();
            for (col_idx, col_name) in &meta_cols {
                let value = extract_metadata_value(batch.column(*col_idx), row)
                    .with_context(|| format!("Row {row}: column '{col_name}'"))?;
                metadata.insert(col_name.clone(), value);
            }

            jobs.push(VibrationalJob { lines, metadata });
        }
    }

    Ok(JobDataset::from_jobs(jobs))
}

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }

    let values_array = match col.data_type() {
        DataType::List(_) => col
            .as_any()
            .downcast_ref::<ListArray>()
            .context("expected ListArray")?
            .value(row),
        DataType::LargeList(_) => col
            .as_any()
            .downcast_ref::<LargeListArray>()
            .context("expected LargeListArray")?
            .value(row),
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        Ok(f64_arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        Ok(f32_arr.iter().map(|v| v.unwrap_or(f32::NAN) as f64).collect())
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}

/// Extract a single metadata value from an Arrow column at a given row.
fn extract_metadata_value(col: &Arc<dyn Array>, row: usize) -> Result<MetadataValue> {
    if col.is_null(row) {
        return Ok(MetadataValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => MetadataValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => {
            MetadataValue::String(col.as_string::<i64>().value(row).to_string())
        }
        DataType::Int32 => {
            let arr = downcast::<Int32Array>(col)?;
            MetadataValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => MetadataValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => {
            MetadataValue::Float(downcast::<Float32Array>(col)?.value(row) as f64)
        }
        DataType::Float64 => MetadataValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => MetadataValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => MetadataValue::String(format!("{other:?}")),
    };
    Ok(value)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type {:?}", col.data_type()))
}
