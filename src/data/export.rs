use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use crate::spectrum::ProfileSample;

/// A broadened curve tagged with the job it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedProfile {
    pub job: String,
    pub samples: Vec<ProfileSample>,
}

/// Long-format row shared by the CSV and Parquet writers.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    job: &'a str,
    x: f64,
    y: f64,
}

fn rows(profiles: &[NamedProfile]) -> impl Iterator<Item = ExportRow<'_>> {
    profiles.iter().flat_map(|p| {
        p.samples.iter().map(move |s| ExportRow {
            job: &p.job,
            x: s.x,
            y: s.y,
        })
    })
}

/// Write broadened profiles to `path`.  Dispatch by extension:
/// `.csv` and `.parquet` / `.pq` are long format (`job, x, y`), `.json`
/// keeps one object per job.
pub fn export_profiles(path: &Path, profiles: &[NamedProfile]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, profiles),
        "json" => write_json(path, profiles),
        "parquet" | "pq" => write_parquet(path, profiles),
        other => bail!("Unsupported export extension: .{other}"),
    }?;

    log::info!(
        "Exported {} profiles ({} samples) to {}",
        profiles.len(),
        profiles.iter().map(|p| p.samples.len()).sum::<usize>(),
        path.display()
    );
    Ok(())
}

fn write_csv(path: &Path, profiles: &[NamedProfile]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    // serialize() only emits the header once a row exists
    if profiles.iter().all(|p| p.samples.is_empty()) {
        writer.write_record(["job", "x", "y"])?;
    }
    for row in rows(profiles) {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(path: &Path, profiles: &[NamedProfile]) -> Result<()> {
    let file = std::fs::File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), profiles)
        .context("writing JSON")?;
    Ok(())
}

fn write_parquet(path: &Path, profiles: &[NamedProfile]) -> Result<()> {
    let (jobs, (xs, ys)): (Vec<&str>, (Vec<f64>, Vec<f64>)) =
        rows(profiles).map(|r| (r.job, (r.x, r.y))).unzip();

    let schema = Arc::new(Schema::new(vec![
        Field::new("job", DataType::Utf8, false),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(jobs)),
            Arc::new(Float64Array::from(xs)),
            Arc::new(Float64Array::from(ys)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn profiles() -> Vec<NamedProfile> {
        vec![
            NamedProfile {
                job: "H2O".into(),
                samples: vec![
                    ProfileSample { x: 1500.0, y: 0.1 },
                    ProfileSample { x: 1600.0, y: 0.9 },
                ],
            },
            NamedProfile {
                job: "CO2".into(),
                samples: vec![ProfileSample { x: 2349.0, y: 1.0 }],
            },
        ]
    }

    #[test]
    fn csv_long_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        export_profiles(&path, &profiles()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "job,x,y");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "CO2,2349.0,1.0");
    }

    #[test]
    fn json_keeps_jobs_grouped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        export_profiles(&path, &profiles()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[0]["job"], "H2O");
        assert_eq!(value[0]["samples"][1]["y"], 0.9);
        assert_eq!(value[1]["samples"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn parquet_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.parquet");
        export_profiles(&path, &profiles()).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(rows, 3);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_profiles(&dir.path().join("out.xlsx"), &profiles()).is_err());
    }
}
