//! Writes `sample_jobs.parquet`: synthetic vibrational results for a few
//! small molecules at several levels of theory.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Builder, Int64Array, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use rusty_ir::data::loader::{FREQUENCY_COLUMN, INTENSITY_COLUMN};

/// Reference harmonic modes as (cm⁻¹, km/mol).
const MOLECULES: &[(&str, i64, &[(f64, f64)])] = &[
    ("H2O", 0, &[(1595.0, 68.0), (3657.0, 2.5), (3756.0, 45.0)]),
    ("CO2", 0, &[(667.0, 46.0), (667.0, 46.0), (1333.0, 0.0), (2349.0, 548.0)]),
    ("NH3", 0, &[(950.0, 140.0), (1627.0, 15.0), (1627.0, 15.0), (3337.0, 1.0), (3444.0, 3.0), (3444.0, 3.0)]),
    ("HCOOH", 0, &[(626.0, 48.0), (1033.0, 4.0), (1105.0, 242.0), (1229.0, 9.0), (1387.0, 1.0), (1770.0, 385.0), (2943.0, 54.0), (3570.0, 84.0)]),
];

/// Method name and the frequency scale it tends to produce.
const METHODS: &[(&str, f64)] = &[("HF/6-31G*", 1.11), ("B3LYP/6-31G*", 1.035), ("MP2/cc-pVDZ", 1.05)];

/// Deterministic xorshift for reproducible jitter.
struct Jitter(u64);

impl Jitter {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-amp, amp]`.
    fn symmetric(&mut self, amp: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amp
    }
}

fn main() -> Result<()> {
    let mut jitter = Jitter(0x5eed_1234_abcd_0042);

    let mut f_builder = ListBuilder::new(Float64Builder::new());
    let mut i_builder = ListBuilder::new(Float64Builder::new());
    let mut molecules = Vec::new();
    let mut methods = Vec::new();
    let mut charges = Vec::new();
    let mut ids = Vec::new();

    for &(molecule, charge, modes) in MOLECULES {
        for &(method, scale) in METHODS {
            for &(freq, intensity) in modes {
                f_builder
                    .values()
                    .append_value(freq * scale + jitter.symmetric(5.0));
                i_builder
                    .values()
                    .append_value((intensity * (1.0 + jitter.symmetric(0.1))).max(0.0));
            }
            f_builder.append(true);
            i_builder.append(true);
            molecules.push(molecule);
            methods.push(method);
            charges.push(charge);
            ids.push(ids.len() as i64);
        }
    }

    // A transition-state search with one imaginary mode.
    f_builder
        .values()
        .append_slice(&[-1532.4, 412.8, 1098.3, 1710.6, 3101.2]);
    f_builder.append(true);
    i_builder.values().append_slice(&[310.2, 12.5, 88.0, 240.7, 19.3]);
    i_builder.append(true);
    molecules.push("HCOOH-TS");
    methods.push("B3LYP/6-31G*");
    charges.push(0);
    ids.push(ids.len() as i64);

    let list_field = || Arc::new(Field::new("item", DataType::Float64, true));
    let schema = Arc::new(Schema::new(vec![
        Field::new(FREQUENCY_COLUMN, DataType::List(list_field()), false),
        Field::new(INTENSITY_COLUMN, DataType::List(list_field()), false),
        Field::new("molecule", DataType::Utf8, false),
        Field::new("method", DataType::Utf8, false),
        Field::new("charge", DataType::Int64, false),
        Field::new("job_id", DataType::Int64, false),
    ]));

    let n_jobs = ids.len();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(f_builder.finish()),
            Arc::new(i_builder.finish()),
            Arc::new(StringArray::from(molecules)),
            Arc::new(StringArray::from(methods)),
            Arc::new(Int64Array::from(charges)),
            Arc::new(Int64Array::from(ids)),
        ],
    )
    .context("building record batch")?;

    let output_path = "sample_jobs.parquet";
    let file = std::fs::File::create(output_path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!("Wrote {n_jobs} jobs to {output_path}");
    Ok(())
}
