use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::spectrum::SpectralLine;

// ---------------------------------------------------------------------------
// MetadataValue – a single cell in a metadata column
// ---------------------------------------------------------------------------

/// A dynamically-typed job attribute (molecule, method, basis set, ...).
/// Lives in `BTreeSet`s downstream, hence the manual `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text.
    Date(String),
    Null,
}

impl Eq for MetadataValue {}

impl PartialOrd for MetadataValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetadataValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use MetadataValue::*;
        fn rank(v: &MetadataValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v:.4}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Date(d) => write!(f, "{d}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// VibrationalJob – one finished frequency calculation
// ---------------------------------------------------------------------------

/// One row of the vibrational-mode table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrationalMode {
    /// 1-based, in the order the job reported them.
    pub index: usize,
    pub frequency: f64,
    pub intensity: f64,
    /// Negative frequency, i.e. an imaginary mode.
    pub imaginary: bool,
}

/// Peak list and attributes of a single job.
#[derive(Debug, Clone)]
pub struct VibrationalJob {
    /// Computed modes as (frequency, IR intensity).
    pub lines: Vec<SpectralLine>,
    /// Dynamic metadata columns: column_name → value.
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl VibrationalJob {
    /// Legend name: the value of `column` if present, otherwise `job {idx}`.
    pub fn label(&self, column: Option<&str>, idx: usize) -> String {
        column
            .and_then(|col| self.metadata.get(col))
            .map(|v| v.to_string())
            .unwrap_or_else(|| format!("job {idx}"))
    }

    /// Number of imaginary (negative-frequency) modes.
    pub fn imaginary_modes(&self) -> usize {
        self.lines.iter().filter(|l| l.frequency < 0.0).count()
    }

    pub fn modes(&self) -> Vec<VibrationalMode> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| VibrationalMode {
                index: i + 1,
                frequency: l.frequency,
                intensity: l.intensity,
                imaginary: l.frequency < 0.0,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// JobDataset – everything loaded from one file
// ---------------------------------------------------------------------------

/// The parsed jobs with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct JobDataset {
    pub jobs: Vec<VibrationalJob>,
    /// Ordered list of metadata column names.
    pub column_names: Vec<String>,
    /// For each metadata column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<MetadataValue>>,
}

impl JobDataset {
    pub fn from_jobs(jobs: Vec<VibrationalJob>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<MetadataValue>> = BTreeMap::new();
        for job in &jobs {
            for (col, val) in &job.metadata {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        // Jobs without a column filter as Null, so Null must be selectable.
        for (col, vals) in unique_values.iter_mut() {
            if jobs.iter().any(|job| !job.metadata.contains_key(col)) {
                vals.insert(MetadataValue::Null);
            }
        }
        let column_names = unique_values.keys().cloned().collect();
        JobDataset {
            jobs,
            column_names,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(lines: &[(f64, f64)], meta: &[(&str, MetadataValue)]) -> VibrationalJob {
        VibrationalJob {
            lines: lines
                .iter()
                .map(|&(f, i)| SpectralLine::new(f, i))
                .collect(),
            metadata: meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn metadata_ordering_groups_by_kind() {
        let mut set = BTreeSet::new();
        set.insert(MetadataValue::String("b".into()));
        set.insert(MetadataValue::Integer(3));
        set.insert(MetadataValue::Null);
        set.insert(MetadataValue::String("a".into()));
        let order: Vec<String> = set.iter().map(|v| v.to_string()).collect();
        assert_eq!(order, vec!["<null>", "3", "a", "b"]);
    }

    #[test]
    fn modes_flag_imaginary_frequencies() {
        let j = job(&[(-412.3, 0.02), (1650.0, 0.7), (3050.0, 0.2)], &[]);
        assert_eq!(j.imaginary_modes(), 1);
        let modes = j.modes();
        assert_eq!(modes.len(), 3);
        assert_eq!(modes[0].index, 1);
        assert!(modes[0].imaginary);
        assert!(!modes[2].imaginary);
    }

    #[test]
    fn label_falls_back_to_index() {
        let j = job(&[(1.0, 1.0)], &[("molecule", MetadataValue::String("H2O".into()))]);
        assert_eq!(j.label(Some("molecule"), 0), "H2O");
        assert_eq!(j.label(Some("method"), 4), "job 4");
        assert_eq!(j.label(None, 2), "job 2");
    }

    #[test]
    fn dataset_indexes_columns() {
        let ds = JobDataset::from_jobs(vec![
            job(&[(1.0, 1.0)], &[("molecule", MetadataValue::String("H2O".into()))]),
            job(
                &[(2.0, 1.0)],
                &[
                    ("molecule", MetadataValue::String("CO2".into())),
                    ("charge", MetadataValue::Integer(0)),
                ],
            ),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column_names, vec!["charge", "molecule"]);
        assert_eq!(ds.unique_values["molecule"].len(), 2);
        assert!(!ds.unique_values["molecule"].contains(&MetadataValue::Null));
    }

    #[test]
    fn missing_column_adds_null_value() {
        let ds = JobDataset::from_jobs(vec![
            job(&[(1.0, 1.0)], &[("method", MetadataValue::String("PBE".into()))]),
            job(&[(2.0, 1.0)], &[]),
        ]);
        let methods: Vec<&MetadataValue> = ds.unique_values["method"].iter().collect();
        assert_eq!(
            methods,
            vec![&MetadataValue::Null, &MetadataValue::String("PBE".into())]
        );
    }
}
