use std::collections::{BTreeMap, BTreeSet};

use super::model::{JobDataset, MetadataValue, VibrationalJob};

/// Per-column selection state: column_name → selected values.
/// An absent column means no constraint; an empty set hides everything.
pub type FilterState = BTreeMap<String, BTreeSet<MetadataValue>>;

/// Filter state with every value selected.
pub fn init_filter_state(dataset: &JobDataset) -> FilterState {
    dataset.unique_values.clone()
}

/// Indices of jobs that pass every column filter.
///
/// A job missing a filtered column passes only when `Null` is selected.
pub fn filtered_indices(dataset: &JobDataset, filters: &FilterState) -> Vec<usize> {
    let passes = |job: &VibrationalJob| {
        filters.iter().all(|(col, selected)| {
            if selected.is_empty() {
                return false;
            }
            let everything = dataset
                .unique_values
                .get(col)
                .is_some_and(|all| selected.is_superset(all));
            if everything {
                return true;
            }
            match job.metadata.get(col) {
                Some(val) => selected.contains(val),
                None => selected.contains(&MetadataValue::Null),
            }
        })
    };

    dataset
        .jobs
        .iter()
        .enumerate()
        .filter(|(_, job)| passes(job))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::SpectralLine;

    fn dataset() -> JobDataset {
        let mk = |molecule: &str, method: Option<&str>| {
            let mut metadata = BTreeMap::new();
            metadata.insert("molecule".to_string(), MetadataValue::String(molecule.into()));
            if let Some(m) = method {
                metadata.insert("method".to_string(), MetadataValue::String(m.into()));
            }
            VibrationalJob {
                lines: vec![SpectralLine::new(1000.0, 1.0)],
                metadata,
            }
        };
        JobDataset::from_jobs(vec![
            mk("H2O", Some("B3LYP")),
            mk("H2O", Some("PBE")),
            mk("CO2", None),
        ])
    }

    #[test]
    fn all_selected_shows_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn narrowing_a_column() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters
            .get_mut("molecule")
            .unwrap()
            .remove(&MetadataValue::String("CO2".into()));
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1]);
    }

    #[test]
    fn missing_column_needs_null() {
        let ds = dataset();
        assert!(ds.unique_values["method"].contains(&MetadataValue::Null));

        let mut filters = init_filter_state(&ds);
        let method = filters.get_mut("method").unwrap();
        method.remove(&MetadataValue::String("PBE".into()));
        method.remove(&MetadataValue::Null);
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);

        // ticking Null alone brings the job without a method back
        filters.get_mut("method").unwrap().insert(MetadataValue::Null);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn empty_selection_hides_all() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert("molecule".to_string(), BTreeSet::new());
        assert!(filtered_indices(&ds, &filters).is_empty());
    }
}
