use std::collections::BTreeSet;

use rusty_ir::config::ViewerConfig;
use rusty_ir::data::export::NamedProfile;
use rusty_ir::data::filter::{filtered_indices, init_filter_state, FilterState};
use rusty_ir::data::model::{JobDataset, MetadataValue};
use rusty_ir::spectrum::{BroadeningParams, ProfileSample};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A visible job's broadened curve, recomputed whenever inputs change.
#[derive(Debug, Clone)]
pub struct JobProfile {
    /// Index into `JobDataset::jobs`.
    pub job: usize,
    pub samples: Vec<ProfileSample>,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<JobDataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of jobs passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Metadata column used for colouring and legend names.
    pub color_column: Option<String>,
    pub color_map: Option<ColorMap>,

    pub broadening: BroadeningParams,
    /// Min-max scale each profile before plotting.
    pub minmax_scaling: bool,
    /// Draw the discrete lines under each curve.
    pub show_sticks: bool,

    /// Job whose modes are listed in the bottom table.
    pub selected_job: Option<usize>,

    /// Broadened curves of the visible jobs.
    pub profiles: Vec<JobProfile>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            broadening: config.broadening,
            minmax_scaling: config.normalize,
            show_sticks: config.show_sticks,
            ..Default::default()
        }
    }

    /// Ingest a newly loaded dataset, initialise filters, colour and profiles.
    pub fn set_dataset(&mut self, dataset: JobDataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.selected_job = if dataset.is_empty() { None } else { Some(0) };

        self.color_column = dataset.column_names.first().cloned();
        self.color_map = build_color_map(self.color_column.as_deref(), &dataset);

        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebroaden();
    }

    pub fn set_color_column(&mut self, col: String) {
        if let Some(ds) = &self.dataset {
            self.color_map = build_color_map(Some(&col), ds);
        }
        self.color_column = Some(col);
    }

    pub fn set_broadening(&mut self, params: BroadeningParams) {
        if params != self.broadening {
            self.broadening = params;
            self.rebroaden();
        }
    }

    /// Recompute `visible_indices` and profiles after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let visible = filtered_indices(ds, &self.filters);
            if visible != self.visible_indices {
                self.visible_indices = visible;
                self.rebroaden();
            }
        }
    }

    /// Broaden every visible job. Jobs the broadener rejects are skipped.
    pub fn rebroaden(&mut self) {
        let Some(ds) = &self.dataset else {
            self.profiles.clear();
            return;
        };

        let mut skipped = Vec::new();
        self.profiles = self
            .visible_indices
            .iter()
            .filter_map(|&idx| match self.broadening.apply(&ds.jobs[idx].lines) {
                Ok(samples) => Some(JobProfile { job: idx, samples }),
                Err(e) => {
                    log::warn!("job {idx}: {e}");
                    skipped.push(idx);
                    None
                }
            })
            .collect();

        log::debug!(
            "broadened {} jobs ({} {} cm-1, {} points)",
            self.profiles.len(),
            self.broadening.shape,
            self.broadening.width,
            self.broadening.resolution + 1
        );

        self.status_message = (!skipped.is_empty())
            .then(|| format!("Skipped {} job(s) with no usable peaks: {skipped:?}", skipped.len()));
    }

    /// Profiles ready to hand to the exporter, named by the colour column.
    pub fn named_profiles(&self) -> Vec<NamedProfile> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        self.profiles
            .iter()
            .map(|p| NamedProfile {
                job: ds.jobs[p.job].label(self.color_column.as_deref(), p.job),
                samples: p.samples.clone(),
            })
            .collect()
    }

    /// Toggle a single metadata value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &MetadataValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    pub fn select_all(&mut self, column: &str) {
        if let Some(all_vals) = self
            .dataset
            .as_ref()
            .and_then(|ds| ds.unique_values.get(column))
        {
            self.filters.insert(column.to_string(), all_vals.clone());
            self.refilter();
        }
    }

    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}

fn build_color_map(column: Option<&str>, dataset: &JobDataset) -> Option<ColorMap> {
    let col = column?;
    dataset
        .unique_values
        .get(col)
        .map(|vals| ColorMap::new(col, vals))
}
