use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use rusty_ir::data::model::{MetadataValue, VibrationalJob};

/// Fallback for jobs without a value in the colour column.
pub const DEFAULT_COLOR: Color32 = Color32::LIGHT_BLUE;

/// `n` distinct colours on evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ColorMap: metadata value → Color32
// ---------------------------------------------------------------------------

/// Colours keyed by the unique values of one metadata column.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<MetadataValue, Color32>,
}

impl ColorMap {
    pub fn new(column: &str, unique_values: &BTreeSet<MetadataValue>) -> Self {
        let mapping = unique_values
            .iter()
            .cloned()
            .zip(generate_palette(unique_values.len()))
            .collect();
        ColorMap {
            column: column.to_string(),
            mapping,
        }
    }

    pub fn color_for(&self, value: &MetadataValue) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }

    /// Colour of a job by its value in this map's column.
    pub fn color_for_job(&self, job: &VibrationalJob) -> Color32 {
        job.metadata
            .get(&self.column)
            .map(|v| self.color_for(v))
            .unwrap_or(DEFAULT_COLOR)
    }

    /// (label, colour) pairs for the legend.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.to_string(), *c))
            .collect()
    }
}
