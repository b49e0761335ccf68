use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Vibrational-mode table (bottom panel)
// ---------------------------------------------------------------------------

/// Job picker plus the mode list of the selected job.
pub fn mode_table(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let color_col = state.color_column.as_deref();
    let current = state
        .selected_job
        .filter(|&i| i < dataset.len())
        .map(|i| dataset.jobs[i].label(color_col, i))
        .unwrap_or_default();

    let mut picked = state.selected_job;
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Modes of");
        egui::ComboBox::from_id_salt("mode_job")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                for &idx in &state.visible_indices {
                    let label = dataset.jobs[idx].label(color_col, idx);
                    ui.selectable_value(&mut picked, Some(idx), label);
                }
            });

        if let Some(job) = picked.and_then(|i| dataset.jobs.get(i)) {
            let n_imag = job.imaginary_modes();
            ui.label(format!("{} modes", job.lines.len()));
            if n_imag > 0 {
                ui.label(
                    RichText::new(format!("{n_imag} imaginary"))
                        .color(Color32::from_rgb(220, 80, 60)),
                );
            }
        }
    });

    let modes = picked
        .and_then(|i| dataset.jobs.get(i))
        .map(|job| job.modes())
        .unwrap_or_default();
    state.selected_job = picked;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(40.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Frequency (cm⁻¹)");
            });
            header.col(|ui| {
                ui.strong("Intensity");
            });
        })
        .body(|body| {
            body.rows(18.0, modes.len(), |mut row| {
                let mode = &modes[row.index()];
                let freq = if mode.imaginary {
                    RichText::new(format!("{:.2}i", mode.frequency.abs()))
                        .color(Color32::from_rgb(220, 80, 60))
                } else {
                    RichText::new(format!("{:.2}", mode.frequency))
                };
                row.col(|ui| {
                    ui.label(mode.index.to_string());
                });
                row.col(|ui| {
                    ui.label(freq);
                });
                row.col(|ui| {
                    ui.label(format!("{:.4}", mode.intensity));
                });
            });
        });
}
