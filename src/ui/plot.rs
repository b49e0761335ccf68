use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use rusty_ir::spectrum::peaks::minmax_transform;

use crate::color::DEFAULT_COLOR;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectrum plot (central panel)
// ---------------------------------------------------------------------------

/// Render the broadened profiles of the visible jobs.
pub fn spectrum_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a result file to view spectra  (File → Open…)");
        });
        return;
    };

    let color_col = state.color_column.as_deref();

    Plot::new("spectrum_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Wavenumber (cm⁻¹)")
        .y_axis_label("Intensity")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for profile in &state.profiles {
                let job = &dataset.jobs[profile.job];
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for_job(job))
                    .unwrap_or(DEFAULT_COLOR);
                let name = job.label(color_col, profile.job);

                let raw: Vec<f64> = profile.samples.iter().map(|s| s.y).collect();
                // y ↦ (y - offset) · scale, shared by the curve and its sticks
                let (offset, scale) = if state.minmax_scaling {
                    minmax_transform(&raw)
                } else {
                    (0.0, 1.0)
                };
                let ys: Vec<f64> = raw.iter().map(|&y| (y - offset) * scale).collect();

                let points: PlotPoints = profile
                    .samples
                    .iter()
                    .zip(&ys)
                    .map(|(s, &y)| [s.x, y])
                    .collect();

                let highlighted = state.selected_job == Some(profile.job);
                plot_ui.line(
                    Line::new(points)
                        .name(&name)
                        .color(color)
                        .width(if highlighted { 2.5 } else { 1.5 }),
                );

                if state.show_sticks {
                    for l in &job.lines {
                        let base = -offset * scale;
                        let top = (l.intensity - offset) * scale;
                        plot_ui.line(
                            Line::new(PlotPoints::new(vec![[l.frequency, base], [l.frequency, top]]))
                                .name(&name)
                                .color(stick_color(color))
                                .width(1.0),
                        );
                    }
                }
            }
        });
}

fn stick_color(c: Color32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), 110)
}
