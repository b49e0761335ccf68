use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use rusty_ir::data::export::export_profiles;
use rusty_ir::spectrum::LineShape;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – broadening controls and filters
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Broadening");
    ui.separator();
    broadening_controls(ui, state);
    ui.add_space(8.0);

    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Cloned so the loop below can mutate state.
    let columns = dataset.column_names.clone();
    let unique = dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Color by");
            let current_color_col = state.color_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(&current_color_col)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &columns {
                        if ui
                            .selectable_label(current_color_col == *col, col)
                            .clicked()
                        {
                            state.set_color_column(col.clone());
                        }
                    }
                });
            if let Some(cm) = &state.color_map {
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for (label, color) in cm.legend_entries() {
                        ui.label(RichText::new(format!("■ {label}")).color(color));
                    }
                });
            }
            ui.separator();

            for col in &columns {
                let Some(all_values) = unique.get(col) else {
                    continue;
                };
                let n_selected = state.filters.get(col).map_or(0, |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(col)
                                .is_some_and(|s| s.contains(val));
                            let mut text = RichText::new(val.to_string());
                            if let Some(cm) = state
                                .color_map
                                .as_ref()
                                .filter(|cm| cm.column == *col)
                            {
                                text = text.color(cm.color_for(val));
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
        });
}

fn broadening_controls(ui: &mut Ui, state: &mut AppState) {
    let mut params = state.broadening;

    egui::ComboBox::from_label("Line shape")
        .selected_text(params.shape.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for shape in LineShape::ALL {
                ui.selectable_value(&mut params.shape, shape, shape.to_string());
            }
        });
    ui.add(
        egui::Slider::new(&mut params.width, 0.5..=100.0)
            .logarithmic(true)
            .text("Width (cm⁻¹)"),
    );
    ui.add(
        egui::Slider::new(&mut params.resolution, 1..=5000)
            .logarithmic(true)
            .text("Resolution"),
    );

    state.set_broadening(params);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.profiles.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export profiles…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} jobs loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        ui.toggle_value(&mut state.minmax_scaling, "Min-Max Scaling");
        ui.toggle_value(&mut state.show_sticks, "Sticks");

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vibrational results")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` into the state, reporting failures in the status line.
pub fn open_path(state: &mut AppState, path: &std::path::Path) {
    match rusty_ir::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} jobs with columns {:?}",
                dataset.len(),
                dataset.column_names
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export broadened profiles")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet"])
        .set_file_name("profiles.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_profiles(&path, &state.named_profiles()) {
            log::error!("Failed to export profiles: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
