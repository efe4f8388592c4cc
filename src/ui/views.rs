use eframe::egui::{self, RichText, Ui};

use super::panels::{pick_tabular_files, pick_text_source, save_download};
use super::{plot, table, Pending};
use crate::data::convert::ConversionTarget;
use crate::data::select::toggle_column;
use crate::state::{Action, AppState, FileEntry, View, PREVIEW_ROWS};

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the view chosen in the navigation panel.
pub fn central_panel(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.view {
            View::Upload => upload_view(ui, state, pending),
            View::Cleaning => cleaning_view(ui, state, pending),
            View::Visualization => visualization_view(ui, state, pending),
            View::TextExtractor => extractor_view(ui, state, pending),
        });
}

fn no_files(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Upload CSV or Excel files to start  (File → Upload files…)");
    });
}

fn file_header(ui: &mut Ui, entry: &FileEntry) {
    ui.label(format!("File Name: {}", entry.name));
    ui.label(format!("File Size: {:.2} KB", entry.size_kb()));
}

// ---------------------------------------------------------------------------
// Upload: preview, column selection, conversion
// ---------------------------------------------------------------------------

fn upload_view(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    ui.heading("Upload Files");
    if ui.button("Upload your files (CSV and Excel)…").clicked() {
        if let Some(uploads) = pick_tabular_files(pending) {
            pending.actions.push(Action::AddUploads(uploads));
        }
    }
    ui.separator();

    if state.files.is_empty() {
        no_files(ui);
        return;
    }

    for (file, entry) in state.files.iter().enumerate() {
        egui::CollapsingHeader::new(RichText::new(&entry.name).strong())
            .id_salt(("upload", file))
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                file_header(ui, entry);
                if ui.small_button("Remove").clicked() {
                    pending.actions.push(Action::RemoveFile(file));
                }

                ui.add_space(4.0);
                ui.strong("Data Preview");
                table::preview(ui, ("preview", file), &entry.dataset.head(PREVIEW_ROWS));

                ui.add_space(4.0);
                ui.strong("Select Columns to Convert");
                column_selector(ui, file, entry, pending);

                ui.add_space(4.0);
                ui.strong("Conversion Options");
                conversion_controls(ui, file, entry, pending);
            });
        ui.separator();
    }
}

fn column_selector(ui: &mut Ui, file: usize, entry: &FileEntry, pending: &mut Pending) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for name in entry.dataset.column_names() {
            let mut checked = entry.selected_columns.contains(&name);
            if ui.checkbox(&mut checked, name.as_str()).changed() {
                let mut columns = entry.selected_columns.clone();
                toggle_column(&mut columns, &name);
                pending
                    .actions
                    .push(Action::SelectColumns { file, columns });
            }
        }
    });
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            pending.actions.push(Action::SelectColumns {
                file,
                columns: entry.dataset.column_names(),
            });
        }
        if ui.small_button("None").clicked() {
            pending.actions.push(Action::SelectColumns {
                file,
                columns: Vec::new(),
            });
        }
        ui.weak(format!("Order: {}", entry.selected_columns.join(", ")));
    });
}

fn conversion_controls(ui: &mut Ui, file: usize, entry: &FileEntry, pending: &mut Pending) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Convert {} to:", entry.name));
        let mut target = entry.target;
        for candidate in ConversionTarget::ALL {
            ui.radio_value(&mut target, candidate, candidate.label());
        }
        if target != entry.target {
            pending
                .actions
                .push(Action::SetConversionTarget { file, target });
        }
    });

    if ui.button(format!("Convert {}", entry.name)).clicked() {
        pending.actions.push(Action::Convert { file });
    }

    if let Some(converted) = &entry.converted {
        let label = format!(
            "Download {} as {}",
            converted.file_name,
            converted.target.label()
        );
        if ui.button(label).clicked() {
            save_download(&converted.file_name, &converted.bytes, pending);
        }
    }
}

// ---------------------------------------------------------------------------
// Data cleaning
// ---------------------------------------------------------------------------

fn cleaning_view(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    ui.heading("Data Cleaning Options");
    ui.separator();

    if state.files.is_empty() {
        no_files(ui);
        return;
    }

    for (file, entry) in state.files.iter().enumerate() {
        file_header(ui, entry);
        ui.label(format!(
            "{} rows, {} missing values",
            entry.dataset.row_count(),
            entry.dataset.null_count()
        ));

        let mut enabled = entry.cleaning_enabled;
        if ui
            .checkbox(&mut enabled, format!("Clean data for {}", entry.name))
            .changed()
        {
            pending.actions.push(Action::SetCleaning { file, enabled });
        }

        if entry.cleaning_enabled {
            ui.columns(2, |cols: &mut [Ui]| {
                if cols[0]
                    .button(format!("Remove Duplicates from {}", entry.name))
                    .clicked()
                {
                    pending.actions.push(Action::Deduplicate { file });
                }
                if cols[1]
                    .button(format!("Fill Missing Values for {}", entry.name))
                    .clicked()
                {
                    pending.actions.push(Action::FillMissing { file });
                }
            });
            table::preview(ui, ("cleaning", file), &entry.dataset.head(PREVIEW_ROWS));
        }
        ui.separator();
    }
}

// ---------------------------------------------------------------------------
// Visualization
// ---------------------------------------------------------------------------

fn visualization_view(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    ui.heading("Data Visualization");
    ui.separator();

    if state.files.is_empty() {
        no_files(ui);
        return;
    }

    for (file, entry) in state.files.iter().enumerate() {
        let mut enabled = entry.show_chart;
        if ui
            .checkbox(&mut enabled, format!("Show Visualization for {}", entry.name))
            .changed()
        {
            pending.actions.push(Action::ShowChart { file, enabled });
        }

        if entry.show_chart {
            match entry.selected_view() {
                Ok(view) => plot::bar_chart(ui, &format!("chart_{file}"), &view),
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
            }
        }
        ui.separator();
    }
}

// ---------------------------------------------------------------------------
// Text extractor
// ---------------------------------------------------------------------------

fn extractor_view(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    ui.heading("File to Text Extractor");
    if ui
        .button("Upload a file (TXT, CSV, Excel, or PDF)…")
        .clicked()
    {
        if let Some(upload) = pick_text_source(pending) {
            pending.actions.push(Action::Extract(upload));
        }
    }
    ui.separator();

    let Some(extracted) = &state.extraction else {
        ui.weak("No file extracted yet.");
        return;
    };

    ui.label(format!("Extracted Text ({}):", extracted.source));
    let mut text = extracted.text.as_str();
    ui.add(
        egui::TextEdit::multiline(&mut text)
            .font(egui::TextStyle::Monospace)
            .desired_rows(18)
            .desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui: &mut Ui| {
        if extracted.is_downloadable() && ui.button("Download Extracted Text").clicked() {
            save_download(extracted.file_name(), extracted.text.as_bytes(), pending);
        }
        if ui.button("Clear").clicked() {
            pending.actions.push(Action::ClearExtraction);
        }
    });
}
