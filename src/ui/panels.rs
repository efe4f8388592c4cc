use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use super::Pending;
use crate::data::loader::Upload;
use crate::state::{Action, AppState, Notice, NoticeLevel, View};

const TIPS: [&str; 3] = [
    "Upload CSV or Excel files to start.",
    "Use 'Data Cleaning' to remove duplicates.",
    "Convert your files between formats easily.",
];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title, the upload menu and the latest notices.
pub fn top_bar(ui: &mut Ui, state: &AppState, pending: &mut Pending) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload files…").clicked() {
                if let Some(uploads) = pick_tabular_files(pending) {
                    pending.actions.push(Action::AddUploads(uploads));
                }
                ui.close_menu();
            }
            if ui.button("Extract text…").clicked() {
                if let Some(upload) = pick_text_source(pending) {
                    pending.actions.push(Action::Navigate(View::TextExtractor));
                    pending.actions.push(Action::Extract(upload));
                }
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Data Sweeper");
        ui.separator();

        if !state.files.is_empty() {
            ui.label(format!("{} file(s) loaded", state.files.len()));
        }
    });

    ui.label("Transform your files between CSV and Excel formats with built-in data cleaning and visualization!");
    notices(ui, &state.notices);
}

fn notices(ui: &mut Ui, notices: &[Notice]) {
    for notice in notices {
        let color = match notice.level {
            NoticeLevel::Success => Color32::from_rgb(60, 170, 90),
            NoticeLevel::Warning => Color32::from_rgb(220, 160, 40),
            NoticeLevel::Error => Color32::RED,
        };
        ui.label(RichText::new(&notice.message).color(color));
    }
}

// ---------------------------------------------------------------------------
// Left side panel – navigation, tips, feedback
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState, pending: &mut Pending) {
    ui.heading("Navigation");
    ui.separator();

    let mut view = state.view;
    for candidate in View::ALL {
        ui.radio_value(&mut view, candidate, candidate.label());
    }
    if view != state.view {
        pending.actions.push(Action::Navigate(view));
    }

    ui.add_space(8.0);
    ui.strong("Quick Tips:");
    for tip in TIPS {
        ui.label(RichText::new(tip).italics());
    }

    ui.add_space(8.0);
    ui.strong("Feedback");
    ui.label("Have any suggestions?");
    ui.text_edit_multiline(&mut state.feedback);
    if ui.button("Submit Feedback").clicked() {
        pending.actions.push(Action::SubmitFeedback);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

/// Ask for one or more CSV / Excel files and read them.
pub fn pick_tabular_files(pending: &mut Pending) -> Option<Vec<Upload>> {
    let paths = rfd::FileDialog::new()
        .set_title("Upload your files (CSV and Excel)")
        .add_filter("Supported files", &["csv", "xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx"])
        .pick_files()?;

    let uploads = paths
        .iter()
        .filter_map(|path| match Upload::from_path(path) {
            Ok(upload) => Some(upload),
            Err(e) => {
                log::error!("{e}");
                pending.notices.push(Notice::error(e.to_string()));
                None
            }
        })
        .collect();
    Some(uploads)
}

/// Ask for a single TXT / CSV / Excel / PDF file for text extraction.
pub fn pick_text_source(pending: &mut Pending) -> Option<Upload> {
    let path = rfd::FileDialog::new()
        .set_title("Upload a file (TXT, CSV, Excel, or PDF)")
        .add_filter("Supported files", &["txt", "csv", "xlsx", "pdf"])
        .pick_file()?;

    match Upload::from_path(&path) {
        Ok(upload) => Some(upload),
        Err(e) => {
            log::error!("{e}");
            pending.notices.push(Notice::error(e.to_string()));
            None
        }
    }
}

/// Offer `bytes` for download through a save dialog.
pub fn save_download(file_name: &str, bytes: &[u8], pending: &mut Pending) {
    match write_download(file_name, bytes) {
        Ok(Some(path)) => {
            log::info!("Saved {}", path.display());
            pending
                .notices
                .push(Notice::success(format!("Saved {}", path.display())));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to save download: {e:#}");
            pending.notices.push(Notice::error(format!("Error: {e:#}")));
        }
    }
}

fn write_download(file_name: &str, bytes: &[u8]) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save download")
        .set_file_name(file_name)
        .save_file()
    else {
        return Ok(None);
    };
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(Some(path))
}
