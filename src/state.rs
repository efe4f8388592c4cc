use crate::data::clean::{drop_duplicates, fill_missing_with_mean};
use crate::data::convert::{convert, ConversionTarget, ConvertedFile};
use crate::data::loader::{load_upload, Upload};
use crate::data::model::Dataset;
use crate::data::select::project;
use crate::error::{Result, SweepError};
use crate::extract::{extract_text, ExtractedText};

/// Rows shown in a data preview.
pub const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Views, notices and actions
// ---------------------------------------------------------------------------

/// Top-level navigation. The selected view decides what the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Upload,
    Cleaning,
    Visualization,
    TextExtractor,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Upload,
        View::Cleaning,
        View::Visualization,
        View::TextExtractor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Upload => "Upload Files",
            View::Cleaning => "Data Cleaning",
            View::Visualization => "Visualization",
            View::TextExtractor => "Text Extractor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-facing message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Every user intent the UI can express. `file` is a position in [`AppState::files`].
#[derive(Debug, Clone)]
pub enum Action {
    AddUploads(Vec<Upload>),
    RemoveFile(usize),
    SetCleaning { file: usize, enabled: bool },
    Deduplicate { file: usize },
    FillMissing { file: usize },
    SelectColumns { file: usize, columns: Vec<String> },
    ShowChart { file: usize, enabled: bool },
    SetConversionTarget { file: usize, target: ConversionTarget },
    Convert { file: usize },
    Extract(Upload),
    ClearExtraction,
    Navigate(View),
    SubmitFeedback,
}

// ---------------------------------------------------------------------------
// Per-file state
// ---------------------------------------------------------------------------

/// One ingested upload and the user's choices for it.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub size_bytes: usize,
    pub dataset: Dataset,
    /// Ordered column selection; starts as every column.
    pub selected_columns: Vec<String>,
    pub cleaning_enabled: bool,
    pub show_chart: bool,
    pub target: ConversionTarget,
    /// Result of the last conversion; dropped whenever the data or selection changes.
    pub converted: Option<ConvertedFile>,
}

impl FileEntry {
    pub fn new(upload: &Upload, dataset: Dataset) -> Self {
        Self {
            name: upload.name.clone(),
            size_bytes: upload.size(),
            selected_columns: dataset.column_names(),
            dataset,
            cleaning_enabled: false,
            show_chart: false,
            target: ConversionTarget::default(),
            converted: None,
        }
    }

    /// Upload size in kilobytes (1024 bytes).
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }

    /// The dataset projected onto the current column selection.
    pub fn selected_view(&self) -> Result<Dataset> {
        project(&self.dataset, &self.selected_columns)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Ingested files in upload order.
    pub files: Vec<FileEntry>,

    /// Result of the text extractor (None until a file is extracted).
    pub extraction: Option<ExtractedText>,

    /// Active navigation view.
    pub view: View,

    /// Feedback draft. Submitting only acknowledges it.
    pub feedback: String,

    /// Messages produced by the latest action.
    pub notices: Vec<Notice>,
}

impl AppState {
    /// Apply one action and return the notices it produced.
    pub fn apply(&mut self, action: Action) -> &[Notice] {
        self.notices = match action {
            Action::AddUploads(uploads) => self.add_uploads(uploads),
            Action::Extract(upload) => vec![self.extract(&upload)],
            Action::ClearExtraction => {
                self.extraction = None;
                Vec::new()
            }
            Action::Navigate(view) => {
                self.view = view;
                Vec::new()
            }
            Action::SubmitFeedback => {
                log::info!("Feedback acknowledged ({} chars)", self.feedback.len());
                vec![Notice::success("Thanks for your feedback!")]
            }
            other => match self.apply_to_file(other) {
                Ok(notices) => notices,
                Err(e) => {
                    log::error!("{e}");
                    vec![Notice::error(e.to_string())]
                }
            },
        };
        &self.notices
    }

    /// Record a notice produced outside [`AppState::apply`] (e.g. a failed save).
    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn add_uploads(&mut self, uploads: Vec<Upload>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for upload in uploads {
            match load_upload(&upload) {
                Ok(dataset) => {
                    log::info!(
                        "Loaded {} with {} rows and columns {:?}",
                        upload.name,
                        dataset.row_count(),
                        dataset.column_names()
                    );
                    self.files.push(FileEntry::new(&upload, dataset));
                }
                Err(e @ SweepError::UnsupportedFormat { .. }) => {
                    log::warn!("Skipping {}: {e}", upload.name);
                    notices.push(Notice::error(e.to_string()));
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e}", upload.name);
                    notices.push(Notice::error(e.to_string()));
                }
            }
        }
        if notices.is_empty() && !self.files.is_empty() {
            notices.push(Notice::success("All files processed!"));
        }
        notices
    }

    fn extract(&mut self, upload: &Upload) -> Notice {
        match extract_text(upload) {
            Ok(extracted) => {
                log::info!(
                    "Extracted {} characters from {}",
                    extracted.text.len(),
                    upload.name
                );
                let notice = Notice::success(format!("Extracted text from {}", upload.name));
                self.extraction = Some(extracted);
                notice
            }
            Err(e) => {
                log::error!("Text extraction failed: {e}");
                self.extraction = None;
                Notice::error(e.to_string())
            }
        }
    }

    fn entry_mut(&mut self, file: usize) -> Result<&mut FileEntry> {
        self.files.get_mut(file).ok_or(SweepError::NoSuchFile(file))
    }

    fn apply_to_file(&mut self, action: Action) -> Result<Vec<Notice>> {
        let notices = match action {
            Action::RemoveFile(file) => {
                if file >= self.files.len() {
                    return Err(SweepError::NoSuchFile(file));
                }
                let entry = self.files.remove(file);
                log::info!("Removed {}", entry.name);
                Vec::new()
            }
            Action::SetCleaning { file, enabled } => {
                self.entry_mut(file)?.cleaning_enabled = enabled;
                Vec::new()
            }
            Action::ShowChart { file, enabled } => {
                self.entry_mut(file)?.show_chart = enabled;
                Vec::new()
            }
            Action::SetConversionTarget { file, target } => {
                let entry = self.entry_mut(file)?;
                if entry.target != target {
                    entry.target = target;
                    entry.converted = None;
                }
                Vec::new()
            }
            Action::Deduplicate { file } => {
                let entry = self.entry_mut(file)?;
                let removed = drop_duplicates(&mut entry.dataset);
                entry.converted = None;
                log::info!("Removed {removed} duplicate rows from {}", entry.name);
                vec![Notice::success(format!(
                    "Duplicates Removed! ({removed} rows dropped)"
                ))]
            }
            Action::FillMissing { file } => {
                let entry = self.entry_mut(file)?;
                let report = fill_missing_with_mean(&mut entry.dataset);
                entry.converted = None;
                log::info!("Filled {} missing values in {}", report.filled, entry.name);
                let mut notices = vec![Notice::success(format!(
                    "Missing Values have been Filled! ({} cells)",
                    report.filled
                ))];
                if !report.undefined_means.is_empty() {
                    notices.push(Notice::warning(format!(
                        "No values to average in: {}; left missing",
                        report.undefined_means.join(", ")
                    )));
                }
                notices
            }
            Action::SelectColumns { file, columns } => {
                let entry = self.entry_mut(file)?;
                // Validate before storing so a bad selection leaves the old one intact.
                project(&entry.dataset, &columns)?;
                entry.selected_columns = columns;
                entry.converted = None;
                Vec::new()
            }
            Action::Convert { file } => {
                let entry = self.entry_mut(file)?;
                let view = entry.selected_view()?;
                let converted = convert(&view, &entry.name, entry.target)?;
                log::info!(
                    "Converted {} to {} ({} bytes)",
                    entry.name,
                    converted.file_name,
                    converted.bytes.len()
                );
                let notice = Notice::success(format!(
                    "Converted {} to {}",
                    entry.name,
                    entry.target.label()
                ));
                entry.converted = Some(converted);
                vec![notice]
            }
            Action::AddUploads(_)
            | Action::Extract(_)
            | Action::ClearExtraction
            | Action::Navigate(_)
            | Action::SubmitFeedback => Vec::new(),
        };
        Ok(notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn csv(name: &str, text: &str) -> Upload {
        Upload::new(name, text.as_bytes().to_vec())
    }

    fn state_with(text: &str) -> AppState {
        let mut state = AppState::default();
        state.apply(Action::AddUploads(vec![csv("data.csv", text)]));
        state
    }

    #[test]
    fn unsupported_upload_is_skipped_others_continue() {
        let mut state = AppState::default();
        let notices = state
            .apply(Action::AddUploads(vec![
                csv("a.json", "{}"),
                csv("b.csv", "x\n1\n"),
            ]))
            .to_vec();
        assert_eq!(state.files.len(), 1);
        assert_eq!(state.files[0].name, "b.csv");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "Unsupported file format: .json");
    }

    #[test]
    fn successful_batch_is_acknowledged() {
        let mut state = AppState::default();
        let notices = state.apply(Action::AddUploads(vec![csv("b.csv", "x\n1\n")]));
        assert_eq!(notices, &[Notice::success("All files processed!")]);
    }

    #[test]
    fn entry_reports_upload_size_in_kb() {
        let mut state = AppState::default();
        let mut text = String::from("x\n");
        text.push_str(&"1\n".repeat(1023));
        state.apply(Action::AddUploads(vec![csv("big.csv", &text)]));
        assert_eq!(state.files[0].size_bytes, 2048);
        assert_eq!(state.files[0].size_kb(), 2.0);
    }

    #[test]
    fn new_entry_selects_every_column() {
        let state = state_with("a,b,c\n1,2,3\n");
        let entry = &state.files[0];
        assert_eq!(entry.selected_columns, vec!["a", "b", "c"]);
        assert_eq!(entry.target, ConversionTarget::Csv);
        assert!(!entry.cleaning_enabled);
        assert_eq!(entry.size_bytes, 12);
    }

    #[test]
    fn cleaning_mutates_the_stored_dataset() {
        let mut state = state_with("a,b\n1,\n1,\n2,4\n");
        state.apply(Action::Deduplicate { file: 0 });
        assert_eq!(state.files[0].dataset.row_count(), 2);

        state.apply(Action::FillMissing { file: 0 });
        assert_eq!(
            state.files[0].dataset.column("b").unwrap().values,
            vec![CellValue::Float(4.0), CellValue::Float(4.0)]
        );
    }

    #[test]
    fn undefined_mean_is_a_warning() {
        let mut state = state_with("a,b\n1,\n2,\n");
        let notices = state.apply(Action::FillMissing { file: 0 }).to_vec();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].level, NoticeLevel::Warning);
        assert!(notices[1].message.contains('b'));
    }

    #[test]
    fn conversion_uses_the_column_selection() {
        let mut state = state_with("a,b,c\n1,2,3\n");
        state.apply(Action::SelectColumns {
            file: 0,
            columns: vec!["c".into(), "a".into()],
        });
        state.apply(Action::Convert { file: 0 });
        let converted = state.files[0].converted.as_ref().unwrap();
        assert_eq!(converted.file_name, "data.csv");
        assert_eq!(String::from_utf8_lossy(&converted.bytes), "c,a\n3,1\n");
    }

    #[test]
    fn data_changes_invalidate_conversion() {
        let mut state = state_with("a\n1\n1\n");
        state.apply(Action::Convert { file: 0 });
        assert!(state.files[0].converted.is_some());
        state.apply(Action::Deduplicate { file: 0 });
        assert!(state.files[0].converted.is_none());

        state.apply(Action::SetConversionTarget {
            file: 0,
            target: ConversionTarget::Excel,
        });
        state.apply(Action::Convert { file: 0 });
        let converted = state.files[0].converted.as_ref().unwrap();
        assert_eq!(converted.file_name, "data.xlsx");
    }

    #[test]
    fn bad_selection_keeps_previous_one() {
        let mut state = state_with("a,b\n1,2\n");
        let notices = state
            .apply(Action::SelectColumns {
                file: 0,
                columns: vec!["nope".into()],
            })
            .to_vec();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(state.files[0].selected_columns, vec!["a", "b"]);
    }

    #[test]
    fn unknown_file_index_is_reported() {
        let mut state = AppState::default();
        let notices = state.apply(Action::Deduplicate { file: 3 }).to_vec();
        assert_eq!(notices, vec![Notice::error("No uploaded file at position 3")]);
    }

    #[test]
    fn remove_file_discards_its_dataset() {
        let mut state = state_with("a\n1\n");
        state.apply(Action::RemoveFile(0));
        assert!(state.files.is_empty());
    }

    #[test]
    fn extraction_and_feedback() {
        let mut state = AppState::default();
        state.apply(Action::Extract(csv("notes.txt", "hello")));
        assert_eq!(state.extraction.as_ref().unwrap().text, "hello");

        state.apply(Action::Extract(Upload::new("bad.txt", vec![0xff])));
        assert!(state.extraction.is_none());
        assert_eq!(state.notices[0].level, NoticeLevel::Error);

        state.feedback = "more charts".into();
        let notices = state.apply(Action::SubmitFeedback).to_vec();
        assert_eq!(notices, vec![Notice::success("Thanks for your feedback!")]);
        assert_eq!(state.feedback, "more charts");
    }

    #[test]
    fn navigation_switches_view() {
        let mut state = AppState::default();
        assert_eq!(state.view, View::Upload);
        state.apply(Action::Navigate(View::Visualization));
        assert_eq!(state.view, View::Visualization);
    }
}
