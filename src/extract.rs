//! Plain-text extraction from a single upload.
//!
//! * `.txt`         – bytes decoded as UTF-8, verbatim
//! * `.csv`/`.xlsx` – parsed, then rendered as an aligned text table
//! * `.pdf`         – text of every page, pages joined by a newline

use lopdf::Document;

use crate::data::loader::{load_upload, FileKind, Upload};
use crate::data::render::render_table;
use crate::error::{Result, SweepError};

/// Download name for extracted text.
pub const EXTRACTED_FILE_NAME: &str = "extracted_text.txt";
pub const TEXT_MIME: &str = "text/plain";

/// Text pulled out of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Name of the upload the text came from.
    pub source: String,
    pub text: String,
}

impl ExtractedText {
    pub fn file_name(&self) -> &'static str {
        EXTRACTED_FILE_NAME
    }

    pub fn mime_type(&self) -> &'static str {
        TEXT_MIME
    }

    /// Only non-empty text is offered for download.
    pub fn is_downloadable(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Extract text from `upload`. Unsupported kinds yield empty text without
/// any extraction attempt.
pub fn extract_text(upload: &Upload) -> Result<ExtractedText> {
    let text = match upload.kind {
        FileKind::Txt => String::from_utf8(upload.bytes.clone()).map_err(|source| {
            SweepError::Decode {
                file: upload.name.clone(),
                source,
            }
        })?,
        FileKind::Csv | FileKind::Xlsx => render_table(&load_upload(upload)?),
        FileKind::Pdf => extract_pdf_pages(&upload.name, &upload.bytes)?.join("\n"),
        FileKind::Unsupported => {
            log::debug!("Skipping text extraction for {}", upload.name);
            String::new()
        }
    };
    Ok(ExtractedText {
        source: upload.name.clone(),
        text,
    })
}

/// Text of each page in page order, trailing line breaks trimmed.
fn extract_pdf_pages(file: &str, bytes: &[u8]) -> Result<Vec<String>> {
    let document = Document::load_mem(bytes).map_err(|e| SweepError::parse(file, e))?;

    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|e| SweepError::parse(file, format!("page {page_number}: {e}")))?;
        texts.push(text.trim_end_matches(['\r', '\n']).to_string());
    }
    log::debug!("Extracted {} pages from {file}", texts.len());
    Ok(texts)
}
