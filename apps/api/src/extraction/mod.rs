//! Extractor — turns uploaded document bytes into cleaned raw text plus a section map.

pub mod docx;
pub mod sections;
pub mod segmenter;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use sections::SectionMap;
pub use segmenter::segment;

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid whitespace pattern"));
static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line pattern"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

/// Raw text and sections of one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
    pub filetype: FileType,
    pub raw_text: String,
    pub sections: SectionMap,
}

impl ExtractedDocument {
    /// Builds a document from already-decoded text.
    pub fn from_text(filetype: FileType, text: &str) -> Self {
        let raw_text = clean_text(text);
        let sections = if raw_text.is_empty() {
            SectionMap::new()
        } else {
            segment(&raw_text)
        };
        debug!(
            chars = raw_text.len(),
            sections = sections.len(),
            "document extracted"
        );
        Self {
            filetype,
            raw_text,
            sections,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.raw_text.trim().is_empty()
    }
}

/// File type by extension; anything not PDF or DOCX is read as plain text.
pub fn detect_filetype(filename: &str) -> FileType {
    let name = filename.to_lowercase();
    if name.ends_with(".pdf") {
        FileType::Pdf
    } else if name.ends_with(".docx") {
        FileType::Docx
    } else {
        FileType::Txt
    }
}

/// Decodes `bytes` according to the file type implied by `filename`.
///
/// PDF and DOCX decoding is CPU-bound; async callers should run this on a blocking thread.
pub fn extract(filename: &str, bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let filetype = detect_filetype(filename);
    let text = match filetype {
        FileType::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        FileType::Docx => docx::extract_text(bytes)?,
        FileType::Txt => String::from_utf8_lossy(bytes).replace('\u{FFFD}', ""),
    };
    Ok(ExtractedDocument::from_text(filetype, &text))
}

/// Normalizes extracted text: NUL bytes become spaces, runs of spaces and tabs
/// collapse to one space, three or more newlines collapse to a blank line.
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\0', " ");
    let text = HORIZONTAL_WHITESPACE.replace_all(&text, " ");
    let text = BLANK_LINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_filetype_by_extension() {
        assert_eq!(detect_filetype("Resume.PDF"), FileType::Pdf);
        assert_eq!(detect_filetype("cv.docx"), FileType::Docx);
        assert_eq!(detect_filetype("jd.txt"), FileType::Txt);
        assert_eq!(detect_filetype("no_extension"), FileType::Txt);
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let cleaned = clean_text("  Senior\t\tEngineer\0here\n\n\n\nSkills  ");
        assert_eq!(cleaned, "Senior Engineer here\n\nSkills");
    }

    #[test]
    fn test_plain_text_is_segmented() {
        let doc = extract("resume.txt", b"Skills:\nRust\nGo").unwrap();
        assert_eq!(doc.filetype, FileType::Txt);
        assert_eq!(doc.sections.get("skills"), Some("Rust\nGo"));
        assert!(doc.has_text());
    }

    #[test]
    fn test_invalid_utf8_bytes_are_dropped() {
        let doc = extract("notes.txt", b"Py\xFFthon").unwrap();
        assert_eq!(doc.raw_text, "Python");
    }

    #[test]
    fn test_empty_text_has_no_sections() {
        let doc = extract("empty.txt", b"   \n\n ").unwrap();
        assert!(!doc.has_text());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_docx_is_decoded_and_segmented() {
        let bytes = docx::build_docx(&["Jane Doe", "Skills:", "Rust", "Kafka"]);
        let doc = extract("resume.docx", &bytes).unwrap();
        assert_eq!(doc.filetype, FileType::Docx);
        assert_eq!(doc.sections.get("skills"), Some("Rust\nKafka"));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let err = extract("resume.docx", b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }
}
