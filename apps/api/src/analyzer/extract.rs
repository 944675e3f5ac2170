//! Uploaded document → plain text.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

/// Extraction failures. All of them surface to users as one "could not read file" message.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("text file is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// An uploaded file before extraction.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

impl Document {
    fn kind(&self) -> Result<DocumentKind, ExtractionError> {
        let content_type = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match (content_type.as_deref(), extension.as_deref()) {
            (Some("application/pdf"), _) | (_, Some("pdf")) => Ok(DocumentKind::Pdf),
            (Some("text/plain") | Some("text/markdown"), _) | (_, Some("txt") | Some("md")) => {
                Ok(DocumentKind::PlainText)
            }
            _ if self.bytes.starts_with(b"%PDF-") => Ok(DocumentKind::Pdf),
            (ct, ext) => Err(ExtractionError::UnsupportedType(
                ct.or(ext).unwrap_or("unknown").to_string(),
            )),
        }
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &Document) -> Result<String, ExtractionError>;
}

/// Default extractor: PDFs through `pdf-extract`, plain text and markdown as UTF-8.
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        if document.bytes.is_empty() {
            return Err(ExtractionError::EmptyFile);
        }

        let text = match document.kind()? {
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&document.bytes)
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
            DocumentKind::PlainText => std::str::from_utf8(&document.bytes)?.to_string(),
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(text)
    }
}

/// Runs extraction on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_blocking(
    extractor: Arc<dyn TextExtractor>,
    document: Document,
) -> Result<String, ExtractionError> {
    let file_name = document.file_name.clone().unwrap_or_default();
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&document))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?;

    if let Err(e) = &outcome {
        warn!(file_name = %file_name, "Could not extract resume text: {e}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: Option<&str>, content_type: Option<&str>, bytes: &'static [u8]) -> Document {
        Document {
            file_name: name.map(String::from),
            content_type: content_type.map(String::from),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_plain_text_by_extension() {
        let text = DocumentExtractor
            .extract(&doc(Some("resume.TXT"), None, b"Jane Roe\nEngineer"))
            .unwrap();
        assert_eq!(text, "Jane Roe\nEngineer");
    }

    #[test]
    fn test_plain_text_by_content_type_with_charset() {
        let text = DocumentExtractor
            .extract(&doc(None, Some("text/plain; charset=utf-8"), b"Jane Roe"))
            .unwrap();
        assert_eq!(text, "Jane Roe");
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = DocumentExtractor
            .extract(&doc(Some("resume.pdf"), None, b""))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyFile));
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = DocumentExtractor
            .extract(&doc(Some("resume.docx"), None, b"PK\x03\x04"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(t) if t == "docx"));
    }

    #[test]
    fn test_invalid_pdf_rejected() {
        let err = DocumentExtractor
            .extract(&doc(
                Some("resume.pdf"),
                Some("application/pdf"),
                b"definitely not a pdf",
            ))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_pdf_sniffed_from_magic_bytes() {
        let document = doc(None, Some("application/octet-stream"), b"%PDF-1.4 truncated");
        assert_eq!(document.kind().unwrap(), DocumentKind::Pdf);
    }

    #[test]
    fn test_whitespace_only_text_is_no_text() {
        let err = DocumentExtractor
            .extract(&doc(Some("resume.txt"), None, b"  \n\n "))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = DocumentExtractor
            .extract(&doc(Some("resume.txt"), None, b"\xff\xfe\xfd"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_extract_blocking_runs_extractor() {
        let text = extract_blocking(
            Arc::new(DocumentExtractor),
            doc(Some("resume.md"), None, b"# Jane Roe"),
        )
        .await
        .unwrap();
        assert_eq!(text, "# Jane Roe");
    }
}
