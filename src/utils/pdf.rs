//! PDF text and metadata extraction.
//!
//! Text comes from the pdf-extract crate; the document-information
//! dictionary (the resolver's metadata input) is read with lopdf, which can
//! open the trailer without rendering anything.

use lopdf::Object;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::models::Document;

/// Errors that can occur during PDF extraction
#[derive(Debug, Error)]
pub enum PdfExtractError {
    #[error("File not found or not a valid PDF: {0}")]
    InvalidFile(String),

    #[error("Failed to extract text from PDF: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract the full text content of a PDF file.
pub fn extract_text(path: &Path) -> Result<String, PdfExtractError> {
    if !path.is_file() {
        return Err(PdfExtractError::InvalidFile(format!(
            "not a file: {}",
            path.display()
        )));
    }

    pdf_extract::extract_text(path).map_err(|e| PdfExtractError::ExtractionFailed(e.to_string()))
}

/// Read the document-information dictionary of a PDF file.
///
/// Returns an empty map when the trailer has no Info entry; only string
/// values are kept, since that is all the resolver scans.
pub fn extract_metadata(path: &Path) -> Result<BTreeMap<String, String>, PdfExtractError> {
    let document = lopdf::Document::load(path)
        .map_err(|e| PdfExtractError::InvalidFile(format!("{}: {}", path.display(), e)))?;

    let Ok(info) = document.trailer.get(b"Info") else {
        return Ok(BTreeMap::new());
    };
    let dictionary = match info {
        Object::Dictionary(dictionary) => Some(dictionary),
        Object::Reference(id) => document
            .get_object(*id)
            .ok()
            .and_then(|object| object.as_dict().ok()),
        _ => None,
    };

    let mut metadata = BTreeMap::new();
    if let Some(dictionary) = dictionary {
        for (key, value) in dictionary.iter() {
            if let Object::String(bytes, _) = value {
                metadata.insert(
                    String::from_utf8_lossy(key).to_string(),
                    decode_pdf_string(bytes),
                );
            }
        }
    }
    Ok(metadata)
}

/// Load a PDF into the resolver's document model: full text, info-dictionary
/// metadata, and a title falling back to the filename stem.
pub fn load_document(path: &Path) -> Result<Document, PdfExtractError> {
    let text = extract_text(path)?;
    let metadata = extract_metadata(path)?;
    let title = metadata.get("Title").filter(|t| !t.is_empty()).cloned();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string());

    tracing::debug!(
        path = %path.display(),
        chars = text.len(),
        metadata_keys = metadata.len(),
        "loaded PDF document"
    );

    let mut document = Document::from_text(text).with_metadata(metadata);
    if let Some(title) = title {
        document = document.with_title(title);
    }
    if let Some(stem) = stem {
        document = document.with_file_stem(stem);
    }
    Ok(document)
}

/// PDF text strings are UTF-16BE when they open with a BOM, otherwise
/// effectively Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let code_units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&code_units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_nonexistent_file() {
        assert!(extract_text(Path::new("/nonexistent/file.pdf")).is_err());
        assert!(extract_metadata(Path::new("/nonexistent/file.pdf")).is_err());
    }

    #[test]
    fn test_decode_latin1_string() {
        assert_eq!(decode_pdf_string(b"Plain Title"), "Plain Title");
        assert_eq!(decode_pdf_string(&[0x54, 0xE9]), "Té");
    }

    #[test]
    fn test_decode_utf16_string() {
        // BOM + "Hi"
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }
}
