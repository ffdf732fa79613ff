use crate::{document::Document, LabelError};

/// MIME type of the bytes produced by [assemble]
pub const PDF_MIME_TYPE: &str = "application/pdf";

const HEADER: &[u8] = b"%PDF-";
const TRAILER: &[u8] = b"%%EOF";
/// How far from the end of the stream the end-of-file marker may sit
const TRAILER_WINDOW: usize = 100;
const MIN_LENGTH: usize = 10;

/// Serialise `document` into a single PDF byte stream and check it before handing it out.
/// A document without pages is refused.
pub fn assemble(document: &Document) -> Result<Vec<u8>, LabelError> {
    if document.pages.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let mut bytes: Vec<u8> = Vec::new();
    document.write(&mut bytes)?;
    validate_pdf(&bytes)?;
    log::debug!(
        "assembled {} page(s) into {} bytes",
        document.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Structural self-check of a serialised PDF: it must open with the `%PDF-` header
/// and carry a `%%EOF` marker within its last 100 bytes. This is not a validator of
/// the format, only a guard against a writer silently producing truncated output.
pub fn validate_pdf(bytes: &[u8]) -> Result<(), LabelError> {
    if bytes.len() < MIN_LENGTH || !bytes.starts_with(HEADER) {
        return Err(LabelError::MalformedOutput("missing %PDF- header"));
    }

    let window = &bytes[bytes.len().saturating_sub(TRAILER_WINDOW)..];
    if !window.windows(TRAILER.len()).any(|w| w == TRAILER) {
        return Err(LabelError::MalformedOutput("missing %%EOF trailer"));
    }

    Ok(())
}
