//! Minimal OOXML text reader: pulls the paragraph text out of
//! `word/document.xml` inside a `.docx` archive.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Cap on the decompressed size of `word/document.xml`. The upload cap only
/// bounds the compressed archive.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

static PARAGRAPH_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:tab\s*/>").expect("static regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    extract_text_with_limit(path, MAX_DOCUMENT_XML_BYTES)
}

fn extract_text_with_limit(path: &Path, max_xml_bytes: u64) -> Result<String, ExtractionError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    if part.size() > max_xml_bytes {
        return Err(ExtractionError::Docx("document too large".to_string()));
    }

    // The declared size comes from the archive and may lie, so the stream is
    // bounded as well.
    let mut raw = Vec::new();
    (&mut part).take(max_xml_bytes + 1).read_to_end(&mut raw)?;
    if raw.len() as u64 > max_xml_bytes {
        return Err(ExtractionError::Docx("document too large".to_string()));
    }

    let xml = String::from_utf8(raw).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    Ok(xml_to_text(&xml))
}

/// Strips markup, turning paragraph/line/tab boundaries into whitespace and
/// decoding the predefined XML entities.
fn xml_to_text(xml: &str) -> String {
    let spaced = PARAGRAPH_END.replace_all(xml, "\n");
    let stripped = TAG.replace_all(&spaced, "");
    stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
