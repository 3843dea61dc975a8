//! Plain text extraction from `.docx` documents.

use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::Event;

/// Main document part inside the archive.
const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the uncompressed document part.
const MAX_DOCUMENT_BYTES: u64 = 64 * 1024 * 1024;

/// Extract paragraph text from a DOCX archive, one paragraph per line.
///
/// Only the text runs are kept. Tabs become `\t` and manual line breaks
/// become `\n`.
pub fn extract_text<R: Read + Seek>(archive: R) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(archive).map_err(|e| e.to_string())?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    (&mut part)
        .take(MAX_DOCUMENT_BYTES + 1)
        .read_to_string(&mut xml)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;
    if xml.len() as u64 > MAX_DOCUMENT_BYTES {
        return Err(format!("{DOCUMENT_PART} exceeds {MAX_DOCUMENT_BYTES} bytes"));
    }

    paragraphs_from_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(text) if in_text => {
                current.push_str(&text.unescape().map_err(|e| e.to_string())?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_runs_are_concatenated() {
        let xml = r#"<w:document xmlns:w="w"><w:body>
            <w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>
            <w:p/>
            <w:p><w:r><w:t>Tom &amp; Jerry</w:t><w:tab/><w:t>end</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let paragraphs = paragraphs_from_xml(xml).unwrap();
        assert_eq!(paragraphs, ["Hello world", "", "Tom & Jerry\tend"]);
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = r#"<w:document xmlns:w="w"><w:body>
            <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>
        </w:body></w:document>"#;

        assert_eq!(paragraphs_from_xml(xml).unwrap(), ["Title"]);
    }

    #[test]
    fn test_not_a_zip_archive() {
        let result = extract_text(std::io::Cursor::new(b"plain text".to_vec()));
        assert!(result.is_err());
    }
}
