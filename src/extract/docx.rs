use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{Error, Result};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the body paragraphs of a .docx file, one paragraph per line.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("unreadable DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| Error::Extraction(format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)?;

    let paragraphs = paragraphs(&xml)?;
    tracing::debug!("Extracted {} DOCX paragraphs", paragraphs.len());
    Ok(paragraphs.join("\n"))
}

/// Collects body-level paragraphs only. Paragraphs nested in tables or text boxes are skipped
/// and do not interrupt the paragraph that contains them.
fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut in_paragraph = false;
    let mut nested = 0usize;
    let mut runs = 0usize;
    let mut in_text = false;

    loop {
        let at_body_level = body_depth.is_some_and(|body| depth == body + 1);
        let collecting = in_paragraph && nested == 0;

        match reader.read_event() {
            Ok(Event::Start(e)) => {
                match e.name().as_ref() {
                    b"w:body" => body_depth = Some(depth),
                    b"w:p" if in_paragraph => nested += 1,
                    b"w:p" if at_body_level => {
                        in_paragraph = true;
                        current.clear();
                    }
                    b"w:r" => runs += 1,
                    b"w:t" => in_text = true,
                    _ => {}
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" if at_body_level && !in_paragraph => paragraphs.push(String::new()),
                b"w:tab" if collecting && runs > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if collecting && runs > 0 => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => {
                depth = depth.saturating_sub(1);
                match e.name().as_ref() {
                    b"w:p" if nested > 0 => nested -= 1,
                    b"w:p" if in_paragraph => {
                        in_paragraph = false;
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    b"w:r" => runs = runs.saturating_sub(1),
                    b"w:t" => in_text = false,
                    _ => {}
                }
            }
            Ok(Event::Text(t)) if collecting && in_text => {
                current.push_str(&String::from_utf8_lossy(&t))
            }
            Ok(Event::GeneralRef(r)) if collecting && in_text => {
                current.push_str(&resolve_entity(&String::from_utf8_lossy(&r)))
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Extraction(format!(
                    "malformed document XML at {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn resolve_entity(name: &str) -> String {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name
            .strip_prefix("#x")
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
            .and_then(char::from_u32),
    };

    resolved
        .map(String::from)
        .unwrap_or_else(|| format!("&{};", name))
}
