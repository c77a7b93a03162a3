use lopdf::Document;

use crate::error::{Error, Result};

/// Concatenates the text of every page in page order, newline-joined.
pub fn extract(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| Error::Extraction(format!("unreadable PDF: {}", e)))?;

    let pages: Vec<u32> = document.get_pages().keys().copied().collect();
    tracing::debug!("Extracting text from {} PDF pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len());
    for page in pages {
        let text = document
            .extract_text(&[page])
            .map_err(|e| Error::Extraction(format!("page {}: {}", page, e)))?;
        texts.push(text.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let bytes = pdf_with_pages(&["First page", "Second page"]);
        assert_eq!(extract(&bytes).unwrap(), "First page\nSecond page");
    }

    #[test]
    fn test_garbage_is_an_extraction_error() {
        let err = extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
