//! PDF text via `pdf-extract` (pure Rust, in-memory).

use std::panic::{catch_unwind, AssertUnwindSafe};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Page texts in page order joined by newlines. Pages with no extractable text are skipped.
pub fn extract(bytes: &[u8]) -> Result<String, String> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err("byte stream is not a PDF".to_string());
    }

    // pdf-extract panics on some malformed inputs; treat that as a corrupt document.
    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| "PDF parser aborted on malformed input".to_string())?
    .map_err(|e| format!("PDF text extraction failed: {e}"))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// In-memory PDF with one Courier text line per page. An empty string makes a page with
/// no text operators.
#[cfg(test)]
pub(crate) fn build_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations }
            .encode()
            .expect("content stream encodes");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
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
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("in-memory pdf saves");
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_lines(text: &str) -> Vec<&str> {
        text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_pages_extracted_in_order() {
        let bytes = build_pdf(&["JANE DOE Rust", "Kubernetes Terraform", "Kafka"]);
        let text = extract(&bytes).unwrap();
        assert_eq!(
            text_lines(&text),
            vec!["JANE DOE Rust", "Kubernetes Terraform", "Kafka"]
        );
    }

    #[test]
    fn test_page_without_text_is_dropped() {
        let bytes = build_pdf(&["JANE DOE Rust", "", "Kubernetes Terraform"]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text_lines(&text), vec!["JANE DOE Rust", "Kubernetes Terraform"]);

        let without_blank = build_pdf(&["JANE DOE Rust", "Kubernetes Terraform"]);
        assert_eq!(text, extract(&without_blank).unwrap());
    }

    #[test]
    fn test_pdf_with_no_text_yields_empty_text() {
        let bytes = build_pdf(&["", ""]);
        assert_eq!(extract(&bytes).unwrap().trim(), "");
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let err = extract(b"hello world").unwrap_err();
        assert!(err.contains("not a PDF"));
    }

    #[test]
    fn test_rejects_truncated_pdf() {
        assert!(extract(b"%PDF-1.7\n%%EOF").is_err());
    }

    #[test]
    fn test_empty_pages_contribute_nothing() {
        let pages = vec![
            "JANE DOE\nEngineer".to_string(),
            "   \n".to_string(),
            "Skills: Rust".to_string(),
        ];
        assert_eq!(join_pages(pages), "JANE DOE\nEngineer\nSkills: Rust");
    }

    #[test]
    fn test_all_pages_empty_yields_empty_text() {
        assert_eq!(join_pages(vec![String::new(), " ".to_string()]), "");
    }
}
