//! DOCX text via `docx-rs`. Top-level body paragraphs only, in document order.

use docx_rs::{read_docx, DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};

const ZIP_MAGIC: &[u8] = b"PK";

/// Non-empty paragraph texts joined by newlines.
pub fn extract(bytes: &[u8]) -> Result<String, String> {
    if !bytes.starts_with(ZIP_MAGIC) {
        return Err("byte stream is not a DOCX package".to_string());
    }

    let docx = read_docx(bytes).map_err(|e| format!("Unable to read the DOCX document: {e}"))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        append_child_text(child, &mut buffer);
    }
    buffer
}

fn append_child_text(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run_text(run, buffer),
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                append_child_text(inner, buffer);
            }
        }
        ParagraphChild::Insert(insert) => {
            for inner in &insert.children {
                if let InsertChild::Run(run) = inner {
                    append_run_text(run, buffer);
                }
            }
        }
        _ => {}
    }
}

fn append_run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push('\t'),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}

/// In-memory DOCX with one run per paragraph.
#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = docx_rs::Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .expect("in-memory docx packs");
    cursor.into_inner()
}
