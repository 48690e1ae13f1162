//! Plain-text extraction for uploaded files

use pulldown_cmark::{Event, Parser, TagEnd};
use quick_xml::events::Event as XmlEvent;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};
use std::panic;
use tracing::info;

use sol_core::{Error, Result};

/// File formats accepted for upload, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a file name, case-insensitively
    pub fn from_filename(filename: &str) -> Result<Self> {
        let lower = filename.to_lowercase();
        let extension = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

        match extension {
            "txt" => Ok(Self::PlainText),
            "md" | "markdown" => Ok(Self::Markdown),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(Error::UnsupportedFormat(format!(
                "Unsupported file type: {}. Use PDF, TXT, MD or DOCX.",
                filename
            ))),
        }
    }
}

/// Extract the text of an uploaded file
///
/// Plain text is decoded as UTF-8 with invalid sequences replaced. Markdown must
/// be valid UTF-8 and is rendered down to its text content. PDF pages and DOCX
/// paragraphs are joined by newlines; a file that fails to parse is an
/// [`Error::Extraction`].
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let text = match DocumentFormat::from_filename(filename)? {
        DocumentFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        DocumentFormat::Markdown => {
            let source = std::str::from_utf8(bytes).map_err(|e| {
                Error::Extraction(format!("{} is not valid UTF-8: {}", filename, e))
            })?;
            markdown_to_text(source)
        }
        DocumentFormat::Pdf => pdf_to_text(filename, bytes)?,
        DocumentFormat::Docx => docx_to_text(filename, bytes)?,
    };

    info!(filename, chars = text.chars().count(), "Extracted text");
    Ok(text)
}

fn markdown_to_text(source: &str) -> String {
    let mut out = String::with_capacity(source.len());

    for event in Parser::new(source) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableRow,
            ) => out.push('\n'),
            Event::End(TagEnd::TableCell) => out.push(' '),
            _ => {}
        }
    }

    out
}

fn pdf_to_text(filename: &str, bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed files
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(Error::Extraction(format!("{} is not a readable PDF: {}", filename, e))),
        Err(_) => Err(Error::Extraction(format!("{} is not a readable PDF", filename))),
    }
}

fn docx_to_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("{} is not a DOCX archive: {}", filename, e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::Extraction(format!("{} has no document body: {}", filename, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Extraction(format!("{} body is unreadable: {}", filename, e)))?;

    docx_xml_to_text(&xml)
        .map_err(|e| Error::Extraction(format!("{} body is malformed: {}", filename, e)))
}

/// Text runs of a WordprocessingML body, one line per paragraph
pub fn docx_xml_to_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::with_capacity(xml.len() / 4);
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            XmlEvent::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            XmlEvent::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            XmlEvent::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            XmlEvent::Text(t) if in_text => out.push_str(&t.unescape()?),
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
