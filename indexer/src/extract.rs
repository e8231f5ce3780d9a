use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Extract raw text from `path`, dispatching on the file extension. A file
/// whose extension has no extractor yields empty text, as does extraction
/// failure: the error is logged and the document is indexed as empty, so
/// one bad file never aborts a build.
pub fn extract_text(path: &Path) -> String {
    let extracted = match extension(path).as_deref() {
        Some("pdf") => extract_pdf(path),
        Some("html" | "htm") => extract_html(path),
        Some("txt") => fs::read_to_string(path).map_err(anyhow::Error::from),
        _ => return String::new(),
    };
    match extracted {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "text extraction failed, indexing as empty");
            String::new()
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path).map_err(|err| anyhow!("{err}"))
}

fn extract_html(path: &Path) -> Result<String> {
    let html = fs::read_to_string(path)?;
    let doc = Html::parse_document(&html);
    let body = Selector::parse("body").expect("valid selector");
    Ok(doc
        .select(&body)
        .next()
        .map(|node| node.text().collect::<Vec<_>>().join(" "))
        .unwrap_or_default())
}
