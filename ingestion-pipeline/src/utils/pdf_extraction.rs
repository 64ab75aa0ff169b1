use common::error::AppError;
use tokio::task;
use tracing::debug;

use crate::chunking::PageText;

/// Extracts the text layer of a PDF, one entry per page.
///
/// Pages are numbered from 1 in document order; pages whose text layer is
/// empty or whitespace-only are dropped. Fails when the document parses but
/// no page carries any text.
pub async fn extract_pdf_pages(pdf_bytes: Vec<u8>) -> Result<Vec<PageText>, AppError> {
    let raw_pages =
        task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&pdf_bytes))
            .await?
            .map_err(|err| AppError::Parsing(format!("Failed to extract text from PDF: {err}")))?;

    let pages = pages_from_raw(raw_pages);

    if pages.is_empty() {
        return Err(AppError::EmptyDocument(
            "No text content found in PDF".to_string(),
        ));
    }

    debug!(page_count = pages.len(), "extracted PDF text layer");

    Ok(pages)
}

fn pages_from_raw(raw_pages: Vec<String>) -> Vec<PageText> {
    raw_pages
        .into_iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| PageText::new(index as u32 + 1, text))
        .collect()
}
