//! Context assembly from retrieved muse items

use crate::models::RetrievedItem;

/// Character budget for a single item's content inside the prompt. Bounds
/// prompt size and cost; the caller still receives the untruncated record.
pub const ITEM_CONTENT_BUDGET: usize = 500;

/// Visible separator so the model can distinguish items
const ITEM_SEPARATOR: &str = "\n\n---\n\n";

/// Render retrieved items into the bounded context block the model sees
#[must_use]
pub fn render_context(items: &[RetrievedItem]) -> String {
    items
        .iter()
        .map(render_item)
        .collect::<Vec<_>>()
        .join(ITEM_SEPARATOR)
}

fn render_item(item: &RetrievedItem) -> String {
    let description = item
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("N/A");

    format!(
        "Type: {}\nContent: {}\nDescription: {}",
        item.content_type,
        truncate_chars(&item.content, ITEM_CONTENT_BUDGET),
        description
    )
}

/// Truncate to at most `max` characters, respecting char boundaries
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
