// ABOUTME: Selector query: returns the serialized outer markup of every element a CSS selector matches.
// ABOUTME: The selector is compiled before the document is parsed so syntax errors never touch input.

use scraper::Html;
use tracing::debug;

use super::selector::CompiledSelector;
use super::serialize::outer_html;
use crate::error::Result;

/// Serialized markup of each element matching `selector`, in document order.
///
/// Malformed markup never fails; the lenient parser repairs it first, so
/// results reflect the repaired tree (e.g. a stray `<td>` outside a table is
/// dropped by the parser and cannot match).
pub fn query_selector(document: &str, selector: &str) -> Result<Vec<String>> {
    let selector = CompiledSelector::compile(selector)?;
    let html = Html::parse_document(document);
    let matches = selector.select(&html);

    debug!(selector = selector.as_str(), matches = matches.len(), "selector query");

    Ok(matches
        .iter()
        .filter_map(|id| html.tree.get(id))
        .map(outer_html)
        .collect())
}
