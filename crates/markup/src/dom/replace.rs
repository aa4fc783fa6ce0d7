// ABOUTME: Selector replace/delete: swaps matched elements for verbatim template content and re-serializes.
// ABOUTME: Replacement templates may splice the matched element's own markup at every `<>` placeholder.

//! Selector-driven replacement.
//!
//! Every replacement is computed from the untouched tree before the first
//! mutation, so overlapping matches (an element and its descendant) never
//! see each other's edits and match order does not affect the result. Each
//! matched element is then swapped for an empty placeholder node whose
//! serialization is the computed content, written verbatim.

use std::convert::Infallible;
use std::str::FromStr;

use ego_tree::{NodeId, Tree};
use scraper::node::Text;
use scraper::{Html, Node};
use tracing::debug;

use super::selector::{CompiledSelector, MatchSet};
use super::serialize::{document_html, outer_html, RawContent};
use crate::error::Result;

/// Marker replaced by the matched element's original markup.
pub const PLACEHOLDER: &str = "<>";

/// A replacement template, split on [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<String>,
}

impl Template {
    pub fn parse(template: &str) -> Self {
        Self {
            pieces: template.split(PLACEHOLDER).map(str::to_string).collect(),
        }
    }

    pub fn has_placeholder(&self) -> bool {
        self.pieces.len() > 1
    }

    /// True for the empty template, which deletes matches.
    pub fn is_deletion(&self) -> bool {
        self.pieces.len() == 1 && self.pieces[0].is_empty()
    }

    /// Content for one match: each placeholder gets its own copy of `original`.
    pub fn render(&self, original: &str) -> String {
        self.pieces.join(original)
    }
}

impl FromStr for Template {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Template::parse(s))
    }
}

/// Replaces every element matching `selector` with `template` and returns the whole document.
///
/// An empty template deletes matches. With no matches the document comes
/// back as the parser normalized it (missing `html`/`head`/`body` added).
pub fn replace_selector(document: &str, selector: &str, template: &str) -> Result<String> {
    let selector = CompiledSelector::compile(selector)?;
    let template = Template::parse(template);
    let mut html = Html::parse_document(document);
    let matches = selector.select(&html);

    let replacements = render_replacements(&html, &matches, &template);
    let raw = splice_raw(&mut html.tree, replacements);

    debug!(
        selector = selector.as_str(),
        matches = matches.len(),
        spliced = raw.len(),
        deletion = template.is_deletion(),
        "selector replace"
    );

    Ok(document_html(&html, &raw))
}

/// Content for every match, computed against the unmodified tree.
fn render_replacements(
    html: &Html,
    matches: &MatchSet,
    template: &Template,
) -> Vec<(NodeId, String)> {
    matches
        .iter()
        .filter_map(|id| {
            let node = html.tree.get(id)?;
            let content = if template.has_placeholder() {
                template.render(&outer_html(node))
            } else {
                template.render("")
            };
            Some((id, content))
        })
        .collect()
}

/// Detaches each node, leaving an empty placeholder registered with its content.
fn splice_raw(tree: &mut Tree<Node>, replacements: Vec<(NodeId, String)>) -> RawContent {
    let mut raw = RawContent::new();
    for (id, content) in replacements {
        let Some(mut node) = tree.get_mut(id) else {
            continue;
        };
        if node.parent().is_none() {
            continue;
        }
        let placeholder = node
            .insert_before(Node::Text(Text { text: "".into() }))
            .id();
        node.detach();
        raw.insert(placeholder, content);
    }
    raw
}
