// ABOUTME: CSS selector compilation and evaluation against a parsed scraper document.
// ABOUTME: Produces match sets of node ids in document order.

//! Selector matching.
//!
//! Selectors are compiled fresh for every call; nothing is cached between
//! documents. A [`MatchSet`] holds arena ids rather than references, so it
//! can be kept while the tree it came from is mutated.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::error::{HtmlError, Result};

/// A successfully compiled CSS selector.
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    source: String,
    selector: Selector,
}

impl CompiledSelector {
    /// Compiles `css`, failing with a selector-syntax error if it is invalid.
    pub fn compile(css: &str) -> Result<Self> {
        match Selector::parse(css) {
            Ok(selector) => Ok(Self {
                source: css.to_string(),
                selector,
            }),
            Err(err) => Err(HtmlError::selector_syntax(css, err)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Every element of `html` matching the selector, in document order.
    pub fn select(&self, html: &Html) -> MatchSet {
        let ids = html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| self.selector.matches(el))
            .map(|el| el.id())
            .collect();
        MatchSet { ids }
    }
}

/// Ordered node ids from one selector evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: Vec<NodeId>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().copied()
    }
}
