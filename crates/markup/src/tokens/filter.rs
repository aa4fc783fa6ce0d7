// ABOUTME: Token classification, filter-set parsing and the span-preserving token filter.
// ABOUTME: Keeps the raw source of every token whose category is selected, in document order.

//! Token filtering.
//!
//! A filter spec is a whitespace-separated list of keywords. `TEXT` and
//! `COMMENT` select text runs and comments; any other word selects start,
//! end and self-closing tags with exactly that (lower-case) name. Filtering
//! is per token and carries no state, so
//! `filter(a + b) == filter(a) + filter(b)` whenever the seam falls on a
//! token boundary, and filtering a filtered output again changes nothing.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use super::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::{HtmlError, Result};

pub const TEXT_KEYWORD: &str = "TEXT";
pub const COMMENT_KEYWORD: &str = "COMMENT";

/// Filter category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category<'t> {
    Tag(&'t str),
    Text,
    Comment,
}

/// Maps a token to its filter category.
///
/// Start, end and self-closing tags share one category per tag name.
/// Doctypes have no category and are never kept.
pub fn classify<'t>(token: &'t Token<'_>) -> Option<Category<'t>> {
    match token.kind {
        TokenKind::StartTag | TokenKind::EndTag | TokenKind::SelfClosingTag => {
            token.tag_name.as_deref().map(Category::Tag)
        }
        TokenKind::Text => Some(Category::Text),
        TokenKind::Comment => Some(Category::Comment),
        TokenKind::Doctype => None,
    }
}

/// Set of categories selected by a filter spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    text: bool,
    comment: bool,
    tags: BTreeSet<String>,
}

impl FilterSet {
    /// Parses a whitespace-separated keyword list. Order and duplicates are ignored.
    pub fn parse(spec: &str) -> Self {
        let mut set = Self::default();
        for word in spec.split_whitespace() {
            match word {
                TEXT_KEYWORD => set.text = true,
                COMMENT_KEYWORD => set.comment = true,
                tag => {
                    set.tags.insert(tag.to_string());
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        !self.text && !self.comment && self.tags.is_empty()
    }

    pub fn keeps(&self, category: Category<'_>) -> bool {
        match category {
            Category::Tag(name) => self.tags.contains(name),
            Category::Text => self.text,
            Category::Comment => self.comment,
        }
    }

    pub fn union(&self, other: &FilterSet) -> FilterSet {
        FilterSet {
            text: self.text || other.text,
            comment: self.comment || other.comment,
            tags: self.tags.union(&other.tags).cloned().collect(),
        }
    }

    pub fn is_subset(&self, other: &FilterSet) -> bool {
        (!self.text || other.text)
            && (!self.comment || other.comment)
            && self.tags.is_subset(&other.tags)
    }
}

impl FromStr for FilterSet {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(FilterSet::parse(s))
    }
}

/// Canonical spec: reserved keywords first, then tag names in sorted order.
impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reserved = [
            (self.text, TEXT_KEYWORD),
            (self.comment, COMMENT_KEYWORD),
        ];
        let words = reserved
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, word)| *word)
            .chain(self.tags.iter().map(String::as_str));
        for (i, word) in words.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

/// Concatenates, in order, the raw source of every token `filter` keeps.
///
/// Kept spans are copied verbatim: entities stay encoded and tags keep
/// their original case, quoting and whitespace. A tag left open at end of
/// input ends the scan cleanly and contributes nothing.
pub fn filter_tokens(document: &str, filter: &FilterSet) -> Result<String> {
    filter_tokens_with_limit(document, filter, None)
}

/// [`filter_tokens`] with an optional per-token size limit.
///
/// A token longer than `max_token_len` stops the scan; the error carries
/// everything emitted up to that point.
pub fn filter_tokens_with_limit(
    document: &str,
    filter: &FilterSet,
    max_token_len: Option<usize>,
) -> Result<String> {
    let mut out = String::new();
    if filter.is_empty() || document.is_empty() {
        return Ok(out);
    }

    let mut tokenizer = Tokenizer::new(document);
    if let Some(limit) = max_token_len {
        tokenizer = tokenizer.with_max_token_len(limit);
    }

    let mut seen = 0usize;
    let mut kept = 0usize;
    for item in tokenizer.by_ref() {
        let token = match item {
            Ok(token) => token,
            Err(fault) => {
                debug!(
                    offset = fault.offset,
                    limit = fault.limit,
                    seen,
                    kept,
                    "token filter stopped at oversized token"
                );
                return Err(HtmlError::Tokenize(fault.with_partial(out)));
            }
        };
        seen += 1;
        if classify(&token).is_some_and(|category| filter.keeps(category)) {
            out.push_str(token.raw);
            kept += 1;
        }
    }

    if let Some(offset) = tokenizer.truncated_at() {
        debug!(offset, "input ended inside a tag");
    }
    trace!(filter = %filter, seen, kept, bytes = out.len(), "filtered token stream");
    Ok(out)
}
