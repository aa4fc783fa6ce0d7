// ABOUTME: Main library entry point for HTML-aware text extraction and document editing.
// ABOUTME: Re-exports the public API: token filtering, selector query/replace, errors and the host function registry.

//! jqx-markup - HTML processing callables for a JSON query language.
//!
//! Two independent views of a document are provided:
//!
//! - a flat token stream, filtered by category while keeping every kept
//!   token's exact source bytes ([`filter_tokens`]);
//! - a parsed node tree, queried and edited with CSS selectors
//!   ([`query_selector`], [`replace_selector`]).
//!
//! Every call parses its input from scratch and keeps nothing afterwards.
//!
//! # Example
//!
//! ```
//! use jqx_markup::{filter_tokens, query_selector, replace_selector, FilterSet};
//!
//! let text = filter_tokens("<p>Hello</p><!-- note -->", &FilterSet::parse("TEXT")).unwrap();
//! assert_eq!(text, "Hello");
//!
//! let items = query_selector("<ul><li>1</li><li>2</li></ul>", "li").unwrap();
//! assert_eq!(items, vec!["<li>1</li>", "<li>2</li>"]);
//!
//! let edited = replace_selector("<div><p>hello</p></div>", "p", "").unwrap();
//! assert_eq!(edited, "<html><head></head><body><div></div></body></html>");
//! ```

pub mod dom;
pub mod error;
pub mod functions;
pub mod source;
pub mod tokens;

pub use crate::dom::{query_selector, replace_selector, CompiledSelector, MatchSet, Template};
pub use crate::error::{ErrorCode, HtmlError, Result, TokenizeFault};
pub use crate::functions::{
    selector_query, selector_replace, token_filter, FunctionError, Registry, RegistryBuilder,
};
pub use crate::source::{decode_bytes, read_document};
pub use crate::tokens::{filter_tokens, filter_tokens_with_limit, FilterSet, Token, TokenKind, Tokenizer};
