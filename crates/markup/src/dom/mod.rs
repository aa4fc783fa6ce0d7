// ABOUTME: Tree-level HTML processing over scraper documents: selector matching, serialization, query and replace.
// ABOUTME: Re-exports the selector query and replace entry points.

//! Node-tree operations.
//!
//! Documents are parsed leniently with scraper (html5ever) into an
//! `ego_tree` arena. Selector matches are arena ids, so a match set taken
//! before a mutation stays valid after it.

pub mod query;
pub mod replace;
pub mod selector;
pub mod serialize;

pub use query::query_selector;
pub use replace::{replace_selector, Template, PLACEHOLDER};
pub use selector::{CompiledSelector, MatchSet};
