// ABOUTME: Token-level HTML processing: the span-preserving tokenizer and the token filter.
// ABOUTME: Re-exports the tokenizer types, filter set and filter entry point.

pub mod filter;
pub mod tokenizer;

pub use filter::{classify, filter_tokens, filter_tokens_with_limit, Category, FilterSet};
pub use tokenizer::{Token, TokenKind, Tokenizer};
