// ABOUTME: Shared fixtures for markup integration tests: the token alphabet and proptest strategies.
// ABOUTME: Documents and filter specs are built from index sequences so expectations can be derived per token.

#![allow(dead_code)]

use proptest::collection::vec;
use proptest::prelude::*;

/// Well-formed HTML snippets, one per filter category.
pub const HTML_TOKENS: [&str; 9] = [
    "hello   world",
    "<!-- a  comment -->",
    "<p></p>",
    "</div>",
    "<span>",
    r#"<a href="m.htm">"#,
    r#"<img src="i.jpg"/>"#,
    "<br/>",
    "<hr/>",
];

/// Filter keywords matching `HTML_TOKENS` index for index, padded with whitespace.
pub const FILTER_WORDS: [&str; 9] = [
    "  TEXT  ",
    "  COMMENT  ",
    "  p  ",
    "  div  ",
    "  span  ",
    "  a  ",
    "  img  ",
    "  br  ",
    "  hr  ",
];

pub fn alphabet_doc(indices: &[usize]) -> String {
    indices.iter().map(|&i| HTML_TOKENS[i % HTML_TOKENS.len()]).collect()
}

pub fn alphabet_spec(indices: &[usize]) -> String {
    indices.iter().map(|&i| FILTER_WORDS[i % FILTER_WORDS.len()]).collect()
}

/// Naive reference: keep exactly the alphabet tokens whose index is selected.
pub fn reference_filter(doc: &[usize], keep: &[usize]) -> String {
    let kept: Vec<usize> = doc.iter().copied().filter(|i| keep.contains(i)).collect();
    alphabet_doc(&kept)
}

pub fn is_subsequence(sub: &str, sup: &str) -> bool {
    let mut rest = sup.bytes();
    sub.bytes().all(|b| rest.any(|c| c == b))
}

pub fn doc_indices() -> impl Strategy<Value = Vec<usize>> {
    vec(0..HTML_TOKENS.len(), 0..24)
}

pub fn spec_indices(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    vec(0..FILTER_WORDS.len(), 0..=max_len)
}
