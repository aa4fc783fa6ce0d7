// ABOUTME: Example-based tests for the token filter over comments, text, paragraphs and void tags.
// ABOUTME: Covers repeated documents, keyword padding and alphabet-sequence filtering.

mod common;

use common::{alphabet_doc, alphabet_spec};
use jqx_markup::{filter_tokens, filter_tokens_with_limit, token_filter, FilterSet};
use pretty_assertions::assert_eq;

fn filter(document: &str, spec: &str) -> String {
    filter_tokens(document, &FilterSet::parse(spec)).unwrap()
}

#[test]
fn keeps_text_and_selected_tags() {
    let spec = "  TEXT  a  img  ";
    assert_eq!(
        filter("<!-- This is a comment --><body><p>Some &lt;p&gt; text</p></body>", spec),
        "Some &lt;p&gt; text"
    );
    assert_eq!(
        filter(r#"<p>Hello</p><img src="image.jpg" alt="olleh"/>"#, spec),
        r#"Hello<img src="image.jpg" alt="olleh"/>"#
    );
}

#[test]
fn comments_and_text() {
    for i in 0..5 {
        let full = "<!-- comment -->text".repeat(i);
        let comments = "<!-- comment -->".repeat(i);
        let plain = "text".repeat(i);

        assert_eq!(filter(&full, "  TEXT  "), plain);
        assert_eq!(filter(&full, "  TEXT  COMMENT  "), full);
        assert_eq!(filter(&full, "  COMMENT  "), comments);
        assert_eq!(filter(&full, "    "), "");

        assert_eq!(filter(&comments, "  TEXT  COMMENT  "), comments);
        assert_eq!(filter(&comments, "  TEXT  "), "");
        assert_eq!(filter(&comments, "  COMMENT  "), comments);
        assert_eq!(filter(&comments, "    "), "");

        assert_eq!(filter(&plain, "  TEXT  COMMENT  "), plain);
        assert_eq!(filter(&plain, "  TEXT  "), plain);
        assert_eq!(filter(&plain, "  COMMENT  "), "");
        assert_eq!(filter(&plain, "    "), "");
    }
}

#[test]
fn paragraphs_and_text() {
    for i in 0..8 {
        let plain = "hello  world".repeat(i);
        let html = "<p>hello  world</p>".repeat(i);
        let empty_p = "<p></p>".repeat(i);

        assert_eq!(filter(&plain, "  TEXT  "), plain);
        assert_eq!(filter(&plain, "  TEXT  p  "), plain);
        assert_eq!(filter(&plain, "  p  "), "");
        assert_eq!(filter(&plain, "   "), "");

        assert_eq!(filter(&html, "  TEXT  "), plain);
        assert_eq!(filter(&html, "  TEXT  p  "), html);
        assert_eq!(filter(&html, "  p  "), empty_p);
        assert_eq!(filter(&html, "   "), "");

        assert_eq!(filter(&empty_p, "  TEXT  "), "");
        assert_eq!(filter(&empty_p, "  TEXT  p  "), empty_p);
        assert_eq!(filter(&empty_p, "  p  "), empty_p);
        assert_eq!(filter(&empty_p, "   "), "");
    }
}

#[test]
fn self_closing_separators() {
    let abc: String = ('a'..='m').collect();
    for i in 0..abc.len() {
        let mut letters: Vec<String> = abc.chars().map(String::from).collect();
        letters[i] = format!("<hr/>{}<hr/>", letters[i]);
        let want = letters.concat();
        let html = letters.join("<br/>");

        assert_eq!(filter(&html, "  TEXT  "), abc);
        assert_eq!(filter(&html, "  TEXT  hr  "), want);
        assert_eq!(filter(&html, "  TEXT  br  hr  "), html);
    }
}

/// Filtering a repeated alphabet sequence by a prefix, suffix or single
/// keyword keeps exactly the corresponding repeated tokens.
#[test]
fn alphabet_sequences() {
    let seq = [0, 1, 2, 3, 4, 5, 6];
    for i in 0..seq.len() {
        for rep in 1..=4 {
            let doc = alphabet_doc(&seq.repeat(rep));
            for keep in [&seq[..i], &seq[i..], &seq[i..i + 1]] {
                assert_eq!(
                    filter(&doc, &alphabet_spec(keep)),
                    alphabet_doc(&keep.repeat(rep)),
                    "keeping {keep:?} x{rep}"
                );
            }
        }
    }
}

#[test]
fn truncated_document_keeps_output_so_far() {
    assert_eq!(
        token_filter("<p>kept</p><a href=\"m.htm", "TEXT p").unwrap(),
        "<p>kept</p>"
    );
    assert_eq!(filter("text<", "TEXT"), "text<");
    assert_eq!(filter("text</di", "TEXT"), "text");
}

#[test]
fn oversized_token_reports_partial_output() {
    let err = filter_tokens_with_limit(
        "<p>kept</p><a href=\"a-rather-long-location.htm\">",
        &FilterSet::parse("TEXT p"),
        Some(24),
    )
    .unwrap_err();
    assert!(err.is_tokenize());
    let jqx_markup::HtmlError::Tokenize(fault) = err else {
        unreachable!()
    };
    assert_eq!(fault.partial, "<p>kept</p>");
    assert_eq!(fault.offset, 11);
}

#[test]
fn lone_angle_brackets_survive_as_text() {
    assert_eq!(filter("1 < 2 > 0 <3 a<", "TEXT"), "1 < 2 > 0 <3 a<");
    assert_eq!(filter("x</", "TEXT"), "x</");
}
