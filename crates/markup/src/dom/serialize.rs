// ABOUTME: HTML serialization of scraper node trees with support for verbatim raw-content nodes.
// ABOUTME: Follows the HTML fragment serialization rules for escaping, void elements and raw text.

use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use html5ever::{ns, QualName};
use scraper::{Html, Node};

/// Verbatim markup standing in for a node, keyed by the node's arena id.
///
/// The serializer writes the string as-is in place of the node and its subtree.
pub type RawContent = HashMap<NodeId, String>;

/// Elements serialized without children or an end tag.
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text children are written without escaping.
fn is_raw_text_parent(tag: &str) -> bool {
    matches!(
        tag,
        "iframe" | "noembed" | "noframes" | "noscript" | "plaintext" | "script" | "style" | "xmp"
    )
}

/// Elements whose first newline is dropped by the parser and must be written back.
fn drops_leading_newline(tag: &str) -> bool {
    matches!(tag, "pre" | "textarea" | "listing")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('"', "&quot;")
}

/// Serializes a node including its own tag.
pub fn outer_html(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    write_node(node, &RawContent::new(), &mut out);
    out
}

/// Serializes a whole document, substituting `raw` content where registered.
pub fn document_html(html: &Html, raw: &RawContent) -> String {
    let mut out = String::new();
    write_node(html.tree.root(), raw, &mut out);
    out
}

fn write_node(node: NodeRef<'_, Node>, raw: &RawContent, out: &mut String) {
    if let Some(content) = raw.get(&node.id()) {
        out.push_str(content);
        return;
    }

    match node.value() {
        Node::Document | Node::Fragment => write_children(node, raw, out),
        Node::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            let (public_id, system_id) = (doctype.public_id(), doctype.system_id());
            if !public_id.is_empty() {
                out.push_str(" PUBLIC \"");
                out.push_str(public_id);
                out.push('"');
                if !system_id.is_empty() {
                    out.push_str(" \"");
                    out.push_str(system_id);
                    out.push('"');
                }
            } else if !system_id.is_empty() {
                out.push_str(" SYSTEM \"");
                out.push_str(system_id);
                out.push('"');
            }
            out.push('>');
        }
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Text(text) => {
            let verbatim = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|el| is_raw_text_parent(el.name()));
            if verbatim {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        Node::Element(el) => {
            let tag = el.name();
            out.push('<');
            out.push_str(tag);
            for (name, value) in el.attrs.iter() {
                out.push(' ');
                write_attr_name(name, out);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }

            if is_void_element(tag) {
                out.push_str("/>");
                return;
            }
            out.push('>');

            if drops_leading_newline(tag) {
                let leading_newline = node
                    .first_child()
                    .and_then(|child| child.value().as_text())
                    .is_some_and(|text| text.starts_with('\n'));
                if leading_newline {
                    out.push('\n');
                }
            }

            write_children(node, raw, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Node::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(&pi.target);
            out.push(' ');
            out.push_str(&pi.data);
            out.push('>');
        }
    }
}

/// Attribute names keep the `xml:`, `xlink:` and `xmlns:` prefixes of foreign content.
fn write_attr_name(name: &QualName, out: &mut String) {
    match name.ns {
        ns!() => {}
        ns!(xml) => out.push_str("xml:"),
        ns!(xmlns) => {
            if &*name.local != "xmlns" {
                out.push_str("xmlns:");
            }
        }
        ns!(xlink) => out.push_str("xlink:"),
        _ => {
            if let Some(prefix) = &name.prefix {
                out.push_str(prefix);
                out.push(':');
            }
        }
    }
    out.push_str(&name.local);
}

fn write_children(node: NodeRef<'_, Node>, raw: &RawContent, out: &mut String) {
    for child in node.children() {
        write_node(child, raw, out);
    }
}
