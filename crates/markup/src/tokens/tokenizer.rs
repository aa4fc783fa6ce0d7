// ABOUTME: Lenient left-to-right HTML tokenizer that keeps the verbatim source span of every token.
// ABOUTME: Classifies tags, text, comments and doctypes; input ending inside a tag ends the stream cleanly.

//! Span-preserving HTML tokenizer.
//!
//! Tokens are produced strictly left to right and never overlap. Their
//! `raw` spans cover the input byte for byte, except for two cases that
//! yield no token at all: `</>` and a tag still open at end of input.
//! The scanner follows the WHATWG tokenizer closely enough for tag, comment
//! and raw-text boundaries to land where a browser would put them, but it
//! never decodes entities or normalizes anything inside a span.

use std::borrow::Cow;

use memchr::memchr;
use serde::Serialize;

use crate::error::TokenizeFault;

/// Elements whose content is scanned as a single text run up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "textarea",
    "title",
    "xmp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    StartTag,
    EndTag,
    SelfClosingTag,
    Text,
    Comment,
    Doctype,
}

impl TokenKind {
    pub fn is_tag(self) -> bool {
        matches!(
            self,
            TokenKind::StartTag | TokenKind::EndTag | TokenKind::SelfClosingTag
        )
    }
}

/// One lexical unit of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// ASCII-lowercased tag name; only set for tag kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<Cow<'a, str>>,
    /// Exact source text of the token.
    pub raw: &'a str,
    /// Byte offset of `raw` in the source.
    pub offset: usize,
}

/// What a `<` turned out to open.
enum Markup {
    StartTag,
    EndTag,
    Declaration,
    ProcessingInstruction,
}

/// Forward-only token iterator over one document.
///
/// Input ending inside a tag ends the stream like any other end of input;
/// the open tag's bytes are dropped and [`Tokenizer::truncated_at`] reports
/// where it began. With a size limit set, a longer token yields
/// `Err(TokenizeFault)` once and the stream stops.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    raw_tag: Option<String>,
    max_token_len: Option<usize>,
    truncated: Option<usize>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_tag: None,
            max_token_len: None,
            truncated: None,
            done: false,
        }
    }

    /// Fail on any token longer than `limit` bytes.
    pub fn with_max_token_len(mut self, limit: usize) -> Self {
        self.max_token_len = Some(limit);
        self
    }

    /// Offset of the tag left open at end of input, once the stream reached it.
    pub fn truncated_at(&self) -> Option<usize> {
        self.truncated
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn token(&self, kind: TokenKind, tag_name: Option<Cow<'a, str>>, start: usize) -> Token<'a> {
        let src = self.src;
        Token {
            kind,
            tag_name,
            raw: &src[start..self.pos],
            offset: start,
        }
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let bytes = self.bytes();
        let mut start = self.pos;
        let mut cursor = start;

        loop {
            let Some(lt) = memchr(b'<', &bytes[cursor..]).map(|i| cursor + i) else {
                self.pos = bytes.len();
                return (self.pos > start).then(|| self.token(TokenKind::Text, None, start));
            };

            let markup = match bytes.get(lt + 1) {
                Some(c) if c.is_ascii_alphabetic() => Some(Markup::StartTag),
                // "</" at end of input stays text
                Some(b'/') if lt + 2 < bytes.len() => Some(Markup::EndTag),
                Some(b'!') => Some(Markup::Declaration),
                Some(b'?') => Some(Markup::ProcessingInstruction),
                _ => None,
            };
            let Some(markup) = markup else {
                cursor = lt + 1;
                continue;
            };

            if lt > start {
                self.pos = lt;
                return Some(self.token(TokenKind::Text, None, start));
            }

            // "</>" produces no token; its bytes are dropped
            if matches!(markup, Markup::EndTag) && bytes[lt + 2] == b'>' {
                start = lt + 3;
                cursor = start;
                self.pos = start;
                continue;
            }

            return match markup {
                Markup::StartTag => self.start_tag(lt),
                Markup::EndTag => self.end_tag(lt),
                Markup::Declaration => Some(self.declaration(lt)),
                Markup::ProcessingInstruction => {
                    self.pos = close_angle(bytes, lt + 2);
                    Some(self.token(TokenKind::Comment, None, lt))
                }
            };
        }
    }

    /// Records a tag left open at `lt` and consumes the rest of the input.
    fn truncate(&mut self, lt: usize) -> Option<Token<'a>> {
        self.truncated = Some(lt);
        self.pos = self.src.len();
        None
    }

    fn start_tag(&mut self, lt: usize) -> Option<Token<'a>> {
        let (src, bytes) = (self.src, self.bytes());
        let Some((name_end, end)) = scan_tag(bytes, lt + 1) else {
            return self.truncate(lt);
        };
        self.pos = end;

        let name = lowercase(&src[lt + 1..name_end]);
        if RAW_TEXT_ELEMENTS.iter().any(|raw| name == *raw) {
            self.raw_tag = Some(name.to_string());
        }

        let kind = if bytes[end - 2] == b'/' {
            TokenKind::SelfClosingTag
        } else {
            TokenKind::StartTag
        };
        Some(self.token(kind, Some(name), lt))
    }

    fn end_tag(&mut self, lt: usize) -> Option<Token<'a>> {
        let (src, bytes) = (self.src, self.bytes());
        if !bytes[lt + 2].is_ascii_alphabetic() {
            self.pos = close_angle(bytes, lt + 2);
            return Some(self.token(TokenKind::Comment, None, lt));
        }

        let Some((name_end, end)) = scan_tag(bytes, lt + 2) else {
            return self.truncate(lt);
        };
        self.pos = end;
        let name = lowercase(&src[lt + 2..name_end]);
        Some(self.token(TokenKind::EndTag, Some(name), lt))
    }

    /// `<!` opens a comment, a doctype or a bogus comment.
    fn declaration(&mut self, lt: usize) -> Token<'a> {
        let bytes = self.bytes();
        let body = &bytes[lt + 2..];

        if body.starts_with(b"--") {
            self.pos = comment_end(bytes, lt + 4);
            return self.token(TokenKind::Comment, None, lt);
        }

        let is_doctype = body.len() >= 7 && body[..7].eq_ignore_ascii_case(b"doctype");
        self.pos = close_angle(bytes, lt + 2);
        if is_doctype {
            self.token(TokenKind::Doctype, None, lt)
        } else {
            self.token(TokenKind::Comment, None, lt)
        }
    }

    /// Content of a raw-text element, up to its end tag.
    fn raw_text(&mut self, tag: &str) -> Option<Token<'a>> {
        let start = self.pos;
        self.pos = if tag == "plaintext" {
            self.src.len()
        } else {
            raw_text_end(self.bytes(), start, tag.as_bytes())
        };
        (self.pos > start).then(|| self.token(TokenKind::Text, None, start))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, TokenizeFault>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let raw = self.raw_tag.take().and_then(|tag| self.raw_text(&tag));
        let token = match raw {
            Some(token) => Some(token),
            None if self.pos >= self.src.len() => None,
            None => self.next_token(),
        };
        let Some(token) = token else {
            self.done = true;
            return None;
        };

        if let Some(limit) = self.max_token_len {
            if token.raw.len() > limit {
                self.done = true;
                return Some(Err(TokenizeFault::token_too_long(token.offset, limit)));
            }
        }
        Some(Ok(token))
    }
}

fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\n' | b'\r' | b'\t' | b'\x0c')
}

fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|c| c.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

fn skip_space(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).copied().is_some_and(is_space) {
        pos += 1;
    }
    pos
}

/// Index just past the next `>` at or after `pos`, or end of input.
fn close_angle(bytes: &[u8], pos: usize) -> usize {
    match memchr(b'>', &bytes[pos.min(bytes.len())..]) {
        Some(i) => pos + i + 1,
        None => bytes.len(),
    }
}

/// Scans a tag whose name starts at `pos`.
///
/// Returns the end of the name and the index just past the closing `>`,
/// or `None` when input ends first.
fn scan_tag(bytes: &[u8], mut pos: usize) -> Option<(usize, usize)> {
    let name_end = loop {
        let c = *bytes.get(pos)?;
        if is_space(c) {
            let end = pos;
            pos += 1;
            break end;
        }
        if c == b'/' || c == b'>' {
            break pos;
        }
        pos += 1;
    };

    pos = skip_space(bytes, pos);
    loop {
        if *bytes.get(pos)? == b'>' {
            return Some((name_end, pos + 1));
        }
        pos = scan_attr_name(bytes, pos)?;
        pos = scan_attr_value(bytes, pos)?;
        pos = skip_space(bytes, pos);
    }
}

fn scan_attr_name(bytes: &[u8], mut pos: usize) -> Option<usize> {
    let start = pos;
    loop {
        match *bytes.get(pos)? {
            // a leading '=' belongs to the name
            b'=' if pos == start => {}
            b'=' | b'/' | b'>' => return Some(pos),
            c if is_space(c) => return Some(pos),
            _ => {}
        }
        pos += 1;
    }
}

fn scan_attr_value(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut pos = skip_space(bytes, pos);
    match *bytes.get(pos)? {
        b'/' => return Some(pos + 1),
        b'=' => pos += 1,
        _ => return Some(pos),
    }

    pos = skip_space(bytes, pos);
    match *bytes.get(pos)? {
        b'>' => Some(pos),
        quote @ (b'"' | b'\'') => {
            let close = memchr(quote, &bytes[pos + 1..])?;
            Some(pos + 1 + close + 1)
        }
        _ => loop {
            let c = *bytes.get(pos)?;
            if is_space(c) || c == b'>' {
                return Some(pos);
            }
            pos += 1;
        },
    }
}

/// Index just past the end of a comment whose body starts at `pos`.
fn comment_end(bytes: &[u8], mut pos: usize) -> usize {
    let mut dashes = 0;
    let mut beginning = true;
    loop {
        let Some(&c) = bytes.get(pos) else {
            return bytes.len();
        };
        pos += 1;
        match c {
            b'-' => {
                dashes += 1;
                continue;
            }
            // "<!-->" and "<!--->" close immediately
            b'>' if dashes >= 2 || beginning => return pos,
            b'!' if dashes >= 2 => match bytes.get(pos) {
                None => return bytes.len(),
                Some(b'>') => return pos + 1,
                Some(b'-') => {
                    pos += 1;
                    dashes = 1;
                    beginning = false;
                    continue;
                }
                Some(_) => pos += 1,
            },
            _ => {}
        }
        dashes = 0;
        beginning = false;
    }
}

/// Start of the `</tag` that closes a raw-text element, or end of input.
fn raw_text_end(bytes: &[u8], mut pos: usize, tag: &[u8]) -> usize {
    while let Some(i) = memchr(b'<', &bytes[pos..]) {
        let lt = pos + i;
        let name_start = lt + 2;
        let name_end = name_start + tag.len();
        let closes = bytes.get(lt + 1) == Some(&b'/')
            && bytes
                .get(name_start..name_end)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && bytes
                .get(name_end)
                .is_some_and(|&c| is_space(c) || c == b'/' || c == b'>');
        if closes {
            return lt;
        }
        pos = lt + 1;
    }
    bytes.len()
}
