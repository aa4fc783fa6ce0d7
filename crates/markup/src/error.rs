// ABOUTME: Error types for markup processing including ErrorCode, TokenizeFault and HtmlError.
// ABOUTME: Provides the three disjoint failure kinds with convenience constructors and boolean helpers.

use std::fmt;
use std::io;

/// Error codes representing the categories of markup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Tokenize,
    SelectorSyntax,
    Parse,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Tokenize => "tokenize fault",
            ErrorCode::SelectorSyntax => "selector syntax error",
            ErrorCode::Parse => "parse fault",
        };
        write!(f, "{}", s)
    }
}

/// A single token grew past the tokenizer's size limit.
///
/// `partial` holds whatever a filter pass had already emitted when the fault
/// was hit; the tokenizer itself reports it empty. Input ending inside a tag
/// is a clean end of input, not a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("token at byte {offset} exceeds {limit} bytes")]
pub struct TokenizeFault {
    pub offset: usize,
    pub limit: usize,
    pub partial: String,
}

impl TokenizeFault {
    pub fn token_too_long(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            partial: String::new(),
        }
    }

    /// Attach the output accumulated before the fault.
    pub fn with_partial(mut self, partial: String) -> Self {
        self.partial = partial;
        self
    }

    pub fn into_partial(self) -> String {
        self.partial
    }
}

/// The main error type for markup operations.
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("tokenize fault: {0}")]
    Tokenize(#[from] TokenizeFault),

    #[error("selector syntax error: {selector:?}: {message}")]
    SelectorSyntax { selector: String, message: String },

    #[error("parse fault: {0}")]
    Parse(#[source] io::Error),
}

impl HtmlError {
    /// Create a SelectorSyntax error from the compiler's diagnostic.
    pub fn selector_syntax(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        HtmlError::SelectorSyntax {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a Parse error from an I/O failure feeding the parser.
    pub fn parse(source: io::Error) -> Self {
        HtmlError::Parse(source)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            HtmlError::Tokenize(_) => ErrorCode::Tokenize,
            HtmlError::SelectorSyntax { .. } => ErrorCode::SelectorSyntax,
            HtmlError::Parse(_) => ErrorCode::Parse,
        }
    }

    /// Returns true if this is a Tokenize error.
    pub fn is_tokenize(&self) -> bool {
        self.code() == ErrorCode::Tokenize
    }

    /// Returns true if this is a SelectorSyntax error.
    pub fn is_selector_syntax(&self) -> bool {
        self.code() == ErrorCode::SelectorSyntax
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code() == ErrorCode::Parse
    }
}

pub type Result<T> = std::result::Result<T, HtmlError>;
