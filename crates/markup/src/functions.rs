// ABOUTME: Host function-call boundary exposing token filtering, selector query and replace as callables.
// ABOUTME: Provides typed entry points plus a name/arity registry over serde_json values for query-language hosts.

//! Callables for a host query language.
//!
//! A host evaluates `input | name(args...)`: the document is the call's
//! input value and the remaining parameters arrive as arguments. Every
//! callable is a pure function of its inputs, so a single [`Registry`] can
//! be shared across threads.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::dom::{query_selector, replace_selector};
use crate::error::HtmlError;
use crate::tokens::{filter_tokens, FilterSet};

/// Keeps the raw source of every token selected by `filter_spec`.
pub fn token_filter(document: &str, filter_spec: &str) -> Result<String, HtmlError> {
    filter_tokens(document, &FilterSet::parse(filter_spec))
}

/// Outer markup of every element matching `selector`.
pub fn selector_query(document: &str, selector: &str) -> Result<Vec<String>, HtmlError> {
    query_selector(document, selector)
}

/// The document with every element matching `selector` replaced by `template`.
pub fn selector_replace(document: &str, selector: &str, template: &str) -> Result<String, HtmlError> {
    replace_selector(document, selector, template)
}

/// Errors raised at the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("{0} is not defined")]
    Unknown(String),

    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: Arity,
        got: usize,
    },

    #[error("{name}: {param} must be a string, got {found}")]
    NotAString {
        name: String,
        param: &'static str,
        found: &'static str,
    },

    #[error("{name}: {source}")]
    Html {
        name: String,
        #[source]
        source: HtmlError,
    },
}

impl FunctionError {
    /// The markup error behind this failure, if any.
    pub fn html_error(&self) -> Option<&HtmlError> {
        match self {
            FunctionError::Html { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Accepted argument count range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub fn accepts(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

type Callable = fn(&str, &[String]) -> Result<Value, HtmlError>;

/// A named callable with its arity.
#[derive(Clone)]
pub struct Function {
    name: String,
    arity: Arity,
    call: Callable,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

fn call_token_filter(document: &str, args: &[String]) -> Result<Value, HtmlError> {
    token_filter(document, &args[0]).map(Value::String)
}

fn call_selector_query(document: &str, args: &[String]) -> Result<Value, HtmlError> {
    let matches = selector_query(document, &args[0])?;
    Ok(Value::Array(matches.into_iter().map(Value::String).collect()))
}

fn call_selector_replace(document: &str, args: &[String]) -> Result<Value, HtmlError> {
    selector_replace(document, &args[0], &args[1]).map(Value::String)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expect_string(name: &str, param: &'static str, value: &Value) -> Result<String, FunctionError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FunctionError::NotAString {
            name: name.to_string(),
            param,
            found: type_name(other),
        }),
    }
}

/// Name-indexed set of callables.
#[derive(Debug, Clone)]
pub struct Registry {
    functions: BTreeMap<String, Function>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Registered functions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Invoke `name` with `input` as the document and `args` as parameters.
    pub fn call(&self, name: &str, input: &Value, args: &[Value]) -> Result<Value, FunctionError> {
        let function = self
            .get(name)
            .ok_or_else(|| FunctionError::Unknown(name.to_string()))?;

        if !function.arity.accepts(args.len()) {
            return Err(FunctionError::Arity {
                name: name.to_string(),
                expected: function.arity,
                got: args.len(),
            });
        }

        let document = expect_string(name, "input", input)?;
        let args = args
            .iter()
            .map(|arg| expect_string(name, "argument", arg))
            .collect::<Result<Vec<_>, _>>()?;

        (function.call)(&document, &args).map_err(|source| FunctionError::Html {
            name: name.to_string(),
            source,
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

/// Builder for a [`Registry`] with host-specific function names.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    token_filter: String,
    selector_query: String,
    selector_replace: String,
}

impl RegistryBuilder {
    /// Default names: `htmlt`, `htmlq`, `htmlr`.
    pub fn new() -> Self {
        Self {
            token_filter: "htmlt".to_string(),
            selector_query: "htmlq".to_string(),
            selector_replace: "htmlr".to_string(),
        }
    }

    /// Set the name of the token filter callable.
    pub fn token_filter_name(mut self, name: impl Into<String>) -> Self {
        self.token_filter = name.into();
        self
    }

    /// Set the name of the selector query callable.
    pub fn selector_query_name(mut self, name: impl Into<String>) -> Self {
        self.selector_query = name.into();
        self
    }

    /// Set the name of the selector replace callable.
    pub fn selector_replace_name(mut self, name: impl Into<String>) -> Self {
        self.selector_replace = name.into();
        self
    }

    pub fn build(self) -> Registry {
        let entries: [(String, Arity, Callable); 3] = [
            (self.token_filter, Arity::exactly(1), call_token_filter),
            (self.selector_query, Arity::exactly(1), call_selector_query),
            (self.selector_replace, Arity::exactly(2), call_selector_replace),
        ];
        let functions = entries
            .into_iter()
            .map(|(name, arity, call)| (name.clone(), Function { name, arity, call }))
            .collect();
        Registry { functions }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
