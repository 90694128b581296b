//! Tagged document tree consumed by the walker.
//!
//! JSON and YAML deserialize into format-specific generic values; both are
//! converted into this one `Node` shape so the walker pattern-matches a
//! single vocabulary. YAML is the looser source: mapping keys may be
//! arbitrary values there, so the conversion enforces string keys up front.

use std::collections::BTreeMap;

use crate::types::errors::{Error, ErrorKind, Result};

/// Leaf value of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Number(f64),
    Null,
}

/// One node of the generic document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Sequence(Vec<Node>),
    Mapping(BTreeMap<String, Node>),
    Scalar(Scalar),
}

impl Node {
    /// Convert a parsed JSON value. JSON object keys are always strings,
    /// so this conversion cannot fail.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match value {
            J::Null => Node::Scalar(Scalar::Null),
            J::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            J::Number(n) => Node::Scalar(Scalar::Number(n.as_f64().unwrap_or(0.0))),
            J::String(s) => Node::Scalar(Scalar::String(s)),
            J::Array(items) => Node::Sequence(items.into_iter().map(Node::from_json).collect()),
            J::Object(map) => Node::Mapping(
                map.into_iter().map(|(k, v)| (k, Node::from_json(v))).collect(),
            ),
        }
    }

    /// Convert a parsed YAML value, rejecting mappings whose keys are not
    /// strings and tagged values, neither of which the configuration
    /// grammar admits.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        use serde_yaml::Value as Y;
        match value {
            Y::Null => Ok(Node::Scalar(Scalar::Null)),
            Y::Bool(b) => Ok(Node::Scalar(Scalar::Bool(b))),
            Y::Number(n) => Ok(Node::Scalar(Scalar::Number(n.as_f64().unwrap_or(0.0)))),
            Y::String(s) => Ok(Node::Scalar(Scalar::String(s))),
            Y::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(Node::from_yaml(item)?);
                }
                Ok(Node::Sequence(out))
            }
            Y::Mapping(map) => {
                let mut out = BTreeMap::new();
                for (k, v) in map {
                    let Y::String(key) = k else {
                        return Err(Error::new(
                            ErrorKind::ConfigStructure,
                            "mapping key is not a string",
                        ));
                    };
                    out.insert(key, Node::from_yaml(v)?);
                }
                Ok(Node::Mapping(out))
            }
            Y::Tagged(_) => Err(Error::new(
                ErrorKind::ConfigStructure,
                "unsupported tagged YAML value",
            )),
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

/// Required string field of an entry mapping.
pub(crate) fn string_val<'a>(m: &'a BTreeMap<String, Node>, key: &str) -> Result<&'a str> {
    match m.get(key) {
        None => Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("key not found: {key}"),
        )),
        Some(Node::Scalar(Scalar::String(s))) => Ok(s),
        Some(_) => Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("expected a string for key: {key}"),
        )),
    }
}

/// Optional string field; `None` when absent, error when mistyped.
pub(crate) fn opt_string_val<'a>(
    m: &'a BTreeMap<String, Node>,
    key: &str,
) -> Result<Option<&'a str>> {
    match m.get(key) {
        None => Ok(None),
        Some(Node::Scalar(Scalar::String(s))) => Ok(Some(s)),
        Some(_) => Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("expected a string for key: {key}"),
        )),
    }
}

/// Optional boolean field; `None` when absent, error when mistyped.
pub(crate) fn opt_bool_val(m: &BTreeMap<String, Node>, key: &str) -> Result<Option<bool>> {
    match m.get(key) {
        None => Ok(None),
        Some(Node::Scalar(Scalar::Bool(b))) => Ok(Some(*b)),
        Some(_) => Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("expected a boolean for key: {key}"),
        )),
    }
}

/// Optional sequence field; `None` when absent, error when mistyped.
pub(crate) fn opt_seq_val<'a>(
    m: &'a BTreeMap<String, Node>,
    key: &str,
) -> Result<Option<&'a [Node]>> {
    match m.get(key) {
        None => Ok(None),
        Some(Node::Sequence(items)) => Ok(Some(items)),
        Some(_) => Err(Error::new(
            ErrorKind::ConfigStructure,
            format!("expected an array for key: {key}"),
        )),
    }
}
