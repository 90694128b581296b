//! Configuration loading: format selection, deserialization into the
//! generic document tree, and the tree walk producing the path map.

pub mod attr;
pub mod node;
pub mod walker;

pub use attr::{parse_attr, parse_attr_pair};
pub use node::{Node, Scalar};
pub use walker::build_path_map;

use std::fs;
use std::path::Path;

use crate::types::errors::{Error, ErrorKind, Result};

/// Supported configuration document formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yml,
}

impl Format {
    /// Map a format name (as given on the command line or as a file
    /// extension) to a [`Format`].
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yml" | "yaml" => Ok(Format::Yml),
            other => Err(Error::new(
                ErrorKind::ConfigStructure,
                format!("invalid format: {other}"),
            )),
        }
    }

    /// Infer the format from a file path's extension, defaulting to json
    /// when there is no extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_name(ext),
            None => Ok(Format::Json),
        }
    }
}

/// Parse configuration text into the document tree.
pub fn parse_str(content: &str, format: Format) -> Result<Node> {
    match format {
        Format::Json => {
            let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
                Error::new(ErrorKind::ConfigStructure, format!("unable to parse json: {e}"))
            })?;
            Ok(Node::from_json(value))
        }
        Format::Yml => {
            let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
                Error::new(ErrorKind::ConfigStructure, format!("unable to parse yaml: {e}"))
            })?;
            Node::from_yaml(value)
        }
    }
}

/// Read and parse a configuration file. When `format` is `None` it is
/// inferred from the file extension, falling back to json.
pub fn load_path(path: &Path, format: Option<Format>) -> Result<Node> {
    let format = match format {
        Some(f) => f,
        None => Format::from_path(path)?,
    };
    let content = fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorKind::Filesystem,
            format!("unable to open file {}: {e}", path.display()),
        )
    })?;
    parse_str(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_name_accepts_both_yaml_spellings() {
        assert_eq!(Format::from_name("yml").unwrap(), Format::Yml);
        assert_eq!(Format::from_name("YAML").unwrap(), Format::Yml);
        assert_eq!(Format::from_name("json").unwrap(), Format::Json);
        assert!(Format::from_name("toml").is_err());
    }

    #[test]
    fn format_from_path_defaults_to_json() {
        assert_eq!(Format::from_path(Path::new("attrs")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("attrs.yml")).unwrap(), Format::Yml);
    }
}
