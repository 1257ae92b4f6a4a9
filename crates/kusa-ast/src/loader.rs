use std::path::Path;

use crate::node::Node;
use crate::parser::{JsonTreeParser, ParseError, SourceParser};

/// Load a serialized syntax tree from disk.
pub fn load_tree(path: &Path) -> Result<Node, LoadError> {
    load_tree_with(&JsonTreeParser, path)
}

/// Load a source file from disk and run it through the given parser.
pub fn load_tree_with(parser: &dyn SourceParser, path: &Path) -> Result<Node, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_string_lossy().into_owned()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(path.to_string_lossy().into_owned(), e))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "loading tree");

    parser.parse(&content).map_err(|source| LoadError::Parse {
        file: path.to_string_lossy().into_owned(),
        source,
    })
}

/// Errors that prevent a tree from being loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Tree file not found: {0}")]
    NotFound(String),

    #[error("I/O error reading {0}: {1}")]
    Io(String, std::io::Error),

    #[error("Failed to parse {file}: {source}")]
    Parse { file: String, source: ParseError },
}
