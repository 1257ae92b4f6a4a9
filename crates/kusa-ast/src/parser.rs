use serde_json::error::Category;
use thiserror::Error;

use crate::node::Node;

/// Front end that turns source text into a syntax tree.
///
/// Grammar-driven parsers live outside this crate; anything that can produce
/// a [`Node`] tree or report a syntax error plugs in here.
pub trait SourceParser {
    /// Parse source text into the root node of a tree.
    fn parse(&self, source: &str) -> Result<Node, ParseError>;
}

/// Deepest object/array nesting `JsonTreeParser` accepts (serde_json's recursion limit).
pub const MAX_NESTING: usize = 128;

/// Reads the serialized tree a parser generator hands back (JSON).
///
/// Trees nested deeper than [`MAX_NESTING`] levels are rejected with
/// [`ParseError::TooDeep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreeParser;

impl SourceParser for JsonTreeParser {
    fn parse(&self, source: &str) -> Result<Node, ParseError> {
        if source.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        let root: Node = serde_json::from_str(source)?;
        tracing::debug!(
            root = root.kind(),
            nodes = root.node_count(),
            "parsed syntax tree"
        );
        Ok(root)
    }
}

/// Why a source text could not be turned into a tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("malformed tree at line {line}, column {column}: {message}")]
    Shape {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("tree nested deeper than {max} levels at line {line}, column {column}")]
    TooDeep {
        line: usize,
        column: usize,
        max: usize,
    },

    #[error("empty input")]
    Empty,
}

impl ParseError {
    /// 1-based line/column of the failure, when known.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::Syntax { line, column, .. }
            | ParseError::Shape { line, column, .. }
            | ParseError::TooDeep { line, column, .. } => Some((*line, *column)),
            ParseError::Empty => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        let line = err.line();
        let column = err.column();
        let message = err.to_string();
        if message.starts_with("recursion limit exceeded") {
            return ParseError::TooDeep {
                line,
                column,
                max: MAX_NESTING,
            };
        }
        match err.classify() {
            Category::Data => ParseError::Shape {
                line,
                column,
                message,
            },
            Category::Io | Category::Syntax | Category::Eof => ParseError::Syntax {
                line,
                column,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_tree() {
        let source = r#"{
            "type": "Ast",
            "body": [
                { "type": "Identifier", "value": "x" }
            ]
        }"#;

        let root = JsonTreeParser.parse(source).unwrap();
        assert_eq!(root.kind(), "Ast");
        assert_eq!(root.node_count(), 2);
    }

    #[test]
    fn test_parse_syntax_error_reports_location() {
        let source = "{\n  \"type\": \"Ast\",\n  \"body\": [ oops ]\n}";
        let err = JsonTreeParser.parse(source).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.location().map(|(line, _)| line), Some(3));
        assert!(err.to_string().starts_with("syntax error at line 3"));
    }

    #[test]
    fn test_parse_wrong_field_type_is_shape_error() {
        let source = r#"{ "type": "Identifier", "value": 12 }"#;
        let err = JsonTreeParser.parse(source).unwrap_err();
        assert!(matches!(err, ParseError::Shape { .. }));
    }

    fn nested_sum(depth: usize) -> String {
        let mut source = r#"{ "type": "Identifier", "value": "a" }"#.to_string();
        for _ in 0..depth {
            source = format!(
                r#"{{ "type": "InfixExpression", "left": {}, "operator": "+", "right": {{ "type": "Identifier", "value": "b" }} }}"#,
                source
            );
        }
        source
    }

    #[test]
    fn test_parse_moderately_nested_tree() {
        let root = JsonTreeParser.parse(&nested_sum(40)).unwrap();
        assert_eq!(root.node_count(), 81);
    }

    #[test]
    fn test_parse_too_deep_tree() {
        let err = JsonTreeParser.parse(&nested_sum(200)).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { max: MAX_NESTING, .. }));
        assert!(err.location().is_some());
        assert!(err.to_string().starts_with("tree nested deeper than 128 levels"));
    }

    #[test]
    fn test_parse_empty_input() {
        let err = JsonTreeParser.parse("  \n").unwrap_err();
        assert!(matches!(err, ParseError::Empty));
        assert_eq!(err.location(), None);
    }
}
