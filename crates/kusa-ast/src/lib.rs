pub mod loader;
pub mod node;
pub mod parser;

// Re-exports
pub use loader::{load_tree, LoadError};
pub use node::{AccessorKind, BlockKind, Declarator, Modifier, Node};
pub use parser::{JsonTreeParser, ParseError, SourceParser, MAX_NESTING};
