use std::fmt;

use kusa_ast::Node;

/// Output language of a code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    CSharp,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::CSharp => f.write_str("C#"),
        }
    }
}

/// Target-specific tree emitter.
///
/// Each target language implements this trait to turn a syntax tree into
/// source text. Emission is infallible: constructs without a rendering
/// degrade to a visible placeholder instead of aborting the document.
pub trait TargetEmitter {
    /// Which language this emitter targets.
    fn target(&self) -> Target;

    /// Render a node and its whole subtree.
    fn emit(&self, node: &Node) -> String;

    /// File extension for this language (e.g., "cs").
    fn file_extension(&self) -> &str;
}
