use std::path::Path;

use kusa_ast::Node;

use crate::directive::line_directive;
use crate::emitters;
use crate::error::CodegenError;
use crate::traits::{Target, TargetEmitter};

/// Output file name for a source name: stem with dots replaced, plus the target extension.
/// e.g., "shapes.circle.kusa" → "shapes_circle.cs"
pub fn unit_file_name(source_name: &str, extension: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("out");
    format!("{}.{}", stem.replace('.', "_"), extension)
}

/// A single generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    file_name: String,
    content: String,
}

impl GeneratedUnit {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Complete generated program text.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    /// Write the unit's content to `path`, creating missing parent directories.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CodegenError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &self.content)?;
        tracing::debug!(path = %path.display(), bytes = self.content.len(), "wrote unit");
        Ok(())
    }
}

/// Runs a target emitter over a whole tree and assembles the output unit.
pub struct CodeGenerator {
    emitter: Box<dyn TargetEmitter>,
    line_directive: Option<String>,
}

impl std::fmt::Debug for CodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGenerator")
            .field("target", &self.emitter.target())
            .field("line_directive", &self.line_directive)
            .finish()
    }
}

impl CodeGenerator {
    /// Create a new code generator for the given target.
    pub fn new(target: Target) -> Result<Self, CodegenError> {
        let emitter = emitters::create_emitter(target)?;
        Ok(Self {
            emitter,
            line_directive: None,
        })
    }

    /// Prefix generated output with a `#line 1` pragma naming `source_name`.
    pub fn with_line_directive(mut self, source_name: impl Into<String>) -> Result<Self, CodegenError> {
        let source_name = source_name.into();
        if source_name.is_empty() || source_name.contains(['"', '\n', '\r']) {
            return Err(CodegenError::InvalidSourceName(source_name));
        }
        self.line_directive = Some(source_name);
        Ok(self)
    }

    /// Render the tree rooted at `root` into one generated unit.
    pub fn generate(&self, root: &Node, source_name: &str) -> GeneratedUnit {
        let mut content = String::new();
        if let Some(file) = &self.line_directive {
            content.push_str(&line_directive(file, 1));
        }
        content.push_str(&self.emitter.emit(root));

        let file_name = unit_file_name(source_name, self.emitter.file_extension());
        tracing::debug!(
            target_lang = %self.emitter.target(),
            file = %file_name,
            bytes = content.len(),
            "generated unit"
        );
        GeneratedUnit::new(file_name, content)
    }

    /// Access the underlying emitter.
    pub fn emitter(&self) -> &dyn TargetEmitter {
        self.emitter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_tree() -> Node {
        serde_json::from_value(serde_json::json!({
            "type": "Ast",
            "body": [
                {
                    "type": "ImportStatement",
                    "target": { "type": "Identifier", "value": "System" }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_unit_file_name() {
        assert_eq!(unit_file_name("test.kusa", "cs"), "test.cs");
        assert_eq!(unit_file_name("dir/shapes.circle.kusa", "cs"), "shapes_circle.cs");
        assert_eq!(unit_file_name("", "cs"), "out.cs");
    }

    #[test]
    fn test_generate_without_directive() {
        let gen = CodeGenerator::new(Target::CSharp).unwrap();
        let unit = gen.generate(&sample_tree(), "test.kusa");
        assert_eq!(unit.file_name(), "test.cs");
        assert_eq!(unit.content(), "using System;\n");
    }

    #[test]
    fn test_generate_with_directive() {
        let gen = CodeGenerator::new(Target::CSharp)
            .unwrap()
            .with_line_directive("[memory].gr")
            .unwrap();
        let unit = gen.generate(&sample_tree(), "test.kusa");
        assert_eq!(unit.content(), "#line 1 \"[memory].gr\"\nusing System;\n");
    }

    #[test]
    fn test_invalid_directive_source_name() {
        let err = CodeGenerator::new(Target::CSharp)
            .unwrap()
            .with_line_directive("bad\"name")
            .unwrap_err();
        assert!(matches!(err, CodegenError::InvalidSourceName(_)));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let gen = CodeGenerator::new(Target::CSharp).unwrap();
        let tree = sample_tree();
        assert_eq!(gen.generate(&tree, "a.kusa"), gen.generate(&tree, "a.kusa"));
    }

    #[test]
    fn test_write_to_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let unit = GeneratedUnit::new("hello.cs", "class Hello {\n}\n");
        let path = tmp.path().join("out/nested/Hello.cs");
        unit.write_to_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Hello {\n}\n");

        // overwrites an existing file
        let updated = GeneratedUnit::new("hello.cs", "class Hi {\n}\n");
        updated.write_to_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Hi {\n}\n");
    }

    #[test]
    fn test_write_to_file_into_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let unit = GeneratedUnit::new("hello.cs", "");
        let err = unit.write_to_file(tmp.path()).unwrap_err();
        assert!(matches!(err, CodegenError::Io(_)));
    }

    #[test]
    fn test_emitter_target() {
        let gen = CodeGenerator::new(Target::CSharp).unwrap();
        assert_eq!(gen.emitter().target(), Target::CSharp);
        assert_eq!(gen.emitter().file_extension(), "cs");
    }
}
