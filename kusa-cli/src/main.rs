use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use kusa_codegen::{CodeGenerator, Target};

/// Source name the line directive falls back to when none is given.
const DEFAULT_SOURCE_NAME: &str = "[memory].gr";

#[derive(Parser)]
#[command(name = "kusa", about = "Kusa – translate Kusa syntax trees into C#")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Emit C# source for a parsed tree
    Emit {
        /// Tree file produced by the Kusa parser
        tree: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Prefix the output with a `#line` pragma
        #[arg(long)]
        line_directive: bool,
        /// Source name used by the line directive
        #[arg(long, default_value = DEFAULT_SOURCE_NAME)]
        source_name: String,
    },
    /// Parse a tree and report what the emitter will do with it
    Check {
        /// Tree file produced by the Kusa parser
        tree: PathBuf,
        /// Print the normalized tree as JSON
        #[arg(long)]
        dump_tree: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Command::Emit {
            tree,
            output,
            line_directive,
            source_name,
        } => cmd_emit(
            &tree,
            output.as_deref(),
            line_directive.then_some(source_name.as_str()),
        ),
        Command::Check { tree, dump_tree } => cmd_check(&tree, dump_tree),
    };

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

/// Log level comes from RUST_LOG, defaulting to warn.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_emit(tree_path: &Path, output: Option<&Path>, directive_source: Option<&str>) -> Result<bool> {
    let tree = kusa_ast::load_tree(tree_path)
        .with_context(|| format!("Failed to load tree '{}'", tree_path.display()))?;

    let mut generator = CodeGenerator::new(Target::CSharp)
        .map_err(|e| anyhow::anyhow!("Codegen error: {}", e))?;
    if let Some(source_name) = directive_source {
        generator = generator
            .with_line_directive(source_name)
            .context("Invalid --source-name")?;
    }

    let source_name = tree_path.to_string_lossy();
    tracing::debug!(tree = %source_name, nodes = tree.node_count(), "emitting C#");
    let unit = generator.generate(&tree, &source_name);

    match output {
        Some(out_path) => {
            unit.write_to_file(out_path)
                .with_context(|| format!("Failed to write to '{}'", out_path.display()))?;
            eprintln!(
                "{} Generated {} → {}",
                "✓".green().bold(),
                unit.file_name(),
                out_path.display()
            );
        }
        None => print!("{}", unit.content()),
    }

    let unsupported = tree.unsupported_count();
    if unsupported > 0 {
        eprintln!(
            "{} {} unsupported node(s) rendered as placeholders",
            "warning:".yellow().bold(),
            unsupported
        );
    }

    Ok(true)
}

fn cmd_check(tree_path: &Path, dump_tree: bool) -> Result<bool> {
    let tree = kusa_ast::load_tree(tree_path)
        .with_context(|| format!("Failed to load tree '{}'", tree_path.display()))?;

    println!("{}", "Tree Info".bold().underline());
    println!("  Root:        {}", tree.kind());
    println!("  Nodes:       {}", tree.node_count());

    let unsupported = tree.unsupported_count();
    println!("  Unsupported: {}", unsupported);
    println!();

    if dump_tree {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        println!();
    }

    if unsupported == 0 {
        println!("{} Every node has a C# rendering", "✓".green().bold());
        Ok(true)
    } else {
        println!(
            "{} {} node(s) will be emitted as placeholders",
            "✗".red().bold(),
            unsupported
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn emit_writes_output_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("gen/Greeter.cs");

        let ok = cmd_emit(&fixture("greeter.tree.json"), Some(out.as_path()), None).unwrap();
        assert!(ok);

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("using System;\n"));
        assert!(content.contains("public class Greeter {"));
    }

    #[test]
    fn emit_with_line_directive() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("Greeter.cs");

        cmd_emit(
            &fixture("greeter.tree.json"),
            Some(out.as_path()),
            Some(DEFAULT_SOURCE_NAME),
        )
        .unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("#line 1 \"[memory].gr\"\nusing System;\n"));
    }

    #[test]
    fn emit_rejects_broken_tree() {
        let tmp = TempDir::new().unwrap();
        let tree = tmp.path().join("broken.json");
        std::fs::write(&tree, "{ \"type\": ").unwrap();

        let out = tmp.path().join("never.cs");
        assert!(cmd_emit(&tree, Some(out.as_path()), None).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn check_reports_placeholders() {
        let ok = cmd_check(&fixture("greeter.tree.json"), false).unwrap();
        assert!(!ok);
    }

    #[test]
    fn check_clean_tree() {
        let tmp = TempDir::new().unwrap();
        let tree = tmp.path().join("clean.json");
        std::fs::write(
            &tree,
            r#"{ "type": "Ast", "body": [ { "type": "Identifier", "value": "x" } ] }"#,
        )
        .unwrap();
        assert!(cmd_check(&tree, true).unwrap());
    }
}
