use kusa_ast::{Declarator, Modifier, Node};

use crate::modifiers::{accessor_keyword, translate_modifier, NOT_IMPLEMENTED};
use crate::traits::{Target, TargetEmitter};

/// C# code emitter.
pub struct CSharpEmitter;

impl TargetEmitter for CSharpEmitter {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn emit(&self, node: &Node) -> String {
        match node {
            Node::Ast { body } => body
                .iter()
                .map(|stmt| format!("{}\n", self.emit(stmt)))
                .collect(),
            Node::ImportStatement { target } => format!("using {};", self.emit(target)),
            Node::StaticAccess { curr, next } => match next {
                Some(next) => format!("{}.{}", self.emit(curr), self.emit(next)),
                None => self.emit(curr),
            },
            Node::Identifier { value } => value.clone(),
            Node::TypeDeclaration {
                modifiers,
                type_name,
                body,
            } => format!(
                "{}class {} {}\n",
                emit_modifiers(modifiers.as_deref()),
                self.emit(type_name),
                self.emit(body)
            ),
            Node::Block { block_type, value } => {
                let mut out = String::from("{\n");
                for stmt in value {
                    out.push_str(&self.emit(stmt));
                    if block_type.is_code() && !is_brace_terminated(stmt) {
                        out.push(';');
                    }
                    out.push('\n');
                }
                out.push('}');
                out
            }
            Node::FunctionDeclaration {
                modifiers,
                return_type,
                function_name,
                arg_list,
                body,
            } => {
                let ret = return_type
                    .as_ref()
                    .map(|t| self.emit(t))
                    .unwrap_or_else(|| "void".to_string());
                let params: Vec<String> = arg_list.iter().map(|a| self.emit(a)).collect();
                format!(
                    "{}{} {}({}) {}",
                    emit_modifiers(modifiers.as_deref()),
                    ret,
                    self.emit(function_name),
                    params.join(", "),
                    self.emit(body)
                )
            }
            Node::VariableDeclarator(decl) => self.emit_declarator(decl),
            Node::VariableDeclaration { declarator } => self.emit(declarator),
            Node::MemberDeclaration {
                modifiers,
                declarator,
            } => format!(
                "{}{};",
                emit_modifiers(modifiers.as_deref()),
                self.emit(declarator)
            ),
            Node::PropertyDeclaration {
                modifiers,
                declarator,
                content,
            } => {
                let accessors: Vec<String> = content
                    .iter()
                    .map(|(kind, body)| {
                        if !matches!(kind.as_str(), "get" | "set") {
                            tracing::warn!(accessor = kind.as_str(), "non-standard property accessor");
                        }
                        format!("{} {}\n", accessor_keyword(kind), self.emit(body))
                    })
                    .collect();
                let mut out = format!(
                    "{}{} {} {{\n{}}}",
                    emit_modifiers(modifiers.as_deref()),
                    self.emit(&declarator.var_type),
                    self.emit(&declarator.var_name),
                    accessors.join("\n")
                );
                if let Some(default) = &declarator.default_value {
                    out.push_str(&format!(" = {};", self.emit(default)));
                }
                out
            }
            Node::Call { callee, args } => {
                let a: Vec<String> = args.iter().map(|a| self.emit(a)).collect();
                format!("{}({})", self.emit(callee), a.join(","))
            }
            Node::ExpressionAccess { left, right } => {
                format!("{}.{}", self.emit(left), self.emit(right))
            }
            Node::ArrayAccessExpression { src, index } => {
                format!("{}[{}]", self.emit(src), self.emit(index))
            }
            Node::ArrayStaticAccess { target } => format!("{}[]", self.emit(target)),
            Node::ObjectCreateExpression { target } => format!("new {}", self.emit(target)),
            Node::StringLiteral { value } => format!("\"{}\"", raw_text(value)),
            Node::NumberLiteral { value } | Node::BooleanLiteral { value } => raw_text(value),
            Node::IfStatement { condition, body } => {
                format!("if ({}) {}", self.emit(condition), self.emit(body))
            }
            Node::WhileStatement { condition, body } => {
                format!("while ({}) {}", self.emit(condition), self.emit(body))
            }
            Node::ReturnStatement { value } => format!("return {}", self.emit(value)),
            Node::InfixExpression {
                left,
                operator,
                right,
            } => format!("{} {} {}", self.emit(left), operator, self.emit(right)),
            Node::Assignment { dest, src } => format!("{} = {}", self.emit(dest), self.emit(src)),
            Node::Unsupported => {
                tracing::warn!("unsupported node, emitting placeholder");
                NOT_IMPLEMENTED.to_string()
            }
        }
    }

    fn file_extension(&self) -> &str {
        "cs"
    }
}

impl CSharpEmitter {
    fn emit_declarator(&self, decl: &Declarator) -> String {
        let mut out = format!("{} {}", self.emit(&decl.var_type), self.emit(&decl.var_name));
        if let Some(default) = &decl.default_value {
            out.push_str(" = ");
            out.push_str(&self.emit(default));
        }
        out
    }
}

/// Space-joined C# modifiers followed by a separating space.
///
/// A present-but-empty list still yields the separator; only an absent list yields nothing.
fn emit_modifiers(modifiers: Option<&[Modifier]>) -> String {
    let Some(modifiers) = modifiers else {
        return String::new();
    };
    let words: Vec<&str> = modifiers
        .iter()
        .map(|m| {
            if let Modifier::Other(token) = m {
                tracing::warn!(modifier = %token, "no C# translation for modifier");
            }
            translate_modifier(m)
        })
        .collect();
    format!("{} ", words.join(" "))
}

/// Statements whose rendering already ends in a brace-delimited body.
fn is_brace_terminated(stmt: &Node) -> bool {
    matches!(stmt, Node::IfStatement { .. } | Node::WhileStatement { .. })
}

/// Raw literal text as the parser produced it.
fn raw_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
