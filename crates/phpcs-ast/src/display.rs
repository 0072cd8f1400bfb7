//! Human-readable node rendering for debugging and test failure output.
//! Not a serialization format; use serde for that.

use crate::ast::*;

impl Node {
    pub fn to_display_string(&self) -> String {
        match self {
            Node::Integer(n) => format!("Integer({}) @ {}", n.value, n.pos),
            Node::Float(n) => format!("Float({}) @ {}", n.value, n.pos),
            Node::StringLit(n) => format!("String({:?}) @ {}", n.value, n.pos),
            Node::InterpolatedString(n) => {
                format!("InterpolatedString @ {}", n.pos)
            }
            Node::Boolean(n) => format!("Boolean({}) @ {}", n.value, n.pos),
            Node::Null(n) => format!("Null @ {}", n.pos),

            Node::Variable(n) => format!("Variable(${}) @ {}", n.name, n.pos),
            Node::Identifier(n) => format!("Identifier({}) @ {}", n.value, n.pos),
            Node::Binary(n) => format!(
                "BinaryExpr({} {} {}) @ {}",
                n.left.to_display_string(),
                n.operator,
                n.right.to_display_string(),
                n.pos
            ),
            Node::Unary(n) => {
                if n.is_postfix {
                    format!(
                        "UnaryExpr({}{}) @ {}",
                        n.operand.to_display_string(),
                        n.operator,
                        n.pos
                    )
                } else {
                    format!(
                        "UnaryExpr({}{}) @ {}",
                        n.operator,
                        n.operand.to_display_string(),
                        n.pos
                    )
                }
            }
            Node::Ternary(n) => match &n.then_branch {
                Some(then) => format!(
                    "Ternary({} ? {} : {}) @ {}",
                    n.condition.to_display_string(),
                    then.to_display_string(),
                    n.else_branch.to_display_string(),
                    n.pos
                ),
                None => format!(
                    "Ternary({} ?: {}) @ {}",
                    n.condition.to_display_string(),
                    n.else_branch.to_display_string(),
                    n.pos
                ),
            },
            Node::Assignment(n) => format!(
                "Assignment({} {} {}) @ {}",
                n.target.to_display_string(),
                n.operator,
                n.value.to_display_string(),
                n.pos
            ),
            Node::Array(n) => format!("Array[{}] @ {}", n.elements.len(), n.pos),
            Node::ArrayItem(n) => {
                let mut prefix = String::new();
                if n.by_ref {
                    prefix.push('&');
                }
                if n.unpack {
                    prefix.push_str("...");
                }
                match &n.key {
                    Some(key) => format!(
                        "ArrayItem({}{} => {}) @ {}",
                        prefix,
                        key.to_display_string(),
                        n.value.to_display_string(),
                        n.pos
                    ),
                    None => format!(
                        "ArrayItem({}{}) @ {}",
                        prefix,
                        n.value.to_display_string(),
                        n.pos
                    ),
                }
            }
            Node::ArrayAccess(n) => match &n.index {
                Some(index) => format!(
                    "ArrayAccess({}[{}]) @ {}",
                    n.array.to_display_string(),
                    index.to_display_string(),
                    n.pos
                ),
                None => format!("ArrayAccess({}[]) @ {}", n.array.to_display_string(), n.pos),
            },
            Node::PropertyFetch(n) => {
                let op = if n.nullsafe { "?->" } else { "->" };
                format!(
                    "PropertyFetch({}{}{}) @ {}",
                    n.object.to_display_string(),
                    op,
                    n.property,
                    n.pos
                )
            }
            Node::MethodCall(n) => format!("MethodCall({}) @ {}", n.method, n.pos),
            Node::FunctionCall(n) => {
                let args: Vec<String> = n.args.iter().map(|a| a.to_display_string()).collect();
                format!(
                    "FunctionCall({}, [{}]) @ {}",
                    n.name.to_display_string(),
                    args.join(", "),
                    n.pos
                )
            }
            Node::New(n) => format!("New({}) @ {}", n.class_name, n.pos),
            Node::ClassConstFetch(n) => {
                format!("ClassConstFetch({}::{}) @ {}", n.class, n.constant, n.pos)
            }
            Node::Match(n) => format!("Match[{} arms] @ {}", n.arms.len(), n.pos),
            Node::MatchArm(n) => format!(
                "MatchArm[{} conditions] => {} @ {}",
                n.conditions.len(),
                n.body.to_display_string(),
                n.pos
            ),
            Node::Throw(n) => format!("Throw({}) @ {}", n.expr.to_display_string(), n.pos),
            Node::Cast(n) => format!(
                "Cast(({}) {}) @ {}",
                n.cast_type,
                n.expr.to_display_string(),
                n.pos
            ),
            Node::UnpackedArgument(n) => format!("...{}", n.expr.to_display_string()),
            Node::MagicConst(n) => format!("MagicConst({}) @ {}", n.name, n.pos),

            Node::UnionType(n) => format!("UnionType({}) @ {}", n.types.join("|"), n.pos),
            Node::IntersectionType(n) => {
                format!("IntersectionType({}) @ {}", n.types.join("&"), n.pos)
            }

            Node::ExpressionStmt(n) => {
                format!("ExpressionStmt({}) @ {}", n.expr.to_display_string(), n.pos)
            }
            Node::Block(n) => format!("Block[{}] @ {}", n.statements.len(), n.pos),
            Node::If(n) => format!("If({}) @ {}", n.condition.to_display_string(), n.pos),
            Node::ElseIf(n) => format!("ElseIf({}) @ {}", n.condition.to_display_string(), n.pos),
            Node::Else(n) => format!("Else @ {}", n.pos),
            Node::While(n) => format!("While({}) @ {}", n.condition.to_display_string(), n.pos),
            Node::For(n) => format!("For @ {}", n.pos),
            Node::Foreach(n) => format!("Foreach({}) @ {}", n.expr.to_display_string(), n.pos),
            Node::Return(n) => match &n.expr {
                Some(expr) => format!("Return({}) @ {}", expr.to_display_string(), n.pos),
                None => format!("Return @ {}", n.pos),
            },
            Node::Echo(n) => format!("Echo[{}] @ {}", n.values.len(), n.pos),
            Node::Unset(n) => format!("Unset[{}] @ {}", n.vars.len(), n.pos),
            Node::Comment(n) => format!("Comment({:?}) @ {}", n.text, n.pos),
            Node::StaticVarDecl(n) => format!("StaticVarDecl[{}] @ {}", n.vars.len(), n.pos),
            Node::Declare(n) => format!("Declare @ {}", n.pos),
            Node::Namespace(n) => match &n.name {
                Some(name) => format!("Namespace({}) @ {}", name, n.pos),
                None => format!("Namespace @ {}", n.pos),
            },

            Node::Function(n) => {
                let mut parts = Vec::new();
                if !n.modifiers.is_empty() {
                    parts.push(n.modifiers.join(" "));
                }
                parts.push(format!("Function({})", n.name));
                if let Some(ret) = &n.return_type {
                    parts.push(format!(": {}", ret));
                }
                format!("{} @ {}", parts.join(" "), n.pos)
            }
            Node::Param(n) => {
                let mut out = String::new();
                if let Some(vis) = &n.visibility {
                    out.push_str(vis);
                    out.push(' ');
                }
                if let Some(hint) = &n.type_hint {
                    out.push_str(hint);
                    out.push(' ');
                }
                if n.is_by_ref {
                    out.push('&');
                }
                if n.is_variadic {
                    out.push_str("...");
                }
                format!("Param({}${}) @ {}", out, n.name, n.pos)
            }
            Node::Class(n) => {
                let mut parts = vec![format!("Class({})", n.name)];
                if let Some(parent) = &n.extends {
                    parts.push(format!("extends {}", parent));
                }
                if !n.implements.is_empty() {
                    parts.push(format!("implements {}", n.implements.join(", ")));
                }
                format!("{} @ {}", parts.join(" "), n.pos)
            }
            Node::Property(n) => match &n.visibility {
                Some(vis) => format!("{} Property(${}) @ {}", vis, n.name, n.pos),
                None => format!("Property(${}) @ {}", n.name, n.pos),
            },
            Node::Interface(n) => {
                if n.extends.is_empty() {
                    format!("Interface({}) @ {}", n.name, n.pos)
                } else {
                    format!(
                        "Interface({}) extends {} @ {}",
                        n.name,
                        n.extends.join(", "),
                        n.pos
                    )
                }
            }
            Node::InterfaceMethod(n) => format!("InterfaceMethod({}) @ {}", n.name, n.pos),
            Node::Trait(n) => format!("Trait({}) @ {}", n.name, n.pos),
            Node::Enum(n) => match &n.backed_by {
                Some(backing) => format!("Enum({}) : {} @ {}", n.name, backing, n.pos),
                None => format!("Enum({}) @ {}", n.name, n.pos),
            },
            Node::EnumCase(n) => match &n.value {
                Some(value) => format!(
                    "Case({} = {}) @ {}",
                    n.name,
                    value.to_display_string(),
                    n.pos
                ),
                None => format!("Case({}) @ {}", n.name, n.pos),
            },
            Node::Constant(n) => format!(
                "Constant({} = {}) @ {}",
                n.name,
                n.value.to_display_string(),
                n.pos
            ),
        }
    }
}
