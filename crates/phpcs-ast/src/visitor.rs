use crate::ast::*;

/// Visitor trait for AST traversal. The default implementation walks every
/// child node, so implementors only override what they care about and call
/// [`walk_node`] to keep descending.
pub trait Visitor {
    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }
}

/// Visit every child of `node` in source order.
pub fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::Integer(_)
        | Node::Float(_)
        | Node::StringLit(_)
        | Node::Boolean(_)
        | Node::Null(_)
        | Node::Variable(_)
        | Node::Identifier(_)
        | Node::ClassConstFetch(_)
        | Node::MagicConst(_)
        | Node::UnionType(_)
        | Node::IntersectionType(_)
        | Node::Comment(_) => {}

        Node::InterpolatedString(n) => {
            for part in &n.parts {
                visitor.visit_node(part);
            }
        }
        Node::Binary(n) => {
            visitor.visit_node(&n.left);
            visitor.visit_node(&n.right);
        }
        Node::Unary(n) => visitor.visit_node(&n.operand),
        Node::Ternary(n) => {
            visitor.visit_node(&n.condition);
            if let Some(then) = &n.then_branch {
                visitor.visit_node(then);
            }
            visitor.visit_node(&n.else_branch);
        }
        Node::Assignment(n) => {
            visitor.visit_node(&n.target);
            visitor.visit_node(&n.value);
        }
        Node::Array(n) => {
            for element in &n.elements {
                visitor.visit_node(element);
            }
        }
        Node::ArrayItem(n) => {
            if let Some(key) = &n.key {
                visitor.visit_node(key);
            }
            visitor.visit_node(&n.value);
        }
        Node::ArrayAccess(n) => {
            visitor.visit_node(&n.array);
            if let Some(index) = &n.index {
                visitor.visit_node(index);
            }
        }
        Node::PropertyFetch(n) => visitor.visit_node(&n.object),
        Node::MethodCall(n) => {
            visitor.visit_node(&n.object);
            for arg in &n.args {
                visitor.visit_node(arg);
            }
        }
        Node::FunctionCall(n) => {
            visitor.visit_node(&n.name);
            for arg in &n.args {
                visitor.visit_node(arg);
            }
        }
        Node::New(n) => {
            for arg in &n.args {
                visitor.visit_node(arg);
            }
        }
        Node::Match(n) => {
            visitor.visit_node(&n.condition);
            for arm in &n.arms {
                visitor.visit_node(arm);
            }
        }
        Node::MatchArm(n) => {
            for condition in &n.conditions {
                visitor.visit_node(condition);
            }
            visitor.visit_node(&n.body);
        }
        Node::Throw(n) => visitor.visit_node(&n.expr),
        Node::Cast(n) => visitor.visit_node(&n.expr),
        Node::UnpackedArgument(n) => visitor.visit_node(&n.expr),

        Node::ExpressionStmt(n) => visitor.visit_node(&n.expr),
        Node::Block(n) => {
            for stmt in &n.statements {
                visitor.visit_node(stmt);
            }
        }
        Node::If(n) => {
            visitor.visit_node(&n.condition);
            visitor.visit_node(&n.consequence);
            for else_if in &n.else_ifs {
                visitor.visit_node(else_if);
            }
            if let Some(alternative) = &n.alternative {
                visitor.visit_node(alternative);
            }
        }
        Node::ElseIf(n) => {
            visitor.visit_node(&n.condition);
            visitor.visit_node(&n.body);
        }
        Node::Else(n) => visitor.visit_node(&n.body),
        Node::While(n) => {
            visitor.visit_node(&n.condition);
            visitor.visit_node(&n.body);
        }
        Node::For(n) => {
            for expr in &n.init {
                visitor.visit_node(expr);
            }
            for expr in &n.condition {
                visitor.visit_node(expr);
            }
            for expr in &n.update {
                visitor.visit_node(expr);
            }
            visitor.visit_node(&n.body);
        }
        Node::Foreach(n) => {
            visitor.visit_node(&n.expr);
            if let Some(key) = &n.key_var {
                visitor.visit_node(key);
            }
            visitor.visit_node(&n.value_var);
            visitor.visit_node(&n.body);
        }
        Node::Return(n) => {
            if let Some(expr) = &n.expr {
                visitor.visit_node(expr);
            }
        }
        Node::Echo(n) => {
            for value in &n.values {
                visitor.visit_node(value);
            }
        }
        Node::Unset(n) => {
            for var in &n.vars {
                visitor.visit_node(var);
            }
        }
        Node::StaticVarDecl(n) => {
            for var in &n.vars {
                if let Some(init) = &var.init {
                    visitor.visit_node(init);
                }
            }
        }
        Node::Declare(n) => {
            for directive in &n.directives {
                visitor.visit_node(&directive.value);
            }
            if let Some(body) = &n.body {
                visitor.visit_node(body);
            }
        }
        Node::Namespace(n) => {
            if let Some(body) = &n.body {
                for stmt in body {
                    visitor.visit_node(stmt);
                }
            }
        }

        Node::Function(n) => {
            for param in &n.params {
                visitor.visit_node(param);
            }
            for stmt in &n.body {
                visitor.visit_node(stmt);
            }
        }
        Node::Param(n) => {
            if let Some(union) = &n.union_type {
                visitor.visit_node(union);
            }
            if let Some(default) = &n.default {
                visitor.visit_node(default);
            }
        }
        Node::Class(n) => {
            for member in &n.body {
                visitor.visit_node(member);
            }
        }
        Node::Property(n) => {
            if let Some(default) = &n.default {
                visitor.visit_node(default);
            }
        }
        Node::Interface(n) => {
            for member in &n.members {
                visitor.visit_node(member);
            }
        }
        Node::InterfaceMethod(n) => {
            for param in &n.params {
                visitor.visit_node(param);
            }
        }
        Node::Trait(n) => {
            for member in &n.body {
                visitor.visit_node(member);
            }
        }
        Node::Enum(n) => {
            for member in &n.body {
                visitor.visit_node(member);
            }
        }
        Node::EnumCase(n) => {
            if let Some(value) = &n.value {
                visitor.visit_node(value);
            }
        }
        Node::Constant(n) => visitor.visit_node(&n.value),
    }
}
