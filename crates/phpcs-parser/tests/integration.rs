//! End-to-end tests driving the public `parse` entry point over whole
//! source files.

use phpcs_ast::{Node, Visitor};
use phpcs_parser::parse;

fn parse_clean(source: &str) -> Vec<Node> {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    program
}

#[test]
fn test_parse_is_deterministic() {
    let source = "<?php\n\
        declare(strict_types=1);\n\
        namespace App;\n\
        final class Service {\n\
            public function __construct(private readonly string $name) { }\n\
            public function run(int|string $id): ?string {\n\
                return match (true) {\n\
                    $id > 0 => \"id: $id\",\n\
                    default => null,\n\
                };\n\
            }\n\
        }\n";
    let (first, first_errors) = parse(source);
    let (second, second_errors) = parse(source);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first_errors, second_errors);
}

#[test]
fn test_operator_precedence_shape() {
    let program = parse_clean("<?php $age = 20 + 5 * 2;");
    let assignment = match &program[0] {
        Node::ExpressionStmt(stmt) => match &*stmt.expr {
            Node::Assignment(a) => a,
            other => panic!("expected assignment, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    };
    match &*assignment.value {
        Node::Binary(sum) => {
            assert_eq!(sum.operator, "+");
            match &*sum.left {
                Node::Integer(i) => assert_eq!(i.value, 20),
                other => panic!("expected integer, got {other:?}"),
            }
            match &*sum.right {
                Node::Binary(product) => {
                    assert_eq!(product.operator, "*");
                    match (&*product.left, &*product.right) {
                        (Node::Integer(l), Node::Integer(r)) => {
                            assert_eq!(l.value, 5);
                            assert_eq!(r.value, 2);
                        }
                        other => panic!("expected integer operands, got {other:?}"),
                    }
                }
                other => panic!("expected product, got {other:?}"),
            }
        }
        other => panic!("expected sum, got {other:?}"),
    }
}

#[test]
fn test_positions_are_one_based_with_byte_offsets() {
    let program = parse_clean("<?php\necho 1;");
    match &program[0] {
        Node::Echo(node) => {
            assert_eq!(node.pos.line, 2);
            assert_eq!(node.pos.column, 1);
            assert_eq!(node.pos.offset, 6);
        }
        other => panic!("expected echo, got {other:?}"),
    }
}

#[test]
fn test_heredoc_body_is_exact() {
    let program = parse_clean("<?php $s = <<<EOT\nline one\nline two\nEOT;");
    match &program[0] {
        Node::ExpressionStmt(stmt) => match &*stmt.expr {
            Node::Assignment(a) => match &*a.value {
                Node::StringLit(s) => assert_eq!(s.value, "line one\nline two\n"),
                other => panic!("expected string, got {other:?}"),
            },
            other => panic!("expected assignment, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_union_type_order_is_source_order() {
    let program = parse_clean("<?php function f(string|int|null $v) { }");
    match &program[0] {
        Node::Function(f) => match &f.params[0] {
            Node::Param(param) => match param.union_type.as_deref() {
                Some(Node::UnionType(u)) => {
                    assert_eq!(u.types, vec!["string", "int", "null"])
                }
                other => panic!("expected union, got {other:?}"),
            },
            other => panic!("expected param, got {other:?}"),
        },
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn test_promotion_flags() {
    let program = parse_clean(
        "<?php class C { public function __construct(public readonly string $foo, $plain) { } }",
    );
    let ctor = match &program[0] {
        Node::Class(class) => match &class.body[0] {
            Node::Function(f) => f,
            other => panic!("expected constructor, got {other:?}"),
        },
        other => panic!("expected class, got {other:?}"),
    };
    match (&ctor.params[0], &ctor.params[1]) {
        (Node::Param(promoted), Node::Param(plain)) => {
            assert!(promoted.is_promoted);
            assert_eq!(promoted.visibility.as_deref(), Some("public"));
            assert_eq!(promoted.type_hint.as_deref(), Some("string"));
            assert!(!plain.is_promoted);
        }
        other => panic!("expected params, got {other:?}"),
    }
}

#[test]
fn test_assignment_target_validation() {
    let (program, errors) = parse("<?php 1 + 2 = 3;");
    assert!(
        errors.iter().any(|e| e.contains("invalid assignment target")),
        "{errors:?}"
    );
    assert!(program.iter().all(|n| n.node_kind() != "Assignment"));

    parse_clean("<?php $arr[0] = 3;");
    parse_clean("<?php $this->x = 3;");
}

#[test]
fn test_match_arm_structure() {
    let program = parse_clean("<?php $r = match ($v) { 1, 2 => 'a', default => 'b' };");
    let arms = match &program[0] {
        Node::ExpressionStmt(stmt) => match &*stmt.expr {
            Node::Assignment(a) => match &*a.value {
                Node::Match(m) => &m.arms,
                other => panic!("expected match, got {other:?}"),
            },
            other => panic!("expected assignment, got {other:?}"),
        },
        other => panic!("expected expression statement, got {other:?}"),
    };
    assert_eq!(arms.len(), 2);
    match &arms[0] {
        Node::MatchArm(arm) => assert_eq!(arm.conditions.len(), 2),
        other => panic!("expected arm, got {other:?}"),
    }
    match &arms[1] {
        Node::MatchArm(arm) => match &arm.conditions[0] {
            Node::Identifier(id) => assert_eq!(id.value, "default"),
            other => panic!("expected default marker, got {other:?}"),
        },
        other => panic!("expected arm, got {other:?}"),
    }
}

#[test]
fn test_broken_condition_still_parses_the_rest() {
    let (program, errors) = parse("<?php if () { echo \"x\"; }\n$done = true;");
    assert!(!errors.is_empty());
    assert!(errors[0].starts_with("line 1:"), "{errors:?}");
    assert!(program
        .iter()
        .any(|n| n.node_kind() == "ExpressionStmt"));
}

#[test]
fn test_unterminated_class_body_terminates_with_diagnostics() {
    let (program, errors) = parse("<?php class Broken {\n    public function f() {\n        echo 1;");
    assert!(!errors.is_empty());
    assert_eq!(program.len(), 1);
    assert_eq!(program[0].node_kind(), "Class");
}

#[test]
fn test_diagnostic_format() {
    let (_, errors) = parse("<?php\n\n$x = ;");
    assert!(!errors.is_empty());
    assert!(errors[0].starts_with("line 3:"), "{errors:?}");
}

#[test]
fn test_interpolated_string_parts() {
    let program = parse_clean("<?php echo \"Hi $name, you owe {$acct->total}!\";");
    match &program[0] {
        Node::Echo(echo) => match &echo.values[0] {
            Node::InterpolatedString(s) => {
                let kinds: Vec<_> = s.parts.iter().map(Node::node_kind).collect();
                assert_eq!(
                    kinds,
                    vec!["String", "Variable", "String", "PropertyFetch", "String"]
                );
            }
            other => panic!("expected interpolated string, got {other:?}"),
        },
        other => panic!("expected echo, got {other:?}"),
    }
}

#[test]
fn test_mixed_html_and_php_regions() {
    let program = parse_clean("<p>before</p><?php echo 1; ?><p>after</p>");
    assert_eq!(program.len(), 1);
    assert_eq!(program[0].node_kind(), "Echo");
}

#[test]
fn test_visitor_walks_parsed_tree() {
    struct VarNames(Vec<String>);
    impl Visitor for VarNames {
        fn visit_node(&mut self, node: &Node) {
            if let Node::Variable(v) = node {
                self.0.push(v.name.clone());
            }
            phpcs_ast::visitor::walk_node(self, node);
        }
    }

    let program = parse_clean("<?php $a = $b + $c;");
    let mut names = VarNames(Vec::new());
    for node in &program {
        names.visit_node(node);
    }
    assert_eq!(names.0, vec!["a", "b", "c"]);
}

#[test]
fn test_full_file_round_trip_through_json() {
    let source = "<?php\n\
        namespace App\\Models;\n\
        enum Status: string {\n\
            case Active = 'active';\n\
            case Archived = 'archived';\n\
        }\n\
        interface Repo { public function find(int $id): ?Status; }\n\
        trait Timestamps { public function touch(): void { $this->at = 1; } }\n";
    let program = parse_clean(source);
    let json = serde_json::to_string_pretty(&program).unwrap();
    assert!(json.contains("\"Enum\""));
    assert!(json.contains("\"Interface\""));
    assert!(json.contains("\"Trait\""));
}
