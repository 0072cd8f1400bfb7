//! Splits double-quoted string contents into literal and expression parts.
//!
//! Operates on the processed literal (escape sequences other than `\$` were
//! already resolved by the lexer). Supports the simple syntax `$name`,
//! `$name->prop`, `$name[index]` and the braced syntax `{$name...}`.

use phpcs_ast::{
    ArrayAccessNode, IntegerLiteral, Node, Position, PropertyFetchNode, StringLiteral,
    VariableNode,
};

/// True when the string contains at least one interpolation site. `\$` does
/// not count; a lone `$` followed by a non-name character does not either.
pub fn has_interpolation(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if chars.get(i + 1) == Some(&'$') => i += 2,
            '$' if chars.get(i + 1).is_some_and(|&c| is_name_start(c)) => return true,
            '{' if chars.get(i + 1) == Some(&'$') => return true,
            _ => i += 1,
        }
    }
    false
}

/// Decompose the string into parts in source order. Literal runs become
/// `StringLit` nodes; interpolation sites become `Variable`, `PropertyFetch`
/// or `ArrayAccess` nodes. Every part carries the position of the enclosing
/// string token.
pub fn parse_parts(s: &str, pos: Position) -> Vec<Node> {
    let chars: Vec<char> = s.chars().collect();
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' && chars.get(i + 1) == Some(&'$') {
            text.push('$');
            i += 2;
            continue;
        }
        if c == '$' && chars.get(i + 1).is_some_and(|&c| is_name_start(c)) {
            flush_text(&mut text, &mut parts, pos);
            i += 1;
            let node = read_variable(&chars, &mut i, pos, false);
            parts.push(node);
            continue;
        }
        if c == '{'
            && chars.get(i + 1) == Some(&'$')
            && chars.get(i + 2).is_some_and(|&c| is_name_start(c))
        {
            flush_text(&mut text, &mut parts, pos);
            i += 2;
            let node = read_variable(&chars, &mut i, pos, true);
            if chars.get(i) == Some(&'}') {
                i += 1;
            }
            parts.push(node);
            continue;
        }
        text.push(c);
        i += 1;
    }

    flush_text(&mut text, &mut parts, pos);
    parts
}

fn flush_text(text: &mut String, parts: &mut Vec<Node>, pos: Position) {
    if !text.is_empty() {
        parts.push(Node::StringLit(StringLiteral {
            value: std::mem::take(text),
            pos,
        }));
    }
}

/// Reads `name` (the `$` is already consumed) plus trailing accessors. The
/// simple syntax allows a single `->prop` or `[index]`; the braced syntax
/// allows a chain.
fn read_variable(chars: &[char], i: &mut usize, pos: Position, braced: bool) -> Node {
    let name = read_name(chars, i);
    let mut node = Node::Variable(VariableNode { name, pos });

    loop {
        if chars.get(*i) == Some(&'-')
            && chars.get(*i + 1) == Some(&'>')
            && chars.get(*i + 2).is_some_and(|&c| is_name_start(c))
        {
            *i += 2;
            let property = read_name(chars, i);
            node = Node::PropertyFetch(PropertyFetchNode {
                object: Box::new(node),
                property,
                nullsafe: false,
                pos,
            });
        } else if chars.get(*i) == Some(&'[') {
            let Some((index, next)) = read_index(chars, *i + 1, pos) else {
                break;
            };
            *i = next;
            node = Node::ArrayAccess(ArrayAccessNode {
                array: Box::new(node),
                index: Some(Box::new(index)),
                pos,
            });
        } else {
            break;
        }
        if !braced {
            break;
        }
    }
    node
}

/// Parses one `[...]` index: an integer, a `$variable`, a `'quoted'` key or
/// a bare word. Returns the index node and the offset just past the closing
/// bracket, or `None` when the bracket contents are not one of those forms
/// (the `[` then stays literal text, which is what the engine does for the
/// unbraced syntax).
fn read_index(chars: &[char], start: usize, pos: Position) -> Option<(Node, usize)> {
    let mut i = start;
    let index = match chars.get(i)? {
        '$' if chars.get(i + 1).is_some_and(|&c| is_name_start(c)) => {
            i += 1;
            let name = read_name(chars, &mut i);
            Node::Variable(VariableNode { name, pos })
        }
        '\'' => {
            i += 1;
            let key_start = i;
            while i < chars.len() && chars[i] != '\'' {
                i += 1;
            }
            let value: String = chars[key_start..i].iter().collect();
            if chars.get(i) != Some(&'\'') {
                return None;
            }
            i += 1;
            Node::StringLit(StringLiteral { value, pos })
        }
        c if c.is_ascii_digit() || *c == '-' => {
            let num_start = i;
            if chars[i] == '-' {
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[num_start..i].iter().collect();
            let value = digits.parse::<i64>().ok()?;
            Node::Integer(IntegerLiteral { value, pos })
        }
        c if is_name_start(*c) => {
            let value = read_name(chars, &mut i);
            Node::StringLit(StringLiteral { value, pos })
        }
        _ => return None,
    };
    if chars.get(i) != Some(&']') {
        return None;
    }
    Some((index, i + 1))
}

fn read_name(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_name_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
