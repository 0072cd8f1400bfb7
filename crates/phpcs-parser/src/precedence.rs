use phpcs_lexer::TokenKind;

/// Binding strength of the assignment family; the lowest level in the table.
pub const ASSIGNMENT_PRECEDENCE: u8 = 0;

/// Ternary/elvis sit between assignment and `||`; the climbing loop
/// special-cases `?` at this level rather than treating it as a binary op.
pub const TERNARY_PRECEDENCE: u8 = 1;

/// Prefix operators bind tighter than anything in the binary table.
pub const UNARY_PRECEDENCE: u8 = 100;

/// Binary/assignment operator precedence. One table for the whole grammar:
/// the binary path and the ternary path both consult it, so the levels
/// cannot drift apart.
pub fn precedence(kind: TokenKind) -> Option<u8> {
    let level = match kind {
        TokenKind::Assign
        | TokenKind::PlusEqual
        | TokenKind::MinusEqual
        | TokenKind::MulEqual
        | TokenKind::DivEqual
        | TokenKind::ModEqual
        | TokenKind::ConcatEqual
        | TokenKind::AndEqual
        | TokenKind::OrEqual
        | TokenKind::XorEqual
        | TokenKind::CoalesceEqual => ASSIGNMENT_PRECEDENCE,

        TokenKind::Question => TERNARY_PRECEDENCE,

        TokenKind::BooleanOr => 2,
        TokenKind::BooleanAnd => 3,
        TokenKind::Pipe => 4,
        TokenKind::Ampersand => 5,

        TokenKind::IsEqual
        | TokenKind::IsNotEqual
        | TokenKind::IsIdentical
        | TokenKind::IsNotIdentical => 6,

        TokenKind::IsSmaller
        | TokenKind::IsGreater
        | TokenKind::IsSmallerOrEqual
        | TokenKind::IsGreaterOrEqual
        | TokenKind::Spaceship => 7,

        TokenKind::Instanceof => 8,
        TokenKind::Coalesce => 9,

        TokenKind::Plus | TokenKind::Minus | TokenKind::Dot => 10,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => 11,

        _ => return None,
    };
    Some(level)
}

/// Right-associative operators: the assignment family and `??`.
pub fn is_right_assoc(kind: TokenKind) -> bool {
    kind.is_assignment_op() || kind == TokenKind::Coalesce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter_than_additive() {
        assert!(precedence(TokenKind::Asterisk) > precedence(TokenKind::Plus));
        assert!(precedence(TokenKind::Percent) > precedence(TokenKind::Minus));
    }

    #[test]
    fn test_concat_shares_additive_level() {
        assert_eq!(precedence(TokenKind::Dot), precedence(TokenKind::Plus));
    }

    #[test]
    fn test_assignment_is_lowest() {
        let assign = precedence(TokenKind::Assign);
        for kind in [
            TokenKind::BooleanOr,
            TokenKind::Coalesce,
            TokenKind::IsEqual,
            TokenKind::Spaceship,
            TokenKind::Instanceof,
        ] {
            assert!(precedence(kind) > assign, "{kind} should outrank =");
        }
    }

    #[test]
    fn test_ternary_sits_between_assignment_and_or() {
        let ternary = precedence(TokenKind::Question);
        assert!(ternary > precedence(TokenKind::Assign));
        assert!(ternary < precedence(TokenKind::BooleanOr));
    }

    #[test]
    fn test_right_assoc_set() {
        assert!(is_right_assoc(TokenKind::Assign));
        assert!(is_right_assoc(TokenKind::CoalesceEqual));
        assert!(is_right_assoc(TokenKind::Coalesce));
        assert!(!is_right_assoc(TokenKind::Plus));
        assert!(!is_right_assoc(TokenKind::BooleanOr));
    }

    #[test]
    fn test_non_operators_have_no_precedence() {
        assert_eq!(precedence(TokenKind::Semicolon), None);
        assert_eq!(precedence(TokenKind::LeftParen), None);
        assert_eq!(precedence(TokenKind::DoubleArrow), None);
    }
}
