use std::collections::VecDeque;

use memchr::{memchr_iter, memmem};
use phpcs_ast::Position;

use crate::keywords::resolve_keyword;
use crate::token::{Token, TokenKind};

/// Single-pass PHP scanner.
///
/// The lexer is pulled token-by-token by the parser. It owns no cross-token
/// state beyond the current cursor and a small queue used for multi-token
/// constructs (heredoc start/body/end). It never panics: anything it cannot
/// classify becomes a `T_ILLEGAL` token and scanning continues.
pub struct Lexer<'src> {
    src: &'src str,
    /// Byte offset of the current char.
    pos: usize,
    /// Byte offset of the next char.
    read_pos: usize,
    /// Current char; `'\0'` at end of input.
    ch: char,
    line: u32,
    column: u32,
    /// Outside `<?php ... ?>` everything is inline HTML.
    in_php: bool,
    /// Pending heredoc tokens, drained before scanning resumes.
    queued: VecDeque<Token>,
}

/// Saved cursor state for `peek_token`.
struct Snapshot {
    pos: usize,
    read_pos: usize,
    ch: char,
    line: u32,
    column: u32,
    in_php: bool,
    queued: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        let mut lexer = Lexer {
            src,
            pos: 0,
            read_pos: 0,
            ch: '\0',
            line: 1,
            column: 0,
            in_php: false,
            queued: VecDeque::new(),
        };
        lexer.read_char();
        lexer
    }

    /// Returns the next token without consuming it. Implemented by saving
    /// and restoring the scan cursor, not by re-lexing from the start.
    pub fn peek_token(&mut self) -> Token {
        let saved = self.snapshot();
        let tok = self.next_token();
        self.restore(saved);
        tok
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(tok) = self.queued.pop_front() {
            return tok;
        }

        if !self.in_php {
            return self.lex_outside_php();
        }

        self.skip_whitespace();
        let pos = self.position();

        match self.ch {
            '\0' => Token::new(TokenKind::Eof, "", pos),
            '$' => self.lex_dollar(pos),
            '"' => self.lex_quoted_string('"', TokenKind::DoubleQuotedString, pos),
            '\'' => self.lex_quoted_string('\'', TokenKind::SingleQuotedString, pos),
            '+' => self.lex_plus(pos),
            '-' => self.lex_minus(pos),
            '*' => self.two_char_op('=', TokenKind::MulEqual, TokenKind::Asterisk, pos),
            '/' => self.lex_slash(pos),
            '%' => self.two_char_op('=', TokenKind::ModEqual, TokenKind::Percent, pos),
            '=' => self.lex_equals(pos),
            '!' => self.lex_bang(pos),
            '<' => self.lex_less(pos),
            '>' => self.two_char_op('=', TokenKind::IsGreaterOrEqual, TokenKind::IsGreater, pos),
            '&' => self.lex_ampersand(pos),
            '|' => self.lex_pipe(pos),
            '^' => self.two_char_op('=', TokenKind::XorEqual, TokenKind::Caret, pos),
            '?' => self.lex_question(pos),
            ':' => self.lex_colon(pos),
            '.' => self.lex_dot(pos),
            '#' => self.lex_hash(pos),
            '(' => self.lex_paren_or_cast(pos),
            ')' => self.single(TokenKind::RightParen, pos),
            '{' => self.single(TokenKind::LeftBrace, pos),
            '}' => self.single(TokenKind::RightBrace, pos),
            '[' => self.single(TokenKind::LeftBracket, pos),
            ']' => self.single(TokenKind::RightBracket, pos),
            ';' => self.single(TokenKind::Semicolon, pos),
            ',' => self.single(TokenKind::Comma, pos),
            '\\' => self.single(TokenKind::Backslash, pos),
            c if c.is_ascii_digit() => self.lex_number(pos),
            c if is_ident_start(c) => self.lex_identifier(pos),
            c => {
                self.read_char();
                Token::new(TokenKind::Illegal, c.to_string(), pos)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    fn read_char(&mut self) {
        if self.read_pos >= self.src.len() {
            self.ch = '\0';
            self.pos = self.read_pos;
            return;
        }
        let ch = next_char_at(self.src, self.read_pos);
        self.pos = self.read_pos;
        self.read_pos += ch.len_utf8();
        self.ch = ch;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn peek_char(&self) -> char {
        if self.read_pos >= self.src.len() {
            '\0'
        } else {
            next_char_at(self.src, self.read_pos)
        }
    }

    /// Step the cursor forward to the given byte offset.
    fn jump_to(&mut self, offset: usize) {
        while self.pos < offset && self.ch != '\0' {
            self.read_char();
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            read_pos: self.read_pos,
            ch: self.ch,
            line: self.line,
            column: self.column,
            in_php: self.in_php,
            queued: self.queued.clone(),
        }
    }

    fn restore(&mut self, saved: Snapshot) {
        self.pos = saved.pos;
        self.read_pos = saved.read_pos;
        self.ch = saved.ch;
        self.line = saved.line;
        self.column = saved.column;
        self.in_php = saved.in_php;
        self.queued = saved.queued;
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, self.pos as u32)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, ' ' | '\t' | '\n' | '\r') {
            self.read_char();
        }
    }

    fn single(&mut self, kind: TokenKind, pos: Position) -> Token {
        let literal = self.ch.to_string();
        self.read_char();
        Token::new(kind, literal, pos)
    }

    /// Emits `two` if the next char is `second`, else `one`.
    fn two_char_op(
        &mut self,
        second: char,
        two: TokenKind,
        one: TokenKind,
        pos: Position,
    ) -> Token {
        let first = self.ch;
        self.read_char();
        if self.ch == second {
            self.read_char();
            Token::new(two, format!("{}{}", first, second), pos)
        } else {
            Token::new(one, first.to_string(), pos)
        }
    }

    // -------------------------------------------------------------------------
    // Inline HTML / open tag
    // -------------------------------------------------------------------------

    fn lex_outside_php(&mut self) -> Token {
        let pos = self.position();
        if self.ch == '\0' {
            return Token::new(TokenKind::Eof, "", pos);
        }
        if self.src[self.pos..].starts_with("<?php") {
            let end = self.pos + "<?php".len();
            self.jump_to(end);
            self.in_php = true;
            return Token::new(TokenKind::OpenTag, "<?php", pos);
        }
        // Everything up to the next open tag (or EOF) is one inline HTML token.
        let rest = &self.src[self.pos..];
        let end = match memmem::find(rest.as_bytes(), b"<?php") {
            Some(idx) => self.pos + idx,
            None => self.src.len(),
        };
        let html = self.src[self.pos..end].to_string();
        self.jump_to(end);
        Token::new(TokenKind::InlineHtml, html, pos)
    }

    // -------------------------------------------------------------------------
    // Identifiers, variables, numbers
    // -------------------------------------------------------------------------

    fn lex_identifier(&mut self, pos: Position) -> Token {
        let start = self.pos;
        while is_ident_char(self.ch) {
            self.read_char();
        }
        let text = &self.src[start..self.pos];
        match resolve_keyword(text) {
            Some(kind) => Token::new(kind, text, pos),
            None => Token::new(TokenKind::Identifier, text, pos),
        }
    }

    fn lex_dollar(&mut self, pos: Position) -> Token {
        if is_ident_start(self.peek_char()) {
            let start = self.pos;
            self.read_char(); // consume $
            while is_ident_char(self.ch) {
                self.read_char();
            }
            Token::new(TokenKind::Variable, &self.src[start..self.pos], pos)
        } else {
            self.read_char();
            Token::new(TokenKind::Illegal, "$", pos)
        }
    }

    fn lex_number(&mut self, pos: Position) -> Token {
        // PHP 8 octal literal: 0o / 0O, normalized to lowercase prefix with
        // separators stripped.
        if self.ch == '0' && matches!(self.peek_char(), 'o' | 'O') {
            self.read_char(); // 0
            self.read_char(); // o
            let start = self.pos;
            while matches!(self.ch, '0'..='7' | '_') {
                self.read_char();
            }
            let digits: String = self.src[start..self.pos]
                .chars()
                .filter(|c| *c != '_')
                .collect();
            return Token::new(TokenKind::IntNumber, format!("0o{}", digits), pos);
        }

        let start = self.pos;
        let mut is_float = false;
        while self.ch.is_ascii_digit() || self.ch == '.' || self.ch == '_' {
            if self.ch == '.' {
                if is_float || !self.peek_char().is_ascii_digit() {
                    break;
                }
                is_float = true;
            }
            self.read_char();
        }
        let literal: String = self.src[start..self.pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        let kind = if is_float {
            TokenKind::FloatNumber
        } else {
            TokenKind::IntNumber
        };
        Token::new(kind, literal, pos)
    }

    // -------------------------------------------------------------------------
    // Strings
    // -------------------------------------------------------------------------

    /// Reads a quoted string, processing the common escapes eagerly and
    /// passing unknown escapes through untouched.
    fn lex_quoted_string(&mut self, quote: char, kind: TokenKind, pos: Position) -> Token {
        self.read_char(); // opening quote
        let mut out = String::new();
        while self.ch != quote && self.ch != '\0' {
            if self.ch == '\\' {
                self.read_char();
                match self.ch {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    '\\' => out.push('\\'),
                    c if c == quote => out.push(quote),
                    c => {
                        out.push('\\');
                        out.push(c);
                    }
                }
            } else {
                out.push(self.ch);
            }
            self.read_char();
        }
        if self.ch == quote {
            self.read_char(); // closing quote
        }
        Token::new(kind, out, pos)
    }

    // -------------------------------------------------------------------------
    // Operators
    // -------------------------------------------------------------------------

    fn lex_plus(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '+' => {
                self.read_char();
                Token::new(TokenKind::Inc, "++", pos)
            }
            '=' => {
                self.read_char();
                Token::new(TokenKind::PlusEqual, "+=", pos)
            }
            _ => Token::new(TokenKind::Plus, "+", pos),
        }
    }

    fn lex_minus(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '-' => {
                self.read_char();
                Token::new(TokenKind::Dec, "--", pos)
            }
            '=' => {
                self.read_char();
                Token::new(TokenKind::MinusEqual, "-=", pos)
            }
            '>' => {
                self.read_char();
                Token::new(TokenKind::ObjectOperator, "->", pos)
            }
            _ => Token::new(TokenKind::Minus, "-", pos),
        }
    }

    fn lex_slash(&mut self, pos: Position) -> Token {
        match self.peek_char() {
            '/' => self.lex_line_comment(pos),
            '*' => self.lex_block_comment(pos),
            '=' => {
                self.read_char();
                self.read_char();
                Token::new(TokenKind::DivEqual, "/=", pos)
            }
            _ => {
                self.read_char();
                Token::new(TokenKind::Slash, "/", pos)
            }
        }
    }

    fn lex_line_comment(&mut self, pos: Position) -> Token {
        let start = self.pos;
        let end = match memchr_iter(b'\n', &self.src.as_bytes()[self.pos..]).next() {
            Some(idx) => self.pos + idx,
            None => self.src.len(),
        };
        self.jump_to(end);
        Token::new(TokenKind::Comment, &self.src[start..end], pos)
    }

    fn lex_block_comment(&mut self, pos: Position) -> Token {
        let start = self.pos;
        let is_doc = self.src[self.pos..].starts_with("/**");
        let search_from = self.pos + 2;
        let end = match memmem::find(&self.src.as_bytes()[search_from..], b"*/") {
            Some(idx) => search_from + idx + 2,
            None => self.src.len(),
        };
        self.jump_to(end);
        let kind = if is_doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        Token::new(kind, &self.src[start..end], pos)
    }

    fn lex_hash(&mut self, pos: Position) -> Token {
        if self.peek_char() == '[' {
            self.read_char();
            self.read_char();
            return Token::new(TokenKind::Attribute, "#[", pos);
        }
        self.lex_line_comment(pos)
    }

    fn lex_equals(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '=' => {
                self.read_char();
                if self.ch == '=' {
                    self.read_char();
                    Token::new(TokenKind::IsIdentical, "===", pos)
                } else {
                    Token::new(TokenKind::IsEqual, "==", pos)
                }
            }
            '>' => {
                self.read_char();
                Token::new(TokenKind::DoubleArrow, "=>", pos)
            }
            _ => Token::new(TokenKind::Assign, "=", pos),
        }
    }

    fn lex_bang(&mut self, pos: Position) -> Token {
        self.read_char();
        if self.ch == '=' {
            self.read_char();
            if self.ch == '=' {
                self.read_char();
                Token::new(TokenKind::IsNotIdentical, "!==", pos)
            } else {
                Token::new(TokenKind::IsNotEqual, "!=", pos)
            }
        } else {
            Token::new(TokenKind::Not, "!", pos)
        }
    }

    fn lex_less(&mut self, pos: Position) -> Token {
        if self.src[self.pos..].starts_with("<<<") {
            return self.lex_heredoc(pos);
        }
        self.read_char();
        match self.ch {
            '=' => {
                self.read_char();
                if self.ch == '>' {
                    self.read_char();
                    Token::new(TokenKind::Spaceship, "<=>", pos)
                } else {
                    Token::new(TokenKind::IsSmallerOrEqual, "<=", pos)
                }
            }
            '>' => {
                self.read_char();
                Token::new(TokenKind::IsNotEqual, "<>", pos)
            }
            _ => Token::new(TokenKind::IsSmaller, "<", pos),
        }
    }

    fn lex_ampersand(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '&' => {
                self.read_char();
                Token::new(TokenKind::BooleanAnd, "&&", pos)
            }
            '=' => {
                self.read_char();
                Token::new(TokenKind::AndEqual, "&=", pos)
            }
            _ => Token::new(TokenKind::Ampersand, "&", pos),
        }
    }

    fn lex_pipe(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '|' => {
                self.read_char();
                Token::new(TokenKind::BooleanOr, "||", pos)
            }
            '=' => {
                self.read_char();
                Token::new(TokenKind::OrEqual, "|=", pos)
            }
            _ => Token::new(TokenKind::Pipe, "|", pos),
        }
    }

    fn lex_question(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '?' => {
                self.read_char();
                if self.ch == '=' {
                    self.read_char();
                    Token::new(TokenKind::CoalesceEqual, "??=", pos)
                } else {
                    Token::new(TokenKind::Coalesce, "??", pos)
                }
            }
            '-' if self.peek_char() == '>' => {
                self.read_char();
                self.read_char();
                Token::new(TokenKind::NullsafeObjectOperator, "?->", pos)
            }
            '>' => {
                self.read_char();
                self.in_php = false;
                Token::new(TokenKind::CloseTag, "?>", pos)
            }
            _ => Token::new(TokenKind::Question, "?", pos),
        }
    }

    fn lex_colon(&mut self, pos: Position) -> Token {
        self.read_char();
        if self.ch == ':' {
            self.read_char();
            // `::class` is one token so rule engines see class-name literals
            // uniformly.
            if is_ident_start(self.ch) {
                let saved = self.snapshot();
                let start = self.pos;
                while is_ident_char(self.ch) {
                    self.read_char();
                }
                if self.src[start..self.pos].eq_ignore_ascii_case("class") {
                    return Token::new(TokenKind::ClassConst, "::class", pos);
                }
                self.restore(saved);
            }
            Token::new(TokenKind::DoubleColon, "::", pos)
        } else {
            Token::new(TokenKind::Colon, ":", pos)
        }
    }

    fn lex_dot(&mut self, pos: Position) -> Token {
        self.read_char();
        match self.ch {
            '.' if self.peek_char() == '.' => {
                self.read_char();
                self.read_char();
                Token::new(TokenKind::Ellipsis, "...", pos)
            }
            '=' => {
                self.read_char();
                Token::new(TokenKind::ConcatEqual, ".=", pos)
            }
            _ => Token::new(TokenKind::Dot, ".", pos),
        }
    }

    /// `(` may start a cast like `(int)`; otherwise it is a plain paren.
    fn lex_paren_or_cast(&mut self, pos: Position) -> Token {
        let saved = self.snapshot();
        self.read_char(); // (
        while matches!(self.ch, ' ' | '\t') {
            self.read_char();
        }
        let start = self.pos;
        while self.ch.is_ascii_alphabetic() {
            self.read_char();
        }
        let word = self.src[start..self.pos].to_ascii_lowercase();
        while matches!(self.ch, ' ' | '\t') {
            self.read_char();
        }
        let kind = match word.as_str() {
            "int" | "integer" => Some(TokenKind::IntCast),
            "bool" | "boolean" => Some(TokenKind::BoolCast),
            "float" | "double" | "real" => Some(TokenKind::FloatCast),
            "string" => Some(TokenKind::StringCast),
            "array" => Some(TokenKind::ArrayCast),
            "object" => Some(TokenKind::ObjectCast),
            "unset" => Some(TokenKind::UnsetCast),
            _ => None,
        };
        match kind {
            Some(kind) if self.ch == ')' => {
                self.read_char(); // )
                Token::new(kind, format!("({})", word), pos)
            }
            _ => {
                self.restore(saved);
                self.read_char();
                Token::new(TokenKind::LeftParen, "(", pos)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Heredoc / nowdoc
    // -------------------------------------------------------------------------

    /// Queues the three-token heredoc sequence: start marker, one body token
    /// spanning every line before the terminator line, end marker. The
    /// terminator is the identifier at the start of a line followed by `;`,
    /// newline, or EOF. A single-quoted identifier makes it a nowdoc, which
    /// uses distinct marker kinds so the parser never interpolates the body.
    fn lex_heredoc(&mut self, pos: Position) -> Token {
        self.read_char();
        self.read_char();
        self.read_char(); // <<<
        while matches!(self.ch, ' ' | '\t') {
            self.read_char();
        }

        let quote = match self.ch {
            '\'' | '"' => {
                let q = self.ch;
                self.read_char();
                Some(q)
            }
            _ => None,
        };

        let ident_start = self.pos;
        while is_ident_char(self.ch) {
            self.read_char();
        }
        let ident = self.src[ident_start..self.pos].to_string();
        if ident.is_empty() {
            return Token::new(TokenKind::Illegal, "heredoc: missing identifier", pos);
        }
        if let Some(q) = quote {
            if self.ch == q {
                self.read_char();
            } else {
                return Token::new(
                    TokenKind::Illegal,
                    format!("heredoc: unterminated identifier quote before {}", ident),
                    pos,
                );
            }
        }

        // Skip the rest of the start line.
        while self.ch != '\n' && self.ch != '\0' {
            self.read_char();
        }
        if self.ch == '\n' {
            self.read_char();
        }
        let body_start = self.pos;
        let body_pos = self.position();

        let (body_end, term_start) = self.find_heredoc_terminator(body_start, &ident);
        let body = self.src[body_start..body_end].to_string();

        self.jump_to(term_start);
        let end_pos = self.position();
        self.jump_to(term_start + ident.len());

        let (start_kind, end_kind) = if quote == Some('\'') {
            (TokenKind::StartNowdoc, TokenKind::EndNowdoc)
        } else {
            (TokenKind::StartHeredoc, TokenKind::EndHeredoc)
        };
        self.queued
            .push_back(Token::new(TokenKind::EncapsedAndWhitespace, body, body_pos));
        self.queued
            .push_back(Token::new(end_kind, ident.clone(), end_pos));
        Token::new(start_kind, ident, pos)
    }

    /// Scans line starts for the terminator identifier. Returns
    /// `(body_end, terminator_start)`; the body excludes the terminator line
    /// but keeps the newline that ends the last body line.
    fn find_heredoc_terminator(&self, body_start: usize, ident: &str) -> (usize, usize) {
        let bytes = self.src.as_bytes();
        let mut line_start = body_start;
        loop {
            if self.is_heredoc_terminator_at(line_start, ident) {
                return (line_start, line_start);
            }
            match memchr_iter(b'\n', &bytes[line_start..]).next() {
                Some(idx) => line_start += idx + 1,
                // Unterminated heredoc: everything to EOF is body.
                None => return (self.src.len(), self.src.len()),
            }
        }
    }

    fn is_heredoc_terminator_at(&self, offset: usize, ident: &str) -> bool {
        let rest = &self.src[offset.min(self.src.len())..];
        if !rest.starts_with(ident) {
            return false;
        }
        matches!(rest[ident.len()..].chars().next(), None | Some(';' | '\n' | '\r'))
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn next_char_at(src: &str, offset: usize) -> char {
    // Offsets always land on char boundaries; the cursor only advances by
    // whole chars.
    src[offset..].chars().next().unwrap_or('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    fn collect_kinds(source: &str) -> Vec<TokenKind> {
        collect_tokens(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_open_tag_and_simple_statement() {
        let kinds = collect_kinds("<?php $x = 1;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::Variable,
                TokenKind::Assign,
                TokenKind::IntNumber,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_variable_literal_keeps_dollar() {
        let tokens = collect_tokens("<?php $total;");
        assert_eq!(tokens[1].kind, TokenKind::Variable);
        assert_eq!(tokens[1].literal, "$total");
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = collect_tokens("<?php $café = 1; über();");
        assert_eq!(tokens[1].literal, "$café");
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
        assert_eq!(tokens[5].literal, "über");
    }

    #[test]
    fn test_multi_char_operators() {
        let kinds = collect_kinds("<?php === !== <=> ?? ??= :: -> ?-> ... =>");
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::IsIdentical,
                TokenKind::IsNotIdentical,
                TokenKind::Spaceship,
                TokenKind::Coalesce,
                TokenKind::CoalesceEqual,
                TokenKind::DoubleColon,
                TokenKind::ObjectOperator,
                TokenKind::NullsafeObjectOperator,
                TokenKind::Ellipsis,
                TokenKind::DoubleArrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_class_const_is_one_token() {
        let tokens = collect_tokens("<?php Foo::class;");
        assert_eq!(tokens[2].kind, TokenKind::ClassConst);
        assert_eq!(tokens[2].literal, "::class");
    }

    #[test]
    fn test_double_colon_without_class_keyword() {
        let tokens = collect_tokens("<?php Foo::BAR;");
        assert_eq!(tokens[2].kind, TokenKind::DoubleColon);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].literal, "BAR");
    }

    #[test]
    fn test_escape_processing() {
        let tokens = collect_tokens(r#"<?php "a\tb\nc\\d\"e\xf";"#);
        assert_eq!(tokens[1].kind, TokenKind::DoubleQuotedString);
        // Known escapes are processed, unknown ones pass through.
        assert_eq!(tokens[1].literal, "a\tb\nc\\d\"e\\xf");
    }

    #[test]
    fn test_single_quoted_string() {
        let tokens = collect_tokens(r"<?php 'it\'s';");
        assert_eq!(tokens[1].kind, TokenKind::SingleQuotedString);
        assert_eq!(tokens[1].literal, "it's");
    }

    #[test]
    fn test_numbers_with_separators() {
        let tokens = collect_tokens("<?php 1_000_000 3.14 2_5.5;");
        assert_eq!(tokens[1].literal, "1000000");
        assert_eq!(tokens[1].kind, TokenKind::IntNumber);
        assert_eq!(tokens[2].literal, "3.14");
        assert_eq!(tokens[2].kind, TokenKind::FloatNumber);
        assert_eq!(tokens[3].literal, "25.5");
    }

    #[test]
    fn test_octal_normalization() {
        let tokens = collect_tokens("<?php 0O1_7;");
        assert_eq!(tokens[1].kind, TokenKind::IntNumber);
        assert_eq!(tokens[1].literal, "0o17");
    }

    #[test]
    fn test_heredoc_three_token_sequence() {
        let source = "<?php $str = <<<EOT\nline one\nline two\nEOT;";
        let tokens = collect_tokens(source);
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::Variable,
                TokenKind::Assign,
                TokenKind::StartHeredoc,
                TokenKind::EncapsedAndWhitespace,
                TokenKind::EndHeredoc,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[3].literal, "EOT");
        assert_eq!(tokens[4].literal, "line one\nline two\n");
        assert_eq!(tokens[5].literal, "EOT");
    }

    #[test]
    fn test_nowdoc_quoted_identifier() {
        let source = "<?php $s = <<<'RAW'\nno $interp here\nRAW;";
        let tokens = collect_tokens(source);
        assert_eq!(tokens[3].kind, TokenKind::StartNowdoc);
        assert_eq!(tokens[3].literal, "RAW");
        assert_eq!(tokens[4].literal, "no $interp here\n");
        assert_eq!(tokens[5].kind, TokenKind::EndNowdoc);
    }

    #[test]
    fn test_double_quoted_heredoc_identifier_stays_heredoc() {
        let source = "<?php $s = <<<\"EOT\"\nhi $name\nEOT;";
        let tokens = collect_tokens(source);
        assert_eq!(tokens[3].kind, TokenKind::StartHeredoc);
        assert_eq!(tokens[5].kind, TokenKind::EndHeredoc);
    }

    #[test]
    fn test_heredoc_missing_identifier_is_illegal() {
        let tokens = collect_tokens("<?php $s = <<< \n;");
        assert_eq!(tokens[3].kind, TokenKind::Illegal);
        assert!(tokens[3].literal.contains("missing identifier"));
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut lexer = Lexer::new("<?php $a + $b;");
        assert_eq!(lexer.next_token().kind, TokenKind::OpenTag);
        let peeked = lexer.peek_token();
        let next = lexer.next_token();
        assert_eq!(peeked, next);
        assert_eq!(next.literal, "$a");
    }

    #[test]
    fn test_peek_across_heredoc_queue() {
        let mut lexer = Lexer::new("<?php <<<EOT\nbody\nEOT;");
        assert_eq!(lexer.next_token().kind, TokenKind::OpenTag);
        assert_eq!(lexer.next_token().kind, TokenKind::StartHeredoc);
        assert_eq!(lexer.peek_token().kind, TokenKind::EncapsedAndWhitespace);
        assert_eq!(lexer.next_token().kind, TokenKind::EncapsedAndWhitespace);
        assert_eq!(lexer.next_token().kind, TokenKind::EndHeredoc);
    }

    #[test]
    fn test_comments() {
        let tokens = collect_tokens("<?php // line\n/* block */ /** doc */ # hash\n1;");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].literal, "// line");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].literal, "/* block */");
        assert_eq!(tokens[3].kind, TokenKind::DocComment);
        assert_eq!(tokens[3].literal, "/** doc */");
        assert_eq!(tokens[4].kind, TokenKind::Comment);
        assert_eq!(tokens[4].literal, "# hash");
    }

    #[test]
    fn test_attribute_marker() {
        let kinds = collect_kinds("<?php #[Attr] class A {}");
        assert_eq!(kinds[1], TokenKind::Attribute);
        assert_eq!(kinds[2], TokenKind::Identifier);
    }

    #[test]
    fn test_casts() {
        let kinds = collect_kinds("<?php (int) (bool) (string) ( float ) (unknown)");
        assert_eq!(
            &kinds[1..6],
            &[
                TokenKind::IntCast,
                TokenKind::BoolCast,
                TokenKind::StringCast,
                TokenKind::FloatCast,
                TokenKind::LeftParen,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = collect_tokens("<?php\n$x = 1;");
        let var = &tokens[1];
        assert_eq!(var.pos.line, 2);
        assert_eq!(var.pos.column, 1);
        assert_eq!(var.pos.offset, 6);
    }

    #[test]
    fn test_inline_html_before_open_tag() {
        let tokens = collect_tokens("<h1>hi</h1><?php 1;");
        assert_eq!(tokens[0].kind, TokenKind::InlineHtml);
        assert_eq!(tokens[0].literal, "<h1>hi</h1>");
        assert_eq!(tokens[1].kind, TokenKind::OpenTag);
    }

    #[test]
    fn test_illegal_byte_does_not_stop_scan() {
        let kinds = collect_kinds("<?php 1 ` 2;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenTag,
                TokenKind::IntNumber,
                TokenKind::Illegal,
                TokenKind::IntNumber,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_resolve_case_insensitively() {
        let kinds = collect_kinds("<?php IF Function MATCH");
        assert_eq!(
            &kinds[1..4],
            &[TokenKind::If, TokenKind::Function, TokenKind::Match]
        );
    }
}
