use std::rc::Rc;
use std::str::FromStr;

use num_bigint::BigInt;

use crate::context::ContextKind;
use crate::loc::{Loc, Pos};
use crate::options::OnComment;
use crate::parse_error::{LocalizedParseError, ParseError, ParseResult};
use crate::regexp::validate_regexp_literal;
use crate::source::Source;
use crate::token::Token;
use crate::unicode::{
    get_binary_value, get_hex_value, get_octal_value, is_ascii, is_ascii_newline,
    is_ascii_whitespace, is_decimal_digit, is_id_part_ascii, is_id_part_unicode,
    is_id_start_ascii, is_id_start_unicode, is_unicode_newline, is_unicode_whitespace,
};

/// A comment skipped by the lexer, reported through the `on_comment` callback.
pub struct Comment {
    pub loc: Loc,
    pub text: String,
    pub is_block: bool,
}

pub struct Lexer<'a> {
    pub source: &'a Rc<Source>,
    buf: &'a str,
    current: char,
    pos: Pos,
    is_new_line_before_current: bool,
    pub in_strict_mode: bool,
    pub in_module: bool,
    pub ecma_version: u32,
    pub allow_hash_bang: bool,
    /// Whether the most recently lexed identifier or keyword contained a unicode escape
    pub contains_esc: bool,
    /// Stack of syntactic contexts used to disambiguate `/`, `{`, `}`, and template tokens
    context: Vec<ContextKind>,
    /// Whether an expression may start at the next token. Kept consistent with the context
    /// stack after every token.
    expr_allowed: bool,
    /// The most recently emitted token, used by the context update rules
    last_token: Token,
    /// End position of the most recently emitted token
    last_token_end: Pos,
    on_comment: Option<OnComment>,
}

/// A save point for the lexer, can be used to restore the lexer to a particular position.
pub struct SavedLexerState {
    current: char,
    pos: Pos,
    is_new_line_before_current: bool,
    contains_esc: bool,
    context: Vec<ContextKind>,
    expr_allowed: bool,
    last_token: Token,
    last_token_end: Pos,
}

pub type LexResult = ParseResult<(Token, Loc)>;

/// Character that marks an EOF. Not a valid unicode character.
const EOF_CHAR: char = '\u{ffff}';

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Rc<Source>, ecma_version: u32, in_module: bool) -> Lexer<'a> {
        Lexer::new_at(source, 0, ecma_version, in_module)
    }

    pub fn new_at(
        source: &'a Rc<Source>,
        start_pos: Pos,
        ecma_version: u32,
        in_module: bool,
    ) -> Lexer<'a> {
        let buf = &source.contents;
        let current = if start_pos < buf.len() {
            buf.as_bytes()[start_pos].into()
        } else {
            EOF_CHAR
        };

        Lexer {
            source,
            buf,
            current,
            pos: start_pos,
            is_new_line_before_current: false,
            in_strict_mode: in_module,
            in_module,
            ecma_version,
            allow_hash_bang: false,
            contains_esc: false,
            context: vec![ContextKind::BlockStatement],
            expr_allowed: true,
            last_token: Token::Eof,
            last_token_end: 0,
            on_comment: None,
        }
    }

    pub fn set_on_comment(&mut self, on_comment: Option<OnComment>) {
        self.on_comment = on_comment;
    }

    pub fn save(&self) -> SavedLexerState {
        SavedLexerState {
            current: self.current,
            pos: self.pos,
            is_new_line_before_current: self.is_new_line_before_current,
            contains_esc: self.contains_esc,
            context: self.context.clone(),
            expr_allowed: self.expr_allowed,
            last_token: self.last_token.clone(),
            last_token_end: self.last_token_end,
        }
    }

    pub fn restore(&mut self, save_state: &SavedLexerState) {
        self.current = save_state.current;
        self.pos = save_state.pos;
        self.is_new_line_before_current = save_state.is_new_line_before_current;
        self.contains_esc = save_state.contains_esc;
        self.context = save_state.context.clone();
        self.expr_allowed = save_state.expr_allowed;
        self.last_token = save_state.last_token.clone();
        self.last_token_end = save_state.last_token_end;
    }

    pub fn is_new_line_before_current(&self) -> bool {
        self.is_new_line_before_current
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn context_depth(&self) -> usize {
        self.context.len()
    }

    /// Replace the top of the context stack. Used by the parser when it discovers that a token
    /// was scanned in the wrong grammatical position, e.g. the `function` of an async function
    /// expression.
    pub fn override_context(&mut self, kind: ContextKind) {
        if let Some(top) = self.context.last_mut() {
            *top = kind;
        }
    }

    #[inline]
    fn advance_n(&mut self, n: usize) {
        self.pos += n;
        if self.pos < self.buf.len() {
            self.current = self.buf.as_bytes()[self.pos].into();
        } else {
            self.current = EOF_CHAR;
            self.pos = self.buf.len();
        }
    }

    fn advance(&mut self) {
        self.advance_n(1);
    }

    fn advance2(&mut self) {
        self.advance_n(2);
    }

    fn advance3(&mut self) {
        self.advance_n(3);
    }

    fn advance4(&mut self) {
        self.advance_n(4);
    }

    #[inline]
    fn peek_n(&self, n: usize) -> char {
        let next_pos = self.pos + n;
        if next_pos < self.buf.len() {
            self.buf.as_bytes()[next_pos].into()
        } else {
            EOF_CHAR
        }
    }

    fn peek(&self) -> char {
        self.peek_n(1)
    }

    fn peek2(&self) -> char {
        self.peek_n(2)
    }

    fn peek3(&self) -> char {
        self.peek_n(3)
    }

    fn mark_loc(&self, start_pos: Pos) -> Loc {
        Loc { start: start_pos, end: self.pos }
    }

    fn emit(&mut self, token: Token, start_pos: Pos) -> LexResult {
        self.update_context(&token);
        self.last_token_end = self.pos;
        Ok((token, self.mark_loc(start_pos)))
    }

    fn error<T>(&self, loc: Loc, error: ParseError) -> ParseResult<T> {
        let source = (*self.source).clone();
        Err(LocalizedParseError { error, source_loc: Some((loc, source)) })
    }

    // Context stack maintenance. Runs after every token, reading the previous token's type and
    // updating `expr_allowed` and the stack.

    fn update_context(&mut self, token: &Token) {
        let prev = std::mem::replace(&mut self.last_token, token.clone());

        match token {
            Token::RightParen | Token::RightBrace => {
                if self.context.len() == 1 {
                    self.expr_allowed = true;
                    return;
                }

                let mut out = self.context.pop().unwrap();
                // The brace that closes a function body also leaves the function context
                if out == ContextKind::BlockStatement
                    && matches!(self.context.last(), Some(context) if context.is_function())
                {
                    out = self.context.pop().unwrap();
                }

                self.expr_allowed = !out.is_expr();
            }
            Token::LeftBrace => {
                let kind = if self.brace_is_block(&prev) {
                    ContextKind::BlockStatement
                } else {
                    ContextKind::BlockExpression
                };
                self.context.push(kind);
                self.expr_allowed = true;
            }
            Token::DollarBrace => {
                self.context.push(ContextKind::TemplateBrace);
                self.expr_allowed = true;
            }
            Token::LeftParen => {
                let is_statement_paren =
                    matches!(prev, Token::If | Token::For | Token::With | Token::While);
                let kind = if is_statement_paren {
                    ContextKind::ParenStatement
                } else {
                    ContextKind::ParenExpression
                };
                self.context.push(kind);
                self.expr_allowed = true;
            }
            // Update operators leave `expr_allowed` untouched
            Token::Increment | Token::Decrement => {}
            Token::Function | Token::Class => {
                let is_expression = prev.is_before_expr()
                    && !matches!(prev, Token::Semicolon | Token::Else)
                    && !(matches!(prev, Token::Return) && self.is_new_line_before_current)
                    && !(matches!(prev, Token::Colon | Token::LeftBrace)
                        && self.context.last() == Some(&ContextKind::BlockStatement));
                let kind = if is_expression {
                    ContextKind::FunctionExpression
                } else {
                    ContextKind::FunctionStatement
                };
                self.context.push(kind);
                self.expr_allowed = false;
            }
            Token::BackQuote => {
                if self.context.last() == Some(&ContextKind::Template) {
                    self.context.pop();
                } else {
                    self.context.push(ContextKind::Template);
                }
                self.expr_allowed = false;
            }
            Token::Multiply => {
                // A star directly after the function keyword marks a generator
                if prev == Token::Function {
                    let index = self.context.len() - 1;
                    self.context[index] = match self.context[index] {
                        ContextKind::FunctionExpression => ContextKind::FunctionExpressionGenerator,
                        _ => ContextKind::FunctionGenerator,
                    };
                }
                self.expr_allowed = true;
            }
            Token::Identifier(name) => {
                let mut allowed = false;
                if self.ecma_version >= 6 && !matches!(prev, Token::Period | Token::QuestionDot) {
                    if (name == "of" && !self.expr_allowed)
                        || (name == "yield" && self.in_generator_context())
                    {
                        allowed = true;
                    }
                }
                self.expr_allowed = allowed;
            }
            _ => self.expr_allowed = token.is_before_expr(),
        }
    }

    /// Decide whether a `{` opens a statement block or an object-like expression, from the
    /// previous token, the current context, and newline placement.
    fn brace_is_block(&self, prev: &Token) -> bool {
        let parent = *self.context.last().unwrap();
        if matches!(parent, ContextKind::FunctionExpression | ContextKind::FunctionStatement) {
            return true;
        }

        // A colon after a brace context continues an object literal or starts a labeled
        // statement body, matching the surrounding brace kind
        if *prev == Token::Colon
            && matches!(parent, ContextKind::BlockStatement | ContextKind::BlockExpression)
        {
            return !parent.is_expr();
        }

        // `return {` is a block only when separated by a newline (ASI applies)
        if *prev == Token::Return {
            return self.is_new_line_before_current;
        }
        if matches!(prev, Token::Identifier(_)) && self.expr_allowed {
            return self.is_new_line_before_current;
        }

        if matches!(
            prev,
            Token::Else | Token::Semicolon | Token::Eof | Token::RightParen | Token::Arrow
        ) {
            return true;
        }

        if *prev == Token::LeftBrace {
            return parent == ContextKind::BlockStatement;
        }

        if matches!(prev, Token::Var | Token::Const | Token::Identifier(_)) {
            return false;
        }

        !self.expr_allowed
    }

    fn in_generator_context(&self) -> bool {
        for context in self.context.iter().rev() {
            if context.is_function() {
                return context.is_generator();
            }
        }

        false
    }

    pub fn next(&mut self) -> LexResult {
        // Template interiors use a dedicated scanner which preserves whitespace
        if self.context.last() == Some(&ContextKind::Template) {
            self.is_new_line_before_current = false;
            self.contains_esc = false;
            return self.read_template_token();
        }

        self.is_new_line_before_current = false;
        self.contains_esc = false;

        loop {
            // Fast pass for skipping ASCII whitespace and newlines
            loop {
                if is_ascii(self.current) {
                    if is_ascii_whitespace(self.current) {
                        self.advance();
                    } else if is_ascii_newline(self.current) {
                        self.is_new_line_before_current = true;
                        self.advance();
                    } else {
                        break;
                    }
                } else {
                    break;
                }
            }

            let start_pos = self.pos;

            return match self.current {
                '+' => match self.peek() {
                    '+' => {
                        self.advance2();
                        self.emit(Token::Increment, start_pos)
                    }
                    '=' => {
                        self.advance2();
                        self.emit(Token::AddEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Plus, start_pos)
                    }
                },
                '-' => match self.peek() {
                    // The `-->` singleline HTML close comment, only outside modules and only at
                    // the start of a line
                    '-' if self.peek2() == '>'
                        && !self.in_module
                        && (self.last_token_end == 0 || self.is_new_line_before_current) =>
                    {
                        self.advance3();
                        self.skip_line_comment(start_pos, start_pos + 3)?;
                        continue;
                    }
                    '-' => {
                        self.advance2();
                        self.emit(Token::Decrement, start_pos)
                    }
                    '=' => {
                        self.advance2();
                        self.emit(Token::SubtractEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Minus, start_pos)
                    }
                },
                '*' => match self.peek() {
                    '*' if self.ecma_version >= 7 => match self.peek2() {
                        '=' => {
                            self.advance3();
                            self.emit(Token::ExponentEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::Exponent, start_pos)
                        }
                    },
                    '=' => {
                        self.advance2();
                        self.emit(Token::MultiplyEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Multiply, start_pos)
                    }
                },
                '/' => match self.peek() {
                    '/' => {
                        self.advance2();
                        self.skip_line_comment(start_pos, start_pos + 2)?;
                        continue;
                    }
                    '*' => {
                        self.advance2();
                        self.skip_block_comment(start_pos)?;
                        continue;
                    }
                    // The slash ambiguity: a regexp literal may start wherever an expression is
                    // allowed, otherwise the slash is a division operator
                    _ if self.expr_allowed => self.read_regexp(start_pos),
                    '=' => {
                        self.advance2();
                        self.emit(Token::DivideEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Divide, start_pos)
                    }
                },
                '%' => match self.peek() {
                    '=' => {
                        self.advance2();
                        self.emit(Token::RemainderEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Remainder, start_pos)
                    }
                },
                '&' => match self.peek() {
                    '&' => match self.peek2() {
                        '=' if self.ecma_version >= 12 => {
                            self.advance3();
                            self.emit(Token::LogicalAndEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::LogicalAnd, start_pos)
                        }
                    },
                    '=' => {
                        self.advance2();
                        self.emit(Token::AndEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::BitwiseAnd, start_pos)
                    }
                },
                '|' => match self.peek() {
                    '|' => match self.peek2() {
                        '=' if self.ecma_version >= 12 => {
                            self.advance3();
                            self.emit(Token::LogicalOrEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::LogicalOr, start_pos)
                        }
                    },
                    '=' => {
                        self.advance2();
                        self.emit(Token::OrEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::BitwiseOr, start_pos)
                    }
                },
                '?' => match self.peek() {
                    '?' if self.ecma_version >= 11 => match self.peek2() {
                        '=' if self.ecma_version >= 12 => {
                            self.advance3();
                            self.emit(Token::NullishCoalesceEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::NullishCoalesce, start_pos)
                        }
                    },
                    // ?.5 is a question mark followed by a decimal literal
                    '.' if self.ecma_version >= 11 && !is_decimal_digit(self.peek2()) => {
                        self.advance2();
                        self.emit(Token::QuestionDot, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Question, start_pos)
                    }
                },
                '^' => match self.peek() {
                    '=' => {
                        self.advance2();
                        self.emit(Token::XorEq, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::BitwiseXor, start_pos)
                    }
                },
                '>' => match self.peek() {
                    '>' => match self.peek2() {
                        '>' => match self.peek3() {
                            '=' => {
                                self.advance4();
                                self.emit(Token::ShiftRightLogicalEq, start_pos)
                            }
                            _ => {
                                self.advance3();
                                self.emit(Token::ShiftRightLogical, start_pos)
                            }
                        },
                        '=' => {
                            self.advance3();
                            self.emit(Token::ShiftRightArithmeticEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::ShiftRightArithmetic, start_pos)
                        }
                    },
                    '=' => {
                        self.advance2();
                        self.emit(Token::GreaterThanOrEqual, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::GreaterThan, start_pos)
                    }
                },
                '<' => match self.peek() {
                    // The `<!--` singleline HTML open comment, only outside modules
                    '!' if self.peek2() == '-' && self.peek3() == '-' && !self.in_module => {
                        self.advance4();
                        self.skip_line_comment(start_pos, start_pos + 4)?;
                        continue;
                    }
                    '<' => match self.peek2() {
                        '=' => {
                            self.advance3();
                            self.emit(Token::ShiftLeftEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::ShiftLeft, start_pos)
                        }
                    },
                    '=' => {
                        self.advance2();
                        self.emit(Token::LessThanOrEqual, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::LessThan, start_pos)
                    }
                },
                '~' => {
                    self.advance();
                    self.emit(Token::BitwiseNot, start_pos)
                }
                '=' => match self.peek() {
                    '=' => match self.peek2() {
                        '=' => {
                            self.advance3();
                            self.emit(Token::EqEqEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::EqEq, start_pos)
                        }
                    },
                    '>' => {
                        self.advance2();
                        self.emit(Token::Arrow, start_pos)
                    }
                    _ => {
                        self.advance();
                        self.emit(Token::Equals, start_pos)
                    }
                },
                '!' => match self.peek() {
                    '=' => match self.peek2() {
                        '=' => {
                            self.advance3();
                            self.emit(Token::NotEqEq, start_pos)
                        }
                        _ => {
                            self.advance2();
                            self.emit(Token::NotEq, start_pos)
                        }
                    },
                    _ => {
                        self.advance();
                        self.emit(Token::LogicalNot, start_pos)
                    }
                },
                '(' => {
                    self.advance();
                    self.emit(Token::LeftParen, start_pos)
                }
                ')' => {
                    self.advance();
                    self.emit(Token::RightParen, start_pos)
                }
                '{' => {
                    self.advance();
                    self.emit(Token::LeftBrace, start_pos)
                }
                '}' => {
                    self.advance();
                    self.emit(Token::RightBrace, start_pos)
                }
                '[' => {
                    self.advance();
                    self.emit(Token::LeftBracket, start_pos)
                }
                ']' => {
                    self.advance();
                    self.emit(Token::RightBracket, start_pos)
                }
                ';' => {
                    self.advance();
                    self.emit(Token::Semicolon, start_pos)
                }
                ',' => {
                    self.advance();
                    self.emit(Token::Comma, start_pos)
                }
                '.' => {
                    let next_char = self.peek();
                    if next_char == '.' && self.peek2() == '.' && self.ecma_version >= 6 {
                        self.advance3();
                        self.emit(Token::Spread, start_pos)
                    } else if is_decimal_digit(next_char) {
                        let token = self.lex_decimal_literal()?;
                        self.error_if_cannot_follow_numeric_literal()?;
                        Ok(token)
                    } else {
                        self.advance();
                        self.emit(Token::Period, start_pos)
                    }
                }
                ':' => {
                    self.advance();
                    self.emit(Token::Colon, start_pos)
                }
                '#' => {
                    // A hashbang comment may start at the first byte in the file
                    if self.pos == 0 && self.peek() == '!' && self.allow_hash_bang {
                        self.advance2();
                        self.skip_line_comment(start_pos, start_pos + 2)?;
                        continue;
                    }

                    self.advance();
                    let loc = self.mark_loc(start_pos);
                    self.error(loc, ParseError::UnknownToken("#".to_owned()))
                }
                '0' => {
                    let token = match self.peek() {
                        'b' | 'B' if self.ecma_version >= 6 => self.lex_binary_literal()?,
                        'o' | 'O' if self.ecma_version >= 6 => self.lex_octal_literal()?,
                        'x' | 'X' => self.lex_hex_literal()?,
                        '0'..='9' if self.in_strict_mode => {
                            self.advance();
                            let loc = self.mark_loc(start_pos);
                            return self.error(loc, ParseError::LegacyOctalLiteralInStrictMode);
                        }
                        '0'..='9' => {
                            let start_pos = self.pos;
                            if let Some(token) = self.lex_legacy_octal_literal() {
                                self.emit(token, start_pos)?
                            } else {
                                self.lex_decimal_literal()?
                            }
                        }
                        _ => self.lex_decimal_literal()?,
                    };

                    self.error_if_cannot_follow_numeric_literal()?;
                    Ok(token)
                }
                '1'..='9' => {
                    let token = self.lex_decimal_literal()?;
                    self.error_if_cannot_follow_numeric_literal()?;
                    Ok(token)
                }
                '"' | '\'' => self.lex_string_literal(),
                '`' if self.ecma_version >= 6 => {
                    self.advance();
                    self.emit(Token::BackQuote, start_pos)
                }
                EOF_CHAR => self.emit(Token::Eof, start_pos),
                char if is_id_start_ascii(char) => self.lex_identifier_ascii(start_pos),
                // Escape sequence at the start of an identifier
                '\\' => {
                    let code_point = self.lex_identifier_unicode_escape_sequence()?;
                    if !is_id_start_ascii(code_point) && !is_id_start_unicode(code_point) {
                        let loc = self.mark_loc(start_pos);
                        return self.error(loc, ParseError::UnknownToken(code_point.into()));
                    }

                    self.lex_identifier_non_ascii(start_pos, code_point.into())
                }
                other => {
                    if is_ascii(other) {
                        self.advance();
                        let loc = self.mark_loc(start_pos);
                        self.error(loc, ParseError::UnknownToken(((other as u8) as char).into()))
                    } else {
                        let code_point = self.lex_utf8_codepoint()?;
                        if is_id_start_unicode(code_point) {
                            if (code_point as u32) > 0xFFFF && self.ecma_version < 6 {
                                let loc = self.mark_loc(start_pos);
                                return self
                                    .error(loc, ParseError::UnknownToken(code_point.into()));
                            }
                            self.lex_identifier_non_ascii(start_pos, code_point.into())
                        } else if is_unicode_whitespace(code_point) {
                            continue;
                        } else if is_unicode_newline(code_point) {
                            self.is_new_line_before_current = true;
                            continue;
                        } else {
                            let loc = self.mark_loc(start_pos);
                            self.error(loc, ParseError::UnknownToken(code_point.into()))
                        }
                    }
                }
            };
        }
    }

    fn report_comment(&mut self, start_pos: Pos, text_start: Pos, text_end: Pos, is_block: bool) {
        if let Some(on_comment) = self.on_comment.as_mut() {
            let comment = Comment {
                loc: Loc { start: start_pos, end: self.pos },
                text: self.buf[text_start..text_end].to_owned(),
                is_block,
            };
            on_comment(&comment);
        }
    }

    fn skip_line_comment(&mut self, start_pos: Pos, text_start: Pos) -> ParseResult<()> {
        loop {
            match self.current {
                '\n' | '\r' => {
                    let text_end = self.pos;
                    self.advance();
                    self.is_new_line_before_current = true;
                    self.report_comment(start_pos, text_start, text_end, false);
                    return Ok(());
                }
                EOF_CHAR => {
                    self.report_comment(start_pos, text_start, self.pos, false);
                    return Ok(());
                }
                other => {
                    if is_ascii(other) {
                        self.advance()
                    } else {
                        let before = self.pos;
                        let code_point = self.lex_utf8_codepoint()?;
                        if is_unicode_newline(code_point) {
                            self.is_new_line_before_current = true;
                            self.report_comment(start_pos, text_start, before, false);
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn skip_block_comment(&mut self, start_pos: Pos) -> ParseResult<()> {
        let text_start = self.pos;
        loop {
            match self.current {
                '*' => match self.peek() {
                    '/' => {
                        let text_end = self.pos;
                        self.advance2();
                        self.report_comment(start_pos, text_start, text_end, true);
                        break;
                    }
                    _ => self.advance(),
                },
                '\n' | '\r' => {
                    self.advance();
                    self.is_new_line_before_current = true;
                }
                EOF_CHAR => {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::UnterminatedComment);
                }
                other => {
                    if is_ascii(other) {
                        self.advance()
                    } else {
                        let code_point = self.lex_utf8_codepoint()?;
                        if is_unicode_newline(code_point) {
                            self.is_new_line_before_current = true;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn error_invalid_unicode(&mut self, start_pos: Pos) -> ParseResult<char> {
        let loc = self.mark_loc(start_pos);
        self.error(loc, ParseError::InvalidUnicode)
    }

    fn is_continuation_byte(byte: u8) -> bool {
        (byte & 0xC0) == 0x80
    }

    // Lex a non-ascii unicode codepoint encoded as utf-8
    fn lex_utf8_codepoint(&mut self) -> ParseResult<char> {
        let bytes = self.buf[self.pos..].as_bytes();
        let b1 = bytes[0];

        if (b1 & 0xE0) == 0xC0 && self.pos + 1 < self.buf.len() {
            // Two byte sequence
            self.advance2();

            let b2 = bytes[1];
            if !Self::is_continuation_byte(b2) {
                return self.error_invalid_unicode(self.pos - 2);
            }

            let mut codepoint = (b1 as u32 & 0x1F) << 6;
            codepoint |= b2 as u32 & 0x3F;

            Ok(unsafe { char::from_u32_unchecked(codepoint) })
        } else if (b1 & 0xF0) == 0xE0 && self.pos + 2 < self.buf.len() {
            // Three byte sequence
            self.advance3();

            let b2 = bytes[1];
            let b3 = bytes[2];
            if !Self::is_continuation_byte(b2) || !Self::is_continuation_byte(b3) {
                return self.error_invalid_unicode(self.pos - 3);
            }

            let mut codepoint = (b1 as u32 & 0x0F) << 12;
            codepoint |= (b2 as u32 & 0x3F) << 6;
            codepoint |= b3 as u32 & 0x3F;

            // Char could be in the surrogate pair range, 0xD800 - 0xDFFF, which is not a valid
            // code point on its own
            match char::from_u32(codepoint) {
                None => self.error_invalid_unicode(self.pos - 3),
                Some(char) => Ok(char),
            }
        } else if (b1 & 0xF8) == 0xF0 && self.pos + 3 < self.buf.len() {
            // Four byte sequence
            self.advance4();

            let b2 = bytes[1];
            let b3 = bytes[2];
            let b4 = bytes[3];
            if !Self::is_continuation_byte(b2)
                || !Self::is_continuation_byte(b3)
                || !Self::is_continuation_byte(b4)
            {
                return self.error_invalid_unicode(self.pos - 4);
            }

            let mut codepoint = (b1 as u32 & 0x07) << 18;
            codepoint |= (b2 as u32 & 0x3F) << 12;
            codepoint |= (b3 as u32 & 0x3F) << 6;
            codepoint |= b4 as u32 & 0x3F;

            // Char could be above the code point max, 0x10FFFF
            match char::from_u32(codepoint) {
                None => self.error_invalid_unicode(self.pos - 4),
                Some(char) => Ok(char),
            }
        } else {
            self.advance();
            self.error_invalid_unicode(self.pos)
        }
    }

    /// Skip a series of decimal digits, possibly separated by numeric separators. Numeric
    /// separators must be adjacent to a numeric digit on both sides.
    ///
    /// Return whether any numeric separator was encountered.
    fn skip_decimal_digits(&mut self, allow_numeric_separator: bool) -> ParseResult<bool> {
        // First digit must be a decimal digit
        if !is_decimal_digit(self.current) {
            return Ok(false);
        }

        self.advance();

        // Middle digits may be decimal numbers or numeric separators
        let mut has_numeric_separator = false;
        let mut is_last_char_numeric_separator = false;

        loop {
            is_last_char_numeric_separator = if is_decimal_digit(self.current) {
                false
            } else if self.current == '_' && allow_numeric_separator {
                if is_last_char_numeric_separator {
                    let loc = self.mark_loc(self.pos);
                    return self.error(loc, ParseError::AdjacentNumericSeparators);
                }

                has_numeric_separator = true;

                true
            } else {
                break;
            };

            self.advance()
        }

        // Last digit cannot be a separator
        if is_last_char_numeric_separator {
            let loc = self.mark_loc(self.pos - 1);
            return self.error(loc, ParseError::TrailingNumericSeparator);
        }

        Ok(has_numeric_separator)
    }

    fn lex_decimal_literal(&mut self) -> LexResult {
        let start_pos = self.pos;
        let mut has_numeric_separator = false;

        let has_leading_zero = self.current == '0';
        let allow_numeric_separator = self.ecma_version >= 12 && !has_leading_zero;

        // Read optional digits before the decimal point
        has_numeric_separator |= self.skip_decimal_digits(allow_numeric_separator)?;

        // This is a bigint literal
        if self.current == 'n' && self.ecma_version >= 11 {
            let digits_slice = &self.buf[start_pos..self.pos];
            let digits_slice = if has_numeric_separator {
                digits_slice.replace('_', "")
            } else {
                digits_slice.to_owned()
            };
            let value = BigInt::parse_bytes(digits_slice.as_bytes(), 10).unwrap();
            self.advance();

            // BigInts do not allow a leading zero
            if has_leading_zero && self.pos - 2 != start_pos {
                let loc = self.mark_loc(self.pos);
                return self.error(loc, ParseError::BigIntLeadingZero);
            }

            return self.emit(Token::BigIntLiteral(value), start_pos);
        }

        // Read optional decimal point with its optional following digits
        if self.current == '.' {
            self.advance();
            has_numeric_separator |=
                self.skip_decimal_digits(self.ecma_version >= 12)?;
        }

        // Read optional exponent
        if self.current == 'e' || self.current == 'E' {
            self.advance();

            // Exponent has optional sign
            if self.current == '-' || self.current == '+' {
                self.advance();
            }

            if !is_decimal_digit(self.current) {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::MalformedNumericLiteral);
            }

            has_numeric_separator |=
                self.skip_decimal_digits(self.ecma_version >= 12)?;
        }

        // Parse the float using the Rust stdlib, which cannot handle numeric separators, so if
        // there were separators first generate a string with them removed.
        let end_pos = self.pos;
        let value = if has_numeric_separator {
            f64::from_str(&self.buf[start_pos..end_pos].replace('_', "")).unwrap()
        } else {
            f64::from_str(&self.buf[start_pos..end_pos]).unwrap()
        };

        self.emit(Token::NumberLiteral(value), start_pos)
    }

    #[inline]
    fn lex_literal_with_base(
        &mut self,
        base: u32,
        char_to_digit: fn(char) -> Option<u32>,
    ) -> LexResult {
        let start_pos = self.pos;
        self.advance2();

        let allow_numeric_separator = self.ecma_version >= 12;
        let mut value: f64;

        // First digit must be a digit in the base
        if let Some(digit) = char_to_digit(self.current) {
            value = digit as f64;
            self.advance()
        } else {
            let loc = self.mark_loc(start_pos);
            return self.error(loc, ParseError::MalformedNumericLiteral);
        }

        // Middle digits may be digits in the base or numeric separators
        let mut has_numeric_separator = false;
        let mut is_last_char_numeric_separator = false;
        loop {
            is_last_char_numeric_separator = if let Some(digit) = char_to_digit(self.current) {
                value = value * (base as f64) + digit as f64;

                false
            } else if self.current == '_' && allow_numeric_separator {
                if is_last_char_numeric_separator {
                    let loc = self.mark_loc(self.pos);
                    return self.error(loc, ParseError::AdjacentNumericSeparators);
                }

                has_numeric_separator = true;

                true
            } else {
                break;
            };

            self.advance()
        }

        // Last digit cannot be a separator
        if is_last_char_numeric_separator {
            let loc = self.mark_loc(self.pos - 1);
            return self.error(loc, ParseError::TrailingNumericSeparator);
        }

        if self.current == 'n' && self.ecma_version >= 11 {
            let digits_slice = &self.buf[(start_pos + 2)..self.pos];
            let digits_slice = if has_numeric_separator {
                digits_slice.replace('_', "")
            } else {
                digits_slice.to_owned()
            };
            let value = BigInt::parse_bytes(digits_slice.as_bytes(), base).unwrap();
            self.advance();

            return self.emit(Token::BigIntLiteral(value), start_pos);
        }

        self.emit(Token::NumberLiteral(value), start_pos)
    }

    fn lex_binary_literal(&mut self) -> LexResult {
        self.lex_literal_with_base(2, get_binary_value)
    }

    fn lex_octal_literal(&mut self) -> LexResult {
        self.lex_literal_with_base(8, get_octal_value)
    }

    fn lex_hex_literal(&mut self) -> LexResult {
        self.lex_literal_with_base(16, get_hex_value)
    }

    fn lex_legacy_octal_literal(&mut self) -> Option<Token> {
        let save_state = self.save();

        let mut value: f64 = 0.0;

        while let Some(digit) = get_octal_value(self.current) {
            value = value * 8.0 + digit as f64;

            self.advance();
        }

        // Reparse as a decimal literal if we encounter a digit outside the octal range
        if self.current == '8' || self.current == '9' {
            self.restore(&save_state);
            return None;
        }

        Some(Token::NumberLiteral(value))
    }

    fn error_if_cannot_follow_numeric_literal(&mut self) -> ParseResult<()> {
        let start_pos = self.pos;

        let cannot_follow_numeric_literal;
        let end_pos;

        if self.current == EOF_CHAR {
            cannot_follow_numeric_literal = false;
            end_pos = self.pos;
        } else if is_ascii(self.current) {
            cannot_follow_numeric_literal =
                is_id_start_ascii(self.current) || is_decimal_digit(self.current);
            end_pos = self.pos + 1;
        } else {
            // Peek at the next code point
            let save_state = self.save();
            let code_point = self.lex_utf8_codepoint()?;

            cannot_follow_numeric_literal = is_id_start_unicode(code_point);
            end_pos = self.pos;

            self.restore(&save_state);
        }

        if cannot_follow_numeric_literal {
            let loc = Loc { start: start_pos, end: end_pos };
            self.error(loc, ParseError::IdentifierAfterNumber)
        } else {
            Ok(())
        }
    }

    fn lex_string_literal(&mut self) -> LexResult {
        let quote_char = self.current;
        let start_pos = self.pos;
        self.advance();

        let mut value = String::new();

        while self.current != quote_char {
            match self.current {
                // Escape sequences
                '\\' => match self.peek() {
                    // Single character escapes
                    'n' => {
                        value.push('\n');
                        self.advance2()
                    }
                    '\\' => {
                        value.push('\\');
                        self.advance2()
                    }
                    '\'' => {
                        value.push('\'');
                        self.advance2()
                    }
                    '"' => {
                        value.push('"');
                        self.advance2()
                    }
                    't' => {
                        value.push('\t');
                        self.advance2()
                    }
                    'r' => {
                        value.push('\r');
                        self.advance2()
                    }
                    'b' => {
                        value.push('\x08');
                        self.advance2()
                    }
                    'v' => {
                        value.push('\x0B');
                        self.advance2()
                    }
                    'f' => {
                        value.push('\x0C');
                        self.advance2()
                    }
                    // Null character escape
                    '0' if !is_decimal_digit(self.peek2()) => {
                        value.push('\x00');
                        self.advance2()
                    }
                    // Legacy octal escape
                    first_digit @ ('0'..='7') => {
                        let escape_start_pos = self.pos;
                        self.advance();

                        let mut octal_value = get_octal_value(first_digit).unwrap();
                        self.advance();

                        if let Some(next_digit) = get_octal_value(self.current) {
                            octal_value *= 8;
                            octal_value += next_digit;
                            self.advance();

                            if first_digit <= '3' {
                                if let Some(next_digit) = get_octal_value(self.current) {
                                    octal_value *= 8;
                                    octal_value += next_digit;
                                    self.advance();
                                }
                            }
                        }

                        if self.in_strict_mode {
                            let loc = self.mark_loc(escape_start_pos);
                            return self.error(loc, ParseError::LegacyOctalEscapeInStrictMode);
                        }

                        // Value is at most 0o377 so always a valid char
                        value.push(char::from_u32(octal_value).unwrap())
                    }
                    // Legacy non-octal escape
                    char @ ('8' | '9') => {
                        self.advance2();

                        if self.in_strict_mode {
                            let loc = self.mark_loc(self.pos);
                            return self.error(loc, ParseError::LegacyNonOctalEscapeInStrictMode);
                        }

                        value.push(char)
                    }
                    // Hex escape sequence
                    'x' => {
                        self.advance2();

                        if let Some(x1) = get_hex_value(self.current) {
                            if let Some(x2) = get_hex_value(self.peek()) {
                                let escaped_char = char::from_u32(x1 * 16 + x2).unwrap();
                                value.push(escaped_char);
                                self.advance2();
                            } else {
                                let loc = self.mark_loc(self.pos);
                                self.advance();
                                return self.error(loc, ParseError::MalformedEscapeSequence);
                            }
                        } else {
                            let loc = self.mark_loc(self.pos);
                            return self.error(loc, ParseError::MalformedEscapeSequence);
                        }
                    }
                    // Unicode escape sequence
                    'u' => {
                        let escape_start_pos = self.pos;
                        self.advance2();
                        let code_point = self.lex_unicode_escape_sequence(escape_start_pos)?;
                        // Lone surrogates cannot be represented, substitute the replacement
                        // character
                        value.push(char::from_u32(code_point).unwrap_or('\u{FFFD}'))
                    }
                    // Line continuations, either LF, CR, or CRLF. Ignored in string value.
                    '\n' => self.advance2(),
                    '\r' => {
                        self.advance2();

                        if self.current == '\n' {
                            self.advance()
                        }
                    }
                    EOF_CHAR => {
                        let loc = self.mark_loc(self.pos);
                        return self.error(loc, ParseError::UnterminatedStringLiteral);
                    }
                    // Non-escape character, use character directly
                    other => {
                        if is_ascii(other) {
                            self.advance2();
                            value.push(other);
                        } else {
                            self.advance();
                            let code_point = self.lex_utf8_codepoint()?;

                            // Unicode line continuations are ignored in string value
                            if !is_unicode_newline(code_point) {
                                value.push(code_point);
                            }
                        }
                    }
                },
                // Unterminated string literal
                '\n' | '\r' | EOF_CHAR => {
                    let loc = self.mark_loc(self.pos);
                    return self.error(loc, ParseError::UnterminatedStringLiteral);
                }
                _ => {
                    let char = self.lex_ascii_or_unicode_character()?;
                    // U+2028 and U+2029 are allowed in string literals
                    value.push(char)
                }
            }
        }

        self.advance();

        self.emit(Token::StringLiteral(value), start_pos)
    }

    /// Lex a regexp literal. Must be called with the cursor on the opening `/`, which only
    /// happens when an expression is allowed in this position.
    fn read_regexp(&mut self, start_pos: Pos) -> LexResult {
        self.advance();
        let pattern_start_pos = self.pos;

        let mut in_class = false;
        loop {
            match self.current {
                '/' if !in_class => break,
                '[' => {
                    in_class = true;
                    self.advance();
                }
                ']' => {
                    in_class = false;
                    self.advance();
                }
                '\\' => {
                    self.advance();
                    self.lex_regexp_character_non_line_terminator()?;
                }
                EOF_CHAR => {
                    let loc = self.mark_loc(self.pos);
                    return self.error(loc, ParseError::UnterminatedRegexp);
                }
                _ => {
                    self.lex_regexp_character_non_line_terminator()?;
                }
            }
        }

        let pattern_end_pos = self.pos;

        self.advance();

        // Consume optional flags, which are identifier part characters
        let flags_start_pos = self.pos;

        loop {
            // EOF signals the end of the flags
            if self.current == EOF_CHAR {
                break;
            }

            if self.current == '\\' {
                let loc = self.mark_loc(self.pos);
                return self.error(loc, ParseError::EscapeInRegexpFlags);
            }

            if is_ascii(self.current) {
                if is_id_part_ascii(self.current) {
                    self.advance();
                } else {
                    break;
                }
            } else {
                // Otherwise must be a utf-8 encoded codepoint
                let save_state = self.save();
                let code_point = self.lex_utf8_codepoint()?;
                if is_id_part_unicode(code_point) {
                    continue;
                } else {
                    // Restore to before the codepoint if not part of the flags
                    self.restore(&save_state);
                    break;
                }
            }
        }

        let pattern = String::from(&self.buf[pattern_start_pos..pattern_end_pos]);
        let flags = String::from(&self.buf[flags_start_pos..self.pos]);

        let loc = self.mark_loc(start_pos);
        validate_regexp_literal(&pattern, &flags, loc, self.source, self.ecma_version)?;

        self.emit(Token::RegExpLiteral { pattern, flags }, start_pos)
    }

    fn lex_regexp_character_non_line_terminator(&mut self) -> ParseResult<()> {
        if self.current == EOF_CHAR {
            let loc = self.mark_loc(self.pos);
            return self.error(loc, ParseError::UnterminatedRegexp);
        }

        let char = self.lex_ascii_or_unicode_character()?;

        if is_ascii_newline(char) || is_unicode_newline(char) {
            let loc = self.mark_loc(self.pos);
            self.error(loc, ParseError::UnterminatedRegexp)
        } else {
            Ok(())
        }
    }

    /// Read the next token inside a template literal. The interior of a template produces chunk
    /// tokens for the literal text, `${` tokens that open substitutions, and the closing
    /// backtick. A chunk (possibly empty) always separates the delimiters, so after a chunk the
    /// scanner is positioned directly on a delimiter and emits it.
    fn read_template_token(&mut self) -> LexResult {
        let start_pos = self.pos;

        if matches!(self.last_token, Token::TemplateChunk { .. }) {
            if self.current == '`' {
                self.advance();
                return self.emit(Token::BackQuote, start_pos);
            }

            if self.current == '$' && self.peek() == '{' {
                self.advance2();
                return self.emit(Token::DollarBrace, start_pos);
            }
        }

        let mut value = String::new();

        // Location of the first invalid escape sequence. A chunk with an invalid escape has no
        // cooked value, which the parser only permits in tagged templates.
        let mut malformed_error_loc = None;

        let raw_start_pos = self.pos;
        let raw_end_pos;
        let mut has_cr = false;

        loop {
            match self.current {
                // End of the chunk at the closing backtick or a substitution. The delimiter
                // itself is emitted by the next call.
                '`' => {
                    raw_end_pos = self.pos;
                    break;
                }
                '$' if self.peek() == '{' => {
                    raw_end_pos = self.pos;
                    break;
                }
                EOF_CHAR => {
                    let loc = self.mark_loc(self.pos);
                    return self.error(loc, ParseError::UnterminatedTemplate);
                }
                // Escape sequences
                '\\' => match self.peek() {
                    // Single character escapes
                    'n' => {
                        value.push('\n');
                        self.advance2()
                    }
                    '\\' => {
                        value.push('\\');
                        self.advance2()
                    }
                    '\'' => {
                        value.push('\'');
                        self.advance2()
                    }
                    '"' => {
                        value.push('"');
                        self.advance2()
                    }
                    '`' => {
                        value.push('`');
                        self.advance2()
                    }
                    '$' => {
                        value.push('$');
                        self.advance2()
                    }
                    't' => {
                        value.push('\t');
                        self.advance2()
                    }
                    'r' => {
                        value.push('\r');
                        self.advance2()
                    }
                    'b' => {
                        value.push('\x08');
                        self.advance2()
                    }
                    'v' => {
                        value.push('\x0B');
                        self.advance2()
                    }
                    'f' => {
                        value.push('\x0C');
                        self.advance2()
                    }
                    '0' => {
                        if !is_decimal_digit(self.peek2()) {
                            value.push('\x00');
                            self.advance2()
                        } else {
                            if malformed_error_loc.is_none() {
                                malformed_error_loc = Some(self.mark_loc(self.pos));
                            }
                            self.advance2()
                        }
                    }
                    // Octal escape sequences are not allowed in templates
                    '1'..='9' => {
                        if malformed_error_loc.is_none() {
                            malformed_error_loc = Some(self.mark_loc(self.pos));
                        }
                        self.advance2();
                    }
                    // Hex escape sequence
                    'x' => {
                        self.advance2();

                        if let Some(x1) = get_hex_value(self.current) {
                            if let Some(x2) = get_hex_value(self.peek()) {
                                let escaped_char = char::from_u32(x1 * 16 + x2).unwrap();
                                value.push(escaped_char);
                                self.advance2();
                            } else {
                                let loc = self.mark_loc(self.pos);
                                self.advance();
                                if malformed_error_loc.is_none() {
                                    malformed_error_loc = Some(loc);
                                }
                            }
                        } else if malformed_error_loc.is_none() {
                            malformed_error_loc = Some(self.mark_loc(self.pos));
                        }
                    }
                    // Unicode escape sequence
                    'u' => {
                        let escape_start_pos = self.pos;
                        self.advance2();

                        match self.lex_unicode_escape_sequence(escape_start_pos) {
                            Ok(code_point) => {
                                value.push(char::from_u32(code_point).unwrap_or('\u{FFFD}'))
                            }
                            Err(err) => {
                                if malformed_error_loc.is_none() {
                                    malformed_error_loc =
                                        Some(err.source_loc.map(|(loc, _)| loc).unwrap_or(
                                            self.mark_loc(escape_start_pos),
                                        ));
                                }
                            }
                        }
                    }
                    // Line continuations, either LF, CR, or CRLF, excluded from the cooked value
                    '\n' => self.advance2(),
                    '\r' => {
                        self.advance2();

                        has_cr = true;

                        if self.current == '\n' {
                            self.advance()
                        }
                    }
                    EOF_CHAR => {
                        let loc = self.mark_loc(self.pos);
                        return self.error(loc, ParseError::UnterminatedTemplate);
                    }
                    // Non-escape character, use character directly
                    other => {
                        if is_ascii(other) {
                            self.advance2();
                            value.push(other);
                        } else {
                            self.advance();
                            let code_point = self.lex_utf8_codepoint()?;

                            // Unicode line continuations are ignored in the cooked value
                            if !is_unicode_newline(code_point) {
                                value.push(code_point);
                            }
                        }
                    }
                },
                // CR and CRLF are converted to LF in both raw and cooked strings
                '\r' => {
                    self.advance();

                    has_cr = true;
                    value.push('\n');

                    if self.current == '\n' {
                        self.advance()
                    }
                }
                _ => value.push(self.lex_ascii_or_unicode_character()?),
            }
        }

        let mut raw = String::from(&self.buf[raw_start_pos..raw_end_pos]);

        // CR and CRLF are both converted to LF in the raw string. This requires copying the
        // string again, so only perform the replace if a CR was encountered.
        if has_cr {
            raw = raw.replace("\r\n", "\n").replace('\r', "\n");
        }

        let cooked = match malformed_error_loc {
            None => Some(value),
            Some(_) => None,
        };

        self.emit(Token::TemplateChunk { raw, cooked }, start_pos)
    }

    #[inline]
    fn lex_ascii_or_unicode_character(&mut self) -> ParseResult<char> {
        if is_ascii(self.current) {
            let ascii_char = self.current;
            self.advance();
            Ok(ascii_char)
        } else {
            self.lex_utf8_codepoint()
        }
    }

    /// Lex a single unicode escape sequence, called after the `\u` prefix has already been
    /// processed. Returns the raw code point value, which may be a lone surrogate.
    fn lex_unicode_escape_sequence(&mut self, start_pos: Pos) -> ParseResult<u32> {
        // Escape sequence has the form \u{HEX_DIGITS}, with at most 6 hex digits
        if self.current == '{' && self.ecma_version >= 6 {
            self.advance();

            if self.current == '}' {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::MalformedEscapeSequence);
            }

            let mut value = 0;
            for _ in 0..6 {
                if let Some(hex_value) = get_hex_value(self.current) {
                    self.advance();
                    value <<= 4;
                    value += hex_value;
                } else if self.current == '}' {
                    break;
                } else {
                    let loc = self.mark_loc(start_pos);
                    return self.error(loc, ParseError::MalformedEscapeSequence);
                }
            }

            if self.current != '}' {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::MalformedEscapeSequence);
            }

            self.advance();

            // Check that the value is not out of range (greater than 0x10FFFF)
            if value > 0x10FFFF {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::MalformedEscapeSequence);
            }

            return Ok(value);
        }

        // Otherwise this is \uXXXX so expect exactly four hex digits
        let mut value = 0;
        for _ in 0..4 {
            if let Some(hex_value) = get_hex_value(self.current) {
                self.advance();
                value <<= 4;
                value += hex_value;
            } else {
                let loc = self.mark_loc(start_pos);
                return self.error(loc, ParseError::MalformedEscapeSequence);
            }
        }

        Ok(value)
    }

    // Fast path for lexing a purely ASCII identifier
    fn lex_identifier_ascii(&mut self, start_pos: Pos) -> LexResult {
        // Consume the id start ASCII character
        self.advance();

        loop {
            if is_id_part_ascii(self.current) {
                self.advance();
                continue;
            } else if is_ascii(self.current) && self.current != '\\' {
                // The only remaining allowed ASCII character is the start of an escape
                // sequence, handled below.
                break;
            } else if self.current == EOF_CHAR {
                break;
            } else {
                // Start of an escape sequence or unicode character, so bail to the slow path,
                // copying over the ASCII string that has been created so far.
                let string_builder = String::from(&self.buf[start_pos..self.pos]);
                return self.lex_identifier_non_ascii(start_pos, string_builder);
            }
        }

        let id_string = &self.buf[start_pos..self.pos];

        if let Some(keyword_token) = self.id_to_keyword(id_string) {
            self.emit(keyword_token, start_pos)
        } else {
            self.emit(Token::Identifier(String::from(id_string)), start_pos)
        }
    }

    // Slow path for lexing an identifier with at least one unicode character or escape
    // sequence. Input the string that has been built so far before falling back to this path.
    fn lex_identifier_non_ascii(&mut self, start_pos: Pos, mut string_builder: String) -> LexResult {
        loop {
            if is_ascii(self.current) {
                if is_id_part_ascii(self.current) {
                    string_builder.push(self.current);
                    self.advance();
                } else if self.current == '\\' {
                    let code_point = self.lex_identifier_unicode_escape_sequence()?;
                    if !is_id_part_ascii(code_point) && !is_id_part_unicode(code_point) {
                        let loc = self.mark_loc(self.pos);
                        return self.error(loc, ParseError::UnknownToken(code_point.into()));
                    }

                    string_builder.push(code_point);
                } else {
                    break;
                }
            } else if self.current == EOF_CHAR {
                break;
            } else {
                // Otherwise must be a utf-8 encoded codepoint
                let save_state = self.save();
                let code_point = self.lex_utf8_codepoint()?;
                if is_id_part_unicode(code_point) {
                    string_builder.push(code_point);
                } else {
                    // Restore to before the codepoint if not part of the id
                    self.restore(&save_state);
                    break;
                }
            }
        }

        // Escaped lexemes may still match keywords. The parser rejects such tokens when they
        // are consumed as keywords, via the contains_esc flag.
        if let Some(keyword_token) = self.id_to_keyword(&string_builder) {
            self.emit(keyword_token, start_pos)
        } else {
            self.emit(Token::Identifier(string_builder), start_pos)
        }
    }

    fn lex_identifier_unicode_escape_sequence(&mut self) -> ParseResult<char> {
        let escape_start_pos = self.pos;
        self.advance();

        if self.current == 'u' {
            self.advance();

            let code_point = self.lex_unicode_escape_sequence(escape_start_pos)?;
            self.contains_esc = true;

            match char::from_u32(code_point) {
                Some(char) => Ok(char),
                None => {
                    let loc = self.mark_loc(escape_start_pos);
                    self.error(loc, ParseError::MalformedEscapeSequence)
                }
            }
        } else {
            let loc = self.mark_loc(escape_start_pos);
            self.error(loc, ParseError::MalformedEscapeSequence)
        }
    }

    fn id_to_keyword(&mut self, id_string: &str) -> Option<Token> {
        let keyword = match id_string {
            "var" => Token::Var,
            "function" => Token::Function,
            "this" => Token::This,
            "if" => Token::If,
            "else" => Token::Else,
            "switch" => Token::Switch,
            "case" => Token::Case,
            "default" => Token::Default,
            "for" => Token::For,
            "while" => Token::While,
            "do" => Token::Do,
            "with" => Token::With,
            "return" => Token::Return,
            "break" => Token::Break,
            "continue" => Token::Continue,
            "try" => Token::Try,
            "catch" => Token::Catch,
            "finally" => Token::Finally,
            "throw" => Token::Throw,
            "null" => Token::Null,
            "true" => Token::True,
            "false" => Token::False,
            "in" => Token::In,
            "instanceof" => Token::InstanceOf,
            "new" => Token::New,
            "typeof" => Token::Typeof,
            "void" => Token::Void,
            "delete" => Token::Delete,
            "debugger" => Token::Debugger,
            // Keywords introduced in ES2015. In earlier editions these lex as identifiers and
            // are rejected by the parser's reserved word checks where applicable.
            "const" if self.ecma_version >= 6 => Token::Const,
            "class" if self.ecma_version >= 6 => Token::Class,
            "extends" if self.ecma_version >= 6 => Token::Extends,
            "super" if self.ecma_version >= 6 => Token::Super,
            "import" if self.ecma_version >= 6 => Token::Import,
            "export" if self.ecma_version >= 6 => Token::Export,
            _ => return None,
        };

        Some(keyword)
    }
}
