use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::*;
use crate::context::ContextKind;
use crate::lexer::Lexer;
use crate::loc::{Loc, Pos, EMPTY_LOC};
use crate::options::{AllowReserved, Options, SourceType};
use crate::parse_error::{LocalizedParseError, ParseError, ParseResult};
use crate::scope::{function_scope_flags, BindingKind, DeclarationTarget, ScopeFlags, ScopeStack};
use crate::source::Source;
use crate::token::Token;
use crate::unicode::{is_id_part, is_id_start, is_unicode_newline, is_unicode_whitespace};

/// Offsets recorded while parsing a cover grammar: constructs that are errors when the
/// surrounding context resolves to an expression, or to a pattern, but not both. Whichever
/// resolution happens raises its applicable subset and discards the rest.
#[derive(Default)]
struct DestructuringErrors {
    /// A `{ a = b }` shorthand default, valid only in patterns
    shorthand_assign: Option<Loc>,
    /// A comma after a rest element, valid nowhere but detected on resolution
    trailing_comma: Option<Loc>,
    /// A parenthesized non-simple assignment target
    parenthesized_assign: Option<Loc>,
    /// A parenthesized binding target
    parenthesized_bind: Option<Loc>,
    /// A second `__proto__` property, valid only in patterns
    double_proto: Option<Loc>,
}

impl DestructuringErrors {
    fn has_expression_errors(&self) -> bool {
        self.shorthand_assign.is_some() || self.double_proto.is_some()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LabelKind {
    Loop,
    Switch,
}

struct LabelEntry {
    name: Option<String>,
    kind: Option<LabelKind>,
    statement_start: Pos,
}

/// The position a statement is being parsed in, when it is the single-statement body of
/// another construct. Declarations are not allowed in these positions, and function
/// declarations only in some of them.
#[derive(Clone, Copy, PartialEq)]
enum StatementContext {
    If,
    Label,
    Other,
}

/// An element of a parenthesized expression list, which may turn out to be an arrow function
/// parameter list.
enum ParenItem {
    Expression(Expression),
    /// A rest element whose argument was parsed directly as a binding pattern
    Rest(RestElement),
    /// A spread whose argument was parsed as an expression, from a call argument list that
    /// turned out to be the parameters of an async arrow function
    SpreadExpression(SpreadElement),
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    loc: Loc,
    prev_loc: Loc,
    /// Whether the current token's lexeme contained a unicode escape
    token_contains_esc: bool,
    in_strict_mode: bool,
    in_module: bool,
    ecma_version: u32,
    options: Options,
    /// Offset at which a parenthesized expression or identifier that may begin an arrow
    /// function was seen
    potential_arrow_at: Option<Pos>,
    /// Whether the left hand side of a for-await-of head is being parsed, where `async of`
    /// must not be treated as the start of an arrow function
    potential_arrow_in_for_await: bool,
    /// First position at which `yield` was used in a position that is invalid should the
    /// surrounding construct turn out to be a parameter default
    yield_pos: Option<Pos>,
    /// Same for `await` expressions
    await_pos: Option<Pos>,
    /// First position at which `await` was used as an identifier
    await_ident_pos: Option<Pos>,
    labels: Vec<LabelEntry>,
    scopes: ScopeStack,
    /// Exported names not yet matched by a top level declaration, reported at the end of the
    /// program
    undefined_exports: IndexMap<String, Loc>,
    /// Names already exported, for duplicate detection
    exports: HashSet<String>,
}

impl<'a> Parser<'a> {
    // Must prime the parser by calling advance before using.
    fn new(source: &'a Rc<Source>, start_pos: Pos, mut options: Options) -> Parser<'a> {
        let ecma_version = options.ecma_version.num();
        let in_module = options.source_type == SourceType::Module;

        let mut lexer = Lexer::new_at(source, start_pos, ecma_version, in_module);
        lexer.allow_hash_bang = options.allow_hash_bang;
        lexer.set_on_comment(options.on_comment.take());

        Parser {
            lexer,
            token: Token::Eof,
            loc: EMPTY_LOC,
            prev_loc: EMPTY_LOC,
            token_contains_esc: false,
            in_strict_mode: in_module,
            in_module,
            ecma_version,
            options,
            potential_arrow_at: None,
            potential_arrow_in_for_await: false,
            yield_pos: None,
            await_pos: None,
            await_ident_pos: None,
            labels: vec![],
            scopes: ScopeStack::new(ScopeFlags::TOP, in_module),
            undefined_exports: IndexMap::new(),
            exports: HashSet::new(),
        }
    }

    fn error<T>(&self, loc: Loc, error: ParseError) -> ParseResult<T> {
        let source = (*self.lexer.source).clone();
        Err(LocalizedParseError { error, source_loc: Some((loc, source)) })
    }

    /// Report an error that a plugin may choose to collect instead of aborting the parse. When
    /// no recoverable error handler is configured the error is fatal.
    fn raise_recoverable(&mut self, loc: Loc, error: ParseError) -> ParseResult<()> {
        let source = (*self.lexer.source).clone();
        let localized = LocalizedParseError { error, source_loc: Some((loc, source)) };
        match self.options.on_recoverable_error.as_mut() {
            Some(handler) => {
                handler(localized);
                Ok(())
            }
            None => Err(localized),
        }
    }

    fn error_unexpected_token<T>(&self, loc: Loc, token: &Token) -> ParseResult<T> {
        self.error(loc, ParseError::UnexpectedToken(token.clone()))
    }

    fn unexpected<T>(&self) -> ParseResult<T> {
        self.error_unexpected_token(self.loc, &self.token)
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.advance_internal(false)
    }

    /// Advance without rejecting escaped keywords, for property-name positions where keywords
    /// are ordinary identifier names.
    fn advance_ignoring_escaped_keyword(&mut self) -> ParseResult<()> {
        self.advance_internal(true)
    }

    fn advance_internal(&mut self, ignore_escape_in_keyword: bool) -> ParseResult<()> {
        // A keyword whose lexeme used an escape sequence is an error once it is consumed as a
        // keyword
        if !ignore_escape_in_keyword && self.token.is_keyword() && self.token_contains_esc {
            let loc = self.loc;
            let keyword = self.token.to_string();
            self.raise_recoverable(loc, ParseError::EscapeSequenceInKeyword(keyword))?;
        }

        let (token, loc) = self.lexer.next()?;
        self.prev_loc = self.loc;
        self.token = token;
        self.loc = loc;
        self.token_contains_esc = self.lexer.contains_esc;

        if let Some(on_token) = self.options.on_token.as_mut() {
            on_token(&self.token, self.loc);
        }

        Ok(())
    }

    fn expect(&mut self, token: Token) -> ParseResult<()> {
        if self.token != token {
            return self.error(self.loc, ParseError::ExpectedToken(self.token.clone(), token));
        }

        self.advance()?;
        Ok(())
    }

    fn eat(&mut self, token: Token) -> ParseResult<bool> {
        if self.token == token {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    #[inline]
    fn current_start_pos(&self) -> Pos {
        self.loc.start
    }

    fn mark_loc(&self, start_pos: Pos) -> Loc {
        Loc { start: start_pos, end: self.prev_loc.end }
    }

    fn set_strict(&mut self, strict: bool) {
        self.in_strict_mode = strict;
        self.lexer.in_strict_mode = strict;
    }

    // Contextual keywords

    fn is_contextual(&self, name: &str) -> bool {
        matches!(&self.token, Token::Identifier(n) if n == name) && !self.token_contains_esc
    }

    fn eat_contextual(&mut self, name: &str) -> ParseResult<bool> {
        if self.is_contextual(name) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_contextual(&mut self, name: &str) -> ParseResult<()> {
        if !self.eat_contextual(name)? {
            return self.unexpected();
        }
        Ok(())
    }

    // Automatic semicolon insertion

    fn can_insert_semicolon(&self) -> bool {
        matches!(self.token, Token::Eof | Token::RightBrace)
            || self.lexer.is_new_line_before_current()
    }

    /// Expect a semicolon, or insert one via automatic semicolon insertion if possible. Error
    /// if a semicolon was not present and one could not be inserted.
    fn expect_semicolon(&mut self) -> ParseResult<()> {
        if self.token == Token::Semicolon {
            self.advance()?;
            return Ok(());
        }

        if self.can_insert_semicolon() {
            let pos = self.prev_loc.end;
            if let Some(on_inserted_semicolon) = self.options.on_inserted_semicolon.as_mut() {
                on_inserted_semicolon(pos);
            }
            return Ok(());
        }

        self.error(self.loc, ParseError::ExpectedToken(self.token.clone(), Token::Semicolon))
    }

    /// Consume a semicolon if present and return true, otherwise return whether a semicolon
    /// could be inserted via automatic semicolon insertion.
    fn maybe_expect_semicolon(&mut self) -> ParseResult<bool> {
        if self.token == Token::Semicolon {
            self.advance()?;
            return Ok(true);
        }

        if self.can_insert_semicolon() {
            let pos = self.prev_loc.end;
            if let Some(on_inserted_semicolon) = self.options.on_inserted_semicolon.as_mut() {
                on_inserted_semicolon(pos);
            }
            return Ok(true);
        }

        Ok(false)
    }

    // Character-level lookahead, used where a decision must be made before the next token can
    // be lexed correctly.

    /// Scan past whitespace and comments starting at the given position, returning the
    /// position of the next significant character and whether a line terminator was crossed.
    fn skip_white_space_from(&self, start: Pos) -> (Pos, bool) {
        let source = &self.lexer.source.contents;
        let bytes = source.as_bytes();
        let mut pos = start;
        let mut newline = false;

        while pos < bytes.len() {
            match bytes[pos] {
                b' ' | b'\t' | 0x0B | 0x0C => pos += 1,
                b'\n' | b'\r' => {
                    newline = true;
                    pos += 1;
                }
                b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                    pos += 2;
                    while pos < bytes.len() && !matches!(bytes[pos], b'\n' | b'\r') {
                        pos += 1;
                    }
                }
                b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                    match source[pos + 2..].find("*/") {
                        Some(index) => {
                            if source[pos + 2..pos + 2 + index].contains('\n') {
                                newline = true;
                            }
                            pos = pos + 2 + index + 2;
                        }
                        None => return (bytes.len(), newline),
                    }
                }
                byte if byte < 0x80 => break,
                _ => {
                    let char = source[pos..].chars().next().unwrap();
                    if is_unicode_newline(char) {
                        newline = true;
                        pos += char.len_utf8();
                    } else if is_unicode_whitespace(char) {
                        pos += char.len_utf8();
                    } else {
                        break;
                    }
                }
            }
        }

        (pos, newline)
    }

    fn char_at(&self, pos: Pos) -> Option<char> {
        self.lexer.source.contents.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Whether a `"use strict"` directive prologue begins at the given position. Scans raw
    /// source text since the decision affects how the following tokens must be lexed.
    fn strict_directive(&self, start: Pos) -> bool {
        if self.ecma_version < 5 {
            return false;
        }

        let source = &self.lexer.source.contents;
        let bytes = source.as_bytes();
        let mut pos = start;

        loop {
            pos = self.skip_white_space_from(pos).0;

            let quote = match bytes.get(pos) {
                Some(&b @ (b'"' | b'\'')) => b,
                _ => return false,
            };

            // Scan to the closing quote; a directive never spans lines
            let content_start = pos + 1;
            let mut index = content_start;
            let mut closed = false;
            while index < bytes.len() {
                match bytes[index] {
                    b'\\' => index += 2,
                    b'\n' | b'\r' => break,
                    b if b == quote => {
                        closed = true;
                        break;
                    }
                    _ => index += 1,
                }
            }

            if !closed {
                return false;
            }

            let content = &source[content_start..index];
            let literal_end = index + 1;

            if content == "use strict" {
                let (after, saw_newline) = self.skip_white_space_from(literal_end);
                return match bytes.get(after) {
                    None => true,
                    Some(b';') | Some(b'}') => true,
                    Some(&next) => {
                        if !saw_newline {
                            return false;
                        }
                        let expression_continues = matches!(
                            next,
                            b'(' | b'`'
                                | b'.'
                                | b'['
                                | b'+'
                                | b'-'
                                | b'/'
                                | b'*'
                                | b'%'
                                | b'<'
                                | b'>'
                                | b'='
                                | b','
                                | b'?'
                                | b'^'
                                | b'&'
                        ) || (next == b'!' && bytes.get(after + 1) == Some(&b'='));
                        !expression_continues
                    }
                };
            }

            // Skip this directive, with its optional semicolon, and keep looking
            pos = self.skip_white_space_from(literal_end).0;
            if bytes.get(pos) == Some(&b';') {
                pos += 1;
            }
        }
    }

    /// Whether the current `async` identifier begins an async function, i.e. is followed by
    /// the `function` keyword on the same line.
    fn is_async_function(&self) -> bool {
        if self.ecma_version < 8 || !self.is_contextual("async") {
            return false;
        }

        let (after, newline) = self.skip_white_space_from(self.loc.end);
        if newline {
            return false;
        }

        let source = &self.lexer.source.contents;
        if !source[after..].starts_with("function") {
            return false;
        }

        match self.char_at(after + 8) {
            None => true,
            Some(char) => !is_id_part(char) && char != '\\',
        }
    }

    /// Whether the current `let` identifier begins a lexical declaration. `let [` is always a
    /// declaration; other continuations only count outside single-statement contexts.
    fn is_let_declaration(&self, context: Option<StatementContext>) -> bool {
        if self.ecma_version < 6 || !self.is_contextual("let") {
            return false;
        }

        let (after, _) = self.skip_white_space_from(self.loc.end);
        let char = match self.char_at(after) {
            Some(char) => char,
            None => return false,
        };

        if char == '[' || char == '\\' {
            return true;
        }
        if context.is_some() {
            return false;
        }

        char == '{' || is_id_start(char)
    }

    // Reserved words

    fn is_reserved_word(&self, name: &str) -> bool {
        if self.in_module && name == "await" {
            return true;
        }

        match self.ecma_version {
            3 => matches!(
                name,
                "abstract"
                    | "boolean"
                    | "byte"
                    | "char"
                    | "class"
                    | "double"
                    | "enum"
                    | "export"
                    | "extends"
                    | "final"
                    | "float"
                    | "goto"
                    | "implements"
                    | "import"
                    | "int"
                    | "interface"
                    | "long"
                    | "native"
                    | "package"
                    | "private"
                    | "protected"
                    | "public"
                    | "short"
                    | "static"
                    | "super"
                    | "synchronized"
                    | "throws"
                    | "transient"
                    | "volatile"
            ),
            5 => matches!(
                name,
                "class" | "enum" | "extends" | "super" | "const" | "export" | "import"
            ),
            _ => name == "enum",
        }
    }

    fn is_strict_reserved(name: &str) -> bool {
        matches!(
            name,
            "implements"
                | "interface"
                | "let"
                | "package"
                | "private"
                | "protected"
                | "public"
                | "static"
                | "yield"
        )
    }

    fn is_strict_bind_reserved(name: &str) -> bool {
        matches!(name, "eval" | "arguments")
    }

    fn allow_reserved(&self) -> bool {
        match self.options.allow_reserved {
            AllowReserved::Always => true,
            AllowReserved::Never => false,
            AllowReserved::Default => self.ecma_version < 5,
        }
    }

    fn check_unreserved(&mut self, loc: Loc, name: &str) -> ParseResult<()> {
        if self.scopes.in_generator() && name == "yield" {
            return self.error(loc, ParseError::YieldIdentifierInGenerator);
        }
        if self.scopes.in_async() && name == "await" {
            return self.error(loc, ParseError::AwaitIdentifierInAsync);
        }

        if self.in_strict_mode && Self::is_strict_reserved(name) {
            return self.error(loc, ParseError::ReservedWord(name.to_owned()));
        }

        if !self.allow_reserved() && self.is_reserved_word(name) {
            if name == "await" && !self.scopes.in_async() {
                return self.error(loc, ParseError::AwaitOutsideAsync);
            }
            return self.error(loc, ParseError::ReservedWord(name.to_owned()));
        }

        Ok(())
    }

    // Identifiers

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        match &self.token {
            Token::Identifier(name) => {
                let loc = self.loc;
                let name = name.clone();
                let contains_esc = self.token_contains_esc;

                // Below ES2015, escaped lexemes are exempt from reserved word checks
                if !(self.ecma_version < 6 && contains_esc) {
                    self.check_unreserved(loc, &name)?;
                }

                self.advance()?;

                if name == "await" && self.await_ident_pos.is_none() {
                    self.await_ident_pos = Some(loc.start);
                }

                Ok(Identifier { loc, name })
            }
            other => self.error_unexpected_token(self.loc, other),
        }
    }

    /// Parse any identifier name, including reserved words. Used for property names, member
    /// accesses, and other positions where keywords are plain names.
    fn parse_identifier_name(&mut self) -> ParseResult<Identifier> {
        // The strictest reserved-word setting rejects reserved words even as plain names
        if self.options.allow_reserved == AllowReserved::Never {
            return self.parse_identifier();
        }

        let loc = self.loc;
        let name = match &self.token {
            Token::Identifier(name) => name.clone(),
            token if token.is_keyword() => token.to_string(),
            other => return self.error_unexpected_token(loc, other),
        };

        self.advance_ignoring_escaped_keyword()?;
        Ok(Identifier { loc, name })
    }

    // Scope bookkeeping

    fn declare_name(&mut self, name: &str, kind: BindingKind, loc: Loc) -> ParseResult<()> {
        match self.scopes.declare_name(name, kind) {
            Ok(target) => {
                if self.in_module && target == DeclarationTarget::TopLevel {
                    self.undefined_exports.shift_remove(name);
                }
                Ok(())
            }
            Err(error) => self.raise_recoverable(loc, error),
        }
    }

    fn can_await(&self) -> bool {
        match self.scopes.nearest_function_is_async() {
            Some(is_async) => is_async,
            None => {
                self.options.allow_await_outside_function
                    || (self.in_module && self.ecma_version >= 13)
            }
        }
    }

    // Program

    fn parse_program(&mut self) -> ParseResult<Program> {
        // The directive scan starts past a hashbang line when one is allowed
        let contents = &self.lexer.source.contents;
        let mut directive_start = 0;
        if self.options.allow_hash_bang && contents.starts_with("#!") {
            directive_start = contents.find('\n').map(|index| index + 1).unwrap_or(contents.len());
        }

        let has_use_strict_directive = !self.in_module && self.strict_directive(directive_start);
        if has_use_strict_directive {
            self.set_strict(true);
        }

        // Prime the parser
        self.advance()?;

        let mut body = vec![];
        while self.token != Token::Eof {
            body.push(self.parse_statement_top_level()?);
        }

        // Surface exports that never received a matching declaration
        let undefined_exports: Vec<(String, Loc)> = self
            .undefined_exports
            .iter()
            .map(|(name, loc)| (name.clone(), *loc))
            .collect();
        for (name, loc) in undefined_exports {
            self.raise_recoverable(loc, ParseError::UndefinedExport(name))?;
        }

        self.adapt_directive_prologue(&mut body);

        let loc = Loc { start: 0, end: self.lexer.source.contents.len() };

        Ok(Program {
            loc,
            body,
            source_type: self.options.source_type,
            has_use_strict_directive,
        })
    }

    /// Attach the directive text to leading expression statements that are string literals.
    fn adapt_directive_prologue(&mut self, statements: &mut [Statement]) {
        for statement in statements {
            if let Statement::Expr(expr_statement) = statement {
                if self.is_directive_candidate(expr_statement) {
                    let literal_loc = expr_statement.expr.loc();
                    let raw = &self.lexer.source.contents
                        [literal_loc.start + 1..literal_loc.end - 1];
                    expr_statement.directive = Some(raw.to_owned());
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    fn is_directive_candidate(&self, statement: &ExpressionStatement) -> bool {
        matches!(statement.expr.as_ref(), Expression::String(_))
            && matches!(
                self.lexer.source.contents.as_bytes().get(statement.loc.start),
                Some(b'"' | b'\'')
            )
    }

    // Statements

    fn parse_statement_top_level(&mut self) -> ParseResult<Statement> {
        self.parse_statement(None, true)
    }

    fn parse_statement_list_item(&mut self) -> ParseResult<Statement> {
        self.parse_statement(None, false)
    }

    fn parse_statement_in_context(&mut self, context: StatementContext) -> ParseResult<Statement> {
        self.parse_statement(Some(context), false)
    }

    fn parse_statement(
        &mut self,
        context: Option<StatementContext>,
        top_level: bool,
    ) -> ParseResult<Statement> {
        if self.is_let_declaration(context) {
            if context.is_some() {
                return self.error(self.loc, ParseError::LexicalDeclarationInSingleStatement);
            }
            return Ok(Statement::VarDecl(self.parse_variable_declaration(VarKind::Let)?));
        }

        match &self.token {
            Token::Break | Token::Continue => self.parse_break_continue_statement(),
            Token::Debugger => {
                let start_pos = self.current_start_pos();
                self.advance()?;
                self.expect_semicolon()?;
                Ok(Statement::Debugger(self.mark_loc(start_pos)))
            }
            Token::Do => self.parse_do_while_statement(),
            Token::For => self.parse_any_for_statement(),
            Token::Function => {
                if let Some(context) = context {
                    if self.ecma_version >= 6
                        && (self.in_strict_mode || context == StatementContext::Other)
                    {
                        return self.unexpected();
                    }
                }
                let start_pos = self.current_start_pos();
                let function = self.parse_function_declaration(
                    start_pos,
                    /* is_async */ false,
                    /* is_hanging */ context.is_some(),
                    /* nullable_id */ false,
                )?;
                Ok(Statement::FuncDecl(function))
            }
            Token::Class => {
                if context.is_some() {
                    return self.unexpected();
                }
                Ok(Statement::ClassDecl(self.parse_class(true, false)?))
            }
            Token::If => self.parse_if_statement(),
            Token::Return => self.parse_return_statement(),
            Token::Switch => self.parse_switch_statement(),
            Token::Throw => self.parse_throw_statement(),
            Token::Try => self.parse_try_statement(),
            Token::Var => {
                self.advance()?;
                Ok(Statement::VarDecl(self.parse_variable_declarators(VarKind::Var, false)?))
            }
            Token::Const => {
                if context.is_some() {
                    return self.unexpected();
                }
                Ok(Statement::VarDecl(self.parse_variable_declaration(VarKind::Const)?))
            }
            Token::While => self.parse_while_statement(),
            Token::With => self.parse_with_statement(),
            Token::LeftBrace => Ok(Statement::Block(self.parse_block(true)?)),
            Token::Semicolon => {
                let loc = self.loc;
                self.advance()?;
                Ok(Statement::Empty(loc))
            }
            Token::Import if self.module_item_is_expression() => {
                let start_pos = self.current_start_pos();
                let expr = self.parse_expression(false, None)?;
                self.expect_semicolon()?;
                let loc = self.mark_loc(start_pos);
                Ok(Statement::Expr(ExpressionStatement { loc, expr, directive: None }))
            }
            Token::Import | Token::Export => {
                if !self.options.allow_import_export_everywhere {
                    if !top_level {
                        return self.error(self.loc, ParseError::ImportExportNotAtTopLevel);
                    }
                    if !self.in_module {
                        return self.error(self.loc, ParseError::ImportExportOutsideModule);
                    }
                }

                if self.token == Token::Import {
                    self.parse_import_declaration()
                } else {
                    self.parse_export_declaration()
                }
            }
            _ => {
                if self.is_async_function() {
                    if context.is_some() {
                        return self.unexpected();
                    }
                    let start_pos = self.current_start_pos();
                    self.advance()?;
                    let function = self.parse_function_declaration(
                        start_pos,
                        /* is_async */ true,
                        /* is_hanging */ false,
                        /* nullable_id */ false,
                    )?;
                    return Ok(Statement::FuncDecl(function));
                }

                let start_pos = self.current_start_pos();
                let expr = self.parse_expression(false, None)?;

                // An identifier followed by a colon begins a labeled statement
                if self.token == Token::Colon {
                    if let Expression::Id(label) = *expr {
                        self.advance()?;
                        return self.parse_labeled_statement(start_pos, label, context);
                    }
                }

                self.expect_semicolon()?;
                let loc = self.mark_loc(start_pos);

                Ok(Statement::Expr(ExpressionStatement { loc, expr, directive: None }))
            }
        }
    }

    /// Whether an `import` token begins an import expression or `import.meta` rather than an
    /// import declaration.
    fn module_item_is_expression(&self) -> bool {
        if self.ecma_version < 11 {
            return false;
        }

        let (after, _) = self.skip_white_space_from(self.loc.end);
        matches!(self.char_at(after), Some('(') | Some('.'))
    }

    fn parse_labeled_statement(
        &mut self,
        start_pos: Pos,
        label: Identifier,
        context: Option<StatementContext>,
    ) -> ParseResult<Statement> {
        if self.labels.iter().any(|l| l.name.as_deref() == Some(label.name.as_str())) {
            return self.error(label.loc, ParseError::DuplicateLabel(label.name));
        }

        let kind = if self.token.is_loop_keyword() {
            Some(LabelKind::Loop)
        } else if self.token == Token::Switch {
            Some(LabelKind::Switch)
        } else {
            None
        };

        // Nested labels on the same statement share its start and kind
        for entry in self.labels.iter_mut().rev() {
            if entry.statement_start == start_pos {
                entry.statement_start = self.loc.start;
                entry.kind = kind;
            } else {
                break;
            }
        }

        self.labels.push(LabelEntry {
            name: Some(label.name.clone()),
            kind,
            statement_start: self.loc.start,
        });

        let body_context = match context {
            None => StatementContext::Label,
            Some(_) => StatementContext::Other,
        };
        let body = self.parse_statement_in_context(body_context)?;

        self.labels.pop();

        let loc = self.mark_loc(start_pos);
        Ok(Statement::Labeled(LabeledStatement { loc, label: p(label), body: p(body) }))
    }

    fn parse_break_continue_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        let is_break = self.token == Token::Break;
        let keyword = self.token.to_string();
        self.advance()?;

        let label = if self.maybe_expect_semicolon()? {
            None
        } else {
            let label = self.parse_identifier()?;
            self.expect_semicolon()?;
            Some(label)
        };

        // Resolve the target label, or any loop (and for break, any switch)
        let mut found = false;
        for entry in &self.labels {
            let name_matches = match (&label, &entry.name) {
                (None, _) => true,
                (Some(label), Some(name)) => &label.name == name,
                (Some(_), None) => false,
            };
            if name_matches {
                if entry.kind.is_some() && (is_break || entry.kind == Some(LabelKind::Loop)) {
                    found = true;
                    break;
                }
                if label.is_some() && is_break {
                    found = true;
                    break;
                }
            }
        }

        if !found {
            let loc = self.mark_loc(start_pos);
            return self.error(loc, ParseError::UnsyntacticJump(keyword));
        }

        let loc = self.mark_loc(start_pos);
        if is_break {
            Ok(Statement::Break(BreakStatement { loc, label: label.map(p) }))
        } else {
            Ok(Statement::Continue(ContinueStatement { loc, label: label.map(p) }))
        }
    }

    fn parse_block(&mut self, create_lexical_scope: bool) -> ParseResult<Block> {
        let start_pos = self.current_start_pos();
        self.expect(Token::LeftBrace)?;

        if create_lexical_scope {
            self.scopes.enter(ScopeFlags::empty());
        }

        let mut body = vec![];
        while self.token != Token::RightBrace {
            if self.token == Token::Eof {
                return self.unexpected();
            }
            body.push(self.parse_statement_list_item()?)
        }

        if create_lexical_scope {
            self.scopes.exit();
        }

        self.advance()?;
        let loc = self.mark_loc(start_pos);

        Ok(Block { loc, body })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let test = self.parse_expression(false, None)?;
        self.expect(Token::RightParen)?;

        let conseq = p(self.parse_statement_in_context(StatementContext::If)?);

        let altern = if self.eat(Token::Else)? {
            Some(p(self.parse_statement_in_context(StatementContext::If)?))
        } else {
            None
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::If(IfStatement { loc, test, conseq, altern }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let discriminant = self.parse_expression(false, None)?;
        self.expect(Token::RightParen)?;

        let mut cases = vec![];
        self.expect(Token::LeftBrace)?;
        self.scopes.enter(ScopeFlags::empty());
        self.labels.push(LabelEntry {
            name: None,
            kind: Some(LabelKind::Switch),
            statement_start: start_pos,
        });

        let mut saw_default = false;
        while self.token != Token::RightBrace {
            match self.token {
                Token::Case | Token::Default => {
                    let case_start_pos = self.current_start_pos();
                    let is_case = self.token == Token::Case;
                    self.advance()?;

                    let test = if is_case {
                        Some(self.parse_expression(false, None)?)
                    } else {
                        if saw_default {
                            self.raise_recoverable(self.loc, ParseError::MultipleDefaultClauses)?;
                        }
                        saw_default = true;
                        None
                    };
                    self.expect(Token::Colon)?;

                    // The statement list is terminated by the start of another case or the end
                    // of the switch
                    let mut body = vec![];
                    while !matches!(
                        self.token,
                        Token::Case | Token::Default | Token::RightBrace
                    ) {
                        if self.token == Token::Eof {
                            return self.unexpected();
                        }
                        body.push(self.parse_statement_list_item()?)
                    }

                    let loc = self.mark_loc(case_start_pos);
                    cases.push(SwitchCase { loc, test, body })
                }
                _ => return self.unexpected(),
            }
        }

        self.labels.pop();
        self.scopes.exit();
        self.expect(Token::RightBrace)?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Switch(SwitchStatement { loc, discriminant, cases }))
    }

    fn parse_any_for_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // `for await` is allowed only where await expressions are
        let await_at = if self.ecma_version >= 9 && self.can_await() && self.is_contextual("await")
        {
            let await_loc = self.loc;
            self.advance()?;
            Some(await_loc)
        } else {
            None
        };

        self.labels.push(LabelEntry {
            name: None,
            kind: Some(LabelKind::Loop),
            statement_start: start_pos,
        });
        self.scopes.enter(ScopeFlags::empty());

        self.expect(Token::LeftParen)?;

        // Empty init, so this must be a regular for loop
        if self.token == Token::Semicolon {
            if let Some(await_loc) = await_at {
                return self.error(await_loc, ParseError::UnexpectedToken(Token::Identifier(
                    "await".to_owned(),
                )));
            }
            self.advance()?;
            return self.parse_for_statement(None, start_pos);
        }

        let is_let = self.is_let_declaration(None);
        if is_let || matches!(self.token, Token::Var | Token::Const) {
            let kind = if is_let {
                VarKind::Let
            } else if self.token == Token::Var {
                VarKind::Var
            } else {
                VarKind::Const
            };
            self.advance()?;
            let var_decl = self.parse_variable_declarators_for_init(kind)?;

            let is_for_each = (self.token == Token::In
                || (self.ecma_version >= 6 && self.is_contextual("of")))
                && var_decl.declarations.len() == 1;

            if is_for_each {
                let is_await = if self.ecma_version >= 9 {
                    if self.token == Token::In {
                        if let Some(await_loc) = await_at {
                            return self.error(
                                await_loc,
                                ParseError::UnexpectedToken(Token::Identifier(
                                    "await".to_owned(),
                                )),
                            );
                        }
                        false
                    } else {
                        await_at.is_some()
                    }
                } else {
                    false
                };

                return self.parse_for_each_statement(
                    ForEachInit::VarDecl(var_decl),
                    start_pos,
                    is_await,
                );
            }

            if let Some(await_loc) = await_at {
                return self.error(
                    await_loc,
                    ParseError::UnexpectedToken(Token::Identifier("await".to_owned())),
                );
            }

            self.expect(Token::Semicolon)?;
            return self.parse_for_statement(Some(ForInit::VarDecl(var_decl)), start_pos);
        }

        // Otherwise the init is an expression, which must be reparsed as a pattern if this
        // turns out to be a for-in or for-of loop
        let starts_with_let = self.is_contextual("let");
        let contains_esc = self.token_contains_esc;
        let init_start_pos = self.current_start_pos();
        let mut refs = DestructuringErrors::default();

        let init = if await_at.is_some() {
            self.potential_arrow_in_for_await = true;
            let init = self.parse_expression_subscripts_only(&mut refs)?;
            self.potential_arrow_in_for_await = false;
            init
        } else {
            self.parse_expression(true, Some(&mut refs))?
        };

        let is_for_of = self.ecma_version >= 6 && self.is_contextual("of");
        if self.token == Token::In || is_for_of {
            if let Some(await_loc) = await_at {
                if self.token == Token::In {
                    return self.error(
                        await_loc,
                        ParseError::UnexpectedToken(Token::Identifier("await".to_owned())),
                    );
                }
            } else if is_for_of && self.ecma_version >= 8 {
                if init.loc().start == init_start_pos
                    && !contains_esc
                    && matches!(init.as_ref(), Expression::Id(id) if id.name == "async")
                {
                    return self.error(init.loc(), ParseError::ForOfAsync);
                }
            }

            if starts_with_let && is_for_of {
                return self.error(init.loc(), ParseError::ForOfLet);
            }

            let pattern = self.reparse_expression_as_pattern(*init, false, Some(&refs))?;
            self.check_lval_pattern(&pattern, BindingKind::None, &mut None)?;

            return self.parse_for_each_statement(
                ForEachInit::Pattern(pattern),
                start_pos,
                await_at.is_some(),
            );
        }

        if let Some(await_loc) = await_at {
            return self.error(
                await_loc,
                ParseError::UnexpectedToken(Token::Identifier("await".to_owned())),
            );
        }

        self.check_expression_errors(&refs)?;
        self.expect(Token::Semicolon)?;
        self.parse_for_statement(Some(ForInit::Expression(*init)), start_pos)
    }

    fn parse_for_statement(
        &mut self,
        init: Option<ForInit>,
        start_pos: Pos,
    ) -> ParseResult<Statement> {
        let test = match self.token {
            Token::Semicolon => None,
            _ => Some(self.parse_expression(false, None)?),
        };
        self.expect(Token::Semicolon)?;

        let update = match self.token {
            Token::RightParen => None,
            _ => Some(self.parse_expression(false, None)?),
        };

        self.expect(Token::RightParen)?;
        let body = p(self.parse_statement_in_context(StatementContext::Other)?);
        self.scopes.exit();
        self.labels.pop();
        let loc = self.mark_loc(start_pos);

        Ok(Statement::For(ForStatement { loc, init: init.map(p), test, update, body }))
    }

    fn parse_for_each_statement(
        &mut self,
        left: ForEachInit,
        start_pos: Pos,
        is_await: bool,
    ) -> ParseResult<Statement> {
        let kind = match self.token {
            Token::In => ForEachKind::In,
            _ => ForEachKind::Of,
        };

        // A declaration with an initializer is only valid in legacy non-strict `for (var x = 0
        // in ...)` form
        if let ForEachInit::VarDecl(var_decl) = &left {
            let declaration = &var_decl.declarations[0];
            if declaration.init.is_some()
                && (kind != ForEachKind::In
                    || self.ecma_version < 8
                    || self.in_strict_mode
                    || var_decl.kind != VarKind::Var
                    || !matches!(declaration.id.as_ref(), Pattern::Id(_)))
            {
                return self.error(
                    var_decl.loc,
                    ParseError::ForInOfDeclarationWithInitializer(kind == ForEachKind::In),
                );
            }
        }

        self.advance()?;

        let right = match kind {
            ForEachKind::In => self.parse_expression(false, None)?,
            ForEachKind::Of => self.parse_assignment_expression(false, None)?,
        };

        self.expect(Token::RightParen)?;
        let body = p(self.parse_statement_in_context(StatementContext::Other)?);
        self.scopes.exit();
        self.labels.pop();
        let loc = self.mark_loc(start_pos);

        Ok(Statement::ForEach(ForEachStatement {
            loc,
            kind,
            left: p(left),
            right,
            body,
            is_await,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.expect(Token::LeftParen)?;
        let test = self.parse_expression(false, None)?;
        self.expect(Token::RightParen)?;

        self.labels.push(LabelEntry {
            name: None,
            kind: Some(LabelKind::Loop),
            statement_start: start_pos,
        });
        let body = p(self.parse_statement_in_context(StatementContext::Other)?);
        self.labels.pop();

        let loc = self.mark_loc(start_pos);

        Ok(Statement::While(WhileStatement { loc, test, body }))
    }

    fn parse_do_while_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        self.labels.push(LabelEntry {
            name: None,
            kind: Some(LabelKind::Loop),
            statement_start: start_pos,
        });
        let body = p(self.parse_statement_in_context(StatementContext::Other)?);
        self.labels.pop();

        self.expect(Token::While)?;
        self.expect(Token::LeftParen)?;
        let test = self.parse_expression(false, None)?;
        self.expect(Token::RightParen)?;

        // A semicolon is always automatically inserted after a do while statement
        if self.token == Token::Semicolon {
            self.advance()?;
        }

        let loc = self.mark_loc(start_pos);

        Ok(Statement::DoWhile(DoWhileStatement { loc, test, body }))
    }

    fn parse_with_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();

        if self.in_strict_mode {
            return self.error(self.loc, ParseError::WithInStrictMode);
        }

        self.advance()?;

        self.expect(Token::LeftParen)?;
        let object = self.parse_expression(false, None)?;
        self.expect(Token::RightParen)?;

        let body = p(self.parse_statement_in_context(StatementContext::Other)?);

        let loc = self.mark_loc(start_pos);

        Ok(Statement::With(WithStatement { loc, object, body }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let block = p(self.parse_block(true)?);

        let handler = if self.token == Token::Catch {
            let catch_start_pos = self.current_start_pos();
            self.advance()?;

            let param = if self.token == Token::LeftParen {
                self.advance()?;
                let pattern = self.parse_binding_atom()?;
                let is_simple = matches!(pattern, Pattern::Id(_));
                let scope_flags = if is_simple {
                    ScopeFlags::SIMPLE_CATCH
                } else {
                    ScopeFlags::empty()
                };
                self.scopes.enter(scope_flags);
                let kind = if is_simple { BindingKind::SimpleCatch } else { BindingKind::Lexical };
                self.check_lval_pattern(&pattern, kind, &mut None)?;
                self.expect(Token::RightParen)?;
                Some(p(pattern))
            } else {
                // The binding itself is optional
                if self.ecma_version < 10 {
                    return self.error(
                        self.loc,
                        ParseError::ExpectedToken(self.token.clone(), Token::LeftParen),
                    );
                }
                self.scopes.enter(ScopeFlags::empty());
                None
            };

            let body = p(self.parse_block(false)?);
            self.scopes.exit();
            let loc = self.mark_loc(catch_start_pos);

            Some(p(CatchClause { loc, param, body }))
        } else {
            None
        };

        let finalizer = if self.eat(Token::Finally)? {
            Some(p(self.parse_block(true)?))
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return self.error(self.loc, ParseError::MissingCatchOrFinally);
        }

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Try(TryStatement { loc, block, handler, finalizer }))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        if self.lexer.is_new_line_before_current() {
            return self.error(self.loc, ParseError::ThrowArgumentOnNewLine);
        }

        let argument = self.parse_expression(false, None)?;
        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Throw(ThrowStatement { loc, argument }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();

        if !self.scopes.in_function() && !self.options.allow_return_outside_function {
            return self.error(self.loc, ParseError::ReturnOutsideFunction);
        }

        self.advance()?;

        let argument = if self.maybe_expect_semicolon()? {
            None
        } else {
            let argument = self.parse_expression(false, None)?;
            self.expect_semicolon()?;
            Some(argument)
        };

        let loc = self.mark_loc(start_pos);

        Ok(Statement::Return(ReturnStatement { loc, argument }))
    }

    // Variable declarations

    /// Parse a lexical declaration whose keyword has not yet been consumed (the `let` case
    /// arrives as an identifier token).
    fn parse_variable_declaration(&mut self, kind: VarKind) -> ParseResult<VariableDeclaration> {
        self.advance()?;
        self.parse_variable_declarators(kind, false)
    }

    fn parse_variable_declarators_for_init(
        &mut self,
        kind: VarKind,
    ) -> ParseResult<VariableDeclaration> {
        self.parse_variable_declarators_impl(kind, true)
    }

    fn parse_variable_declarators(
        &mut self,
        kind: VarKind,
        is_for_init: bool,
    ) -> ParseResult<VariableDeclaration> {
        self.parse_variable_declarators_impl(kind, is_for_init)
    }

    fn parse_variable_declarators_impl(
        &mut self,
        kind: VarKind,
        is_for_init: bool,
    ) -> ParseResult<VariableDeclaration> {
        // The keyword has already been consumed; its loc is the previous token
        let start_pos = self.prev_loc.start;

        let mut declarations = vec![];
        loop {
            let decl_start_pos = self.current_start_pos();
            let id = self.parse_binding_atom()?;

            let binding_kind = match kind {
                VarKind::Var => BindingKind::Var,
                VarKind::Let | VarKind::Const => BindingKind::Lexical,
            };
            self.check_lval_pattern(&id, binding_kind, &mut None)?;

            let is_id_pattern = matches!(id, Pattern::Id(_));

            let init = if self.eat(Token::Equals)? {
                Some(self.parse_assignment_expression(is_for_init, None)?)
            } else {
                let at_for_each = is_for_init
                    && (self.token == Token::In
                        || (self.ecma_version >= 6 && self.is_contextual("of")));

                if kind == VarKind::Const && !at_for_each {
                    return self.error(self.loc, ParseError::ConstWithoutInitializer);
                }
                if !is_id_pattern && !at_for_each {
                    return self.error(self.loc, ParseError::MissingPatternInitializer);
                }

                None
            };

            let loc = self.mark_loc(decl_start_pos);
            declarations.push(VariableDeclarator { loc, id: p(id), init });

            if !self.eat(Token::Comma)? {
                break;
            }
        }

        if !is_for_init {
            self.expect_semicolon()?;
        }

        let loc = self.mark_loc(start_pos);

        Ok(VariableDeclaration { loc, kind, declarations })
    }

    // Functions

    fn parse_function_declaration(
        &mut self,
        start_pos: Pos,
        is_async: bool,
        is_hanging: bool,
        nullable_id: bool,
    ) -> ParseResult<Function> {
        self.expect(Token::Function)?;

        let is_generator = if self.ecma_version >= 6 {
            self.eat(Token::Multiply)?
        } else {
            false
        };

        let id = if nullable_id && !matches!(self.token, Token::Identifier(_)) {
            None
        } else {
            Some(self.parse_identifier()?)
        };

        if let Some(id) = &id {
            if !is_hanging {
                let kind = if self.in_strict_mode || is_generator || is_async {
                    if self.scopes.treat_functions_as_var_in_current() {
                        BindingKind::Var
                    } else {
                        BindingKind::Lexical
                    }
                } else {
                    BindingKind::Function
                };
                self.declare_name(&id.name, kind, id.loc)?;
            }
        }

        self.parse_function_rest(start_pos, id, false, is_async, is_generator)
    }

    fn parse_function_expression_rest(
        &mut self,
        start_pos: Pos,
        is_async: bool,
    ) -> ParseResult<Function> {
        self.expect(Token::Function)?;

        let is_generator = if self.ecma_version >= 6 {
            self.eat(Token::Multiply)?
        } else {
            false
        };

        self.parse_function_rest(start_pos, None, true, is_async, is_generator)
    }

    /// Shared tail of function parsing, from the parameter list on. The function keyword and
    /// generator star have been consumed. The name of a function expression is parsed here,
    /// inside the function's own scope, since it is only visible within the function.
    fn parse_function_rest(
        &mut self,
        start_pos: Pos,
        id: Option<Identifier>,
        parse_expression_id: bool,
        is_async: bool,
        is_generator: bool,
    ) -> ParseResult<Function> {
        let old_yield_pos = self.yield_pos.take();
        let old_await_pos = self.await_pos.take();
        let old_await_ident_pos = self.await_ident_pos.take();

        self.scopes.enter(function_scope_flags(is_async, is_generator));

        let id = if parse_expression_id && matches!(self.token, Token::Identifier(_)) {
            Some(self.parse_identifier()?)
        } else {
            id
        };

        let params = self.parse_function_params()?;
        let (body, has_use_strict_directive, is_strict_mode) =
            self.parse_function_body(start_pos, &params, id.as_ref(), false, false, false)?;

        self.scopes.exit();

        self.yield_pos = old_yield_pos;
        self.await_pos = old_await_pos;
        self.await_ident_pos = old_await_ident_pos;

        let loc = self.mark_loc(start_pos);

        Ok(Function {
            loc,
            id: id.map(p),
            params,
            body: p(body),
            is_async,
            is_generator,
            has_use_strict_directive,
            is_strict_mode,
        })
    }

    fn parse_function_params(&mut self) -> ParseResult<Vec<FunctionParam>> {
        self.expect(Token::LeftParen)?;
        let elements =
            self.parse_binding_list(Token::RightParen, false, self.ecma_version >= 8)?;
        self.check_yield_await_in_default_params()?;

        let params = elements
            .into_iter()
            .map(|element| match element {
                ArrayPatternElement::Pattern(pattern) => FunctionParam::Pattern(pattern),
                ArrayPatternElement::Rest(rest) => FunctionParam::Rest(rest),
                ArrayPatternElement::Hole => unreachable!("holes are not allowed in params"),
            })
            .collect();

        Ok(params)
    }

    fn is_simple_param_list(params: &[FunctionParam]) -> bool {
        params.iter().all(|param| param.is_simple())
    }

    fn check_params(&mut self, params: &[FunctionParam], allow_duplicates: bool) -> ParseResult<()> {
        let mut clashes = if allow_duplicates { None } else { Some(HashSet::new()) };
        for param in params {
            match param {
                FunctionParam::Pattern(pattern) => {
                    self.check_lval_pattern(pattern, BindingKind::Var, &mut clashes)?
                }
                FunctionParam::Rest(rest) => {
                    self.check_lval_pattern(&rest.argument, BindingKind::Var, &mut clashes)?
                }
            }
        }

        Ok(())
    }

    fn check_yield_await_in_default_params(&mut self) -> ParseResult<()> {
        if let Some(yield_pos) = self.yield_pos {
            if self.await_pos.map_or(true, |await_pos| yield_pos < await_pos) {
                let loc = Loc { start: yield_pos, end: yield_pos };
                return self.error(loc, ParseError::YieldInParameters);
            }
        }
        if let Some(await_pos) = self.await_pos {
            let loc = Loc { start: await_pos, end: await_pos };
            return self.error(loc, ParseError::AwaitInParameters);
        }

        Ok(())
    }

    /// Parse a function body, handling the use-strict directive, parameter validation, and
    /// label isolation. Returns the body together with the directive and strict mode facts.
    fn parse_function_body(
        &mut self,
        func_start_pos: Pos,
        params: &[FunctionParam],
        id: Option<&Identifier>,
        is_arrow: bool,
        is_method: bool,
        no_in: bool,
    ) -> ParseResult<(FunctionBody, bool, bool)> {
        let is_expression_body = is_arrow && self.token != Token::LeftBrace;
        let old_strict = self.in_strict_mode;

        if is_expression_body {
            self.check_params(params, false)?;
            let body = self.parse_assignment_expression(no_in, None)?;
            return Ok((FunctionBody::Expression(*body), false, self.in_strict_mode));
        }

        let non_simple = self.ecma_version >= 7 && !Self::is_simple_param_list(params);

        // The strict directive must be detected by scanning raw text, before any body token is
        // lexed, since it changes how the body must be lexed
        let mut use_strict = false;
        if !old_strict || non_simple {
            use_strict = self.strict_directive(self.loc.end);
            if use_strict && non_simple {
                let loc = self.mark_loc(func_start_pos);
                self.raise_recoverable(loc, ParseError::UseStrictNonSimpleParams)?;
            }
        }

        let old_labels = std::mem::take(&mut self.labels);
        if use_strict {
            self.set_strict(true);
        }

        let allow_duplicates = !old_strict
            && !use_strict
            && !is_arrow
            && !is_method
            && Self::is_simple_param_list(params);
        self.check_params(params, allow_duplicates)?;

        if self.in_strict_mode {
            if let Some(id) = id {
                if Self::is_strict_bind_reserved(&id.name) {
                    self.raise_recoverable(
                        id.loc,
                        ParseError::StrictModeLVal { name: id.name.clone(), is_binding: true },
                    )?;
                }
            }
        }

        // Function body block, parsed without a new lexical scope since the parameter scope is
        // the function scope
        let body_start_pos = self.current_start_pos();
        self.expect(Token::LeftBrace)?;

        let mut body = vec![];
        while self.token != Token::RightBrace {
            if self.token == Token::Eof {
                return self.unexpected();
            }
            body.push(self.parse_statement_list_item()?)
        }

        // Restore outer strict mode before lexing past the closing brace
        let is_strict_mode = self.in_strict_mode;
        self.set_strict(old_strict);
        self.advance()?;

        let loc = self.mark_loc(body_start_pos);

        self.adapt_directive_prologue(&mut body);
        self.labels = old_labels;

        Ok((FunctionBody::Block(Block { loc, body }), use_strict, is_strict_mode))
    }

    // Classes

    fn parse_class(&mut self, is_statement: bool, nullable_id: bool) -> ParseResult<Class> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // Class definitions are always strict mode code
        let old_strict = self.in_strict_mode;
        self.set_strict(true);

        let id = if matches!(self.token, Token::Identifier(_)) {
            let id = self.parse_identifier()?;
            if is_statement {
                self.declare_name(&id.name, BindingKind::Lexical, id.loc)?;
            }
            Some(id)
        } else {
            if is_statement && !nullable_id {
                return self.unexpected();
            }
            None
        };

        let super_class = if self.eat(Token::Extends)? {
            Some(self.parse_expression_subscripts_plain()?)
        } else {
            None
        };
        let constructor_allows_super = super_class.is_some();

        let mut body = vec![];
        let mut had_constructor = false;

        self.expect(Token::LeftBrace)?;
        while self.token != Token::RightBrace {
            if self.token == Token::Eof {
                return self.unexpected();
            }
            if self.eat(Token::Semicolon)? {
                continue;
            }

            let method = self.parse_class_method(constructor_allows_super)?;
            if method.kind == ClassMethodKind::Constructor {
                if had_constructor {
                    return self.error(method.loc, ParseError::MultipleConstructors);
                }
                had_constructor = true;
            }
            body.push(method);
        }

        // Restore outer strict mode before lexing past the closing brace
        self.set_strict(old_strict);
        self.advance()?;

        let loc = self.mark_loc(start_pos);

        Ok(Class { loc, id: id.map(p), super_class, body })
    }

    /// Consume a contextual modifier keyword (`static`, `async`, `get`, `set`) unless it turns
    /// out to be the method name itself, in which case return it as a key.
    fn eat_class_modifier(
        &mut self,
        keyword: &str,
        no_line_break: bool,
    ) -> ParseResult<Option<Option<Identifier>>> {
        if !self.is_contextual(keyword) {
            // Modifier not present
            return Ok(None);
        }

        let loc = self.loc;
        self.advance()?;

        let is_modifier = self.token != Token::LeftParen
            && !(no_line_break && self.can_insert_semicolon());
        if is_modifier {
            // Present as a modifier
            Ok(Some(None))
        } else {
            // The keyword was actually the method name
            Ok(Some(Some(Identifier { loc, name: keyword.to_owned() })))
        }
    }

    fn parse_class_method(&mut self, constructor_allows_super: bool) -> ParseResult<ClassMethod> {
        let start_pos = self.current_start_pos();

        let mut key: Option<(P<Expression>, bool)> = None;
        let mut kind = ClassMethodKind::Method;

        let is_static = match self.eat_class_modifier("static", false)? {
            Some(None) => true,
            Some(Some(id)) => {
                key = Some((p(Expression::Id(id)), false));
                false
            }
            None => false,
        };

        let mut is_generator = false;
        let mut is_async = false;

        if key.is_none() {
            is_generator = self.ecma_version >= 6 && self.eat(Token::Multiply)?;

            if !is_generator {
                if self.ecma_version >= 8 {
                    match self.eat_class_modifier("async", true)? {
                        Some(None) => {
                            is_async = true;
                            is_generator = self.ecma_version >= 9 && self.eat(Token::Multiply)?;
                        }
                        Some(Some(id)) => key = Some((p(Expression::Id(id)), false)),
                        None => {}
                    }
                }
            }

            if key.is_none() && !is_async && !is_generator {
                match self.eat_class_modifier("get", false)? {
                    Some(None) => kind = ClassMethodKind::Get,
                    Some(Some(id)) => key = Some((p(Expression::Id(id)), false)),
                    None => match self.eat_class_modifier("set", false)? {
                        Some(None) => kind = ClassMethodKind::Set,
                        Some(Some(id)) => key = Some((p(Expression::Id(id)), false)),
                        None => {}
                    },
                }
            }
        }

        let (key, is_computed) = match key {
            Some(key) => key,
            None => self.parse_property_name()?,
        };

        let key_is_name = |name: &str| match key.as_ref() {
            Expression::Id(id) => id.name == name,
            Expression::String(literal) => literal.value == name,
            _ => false,
        };

        let mut allows_direct_super = false;
        if !is_computed && !is_static && key_is_name("constructor") {
            if kind != ClassMethodKind::Method {
                return self.error(key.loc(), ParseError::ConstructorGetterSetter);
            }
            if is_generator {
                return self.error(key.loc(), ParseError::ConstructorGenerator);
            }
            if is_async {
                return self.error(key.loc(), ParseError::ConstructorAsync);
            }
            kind = ClassMethodKind::Constructor;
            allows_direct_super = constructor_allows_super;
        } else if is_static && !is_computed && key_is_name("prototype") {
            return self.error(key.loc(), ParseError::ClassStaticPrototype);
        }

        let value = self.parse_method(is_generator, is_async, allows_direct_super)?;
        self.check_accessor_params(kind == ClassMethodKind::Get, kind == ClassMethodKind::Set, &value)?;

        let loc = self.mark_loc(start_pos);

        Ok(ClassMethod {
            loc,
            key,
            value: p(value),
            kind,
            is_computed,
            is_static,
        })
    }

    fn check_accessor_params(
        &mut self,
        is_get: bool,
        is_set: bool,
        value: &Function,
    ) -> ParseResult<()> {
        if is_get && !value.params.is_empty() {
            self.raise_recoverable(value.loc, ParseError::GetterWrongNumberOfParams)?;
        } else if is_set {
            if value.params.len() != 1 {
                self.raise_recoverable(value.loc, ParseError::SetterWrongNumberOfParams)?;
            } else if let FunctionParam::Rest(rest) = &value.params[0] {
                self.raise_recoverable(rest.loc, ParseError::SetterRestParam)?;
            }
        }

        Ok(())
    }

    /// Parse a method value: a function whose scope allows `super` property accesses, starting
    /// at the parameter list.
    fn parse_method(
        &mut self,
        is_generator: bool,
        is_async: bool,
        allows_direct_super: bool,
    ) -> ParseResult<Function> {
        let start_pos = self.current_start_pos();

        let old_yield_pos = self.yield_pos.take();
        let old_await_pos = self.await_pos.take();
        let old_await_ident_pos = self.await_ident_pos.take();

        let mut scope_flags = function_scope_flags(is_async, is_generator) | ScopeFlags::SUPER;
        if allows_direct_super {
            scope_flags |= ScopeFlags::DIRECT_SUPER;
        }
        self.scopes.enter(scope_flags);

        let params = self.parse_function_params()?;
        let (body, has_use_strict_directive, is_strict_mode) =
            self.parse_function_body(start_pos, &params, None, false, true, false)?;

        self.scopes.exit();

        self.yield_pos = old_yield_pos;
        self.await_pos = old_await_pos;
        self.await_ident_pos = old_await_ident_pos;

        let loc = self.mark_loc(start_pos);

        Ok(Function {
            loc,
            id: None,
            params,
            body: p(body),
            is_async,
            is_generator,
            has_use_strict_directive,
            is_strict_mode,
        })
    }

    // Modules

    fn parse_import_declaration(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut specifiers = vec![];

        let source = if let Token::StringLiteral(_) = &self.token {
            // Side-effect import with no specifiers
            self.parse_module_source()?
        } else {
            // Default specifier
            if matches!(self.token, Token::Identifier(_)) {
                let local_start = self.current_start_pos();
                let local = self.parse_identifier()?;
                self.check_lval_binding_identifier(&local, BindingKind::Lexical)?;
                let loc = self.mark_loc(local_start);
                specifiers.push(ImportSpecifier::Default(ImportDefaultSpecifier {
                    loc,
                    local: p(local),
                }));

                if self.token == Token::Comma {
                    self.advance()?;
                    self.parse_import_specifier_group(&mut specifiers)?;
                }
            } else {
                self.parse_import_specifier_group(&mut specifiers)?;
            }

            self.expect_contextual("from")?;
            self.parse_module_source()?
        };

        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::Import(ImportDeclaration { loc, specifiers, source }))
    }

    fn parse_import_specifier_group(
        &mut self,
        specifiers: &mut Vec<ImportSpecifier>,
    ) -> ParseResult<()> {
        if self.token == Token::Multiply {
            let star_start = self.current_start_pos();
            self.advance()?;
            self.expect_contextual("as")?;
            let local = self.parse_identifier()?;
            self.check_lval_binding_identifier(&local, BindingKind::Lexical)?;
            let loc = self.mark_loc(star_start);
            specifiers.push(ImportSpecifier::Namespace(ImportNamespaceSpecifier {
                loc,
                local: p(local),
            }));
            return Ok(());
        }

        self.expect(Token::LeftBrace)?;

        let mut first = true;
        while self.token != Token::RightBrace {
            if !first {
                self.expect(Token::Comma)?;
                if self.token == Token::RightBrace {
                    break;
                }
            }
            first = false;

            let spec_start = self.current_start_pos();
            let imported = self.parse_identifier_name()?;

            let local = if self.eat_contextual("as")? {
                self.parse_identifier()?
            } else {
                // Without an alias the imported name is also the local binding, so it must be
                // a valid binding identifier
                self.check_unreserved(imported.loc, &imported.name)?;
                Identifier { loc: imported.loc, name: imported.name.clone() }
            };

            self.check_lval_binding_identifier(&local, BindingKind::Lexical)?;

            let loc = self.mark_loc(spec_start);
            specifiers.push(ImportSpecifier::Named(ImportNamedSpecifier {
                loc,
                imported: p(imported),
                local: p(local),
            }));
        }

        self.expect(Token::RightBrace)?;
        Ok(())
    }

    fn parse_module_source(&mut self) -> ParseResult<StringLiteral> {
        match &self.token {
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(StringLiteral { loc, value })
            }
            _ => self.unexpected(),
        }
    }

    fn check_export(&mut self, name: &str, loc: Loc) -> ParseResult<()> {
        if !self.exports.insert(name.to_owned()) {
            self.raise_recoverable(loc, ParseError::DuplicateExport(name.to_owned()))?;
        }
        Ok(())
    }

    /// Record a use of an exported local name; if no declaration for it appears by the end of
    /// the program the export is an error.
    fn check_local_export(&mut self, id: &Identifier) {
        if !self.scopes.is_declared_at_top_level(&id.name)
            && !self.undefined_exports.contains_key(&id.name)
        {
            self.undefined_exports.insert(id.name.clone(), id.loc);
        }
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Statement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // export * from "source", with an optional alias
        if self.eat(Token::Multiply)? {
            let exported = if self.ecma_version >= 11 && self.eat_contextual("as")? {
                let exported = self.parse_identifier_name()?;
                self.check_export(&exported.name.clone(), exported.loc)?;
                Some(exported)
            } else {
                None
            };

            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            self.expect_semicolon()?;
            let loc = self.mark_loc(start_pos);

            return Ok(Statement::ExportAll(ExportAllDeclaration {
                loc,
                exported: exported.map(p),
                source,
            }));
        }

        // export default
        if self.token == Token::Default {
            let default_loc = self.loc;
            self.advance()?;
            self.check_export("default", default_loc)?;

            let is_async = self.is_async_function();
            let declaration = if self.token == Token::Function || is_async {
                let func_start = self.current_start_pos();
                if is_async {
                    self.advance()?;
                }
                let function = self.parse_function_declaration(
                    func_start,
                    is_async,
                    /* is_hanging */ false,
                    /* nullable_id */ true,
                )?;
                ExportDefaultKind::Function(function)
            } else if self.token == Token::Class {
                ExportDefaultKind::Class(self.parse_class(true, true)?)
            } else {
                let expr = self.parse_assignment_expression(false, None)?;
                self.expect_semicolon()?;
                ExportDefaultKind::Expression(expr)
            };

            let loc = self.mark_loc(start_pos);
            return Ok(Statement::ExportDefault(ExportDefaultDeclaration { loc, declaration }));
        }

        // export with a declaration
        if self.starts_export_statement() {
            let declaration = self.parse_statement_list_item()?;

            match &declaration {
                Statement::VarDecl(var_decl) => {
                    let mut names = vec![];
                    var_decl.iter_bound_names(&mut |id| names.push((id.name.clone(), id.loc)));
                    for (name, loc) in names {
                        self.check_export(&name, loc)?;
                    }
                }
                Statement::FuncDecl(function) => {
                    if let Some(id) = &function.id {
                        let (name, loc) = (id.name.clone(), id.loc);
                        self.check_export(&name, loc)?;
                    }
                }
                Statement::ClassDecl(class) => {
                    if let Some(id) = &class.id {
                        let (name, loc) = (id.name.clone(), id.loc);
                        self.check_export(&name, loc)?;
                    }
                }
                _ => {}
            }

            let loc = self.mark_loc(start_pos);
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                loc,
                declaration: Some(p(declaration)),
                specifiers: vec![],
                source: None,
            }));
        }

        // export { ... } with an optional source
        let specifiers = self.parse_export_specifiers()?;

        let source = if self.eat_contextual("from")? {
            Some(self.parse_module_source()?)
        } else {
            for specifier in &specifiers {
                let (loc, name) = (specifier.local.loc, specifier.local.name.clone());
                self.check_unreserved(loc, &name)?;
                let local = Identifier { loc, name };
                self.check_local_export(&local);
            }
            None
        };

        self.expect_semicolon()?;
        let loc = self.mark_loc(start_pos);

        Ok(Statement::ExportNamed(ExportNamedDeclaration {
            loc,
            declaration: None,
            specifiers,
            source,
        }))
    }

    fn starts_export_statement(&self) -> bool {
        matches!(self.token, Token::Var | Token::Const | Token::Function | Token::Class)
            || self.is_let_declaration(None)
            || self.is_async_function()
    }

    fn parse_export_specifiers(&mut self) -> ParseResult<Vec<ExportSpecifier>> {
        self.expect(Token::LeftBrace)?;

        let mut specifiers = vec![];
        let mut first = true;
        while self.token != Token::RightBrace {
            if !first {
                self.expect(Token::Comma)?;
                if self.token == Token::RightBrace {
                    break;
                }
            }
            first = false;

            let spec_start = self.current_start_pos();
            let local = self.parse_identifier_name()?;

            let exported = if self.eat_contextual("as")? {
                self.parse_identifier_name()?
            } else {
                Identifier { loc: local.loc, name: local.name.clone() }
            };

            self.check_export(&exported.name.clone(), exported.loc)?;

            let loc = self.mark_loc(spec_start);
            specifiers.push(ExportSpecifier { loc, local: p(local), exported: p(exported) });
        }

        self.expect(Token::RightBrace)?;
        Ok(specifiers)
    }

    // Expressions

    fn parse_expression(
        &mut self,
        no_in: bool,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_assignment_expression(no_in, refs.as_deref_mut())?;

        if self.token == Token::Comma {
            let mut expressions = vec![*expr];
            while self.eat(Token::Comma)? {
                expressions.push(*self.parse_assignment_expression(no_in, refs.as_deref_mut())?);
            }

            let loc = self.mark_loc(start_pos);

            Ok(p(Expression::Sequence(SequenceExpression { loc, expressions })))
        } else {
            Ok(expr)
        }
    }

    fn parse_assignment_expression(
        &mut self,
        no_in: bool,
        outer_refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<P<Expression>> {
        if self.is_contextual("yield") && self.scopes.in_generator() {
            return self.parse_yield_expression(no_in);
        }

        let mut own = DestructuringErrors::default();
        let (refs, owns_refs) = match outer_refs {
            Some(refs) => (refs, false),
            None => (&mut own, true),
        };

        // Positions recorded by an enclosing expression are set aside so the checks below only
        // see what this assignment's own target produced
        let old_paren_assign = refs.parenthesized_assign.take();
        let old_trailing_comma = refs.trailing_comma.take();
        let old_double_proto = refs.double_proto;

        let start_pos = self.current_start_pos();
        if matches!(self.token, Token::LeftParen | Token::Identifier(_)) {
            self.potential_arrow_at = Some(start_pos);
        }

        let left = self.parse_conditional_expression(no_in, Some(&mut *refs))?;

        if self.token.is_assign() {
            let operator = Self::assignment_operator_for_token(&self.token);
            let is_eq = self.token == Token::Equals;
            let left_start = left.loc().start;

            let left_pattern = if is_eq {
                // Shorthand defaults inside the target become valid under the pattern reading
                if refs.shorthand_assign.map_or(false, |loc| loc.start >= left_start) {
                    refs.shorthand_assign = None;
                }
                let pattern = self.reparse_expression_as_pattern(*left, false, Some(&*refs))?;
                self.check_lval_pattern(&pattern, BindingKind::None, &mut None)?;
                pattern
            } else {
                self.check_lval_simple_expr(&left, BindingKind::None)?;
                Self::expression_to_simple_target(*left)
            };

            if !owns_refs {
                refs.parenthesized_assign = None;
                refs.trailing_comma = None;
                refs.double_proto = None;
            }

            self.advance()?;
            let right = self.parse_assignment_expression(no_in, None)?;

            if old_double_proto.is_some() {
                refs.double_proto = old_double_proto;
            }

            let loc = self.mark_loc(start_pos);

            return Ok(p(Expression::Assign(AssignmentExpression {
                loc,
                operator,
                left: p(left_pattern),
                right,
            })));
        }

        if owns_refs {
            self.check_expression_errors(refs)?;
        }

        if old_paren_assign.is_some() {
            refs.parenthesized_assign = old_paren_assign;
        }
        if old_trailing_comma.is_some() {
            refs.trailing_comma = old_trailing_comma;
        }

        Ok(left)
    }

    fn expression_to_simple_target(expr: Expression) -> Pattern {
        match expr {
            Expression::Id(id) => Pattern::Id(id),
            other => Pattern::Expr(p(other)),
        }
    }

    fn parse_yield_expression(&mut self, no_in: bool) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        if self.yield_pos.is_none() {
            self.yield_pos = Some(start_pos);
        }

        self.advance()?;

        let (delegate, argument) = if self.token == Token::Semicolon
            || self.can_insert_semicolon()
            || (self.token != Token::Multiply && !self.token.starts_expr())
        {
            (false, None)
        } else {
            let delegate = self.eat(Token::Multiply)?;
            let argument = self.parse_assignment_expression(no_in, None)?;
            (delegate, Some(argument))
        };

        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Yield(YieldExpression { loc, argument, delegate })))
    }

    fn parse_conditional_expression(
        &mut self,
        no_in: bool,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_expression_ops(no_in, refs.as_deref_mut())?;

        // An unresolved cover grammar must be resolved by the caller before anything else
        // consumes it
        if refs.as_deref().map_or(false, |refs| refs.has_expression_errors()) {
            return Ok(expr);
        }

        if self.eat(Token::Question)? {
            let conseq = self.parse_assignment_expression(false, None)?;
            self.expect(Token::Colon)?;
            let altern = self.parse_assignment_expression(no_in, None)?;
            let loc = self.mark_loc(start_pos);

            Ok(p(Expression::Conditional(ConditionalExpression { loc, test: expr, conseq, altern })))
        } else {
            Ok(expr)
        }
    }

    fn parse_expression_ops(
        &mut self,
        no_in: bool,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_maybe_unary(refs.as_deref_mut(), false, false, no_in)?;

        if refs.as_deref().map_or(false, |refs| refs.has_expression_errors()) {
            return Ok(expr);
        }

        if matches!(expr.as_ref(), Expression::ArrowFunction(_)) && expr.loc().start == start_pos {
            return Ok(expr);
        }

        self.parse_expression_op(expr, start_pos, -1, no_in)
    }

    /// Precedence climbing over the binary operator table. Operators stronger than `min_prec`
    /// are consumed into the right operand; weaker ones are left for an outer invocation.
    fn parse_expression_op(
        &mut self,
        left: P<Expression>,
        left_start_pos: Pos,
        min_prec: i32,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        if let Some(prec) = self.token.binary_precedence() {
            if (prec as i32) > min_prec && !(no_in && self.token == Token::In) {
                let op_token = self.token.clone();
                let logical = matches!(op_token, Token::LogicalAnd | Token::LogicalOr);
                let coalesce = op_token == Token::NullishCoalesce;

                // The right operand of ?? binds at logical-and strength so that ?? chains
                // associate left while unparenthesized mixing is caught below
                let right_prec = if coalesce {
                    Token::LogicalAnd.binary_precedence().unwrap()
                } else {
                    prec
                };

                self.advance()?;
                let right_start_pos = self.current_start_pos();
                let unary = self.parse_maybe_unary(None, false, false, no_in)?;
                let right =
                    self.parse_expression_op(unary, right_start_pos, right_prec as i32, no_in)?;

                let loc = self.mark_loc(left_start_pos);
                let node = if logical || coalesce {
                    let operator = match op_token {
                        Token::LogicalAnd => LogicalOperator::And,
                        Token::LogicalOr => LogicalOperator::Or,
                        _ => LogicalOperator::NullishCoalesce,
                    };
                    p(Expression::Logical(LogicalExpression { loc, operator, left, right }))
                } else {
                    let operator = Self::binary_operator_for_token(&op_token);
                    p(Expression::Binary(BinaryExpression { loc, operator, left, right }))
                };

                if (logical && self.token == Token::NullishCoalesce)
                    || (coalesce && matches!(self.token, Token::LogicalAnd | Token::LogicalOr))
                {
                    self.raise_recoverable(self.loc, ParseError::MixedLogicalCoalesce)?;
                }

                return self.parse_expression_op(node, left_start_pos, min_prec, no_in);
            }
        }

        Ok(left)
    }

    fn parse_maybe_unary(
        &mut self,
        mut refs: Option<&mut DestructuringErrors>,
        saw_unary: bool,
        inc_dec: bool,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let mut saw_unary = saw_unary;

        let mut expr = if self.is_contextual("await") && self.can_await() {
            saw_unary = true;
            self.parse_await_expression(no_in)?
        } else if self.token.is_prefix() {
            let is_update = matches!(self.token, Token::Increment | Token::Decrement);
            let op_token = self.token.clone();
            self.advance()?;

            let argument = self.parse_maybe_unary(None, true, is_update, no_in)?;

            if let Some(refs) = refs.as_deref_mut() {
                self.check_expression_errors(refs)?;
            }

            if is_update {
                self.check_lval_simple_expr(&argument, BindingKind::None)?;
            } else if self.in_strict_mode
                && op_token == Token::Delete
                && matches!(argument.as_ref(), Expression::Id(_))
            {
                let loc = self.mark_loc(start_pos);
                self.raise_recoverable(loc, ParseError::DeleteIdentifierInStrictMode)?;
            } else {
                saw_unary = true;
            }

            let loc = self.mark_loc(start_pos);
            if is_update {
                let operator = if op_token == Token::Increment {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                };
                p(Expression::Update(UpdateExpression { loc, operator, argument, is_prefix: true }))
            } else {
                let operator = Self::unary_operator_for_token(&op_token);
                p(Expression::Unary(UnaryExpression { loc, operator, argument }))
            }
        } else {
            let expr = self.parse_expression_subscripts(refs.as_deref_mut(), no_in)?;
            if refs.as_deref().map_or(false, |refs| refs.has_expression_errors()) {
                return Ok(expr);
            }

            let mut expr = expr;
            while self.token.is_postfix() && !self.can_insert_semicolon() {
                self.check_lval_simple_expr(&expr, BindingKind::None)?;
                let operator = if self.token == Token::Increment {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                };
                self.advance()?;
                let loc = self.mark_loc(start_pos);
                expr = p(Expression::Update(UpdateExpression {
                    loc,
                    operator,
                    argument: expr,
                    is_prefix: false,
                }));
            }

            expr
        };

        // Exponentiation is right associative and may not directly follow a unary operator
        if !inc_dec && self.ecma_version >= 7 && self.token == Token::Exponent {
            if saw_unary {
                return self.error(self.loc, ParseError::UnexpectedToken(Token::Exponent));
            }

            self.advance()?;
            let right = self.parse_maybe_unary(None, false, false, no_in)?;
            let loc = self.mark_loc(start_pos);
            expr = p(Expression::Binary(BinaryExpression {
                loc,
                operator: BinaryOperator::Exponent,
                left: expr,
                right,
            }));
        }

        Ok(expr)
    }

    fn parse_await_expression(&mut self, no_in: bool) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        if self.await_pos.is_none() {
            self.await_pos = Some(start_pos);
        }

        self.advance()?;
        let argument = self.parse_maybe_unary(None, true, false, no_in)?;
        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Await(AwaitExpression { loc, argument })))
    }

    fn parse_expression_subscripts(
        &mut self,
        mut refs: Option<&mut DestructuringErrors>,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let expr = self.parse_expression_atom(refs.as_deref_mut(), no_in)?;

        // An arrow function consumes everything after it, unless it was a parenthesized
        // expression that merely ends in an arrow body
        if matches!(expr.as_ref(), Expression::ArrowFunction(_)) {
            let prev_text = &self.lexer.source.contents[self.prev_loc.to_range()];
            if prev_text != ")" {
                return Ok(expr);
            }
        }

        let result = self.parse_subscripts(expr, start_pos, false, no_in)?;

        if let Some(refs) = refs {
            if matches!(result.as_ref(), Expression::Member(_)) {
                let result_start = result.loc().start;
                if refs.parenthesized_assign.map_or(false, |loc| loc.start >= result_start) {
                    refs.parenthesized_assign = None;
                }
                if refs.parenthesized_bind.map_or(false, |loc| loc.start >= result_start) {
                    refs.parenthesized_bind = None;
                }
                if refs.trailing_comma.map_or(false, |loc| loc.start >= result_start) {
                    refs.trailing_comma = None;
                }
            }
        }

        Ok(result)
    }

    /// Subscript-level expression with no surrounding cover grammar, used for class heritage.
    fn parse_expression_subscripts_plain(&mut self) -> ParseResult<P<Expression>> {
        self.parse_expression_subscripts(None, false)
    }

    /// Subscript-level expression for the left hand side of a for-await-of head.
    fn parse_expression_subscripts_only(
        &mut self,
        refs: &mut DestructuringErrors,
    ) -> ParseResult<P<Expression>> {
        self.parse_expression_subscripts(Some(refs), true)
    }

    fn parse_subscripts(
        &mut self,
        base: P<Expression>,
        start_pos: Pos,
        no_calls: bool,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        let base_loc = base.loc();
        let maybe_async_arrow = self.ecma_version >= 8
            && matches!(base.as_ref(), Expression::Id(id) if id.name == "async")
            && self.prev_loc.end == base_loc.end
            && !self.can_insert_semicolon()
            && base_loc.end - base_loc.start == 5
            && self.potential_arrow_at == Some(base_loc.start);

        let mut base = base;
        let mut optional_chained = false;

        loop {
            let optional = self.ecma_version >= 11 && self.token == Token::QuestionDot;
            if optional {
                if no_calls {
                    return self.error(self.loc, ParseError::OptionalChainNew);
                }
                self.advance()?;
                optional_chained = true;
            }

            let computed = if self.token == Token::LeftBracket {
                self.advance()?;
                true
            } else {
                false
            };

            let is_member = computed
                || (optional && self.token != Token::LeftParen && self.token != Token::BackQuote)
                || (!optional && self.token == Token::Period);

            if is_member {
                if !computed && !optional {
                    // Consume the period
                    self.advance()?;
                }

                let property = if computed {
                    let property = self.parse_expression(false, None)?;
                    self.expect(Token::RightBracket)?;
                    property
                } else {
                    p(Expression::Id(self.parse_identifier_name()?))
                };

                let loc = self.mark_loc(start_pos);
                base = p(Expression::Member(MemberExpression {
                    loc,
                    object: base,
                    property,
                    is_computed: computed,
                    is_optional: optional,
                }));
                continue;
            }

            if !no_calls && self.token == Token::LeftParen {
                let old_yield_pos = self.yield_pos.take();
                let old_await_pos = self.await_pos.take();
                let old_await_ident_pos = self.await_ident_pos.take();

                let mut refs = DestructuringErrors::default();
                self.advance()?;
                let args = self.parse_expression_list(
                    Token::RightParen,
                    self.ecma_version >= 8,
                    false,
                    Some(&mut refs),
                )?;

                if maybe_async_arrow
                    && !optional
                    && !self.can_insert_semicolon()
                    && self.token == Token::Arrow
                {
                    self.check_pattern_errors(&refs, false)?;
                    self.check_yield_await_in_default_params()?;
                    if let Some(pos) = self.await_ident_pos {
                        let loc = Loc { start: pos, end: pos };
                        return self.error(loc, ParseError::AwaitIdentifierInAsync);
                    }
                    self.yield_pos = old_yield_pos;
                    self.await_pos = old_await_pos;
                    self.await_ident_pos = old_await_ident_pos;

                    self.advance()?;
                    let items = Self::elements_to_paren_items(args);
                    return self.parse_arrow_expression(start_pos, items, true, no_in);
                }

                self.check_expression_errors(&refs)?;
                self.yield_pos = old_yield_pos.or(self.yield_pos);
                self.await_pos = old_await_pos.or(self.await_pos);
                self.await_ident_pos = old_await_ident_pos.or(self.await_ident_pos);

                let arguments = Self::elements_to_call_arguments(args);
                let loc = self.mark_loc(start_pos);
                base = p(Expression::Call(CallExpression {
                    loc,
                    callee: base,
                    arguments,
                    is_optional: optional,
                }));
                continue;
            }

            if self.ecma_version >= 6 && self.token == Token::BackQuote {
                if optional || optional_chained {
                    return self.error(self.loc, ParseError::OptionalChainTemplate);
                }

                let quasi = self.parse_template(true)?;
                let loc = self.mark_loc(start_pos);
                base = p(Expression::TaggedTemplate(TaggedTemplateExpression {
                    loc,
                    tag: base,
                    quasi: p(quasi),
                }));
                continue;
            }

            break;
        }

        // A single chain node wraps the outermost expression of a chain containing any `?.`
        if optional_chained {
            let loc = self.mark_loc(start_pos);
            base = p(Expression::Chain(ChainExpression { loc, expression: base }));
        }

        Ok(base)
    }

    fn elements_to_paren_items(elements: Vec<ArrayElement>) -> Vec<ParenItem> {
        elements
            .into_iter()
            .map(|element| match element {
                ArrayElement::Expression(expr) => ParenItem::Expression(expr),
                ArrayElement::Spread(spread) => ParenItem::SpreadExpression(spread),
                ArrayElement::Hole => unreachable!("holes are not allowed in argument lists"),
            })
            .collect()
    }

    fn elements_to_call_arguments(elements: Vec<ArrayElement>) -> Vec<CallArgument> {
        elements
            .into_iter()
            .map(|element| match element {
                ArrayElement::Expression(expr) => CallArgument::Expression(expr),
                ArrayElement::Spread(spread) => CallArgument::Spread(spread),
                ArrayElement::Hole => unreachable!("holes are not allowed in argument lists"),
            })
            .collect()
    }

    fn parse_expression_atom(
        &mut self,
        mut refs: Option<&mut DestructuringErrors>,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        match &self.token {
            Token::Super => self.parse_super_expression(),
            Token::This => {
                let loc = self.loc;
                self.advance()?;
                Ok(p(Expression::This(loc)))
            }
            Token::Identifier(_) => self.parse_identifier_or_arrow(no_in),
            Token::RegExpLiteral { pattern, flags } => {
                let loc = self.loc;
                let pattern = pattern.clone();
                let flags = flags.clone();
                self.advance()?;
                Ok(p(Expression::RegExp(RegExpLiteral { loc, pattern, flags })))
            }
            Token::NumberLiteral(value) => {
                let loc = self.loc;
                let value = *value;
                self.advance()?;
                Ok(p(Expression::Number(NumberLiteral { loc, value })))
            }
            Token::BigIntLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(p(Expression::BigInt(BigIntLiteral { loc, value })))
            }
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                Ok(p(Expression::String(StringLiteral { loc, value })))
            }
            Token::Null => {
                let loc = self.loc;
                self.advance()?;
                Ok(p(Expression::Null(loc)))
            }
            Token::True | Token::False => {
                let loc = self.loc;
                let value = self.token == Token::True;
                self.advance()?;
                Ok(p(Expression::Boolean(BooleanLiteral { loc, value })))
            }
            Token::LeftParen => {
                let paren_loc = self.loc;
                let can_be_arrow = self.potential_arrow_at == Some(paren_loc.start);
                let expr = self.parse_paren_and_distinguish(can_be_arrow, no_in)?;

                if let Some(refs) = refs.as_deref_mut() {
                    if refs.parenthesized_assign.is_none()
                        && !Self::is_simple_assign_target(&expr)
                    {
                        refs.parenthesized_assign = Some(paren_loc);
                    }
                    if refs.parenthesized_bind.is_none() {
                        refs.parenthesized_bind = Some(paren_loc);
                    }
                }

                Ok(expr)
            }
            Token::LeftBracket => {
                let start_pos = self.current_start_pos();
                self.advance()?;
                let elements =
                    self.parse_expression_list(Token::RightBracket, true, true, refs.as_deref_mut())?;
                let loc = self.mark_loc(start_pos);
                Ok(p(Expression::Array(ArrayExpression { loc, elements })))
            }
            Token::LeftBrace => self.parse_object_literal(refs),
            Token::Function => {
                let start_pos = self.current_start_pos();
                let function = self.parse_function_expression_rest(start_pos, false)?;
                Ok(p(Expression::Function(function)))
            }
            Token::Class => Ok(p(Expression::Class(self.parse_class(false, false)?))),
            Token::New => self.parse_new_expression(),
            Token::BackQuote if self.ecma_version >= 6 => {
                Ok(p(Expression::Template(self.parse_template(false)?)))
            }
            Token::Import if self.ecma_version >= 11 => self.parse_import_expression(),
            _ => self.unexpected(),
        }
    }

    fn parse_identifier_or_arrow(&mut self, no_in: bool) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let can_be_arrow = self.potential_arrow_at == Some(start_pos);
        let contains_esc = self.token_contains_esc;
        let id = self.parse_identifier()?;

        // `async function` in expression position
        if self.ecma_version >= 8
            && !contains_esc
            && id.name == "async"
            && !self.can_insert_semicolon()
            && self.token == Token::Function
        {
            // The function keyword was scanned as if in statement position
            self.lexer.override_context(ContextKind::FunctionExpression);
            let function = self.parse_function_expression_rest(start_pos, true)?;
            return Ok(p(Expression::Function(function)));
        }

        if can_be_arrow && !self.can_insert_semicolon() {
            if self.token == Token::Arrow {
                self.advance()?;
                let items = vec![ParenItem::Expression(Expression::Id(id))];
                return self.parse_arrow_expression(start_pos, items, false, no_in);
            }

            // `async id => body`
            if self.ecma_version >= 8
                && id.name == "async"
                && !contains_esc
                && matches!(self.token, Token::Identifier(_))
                && !(self.potential_arrow_in_for_await && self.is_contextual("of"))
            {
                let param = self.parse_identifier()?;
                if self.can_insert_semicolon() || self.token != Token::Arrow {
                    return self.unexpected();
                }
                self.advance()?;
                let items = vec![ParenItem::Expression(Expression::Id(param))];
                return self.parse_arrow_expression(start_pos, items, true, no_in);
            }
        }

        Ok(p(Expression::Id(id)))
    }

    fn parse_super_expression(&mut self) -> ParseResult<P<Expression>> {
        let loc = self.loc;

        if !self.scopes.allow_super() {
            return self.error(loc, ParseError::SuperOutsideMethod);
        }

        self.advance()?;

        if self.token == Token::LeftParen && !self.scopes.allow_direct_super() {
            return self.error(loc, ParseError::SuperCallOutsideDerivedConstructor);
        }
        if !matches!(self.token, Token::Period | Token::LeftBracket | Token::LeftParen) {
            return self.unexpected();
        }

        Ok(p(Expression::Super(loc)))
    }

    fn parse_new_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let new_loc = self.loc;
        self.advance()?;

        // new.target meta property
        if self.ecma_version >= 6 && self.token == Token::Period {
            self.advance()?;
            let contains_esc = self.token_contains_esc;
            let property = self.parse_identifier_name()?;

            if property.name != "target" {
                self.raise_recoverable(property.loc, ParseError::ExpectedNewTarget)?;
            }
            if contains_esc {
                let loc = self.mark_loc(start_pos);
                self.raise_recoverable(
                    loc,
                    ParseError::MetaPropertyEscape("new.target".to_owned()),
                )?;
            }
            if !self.scopes.in_non_arrow_function() {
                let loc = self.mark_loc(start_pos);
                self.raise_recoverable(loc, ParseError::NewTargetOutsideFunction)?;
            }

            let loc = self.mark_loc(start_pos);
            let meta = Identifier { loc: new_loc, name: "new".to_owned() };
            return Ok(p(Expression::MetaProperty(MetaProperty {
                loc,
                meta: p(meta),
                property: p(property),
            })));
        }

        let callee_start_pos = self.current_start_pos();
        let atom = self.parse_expression_atom(None, false)?;
        // Calls are disallowed so that parenthesized arguments attach to this new instead
        let callee = self.parse_subscripts(atom, callee_start_pos, true, false)?;

        if matches!(callee.as_ref(), Expression::ImportCall(_)) {
            return self.error(callee.loc(), ParseError::UnexpectedKeyword("import".to_owned()));
        }

        let arguments = if self.token == Token::LeftParen {
            self.advance()?;
            let args =
                self.parse_expression_list(Token::RightParen, self.ecma_version >= 8, false, None)?;
            Self::elements_to_call_arguments(args)
        } else {
            vec![]
        };

        let loc = self.mark_loc(start_pos);
        Ok(p(Expression::New(NewExpression { loc, callee, arguments })))
    }

    fn parse_import_expression(&mut self) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        let import_loc = self.loc;

        if self.token_contains_esc {
            self.raise_recoverable(
                import_loc,
                ParseError::EscapeSequenceInKeyword("import".to_owned()),
            )?;
        }

        self.advance_ignoring_escaped_keyword()?;

        if self.token == Token::LeftParen {
            self.advance()?;
            let source = self.parse_assignment_expression(false, None)?;

            if !self.eat(Token::RightParen)? {
                let error_loc = self.loc;
                if self.eat(Token::Comma)? && self.eat(Token::RightParen)? {
                    self.raise_recoverable(error_loc, ParseError::DynamicImportTrailingComma)?;
                } else {
                    let token = self.token.clone();
                    return self.error_unexpected_token(error_loc, &token);
                }
            }

            let loc = self.mark_loc(start_pos);
            return Ok(p(Expression::ImportCall(ImportExpression { loc, source })));
        }

        if self.token == Token::Period {
            self.advance()?;
            let contains_esc = self.token_contains_esc;
            let property = self.parse_identifier_name()?;

            if property.name != "meta" {
                self.raise_recoverable(property.loc, ParseError::ExpectedImportMeta)?;
            }
            if contains_esc {
                let loc = self.mark_loc(start_pos);
                self.raise_recoverable(
                    loc,
                    ParseError::MetaPropertyEscape("import.meta".to_owned()),
                )?;
            }
            if !self.in_module && !self.options.allow_import_export_everywhere {
                let loc = self.mark_loc(start_pos);
                self.raise_recoverable(loc, ParseError::ImportMetaOutsideModule)?;
            }

            let loc = self.mark_loc(start_pos);
            let meta = Identifier { loc: import_loc, name: "import".to_owned() };
            return Ok(p(Expression::MetaProperty(MetaProperty {
                loc,
                meta: p(meta),
                property: p(property),
            })));
        }

        self.unexpected()
    }

    fn is_simple_assign_target(expr: &Expression) -> bool {
        match expr {
            Expression::Paren(paren) => Self::is_simple_assign_target(&paren.expression),
            Expression::Id(_) | Expression::Member(_) => true,
            _ => false,
        }
    }

    fn finish_paren(&self, expr: P<Expression>, start_pos: Pos) -> P<Expression> {
        if self.options.preserve_parens {
            let loc = self.mark_loc(start_pos);
            p(Expression::Paren(ParenthesizedExpression { loc, expression: expr }))
        } else {
            expr
        }
    }

    /// Parse a parenthesized construct: either a parenthesized (sequence) expression or the
    /// parameter list of an arrow function, which cannot be known until the closing paren.
    /// Both readings are parsed at once, recording positions that are errors in one of them.
    fn parse_paren_and_distinguish(
        &mut self,
        can_be_arrow: bool,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        if self.ecma_version < 6 {
            let expr = self.parse_expression(false, None)?;
            self.expect(Token::RightParen)?;
            return Ok(self.finish_paren(expr, start_pos));
        }

        let allow_trailing_comma = self.ecma_version >= 8;
        let mut refs = DestructuringErrors::default();
        let old_yield_pos = self.yield_pos.take();
        let old_await_pos = self.await_pos.take();

        let mut items: Vec<ParenItem> = vec![];
        let mut first = true;
        let mut last_is_comma = false;
        let mut spread_loc: Option<Loc> = None;

        while self.token != Token::RightParen {
            if first {
                first = false;
            } else {
                self.expect(Token::Comma)?;
            }

            if allow_trailing_comma && self.token == Token::RightParen {
                let pos = self.prev_loc.start;
                if let Some(on_trailing_comma) = self.options.on_trailing_comma.as_mut() {
                    on_trailing_comma(pos);
                }
                last_is_comma = true;
                break;
            }

            if self.token == Token::Spread {
                spread_loc = Some(self.loc);
                let rest = self.parse_rest_binding()?;
                items.push(ParenItem::Rest(rest));
                if self.token == Token::Comma {
                    return self.error(self.loc, ParseError::TrailingCommaAfterRest);
                }
                break;
            }

            let expr = self.parse_assignment_expression(false, Some(&mut refs))?;
            items.push(ParenItem::Expression(*expr));
        }

        self.expect(Token::RightParen)?;

        if can_be_arrow && !self.can_insert_semicolon() && self.token == Token::Arrow {
            self.check_pattern_errors(&refs, false)?;
            self.check_yield_await_in_default_params()?;
            self.yield_pos = old_yield_pos;
            self.await_pos = old_await_pos;

            self.advance()?;
            return self.parse_arrow_expression(start_pos, items, false, no_in);
        }

        // Not an arrow function after all, so the arrow-only shapes become errors
        if items.is_empty() || last_is_comma {
            return self.error(self.prev_loc, ParseError::UnexpectedToken(Token::RightParen));
        }
        if let Some(loc) = spread_loc {
            return self.error(loc, ParseError::UnexpectedToken(Token::Spread));
        }
        self.check_expression_errors(&refs)?;

        self.yield_pos = old_yield_pos.or(self.yield_pos);
        self.await_pos = old_await_pos.or(self.await_pos);

        let expr = if items.len() > 1 {
            let expressions: Vec<Expression> = items
                .into_iter()
                .map(|item| match item {
                    ParenItem::Expression(expr) => expr,
                    _ => unreachable!("rest elements were rejected above"),
                })
                .collect();
            let loc = Loc {
                start: expressions.first().unwrap().loc().start,
                end: expressions.last().unwrap().loc().end,
            };
            p(Expression::Sequence(SequenceExpression { loc, expressions }))
        } else {
            match items.into_iter().next().unwrap() {
                ParenItem::Expression(expr) => p(expr),
                _ => unreachable!("rest elements were rejected above"),
            }
        };

        Ok(self.finish_paren(expr, start_pos))
    }

    /// Build an arrow function from parameter items collected by a cover parse. The items are
    /// rewritten to binding patterns inside the arrow's scope.
    fn parse_arrow_expression(
        &mut self,
        start_pos: Pos,
        items: Vec<ParenItem>,
        is_async: bool,
        no_in: bool,
    ) -> ParseResult<P<Expression>> {
        let old_yield_pos = self.yield_pos.take();
        let old_await_pos = self.await_pos.take();
        let old_await_ident_pos = self.await_ident_pos.take();

        self.scopes
            .enter(function_scope_flags(is_async, false) | ScopeFlags::ARROW);

        let mut params = vec![];
        for item in items {
            match item {
                ParenItem::Expression(expr) => {
                    let pattern = self.reparse_expression_as_pattern(expr, true, None)?;
                    params.push(FunctionParam::Pattern(pattern));
                }
                ParenItem::Rest(rest) => params.push(FunctionParam::Rest(rest)),
                ParenItem::SpreadExpression(spread) => {
                    let loc = spread.loc;
                    let argument = self.reparse_expression_as_pattern(*spread.argument, true, None)?;
                    if matches!(argument, Pattern::Assign(_)) {
                        return self.error(loc, ParseError::RestDefaultValue);
                    }
                    params.push(FunctionParam::Rest(RestElement { loc, argument: p(argument) }));
                }
            }
        }

        let (body, has_use_strict_directive, is_strict_mode) =
            self.parse_function_body(start_pos, &params, None, true, false, no_in)?;

        self.scopes.exit();

        self.yield_pos = old_yield_pos;
        self.await_pos = old_await_pos;
        self.await_ident_pos = old_await_ident_pos;

        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::ArrowFunction(Function {
            loc,
            id: None,
            params,
            body: p(body),
            is_async,
            is_generator: false,
            has_use_strict_directive,
            is_strict_mode,
        })))
    }

    // Templates

    fn parse_template(&mut self, is_tagged: bool) -> ParseResult<TemplateLiteral> {
        let start_pos = self.current_start_pos();
        self.expect(Token::BackQuote)?;

        let mut quasis = vec![];
        let mut expressions = vec![];

        loop {
            let element = self.parse_template_element(is_tagged)?;
            let is_tail = element.is_tail;
            quasis.push(element);

            if is_tail {
                self.expect(Token::BackQuote)?;
                break;
            }

            self.expect(Token::DollarBrace)?;
            expressions.push(*self.parse_expression(false, None)?);
            self.expect(Token::RightBrace)?;
        }

        let loc = self.mark_loc(start_pos);

        Ok(TemplateLiteral { loc, quasis, expressions })
    }

    fn parse_template_element(&mut self, is_tagged: bool) -> ParseResult<TemplateElement> {
        let loc = self.loc;
        let (raw, cooked) = match &self.token {
            Token::TemplateChunk { raw, cooked } => (raw.clone(), cooked.clone()),
            _ => return self.unexpected(),
        };

        // An invalid escape sequence is only permitted in tagged templates, where the cooked
        // value is simply absent
        if cooked.is_none() && !is_tagged {
            self.raise_recoverable(loc, ParseError::BadTemplateEscape)?;
        }

        self.advance()?;
        let is_tail = self.token == Token::BackQuote;

        Ok(TemplateElement { loc, raw, cooked, is_tail })
    }

    // Object literals

    fn parse_object_literal(
        &mut self,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<P<Expression>> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut properties: Vec<Property> = vec![];
        let mut proto_seen = false;
        let mut es5_hash: HashMap<String, (bool, bool, bool)> = HashMap::new();
        let mut first = true;

        loop {
            if self.eat(Token::RightBrace)? {
                break;
            }

            if first {
                first = false;
            } else {
                self.expect(Token::Comma)?;
                if self.ecma_version >= 5 && self.token == Token::RightBrace {
                    let pos = self.prev_loc.start;
                    if let Some(on_trailing_comma) = self.options.on_trailing_comma.as_mut() {
                        on_trailing_comma(pos);
                    }
                    self.advance()?;
                    break;
                }
            }

            let property = self.parse_property(refs.as_deref_mut())?;
            self.check_prop_clash(&property, &mut proto_seen, &mut es5_hash, refs.as_deref_mut())?;
            properties.push(property);
        }

        let loc = self.mark_loc(start_pos);

        Ok(p(Expression::Object(ObjectExpression { loc, properties })))
    }

    fn parse_property(
        &mut self,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<Property> {
        let start_pos = self.current_start_pos();

        if self.ecma_version >= 9 && self.token == Token::Spread {
            self.advance()?;
            let argument = self.parse_assignment_expression(false, refs.as_deref_mut())?;

            // A comma after a spread is invalid if this literal resolves to a pattern
            if self.token == Token::Comma {
                if let Some(refs) = refs.as_deref_mut() {
                    if refs.trailing_comma.is_none() {
                        refs.trailing_comma = Some(self.loc);
                    }
                }
            }

            let loc = self.mark_loc(start_pos);
            return Ok(Property {
                loc,
                key: argument,
                value: None,
                is_computed: false,
                is_method: false,
                is_shorthand: false,
                kind: PropertyKind::Spread,
            });
        }

        let mut is_generator = false;
        if self.ecma_version >= 6 {
            is_generator = self.eat(Token::Multiply)?;
        }

        let contains_esc = self.token_contains_esc;
        let (mut key, mut is_computed) = self.parse_property_name()?;

        let mut is_async = false;
        if !contains_esc
            && self.ecma_version >= 8
            && !is_generator
            && self.is_async_prop(&key, is_computed)
        {
            is_async = true;
            is_generator = self.ecma_version >= 9 && self.eat(Token::Multiply)?;
            let (next_key, next_computed) = self.parse_property_name()?;
            key = next_key;
            is_computed = next_computed;
        }

        self.parse_property_value(start_pos, key, is_computed, is_generator, is_async, contains_esc, refs)
    }

    fn is_async_prop(&self, key: &Expression, is_computed: bool) -> bool {
        if is_computed || !matches!(key, Expression::Id(id) if id.name == "async") {
            return false;
        }
        if self.lexer.is_new_line_before_current() {
            return false;
        }

        match &self.token {
            Token::Identifier(_)
            | Token::NumberLiteral(_)
            | Token::BigIntLiteral(_)
            | Token::StringLiteral(_)
            | Token::LeftBracket => true,
            Token::Multiply => self.ecma_version >= 9,
            token => token.is_keyword(),
        }
    }

    fn parse_property_value(
        &mut self,
        start_pos: Pos,
        key: P<Expression>,
        is_computed: bool,
        is_generator: bool,
        is_async: bool,
        contains_esc: bool,
        refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<Property> {
        if (is_generator || is_async) && self.token == Token::Colon {
            return self.unexpected();
        }

        // Ordinary `key: value` property
        if self.eat(Token::Colon)? {
            let value = self.parse_assignment_expression(false, refs)?;
            let loc = self.mark_loc(start_pos);
            return Ok(Property {
                loc,
                key,
                value: Some(value),
                is_computed,
                is_method: false,
                is_shorthand: false,
                kind: PropertyKind::Init,
            });
        }

        // Method shorthand
        if self.ecma_version >= 6 && self.token == Token::LeftParen {
            let value = self.parse_method(is_generator, is_async, false)?;
            let loc = self.mark_loc(start_pos);
            return Ok(Property {
                loc,
                key,
                value: Some(p(Expression::Function(value))),
                is_computed,
                is_method: true,
                is_shorthand: false,
                kind: PropertyKind::Init,
            });
        }

        // Getters and setters
        let accessor_kind = match key.as_ref() {
            Expression::Id(id)
                if !contains_esc
                    && self.ecma_version >= 5
                    && !is_computed
                    && !matches!(
                        self.token,
                        Token::Comma | Token::RightBrace | Token::Equals
                    ) =>
            {
                match id.name.as_str() {
                    "get" => Some(PropertyKind::Get),
                    "set" => Some(PropertyKind::Set),
                    _ => None,
                }
            }
            _ => None,
        };

        if let Some(kind) = accessor_kind {
            if is_generator || is_async {
                return self.unexpected();
            }

            let (accessor_key, accessor_computed) = self.parse_property_name()?;
            let value = self.parse_method(false, false, false)?;
            self.check_accessor_params(
                kind == PropertyKind::Get,
                kind == PropertyKind::Set,
                &value,
            )?;

            let loc = self.mark_loc(start_pos);
            return Ok(Property {
                loc,
                key: accessor_key,
                value: Some(p(Expression::Function(value))),
                is_computed: accessor_computed,
                is_method: false,
                is_shorthand: false,
                kind,
            });
        }

        // Shorthand property, possibly with a default that is only valid in patterns
        if self.ecma_version >= 6 && !is_computed {
            if let Expression::Id(id) = key.as_ref() {
                if is_generator || is_async {
                    return self.unexpected();
                }

                let (id_loc, id_name) = (id.loc, id.name.clone());
                self.check_unreserved(id_loc, &id_name)?;
                if id_name == "await" && self.await_ident_pos.is_none() {
                    self.await_ident_pos = Some(id_loc.start);
                }

                let value = if self.token == Token::Equals && refs.is_some() {
                    if let Some(refs) = refs {
                        if refs.shorthand_assign.is_none() {
                            refs.shorthand_assign = Some(self.loc);
                        }
                    }

                    self.advance()?;
                    let right = self.parse_assignment_expression(false, None)?;
                    let loc = self.mark_loc(id_loc.start);
                    let copy = Identifier { loc: id_loc, name: id_name };
                    Some(p(Expression::Assign(AssignmentExpression {
                        loc,
                        operator: AssignmentOperator::Equals,
                        left: p(Pattern::Id(copy)),
                        right,
                    })))
                } else {
                    None
                };

                let loc = self.mark_loc(start_pos);
                return Ok(Property {
                    loc,
                    key,
                    value,
                    is_computed: false,
                    is_method: false,
                    is_shorthand: true,
                    kind: PropertyKind::Init,
                });
            }
        }

        self.unexpected()
    }

    fn parse_property_name(&mut self) -> ParseResult<(P<Expression>, bool)> {
        if self.ecma_version >= 6 && self.token == Token::LeftBracket {
            self.advance()?;
            let key = self.parse_assignment_expression(false, None)?;
            self.expect(Token::RightBracket)?;
            return Ok((key, true));
        }

        let key = match &self.token {
            Token::NumberLiteral(value) => {
                let loc = self.loc;
                let value = *value;
                self.advance()?;
                p(Expression::Number(NumberLiteral { loc, value }))
            }
            Token::BigIntLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                p(Expression::BigInt(BigIntLiteral { loc, value }))
            }
            Token::StringLiteral(value) => {
                let loc = self.loc;
                let value = value.clone();
                self.advance()?;
                p(Expression::String(StringLiteral { loc, value }))
            }
            _ => p(Expression::Id(self.parse_identifier_name()?)),
        };

        Ok((key, false))
    }

    fn property_key_name(property: &Property) -> Option<String> {
        if property.is_computed {
            return None;
        }

        match property.key.as_ref() {
            Expression::Id(id) => Some(id.name.clone()),
            Expression::String(literal) => Some(literal.value.clone()),
            Expression::Number(literal) => Some(format!("{}", literal.value)),
            _ => None,
        }
    }

    fn check_prop_clash(
        &mut self,
        property: &Property,
        proto_seen: &mut bool,
        es5_hash: &mut HashMap<String, (bool, bool, bool)>,
        refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<()> {
        if property.kind == PropertyKind::Spread {
            return Ok(());
        }

        if self.ecma_version >= 6 {
            if property.is_computed || property.is_method || property.is_shorthand {
                return Ok(());
            }

            // Only the __proto__ slot can clash from ES2015 on
            let name = match Self::property_key_name(property) {
                Some(name) => name,
                None => return Ok(()),
            };

            if name == "__proto__" && property.kind == PropertyKind::Init {
                if *proto_seen {
                    match refs {
                        Some(refs) => {
                            if refs.double_proto.is_none() {
                                refs.double_proto = Some(property.key.loc());
                            }
                        }
                        None => {
                            self.raise_recoverable(
                                property.key.loc(),
                                ParseError::DuplicateProtoProperty,
                            )?;
                        }
                    }
                }
                *proto_seen = true;
            }

            return Ok(());
        }

        let name = match Self::property_key_name(property) {
            Some(name) => name,
            None => return Ok(()),
        };

        let entry = *es5_hash.get(&name).unwrap_or(&(false, false, false));
        let (init, get, set) = entry;

        let redefinition = match property.kind {
            PropertyKind::Init => (self.in_strict_mode && init) || get || set,
            PropertyKind::Get => init || get,
            PropertyKind::Set => init || set,
            PropertyKind::Spread => false,
        };

        if redefinition {
            self.raise_recoverable(property.key.loc(), ParseError::RedefinitionOfProperty)?;
        }

        let updated = match property.kind {
            PropertyKind::Init => (true, get, set),
            PropertyKind::Get => (init, true, set),
            PropertyKind::Set => (init, get, true),
            PropertyKind::Spread => entry,
        };
        es5_hash.insert(name, updated);

        Ok(())
    }

    // Expression lists

    fn parse_expression_list(
        &mut self,
        close: Token,
        allow_trailing_comma: bool,
        allow_empty: bool,
        mut refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<Vec<ArrayElement>> {
        let mut elements = vec![];
        let mut first = true;

        loop {
            if self.eat(close.clone())? {
                break;
            }

            if !first {
                self.expect(Token::Comma)?;
                if allow_trailing_comma && self.token == close {
                    let pos = self.prev_loc.start;
                    if let Some(on_trailing_comma) = self.options.on_trailing_comma.as_mut() {
                        on_trailing_comma(pos);
                    }
                    self.advance()?;
                    break;
                }
            } else {
                first = false;
            }

            if allow_empty && self.token == Token::Comma {
                elements.push(ArrayElement::Hole);
                continue;
            }

            if self.token == Token::Spread {
                let spread = self.parse_spread_element(refs.as_deref_mut())?;
                if self.token == Token::Comma {
                    if let Some(refs) = refs.as_deref_mut() {
                        if refs.trailing_comma.is_none() {
                            refs.trailing_comma = Some(self.loc);
                        }
                    }
                }
                elements.push(ArrayElement::Spread(spread));
                continue;
            }

            let expr = self.parse_assignment_expression(false, refs.as_deref_mut())?;
            elements.push(ArrayElement::Expression(*expr));
        }

        Ok(elements)
    }

    fn parse_spread_element(
        &mut self,
        refs: Option<&mut DestructuringErrors>,
    ) -> ParseResult<SpreadElement> {
        let start_pos = self.current_start_pos();
        self.advance()?;
        let argument = self.parse_assignment_expression(false, refs)?;
        let loc = self.mark_loc(start_pos);

        Ok(SpreadElement { loc, argument })
    }

    // Binding patterns

    fn parse_binding_atom(&mut self) -> ParseResult<Pattern> {
        if self.ecma_version >= 6 {
            match self.token {
                Token::LeftBracket => {
                    let start_pos = self.current_start_pos();
                    self.advance()?;
                    let elements =
                        self.parse_binding_list(Token::RightBracket, true, true)?;
                    let loc = self.mark_loc(start_pos);
                    return Ok(Pattern::Array(ArrayPattern { loc, elements }));
                }
                Token::LeftBrace => return self.parse_object_pattern(),
                _ => {}
            }
        }

        Ok(Pattern::Id(self.parse_identifier()?))
    }

    fn parse_binding_list(
        &mut self,
        close: Token,
        allow_empty: bool,
        allow_trailing_comma: bool,
    ) -> ParseResult<Vec<ArrayPatternElement>> {
        let mut elements = vec![];
        let mut first = true;

        loop {
            if self.eat(close.clone())? {
                break;
            }

            if first {
                first = false;
            } else {
                self.expect(Token::Comma)?;
            }

            if allow_empty && self.token == Token::Comma {
                elements.push(ArrayPatternElement::Hole);
                continue;
            }

            if allow_trailing_comma && self.token == close {
                let pos = self.prev_loc.start;
                if let Some(on_trailing_comma) = self.options.on_trailing_comma.as_mut() {
                    on_trailing_comma(pos);
                }
                self.advance()?;
                break;
            }

            if self.token == Token::Spread {
                let rest = self.parse_rest_binding()?;
                elements.push(ArrayPatternElement::Rest(rest));
                if self.token == Token::Comma {
                    return self.error(self.loc, ParseError::TrailingCommaAfterRest);
                }
                self.expect(close)?;
                break;
            }

            let pattern = self.parse_maybe_default()?;
            elements.push(ArrayPatternElement::Pattern(pattern));
        }

        Ok(elements)
    }

    fn parse_rest_binding(&mut self) -> ParseResult<RestElement> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        // Rest arguments were restricted to plain identifiers in ES2015
        if self.ecma_version == 6 && !matches!(self.token, Token::Identifier(_)) {
            return self.unexpected();
        }

        let argument = self.parse_binding_atom()?;
        let loc = self.mark_loc(start_pos);

        Ok(RestElement { loc, argument: p(argument) })
    }

    /// Parse a binding pattern with an optional default value.
    fn parse_maybe_default(&mut self) -> ParseResult<Pattern> {
        let start_pos = self.current_start_pos();
        let left = self.parse_binding_atom()?;

        if self.ecma_version < 6 || !self.eat(Token::Equals)? {
            return Ok(left);
        }

        let right = self.parse_assignment_expression(false, None)?;
        let loc = self.mark_loc(start_pos);

        Ok(Pattern::Assign(AssignmentPattern { loc, left: p(left), right }))
    }

    fn parse_object_pattern(&mut self) -> ParseResult<Pattern> {
        let start_pos = self.current_start_pos();
        self.advance()?;

        let mut properties = vec![];
        let mut first = true;

        loop {
            if self.eat(Token::RightBrace)? {
                break;
            }

            if first {
                first = false;
            } else {
                self.expect(Token::Comma)?;
                if self.ecma_version >= 5 && self.token == Token::RightBrace {
                    let pos = self.prev_loc.start;
                    if let Some(on_trailing_comma) = self.options.on_trailing_comma.as_mut() {
                        on_trailing_comma(pos);
                    }
                    self.advance()?;
                    break;
                }
            }

            if self.ecma_version >= 9 && self.token == Token::Spread {
                let spread_start_pos = self.current_start_pos();
                self.advance()?;
                let argument = self.parse_identifier()?;
                if self.token == Token::Comma {
                    return self.error(self.loc, ParseError::TrailingCommaAfterRest);
                }
                let loc = self.mark_loc(spread_start_pos);
                properties.push(ObjectPatternProperty {
                    loc,
                    key: None,
                    value: p(Pattern::Id(argument)),
                    is_computed: false,
                    is_rest: true,
                });
                continue;
            }

            let prop_start_pos = self.current_start_pos();
            let (key, is_computed) = self.parse_property_name()?;

            if !is_computed && self.token != Token::Colon {
                // Shorthand binding, possibly with a default
                let id = match *key {
                    Expression::Id(id) => id,
                    _ => return self.unexpected(),
                };

                self.check_unreserved(id.loc, &id.name)?;
                if id.name == "await" && self.await_ident_pos.is_none() {
                    self.await_ident_pos = Some(id.loc.start);
                }

                let value = if self.eat(Token::Equals)? {
                    let right = self.parse_assignment_expression(false, None)?;
                    let loc = self.mark_loc(id.loc.start);
                    Pattern::Assign(AssignmentPattern {
                        loc,
                        left: p(Pattern::Id(id)),
                        right,
                    })
                } else {
                    Pattern::Id(id)
                };

                let loc = self.mark_loc(prop_start_pos);
                properties.push(ObjectPatternProperty {
                    loc,
                    key: None,
                    value: p(value),
                    is_computed: false,
                    is_rest: false,
                });
                continue;
            }

            self.expect(Token::Colon)?;
            let value = self.parse_maybe_default()?;
            let loc = self.mark_loc(prop_start_pos);
            properties.push(ObjectPatternProperty {
                loc,
                key: Some(key),
                value: p(value),
                is_computed,
                is_rest: false,
            });
        }

        let loc = self.mark_loc(start_pos);

        Ok(Pattern::Object(ObjectPattern { loc, properties }))
    }

    // Cover grammar resolution

    fn check_expression_errors(&mut self, refs: &DestructuringErrors) -> ParseResult<()> {
        if let Some(loc) = refs.shorthand_assign {
            return self.error(loc, ParseError::ShorthandPropertyAssignment);
        }
        if let Some(loc) = refs.double_proto {
            self.raise_recoverable(loc, ParseError::DuplicateProtoProperty)?;
        }

        Ok(())
    }

    fn check_pattern_errors(
        &mut self,
        refs: &DestructuringErrors,
        is_assign: bool,
    ) -> ParseResult<()> {
        if let Some(loc) = refs.trailing_comma {
            self.raise_recoverable(loc, ParseError::TrailingCommaAfterRest)?;
        }

        let parens = if is_assign { refs.parenthesized_assign } else { refs.parenthesized_bind };
        if let Some(loc) = parens {
            self.raise_recoverable(loc, ParseError::ParenthesizedPattern)?;
        }

        Ok(())
    }

    /// Rewrite an expression parsed by a cover grammar into the pattern it denotes, raising
    /// the pattern-side subset of recorded errors. Object and array literals become patterns,
    /// spread becomes rest, and `=`-assignments become defaults.
    fn reparse_expression_as_pattern(
        &mut self,
        expr: Expression,
        is_binding: bool,
        refs: Option<&DestructuringErrors>,
    ) -> ParseResult<Pattern> {
        if self.ecma_version < 6 {
            if let Some(refs) = refs {
                self.check_pattern_errors(refs, true)?;
            }

            return match expr {
                Expression::Id(id) => Ok(Pattern::Id(id)),
                Expression::Member(_) if !is_binding => Ok(Pattern::Expr(p(expr))),
                Expression::Paren(paren) => {
                    self.reparse_expression_as_pattern(*paren.expression, is_binding, None)
                }
                other => self.error(other.loc(), ParseError::AssigningToRvalue),
            };
        }

        match expr {
            Expression::Id(id) => {
                if self.scopes.in_async() && id.name == "await" {
                    return self.error(id.loc, ParseError::AwaitIdentifierInAsync);
                }
                Ok(Pattern::Id(id))
            }
            Expression::Object(object) => {
                if let Some(refs) = refs {
                    self.check_pattern_errors(refs, true)?;
                }

                let mut properties = vec![];
                for property in object.properties {
                    properties.push(self.reparse_property_as_pattern(property, is_binding)?);
                }

                Ok(Pattern::Object(ObjectPattern { loc: object.loc, properties }))
            }
            Expression::Array(array) => {
                if let Some(refs) = refs {
                    self.check_pattern_errors(refs, true)?;
                }

                let element_count = array.elements.len();
                let mut elements = vec![];
                for (index, element) in array.elements.into_iter().enumerate() {
                    match element {
                        ArrayElement::Expression(expr) => {
                            let pattern =
                                self.reparse_expression_as_pattern(expr, is_binding, None)?;
                            elements.push(ArrayPatternElement::Pattern(pattern));
                        }
                        ArrayElement::Spread(spread) => {
                            if index + 1 != element_count {
                                return self.error(spread.loc, ParseError::RestElementNotLast);
                            }
                            let argument = self
                                .reparse_expression_as_pattern(*spread.argument, is_binding, None)?;
                            if matches!(argument, Pattern::Assign(_)) {
                                return self.error(argument.loc(), ParseError::RestDefaultValue);
                            }
                            elements.push(ArrayPatternElement::Rest(RestElement {
                                loc: spread.loc,
                                argument: p(argument),
                            }));
                        }
                        ArrayElement::Hole => elements.push(ArrayPatternElement::Hole),
                    }
                }

                Ok(Pattern::Array(ArrayPattern { loc: array.loc, elements }))
            }
            Expression::Assign(assign) => {
                if assign.operator != AssignmentOperator::Equals {
                    return self.error(assign.left.loc(), ParseError::InvalidDefaultOperator);
                }
                Ok(Pattern::Assign(AssignmentPattern {
                    loc: assign.loc,
                    left: assign.left,
                    right: assign.right,
                }))
            }
            Expression::Paren(paren) => {
                self.reparse_expression_as_pattern(*paren.expression, is_binding, refs)
            }
            Expression::Chain(chain) => {
                self.raise_recoverable(chain.loc, ParseError::OptionalChainAssignment)?;
                Ok(Pattern::Expr(p(Expression::Chain(chain))))
            }
            Expression::Member(_) if !is_binding => Ok(Pattern::Expr(p(expr))),
            other => self.error(other.loc(), ParseError::AssigningToRvalue),
        }
    }

    fn reparse_property_as_pattern(
        &mut self,
        property: Property,
        is_binding: bool,
    ) -> ParseResult<ObjectPatternProperty> {
        match property.kind {
            PropertyKind::Spread => {
                let argument =
                    self.reparse_expression_as_pattern(*property.key, is_binding, None)?;
                if matches!(argument, Pattern::Assign(_)) {
                    return self.error(property.loc, ParseError::RestDefaultValue);
                }

                Ok(ObjectPatternProperty {
                    loc: property.loc,
                    key: None,
                    value: p(argument),
                    is_computed: false,
                    is_rest: true,
                })
            }
            PropertyKind::Get | PropertyKind::Set => {
                self.error(property.key.loc(), ParseError::ObjectPatternAccessor)
            }
            PropertyKind::Init => {
                let value = match property.value {
                    Some(value) => {
                        self.reparse_expression_as_pattern(*value, is_binding, None)?
                    }
                    // A plain shorthand property binds its key name
                    None => match &*property.key {
                        Expression::Id(id) => {
                            self.reparse_expression_as_pattern(Expression::Id(id.clone()), is_binding, None)?
                        }
                        _ => unreachable!("shorthand properties always have identifier keys"),
                    },
                };

                let key = if property.is_shorthand { None } else { Some(property.key) };

                Ok(ObjectPatternProperty {
                    loc: property.loc,
                    key,
                    value: p(value),
                    is_computed: property.is_computed,
                    is_rest: false,
                })
            }
        }
    }

    // Assignment target and binding validation

    fn check_lval_simple_expr(&mut self, expr: &Expression, kind: BindingKind) -> ParseResult<()> {
        let is_bind = !matches!(kind, BindingKind::None);

        match expr {
            Expression::Id(id) => self.check_lval_identifier(id, kind, &mut None),
            Expression::Chain(chain) => {
                self.raise_recoverable(chain.loc, ParseError::OptionalChainAssignment)
            }
            Expression::Member(member) => {
                if is_bind {
                    self.raise_recoverable(member.loc, ParseError::BindingMemberExpression)?;
                }
                Ok(())
            }
            Expression::Paren(paren) => {
                if is_bind {
                    self.raise_recoverable(paren.loc, ParseError::BindingParenthesizedExpression)?;
                }
                self.check_lval_simple_expr(&paren.expression, kind)
            }
            other => {
                let error = if is_bind {
                    ParseError::BindingRvalue
                } else {
                    ParseError::AssigningToRvalue
                };
                self.error(other.loc(), error)
            }
        }
    }

    fn check_lval_identifier(
        &mut self,
        id: &Identifier,
        kind: BindingKind,
        clashes: &mut Option<HashSet<String>>,
    ) -> ParseResult<()> {
        let is_bind = !matches!(kind, BindingKind::None);

        if self.in_strict_mode && Self::is_strict_bind_reserved(&id.name) {
            self.raise_recoverable(
                id.loc,
                ParseError::StrictModeLVal { name: id.name.clone(), is_binding: is_bind },
            )?;
        }

        if let Some(clashes) = clashes {
            if !clashes.insert(id.name.clone()) {
                self.raise_recoverable(id.loc, ParseError::ArgumentNameClash)?;
            }
        }

        if kind == BindingKind::Lexical && id.name == "let" {
            self.raise_recoverable(id.loc, ParseError::LetNameInLexicalDeclaration)?;
        }

        if !matches!(kind, BindingKind::None | BindingKind::Outside) {
            self.declare_name(&id.name, kind, id.loc)?;
        }

        Ok(())
    }

    fn check_lval_binding_identifier(
        &mut self,
        id: &Identifier,
        kind: BindingKind,
    ) -> ParseResult<()> {
        self.check_lval_identifier(id, kind, &mut None)
    }

    fn check_lval_pattern(
        &mut self,
        pattern: &Pattern,
        kind: BindingKind,
        clashes: &mut Option<HashSet<String>>,
    ) -> ParseResult<()> {
        match pattern {
            Pattern::Id(id) => self.check_lval_identifier(id, kind, clashes),
            Pattern::Array(array) => {
                for element in &array.elements {
                    match element {
                        ArrayPatternElement::Pattern(pattern) => {
                            self.check_lval_pattern(pattern, kind, clashes)?
                        }
                        ArrayPatternElement::Rest(rest) => {
                            self.check_lval_pattern(&rest.argument, kind, clashes)?
                        }
                        ArrayPatternElement::Hole => {}
                    }
                }
                Ok(())
            }
            Pattern::Object(object) => {
                for property in &object.properties {
                    self.check_lval_pattern(&property.value, kind, clashes)?;
                }
                Ok(())
            }
            Pattern::Assign(assign) => self.check_lval_pattern(&assign.left, kind, clashes),
            Pattern::Expr(expr) => self.check_lval_simple_expr(expr, kind),
        }
    }

    // Operator mapping

    fn assignment_operator_for_token(token: &Token) -> AssignmentOperator {
        match token {
            Token::Equals => AssignmentOperator::Equals,
            Token::AddEq => AssignmentOperator::Add,
            Token::SubtractEq => AssignmentOperator::Subtract,
            Token::MultiplyEq => AssignmentOperator::Multiply,
            Token::DivideEq => AssignmentOperator::Divide,
            Token::RemainderEq => AssignmentOperator::Remainder,
            Token::ExponentEq => AssignmentOperator::Exponent,
            Token::AndEq => AssignmentOperator::And,
            Token::OrEq => AssignmentOperator::Or,
            Token::XorEq => AssignmentOperator::Xor,
            Token::ShiftLeftEq => AssignmentOperator::ShiftLeft,
            Token::ShiftRightArithmeticEq => AssignmentOperator::ShiftRightArithmetic,
            Token::ShiftRightLogicalEq => AssignmentOperator::ShiftRightLogical,
            Token::LogicalAndEq => AssignmentOperator::LogicalAnd,
            Token::LogicalOrEq => AssignmentOperator::LogicalOr,
            Token::NullishCoalesceEq => AssignmentOperator::NullishCoalesce,
            _ => unreachable!("not an assignment operator"),
        }
    }

    fn binary_operator_for_token(token: &Token) -> BinaryOperator {
        match token {
            Token::Plus => BinaryOperator::Add,
            Token::Minus => BinaryOperator::Subtract,
            Token::Multiply => BinaryOperator::Multiply,
            Token::Divide => BinaryOperator::Divide,
            Token::Remainder => BinaryOperator::Remainder,
            Token::Exponent => BinaryOperator::Exponent,
            Token::EqEq => BinaryOperator::EqEq,
            Token::NotEq => BinaryOperator::NotEq,
            Token::EqEqEq => BinaryOperator::EqEqEq,
            Token::NotEqEq => BinaryOperator::NotEqEq,
            Token::LessThan => BinaryOperator::LessThan,
            Token::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
            Token::GreaterThan => BinaryOperator::GreaterThan,
            Token::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
            Token::BitwiseAnd => BinaryOperator::And,
            Token::BitwiseOr => BinaryOperator::Or,
            Token::BitwiseXor => BinaryOperator::Xor,
            Token::ShiftLeft => BinaryOperator::ShiftLeft,
            Token::ShiftRightArithmetic => BinaryOperator::ShiftRightArithmetic,
            Token::ShiftRightLogical => BinaryOperator::ShiftRightLogical,
            Token::In => BinaryOperator::In,
            Token::InstanceOf => BinaryOperator::InstanceOf,
            _ => unreachable!("not a binary operator"),
        }
    }

    fn unary_operator_for_token(token: &Token) -> UnaryOperator {
        match token {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Minus,
            Token::LogicalNot => UnaryOperator::LogicalNot,
            Token::BitwiseNot => UnaryOperator::BitwiseNot,
            Token::Typeof => UnaryOperator::TypeOf,
            Token::Void => UnaryOperator::Void,
            Token::Delete => UnaryOperator::Delete,
            _ => unreachable!("not a unary operator"),
        }
    }
}

/// Parse a complete program from a source.
pub fn parse_source(source: &Rc<Source>, options: Options) -> ParseResult<Program> {
    let mut parser = Parser::new(source, 0, options);
    parser.parse_program()
}

/// Parse a single expression starting at the given byte offset.
pub fn parse_expression_at_source(
    source: &Rc<Source>,
    pos: Pos,
    options: Options,
) -> ParseResult<Expression> {
    let mut parser = Parser::new(source, pos, options);
    parser.advance()?;
    let expr = parser.parse_expression(false, None)?;
    Ok(*expr)
}
