//! A hand-written ECMAScript parser. Given a source text, produces a position-annotated
//! syntax tree shaped after the ESTree node set, or a token stream, rejecting syntactically
//! invalid programs with positioned diagnostics.
//!
//! ```
//! use pyrite::{parse, OptionsBuilder};
//!
//! let program = parse("let answer = 6 * 7;", OptionsBuilder::new().build()).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod context;
pub mod lexer;
pub mod loc;
pub mod options;
pub mod parse_error;
pub mod parser;
pub mod printer;
pub mod regexp;
pub mod scope;
pub mod source;
pub mod token;
pub mod unicode;
pub mod unicode_property;

use std::rc::Rc;

pub use ast::{Expression, Program};
pub use lexer::Lexer;
pub use loc::{Loc, Pos};
pub use options::{AllowReserved, EcmaVersion, Options, OptionsBuilder, SourceType};
pub use parse_error::{LocalizedParseError, ParseError, ParseResult};
pub use parser::{parse_expression_at_source, parse_source};
pub use printer::print_program;
pub use source::Source;
pub use token::Token;

/// Parse a complete program from a string.
pub fn parse(source: &str, options: Options) -> ParseResult<Program> {
    let source = Rc::new(Source::new_from_string("<input>", source.to_owned()));
    parse_source(&source, options)
}

/// Parse a complete program as module code, which implies strict mode and enables the
/// import/export grammar.
pub fn parse_module(source: &str, options: OptionsBuilder) -> ParseResult<Program> {
    let options = options.source_type(SourceType::Module).build();
    parse(source, options)
}

/// Parse a single expression starting at the given byte offset into the string.
pub fn parse_expression_at(source: &str, pos: Pos, options: Options) -> ParseResult<Expression> {
    let source = Rc::new(Source::new_from_string("<input>", source.to_owned()));
    parse_expression_at_source(&source, pos, options)
}

/// An iterator over the tokens of a source, ending at (and including) the `Eof` token. Errors
/// terminate the stream.
pub struct Tokenizer<'a> {
    lexer: Lexer<'a>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a Rc<Source>, options: &Options) -> Tokenizer<'a> {
        let mut lexer = Lexer::new(
            source,
            options.ecma_version.num(),
            options.source_type == SourceType::Module,
        );
        lexer.allow_hash_bang = options.allow_hash_bang;

        Tokenizer { lexer, done: false }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = ParseResult<(Token, Loc)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.lexer.next() {
            Ok((Token::Eof, loc)) => {
                self.done = true;
                Some(Ok((Token::Eof, loc)))
            }
            Ok(token_and_loc) => Some(Ok(token_and_loc)),
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

/// Tokenize a source without parsing it.
pub fn tokenize<'a>(source: &'a Rc<Source>, options: &Options) -> Tokenizer<'a> {
    Tokenizer::new(source, options)
}
