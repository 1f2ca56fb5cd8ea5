use std::error::Error;
use std::rc::Rc;
use std::{fmt, io};

use crate::loc::{find_line_col_for_pos, Loc, Pos};
use crate::source::Source;
use crate::token::Token;

#[derive(Debug)]
pub enum ParseError {
    Io(io::Error),
    UnknownToken(String),
    UnexpectedToken(Token),
    ExpectedToken(Token, Token),
    InvalidUnicode,
    UnterminatedStringLiteral,
    UnterminatedTemplate,
    UnterminatedRegexp,
    UnterminatedComment,
    MalformedEscapeSequence,
    MalformedNumericLiteral,
    BigIntLeadingZero,
    LegacyOctalLiteralInStrictMode,
    LegacyOctalEscapeInStrictMode,
    LegacyNonOctalEscapeInStrictMode,
    TrailingNumericSeparator,
    AdjacentNumericSeparators,
    SeparatorInLegacyOctal,
    IdentifierAfterNumber,
    EscapeSequenceInKeyword(String),
    InvalidRegexpFlag,
    DuplicateRegexpFlag,
    EscapeInRegexpFlags,
    RegexpSyntax { pattern: String, description: String },
    ThrowArgumentOnNewLine,
    LexicalDeclarationInSingleStatement,
    ForInOfDeclarationWithInitializer(bool),
    ForOfLet,
    ForOfAsync,
    ReservedWord(String),
    UnexpectedKeyword(String),
    AwaitOutsideAsync,
    AwaitIdentifierInAsync,
    YieldIdentifierInGenerator,
    YieldInParameters,
    AwaitInParameters,
    NameRedeclaration(String),
    DuplicateLabel(String),
    UnsyntacticJump(String),
    WithInStrictMode,
    DeleteIdentifierInStrictMode,
    StrictModeLVal { name: String, is_binding: bool },
    ArgumentNameClash,
    UseStrictNonSimpleParams,
    ReturnOutsideFunction,
    MultipleConstructors,
    ConstructorGetterSetter,
    ConstructorGenerator,
    ConstructorAsync,
    ClassStaticPrototype,
    DuplicateProtoProperty,
    ConstWithoutInitializer,
    MissingPatternInitializer,
    LetNameInLexicalDeclaration,
    GetterWrongNumberOfParams,
    SetterWrongNumberOfParams,
    SetterRestParam,
    ShorthandPropertyAssignment,
    TrailingCommaAfterRest,
    ParenthesizedPattern,
    RestElementNotLast,
    InvalidDefaultOperator,
    ObjectPatternAccessor,
    AssigningToRvalue,
    BindingRvalue,
    BindingMemberExpression,
    BindingParenthesizedExpression,
    OptionalChainAssignment,
    OptionalChainNew,
    OptionalChainTemplate,
    MixedLogicalCoalesce,
    NewTargetOutsideFunction,
    ExpectedNewTarget,
    ImportMetaOutsideModule,
    ExpectedImportMeta,
    MetaPropertyEscape(String),
    DynamicImportTrailingComma,
    ImportExportOutsideModule,
    ImportExportNotAtTopLevel,
    DuplicateExport(String),
    UndefinedExport(String),
    SuperOutsideMethod,
    SuperCallOutsideDerivedConstructor,
    BadTemplateEscape,
    MultipleDefaultClauses,
    RedefinitionOfProperty,
    MissingCatchOrFinally,
    RestDefaultValue,
    StringExportWithoutFrom,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Io(io_error) => {
                f.write_str("Error: ")?;
                io_error.fmt(f)
            }
            ParseError::UnknownToken(text) => write!(f, "Unknown token {}", text),
            ParseError::UnexpectedToken(token) => write!(f, "Unexpected token {}", token),
            ParseError::ExpectedToken(actual, expected) => {
                write!(f, "Unexpected token {}, expected {}", actual, expected)
            }
            ParseError::InvalidUnicode => write!(f, "Invalid utf-8 sequence"),
            ParseError::UnterminatedStringLiteral => write!(f, "Unterminated string literal"),
            ParseError::UnterminatedTemplate => write!(f, "Unterminated template"),
            ParseError::UnterminatedRegexp => write!(f, "Unterminated regular expression"),
            ParseError::UnterminatedComment => write!(f, "Unterminated comment"),
            ParseError::MalformedEscapeSequence => write!(f, "Malformed escape sequence"),
            ParseError::MalformedNumericLiteral => write!(f, "Invalid number"),
            ParseError::BigIntLeadingZero => write!(f, "BigInt cannot have a leading zero"),
            ParseError::LegacyOctalLiteralInStrictMode => {
                write!(f, "Octal literals are not allowed in strict mode")
            }
            ParseError::LegacyOctalEscapeInStrictMode => {
                write!(f, "Octal escape sequences are not allowed in strict mode")
            }
            ParseError::LegacyNonOctalEscapeInStrictMode => {
                write!(f, "\\8 and \\9 are not allowed in strict mode")
            }
            ParseError::TrailingNumericSeparator => write!(
                f,
                "Underscore can appear only between digits, not after the last digit in a number"
            ),
            ParseError::AdjacentNumericSeparators => {
                write!(f, "Number cannot contain multiple adjacent underscores")
            }
            ParseError::SeparatorInLegacyOctal => {
                write!(f, "Underscore is not allowed in legacy octal literals")
            }
            ParseError::IdentifierAfterNumber => write!(f, "Identifier directly after number"),
            ParseError::EscapeSequenceInKeyword(keyword) => {
                write!(f, "Escape sequence in keyword {}", keyword)
            }
            ParseError::InvalidRegexpFlag => write!(f, "Invalid regular expression flag"),
            ParseError::DuplicateRegexpFlag => write!(f, "Duplicate regular expression flag"),
            ParseError::EscapeInRegexpFlags => {
                write!(f, "Regular expression flags cannot contain unicode escapes")
            }
            ParseError::RegexpSyntax { pattern, description } => {
                write!(f, "Invalid regular expression: /{}/: {}", pattern, description)
            }
            ParseError::ThrowArgumentOnNewLine => write!(f, "Illegal newline after throw"),
            ParseError::LexicalDeclarationInSingleStatement => {
                write!(f, "Lexical declaration cannot appear in a single-statement context")
            }
            ParseError::ForInOfDeclarationWithInitializer(is_in) => {
                let kind = if *is_in { "for-in" } else { "for-of" };
                write!(f, "{} loop variable declaration may not have an initializer", kind)
            }
            ParseError::ForOfLet => {
                write!(f, "The left-hand side of a for-of loop may not start with 'let'")
            }
            ParseError::ForOfAsync => {
                write!(f, "The left-hand side of a for-of loop may not be 'async'")
            }
            ParseError::ReservedWord(name) => write!(f, "The keyword '{}' is reserved", name),
            ParseError::UnexpectedKeyword(name) => write!(f, "Unexpected keyword '{}'", name),
            ParseError::AwaitOutsideAsync => {
                write!(f, "Cannot use keyword 'await' outside an async function")
            }
            ParseError::AwaitIdentifierInAsync => {
                write!(f, "Cannot use 'await' as identifier inside an async function")
            }
            ParseError::YieldIdentifierInGenerator => {
                write!(f, "Cannot use 'yield' as identifier inside a generator")
            }
            ParseError::YieldInParameters => {
                write!(f, "Yield expression cannot be a default value")
            }
            ParseError::AwaitInParameters => {
                write!(f, "Await expression cannot be a default value")
            }
            ParseError::NameRedeclaration(name) => {
                write!(f, "Identifier '{}' has already been declared", name)
            }
            ParseError::DuplicateLabel(name) => {
                write!(f, "Label '{}' is already declared", name)
            }
            ParseError::UnsyntacticJump(keyword) => write!(f, "Unsyntactic {}", keyword),
            ParseError::WithInStrictMode => write!(f, "'with' in strict mode"),
            ParseError::DeleteIdentifierInStrictMode => {
                write!(f, "Deleting local variable in strict mode")
            }
            ParseError::StrictModeLVal { name, is_binding } => {
                let action = if *is_binding { "Binding" } else { "Assigning to" };
                write!(f, "{} '{}' in strict mode", action, name)
            }
            ParseError::ArgumentNameClash => write!(f, "Argument name clash"),
            ParseError::UseStrictNonSimpleParams => {
                write!(f, "Illegal 'use strict' directive in function with non-simple parameter list")
            }
            ParseError::ReturnOutsideFunction => write!(f, "'return' outside of function"),
            ParseError::MultipleConstructors => {
                write!(f, "Duplicate constructor in the same class")
            }
            ParseError::ConstructorGetterSetter => {
                write!(f, "Constructor can't have get/set modifier")
            }
            ParseError::ConstructorGenerator => write!(f, "Constructor can't be a generator"),
            ParseError::ConstructorAsync => write!(f, "Constructor can't be an async method"),
            ParseError::ClassStaticPrototype => {
                write!(f, "Classes may not have a static property named prototype")
            }
            ParseError::DuplicateProtoProperty => {
                write!(f, "Redefinition of __proto__ property")
            }
            ParseError::ConstWithoutInitializer => {
                write!(f, "Const declarations must have an initializer")
            }
            ParseError::MissingPatternInitializer => {
                write!(f, "Complex binding patterns require an initialization value")
            }
            ParseError::LetNameInLexicalDeclaration => {
                write!(f, "let is disallowed as a lexically bound name")
            }
            ParseError::GetterWrongNumberOfParams => write!(f, "getter should have no params"),
            ParseError::SetterWrongNumberOfParams => {
                write!(f, "setter should have exactly one param")
            }
            ParseError::SetterRestParam => write!(f, "Setter cannot use rest params"),
            ParseError::ShorthandPropertyAssignment => {
                write!(f, "Shorthand property assignments are valid only in destructuring patterns")
            }
            ParseError::TrailingCommaAfterRest => {
                write!(f, "Comma is not permitted after the rest element")
            }
            ParseError::ParenthesizedPattern => write!(f, "Parenthesized pattern"),
            ParseError::RestElementNotLast => write!(f, "Rest element must be last element"),
            ParseError::InvalidDefaultOperator => {
                write!(f, "Only '=' operator can be used for specifying default value")
            }
            ParseError::ObjectPatternAccessor => {
                write!(f, "Object pattern can't contain getter or setter")
            }
            ParseError::AssigningToRvalue => write!(f, "Assigning to rvalue"),
            ParseError::BindingRvalue => write!(f, "Binding rvalue"),
            ParseError::BindingMemberExpression => write!(f, "Binding member expression"),
            ParseError::BindingParenthesizedExpression => {
                write!(f, "Binding parenthesized expression")
            }
            ParseError::OptionalChainAssignment => {
                write!(f, "Optional chaining cannot appear in left-hand side")
            }
            ParseError::OptionalChainNew => {
                write!(f, "Optional chaining cannot appear in the callee of new expressions")
            }
            ParseError::OptionalChainTemplate => {
                write!(f, "Optional chaining cannot appear in the tag of tagged template expressions")
            }
            ParseError::MixedLogicalCoalesce => write!(
                f,
                "Logical expressions and coalesce expressions cannot be mixed. Wrap either by parentheses"
            ),
            ParseError::NewTargetOutsideFunction => {
                write!(f, "'new.target' can only be used in functions")
            }
            ParseError::ExpectedNewTarget => {
                write!(f, "The only valid meta property for new is 'new.target'")
            }
            ParseError::ImportMetaOutsideModule => {
                write!(f, "Cannot use 'import.meta' outside a module")
            }
            ParseError::ExpectedImportMeta => {
                write!(f, "The only valid meta property for import is 'import.meta'")
            }
            ParseError::MetaPropertyEscape(name) => {
                write!(f, "'{}' must not contain escaped characters", name)
            }
            ParseError::DynamicImportTrailingComma => {
                write!(f, "Trailing comma is not allowed in import()")
            }
            ParseError::ImportExportOutsideModule => {
                write!(f, "'import' and 'export' may appear only with 'sourceType: module'")
            }
            ParseError::ImportExportNotAtTopLevel => {
                write!(f, "'import' and 'export' may only appear at the top level")
            }
            ParseError::DuplicateExport(name) => write!(f, "Duplicate export '{}'", name),
            ParseError::UndefinedExport(name) => write!(f, "Export '{}' is not defined", name),
            ParseError::SuperOutsideMethod => write!(f, "'super' keyword outside a method"),
            ParseError::SuperCallOutsideDerivedConstructor => {
                write!(f, "super() call outside constructor of a subclass")
            }
            ParseError::BadTemplateEscape => {
                write!(f, "Bad escape sequence in untagged template literal")
            }
            ParseError::MultipleDefaultClauses => write!(f, "Multiple default clauses"),
            ParseError::RedefinitionOfProperty => write!(f, "Redefinition of property"),
            ParseError::MissingCatchOrFinally => write!(f, "Missing catch or finally clause"),
            ParseError::RestDefaultValue => {
                write!(f, "Rest elements cannot have a default value")
            }
            ParseError::StringExportWithoutFrom => {
                write!(f, "A string literal cannot be used as an exported binding without 'from'")
            }
        }
    }
}

pub struct LocalizedParseError {
    pub error: ParseError,
    pub source_loc: Option<(Loc, Rc<Source>)>,
}

impl LocalizedParseError {
    pub fn new_without_loc(error: ParseError) -> LocalizedParseError {
        LocalizedParseError { error, source_loc: None }
    }

    /// Byte offset at which the error was reported, if known.
    pub fn pos(&self) -> Option<Pos> {
        self.source_loc.as_ref().map(|(loc, _)| loc.start)
    }
}

impl Error for LocalizedParseError {}

impl fmt::Display for LocalizedParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source_loc {
            None => write!(f, "{}", self.error),
            Some((loc, source)) => {
                let offsets = source.line_offsets();
                let line_col = find_line_col_for_pos(loc.start, offsets);
                write!(f, "{} ({}:{})", self.error, line_col.line, line_col.col)
            }
        }
    }
}

impl fmt::Debug for LocalizedParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <LocalizedParseError as fmt::Display>::fmt(self, f)
    }
}

impl From<io::Error> for LocalizedParseError {
    fn from(error: io::Error) -> LocalizedParseError {
        LocalizedParseError::new_without_loc(ParseError::Io(error))
    }
}

pub type ParseResult<T> = Result<T, LocalizedParseError>;

pub fn format_localized_parse_errors(errors: &[LocalizedParseError]) -> String {
    // Separate errors into those with and without locs
    let mut errors_without_loc = vec![];
    let mut errors_with_loc = vec![];
    for error in errors {
        match &error.source_loc {
            None => errors_without_loc.push(error),
            Some((loc, source)) => {
                let offsets = source.line_offsets();
                let line_col = find_line_col_for_pos(loc.start, offsets);
                errors_with_loc.push((error, source, line_col.line, line_col.col))
            }
        }
    }

    // Sort errors with locs by file then position
    errors_with_loc.sort_by(|a, b| {
        a.1.file_path
            .cmp(&b.1.file_path)
            .then_with(|| a.2.cmp(&b.2))
            .then_with(|| a.3.cmp(&b.3))
    });

    let mut error_messages = vec![];
    for error in errors_without_loc {
        error_messages.push(format!("{}", error))
    }

    for (error, _, _, _) in errors_with_loc {
        error_messages.push(format!("{}", error))
    }

    error_messages.join("\n")
}
