use crate::lexer::Comment;
use crate::loc::{Loc, Pos};
use crate::parse_error::LocalizedParseError;
use crate::token::Token;

/// The edition of the ECMAScript specification to parse. Editions 2015 and later may also be
/// written by year via `from_year`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EcmaVersion {
    E3,
    E5,
    E6,
    E7,
    E8,
    E9,
    E10,
    E11,
    E12,
    E13,
    Latest,
}

impl EcmaVersion {
    /// Numeric edition, with `Latest` resolving to the newest supported edition.
    pub fn num(self) -> u32 {
        match self {
            EcmaVersion::E3 => 3,
            EcmaVersion::E5 => 5,
            EcmaVersion::E6 => 6,
            EcmaVersion::E7 => 7,
            EcmaVersion::E8 => 8,
            EcmaVersion::E9 => 9,
            EcmaVersion::E10 => 10,
            EcmaVersion::E11 => 11,
            EcmaVersion::E12 => 12,
            EcmaVersion::E13 => 13,
            EcmaVersion::Latest => 13,
        }
    }

    pub fn from_num(num: u32) -> Option<EcmaVersion> {
        let version = match num {
            3 => EcmaVersion::E3,
            5 => EcmaVersion::E5,
            6 | 2015 => EcmaVersion::E6,
            7 | 2016 => EcmaVersion::E7,
            8 | 2017 => EcmaVersion::E8,
            9 | 2018 => EcmaVersion::E9,
            10 | 2019 => EcmaVersion::E10,
            11 | 2020 => EcmaVersion::E11,
            12 | 2021 => EcmaVersion::E12,
            13 | 2022 => EcmaVersion::E13,
            _ => return None,
        };

        Some(version)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceType {
    Script,
    Module,
}

/// Whether non-strict reserved words may be used as identifiers. `Never` additionally rejects
/// them as property and export names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowReserved {
    /// Follow the ecma version: reserved words are allowed below edition 5
    Default,
    Always,
    Never,
}

pub type OnToken = Box<dyn FnMut(&Token, Loc)>;
pub type OnComment = Box<dyn FnMut(&Comment)>;
pub type OnInsertedSemicolon = Box<dyn FnMut(Pos)>;
pub type OnTrailingComma = Box<dyn FnMut(Pos)>;
pub type OnRecoverableError = Box<dyn FnMut(LocalizedParseError)>;

/// Options controlling a single parse. Built with [`OptionsBuilder`].
pub struct Options {
    pub ecma_version: EcmaVersion,
    pub source_type: SourceType,
    pub allow_reserved: AllowReserved,
    pub allow_return_outside_function: bool,
    pub allow_import_export_everywhere: bool,
    pub allow_await_outside_function: bool,
    pub allow_hash_bang: bool,
    pub preserve_parens: bool,
    /// Called with every token the parser consumes
    pub on_token: Option<OnToken>,
    /// Called with every comment the lexer skips
    pub on_comment: Option<OnComment>,
    /// Called at each position where a semicolon was inserted automatically
    pub on_inserted_semicolon: Option<OnInsertedSemicolon>,
    /// Called at each trailing comma position
    pub on_trailing_comma: Option<OnTrailingComma>,
    /// When set, recoverable errors are passed to this callback and parsing continues. When
    /// unset, recoverable errors abort the parse like fatal ones.
    pub on_recoverable_error: Option<OnRecoverableError>,
}

impl Default for Options {
    fn default() -> Options {
        OptionsBuilder::new().build()
    }
}

pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    pub fn new() -> OptionsBuilder {
        OptionsBuilder {
            options: Options {
                ecma_version: EcmaVersion::Latest,
                source_type: SourceType::Script,
                allow_reserved: AllowReserved::Default,
                allow_return_outside_function: false,
                allow_import_export_everywhere: false,
                allow_await_outside_function: false,
                allow_hash_bang: false,
                preserve_parens: false,
                on_token: None,
                on_comment: None,
                on_inserted_semicolon: None,
                on_trailing_comma: None,
                on_recoverable_error: None,
            },
        }
    }

    pub fn ecma_version(mut self, version: EcmaVersion) -> Self {
        self.options.ecma_version = version;
        self
    }

    pub fn source_type(mut self, source_type: SourceType) -> Self {
        self.options.source_type = source_type;
        self
    }

    pub fn allow_reserved(mut self, allow: AllowReserved) -> Self {
        self.options.allow_reserved = allow;
        self
    }

    pub fn allow_return_outside_function(mut self, allow: bool) -> Self {
        self.options.allow_return_outside_function = allow;
        self
    }

    pub fn allow_import_export_everywhere(mut self, allow: bool) -> Self {
        self.options.allow_import_export_everywhere = allow;
        self
    }

    pub fn allow_await_outside_function(mut self, allow: bool) -> Self {
        self.options.allow_await_outside_function = allow;
        self
    }

    pub fn allow_hash_bang(mut self, allow: bool) -> Self {
        self.options.allow_hash_bang = allow;
        self
    }

    pub fn preserve_parens(mut self, preserve: bool) -> Self {
        self.options.preserve_parens = preserve;
        self
    }

    pub fn on_token(mut self, on_token: OnToken) -> Self {
        self.options.on_token = Some(on_token);
        self
    }

    pub fn on_comment(mut self, on_comment: OnComment) -> Self {
        self.options.on_comment = Some(on_comment);
        self
    }

    pub fn on_inserted_semicolon(mut self, on_inserted_semicolon: OnInsertedSemicolon) -> Self {
        self.options.on_inserted_semicolon = Some(on_inserted_semicolon);
        self
    }

    pub fn on_trailing_comma(mut self, on_trailing_comma: OnTrailingComma) -> Self {
        self.options.on_trailing_comma = Some(on_trailing_comma);
        self
    }

    pub fn on_recoverable_error(mut self, on_recoverable_error: OnRecoverableError) -> Self {
        self.options.on_recoverable_error = Some(on_recoverable_error);
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}
