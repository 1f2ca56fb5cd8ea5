/// Syntactic contexts the lexer tracks to disambiguate tokens whose meaning depends on their
/// surroundings: a `/` that may be a division or a regexp, a `{` that may open a block or an
/// object literal, and the backtick-delimited interior of a template.
///
/// The stack of these contexts, together with the `expr_allowed` flag, forms a deterministic
/// state machine updated after every token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContextKind {
    /// A `{ ... }` block in statement position
    BlockStatement,
    /// A `{ ... }` that is an object literal or similar expression-position brace
    BlockExpression,
    /// The `${ ... }` substitution inside a template literal
    TemplateBrace,
    /// Parentheses following `if`, `for`, `while`, or `with`
    ParenStatement,
    /// Parentheses in expression position
    ParenExpression,
    /// The body of a function declaration
    FunctionStatement,
    /// The body of a function expression
    FunctionExpression,
    /// The body of a generator function expression
    FunctionExpressionGenerator,
    /// The body of a generator function declaration
    FunctionGenerator,
    /// The interior of a template literal, between the backticks
    Template,
}

impl ContextKind {
    /// Whether this context is an expression-position context. Determines the value of
    /// `expr_allowed` when the context is popped by a closing brace or paren.
    pub fn is_expr(self) -> bool {
        matches!(
            self,
            ContextKind::BlockExpression
                | ContextKind::TemplateBrace
                | ContextKind::ParenExpression
                | ContextKind::FunctionExpression
                | ContextKind::FunctionExpressionGenerator
                | ContextKind::Template
        )
    }

    /// Whitespace is significant only inside templates, where the scanner must not skip it.
    pub fn preserve_space(self) -> bool {
        self == ContextKind::Template
    }

    /// Whether this context is the body of some kind of function.
    pub fn is_function(self) -> bool {
        matches!(
            self,
            ContextKind::FunctionStatement
                | ContextKind::FunctionExpression
                | ContextKind::FunctionExpressionGenerator
                | ContextKind::FunctionGenerator
        )
    }

    /// Whether this context is the body of a generator function.
    pub fn is_generator(self) -> bool {
        matches!(
            self,
            ContextKind::FunctionExpressionGenerator | ContextKind::FunctionGenerator
        )
    }
}
