use bitflags::bitflags;

use crate::parse_error::ParseError;

bitflags! {
    /// The kind of a lexical scope, as a bitmask so that composite queries (e.g. "nearest
    /// var-holding scope") stay cheap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScopeFlags: u16 {
        const TOP = 1 << 0;
        const FUNCTION = 1 << 1;
        const ASYNC = 1 << 2;
        const GENERATOR = 1 << 3;
        const ARROW = 1 << 4;
        const SIMPLE_CATCH = 1 << 5;
        const SUPER = 1 << 6;
        const DIRECT_SUPER = 1 << 7;
        /// Scopes that var declarations hoist to
        const VAR = Self::TOP.bits() | Self::FUNCTION.bits();
    }
}

pub fn function_scope_flags(is_async: bool, is_generator: bool) -> ScopeFlags {
    let mut flags = ScopeFlags::FUNCTION;
    if is_async {
        flags |= ScopeFlags::ASYNC;
    }
    if is_generator {
        flags |= ScopeFlags::GENERATOR;
    }

    flags
}

/// How a name enters scope, which determines the redeclaration rules applied to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BindingKind {
    /// Not a declaration at all, only name validation
    None,
    Var,
    Lexical,
    Function,
    SimpleCatch,
    /// A name validated against the binding rules without being declared here
    Outside,
}

struct Scope {
    flags: ScopeFlags,
    /// Names declared with `var` in or below this scope
    var_names: Vec<String>,
    /// Names declared lexically in this scope
    lexical_names: Vec<String>,
    /// Names of function declarations in this scope
    function_names: Vec<String>,
}

impl Scope {
    fn new(flags: ScopeFlags) -> Scope {
        Scope {
            flags,
            var_names: vec![],
            lexical_names: vec![],
            function_names: vec![],
        }
    }
}

/// Where a successful declaration landed, so the caller can maintain module bookkeeping for
/// names declared at the top level.
#[derive(Clone, Copy, PartialEq)]
pub enum DeclarationTarget {
    TopLevel,
    Nested,
}

pub struct ScopeStack {
    scopes: Vec<Scope>,
    /// Function declarations at the top level of module code are not treated as var-like
    in_module: bool,
}

impl ScopeStack {
    pub fn new(top_flags: ScopeFlags, in_module: bool) -> ScopeStack {
        ScopeStack { scopes: vec![Scope::new(top_flags)], in_module }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter(&mut self, flags: ScopeFlags) {
        self.scopes.push(Scope::new(flags))
    }

    pub fn exit(&mut self) {
        self.scopes.pop();
    }

    fn current(&self) -> &Scope {
        self.scopes.last().unwrap()
    }

    fn current_mut(&mut self) -> &mut Scope {
        self.scopes.last_mut().unwrap()
    }

    /// Whether function declarations in the given scope bind like var declarations. True inside
    /// function bodies, and at the top level of scripts.
    fn treat_functions_as_var(&self, scope: &Scope) -> bool {
        scope.flags.contains(ScopeFlags::FUNCTION)
            || (!self.in_module && scope.flags.contains(ScopeFlags::TOP))
    }

    pub fn treat_functions_as_var_in_current(&self) -> bool {
        self.treat_functions_as_var(self.current())
    }

    /// Declare a name in the appropriate scope, checking the redeclaration rules for its binding
    /// kind. Returns where the declaration landed so module export bookkeeping can be updated.
    pub fn declare_name(
        &mut self,
        name: &str,
        kind: BindingKind,
    ) -> Result<DeclarationTarget, ParseError> {
        match kind {
            BindingKind::Lexical => {
                let scope = self.current_mut();
                let redeclared = scope.lexical_names.iter().any(|n| n == name)
                    || scope.var_names.iter().any(|n| n == name)
                    || scope.function_names.iter().any(|n| n == name);
                if redeclared {
                    return Err(ParseError::NameRedeclaration(name.to_owned()));
                }

                scope.lexical_names.push(name.to_owned());

                if scope.flags.contains(ScopeFlags::TOP) {
                    Ok(DeclarationTarget::TopLevel)
                } else {
                    Ok(DeclarationTarget::Nested)
                }
            }
            BindingKind::SimpleCatch => {
                // The catch binding may shadow anything, conflicts are checked against it when
                // var names are hoisted through the catch scope
                self.current_mut().lexical_names.push(name.to_owned());
                Ok(DeclarationTarget::Nested)
            }
            BindingKind::Function => {
                let functions_as_var = self.treat_functions_as_var_in_current();
                let scope = self.current_mut();
                let redeclared = if functions_as_var {
                    scope.lexical_names.iter().any(|n| n == name)
                } else {
                    scope.lexical_names.iter().any(|n| n == name)
                        || scope.var_names.iter().any(|n| n == name)
                };
                if redeclared {
                    return Err(ParseError::NameRedeclaration(name.to_owned()));
                }

                scope.function_names.push(name.to_owned());

                if scope.flags.contains(ScopeFlags::TOP) {
                    Ok(DeclarationTarget::TopLevel)
                } else {
                    Ok(DeclarationTarget::Nested)
                }
            }
            BindingKind::Var => {
                // Var names hoist through every scope up to the nearest var-holding scope,
                // clashing with lexical names along the way. The binding of a simple catch
                // clause does not count as a clash.
                for i in (0..self.scopes.len()).rev() {
                    let functions_as_var = self.treat_functions_as_var(&self.scopes[i]);
                    let scope = &mut self.scopes[i];

                    let lexical_clash = scope.lexical_names.iter().any(|n| n == name)
                        && !(scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                            && scope.lexical_names.first().map(|n| n.as_str()) == Some(name));
                    let function_clash =
                        !functions_as_var && scope.function_names.iter().any(|n| n == name);

                    if lexical_clash || function_clash {
                        return Err(ParseError::NameRedeclaration(name.to_owned()));
                    }

                    scope.var_names.push(name.to_owned());

                    if scope.flags.intersects(ScopeFlags::VAR) {
                        if scope.flags.contains(ScopeFlags::TOP) {
                            return Ok(DeclarationTarget::TopLevel);
                        } else {
                            return Ok(DeclarationTarget::Nested);
                        }
                    }
                }

                unreachable!("scope stack always contains a var scope")
            }
            BindingKind::None | BindingKind::Outside => Ok(DeclarationTarget::Nested),
        }
    }

    /// Whether a name is declared at the top level scope, in any category.
    pub fn is_declared_at_top_level(&self, name: &str) -> bool {
        let top = &self.scopes[0];
        top.var_names.iter().any(|n| n == name)
            || top.lexical_names.iter().any(|n| n == name)
            || top.function_names.iter().any(|n| n == name)
    }

    /// The nearest enclosing scope that is a function or the top level.
    fn current_var_scope(&self) -> &Scope {
        for scope in self.scopes.iter().rev() {
            if scope.flags.intersects(ScopeFlags::VAR) {
                return scope;
            }
        }

        unreachable!("scope stack always contains a var scope")
    }

    /// The nearest enclosing scope that determines what `this`, `super`, and `new.target` refer
    /// to. Skips arrow function scopes.
    fn current_this_scope(&self) -> &Scope {
        for scope in self.scopes.iter().rev() {
            if scope.flags.intersects(ScopeFlags::VAR)
                && !scope.flags.contains(ScopeFlags::ARROW)
            {
                return scope;
            }
        }

        unreachable!("scope stack always contains a var scope")
    }

    pub fn in_function(&self) -> bool {
        self.current_var_scope().flags.contains(ScopeFlags::FUNCTION)
    }

    pub fn in_generator(&self) -> bool {
        let scope = self.current_var_scope();
        scope.flags.contains(ScopeFlags::GENERATOR) && !scope.flags.contains(ScopeFlags::ARROW)
    }

    pub fn in_async(&self) -> bool {
        let scope = self.current_var_scope();
        scope.flags.contains(ScopeFlags::ASYNC) && !scope.flags.contains(ScopeFlags::ARROW)
    }

    /// Whether the nearest enclosing function is async, or None when at the top level. Arrow
    /// functions count, since they inherit `await` from their surroundings.
    pub fn nearest_function_is_async(&self) -> Option<bool> {
        for scope in self.scopes.iter().rev() {
            if scope.flags.contains(ScopeFlags::FUNCTION) {
                return Some(scope.flags.contains(ScopeFlags::ASYNC));
            }
        }

        None
    }

    pub fn in_non_arrow_function(&self) -> bool {
        self.current_this_scope().flags.contains(ScopeFlags::FUNCTION)
    }

    pub fn allow_super(&self) -> bool {
        self.current_this_scope().flags.contains(ScopeFlags::SUPER)
    }

    pub fn allow_direct_super(&self) -> bool {
        self.current_this_scope().flags.contains(ScopeFlags::DIRECT_SUPER)
    }
}
