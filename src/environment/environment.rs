use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    types::types::TypeRef,
    Position,
};

use super::{
    builtins::Builtin,
    functions::{FunctionRecord, FunctionState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeRef,
}

impl Symbol {
    pub fn is_constant(&self) -> bool {
        self.kind == SymbolKind::Constant
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Symbol>,
    functions: HashMap<String, FunctionRecord>,
}

/// Stack of lexical scopes. The bottom scope holds the built-ins and is
/// never popped.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let mut root = Scope::default();

        for builtin in Builtin::ALL {
            root.functions
                .insert(String::from(builtin.name()), FunctionRecord::builtin(builtin));
        }

        Environment { scopes: vec![root] }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn current(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn resolve_variable(&self, name: &str) -> Option<&Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variables.get(name))
    }

    pub fn resolve_function(&self, name: &str) -> Option<&FunctionRecord> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.functions.get(name))
    }

    fn resolve_function_mut(&mut self, name: &str) -> Option<&mut FunctionRecord> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.functions.get_mut(name))
    }

    /// Binds `name` in the innermost scope.
    ///
    /// A name already visible anywhere in the chain may only be rebound when
    /// it is not a constant and keeps its declared type.
    pub fn define_variable(
        &mut self,
        name: &str,
        ty: TypeRef,
        kind: SymbolKind,
        position: Position,
    ) -> Result<(), Error> {
        if let Some(existing) = self.resolve_variable(name) {
            if existing.is_constant() {
                return Err(Error::new(
                    ErrorImpl::ConstantRedeclared {
                        variable: String::from(name),
                    },
                    position,
                ));
            }

            if existing.ty != ty {
                return Err(Error::new(
                    ErrorImpl::VariableRedeclaredWithType {
                        variable: String::from(name),
                        declared: existing.ty.to_string(),
                        received: ty.to_string(),
                    },
                    position,
                ));
            }
        }

        self.current().variables.insert(
            String::from(name),
            Symbol {
                name: String::from(name),
                kind,
                ty,
            },
        );

        Ok(())
    }

    /// Binds a function parameter in the innermost scope, which must be the
    /// function's own fresh scope.
    ///
    /// Names from enclosing scopes are shadowed whatever their type or
    /// kind. Only a second parameter of the same name with another type is
    /// rejected.
    pub fn bind_parameter(
        &mut self,
        name: &str,
        ty: TypeRef,
        position: Position,
    ) -> Result<(), Error> {
        if let Some(existing) = self.current().variables.get(name) {
            if existing.ty != ty {
                return Err(Error::new(
                    ErrorImpl::VariableRedeclaredWithType {
                        variable: String::from(name),
                        declared: existing.ty.to_string(),
                        received: ty.to_string(),
                    },
                    position,
                ));
            }
        }

        self.current().variables.insert(
            String::from(name),
            Symbol {
                name: String::from(name),
                kind: SymbolKind::Variable,
                ty,
            },
        );

        Ok(())
    }

    /// Registers a forward declaration or a definition.
    ///
    /// A definition whose name was forward declared with a matching
    /// signature completes that record in place.
    pub fn define_function(
        &mut self,
        record: FunctionRecord,
        position: Position,
    ) -> Result<(), Error> {
        let name = record.signature.name.clone();

        let Some(existing) = self.resolve_function_mut(&name) else {
            self.current().functions.insert(name, record);
            return Ok(());
        };

        match (existing.state, record.state) {
            (FunctionState::Builtin(_), _) => Err(Error::new(
                ErrorImpl::BuiltinOverride { function: name },
                position,
            )),
            (FunctionState::Declared, FunctionState::Defined) => {
                if !existing.signature.matches(&record.signature) {
                    return Err(Error::new(
                        ErrorImpl::FunctionSignatureMismatch { function: name },
                        position,
                    ));
                }

                existing.state = FunctionState::Defined;
                Ok(())
            }
            _ => Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared { function: name },
                position,
            )),
        }
    }
}
