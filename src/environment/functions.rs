use std::fmt::Display;

use crate::types::types::TypeRef;

use super::builtins::Builtin;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

/// Name, parameters and return types of a function, without its body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_types: Vec<TypeRef>,
}

impl FunctionSignature {
    /// Whether a definition may complete a forward declaration with this
    /// signature. Parameter names take part in the comparison.
    pub fn matches(&self, other: &FunctionSignature) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(other.parameters.iter())
                .all(|(a, b)| a.name == b.name && a.ty == b.ty)
            && self.return_types.len() == other.return_types.len()
            && self
                .return_types
                .iter()
                .zip(other.return_types.iter())
                .all(|(a, b)| a == b)
    }
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|param| format!("{}: {}", param.name, param.ty))
            .collect::<Vec<String>>()
            .join(", ");

        write!(f, "{}({})", self.name, parameters)?;

        if !self.return_types.is_empty() {
            let return_types = self
                .return_types
                .iter()
                .map(|ty| ty.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            write!(f, ": ({})", return_types)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionState {
    Builtin(Builtin),
    /// Forward declaration, no body yet.
    Declared,
    Defined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRecord {
    pub signature: FunctionSignature,
    pub state: FunctionState,
}

impl FunctionRecord {
    pub fn builtin(builtin: Builtin) -> Self {
        FunctionRecord {
            signature: FunctionSignature {
                name: String::from(builtin.name()),
                parameters: vec![],
                return_types: vec![],
            },
            state: FunctionState::Builtin(builtin),
        }
    }

    pub fn declared(signature: FunctionSignature) -> Self {
        FunctionRecord {
            signature,
            state: FunctionState::Declared,
        }
    }

    pub fn defined(signature: FunctionSignature) -> Self {
        FunctionRecord {
            signature,
            state: FunctionState::Defined,
        }
    }

    pub fn as_builtin(&self) -> Option<Builtin> {
        match self.state {
            FunctionState::Builtin(builtin) => Some(builtin),
            _ => None,
        }
    }
}
