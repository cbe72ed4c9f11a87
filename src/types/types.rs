use std::{fmt::Display, rc::Rc};

/// Shared handle to an interned type.
pub type TypeRef = Rc<Type>;

pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const BOOL: &str = "bool";
pub const STRING: &str = "string";
pub const CHAR: &str = "char";

/// Structural type of a value.
///
/// Two types are equal when they have the same variant and structurally
/// equal children, which is exactly what the derived `PartialEq` checks.
/// Compatibility with not-yet-known children is handled by
/// [`Type::is_compatible`] and by the interner's `unify`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A named primitive: `int`, `float`, `bool`, `string` or `char`.
    Base(String),
    /// `elem[]`
    Array(TypeCell),
    /// `key[value]`
    HashMap(TypeCell, TypeCell),
}

/// A container child that may not be known yet.
///
/// Empty literals (`[]`, `{}`) start out `Unresolved`. A cell moves to
/// `Resolved` at most once; adopting a second, conflicting type fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeCell {
    #[default]
    Unresolved,
    Resolved(TypeRef),
}

impl TypeCell {
    pub fn get(&self) -> Option<&TypeRef> {
        match self {
            TypeCell::Unresolved => None,
            TypeCell::Resolved(ty) => Some(ty),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TypeCell::Resolved(_))
    }

    /// Performs the `Unresolved -> Resolved` transition.
    ///
    /// Adopting into an already resolved cell succeeds only when the new
    /// type is compatible with the one already held; otherwise the held
    /// type is returned as the error.
    pub fn adopt(&mut self, ty: TypeRef) -> Result<(), TypeRef> {
        match self {
            TypeCell::Unresolved => {
                *self = TypeCell::Resolved(ty);
                Ok(())
            }
            TypeCell::Resolved(existing) if existing.is_compatible(&ty) => Ok(()),
            TypeCell::Resolved(existing) => Err(Rc::clone(existing)),
        }
    }

    fn is_compatible(&self, other: &TypeCell) -> bool {
        match (self, other) {
            (TypeCell::Resolved(a), TypeCell::Resolved(b)) => a.is_compatible(b),
            _ => true,
        }
    }
}

impl Type {
    pub fn is_base(&self, name: &str) -> bool {
        matches!(self, Type::Base(base) if base == name)
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Type::Base(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn is_numeric(&self) -> bool {
        self.is_base(INT) || self.is_base(FLOAT)
    }

    /// Structural comparison where an unresolved child on either side
    /// matches anything. Never changes either operand.
    pub fn is_compatible(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Base(a), Type::Base(b)) => a == b,
            (Type::Array(a), Type::Array(b)) => a.is_compatible(b),
            (Type::HashMap(k1, v1), Type::HashMap(k2, v2)) => {
                k1.is_compatible(k2) && v1.is_compatible(v2)
            }
            _ => false,
        }
    }

    /// True when no child anywhere in the type is unresolved.
    pub fn is_fully_resolved(&self) -> bool {
        match self {
            Type::Base(_) => true,
            Type::Array(elem) => elem.get().is_some_and(|ty| ty.is_fully_resolved()),
            Type::HashMap(key, value) => {
                key.get().is_some_and(|ty| ty.is_fully_resolved())
                    && value.get().is_some_and(|ty| ty.is_fully_resolved())
            }
        }
    }
}

impl Display for TypeCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeCell::Unresolved => write!(f, "unknown"),
            TypeCell::Resolved(ty) => write!(f, "{}", ty),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Base(name) if name.is_empty() => write!(f, "unknown"),
            Type::Base(name) => write!(f, "{}", name),
            Type::Array(elem) => write!(f, "{}[]", elem),
            Type::HashMap(key, value) => write!(f, "{}[{}]", key, value),
        }
    }
}

/// Renders a list of types the way error messages show return lists.
pub fn display_types(types: &[TypeRef]) -> String {
    match types {
        [] => String::from("()"),
        [single] => single.to_string(),
        many => format!(
            "({})",
            many.iter()
                .map(|ty| ty.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        ),
    }
}
