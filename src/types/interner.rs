use std::{collections::HashMap, rc::Rc};

use super::types::{Type, TypeCell, TypeRef, BOOL, CHAR, FLOAT, INT, STRING};

/// Canonicalization cache for types.
///
/// Types are keyed by their rendered form, so structurally identical types
/// built through the interner are the same `Rc`. The cache belongs to one
/// parser instance; call [`TypeInterner::reset`] between independent
/// compilations that share it.
#[derive(Debug, Default)]
pub struct TypeInterner {
    pool: HashMap<String, TypeRef>,
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            pool: HashMap::new(),
        }
    }

    pub fn intern(&mut self, ty: Type) -> TypeRef {
        let key = ty.to_string();
        Rc::clone(self.pool.entry(key).or_insert_with(|| Rc::new(ty)))
    }

    pub fn base(&mut self, name: &str) -> TypeRef {
        self.intern(Type::Base(String::from(name)))
    }

    pub fn array(&mut self, elem: TypeCell) -> TypeRef {
        self.intern(Type::Array(elem))
    }

    pub fn hashmap(&mut self, key: TypeCell, value: TypeCell) -> TypeRef {
        self.intern(Type::HashMap(key, value))
    }

    pub fn int(&mut self) -> TypeRef {
        self.base(INT)
    }

    pub fn float(&mut self) -> TypeRef {
        self.base(FLOAT)
    }

    pub fn bool(&mut self) -> TypeRef {
        self.base(BOOL)
    }

    pub fn string(&mut self) -> TypeRef {
        self.base(STRING)
    }

    pub fn char(&mut self) -> TypeRef {
        self.base(CHAR)
    }

    /// Compares two types, letting an unresolved child on either side adopt
    /// the other side's concrete child for the duration of this comparison.
    pub fn equals(&mut self, a: &TypeRef, b: &TypeRef) -> bool {
        self.unify(a, b).is_some()
    }

    /// Returns the canonical type both operands agree on, with every child
    /// resolved that either side knows. Neither operand is modified.
    pub fn unify(&mut self, a: &TypeRef, b: &TypeRef) -> Option<TypeRef> {
        if Rc::ptr_eq(a, b) {
            return Some(Rc::clone(a));
        }

        match (a.as_ref(), b.as_ref()) {
            (Type::Base(left), Type::Base(right)) => (left == right).then(|| Rc::clone(a)),
            (Type::Array(left), Type::Array(right)) => {
                let elem = self.unify_cells(left, right)?;
                Some(self.array(elem))
            }
            (Type::HashMap(left_key, left_value), Type::HashMap(right_key, right_value)) => {
                let key = self.unify_cells(left_key, right_key)?;
                let value = self.unify_cells(left_value, right_value)?;
                Some(self.hashmap(key, value))
            }
            _ => None,
        }
    }

    fn unify_cells(&mut self, a: &TypeCell, b: &TypeCell) -> Option<TypeCell> {
        match (a, b) {
            (TypeCell::Resolved(left), TypeCell::Resolved(right)) => {
                self.unify(left, right).map(TypeCell::Resolved)
            }
            (TypeCell::Unresolved, TypeCell::Unresolved) => Some(TypeCell::Unresolved),
            (TypeCell::Unresolved, TypeCell::Resolved(known))
            | (TypeCell::Resolved(known), TypeCell::Unresolved) => {
                let mut cell = a.clone();
                cell.adopt(Rc::clone(known)).ok()?;
                Some(cell)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn reset(&mut self) {
        self.pool.clear();
    }
}
