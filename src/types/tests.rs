//! Unit tests for the type model and the interner.

use std::rc::Rc;

use super::{
    interner::TypeInterner,
    types::{display_types, Type, TypeCell},
};

#[test]
fn test_interning_returns_same_instance() {
    let mut interner = TypeInterner::new();

    let a = interner.int();
    let b = interner.base("int");
    assert!(Rc::ptr_eq(&a, &b));

    let arr1 = interner.array(TypeCell::Resolved(Rc::clone(&a)));
    let arr2 = interner.array(TypeCell::Resolved(b));
    assert!(Rc::ptr_eq(&arr1, &arr2));

    assert_eq!(interner.len(), 2);
}

#[test]
fn test_reset_clears_pool() {
    let mut interner = TypeInterner::new();

    let before = interner.string();
    interner.reset();
    assert!(interner.is_empty());

    let after = interner.string();
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(before, after);
}

#[test]
fn test_display() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let string = interner.string();

    let array = interner.array(TypeCell::Resolved(Rc::clone(&int)));
    assert_eq!(array.to_string(), "int[]");

    let nested = interner.array(TypeCell::Resolved(Rc::clone(&array)));
    assert_eq!(nested.to_string(), "int[][]");

    let map = interner.hashmap(
        TypeCell::Resolved(Rc::clone(&int)),
        TypeCell::Resolved(Rc::clone(&string)),
    );
    assert_eq!(map.to_string(), "int[string]");

    let empty_array = interner.array(TypeCell::Unresolved);
    assert_eq!(empty_array.to_string(), "unknown[]");

    let empty_map = interner.hashmap(TypeCell::Unresolved, TypeCell::Unresolved);
    assert_eq!(empty_map.to_string(), "unknown[unknown]");

    assert_eq!(Type::Base(String::new()).to_string(), "unknown");
    assert_eq!(display_types(&[]), "()");
    assert_eq!(display_types(&[Rc::clone(&int), string]), "(int, string)");
}

#[test]
fn test_equals_is_reflexive_and_symmetric() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let float = interner.float();
    let array = interner.array(TypeCell::Resolved(Rc::clone(&int)));

    assert!(interner.equals(&int, &int));
    assert!(interner.equals(&array, &array));
    assert!(!interner.equals(&int, &float));
    assert!(!interner.equals(&float, &int));
    assert!(!interner.equals(&int, &array));
    assert!(!interner.equals(&array, &int));
}

#[test]
fn test_unify_resolves_empty_array() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let declared = interner.array(TypeCell::Resolved(int));
    let empty = interner.array(TypeCell::Unresolved);

    let unified = interner.unify(&declared, &empty).unwrap();
    assert!(Rc::ptr_eq(&unified, &declared));

    let unified = interner.unify(&empty, &declared).unwrap();
    assert!(Rc::ptr_eq(&unified, &declared));

    // The shared empty type is never changed by a comparison
    assert_eq!(empty.to_string(), "unknown[]");
}

#[test]
fn test_unify_nested_and_hashmap() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let boolean = interner.bool();

    let inner_empty = interner.array(TypeCell::Unresolved);
    let outer_empty = interner.array(TypeCell::Resolved(inner_empty));
    let inner = interner.array(TypeCell::Resolved(Rc::clone(&int)));
    let outer = interner.array(TypeCell::Resolved(inner));

    let unified = interner.unify(&outer_empty, &outer).unwrap();
    assert_eq!(unified.to_string(), "int[][]");

    let map = interner.hashmap(
        TypeCell::Resolved(Rc::clone(&int)),
        TypeCell::Resolved(Rc::clone(&boolean)),
    );
    let empty_map = interner.hashmap(TypeCell::Unresolved, TypeCell::Unresolved);
    assert_eq!(interner.unify(&map, &empty_map).unwrap().to_string(), "int[bool]");

    let other_map = interner.hashmap(
        TypeCell::Resolved(boolean),
        TypeCell::Resolved(int),
    );
    assert!(interner.unify(&map, &other_map).is_none());
}

#[test]
fn test_cell_adopts_once() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let string = interner.string();

    let mut cell = TypeCell::Unresolved;
    assert!(!cell.is_resolved());

    assert!(cell.adopt(Rc::clone(&int)).is_ok());
    assert!(cell.is_resolved());
    assert_eq!(cell.get().unwrap().to_string(), "int");

    // Same type again is fine
    assert!(cell.adopt(Rc::clone(&int)).is_ok());

    // A conflicting type is rejected and the cell keeps its type
    let existing = cell.adopt(string).unwrap_err();
    assert_eq!(existing.to_string(), "int");
    assert_eq!(cell.get().unwrap().to_string(), "int");
}

#[test]
fn test_compatibility_helpers() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let float = interner.float();
    let empty = interner.array(TypeCell::Unresolved);
    let array = interner.array(TypeCell::Resolved(Rc::clone(&int)));

    assert!(int.is_numeric());
    assert!(float.is_numeric());
    assert!(!array.is_numeric());
    assert!(array.is_container());
    assert!(empty.is_compatible(&array));
    assert!(array.is_compatible(&empty));
    assert!(array.is_fully_resolved());
    assert!(!empty.is_fully_resolved());
}
