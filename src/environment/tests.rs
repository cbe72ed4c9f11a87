//! Unit tests for scopes, function records and built-in signatures.

use std::rc::Rc;

use super::{
    builtins::Builtin,
    environment::{Environment, SymbolKind},
    functions::{FunctionRecord, FunctionSignature, FunctionState, Parameter},
};
use crate::{
    errors::errors::ErrorImpl,
    types::{interner::TypeInterner, types::TypeCell},
    Position,
};

fn at() -> Position {
    Position(0, Rc::new("test.kl".to_string()))
}

fn signature(interner: &mut TypeInterner, name: &str, param: &str) -> FunctionSignature {
    FunctionSignature {
        name: name.to_string(),
        parameters: vec![Parameter {
            name: "a".to_string(),
            ty: interner.base(param),
        }],
        return_types: vec![interner.int()],
    }
}

#[test]
fn test_lookup_walks_outward() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("a", interner.int(), SymbolKind::Variable, at())
        .unwrap();
    env.enter_scope();
    env.define_variable("b", interner.bool(), SymbolKind::Variable, at())
        .unwrap();

    assert!(env.resolve_variable("a").is_some());
    assert!(env.resolve_variable("b").is_some());

    env.exit_scope();
    assert!(env.resolve_variable("a").is_some());
    assert!(env.resolve_variable("b").is_none());
}

#[test]
fn test_root_scope_is_never_popped() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("a", interner.int(), SymbolKind::Variable, at())
        .unwrap();
    env.exit_scope();
    env.exit_scope();

    assert!(env.resolve_variable("a").is_some());
    assert!(env.resolve_function("len").is_some());
}

#[test]
fn test_redeclare_variable_same_type() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("a", interner.int(), SymbolKind::Variable, at())
        .unwrap();
    env.enter_scope();
    assert!(env
        .define_variable("a", interner.int(), SymbolKind::Variable, at())
        .is_ok());
}

#[test]
fn test_redeclare_variable_other_type() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("a", interner.int(), SymbolKind::Variable, at())
        .unwrap();
    env.enter_scope();

    let error = env
        .define_variable("a", interner.string(), SymbolKind::Variable, at())
        .unwrap_err();
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::VariableRedeclaredWithType {
            variable: "a".to_string(),
            declared: "int".to_string(),
            received: "string".to_string(),
        }
    );
}

#[test]
fn test_redeclare_constant() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("a", interner.int(), SymbolKind::Constant, at())
        .unwrap();
    assert!(env.resolve_variable("a").unwrap().is_constant());

    let error = env
        .define_variable("a", interner.int(), SymbolKind::Constant, at())
        .unwrap_err();
    assert_eq!(error.get_error_name(), "ConstantRedeclared");
}

#[test]
fn test_forward_declaration_merges() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    let forward = signature(&mut interner, "f", "int");
    let definition = signature(&mut interner, "f", "int");

    env.define_function(FunctionRecord::declared(forward), at())
        .unwrap();
    assert_eq!(
        env.resolve_function("f").unwrap().state,
        FunctionState::Declared
    );

    env.define_function(FunctionRecord::defined(definition.clone()), at())
        .unwrap();
    assert_eq!(
        env.resolve_function("f").unwrap().state,
        FunctionState::Defined
    );

    let error = env
        .define_function(FunctionRecord::defined(definition), at())
        .unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionAlreadyDeclared");
}

#[test]
fn test_forward_declaration_mismatch() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_function(
        FunctionRecord::declared(signature(&mut interner, "f", "int")),
        at(),
    )
    .unwrap();

    let error = env
        .define_function(
            FunctionRecord::defined(signature(&mut interner, "f", "float")),
            at(),
        )
        .unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionSignatureMismatch");
}

#[test]
fn test_second_forward_declaration() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    let forward = signature(&mut interner, "f", "int");
    env.define_function(FunctionRecord::declared(forward.clone()), at())
        .unwrap();

    let error = env
        .define_function(FunctionRecord::declared(forward), at())
        .unwrap_err();
    assert_eq!(error.get_error_name(), "FunctionAlreadyDeclared");
}

#[test]
fn test_builtin_override() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    let error = env
        .define_function(
            FunctionRecord::defined(signature(&mut interner, "len", "int")),
            at(),
        )
        .unwrap_err();
    assert_eq!(error.get_error_name(), "BuiltinOverride");
}

#[test]
fn test_signature_matches_and_display() {
    let mut interner = TypeInterner::new();
    let a = signature(&mut interner, "f", "int");
    let b = signature(&mut interner, "f", "int");
    let mut renamed = b.clone();
    renamed.parameters[0].name = "b".to_string();

    assert!(a.matches(&b));
    assert!(!a.matches(&renamed));
    assert_eq!(a.to_string(), "f(a: int): (int)");

    let empty = FunctionSignature {
        name: "main".to_string(),
        parameters: vec![],
        return_types: vec![],
    };
    assert_eq!(empty.to_string(), "main()");
}

#[test]
fn test_builtin_lookup() {
    assert_eq!(Builtin::from_name("containsKey"), Some(Builtin::ContainsKey));
    assert_eq!(Builtin::from_name("nope"), None);

    for builtin in Builtin::ALL {
        assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
    }

    let env = Environment::new();
    assert_eq!(
        env.resolve_function("push").unwrap().as_builtin(),
        Some(Builtin::Push)
    );
}

#[test]
fn test_builtin_signatures() {
    let mut interner = TypeInterner::new();
    let int = interner.int();
    let string = interner.string();
    let boolean = interner.bool();
    let ints = interner.array(TypeCell::Resolved(Rc::clone(&int)));
    let map = interner.hashmap(
        TypeCell::Resolved(Rc::clone(&string)),
        TypeCell::Resolved(Rc::clone(&int)),
    );

    assert!(Builtin::Print.check(&[], &mut interner).is_err());
    assert!(Builtin::Println.check(&[], &mut interner).unwrap().is_empty());

    let result = Builtin::Len.check(&[Rc::clone(&ints)], &mut interner).unwrap();
    assert_eq!(result[0].to_string(), "int");
    assert!(Builtin::Len.check(&[Rc::clone(&int)], &mut interner).is_err());

    let result = Builtin::Push
        .check(&[Rc::clone(&ints), Rc::clone(&int)], &mut interner)
        .unwrap();
    assert!(Rc::ptr_eq(&result[0], &ints));
    assert!(Builtin::Push
        .check(&[Rc::clone(&ints), Rc::clone(&string)], &mut interner)
        .is_err());
    assert!(Builtin::Push
        .check(
            &[Rc::clone(&map), Rc::clone(&string), Rc::clone(&int)],
            &mut interner
        )
        .is_ok());

    let result = Builtin::Pop.check(&[Rc::clone(&ints)], &mut interner).unwrap();
    assert_eq!(result[0].to_string(), "int");

    let result = Builtin::Keys.check(&[Rc::clone(&map)], &mut interner).unwrap();
    assert_eq!(result[0].to_string(), "string[]");
    let result = Builtin::Values.check(&[Rc::clone(&map)], &mut interner).unwrap();
    assert_eq!(result[0].to_string(), "int[]");

    let result = Builtin::Delete
        .check(&[Rc::clone(&map), Rc::clone(&string)], &mut interner)
        .unwrap();
    assert_eq!(result[0].to_string(), "int");

    assert!(Builtin::ToInt.check(&[Rc::clone(&boolean)], &mut interner).is_err());
    let char_type = interner.char();
    assert!(Builtin::ToFloat.check(&[char_type], &mut interner).is_err());

    assert!(Builtin::Scan
        .check(&[Rc::clone(&string), Rc::clone(&boolean)], &mut interner)
        .is_ok());
    assert!(Builtin::Scan
        .check(&[Rc::clone(&boolean)], &mut interner)
        .is_err());

    assert!(Builtin::Equals
        .check(&[Rc::clone(&int), Rc::clone(&string)], &mut interner)
        .is_err());

    let result = Builtin::Slice
        .check(
            &[Rc::clone(&string), Rc::clone(&int), Rc::clone(&int)],
            &mut interner,
        )
        .unwrap();
    assert_eq!(result[0].to_string(), "string");
}

#[test]
fn test_builtin_error_carries_usage() {
    let mut interner = TypeInterner::new();
    let int = interner.int();

    let error = Builtin::Pop.check(&[int], &mut interner).unwrap_err();
    match error {
        ErrorImpl::BuiltinArgumentError {
            function, usage, ..
        } => {
            assert_eq!(function, "pop");
            assert_eq!(usage, "`pop(array)` or `pop(array, index)`");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_bind_parameter_shadows_outer_constant() {
    let mut interner = TypeInterner::new();
    let mut env = Environment::new();

    env.define_variable("x", interner.int(), SymbolKind::Constant, at())
        .unwrap();
    env.enter_scope();
    env.bind_parameter("x", interner.bool(), at()).unwrap();

    let symbol = env.resolve_variable("x").unwrap();
    assert!(!symbol.is_constant());
    assert_eq!(symbol.ty.to_string(), "bool");

    assert!(env.bind_parameter("x", interner.bool(), at()).is_ok());
    assert_eq!(
        env.bind_parameter("x", interner.int(), at())
            .unwrap_err()
            .get_error_name(),
        "VariableRedeclaredWithType"
    );

    env.exit_scope();
    assert!(env.resolve_variable("x").unwrap().is_constant());
}
