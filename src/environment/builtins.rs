use std::rc::Rc;

use crate::{
    errors::errors::ErrorImpl,
    types::{
        interner::TypeInterner,
        types::{Type, TypeCell, TypeRef, BOOL, CHAR, INT, STRING},
    },
};

/// Functions every program can call without declaring them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Print,
    Println,
    Scan,
    Scanln,
    Len,
    ToString,
    ToFloat,
    ToInt,
    Push,
    Pop,
    Insert,
    Remove,
    Delete,
    GetIndex,
    Keys,
    Values,
    ContainsKey,
    TypeOf,
    Slice,
    Equals,
    Copy,
}

impl Builtin {
    pub const ALL: [Builtin; 21] = [
        Builtin::Print,
        Builtin::Println,
        Builtin::Scan,
        Builtin::Scanln,
        Builtin::Len,
        Builtin::ToString,
        Builtin::ToFloat,
        Builtin::ToInt,
        Builtin::Push,
        Builtin::Pop,
        Builtin::Insert,
        Builtin::Remove,
        Builtin::Delete,
        Builtin::GetIndex,
        Builtin::Keys,
        Builtin::Values,
        Builtin::ContainsKey,
        Builtin::TypeOf,
        Builtin::Slice,
        Builtin::Equals,
        Builtin::Copy,
    ];

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Println => "println",
            Builtin::Scan => "scan",
            Builtin::Scanln => "scanln",
            Builtin::Len => "len",
            Builtin::ToString => "toString",
            Builtin::ToFloat => "toFloat",
            Builtin::ToInt => "toInt",
            Builtin::Push => "push",
            Builtin::Pop => "pop",
            Builtin::Insert => "insert",
            Builtin::Remove => "remove",
            Builtin::Delete => "delete",
            Builtin::GetIndex => "getIndex",
            Builtin::Keys => "keys",
            Builtin::Values => "values",
            Builtin::ContainsKey => "containsKey",
            Builtin::TypeOf => "typeOf",
            Builtin::Slice => "slice",
            Builtin::Equals => "equals",
            Builtin::Copy => "copy",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Builtin::Print => "`print(value)`",
            Builtin::Println => "`println()` or `println(value)`",
            Builtin::Scan => "`scan()`, `scan(prompt)` or `scan(prompt, newline)`",
            Builtin::Scanln => "`scanln()`, `scanln(prompt)` or `scanln(prompt, newline)`",
            Builtin::Len => "`len(array/hashmap/string)`",
            Builtin::ToString => "`toString(value)`",
            Builtin::ToFloat => "`toFloat(int/float/string)`",
            Builtin::ToInt => "`toInt(int/float/string/char)`",
            Builtin::Push => "`push(array, element)` or `push(map, key, value)`",
            Builtin::Pop => "`pop(array)` or `pop(array, index)`",
            Builtin::Insert => "`insert(array, index, element)`",
            Builtin::Remove => "`remove(array, element)` or `remove(map, key)`",
            Builtin::Delete => "`delete(array, element)` or `delete(map, key)`",
            Builtin::GetIndex => "`getIndex(array, element)`",
            Builtin::Keys => "`keys(map)`",
            Builtin::Values => "`values(map)`",
            Builtin::ContainsKey => "`containsKey(map, key)`",
            Builtin::TypeOf => "`typeOf(value)`",
            Builtin::Slice => "`slice(array/string, start, end)` or `slice(array/string, start, end, step)`",
            Builtin::Equals => "`equals(a, b)`",
            Builtin::Copy => "`copy(array/hashmap)`",
        }
    }

    fn error(&self, message: String) -> ErrorImpl {
        ErrorImpl::BuiltinArgumentError {
            function: String::from(self.name()),
            message,
            usage: String::from(self.usage()),
        }
    }

    fn arity(&self, args: &[TypeRef], allowed: &[usize]) -> Result<(), ErrorImpl> {
        if allowed.contains(&args.len()) {
            return Ok(());
        }

        let want = allowed
            .iter()
            .map(|count| count.to_string())
            .collect::<Vec<String>>()
            .join(" or ");

        Err(self.error(format!(
            "wrong number of arguments, got: {}, want: {}",
            args.len(),
            want
        )))
    }

    fn expect_base(&self, ty: &TypeRef, name: &str, what: &str) -> Result<(), ErrorImpl> {
        if ty.is_base(name) {
            Ok(())
        } else {
            Err(self.error(format!("{} must be `{}`, got: `{}`", what, name, ty)))
        }
    }

    /// `ty` must fit into a container slot whose type may still be unknown.
    fn expect_cell(
        &self,
        interner: &mut TypeInterner,
        cell: &TypeCell,
        ty: &TypeRef,
        what: &str,
    ) -> Result<(), ErrorImpl> {
        match cell.get() {
            Some(expected) if !interner.equals(expected, ty) => Err(self.error(format!(
                "{} type mismatch, expected: `{}`, got: `{}`",
                what, expected, ty
            ))),
            _ => Ok(()),
        }
    }

    fn resolved(&self, cell: &TypeCell, container: &str) -> Result<TypeRef, ErrorImpl> {
        cell.get().map(Rc::clone).ok_or_else(|| {
            self.error(format!("{} is empty, its element type is unknown", container))
        })
    }

    fn unsupported(&self, ty: &TypeRef, want: &str) -> ErrorImpl {
        self.error(format!("argument not supported, got: `{}`, want: {}", ty, want))
    }

    /// Checks already typed, single-valued arguments and returns the result
    /// types of the call.
    pub fn check(
        &self,
        args: &[TypeRef],
        interner: &mut TypeInterner,
    ) -> Result<Vec<TypeRef>, ErrorImpl> {
        match self {
            Builtin::Print => {
                self.arity(args, &[1])?;
                Ok(vec![])
            }
            Builtin::Println => {
                self.arity(args, &[0, 1])?;
                Ok(vec![])
            }
            Builtin::Scan | Builtin::Scanln => {
                self.arity(args, &[0, 1, 2])?;
                if let Some(prompt) = args.first() {
                    self.expect_base(prompt, STRING, "prompt")?;
                }
                if let Some(newline) = args.get(1) {
                    self.expect_base(newline, BOOL, "newline flag")?;
                }
                Ok(vec![interner.string()])
            }
            Builtin::Len => {
                self.arity(args, &[1])?;
                if !args[0].is_container() && !args[0].is_base(STRING) {
                    return Err(self.unsupported(&args[0], "array, hashmap or `string`"));
                }
                Ok(vec![interner.int()])
            }
            Builtin::ToString => {
                self.arity(args, &[1])?;
                Ok(vec![interner.string()])
            }
            Builtin::ToInt => {
                self.arity(args, &[1])?;
                if args[0].is_container() || args[0].is_base(BOOL) {
                    return Err(self.unsupported(&args[0], "`int`, `float`, `string` or `char`"));
                }
                Ok(vec![interner.int()])
            }
            Builtin::ToFloat => {
                self.arity(args, &[1])?;
                if args[0].is_container() || args[0].is_base(BOOL) || args[0].is_base(CHAR) {
                    return Err(self.unsupported(&args[0], "`int`, `float` or `string`"));
                }
                Ok(vec![interner.float()])
            }
            Builtin::TypeOf => {
                self.arity(args, &[1])?;
                Ok(vec![interner.string()])
            }
            Builtin::Push => {
                self.arity(args, &[2, 3])?;
                match args[0].as_ref() {
                    Type::Array(elem) => {
                        self.arity(args, &[2])?;
                        self.expect_cell(interner, elem, &args[1], "element")?;
                    }
                    Type::HashMap(key, value) => {
                        self.arity(args, &[3])?;
                        self.expect_cell(interner, key, &args[1], "key")?;
                        self.expect_cell(interner, value, &args[2], "value")?;
                    }
                    Type::Base(_) => return Err(self.unsupported(&args[0], "array or hashmap")),
                }
                Ok(vec![Rc::clone(&args[0])])
            }
            Builtin::Pop => {
                self.arity(args, &[1, 2])?;
                let Type::Array(elem) = args[0].as_ref() else {
                    return Err(self.unsupported(&args[0], "array"));
                };
                if let Some(index) = args.get(1) {
                    self.expect_base(index, INT, "index")?;
                }
                Ok(vec![self.resolved(elem, "array")?])
            }
            Builtin::Insert => {
                self.arity(args, &[3])?;
                let Type::Array(elem) = args[0].as_ref() else {
                    return Err(self.unsupported(&args[0], "array"));
                };
                self.expect_base(&args[1], INT, "index")?;
                self.expect_cell(interner, elem, &args[2], "element")?;
                Ok(vec![Rc::clone(&args[0])])
            }
            Builtin::Remove => {
                self.arity(args, &[2])?;
                match args[0].as_ref() {
                    Type::Array(elem) => self.expect_cell(interner, elem, &args[1], "element")?,
                    Type::HashMap(key, _) => self.expect_cell(interner, key, &args[1], "key")?,
                    Type::Base(_) => return Err(self.unsupported(&args[0], "array or hashmap")),
                }
                Ok(vec![Rc::clone(&args[0])])
            }
            Builtin::Delete => {
                self.arity(args, &[2])?;
                match args[0].as_ref() {
                    Type::Array(elem) => {
                        self.expect_cell(interner, elem, &args[1], "element")?;
                        Ok(vec![self.resolved(elem, "array")?])
                    }
                    Type::HashMap(key, value) => {
                        self.expect_cell(interner, key, &args[1], "key")?;
                        Ok(vec![self.resolved(value, "hashmap")?])
                    }
                    Type::Base(_) => Err(self.unsupported(&args[0], "array or hashmap")),
                }
            }
            Builtin::GetIndex => {
                self.arity(args, &[2])?;
                let Type::Array(elem) = args[0].as_ref() else {
                    return Err(self.unsupported(&args[0], "array"));
                };
                self.expect_cell(interner, elem, &args[1], "element")?;
                Ok(vec![interner.int()])
            }
            Builtin::Keys | Builtin::Values => {
                self.arity(args, &[1])?;
                let Type::HashMap(key, value) = args[0].as_ref() else {
                    return Err(self.unsupported(&args[0], "hashmap"));
                };
                let cell = if *self == Builtin::Keys { key } else { value };
                Ok(vec![interner.array(cell.clone())])
            }
            Builtin::ContainsKey => {
                self.arity(args, &[2])?;
                let Type::HashMap(key, _) = args[0].as_ref() else {
                    return Err(self.unsupported(&args[0], "hashmap"));
                };
                self.expect_cell(interner, key, &args[1], "key")?;
                Ok(vec![interner.bool()])
            }
            Builtin::Slice => {
                self.arity(args, &[3, 4])?;
                if !args[0].is_array() && !args[0].is_base(STRING) {
                    return Err(self.unsupported(&args[0], "array or `string`"));
                }
                self.expect_base(&args[1], INT, "start index")?;
                self.expect_base(&args[2], INT, "end index")?;
                if let Some(step) = args.get(3) {
                    self.expect_base(step, INT, "step")?;
                }
                Ok(vec![Rc::clone(&args[0])])
            }
            Builtin::Copy => {
                self.arity(args, &[1])?;
                if !args[0].is_container() {
                    return Err(self.unsupported(&args[0], "array or hashmap"));
                }
                Ok(vec![Rc::clone(&args[0])])
            }
            Builtin::Equals => {
                self.arity(args, &[2])?;
                if !interner.equals(&args[0], &args[1]) {
                    return Err(self.error(format!(
                        "arguments must have the same type, got: `{}` and `{}`",
                        args[0], args[1]
                    )));
                }
                Ok(vec![interner.bool()])
            }
        }
    }
}
