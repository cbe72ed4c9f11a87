use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Broad category an error belongs to, used by callers that only care
/// about which phase of checking rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Scope,
    Type,
    Structural,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NoPrefixParser { .. } => "NoPrefixParser",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidHashMapKey { .. } => "InvalidHashMapKey",
            ErrorImpl::InvalidCallee => "InvalidCallee",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::InvalidExpressionStatement { .. } => "InvalidExpressionStatement",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::IdentifierIsFunction { .. } => "IdentifierIsFunction",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::ConstantRedeclared { .. } => "ConstantRedeclared",
            ErrorImpl::VariableRedeclaredWithType { .. } => "VariableRedeclaredWithType",
            ErrorImpl::ConstantReassigned { .. } => "ConstantReassigned",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::SingleValueExpected { .. } => "SingleValueExpected",
            ErrorImpl::InvalidInfixOperation { .. } => "InvalidInfixOperation",
            ErrorImpl::InvalidPrefixOperation { .. } => "InvalidPrefixOperation",
            ErrorImpl::InvalidPostfixOperation { .. } => "InvalidPostfixOperation",
            ErrorImpl::InvalidIndexTarget { .. } => "InvalidIndexTarget",
            ErrorImpl::EmptyContainerIndex { .. } => "EmptyContainerIndex",
            ErrorImpl::ConflictingElementTypes { .. } => "ConflictingElementTypes",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::BuiltinArgumentError { .. } => "BuiltinArgumentError",
            ErrorImpl::MultiAssignCountMismatch { .. } => "MultiAssignCountMismatch",
            ErrorImpl::MultiAssignExpectedCall => "MultiAssignExpectedCall",
            ErrorImpl::ReturnCountMismatch { .. } => "ReturnCountMismatch",
            ErrorImpl::MissingInitializer { .. } => "MissingInitializer",
            ErrorImpl::InvalidForLoop { .. } => "InvalidForLoop",
            ErrorImpl::FunctionInsideFunction => "FunctionInsideFunction",
            ErrorImpl::OutsideFunction { .. } => "OutsideFunction",
            ErrorImpl::OutsideLoop { .. } => "OutsideLoop",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::FunctionSignatureMismatch { .. } => "FunctionSignatureMismatch",
            ErrorImpl::BuiltinOverride { .. } => "BuiltinOverride",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NoPrefixParser { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidHashMapKey { .. }
            | ErrorImpl::InvalidCallee
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::InvalidExpressionStatement { .. } => ErrorKind::Syntax,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::IdentifierIsFunction { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::ConstantRedeclared { .. }
            | ErrorImpl::VariableRedeclaredWithType { .. } => ErrorKind::Scope,
            ErrorImpl::ConstantReassigned { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::SingleValueExpected { .. }
            | ErrorImpl::InvalidInfixOperation { .. }
            | ErrorImpl::InvalidPrefixOperation { .. }
            | ErrorImpl::InvalidPostfixOperation { .. }
            | ErrorImpl::InvalidIndexTarget { .. }
            | ErrorImpl::EmptyContainerIndex { .. }
            | ErrorImpl::ConflictingElementTypes { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::BuiltinArgumentError { .. }
            | ErrorImpl::MultiAssignCountMismatch { .. }
            | ErrorImpl::MultiAssignExpectedCall
            | ErrorImpl::ReturnCountMismatch { .. }
            | ErrorImpl::MissingInitializer { .. }
            | ErrorImpl::InvalidForLoop { .. } => ErrorKind::Type,
            ErrorImpl::FunctionInsideFunction
            | ErrorImpl::OutsideFunction { .. }
            | ErrorImpl::OutsideLoop { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::FunctionSignatureMismatch { .. }
            | ErrorImpl::BuiltinOverride { .. }
            | ErrorImpl::MissingReturn { .. } => ErrorKind::Structural,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NoPrefixParser { .. } => ErrorTip::Suggestion(String::from(
                "An expression can't start with this token",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidHashMapKey { .. } => ErrorTip::Suggestion(String::from(
                "Hashmap keys must be `int`, `float`, `bool`, `string` or `char` literals",
            )),
            ErrorImpl::InvalidCallee => ErrorTip::Suggestion(String::from(
                "Only functions can be called, by name",
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables can be assigned to",
            )),
            ErrorImpl::InvalidExpressionStatement { .. } => ErrorTip::Suggestion(String::from(
                "Only calls, `++`/`--` and assignments can be used as statements",
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::IdentifierIsFunction { name } => {
                ErrorTip::Suggestion(format!("Did you mean to call it as `{}(...)`?", name))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::ConstantRedeclared { .. } => ErrorTip::Suggestion(String::from(
                "Constants can't be redeclared, pick another name",
            )),
            ErrorImpl::VariableRedeclaredWithType { declared, .. } => ErrorTip::Suggestion(
                format!("Redeclare it as `{}` or pick another name", declared),
            ),
            ErrorImpl::ConstantReassigned { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `var` to make it mutable",
                variable
            )),
            ErrorImpl::TypeMatchError {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::SingleValueExpected { .. } => ErrorTip::Suggestion(String::from(
                "Calls used here must return exactly one value",
            )),
            ErrorImpl::InvalidInfixOperation { .. }
            | ErrorImpl::InvalidPrefixOperation { .. }
            | ErrorImpl::InvalidPostfixOperation { .. } => ErrorTip::None,
            ErrorImpl::InvalidIndexTarget { .. } => ErrorTip::Suggestion(String::from(
                "Only arrays, hashmaps and strings can be indexed",
            )),
            ErrorImpl::EmptyContainerIndex { .. } => ErrorTip::Suggestion(String::from(
                "Give the container a declared type before indexing it",
            )),
            ErrorImpl::ConflictingElementTypes { .. } => ErrorTip::Suggestion(String::from(
                "Every element of a literal must have the same type",
            )),
            ErrorImpl::UnexpectedArguments { expected, received, .. } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::ArgumentTypeMatchError { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::BuiltinArgumentError { usage, .. } => {
                ErrorTip::Suggestion(format!("Usage: {}", usage))
            }
            ErrorImpl::MultiAssignCountMismatch { .. } => ErrorTip::Suggestion(String::from(
                "Give one value per target, or a single call returning one value per target",
            )),
            ErrorImpl::MultiAssignExpectedCall => ErrorTip::Suggestion(String::from(
                "A single value on the right must be a call returning several values",
            )),
            ErrorImpl::ReturnCountMismatch { .. } => ErrorTip::Suggestion(String::from(
                "Return multiple values with `return: (val1, val2, ...)`",
            )),
            ErrorImpl::MissingInitializer { suggestion, .. } => {
                ErrorTip::Suggestion(suggestion.clone())
            }
            ErrorImpl::InvalidForLoop { .. } => ErrorTip::Suggestion(String::from(
                "Use `for: (var i: int = 0; i < n; i++): { ... }`",
            )),
            ErrorImpl::FunctionInsideFunction => ErrorTip::Suggestion(String::from(
                "Declare the function at the top level",
            )),
            ErrorImpl::OutsideFunction { .. } => ErrorTip::Suggestion(String::from(
                "Everything must be inside a function",
            )),
            ErrorImpl::OutsideLoop { .. } => ErrorTip::None,
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::FunctionSignatureMismatch { .. } => ErrorTip::Suggestion(String::from(
                "The definition must repeat the forward declaration's parameters and return types",
            )),
            ErrorImpl::BuiltinOverride { function } => {
                ErrorTip::Suggestion(format!("`{}` is a built-in function", function))
            }
            ErrorImpl::MissingReturn { .. } => ErrorTip::Suggestion(String::from(
                "Every branch must end with a `return` statement",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },

    // Syntax
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("no prefix parse function for {token:?}")]
    NoPrefixParser { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("key in a hashmap can only be a base type literal, got: {key}")]
    InvalidHashMapKey { key: String },
    #[error("function name in a call expression must be an identifier")]
    InvalidCallee,
    #[error("left side in an assignment operation must be an identifier")]
    InvalidAssignmentTarget,
    #[error("expected a function call, postfix expression or an assignment expression as a statement, got: {expression}")]
    InvalidExpressionStatement { expression: String },

    // Scope
    #[error("variable `{variable}` is undefined/not found")]
    VariableNotDeclared { variable: String },
    #[error("`{name}` is a function, did you mean to call it as `{name}(...)`?")]
    IdentifierIsFunction { name: String },
    #[error("function `{function}` not found")]
    FunctionNotDeclared { function: String },
    #[error("variable `{variable}` is a constant, can't re-declare const variables")]
    ConstantRedeclared { variable: String },
    #[error("variable `{variable}` already declared as `{declared}` can't re-declare as `{received}`")]
    VariableRedeclaredWithType {
        variable: String,
        declared: String,
        received: String,
    },

    // Type
    #[error("variable `{variable}` is a constant, can't re-assign value to a constant variable")]
    ConstantReassigned { variable: String },
    #[error("type mismatch in {context}, expected: `{expected}`, got: `{received}`")]
    TypeMatchError {
        context: String,
        expected: String,
        received: String,
    },
    #[error("{context} must be a single value, got {received} values")]
    SingleValueExpected { context: String, received: usize },
    #[error("invalid infix operation `{operator}` with `{left}` and `{right}`")]
    InvalidInfixOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("invalid prefix operation `{operator}` on `{operand}`")]
    InvalidPrefixOperation { operator: String, operand: String },
    #[error("invalid postfix operation `{operator}` on `{operand}`")]
    InvalidPostfixOperation { operator: String, operand: String },
    #[error("can't index into `{target}`")]
    InvalidIndexTarget { target: String },
    #[error("{container} is empty, can't index empty {container}")]
    EmptyContainerIndex { container: String },
    #[error("{literal} literal elements have conflicting types: `{expected}` and `{received}`")]
    ConflictingElementTypes {
        literal: String,
        expected: String,
        received: String,
    },
    #[error("number of arguments does not match the number of parameters for function `{function}`, got: {received}, expected: {expected}")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("type mismatch for argument at position {position} for function call `{function}`, expected: `{expected}`, got: `{received}`")]
    ArgumentTypeMatchError {
        function: String,
        position: usize,
        expected: String,
        received: String,
    },
    #[error("invalid arguments for `{function}`: {message}")]
    BuiltinArgumentError {
        function: String,
        message: String,
        usage: String,
    },
    #[error("number of values on the right side of multi-assignment does not match the number of targets on the left, left: {targets}, right: {values}")]
    MultiAssignCountMismatch { targets: usize, values: usize },
    #[error("a single value on the right side of a multi-assignment must be a function call")]
    MultiAssignExpectedCall,
    #[error("function `{function}` expects {expected} return values, got {received}")]
    ReturnCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("`{name}` must be initialized while declaring")]
    MissingInitializer { name: String, suggestion: String },
    #[error("invalid `for` loop: {message}")]
    InvalidForLoop { message: String },

    // Structural
    #[error("can't declare a function inside a function")]
    FunctionInsideFunction,
    #[error("{statement} can only be used inside a function")]
    OutsideFunction { statement: String },
    #[error("`{statement}` statement can only be used inside a loop")]
    OutsideLoop { statement: String },
    #[error("can't declare a function twice, function with the same name `{function}` already exists")]
    FunctionAlreadyDeclared { function: String },
    #[error("function signature of `{function}` doesn't match with previously declared signature")]
    FunctionSignatureMismatch { function: String },
    #[error("can't override a built-in function, function `{function}` already exists")]
    BuiltinOverride { function: String },
    #[error("function `{function}` must have a `return` statement at the end of all branches")]
    MissingReturn { function: String },
}

/// Attaches a source position to a position-free check result.
pub trait ErrorAt<T> {
    fn at(self, position: &Position) -> Result<T, Error>;
}

impl<T> ErrorAt<T> for Result<T, ErrorImpl> {
    fn at(self, position: &Position) -> Result<T, Error> {
        self.map_err(|error| Error::new(error, position.clone()))
    }
}
