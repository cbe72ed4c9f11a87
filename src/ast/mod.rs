/// AST (Abstract Syntax Tree) module
/// Contains the typed tree produced by the parser
///
/// Submodules:
/// - ast: `Expr`, `Stmt`, `StatementExpr`, `Program` and the `Typed` trait
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - display: Canonical surface rendering used for round-trip printing
pub mod ast;
pub mod display;
pub mod expressions;
pub mod statements;
