use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("const", TokenKind::Const);
        map.insert("fun", TokenKind::Fun);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("continue", TokenKind::Continue);
        map.insert("break", TokenKind::Break);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::Bool);
        map.insert("false", TokenKind::Bool);
        map.insert("int", TokenKind::Type);
        map.insert("float", TokenKind::Type);
        map.insert("bool", TokenKind::Type);
        map.insert("string", TokenKind::Type);
        map.insert("char", TokenKind::Type);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    Float,
    Bool,
    String,
    Char,
    Identifier,
    Type,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Colon,
    Semicolon,
    Comma,
    Dot,

    Equals,    // ==
    NotEquals, // !=
    LessEquals,
    GreaterEquals,
    Less,
    Greater,

    PlusPlus,
    PlusEquals,
    Plus,
    MinusMinus,
    MinusEquals,
    Dash,
    StarEquals,
    Star,
    SlashEquals,
    Slash,
    PercentEquals,
    Percent,

    AndAnd,
    OrOr,
    And, // &
    Or,  // |

    Assignment, // =
    Not,        // !

    // Reserved
    Var,
    Const,
    Fun,
    If,
    Else,
    ElseIf,
    For,
    While,
    Continue,
    Break,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn position(&self) -> Position {
        self.span.start.clone()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "\"{}\"", self.value),
            TokenKind::Char => write!(f, "'{}'", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}
