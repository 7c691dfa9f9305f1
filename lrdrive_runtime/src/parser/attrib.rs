use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::parser::SyntaxError;
use crate::token::Token;

/// Semantic value attached to every parse stack entry.
/// `V` is the grammar's own value type, tokens and recovery contexts are carried alongside it.
#[derive(Clone, Debug, PartialEq)]
pub enum Attrib<T, V> {
    /// Attribute of the bottom entry
    None,
    Token(Token<T>),
    Value(V),
    Error(Box<SyntaxError<T, V>>),
}

impl<T, V> Attrib<T, V> {
    pub fn is_none(&self) -> bool {
        match self {
            Attrib::None => true,
            _ => false,
        }
    }

    pub fn as_token(&self) -> Option<&Token<T>> {
        match self {
            Attrib::Token(x) => Some(x),
            _ => None,
        }
    }

    pub fn into_token(self) -> Option<Token<T>> {
        match self {
            Attrib::Token(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Attrib::Value(x) => Some(x),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            Attrib::Value(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&SyntaxError<T, V>> {
        match self {
            Attrib::Error(x) => Some(x),
            _ => None,
        }
    }

    pub fn into_error(self) -> Option<SyntaxError<T, V>> {
        match self {
            Attrib::Error(x) => Some(*x),
            _ => None,
        }
    }
}

impl<T: Debug, V: Debug> Display for Attrib<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Attrib::None => write!(f, "nil"),
            Attrib::Token(x) => write!(f, "{}", x),
            Attrib::Value(x) => write!(f, "{:?}", x),
            Attrib::Error(x) => write!(f, "<{}>", x),
        }
    }
}
