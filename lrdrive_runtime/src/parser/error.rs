use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use thiserror::Error;

use crate::loc::Pos;
use crate::parser::Attrib;
use crate::token::Token;

/// Error returned by semantic actions
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Context of a syntax error.
/// Pushed on the stack as the error pseudo-token's attribute when the parser recovers, returned
/// inside `ParseError::Syntax` when it cannot.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxError<T, V> {
    /// Top state when the error was detected
    pub state: u32,
    /// Lookahead that had no action
    pub token: Token<T>,
    /// Terminals accepted by `state`
    pub expected: Vec<T>,
    /// Attributes popped while searching a recovery state, bottom to top
    pub discarded: Vec<Attrib<T, V>>,
    /// Input tokens thrown away while resynchronizing, the offending one included
    pub skipped: Vec<Token<T>>,
}

impl<T: Clone, V> SyntaxError<T, V> {
    pub fn diagnostic(&self) -> Diagnostic<T> {
        Diagnostic {
            state: self.state,
            token: self.token.clone(),
            expected: self.expected.clone(),
            discarded: self.discarded.len(),
            skipped: self.skipped.len(),
        }
    }
}

fn write_error<T: Debug>(f: &mut Formatter<'_>, state: u32, token: &Token<T>, expected: &[T]) -> fmt::Result {
    write!(f, "Error in S{}: {}, {}, expected one of: ", state, token, token.pos)?;
    for (i, t) in expected.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{:?}", t)?;
    }
    Ok(())
}

impl<T: Debug, V> Display for SyntaxError<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_error(f, self.state, &self.token, &self.expected)
    }
}

impl<T: Debug, V: Debug> std::error::Error for SyntaxError<T, V> {}

/// A syntax error the parser recovered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic<T> {
    pub state: u32,
    pub token: Token<T>,
    pub expected: Vec<T>,
    /// Number of stack entries discarded
    pub discarded: usize,
    /// Number of input tokens discarded
    pub skipped: usize,
}

impl<T: Debug> Display for Diagnostic<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_error(f, self.state, &self.token, &self.expected)
    }
}

#[derive(Debug, Error)]
pub enum ParseError<T: Debug, V: Debug> {
    #[error("{0}")]
    Syntax(Box<SyntaxError<T, V>>),
    #[error("Error in S{state}: {token}, {pos}, {rule}: {source}")]
    Semantic {
        /// Top state once the production's entries were popped
        state: u32,
        production: u32,
        rule: &'static str,
        token: Token<T>,
        pos: Pos,
        #[source]
        source: ActionError,
    },
}

impl<T: Debug, V: Debug> ParseError<T, V> {
    /// Lookahead when the parse stopped
    pub fn token(&self) -> &Token<T> {
        match self {
            ParseError::Syntax(x) => &x.token,
            ParseError::Semantic { token, .. } => token,
        }
    }

    /// Terminals that would have been accepted, empty for semantic errors.
    pub fn expected(&self) -> &[T] {
        match self {
            ParseError::Syntax(x) => &x.expected,
            ParseError::Semantic { .. } => &[],
        }
    }

    pub fn as_syntax(&self) -> Option<&SyntaxError<T, V>> {
        match self {
            ParseError::Syntax(x) => Some(x),
            ParseError::Semantic { .. } => None,
        }
    }
}
