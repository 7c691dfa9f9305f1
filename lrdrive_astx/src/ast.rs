use std::fmt;
use std::fmt::{Display, Formatter};

use lrdrive_runtime::loc::Pos;
use lrdrive_runtime::parser;
use thiserror::Error;

use crate::token::TokenType;

pub type Attrib = parser::Attrib<TokenType, Node>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    Ident(String),
    /// Placeholder left by a recovered syntax error
    Invalid { text: String, pos: Pos },
}

pub type StmtList = Vec<Stmt>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    StmtList(StmtList),
    Stmt(Stmt),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("Expected {expected}, found {found}")]
    UnexpectedAttrib { expected: &'static str, found: String },
    #[error("Invalid identifier {0}, identifiers cannot start with a digit")]
    InvalidIdent(String),
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Ident(x) => write!(f, "{}", x),
            Stmt::Invalid { text, pos } => write!(f, "<invalid {:?} at {}>", text, pos),
        }
    }
}

fn unexpected(expected: &'static str, found: &Attrib) -> AstError {
    AstError::UnexpectedAttrib { expected, found: found.to_string() }
}

fn into_stmt(attrib: Attrib) -> Result<Stmt, AstError> {
    match attrib {
        Attrib::Value(Node::Stmt(x)) => Ok(x),
        x => Err(unexpected("a statement", &x)),
    }
}

pub fn new_stmt_list(stmt: Attrib) -> Result<Node, AstError> {
    Ok(Node::StmtList(vec![into_stmt(stmt)?]))
}

pub fn append_stmt(list: Attrib, stmt: Attrib) -> Result<Node, AstError> {
    let stmt = into_stmt(stmt)?;
    match list {
        Attrib::Value(Node::StmtList(mut list)) => {
            list.push(stmt);
            Ok(Node::StmtList(list))
        },
        x => Err(unexpected("a statement list", &x)),
    }
}

pub fn new_stmt(id: Attrib) -> Result<Node, AstError> {
    let token = match id {
        Attrib::Token(x) => x,
        x => return Err(unexpected("an identifier", &x)),
    };
    if token.text.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(AstError::InvalidIdent(token.text));
    }
    Ok(Node::Stmt(Stmt::Ident(token.text)))
}

pub fn new_error_stmt(error: Attrib) -> Result<Node, AstError> {
    match error {
        Attrib::Error(err) => Ok(Node::Stmt(Stmt::Invalid {
            text: err.token.text.clone(),
            pos: err.token.pos,
        })),
        x => Err(unexpected("a syntax error", &x)),
    }
}
