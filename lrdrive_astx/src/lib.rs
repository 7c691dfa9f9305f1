use lrdrive_runtime::parser::{Diagnostic, ParseError, Parser};

pub mod ast;
pub mod context;
pub mod error;
pub mod lexer;
pub mod tables;
pub mod token;

use crate::ast::{Node, StmtList};
use crate::lexer::Lexer;
use crate::tables::TABLES;
use crate::token::TokenType;

pub type Error = ParseError<TokenType, Node>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    pub stmts: StmtList,
    /// Syntax errors the parser recovered from
    pub diagnostics: Vec<Diagnostic<TokenType>>,
}

pub fn parse(src: &str) -> Result<Parsed, Error> {
    let mut parser = Parser::new(&*TABLES);
    let res = parser.parse(Lexer::new(src))?;

    let stmts = match res.into_value() {
        Some(Node::StmtList(x)) => x,
        other => panic!("The start symbol produced {:?} instead of a statement list", other),
    };
    Ok(Parsed {
        stmts,
        diagnostics: parser.diagnostics().to_vec(),
    })
}
