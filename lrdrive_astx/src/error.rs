use lrdrive_runtime::loc::Pos;
use lrdrive_runtime::parser::{Diagnostic, ParseError};

use crate::ast::Node;
use crate::token::TokenType;

pub trait CompilationError {
    fn error_type(&self) -> String;

    fn loc(&self) -> Option<Pos>;

    fn summarize(&self) -> String;

    fn description(&self) -> String;
}

fn expected_list(expected: &[TokenType]) -> String {
    let names: Vec<String> = expected.iter().map(|x| format!("{:?}", x)).collect();
    names.join(", ")
}

impl CompilationError for Diagnostic<TokenType> {
    fn error_type(&self) -> String {
        "Syntax error (recovered)".to_owned()
    }

    fn loc(&self) -> Option<Pos> {
        Some(self.token.pos)
    }

    fn summarize(&self) -> String {
        format!("Unexpected {}", self.token)
    }

    fn description(&self) -> String {
        format!("Expected one of: {}, skipped {} token(s)", expected_list(&self.expected), self.skipped)
    }
}

impl CompilationError for ParseError<TokenType, Node> {
    fn error_type(&self) -> String {
        match self {
            ParseError::Syntax(_) => "Syntax error".to_owned(),
            ParseError::Semantic { .. } => "Semantic error".to_owned(),
        }
    }

    fn loc(&self) -> Option<Pos> {
        Some(self.token().pos)
    }

    fn summarize(&self) -> String {
        match self {
            ParseError::Syntax(x) => format!("Unexpected {}", x.token),
            ParseError::Semantic { rule, .. } => format!("Cannot reduce {}", rule),
        }
    }

    fn description(&self) -> String {
        match self {
            ParseError::Syntax(x) => format!("Expected one of: {}", expected_list(&x.expected)),
            ParseError::Semantic { source, .. } => source.to_string(),
        }
    }
}
