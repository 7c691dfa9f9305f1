use lrdrive_codegen::{Enumerable, Terminal};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enumerable, Terminal)]
pub enum TokenType {
    #[eof]
    Eof,
    #[error_token]
    Error,
    Id,
    Invalid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enumerable)]
pub enum NodeType {
    SPrime,
    StmtList,
    Stmt,
}
