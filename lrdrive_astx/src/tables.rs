use lazy_static::lazy_static;
use lrdrive_runtime::parser::{Action, ActionTable, GotoTable, ParseTables, Production};

use crate::ast;
use crate::ast::{Attrib, Node};
use crate::token::{NodeType, TokenType};

pub type Tables = ParseTables<TokenType, NodeType, Node>;

lazy_static! {
    /// Tables of the statement list grammar, built once and shared by every parser:
    /// ```text
    /// 0: S' : StmtList
    /// 1: StmtList : Stmt                << ast::new_stmt_list(X[0]) >>
    /// 2: StmtList : StmtList Stmt       << ast::append_stmt(X[0], X[1]) >>
    /// 3: Stmt : id                      << ast::new_stmt(X[0]) >>
    /// 4: Stmt : error                   << ast::new_error_stmt(X[0]) >>
    /// ```
    pub static ref TABLES: Tables = build_tables();
}

type Attribs = Vec<Attrib>;

fn productions() -> Vec<Production<TokenType, NodeType, Node>> {
    vec![
        Production::new("S'", "S' : StmtList", NodeType::SPrime, 1, |mut x: Attribs| {
            x.pop().and_then(Attrib::into_value).ok_or_else(|| "Expected a statement list".into())
        }),
        Production::new("StmtList", "StmtList : Stmt", NodeType::StmtList, 1, |mut x: Attribs| {
            Ok(ast::new_stmt_list(x.remove(0))?)
        }),
        Production::new("StmtList", "StmtList : StmtList Stmt", NodeType::StmtList, 2, |mut x: Attribs| {
            let stmt = x.remove(1);
            Ok(ast::append_stmt(x.remove(0), stmt)?)
        }),
        Production::new("Stmt", "Stmt : id", NodeType::Stmt, 1, |mut x: Attribs| {
            Ok(ast::new_stmt(x.remove(0))?)
        }),
        Production::new("Stmt", "Stmt : error", NodeType::Stmt, 1, |mut x: Attribs| {
            Ok(ast::new_error_stmt(x.remove(0))?)
        }),
    ]
}

fn build_tables() -> Tables {
    use Action::{Accept, Reduce, Shift};
    use TokenType::*;

    let mut actions = ActionTable::new(6);
    let mut gotos = GotoTable::new(6);

    let rows: &[(u32, TokenType, Action)] = &[
        (0, Id, Shift(3)), (0, Error, Shift(5)),
        (1, Eof, Accept), (1, Id, Shift(3)), (1, Error, Shift(5)),
        (2, Eof, Reduce(1)), (2, Id, Reduce(1)), (2, Error, Reduce(1)),
        (3, Eof, Reduce(3)), (3, Id, Reduce(3)), (3, Error, Reduce(3)),
        (4, Eof, Reduce(2)), (4, Id, Reduce(2)), (4, Error, Reduce(2)),
        (5, Eof, Reduce(4)), (5, Id, Reduce(4)), (5, Error, Reduce(4)),
    ];
    for (state, token, action) in rows.iter() {
        if let Err(e) = actions.set_action(*state, *token, *action) {
            panic!("{}", e);
        }
    }
    actions.set_can_recover(0, true);
    actions.set_can_recover(1, true);

    let row_gotos: &[(u32, NodeType, u32)] = &[
        (0, NodeType::StmtList, 1), (0, NodeType::Stmt, 2), (1, NodeType::Stmt, 4),
    ];
    for (state, nt, dest) in row_gotos.iter() {
        if let Err(e) = gotos.set_goto(*state, *nt, *dest) {
            panic!("{}", e);
        }
    }

    let tables = ParseTables::new(actions, gotos, productions());
    if let Err(e) = tables.validate() {
        panic!("Invalid statement list tables: {}", e);
    }
    tables
}
