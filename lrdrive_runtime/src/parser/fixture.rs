//! Toy statement list grammar shared by the runtime tests:
//! ```text
//! 0: S' : StmtList
//! 1: StmtList : Stmt
//! 2: StmtList : StmtList Stmt
//! 3: Stmt : id
//! 4: Stmt : error          (Grammar::ErrorStmt)
//! 4: Stmt : error id       (Grammar::ErrorThenId)
//! ```
use lrdrive_codegen::{Enumerable, Terminal};

use crate::loc::Pos;
use crate::parser::{Action, ActionError, ActionTable, Attrib, GotoTable, ParseTables, Production};
use crate::token::{Token, TokenSource, TokenStream};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enumerable, Terminal)]
pub enum Tok {
    #[eof]
    Eof,
    #[error_token]
    Error,
    Id,
    Invalid,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enumerable)]
pub enum Nt {
    SPrime,
    StmtList,
    Stmt,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    List(Vec<String>),
    Stmt(String),
}

impl Node {
    pub fn len(&self) -> usize {
        match self {
            Node::List(x) => x.len(),
            Node::Stmt(_) => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grammar {
    /// No error production, nothing can recover
    Plain,
    ErrorStmt,
    ErrorThenId,
}

type Attribs = Vec<Attrib<Tok, Node>>;

fn stmt(attrib: Attrib<Tok, Node>) -> Result<String, ActionError> {
    match attrib.into_value() {
        Some(Node::Stmt(x)) => Ok(x),
        x => Err(format!("Expected a statement, found {:?}", x).into()),
    }
}

fn error_desc(attrib: &Attrib<Tok, Node>) -> Result<String, ActionError> {
    let err = attrib.as_error().ok_or("Expected an error attribute")?;
    Ok(format!("<error {} after {}>", err.token.text, err.discarded.len()))
}

fn productions(grammar: Grammar, fail_on: Option<&'static str>) -> Vec<Production<Tok, Nt, Node>> {
    let mut prods = vec![
        Production::new("S'", "S' : StmtList", Nt::SPrime, 1, |mut x: Attribs| {
            x.pop().and_then(Attrib::into_value).ok_or_else(|| "Expected a statement list".into())
        }),
        Production::new("StmtList", "StmtList : Stmt", Nt::StmtList, 1, |mut x: Attribs| {
            Ok(Node::List(vec![stmt(x.remove(0))?]))
        }),
        Production::new("StmtList", "StmtList : StmtList Stmt", Nt::StmtList, 2, |mut x: Attribs| {
            let last = stmt(x.remove(1))?;
            match x.remove(0).into_value() {
                Some(Node::List(mut list)) => {
                    list.push(last);
                    Ok(Node::List(list))
                },
                other => Err(format!("Expected a statement list, found {:?}", other).into()),
            }
        }),
        Production::new("Stmt", "Stmt : id", Nt::Stmt, 1, move |mut x: Attribs| {
            let token = x.remove(0).into_token().ok_or("Expected an id")?;
            if Some(token.text.as_str()) == fail_on {
                return Err(format!("{} is reserved", token.text).into());
            }
            Ok(Node::Stmt(token.text))
        }),
    ];

    match grammar {
        Grammar::Plain => {},
        Grammar::ErrorStmt => {
            prods.push(Production::new("Stmt", "Stmt : error", Nt::Stmt, 1, |x: Attribs| {
                Ok(Node::Stmt(error_desc(&x[0])?))
            }));
        },
        Grammar::ErrorThenId => {
            prods.push(Production::new("Stmt", "Stmt : error id", Nt::Stmt, 2, |x: Attribs| {
                let id = x[1].as_token().ok_or("Expected an id")?;
                Ok(Node::Stmt(format!("{} {}", error_desc(&x[0])?, id.text)))
            }));
        },
    }
    prods
}

/// Hand built LR(1) tables for the toy grammar.
/// `fail_on` makes the `Stmt : id` action fail on that identifier.
pub fn toy_tables(grammar: Grammar, fail_on: Option<&'static str>) -> ParseTables<Tok, Nt, Node> {
    use Action::*;

    let state_count = match grammar {
        Grammar::Plain => 5,
        Grammar::ErrorStmt => 6,
        Grammar::ErrorThenId => 7,
    };
    let mut actions = ActionTable::new(state_count);
    let mut gotos = GotoTable::new(state_count);

    let mut follow = vec![Tok::Eof, Tok::Id];
    if grammar != Grammar::Plain {
        follow.push(Tok::Error);
    }

    let mut set = |state: u32, token: Tok, action: Action| {
        actions.set_action(state, token, action).unwrap();
    };

    set(0, Tok::Id, Shift(3));
    set(1, Tok::Eof, Accept);
    set(1, Tok::Id, Shift(3));
    for token in follow.iter() {
        set(2, *token, Reduce(1));
        set(3, *token, Reduce(3));
        set(4, *token, Reduce(2));
    }

    match grammar {
        Grammar::Plain => {},
        Grammar::ErrorStmt => {
            set(0, Tok::Error, Shift(5));
            set(1, Tok::Error, Shift(5));
            for token in follow.iter() {
                set(5, *token, Reduce(4));
            }
        },
        Grammar::ErrorThenId => {
            set(0, Tok::Error, Shift(5));
            set(1, Tok::Error, Shift(5));
            set(5, Tok::Id, Shift(6));
            for token in follow.iter() {
                set(6, *token, Reduce(4));
            }
        },
    }

    if grammar != Grammar::Plain {
        actions.set_can_recover(0, true);
        actions.set_can_recover(1, true);
    }

    gotos.set_goto(0, Nt::StmtList, 1).unwrap();
    gotos.set_goto(0, Nt::Stmt, 2).unwrap();
    gotos.set_goto(1, Nt::Stmt, 4).unwrap();

    ParseTables::new(actions, gotos, productions(grammar, fail_on))
}

/// Lays the tokens out on line 1, separated by a single space.
pub fn tokens(list: &[(Tok, &str)]) -> Vec<Token<Tok>> {
    let mut offset = 0;
    list.iter()
        .map(|(ttype, text)| {
            let token = Token::new(*ttype, *text, Pos::of(offset, 1, offset as u32 + 1));
            offset += text.len() + 1;
            token
        })
        .collect()
}

/// Token source that counts how many tokens were pulled.
pub struct CountingSource {
    inner: TokenStream<Tok>,
    pub scanned: usize,
}

impl CountingSource {
    pub fn new(tokens: Vec<Token<Tok>>) -> Self {
        CountingSource {
            inner: TokenStream::new(tokens),
            scanned: 0,
        }
    }
}

impl TokenSource<Tok> for CountingSource {
    fn scan(&mut self) -> Token<Tok> {
        self.scanned += 1;
        self.inner.scan()
    }
}
