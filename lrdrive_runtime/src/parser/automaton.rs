use std::fmt::Debug;

#[cfg(feature = "trace")]
use log::trace;

use crate::parser::{Action, Attrib, Diagnostic, ParseError, ParseStack, ParseTables};
use crate::token::{GrammarTokenType, Terminal, Token, TokenSource};

pub(crate) const TARGET: &str = "lrdrive::parser";

pub const INITIAL_STATE: u32 = 0;

/// Outcome of a single decision of the automaton, failures are returned as errors.
#[derive(Debug)]
pub(crate) enum Control<T, V> {
    Running,
    Accepted(Attrib<T, V>),
}

/// Table driven shift/reduce automaton.
/// Owns its stack, so a parser must not be shared between concurrent parses; the tables can.
pub struct Parser<'t, T, N, V> {
    pub(crate) tables: &'t ParseTables<T, N, V>,
    pub(crate) stack: ParseStack<T, V>,
    pub(crate) diagnostics: Vec<Diagnostic<T>>,
}

impl<'t, T: Terminal, N: GrammarTokenType, V: Debug> Parser<'t, T, N, V> {
    pub fn new(tables: &'t ParseTables<T, N, V>) -> Self {
        Parser {
            tables,
            stack: ParseStack::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_capacity(tables: &'t ParseTables<T, N, V>, capacity: usize) -> Self {
        Parser {
            tables,
            stack: ParseStack::with_capacity(capacity),
            diagnostics: Vec::new(),
        }
    }

    pub fn stack(&self) -> &ParseStack<T, V> {
        &self.stack
    }

    /// Syntax errors recovered during the last parse.
    pub fn diagnostics(&self) -> &[Diagnostic<T>] {
        &self.diagnostics
    }

    pub fn reset(&mut self) {
        self.stack.reset(INITIAL_STATE);
        self.diagnostics.clear();
    }

    /// Parses the whole token stream, returning the attribute of the accepted start symbol.
    pub fn parse<S: TokenSource<T>>(&mut self, mut source: S) -> Result<Attrib<T, V>, ParseError<T, V>> {
        // This link: http://lambda.uta.edu/cse5317/notes/node18.html while short helped me
        // understand how and why this works
        self.reset();
        let mut lookahead = source.scan();

        loop {
            match self.step(&mut lookahead, &mut source)? {
                Control::Running => {},
                Control::Accepted(res) => return Ok(res),
            }
        }
    }

    pub(crate) fn step<S: TokenSource<T>>(&mut self, lookahead: &mut Token<T>, source: &mut S) -> Result<Control<T, V>, ParseError<T, V>> {
        let tables = self.tables;
        let mut action = tables.actions.get_action(self.stack.top(), lookahead.ttype);

        if action == Action::Error {
            self.recover(lookahead, source)?;
            action = tables.actions.get_action(self.stack.top(), lookahead.ttype);
            if action == Action::Error {
                panic!("Error recovery led to invalid action: S{} {}", self.stack.top(), lookahead);
            }
        }

        #[cfg(feature = "trace")]
        trace!(target: TARGET, "S{} {} {}", self.stack.top(), lookahead, action);

        match action {
            Action::Shift(new_state) => {
                let next = source.scan();
                let token = std::mem::replace(lookahead, next);
                self.stack.push(new_state, Attrib::Token(token));
                Ok(Control::Running)
            },
            Action::Reduce(prod_index) => {
                self.reduce(prod_index, lookahead)?;
                Ok(Control::Running)
            },
            Action::Accept => {
                let mut res = self.stack.pop_n(1);
                Ok(Control::Accepted(res.remove(0)))
            },
            Action::Error => unreachable!(),
        }
    }

    fn reduce(&mut self, prod_index: u32, lookahead: &Token<T>) -> Result<(), ParseError<T, V>> {
        let tables = self.tables;
        let prod = tables.production(prod_index);

        // Popped attributes come back in rule order, ready for the semantic action
        let attribs = self.stack.pop_n(prod.num_symbols);

        match prod.reduce(attribs) {
            Ok(value) => {
                let new_state = tables.gotos.get_goto(self.stack.top(), prod.nonterminal);
                self.stack.push(new_state, Attrib::Value(value));
                Ok(())
            },
            Err(source) => {
                Err(ParseError::Semantic {
                    state: self.stack.top(),
                    production: prod_index,
                    rule: prod.text,
                    token: lookahead.clone(),
                    pos: lookahead.pos,
                    source,
                })
            },
        }
    }
}
