mod attrib;
mod automaton;
mod error;
mod recovery;
mod stack;
mod table;

#[cfg(test)]
pub(crate) mod fixture;

pub use {
    attrib::Attrib,
    automaton::{Parser, INITIAL_STATE},
    error::{ActionError, Diagnostic, ParseError, SyntaxError},
    stack::{ParseStack, INITIAL_STACK_SIZE},
    table::{Action, ActionTable, GotoTable, ParseTables, Production, ReduceFn, TableConflict, TableError},
};
