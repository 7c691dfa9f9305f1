use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::parser::Attrib;

pub const INITIAL_STACK_SIZE: usize = 100;

/// LR parse stack, automaton states and their attributes are kept in two parallel vectors
/// that always have the same length.
#[derive(Clone, Debug)]
pub struct ParseStack<T, V> {
    states: Vec<u32>,
    attribs: Vec<Attrib<T, V>>,
}

impl<T, V> ParseStack<T, V> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_STACK_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ParseStack {
            states: Vec::with_capacity(capacity),
            attribs: Vec::with_capacity(capacity),
        }
    }

    /// Empties the stack and seeds it with the bottom entry.
    pub fn reset(&mut self, initial_state: u32) {
        self.states.clear();
        self.attribs.clear();
        self.push(initial_state, Attrib::None);
    }

    pub fn push(&mut self, state: u32, attrib: Attrib<T, V>) {
        self.states.push(state);
        self.attribs.push(attrib);
    }

    pub fn top(&self) -> u32 {
        *self.states.last().expect("Empty parse stack")
    }

    /// State at absolute position `index` (0 is the bottom).
    pub fn peek(&self, index: usize) -> u32 {
        self.states[index]
    }

    pub fn attrib(&self, index: usize) -> &Attrib<T, V> {
        &self.attribs[index]
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn top_index(&self) -> usize {
        self.depth() - 1
    }

    pub fn top_attrib_mut(&mut self) -> &mut Attrib<T, V> {
        self.attribs.last_mut().expect("Empty parse stack")
    }

    /// Removes the top `count` entries, their attributes are returned bottom to top.
    pub fn pop_n(&mut self, count: usize) -> Vec<Attrib<T, V>> {
        assert!(count <= self.depth(), "Cannot pop {} entries from a stack of {}", count, self.depth());
        let lo = self.depth() - count;
        self.states.truncate(lo);
        self.attribs.split_off(lo)
    }
}

impl<T, V> Default for ParseStack<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug, V: Debug> Display for ParseStack<T, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "stack:")?;
        for (i, (state, attrib)) in self.states.iter().zip(self.attribs.iter()).enumerate() {
            writeln!(f, "\t{}: S{}, {}", i, state, attrib)?;
        }
        Ok(())
    }
}
