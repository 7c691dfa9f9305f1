use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

use lrdrive_util::Enumerable;
use thiserror::Error;

use crate::parser::{ActionError, Attrib};
use crate::token::{GrammarTokenType, Terminal};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Action {
    Shift(u32),
    Reduce(u32),
    Accept,
    /// Also the value of every missing entry
    Error,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(x) => write!(f, "shift:{}", x),
            Action::Reduce(x) => write!(f, "reduce:{}", x),
            Action::Accept => write!(f, "accept"),
            Action::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TableConflict<S: Debug> {
    #[error("Conflict in action[{0}][{1:?}]: {2} or {3}, is your grammar LR(1)?")]
    Action(u32, S, Action, Action),
    #[error("Conflict in goto[{0}][{1:?}]: {2} or {3}, is your grammar LR(1)?")]
    Goto(u32, S, u32, u32),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum TableError<T: Debug, N: Debug> {
    #[error("The tables define no states")]
    Empty,
    #[error("The action table has {actions} states but the goto table has {gotos}")]
    StateCountMismatch { actions: u32, gotos: u32 },
    #[error("action[{state}][{token:?}] shifts to unknown state {target}")]
    ShiftOutOfRange { state: u32, token: T, target: u32 },
    #[error("action[{state}][{token:?}] reduces unknown production {production}")]
    ReduceOutOfRange { state: u32, token: T, production: u32 },
    #[error("goto[{state}][{nonterminal:?}] points to unknown state {target}")]
    GotoOutOfRange { state: u32, nonterminal: N, target: u32 },
    #[error("State {state} has {action} on the error token, only shifts are allowed")]
    ErrorTokenNotShifted { state: u32, action: Action },
    #[error("State {state} can recover but does not shift the error token")]
    MissingErrorShift { state: u32 },
}

/// State x terminal decision table.
/// Every state (row) also carries a recovery flag: it is set when an error-recovery production
/// can be entered from that state.
#[derive(Clone, Debug)]
pub struct ActionTable<T> {
    state_count: u32,
    actions: Vec<Action>,
    can_recover: Vec<bool>,
    _terminals: PhantomData<T>,
}

impl<T: Terminal> ActionTable<T> {
    pub fn new(state_count: u32) -> Self {
        ActionTable {
            state_count,
            actions: vec![Action::Error; state_count as usize * T::count()],
            can_recover: vec![false; state_count as usize],
            _terminals: PhantomData,
        }
    }

    pub fn from_raw(state_count: u32, actions: Vec<Action>, can_recover: Vec<bool>) -> Self {
        assert_eq!(actions.len(), state_count as usize * T::count(), "Action table size mismatch");
        assert_eq!(can_recover.len(), state_count as usize, "Recovery flags size mismatch");
        ActionTable { state_count, actions, can_recover, _terminals: PhantomData }
    }

    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    pub fn action_index(state: u32, token: T) -> usize {
        state as usize * T::count() + token.index()
    }

    pub fn get_action(&self, state: u32, token: T) -> Action {
        self.actions[Self::action_index(state, token)]
    }

    pub fn set_action(&mut self, state: u32, token: T, value: Action) -> Result<(), TableConflict<T>> {
        let index = Self::action_index(state, token);

        let old_val = self.actions[index];
        if old_val != Action::Error && old_val != value {
            return Err(TableConflict::Action(state, token, old_val, value))
        }
        self.actions[index] = value;
        Ok(())
    }

    pub fn can_recover(&self, state: u32) -> bool {
        self.can_recover[state as usize]
    }

    pub fn set_can_recover(&mut self, state: u32, value: bool) {
        self.can_recover[state as usize] = value;
    }

    /// Terminals with an action in `state`, the error pseudo-token excluded.
    pub fn expected_tokens(&self, state: u32) -> Vec<T> {
        T::enumerate()
            .filter(|x| *x != T::error())
            .filter(|x| self.get_action(state, *x) != Action::Error)
            .collect()
    }
}

/// State x nonterminal table used after every reduction.
#[derive(Clone, Debug)]
pub struct GotoTable<N> {
    state_count: u32,
    targets: Vec<u32>,
    _nonterminals: PhantomData<N>,
}

impl<N: GrammarTokenType> GotoTable<N> {
    pub fn new(state_count: u32) -> Self {
        GotoTable {
            state_count,
            targets: vec![u32::max_value(); state_count as usize * N::count()],
            _nonterminals: PhantomData,
        }
    }

    /// `targets` uses `u32::max_value()` for missing entries.
    pub fn from_raw(state_count: u32, targets: Vec<u32>) -> Self {
        assert_eq!(targets.len(), state_count as usize * N::count(), "Goto table size mismatch");
        GotoTable { state_count, targets, _nonterminals: PhantomData }
    }

    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    pub fn goto_index(state: u32, token: N) -> usize {
        state as usize * N::count() + token.index()
    }

    pub fn get_goto_raw(&self, state: u32, token: N) -> Option<u32> {
        let res = self.targets[Self::goto_index(state, token)];
        if res == u32::max_value() {
            None
        } else {
            Some(res)
        }
    }

    pub fn get_goto(&self, state: u32, token: N) -> u32 {
        match self.get_goto_raw(state, token) {
            None => {
                panic!("Called get_goto on invalid input: state {}, token {:?}", state, token)
            },
            Some(x) => x,
        }
    }

    pub fn set_goto(&mut self, state: u32, token: N, dest: u32) -> Result<(), TableConflict<N>> {
        let index = Self::goto_index(state, token);

        let old_val = self.targets[index];
        if old_val != u32::max_value() && old_val != dest {
            return Err(TableConflict::Goto(state, token, old_val, dest));
        }

        self.targets[index] = dest;
        Ok(())
    }
}

pub type ReduceFn<T, V> = Box<dyn Fn(Vec<Attrib<T, V>>) -> Result<V, ActionError> + Send + Sync>;

/// A grammar rule as seen by the runtime: how many entries it pops, the nonterminal it produces
/// and the semantic action building its value.
pub struct Production<T, N, V> {
    /// Name of the produced nonterminal
    pub id: &'static str,
    /// Rule source, for diagnostics
    pub text: &'static str,
    pub nonterminal: N,
    pub num_symbols: usize,
    reduce: ReduceFn<T, V>,
}

impl<T, N, V> Production<T, N, V> {
    pub fn new<F>(id: &'static str, text: &'static str, nonterminal: N, num_symbols: usize, reduce: F) -> Self
        where F: Fn(Vec<Attrib<T, V>>) -> Result<V, ActionError> + Send + Sync + 'static {
        Production {
            id,
            text,
            nonterminal,
            num_symbols,
            reduce: Box::new(reduce),
        }
    }

    /// Runs the semantic action, `attribs` are in rule (left to right) order.
    pub fn reduce(&self, attribs: Vec<Attrib<T, V>>) -> Result<V, ActionError> {
        (self.reduce)(attribs)
    }
}

impl<T, N: Debug, V> Debug for Production<T, N, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Production")
            .field("text", &self.text)
            .field("nonterminal", &self.nonterminal)
            .field("num_symbols", &self.num_symbols)
            .finish()
    }
}

/// The three tables a generated parser is made of.
/// They are never mutated once built, so a single instance can be shared by every parser.
#[derive(Debug)]
pub struct ParseTables<T, N, V> {
    pub actions: ActionTable<T>,
    pub gotos: GotoTable<N>,
    pub productions: Vec<Production<T, N, V>>,
}

impl<T: Terminal, N: GrammarTokenType, V> ParseTables<T, N, V> {
    pub fn new(actions: ActionTable<T>, gotos: GotoTable<N>, productions: Vec<Production<T, N, V>>) -> Self {
        ParseTables { actions, gotos, productions }
    }

    pub fn state_count(&self) -> u32 {
        self.actions.state_count()
    }

    pub fn production(&self, index: u32) -> &Production<T, N, V> {
        match self.productions.get(index as usize) {
            Some(x) => x,
            None => panic!("Unknown production {}", index),
        }
    }

    /// Checks that every table entry points to something that exists and that recovery states
    /// honor the error pseudo-token contract.
    pub fn validate(&self) -> Result<(), TableError<T, N>> {
        let state_count = self.actions.state_count();
        if state_count == 0 {
            return Err(TableError::Empty);
        }
        if self.gotos.state_count() != state_count {
            return Err(TableError::StateCountMismatch {
                actions: state_count,
                gotos: self.gotos.state_count(),
            });
        }

        for state in 0..state_count {
            for token in T::enumerate() {
                match self.actions.get_action(state, token) {
                    Action::Shift(target) if target >= state_count => {
                        return Err(TableError::ShiftOutOfRange { state, token, target });
                    },
                    Action::Reduce(production) if production as usize >= self.productions.len() => {
                        return Err(TableError::ReduceOutOfRange { state, token, production });
                    },
                    _ => {},
                }
            }

            // Elsewhere the error token is an ordinary lookahead and may be reduced on
            if self.actions.can_recover(state) {
                match self.actions.get_action(state, T::error()) {
                    Action::Shift(_) => {},
                    Action::Error => return Err(TableError::MissingErrorShift { state }),
                    action => return Err(TableError::ErrorTokenNotShifted { state, action }),
                }
            }

            for nonterminal in N::enumerate() {
                match self.gotos.get_goto_raw(state, nonterminal) {
                    Some(target) if target >= state_count => {
                        return Err(TableError::GotoOutOfRange { state, nonterminal, target });
                    },
                    _ => {},
                }
            }
        }
        Ok(())
    }
}

impl<T: Terminal, N: GrammarTokenType, V> Display for ParseTables<T, N, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in T::enumerate() {
            write!(f, "|{:10}", format!("{:?}", x))?;
        }
        write!(f, "|{:10}", "recover")?;
        for x in N::enumerate() {
            write!(f, "|{:10}", format!("{:?}", x))?;
        }
        writeln!(f)?;
        for y in 0..self.state_count() {
            write!(f, "{:<2}", y)?;
            for x in T::enumerate() {
                let a = self.actions.get_action(y, x);
                let a = match a {
                    Action::Error => "-".to_string(),
                    _ => a.to_string(),
                };
                write!(f, "|{:10}", a)?;
            }
            write!(f, "|{:10}", if self.actions.can_recover(y) { "yes" } else { "" })?;
            for token in N::enumerate() {
                let a = match self.gotos.get_goto_raw(y, token) {
                    None => "-".to_string(),
                    Some(x) => format!("{}", x),
                };

                write!(f, "|{:10}", a)?;
            }

            writeln!(f)?;
        }
        writeln!(f, "Productions:")?;
        for (index, prod) in self.productions.iter().enumerate() {
            writeln!(f, "{}> [{}] {} ({} symbols)", index, prod.id, prod.text, prod.num_symbols)?;
        }
        Ok(())
    }
}
