use std::fmt::Debug;

use log::debug;

use crate::parser::automaton::TARGET;
use crate::parser::{Action, Attrib, ParseError, Parser, SyntaxError};
use crate::token::{GrammarTokenType, Terminal, Token, TokenSource};

impl<'t, T: Terminal, N: GrammarTokenType, V: Debug> Parser<'t, T, N, V> {
    /// Index of the highest stack entry whose state can recover.
    pub(crate) fn first_recovery_state(&self) -> Option<usize> {
        let actions = &self.tables.actions;
        (0..self.stack.depth())
            .rev()
            .find(|&i| actions.can_recover(self.stack.peek(i)))
    }

    /// Called when the lookahead has no action in the top state.
    /// Unwinds the stack down to the nearest recovery state, shifts the error pseudo-token there
    /// and drops input tokens until one can follow it.
    /// On success the lookahead has an action in the new top state; on failure the parse is over.
    pub(crate) fn recover<S: TokenSource<T>>(&mut self, lookahead: &mut Token<T>, source: &mut S) -> Result<(), ParseError<T, V>> {
        let tables = self.tables;
        let actions = &tables.actions;
        let state = self.stack.top();

        debug!(target: TARGET, "Syntax error in S{} on {}, {}", state, lookahead, lookahead.pos);

        // Computed on the state that rejected the token, before unwinding
        let mut error = SyntaxError {
            state,
            token: lookahead.clone(),
            expected: actions.expected_tokens(state),
            discarded: Vec::new(),
            skipped: Vec::new(),
        };

        let recovery_index = match self.first_recovery_state() {
            Some(x) => x,
            None => {
                debug!(target: TARGET, "No recovery state on the stack");
                return Err(ParseError::Syntax(Box::new(error)));
            },
        };

        error.discarded = self.stack.pop_n(self.stack.top_index() - recovery_index);
        let recovery_state = self.stack.top();
        debug!(target: TARGET, "Discarded {} stack entries, recovering in S{}", error.discarded.len(), recovery_state);

        let error_state = match actions.get_action(recovery_state, T::error()) {
            Action::Shift(x) => x,
            Action::Error => {
                debug!(target: TARGET, "S{} does not shift the error token", recovery_state);
                return Err(ParseError::Syntax(Box::new(error)));
            },
            action => {
                panic!("Recovery state S{} has {} on the error token, only shifts are allowed", recovery_state, action);
            },
        };

        self.stack.push(error_state, Attrib::Error(Box::new(error)));

        while actions.get_action(error_state, lookahead.ttype) == Action::Error {
            if lookahead.ttype == T::eof() {
                debug!(target: TARGET, "Reached end of input while resynchronizing");
                // The error entry stays on the stack, its attribute moves into the result
                return match std::mem::replace(self.stack.top_attrib_mut(), Attrib::None) {
                    Attrib::Error(error) => Err(ParseError::Syntax(error)),
                    _ => unreachable!(),
                };
            }
            let next = source.scan();
            let skipped = std::mem::replace(lookahead, next);
            debug!(target: TARGET, "Skipping {}", skipped);
            if let Attrib::Error(error) = self.stack.top_attrib_mut() {
                error.skipped.push(skipped);
            }
        }

        debug!(target: TARGET, "Recovered in S{}, resuming on {}", error_state, lookahead);
        if let Attrib::Error(error) = self.stack.attrib(self.stack.top_index()) {
            self.diagnostics.push(error.diagnostic());
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixture::{toy_tables, tokens, CountingSource, Grammar, Node, Tok};
    use crate::token::TokenStream;

    fn list(items: &[&str]) -> Option<Node> {
        Some(Node::List(items.iter().map(|x| x.to_string()).collect()))
    }

    #[test]
    fn recovers_from_unexpected_token() {
        let tables = toy_tables(Grammar::ErrorStmt, None);
        let mut parser = Parser::new(&tables);
        let mut source = CountingSource::new(tokens(&[(Tok::Id, "a"), (Tok::Invalid, "?"), (Tok::Id, "b")]));

        let res = parser.parse(&mut source).unwrap();
        // The half built statement is unwound into the error statement
        assert_eq!(res.into_value(), list(&["<error ? after 1>", "b"]));
        // Every token, eof included, is pulled exactly once
        assert_eq!(source.scanned, 4);

        let diagnostics = parser.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].state, 3);
        assert_eq!(diagnostics[0].token.ttype, Tok::Invalid);
        assert_eq!(diagnostics[0].expected, vec![Tok::Eof, Tok::Id]);
        assert_eq!(diagnostics[0].discarded, 1);
        assert_eq!(diagnostics[0].skipped, 1);
        assert_eq!(diagnostics[0].to_string(), "Error in S3: Invalid(?), 1:3, expected one of: Eof Id");
    }

    #[test]
    fn recovers_without_skipping() {
        // Eof can follow the error statement, so nothing is dropped from the input
        let tables = toy_tables(Grammar::ErrorStmt, None);
        let mut parser = Parser::new(&tables);
        let res = parser.parse(TokenStream::new(vec![])).unwrap();
        assert_eq!(res.into_value(), list(&["<error  after 0>"]));
        assert_eq!(parser.diagnostics()[0].skipped, 0);
        assert_eq!(parser.diagnostics()[0].discarded, 0);
    }

    #[test]
    fn records_every_recovered_error() {
        let tables = toy_tables(Grammar::ErrorStmt, None);
        let mut parser = Parser::new(&tables);
        let input = tokens(&[(Tok::Invalid, "?"), (Tok::Invalid, "!"), (Tok::Id, "a"), (Tok::Id, "b"), (Tok::Invalid, "#"), (Tok::Id, "c")]);
        let mut source = CountingSource::new(input);

        let res = parser.parse(&mut source).unwrap();
        assert_eq!(res.into_value(), list(&["<error ? after 0>", "a", "<error # after 1>", "c"]));
        assert_eq!(source.scanned, 7);

        let skipped: Vec<usize> = parser.diagnostics().iter().map(|x| x.skipped).collect();
        assert_eq!(skipped, vec![2, 1]);
    }

    #[test]
    fn fails_without_recovery_state() {
        let tables = toy_tables(Grammar::Plain, None);
        let mut parser = Parser::new(&tables);
        let mut source = CountingSource::new(tokens(&[(Tok::Id, "a"), (Tok::Invalid, "?"), (Tok::Id, "b")]));

        let err = parser.parse(&mut source).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.state, 3);
        assert_eq!(syntax.token.text, "?");
        assert!(syntax.discarded.is_empty());
        assert!(syntax.skipped.is_empty());
        // The stack is left as it was when the error was found
        assert_eq!(parser.stack().depth(), 2);
        assert_eq!(source.scanned, 2);
    }

    #[test]
    fn fails_when_resynchronization_hits_eof() {
        let tables = toy_tables(Grammar::ErrorThenId, None);
        let mut parser = Parser::new(&tables);
        let mut source = CountingSource::new(tokens(&[(Tok::Id, "a"), (Tok::Invalid, "?"), (Tok::Invalid, "!")]));

        let err = parser.parse(&mut source).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.token.text, "?");
        assert_eq!(syntax.discarded.len(), 1);
        assert_eq!(syntax.discarded[0].as_token().map(|x| x.text.as_str()), Some("a"));
        let skipped: Vec<&str> = syntax.skipped.iter().map(|x| x.text.as_str()).collect();
        assert_eq!(skipped, vec!["?", "!"]);
        assert_eq!(source.scanned, 4);
        assert!(parser.diagnostics().is_empty());
        // The error token was shifted in S0 before resynchronization started
        assert_eq!(parser.stack().depth(), 2);
        assert_eq!(parser.stack().top(), 5);
        assert!(parser.stack().attrib(1).is_none());
    }

    #[test]
    fn fails_when_recovery_state_does_not_shift_error() {
        let mut tables = toy_tables(Grammar::Plain, None);
        tables.actions.set_can_recover(3, true);
        let mut parser = Parser::new(&tables);
        let mut source = CountingSource::new(tokens(&[(Tok::Id, "a"), (Tok::Invalid, "?")]));

        let err = parser.parse(&mut source).unwrap_err();
        let syntax = err.as_syntax().unwrap();
        assert_eq!(syntax.state, 3);
        assert_eq!(syntax.token.text, "?");
        assert!(syntax.discarded.is_empty());
        assert!(syntax.skipped.is_empty());
        assert_eq!(err.expected(), &[Tok::Eof, Tok::Id]);
        assert_eq!(parser.stack().depth(), 2);
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn expected_tokens_come_from_the_rejecting_state() {
        // S3 (Stmt : id .) rejected the token, S0 is where recovery happened and only accepts id:
        // the reported set is the one of S3 and it is not recomputed after unwinding.
        let tables = toy_tables(Grammar::ErrorThenId, None);
        assert_eq!(tables.actions.expected_tokens(0), vec![Tok::Id]);

        let mut parser = Parser::new(&tables);
        let err = parser.parse(TokenStream::new(tokens(&[(Tok::Id, "a"), (Tok::Invalid, "?")]))).unwrap_err();
        assert_eq!(err.expected(), &[Tok::Eof, Tok::Id]);
    }

    #[test]
    fn error_attribute_reaches_the_semantic_action() {
        let tables = toy_tables(Grammar::ErrorThenId, None);
        let mut parser = Parser::new(&tables);
        let res = parser.parse(TokenStream::new(tokens(&[(Tok::Invalid, "?"), (Tok::Id, "a"), (Tok::Id, "b")]))).unwrap();
        assert_eq!(res.into_value(), list(&["<error ? after 0> a", "b"]));
    }

    #[test]
    fn first_recovery_state_is_the_highest() {
        let tables = toy_tables(Grammar::ErrorStmt, None);
        let mut parser = Parser::new(&tables);
        parser.reset();
        assert_eq!(parser.first_recovery_state(), Some(0));
        parser.stack.push(1, Attrib::None);
        parser.stack.push(3, Attrib::None);
        assert_eq!(parser.first_recovery_state(), Some(1));

        let tables = toy_tables(Grammar::Plain, None);
        let mut parser = Parser::new(&tables);
        parser.reset();
        assert_eq!(parser.first_recovery_state(), None);
    }

    #[test]
    #[should_panic(expected = "only shifts are allowed")]
    fn non_shift_error_action_is_a_contract_violation() {
        let mut tables = toy_tables(Grammar::Plain, None);
        tables.actions.set_can_recover(0, true);
        tables.actions.set_action(0, Tok::Error, Action::Reduce(3)).unwrap();
        let mut parser = Parser::new(&tables);
        let _ = parser.parse(TokenStream::new(tokens(&[(Tok::Invalid, "?")])));
    }
}
