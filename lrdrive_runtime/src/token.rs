use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use lrdrive_util::Enumerable;

use crate::loc::Pos;

pub trait GrammarTokenType : Copy + Debug + Eq + Enumerable {
}

impl<T: Copy + Debug + Eq + Enumerable> GrammarTokenType for T {}

/// Terminal symbols of a grammar.
/// Two members are reserved: the end of input marker, that every token source must eventually
/// return, and the error pseudo-token shifted by error-recovery productions.
pub trait Terminal : GrammarTokenType {
    fn eof() -> Self;

    fn error() -> Self;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token<T> {
    pub ttype: T,
    pub text: String,
    pub pos: Pos,
}

impl<T> Token<T> {
    pub fn new(ttype: T, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            ttype,
            text: text.into(),
            pos,
        }
    }
}

impl<T: Terminal> Token<T> {
    pub fn eof(pos: Pos) -> Self {
        Token::new(T::eof(), "", pos)
    }

    pub fn is_eof(&self) -> bool {
        self.ttype == T::eof()
    }
}

impl<T: Debug> Display for Token<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.ttype, self.text)
    }
}

/// Pull based token producer.
/// Sources never rewind and, once exhausted, keep returning the eof token.
pub trait TokenSource<T> {
    fn scan(&mut self) -> Token<T>;
}

impl<T, S: TokenSource<T> + ?Sized> TokenSource<T> for &mut S {
    fn scan(&mut self) -> Token<T> {
        (**self).scan()
    }
}

/// Token source over an already scanned token list.
#[derive(Clone, Debug)]
pub struct TokenStream<T> {
    tokens: std::vec::IntoIter<Token<T>>,
    end: Pos,
}

impl<T: Terminal> TokenStream<T> {
    pub fn new(tokens: Vec<Token<T>>) -> Self {
        let end = tokens.last()
            .map_or_else(Pos::zero, |x| x.pos.just_after(x.text.len()));
        TokenStream {
            tokens: tokens.into_iter(),
            end,
        }
    }
}

impl<T: Terminal> From<Vec<Token<T>>> for TokenStream<T> {
    fn from(tokens: Vec<Token<T>>) -> Self {
        TokenStream::new(tokens)
    }
}

impl<T: Terminal> TokenSource<T> for TokenStream<T> {
    fn scan(&mut self) -> Token<T> {
        match self.tokens.next() {
            Some(x) => x,
            None => Token::eof(self.end),
        }
    }
}
