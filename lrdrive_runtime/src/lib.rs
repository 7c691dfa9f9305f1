// Lets the symbol derives name this crate from inside its own tests
extern crate self as lrdrive_runtime;

pub mod loc;
pub mod parser;
pub mod token;

pub use lrdrive_util::Enumerable;
pub use token::{GrammarTokenType, Terminal, Token, TokenSource, TokenStream};
