use lrdrive_runtime::loc::Pos;
use lrdrive_runtime::{Token, TokenSource};

use crate::token::TokenType;

/// Splits the source on whitespace.
/// Words made of ascii letters, digits and `_` are identifiers, anything else is invalid.
pub struct Lexer<'a> {
    src: &'a str,
    pos: Pos,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            pos: Pos::of(0, 1, 1),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos.offset..]
    }

    fn advance(&mut self, ch: char) {
        self.pos.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.rest().chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance(ch);
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl<'a> TokenSource<TokenType> for Lexer<'a> {
    fn scan(&mut self) -> Token<TokenType> {
        self.skip_whitespace();

        let start = self.pos;
        let word_len = self.rest()
            .find(char::is_whitespace)
            .unwrap_or_else(|| self.rest().len());
        if word_len == 0 {
            return Token::eof(start);
        }

        let word = &self.rest()[..word_len];
        for ch in word.chars() {
            self.advance(ch);
        }

        let ttype = if word.chars().all(is_ident_char) {
            TokenType::Id
        } else {
            TokenType::Invalid
        };
        Token::new(ttype, word, start)
    }
}
