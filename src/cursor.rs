// File: src/cursor.rs
//
// Front-consumable token stream used by every parsing routine.
//
// Statements and expressions are parsed and executed in the same pass by
// popping tokens off the front of whatever remains. Consumption is strictly
// monotonic; the single exception is `push_front`, which re-inserts an
// already-popped token so the assignment and block handlers can re-inspect
// their leading token.

use crate::errors::RillError;
use crate::lexer::{Token, TokenKind};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: VecDeque<Token>,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCursor { tokens: tokens.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// True if the next token is punctuation with exactly this text.
    ///
    /// The kind check matters: a string literal may carry the same text as a
    /// structural token (`"{"`, `";"`) and must never match as one.
    pub fn next_is_punct(&self, text: &str) -> bool {
        self.peek().map_or(false, |t| t.kind == TokenKind::Punctuation && t.text == text)
    }

    /// True if the next token is an identifier with exactly this text
    /// (keywords are lexed as plain identifiers)
    pub fn next_is_keyword(&self, text: &str) -> bool {
        self.peek().map_or(false, |t| t.kind == TokenKind::Identifier && t.text == text)
    }

    /// Consume and return the next token.
    ///
    /// Popping from an exhausted cursor is structural truncation in the
    /// source (e.g. a missing `}`), reported as a dedicated error kind.
    pub fn pop(&mut self) -> Result<Token, RillError> {
        self.tokens
            .pop_front()
            .ok_or_else(|| RillError::empty_cursor("Ran out of tokens while parsing".to_string()))
    }

    /// Re-insert a token at the front so it is the next one popped
    pub fn push_front(&mut self, token: Token) {
        self.tokens.push_front(token);
    }
}
