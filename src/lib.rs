// File: src/lib.rs
//
// Library interface for the Rill interpreter.
// Exposes modules for integration testing and external use.

pub mod cursor;
pub mod errors;
pub mod expression;
pub mod interpreter;
pub mod lexer;
pub mod repl;
