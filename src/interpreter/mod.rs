// File: src/interpreter/mod.rs
//
// Tree-walking interpreter for the Rill language.
//
// Rill is executed in a single pass: statements are parsed and evaluated at
// the same time, consuming tokens from the front of a shared cursor. There
// is no persisted AST. Constructs that must run more than once (loop bodies,
// loop conditions) capture their token span once and replay a fresh cursor
// over the captured span per iteration, always against the one shared
// Environment of the run.
//
// The untaken branch of a conditional is never evaluated; it is lexically
// skipped with a brace-nesting counter so the cursor stays synchronized with
// the remainder of the program.
//
// break/continue are modeled as an explicit ControlFlow value returned by
// every statement handler. The signal propagates outward through nested
// blocks until the nearest enclosing while/for consumes it; a signal that
// reaches the top level is an error.

mod control_flow;
mod environment;

pub use control_flow::ControlFlow;
pub use environment::Environment;

use crate::cursor::TokenCursor;
use crate::errors::RillError;
use crate::expression;
use crate::lexer::{self, Token, TokenKind};
use std::io::{self, BufRead, Write};

const UNTERMINATED_BLOCK: &str = "Unterminated block, expected '}'";

/// The interpreter: the shared variable environment of the current run plus
/// the line-oriented input/output collaborators used by `scan` and `print`.
pub struct Interpreter {
    pub env: Environment,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Interpreter {
    /// Create an interpreter wired to stdin/stdout
    pub fn new() -> Self {
        Self::with_io(Box::new(io::BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    /// Create an interpreter with injected I/O collaborators
    pub fn with_io(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Interpreter { env: Environment::new(), input, output }
    }

    /// Top-level driver: execute `source`, reporting any failure as a single
    /// diagnostic line on the output collaborator. Statements executed before
    /// the failure keep their effects on the environment and the output.
    pub fn run(&mut self, source: &str) {
        if let Err(err) = self.interpret(source) {
            let _ = writeln!(self.output, "{}", err);
        }
        let _ = self.output.flush();
    }

    /// Tokenize and execute `source`, propagating the first error.
    ///
    /// A break/continue signal that reaches this level has no enclosing loop
    /// to consume it and is reported as an error rather than dropped.
    pub fn interpret(&mut self, source: &str) -> Result<(), RillError> {
        let tokens: Vec<Token> = lexer::tokenize(source)?
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        let mut cursor = TokenCursor::new(tokens);
        while !cursor.is_empty() {
            match self.execute_statement(&mut cursor)? {
                ControlFlow::None => {}
                ControlFlow::Break => return Err(RillError::unhandled_signal("break")),
                ControlFlow::Continue => return Err(RillError::unhandled_signal("continue")),
            }
        }
        Ok(())
    }

    /// Consume exactly one statement's worth of tokens and apply its effect.
    ///
    /// Dispatch is on the first token: keywords are identifiers recognized by
    /// text; any other identifier starts an assignment (the token is pushed
    /// back so the assignment handler sees the full form); `{` starts a
    /// nested block.
    fn execute_statement(&mut self, cursor: &mut TokenCursor) -> Result<ControlFlow, RillError> {
        let token = cursor.pop()?;
        if token.kind == TokenKind::Identifier {
            return match token.text.as_str() {
                "if" => self.execute_if(cursor),
                "while" => self.execute_while(cursor),
                "for" => self.execute_for(cursor),
                "print" => {
                    self.execute_print(cursor)?;
                    Ok(ControlFlow::None)
                }
                "scan" => {
                    self.execute_scan(cursor)?;
                    Ok(ControlFlow::None)
                }
                "break" => {
                    consume_terminator(cursor);
                    Ok(ControlFlow::Break)
                }
                "continue" => {
                    consume_terminator(cursor);
                    Ok(ControlFlow::Continue)
                }
                _ => {
                    cursor.push_front(token);
                    self.execute_assign(cursor)?;
                    Ok(ControlFlow::None)
                }
            };
        }
        if token.is_punct("{") {
            cursor.push_front(token);
            return self.execute_block(cursor);
        }
        Err(RillError::unexpected_token(&token, "a statement"))
    }

    /// `<ident> = <arith> ;?`
    fn execute_assign(&mut self, cursor: &mut TokenCursor) -> Result<(), RillError> {
        let identifier = cursor.pop()?;
        let equals = cursor.pop()?;
        if equals.kind != TokenKind::Equals {
            return Err(RillError::unexpected_token(&equals, "'='"));
        }
        let value = expression::parse_arithmetic(cursor, &self.env)?;
        self.env.set(identifier.text, value);
        consume_terminator(cursor);
        Ok(())
    }

    /// `print <item> (',' <item>)* ;?` — items are string literals (emitted
    /// verbatim) or arithmetic expressions (emitted as decimal integers),
    /// joined with single spaces into one output line.
    fn execute_print(&mut self, cursor: &mut TokenCursor) -> Result<(), RillError> {
        let mut parts = Vec::new();
        loop {
            let token = cursor.pop()?;
            if token.kind == TokenKind::QuotedString {
                parts.push(token.text);
            } else if matches!(token.kind, TokenKind::Identifier | TokenKind::Integer)
                || token.is_punct("(")
                || token.is_punct("-")
            {
                cursor.push_front(token);
                let value = expression::parse_arithmetic(cursor, &self.env)?;
                parts.push(value.to_string());
            } else {
                return Err(RillError::unexpected_token(&token, "a print item (string or expression)"));
            }
            if cursor.next_is_punct(",") {
                cursor.pop()?;
            } else {
                break;
            }
        }
        writeln!(self.output, "{}", parts.join(" "))
            .map_err(|e| RillError::io_error(e.to_string()))?;
        consume_terminator(cursor);
        Ok(())
    }

    /// `scan <ident> ;` — the `;` is checked before reading, so a syntax
    /// error never blocks on input. On a non-integer line the previous
    /// binding of the variable, if any, is left untouched.
    fn execute_scan(&mut self, cursor: &mut TokenCursor) -> Result<(), RillError> {
        let identifier = cursor.pop()?;
        if identifier.kind != TokenKind::Identifier {
            return Err(RillError::unexpected_token(&identifier, "a variable name"));
        }
        let semicolon = cursor.pop()?;
        if !semicolon.is_punct(";") {
            return Err(RillError::unexpected_token(&semicolon, "';'"));
        }
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| RillError::io_error(e.to_string()))?;
        let trimmed = line.trim();
        let value: i64 = trimmed.parse().map_err(|_| RillError::invalid_scan_input(trimmed))?;
        self.env.set(identifier.text, value);
        Ok(())
    }

    /// `if <comparison> { block } [else ( { block } | if ... )]`
    ///
    /// Exactly one branch is evaluated; the other is always lexically
    /// consumed so the cursor stays synchronized.
    fn execute_if(&mut self, cursor: &mut TokenCursor) -> Result<ControlFlow, RillError> {
        let condition = expression::parse_comparison(cursor, &self.env)?;
        if condition {
            let flow = self.execute_block(cursor)?;
            if cursor.next_is_keyword("else") {
                cursor.pop()?;
                self.skip_else_branch(cursor)?;
            }
            Ok(flow)
        } else {
            self.skip_block(cursor)?;
            if cursor.next_is_keyword("else") {
                cursor.pop()?;
                if cursor.next_is_keyword("if") {
                    cursor.pop()?;
                    self.execute_if(cursor)
                } else {
                    self.execute_block(cursor)
                }
            } else {
                Ok(ControlFlow::None)
            }
        }
    }

    /// `while <comparison> { block }`
    ///
    /// The condition tokens (everything up to the body's `{`) and the body
    /// tokens are captured once; each iteration replays fresh cursors over
    /// the captured spans against the shared environment.
    fn execute_while(&mut self, cursor: &mut TokenCursor) -> Result<ControlFlow, RillError> {
        let mut condition = Vec::new();
        while !cursor.next_is_punct("{") {
            condition.push(cursor.pop()?);
        }
        let body = capture_block(cursor)?;

        loop {
            let mut condition_cursor = TokenCursor::new(condition.clone());
            if !expression::parse_comparison(&mut condition_cursor, &self.env)? {
                break;
            }
            let mut body_cursor = TokenCursor::new(body.clone());
            match self.execute_block(&mut body_cursor)? {
                ControlFlow::Break => break,
                ControlFlow::Continue | ControlFlow::None => {}
            }
        }
        Ok(ControlFlow::None)
    }

    /// `for <ident> = <arith> to <arith> { block }`
    ///
    /// The bound is evaluated once at entry. The loop variable lives in the
    /// shared environment: the body sees it, may reassign it, and it remains
    /// bound at its final value after the loop exits. Break exits without
    /// the post-iteration increment.
    fn execute_for(&mut self, cursor: &mut TokenCursor) -> Result<ControlFlow, RillError> {
        let variable = cursor.pop()?;
        if variable.kind != TokenKind::Identifier {
            return Err(RillError::unexpected_token(&variable, "a loop variable name"));
        }
        let equals = cursor.pop()?;
        if equals.kind != TokenKind::Equals {
            return Err(RillError::unexpected_token(&equals, "'='"));
        }
        let initial = expression::parse_arithmetic(cursor, &self.env)?;
        let to = cursor.pop()?;
        if to.kind != TokenKind::Identifier || to.text != "to" {
            return Err(RillError::unexpected_token(&to, "'to'"));
        }
        let bound = expression::parse_arithmetic(cursor, &self.env)?;
        self.env.set(variable.text.clone(), initial);
        let body = capture_block(cursor)?;

        loop {
            let current = self.env.get(&variable.text).ok_or_else(|| {
                RillError::undefined_variable(&variable.text, variable.location(), &self.env.names())
            })?;
            if current >= bound {
                break;
            }
            let mut body_cursor = TokenCursor::new(body.clone());
            match self.execute_block(&mut body_cursor)? {
                ControlFlow::Break => break,
                ControlFlow::Continue | ControlFlow::None => {
                    // re-read: the body may have reassigned the loop variable
                    let after = self.env.get(&variable.text).unwrap_or(current);
                    self.env.set(variable.text.clone(), after.wrapping_add(1));
                }
            }
        }
        Ok(ControlFlow::None)
    }

    /// Consume a `{ statement* }` block, executing each statement and
    /// propagating any signal or error immediately (without consuming the
    /// rest of the block's statements).
    fn execute_block(&mut self, cursor: &mut TokenCursor) -> Result<ControlFlow, RillError> {
        let open = cursor.pop()?;
        if !open.is_punct("{") {
            return Err(RillError::unexpected_token(&open, "'{'"));
        }
        while !cursor.next_is_punct("}") {
            if cursor.is_empty() {
                return Err(RillError::empty_cursor(UNTERMINATED_BLOCK.to_string()));
            }
            let flow = self.execute_statement(cursor)?;
            if flow != ControlFlow::None {
                return Ok(flow);
            }
        }
        cursor.pop()?; // the closing '}'
        Ok(ControlFlow::None)
    }

    /// Consume a `{ ... }` block to its matching `}` without evaluating
    /// anything inside it. Used for the untaken branch of a conditional.
    fn skip_block(&mut self, cursor: &mut TokenCursor) -> Result<(), RillError> {
        let open = cursor.pop()?;
        if !open.is_punct("{") {
            return Err(RillError::unexpected_token(&open, "'{'"));
        }
        let mut depth = 1;
        while depth != 0 {
            let token = cursor
                .pop()
                .map_err(|_| RillError::empty_cursor(UNTERMINATED_BLOCK.to_string()))?;
            if token.is_punct("{") {
                depth += 1;
            }
            if token.is_punct("}") {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Lexically consume an already-dispatched `else` branch: either a plain
    /// block or a chained `if`, whose comparison tokens are discarded and
    /// whose own `else` chain is skipped recursively.
    fn skip_else_branch(&mut self, cursor: &mut TokenCursor) -> Result<(), RillError> {
        if cursor.next_is_keyword("if") {
            cursor.pop()?;
            while !cursor.next_is_punct("{") {
                cursor.pop()?;
            }
            self.skip_block(cursor)?;
            if cursor.next_is_keyword("else") {
                cursor.pop()?;
                self.skip_else_branch(cursor)?;
            }
            Ok(())
        } else {
            self.skip_block(cursor)
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture a `{ ... }` block, braces included, as a token span for replay
fn capture_block(cursor: &mut TokenCursor) -> Result<Vec<Token>, RillError> {
    let open = cursor.pop()?;
    if !open.is_punct("{") {
        return Err(RillError::unexpected_token(&open, "'{'"));
    }
    let mut depth = 1;
    let mut tokens = vec![open];
    while depth != 0 {
        let token = cursor
            .pop()
            .map_err(|_| RillError::empty_cursor(UNTERMINATED_BLOCK.to_string()))?;
        if token.is_punct("{") {
            depth += 1;
        }
        if token.is_punct("}") {
            depth -= 1;
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Consume an optional trailing `;` after assignment, print, break, continue
fn consume_terminator(cursor: &mut TokenCursor) {
    if cursor.next_is_punct(";") {
        let _ = cursor.pop();
    }
}
