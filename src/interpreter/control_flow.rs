// File: src/interpreter/control_flow.rs
//
// Control flow signals for loop statements.
//
// The interpreter uses ControlFlow to manage break/continue statements
// within loops (for, while). Every statement-execution routine returns one
// of these alongside its Result, so a signal raised deep inside nested
// blocks propagates outward frame by frame until the nearest enclosing loop
// consumes it, without using panics or exceptions. A signal that reaches the
// top of the program is reported as an error, never silently dropped.

/// Control flow signals for loop execution
///
/// Returned by every statement handler. Loop handlers pattern-match on the
/// signal after each body execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Normal execution, continue to next statement
    None,
    /// Break statement encountered, exit the innermost loop
    Break,
    /// Continue statement encountered, skip to next loop iteration
    Continue,
}
