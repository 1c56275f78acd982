// File: src/errors.rs
//
// Error handling and reporting for the Rill interpreter.
// Provides structured error types with source location information
// and colored single-line diagnostics.

use crate::lexer::Token;
use colored::Colorize;
use std::fmt;

/// Source location information for tracking where a token appears in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Placeholder for errors with no token to point at (e.g. exhausted input)
    pub fn unknown() -> Self {
        Self { line: 0, column: 0 }
    }

    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Types of errors that can occur while interpreting Rill code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad character or unterminated string during tokenization
    LexError,
    /// A token that is not valid at the current position
    UnexpectedToken,
    /// A token was required but the cursor was exhausted (structural truncation)
    EmptyCursor,
    UndefinedVariable,
    DivisionByZero,
    /// `scan` received a line that does not parse as an integer
    InvalidScanInput,
    /// `break`/`continue` escaped to the top level with no enclosing loop
    UnhandledControlSignal,
    /// I/O failure on the input/output collaborators
    RuntimeError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::LexError => write!(f, "Lex Error"),
            ErrorKind::UnexpectedToken => write!(f, "Unexpected Token"),
            ErrorKind::EmptyCursor => write!(f, "Unexpected End Of Input"),
            ErrorKind::UndefinedVariable => write!(f, "Undefined Variable"),
            ErrorKind::DivisionByZero => write!(f, "Division By Zero"),
            ErrorKind::InvalidScanInput => write!(f, "Invalid Scan Input"),
            ErrorKind::UnhandledControlSignal => write!(f, "Unhandled Control Signal"),
            ErrorKind::RuntimeError => write!(f, "Runtime Error"),
        }
    }
}

/// A structured error with location information
#[derive(Debug, Clone)]
pub struct RillError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: SourceLocation,
    pub suggestion: Option<String>,
}

impl RillError {
    pub fn new(kind: ErrorKind, message: String, location: SourceLocation) -> Self {
        Self { kind, message, location, suggestion: None }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Create a lexical error at a known position
    pub fn lex_error(message: String, location: SourceLocation) -> Self {
        Self::new(ErrorKind::LexError, message, location)
    }

    /// Create an empty-cursor error (a token was required, none remained)
    pub fn empty_cursor(message: String) -> Self {
        Self::new(ErrorKind::EmptyCursor, message, SourceLocation::unknown())
    }

    /// Create an unexpected-token error naming the token and what was expected
    pub fn unexpected_token(token: &Token, expected: &str) -> Self {
        Self::new(
            ErrorKind::UnexpectedToken,
            format!("Expected {}, found '{}'", expected, token.text),
            token.location(),
        )
    }

    /// Create an undefined variable error, suggesting the closest bound name
    pub fn undefined_variable(name: &str, location: SourceLocation, candidates: &[String]) -> Self {
        let err = Self::new(
            ErrorKind::UndefinedVariable,
            format!("Variable '{}' is not defined", name),
            location,
        );
        match find_closest_match(name, candidates) {
            Some(closest) => err.with_suggestion(closest.to_string()),
            None => err,
        }
    }

    pub fn division_by_zero(location: SourceLocation) -> Self {
        Self::new(ErrorKind::DivisionByZero, "Division by zero".to_string(), location)
    }

    pub fn invalid_scan_input(line: &str) -> Self {
        Self::new(
            ErrorKind::InvalidScanInput,
            format!("Expected an integer, got '{}'", line),
            SourceLocation::unknown(),
        )
    }

    pub fn unhandled_signal(keyword: &str) -> Self {
        Self::new(
            ErrorKind::UnhandledControlSignal,
            format!("'{}' used outside of a loop", keyword),
            SourceLocation::unknown(),
        )
    }

    pub fn io_error(message: String) -> Self {
        Self::new(ErrorKind::RuntimeError, message, SourceLocation::unknown())
    }
}

impl fmt::Display for RillError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.kind);
        write!(f, "{}: {}", kind_str.red().bold(), self.message.bold())?;

        if self.location.is_known() {
            let location_str = format!("--> {}", self.location);
            write!(f, " {}", location_str.bright_blue())?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, " {}", format!("Did you mean '{}'?", suggestion).bright_green())?;
        }

        Ok(())
    }
}

impl std::error::Error for RillError {}

/// Computes the Levenshtein distance between two strings
/// Used for "Did you mean?" suggestions
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    // Initialize first column and row
    for (i, row) in matrix.iter_mut().enumerate().take(len1 + 1) {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}

/// Find the closest match from a list of candidates using Levenshtein distance
/// Returns None if no good match is found (distance > 3)
pub fn find_closest_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    if candidates.is_empty() {
        return None;
    }

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for candidate in candidates {
        let distance = levenshtein_distance(target, candidate);

        if distance <= 3 && distance < best_distance {
            best_distance = distance;
            best_match = Some(candidate.as_str());
        }
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basic_distances() {
        assert_eq!(levenshtein_distance("count", "count"), 0);
        assert_eq!(levenshtein_distance("count", "cont"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn closest_match_rejects_distant_names() {
        let candidates = vec!["total".to_string(), "x".to_string()];
        assert_eq!(find_closest_match("totl", &candidates), Some("total"));
        assert_eq!(find_closest_match("completely_unrelated", &candidates), None);
    }

    #[test]
    fn undefined_variable_carries_suggestion() {
        let candidates = vec!["counter".to_string()];
        let err = RillError::undefined_variable("countr", SourceLocation::new(1, 5), &candidates);
        assert_eq!(err.kind, ErrorKind::UndefinedVariable);
        assert_eq!(err.suggestion.as_deref(), Some("counter"));
    }
}
