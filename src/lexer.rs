// File: src/lexer.rs
//
// Lexical analyzer (tokenizer) for the Rill language.
// Converts source code text into a stream of classified tokens.
//
// Supports:
// - Identifiers (letter- or underscore-led alphanumeric runs); keywords such
//   as if/else/for/while/print/scan/break/continue/to are lexed as plain
//   identifiers and recognized by text at statement dispatch
// - Integer literals (digit runs)
// - Quoted string literals with escape sequences (quotes stripped)
// - The assignment operator `=` and the comparison operators ==, !=, <, >
// - Punctuation: { } ( ) ; , + - * /
// - Comments starting with # (skipped until end of line)
//
// Whitespace runs become Whitespace tokens; the interpreter filters them out
// before parsing ever sees the stream.

use crate::errors::{RillError, SourceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Integer,
    QuotedString,
    /// The single `=` used by assignment and `for`
    Equals,
    /// Everything else: braces, parens, separators, arithmetic and
    /// comparison operators
    Punctuation,
    Whitespace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token { kind, text: text.into(), line, column }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// True for a punctuation token with exactly this text. A string literal
    /// whose content happens to be `{`, `}` or `;` never matches.
    pub fn is_punct(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == text
    }
}

/// Tokenizes Rill source code into a vector of tokens.
///
/// Processes the input character by character, recognizing identifiers,
/// integer literals, strings, operators, and punctuation. Comments starting
/// with # are skipped until end of line. Tokenization is a pure function of
/// the input text.
///
/// # Errors
/// Returns a `LexError` for an unterminated string literal or a character
/// outside the recognized alphabet, carrying the offending character and its
/// position. Lexing stops at the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, RillError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;
    let mut col = 1;

    while let Some(&c) = chars.peek() {
        let start_line = line;
        let start_col = col;

        match c {
            ' ' | '\t' | '\r' | '\n' => {
                let mut run = String::new();
                while let Some(&ch) = chars.peek() {
                    if !matches!(ch, ' ' | '\t' | '\r' | '\n') {
                        break;
                    }
                    chars.next();
                    run.push(ch);
                    if ch == '\n' {
                        line += 1;
                        col = 1;
                    } else {
                        col += 1;
                    }
                }
                tokens.push(Token::new(TokenKind::Whitespace, run, start_line, start_col));
            }
            '#' => {
                while let Some(&ch) = chars.peek() {
                    chars.next();
                    if ch == '\n' {
                        line += 1;
                        col = 1;
                        break;
                    }
                    col += 1;
                }
            }
            '"' => {
                chars.next(); // skip opening quote
                col += 1;
                let mut s = String::new();
                let mut terminated = false;
                while let Some(&ch) = chars.peek() {
                    chars.next();
                    if ch == '\n' {
                        line += 1;
                        col = 1;
                    } else {
                        col += 1;
                    }
                    if ch == '"' {
                        terminated = true;
                        break;
                    }
                    if ch == '\\' {
                        if let Some(&esc) = chars.peek() {
                            chars.next();
                            col += 1;
                            match esc {
                                'n' => s.push('\n'),
                                't' => s.push('\t'),
                                '\\' => s.push('\\'),
                                '"' => s.push('"'),
                                _ => s.push(esc),
                            }
                        }
                    } else {
                        s.push(ch);
                    }
                }
                if !terminated {
                    return Err(RillError::lex_error(
                        "Unterminated string literal".to_string(),
                        SourceLocation::new(start_line, start_col),
                    ));
                }
                tokens.push(Token::new(TokenKind::QuotedString, s, start_line, start_col));
            }
            '0'..='9' => {
                let mut num = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_digit() {
                        num.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }
                tokens.push(Token::new(TokenKind::Integer, num, start_line, start_col));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        ident.push(ch);
                        chars.next();
                        col += 1;
                    } else {
                        break;
                    }
                }
                tokens.push(Token::new(TokenKind::Identifier, ident, start_line, start_col));
            }
            '=' => {
                chars.next();
                col += 1;
                if chars.peek() == Some(&'=') {
                    chars.next();
                    col += 1;
                    tokens.push(Token::new(TokenKind::Punctuation, "==", start_line, start_col));
                } else {
                    tokens.push(Token::new(TokenKind::Equals, "=", start_line, start_col));
                }
            }
            '!' => {
                chars.next();
                col += 1;
                if chars.peek() == Some(&'=') {
                    chars.next();
                    col += 1;
                    tokens.push(Token::new(TokenKind::Punctuation, "!=", start_line, start_col));
                } else {
                    return Err(RillError::lex_error(
                        "Unexpected character '!'".to_string(),
                        SourceLocation::new(start_line, start_col),
                    ));
                }
            }
            '<' | '>' | '{' | '}' | '(' | ')' | ';' | ',' | '+' | '-' | '*' | '/' => {
                chars.next();
                col += 1;
                tokens.push(Token::new(
                    TokenKind::Punctuation,
                    c.to_string(),
                    start_line,
                    start_col,
                ));
            }
            _ => {
                return Err(RillError::lex_error(
                    format!("Unrecognized character '{}'", c),
                    SourceLocation::new(start_line, start_col),
                ));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn classifies_basic_tokens() {
        let tokens = kinds_and_texts("x = 42 + y");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::Equals, "=".to_string()),
                (TokenKind::Integer, "42".to_string()),
                (TokenKind::Punctuation, "+".to_string()),
                (TokenKind::Identifier, "y".to_string()),
            ]
        );
    }

    #[test]
    fn keywords_are_plain_identifiers() {
        let tokens = kinds_and_texts("while for to break");
        assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Identifier));
    }

    #[test]
    fn distinguishes_assignment_from_comparison() {
        let tokens = kinds_and_texts("a == b = c != d");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Punctuation, "==".to_string()),
                (TokenKind::Identifier, "b".to_string()),
                (TokenKind::Equals, "=".to_string()),
                (TokenKind::Identifier, "c".to_string()),
                (TokenKind::Punctuation, "!=".to_string()),
                (TokenKind::Identifier, "d".to_string()),
            ]
        );
    }

    #[test]
    fn string_literals_are_stored_without_quotes() {
        let tokens = kinds_and_texts("print \"hello world\"");
        assert_eq!(tokens[1], (TokenKind::QuotedString, "hello world".to_string()));
    }

    #[test]
    fn whitespace_runs_become_single_tokens() {
        let tokens = tokenize("a  \n\t b").unwrap();
        let whitespace: Vec<&Token> =
            tokens.iter().filter(|t| t.kind == TokenKind::Whitespace).collect();
        assert_eq!(whitespace.len(), 1);
        assert_eq!(whitespace[0].text, "  \n\t ");
    }

    #[test]
    fn comments_are_skipped() {
        let tokens = kinds_and_texts("x = 1 # trailing comment\ny = 2");
        assert_eq!(tokens.len(), 6);
        assert!(!tokens.iter().any(|(_, text)| text.contains("comment")));
    }

    #[test]
    fn unterminated_string_is_a_lex_error() {
        let err = tokenize("print \"oops").unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexError);
    }

    #[test]
    fn unrecognized_character_is_a_lex_error() {
        let err = tokenize("x = 1 @ 2").unwrap_err();
        assert_eq!(err.kind, ErrorKind::LexError);
        assert!(err.message.contains('@'));
    }

    #[test]
    fn tokens_carry_positions() {
        let tokens = tokenize("x = 1\ny = 2").unwrap();
        let y = tokens.iter().find(|t| t.text == "y").unwrap();
        assert_eq!((y.line, y.column), (2, 1));
    }

    #[test]
    fn tokenize_is_a_pure_function_of_the_source() {
        let source = "for i = 0 to 10 { print i, \"squared is\", i * i }";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }
}
