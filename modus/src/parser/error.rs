//! The types for parser errors.

use crate::parser::Token;
use thiserror::Error;

/// The error type for the parser.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The lexer encountered an unexpected character.
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),

    /// The lexer encountered a `\` character while reading a quoted symbol.
    #[error("quoted symbol contains backslash")]
    BackslashInQuotedSymbol,

    /// The lexer encountered the end of the input while reading a quoted symbol.
    #[error("unexpected EOF in quoted symbol")]
    EofInQuotedSymbol,

    /// The lexer encountered the end of the input while reading a string literal.
    #[error("unexpected EOF in string literal")]
    EofInString,

    /// The parser encountered an unexpected token.
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(Token),

    /// A proof line names a rule that does not exist.
    #[error("unknown rule: ':{0}'")]
    UnknownRule(String),

    /// The occurrence argument of a `:rename` line is not a natural number.
    #[error("invalid occurrence: '{0}'")]
    InvalidOccurrence(String),

    /// The module address was declared more than once.
    #[error("module address was already declared as '{0}'")]
    RepeatedModuleDeclaration(String),
}
