//! A lexer for the textual module format.

use crate::{parser::ParserError, utils::is_symbol_character, Error, ModusResult};
use std::{
    io::{self, BufRead},
    str::FromStr,
};

#[derive(Debug, PartialEq, Eq)]
pub enum Token {
    /// The `(` token.
    OpenParen,

    /// The `)` token.
    CloseParen,

    /// Either a run of symbol characters (see `is_symbol_character`), or any text between two
    /// `|` characters that contains neither `|` nor `\`. Labels, operators and atom values are
    /// all symbols.
    Symbol(String),

    /// The name of a rule, written as `:name`. The colon is not part of the stored name.
    Keyword(String),

    /// A string literal.
    String(String),

    /// A reserved word.
    ReservedWord(Reserved),

    Eof,
}

/// The words that open a module node or a part of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Module,
    Axiom,
    DefinePredicate,
    DefineFunction,
    Proposition,
    Proof,
    Line,
    Hypothesis,
    Conclusion,
}

impl_str_conversion_traits!(Reserved {
    Module: "module",
    Axiom: "axiom",
    DefinePredicate: "define-predicate",
    DefineFunction: "define-function",
    Proposition: "proposition",
    Proof: "proof",
    Line: "line",
    Hypothesis: "hypothesis",
    Conclusion: "conclusion",
});

/// A one-based `(line, column)` pair.
pub type Position = (usize, usize);

pub struct Lexer<R> {
    input: R,
    current_line: Option<std::vec::IntoIter<char>>,
    current_char: Option<char>,
    position: Position,
}

impl<R: BufRead> Lexer<R> {
    /// Reads the first line of `input`, which may fail with an IO error.
    pub fn new(input: R) -> io::Result<Self> {
        let mut lexer = Lexer {
            input,
            current_line: None,
            current_char: None,
            position: (0, 0),
        };
        lexer.next_line()?;
        if let Some(line) = &mut lexer.current_line {
            lexer.current_char = line.next();
            lexer.position.1 = 1;
        }
        Ok(lexer)
    }

    /// Moves to the next character, reading a new line when the current one is exhausted.
    fn advance(&mut self) -> io::Result<()> {
        let exhausted = self
            .current_line
            .as_ref()
            .is_some_and(|line| line.as_slice().is_empty());
        if exhausted {
            self.next_line()?;
        }
        self.current_char = match &mut self.current_line {
            Some(line) => {
                self.position.1 += 1;
                line.next()
            }
            None => None,
        };
        Ok(())
    }

    /// Drops whatever is left of the current line and loads the next one.
    fn next_line(&mut self) -> io::Result<()> {
        let mut buf = String::new();
        self.current_line = match self.input.read_line(&mut buf)? {
            0 => None,
            _ => {
                self.position = (self.position.0 + 1, 0);
                Some(buf.chars().collect::<Vec<_>>().into_iter())
            }
        };
        Ok(())
    }

    fn take_while<P: Fn(char) -> bool>(&mut self, predicate: P) -> io::Result<String> {
        let mut taken = String::new();
        while let Some(c) = self.current_char.filter(|&c| predicate(c)) {
            taken.push(c);
            self.advance()?;
        }
        Ok(taken)
    }

    /// Skips whitespace and `;` comments, which run to the end of the line.
    fn skip_blanks(&mut self) -> io::Result<()> {
        loop {
            self.take_while(char::is_whitespace)?;
            if self.current_char != Some(';') {
                return Ok(());
            }
            self.next_line()?;
            self.advance()?;
        }
    }

    /// Returns the next token and the position where it starts.
    pub fn next_token(&mut self) -> ModusResult<(Token, Position)> {
        self.skip_blanks()?;
        let start = self.position;
        let token = match self.current_char {
            Some(c @ ('(' | ')')) => {
                self.advance()?;
                Ok(if c == '(' { Token::OpenParen } else { Token::CloseParen })
            }
            Some('"') => self.read_string(),
            Some('|') => self.read_quoted_symbol(),
            Some(':') => self.read_keyword(),
            Some(c) if is_symbol_character(c) => self.read_simple_symbol(),
            None => Ok(Token::Eof),
            Some(c) => Err(Error::Parser(ParserError::UnexpectedChar(c), start)),
        }?;
        Ok((token, start))
    }

    fn read_simple_symbol(&mut self) -> ModusResult<Token> {
        let symbol = self.take_while(is_symbol_character)?;
        Ok(match Reserved::from_str(&symbol) {
            Ok(word) => Token::ReservedWord(word),
            Err(()) => Token::Symbol(symbol),
        })
    }

    fn read_quoted_symbol(&mut self) -> ModusResult<Token> {
        self.advance()?;
        let symbol = self.take_while(|c| c != '|' && c != '\\')?;
        let error = match self.current_char {
            Some('|') => {
                self.advance()?;
                return Ok(Token::Symbol(symbol));
            }
            Some(_) => ParserError::BackslashInQuotedSymbol,
            None => ParserError::EofInQuotedSymbol,
        };
        Err(Error::Parser(error, self.position))
    }

    fn read_keyword(&mut self) -> ModusResult<Token> {
        self.advance()?;
        Ok(Token::Keyword(self.take_while(is_symbol_character)?))
    }

    /// Reads a string literal. Inside it, `""` stands for a single `"`.
    fn read_string(&mut self) -> ModusResult<Token> {
        self.advance()?;
        let mut contents = String::new();
        loop {
            contents.push_str(&self.take_while(|c| c != '"')?);
            if self.current_char.is_none() {
                return Err(Error::Parser(ParserError::EofInString, self.position));
            }
            self.advance()?;
            if self.current_char != Some('"') {
                return Ok(Token::String(contents));
            }
            contents.push('"');
            self.advance()?;
        }
    }
}
