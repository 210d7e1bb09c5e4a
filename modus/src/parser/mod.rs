//! A parser for the textual module format.
//!
//! A module is a sequence of S-expression commands:
//!
//! ```text
//! (module "address")
//! (axiom A1 (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR A))))
//! (define-predicate D1 (PREDCON name (VAR x) ...) body)
//! (define-function D2 (FUNCON name (VAR x) ...) body)
//! (proposition T1 formula
//!   (proof
//!     (line l1 formula :add A1)
//!     ...))
//! ```

mod error;
mod lexer;

pub use error::ParserError;
pub use lexer::{Lexer, Position, Reserved, Token};

use crate::{ast::*, Error, ModusResult};
use std::{io::BufRead, str::FromStr};

/// Parses a module from any type that implements `BufRead`.
///
/// `address` is used as the module address, unless the input declares one with a `module`
/// command.
pub fn parse_module<T: BufRead>(input: T, address: &str) -> ModusResult<Module> {
    let mut parser = Parser::new(input)?;
    parser.parse_module(address)
}

/// Parses a single element, such as `(IMPL (PREDVAR A) (PREDVAR A))`.
pub fn parse_element<T: BufRead>(input: T) -> ModusResult<Element> {
    let mut parser = Parser::new(input)?;
    let element = parser.parse_element()?;
    parser.expect_token(Token::Eof)?;
    Ok(element)
}

/// A parser for the textual module format.
pub struct Parser<R> {
    lexer: Lexer<R>,
    current_token: Token,
    current_position: Position,
}

impl<R: BufRead> Parser<R> {
    /// Constructs a new `Parser` from a type that implements `BufRead`.
    ///
    /// This operation can fail if there is an IO or lexer error on the first token.
    pub fn new(input: R) -> ModusResult<Self> {
        let mut lexer = Lexer::new(input)?;
        let (current_token, current_position) = lexer.next_token()?;
        Ok(Parser { lexer, current_token, current_position })
    }

    /// Advances the parser one token, and returns the previous `(current_token, current_position)`.
    fn next_token(&mut self) -> ModusResult<(Token, Position)> {
        use std::mem::replace;

        let (new_token, new_position) = self.lexer.next_token()?;
        let old_token = replace(&mut self.current_token, new_token);
        let old_position = replace(&mut self.current_position, new_position);
        Ok((old_token, old_position))
    }

    /// Consumes the current token if it equals `expected`. Returns an error otherwise.
    fn expect_token(&mut self, expected: Token) -> ModusResult<()> {
        let (got, pos) = self.next_token()?;
        if got == expected {
            Ok(())
        } else {
            Err(Error::Parser(ParserError::UnexpectedToken(got), pos))
        }
    }

    /// Consumes the current token if it is a symbol, and returns the inner `String`. Returns an
    /// error otherwise.
    fn expect_symbol(&mut self) -> ModusResult<String> {
        match self.next_token()? {
            (Token::Symbol(s), _) => Ok(s),
            (other, pos) => Err(Error::Parser(ParserError::UnexpectedToken(other), pos)),
        }
    }

    /// Consumes the current token if it is a string literal, and returns its contents. Returns an
    /// error otherwise.
    fn expect_string(&mut self) -> ModusResult<String> {
        match self.next_token()? {
            (Token::String(s), _) => Ok(s),
            (other, pos) => Err(Error::Parser(ParserError::UnexpectedToken(other), pos)),
        }
    }

    /// Consumes the current token if it is a symbol, and returns it. Returns `None` otherwise.
    fn optional_symbol(&mut self) -> ModusResult<Option<String>> {
        match self.current_token {
            Token::Symbol(_) => self.expect_symbol().map(Some),
            _ => Ok(None),
        }
    }

    /// Reads the optional label of a line or hypothesis. The empty label `||` is no label.
    fn optional_label(&mut self) -> ModusResult<Option<String>> {
        Ok(self.optional_symbol()?.filter(|l| !l.is_empty()))
    }

    /// Calls `parse_func` repeatedly until a closing parenthesis is reached. This method consumes
    /// the ending `)` token.
    fn parse_sequence<T, F>(&mut self, mut parse_func: F) -> ModusResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> ModusResult<T>,
    {
        let mut result = Vec::new();
        while self.current_token != Token::CloseParen {
            result.push(parse_func(self)?);
        }
        self.next_token()?; // Consume `)` token
        Ok(result)
    }

    /// Parses every command until the end of the input, and returns the resulting module.
    pub fn parse_module(&mut self, address: &str) -> ModusResult<Module> {
        let mut declared_address: Option<String> = None;
        let mut nodes = Vec::new();

        while self.current_token != Token::Eof {
            self.expect_token(Token::OpenParen)?;
            let (token, position) = self.next_token()?;
            let node = match token {
                Token::ReservedWord(Reserved::Module) => {
                    let name = self.expect_string()?;
                    if let Some(previous) = declared_address {
                        let e = ParserError::RepeatedModuleDeclaration(previous);
                        return Err(Error::Parser(e, position));
                    }
                    declared_address = Some(name);
                    self.expect_token(Token::CloseParen)?;
                    continue;
                }
                Token::ReservedWord(Reserved::Axiom) => {
                    let label = self.expect_symbol()?;
                    let formula = self.parse_element()?;
                    self.expect_token(Token::CloseParen)?;
                    Node::Axiom(Axiom { label, formula })
                }
                Token::ReservedWord(Reserved::DefinePredicate) => {
                    Node::PredicateDefinition(self.parse_definition()?)
                }
                Token::ReservedWord(Reserved::DefineFunction) => {
                    Node::FunctionDefinition(self.parse_definition()?)
                }
                Token::ReservedWord(Reserved::Proposition) => {
                    Node::Proposition(self.parse_proposition()?)
                }
                _ => return Err(Error::Parser(ParserError::UnexpectedToken(token), position)),
            };
            nodes.push(node);
        }

        Ok(Module {
            address: declared_address.unwrap_or_else(|| address.to_owned()),
            nodes,
        })
    }

    /// Parses an element. Atoms can be simple symbols, quoted symbols or string literals.
    pub fn parse_element(&mut self) -> ModusResult<Element> {
        let (token, position) = self.next_token()?;
        match token {
            Token::OpenParen => {
                let operator = match self.next_token()? {
                    (Token::Symbol(s) | Token::String(s), _) => s,
                    (other, pos) => {
                        return Err(Error::Parser(ParserError::UnexpectedToken(other), pos))
                    }
                };
                let elements = self.parse_sequence(Self::parse_element)?;
                Ok(Element::list(operator, elements))
            }
            Token::Symbol(s) | Token::String(s) => Ok(Element::atom(s)),
            Token::ReservedWord(r) => Ok(Element::atom(r.to_string())),
            other => Err(Error::Parser(ParserError::UnexpectedToken(other), position)),
        }
    }

    fn parse_optional_element(&mut self) -> ModusResult<Option<Element>> {
        match self.current_token {
            Token::CloseParen => Ok(None),
            _ => self.parse_element().map(Some),
        }
    }

    /// Parses the rest of a `define-predicate` or `define-function` command.
    fn parse_definition(&mut self) -> ModusResult<Definition> {
        let label = self.expect_symbol()?;
        let term = self.parse_element()?;
        let body = self.parse_element()?;
        self.expect_token(Token::CloseParen)?;
        Ok(Definition { label, term, body })
    }

    /// Parses the rest of a `proposition` command, including its formal proofs.
    fn parse_proposition(&mut self) -> ModusResult<Proposition> {
        let label = self.expect_symbol()?;
        let formula = self.parse_element()?;
        let proofs = self.parse_sequence(|p| {
            p.expect_token(Token::OpenParen)?;
            p.expect_token(Token::ReservedWord(Reserved::Proof))?;
            let lines = p.parse_sequence(|p| {
                p.expect_token(Token::OpenParen)?;
                p.expect_token(Token::ReservedWord(Reserved::Line))?;
                p.parse_line()
            })?;
            Ok(FormalProof { lines })
        })?;
        Ok(Proposition { label, formula, proofs })
    }

    /// Parses the rest of a `line` command. Every part of a line is optional:
    ///
    /// ```text
    /// (line [<label>] [<element>] [:<rule> <argument>*])
    /// ```
    fn parse_line(&mut self) -> ModusResult<ProofLine> {
        let label = self.optional_label()?;
        let formula = match self.current_token {
            Token::OpenParen | Token::Symbol(_) | Token::String(_) => Some(self.parse_element()?),
            _ => None,
        };
        let reason = match self.current_token {
            Token::Keyword(_) => Some(self.parse_reason()?),
            _ => None,
        };
        self.expect_token(Token::CloseParen)?;
        Ok(ProofLine { label, formula, reason })
    }

    fn parse_reason(&mut self) -> ModusResult<Reason> {
        let (name, position) = match self.next_token()? {
            (Token::Keyword(name), pos) => (name, pos),
            (other, pos) => return Err(Error::Parser(ParserError::UnexpectedToken(other), pos)),
        };
        let Ok(kind) = RuleKind::from_str(&name) else {
            return Err(Error::Parser(ParserError::UnknownRule(name), position));
        };

        let reason = match kind {
            RuleKind::Add => Reason::Add(Add { reference: self.expect_symbol()? }),
            RuleKind::ModusPonens => Reason::ModusPonens(ModusPonens {
                reference1: self.expect_symbol()?,
                reference2: self.expect_symbol()?,
            }),
            RuleKind::Rename => {
                let reference = self.expect_symbol()?;
                let original = self.parse_element()?;
                let replacement = self.parse_element()?;
                let occurrence = match self.next_token_if_symbol()? {
                    Some((s, pos)) => s
                        .parse()
                        .map_err(|_| Error::Parser(ParserError::InvalidOccurrence(s), pos))?,
                    None => 0,
                };
                Reason::Rename(Rename { reference, original, replacement, occurrence })
            }
            RuleKind::SubstFree => Reason::SubstFree(SubstFree {
                reference: self.expect_symbol()?,
                subject_variable: self.parse_element()?,
                substitute: self.parse_element()?,
            }),
            RuleKind::SubstPred => Reason::SubstPred(SubstPred {
                reference: self.expect_symbol()?,
                predicate_variable: self.parse_element()?,
                substitute: self.parse_optional_element()?,
            }),
            RuleKind::SubstFunc => Reason::SubstFunc(SubstFunc {
                reference: self.expect_symbol()?,
                function_variable: self.parse_element()?,
                substitute: self.parse_optional_element()?,
            }),
            RuleKind::Universal => Reason::Universal(Universal {
                reference: self.expect_symbol()?,
                subject_variable: self.parse_element()?,
            }),
            RuleKind::Existential => Reason::Existential(Existential {
                reference: self.expect_symbol()?,
                subject_variable: self.parse_element()?,
            }),
            RuleKind::ConditionalProof => Reason::ConditionalProof(self.parse_conditional_proof()?),
        };
        Ok(reason)
    }

    fn next_token_if_symbol(&mut self) -> ModusResult<Option<(String, Position)>> {
        if !matches!(self.current_token, Token::Symbol(_)) {
            return Ok(None);
        }
        let position = self.current_position;
        self.expect_symbol().map(|s| Some((s, position)))
    }

    /// Parses the arguments of a `:cp` reason:
    ///
    /// ```text
    /// [(hypothesis [<label>] <element>)] (line ...)* [(conclusion <element>)]
    /// ```
    ///
    /// The parts must appear in this order. Missing parts are left for the checker to report.
    fn parse_conditional_proof(&mut self) -> ModusResult<ConditionalProof> {
        let mut hypothesis = None;
        let mut lines = Vec::new();
        let mut conclusion = None;

        while self.current_token == Token::OpenParen {
            self.next_token()?;
            let (token, position) = self.next_token()?;
            match token {
                Token::ReservedWord(Reserved::Hypothesis)
                    if hypothesis.is_none() && lines.is_empty() && conclusion.is_none() =>
                {
                    let label = self.optional_label()?;
                    let formula = self.parse_element()?;
                    self.expect_token(Token::CloseParen)?;
                    hypothesis = Some(Hypothesis { label, formula });
                }
                Token::ReservedWord(Reserved::Line) if conclusion.is_none() => {
                    lines.push(self.parse_line()?);
                }
                Token::ReservedWord(Reserved::Conclusion) if conclusion.is_none() => {
                    let formula = self.parse_element()?;
                    self.expect_token(Token::CloseParen)?;
                    conclusion = Some(Conclusion { formula });
                }
                _ => return Err(Error::Parser(ParserError::UnexpectedToken(token), position)),
            }
        }
        Ok(ConditionalProof { hypothesis, lines, conclusion })
    }
}
