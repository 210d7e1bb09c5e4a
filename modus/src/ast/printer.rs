//! A printer for modules in the textual module format.

use crate::{
    ast::*,
    parser::{Reserved, Token},
    utils::is_symbol_character,
};
use std::{borrow::Cow, fmt, io, str::FromStr};

/// Prints a module to the standard output.
pub fn print_module(module: &Module) -> io::Result<()> {
    let mut stdout = io::stdout();
    write_module(&mut stdout, module)
}

/// Writes a module to `dest`, in a form that can be parsed back.
pub fn write_module(dest: &mut dyn io::Write, module: &Module) -> io::Result<()> {
    ModulePrinter { inner: dest }.write_module(module)
}

struct ModulePrinter<'a> {
    inner: &'a mut dyn io::Write,
}

impl<'a> ModulePrinter<'a> {
    fn write_module(&mut self, module: &Module) -> io::Result<()> {
        if !module.address.is_empty() {
            writeln!(self.inner, "(module \"{}\")", escape_string(&module.address))?;
        }
        for node in &module.nodes {
            writeln!(self.inner)?;
            self.write_node(node)?;
        }
        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> io::Result<()> {
        match node {
            Node::Axiom(a) => {
                writeln!(self.inner, "(axiom {} {})", quote_symbol(&a.label), a.formula)
            }
            Node::PredicateDefinition(d) | Node::FunctionDefinition(d) => {
                let keyword = match node {
                    Node::PredicateDefinition(_) => Reserved::DefinePredicate,
                    _ => Reserved::DefineFunction,
                };
                writeln!(
                    self.inner,
                    "({} {} {} {})",
                    keyword,
                    quote_symbol(&d.label),
                    d.term,
                    d.body
                )
            }
            Node::Proposition(p) => {
                write!(self.inner, "(proposition {} {}", quote_symbol(&p.label), p.formula)?;
                for proof in &p.proofs {
                    write!(self.inner, "\n  (proof")?;
                    self.write_lines(&proof.lines, 2)?;
                    write!(self.inner, ")")?;
                }
                writeln!(self.inner, ")")
            }
        }
    }

    fn write_lines(&mut self, lines: &[ProofLine], depth: usize) -> io::Result<()> {
        for line in lines {
            write!(self.inner, "\n{}", "  ".repeat(depth))?;
            self.write_line(line, depth)?;
        }
        Ok(())
    }

    fn write_line(&mut self, line: &ProofLine, depth: usize) -> io::Result<()> {
        write!(self.inner, "(line")?;
        self.write_label(line.label(), line.formula.as_ref())?;
        if let Some(formula) = &line.formula {
            write!(self.inner, " {}", formula)?;
        }
        if let Some(reason) = &line.reason {
            write!(self.inner, " :{}", reason.kind())?;
            self.write_reason(reason, depth)?;
        }
        write!(self.inner, ")")
    }

    /// Writes a label before `formula`. An unlabelled atom would be read back as the label, so in
    /// that case the empty label is written instead.
    fn write_label(&mut self, label: Option<&str>, formula: Option<&Element>) -> io::Result<()> {
        match label.filter(|l| !l.is_empty()) {
            Some(label) => write!(self.inner, " {}", quote_symbol(label)),
            None if formula.is_some_and(Element::is_atom) => write!(self.inner, " ||"),
            None => Ok(()),
        }
    }

    fn write_reason(&mut self, reason: &Reason, depth: usize) -> io::Result<()> {
        match reason {
            Reason::Add(Add { reference }) => write!(self.inner, " {}", quote_symbol(reference)),
            Reason::ModusPonens(ModusPonens { reference1, reference2 }) => write!(
                self.inner,
                " {} {}",
                quote_symbol(reference1),
                quote_symbol(reference2)
            ),
            Reason::Rename(r) => {
                write!(
                    self.inner,
                    " {} {} {}",
                    quote_symbol(&r.reference),
                    r.original,
                    r.replacement
                )?;
                if r.occurrence != 0 {
                    write!(self.inner, " {}", r.occurrence)?;
                }
                Ok(())
            }
            Reason::SubstFree(s) => write!(
                self.inner,
                " {} {} {}",
                quote_symbol(&s.reference),
                s.subject_variable,
                s.substitute
            ),
            Reason::SubstPred(SubstPred {
                reference,
                predicate_variable: variable,
                substitute,
            })
            | Reason::SubstFunc(SubstFunc {
                reference,
                function_variable: variable,
                substitute,
            }) => {
                write!(self.inner, " {} {}", quote_symbol(reference), variable)?;
                if let Some(s) = substitute {
                    write!(self.inner, " {}", s)?;
                }
                Ok(())
            }
            Reason::Universal(Universal { reference, subject_variable })
            | Reason::Existential(Existential { reference, subject_variable }) => write!(
                self.inner,
                " {} {}",
                quote_symbol(reference),
                subject_variable
            ),
            Reason::ConditionalProof(cp) => {
                if let Some(h) = &cp.hypothesis {
                    write!(self.inner, " (hypothesis")?;
                    self.write_label(h.label.as_deref(), Some(&h.formula))?;
                    write!(self.inner, " {})", h.formula)?;
                }
                self.write_lines(&cp.lines, depth + 1)?;
                if let Some(c) = &cp.conclusion {
                    write!(self.inner, "\n{}(conclusion {})", "  ".repeat(depth + 1), c.formula)?;
                }
                Ok(())
            }
        }
    }
}

fn quote_symbol(symbol: &str) -> Cow<str> {
    // Any symbol that is empty, is a reserved word, or contains non-symbol characters must be
    // quoted
    if symbol.is_empty()
        || Reserved::from_str(symbol).is_ok()
        || symbol.chars().any(|c| !is_symbol_character(c))
    {
        Cow::Owned(format!("|{}|", symbol))
    } else {
        Cow::Borrowed(symbol)
    }
}

fn escape_string(string: &str) -> Cow<str> {
    if string.contains('"') {
        Cow::Owned(string.replace('"', "\"\""))
    } else {
        Cow::Borrowed(string)
    }
}

fn write_atom(f: &mut fmt::Formatter, atom: &str) -> fmt::Result {
    // Quoted symbols can't contain `|` or `\`, so these atoms are written as string literals
    if atom.contains(['|', '\\']) {
        write!(f, "\"{}\"", escape_string(atom))
    } else {
        write!(f, "{}", quote_symbol(atom))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Element::Atom(a) => write_atom(f, a),
            Element::List(l) => write!(f, "{}", l),
        }
    }
}

impl fmt::Display for ElementList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        write_atom(f, self.operator())?;
        for e in self.elements() {
            write!(f, " {}", e)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Symbol(s) => write!(f, "{}", quote_symbol(s)),
            Token::Keyword(k) => write!(f, ":{}", k),
            Token::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Token::ReservedWord(r) => write!(f, "{}", r),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
