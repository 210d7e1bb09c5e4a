use super::{Element, FormalProof};

/// A mathematical module: an ordered list of axioms, definitions and propositions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// Where the module was loaded from. Used as the module part of every location.
    pub address: String,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Axiom(Axiom),
    PredicateDefinition(Definition),
    FunctionDefinition(Definition),
    Proposition(Proposition),
}

impl Node {
    pub fn label(&self) -> &str {
        match self {
            Node::Axiom(a) => &a.label,
            Node::PredicateDefinition(d) | Node::FunctionDefinition(d) => &d.label,
            Node::Proposition(p) => &p.label,
        }
    }

    /// The accessor segment used for this node in location paths.
    pub fn accessor(&self) -> &'static str {
        match self {
            Node::Axiom(_) => ".getAxiom()",
            Node::PredicateDefinition(_) => ".getPredicateDefinition()",
            Node::FunctionDefinition(_) => ".getFunctionDefinition()",
            Node::Proposition(_) => ".getProposition()",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axiom {
    pub label: String,
    pub formula: Element,
}

/// A predicate or function definition. `term` is the defined application, such as
/// `(PREDCON subset (VAR x) (VAR y))`, and `body` is what it unfolds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub label: String,
    pub term: Element,
    pub body: Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposition {
    pub label: String,
    pub formula: Element,
    pub proofs: Vec<FormalProof>,
}
