use super::Element;

/// A single line of a formal proof.
///
/// Every slot is optional, so that incomplete lines can still be represented and reported by the
/// checker instead of being rejected wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProofLine {
    pub label: Option<String>,
    pub formula: Option<Element>,
    pub reason: Option<Reason>,
}

impl ProofLine {
    pub fn new(label: Option<&str>, formula: Element, reason: Reason) -> Self {
        Self {
            label: label.map(str::to_owned),
            formula: Some(formula),
            reason: Some(reason),
        }
    }

    /// Returns the label of this line, if it has a non-empty one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// A complete formal proof of a proposition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormalProof {
    pub lines: Vec<ProofLine>,
}

/// The justification of a proof line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    Add(Add),
    Rename(Rename),
    ModusPonens(ModusPonens),
    SubstFree(SubstFree),
    SubstPred(SubstPred),
    SubstFunc(SubstFunc),
    Universal(Universal),
    Existential(Existential),
    ConditionalProof(ConditionalProof),
}

/// Adds an axiom or an already proved proposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Add {
    pub reference: String,
}

/// Renames the subject variable bound by one (or every) quantifier of the referenced formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub reference: String,
    pub original: Element,
    pub replacement: Element,

    /// Which binder over `original` to rename, counting from 1 in depth-first order. Zero means
    /// every binder.
    pub occurrence: usize,
}

/// Derives `B` from `A -> B` (the first reference) and `A` (the second).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModusPonens {
    pub reference1: String,
    pub reference2: String,
}

/// Substitutes a term for the free occurrences of a subject variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstFree {
    pub reference: String,
    pub subject_variable: Element,
    pub substitute: Element,
}

/// Substitutes a formula for a predicate variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstPred {
    pub reference: String,
    pub predicate_variable: Element,
    pub substitute: Option<Element>,
}

/// Substitutes a term for a function variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstFunc {
    pub reference: String,
    pub function_variable: Element,
    pub substitute: Option<Element>,
}

/// Derives `A -> forall x B` from `A -> B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universal {
    pub reference: String,
    pub subject_variable: Element,
}

/// Derives `(exists x A) -> B` from `A -> B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Existential {
    pub reference: String,
    pub subject_variable: Element,
}

/// Derives `H -> C` from a nested proof of `C` under the hypothesis `H`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalProof {
    pub hypothesis: Option<Hypothesis>,
    pub lines: Vec<ProofLine>,
    pub conclusion: Option<Conclusion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    pub label: Option<String>,
    pub formula: Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conclusion {
    pub formula: Element,
}

/// The kinds of reasons, without their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Add,
    Rename,
    ModusPonens,
    SubstFree,
    SubstPred,
    SubstFunc,
    Universal,
    Existential,
    ConditionalProof,
}

impl_str_conversion_traits!(RuleKind {
    Add: "add",
    Rename: "rename",
    ModusPonens: "mp",
    SubstFree: "subst-free",
    SubstPred: "subst-pred",
    SubstFunc: "subst-func",
    Universal: "universal",
    Existential: "existential",
    ConditionalProof: "cp",
});

impl RuleKind {
    /// The name of the accessor segment used for this reason in location paths.
    pub fn accessor(self) -> &'static str {
        match self {
            RuleKind::Add => ".getAdd()",
            RuleKind::Rename => ".getRename()",
            RuleKind::ModusPonens => ".getModusPonens()",
            RuleKind::SubstFree => ".getSubstFree()",
            RuleKind::SubstPred => ".getSubstPred()",
            RuleKind::SubstFunc => ".getSubstFunc()",
            RuleKind::Universal => ".getUniversal()",
            RuleKind::Existential => ".getExistential()",
            RuleKind::ConditionalProof => ".getConditionalProof()",
        }
    }
}

impl Reason {
    pub fn kind(&self) -> RuleKind {
        match self {
            Reason::Add(_) => RuleKind::Add,
            Reason::Rename(_) => RuleKind::Rename,
            Reason::ModusPonens(_) => RuleKind::ModusPonens,
            Reason::SubstFree(_) => RuleKind::SubstFree,
            Reason::SubstPred(_) => RuleKind::SubstPred,
            Reason::SubstFunc(_) => RuleKind::SubstFunc,
            Reason::Universal(_) => RuleKind::Universal,
            Reason::Existential(_) => RuleKind::Existential,
            Reason::ConditionalProof(_) => RuleKind::ConditionalProof,
        }
    }
}
