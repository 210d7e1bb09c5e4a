use crate::ast::ModuleContext;
use indexmap::IndexSet;
use std::fmt;
use thiserror::Error;

/// The kinds of failures a formal proof check can report. Each kind has a stable numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ProofErrorKind {
    #[error("proof line must not be null")]
    ProofLineMustNotBeNull,

    #[error("reason must not be null")]
    ReasonMustNotBeNull,

    #[error("local label already exists")]
    LocalLabelAlreadyExists,

    #[error("this reason is not allowed")]
    ReasonNotAllowed,

    #[error("this is no allowed reference to a proved formula")]
    NoAllowedReference,

    #[error("referenced proof line is not proved")]
    ReferencedLineNotProved,

    #[error("expected formula differs")]
    ExpectedFormulaDiffers,

    #[error("last proof line must be identical to the proposition")]
    LastProofLineMustBeIdenticalToProposition,

    #[error("implication expected")]
    ImplicationExpected,

    #[error("must be the hypothesis of the first reference")]
    MustBeHypothesisOfFirstReference,

    #[error("current formula must be the conclusion of the first reference")]
    CurrentMustBeConclusion,

    #[error("subject variable expected")]
    SubjectVariableExpected,

    #[error("subject variable already occurs")]
    SubjectVariableAlreadyOccurs,

    #[error("subject variable occurs free")]
    SubjectVariableOccursFree,

    #[error("operator variable expected")]
    OperatorVariableExpected,

    #[error("only free subject variables are allowed as arguments")]
    OnlyFreeSubjectVariablesAllowed,

    #[error("substitute must not be null")]
    SubstituteMustNotBeNull,

    #[error("free subject variables should not get bound")]
    FreeSubjectVariablesShouldNotGetBound,

    #[error("substitution location contains a bound subject variable")]
    SubstitutionLocationContainsBoundSubjectVariable,

    #[error("hypothesis must not be null")]
    HypothesisMustNotBeNull,

    #[error("missing proof lines")]
    MissingProofLines,

    #[error("conclusion must not be null")]
    ConclusionMustNotBeNull,

    #[error("node label already exists")]
    NodeLabelAlreadyExists,

    #[error("definition is malformed")]
    DefinitionIsMalformed,
}

impl ProofErrorKind {
    pub fn code(self) -> u32 {
        use ProofErrorKind::*;

        match self {
            ProofLineMustNotBeNull => 37100,
            ReasonMustNotBeNull => 37110,
            LocalLabelAlreadyExists => 37120,
            ReasonNotAllowed => 37130,
            NoAllowedReference => 37140,
            ReferencedLineNotProved => 37150,
            ExpectedFormulaDiffers => 37160,
            LastProofLineMustBeIdenticalToProposition => 37170,
            ImplicationExpected => 37180,
            MustBeHypothesisOfFirstReference => 37190,
            CurrentMustBeConclusion => 37200,
            SubjectVariableExpected => 37210,
            SubjectVariableAlreadyOccurs => 37215,
            SubjectVariableOccursFree => 37220,
            OperatorVariableExpected => 37230,
            OnlyFreeSubjectVariablesAllowed => 37240,
            SubstituteMustNotBeNull => 37250,
            FreeSubjectVariablesShouldNotGetBound => 37255,
            SubstitutionLocationContainsBoundSubjectVariable => 37260,
            HypothesisMustNotBeNull => 37270,
            MissingProofLines => 37275,
            ConclusionMustNotBeNull => 37280,
            NodeLabelAlreadyExists => 37300,
            DefinitionIsMalformed => 37310,
        }
    }
}

/// A single failure found while checking a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProofError {
    pub kind: ProofErrorKind,

    /// Details about this occurrence, such as the formulas involved. May be empty.
    pub message: String,

    /// Where the failure was found.
    pub context: ModuleContext,

    /// A second location related to the failure, such as the first definition of a repeated
    /// label.
    pub reference: Option<ModuleContext>,
}

impl ProofError {
    pub fn new(kind: ProofErrorKind, context: ModuleContext) -> Self {
        Self {
            kind,
            message: String::new(),
            context,
            reference: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_reference(mut self, reference: ModuleContext) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.kind)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        write!(f, " (at {})", self.context)?;
        if let Some(reference) = &self.reference {
            write!(f, " (see {})", reference)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProofError {}

/// An ordered list of proof errors. Adding an error that is already in the list has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofErrorList(IndexSet<ProofError>);

impl ProofErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, e: ProofError) {
        self.0.insert(e);
    }

    pub fn append(&mut self, other: ProofErrorList) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, ProofError> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&ProofError> {
        self.0.first()
    }

    /// Returns `true` if some error in the list has the given kind.
    pub fn contains_kind(&self, kind: ProofErrorKind) -> bool {
        self.iter().any(|e| e.kind == kind)
    }

    /// Converts the list into a `Result`, which is `Ok` if the list is empty.
    pub fn into_result(self) -> Result<(), ProofErrorList> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ProofError> for ProofErrorList {
    fn from(e: ProofError) -> Self {
        let mut list = Self::new();
        list.push(e);
        list
    }
}

impl FromIterator<ProofError> for ProofErrorList {
    fn from_iter<T: IntoIterator<Item = ProofError>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ProofError> for ProofErrorList {
    fn extend<T: IntoIterator<Item = ProofError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ProofErrorList {
    type Item = ProofError;
    type IntoIter = indexmap::set::IntoIter<ProofError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProofErrorList {
    type Item = &'a ProofError;
    type IntoIter = indexmap::set::Iter<'a, ProofError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ProofErrorList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}
