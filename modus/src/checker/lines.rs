use super::{
    error::{ProofError, ProofErrorKind, ProofErrorList},
    rules::{self, RuleArgs},
    Config, ReferenceResolver,
};
use crate::ast::{
    free_subject_variables, get_difference_location, Element, ElementSet, ModuleContext, ProofLine,
};
use indexmap::IndexMap;

/// Checks a list of proof lines.
///
/// `context` is the location of the list itself, and `resolver` resolves every label that is not
/// defined by the lines. If `target` is given, the last line must prove it. Returns every error
/// found; the proof is accepted if the returned list is empty.
pub fn check_proof(
    config: &Config,
    target: Option<&Element>,
    lines: &[ProofLine],
    context: &ModuleContext,
    resolver: &dyn ReferenceResolver,
) -> ProofErrorList {
    LineChecker {
        config,
        scope: LocalScope::new(lines, context, resolver),
    }
    .check(target)
}

/// The labels and proved-ness of the lines of one list, layered over the resolver of the
/// enclosing scope.
pub(super) struct LocalScope<'a> {
    lines: &'a [ProofLine],
    context: &'a ModuleContext,
    labels: IndexMap<&'a str, usize>,
    proved: Vec<bool>,
    parent: &'a dyn ReferenceResolver,
}

impl<'a> LocalScope<'a> {
    fn new(
        lines: &'a [ProofLine],
        context: &'a ModuleContext,
        parent: &'a dyn ReferenceResolver,
    ) -> Self {
        Self {
            lines,
            context,
            labels: IndexMap::new(),
            proved: vec![false; lines.len()],
            parent,
        }
    }

    /// Returns the index and contents of the line with the given label in this list. Lines of
    /// enclosing lists are not considered.
    pub(super) fn local_line(&self, label: &str) -> Option<(usize, &'a ProofLine)> {
        let &i = self.labels.get(label)?;
        Some((i, &self.lines[i]))
    }

    pub(super) fn is_proved(&self, index: usize) -> bool {
        self.proved.get(index).copied().unwrap_or(false)
    }

    fn proved_line_formula(&self, label: &str) -> Option<Element> {
        let (i, line) = self.local_line(label)?;
        if !self.is_proved(i) {
            return None;
        }
        line.formula.as_ref().map(|f| self.normalized_formula(f))
    }
}

impl ReferenceResolver for LocalScope<'_> {
    fn normalized_formula(&self, formula: &Element) -> Element {
        self.parent.normalized_formula(formula)
    }

    fn normalized_reference_formula(&self, label: &str) -> Option<Element> {
        if self.labels.contains_key(label) {
            self.proved_line_formula(label)
        } else {
            self.parent.normalized_reference_formula(label)
        }
    }

    fn has_proved_formula(&self, label: &str) -> bool {
        match self.labels.get(label) {
            Some(&i) => self.is_proved(i),
            None => self.parent.has_proved_formula(label),
        }
    }

    fn is_local_proof_line_reference(&self, label: &str) -> bool {
        self.labels.contains_key(label) || self.parent.is_local_proof_line_reference(label)
    }

    fn local_proof_line_reference_context(&self, label: &str) -> Option<ModuleContext> {
        match self.labels.get(label) {
            Some(&i) => Some(self.context.at_index(i)),
            None => self.parent.local_proof_line_reference_context(label),
        }
    }

    fn local_proof_line_reference(&self, label: &str) -> Option<Element> {
        if self.labels.contains_key(label) {
            self.proved_line_formula(label)
        } else {
            self.parent.local_proof_line_reference(label)
        }
    }

    fn hypothesis_free_variables(&self) -> ElementSet {
        self.parent.hypothesis_free_variables()
    }
}

/// The scope of the lines of a conditional proof: the hypothesis is a proved fact, and every
/// other label is resolved by the enclosing scope.
pub(super) struct HypothesisScope<'a> {
    label: Option<&'a str>,
    formula: Element,
    context: ModuleContext,
    parent: &'a dyn ReferenceResolver,
}

impl<'a> HypothesisScope<'a> {
    /// `formula` must already be normalized. `context` is the location of the hypothesis.
    pub(super) fn new(
        label: Option<&'a str>,
        formula: Element,
        context: ModuleContext,
        parent: &'a dyn ReferenceResolver,
    ) -> Self {
        Self { label, formula, context, parent }
    }

    fn is_hypothesis(&self, label: &str) -> bool {
        self.label == Some(label)
    }
}

impl ReferenceResolver for HypothesisScope<'_> {
    fn normalized_formula(&self, formula: &Element) -> Element {
        self.parent.normalized_formula(formula)
    }

    fn normalized_reference_formula(&self, label: &str) -> Option<Element> {
        if self.is_hypothesis(label) {
            Some(self.formula.clone())
        } else {
            self.parent.normalized_reference_formula(label)
        }
    }

    fn has_proved_formula(&self, label: &str) -> bool {
        self.is_hypothesis(label) || self.parent.has_proved_formula(label)
    }

    fn is_local_proof_line_reference(&self, label: &str) -> bool {
        self.is_hypothesis(label) || self.parent.is_local_proof_line_reference(label)
    }

    fn local_proof_line_reference_context(&self, label: &str) -> Option<ModuleContext> {
        if self.is_hypothesis(label) {
            Some(self.context.clone())
        } else {
            self.parent.local_proof_line_reference_context(label)
        }
    }

    fn local_proof_line_reference(&self, label: &str) -> Option<Element> {
        if self.is_hypothesis(label) {
            Some(self.formula.clone())
        } else {
            self.parent.local_proof_line_reference(label)
        }
    }

    fn hypothesis_free_variables(&self) -> ElementSet {
        let mut result = self.parent.hypothesis_free_variables();
        result.union_with(&free_subject_variables(&self.formula));
        result
    }
}

struct LineChecker<'a> {
    config: &'a Config,
    scope: LocalScope<'a>,
}

impl<'a> LineChecker<'a> {
    fn check(mut self, target: Option<&Element>) -> ProofErrorList {
        let mut errors = ProofErrorList::new();
        let lines = self.scope.lines;

        for (i, line) in lines.iter().enumerate() {
            let line_context = self.scope.context.at_index(i);
            let Some(formula) = &line.formula else {
                errors.push(ProofError::new(
                    ProofErrorKind::ProofLineMustNotBeNull,
                    line_context,
                ));
                continue;
            };
            let Some(reason) = &line.reason else {
                errors.push(ProofError::new(
                    ProofErrorKind::ReasonMustNotBeNull,
                    line_context.at(".getReason()"),
                ));
                continue;
            };

            if let Some(label) = line.label() {
                if let Some(first) = self.scope.local_proof_line_reference_context(label) {
                    let e = ProofError::new(
                        ProofErrorKind::LocalLabelAlreadyExists,
                        line_context.at(".getLabel()"),
                    )
                    .with_message(format!("'{}'", label))
                    .with_reference(first.at(".getLabel()"));
                    errors.push(e);
                }
                self.scope.labels.insert(label, i);
            }

            let reason_context = line_context.at(".getReason()");
            let kind = reason.kind();
            let result = if self.config.is_allowed(kind) {
                let args = RuleArgs {
                    formula,
                    scope: &self.scope,
                    line_context: &line_context,
                    context: &reason_context.at(kind.accessor()),
                    config: self.config,
                };
                rules::check_reason(args, reason)
            } else {
                let e = ProofError::new(ProofErrorKind::ReasonNotAllowed, reason_context)
                    .with_message(format!("rule '{}' is disabled", kind));
                Err(e.into())
            };

            match result {
                Ok(()) => self.scope.proved[i] = true,
                Err(e) => {
                    log::debug!("proof line {} is not proved: {}", i, e);
                    errors.append(e);
                }
            }
        }

        if let (Some(target), Some(last)) = (target, lines.last()) {
            if let Some(formula) = &last.formula {
                let normalized = self.scope.normalized_formula(formula);
                if normalized != self.scope.normalized_formula(target) {
                    let context = self
                        .scope
                        .context
                        .at_index(lines.len() - 1)
                        .at(".getFormula().getElement()")
                        .at(&get_difference_location(formula, target));
                    let e = ProofError::new(
                        ProofErrorKind::LastProofLineMustBeIdenticalToProposition,
                        context,
                    )
                    .with_message(format!("expected '{}', got '{}'", target, formula));
                    errors.push(e);
                }
            }
        }
        errors
    }
}
