use super::{
    super::lines::{check_proof, HypothesisScope},
    ProofError, ProofErrorKind, ProofErrorList, ReferenceResolver, RuleArgs, RuleResult,
};
use crate::ast::*;

pub fn conditional_proof(
    RuleArgs { formula, scope, context, config, .. }: RuleArgs,
    reason: &ConditionalProof,
) -> RuleResult {
    let hypothesis_context = context.at(".getHypothesis()");
    let hypothesis = reason.hypothesis.as_ref().ok_or_else(|| {
        ProofError::new(ProofErrorKind::HypothesisMustNotBeNull, hypothesis_context.clone())
    })?;
    let lines_context = context.at(".getFormalProofLineList()");
    rassert!(
        !reason.lines.is_empty(),
        ProofError::new(ProofErrorKind::MissingProofLines, lines_context.clone()),
    );

    let mut errors = ProofErrorList::new();
    let label = hypothesis.label.as_deref().filter(|l| !l.is_empty());
    if let Some(label) = label {
        if let Some(first) = scope.local_proof_line_reference_context(label) {
            let e = ProofError::new(
                ProofErrorKind::LocalLabelAlreadyExists,
                hypothesis_context.at(".getLabel()"),
            )
            .with_message(format!("'{}'", label))
            .with_reference(first.at(".getLabel()"));
            errors.push(e);
        }
    }

    let hypothesis_formula = scope.normalized_formula(&hypothesis.formula);
    let nested_scope =
        HypothesisScope::new(label, hypothesis_formula.clone(), hypothesis_context, scope);
    let conclusion = reason.conclusion.as_ref().map(|c| &c.formula);
    errors.append(check_proof(
        config,
        conclusion,
        &reason.lines,
        &lines_context,
        &nested_scope,
    ));

    let Some(conclusion) = conclusion else {
        errors.push(ProofError::new(
            ProofErrorKind::ConclusionMustNotBeNull,
            context.at(".getConclusion()"),
        ));
        return errors.into_result();
    };

    let expected = Element::implication(hypothesis_formula, scope.normalized_formula(conclusion));
    if scope.normalized_formula(formula) != expected {
        let e = ProofError::new(
            ProofErrorKind::ExpectedFormulaDiffers,
            context.at(".getConclusion().getFormula().getElement()"),
        )
        .with_message(format!("expected '{}', got '{}'", expected, formula));
        errors.push(e);
    }
    errors.into_result()
}
