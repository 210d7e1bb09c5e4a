use super::{
    assert_formula, proved_reference, ProofError, ProofErrorKind, ProofErrorList, RuleArgs,
    RuleResult,
};
use crate::ast::{variables::as_implication, *};

pub fn modus_ponens(
    RuleArgs { formula, scope, line_context, context, .. }: RuleArgs,
    reason: &ModusPonens,
) -> RuleResult {
    let first_context = context.at(".getReference1()");
    let second_context = context.at(".getReference2()");

    // Both references are resolved before failing, so that every missing one is reported
    let first = proved_reference(scope, &reason.reference1, first_context.clone());
    let second = proved_reference(scope, &reason.reference2, second_context.clone());
    let (first, second) = match (first, second) {
        (Ok(a), Ok(b)) => (a, b),
        (a, b) => return Err(a.err().into_iter().chain(b.err()).collect::<ProofErrorList>()),
    };

    let (antecedent, consequent) = as_implication(&first).ok_or_else(|| {
        ProofError::new(ProofErrorKind::ImplicationExpected, first_context)
            .with_message(format!("'{}' is '{}'", reason.reference1, first))
    })?;
    rassert!(
        second == *antecedent,
        ProofError::new(ProofErrorKind::MustBeHypothesisOfFirstReference, second_context)
            .with_message(format!("expected '{}', got '{}'", antecedent, second)),
    );
    assert_formula(
        scope,
        formula,
        consequent,
        line_context,
        ProofErrorKind::CurrentMustBeConclusion,
    )?;
    Ok(())
}
