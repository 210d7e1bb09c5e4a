use super::{
    assert_formula, assert_subject_variable, ProofError, ProofErrorKind, ReferenceResolver,
    RuleArgs, RuleResult,
};
use crate::ast::{variables::as_implication, *};

#[derive(Clone, Copy)]
enum Quantifier {
    Universal,
    Existential,
}

pub fn universal(args: RuleArgs, reason: &Universal) -> RuleResult {
    generalize(args, &reason.reference, &reason.subject_variable, Quantifier::Universal)
}

pub fn existential(args: RuleArgs, reason: &Existential) -> RuleResult {
    generalize(args, &reason.reference, &reason.subject_variable, Quantifier::Existential)
}

/// Checks both quantifier rules. From `A -> B`, the universal rule derives `A -> forall x B`, and
/// the existential rule derives `(exists x A) -> B`. In both cases, `x` must not occur free in the
/// part of the premise that stays outside the new quantifier, nor in any enclosing hypothesis.
fn generalize(
    RuleArgs { formula, scope, line_context, context, config }: RuleArgs,
    reference: &str,
    variable: &Element,
    quantifier: Quantifier,
) -> RuleResult {
    let reference_context = context.at(".getReference()");
    let no_reference = || {
        ProofError::new(ProofErrorKind::NoAllowedReference, reference_context.clone())
            .with_message(format!("'{}' is not a line of this proof", reference))
    };

    // Only lines of the same list can be used as premises
    let (index, line) = scope.local_line(reference).ok_or_else(no_reference)?;
    if config.require_proved_quantifier_premise {
        rassert!(
            scope.is_proved(index),
            ProofError::new(ProofErrorKind::ReferencedLineNotProved, reference_context.clone())
                .with_message(format!("'{}'", reference)),
        );
    }
    let premise = line.formula.as_ref().ok_or_else(no_reference)?;
    let premise = scope.normalized_formula(premise);
    let (antecedent, consequent) = as_implication(&premise).ok_or_else(|| {
        ProofError::new(ProofErrorKind::ImplicationExpected, reference_context.clone())
            .with_message(format!("'{}' is '{}'", reference, premise))
    })?;

    let variable_context = context.at(".getSubjectVariable()");
    assert_subject_variable(variable, variable_context.clone())?;

    let (outside, operator) = match quantifier {
        Quantifier::Universal => (antecedent, operators::FORALL),
        Quantifier::Existential => (consequent, operators::EXISTS),
    };
    let occurs_free = free_subject_variables(outside).contains(variable)
        || scope.hypothesis_free_variables().contains(variable);
    rassert!(
        !occurs_free,
        ProofError::new(ProofErrorKind::SubjectVariableOccursFree, variable_context)
            .with_message(format!("'{}'", variable)),
    );

    let expected = match quantifier {
        Quantifier::Universal => {
            let quantified = Element::list(operator, vec![variable.clone(), consequent.clone()]);
            Element::implication(antecedent.clone(), quantified)
        }
        Quantifier::Existential => {
            let quantified = Element::list(operator, vec![variable.clone(), antecedent.clone()]);
            Element::implication(quantified, consequent.clone())
        }
    };
    assert_formula(
        scope,
        formula,
        &expected,
        line_context,
        ProofErrorKind::ExpectedFormulaDiffers,
    )?;
    Ok(())
}
