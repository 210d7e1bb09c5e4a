use super::{
    assert_formula, assert_subject_variable, local_reference, ProofError, ProofErrorKind,
    ProofErrorList, ReferenceResolver, RuleArgs, RuleResult,
};
use crate::ast::*;

pub fn subst_free(
    RuleArgs { formula, scope, line_context, context, .. }: RuleArgs,
    reason: &SubstFree,
) -> RuleResult {
    let reference = local_reference(scope, &reason.reference, context.at(".getReference()"))?;
    let variable = &reason.subject_variable;
    assert_subject_variable(variable, context.at(".getSubjectVariable()"))?;

    let substitute = scope.normalized_formula(&reason.substitute);
    let expected = replace_free_subject_variable(&reference, variable, &substitute);
    assert_formula(
        scope,
        formula,
        &expected,
        line_context,
        ProofErrorKind::ExpectedFormulaDiffers,
    )?;

    let free = free_subject_variables(&substitute);
    rassert!(
        test_subject_variable(&reference, variable, &free),
        ProofError::new(
            ProofErrorKind::FreeSubjectVariablesShouldNotGetBound,
            context.at(".getSubstituteTerm()"),
        )
        .with_message(format!("substituting '{}' for '{}' in '{}'", substitute, variable, reference)),
    );
    Ok(())
}

/// The parts in which predicate and function variable substitutions differ.
struct OperatorKind {
    is_variable: fn(&Element) -> bool,
    variable_accessor: &'static str,
    substitute_accessor: &'static str,
}

const PREDICATE: OperatorKind = OperatorKind {
    is_variable: variables::is_predicate_variable,
    variable_accessor: ".getPredicateVariable()",
    substitute_accessor: ".getSubstituteFormula()",
};

const FUNCTION: OperatorKind = OperatorKind {
    is_variable: variables::is_function_variable,
    variable_accessor: ".getFunctionVariable()",
    substitute_accessor: ".getSubstituteTerm()",
};

pub fn subst_pred(args: RuleArgs, reason: &SubstPred) -> RuleResult {
    let SubstPred { reference, predicate_variable, substitute } = reason;
    subst_operator(args, &PREDICATE, reference, predicate_variable, substitute.as_ref())
}

pub fn subst_func(args: RuleArgs, reason: &SubstFunc) -> RuleResult {
    let SubstFunc { reference, function_variable, substitute } = reason;
    subst_operator(args, &FUNCTION, reference, function_variable, substitute.as_ref())
}

fn subst_operator(
    RuleArgs { formula, scope, line_context, context, .. }: RuleArgs,
    kind: &OperatorKind,
    reference: &str,
    variable: &Element,
    substitute: Option<&Element>,
) -> RuleResult {
    let reference = local_reference(scope, reference, context.at(".getReference()"))?;
    let substitute_context = context.at(kind.substitute_accessor);
    let substitute = substitute.ok_or_else(|| {
        ProofError::new(ProofErrorKind::SubstituteMustNotBeNull, substitute_context.clone())
    })?;

    let variable_context = context.at(kind.variable_accessor);
    rassert!(
        (kind.is_variable)(variable),
        ProofError::new(ProofErrorKind::OperatorVariableExpected, variable_context.clone())
            .with_message(format!("got '{}'", variable)),
    );
    let params = variable.as_list().map_or(&[][..], |l| &l.elements()[1..]);

    let mut param_set = ElementSet::new();
    for p in params {
        rassert!(
            is_subject_variable(p) && param_set.insert(p.clone()),
            ProofError::new(
                ProofErrorKind::OnlyFreeSubjectVariablesAllowed,
                variable_context.clone(),
            )
            .with_message(format!("'{}' is not a distinct subject variable", p)),
        );
    }

    let substitute = scope.normalized_formula(substitute);
    let mut errors = ProofErrorList::new();

    let expected = replace_operator_variable(&reference, variable, &substitute);
    if let Err(e) = assert_formula(
        scope,
        formula,
        &expected,
        line_context,
        ProofErrorKind::ExpectedFormulaDiffers,
    ) {
        errors.push(e);
    }

    let captured = free_subject_variables(&substitute)
        .minus(&param_set)
        .intersection(&bound_subject_variables(&reference));
    if !captured.is_empty() {
        let e = ProofError::new(
            ProofErrorKind::FreeSubjectVariablesShouldNotGetBound,
            substitute_context.clone(),
        )
        .with_message(format!("{} would get bound in '{}'", captured, reference));
        errors.push(e);
    }

    if !test_operator_variable(&reference, variable, &bound_subject_variables(&substitute)) {
        let e = ProofError::new(
            ProofErrorKind::SubstitutionLocationContainsBoundSubjectVariable,
            substitute_context,
        )
        .with_message(format!("'{}' occurs in the scope of a variable bound by '{}'", variable, substitute));
        errors.push(e);
    }
    errors.into_result()
}
