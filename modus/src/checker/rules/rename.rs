use super::{
    assert_formula, assert_subject_variable, local_reference, ProofError, ProofErrorKind, RuleArgs,
    RuleResult,
};
use crate::ast::*;

pub fn rename(
    RuleArgs { formula, scope, line_context, context, config }: RuleArgs,
    reason: &Rename,
) -> RuleResult {
    let reference = local_reference(scope, &reason.reference, context.at(".getReference()"))?;
    assert_subject_variable(&reason.original, context.at(".getOriginalSubjectVariable()"))?;

    let replacement_context = context.at(".getReplacementSubjectVariable()");
    assert_subject_variable(&reason.replacement, replacement_context.clone())?;
    if config.strict {
        rassert!(
            !reference.contains(&reason.replacement),
            ProofError::new(ProofErrorKind::SubjectVariableAlreadyOccurs, replacement_context)
                .with_message(format!("'{}' occurs in '{}'", reason.replacement, reference)),
        );
    }

    let expected = replace_subject_variable_quantifier(
        &reason.original,
        &reason.replacement,
        &reference,
        reason.occurrence,
        &mut 0,
    );
    assert_formula(
        scope,
        formula,
        &expected,
        line_context,
        ProofErrorKind::ExpectedFormulaDiffers,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::checker::{error::ProofErrorKind, Config};

    #[test]
    fn rename() {
        test_cases! {
            definitions = "
                (axiom A1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                               (EXISTS (VAR x) (PREDVAR Q (VAR x)))))
            ",
            "Simple working examples" {
                "(proposition T1 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                      (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 (VAR x) (VAR y))))": true,
            }
            "Renaming a single occurrence" {
                "(proposition T1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                      (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 (VAR x) (VAR y) 2)))": true,
                "(proposition T1 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                      (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 (VAR x) (VAR y) 1)))": false,
            }
            "Renaming back" {
                "(proposition T1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                      (EXISTS (VAR x) (PREDVAR Q (VAR x))))
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 (VAR x) (VAR y))
                          (line l3 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x))))
                             :rename l2 (VAR y) (VAR x))))": true,
            }
            "Arguments are not subject variables" {
                "(proposition T1 (PREDVAR A)
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 x (VAR y))))": false,
                "(proposition T1 (PREDVAR A)
                   (proof (line l1 (AND (FORALL (VAR x) (PREDVAR P (VAR x)))
                                        (EXISTS (VAR x) (PREDVAR Q (VAR x)))) :add A1)
                          (line l2 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename l1 (VAR x) (FUNCON y))))": false,
            }
            "Axioms can't be referenced directly" {
                "(proposition T1 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                      (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                   (proof (line l1 (AND (FORALL (VAR y) (PREDVAR P (VAR y)))
                                        (EXISTS (VAR y) (PREDVAR Q (VAR y))))
                             :rename A1 (VAR x) (VAR y))))": false,
            }
        }
    }

    #[test]
    fn rename_strict() {
        let input = "
            (axiom A1 (IMPL (PREDVAR P (VAR y)) (FORALL (VAR x) (PREDVAR P (VAR x)))))
            (proposition T1 (IMPL (PREDVAR P (VAR y)) (FORALL (VAR y) (PREDVAR P (VAR y))))
              (proof (line l1 (IMPL (PREDVAR P (VAR y)) (FORALL (VAR x) (PREDVAR P (VAR x))))
                        :add A1)
                     (line l2 (IMPL (PREDVAR P (VAR y)) (FORALL (VAR y) (PREDVAR P (VAR y))))
                        :rename l1 (VAR x) (VAR y))))
        ";
        let report = crate::check(input.as_bytes(), "test", &Config::new()).unwrap();
        assert!(report.is_valid());

        let report = crate::check(input.as_bytes(), "test", &Config::new().strict(true)).unwrap();
        assert!(!report.is_valid());
        let error = report.errors.first().unwrap();
        assert_eq!(ProofErrorKind::SubjectVariableAlreadyOccurs, error.kind);
        assert_eq!(
            "getNodeList().get(1).getProposition().getFormalProofList().get(0)\
            .getFormalProofLineList().get(1).getReason().getRename().getReplacementSubjectVariable()",
            error.context.location()
        );
    }
}
