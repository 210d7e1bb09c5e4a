use modus::{
    ast::{print_module, write_module, ModuleContext, RuleKind},
    checker::{
        error::{ProofError, ProofErrorKind},
        *,
    },
    parser,
};

const HILBERT_AXIOMS: &str = "
    (axiom A1 (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR A))))
    (axiom A2
      (IMPL (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR C)))
            (IMPL (IMPL (PREDVAR A) (PREDVAR B)) (IMPL (PREDVAR A) (PREDVAR C)))))
";

fn run_test(module: &str) -> ModuleReport {
    modus::check(module.as_bytes(), "test", &Config::new()).unwrap()
}

fn line_location(node: usize, line: usize) -> String {
    format!(
        "getNodeList().get({}).getProposition().getFormalProofList().get(0)\
        .getFormalProofLineList().get({})",
        node, line
    )
}

#[test]
fn test_add_accepts_axiom() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (proposition T1 (PREDVAR A) (proof (line l1 (PREDVAR A) :add A1)))",
    );
    assert!(report.is_valid());
    assert_eq!(
        vec![PropositionReport {
            label: "T1".into(),
            outcome: PropositionOutcome::Proved
        }],
        report.propositions
    );
}

#[test]
fn test_implication_is_reflexive() {
    let module = format!(
        "{}
        (proposition T1 (IMPL (PREDVAR A) (PREDVAR A))
          (proof
            (line l1 (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR A))) :add A1)
            (line l2 (IMPL (PREDVAR A) (IMPL (IMPL (PREDVAR A) (PREDVAR A)) (PREDVAR A)))
              :subst-pred l1 (PREDVAR B) (IMPL (PREDVAR A) (PREDVAR A)))
            (line l3 (IMPL (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR C)))
                           (IMPL (IMPL (PREDVAR A) (PREDVAR B)) (IMPL (PREDVAR A) (PREDVAR C))))
              :add A2)
            (line l4 (IMPL (IMPL (PREDVAR A) (IMPL (IMPL (PREDVAR A) (PREDVAR A)) (PREDVAR C)))
                           (IMPL (IMPL (PREDVAR A) (IMPL (PREDVAR A) (PREDVAR A)))
                                 (IMPL (PREDVAR A) (PREDVAR C))))
              :subst-pred l3 (PREDVAR B) (IMPL (PREDVAR A) (PREDVAR A)))
            (line l5 (IMPL (IMPL (PREDVAR A) (IMPL (IMPL (PREDVAR A) (PREDVAR A)) (PREDVAR A)))
                           (IMPL (IMPL (PREDVAR A) (IMPL (PREDVAR A) (PREDVAR A)))
                                 (IMPL (PREDVAR A) (PREDVAR A))))
              :subst-pred l4 (PREDVAR C) (PREDVAR A))
            (line l6 (IMPL (IMPL (PREDVAR A) (IMPL (PREDVAR A) (PREDVAR A)))
                           (IMPL (PREDVAR A) (PREDVAR A)))
              :mp l5 l2)
            (line l7 (IMPL (PREDVAR A) (IMPL (PREDVAR A) (PREDVAR A)))
              :subst-pred l1 (PREDVAR B) (PREDVAR A))
            (line l8 (IMPL (PREDVAR A) (PREDVAR A)) :mp l6 l7)))",
        HILBERT_AXIOMS
    );
    let report = run_test(&module);
    assert!(report.is_valid(), "{}", report.errors);
    assert_eq!(1, report.count(PropositionOutcome::Proved));
}

#[test]
fn test_modus_ponens_requires_implication() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (axiom A2 (PREDVAR B))
         (proposition T1 (PREDVAR B) (proof (line l1 (PREDVAR B) :mp A1 A2)))",
    );
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::ImplicationExpected, error.kind);
    assert_eq!(37180, error.code());
    assert_eq!("test", error.context.module());
    assert_eq!(
        format!("{}.getReason().getModusPonens().getReference1()", line_location(2, 0)),
        error.context.location()
    );
    assert_eq!(
        vec![PropositionOutcome::Invalid],
        report.propositions.iter().map(|p| p.outcome).collect::<Vec<_>>()
    );
}

#[test]
fn test_modus_ponens_second_reference_must_be_antecedent() {
    let report = run_test(
        "(axiom A1 (IMPL (PREDVAR A) (PREDVAR B)))
         (axiom A2 (IMPL (PREDVAR B) (PREDVAR C)))
         (proposition T1 (PREDVAR B) (proof (line l1 (PREDVAR B) :mp A1 A2)))",
    );
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::MustBeHypothesisOfFirstReference, error.kind);
    assert_eq!(
        format!("{}.getReason().getModusPonens().getReference2()", line_location(2, 0)),
        error.context.location()
    );
}

#[test]
fn test_conditional_proof() {
    let report = run_test(
        "(proposition T1 (IMPL (PREDVAR A) (PREDVAR A))
           (proof
             (line l1 (IMPL (PREDVAR A) (PREDVAR A))
               :cp (hypothesis h (PREDVAR A))
                   (line k1 (PREDVAR A) :add h)
                   (conclusion (PREDVAR A)))))",
    );
    assert!(report.is_valid(), "{}", report.errors);

    // A wrong nested line is reported inside the nested list
    let report = run_test(
        "(axiom A1 (PREDVAR B))
         (proposition T1 (IMPL (PREDVAR A) (PREDVAR A))
           (proof
             (line l1 (IMPL (PREDVAR A) (PREDVAR A))
               :cp (hypothesis h (PREDVAR A))
                   (line k1 (PREDVAR A) :add A1)
                   (conclusion (PREDVAR A)))))",
    );
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::ExpectedFormulaDiffers, error.kind);
    assert_eq!(
        format!(
            "{}.getReason().getConditionalProof().getFormalProofLineList().get(0)\
            .getFormula().getElement().getList().getElement(0).getAtom()",
            line_location(1, 0)
        ),
        error.context.location()
    );
}

#[test]
fn test_conditional_proof_formula_must_match_conclusion() {
    let report = run_test(
        "(proposition T1 (IMPL (PREDVAR A) (PREDVAR B))
           (proof
             (line l1 (IMPL (PREDVAR A) (PREDVAR B))
               :cp (hypothesis h (PREDVAR A))
                   (line k1 (PREDVAR A) :add h)
                   (conclusion (PREDVAR A)))))",
    );
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::ExpectedFormulaDiffers, error.kind);
    assert_eq!(
        format!(
            "{}.getReason().getConditionalProof().getConclusion().getFormula().getElement()",
            line_location(0, 0)
        ),
        error.context.location()
    );
}

/// Checks a module with an axiom `A1` and a proposition proved by adding `A1` and then applying
/// `reason` to it. Returns the single error found.
fn single_substitution_error(axiom: &str, formula: &str, reason: &str) -> ProofError {
    let report = run_test(&format!(
        "(axiom A1 {axiom})
         (proposition T1 {formula}
           (proof
             (line l1 {axiom} :add A1)
             (line l2 {formula} {reason})))"
    ));
    assert_eq!(1, report.errors.len(), "{}", report.errors);
    report.errors.first().unwrap().clone()
}

#[test]
fn test_subst_free_errors() {
    let error = single_substitution_error(
        "(FORALL (VAR y) (PREDCON R (VAR x) (VAR y)))",
        "(FORALL (VAR y) (PREDCON R (VAR y) (VAR y)))",
        ":subst-free l1 (VAR x) (VAR y)",
    );
    assert_eq!(ProofErrorKind::FreeSubjectVariablesShouldNotGetBound, error.kind);
    assert_eq!(
        format!("{}.getReason().getSubstFree().getSubstituteTerm()", line_location(1, 1)),
        error.context.location()
    );
}

#[test]
fn test_subst_pred_errors() {
    let subst_pred = |accessor: &str| {
        format!("{}.getReason().getSubstPred(){}", line_location(1, 1), accessor)
    };

    let error = single_substitution_error(
        "(EXISTS (VAR y) (PREDVAR P))",
        "(EXISTS (VAR y) (PREDCON Q (VAR y)))",
        ":subst-pred l1 (PREDVAR P) (PREDCON Q (VAR y))",
    );
    assert_eq!(ProofErrorKind::FreeSubjectVariablesShouldNotGetBound, error.kind);
    assert_eq!(subst_pred(".getSubstituteFormula()"), error.context.location());

    let error = single_substitution_error(
        "(FORALL (VAR x) (PREDVAR P))",
        "(FORALL (VAR x) (EXISTS (VAR x) (PREDCON Q (VAR x))))",
        ":subst-pred l1 (PREDVAR P) (EXISTS (VAR x) (PREDCON Q (VAR x)))",
    );
    assert_eq!(ProofErrorKind::SubstitutionLocationContainsBoundSubjectVariable, error.kind);
    assert_eq!(subst_pred(".getSubstituteFormula()"), error.context.location());

    let error = single_substitution_error(
        "(PREDVAR P (FUNCON a))",
        "(PREDCON Q (FUNCON a))",
        ":subst-pred l1 (PREDVAR P (FUNCON a)) (PREDCON Q (FUNCON a))",
    );
    assert_eq!(ProofErrorKind::OnlyFreeSubjectVariablesAllowed, error.kind);
    assert_eq!(subst_pred(".getPredicateVariable()"), error.context.location());

    let error = single_substitution_error(
        "(PREDCON P)",
        "(PREDCON Q)",
        ":subst-pred l1 (PREDCON P) (PREDCON Q)",
    );
    assert_eq!(ProofErrorKind::OperatorVariableExpected, error.kind);
    assert_eq!(subst_pred(".getPredicateVariable()"), error.context.location());

    let error = single_substitution_error(
        "(PREDVAR P)",
        "(PREDCON Q)",
        ":subst-pred l1 (PREDVAR P)",
    );
    assert_eq!(ProofErrorKind::SubstituteMustNotBeNull, error.kind);
    assert_eq!(subst_pred(".getSubstituteFormula()"), error.context.location());
}

#[test]
fn test_duplicate_line_label() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (proposition T1 (PREDVAR A)
           (proof
             (line l1 (PREDVAR A) :add A1)
             (line l1 (PREDVAR A) :add A1)))",
    );
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::LocalLabelAlreadyExists, error.kind);
    assert_eq!(
        format!("{}.getLabel()", line_location(1, 1)),
        error.context.location()
    );
    let reference = error.reference.as_ref().map(ModuleContext::location);
    assert_eq!(Some(format!("{}.getLabel()", line_location(1, 0)).as_str()), reference);
}

#[test]
fn test_duplicate_node_label() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (axiom A1 (PREDVAR B))",
    );
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::NodeLabelAlreadyExists, error.kind);
    assert_eq!("getNodeList().get(1).getLabel()", error.context.location());
    assert_eq!(
        Some("getNodeList().get(0).getLabel()"),
        error.reference.as_ref().map(ModuleContext::location)
    );
}

#[test]
fn test_last_line_must_match_proposition() {
    let report = run_test(
        "(axiom A1 (IMPL (PREDVAR A) (PREDVAR A)))
         (proposition T1 (IMPL (PREDVAR A) (PREDVAR B))
           (proof (line l1 (IMPL (PREDVAR A) (PREDVAR A)) :add A1)))",
    );
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::LastProofLineMustBeIdenticalToProposition, error.kind);
    assert_eq!(
        format!(
            "{}.getFormula().getElement().getList().getElement(1).getList().getElement(0).getAtom()",
            line_location(1, 0)
        ),
        error.context.location()
    );
}

#[test]
fn test_incomplete_lines() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (proposition T1 (PREDVAR A)
           (proof
             (line l1 :add A1)
             (line l2 (PREDVAR A))
             (line l3 (PREDVAR A) :add A1)))",
    );
    let errors: Vec<_> = report
        .errors
        .iter()
        .map(|e| (e.kind, e.context.location().to_owned()))
        .collect();
    assert_eq!(
        vec![
            (ProofErrorKind::ProofLineMustNotBeNull, line_location(1, 0)),
            (
                ProofErrorKind::ReasonMustNotBeNull,
                format!("{}.getReason()", line_location(1, 1))
            ),
        ],
        errors
    );
}

#[test]
fn test_empty_proofs_and_unproved_propositions() {
    let report = run_test(
        "(axiom A1 (PREDVAR A))
         (proposition T1 (PREDVAR A))
         (proposition T2 (PREDVAR A) (proof))",
    );
    assert_eq!(
        vec![PropositionOutcome::Unproved, PropositionOutcome::Invalid],
        report.propositions.iter().map(|p| p.outcome).collect::<Vec<_>>()
    );
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::MissingProofLines, error.kind);
    assert_eq!(
        "getNodeList().get(2).getProposition().getFormalProofList().get(0).getFormalProofLineList()",
        error.context.location()
    );
}

#[test]
fn test_disallowed_rules() {
    let module = "(axiom A1 (PREDVAR A))
                  (proposition T1 (PREDVAR A) (proof (line l1 (PREDVAR A) :add A1)))";
    let config = Config::new().disallow_rule(RuleKind::Add);
    let report = modus::check(module.as_bytes(), "test", &config).unwrap();
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::ReasonNotAllowed, error.kind);
    assert_eq!(format!("{}.getReason()", line_location(1, 0)), error.context.location());

    let config = Config::new().disallow_rule(RuleKind::ModusPonens);
    assert!(modus::check(module.as_bytes(), "test", &config).unwrap().is_valid());
}

#[test]
fn test_definitions() {
    let report = run_test(
        "(define-predicate D1 (PREDCON subset (VAR x) (VAR y))
           (FORALL (VAR z) (IMPL (PREDCON in (VAR z) (VAR x)) (PREDCON in (VAR z) (VAR y)))))
         (axiom A1 (FORALL (VAR z) (IMPL (PREDCON in (VAR z) (FUNCON a)) (PREDCON in (VAR z) (FUNCON a)))))
         (proposition T1 (PREDCON subset (FUNCON a) (FUNCON a))
           (proof (line l1 (PREDCON subset (FUNCON a) (FUNCON a)) :add A1)))",
    );
    assert!(report.is_valid(), "{}", report.errors);

    // Unfolding renames the bound `z`, so it doesn't capture the argument `z`
    let report = run_test(
        "(define-predicate D1 (PREDCON subset (VAR x) (VAR y))
           (FORALL (VAR z) (IMPL (PREDCON in (VAR z) (VAR x)) (PREDCON in (VAR z) (VAR y)))))
         (axiom A1 (FORALL (VAR z) (IMPL (PREDCON in (VAR z) (VAR z)) (PREDCON in (VAR z) (VAR y)))))
         (proposition T1 (PREDCON subset (VAR z) (VAR y))
           (proof (line l1 (PREDCON subset (VAR z) (VAR y)) :add A1)))",
    );
    assert!(!report.is_valid());
    assert_eq!(1, report.errors.len());
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::ExpectedFormulaDiffers, error.kind);
    assert!(error
        .context
        .location()
        .starts_with(&format!("{}.getFormula().getElement()", line_location(2, 0))));

    let report = run_test("(define-function D1 (FUNCON f (VAR x) (VAR x)) (VAR x))");
    let error = report.errors.first().unwrap();
    assert_eq!(ProofErrorKind::DefinitionIsMalformed, error.kind);
    assert_eq!("getNodeList().get(0).getFunctionDefinition()", error.context.location());
}

#[test]
fn test_checking_is_idempotent() {
    let module = format!(
        "{}
        (proposition T1 (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR A)))
          (proof (line l1 (IMPL (PREDVAR A) (IMPL (PREDVAR B) (PREDVAR A))) :add A1)))
        (proposition T2 (PREDVAR A)
          (proof (line l1 (PREDVAR A) :mp A1 T1)))",
        HILBERT_AXIOMS
    );
    let module = parser::parse_module(module.as_bytes(), "test").unwrap();
    let first = ModuleChecker::new(Config::new()).check(&module).unwrap();
    let second = ModuleChecker::new(Config::new()).check(&module).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_valid());

    // Printing and parsing back gives a module with the same report
    let mut printed = Vec::new();
    write_module(&mut printed, &module).unwrap();
    let reparsed = parser::parse_module(printed.as_slice(), "test").unwrap();
    assert_eq!(module, reparsed);
    assert_eq!(first, ModuleChecker::new(Config::new()).check(&reparsed).unwrap());

    print_module(&module).unwrap();
}

#[test]
fn test_interrupt() {
    use std::sync::atomic::AtomicBool;

    let module = "(axiom A1 (PREDVAR A))
                  (proposition T1 (PREDVAR A) (proof (line l1 (PREDVAR A) :add A1)))";
    let flag = AtomicBool::new(true);
    let result = modus::check_with_interrupt(module.as_bytes(), "test", &Config::new(), &flag);
    assert!(matches!(result, Err(modus::Error::Interrupted)));

    let flag = AtomicBool::new(false);
    let result = modus::check_with_interrupt(module.as_bytes(), "test", &Config::new(), &flag);
    assert!(result.unwrap().is_valid());
}

#[test]
fn test_check_proof_directly() {
    let lines = match parser::parse_module(
        "(proposition T1 (PREDVAR A) (proof (line l1 (PREDVAR A) :add X)))".as_bytes(),
        "direct",
    )
    .unwrap()
    .nodes
    .remove(0)
    {
        modus::ast::Node::Proposition(mut p) => p.proofs.remove(0).lines,
        _ => unreachable!(),
    };

    let mut resolver = ModuleResolver::new();
    let context = ModuleContext::new("direct").at("getFormalProofLineList()");
    let errors = check_proof(&Config::new(), None, &lines, &context, &resolver);
    assert!(errors.contains_kind(ProofErrorKind::NoAllowedReference));

    resolver.add_fact("X", &modus::parser::parse_element("(PREDVAR A)".as_bytes()).unwrap());
    let errors = check_proof(&Config::new(), None, &lines, &context, &resolver);
    assert!(errors.is_empty(), "{}", errors);
}
