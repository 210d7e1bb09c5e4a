use super::{
    error::{ProofError, ProofErrorKind, ProofErrorList},
    lines::LocalScope,
    Config, ReferenceResolver,
};
use crate::ast::*;

pub type RuleResult = Result<(), ProofErrorList>;

pub struct RuleArgs<'a> {
    /// The formula of the line being checked, as written.
    pub(super) formula: &'a Element,
    pub(super) scope: &'a LocalScope<'a>,
    pub(super) line_context: &'a ModuleContext,

    /// The location of the reason payload, for example `...get(3).getReason().getAdd()`.
    pub(super) context: &'a ModuleContext,
    pub(super) config: &'a Config,
}

/// Asserts that the first argument is true, and returns the error specified by the second argument
/// otherwise.
macro_rules! rassert {
    ($arg:expr, $err:expr $(,)?) => {
        match $arg {
            true => Ok(()),
            false => Err($err),
        }?
    };
}

pub(super) fn check_reason(args: RuleArgs, reason: &Reason) -> RuleResult {
    match reason {
        Reason::Add(r) => add::add(args, r),
        Reason::Rename(r) => rename::rename(args, r),
        Reason::ModusPonens(r) => modus_ponens::modus_ponens(args, r),
        Reason::SubstFree(r) => substitution::subst_free(args, r),
        Reason::SubstPred(r) => substitution::subst_pred(args, r),
        Reason::SubstFunc(r) => substitution::subst_func(args, r),
        Reason::Universal(r) => quantifier::universal(args, r),
        Reason::Existential(r) => quantifier::existential(args, r),
        Reason::ConditionalProof(r) => conditional::conditional_proof(args, r),
    }
}

/// Resolves a label that must refer to a proved formula: a proved line visible from here, an
/// axiom, or a proved proposition. `context` is the location of the reference itself.
fn proved_reference(
    scope: &LocalScope,
    label: &str,
    context: ModuleContext,
) -> Result<Element, ProofError> {
    scope.normalized_reference_formula(label).ok_or_else(|| {
        ProofError::new(ProofErrorKind::NoAllowedReference, context)
            .with_message(format!("'{}'", label))
    })
}

/// Resolves a label that must refer to a proved line or hypothesis visible from here. Axioms and
/// propositions are not accepted.
fn local_reference(
    scope: &LocalScope,
    label: &str,
    context: ModuleContext,
) -> Result<Element, ProofError> {
    scope.local_proof_line_reference(label).ok_or_else(|| {
        ProofError::new(ProofErrorKind::NoAllowedReference, context)
            .with_message(format!("'{}' is not a proved local line", label))
    })
}

fn assert_subject_variable(e: &Element, context: ModuleContext) -> Result<(), ProofError> {
    rassert!(
        is_subject_variable(e),
        ProofError::new(ProofErrorKind::SubjectVariableExpected, context)
            .with_message(format!("got '{}'", e)),
    );
    Ok(())
}

/// Asserts that the current formula, once normalized, is `expected`. If not, the error points at
/// the first place where the formula as written differs from `expected`.
fn assert_formula(
    scope: &LocalScope,
    got: &Element,
    expected: &Element,
    line_context: &ModuleContext,
    kind: ProofErrorKind,
) -> Result<(), ProofError> {
    if scope.normalized_formula(got) == *expected {
        return Ok(());
    }
    let context = line_context
        .at(".getFormula().getElement()")
        .at(&get_difference_location(got, expected));
    Err(ProofError::new(kind, context).with_message(format!("expected '{}', got '{}'", expected, got)))
}

#[cfg(test)]
fn run_tests(test_name: &str, definitions: &str, cases: &[(&str, bool)]) {
    use colored::{Color, Colorize};

    use crate::checker::PropositionOutcome;

    for (i, (module, expected)) in cases.iter().enumerate() {
        // This parses the definitions again for every case, which is not ideal
        let input = format!("{}\n{}", definitions, module);
        let report = crate::check(input.as_bytes(), "test", &Config::new())
            .unwrap_or_else(|e| panic!("parser error during test \"{}\": {}", test_name, e));

        // Every proposition in a case must be proved for the case to pass. A proposition without
        // proofs would otherwise be trivially accepted
        let got = report.is_valid()
            && report
                .propositions
                .iter()
                .all(|p| p.outcome == PropositionOutcome::Proved);

        if *expected == got {
            println!("{} \"{}\"", "PASSED".bold().color(Color::Green), test_name);
        } else {
            let (color, expectation) = if *expected {
                (Color::Red, "expected to PASS but FAILED".red())
            } else {
                (Color::Yellow, "expected to FAIL but PASSED".yellow())
            };

            panic!(
                "{}\nTest '{}' case {}: {}\nOUTCOME: {}",
                "TEST FAILURE".bold().color(color),
                test_name.bold(),
                i.to_string().bold(),
                expectation,
                report.errors
            );
        }
    }
}

#[cfg(test)]
macro_rules! test_cases {
    (
        definitions = $defs:expr,
        $($name:literal { $($module:literal: $exp:literal,)* } )*
    ) => {{
        let definitions: &str = $defs;
        $({
            let name: &str = $name;
            let cases = [ $(($module, $exp),)* ];
            $crate::checker::rules::run_tests(name, definitions, &cases);
        })*
    }};
}

// Since the rule submodules use the `test_cases` macro, we have to declare them here, after the
// macro is declared
pub(super) mod add;
pub(super) mod conditional;
pub(super) mod modus_ponens;
pub(super) mod quantifier;
pub(super) mod rename;
pub(super) mod substitution;
