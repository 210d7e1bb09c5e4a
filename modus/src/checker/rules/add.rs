use super::{assert_formula, proved_reference, ProofErrorKind, RuleArgs, RuleResult};
use crate::ast::*;

pub fn add(
    RuleArgs { formula, scope, line_context, context, .. }: RuleArgs,
    reason: &Add,
) -> RuleResult {
    let reference = proved_reference(scope, &reason.reference, context.at(".getReference()"))?;
    assert_formula(
        scope,
        formula,
        &reference,
        line_context,
        ProofErrorKind::ExpectedFormulaDiffers,
    )?;
    Ok(())
}
