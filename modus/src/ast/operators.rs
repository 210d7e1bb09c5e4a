//! The operator tags that have a fixed meaning for the checker.
//!
//! Any other operator is treated as uninterpreted, and only takes part in structural comparisons.

/// Subject variable, `(VAR x)`.
pub const VAR: &str = "VAR";

/// Predicate variable, `(PREDVAR name arg*)`.
pub const PREDVAR: &str = "PREDVAR";

/// Function variable, `(FUNVAR name arg*)`.
pub const FUNVAR: &str = "FUNVAR";

/// Predicate constant, `(PREDCON name arg*)`.
pub const PREDCON: &str = "PREDCON";

/// Function constant, `(FUNCON name arg*)`.
pub const FUNCON: &str = "FUNCON";

pub const IMPL: &str = "IMPL";
pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const EQUI: &str = "EQUI";
pub const NOT: &str = "NOT";

pub const FORALL: &str = "FORALL";
pub const EXISTS: &str = "EXISTS";
pub const EXISTSU: &str = "EXISTSU";
pub const CLASS: &str = "CLASS";

/// Operators whose first child is the subject variable they bind.
pub const BINDERS: [&str; 4] = [FORALL, EXISTS, EXISTSU, CLASS];

pub fn is_binder_operator(op: &str) -> bool {
    BINDERS.contains(&op)
}
