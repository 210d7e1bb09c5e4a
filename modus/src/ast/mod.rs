//! The element model of formulas and terms, the structure of modules and formal proofs, and the
//! variable algebra used to check them.

#[macro_use]
mod macros;
mod context;
mod diff;
mod element;
mod element_set;
mod module;
pub mod operators;
pub(crate) mod printer;
mod proof;
mod substitution;
pub mod variables;
#[cfg(test)]
mod tests;

pub use context::ModuleContext;
pub use diff::get_difference_location;
pub use element::{Element, ElementList};
pub use element_set::ElementSet;
pub use module::{Axiom, Definition, Module, Node, Proposition};
pub use printer::{print_module, write_module};
pub use proof::*;
pub use substitution::{
    replace_free_subject_variable, replace_operator_variable, replace_subject_variable_quantifier,
    test_operator_variable, test_subject_variable, Substitution, SubstitutionError,
};
pub use variables::{
    bound_subject_variables, free_subject_variables, is_implication, is_subject_variable,
};
