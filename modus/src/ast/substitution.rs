//! Substitutions of subject variables, bound variable renaming and operator variable
//! replacement, together with the capture tests that guard them.

use super::variables::{bound_variable, is_subject_variable};
use super::{Element, ElementList, ElementSet};
use indexmap::IndexMap;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    #[error("trying to substitute '{0}', which is not a subject variable")]
    NotASubjectVariable(Element),
}

type SubstitutionResult<T> = Result<T, SubstitutionError>;

/// A simultaneous substitution of terms for the free occurrences of subject variables.
///
/// Bound occurrences are never touched. No renaming is done to avoid capture: callers are
/// expected to check that the substitution is admissible with `test_subject_variable` first.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    map: IndexMap<Element, Element>,
}

impl Substitution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Extends the substitution with a mapping from `x` to `t`. `x` must be a subject variable.
    pub fn insert(&mut self, x: Element, t: Element) -> SubstitutionResult<()> {
        if !is_subject_variable(&x) {
            return Err(SubstitutionError::NotASubjectVariable(x));
        }
        self.map.insert(x, t);
        Ok(())
    }

    /// Applies the substitution to the free occurrences of its variables in `e`.
    pub fn apply(&self, e: &Element) -> Element {
        if self.map.is_empty() {
            return e.clone();
        }
        if let Some(t) = self.map.get(e) {
            return t.clone();
        }
        let Element::List(list) = e else {
            return e.clone();
        };

        if let Some(var) = bound_variable(list) {
            if self.map.contains_key(var) {
                // Inside this binder, `var` is no longer free
                let mut inner = self.clone();
                inner.map.shift_remove(var);
                let mut elements = Vec::with_capacity(list.len());
                elements.push(var.clone());
                elements.extend(list.elements()[1..].iter().map(|c| inner.apply(c)));
                return list.with_elements(elements).into();
            }
        }
        let elements = list.elements().iter().map(|c| self.apply(c)).collect();
        list.with_elements(elements).into()
    }
}

/// Replaces the free occurrences of the subject variable `var` in `formula` by `term`.
pub fn replace_free_subject_variable(formula: &Element, var: &Element, term: &Element) -> Element {
    let mut map = IndexMap::new();
    map.insert(var.clone(), term.clone());
    Substitution { map }.apply(formula)
}

/// Renames the variable bound by quantifiers over `original` to `replacement`.
///
/// Every binder over `original` that is visited increments `counter`. If `occurrence` is zero,
/// all such binders are renamed; otherwise only the one reached when `counter` equals
/// `occurrence`. Renaming a binder replaces every occurrence of `original` in its subtree, and
/// the walk does not descend into it any further.
pub fn replace_subject_variable_quantifier(
    original: &Element,
    replacement: &Element,
    formula: &Element,
    occurrence: usize,
    counter: &mut usize,
) -> Element {
    let Element::List(list) = formula else {
        return formula.clone();
    };
    if bound_variable(list) == Some(original) {
        *counter += 1;
        if occurrence == 0 || occurrence == *counter {
            return formula.replace(original, replacement);
        }
    }
    let elements = list
        .elements()
        .iter()
        .map(|c| replace_subject_variable_quantifier(original, replacement, c, occurrence, counter))
        .collect();
    list.with_elements(elements).into()
}

fn is_occurrence_of(list: &ElementList, variable: &ElementList) -> bool {
    list.operator() == variable.operator()
        && list.len() == variable.len()
        && list.element(0) == variable.element(0)
}

/// Replaces every occurrence of the operator variable `variable` in `alpha` by `substitute`.
///
/// `variable` has the form `(PREDVAR name x1 ... xn)` or `(FUNVAR name x1 ... xn)`, where the
/// `xi` are the formal parameters. At each occurrence `(PREDVAR name t1 ... tn)`, the free
/// occurrences of the `xi` in `substitute` are simultaneously replaced by the (already rewritten)
/// actual arguments `ti`. Occurrences with a different arity are left alone.
pub fn replace_operator_variable(alpha: &Element, variable: &Element, substitute: &Element) -> Element {
    fn rewrite(alpha: &Element, variable: &ElementList, substitute: &Element) -> Element {
        let Element::List(list) = alpha else {
            return alpha.clone();
        };
        let elements: Vec<_> = list
            .elements()
            .iter()
            .map(|c| rewrite(c, variable, substitute))
            .collect();

        if is_occurrence_of(list, variable) {
            let map = variable.elements()[1..]
                .iter()
                .cloned()
                .zip(elements[1..].iter().cloned())
                .collect();
            Substitution { map }.apply(substitute)
        } else {
            list.with_elements(elements).into()
        }
    }

    match variable.as_list() {
        Some(v) if !v.is_empty() => rewrite(alpha, v, substitute),
        _ => alpha.clone(),
    }
}

/// Returns `false` if some occurrence of the operator variable `variable` in `alpha` lies in the
/// scope of a binder whose variable is in `forbidden`.
pub fn test_operator_variable(alpha: &Element, variable: &Element, forbidden: &ElementSet) -> bool {
    fn go(
        alpha: &Element,
        variable: &ElementList,
        forbidden: &ElementSet,
        binders: &mut Vec<Element>,
    ) -> bool {
        let Element::List(list) = alpha else {
            return true;
        };
        if is_occurrence_of(list, variable) && binders.iter().any(|b| forbidden.contains(b)) {
            return false;
        }
        let bound = bound_variable(list).cloned();
        let pushed = bound.is_some();
        binders.extend(bound);
        let result = list
            .elements()
            .iter()
            .all(|c| go(c, variable, forbidden, binders));
        if pushed {
            binders.pop();
        }
        result
    }

    match variable.as_list() {
        Some(v) if !forbidden.is_empty() => go(alpha, v, forbidden, &mut Vec::new()),
        _ => true,
    }
}

/// Returns `false` if some free occurrence of the subject variable `var` in `alpha` lies in the
/// scope of a binder whose variable is in `forbidden`. Substituting a term whose free variables
/// are `forbidden` for `var` is capture free exactly when this returns `true`.
pub fn test_subject_variable(alpha: &Element, var: &Element, forbidden: &ElementSet) -> bool {
    fn go(alpha: &Element, var: &Element, forbidden: &ElementSet, binders: &mut Vec<Element>) -> bool {
        if alpha == var {
            return !binders.iter().any(|b| forbidden.contains(b));
        }
        let Element::List(list) = alpha else {
            return true;
        };
        match bound_variable(list) {
            // Below this binder, `var` is not free
            Some(v) if v == var => true,
            Some(v) => {
                binders.push(v.clone());
                let result = list.elements()[1..]
                    .iter()
                    .all(|c| go(c, var, forbidden, binders));
                binders.pop();
                result
            }
            None => list
                .elements()
                .iter()
                .all(|c| go(c, var, forbidden, binders)),
        }
    }

    forbidden.is_empty() || go(alpha, var, forbidden, &mut Vec::new())
}
