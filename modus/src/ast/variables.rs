//! Structural tests and free/bound subject variable computations.

use super::{operators, Element, ElementList, ElementSet};

/// Returns `true` if `e` is a subject variable, that is, `(VAR name)` with an atom as name.
pub fn is_subject_variable(e: &Element) -> bool {
    e.as_list().is_some_and(|l| {
        l.operator() == operators::VAR && l.len() == 1 && l.elements()[0].is_atom()
    })
}

/// Returns `true` if `e` is a binary implication.
pub fn is_implication(e: &Element) -> bool {
    e.is_application_of(operators::IMPL, 2)
}

/// Splits an implication into its antecedent and consequent.
pub fn as_implication(e: &Element) -> Option<(&Element, &Element)> {
    match e.as_list()?.elements() {
        [a, b] if is_implication(e) => Some((a, b)),
        _ => None,
    }
}

/// If `list` is a quantifier or class term binding a subject variable, returns that variable.
pub fn bound_variable(list: &ElementList) -> Option<&Element> {
    if !operators::is_binder_operator(list.operator()) {
        return None;
    }
    list.element(0).filter(|v| is_subject_variable(v))
}

fn is_operator_variable_with(e: &Element, op: &str) -> bool {
    e.as_list().is_some_and(|l| {
        l.operator() == op && !l.is_empty() && l.elements()[0].is_atom()
    })
}

/// Returns `true` if `e` is `(PREDVAR name arg*)`.
pub fn is_predicate_variable(e: &Element) -> bool {
    is_operator_variable_with(e, operators::PREDVAR)
}

/// Returns `true` if `e` is `(FUNVAR name arg*)`.
pub fn is_function_variable(e: &Element) -> bool {
    is_operator_variable_with(e, operators::FUNVAR)
}

/// Returns the set of subject variables that occur free in `e`.
pub fn free_subject_variables(e: &Element) -> ElementSet {
    fn collect(e: &Element, bound: &mut Vec<Element>, acc: &mut ElementSet) {
        if is_subject_variable(e) {
            if !bound.contains(e) {
                acc.insert(e.clone());
            }
            return;
        }
        let Element::List(list) = e else { return };
        match bound_variable(list) {
            Some(var) => {
                bound.push(var.clone());
                for child in &list.elements()[1..] {
                    collect(child, bound, acc);
                }
                bound.pop();
            }
            None => {
                for child in list.elements() {
                    collect(child, bound, acc);
                }
            }
        }
    }

    let mut acc = ElementSet::new();
    collect(e, &mut Vec::new(), &mut acc);
    acc
}

/// Returns the set of subject variables bound by some quantifier or class term inside `e`.
pub fn bound_subject_variables(e: &Element) -> ElementSet {
    fn collect(e: &Element, acc: &mut ElementSet) {
        let Element::List(list) = e else { return };
        if let Some(var) = bound_variable(list) {
            acc.insert(var.clone());
        }
        for child in list.elements() {
            collect(child, acc);
        }
    }

    let mut acc = ElementSet::new();
    collect(e, &mut acc);
    acc
}

/// Returns all subject variables occurring in `e`, free or bound.
pub fn all_subject_variables(e: &Element) -> ElementSet {
    fn collect(e: &Element, acc: &mut ElementSet) {
        if is_subject_variable(e) {
            acc.insert(e.clone());
            return;
        }
        if let Element::List(list) = e {
            for child in list.elements() {
                collect(child, acc);
            }
        }
    }

    let mut acc = ElementSet::new();
    collect(e, &mut acc);
    acc
}
