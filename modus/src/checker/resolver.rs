use crate::ast::{
    bound_subject_variables, free_subject_variables, operators,
    replace_subject_variable_quantifier,
    variables::{all_subject_variables, is_subject_variable},
    Definition, Element, ElementSet, ModuleContext, Substitution,
};
use ahash::AHashMap;

/// Resolves the labels referenced by proof lines, and normalizes formulas before they are
/// compared.
///
/// Conditional proofs extend the resolver of their enclosing proof by wrapping it, so every
/// method must fall back to the wrapped resolver for labels it doesn't know.
pub trait ReferenceResolver {
    /// Returns `formula` with every defined predicate and function constant unfolded.
    fn normalized_formula(&self, formula: &Element) -> Element;

    /// Returns the normalized formula of the proved fact with the given label.
    fn normalized_reference_formula(&self, label: &str) -> Option<Element>;

    /// Returns `true` if `label` refers to an axiom, a proved proposition, or a proved line or
    /// hypothesis visible from here.
    fn has_proved_formula(&self, label: &str) -> bool;

    /// Returns `true` if `label` is the label of a proof line or hypothesis visible from here.
    fn is_local_proof_line_reference(&self, label: &str) -> bool;

    /// Returns the location of the proof line or hypothesis with the given label.
    fn local_proof_line_reference_context(&self, label: &str) -> Option<ModuleContext>;

    /// Returns the normalized formula of the proved proof line or hypothesis with the given label.
    fn local_proof_line_reference(&self, label: &str) -> Option<Element>;

    /// Returns the subject variables occurring free in some hypothesis of an enclosing
    /// conditional proof.
    fn hypothesis_free_variables(&self) -> ElementSet {
        ElementSet::new()
    }
}

#[derive(Debug)]
struct DefinitionEntry {
    params: Vec<Element>,
    body: Element,
}

/// The resolver for a whole module. It knows the proved facts (axioms and propositions whose
/// proofs were accepted) and the predicate and function definitions seen so far.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    facts: AHashMap<String, Element>,
    definitions: AHashMap<(String, String, usize), DefinitionEntry>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `formula` as a proved fact with the given label.
    pub fn add_fact(&mut self, label: &str, formula: &Element) {
        let normalized = self.normalized_formula(formula);
        self.facts.insert(label.to_owned(), normalized);
    }

    /// Registers a predicate (if `operator` is `PREDCON`) or function (if it is `FUNCON`)
    /// definition. Returns a description of the problem if the definition is malformed.
    pub fn add_definition(&mut self, operator: &str, definition: &Definition) -> Result<(), String> {
        let parts = definition
            .term
            .as_list()
            .filter(|l| l.operator() == operator)
            .and_then(|l| match l.elements() {
                [name, params @ ..] => Some((name.as_atom()?, params)),
                [] => None,
            });
        let Some((name, params)) = parts else {
            return Err(format!("defined term must have the form '({} name ...)'", operator));
        };

        let mut seen = ElementSet::new();
        for p in params {
            if !is_subject_variable(p) {
                return Err(format!("parameter '{}' is not a subject variable", p));
            }
            if !seen.insert(p.clone()) {
                return Err(format!("parameter '{}' appears more than once", p));
            }
        }
        let unbound = free_subject_variables(&definition.body).minus(&seen);
        if !unbound.is_empty() {
            return Err(format!("body has free subject variables {} that are not parameters", unbound));
        }

        let key = (operator.to_owned(), name.to_owned(), params.len());
        if self.definitions.contains_key(&key) {
            return Err(format!("'{}' with {} arguments is already defined", name, params.len()));
        }
        let body = self.normalized_formula(&definition.body);
        let params = params.to_vec();
        self.definitions.insert(key, DefinitionEntry { params, body });
        Ok(())
    }

    fn unfold(&self, list_operator: &str, elements: &[Element]) -> Option<Element> {
        if list_operator != operators::PREDCON && list_operator != operators::FUNCON {
            return None;
        }
        let name = elements.first()?.as_atom()?;
        let key = (list_operator.to_owned(), name.to_owned(), elements.len() - 1);
        let entry = self.definitions.get(&key)?;

        let args = &elements[1..];
        let args_free = args.iter().fold(ElementSet::new(), |acc, a| {
            acc.union(&free_subject_variables(a))
        });
        let body = rename_bound_variables(&entry.body, &args_free);

        let mut substitution = Substitution::empty();
        for (param, arg) in entry.params.iter().zip(args) {
            // Parameters were checked to be subject variables when the definition was added
            substitution.insert(param.clone(), arg.clone()).ok()?;
        }
        Some(substitution.apply(&body))
    }
}

/// Renames every variable bound in `body` that is also in `avoid`, so that substituting terms
/// whose free variables are in `avoid` can't capture them. Each clashing variable gets its name
/// primed until it occurs neither in `body` nor in `avoid`.
fn rename_bound_variables(body: &Element, avoid: &ElementSet) -> Element {
    let clashing = bound_subject_variables(body).intersection(avoid);
    if clashing.is_empty() {
        return body.clone();
    }

    let mut used = all_subject_variables(body).union(avoid);
    let mut body = body.clone();
    for var in clashing {
        let Some(name) = var.as_list().and_then(|l| l.element(0)).and_then(Element::as_atom) else {
            continue;
        };
        let mut fresh_name = format!("{}'", name);
        while used.contains(&Element::subject_variable(&fresh_name)) {
            fresh_name.push('\'');
        }
        let fresh = Element::subject_variable(&fresh_name);
        body = replace_subject_variable_quantifier(&var, &fresh, &body, 0, &mut 0);
        used.insert(fresh);
    }
    body
}

impl ReferenceResolver for ModuleResolver {
    fn normalized_formula(&self, formula: &Element) -> Element {
        if self.definitions.is_empty() {
            return formula.clone();
        }
        let Element::List(list) = formula else {
            return formula.clone();
        };
        let elements: Vec<_> = list
            .elements()
            .iter()
            .map(|e| self.normalized_formula(e))
            .collect();
        match self.unfold(list.operator(), &elements) {
            Some(unfolded) => unfolded,
            None => list.with_elements(elements).into(),
        }
    }

    fn normalized_reference_formula(&self, label: &str) -> Option<Element> {
        self.facts.get(label).cloned()
    }

    fn has_proved_formula(&self, label: &str) -> bool {
        self.facts.contains_key(label)
    }

    fn is_local_proof_line_reference(&self, _: &str) -> bool {
        false
    }

    fn local_proof_line_reference_context(&self, _: &str) -> Option<ModuleContext> {
        None
    }

    fn local_proof_line_reference(&self, _: &str) -> Option<Element> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::parse_element;

    fn definition(term: &str, body: &str) -> Definition {
        Definition {
            label: "D".into(),
            term: parse_element(term),
            body: parse_element(body),
        }
    }

    #[test]
    fn test_facts() {
        let mut resolver = ModuleResolver::new();
        let formula = parse_element("(IMPL (PREDVAR A) (PREDVAR A))");
        resolver.add_fact("A1", &formula);
        assert!(resolver.has_proved_formula("A1"));
        assert!(!resolver.has_proved_formula("A2"));
        assert_eq!(Some(formula), resolver.normalized_reference_formula("A1"));
        assert!(!resolver.is_local_proof_line_reference("A1"));
        assert_eq!(None, resolver.local_proof_line_reference("A1"));
    }

    #[test]
    fn test_definitions_are_unfolded() {
        let mut resolver = ModuleResolver::new();
        resolver
            .add_definition(
                operators::PREDCON,
                &definition(
                    "(PREDCON subset (VAR x) (VAR y))",
                    "(FORALL (VAR z) (IMPL (PREDCON in (VAR z) (VAR x)) (PREDCON in (VAR z) (VAR y))))",
                ),
            )
            .unwrap();
        resolver
            .add_definition(
                operators::PREDCON,
                &definition("(PREDCON refl (VAR x))", "(PREDCON subset (VAR x) (VAR x))"),
            )
            .unwrap();

        let got = resolver.normalized_formula(&parse_element("(PREDCON refl (FUNCON a))"));
        let expected = parse_element(
            "(FORALL (VAR z) (IMPL (PREDCON in (VAR z) (FUNCON a)) (PREDCON in (VAR z) (FUNCON a))))",
        );
        assert_eq!(expected, got);

        // Different arity is not the defined constant
        let e = parse_element("(PREDCON subset (VAR x))");
        assert_eq!(e, resolver.normalized_formula(&e));

        // Facts are stored normalized
        resolver.add_fact("T", &parse_element("(PREDCON refl (FUNCON a))"));
        assert_eq!(Some(expected), resolver.normalized_reference_formula("T"));
    }

    #[test]
    fn test_unfolding_does_not_capture() {
        let mut resolver = ModuleResolver::new();
        resolver
            .add_definition(
                operators::PREDCON,
                &definition(
                    "(PREDCON subset (VAR x) (VAR y))",
                    "(FORALL (VAR z) (IMPL (PREDCON in (VAR z) (VAR x)) (PREDCON in (VAR z) (VAR y))))",
                ),
            )
            .unwrap();

        let got = resolver.normalized_formula(&parse_element("(PREDCON subset (VAR z) (VAR y))"));
        let expected = parse_element(
            "(FORALL (VAR z') (IMPL (PREDCON in (VAR z') (VAR z)) (PREDCON in (VAR z') (VAR y))))",
        );
        assert_eq!(expected, got);

        // `z'` is taken as well, so the bound variable gets one more prime
        let got = resolver
            .normalized_formula(&parse_element("(PREDCON subset (VAR z) (VAR z'))"));
        let expected = parse_element(
            "(FORALL (VAR z'') (IMPL (PREDCON in (VAR z'') (VAR z)) (PREDCON in (VAR z'') (VAR z'))))",
        );
        assert_eq!(expected, got);
    }

    #[test]
    fn test_malformed_definitions() {
        let mut resolver = ModuleResolver::new();
        let cases = [
            ("(FUNCON f (VAR x))", "(VAR x)"),
            ("(PREDCON (VAR x))", "(PREDVAR A)"),
            ("(PREDCON p x)", "(PREDVAR A)"),
            ("(PREDCON p (VAR x) (VAR x))", "(PREDVAR A)"),
            ("(PREDCON p (VAR x))", "(PREDCON in (VAR x) (VAR y))"),
        ];
        for (term, body) in cases {
            assert!(resolver
                .add_definition(operators::PREDCON, &definition(term, body))
                .is_err());
        }

        let d = definition("(PREDCON p (VAR x))", "(PREDCON in (VAR x) (VAR x))");
        assert!(resolver.add_definition(operators::PREDCON, &d).is_ok());
        assert!(resolver.add_definition(operators::PREDCON, &d).is_err());
    }
}
