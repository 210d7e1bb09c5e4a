use super::*;

#[test]
fn test_structural_equality() {
    let a = elem!((IMPL (PREDVAR "A") (PREDVAR "B")));
    let b = Element::implication(
        Element::list("PREDVAR", vec![Element::atom("A")]),
        Element::list("PREDVAR", vec![Element::atom("B")]),
    );
    assert_eq!(a, b);
    assert_ne!(a, elem!((IMPL (PREDVAR "B") (PREDVAR "A"))));
    assert_ne!(elem!("VAR"), elem!((VAR)));

    let set: ElementSet = [a.clone(), b, a.clone()].into_iter().collect();
    assert_eq!(1, set.len());
}

#[test]
fn test_element_accessors() {
    let e = elem!((FORALL (VAR "x") (PREDCON "in" (VAR "x") (VAR "y"))));
    assert_eq!(Some("FORALL"), e.operator());
    assert_eq!(None, elem!("x").operator());
    assert_eq!(Some("x"), elem!("x").as_atom());
    assert!(e.is_application_of("FORALL", 2));
    assert!(!e.is_application_of("FORALL", 3));

    assert!(e.contains(&elem!((VAR "y"))));
    assert!(e.contains(&e));
    assert!(!e.contains(&elem!((VAR "z"))));

    assert_eq!(
        elem!((FORALL (VAR "x") (PREDCON "in" (VAR "x") (VAR "x")))),
        e.replace(&elem!((VAR "y")), &elem!((VAR "x"))),
    );
}

#[test]
fn test_element_set_operations() {
    let x = elem!((VAR "x"));
    let y = elem!((VAR "y"));
    let z = elem!((VAR "z"));
    let a: ElementSet = [x.clone(), y.clone()].into_iter().collect();
    let b: ElementSet = [y.clone(), z.clone()].into_iter().collect();

    assert_eq!(a.union(&b), [x.clone(), y.clone(), z.clone()].into_iter().collect());
    assert_eq!(a.intersection(&b), [y.clone()].into_iter().collect());
    assert_eq!(a.minus(&b), [x.clone()].into_iter().collect());
    assert!(a.minus(&a).is_empty());
    assert!(a.minus(&b).intersection(&b).is_empty());

    // Equality does not depend on insertion order
    let c: ElementSet = [y, x].into_iter().collect();
    assert_eq!(a, c);
    assert_eq!("{(VAR x), (VAR y)}", a.to_string());
}

#[test]
fn test_rule_kind_names() {
    use std::str::FromStr;

    let kinds = [
        RuleKind::Add,
        RuleKind::Rename,
        RuleKind::ModusPonens,
        RuleKind::SubstFree,
        RuleKind::SubstPred,
        RuleKind::SubstFunc,
        RuleKind::Universal,
        RuleKind::Existential,
        RuleKind::ConditionalProof,
    ];
    for kind in kinds {
        assert_eq!(Ok(kind), RuleKind::from_str(&kind.to_string()));
    }
    assert_eq!(Ok(RuleKind::ModusPonens), RuleKind::from_str("mp"));
    assert_eq!(Err(()), RuleKind::from_str("modus-ponens"));
}
