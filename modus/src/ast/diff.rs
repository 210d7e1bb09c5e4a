use super::Element;

/// Returns the location of the first difference between `actual` and `expected`, as a path
/// suffix relative to `actual`, or an empty string if they are equal.
///
/// The path descends through `.getList().getElement(i)` segments while the operators match, and
/// ends with `.getAtom()` if two different atoms are found, or with `.getList()` if the lists
/// differ in their operator or length.
pub fn get_difference_location(actual: &Element, expected: &Element) -> String {
    let mut path = String::new();
    let (mut a, mut b) = (actual, expected);
    while a != b {
        match (a, b) {
            (Element::Atom(_), Element::Atom(_)) => {
                path.push_str(".getAtom()");
                break;
            }
            (Element::List(x), Element::List(y)) => {
                let first_diff = (x.operator() == y.operator())
                    .then(|| (0..x.len().min(y.len())).find(|&i| x.elements()[i] != y.elements()[i]))
                    .flatten();
                match first_diff {
                    Some(i) => {
                        path.push_str(&format!(".getList().getElement({})", i));
                        a = &x.elements()[i];
                        b = &y.elements()[i];
                    }
                    None => {
                        path.push_str(".getList()");
                        break;
                    }
                }
            }
            _ => break,
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tests::parse_element;

    fn diff(a: &str, b: &str) -> String {
        get_difference_location(&parse_element(a), &parse_element(b))
    }

    #[test]
    fn test_difference_location() {
        assert_eq!("", diff("(IMPL a b)", "(IMPL a b)"));
        assert_eq!(".getList().getElement(1).getAtom()", diff("(IMPL a b)", "(IMPL a c)"));
        assert_eq!(
            ".getList().getElement(0).getList().getElement(1)",
            diff("(IMPL (AND a (VAR x)) b)", "(IMPL (AND a c) b)"),
        );
        assert_eq!(".getList()", diff("(IMPL a b)", "(AND a b)"));
        assert_eq!(".getList()", diff("(AND a b)", "(AND a b c)"));
        assert_eq!("", diff("a", "a"));
        assert_eq!(".getAtom()", diff("a", "b"));
    }
}
