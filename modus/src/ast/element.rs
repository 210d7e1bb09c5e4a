use super::operators;
use std::sync::Arc;

/// A formula or term of a module.
///
/// Elements are immutable trees. Cloning an element only increments a reference count, so they
/// can be shared freely between proof lines, resolvers and error messages. Equality and hashing
/// are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// A leaf, holding an uninterpreted string such as a variable or constant name.
    Atom(Arc<str>),

    /// An operator applied to an ordered list of child elements.
    List(Arc<ElementList>),
}

/// An operator tag together with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementList {
    operator: Arc<str>,
    elements: Vec<Element>,
}

impl ElementList {
    pub fn new(operator: impl Into<Arc<str>>, elements: Vec<Element>) -> Self {
        Self { operator: operator.into(), elements }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the child at index `i`, if it exists.
    pub fn element(&self, i: usize) -> Option<&Element> {
        self.elements.get(i)
    }

    /// Returns a list with the same operator and the given children.
    pub fn with_elements(&self, elements: Vec<Element>) -> Self {
        Self {
            operator: self.operator.clone(),
            elements,
        }
    }
}

impl Element {
    pub fn atom(value: impl Into<Arc<str>>) -> Self {
        Self::Atom(value.into())
    }

    pub fn list(operator: impl Into<Arc<str>>, elements: Vec<Element>) -> Self {
        Self::List(Arc::new(ElementList::new(operator, elements)))
    }

    /// Builds the subject variable `(VAR name)`.
    pub fn subject_variable(name: &str) -> Self {
        Self::list(operators::VAR, vec![Self::atom(name)])
    }

    /// Builds the implication `(IMPL antecedent consequent)`.
    pub fn implication(antecedent: Element, consequent: Element) -> Self {
        Self::list(operators::IMPL, vec![antecedent, consequent])
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Element::Atom(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Element::List(_))
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Element::Atom(a) => Some(a),
            Element::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&ElementList> {
        match self {
            Element::List(l) => Some(l),
            Element::Atom(_) => None,
        }
    }

    /// Returns the operator of this element, or `None` if it is an atom.
    pub fn operator(&self) -> Option<&str> {
        self.as_list().map(ElementList::operator)
    }

    /// Returns `true` if this element is a list with operator `op` and exactly `len` children.
    pub fn is_application_of(&self, op: &str, len: usize) -> bool {
        self.as_list()
            .is_some_and(|l| l.operator() == op && l.len() == len)
    }

    /// Returns `true` if `other` occurs as a subtree of this element (including the element
    /// itself).
    pub fn contains(&self, other: &Element) -> bool {
        if self == other {
            return true;
        }
        match self {
            Element::Atom(_) => false,
            Element::List(l) => l.elements().iter().any(|e| e.contains(other)),
        }
    }

    /// Replaces every subtree equal to `original` with `replacement`.
    pub fn replace(&self, original: &Element, replacement: &Element) -> Element {
        if self == original {
            return replacement.clone();
        }
        match self {
            Element::Atom(_) => self.clone(),
            Element::List(l) => {
                let elements = l
                    .elements()
                    .iter()
                    .map(|e| e.replace(original, replacement))
                    .collect();
                Element::List(Arc::new(l.with_elements(elements)))
            }
        }
    }
}

impl From<ElementList> for Element {
    fn from(list: ElementList) -> Self {
        Element::List(Arc::new(list))
    }
}
