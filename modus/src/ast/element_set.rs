use super::Element;
use indexmap::IndexSet;
use std::fmt;

/// An ordered set of elements, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSet(IndexSet<Element>);

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `e` to the set. Returns `false` if it was already present.
    pub fn insert(&mut self, e: Element) -> bool {
        self.0.insert(e)
    }

    pub fn contains(&self, e: &Element) -> bool {
        self.0.contains(e)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Element> {
        self.0.iter()
    }

    /// Adds every element of `other` to this set.
    pub fn union_with(&mut self, other: &ElementSet) {
        self.0.extend(other.iter().cloned());
    }

    pub fn union(&self, other: &ElementSet) -> ElementSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    pub fn intersection(&self, other: &ElementSet) -> ElementSet {
        self.iter().filter(|e| other.contains(e)).cloned().collect()
    }

    /// Returns the elements of this set that are not in `other`.
    pub fn minus(&self, other: &ElementSet) -> ElementSet {
        self.iter().filter(|e| !other.contains(e)).cloned().collect()
    }
}

impl FromIterator<Element> for ElementSet {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Element> for ElementSet {
    fn extend<T: IntoIterator<Item = Element>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ElementSet {
    type Item = Element;
    type IntoIter = indexmap::set::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = &'a Element;
    type IntoIter = indexmap::set::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, e) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "}}")
    }
}
