use std::{fmt, sync::Arc};

/// A position inside a module: the module address and an accessor path into its structure, such
/// as `getNodeList().get(3).getProposition().getFormula()`.
///
/// Contexts are immutable. Descending into a sub-structure creates a new context with `at`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleContext {
    module: Arc<str>,
    location: String,
}

impl ModuleContext {
    /// Creates a context pointing at the root of the module at `address`.
    pub fn new(address: &str) -> Self {
        Self {
            module: address.into(),
            location: String::new(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns a new context with `segment` appended to the location path. The leading `.` of
    /// `segment` is dropped when the location is still empty.
    pub fn at(&self, segment: &str) -> Self {
        let segment = if self.location.is_empty() {
            segment.strip_prefix('.').unwrap_or(segment)
        } else {
            segment
        };
        Self {
            module: self.module.clone(),
            location: format!("{}{}", self.location, segment),
        }
    }

    /// Returns a new context pointing at the `i`-th element of the list this context points at.
    pub fn at_index(&self, i: usize) -> Self {
        self.at(&format!(".get({})", i))
    }
}

impl fmt::Display for ModuleContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.module)
        } else {
            write!(f, "{}:{}", self.module, self.location)
        }
    }
}
