//! Module names and ordered module sets.
//!
//! A module name is an opaque identifier for one unit of platform capability;
//! the bundler never inspects its internal structure. [`ModuleSet`] keeps set
//! semantics while preserving first-insertion order, because the linker
//! receives the set as an ordered comma-joined list and the ordering must be
//! stable within a run for reproducible diagnostics.

use std::fmt;

/// A semantic name for one platform module (for example `java.base`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new module name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the module name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, duplicate-free collection of module names.
///
/// Iteration order equals first-insertion order. The collection is small
/// (tens of entries at most), so membership checks scan the backing vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    modules: Vec<ModuleName>,
}

impl ModuleSet {
    /// Create an empty module set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module, keeping first-insertion order.
    ///
    /// Returns `true` if the module was newly inserted, `false` if it was
    /// already present.
    pub fn insert(&mut self, module: ModuleName) -> bool {
        if self.contains(&module) {
            return false;
        }
        self.modules.push(module);
        true
    }

    /// Insert every module from `iter`, preserving first-occurrence order.
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = ModuleName>,
    {
        for module in iter {
            self.insert(module);
        }
    }

    /// Check whether a module is present.
    #[must_use]
    pub fn contains(&self, module: &ModuleName) -> bool {
        self.modules.contains(module)
    }

    /// Number of modules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the set contains no modules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate over the modules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleName> {
        self.modules.iter()
    }

    /// Borrow the modules as an ordered slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ModuleName] {
        &self.modules
    }

    /// Serialise the set as the comma-joined list `jlink --add-modules`
    /// expects.
    #[must_use]
    pub fn to_comma_list(&self) -> String {
        let names: Vec<&str> = self.modules.iter().map(ModuleName::as_str).collect();
        names.join(",")
    }
}

impl FromIterator<ModuleName> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleName>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a ModuleName;
    type IntoIter = std::slice::Iter<'a, ModuleName>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}
