//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep module names and function indices from being
//! mixed up with the plain strings and integers that flow through parsing.

use std::borrow::Borrow;
use std::fmt;

/// Logical module name
///
/// The key used in `[name]#aot_func#N` symbols and in per-module output file
/// names. May be empty only when it is the single registered module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        ModuleName::new(s)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        ModuleName(s)
    }
}

/// Function index
///
/// Either a jitted local index (module-defined functions only) or an absolute
/// index into the binary's function index space (imports first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncIndex(pub u32);

impl FuncIndex {
    /// Shift a jitted local index past the imported functions
    ///
    /// Returns `None` if the result leaves the `u32` index space.
    #[must_use]
    pub fn offset_by(self, imports: u32) -> Option<FuncIndex> {
        self.0.checked_add(imports).map(FuncIndex)
    }
}

impl fmt::Display for FuncIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func[{}]", self.0)
    }
}
