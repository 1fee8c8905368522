//! Stack symbol grammar
//!
//! Jitted functions appear in perf output as `aot_func#N`, or as
//! `[module]#aot_func#N` when several modules are loaded. With stack checks
//! enabled the runtime also emits `aot_func_internal#N` for the wrapped body.

use crate::domain::{FuncIndex, Result, TranslateError};

/// Separator between frames of a folded stack
pub const FRAME_SEPARATOR: &str = ";";

/// Substring present in every jitted symbol
pub const JITTED_MARKER: &str = "aot_func";

/// Substring that only appears when stack-check wrappers are generated
pub const INTERNAL_MARKER: &str = "aot_func_internal";

const COMPONENT_DELIMITER: char = '#';

/// Which of the two entry points a jitted symbol names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `aot_func#N`
    Plain,
    /// `aot_func_internal#N`
    Internal,
}

/// A parsed `[module]#aot_func[_internal]#N` reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JittedRef<'a> {
    /// Module tag with brackets removed, `None` when absent or empty
    pub module: Option<&'a str>,
    pub variant: Variant,
    /// Local index, counting module-defined functions only
    pub index: FuncIndex,
}

/// One frame of a folded stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol<'a> {
    /// Native or already readable frame, copied as is
    Passthrough(&'a str),
    Jitted(JittedRef<'a>),
}

impl<'a> Symbol<'a> {
    /// Classify and parse one frame
    ///
    /// # Errors
    /// Returns `MalformedSymbol` if the frame looks jitted but does not fit
    /// `[TAG#](aot_func|aot_func_internal)#INDEX`
    pub fn parse(symbol: &'a str) -> Result<Self> {
        if !looks_jitted(symbol) {
            return Ok(Symbol::Passthrough(symbol));
        }
        JittedRef::parse(symbol).map(Symbol::Jitted)
    }
}

impl<'a> JittedRef<'a> {
    fn parse(symbol: &'a str) -> Result<Self> {
        let malformed = |reason: &str| TranslateError::MalformedSymbol {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = symbol.split(COMPONENT_DELIMITER).collect();
        let (tag, kind, index) = match parts.as_slice() {
            [kind, index] => (None, *kind, *index),
            [tag, kind, index] => (Some(*tag), *kind, *index),
            _ => return Err(malformed("expected [module]#aot_func#N")),
        };

        let variant = match kind {
            "aot_func" => Variant::Plain,
            "aot_func_internal" => Variant::Internal,
            _ => return Err(malformed("unknown jitted function kind")),
        };

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("function index is not a number"));
        }
        let index = index.parse().map(FuncIndex).map_err(|_| malformed("function index too large"))?;

        let module = match tag {
            Some(tag) => strip_brackets(tag).ok_or_else(|| malformed("unbalanced module brackets"))?,
            None => None,
        };

        Ok(JittedRef { module, variant, index })
    }
}

fn looks_jitted(symbol: &str) -> bool {
    symbol.contains(JITTED_MARKER) && symbol.contains(COMPONENT_DELIMITER)
}

/// `[name]` and `name` both give `name`; an empty tag counts as absent
fn strip_brackets(tag: &str) -> Option<Option<&str>> {
    let name = match (tag.strip_prefix('['), tag.ends_with(']')) {
        (Some(inner), true) => &inner[..inner.len() - 1],
        (None, false) => tag,
        _ => return None,
    };
    Some(if name.is_empty() { None } else { Some(name) })
}
