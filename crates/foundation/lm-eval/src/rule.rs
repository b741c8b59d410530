//! Rules: named sets of default bindings shared across build edges

use crate::eval_string::EvalString;
use la_arena::Idx;
use rustc_hash::FxHashMap;

/// Handle to a rule owned by a [`ScopeTree`](crate::ScopeTree)
pub type RuleId = Idx<Rule>;

/// Binding keys the build executor gives special meaning to
pub const RESERVED_BINDINGS: [&str; 10] = [
    "command",
    "depfile",
    "description",
    "deps",
    "generator",
    "pool",
    "restat",
    "rspfile",
    "rspfile_content",
    "msvc_deps_prefix",
];

/// A named set of deferred bindings (`command`, `description`, ...)
///
/// Bindings are added while the rule is being built. Once handed to
/// [`ScopeTree::define_rule`](crate::ScopeTree::define_rule) the rule is only
/// reachable through shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    bindings: FxHashMap<String, EvalString>,
}

impl Rule {
    /// Creates a rule with no bindings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: FxHashMap::default(),
        }
    }

    /// The rule's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores `value` under `key`, replacing any earlier binding
    pub fn add_binding(&mut self, key: impl Into<String>, value: EvalString) {
        self.bindings.insert(key.into(), value);
    }

    /// The deferred value bound to `key`, if any
    pub fn binding(&self, key: &str) -> Option<&EvalString> {
        self.bindings.get(key)
    }

    /// All bindings, in no particular order
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &EvalString)> {
        self.bindings
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Whether `name` is one of [`RESERVED_BINDINGS`]
    pub fn is_reserved_binding(name: &str) -> bool {
        RESERVED_BINDINGS.contains(&name)
    }
}
