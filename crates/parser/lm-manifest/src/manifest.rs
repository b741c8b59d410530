//! Scope manifest layout (e.g., loom.toml)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Template text for each binding key of a rule
pub type RuleDecl = IndexMap<String, String>;

/// Top-level manifest: the global scope plus named child scopes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Global variables, evaluated in declaration order
    #[serde(default)]
    pub vars: IndexMap<String, String>,

    /// Global rules
    #[serde(default)]
    pub rules: IndexMap<String, RuleDecl>,

    /// Child scopes; a parent must be declared before its children
    #[serde(default)]
    pub scopes: IndexMap<String, ScopeDecl>,
}

/// A nested scope, typically one build edge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeDecl {
    /// Enclosing scope name (defaults to the global scope)
    #[serde(default)]
    pub parent: Option<String>,

    /// Rule whose defaults this scope evaluates against
    #[serde(default)]
    pub rule: Option<String>,

    /// Variables bound in this scope
    #[serde(default)]
    pub vars: IndexMap<String, String>,

    /// Rules local to this scope
    #[serde(default)]
    pub rules: IndexMap<String, RuleDecl>,
}
