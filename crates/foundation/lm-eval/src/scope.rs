//! Scope tree for variable and rule lookup
//!
//! Every scope lives in one arena owned by [`ScopeTree`]. A scope refers to its
//! parent by [`ScopeId`] only, and children are always allocated after their
//! parent, so parent chains are finite and acyclic.

use crate::env::Env;
use crate::error::EvalError;
use crate::eval_string::EvalString;
use crate::rule::{Rule, RuleId};
use indexmap::IndexMap;
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;

/// Unique identifier for a scope
pub type ScopeId = Idx<ScopeData>;

/// A single scope in the tree
#[derive(Debug, Clone, Default)]
pub struct ScopeData {
    /// Enclosing scope (None for the root)
    parent: Option<ScopeId>,
    /// Resolved variable values
    bindings: FxHashMap<String, String>,
    /// Rules registered here, in registration order
    rules: IndexMap<String, RuleId>,
}

/// Owner of every scope and every rule of a build description
///
/// Mutation needs `&mut ScopeTree`; evaluation goes through [`ScopeEnv`],
/// which only borrows the tree. Once populated, a tree can be shared and
/// evaluated from several threads at once.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Arena<ScopeData>,
    rules: Arena<Rule>,
    root: ScopeId,
}

impl ScopeTree {
    /// Create a tree holding only the root scope
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(ScopeData::default());
        Self {
            scopes,
            rules: Arena::new(),
            root,
        }
    }

    /// The global scope
    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// Create a new child scope of `parent`
    pub fn create_child(&mut self, parent: ScopeId) -> ScopeId {
        let scope = self.scopes.alloc(ScopeData {
            parent: Some(parent),
            ..ScopeData::default()
        });
        tracing::debug!(?scope, ?parent, "created scope");
        scope
    }

    /// Parent of `scope`, if it has one
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope].parent
    }

    /// Number of scopes, root included
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Bind `key` to an already evaluated `value` in `scope`
    ///
    /// Overwrites any earlier value of `key` in that scope.
    pub fn add_binding(
        &mut self,
        scope: ScopeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.scopes[scope].bindings.insert(key.into(), value.into());
    }

    /// Move a finished rule into the tree's rule registry
    ///
    /// The rule is not visible from any scope until passed to
    /// [`ScopeTree::add_rule`].
    pub fn define_rule(&mut self, rule: Rule) -> RuleId {
        self.rules.alloc(rule)
    }

    /// Register `rule` under its name in `scope`
    ///
    /// # Panics
    ///
    /// Panics if `scope` already has a rule with the same name. Callers must
    /// reject duplicate definitions before getting here. Shadowing a rule of an
    /// enclosing scope is fine.
    pub fn add_rule(&mut self, scope: ScopeId, rule: RuleId) {
        let name = self.rules[rule].name().to_string();
        assert!(
            self.env(scope).lookup_rule_current_scope(&name).is_none(),
            "rule `{name}` is already defined in this scope"
        );
        tracing::debug!(rule = %name, ?scope, "registered rule");
        self.scopes[scope].rules.insert(name, rule);
    }

    /// Get a rule by ID
    pub fn rule(&self, rule: RuleId) -> &Rule {
        &self.rules[rule]
    }

    /// Evaluation view of `scope`
    pub fn env(&self, scope: ScopeId) -> ScopeEnv<'_> {
        ScopeEnv { tree: self, scope }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// One scope of a [`ScopeTree`], seen as an evaluation environment
#[derive(Debug, Clone, Copy)]
pub struct ScopeEnv<'tree> {
    tree: &'tree ScopeTree,
    scope: ScopeId,
}

impl<'tree> ScopeEnv<'tree> {
    /// The scope this view looks at
    pub fn id(&self) -> ScopeId {
        self.scope
    }

    /// The tree this view borrows
    pub fn tree(&self) -> &'tree ScopeTree {
        self.tree
    }

    /// View of the enclosing scope, if any
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|scope| self.tree.env(scope))
    }

    /// Variables bound directly in this scope
    pub fn bindings(&self) -> impl Iterator<Item = (&'tree str, &'tree str)> {
        self.data()
            .bindings
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Rules registered directly in this scope, in registration order
    pub fn rules(&self) -> &'tree IndexMap<String, RuleId> {
        &self.data().rules
    }

    /// Find a rule in this scope only
    pub fn lookup_rule_current_scope(&self, name: &str) -> Option<&'tree Rule> {
        self.data().rules.get(name).map(|&rule| self.tree.rule(rule))
    }

    /// Find a rule, walking up the scope chain
    pub fn lookup_rule(&self, name: &str) -> Option<&'tree Rule> {
        self.lookup_rule_id(name).map(|rule| self.tree.rule(rule))
    }

    /// Handle of the rule [`ScopeEnv::lookup_rule`] would return
    pub fn lookup_rule_id(&self, name: &str) -> Option<RuleId> {
        let mut current = Some(*self);
        while let Some(env) = current {
            if let Some(&rule) = env.data().rules.get(name) {
                return Some(rule);
            }
            current = env.parent();
        }
        None
    }

    /// Append the value of a binding key, preferring a rule default over
    /// inherited values
    ///
    /// A binding in this scope wins. Otherwise `default` is evaluated
    /// against `env`, which is usually the edge environment rather than
    /// this scope. Without a default the enclosing scopes are searched, and
    /// when nothing is found nothing is appended.
    ///
    /// # Errors
    ///
    /// Propagates any [`EvalError`] raised while evaluating `default` or the
    /// parent lookup.
    pub fn append_with_fallback(
        &self,
        name: &str,
        default: Option<&EvalString>,
        env: &dyn Env,
        out: &mut String,
    ) -> Result<(), EvalError> {
        if let Some(value) = self.data().bindings.get(name) {
            out.push_str(value);
            return Ok(());
        }
        if let Some(default) = default {
            return default.eval_append(env, out);
        }
        match self.parent() {
            Some(parent) => parent.append_variable(name, out),
            None => Ok(()),
        }
    }

    /// String form of [`ScopeEnv::append_with_fallback`]
    pub fn lookup_with_fallback(
        &self,
        name: &str,
        default: Option<&EvalString>,
        env: &dyn Env,
    ) -> String {
        let mut out = String::new();
        if let Err(error) = self.append_with_fallback(name, default, env, &mut out) {
            tracing::debug!(%error, variable = name, "discarding evaluation error in fallback lookup");
        }
        out
    }

    fn data(&self) -> &'tree ScopeData {
        &self.tree.scopes[self.scope]
    }
}

impl Env for ScopeEnv<'_> {
    fn append_variable(&self, name: &str, out: &mut String) -> Result<(), EvalError> {
        if let Some(value) = self.data().bindings.get(name) {
            out.push_str(value);
            return Ok(());
        }
        match self.parent() {
            Some(parent) => parent.append_variable(name, out),
            None => {
                tracing::trace!(variable = name, "unbound variable expands to nothing");
                Ok(())
            }
        }
    }
}
