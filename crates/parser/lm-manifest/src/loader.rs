//! Building a scope tree from a manifest

use crate::error::ManifestError;
use crate::manifest::{Manifest, RuleDecl};
use crate::template::parse_template;
use indexmap::IndexMap;
use lm_eval::{EvalError, EvalString, Rule, RuleId, ScopeId, ScopeTree};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Name the global scope is addressed by
pub const ROOT_SCOPE: &str = "root";

/// A populated scope tree plus the names and rules of its scopes
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    tree: ScopeTree,
    scopes: IndexMap<String, ScopeId>,
    edge_rules: FxHashMap<ScopeId, RuleId>,
}

impl LoadedManifest {
    /// Populate a fresh scope tree from `manifest`
    ///
    /// Variables are evaluated as they are bound, in declaration order, so a
    /// value can refer to anything bound before it. Rule bindings stay
    /// deferred.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] for malformed templates, unknown parent
    /// scopes or rules, and scopes named [`ROOT_SCOPE`].
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
        let tree = ScopeTree::new();
        let root = tree.root();
        let mut loaded = Self {
            tree,
            scopes: IndexMap::from([(ROOT_SCOPE.to_string(), root)]),
            edge_rules: FxHashMap::default(),
        };

        loaded.bind_vars(root, "", &manifest.vars)?;
        loaded.define_rules(root, "", &manifest.rules)?;

        for (name, decl) in &manifest.scopes {
            if loaded.scopes.contains_key(name) {
                return Err(ManifestError::ReservedScope { name: name.clone() });
            }
            let parent_name = decl.parent.as_deref().unwrap_or(ROOT_SCOPE);
            let parent = loaded.scope(parent_name).ok_or_else(|| ManifestError::UnknownParent {
                scope: name.clone(),
                parent: parent_name.to_string(),
            })?;

            let scope = loaded.tree.create_child(parent);
            loaded.scopes.insert(name.clone(), scope);

            let prefix = format!("scopes.{name}.");
            loaded.bind_vars(scope, &prefix, &decl.vars)?;
            loaded.define_rules(scope, &prefix, &decl.rules)?;

            if let Some(rule_name) = &decl.rule {
                let rule = loaded
                    .tree
                    .env(scope)
                    .lookup_rule_id(rule_name)
                    .ok_or_else(|| ManifestError::UnknownRule {
                        scope: name.clone(),
                        rule: rule_name.clone(),
                    })?;
                loaded.edge_rules.insert(scope, rule);
            }
        }

        tracing::debug!(
            scopes = loaded.tree.scope_count(),
            edges = loaded.edge_rules.len(),
            "loaded manifest"
        );
        Ok(loaded)
    }

    fn bind_vars(
        &mut self,
        scope: ScopeId,
        prefix: &str,
        vars: &IndexMap<String, String>,
    ) -> Result<(), ManifestError> {
        for (key, text) in vars {
            let eval = template(&format!("{prefix}vars.{key}"), text)?;
            let value = eval.evaluate(&self.tree.env(scope));
            self.tree.add_binding(scope, key.clone(), value);
        }
        Ok(())
    }

    fn define_rules(
        &mut self,
        scope: ScopeId,
        prefix: &str,
        rules: &IndexMap<String, RuleDecl>,
    ) -> Result<(), ManifestError> {
        for (name, decl) in rules {
            let mut rule = Rule::new(name.clone());
            for (key, text) in decl {
                if !Rule::is_reserved_binding(key) {
                    tracing::warn!(rule = %name, %key, "binding has no special meaning to rules");
                }
                let eval = template(&format!("{prefix}rules.{name}.{key}"), text)?;
                rule.add_binding(key.clone(), eval);
            }
            let rule = self.tree.define_rule(rule);
            self.tree.add_rule(scope, rule);
        }
        Ok(())
    }

    /// The populated tree
    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Look up a scope by name; the global scope is [`ROOT_SCOPE`]
    pub fn scope(&self, name: &str) -> Option<ScopeId> {
        self.scopes.get(name).copied()
    }

    /// All scope names in declaration order, starting with [`ROOT_SCOPE`]
    pub fn scope_names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    /// The rule `scope` was declared to evaluate against
    pub fn edge_rule(&self, scope: ScopeId) -> Option<&Rule> {
        self.edge_rules
            .get(&scope)
            .map(|&rule| self.tree.rule(rule))
    }

    /// Value of the binding `key` as a build edge in `scope` sees it
    ///
    /// A binding in the scope itself wins, then the default of the scope's
    /// rule (evaluated in the scope), then inherited values.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures from [`lm_eval`].
    pub fn evaluate_binding(&self, scope: ScopeId, key: &str) -> Result<String, EvalError> {
        let env = self.tree.env(scope);
        let default = self.edge_rule(scope).and_then(|rule| rule.binding(key));
        let mut out = String::new();
        env.append_with_fallback(key, default, &env, &mut out)?;
        Ok(out)
    }
}

fn template(location: &str, text: &str) -> Result<EvalString, ManifestError> {
    parse_template(text).map_err(|reason| ManifestError::template(location, text, reason))
}

/// Load a manifest from TOML text; `name` labels diagnostics
///
/// # Errors
///
/// Returns [`ManifestError::Syntax`] for TOML that does not decode, or any
/// error of [`LoadedManifest::from_manifest`].
pub fn load_str(name: &str, source: &str) -> Result<LoadedManifest, ManifestError> {
    let manifest: Manifest =
        toml::from_str(source).map_err(|err| ManifestError::syntax(name, source, &err))?;
    LoadedManifest::from_manifest(&manifest)
}

/// Load a manifest file from disk
///
/// # Errors
///
/// Returns [`ManifestError::Io`] when the file cannot be read, or any error
/// of [`load_str`].
pub fn load_file(path: &Path) -> Result<LoadedManifest, ManifestError> {
    let source = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&path.display().to_string(), &source)
}
