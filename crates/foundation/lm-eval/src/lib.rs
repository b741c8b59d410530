//! Scoped, lazily-expanded variable binding for loom build descriptions
//!
//! Build files mention variables as `$name` inside rule commands, paths and
//! descriptions. Their meaning depends on who asks: the global scope, a rule,
//! or a single build edge. This crate keeps those references unexpanded until
//! an environment is supplied.
//!
//! # Architecture
//!
//! - **[`EvalString`]**: a template of literal and `$reference` tokens
//! - **[`Rule`]**: a named set of default templates (`command`, `depfile`, ...)
//! - **[`ScopeTree`]**: owns every scope and rule; each scope binds resolved
//!   values and falls back to its parent
//! - **[`Env`]**: what a template is evaluated against; [`ScopeEnv`] is the
//!   scope-backed implementation
//!
//! # Usage
//!
//! ```rust
//! use lm_eval::{Env, EvalString, Rule, ScopeTree};
//!
//! let mut tree = ScopeTree::new();
//! let root = tree.root();
//! tree.add_binding(root, "cc", "gcc");
//!
//! let mut command = EvalString::new();
//! command.add_special("cc");
//! command.add_text(" -c ");
//! command.add_special("in");
//! let mut rule = Rule::new("compile");
//! rule.add_binding("command", command);
//! let compile = tree.define_rule(rule);
//! tree.add_rule(root, compile);
//!
//! let edge = tree.create_child(root);
//! tree.add_binding(edge, "in", "main.c");
//!
//! let env = tree.env(edge);
//! let rule = env.lookup_rule("compile").map(|rule| rule.binding("command"));
//! assert_eq!(
//!     env.lookup_with_fallback("command", rule.flatten(), &env),
//!     "gcc -c main.c"
//! );
//! assert_eq!(env.lookup_variable("undefined"), "");
//! ```

pub mod env;
pub mod error;
pub mod eval_string;
pub mod rule;
pub mod scope;

pub use env::Env;
pub use error::EvalError;
pub use eval_string::{EvalString, Token, TokenKind};
pub use rule::{RESERVED_BINDINGS, Rule, RuleId};
pub use scope::{ScopeData, ScopeEnv, ScopeId, ScopeTree};
