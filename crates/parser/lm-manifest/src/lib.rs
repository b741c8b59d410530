//! Scope manifests for loom
//!
//! Reads a TOML description of the global scope, its rules, and nested
//! scopes, and populates an [`lm_eval::ScopeTree`] from it. Binding values are
//! written in `$variable` template syntax (see [`template`]).
//!
//! ```rust
//! let loaded = lm_manifest::load_str(
//!     "loom.toml",
//!     r#"
//! [vars]
//! cc = "gcc"
//!
//! [rules.cc]
//! command = "$cc -c $in"
//!
//! [scopes.main]
//! rule = "cc"
//! vars = { in = "main.c" }
//! "#,
//! )?;
//!
//! let main = loaded.scope("main").unwrap();
//! assert_eq!(loaded.evaluate_binding(main, "command")?, "gcc -c main.c");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod loader;
pub mod manifest;
pub mod template;

pub use error::ManifestError;
pub use loader::{LoadedManifest, ROOT_SCOPE, load_file, load_str};
pub use manifest::{Manifest, RuleDecl, ScopeDecl};
pub use template::{TemplateError, parse_template};
