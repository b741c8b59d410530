//! Rich error reporting for manifest loading
//!
//! Note: These struct fields are used by miette's `#[derive(Diagnostic)]` macro
//! for rich error output.

#![allow(
    unused_assignments,
    reason = "fields are read through the miette derive expansion"
)]

use crate::template::TemplateError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Manifest error with rich diagnostic information
#[derive(Error, Debug, Diagnostic)]
pub enum ManifestError {
    /// The file is not valid TOML or does not match the manifest layout
    #[error("invalid manifest: {message}")]
    #[diagnostic(code(manifest::syntax))]
    Syntax {
        /// Decoder message
        message: String,
        /// Where the decoder stopped, when it knows
        #[label("here")]
        span: Option<SourceSpan>,
        /// Manifest text for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// A template value contains a malformed `$` sequence
    #[error("invalid template in `{location}`")]
    #[diagnostic(
        code(manifest::template),
        help("write a literal `$` as `$$`")
    )]
    Template {
        /// Dotted path of the offending value, e.g. `rules.cc.command`
        location: String,
        /// What is wrong with the template
        #[source]
        reason: TemplateError,
        /// Location inside the template
        #[label("{reason}")]
        span: SourceSpan,
        /// The template text for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// A scope names a parent that is not declared before it
    #[error("scope `{scope}` names unknown parent `{parent}`")]
    #[diagnostic(
        code(manifest::unknown_parent),
        help("parent scopes must be declared before their children")
    )]
    UnknownParent {
        /// The scope being declared
        scope: String,
        /// The missing parent
        parent: String,
    },

    /// A scope evaluates against a rule that is not visible from it
    #[error("scope `{scope}` uses unknown rule `{rule}`")]
    #[diagnostic(code(manifest::unknown_rule))]
    UnknownRule {
        /// The scope being declared
        scope: String,
        /// The missing rule
        rule: String,
    },

    /// A declared scope uses the name of the global scope
    #[error("scope name `{name}` is reserved for the global scope")]
    #[diagnostic(code(manifest::reserved_scope))]
    ReservedScope {
        /// The rejected name
        name: String,
    },

    /// The manifest file could not be read
    #[error("failed to read `{}`", .path.display())]
    #[diagnostic(code(manifest::io_error))]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Wrap a template error found in the value at `location`
    pub fn template(location: impl Into<String>, text: &str, reason: TemplateError) -> Self {
        let location = location.into();
        Self::Template {
            span: reason.span(),
            src: NamedSource::new(location.clone(), text.to_string()),
            location,
            reason,
        }
    }

    /// Wrap a TOML decoding error for the manifest `name`
    pub fn syntax(name: impl AsRef<str>, source: &str, error: &toml::de::Error) -> Self {
        Self::Syntax {
            message: error.message().to_string(),
            span: error.span().map(SourceSpan::from),
            src: NamedSource::new(name, source.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_points_into_value() {
        let text = "gcc $";
        let err = ManifestError::template(
            "rules.cc.command",
            text,
            TemplateError::BadEscape { offset: 4 },
        );

        assert_eq!(err.to_string(), "invalid template in `rules.cc.command`");
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert!(err.source_code().is_some());
    }

    #[test]
    fn test_syntax_error_code() {
        let source = "[vars\n";
        let decode = toml::from_str::<toml::Table>(source).unwrap_err();
        let err = ManifestError::syntax("loom.toml", source, &decode);

        assert!(err.to_string().starts_with("invalid manifest: "));
        assert_eq!(
            err.code().map(|code| code.to_string()),
            Some("manifest::syntax".to_string())
        );
    }
}
