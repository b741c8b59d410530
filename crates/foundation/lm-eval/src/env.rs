//! The evaluation environment seam

use crate::error::EvalError;

/// Something that can expand `$name` references
///
/// [`ScopeEnv`](crate::ScopeEnv) is the implementation backed by the scope
/// tree. Build edges wrap it to add their own variables (`$in`, `$out`) and
/// pass themselves to [`EvalString::eval_append`](crate::EvalString::eval_append).
pub trait Env {
    /// Appends the value of `name` to `out`
    ///
    /// An unknown variable appends nothing and succeeds.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] when the environment cannot produce the value.
    /// Anything already appended to `out` stays there.
    fn append_variable(&self, name: &str, out: &mut String) -> Result<(), EvalError>;

    /// Returns the value of `name`, or the empty string when it is unbound
    fn lookup_variable(&self, name: &str) -> String {
        let mut out = String::new();
        if let Err(error) = self.append_variable(name, &mut out) {
            tracing::debug!(%error, variable = name, "discarding evaluation error in lookup");
        }
        out
    }
}
