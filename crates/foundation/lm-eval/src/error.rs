//! Error types for variable evaluation

/// Failure raised while appending a variable's value
///
/// The scope tree never produces this itself: unresolved variables expand to
/// the empty string. Custom [`Env`](crate::Env) implementations use it to stop
/// an evaluation, and it travels unchanged through
/// [`EvalString::eval_append`](crate::EvalString::eval_append).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An environment refused to produce a value for a variable
    #[error("cannot evaluate `${name}`: {reason}")]
    Variable {
        /// The variable being expanded
        name: String,
        /// Why the environment gave up
        reason: String,
    },
}

impl EvalError {
    /// Creates a [`EvalError::Variable`] for `name`
    pub fn variable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
