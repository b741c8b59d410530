//! Deferred strings: templates of literal text and `$variable` references

use crate::env::Env;
use crate::error::EvalError;

/// Kind of a template token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Text copied verbatim into the result
    Literal,
    /// Name of a variable resolved at evaluation time
    Reference,
}

/// One piece of an [`EvalString`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Literal text, or the referenced variable name
    pub text: String,
    /// What `text` means
    pub kind: TokenKind,
}

/// A string whose `$variable` references are expanded only when an
/// environment is supplied
///
/// Tokens are kept in concatenation order. Adjacent literal text is always
/// stored as a single token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EvalString {
    tokens: Vec<Token>,
}

impl EvalString {
    /// Creates an empty template
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends literal text, merging it into a trailing literal token
    pub fn add_text(&mut self, text: &str) {
        if let Some(last) = self.tokens.last_mut()
            && last.kind == TokenKind::Literal
        {
            last.text.push_str(text);
            return;
        }
        self.tokens.push(Token {
            text: text.to_string(),
            kind: TokenKind::Literal,
        });
    }

    /// Appends a reference to the variable `name`
    pub fn add_special(&mut self, name: &str) {
        self.tokens.push(Token {
            text: name.to_string(),
            kind: TokenKind::Reference,
        });
    }

    /// Expands the template against `env`
    ///
    /// Evaluation errors are dropped; whatever was produced before the
    /// failure is returned.
    pub fn evaluate(&self, env: &dyn Env) -> String {
        let mut out = String::new();
        if let Err(error) = self.eval_append(env, &mut out) {
            tracing::debug!(%error, template = %self.serialize(), "discarding evaluation error");
        }
        out
    }

    /// Expands the template against `env`, appending to `out`
    ///
    /// # Errors
    ///
    /// Stops at the first reference `env` fails to expand and returns its
    /// error. Text appended before that point is left in `out`.
    pub fn eval_append(&self, env: &dyn Env, out: &mut String) -> Result<(), EvalError> {
        for token in &self.tokens {
            match token.kind {
                TokenKind::Literal => out.push_str(&token.text),
                TokenKind::Reference => env.append_variable(&token.text, out)?,
            }
        }
        Ok(())
    }

    /// Debug rendering: `[text]` for literals, `[$name]` for references
    pub fn serialize(&self) -> String {
        let mut result = String::new();
        for token in &self.tokens {
            result.push('[');
            if token.kind == TokenKind::Reference {
                result.push('$');
            }
            result.push_str(&token.text);
            result.push(']');
        }
        result
    }

    /// Renders the template back into `${name}` syntax
    ///
    /// Literal text is not escaped, so a literal `$` does not survive a
    /// round trip through a template reader.
    pub fn unparse(&self) -> String {
        let mut result = String::new();
        for token in &self.tokens {
            match token.kind {
                TokenKind::Literal => result.push_str(&token.text),
                TokenKind::Reference => {
                    result.push_str("${");
                    result.push_str(&token.text);
                    result.push('}');
                }
            }
        }
        result
    }

    /// The tokens in evaluation order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether the template has no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops every token so the template can be refilled
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeTree;
    use expect_test::expect;

    fn template(parts: &[(&str, TokenKind)]) -> EvalString {
        let mut eval = EvalString::new();
        for (text, kind) in parts {
            match kind {
                TokenKind::Literal => eval.add_text(text),
                TokenKind::Reference => eval.add_special(text),
            }
        }
        eval
    }

    struct FailingEnv;

    impl Env for FailingEnv {
        fn append_variable(&self, name: &str, out: &mut String) -> Result<(), EvalError> {
            if name == "bad" {
                return Err(EvalError::variable(name, "refused"));
            }
            out.push_str(name.to_uppercase().as_str());
            Ok(())
        }
    }

    #[test]
    fn test_evaluate_mixed_tokens() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.add_binding(root, "in", "main.c");

        let eval = template(&[
            ("out: ", TokenKind::Literal),
            ("in", TokenKind::Reference),
            (".o", TokenKind::Literal),
        ]);

        assert_eq!(eval.evaluate(&tree.env(root)), "out: main.c.o");
    }

    #[test]
    fn test_literal_coalescing() {
        let mut split = EvalString::new();
        split.add_text("a");
        split.add_text("b");

        let mut joined = EvalString::new();
        joined.add_text("ab");

        assert_eq!(split, joined);
        assert_eq!(split.tokens().len(), 1);

        let tree = ScopeTree::new();
        let env = tree.env(tree.root());
        assert_eq!(split.evaluate(&env), joined.evaluate(&env));
    }

    #[test]
    fn test_reference_breaks_coalescing() {
        let eval = template(&[
            ("a", TokenKind::Literal),
            ("x", TokenKind::Reference),
            ("b", TokenKind::Literal),
            ("c", TokenKind::Literal),
        ]);
        assert_eq!(eval.tokens().len(), 3);
        assert_eq!(eval.tokens()[2].text, "bc");
    }

    #[test]
    fn test_unbound_reference_is_empty() {
        let tree = ScopeTree::new();
        let eval = template(&[
            ("[", TokenKind::Literal),
            ("nope", TokenKind::Reference),
            ("]", TokenKind::Literal),
        ]);
        assert_eq!(eval.evaluate(&tree.env(tree.root())), "[]");
    }

    #[test]
    fn test_eval_append_keeps_existing_output() {
        let eval = template(&[("x", TokenKind::Reference)]);
        let mut out = String::from("prefix-");
        assert_eq!(eval.eval_append(&FailingEnv, &mut out), Ok(()));
        assert_eq!(out, "prefix-X");
    }

    #[test]
    fn test_eval_append_stops_at_first_failure() {
        let eval = template(&[
            ("a", TokenKind::Reference),
            ("bad", TokenKind::Reference),
            ("c", TokenKind::Reference),
        ]);

        let mut out = String::new();
        let result = eval.eval_append(&FailingEnv, &mut out);

        assert_eq!(result, Err(EvalError::variable("bad", "refused")));
        assert_eq!(out, "A");
        assert_eq!(eval.evaluate(&FailingEnv), "A");
    }

    #[test]
    fn test_serialize() {
        let eval = template(&[
            ("gcc -c ", TokenKind::Literal),
            ("in", TokenKind::Reference),
            (" -o ", TokenKind::Literal),
            ("out", TokenKind::Reference),
        ]);
        expect!["[gcc -c ][$in][ -o ][$out]"].assert_eq(&eval.serialize());
        expect!["gcc -c ${in} -o ${out}"].assert_eq(&eval.unparse());
    }

    #[test]
    fn test_clear() {
        let mut eval = template(&[("x", TokenKind::Reference)]);
        assert!(!eval.is_empty());
        eval.clear();
        assert!(eval.is_empty());
        assert_eq!(eval.serialize(), "");
    }
}
