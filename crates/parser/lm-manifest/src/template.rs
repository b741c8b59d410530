//! Reader for `$variable` template text
//!
//! | Input     | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `$name`   | reference, name is `[A-Za-z0-9_-]+`       |
//! | `${name}` | reference, name may also contain `.`      |
//! | `$$`      | literal `$`                               |
//! | `$ `      | literal space                             |
//! | `$:`      | literal `:`                               |
//! | `$` + EOL | line continuation, leading spaces dropped |

use lm_eval::EvalString;
use miette::SourceSpan;

/// Why a template could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// `$` followed by something that is not an escape or a name
    #[error("bad $-escape (literal $ must be written as $$)")]
    BadEscape {
        /// Byte offset of the `$`
        offset: usize,
    },

    /// `${` without a closing brace
    #[error("unterminated `${{` reference")]
    Unterminated {
        /// Byte offset of the `$`
        offset: usize,
    },

    /// `${}` or a braced name with characters outside `[A-Za-z0-9_.-]`
    #[error("invalid variable name in `${{...}}`")]
    BadBracedName {
        /// Byte offset of the `$`
        offset: usize,
        /// Length of the offending reference
        len: usize,
    },
}

impl TemplateError {
    /// Location of the error inside the template text
    pub fn span(&self) -> SourceSpan {
        match *self {
            Self::BadEscape { offset } => (offset, 1).into(),
            Self::Unterminated { offset } => (offset, 2).into(),
            Self::BadBracedName { offset, len } => (offset, len).into(),
        }
    }
}

fn is_simple_var_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

fn is_var_char(byte: u8) -> bool {
    is_simple_var_char(byte) || byte == b'.'
}

/// Parse `input` into an [`EvalString`]
///
/// # Errors
///
/// Returns a [`TemplateError`] pointing at the first malformed `$` sequence.
pub fn parse_template(input: &str) -> Result<EvalString, TemplateError> {
    let bytes = input.as_bytes();
    let mut eval = EvalString::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'$' {
            pos += 1;
            continue;
        }

        if literal_start < pos {
            eval.add_text(&input[literal_start..pos]);
        }
        let dollar = pos;
        pos += 1;

        match bytes.get(pos).copied() {
            Some(b'$' | b' ' | b':') => {
                eval.add_text(&input[pos..=pos]);
                pos += 1;
            }
            Some(b'\n') => {
                pos += 1;
                while bytes.get(pos) == Some(&b' ') {
                    pos += 1;
                }
            }
            Some(b'\r') if bytes.get(pos + 1) == Some(&b'\n') => {
                pos += 2;
                while bytes.get(pos) == Some(&b' ') {
                    pos += 1;
                }
            }
            Some(b'{') => {
                let name_start = pos + 1;
                let close = input[name_start..]
                    .find('}')
                    .map(|idx| name_start + idx)
                    .ok_or(TemplateError::Unterminated { offset: dollar })?;
                let name = &input[name_start..close];
                if name.is_empty() || !name.bytes().all(is_var_char) {
                    return Err(TemplateError::BadBracedName {
                        offset: dollar,
                        len: close + 1 - dollar,
                    });
                }
                eval.add_special(name);
                pos = close + 1;
            }
            Some(byte) if is_simple_var_char(byte) => {
                let name_start = pos;
                while bytes.get(pos).copied().is_some_and(is_simple_var_char) {
                    pos += 1;
                }
                eval.add_special(&input[name_start..pos]);
            }
            _ => return Err(TemplateError::BadEscape { offset: dollar }),
        }
        literal_start = pos;
    }

    if literal_start < bytes.len() {
        eval.add_text(&input[literal_start..]);
    }
    Ok(eval)
}
