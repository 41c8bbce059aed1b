use thiserror::Error;

/// Errors raised while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected '{found}' at offset {offset} in selector '{selector}'")]
    Unexpected {
        selector: String,
        found: char,
        offset: usize,
    },

    #[error("unexpected end of selector '{0}'")]
    UnexpectedEnd(String),

    #[error("unterminated attribute selector in '{0}'")]
    UnterminatedAttribute(String),
}
