use thiserror::Error;

/// Both failure modes abort the parse at the point of detection; no partial
/// AST survives either one.
#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    /// An unexpected token or character for the current parse state.
    #[error("syntax error at line {line} near '{lexeme}': {message}")]
    Syntax {
        message: String,
        lexeme: String,
        line: usize,
    },

    /// A well-formed construct that violates a container invariant, raised
    /// when the owning container or argument-group list is reduced.
    #[error("structural error in '{container}': {message}")]
    Structural { container: String, message: String },
}
