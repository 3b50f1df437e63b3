use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// The engine itself never errors — invalid interactions are guarded
/// no-ops — so these cover the binary's fallible edges only.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal or file handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A structure file that is not a JSON object tree.
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}
