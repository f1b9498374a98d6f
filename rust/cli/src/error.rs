//! CLI errors and their exit-code classes.
//!
//! `BatchValidationError<T>` collects per-item failures with context; the
//! verify command uses it to report every broken record in one pass.

use std::fmt;

use stopper_engine::errors::GameError;

/// Everything a command handler can fail with. `Interrupted` exits 130, the rest 2.
#[derive(Debug)]
pub enum CliError {
    /// Reading run logs, writing output
    Io(std::io::Error),

    /// Bad flags, bet specs or run-log content
    InvalidInput(String),

    /// Unreadable or invalid config file / env values
    Config(String),

    /// A `GameError` the command cannot recover from
    Engine(String),

    /// Simulation stopped early on request
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

/// A failed item with context for reporting.
///
/// # Examples
///
/// ```rust
/// use stopper_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "net_result does not match paid - wagered".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: net_result does not match paid - wagered");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Record number, file name, ...
    pub item_context: T,
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
