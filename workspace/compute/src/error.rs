use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComputeError {
    /// A scenario tag that is not `ALL` and not an upper-case alphanumeric code
    #[error("Invalid scenario tag: '{0}' (expected 'ALL' or an upper-case alphanumeric code)")]
    InvalidScenarioTag(String),

    /// A scenario code that is reserved or malformed
    #[error("Invalid scenario code: '{0}' (expected an upper-case alphanumeric code, not 'ALL')")]
    InvalidScenarioCode(String),

    /// A bill interval that would make the monthly average undefined
    #[error("Invalid bill interval: {0} (must be at least 1 month)")]
    InvalidInterval(i32),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
