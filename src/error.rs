//! Error types for the payroll engine.
//!
//! Every fallible operation returns [`EngineError`]. Validation failures
//! carry the offending field (and employee, where there is one) so callers
//! can render a useful message without inspecting engine internals.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::ConfigurationMissing {
///     tenant_id: "acme".to_string(),
///     field: "prima_percentage".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Payroll configuration for tenant 'acme' is missing 'prima_percentage'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No configuration snapshot exists for the tenant, or a required rate is absent.
    #[error("Payroll configuration for tenant '{tenant_id}' is missing '{field}'")]
    ConfigurationMissing {
        /// The tenant whose configuration was requested.
        tenant_id: String,
        /// The missing field, or `configuration` when the whole snapshot is absent.
        field: String,
    },

    /// A configuration value is present but out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee '{employee_id}' field '{field}': {message}")]
    InvalidEmployee {
        /// The employee the record belongs to.
        employee_id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Period boundaries or the derived proration factor were invalid.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// Returns true for malformed or out-of-range input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConfiguration { .. }
                | EngineError::InvalidEmployee { .. }
                | EngineError::InvalidPeriod { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
