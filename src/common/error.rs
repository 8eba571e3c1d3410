//! Error types for motion-planner

use std::fmt;

/// Fatal configuration errors raised by the planners.
///
/// Planning failure (no path within the sample budget) is not an error;
/// `solve` reports it through its boolean result.
#[derive(Debug)]
pub enum PlannerError {
    /// A configuration value is out of its allowed range
    InvalidParameter(String),
    /// A state or space dimension is unusable for the requested operation
    InvalidDimension(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            PlannerError::InvalidDimension(msg) => write!(f, "Invalid dimension: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::InvalidParameter("goal sampling rate must be in [0, 1]".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid parameter: goal sampling rate must be in [0, 1]"
        );

        let err = PlannerError::InvalidDimension("state dimension must be at least 2".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid dimension: state dimension must be at least 2"
        );
    }
}
