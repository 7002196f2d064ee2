/// Errors returned by the estimators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// Inputs the estimator cannot work with; the caller should show an
    /// "enter values" state instead of a figure
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EstimateError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EstimateError::InvalidInput(message.into())
    }
}
