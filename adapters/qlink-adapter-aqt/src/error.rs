//! Error types for the AQT adapter.

use thiserror::Error;

/// Result type for AQT operations.
pub type AqtResult<T> = Result<T, AqtError>;

/// Errors that can occur when translating circuits or talking to the AQT gateway.
#[derive(Debug, Error)]
pub enum AqtError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither an explicit API key nor `AQT_TOKEN` was provided.
    #[error("No valid api key for AQT platform found: pass one or set AQT_TOKEN")]
    MissingToken,

    /// Gateway returned a status outside 200/201/202.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// State preparation used after the first operation.
    #[error("The operation {0} is only supported at the beginning of a circuit.")]
    OperationOrdering(String),

    /// Operation has no AQT equivalent.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Operation carries the wrong parameters.
    #[error("Invalid parameters for {operation}: {reason}")]
    InvalidParameters { operation: String, reason: String },

    /// Job execution failed on the gateway.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Polling bound exceeded.
    #[error("Timeout waiting for job: {0}")]
    Timeout(String),

    /// The gateway accepted a submission but returned no job id to poll.
    #[error("Gateway returned no job id (status: {0})")]
    MissingJobId(String),

    /// A finished job came back without samples.
    #[error("Job {0} finished without samples")]
    MissingSamples(String),
}

impl From<AqtError> for qlink_hal::DeviceError {
    fn from(e: AqtError) -> Self {
        use qlink_hal::DeviceError;

        match e {
            AqtError::Http(err) => DeviceError::Network(err),
            AqtError::Json(err) => DeviceError::Serialization(err),
            AqtError::MissingToken => DeviceError::Configuration(e.to_string()),
            AqtError::ApiError { status, message } => DeviceError::Gateway {
                status,
                body: message,
            },
            AqtError::OperationOrdering(name) => DeviceError::OperationOrdering(name),
            AqtError::UnsupportedOperation(name) => DeviceError::UnsupportedOperation(name),
            AqtError::InvalidParameters { operation, reason } => {
                DeviceError::InvalidParameters { operation, reason }
            }
            AqtError::JobFailed(msg) => DeviceError::JobFailed(msg),
            AqtError::Timeout(id) => DeviceError::Timeout(id),
            AqtError::MissingJobId(_) | AqtError::MissingSamples(_) => {
                DeviceError::JobFailed(e.to_string())
            }
        }
    }
}
