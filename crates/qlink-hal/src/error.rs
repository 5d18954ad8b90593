//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while executing operations on a device.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// Device configuration is missing or invalid (e.g. no API key).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A state-preparation operation appeared after the start of the circuit.
    #[error("The operation {0} is only supported at the beginning of a circuit.")]
    OperationOrdering(String),

    /// The device has no mapping for this operation.
    #[error("Gate {0} not supported on device")]
    UnsupportedOperation(String),

    /// The operation carries the wrong number or kind of parameters.
    #[error("Invalid parameters for {operation}: {reason}")]
    InvalidParameters {
        /// Name of the offending operation.
        operation: String,
        /// What is wrong with the parameters.
        reason: String,
    },

    /// The remote gateway answered with a non-success HTTP status.
    #[error("Gateway error ({status}): {body}")]
    Gateway {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the gateway.
        body: String,
    },

    /// Network error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote job reported a failure.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Polling exceeded its configured bound.
    #[error("Timeout waiting for job {0}")]
    Timeout(String),

    /// `generate_samples` was called before any samples were fetched.
    #[error("No samples available: run the circuit first")]
    NoSamples,

    /// A raw sample does not fit in the device's wire count.
    #[error("Sample {sample} does not fit in {num_wires} wires")]
    InvalidSample {
        /// The raw sample value.
        sample: u64,
        /// Number of wires on the device.
        num_wires: usize,
    },

    /// No device registered under the requested name.
    #[error("Unknown device: {0}")]
    UnknownDevice(String),
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
