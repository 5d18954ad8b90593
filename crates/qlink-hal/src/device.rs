//! Device trait and configuration.
//!
//! The [`Device`] trait is the set of callbacks the host framework's
//! execution engine invokes on a device plugin:
//!
//! ```text
//!   reset() ──→ check_validity() ──→ apply() ──→ generate_samples()
//!   (sync)          (sync)           (async)          (sync)
//! ```
//!
//! [`Device::execute`] drives that sequence for one circuit.
//!
//! ## Method table
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `operations()` | sync | yes | `OperationSet` |
//! | `observables()` | sync | yes | `OperationSet` |
//! | `shots()` | sync | yes | `u32` |
//! | `apply()` | async | yes | `DeviceResult<()>` |
//! | `reset()` | sync | yes | `DeviceResult<()>` |
//! | `generate_samples()` | sync | yes | `DeviceResult<Samples>` |
//! | `check_validity()` | sync | provided | `DeviceResult<()>` |
//! | `execute()` | async | provided | `DeviceResult<Samples>` |

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{DeviceError, DeviceResult};
use crate::operation::Operation;
use crate::result::Samples;

/// A set of operation or observable names.
pub type OperationSet = BTreeSet<&'static str>;

/// Configuration for a device instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Short name of the device (e.g. `"aqt.sim"`).
    pub name: String,
    /// Gateway base URL override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API key.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration (`wires`, `shots`, poll settings, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceConfig {
    /// Create a new device configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API key.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from `extra`.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait implemented by device plugins.
///
/// # Contract
///
/// - `capabilities()`, `operations()` and `observables()` are static data
///   fixed at construction.
/// - `reset()` MUST be called before every new execution; it clears all
///   per-execution state.
/// - `apply()` consumes the circuit operations followed by the diagonalizing
///   rotations and leaves raw samples on the device.
/// - `generate_samples()` MUST only be called after a successful `apply()`.
#[async_trait]
pub trait Device: Send + Sync {
    /// Human-readable device name.
    fn name(&self) -> &str;

    /// Static capabilities of this device.
    fn capabilities(&self) -> &Capabilities;

    /// Names of operations the device accepts.
    fn operations(&self) -> OperationSet;

    /// Names of observables the device can measure.
    fn observables(&self) -> OperationSet;

    /// Number of wires.
    fn num_wires(&self) -> usize {
        self.capabilities().num_wires
    }

    /// Number of shots the next execution will use.
    fn shots(&self) -> u32;

    /// Translate and run `operations` followed by `rotations`.
    async fn apply(&mut self, operations: &[Operation], rotations: &[Operation])
    -> DeviceResult<()>;

    /// Restore the device to its freshly-constructed state.
    fn reset(&mut self) -> DeviceResult<()>;

    /// Samples of the last execution as a `(shot, wire)` bit matrix.
    fn generate_samples(&self) -> DeviceResult<Samples>;

    /// Whether the device accepts an operation name.
    fn supports_operation(&self, name: &str) -> bool {
        self.operations().contains(name)
    }

    /// Whether the device can measure an observable.
    fn supports_observable(&self, name: &str) -> bool {
        self.observables().contains(name)
    }

    /// Reject operations the device does not advertise.
    fn check_validity(&self, operations: &[Operation]) -> DeviceResult<()> {
        match operations.iter().find(|op| !self.supports_operation(&op.name)) {
            Some(op) => Err(DeviceError::UnsupportedOperation(op.name.clone())),
            None => Ok(()),
        }
    }

    /// Run one circuit end to end and return its samples.
    async fn execute(
        &mut self,
        operations: &[Operation],
        rotations: &[Operation],
    ) -> DeviceResult<Samples> {
        self.reset()?;
        self.check_validity(operations)?;
        self.check_validity(rotations)?;
        self.apply(operations, rotations).await?;
        self.generate_samples()
    }
}

/// Trait for creating devices from configuration.
pub trait DeviceFactory: Device + Sized {
    /// Create a device from configuration.
    fn from_config(config: DeviceConfig) -> DeviceResult<Self>;
}
