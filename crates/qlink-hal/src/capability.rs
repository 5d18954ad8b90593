//! Device capability introspection.
//!
//! [`Capabilities`] is static, declarative data describing a device: its
//! model, its wire count, and the framework features it supports. It is
//! built once at construction and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Computational model of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceModel {
    /// Qubit-based device.
    Qubit,
}

impl std::fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceModel::Qubit => write!(f, "qubit"),
        }
    }
}

/// Capabilities advertised by a device to the host framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Human-readable device name.
    pub name: String,
    /// Short name the framework uses to load the device (e.g. `"aqt.sim"`).
    pub short_name: String,
    /// Computational model.
    pub model: DeviceModel,
    /// Number of wires the device was initialized with.
    pub num_wires: usize,
    /// Whether tensor-product observables are supported.
    pub tensor_observables: bool,
    /// Whether inverse operations are supported.
    pub inverse_operations: bool,
    /// Whether the device computes exact expectation values (always `false`
    /// for sampling hardware).
    pub analytic: bool,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Capabilities for a sampling qubit device.
    pub fn qubit(name: impl Into<String>, short_name: impl Into<String>, num_wires: usize) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            model: DeviceModel::Qubit,
            num_wires,
            tensor_observables: true,
            inverse_operations: true,
            analytic: false,
            is_simulator: false,
        }
    }

    /// Mark the device as a simulator.
    pub fn with_simulator(mut self, is_simulator: bool) -> Self {
        self.is_simulator = is_simulator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_capabilities() {
        let caps = Capabilities::qubit("AQT Device", "aqt.base_device", 3);
        assert_eq!(caps.model, DeviceModel::Qubit);
        assert!(caps.tensor_observables);
        assert!(caps.inverse_operations);
        assert!(!caps.analytic);
        assert!(!caps.is_simulator);
        assert_eq!(caps.num_wires, 3);
    }

    #[test]
    fn test_model_serializes_lowercase() {
        let json = serde_json::to_string(&DeviceModel::Qubit).unwrap();
        assert_eq!(json, r#""qubit""#);
    }
}
