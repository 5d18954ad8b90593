//! Framework-side gate operations.
//!
//! An [`Operation`] is what the host framework hands to a device: a gate name,
//! its numeric parameters, and the wires it acts on. Devices never mutate
//! operations; they translate them into their own circuit format.

use serde::{Deserialize, Serialize};

/// Operation names that prepare a state and are only valid as the first
/// operation of a circuit.
pub const STATE_PREPARATION_OPS: [&str; 2] = ["BasisState", "QubitStateVector"];

/// A named quantum gate with parameters and target wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Framework gate name (e.g. `"RX"`, `"Hadamard"`, `"BasisState"`).
    pub name: String,
    /// Numeric parameters in framework units (radians for rotations,
    /// one 0/1 entry per wire for `BasisState`).
    #[serde(default)]
    pub params: Vec<f64>,
    /// Target wire indices.
    pub wires: Vec<usize>,
}

impl Operation {
    /// Create an operation.
    pub fn new(name: impl Into<String>, params: Vec<f64>, wires: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            params,
            wires,
        }
    }

    /// Create a parameterless operation.
    pub fn fixed(name: impl Into<String>, wires: Vec<usize>) -> Self {
        Self::new(name, Vec::new(), wires)
    }

    /// Create a `BasisState` preparation from a bit string.
    pub fn basis_state(bits: &[u8], wires: Vec<usize>) -> Self {
        let params = bits.iter().map(|&b| f64::from(b)).collect();
        Self::new("BasisState", params, wires)
    }

    /// Number of parameters.
    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    /// Whether this operation prepares a state.
    pub fn is_state_preparation(&self) -> bool {
        STATE_PREPARATION_OPS.contains(&self.name.as_str())
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
            write!(f, "({})", params.join(", "))?;
        }
        write!(f, " wires={:?}", self.wires)
    }
}
