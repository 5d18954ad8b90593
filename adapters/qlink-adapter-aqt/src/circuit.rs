//! Translation of framework operations into the AQT circuit format.
//!
//! An AQT circuit is a JSON array of instructions, each of the form
//! `[gate, angle, wires]`, or `[gate, theta, phi, wires]` for the phased
//! rotation `R`:
//!
//! ```text
//! [["X", 0.5, [0]], ["MS", 0.25, [0, 1]], ["R", 0.3, 0.1, [2]]]
//! ```
//!
//! # Angle convention
//!
//! AQT angles are in units of π, so every queued angle is divided by π.
//! `MS` is pre-scaled by π first, which makes its serialized value equal to
//! the framework parameter.
//!
//! # Gate mapping
//!
//! | Framework op | AQT instruction |
//! |--------------|-----------------|
//! | `RX/RY/RZ(φ)` | `X/Y/Z` with `φ / π` |
//! | `R(θ, φ)` | `R` with `θ, φ` unchanged |
//! | `MS(θ)` | `MS` with `θ` |
//! | `BasisState(bits)` | one `X` with `1.0` per set bit |
//! | `Hadamard` | `Y` with `0.5` |
//! | `PauliX/Y/Z` | `X/Y/Z` with `1.0` |

use std::f64::consts::PI;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use qlink_hal::Operation;

use crate::error::{AqtError, AqtResult};

/// Gates the AQT gateway executes natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeGate {
    /// X-axis rotation.
    X,
    /// Y-axis rotation.
    Y,
    /// Z-axis rotation.
    Z,
    /// Phased rotation `R(θ, φ)`.
    R,
    /// Mølmer-Sørensen entangling gate.
    MS,
}

impl NativeGate {
    /// Wire name of the gate.
    pub fn as_str(self) -> &'static str {
        match self {
            NativeGate::X => "X",
            NativeGate::Y => "Y",
            NativeGate::Z => "Z",
            NativeGate::R => "R",
            NativeGate::MS => "MS",
        }
    }
}

impl std::fmt::Display for NativeGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Framework operation name → native AQT gate.
///
/// `None` marks operations the device accepts but rewrites before queueing.
pub static OPERATION_MAP: LazyLock<FxHashMap<&'static str, Option<NativeGate>>> =
    LazyLock::new(|| {
        [
            // native to both
            ("RX", Some(NativeGate::X)),
            ("RY", Some(NativeGate::Y)),
            ("RZ", Some(NativeGate::Z)),
            // rewritten into native rotations
            ("BasisState", None),
            ("PauliX", None),
            ("PauliY", None),
            ("PauliZ", None),
            ("Hadamard", None),
            // native to AQT only
            ("R", Some(NativeGate::R)),
            ("MS", Some(NativeGate::MS)),
        ]
        .into_iter()
        .collect()
    });

/// One entry of an AQT circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Single-angle gate; `angle` is in units of π.
    Rotation {
        gate: NativeGate,
        angle: f64,
        wires: Vec<usize>,
    },
    /// Phased rotation `R(θ, φ)`.
    PhasedRotation {
        theta: f64,
        phi: f64,
        wires: Vec<usize>,
    },
}

impl Instruction {
    /// The native gate of this instruction.
    pub fn gate(&self) -> NativeGate {
        match self {
            Instruction::Rotation { gate, .. } => *gate,
            Instruction::PhasedRotation { .. } => NativeGate::R,
        }
    }

    /// Wires the instruction acts on.
    pub fn wires(&self) -> &[usize] {
        match self {
            Instruction::Rotation { wires, .. } | Instruction::PhasedRotation { wires, .. } => {
                wires
            }
        }
    }
}

impl Serialize for Instruction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Instruction::Rotation { gate, angle, wires } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(gate.as_str())?;
                seq.serialize_element(angle)?;
                seq.serialize_element(wires)?;
                seq.end()
            }
            Instruction::PhasedRotation { theta, phi, wires } => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element(NativeGate::R.as_str())?;
                seq.serialize_element(theta)?;
                seq.serialize_element(phi)?;
                seq.serialize_element(wires)?;
                seq.end()
            }
        }
    }
}

/// An AQT circuit built up one framework operation at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AqtCircuit {
    instructions: Vec<Instruction>,
}

impl AqtCircuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions queued so far.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of queued instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Drop all queued instructions.
    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Serialize to the AQT JSON string.
    pub fn to_json(&self) -> AqtResult<String> {
        Ok(serde_json::to_string(&self.instructions)?)
    }

    /// Translate one framework operation and append the result.
    ///
    /// Appends nothing on error.
    pub fn push_operation(&mut self, operation: &Operation) -> AqtResult<()> {
        let name = operation.name.as_str();
        let wires = &operation.wires;

        match name {
            "R" => {
                let [theta, phi] = params::<2>(operation)?;
                self.instructions.push(Instruction::PhasedRotation {
                    theta,
                    phi,
                    wires: wires.clone(),
                });
                Ok(())
            }
            "BasisState" => {
                if operation.params.len() != wires.len() {
                    return Err(AqtError::InvalidParameters {
                        operation: name.to_string(),
                        reason: format!(
                            "{} bits for {} wires",
                            operation.params.len(),
                            wires.len()
                        ),
                    });
                }
                for (&bit, &wire) in operation.params.iter().zip(wires) {
                    if bit == 1.0 {
                        self.queue("RX", PI, vec![wire])?;
                    }
                }
                Ok(())
            }
            "Hadamard" => self.queue("RY", 0.5 * PI, wires.clone()),
            "PauliX" => self.queue("RX", PI, wires.clone()),
            "PauliY" => self.queue("RY", PI, wires.clone()),
            "PauliZ" => self.queue("RZ", PI, wires.clone()),
            "MS" => {
                let [theta] = params::<1>(operation)?;
                self.queue(name, theta * PI, wires.clone())
            }
            _ => {
                if !OPERATION_MAP.contains_key(name) {
                    return Err(AqtError::UnsupportedOperation(name.to_string()));
                }
                let [angle] = params::<1>(operation)?;
                self.queue(name, angle, wires.clone())
            }
        }
    }

    /// Append a single-angle gate, converting the angle to units of π.
    fn queue(&mut self, name: &str, angle: f64, wires: Vec<usize>) -> AqtResult<()> {
        match OPERATION_MAP.get(name) {
            Some(Some(gate)) if *gate != NativeGate::R => {
                self.instructions.push(Instruction::Rotation {
                    gate: *gate,
                    angle: angle / PI,
                    wires,
                });
                Ok(())
            }
            _ => Err(AqtError::UnsupportedOperation(name.to_string())),
        }
    }
}

/// Extract exactly `N` finite parameters from an operation.
fn params<const N: usize>(operation: &Operation) -> AqtResult<[f64; N]> {
    let params =
        <[f64; N]>::try_from(operation.params.as_slice()).map_err(|_| AqtError::InvalidParameters {
            operation: operation.name.clone(),
            reason: format!("expected {N} parameter(s), got {}", operation.params.len()),
        })?;
    // JSON has no NaN or infinity; serde_json would emit `null`.
    if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
        return Err(AqtError::InvalidParameters {
            operation: operation.name.clone(),
            reason: format!("non-finite parameter {bad}"),
        });
    }
    Ok(params)
}
