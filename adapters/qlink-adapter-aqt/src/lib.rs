//! qlink device plugin for AQT (Alpine Quantum Technologies) ion traps
//!
//! This crate translates framework gate operations into the AQT gateway's
//! JSON circuit format, submits jobs over HTTP, polls until they finish,
//! and reshapes the returned integer samples into per-wire bits.
//!
//! # Targets
//!
//! | Short name        | Path                 | Type      |
//! |-------------------|----------------------|-----------|
//! | `aqt.base_device` | *(none)*             | device    |
//! | `aqt.sim`         | `sim/`               | simulator |
//! | `aqt.noisy_sim`   | `sim/noise-model-1`  | simulator |
//!
//! Paths are appended to `https://gateway.aqt.eu/marmot`, or to
//! `AQT_BASE_URL` when set.
//!
//! # Authentication
//!
//! Pass an API key when creating the device, or set `AQT_TOKEN`:
//!
//! ```bash
//! export AQT_TOKEN="your-aqt-token"
//! ```
//!
//! # Gate Set
//!
//! | Framework op  | AQT gate | Angle sent                |
//! |---------------|----------|---------------------------|
//! | `RX`/`RY`/`RZ`| `X`/`Y`/`Z` | θ ÷ π                  |
//! | `PauliX/Y/Z`  | `X`/`Y`/`Z` | 1.0                    |
//! | `Hadamard`    | `Y`      | 0.5                       |
//! | `BasisState`  | `X`      | 1.0 per set bit           |
//! | `R`           | `R`      | θ, φ unchanged            |
//! | `MS`          | `MS`     | θ                         |
//!
//! `BasisState` is only accepted as the first operation of a circuit.
//!
//! # Example
//!
//! ```ignore
//! use qlink_adapter_aqt::AqtDevice;
//! use qlink_hal::{Device, Operation};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut device = AqtDevice::simulator(2, 100, None)?;
//!
//!     let ops = vec![
//!         Operation::fixed("Hadamard", vec![0]),
//!         Operation::new("MS", vec![0.5], vec![0, 1]),
//!     ];
//!     let samples = device.execute(&ops, &[]).await?;
//!     println!("{:?}", samples.counts().sorted());
//!
//!     Ok(())
//! }
//! ```

mod api;
mod circuit;
mod config;
mod device;
mod error;

pub use api::{
    AqtClient, HttpRequest, HttpResponse, HttpTransport, JobQuery, JobResponse, JobSubmission,
    Transport, join_path,
};
pub use circuit::{AqtCircuit, Instruction, NativeGate, OPERATION_MAP};
pub use config::{AqtConfig, BASE_HOSTNAME, BASE_URL_ENV, PollPolicy, TOKEN_ENV, resolve_api_key};
pub use device::{AqtDevice, DEFAULT_SHOTS, OBSERVABLES, Target};
pub use error::{AqtError, AqtResult};

use qlink_hal::DeviceRegistry;

/// Register every AQT target under its short name.
pub fn register_devices(registry: &mut DeviceRegistry) {
    for target in Target::ALL {
        registry.register::<AqtDevice>(target.short_name());
    }
}
