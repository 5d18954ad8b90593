//! qlink Hardware Abstraction Layer
//!
//! This crate defines the contract between a quantum programming framework
//! and the device plugins that execute its circuits on remote hardware.
//!
//! # Overview
//!
//! - [`Operation`]: a framework gate (name, parameters, wires)
//! - [`Device`]: the callbacks the framework invokes on a plugin
//!   (`operations`, `observables`, `apply`, `reset`, `generate_samples`)
//! - [`Capabilities`]: static description of what a device supports
//! - [`Samples`] and [`Counts`]: measurement results
//! - [`DeviceRegistry`]: lookup of devices by short name
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qlink_hal::{Device, Operation};
//! use qlink_adapter_aqt::AqtDevice;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut device = AqtDevice::simulator(2, 200, None)?;
//!
//!     let ops = vec![
//!         Operation::fixed("Hadamard", vec![0]),
//!         Operation::new("MS", vec![0.5], vec![0, 1]),
//!     ];
//!     let samples = device.execute(&ops, &[]).await?;
//!
//!     if let Some((bitstring, count)) = samples.counts().most_frequent() {
//!         println!("Most frequent: {} ({} times)", bitstring, count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod capability;
pub mod device;
pub mod error;
pub mod job;
pub mod operation;
pub mod registry;
pub mod result;

pub use capability::{Capabilities, DeviceModel};
pub use device::{Device, DeviceConfig, DeviceFactory, OperationSet};
pub use error::{DeviceError, DeviceResult};
pub use job::{Job, JobId, JobStatus};
pub use operation::{Operation, STATE_PREPARATION_OPS};
pub use registry::DeviceRegistry;
pub use result::{Counts, Samples};
