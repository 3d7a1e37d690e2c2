//! IR passes for the Tessel compiler.
//!
//! - [`assign_device`] - moves device-producing calls and constant data to a target device
//! - [`normalize`] - per-operator argument layouts used when moving calls
//! - [`relocate`] - cross-device copies of constant tensors
//! - [`pipeline`] - the [`Pass`] trait and [`Sequential`] pipelines
//! - [`config`] - pass configuration

pub mod assign_device;
pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod relocate;

#[cfg(test)]
mod test;

pub use assign_device::{AssignDevice, assign_device};
pub use config::AssignDeviceConfig;
pub use error::{Error, ErrorKind, Result};
pub use normalize::{DefaultArg, DeviceOpKind, NormalizerTable, Signature};
pub use pipeline::{Pass, Sequential};
