//! Device parsing, memory allocation and cross-device copies.
//!
//! - [`registry`] - device-string parsing and the allocator registry
//! - [`allocator`] - the [`Allocator`] seam and the host-staged allocator
//! - [`buffer`] - typed, shaped device buffers

pub mod allocator;
pub mod buffer;
pub mod error;
pub mod registry;

#[cfg(test)]
mod test;

pub use allocator::{Allocator, BufferOptions, HostAllocator, RawBuffer};
pub use buffer::Buffer;
pub use error::{Error, Result};
pub use registry::{DeviceRegistry, DeviceSpecExt, cpu, get_device, registry};

pub use tessel_dtype::{DType, DeviceKind, DeviceSpec};
