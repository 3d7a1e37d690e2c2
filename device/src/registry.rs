use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

pub use tessel_dtype::DeviceSpec;

use crate::allocator::{Allocator, HostAllocator};
use crate::error::{InvalidDeviceSnafu, Result};

/// Extension trait for DeviceSpec to add parsing functionality.
pub trait DeviceSpecExt {
    /// Parse a device string into a DeviceSpec.
    ///
    /// Examples:
    /// - "cpu" -> DeviceSpec::Cpu
    /// - "CUDA:1" -> DeviceSpec::Cuda { device_id: 1 }
    /// - "gpu" -> DeviceSpec::Cuda { device_id: 0 }
    fn parse(s: &str) -> Result<DeviceSpec>;
}

impl DeviceSpecExt for DeviceSpec {
    fn parse(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        let (name, ordinal) = match upper.split_once(':') {
            Some((name, ordinal)) => (name, Some(ordinal)),
            None => (upper.as_str(), None),
        };

        let device_id = match ordinal {
            None => 0,
            Some(ordinal) => ordinal.parse::<usize>().ok().ok_or_else(|| InvalidDeviceSnafu { device: s }.build())?,
        };

        match name {
            "CPU" | "LLVM" => Ok(DeviceSpec::Cpu),
            "CUDA" | "GPU" => Ok(DeviceSpec::Cuda { device_id }),
            "METAL" => Ok(DeviceSpec::Metal { device_id }),
            "WEBGPU" => Ok(DeviceSpec::WebGpu),
            _ => InvalidDeviceSnafu { device: s }.fail(),
        }
    }
}

/// Allocators keyed by device.
///
/// Allocators are created on first use; [`DeviceRegistry::register`] installs
/// a specific allocator up front.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: RwLock<HashMap<DeviceSpec, Arc<dyn Allocator>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a device allocator.
    pub fn get(&self, spec: &DeviceSpec) -> Result<Arc<dyn Allocator>> {
        // Fast path: read lock
        {
            let devices = self.devices.read();
            if let Some(allocator) = devices.get(spec) {
                return Ok(Arc::clone(allocator));
            }
        }

        let mut devices = self.devices.write();

        // Double-check after acquiring write lock
        if let Some(allocator) = devices.get(spec) {
            return Ok(Arc::clone(allocator));
        }

        let allocator = Self::create_allocator(spec);
        devices.insert(spec.clone(), Arc::clone(&allocator));
        Ok(allocator)
    }

    /// Get a device by parsing a device string.
    pub fn get_device(&self, device: &str) -> Result<Arc<dyn Allocator>> {
        let spec = <DeviceSpec as DeviceSpecExt>::parse(device)?;
        self.get(&spec)
    }

    /// Install `allocator` for its device, replacing any existing one.
    pub fn register(&self, allocator: Arc<dyn Allocator>) {
        let spec = allocator.device().clone();
        tracing::debug!(device = %spec, allocator = allocator.name(), "registering allocator");
        self.devices.write().insert(spec, allocator);
    }

    fn create_allocator(spec: &DeviceSpec) -> Arc<dyn Allocator> {
        tracing::trace!(device = %spec, "creating host-staged allocator");
        Arc::new(HostAllocator::new(spec.clone()))
    }
}

/// Global device registry instance.
static REGISTRY: Lazy<Arc<DeviceRegistry>> = Lazy::new(|| Arc::new(DeviceRegistry::new()));

/// Get the global device registry.
pub fn registry() -> Arc<DeviceRegistry> {
    Arc::clone(&REGISTRY)
}

/// Convenience function to get a device allocator by string.
pub fn get_device(device: &str) -> Result<Arc<dyn Allocator>> {
    registry().get_device(device)
}

/// Convenience function to get CPU allocator.
pub fn cpu() -> Result<Arc<dyn Allocator>> {
    registry().get(&DeviceSpec::Cpu)
}
