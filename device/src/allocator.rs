use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::DeviceSpec;
use crate::error::{AllocationFailedSnafu, Result};

/// Opaque handle to device memory.
///
/// Every backend currently stages its memory in host RAM; the owning
/// allocator's [`DeviceSpec`] is what places the data.
#[derive(Debug)]
pub enum RawBuffer {
    Host { data: RwLock<Box<[u8]>> },
}

impl RawBuffer {
    /// Get the size of the buffer in bytes.
    pub fn size(&self) -> usize {
        match self {
            RawBuffer::Host { data } => data.read().len(),
        }
    }
}

/// Options for buffer allocation.
#[derive(Debug, Clone, Default)]
pub struct BufferOptions {
    /// Whether to zero-initialize the buffer.
    pub zero_init: bool,
}

pub trait Allocator: Send + Sync + std::fmt::Debug {
    fn alloc(&self, size: usize, options: &BufferOptions) -> Result<RawBuffer>;
    fn free(&self, _buffer: RawBuffer, _options: &BufferOptions) {}
    /// Block until all outstanding work on the device has completed.
    fn synchronize(&self) -> Result<()> {
        Ok(())
    }
    fn device(&self) -> &DeviceSpec;
    fn name(&self) -> &str;
}

/// Allocator backed by host memory, tagged with the device it stands for.
#[derive(Debug)]
pub struct HostAllocator {
    device: DeviceSpec,
    name: String,
    capacity: Option<usize>,
    in_use: AtomicUsize,
}

impl HostAllocator {
    pub fn new(device: DeviceSpec) -> Self {
        let name = device.canonicalize();
        Self { device, name, capacity: None, in_use: AtomicUsize::new(0) }
    }

    /// Allocator that refuses to hold more than `capacity` live bytes.
    pub fn with_capacity(device: DeviceSpec, capacity: usize) -> Self {
        Self { capacity: Some(capacity), ..Self::new(device) }
    }

    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }

    fn reserve(&self, size: usize) -> Result<()> {
        let Some(capacity) = self.capacity else {
            self.in_use.fetch_add(size, Ordering::AcqRel);
            return Ok(());
        };

        self.in_use
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(size).filter(|&total| total <= capacity)
            })
            .map(|_| ())
            .map_err(|used| {
                AllocationFailedSnafu { device: self.device.clone(), requested: size, available: capacity - used }
                    .build()
            })
    }
}

impl Allocator for HostAllocator {
    fn alloc(&self, size: usize, _options: &BufferOptions) -> Result<RawBuffer> {
        self.reserve(size)?;
        // Host memory is always zeroed; `zero_init` only matters for real device memory.
        let data = vec![0u8; size].into_boxed_slice();
        Ok(RawBuffer::Host { data: RwLock::new(data) })
    }

    fn free(&self, buffer: RawBuffer, _options: &BufferOptions) {
        self.in_use.fetch_sub(buffer.size(), Ordering::AcqRel);
    }

    fn device(&self) -> &DeviceSpec {
        &self.device
    }

    fn name(&self) -> &str {
        &self.name
    }
}
