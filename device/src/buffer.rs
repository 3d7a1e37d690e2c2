use std::sync::{Arc, OnceLock};

use smallvec::{SmallVec, smallvec};
use tessel_dtype::{DType, DeviceSpec};

use crate::allocator::{Allocator, BufferOptions, RawBuffer};
use crate::error::{InvalidViewSnafu, NotAllocatedSnafu, Result, SizeMismatchSnafu};

/// Shared buffer data that can be referenced by multiple views.
#[derive(Debug)]
struct BufferData {
    /// Lazily-initialized raw buffer (lock-free after first allocation).
    raw: OnceLock<RawBuffer>,
    allocator: Arc<dyn Allocator>,
    /// Total size of the underlying allocation in bytes.
    total_size: usize,
    options: BufferOptions,
}

impl BufferData {
    fn new(allocator: Arc<dyn Allocator>, size: usize, options: BufferOptions) -> Self {
        Self { raw: OnceLock::new(), allocator, total_size: size, options }
    }

    fn ensure_allocated(&self) -> Result<()> {
        if self.raw.get().is_some() {
            return Ok(());
        }

        let raw = self.allocator.alloc(self.total_size, &self.options)?;

        // Another thread won the race, give our allocation back.
        if let Err(raw) = self.raw.set(raw) {
            self.allocator.free(raw, &self.options);
        }

        Ok(())
    }

    fn is_allocated(&self) -> bool {
        self.raw.get().is_some()
    }

    fn raw(&self) -> Result<&RawBuffer> {
        self.raw.get().ok_or_else(|| NotAllocatedSnafu.build())
    }
}

impl Drop for BufferData {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            self.allocator.free(raw, &self.options);
        }
    }
}

/// A device buffer that may be a view into another buffer.
///
/// Clones share storage; use [`Buffer::copy_from`] to move bytes between
/// buffers, including across devices.
#[derive(Debug, Clone)]
pub struct Buffer {
    data: Arc<BufferData>,
    /// Offset into the base buffer (in bytes).
    offset: usize,
    /// Size of this view (in bytes).
    size: usize,
    dtype: DType,
    shape: SmallVec<[usize; 4]>,
}

impl Buffer {
    /// Create a new buffer with lazy allocation.
    pub fn new(allocator: Arc<dyn Allocator>, dtype: DType, shape: &[usize], options: BufferOptions) -> Self {
        let size = dtype.bytes() * shape.iter().product::<usize>();
        Self {
            data: Arc::new(BufferData::new(allocator, size, options)),
            offset: 0,
            size,
            dtype,
            shape: SmallVec::from_slice(shape),
        }
    }

    /// Create a new buffer with immediate allocation.
    pub fn allocate(
        allocator: Arc<dyn Allocator>,
        dtype: DType,
        shape: &[usize],
        options: BufferOptions,
    ) -> Result<Self> {
        let buffer = Self::new(allocator, dtype, shape, options);
        buffer.ensure_allocated()?;
        Ok(buffer)
    }

    /// Allocate a buffer and fill it from host bytes.
    pub fn from_bytes(allocator: Arc<dyn Allocator>, dtype: DType, shape: &[usize], bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::allocate(allocator, dtype, shape, BufferOptions::default())?;
        buffer.copyin(bytes)?;
        Ok(buffer)
    }

    /// Create a flat view into this buffer.
    pub fn view(&self, offset: usize, size: usize) -> Result<Self> {
        if offset + size > self.size {
            return InvalidViewSnafu { offset, size, buffer_size: self.size }.fail();
        }

        Ok(Self {
            data: Arc::clone(&self.data),
            offset: self.offset + offset,
            size,
            dtype: self.dtype,
            shape: smallvec![size / self.dtype.bytes()],
        })
    }

    pub fn ensure_allocated(&self) -> Result<()> {
        self.data.ensure_allocated()
    }

    pub fn is_allocated(&self) -> bool {
        self.data.is_allocated()
    }

    /// Size of this view in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Device the storage lives on.
    pub fn device(&self) -> &DeviceSpec {
        self.data.allocator.device()
    }

    pub fn allocator(&self) -> &dyn Allocator {
        &*self.data.allocator
    }

    /// Whether both buffers point at the same allocation.
    pub fn shares_storage(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Copy data from host memory into this buffer.
    pub fn copyin(&mut self, src: &[u8]) -> Result<()> {
        self.ensure_allocated()?;

        let expected = self.size;
        let actual = src.len();
        snafu::ensure!(expected == actual, SizeMismatchSnafu { expected, actual });

        match self.data.raw()? {
            RawBuffer::Host { data } => {
                data.write()[self.offset..self.offset + self.size].copy_from_slice(src);
                Ok(())
            }
        }
    }

    /// Copy data from this buffer to host memory.
    pub fn copyout(&self, dst: &mut [u8]) -> Result<()> {
        self.ensure_allocated()?;

        let expected = self.size;
        let actual = dst.len();
        snafu::ensure!(expected == actual, SizeMismatchSnafu { expected, actual });

        self.synchronize()?;
        match self.data.raw()? {
            RawBuffer::Host { data } => {
                dst.copy_from_slice(&data.read()[self.offset..self.offset + self.size]);
                Ok(())
            }
        }
    }

    /// Host copy of this view's bytes.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.size];
        self.copyout(&mut out)?;
        Ok(out)
    }

    /// Copy data from another buffer, possibly on another device.
    ///
    /// Returns once the copy has completed on both sides.
    pub fn copy_from(&mut self, src: &Buffer) -> Result<()> {
        self.ensure_allocated()?;
        src.ensure_allocated()?;

        let expected = self.size;
        let actual = src.size;
        snafu::ensure!(expected == actual, SizeMismatchSnafu { expected, actual });

        src.synchronize()?;

        // Views of one allocation: read into a staging copy first so the two
        // lock guards never overlap.
        if self.shares_storage(src) {
            let staged = src.to_vec()?;
            return self.copyin(&staged);
        }

        match (self.data.raw()?, src.data.raw()?) {
            (RawBuffer::Host { data: dst_data }, RawBuffer::Host { data: src_data }) => {
                let mut dst_mut = dst_data.write();
                let src_ref = src_data.read();
                dst_mut[self.offset..self.offset + self.size]
                    .copy_from_slice(&src_ref[src.offset..src.offset + src.size]);
            }
        }

        self.synchronize()
    }

    /// Synchronize the device (wait for all operations to complete).
    pub fn synchronize(&self) -> Result<()> {
        self.data.allocator.synchronize()
    }
}
