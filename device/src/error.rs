use snafu::Snafu;

use crate::DeviceSpec;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("size mismatch: expected {expected}, got {actual}"))]
    SizeMismatch { expected: usize, actual: usize },

    /// Device string could not be parsed.
    #[snafu(display("invalid device: {device}"))]
    InvalidDevice { device: String },

    /// Allocator ran out of capacity.
    #[snafu(display("allocation of {requested} bytes on {device} failed: {available} bytes available"))]
    AllocationFailed { device: DeviceSpec, requested: usize, available: usize },

    /// Buffer is not allocated.
    #[snafu(display("buffer not allocated"))]
    NotAllocated,

    /// Invalid buffer view parameters.
    #[snafu(display("invalid view: offset {offset} + size {size} exceeds buffer size {buffer_size}"))]
    InvalidView { offset: usize, size: usize, buffer_size: usize },
}
