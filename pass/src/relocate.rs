use snafu::ResultExt;
use tessel_device::{Buffer, BufferOptions, DeviceRegistry, DeviceSpec};
use tessel_ir::TensorValue;

use crate::error::{RelocationSnafu, Result};

/// Move a constant tensor's data to `target`.
///
/// Returns `None` when the tensor already lives on a device of the target's
/// kind. Otherwise a buffer is allocated on `target` and filled from the
/// source; the copy has completed when this returns. Tensors without data are
/// re-described on `target`.
pub fn relocate(tensor: &TensorValue, target: &DeviceSpec, devices: &DeviceRegistry) -> Result<Option<TensorValue>> {
    if tensor.device().same_kind(target) {
        return Ok(None);
    }

    let Some(src) = tensor.buffer() else {
        return Ok(Some(TensorValue::assemble(target.clone(), tensor.dtype(), tensor.shape())));
    };

    tracing::debug!(
        from = %tensor.device(),
        to = %target,
        dtype = %tensor.dtype(),
        bytes = src.size(),
        "relocating constant tensor"
    );
    let allocator = devices.get(target).context(RelocationSnafu { target: target.clone() })?;
    let mut dst = Buffer::allocate(allocator, src.dtype(), src.shape(), BufferOptions::default())
        .context(RelocationSnafu { target: target.clone() })?;
    dst.copy_from(src).context(RelocationSnafu { target: target.clone() })?;

    Ok(Some(TensorValue::from_buffer(dst)))
}
