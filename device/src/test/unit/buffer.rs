use std::sync::Arc;

use tessel_dtype::ext::to_le_bytes;

use crate::{Buffer, BufferOptions, DType, DeviceSpec, Error, HostAllocator};

fn host(spec: DeviceSpec) -> Arc<HostAllocator> {
    Arc::new(HostAllocator::new(spec))
}

#[test]
fn test_lazy_allocation() {
    let buffer = Buffer::new(host(DeviceSpec::Cpu), DType::Float32, &[10], BufferOptions::default());

    assert!(!buffer.is_allocated());
    buffer.ensure_allocated().unwrap();
    assert!(buffer.is_allocated());
}

#[test]
fn test_buffer_view() {
    let buffer = Buffer::allocate(host(DeviceSpec::Cpu), DType::Float32, &[10], BufferOptions::default()).unwrap();

    let view = buffer.view(4, 16).unwrap();
    assert_eq!(view.offset(), 4);
    assert_eq!(view.size(), 16);
    assert_eq!(view.shape(), &[4]);
    assert!(view.shares_storage(&buffer));
}

#[test]
fn test_invalid_view() {
    let buffer = Buffer::allocate(host(DeviceSpec::Cpu), DType::Float32, &[10], BufferOptions::default()).unwrap();

    let result = buffer.view(36, 16);
    assert!(matches!(result, Err(Error::InvalidView { offset: 36, size: 16, buffer_size: 40 })));
}

#[test]
fn test_copyin_copyout_roundtrip() {
    let input = to_le_bytes(&[1.0f32, 2.0, 3.0]);
    let buffer = Buffer::from_bytes(host(DeviceSpec::Cpu), DType::Float32, &[3], &input).unwrap();

    assert_eq!(buffer.to_vec().unwrap(), input);
}

#[test]
fn test_copyin_size_mismatch() {
    let mut buffer = Buffer::allocate(host(DeviceSpec::Cpu), DType::Int32, &[2], BufferOptions::default()).unwrap();

    let result = buffer.copyin(&[0u8; 3]);
    assert!(matches!(result, Err(Error::SizeMismatch { expected: 8, actual: 3 })));
}

#[test]
fn test_copy_across_devices() {
    let input = to_le_bytes(&[7u64, 11, 13, 17]);
    let src = Buffer::from_bytes(host(DeviceSpec::Cpu), DType::UInt64, &[2, 2], &input).unwrap();
    let mut dst = Buffer::allocate(
        host(DeviceSpec::Cuda { device_id: 0 }),
        DType::UInt64,
        &[2, 2],
        BufferOptions::default(),
    )
    .unwrap();

    dst.copy_from(&src).unwrap();

    assert_eq!(dst.device(), &DeviceSpec::Cuda { device_id: 0 });
    assert_eq!(dst.to_vec().unwrap(), input);
    assert!(!dst.shares_storage(&src));
}

#[test]
fn test_copy_between_views_of_one_buffer() {
    let input = to_le_bytes(&[1u8, 2, 3, 4]);
    let buffer = Buffer::from_bytes(host(DeviceSpec::Cpu), DType::UInt8, &[4], &input).unwrap();
    let src = buffer.view(0, 2).unwrap();
    let mut dst = buffer.view(2, 2).unwrap();

    dst.copy_from(&src).unwrap();

    assert_eq!(buffer.to_vec().unwrap(), vec![1, 2, 1, 2]);
}

#[test]
fn test_copy_size_mismatch() {
    let src = Buffer::allocate(host(DeviceSpec::Cpu), DType::Float32, &[4], BufferOptions::default()).unwrap();
    let mut dst = Buffer::allocate(host(DeviceSpec::Cpu), DType::Float32, &[2], BufferOptions::default()).unwrap();

    assert!(matches!(dst.copy_from(&src), Err(Error::SizeMismatch { expected: 8, actual: 16 })));
}
