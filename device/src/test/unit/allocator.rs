use std::sync::Arc;

use crate::{Allocator, Buffer, BufferOptions, DType, DeviceSpec, Error, HostAllocator};

#[test]
fn test_host_allocator_reports_device() {
    let allocator = HostAllocator::new(DeviceSpec::Metal { device_id: 1 });
    assert_eq!(allocator.device(), &DeviceSpec::Metal { device_id: 1 });
    assert_eq!(allocator.name(), "METAL:1");
}

#[test]
fn test_capacity_exhausted() {
    let allocator = Arc::new(HostAllocator::with_capacity(DeviceSpec::Cuda { device_id: 0 }, 16));

    let _first = Buffer::allocate(allocator.clone(), DType::Float32, &[4], BufferOptions::default()).unwrap();
    let second = Buffer::allocate(allocator.clone(), DType::Float32, &[1], BufferOptions::default());

    match second {
        Err(Error::AllocationFailed { requested, available, .. }) => {
            assert_eq!(requested, 4);
            assert_eq!(available, 0);
        }
        other => panic!("expected allocation failure, got {other:?}"),
    }
}

#[test]
fn test_capacity_released_on_drop() {
    let allocator = Arc::new(HostAllocator::with_capacity(DeviceSpec::Cpu, 16));

    {
        let _buffer = Buffer::allocate(allocator.clone(), DType::Int64, &[2], BufferOptions::default()).unwrap();
        assert_eq!(allocator.in_use(), 16);
    }

    assert_eq!(allocator.in_use(), 0);
    Buffer::allocate(allocator, DType::Int64, &[2], BufferOptions::default()).unwrap();
}
