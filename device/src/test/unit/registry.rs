use std::sync::Arc;

use test_case::test_case;

use crate::{Allocator, DeviceRegistry, DeviceSpec, DeviceSpecExt, Error, HostAllocator};

#[test_case("cpu", DeviceSpec::Cpu; "cpu_lower")]
#[test_case("CPU", DeviceSpec::Cpu; "cpu_upper")]
#[test_case("llvm", DeviceSpec::Cpu; "llvm_alias")]
#[test_case("cuda", DeviceSpec::Cuda { device_id: 0 }; "cuda_default_ordinal")]
#[test_case("GPU:2", DeviceSpec::Cuda { device_id: 2 }; "gpu_alias_with_ordinal")]
#[test_case("metal:1", DeviceSpec::Metal { device_id: 1 }; "metal")]
#[test_case("webgpu", DeviceSpec::WebGpu; "webgpu")]
fn test_device_spec_parse(input: &str, expected: DeviceSpec) {
    assert_eq!(DeviceSpec::parse(input).unwrap(), expected);
}

#[test_case(""; "empty")]
#[test_case("tpu"; "unknown_kind")]
#[test_case("cuda:x"; "bad_ordinal")]
#[test_case("cuda:-1"; "negative_ordinal")]
fn test_device_spec_parse_invalid(input: &str) {
    match DeviceSpec::parse(input) {
        Err(Error::InvalidDevice { device }) => assert_eq!(device, input),
        other => panic!("expected invalid device, got {other:?}"),
    }
}

#[test]
fn test_registry_cpu() {
    let allocator = crate::cpu().unwrap();
    assert_eq!(allocator.name(), "CPU");
}

#[test]
fn test_registry_reuses_allocator() {
    let registry = DeviceRegistry::new();
    let first = registry.get_device("cuda:1").unwrap();
    let second = registry.get(&DeviceSpec::Cuda { device_id: 1 }).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_registry_register_replaces() {
    let registry = DeviceRegistry::new();
    let custom: Arc<dyn Allocator> = Arc::new(HostAllocator::with_capacity(DeviceSpec::Cpu, 8));
    registry.register(custom.clone());

    let fetched = registry.get(&DeviceSpec::Cpu).unwrap();
    assert!(Arc::ptr_eq(&fetched, &custom));
}
