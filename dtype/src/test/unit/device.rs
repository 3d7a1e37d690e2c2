use crate::{DeviceKind, DeviceSpec};

#[test]
fn test_kind_and_index() {
    let spec = DeviceSpec::Cuda { device_id: 3 };
    assert_eq!(spec.kind(), DeviceKind::Cuda);
    assert_eq!(spec.index(), 3);
    assert_eq!(DeviceSpec::Cpu.index(), 0);
}

#[test]
fn test_same_kind_ignores_index() {
    assert!(DeviceSpec::Cuda { device_id: 0 }.same_kind(&DeviceSpec::Cuda { device_id: 1 }));
    assert!(!DeviceSpec::Cpu.same_kind(&DeviceSpec::Cuda { device_id: 0 }));
    assert_ne!(DeviceSpec::Cuda { device_id: 0 }, DeviceSpec::Cuda { device_id: 1 });
}

#[test]
fn test_canonicalize() {
    assert_eq!(DeviceSpec::Cpu.canonicalize(), "CPU");
    assert_eq!(DeviceSpec::Cuda { device_id: 1 }.canonicalize(), "CUDA:1");
    assert_eq!(DeviceKind::WebGpu.to_string(), "WebGPU");
}
