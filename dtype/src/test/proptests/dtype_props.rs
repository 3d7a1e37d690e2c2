use std::str::FromStr;

use proptest::prelude::*;

use super::generators::{any_dtype, device_spec};
use crate::DType;

proptest! {
    #[test]
    fn name_parses_back(dtype in any_dtype()) {
        prop_assert_eq!(DType::from_str(dtype.name()).unwrap(), dtype);
    }

    #[test]
    fn bits_match_bytes(dtype in any_dtype()) {
        prop_assume!(!dtype.is_bool());
        prop_assert_eq!(dtype.bits(), dtype.bytes() * 8);
    }

    #[test]
    fn kind_ignores_index(spec in device_spec()) {
        let other = match &spec {
            crate::DeviceSpec::Cuda { device_id } => crate::DeviceSpec::Cuda { device_id: device_id + 1 },
            crate::DeviceSpec::Metal { device_id } => crate::DeviceSpec::Metal { device_id: device_id + 1 },
            other => other.clone(),
        };
        prop_assert!(spec.same_kind(&other));
    }
}
