use proptest::prelude::*;

use tessel_dtype::test::proptests::generators::{device_spec, dtype_other_than};

use crate::{DType, Error, OpRegistry, TensorValue, Value};

use super::generators::*;

fn registry() -> OpRegistry {
    OpRegistry::with_builtins().unwrap()
}

proptest! {
    /// Any non-uint64 key is rejected as a type error by both operators.
    #[test]
    fn non_uint64_key_rejected(
        dtype in dtype_other_than(DType::UInt64),
        shape in arb_shape(),
        device in device_spec(),
    ) {
        let registry = registry();
        let key = Value::Tensor(TensorValue::assemble(device, dtype, &shape));

        let generate = registry.infer("threefry_generate", &[key.clone(), shape_value(&[2, 2])]).unwrap_err();
        let mismatch = matches!(generate, Error::KeyDTypeMismatch { actual, .. } if actual == dtype);
        prop_assert!(mismatch, "threefry_generate: unexpected error {}", generate);
        prop_assert!(generate.is_type_error());

        let split = registry.infer("threefry_split", &[key]).unwrap_err();
        let mismatch = matches!(split, Error::KeyDTypeMismatch { actual, .. } if actual == dtype);
        prop_assert!(mismatch, "threefry_split: unexpected error {}", split);
        prop_assert!(split.is_type_error());
    }

    /// Valid keys of any shape produce outputs placed with the key.
    #[test]
    fn generate_follows_key(key in arb_key(), out_shape in arb_shape()) {
        let inferred = registry().infer("threefry_generate", &[key.clone().into(), shape_value(&out_shape)]).unwrap();

        prop_assert_eq!(&inferred.device, key.device());
        let fields = inferred.out.as_tuple().unwrap();
        prop_assert_eq!(fields.len(), 2);

        let new_key = fields[0].as_tensor().unwrap();
        prop_assert_eq!(new_key.shape(), key.shape());
        prop_assert_eq!(new_key.dtype(), DType::UInt64);
        prop_assert_eq!(new_key.device(), key.device());

        let random = fields[1].as_tensor().unwrap();
        prop_assert_eq!(random.shape(), out_shape.as_slice());
        prop_assert_eq!(random.dtype(), DType::UInt64);
        prop_assert_eq!(random.device(), key.device());
    }

    #[test]
    fn split_mirrors_key(key in arb_key()) {
        let inferred = registry().infer("threefry_split", &[key.clone().into()]).unwrap();

        prop_assert_eq!(&inferred.device, key.device());
        let fields = inferred.out.as_tuple().unwrap();
        prop_assert_eq!(fields.len(), 2);
        for field in fields {
            prop_assert_eq!(field.as_tensor().unwrap(), &key);
        }
    }
}
