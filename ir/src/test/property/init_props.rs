use proptest::prelude::*;

use tessel_dtype::test::proptests::generators::device_spec;

use crate::{DType, OpRegistry, Value};

use super::generators::*;

proptest! {
    /// Initializers place their output on the requested device with the requested shape.
    #[test]
    fn init_ops_honour_device(
        shape in arb_shape(),
        device in device_spec(),
        op in prop_oneof![Just("zeros"), Just("ones")],
    ) {
        let registry = OpRegistry::with_builtins().unwrap();
        let args = [shape_value(&shape), Value::from("float32"), Value::from(device.canonicalize())];
        let inferred = registry.infer(op, &args).unwrap();

        prop_assert_eq!(&inferred.device, &device);
        let out = inferred.out.as_tensor().unwrap();
        prop_assert_eq!(out.shape(), shape.as_slice());
        prop_assert_eq!(out.dtype(), DType::Float32);
        prop_assert_eq!(out.device(), &device);
    }

    /// `arange` length matches the number of values the range yields.
    #[test]
    fn arange_length(start in -50i64..50, stop in -50i64..50, step in prop_oneof![-7i64..=-1, 1i64..=7]) {
        let registry = OpRegistry::with_builtins().unwrap();
        let args = [start, stop, step].map(|v| Value::from(crate::ConstValue::Int(v)));
        let inferred = registry.infer("arange", &args).unwrap();

        let expected = if step > 0 {
            (start..stop).step_by(step as usize).count()
        } else {
            (stop + 1..=start).rev().step_by((-step) as usize).count()
        };
        prop_assert_eq!(inferred.out.as_tensor().unwrap().shape(), &[expected]);
    }

    /// `one_hot` inserts `depth` at the (normalized) axis of the indices shape.
    #[test]
    fn one_hot_inserts_depth(indices in arb_tensor(), depth in 0i64..8, axis_seed in 0usize..16) {
        let registry = OpRegistry::with_builtins().unwrap();
        let rank = indices.shape().len() + 1;
        let axis = (axis_seed % rank) as i64 - if axis_seed % 2 == 0 { 0 } else { rank as i64 };
        let args = [
            Value::Tensor(indices.clone()),
            Value::from(crate::ConstValue::Int(1)),
            Value::from(crate::ConstValue::Int(0)),
            Value::from(crate::ConstValue::Int(depth)),
            Value::from(crate::ConstValue::Int(axis)),
        ];
        let inferred = registry.infer("one_hot", &args).unwrap();

        let out = inferred.out.as_tensor().unwrap();
        let position = axis.rem_euclid(rank as i64) as usize;
        prop_assert_eq!(out.shape().len(), rank);
        prop_assert_eq!(out.shape()[position], depth as usize);
        prop_assert_eq!(out.dtype(), DType::Int64);
    }
}
