//! Strategies for shapes, keys and argument values.

use proptest::prelude::*;

use tessel_dtype::test::proptests::generators::{any_dtype, device_spec};

use crate::{DType, Shape, TensorValue, Value};

/// Shapes of rank 0..=4 with small dimensions (zero included).
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(0usize..6, 0..=4).prop_map(Shape::from_vec)
}

/// Data-less tensor of arbitrary dtype, shape and placement.
pub fn arb_tensor() -> impl Strategy<Value = TensorValue> {
    (device_spec(), any_dtype(), arb_shape())
        .prop_map(|(device, dtype, shape)| TensorValue::assemble(device, dtype, &shape))
}

/// Valid threefry key.
pub fn arb_key() -> impl Strategy<Value = TensorValue> {
    (device_spec(), arb_shape()).prop_map(|(device, shape)| TensorValue::assemble(device, DType::UInt64, &shape))
}

/// Shape as it appears in a call: a tuple of integer scalars.
pub fn shape_value(shape: &[usize]) -> Value {
    Value::ints(shape.iter().map(|&d| d as i64))
}
