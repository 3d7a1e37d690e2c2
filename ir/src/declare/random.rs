//! Threefry counter-based RNG operators.
//!
//! Keys are `uint64` tensors. Both operators are opaque to fusion since they
//! thread RNG state.

use tessel_dtype::DType;

use crate::error::{KeyDTypeMismatchSnafu, Result};
use crate::op::{CallValues, Inferred, OpDef, OpPattern, OpRegistry};
use crate::value::{TensorValue, Value};

pub(super) fn register(registry: &mut OpRegistry) -> Result<()> {
    let ops = [("threefry_generate", infer_generate as crate::op::InferFn), ("threefry_split", infer_split)];
    for (name, infer) in ops {
        registry.declare(OpDef::builder().name(name).pattern(OpPattern::Opaque).infer(infer).build())?;
    }
    Ok(())
}

fn key_arg<'a>(call: &'a CallValues<'_>) -> Result<&'a TensorValue> {
    let key = call.tensor_arg(0)?;
    snafu::ensure!(key.dtype() == DType::UInt64, KeyDTypeMismatchSnafu { op: call.op, actual: key.dtype() });
    Ok(key)
}

/// `threefry_generate(key, shape) -> (new_key, random)`
fn infer_generate(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(2, 2)?;
    let key = key_arg(call)?;
    let shape = call.shape_arg(1)?;

    let device = key.device().clone();
    let new_key = TensorValue::assemble(device.clone(), DType::UInt64, key.shape());
    let random = TensorValue::assemble(device.clone(), DType::UInt64, &shape);
    Ok(Inferred { out: Value::Tuple(vec![new_key.into(), random.into()]), device })
}

/// `threefry_split(key) -> (new_key, new_subkey)`
fn infer_split(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(1, 1)?;
    let key = key_arg(call)?;

    let device = key.device().clone();
    let new_key = TensorValue::assemble(device.clone(), key.dtype(), key.shape());
    let new_subkey = TensorValue::assemble(device.clone(), key.dtype(), key.shape());
    Ok(Inferred { out: Value::Tuple(vec![new_key.into(), new_subkey.into()]), device })
}
