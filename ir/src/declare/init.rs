//! Initializer operators: `zeros`, `ones`, `full`, `arange`, `one_hot`.
//!
//! Each takes its placement as a trailing device-string argument; the output
//! is assembled on that device without data.

use tessel_dtype::DType;

use crate::error::{ArangeLengthSnafu, AxisOutOfRangeSnafu, NegativeDimensionSnafu, Result, ZeroArangeStepSnafu};
use crate::op::{CallValues, Inferred, OpDef, OpPattern, OpRegistry};
use crate::value::{Shape, TensorValue, Value};

pub(super) fn register(registry: &mut OpRegistry) -> Result<()> {
    for (name, infer) in [
        ("zeros", infer_init as crate::op::InferFn),
        ("ones", infer_init),
        ("full", infer_full),
        ("arange", infer_arange),
        ("one_hot", infer_one_hot),
    ] {
        registry.declare(OpDef::builder().name(name).pattern(OpPattern::Injective).infer(infer).build())?;
    }
    Ok(())
}

fn tensor_out(call: &CallValues<'_>, dtype: DType, shape: &[usize], device_pos: usize) -> Result<Inferred> {
    let device = call.device_arg(device_pos)?;
    Ok(Inferred { out: Value::Tensor(TensorValue::assemble(device.clone(), dtype, shape)), device })
}

/// `zeros(shape, dtype="float", device="cpu")`, likewise `ones`.
fn infer_init(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(1, 3)?;
    let shape = call.shape_arg(0)?;
    let dtype = call.dtype_arg(1, DType::Float32)?;
    tensor_out(call, dtype, &shape, 2)
}

/// `full(fill_value, shape, dtype="int", device="cpu")`
fn infer_full(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(2, 4)?;
    call.scalar_arg(0)?;
    let shape = call.shape_arg(1)?;
    let dtype = call.dtype_arg(2, DType::Int64)?;
    tensor_out(call, dtype, &shape, 3)
}

/// `arange(start, stop, step, dtype="int", device="cpu")`
fn infer_arange(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(3, 5)?;
    let start = call.scalar_arg(0)?.as_f64();
    let stop = call.scalar_arg(1)?.as_f64();
    let step = call.scalar_arg(2)?.as_f64();
    snafu::ensure!(step != 0.0, ZeroArangeStepSnafu { start, stop });

    let steps = ((stop - start) / step).ceil();
    snafu::ensure!(steps.is_finite() && steps < isize::MAX as f64, ArangeLengthSnafu { start, stop, step });
    let len = steps.max(0.0) as usize;
    let dtype = call.dtype_arg(3, DType::Int64)?;
    tensor_out(call, dtype, &[len], 4)
}

/// `one_hot(indices, on_value, off_value, depth, axis=-1, dtype="int", device="cpu")`
fn infer_one_hot(call: &CallValues<'_>) -> Result<Inferred> {
    call.check_arity(4, 7)?;
    let indices = call.tensor_arg(0)?;
    call.scalar_arg(1)?;
    call.scalar_arg(2)?;

    let depth = call.int_arg(3)?;
    let depth = usize::try_from(depth)
        .map_err(|_| NegativeDimensionSnafu { op: call.op, position: 3usize, value: depth }.build())?;

    let axis = if call.opt_arg(4).is_some() { call.int_arg(4)? } else { -1 };
    let rank = indices.shape().len() + 1;
    let normalized = if axis < 0 { axis + rank as i64 } else { axis };
    snafu::ensure!((0..rank as i64).contains(&normalized), AxisOutOfRangeSnafu { op: call.op, axis, rank });

    let mut shape = Shape::from_slice(indices.shape());
    shape.insert(normalized as usize, depth);
    let dtype = call.dtype_arg(5, DType::Int64)?;
    tensor_out(call, dtype, &shape, 6)
}
