//! Built-in operator declarations and the argument readers they share.
//!
//! - [`init`] - tensor initializers whose placement is an explicit argument
//! - [`random`] - threefry counter-based RNG

use snafu::ResultExt;
use tessel_device::{DeviceSpec, DeviceSpecExt};
use tessel_dtype::DType;

use crate::error::{
    ArgTypeSnafu, DeviceSnafu, InvalidDTypeSnafu, NegativeDimensionSnafu, Result, TooFewArgsSnafu, TooManyArgsSnafu,
};
use crate::op::{CallValues, OpRegistry};
use crate::value::{Shape, TensorValue, Value};
use crate::ConstValue;

pub mod init;
pub mod random;

/// Device of a call that leaves its device argument out.
pub const DEFAULT_DEVICE: DeviceSpec = DeviceSpec::Cpu;

/// Declare every built-in operator into `registry`.
pub fn register_builtins(registry: &mut OpRegistry) -> Result<()> {
    init::register(registry)?;
    random::register(registry)?;
    Ok(())
}

impl CallValues<'_> {
    /// Fail unless `required <= args.len() <= max`.
    pub fn check_arity(&self, required: usize, max: usize) -> Result<()> {
        let actual = self.args.len();
        snafu::ensure!(actual >= required, TooFewArgsSnafu { op: self.op, expected: required, actual });
        snafu::ensure!(actual <= max, TooManyArgsSnafu { op: self.op, max, actual });
        Ok(())
    }

    pub fn arg(&self, position: usize) -> Result<&Value> {
        self.args.get(position).ok_or_else(|| {
            TooFewArgsSnafu { op: self.op, expected: position + 1, actual: self.args.len() }.build()
        })
    }

    pub fn opt_arg(&self, position: usize) -> Option<&Value> {
        self.args.get(position)
    }

    pub fn tensor_arg(&self, position: usize) -> Result<&TensorValue> {
        self.arg(position)?
            .as_tensor()
            .ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "a tensor" }.build())
    }

    pub fn scalar_arg(&self, position: usize) -> Result<ConstValue> {
        self.arg(position)?
            .as_scalar()
            .ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "a scalar" }.build())
    }

    pub fn int_arg(&self, position: usize) -> Result<i64> {
        self.scalar_arg(position)?
            .as_i64()
            .ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "an integer" }.build())
    }

    /// Shape given as a tuple of integers, or a single integer for 1-D.
    pub fn shape_arg(&self, position: usize) -> Result<Shape> {
        let dims = match self.arg(position)? {
            Value::Tuple(fields) => fields
                .iter()
                .map(|field| field.as_scalar().and_then(|v| v.as_i64()))
                .collect::<Option<Vec<_>>>(),
            Value::Scalar(v) => v.as_i64().map(|d| vec![d]),
            _ => None,
        };
        let dims = dims.ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "a shape" }.build())?;

        dims.into_iter()
            .map(|value| {
                usize::try_from(value).map_err(|_| NegativeDimensionSnafu { op: self.op, position, value }.build())
            })
            .collect()
    }

    /// Element type at `position`, or `default` when the argument is absent.
    pub fn dtype_arg(&self, position: usize, default: DType) -> Result<DType> {
        let Some(value) = self.opt_arg(position) else {
            return Ok(default);
        };
        let name = value
            .as_str()
            .ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "a dtype string" }.build())?;
        name.parse::<DType>().context(InvalidDTypeSnafu { op: self.op })
    }

    /// Device at `position`, or [`DEFAULT_DEVICE`] when the argument is absent.
    pub fn device_arg(&self, position: usize) -> Result<DeviceSpec> {
        let Some(value) = self.opt_arg(position) else {
            return Ok(DEFAULT_DEVICE);
        };
        let name = value
            .as_str()
            .ok_or_else(|| ArgTypeSnafu { op: self.op, position, expected: "a device string" }.build())?;
        DeviceSpec::parse(name).context(DeviceSnafu { op: self.op })
    }
}
