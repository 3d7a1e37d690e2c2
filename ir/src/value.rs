//! Values carried by constant nodes and produced by inference.

use std::sync::Arc;

use smallvec::SmallVec;
use tessel_device::{Allocator, Buffer, DType, DeviceSpec};
use tessel_dtype::ext::{HasDType, to_le_bytes};

use crate::ConstValue;

/// Tensor shape (stack-allocated for 0-4D tensors).
pub type Shape = SmallVec<[usize; 4]>;

/// A value embedded in the IR.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(ConstValue),
    Str(String),
    Tensor(TensorValue),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<ConstValue> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tensor(&self) -> Option<&TensorValue> {
        match self {
            Value::Tensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Tuple of integer scalars, e.g. a shape argument.
    pub fn ints(values: impl IntoIterator<Item = i64>) -> Self {
        Value::Tuple(values.into_iter().map(|v| Value::Scalar(ConstValue::Int(v))).collect())
    }
}

impl From<ConstValue> for Value {
    fn from(v: ConstValue) -> Self {
        Value::Scalar(v)
    }
}

impl From<TensorValue> for Value {
    fn from(t: TensorValue) -> Self {
        Value::Tensor(t)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Tensor(t) => write!(f, "tensor<{}x{:?}@{}>", t.dtype, t.shape.as_slice(), t.device),
            Value::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A tensor: placement, element type, shape, and optionally its data.
///
/// Inference produces tensors without data (`buffer == None`); constants
/// embedded in a program carry a buffer whose size always matches
/// `shape * dtype.bytes()`.
#[derive(Debug, Clone)]
pub struct TensorValue {
    device: DeviceSpec,
    dtype: DType,
    shape: Shape,
    buffer: Option<Buffer>,
}

impl TensorValue {
    /// Describe a tensor without allocating storage.
    pub fn assemble(device: DeviceSpec, dtype: DType, shape: &[usize]) -> Self {
        Self { device, dtype, shape: SmallVec::from_slice(shape), buffer: None }
    }

    /// Wrap an existing buffer; placement, dtype and shape come from it.
    pub fn from_buffer(buffer: Buffer) -> Self {
        Self {
            device: buffer.device().clone(),
            dtype: buffer.dtype(),
            shape: SmallVec::from_slice(buffer.shape()),
            buffer: Some(buffer),
        }
    }

    /// Allocate on `allocator`'s device and fill from a host slice.
    pub fn from_slice<T: HasDType>(
        allocator: Arc<dyn Allocator>,
        shape: &[usize],
        data: &[T],
    ) -> tessel_device::Result<Self> {
        let buffer = Buffer::from_bytes(allocator, T::DTYPE, shape, &to_le_bytes(data))?;
        Ok(Self::from_buffer(buffer))
    }

    pub fn device(&self) -> &DeviceSpec {
        &self.device
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn buffer(&self) -> Option<&Buffer> {
        self.buffer.as_ref()
    }

    /// Host copy of the tensor bytes, `None` for data-less tensors.
    pub fn to_bytes(&self) -> tessel_device::Result<Option<Vec<u8>>> {
        self.buffer.as_ref().map(Buffer::to_vec).transpose()
    }
}

/// Tensors are equal when they describe the same placement, type and shape
/// and share storage (or both have none).
impl PartialEq for TensorValue {
    fn eq(&self, other: &Self) -> bool {
        let same_storage = match (&self.buffer, &other.buffer) {
            (Some(a), Some(b)) => a.shares_storage(b) && a.offset() == b.offset(),
            (None, None) => true,
            _ => false,
        };
        self.device == other.device && self.dtype == other.dtype && self.shape == other.shape && same_storage
    }
}
