//! Scalar constants embedded in the IR.

use tessel_dtype::DType;

/// Scalar value that can be stored in a constant node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl ConstValue {
    pub const fn dtype(&self) -> DType {
        match self {
            ConstValue::Int(_) => DType::Int64,
            ConstValue::UInt(_) => DType::UInt64,
            ConstValue::Float(_) => DType::Float64,
            ConstValue::Bool(_) => DType::Bool,
        }
    }

    /// Integer view of the value; floats must be integral.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ConstValue::Int(v) => Some(v),
            ConstValue::UInt(v) => i64::try_from(v).ok(),
            ConstValue::Float(v) if v.fract() == 0.0 => Some(v as i64),
            ConstValue::Float(_) => None,
            ConstValue::Bool(v) => Some(v as i64),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            ConstValue::Int(v) => v as f64,
            ConstValue::UInt(v) => v as f64,
            ConstValue::Float(v) => v,
            ConstValue::Bool(v) => v as u8 as f64,
        }
    }
}

impl std::fmt::Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::UInt(v) => write!(f, "{v}u"),
            ConstValue::Float(v) => write!(f, "{v:?}"),
            ConstValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident as $storage:ty),* $(,)?) => {
        $(impl From<$ty> for ConstValue {
            fn from(v: $ty) -> Self {
                ConstValue::$variant(v as $storage)
            }
        })*
    };
}

impl_from_scalar! {
    i8 => Int as i64, i16 => Int as i64, i32 => Int as i64, i64 => Int as i64,
    u8 => UInt as u64, u16 => UInt as u64, u32 => UInt as u64, u64 => UInt as u64,
    f32 => Float as f64, f64 => Float as f64,
}

impl From<bool> for ConstValue {
    fn from(v: bool) -> Self {
        ConstValue::Bool(v)
    }
}
