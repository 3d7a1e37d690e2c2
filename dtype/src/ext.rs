use super::*;

/// Host scalar types with a matching [`DType`].
pub trait HasDType: Copy {
    const DTYPE: DType;

    /// Append the little-endian encoding of `self` to `out`.
    fn extend_le_bytes(self, out: &mut Vec<u8>);
}

macro_rules! impl_dtype_ext {
    ($($ty:ty => $dtype:expr),* $(,)?) => {
        $(impl HasDType for $ty {
            const DTYPE: DType = $dtype;

            fn extend_le_bytes(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        })*
    };
}

impl_dtype_ext! {
    i8 => DType::Int8, i16 => DType::Int16, i32 => DType::Int32, i64 => DType::Int64,
    u8 => DType::UInt8, u16 => DType::UInt16, u32 => DType::UInt32, u64 => DType::UInt64,
    f32 => DType::Float32, f64 => DType::Float64,
}

impl HasDType for bool {
    const DTYPE: DType = DType::Bool;

    fn extend_le_bytes(self, out: &mut Vec<u8>) {
        out.push(self as u8);
    }
}

/// Little-endian byte image of a host slice.
pub fn to_le_bytes<T: HasDType>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * T::DTYPE.bytes());
    for &value in values {
        value.extend_le_bytes(&mut out);
    }
    out
}
