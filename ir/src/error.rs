use snafu::Snafu;
use tessel_dtype::{DType, UnknownDTypeError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Operator name is not declared in the registry.
    #[snafu(display("unknown operator: {name}"))]
    UnknownOp { name: String },

    /// Operator declared twice.
    #[snafu(display("operator {name} is already declared"))]
    DuplicateOp { name: String },

    /// Operator has no shape/placement inference registered.
    #[snafu(display("operator {name} has no inference rule"))]
    NoInference { name: String },

    /// Module entries must be functions.
    #[snafu(display("module entry {name} is not a function"))]
    NotAFunction { name: String },

    /// Call supplies fewer arguments than the operator requires.
    #[snafu(display("{op} expects at least {expected} arguments, got {actual}"))]
    TooFewArgs { op: String, expected: usize, actual: usize },

    /// Call supplies more arguments than the operator accepts.
    #[snafu(display("{op} accepts at most {max} arguments, got {actual}"))]
    TooManyArgs { op: String, max: usize, actual: usize },

    /// Argument has the wrong value kind.
    #[snafu(display("{op}: argument {position} must be {expected}"))]
    ArgType { op: String, position: usize, expected: &'static str },

    /// Dimension argument is negative.
    #[snafu(display("{op}: argument {position} has negative dimension {value}"))]
    NegativeDimension { op: String, position: usize, value: i64 },

    #[snafu(display("{op}: {source}"))]
    InvalidDType { op: String, source: UnknownDTypeError },

    /// Device argument failed to parse.
    #[snafu(display("{op}: {source}"))]
    Device { op: String, source: tessel_device::Error },

    /// RNG key tensors are always `uint64`.
    #[snafu(display("{op}: the type of key must be uint64, got {actual}"))]
    KeyDTypeMismatch { op: String, actual: DType },

    #[snafu(display("arange: step must be non-zero (start {start}, stop {stop})"))]
    ZeroArangeStep { start: f64, stop: f64 },

    /// The range holds more elements than a tensor can, or is not finite.
    #[snafu(display("arange: range from {start} to {stop} by {step} has no representable length"))]
    ArangeLength { start: f64, stop: f64, step: f64 },

    #[snafu(display("{op}: axis {axis} is out of range for output rank {rank}"))]
    AxisOutOfRange { op: String, axis: i64, rank: usize },
}

impl Error {
    /// Whether this is a dtype error rather than a malformed call.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::KeyDTypeMismatch { .. } | Self::InvalidDType { .. })
    }
}
