use snafu::Snafu;
use tessel_device::DeviceSpec;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad failure class, for callers deciding whether to report or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A device string given by the user cannot be parsed.
    Configuration,
    /// The IR does not have the shape the pass requires.
    MalformedIr,
    /// An operand has the wrong element type.
    Type,
    /// Allocation or copy failed while relocating data.
    Resource,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("invalid target device {device:?}: {source}"))]
    InvalidTargetDevice { device: String, source: tessel_device::Error },

    /// The device-selector argument of a call names no known device.
    #[snafu(display("{op}: invalid device argument {device:?}: {source}"))]
    InvalidDeviceArg { op: String, device: String, source: tessel_device::Error },

    #[snafu(display("malformed call to {op}: {reason}"))]
    MalformedCall { op: String, reason: String },

    #[snafu(display("{source}"))]
    Ir { source: tessel_ir::Error },

    #[snafu(display("failed to relocate constant to {target}: {source}"))]
    Relocation { target: DeviceSpec, source: tessel_device::Error },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTargetDevice { .. } | Self::InvalidDeviceArg { .. } => ErrorKind::Configuration,
            Self::MalformedCall { .. } => ErrorKind::MalformedIr,
            Self::Ir { source } if source.is_type_error() => ErrorKind::Type,
            Self::Ir { .. } => ErrorKind::MalformedIr,
            Self::Relocation { .. } => ErrorKind::Resource,
        }
    }
}
