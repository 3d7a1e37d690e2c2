//! Physical execution device descriptors.

/// Device family, without the ordinal.
///
/// Passes that only care about *where* code runs compare kinds, not full
/// [`DeviceSpec`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(derive_more::Display, strum::EnumIter)]
pub enum DeviceKind {
    #[display("CPU")]
    Cpu,
    #[display("CUDA")]
    Cuda,
    #[display("Metal")]
    Metal,
    #[display("WebGPU")]
    WebGpu,
}

/// A `(kind, index)` pair identifying one device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceSpec {
    Cpu,
    Cuda { device_id: usize },
    Metal { device_id: usize },
    WebGpu,
}

impl DeviceSpec {
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Cpu => DeviceKind::Cpu,
            Self::Cuda { .. } => DeviceKind::Cuda,
            Self::Metal { .. } => DeviceKind::Metal,
            Self::WebGpu => DeviceKind::WebGpu,
        }
    }

    /// Device ordinal; single-instance devices report 0.
    pub const fn index(&self) -> usize {
        match self {
            Self::Cuda { device_id } | Self::Metal { device_id } => *device_id,
            Self::Cpu | Self::WebGpu => 0,
        }
    }

    pub fn same_kind(&self, other: &DeviceSpec) -> bool {
        self.kind() == other.kind()
    }

    /// Canonical string form, e.g. `CPU` or `CUDA:1`.
    pub fn canonicalize(&self) -> String {
        match self {
            Self::Cpu => "CPU".to_string(),
            Self::Cuda { device_id } => format!("CUDA:{device_id}"),
            Self::Metal { device_id } => format!("METAL:{device_id}"),
            Self::WebGpu => "WEBGPU".to_string(),
        }
    }
}

impl std::fmt::Display for DeviceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonicalize())
    }
}
