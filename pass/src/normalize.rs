//! Argument normalization for device-producing operators.
//!
//! A device-producing operator takes its placement as a trailing string
//! argument. Moving such a call to another device means writing that
//! argument, which in turn requires every optional argument before it to be
//! present. Each operator kind therefore carries a static [`Signature`] that
//! says how long the full argument list is, which prefix is required, where
//! the device string sits and what the other optional slots default to.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use snafu::ResultExt;
use tessel_device::{DeviceSpec, DeviceSpecExt};
use tessel_ir::{Args, DEFAULT_DEVICE, Expr};

use crate::error::{InvalidDeviceArgSnafu, MalformedCallSnafu, Result};

/// Value written into an absent optional slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultArg {
    Int(i64),
    Str(&'static str),
}

impl DefaultArg {
    pub fn to_expr(self) -> Arc<Expr> {
        match self {
            DefaultArg::Int(v) => Expr::scalar(v),
            DefaultArg::Str(s) => Expr::string(s),
        }
    }
}

/// Static argument layout of a device-producing operator.
#[derive(Debug, PartialEq)]
pub struct Signature {
    /// Full argument count.
    pub len: usize,
    /// Leading arguments every call must supply.
    pub required: usize,
    /// Position of the device string.
    pub device_pos: usize,
    /// Defaults for optional positions other than `device_pos`.
    pub defaults: &'static [(usize, DefaultArg)],
}

impl Signature {
    pub fn default_at(&self, position: usize) -> Option<DefaultArg> {
        self.defaults.iter().find(|(pos, _)| *pos == position).map(|(_, arg)| *arg)
    }
}

const FULL: Signature = Signature { len: 4, required: 2, device_pos: 3, defaults: &[(2, DefaultArg::Str("int"))] };

const ONE_HOT: Signature = Signature {
    len: 7,
    required: 4,
    device_pos: 6,
    defaults: &[(4, DefaultArg::Int(-1)), (5, DefaultArg::Str("int"))],
};

const INIT: Signature = Signature { len: 3, required: 1, device_pos: 2, defaults: &[(1, DefaultArg::Str("float"))] };

const ARANGE: Signature = Signature { len: 5, required: 3, device_pos: 4, defaults: &[(3, DefaultArg::Str("int"))] };

/// Operator kinds the pass knows how to move between devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum DeviceOpKind {
    /// `full(fill_value, shape, dtype, device)`
    Full,
    /// `one_hot(indices, on_value, off_value, depth, axis, dtype, device)`
    OneHot,
    /// `zeros` / `ones` `(shape, dtype, device)`
    Init,
    /// `arange(start, stop, step, dtype, device)`
    Arange,
}

impl DeviceOpKind {
    pub fn signature(self) -> &'static Signature {
        match self {
            DeviceOpKind::Full => &FULL,
            DeviceOpKind::OneHot => &ONE_HOT,
            DeviceOpKind::Init => &INIT,
            DeviceOpKind::Arange => &ARANGE,
        }
    }
}

static STANDARD: Lazy<Arc<NormalizerTable>> = Lazy::new(|| {
    Arc::new(
        NormalizerTable::new()
            .with("full", DeviceOpKind::Full)
            .with("one_hot", DeviceOpKind::OneHot)
            .with("zeros", DeviceOpKind::Init)
            .with("ones", DeviceOpKind::Init)
            .with("arange", DeviceOpKind::Arange),
    )
});

/// Operator name to normalizer kind.
#[derive(Debug, Clone, Default)]
pub struct NormalizerTable {
    kinds: HashMap<String, DeviceOpKind>,
}

impl NormalizerTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in device-producing operators.
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    pub fn with(mut self, op: impl Into<String>, kind: DeviceOpKind) -> Self {
        self.insert(op, kind);
        self
    }

    pub fn insert(&mut self, op: impl Into<String>, kind: DeviceOpKind) {
        self.kinds.insert(op.into(), kind);
    }

    pub fn get(&self, op: &str) -> Option<DeviceOpKind> {
        self.kinds.get(op).copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Where a call is being moved.
#[derive(Debug, Clone)]
pub struct Placement<'a> {
    /// Target device as written by the user; copied into rewritten calls.
    pub target_name: &'a str,
    pub target: &'a DeviceSpec,
}

/// Build the argument list of a call to `op` placed on the target device.
///
/// `original` is the call's argument list as it appears in the input;
/// `rewritten` holds the same arguments after rewriting. When the call
/// already runs on the target's kind `rewritten` is returned as is.
/// Otherwise the result has exactly `signature.len` arguments.
pub fn normalize(
    kind: DeviceOpKind,
    op: &str,
    original: &[Arc<Expr>],
    rewritten: Args,
    placement: &Placement<'_>,
) -> Result<Args> {
    let sig = kind.signature();
    let supplied = original.len();
    snafu::ensure!(
        supplied >= sig.required,
        MalformedCallSnafu { op, reason: format!("expected at least {} arguments, got {supplied}", sig.required) }
    );
    snafu::ensure!(
        supplied <= sig.len,
        MalformedCallSnafu { op, reason: format!("expected at most {} arguments, got {supplied}", sig.len) }
    );

    let current = match original.get(sig.device_pos) {
        None => DEFAULT_DEVICE,
        Some(arg) => {
            let device = arg.as_str().ok_or_else(|| {
                MalformedCallSnafu {
                    op,
                    reason: format!("device argument at position {} must be a constant string", sig.device_pos),
                }
                .build()
            })?;
            DeviceSpec::parse(device).context(InvalidDeviceArgSnafu { op, device })?
        }
    };

    if current.same_kind(placement.target) {
        tracing::trace!(op, device = %current, "call already on target device kind");
        return Ok(rewritten);
    }

    tracing::debug!(op, from = %current, to = %placement.target, supplied, len = sig.len, "moving call to target");
    (0..sig.len)
        .map(|pos| {
            if pos == sig.device_pos {
                return Ok(Expr::string(placement.target_name));
            }
            if let Some(arg) = rewritten.get(pos) {
                return Ok(arg.clone());
            }
            sig.default_at(pos).map(DefaultArg::to_expr).ok_or_else(|| {
                MalformedCallSnafu { op, reason: format!("no default for optional argument {pos}") }.build()
            })
        })
        .collect()
}
