//! Operator handles and the operator registry.
//!
//! Operators are declared once into an [`OpRegistry`], which is then shared
//! read-only (usually behind an `Arc`) by every pass and inference call.

use std::collections::HashMap;
use std::sync::Arc;

use bon::bon;
use tessel_device::DeviceSpec;

use crate::Value;
use crate::error::{DuplicateOpSnafu, NoInferenceSnafu, Result, UnknownOpSnafu};

/// Scheduling pattern of an operator, from most to least fusable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum OpPattern {
    ElemWise,
    Broadcast,
    Injective,
    CommReduce,
    OutEWiseFusable,
    Tuple,
    /// No fusion or algebraic simplification may cross this operator.
    #[default]
    Opaque,
}

/// Arguments of a call as seen by an inference rule.
#[derive(Debug, Clone, Copy)]
pub struct CallValues<'a> {
    pub op: &'a str,
    pub args: &'a [Value],
}

/// Output value and execution device derived by inference.
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    pub out: Value,
    pub device: DeviceSpec,
}

/// Shape/placement inference rule.
pub type InferFn = fn(&CallValues<'_>) -> Result<Inferred>;

/// Operator metadata.
#[derive(Debug)]
pub struct OpDef {
    name: String,
    pattern: OpPattern,
    infer: Option<InferFn>,
}

#[bon]
impl OpDef {
    #[builder]
    pub fn new(#[builder(into)] name: String, #[builder(default)] pattern: OpPattern, infer: Option<InferFn>) -> Self {
        Self { name, pattern, infer }
    }
}

/// Cheap, clonable handle to a declared operator.
#[derive(Debug, Clone)]
pub struct Op(Arc<OpDef>);

impl Op {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn pattern(&self) -> OpPattern {
        self.0.pattern
    }

    pub fn has_inference(&self) -> bool {
        self.0.infer.is_some()
    }

    /// Run the operator's inference rule on concrete argument values.
    pub fn infer(&self, args: &[Value]) -> Result<Inferred> {
        let infer = self.0.infer.ok_or_else(|| NoInferenceSnafu { name: self.name() }.build())?;
        infer(&CallValues { op: self.name(), args })
    }
}

impl PartialEq for Op {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for Op {}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Name-keyed table of operator declarations.
#[derive(Debug, Default)]
pub struct OpRegistry {
    ops: HashMap<String, Op>,
}

impl OpRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in operator declared.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        crate::declare::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Declare an operator; names must be unique.
    pub fn declare(&mut self, def: OpDef) -> Result<Op> {
        snafu::ensure!(!self.ops.contains_key(&def.name), DuplicateOpSnafu { name: def.name.clone() });
        tracing::trace!(op = %def.name, pattern = %def.pattern, "declaring operator");
        let op = Op(Arc::new(def));
        self.ops.insert(op.name().to_string(), op.clone());
        Ok(op)
    }

    pub fn get(&self, name: &str) -> Result<Op> {
        self.ops.get(name).cloned().ok_or_else(|| UnknownOpSnafu { name }.build())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Run inference for `name` on concrete arguments.
    pub fn infer(&self, name: &str, args: &[Value]) -> Result<Inferred> {
        self.get(name)?.infer(args)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
