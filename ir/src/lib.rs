//! Intermediate representation for the Tessel compiler.
//!
//! # Module Organization
//!
//! - [`expr`] - the [`Expr`] sum type and identity keys
//! - [`value`] - constant values and tensors ([`Value`], [`TensorValue`])
//! - [`types`] - scalar constants
//! - [`op`] - operator handles and the [`OpRegistry`]
//! - [`declare`] - built-in operator declarations and their inference rules
//! - [`mutator`] - memoized children-first rewriting ([`ExprMutator`])
//! - [`module`] - [`IrModule`], the unit passes operate on
//! - [`tree`] - ASCII tree rendering
//! - [`error`] - error types and result handling

pub mod declare;
pub mod error;
pub mod expr;
pub mod module;
pub mod mutator;
pub mod op;
pub mod tree;
pub mod types;
pub mod value;


pub use declare::DEFAULT_DEVICE;
pub use error::{Error, Result};
pub use expr::{Args, Callee, Expr, ExprKey, Var};
pub use module::IrModule;
pub use mutator::{ExprMutator, MemoMap, mutate_all, walk_expr};
pub use op::{CallValues, InferFn, Inferred, Op, OpDef, OpPattern, OpRegistry};
pub use types::ConstValue;
pub use value::{Shape, TensorValue, Value};

pub use tessel_dtype::{DType, DeviceSpec};
