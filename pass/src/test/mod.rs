use std::sync::Arc;

use once_cell::sync::Lazy;
use tessel_ir::{DeviceSpec, Expr, OpRegistry, Value};


static OPS: Lazy<OpRegistry> = Lazy::new(|| OpRegistry::with_builtins().unwrap());

/// Call to a built-in operator.
pub fn call(op: &str, args: impl IntoIterator<Item = Arc<Expr>>) -> Arc<Expr> {
    Expr::call(&OPS.get(op).unwrap(), args)
}

/// Arguments of a call, rendered.
pub fn rendered_args(expr: &Arc<Expr>) -> Vec<String> {
    expr.as_call().unwrap().1.iter().map(|arg| arg.to_string()).collect()
}

/// Device the operator's inference rule places a constant-argument call on.
pub fn inferred_device(expr: &Arc<Expr>) -> DeviceSpec {
    let (_, args) = expr.as_call().unwrap();
    let values: Vec<Value> = args.iter().map(|arg| arg.as_constant().unwrap().clone()).collect();
    expr.call_op().unwrap().infer(&values).unwrap().device
}

pub fn shape(dims: &[i64]) -> Arc<Expr> {
    Expr::constant(tessel_ir::Value::ints(dims.iter().copied()))
}
