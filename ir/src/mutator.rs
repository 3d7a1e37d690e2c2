//! Generic expression rewriting.
//!
//! [`ExprMutator`] walks an expression children-first and rebuilds every node
//! whose children changed. Implementors override [`ExprMutator::visit_call`]
//! or [`ExprMutator::visit_constant`]; everything else falls through to the
//! structural copy in [`walk_expr`]. Results are memoized by node identity, so
//! a subtree shared by several parents is rewritten once and stays shared.

use std::collections::HashMap;
use std::sync::Arc;

use crate::expr::{Args, Callee, Expr, ExprKey};
use crate::Value;

/// Memo table from original node to its rewrite.
pub type MemoMap = HashMap<ExprKey, Arc<Expr>>;

pub trait ExprMutator {
    type Error;

    /// Memo table owned by the mutator.
    fn memo(&mut self) -> &mut MemoMap;

    /// Rewrite `expr`, reusing an earlier result for the same node.
    fn mutate(&mut self, expr: &Arc<Expr>) -> Result<Arc<Expr>, Self::Error> {
        let key = ExprKey(expr.clone());
        if let Some(done) = self.memo().get(&key) {
            return Ok(done.clone());
        }

        let result = self.visit_expr(expr)?;
        self.memo().insert(key, result.clone());
        Ok(result)
    }

    fn visit_expr(&mut self, expr: &Arc<Expr>) -> Result<Arc<Expr>, Self::Error> {
        match expr.as_ref() {
            Expr::Constant(value) => self.visit_constant(expr, value),
            Expr::Call { callee, args } => self.visit_call(expr, callee, args),
            _ => walk_expr(self, expr),
        }
    }

    fn visit_constant(&mut self, expr: &Arc<Expr>, _value: &Value) -> Result<Arc<Expr>, Self::Error> {
        Ok(expr.clone())
    }

    fn visit_call(
        &mut self,
        expr: &Arc<Expr>,
        _callee: &Callee,
        _args: &[Arc<Expr>],
    ) -> Result<Arc<Expr>, Self::Error> {
        walk_expr(self, expr)
    }
}

/// Rewrite every expression in `exprs`.
///
/// The flag is true when at least one result differs (by identity) from its
/// input.
pub fn mutate_all<M: ExprMutator + ?Sized>(mutator: &mut M, exprs: &[Arc<Expr>]) -> Result<(Args, bool), M::Error> {
    let mut changed = false;
    let mut out = Args::with_capacity(exprs.len());
    for expr in exprs {
        let new = mutator.mutate(expr)?;
        changed |= !Arc::ptr_eq(&new, expr);
        out.push(new);
    }
    Ok((out, changed))
}

/// Rebuild `expr` with rewritten children.
///
/// Returns `expr` itself when no child changed.
pub fn walk_expr<M: ExprMutator + ?Sized>(mutator: &mut M, expr: &Arc<Expr>) -> Result<Arc<Expr>, M::Error> {
    let rebuilt = match expr.as_ref() {
        Expr::Var(_) | Expr::Global(_) | Expr::Constant(_) => None,
        Expr::Tuple(fields) => {
            let (fields, changed) = mutate_all(mutator, fields)?;
            changed.then(|| Expr::Tuple(fields))
        }
        Expr::TupleGetItem { tuple, index } => {
            let new_tuple = mutator.mutate(tuple)?;
            (!Arc::ptr_eq(&new_tuple, tuple)).then(|| Expr::TupleGetItem { tuple: new_tuple, index: *index })
        }
        Expr::Call { callee, args } => {
            let (new_callee, callee_changed) = match callee {
                Callee::Op(op) => (Callee::Op(op.clone()), false),
                Callee::Expr(func) => {
                    let new_func = mutator.mutate(func)?;
                    let changed = !Arc::ptr_eq(&new_func, func);
                    (Callee::Expr(new_func), changed)
                }
            };
            let (new_args, args_changed) = mutate_all(mutator, args)?;
            (callee_changed || args_changed).then(|| Expr::Call { callee: new_callee, args: new_args })
        }
        Expr::Function { params, body } => {
            let new_body = mutator.mutate(body)?;
            (!Arc::ptr_eq(&new_body, body)).then(|| Expr::Function { params: params.clone(), body: new_body })
        }
        Expr::Let { var, value, body } => {
            let new_value = mutator.mutate(value)?;
            let new_body = mutator.mutate(body)?;
            (!Arc::ptr_eq(&new_value, value) || !Arc::ptr_eq(&new_body, body))
                .then(|| Expr::Let { var: var.clone(), value: new_value, body: new_body })
        }
        Expr::If { cond, then_branch, else_branch } => {
            let new_cond = mutator.mutate(cond)?;
            let new_then = mutator.mutate(then_branch)?;
            let new_else = mutator.mutate(else_branch)?;
            let changed = !Arc::ptr_eq(&new_cond, cond)
                || !Arc::ptr_eq(&new_then, then_branch)
                || !Arc::ptr_eq(&new_else, else_branch);
            changed.then(|| Expr::If { cond: new_cond, then_branch: new_then, else_branch: new_else })
        }
    };

    Ok(rebuilt.map(Arc::new).unwrap_or_else(|| expr.clone()))
}
