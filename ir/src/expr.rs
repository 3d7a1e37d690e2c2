//! Expression nodes.
//!
//! Expressions are immutable and shared through `Arc<Expr>`. Rewrites build
//! new nodes and reuse untouched subtrees, so pointer identity tells whether a
//! subtree changed.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::{ConstValue, Op, TensorValue, Value};

/// Argument list of a call.
pub type Args = SmallVec<[Arc<Expr>; 4]>;

/// Local variable, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    name: Arc<str>,
}

impl Var {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self { name: Arc::from(name.as_ref()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What a call invokes.
#[derive(Debug, Clone)]
pub enum Callee {
    /// A primitive operator from the registry.
    Op(Op),
    /// A function value (global reference, local function, ...).
    Expr(Arc<Expr>),
}

impl Callee {
    pub fn as_op(&self) -> Option<&Op> {
        match self {
            Callee::Op(op) => Some(op),
            Callee::Expr(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Var(Var),
    /// Reference to a module-level function.
    Global(String),
    Constant(Value),
    Tuple(Args),
    TupleGetItem { tuple: Arc<Expr>, index: usize },
    Call { callee: Callee, args: Args },
    Function { params: Vec<Var>, body: Arc<Expr> },
    Let { var: Var, value: Arc<Expr>, body: Arc<Expr> },
    If { cond: Arc<Expr>, then_branch: Arc<Expr>, else_branch: Arc<Expr> },
}

impl Expr {
    pub fn var(name: impl AsRef<str>) -> Arc<Self> {
        Arc::new(Expr::Var(Var::new(name)))
    }

    pub fn global(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Expr::Global(name.into()))
    }

    pub fn constant(value: impl Into<Value>) -> Arc<Self> {
        Arc::new(Expr::Constant(value.into()))
    }

    pub fn scalar(value: impl Into<ConstValue>) -> Arc<Self> {
        Self::constant(Value::Scalar(value.into()))
    }

    pub fn string(value: impl Into<String>) -> Arc<Self> {
        Self::constant(Value::Str(value.into()))
    }

    pub fn tensor(value: TensorValue) -> Arc<Self> {
        Self::constant(Value::Tensor(value))
    }

    pub fn tuple(fields: impl IntoIterator<Item = Arc<Expr>>) -> Arc<Self> {
        Arc::new(Expr::Tuple(fields.into_iter().collect()))
    }

    pub fn tuple_get(tuple: Arc<Expr>, index: usize) -> Arc<Self> {
        Arc::new(Expr::TupleGetItem { tuple, index })
    }

    /// Call a primitive operator.
    pub fn call(op: &Op, args: impl IntoIterator<Item = Arc<Expr>>) -> Arc<Self> {
        Arc::new(Expr::Call { callee: Callee::Op(op.clone()), args: args.into_iter().collect() })
    }

    /// Call a function value.
    pub fn call_fn(func: Arc<Expr>, args: impl IntoIterator<Item = Arc<Expr>>) -> Arc<Self> {
        Arc::new(Expr::Call { callee: Callee::Expr(func), args: args.into_iter().collect() })
    }

    pub fn function(params: impl IntoIterator<Item = Var>, body: Arc<Expr>) -> Arc<Self> {
        Arc::new(Expr::Function { params: params.into_iter().collect(), body })
    }

    pub fn let_(var: Var, value: Arc<Expr>, body: Arc<Expr>) -> Arc<Self> {
        Arc::new(Expr::Let { var, value, body })
    }

    pub fn if_(cond: Arc<Expr>, then_branch: Arc<Expr>, else_branch: Arc<Expr>) -> Arc<Self> {
        Arc::new(Expr::If { cond, then_branch, else_branch })
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// String payload of a string constant.
    pub fn as_str(&self) -> Option<&str> {
        self.as_constant().and_then(Value::as_str)
    }

    pub fn as_call(&self) -> Option<(&Callee, &[Arc<Expr>])> {
        match self {
            Expr::Call { callee, args } => Some((callee, args)),
            _ => None,
        }
    }

    /// Operator invoked by this node, if it is a primitive call.
    pub fn call_op(&self) -> Option<&Op> {
        self.as_call().and_then(|(callee, _)| callee.as_op())
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expr::Function { .. })
    }

    /// Direct sub-expressions in evaluation order.
    pub fn children(&self) -> SmallVec<[&Arc<Expr>; 4]> {
        match self {
            Expr::Var(_) | Expr::Global(_) | Expr::Constant(_) => SmallVec::new(),
            Expr::Tuple(fields) => fields.iter().collect(),
            Expr::TupleGetItem { tuple, .. } => smallvec::smallvec![tuple],
            Expr::Call { callee, args } => {
                let mut children: SmallVec<[&Arc<Expr>; 4]> = SmallVec::new();
                if let Callee::Expr(func) = callee {
                    children.push(func);
                }
                children.extend(args.iter());
                children
            }
            Expr::Function { body, .. } => smallvec::smallvec![body],
            Expr::Let { value, body, .. } => smallvec::smallvec![value, body],
            Expr::If { cond, then_branch, else_branch } => smallvec::smallvec![cond, then_branch, else_branch],
        }
    }
}

/// Identity key for memoizing over shared subtrees.
#[derive(Clone)]
pub struct ExprKey(pub Arc<Expr>);

impl std::fmt::Debug for ExprKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExprKey({:p})", Arc::as_ptr(&self.0))
    }
}

impl PartialEq for ExprKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ExprKey {}

impl Hash for ExprKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, items: &[Arc<Expr>]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(var) => write!(f, "%{}", var.name()),
            Expr::Global(name) => write!(f, "@{name}"),
            Expr::Constant(value) => write!(f, "{value}"),
            Expr::Tuple(fields) => {
                write!(f, "(")?;
                write_list(f, fields)?;
                write!(f, ")")
            }
            Expr::TupleGetItem { tuple, index } => write!(f, "{tuple}.{index}"),
            Expr::Call { callee, args } => {
                match callee {
                    Callee::Op(op) => write!(f, "{op}(")?,
                    Callee::Expr(func) => write!(f, "{func}(")?,
                }
                write_list(f, args)?;
                write!(f, ")")
            }
            Expr::Function { params, body } => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "%{}", param.name())?;
                }
                write!(f, ") {{ {body} }}")
            }
            Expr::Let { var, value, body } => write!(f, "let %{} = {value}; {body}", var.name()),
            Expr::If { cond, then_branch, else_branch } => {
                write!(f, "if ({cond}) {{ {then_branch} }} else {{ {else_branch} }}")
            }
        }
    }
}
