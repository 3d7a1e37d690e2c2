//! Tree visualization for expressions.
//!
//! Shared subtrees are printed once; later occurrences render as
//! `[n] → (see above)`.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

use ptree::{Style, TreeItem};

use crate::expr::{Callee, Expr, ExprKey};

type Numbering = Rc<RefCell<HashMap<ExprKey, usize>>>;

/// Compact renderer with back-references for shared nodes.
#[derive(Clone)]
pub struct ExprTreeCompact {
    expr: Arc<Expr>,
    seen: Numbering,
    is_backref: RefCell<bool>,
}

impl ExprTreeCompact {
    pub fn new(expr: &Arc<Expr>) -> Self {
        Self { expr: expr.clone(), seen: Rc::default(), is_backref: RefCell::new(false) }
    }
}

impl TreeItem for ExprTreeCompact {
    type Child = ExprTreeCompact;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        let mut seen = self.seen.borrow_mut();
        let key = ExprKey(self.expr.clone());
        if let Some(id) = seen.get(&key) {
            *self.is_backref.borrow_mut() = true;
            return write!(f, "[{id}] → (see above)");
        }
        let id = seen.len();
        seen.insert(key, id);
        write!(f, "[{id}] {}", format_node(&self.expr))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        if *self.is_backref.borrow() {
            return Cow::Borrowed(&[]);
        }
        let children = self
            .expr
            .children()
            .into_iter()
            .map(|child| ExprTreeCompact {
                expr: child.clone(),
                seen: self.seen.clone(),
                is_backref: RefCell::new(false),
            })
            .collect::<Vec<_>>();
        Cow::Owned(children)
    }
}

/// Full renderer; shared nodes are expanded at every occurrence.
#[derive(Clone)]
pub struct ExprTreeFull {
    expr: Arc<Expr>,
}

impl ExprTreeFull {
    pub fn new(expr: &Arc<Expr>) -> Self {
        Self { expr: expr.clone() }
    }
}

impl TreeItem for ExprTreeFull {
    type Child = ExprTreeFull;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        write!(f, "{}", format_node(&self.expr))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Owned(self.expr.children().into_iter().map(|child| ExprTreeFull { expr: child.clone() }).collect())
    }
}

/// One-line label of a node, without its children.
fn format_node(expr: &Expr) -> String {
    match expr {
        Expr::Var(var) => format!("VAR %{}", var.name()),
        Expr::Global(name) => format!("GLOBAL @{name}"),
        Expr::Constant(value) => format!("CONST {value}"),
        Expr::Tuple(fields) => format!("TUPLE(len={})", fields.len()),
        Expr::TupleGetItem { index, .. } => format!("GET_ITEM({index})"),
        Expr::Call { callee: Callee::Op(op), args } => format!("CALL {op} [{} args, {}]", args.len(), op.pattern()),
        Expr::Call { callee: Callee::Expr(_), args } => format!("CALL <fn> [{} args]", args.len()),
        Expr::Function { params, .. } => {
            let names = params.iter().map(|p| format!("%{}", p.name())).collect::<Vec<_>>();
            format!("FUNCTION({})", names.join(", "))
        }
        Expr::Let { var, .. } => format!("LET %{}", var.name()),
        Expr::If { .. } => "IF".to_string(),
    }
}

fn render<T: TreeItem>(tree: &T) -> io::Result<String> {
    let mut buf = Vec::new();
    ptree::write_tree(tree, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Render an expression as a compact ASCII tree.
pub fn render_tree_compact(expr: &Arc<Expr>) -> io::Result<String> {
    render(&ExprTreeCompact::new(expr))
}

/// Render an expression as a full ASCII tree.
pub fn render_tree_full(expr: &Arc<Expr>) -> io::Result<String> {
    render(&ExprTreeFull::new(expr))
}

impl Expr {
    /// Compact tree rendering, for logs and debugging.
    pub fn tree(self: &Arc<Self>) -> String {
        render_tree_compact(self).unwrap_or_else(|e| format!("<tree rendering failed: {e}>"))
    }

    pub fn tree_full(self: &Arc<Self>) -> String {
        render_tree_full(self).unwrap_or_else(|e| format!("<tree rendering failed: {e}>"))
    }
}
