//! Pass abstraction and ordered pipelines.

use std::sync::Arc;

use snafu::ResultExt;
use tessel_ir::{Expr, IrModule};

use crate::error::{IrSnafu, Result};

/// A rewrite over IR.
///
/// Function-level passes implement [`Pass::run_on_function`]; the default
/// [`Pass::run`] applies it to every function of a module and only returns a
/// module once every function has been rewritten.
pub trait Pass: Send + Sync {
    fn name(&self) -> &str;

    fn run_on_function(&self, function: &Arc<Expr>) -> Result<Arc<Expr>>;

    fn run(&self, module: &IrModule) -> Result<IrModule> {
        let mut out = IrModule::new();
        for (name, function) in module.functions() {
            let rewritten = self.run_on_function(function)?;
            out.add(name, rewritten).context(IrSnafu)?;
        }
        Ok(out)
    }
}

/// Passes run one after another, stopping at the first failure.
#[derive(Default)]
pub struct Sequential {
    passes: Vec<Box<dyn Pass>>,
}

impl Sequential {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Self { passes }
    }

    pub fn with(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Names of the passes in run order.
    pub fn pass_names(&self) -> impl Iterator<Item = &str> {
        self.passes.iter().map(|pass| pass.name())
    }
}

impl Pass for Sequential {
    fn name(&self) -> &str {
        "Sequential"
    }

    fn run_on_function(&self, function: &Arc<Expr>) -> Result<Arc<Expr>> {
        self.passes.iter().try_fold(function.clone(), |function, pass| pass.run_on_function(&function))
    }

    fn run(&self, module: &IrModule) -> Result<IrModule> {
        let mut module = module.clone();
        for pass in &self.passes {
            tracing::debug!(pass = pass.name(), functions = module.len(), "running pass");
            module = pass.run(&module)?;
        }
        Ok(module)
    }
}

impl std::fmt::Debug for Sequential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.pass_names()).finish()
    }
}
