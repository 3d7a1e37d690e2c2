use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Expr;
use crate::error::{NotAFunctionSnafu, Result};

/// Named collection of global functions.
#[derive(Debug, Clone, Default)]
pub struct IrModule {
    functions: BTreeMap<String, Arc<Expr>>,
}

impl IrModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a global function.
    pub fn add(&mut self, name: impl Into<String>, function: Arc<Expr>) -> Result<()> {
        let name = name.into();
        snafu::ensure!(function.is_function(), NotAFunctionSnafu { name });
        self.functions.insert(name, function);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Expr>> {
        self.functions.get(name)
    }

    /// Functions in name order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &Arc<Expr>)> {
        self.functions.iter().map(|(name, function)| (name.as_str(), function))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromIterator<(String, Arc<Expr>)> for IrModule {
    /// Entries that are not functions are skipped.
    fn from_iter<T: IntoIterator<Item = (String, Arc<Expr>)>>(iter: T) -> Self {
        let functions = iter.into_iter().filter(|(_, function)| function.is_function()).collect();
        Self { functions }
    }
}
