//! The AssignDevice pass.
//!
//! Moves every device-producing call to the target device and relocates
//! constant tensors whose data lives on a device of another kind. Nodes that
//! need no change keep their identity, so rewriting an already placed
//! function returns the input `Arc`.

use std::sync::Arc;

use bon::bon;
use snafu::ResultExt;
use tessel_device::{DeviceRegistry, DeviceSpec, DeviceSpecExt};
use tessel_ir::{Callee, Expr, ExprMutator, MemoMap, Value, mutate_all, walk_expr};

use crate::config::AssignDeviceConfig;
use crate::error::{Error, InvalidTargetDeviceSnafu, Result};
use crate::normalize::{NormalizerTable, Placement, normalize};
use crate::pipeline::Pass;
use crate::relocate::relocate;

#[derive(Debug, Clone)]
pub struct AssignDevice {
    config: AssignDeviceConfig,
    target: DeviceSpec,
    normalizers: Arc<NormalizerTable>,
    devices: Arc<DeviceRegistry>,
}

#[bon]
impl AssignDevice {
    /// Fails when the configured target does not parse.
    #[builder]
    pub fn new(
        config: AssignDeviceConfig,
        #[builder(default = NormalizerTable::standard())] normalizers: Arc<NormalizerTable>,
        #[builder(default = tessel_device::registry())] devices: Arc<DeviceRegistry>,
    ) -> Result<Self> {
        let target = DeviceSpec::parse(&config.target).context(InvalidTargetDeviceSnafu { device: &config.target })?;
        Ok(Self { config, target, normalizers, devices })
    }

    /// Pass with the standard normalizers and the global device registry.
    pub fn from_config(config: AssignDeviceConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &AssignDeviceConfig {
        &self.config
    }

    pub fn target(&self) -> &DeviceSpec {
        &self.target
    }

    fn placement(&self) -> Placement<'_> {
        Placement { target_name: &self.config.target, target: &self.target }
    }
}

impl Pass for AssignDevice {
    fn name(&self) -> &str {
        "AssignDevice"
    }

    #[tracing::instrument(skip_all, fields(target = %self.config.target, function.initial = %function.tree()))]
    fn run_on_function(&self, function: &Arc<Expr>) -> Result<Arc<Expr>> {
        let mut assigner = DeviceAssigner { pass: self, memo: MemoMap::new() };
        let rewritten = assigner.mutate(function)?;
        tracing::debug!(
            changed = !Arc::ptr_eq(&rewritten, function),
            function.rewritten = %rewritten.tree(),
            "assigned devices"
        );
        Ok(rewritten)
    }
}

/// Rewrite `function` so it runs on `target`.
pub fn assign_device(function: &Arc<Expr>, target: &str) -> Result<Arc<Expr>> {
    AssignDevice::from_config(AssignDeviceConfig::builder().target(target).build())?.run_on_function(function)
}

struct DeviceAssigner<'a> {
    pass: &'a AssignDevice,
    memo: MemoMap,
}

impl ExprMutator for DeviceAssigner<'_> {
    type Error = Error;

    fn memo(&mut self) -> &mut MemoMap {
        &mut self.memo
    }

    fn visit_constant(&mut self, expr: &Arc<Expr>, value: &Value) -> Result<Arc<Expr>> {
        let Value::Tensor(tensor) = value else {
            return Ok(expr.clone());
        };
        match relocate(tensor, &self.pass.target, &self.pass.devices)? {
            Some(moved) => Ok(Expr::tensor(moved)),
            None => Ok(expr.clone()),
        }
    }

    fn visit_call(&mut self, expr: &Arc<Expr>, callee: &Callee, args: &[Arc<Expr>]) -> Result<Arc<Expr>> {
        let Callee::Op(op) = callee else {
            return walk_expr(self, expr);
        };

        let (rewritten, _) = mutate_all(self, args)?;
        let new_args = match self.pass.normalizers.get(op.name()) {
            Some(kind) => normalize(kind, op.name(), args, rewritten, &self.pass.placement())?,
            None => rewritten,
        };

        let unchanged = new_args.len() == args.len() && new_args.iter().zip(args).all(|(a, b)| Arc::ptr_eq(a, b));
        if unchanged {
            return Ok(expr.clone());
        }
        Ok(Arc::new(Expr::Call { callee: callee.clone(), args: new_args }))
    }
}
