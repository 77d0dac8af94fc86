//! Gates with some parameters fixed to constants.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;
use qforge_qis::{Radixes, UnitaryMatrix};
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateRef, Gradient};
use crate::unitary::Unitary;

/// Wraps a gate and fixes a subset of its parameters.
///
/// The wrapper's parameters are the subgate's unfixed parameters in their
/// original order. Wrappers nest: freezing a parameter of a frozen gate
/// wraps it again.
#[derive(Debug, Clone)]
pub struct FrozenParameterGate {
    gate: GateRef,
    fixed: BTreeMap<usize, f64>,
    unfixed: Vec<usize>,
}

impl FrozenParameterGate {
    /// Fixes `fixed` (subgate index -> value) on `gate`.
    pub fn new(gate: GateRef, fixed: BTreeMap<usize, f64>) -> IrResult<Self> {
        let num_params = gate.num_params();
        if fixed.len() > num_params {
            return Err(IrError::TooManyFixedParams {
                gate: gate.name(),
                max: num_params,
                got: fixed.len(),
            });
        }
        if let Some(&index) = fixed.keys().find(|&&i| i >= num_params) {
            return Err(IrError::FixedParamIndexOutOfRange {
                gate: gate.name(),
                index,
                num_params,
            });
        }
        let unfixed = (0..num_params).filter(|i| !fixed.contains_key(i)).collect();
        debug!(gate = %gate.name(), fixed = fixed.len(), "froze gate parameters");
        Ok(Self {
            gate,
            fixed,
            unfixed,
        })
    }

    pub fn subgate(&self) -> &GateRef {
        &self.gate
    }

    pub fn fixed_params(&self) -> &BTreeMap<usize, f64> {
        &self.fixed
    }

    /// Subgate indices still exposed as parameters, ascending.
    pub fn unfixed_param_idxs(&self) -> &[usize] {
        &self.unfixed
    }

    /// Expands free parameters into the subgate's full parameter vector.
    pub fn get_full_params(&self, params: &[f64]) -> IrResult<Vec<f64>> {
        self.check_parameters(params)?;
        let mut full = params.to_vec();
        // Ascending keys: each insert lands at its final index.
        for (&index, &value) in &self.fixed {
            full.insert(index, value);
        }
        Ok(full)
    }
}

// `unfixed` is derived from `fixed`.
impl PartialEq for FrozenParameterGate {
    fn eq(&self, other: &Self) -> bool {
        *self.gate == *other.gate && self.fixed == other.fixed
    }
}

impl Unitary for FrozenParameterGate {
    fn name(&self) -> String {
        let fixed: Vec<String> = self.fixed.iter().map(|(i, v)| format!("{i}={v}")).collect();
        format!("frozen({}; {})", self.gate.name(), fixed.join(", "))
    }

    fn radixes(&self) -> &Radixes {
        self.gate.radixes()
    }

    fn num_params(&self) -> usize {
        self.unfixed.len()
    }
}

impl Gate for FrozenParameterGate {
    fn is_differentiable(&self) -> bool {
        self.gate.is_differentiable()
    }

    fn get_unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.gate.get_unitary(&self.get_full_params(params)?)
    }

    fn get_grad(&self, params: &[f64]) -> IrResult<Gradient> {
        let grads = self.gate.get_grad(&self.get_full_params(params)?)?;
        Ok(self.keep_unfixed(grads))
    }

    fn get_unitary_and_grad(&self, params: &[f64]) -> IrResult<(UnitaryMatrix, Gradient)> {
        let (utry, grads) = self.gate.get_unitary_and_grad(&self.get_full_params(params)?)?;
        Ok((utry, self.keep_unfixed(grads)))
    }

    fn optimize(&self, env: &Array2<Complex64>) -> IrResult<Vec<f64>> {
        let params = self.gate.optimize(env)?;
        Ok(self.keep_unfixed(params))
    }
}

impl FrozenParameterGate {
    fn keep_unfixed<T>(&self, values: Vec<T>) -> Vec<T> {
        values
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !self.fixed.contains_key(i))
            .map(|(_, v)| v)
            .collect()
    }
}

/// Freezes the parameters named in `frozen` (index -> value) on `gate`.
pub fn with_frozen_params(
    gate: GateRef,
    frozen: impl IntoIterator<Item = (usize, f64)>,
) -> IrResult<FrozenParameterGate> {
    FrozenParameterGate::new(gate, frozen.into_iter().collect())
}

/// Freezes a prefix of `gate`'s parameters to `params`; all of them when
/// `params` has `num_params` entries.
pub fn with_all_frozen_params(gate: GateRef, params: &[f64]) -> IrResult<FrozenParameterGate> {
    with_frozen_params(gate, params.iter().copied().enumerate())
}

impl From<FrozenParameterGate> for GateRef {
    fn from(gate: FrozenParameterGate) -> Self {
        Arc::new(gate)
    }
}
